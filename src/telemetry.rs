//! Logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::FeatureFlags;

const DEFAULT_DIRECTIVE: &str = "chatkit_panel=info";
const VERBOSE_DIRECTIVE: &str = "chatkit_panel=debug";

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(features: &FeatureFlags) -> &'static str {
    if features.verbose_diagnostics {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this more than once
/// (or after another subscriber was installed) leaves the first one in
/// place.
pub fn init(features: &FeatureFlags) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(features)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if features.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_diagnostics_raise_level() {
        let verbose = FeatureFlags {
            verbose_diagnostics: true,
            ..Default::default()
        };
        assert_eq!(default_directive(&FeatureFlags::default()), "chatkit_panel=info");
        assert_eq!(default_directive(&verbose), "chatkit_panel=debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(&FeatureFlags::default());
        init(&FeatureFlags::default());
    }
}
