//! Panel host adapters.

mod recording_host;

pub use recording_host::RecordingHost;
