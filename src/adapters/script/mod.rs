//! Script runtime adapters.

mod static_runtime;

pub use static_runtime::StaticScriptRuntime;
