//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Konfiguration, die von `app`, `render` und der Binary
//! gleichermaßen gelesen wird.

pub mod options;

pub use options::{EngineOptions, FailurePolicy};
