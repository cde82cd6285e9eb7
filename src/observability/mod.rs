//! Observability for Tienda
//!
//! Log output goes through `tracing`. The subscriber writes either
//! human-readable lines or one JSON object per event.

mod logging;

pub use logging::{init_logging, LogFormat};
