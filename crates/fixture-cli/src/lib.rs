//! Library side of the `claims-fixtures` binary: logging setup and the
//! per-model processing pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
