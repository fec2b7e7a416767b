//! Tracing setup shared by the webdav-proxy binaries: fmt logging to stderr
//! with an optional OTLP exporter layered on top.

pub mod config;
pub mod otlp;
pub mod spans;

pub use config::{OtlpProtocol, TracingConfig};
pub use otlp::{init_tracing, TracingGuard};
