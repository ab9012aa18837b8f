//! Extract text from uploaded PDF files over HTTP.
//!
//! The binary in `src/bin/server.rs` wires these modules together; tests
//! drive the router directly.

pub mod config;
pub mod http_server;
pub mod logging;
pub mod pdf_extractor;
