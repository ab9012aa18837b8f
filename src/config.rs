//! Server configuration.
//!
//! Every flag has an environment fallback, so the service runs with no
//! arguments at all:
//!   pdftext-server
//!
//! Or with args:
//!   pdftext-server --bind 127.0.0.1:9000 --no-page-count

use clap::Parser;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, Parser)]
#[command(name = "pdftext-server", version, about = "Extract text from uploaded PDF files")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "PDFTEXT_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Leave `pageCount` out of successful responses
    #[arg(long, env = "PDFTEXT_NO_PAGE_COUNT")]
    pub no_page_count: bool,

    /// Report failures with 4xx statuses instead of 200
    #[arg(long, env = "PDFTEXT_STRICT_STATUS")]
    pub strict_status: bool,

    /// Maximum request body size in bytes (no limit when unset)
    #[arg(long, env = "PDFTEXT_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<usize>,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "PDFTEXT_CORS_PERMISSIVE")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            no_page_count: false,
            strict_status: false,
            max_upload_bytes: None,
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_page_count: !self.no_page_count,
            strict_status: self.strict_status,
        }
    }
}

/// Per-request behavior of the extraction handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub include_page_count: bool,
    pub strict_status: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_page_count: true,
            strict_status: false,
        }
    }
}
