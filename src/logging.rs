//! Process-wide logging setup.
//!
//! Console output through tracing-subscriber, filtered by `RUST_LOG`
//! (default `info`). The PDF parsing stack is always capped at `error`:
//! pdf-extract and lopdf report every odd glyph or broken xref entry, which
//! would otherwise flood the log on ordinary uploads.

use tracing_subscriber::filter::{Directive, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "info";
const QUIET_TARGETS: &[&str] = &["pdf_extract", "lopdf"];

/// Build the filter: `RUST_LOG` (or the default) plus the PDF-library caps.
pub fn build_filter(env_value: Option<&str>) -> Result<EnvFilter, String> {
    let base = match env_value {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_FILTER,
    };

    let mut filter = EnvFilter::try_new(base)
        .map_err(|e| format!("Invalid log filter '{}': {}", base, e))?;

    for target in QUIET_TARGETS {
        let directive: Directive = format!("{}=error", target)
            .parse()
            .map_err(|e| format!("Invalid log directive for {}: {}", target, e))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Install the global subscriber. Call once, before the listener is bound.
pub fn init() -> Result<(), String> {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env_value.as_deref())?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_pdf_stack() {
        let rendered = build_filter(None).unwrap().to_string();
        assert!(rendered.contains("info"));
        assert!(rendered.contains("pdf_extract=error"));
        assert!(rendered.contains("lopdf=error"));
    }

    #[test]
    fn test_env_value_respected() {
        let rendered = build_filter(Some("debug,tower_http=trace")).unwrap().to_string();
        assert!(rendered.contains("tower_http=trace"));
        assert!(rendered.contains("pdf_extract=error"));
    }

    #[test]
    fn test_blank_env_value_falls_back() {
        let rendered = build_filter(Some("  ")).unwrap().to_string();
        assert!(rendered.contains("info"));
    }

    #[test]
    fn test_invalid_filter_rejected() {
        assert!(build_filter(Some("pdftext=notalevel")).is_err());
    }
}
