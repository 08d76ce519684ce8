//! Log setup for binaries and tests that embed pokefind.
//!
//! The library itself only emits `tracing` events. Each line starts with a
//! [`prefix`] glyph naming the subsystem that produced it.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact subscriber at `info`, or whatever `RUST_LOG` asks for.
pub fn init() {
    init_with_filter("info");
}

/// Like [`init`], with `default_filter` used when `RUST_LOG` is unset.
///
/// Uses `try_init`, so an application that already installed its own global
/// subscriber keeps it and this call does nothing. Safe to call from every test.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Subsystem glyphs placed at the start of log lines.
pub mod prefix {
    /// Query scheduling and debounce
    pub const SEARCH: &str = "⌕";
    /// Catalog and detail fetches
    pub const FETCH: &str = "⇣";
    /// Fuzzy index builds
    pub const INDEX: &str = "⊞";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_with_filter("debug");
        init();
    }

    #[test]
    fn test_init_leaves_installed_subscriber() {
        init();
        assert!(::tracing::dispatcher::has_been_set());
        // Second install is a silent no-op
        init_with_filter("trace");
        assert!(::tracing::dispatcher::has_been_set());
    }
}
