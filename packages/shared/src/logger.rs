//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a binary.
///
/// Cargo binary names use hyphens while tracing targets use underscores, so
/// `rollcall-server` becomes `rollcall_server=<level>`.
pub fn default_directive(bin_name: &str, default_level: &str) -> String {
    format!(
        "{}={level},rollcall_server={level},rollcall_shared={level},tower_http=info",
        bin_name.replace('-', "_"),
        level = default_level
    )
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_replaces_hyphens() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // when (操作):
        let directive = default_directive("rollcall-server", "debug");

        // then (期待する結果):
        assert!(directive.starts_with("rollcall_server=debug"));
        assert!(directive.contains("tower_http=info"));
    }
}
