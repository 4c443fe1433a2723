use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "pocket_ledger=info";

/// Installs the global subscriber.
pub fn init_tracing(extra: Option<&str>) {
    let _ = fmt().with_env_filter(build_filter(extra)).try_init();
}

/// `RUST_LOG`, or the default directive when it is unset, with `extra` added
/// on top. For the same target `extra` overrides `RUST_LOG`.
fn build_filter(extra: Option<&str>) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(default_directive())
        .from_env_lossy();
    match extra.and_then(parse_directive) {
        Some(directive) => filter.add_directive(directive),
        None => filter,
    }
}

fn default_directive() -> Directive {
    parse_directive(DEFAULT_DIRECTIVE).unwrap_or_else(|| tracing::Level::INFO.into())
}

fn parse_directive(raw: &str) -> Option<Directive> {
    raw.trim().parse().ok()
}
