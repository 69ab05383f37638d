use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Connection-level chatter of the HTTP stack stays at `warn` unless asked for.
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "reqwest=warn"];

pub fn init_logging(default_level: &str) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(default_level))
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn default_directives(level: &str) -> String {
    std::iter::once(level)
        .chain(QUIET_DEPENDENCIES.iter().copied())
        .collect::<Vec<_>>()
        .join(",")
}
