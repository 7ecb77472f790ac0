use relaydns_domain::{CliOverrides, Config};
use tracing::info;

/// Load, override and validate the configuration.
///
/// Runs before logging is initialised, so failures are returned rather than
/// logged here.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    Ok(config)
}

pub fn log_config_summary(config: &Config) {
    info!(
        listen = %config.server.listen_address(),
        upstream = %config.dns.upstream,
        timeout_ms = config.dns.query_timeout_ms,
        authoritative = config.dns.authoritative_replies,
        parallel_questions = config.dns.parallel_questions,
        "Configuration loaded"
    );
}
