//! Configuration resolution for songslide-relay

use songslide_common::config::{load_toml_config, resolve_port, resolve_setting};
use songslide_common::{Error, Result};
use std::path::Path;
use std::time::Duration;

/// Timeout for the outbound upstream call
///
/// The upstream script imposes none; without a bound here a hung upstream
/// would pin inbound requests indefinitely.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Resolved relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Listen port (default 4000)
    pub port: u16,
    /// Upstream script endpoint (required)
    pub upstream_url: String,
}

impl RelayConfig {
    /// Resolve configuration with CLI → ENV → TOML → default priority
    ///
    /// The upstream URL is the one required setting; without it the relay
    /// has nothing to forward to and refuses to start.
    pub fn resolve(
        cli_port: Option<u16>,
        cli_script_url: Option<String>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let toml_config = load_toml_config(config_path)?;

        let upstream_url = resolve_setting(
            "Upstream script URL",
            cli_script_url,
            "SONGSLIDE_SCRIPT_URL",
            toml_config.script_url.as_deref(),
        )
        .ok_or_else(|| {
            Error::Config(
                "Upstream script URL not configured. Please configure using one of:\n\
                 1. Command line: songslide-relay --script-url <url>\n\
                 2. Environment: SONGSLIDE_SCRIPT_URL=<url>\n\
                 3. TOML config: ~/.config/songslide/config.toml (script_url = \"<url>\")"
                    .to_string(),
            )
        })?;

        let port = resolve_port(cli_port, toml_config.port);

        Ok(Self { port, upstream_url })
    }
}
