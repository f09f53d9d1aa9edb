//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

use crate::constants::DEFAULT_API_BASE_URL;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "CLASHGEN_DEBUG")]
    /// Enable debug logging. Env: CLASHGEN_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "9000", env = "CLASHGEN_PORT")]
    /// http listener, defaults to `9000`.
    /// Env: CLASHGEN_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "CLASHGEN_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: CLASHGEN_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    /// Gemini API key, read once at startup.
    /// Env: GEMINI_API_KEY
    pub api_key: String,

    #[clap(long, default_value = DEFAULT_API_BASE_URL, env = "CLASHGEN_API_BASE_URL")]
    /// Base URL model paths are joined onto; keep the trailing `/`.
    /// Env: CLASHGEN_API_BASE_URL
    pub api_base_url: url::Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let cli = CliOptions::try_parse_from(["clashgen", "--api-key", "secret"]).unwrap();
        assert_eq!(cli.port.get(), 9000);
        assert_eq!(cli.listen_address, "127.0.0.1");
        assert_eq!(cli.api_base_url.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(cli.api_key, "secret");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = CliOptions::try_parse_from([
            "clashgen",
            "--api-key",
            "secret",
            "--api-base-url",
            "not a url",
        ]);
        assert!(result.is_err());
    }
}
