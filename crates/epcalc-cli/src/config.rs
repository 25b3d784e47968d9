//! EPCalc CLI configuration

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use epcalc_common::{EpcError, Result, DEFAULT_TARGET_MARGIN};
use epcalc_engine::EngineConfig;
use rust_decimal::Decimal;

/// Default output document path
pub const DEFAULT_OUTPUT: &str = "epc_result.json";

/// Command-line flags; unset flags fall back to `EPC_*` env vars, then defaults
#[derive(Debug, Parser)]
#[command(author, version, about = "Compute EPC and CPC guidance from a model document")]
pub struct Args {
    /// Path to the model JSON input
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// Where to write the result JSON [default: epc_result.json]
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Target margin for the CPC cap, as a decimal in [0, 1) [default: 0.30]
    #[arg(long)]
    pub margin: Option<Decimal>,

    /// Treat weight-sum drift as an error
    #[arg(long)]
    pub strict: bool,
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub margin: Decimal,
    pub strict: bool,
}

impl CliConfig {
    /// Load configuration from flags, `.env` and the environment
    pub fn load(args: Args) -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();
        Self::from_sources(args, |key| std::env::var(key).ok())
    }

    /// Flags win over `EPC_OUT` / `EPC_MARGIN` / `EPC_STRICT`
    pub fn from_sources(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let output = match args.output {
            Some(path) => path,
            None => env("EPC_OUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        };

        let margin = match (args.margin, env("EPC_MARGIN")) {
            (Some(margin), _) => margin,
            (None, Some(raw)) => Decimal::from_str(raw.trim())
                .map_err(|e| EpcError::Config(format!("EPC_MARGIN '{}': {}", raw, e)))?,
            (None, None) => DEFAULT_TARGET_MARGIN,
        };

        let strict = args.strict
            || match env("EPC_STRICT") {
                Some(raw) => parse_flag(&raw)?,
                None => false,
            };

        Ok(Self {
            input: args.input,
            output,
            margin,
            strict,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            strict: self.strict,
            target_margin: self.margin,
            ..Default::default()
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(EpcError::Config(format!("EPC_STRICT '{}' is not a boolean", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("epcalc").chain(argv.iter().copied())).unwrap()
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_sources(parse(&["--in", "model.json"]), env_of(&[])).unwrap();

        assert_eq!(config.input, PathBuf::from("model.json"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.margin, dec!(0.30));
        assert!(!config.strict);
    }

    #[test]
    fn test_flags_override_env() {
        let args = parse(&["--in", "m.json", "--out", "r.json", "--margin", "0.25", "--strict"]);
        let env = env_of(&[("EPC_MARGIN", "0.5"), ("EPC_OUT", "env.json"), ("EPC_STRICT", "false")]);
        let config = CliConfig::from_sources(args, env).unwrap();

        assert_eq!(config.output, PathBuf::from("r.json"));
        assert_eq!(config.margin, dec!(0.25));
        assert!(config.strict);
    }

    #[test]
    fn test_env_fallbacks() {
        let env = env_of(&[("EPC_MARGIN", " 0.4 "), ("EPC_STRICT", "yes")]);
        let config = CliConfig::from_sources(parse(&["--in", "m.json"]), env).unwrap();

        assert_eq!(config.margin, dec!(0.4));
        assert!(config.strict);
        assert!(config.engine_config().strict);
    }

    #[test]
    fn test_invalid_env_values() {
        let err = CliConfig::from_sources(parse(&["--in", "m.json"]), env_of(&[("EPC_MARGIN", "lots")]));
        assert!(matches!(err, Err(EpcError::Config(_))));

        let err = CliConfig::from_sources(parse(&["--in", "m.json"]), env_of(&[("EPC_STRICT", "maybe")]));
        assert!(matches!(err, Err(EpcError::Config(_))));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["epcalc", "--margin", "0.3"]).is_err());
    }
}
