use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

use crate::estimator::QuantizationBits;
use crate::shell::OutputFormat;

pub const CONFIG_FILE_NAMES: [&str; 2] = ["ai-memorator.toml", "AI-Memorator.toml"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfig {
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default = "default_quant_bits")]
    pub default_quant_bits: u32,
}
fn default_quant_bits() -> u32 {
    8
}
impl Default for EstimatorConfig {
    fn default() -> Self {
        Self { default_quant_bits: default_quant_bits() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "warn".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub default_quant_bits: QuantizationBits,
    pub format: OutputFormat,
    pub log_level: String,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self { default_quant_bits: QuantizationBits::default(), format: OutputFormat::default(), log_level: default_log_level() }
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# AI Memorator Configuration

[estimator]
# Quantization used when --quant-bits is not given. One of 32, 16, 8, 4. Default: 8
default_quant_bits = 8

[output]
# Result format: "text" prints "8.40 GB", "json" prints a JSON object. Default: "text"
format = "text"

[logging]
# Log filter used when RUST_LOG is unset (error, warn, info, debug, trace). Default: "warn"
level = "warn"
"#;

/// Environment overrides applied on top of the file. Kept separate so tests don't touch the process env.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub quant_bits: Option<String>,
    pub format: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            quant_bits: std::env::var("AI_MEMORATOR_QUANT_BITS").ok(),
            format: std::env::var("AI_MEMORATOR_FORMAT").ok(),
            log_level: std::env::var("AI_MEMORATOR_LOG").ok(),
        }
    }
}

/// Reads the config file from the working directory (if any) plus `.env` and process env.
/// Never creates a file; a missing or broken config falls back to defaults.
pub fn load_config() -> EffectiveConfig {
    let _ = dotenvy::dotenv();
    load_config_from(Path::new("."), &EnvOverrides::from_env())
}

pub fn load_config_from(dir: &Path, env: &EnvOverrides) -> EffectiveConfig {
    let mut raw = RawConfig::default();

    if let Some(contents) = CONFIG_FILE_NAMES.iter().find_map(|name| std::fs::read_to_string(dir.join(name)).ok()) {
        match toml::from_str::<RawConfig>(&contents) {
            Ok(parsed) => raw = parsed,
            Err(e) => tracing::warn!(?e, "Failed to parse ai-memorator config; using defaults"),
        }
    }

    let file_bits = QuantizationBits::try_from(raw.estimator.default_quant_bits).unwrap_or_else(|e| {
        tracing::warn!(bits = raw.estimator.default_quant_bits, reason = %e.reason(), "Ignoring default_quant_bits");
        QuantizationBits::default()
    });
    let env_bits = env.quant_bits.as_deref().and_then(|s| match crate::estimator::parse_quant_bits(s) {
        Ok(q) => Some(q),
        Err(e) => {
            tracing::warn!(value = %s, reason = %e.reason(), "Ignoring AI_MEMORATOR_QUANT_BITS");
            None
        }
    });
    let env_format = env.format.as_deref().and_then(|s| match s.parse::<OutputFormat>() {
        Ok(f) => Some(f),
        Err(e) => {
            tracing::warn!(value = %s, error = %e, "Ignoring AI_MEMORATOR_FORMAT");
            None
        }
    });

    let file_level = checked_log_level(&raw.logging.level, "logging.level").unwrap_or_else(default_log_level);
    let env_level = env.log_level.as_deref().and_then(|s| checked_log_level(s, "AI_MEMORATOR_LOG"));

    EffectiveConfig {
        default_quant_bits: env_bits.unwrap_or(file_bits),
        format: env_format.unwrap_or(raw.output.format),
        log_level: env_level.unwrap_or(file_level),
    }
}

/// Accepts a plain level name (`off`, `error` .. `trace`); anything else would be read by
/// `EnvFilter` as a target directive and hide this crate's own warnings.
fn checked_log_level(value: &str, source: &str) -> Option<String> {
    match value.trim().parse::<LevelFilter>() {
        Ok(level) => Some(level.to_string().to_ascii_lowercase()),
        Err(e) => {
            tracing::warn!(%value, %source, error = %e, "Ignoring log level");
            None
        }
    }
}
