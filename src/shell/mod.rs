//! Presentation shell: turns raw user text into a rendered result line.

pub mod about;
pub mod session;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::estimator::{
    estimate, parse_parameters, parse_quant_bits, MemoryEstimate, ParameterCount, QuantizationBits, Result,
    INVALID_INPUT,
};

pub use session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimateReport {
    pub parameters_billions: ParameterCount,
    pub quant_bits: QuantizationBits,
    pub memory_gb: MemoryEstimate,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a EstimateReport,
    display: String,
}

#[derive(Serialize)]
struct JsonFailure {
    error: &'static str,
}

/// Validates both raw inputs and runs the estimator.
pub fn calculate(raw_parameters: &str, raw_quant_bits: &str) -> Result<EstimateReport> {
    let parameters = parse_parameters(raw_parameters)?;
    let quant = parse_quant_bits(raw_quant_bits)?;
    Ok(calculate_with(parameters, quant))
}

pub fn calculate_with(parameters: ParameterCount, quant: QuantizationBits) -> EstimateReport {
    EstimateReport { parameters_billions: parameters, quant_bits: quant, memory_gb: estimate(parameters, quant) }
}

/// Renders an outcome as a single line: `8.40 GB` / `Invalid input`, or their JSON form.
pub fn render(outcome: &Result<EstimateReport>, format: OutputFormat) -> serde_json::Result<String> {
    match (outcome, format) {
        (Ok(report), OutputFormat::Text) => Ok(report.memory_gb.to_string()),
        (Err(_), OutputFormat::Text) => Ok(INVALID_INPUT.to_string()),
        (Ok(report), OutputFormat::Json) => {
            serde_json::to_string(&JsonReport { report, display: report.memory_gb.to_string() })
        }
        (Err(_), OutputFormat::Json) => serde_json::to_string(&JsonFailure { error: INVALID_INPUT }),
    }
}
