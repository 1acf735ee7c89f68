use tracing::debug;

use super::error::{EstimateError, InvalidReason, Result};
use super::{ParameterCount, QuantizationBits};

/// Parses the free-text parameter count (billions). Surrounding whitespace is ignored.
pub fn parse_parameters(raw: &str) -> Result<ParameterCount> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(reject(raw, InvalidReason::Empty));
    }
    let value: f64 = text.parse().map_err(|_| reject(raw, InvalidReason::NotANumber))?;
    ParameterCount::new(value).map_err(|e| reject(raw, e.reason()))
}

pub fn parse_quant_bits(raw: &str) -> Result<QuantizationBits> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(reject(raw, InvalidReason::Empty));
    }
    let bits: u32 = text.parse().map_err(|_| reject(raw, InvalidReason::NotANumber))?;
    QuantizationBits::try_from(bits).map_err(|e| reject(raw, e.reason()))
}

fn reject(raw: &str, reason: InvalidReason) -> EstimateError {
    debug!(input = %raw, %reason, "Rejected input");
    EstimateError::invalid(reason)
}
