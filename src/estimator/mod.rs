//! GPU memory estimation for loading a model.
//!
//! `M = (P × 4) / (32 / Q) × 1.2`: every parameter costs 4 bytes at full
//! 32-bit precision, storage shrinks by `Q / 32` when quantized, and a flat
//! 20% is added for activations and runtime buffers.

pub mod error;
pub mod input;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use error::{EstimateError, InvalidReason, Result, INVALID_INPUT};
pub use input::{parse_parameters, parse_quant_bits};

/// Bytes per parameter at full precision.
pub const BYTES_PER_PARAM: f64 = 4.0;
/// Bits per parameter at full precision.
pub const FULL_PRECISION_BITS: f64 = 32.0;
/// Runtime overhead multiplier (20%).
pub const OVERHEAD_FACTOR: f64 = 1.2;

/// Model size in billions of parameters. Always finite and non-negative, and
/// small enough that its full-precision estimate stays finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ParameterCount(f64);

impl ParameterCount {
    pub fn new(billions: f64) -> Result<Self> {
        if !billions.is_finite() {
            return Err(EstimateError::invalid(InvalidReason::NonFinite));
        }
        if billions < 0.0 {
            return Err(EstimateError::invalid(InvalidReason::Negative));
        }
        if !(billions * BYTES_PER_PARAM * OVERHEAD_FACTOR).is_finite() {
            return Err(EstimateError::invalid(InvalidReason::TooLarge));
        }
        // folds -0.0 into 0.0 so it never renders as "-0.00 GB"
        Ok(Self(if billions == 0.0 { 0.0 } else { billions }))
    }

    pub fn billions(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ParameterCount {
    type Error = EstimateError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum QuantizationBits {
    Four,
    Eight,
    Sixteen,
    ThirtyTwo,
}

impl QuantizationBits {
    /// Selection order offered to users, widest first.
    pub const ALL: [QuantizationBits; 4] =
        [QuantizationBits::ThirtyTwo, QuantizationBits::Sixteen, QuantizationBits::Eight, QuantizationBits::Four];

    pub fn bits(self) -> u32 {
        match self {
            QuantizationBits::Four => 4,
            QuantizationBits::Eight => 8,
            QuantizationBits::Sixteen => 16,
            QuantizationBits::ThirtyTwo => 32,
        }
    }
}

impl Default for QuantizationBits {
    fn default() -> Self {
        QuantizationBits::Eight
    }
}

impl TryFrom<u32> for QuantizationBits {
    type Error = EstimateError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            4 => Ok(QuantizationBits::Four),
            8 => Ok(QuantizationBits::Eight),
            16 => Ok(QuantizationBits::Sixteen),
            32 => Ok(QuantizationBits::ThirtyTwo),
            other => Err(EstimateError::invalid(InvalidReason::UnsupportedQuantBits(other))),
        }
    }
}

impl From<QuantizationBits> for u32 {
    fn from(q: QuantizationBits) -> u32 {
        q.bits()
    }
}

impl fmt::Display for QuantizationBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Estimated GPU memory in gigabytes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct MemoryEstimate(f64);

impl MemoryEstimate {
    pub fn gigabytes(self) -> f64 {
        self.0
    }
}

/// Renders as `"<value to 2 decimals> GB"`.
impl fmt::Display for MemoryEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} GB", self.0)
    }
}

pub fn estimate(parameters: ParameterCount, quant: QuantizationBits) -> MemoryEstimate {
    let shrink = FULL_PRECISION_BITS / f64::from(quant.bits());
    MemoryEstimate((parameters.billions() * BYTES_PER_PARAM) / shrink * OVERHEAD_FACTOR)
}

/// Validating entry point over raw numbers. Rejects negative, non-finite or
/// overflowing parameter counts and any bit width other than 32, 16, 8 or 4.
pub fn estimate_memory_gb(parameters_billions: f64, quant_bits: u32) -> Result<f64> {
    let parameters = ParameterCount::new(parameters_billions)?;
    let quant = QuantizationBits::try_from(quant_bits)?;
    Ok(estimate(parameters, quant).gigabytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn gb(p: f64, q: u32) -> f64 {
        estimate_memory_gb(p, q).expect("valid inputs")
    }

    #[test]
    fn zero_parameters_need_no_memory() {
        for q in QuantizationBits::ALL {
            assert_eq!(gb(0.0, q.bits()), 0.0);
        }
    }

    #[test]
    fn negative_zero_is_normalised() {
        let p = ParameterCount::new(-0.0).unwrap();
        assert!(p.billions().is_sign_positive());
        assert_eq!(estimate(p, QuantizationBits::Four).to_string(), "0.00 GB");
    }

    #[test]
    fn known_models() {
        let cases = [(7.0, 8, "8.40 GB"), (7.0, 4, "4.20 GB"), (70.0, 16, "168.00 GB"), (13.0, 32, "62.40 GB")];
        for (p, q, want) in cases {
            let est = estimate(ParameterCount::new(p).unwrap(), QuantizationBits::try_from(q).unwrap());
            assert_eq!(est.to_string(), want, "P={p} Q={q}");
        }
    }

    #[test]
    fn matches_simplified_form() {
        for q in QuantizationBits::ALL {
            let p = 6.7;
            assert!(close(gb(p, q.bits()), p * (f64::from(q.bits()) / 8.0) * 1.2));
        }
    }

    #[test]
    fn rejects_bad_raw_numbers() {
        assert_eq!(estimate_memory_gb(-1.0, 8).unwrap_err().reason(), InvalidReason::Negative);
        assert_eq!(estimate_memory_gb(f64::NAN, 8).unwrap_err().reason(), InvalidReason::NonFinite);
        assert_eq!(estimate_memory_gb(f64::INFINITY, 8).unwrap_err().reason(), InvalidReason::NonFinite);
        for q in [0, 1, 2, 3, 5, 12, 64] {
            assert_eq!(
                estimate_memory_gb(7.0, q).unwrap_err().reason(),
                InvalidReason::UnsupportedQuantBits(q)
            );
        }
    }

    #[test]
    fn rejects_counts_whose_estimate_overflows() {
        for p in [1e308, 1.5e308, f64::MAX] {
            assert_eq!(estimate_memory_gb(p, 4).unwrap_err().reason(), InvalidReason::TooLarge, "P={p}");
        }
        let largest = f64::MAX / (BYTES_PER_PARAM * OVERHEAD_FACTOR) / 2.0;
        for q in QuantizationBits::ALL {
            assert!(gb(largest, q.bits()).is_finite());
        }
    }

    #[test]
    fn default_quantization_is_eight_bits() {
        assert_eq!(QuantizationBits::default().bits(), 8);
    }

    #[test]
    fn quant_bits_serde_as_integer() {
        let json = serde_json::to_string(&QuantizationBits::Sixteen).unwrap();
        assert_eq!(json, "16");
        let back: QuantizationBits = serde_json::from_str("4").unwrap();
        assert_eq!(back, QuantizationBits::Four);
        assert!(serde_json::from_str::<QuantizationBits>("7").is_err());
    }

    proptest! {
        #[test]
        fn full_precision_is_four_bytes_plus_overhead(p in 0.0f64..10_000.0) {
            prop_assert_eq!(gb(p, 32), p * 4.0 * 1.2);
        }

        #[test]
        fn eight_bit_is_quarter_of_full_precision(p in 0.0f64..10_000.0) {
            prop_assert!(close(gb(p, 8), gb(p, 32) / 4.0));
        }

        #[test]
        fn increasing_in_parameters(p1 in 0.0f64..10_000.0, delta in 0.001f64..1_000.0) {
            let p2 = p1 + delta;
            for q in QuantizationBits::ALL {
                prop_assert!(gb(p1, q.bits()) < gb(p2, q.bits()));
            }
        }

        #[test]
        fn increasing_in_quant_bits(p in 0.001f64..10_000.0) {
            let by_width: Vec<f64> = [4, 8, 16, 32].iter().map(|&q| gb(p, q)).collect();
            prop_assert!(by_width.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn never_negative(p in 0.0f64..1e12) {
            for q in QuantizationBits::ALL {
                prop_assert!(gb(p, q.bits()) >= 0.0);
            }
        }
    }
}
