//! AI Memorator: estimates the GPU memory needed to load a model from its
//! parameter count (billions) and quantization bit width.
//!
//! ```
//! use ai_memorator::estimate_memory_gb;
//!
//! let gb = estimate_memory_gb(7.0, 8).unwrap();
//! assert!((gb - 8.4).abs() < 1e-9);
//! assert_eq!(estimate_memory_gb(7.0, 5).unwrap_err().to_string(), "Invalid input");
//! ```

pub mod cli;
pub mod config;
pub mod estimator;
pub mod shell;
pub mod utils;

pub use estimator::{
    estimate, estimate_memory_gb, parse_parameters, parse_quant_bits, EstimateError, InvalidReason, MemoryEstimate,
    ParameterCount, QuantizationBits, INVALID_INPUT,
};
pub use shell::{calculate, render, EstimateReport, OutputFormat};
