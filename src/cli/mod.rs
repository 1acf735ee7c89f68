use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::shell::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "ai-memorator")]
#[command(about = "Estimate the GPU memory needed to load an AI model")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Model parameters, in billions (e.g. 7 or 13.5). Omit to start the interactive form
    #[arg(allow_hyphen_values = true)]
    pub params: Option<String>,

    /// Quantization bits: 32, 16, 8 or 4 [default: from config, else 8]
    #[arg(short, long = "quant-bits", value_name = "BITS", allow_hyphen_values = true)]
    pub quant_bits: Option<String>,

    /// Output format [default: from config, else text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Start the interactive form even if PARAMS is given
    #[arg(short, long)]
    pub interactive: bool,

    /// Show the formula and what each variable means
    #[arg(long)]
    pub about: bool,

    /// Write a default ai-memorator.toml in the current directory
    #[arg(long)]
    pub init_config: bool,

    /// Print version
    #[arg(short = 'V', long = "version")]
    pub version: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    PrintVersion,
    InitConfig,
    About,
    Interactive { quant_bits: Option<String> },
    Estimate { params: String, quant_bits: Option<String>, format: Option<OutputFormat> },
}

pub fn parse_args() -> CliAction {
    action_for(Cli::parse())
}

pub fn action_for(cli: Cli) -> CliAction {
    if cli.version {
        return CliAction::PrintVersion;
    }
    if cli.init_config {
        return CliAction::InitConfig;
    }
    if cli.about {
        return CliAction::About;
    }
    match cli.params {
        Some(params) if !cli.interactive => {
            CliAction::Estimate { params, quant_bits: cli.quant_bits, format: cli.format }
        }
        _ => CliAction::Interactive { quant_bits: cli.quant_bits },
    }
}

pub fn version_line() -> String {
    format!("AI Memorator v{}", env!("CARGO_PKG_VERSION"))
}

/// Writes the config template to `target`; refuses to overwrite an existing file.
pub fn init_config_file(target: &Path) -> Result<()> {
    if target.exists() {
        bail!("{} already exists; aborting --init-config", target.display());
    }
    std::fs::write(target, crate::config::DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
}
