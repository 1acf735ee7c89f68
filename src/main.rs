use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ai_memorator::cli::{self, CliAction};
use ai_memorator::config::{load_config, EffectiveConfig, CONFIG_FILE_NAMES};
use ai_memorator::estimator::parse_quant_bits;
use ai_memorator::shell::{self, about::about_text, Session};
use ai_memorator::utils::{format_ram_mb, host_info};

fn main() -> Result<ExitCode> {
    let action = cli::parse_args();
    match action {
        CliAction::PrintVersion => {
            println!("{}", cli::version_line());
            return Ok(ExitCode::SUCCESS);
        }
        CliAction::InitConfig => {
            return match cli::init_config_file(std::path::Path::new(CONFIG_FILE_NAMES[0])) {
                Ok(()) => {
                    println!("Created {}", CONFIG_FILE_NAMES[0]);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{e:#}");
                    Ok(ExitCode::FAILURE)
                }
            };
        }
        CliAction::About => {
            println!("{}", about_text());
            return Ok(ExitCode::SUCCESS);
        }
        CliAction::Interactive { .. } | CliAction::Estimate { .. } => { /* continue */ }
    }

    // config problems are reported at warn before the configured filter exists
    let bootstrap = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .compact()
        .finish();
    let cfg = tracing::subscriber::with_default(bootstrap, load_config);
    init_logging(&cfg);

    if tracing::enabled!(Level::DEBUG) {
        let host = host_info();
        if host.total_mem_mb == 0 {
            warn!("Unable to determine RAM size");
        }
        debug!(
            version = env!("CARGO_PKG_VERSION"),
            os = %host.os,
            cpu = %host.cpu,
            ram = %format_ram_mb(host.total_mem_mb),
            bits = %cfg.default_quant_bits,
            "AI Memorator starting"
        );
    }

    match action {
        CliAction::Estimate { params, quant_bits, format } => {
            let raw_bits = quant_bits.unwrap_or_else(|| cfg.default_quant_bits.to_string());
            let outcome = shell::calculate(&params, &raw_bits);
            println!("{}", shell::render(&outcome, format.unwrap_or(cfg.format))?);
            Ok(if outcome.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        CliAction::Interactive { quant_bits } => {
            let quant = match quant_bits.as_deref().map(parse_quant_bits) {
                Some(Ok(q)) => q,
                Some(Err(_)) => {
                    println!("{}", ai_memorator::INVALID_INPUT);
                    return Ok(ExitCode::FAILURE);
                }
                None => cfg.default_quant_bits,
            };
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            Session::new(quant).run(stdin.lock(), &mut stdout)?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        CliAction::PrintVersion | CliAction::InitConfig | CliAction::About => Ok(ExitCode::SUCCESS),
    }
}

fn init_logging(cfg: &EffectiveConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr).compact();
    tracing_subscriber::registry().with(env_filter).with(stderr_layer).init();
}
