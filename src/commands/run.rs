use crate::commands::common::{LogLevel, init_logging, print_warnings};
use amps_monitor::config::Config;
use amps_monitor::monitor;
use amps_monitor::publish::ProtocolLineSink;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;

const LOG_TARGET: &str = "       run";

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(long, short = 'c', value_name = "PATH", default_value = "config.yml")]
    pub config: Utf8PathBuf,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Run one poll cycle and report the surviving metrics to stdout.
pub async fn run_monitor(args: &RunArgs) -> Result<(), ohno::AppError> {
    init_logging(args.log_level);

    log::info!(target: LOG_TARGET, "Using amps-monitor version [{}]", env!("CARGO_PKG_VERSION"));

    let (config, warnings) = Config::load(&args.config).into_app_err("AMPS monitor task failed")?;
    print_warnings(&warnings);

    let mut sink = ProtocolLineSink::new(std::io::stdout());
    let outcome = monitor::run_cycle(&config, &mut sink)
        .await
        .into_app_err("AMPS monitor task failed")?;

    eprintln!("Task successful: reported {} metric(s), excluded {}", outcome.reported, outcome.excluded);
    Ok(())
}
