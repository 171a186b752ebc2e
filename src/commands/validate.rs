use crate::commands::common::print_warnings;
use amps_monitor::config::Config;
use amps_monitor::credentials;
use amps_monitor::filter::ExclusionFilter;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file
    #[arg(value_name = "PATH", default_value = "config.yml")]
    pub config: Utf8PathBuf,
}

/// Load a configuration file and report its problems without polling.
pub fn validate_config(args: &ValidateArgs) -> Result<(), ohno::AppError> {
    let (config, warnings) = Config::load(&args.config).into_app_err("configuration is invalid")?;
    print_warnings(&warnings);

    // Surface credential problems now instead of at the first poll.
    let _ = credentials::resolve_password(&config).into_app_err("configuration is invalid")?;

    let filter = ExclusionFilter::compile(config.disabled_metrics.iter().map(String::as_str));
    let dropped = config.disabled_metrics.len() - filter.len();
    if dropped > 0 {
        eprintln!("⚠️  {dropped} exclusion pattern(s) failed to compile and will be ignored");
    }

    println!("Configuration file is valid: {}", args.config);
    Ok(())
}
