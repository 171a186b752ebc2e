use amps_monitor::config::Config;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "config.yml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<(), ohno::AppError> {
    Config::save_default(&args.output).into_app_err("could not generate configuration file")?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
