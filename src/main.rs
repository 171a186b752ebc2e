//! A tool that polls an AMPS server's JSON status endpoint and republishes
//! its counters as monitoring metrics.
//!
//! # Overview
//!
//! `amps-monitor` issues a single GET request to `<host>:<port>/amps.json`,
//! walks the returned status document, and flattens the host cpu / memory /
//! network counters and the instance cpu / cache / query / processor
//! counters into pipe-separated metric names like
//! `Custom Metrics|AMPS|host|cpus|system_percent`. Each surviving metric is
//! written to stdout as one machine-agent protocol line.
//!
//! # Quick Start
//!
//! Generate a configuration file, point it at your AMPS server, and run:
//!
//! ```bash
//! amps-monitor init config.yml
//! amps-monitor run --config config.yml
//! ```
//!
//! # Configuration
//!
//! Configuration files can be YAML, TOML, or JSON (chosen by extension).
//! The interesting fields:
//!
//! ```yaml
//! host: "amps.example.com"
//! port: 8085
//! use_ssl: false
//! username: "admin"
//! password: ""
//! password_obfuscated: "DAoKFQ4aAg=="
//! encryption_key: "welcome"
//! metric_prefix: "Custom Metrics|AMPS|"
//! disabled_metrics:
//!   - "host\\|network\\|lo\\|.*"
//! ```
//!
//! A plaintext `password` wins over `password_obfuscated` when both are
//! set. Obfuscated passwords are produced with:
//!
//! ```bash
//! amps-monitor obfuscate 's3cret' 'welcome'
//! ```
//!
//! Entries in `disabled_metrics` are regular expressions matched against
//! the whole fully-qualified name (before the prefix is attached); entries
//! that fail to compile are ignored with a warning.
//!
//! # Checking a configuration
//!
//! ```bash
//! amps-monitor validate config.yml
//! ```
//!
//! reports parse errors, missing credentials, and exclusion patterns that
//! will not compile, without touching the network.
//!
//! # Diagnostics
//!
//! ```bash
//! amps-monitor run --config config.yml --log-level debug
//! ```
//!
//! Metrics go to stdout; logs and the task summary go to stderr.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

mod commands;

use crate::commands::{
    InitArgs, ObfuscateArgs, RunArgs, ValidateArgs, init_config, obfuscate_password, run_monitor, validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "amps-monitor", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: MonitorSubcommand,
}

#[derive(Subcommand, Debug)]
enum MonitorSubcommand {
    /// Poll the AMPS server once and report its metrics
    Run(RunArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
    /// Obfuscate a password for use in a configuration file
    Obfuscate(ObfuscateArgs),
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    match Cli::parse().command {
        MonitorSubcommand::Run(run_args) => run_monitor(&run_args).await,
        MonitorSubcommand::Init(init_args) => init_config(&init_args),
        MonitorSubcommand::Validate(validate_args) => validate_config(&validate_args),
        MonitorSubcommand::Obfuscate(obfuscate_args) => obfuscate_password(&obfuscate_args),
    }
}
