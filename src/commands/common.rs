//! Logging setup shared by the subcommands.

use clap::ValueEnum;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}

/// Print configuration validation warnings to stderr, if any.
pub fn print_warnings(warnings: &[String]) {
    if !warnings.is_empty() {
        eprintln!("\n⚠️  Configuration validation warnings:");
        for warning in warnings {
            eprintln!("   {warning}");
        }
        eprintln!();
    }
}
