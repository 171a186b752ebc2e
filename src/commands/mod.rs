mod common;
mod init;
mod obfuscate;
mod run;
mod validate;

pub use init::{InitArgs, init_config};
pub use obfuscate::{ObfuscateArgs, obfuscate_password};
pub use run::{RunArgs, run_monitor};
pub use validate::{ValidateArgs, validate_config};
