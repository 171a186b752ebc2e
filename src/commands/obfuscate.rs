use amps_monitor::credentials;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct ObfuscateArgs {
    /// The plaintext password to obfuscate
    #[arg(value_name = "PASSWORD")]
    pub password: String,

    /// The key to obfuscate it with; goes in the config as `encryption_key`
    #[arg(value_name = "KEY")]
    pub key: String,
}

/// Produce the `password_obfuscated` config value for a password and key.
pub fn obfuscate_password(args: &ObfuscateArgs) -> Result<(), ohno::AppError> {
    let obfuscated = credentials::obfuscate(&args.password, &args.key).into_app_err("could not obfuscate password")?;
    println!("{obfuscated}");
    Ok(())
}
