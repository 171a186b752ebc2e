use crate::Result;
use crate::error::MonitorError;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

const fn default_port() -> u16 {
    8085
}

fn default_metric_prefix() -> String {
    "Custom Metrics|AMPS|".to_string()
}

/// Connection and reporting settings for one AMPS admin endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Host name or IP address of the AMPS admin endpoint
    pub host: String,

    /// Port of the AMPS admin endpoint
    #[serde(default = "default_port")]
    pub port: u16,

    /// Use https instead of http
    #[serde(default)]
    pub use_ssl: bool,

    /// Basic-auth user name; empty means no authentication
    #[serde(default)]
    pub username: String,

    /// Plaintext basic-auth password; wins over `password_obfuscated` when both are set
    #[serde(default)]
    pub password: String,

    /// Base64 form of the password obfuscated with `encryption_key`
    #[serde(default)]
    pub password_obfuscated: String,

    /// Key used to decode `password_obfuscated`
    #[serde(default)]
    pub encryption_key: String,

    /// Prefix attached to every reported metric name
    #[serde(default = "default_metric_prefix")]
    pub metric_prefix: String,

    /// Full-match regular expressions naming metrics to suppress
    #[serde(default)]
    pub disabled_metrics: Vec<String>,
}

impl Config {
    /// Load configuration from a file
    ///
    /// The format is chosen by file extension: `.toml`, `.yml`/`.yaml`, or
    /// `.json`. Also returns a list of non-fatal validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// required field is missing.
    pub fn load(path: &Utf8Path) -> Result<(Self, Vec<String>)> {
        let text = fs::read_to_string(path).map_err(|source| MonitorError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;

        let extension = path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).map_err(|e| MonitorError::ConfigParse {
                path: path.to_owned(),
                message: e.to_string(),
            })?,
            "yml" | "yaml" => serde_yaml::from_str(&text).map_err(|e| MonitorError::ConfigParse {
                path: path.to_owned(),
                message: e.to_string(),
            })?,
            "json" => serde_json::from_str(&text).map_err(|e| MonitorError::ConfigParse {
                path: path.to_owned(),
                message: e.to_string(),
            })?,
            _ => {
                return Err(MonitorError::ConfigParse {
                    path: path.to_owned(),
                    message: format!("unsupported configuration file extension: '{extension}'"),
                });
            }
        };

        if config.host.trim().is_empty() {
            return Err(MonitorError::ConfigInvalid("'host' must not be empty".to_string()));
        }

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Save the default configuration to a file, preserving the comments
    /// from the embedded YAML when the target format is YAML
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();

        let text = match extension {
            "yml" | "yaml" => DEFAULT_CONFIG_YAML.to_string(),
            "toml" => toml::to_string_pretty(&Self::default()).map_err(|e| MonitorError::ConfigParse {
                path: output_path.to_owned(),
                message: e.to_string(),
            })?,
            "json" => serde_json::to_string_pretty(&Self::default()).map_err(|e| MonitorError::ConfigParse {
                path: output_path.to_owned(),
                message: e.to_string(),
            })?,
            _ => {
                return Err(MonitorError::ConfigParse {
                    path: output_path.to_owned(),
                    message: format!("unsupported configuration file extension: '{extension}'"),
                });
            }
        };

        fs::write(output_path, text).map_err(|source| MonitorError::ConfigRead {
            path: output_path.to_owned(),
            source,
        })?;
        Ok(())
    }

    /// The base URL of the admin endpoint, e.g. `https://amps.example.com:8085/`
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}/", self.host, self.port)
    }

    /// Detect settings that are legal but probably not what the user meant
    fn validate(&self, warnings: &mut Vec<String>) {
        if !self.password.is_empty() && !self.password_obfuscated.is_empty() {
            warnings.push("both 'password' and 'password_obfuscated' are set; the plaintext password will be used".to_string());
        }

        if !self.encryption_key.is_empty() && self.password_obfuscated.is_empty() {
            warnings.push("'encryption_key' is set but 'password_obfuscated' is empty; the key will be ignored".to_string());
        }

        if self.metric_prefix.is_empty() {
            warnings.push("'metric_prefix' is empty; metrics will be reported without a prefix".to_string());
        }

        if self.username.is_empty() && !self.password.is_empty() {
            warnings.push("'password' is set but 'username' is empty; authentication will not be attempted".to_string());
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG_YAML).expect("default_config.yml should be valid YAML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::io::Write;

    fn write_temp(extension: &str, contents: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join(format!("config.{extension}"))).unwrap();
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn load_yaml() {
        let (_dir, path) = write_temp(
            "yml",
            "host: amps.example.com\nport: 9090\nuse_ssl: true\nmetric_prefix: \"P|\"\ndisabled_metrics:\n  - \"host\\\\|cpus\\\\|.*\"\n",
        );

        let (config, warnings) = Config::load(&path).unwrap();
        assert_eq!(config.host, "amps.example.com");
        assert_eq!(config.port, 9090);
        assert!(config.use_ssl);
        assert_eq!(config.metric_prefix, "P|");
        assert_eq!(config.disabled_metrics, vec!["host\\|cpus\\|.*".to_string()]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn load_toml() {
        let (_dir, path) = write_temp("toml", "host = \"localhost\"\n");

        let (config, _) = Config::load(&path).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8085);
        assert!(!config.use_ssl);
        assert_eq!(config.metric_prefix, "Custom Metrics|AMPS|");
    }

    #[test]
    fn load_json() {
        let (_dir, path) = write_temp("json", r#"{"host": "localhost", "port": 8086}"#);

        let (config, _) = Config::load(&path).unwrap();
        assert_eq!(config.port, 8086);
    }

    #[test]
    fn missing_file_is_config_read_error() {
        let result = Config::load(Utf8Path::new("/nonexistent/amps.yml"));
        assert!(matches!(result, Err(MonitorError::ConfigRead { .. })));
    }

    #[test]
    fn unknown_extension_rejected() {
        let (_dir, path) = write_temp("ini", "host = localhost");
        let result = Config::load(&path);
        assert!(matches!(result, Err(MonitorError::ConfigParse { .. })));
    }

    #[test]
    fn unknown_field_rejected() {
        let (_dir, path) = write_temp("yml", "host: localhost\nhsot_typo: oops\n");
        let result = Config::load(&path);
        assert!(matches!(result, Err(MonitorError::ConfigParse { .. })));
    }

    #[test]
    fn empty_host_rejected() {
        let (_dir, path) = write_temp("yml", "host: \"\"\n");
        let result = Config::load(&path);
        assert!(matches!(result, Err(MonitorError::ConfigInvalid(_))));
    }

    #[test]
    fn conflicting_passwords_warn() {
        let (_dir, path) = write_temp(
            "yml",
            "host: localhost\nusername: admin\npassword: a\npassword_obfuscated: YQ==\nencryption_key: k\n",
        );
        let (_, warnings) = Config::load(&path).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("plaintext password will be used"));
    }

    #[test]
    fn base_url_reflects_scheme() {
        let config = Config {
            host: "amps.example.com".to_string(),
            port: 8443,
            use_ssl: true,
            ..Config::default()
        };
        assert_eq!(config.base_url(), "https://amps.example.com:8443/");
    }

    #[test]
    fn default_config_yaml_parses() {
        let config = Config::default();
        assert_eq!(config.host, "localhost");
        assert!(config.disabled_metrics.is_empty());
    }
}
