use crate::error::{Result, SubListError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub base_directory: PathBuf,
    pub export_dir: String,
    pub compare_dir: String,
    pub file_prefix: String,
    pub timestamp_format: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sub-list.txt"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            export_dir: "output".to_string(),
            compare_dir: "out-cmp".to_string(),
            file_prefix: "subscriber_data".to_string(),
            timestamp_format: "%Y%m%d_%H%M%S".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SubListError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SubListError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SubListError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["sublist.toml", ".sublist.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        tracing::debug!(path = default_path, "using default config file");
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input) = cli_args.input {
            self.input.path = input.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.base_directory = output_dir.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| SubListError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| SubListError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(SubListError::Config {
                message: "Input path must not be empty".to_string(),
            });
        }

        for (name, dir) in [
            ("export_dir", &self.output.export_dir),
            ("compare_dir", &self.output.compare_dir),
        ] {
            if dir.trim().is_empty() {
                return Err(SubListError::Config {
                    message: format!("output.{} must not be empty", name),
                });
            }
        }

        if self.output.file_prefix.trim().is_empty() {
            return Err(SubListError::Config {
                message: "output.file_prefix must not be empty".to_string(),
            });
        }

        if self.output.timestamp_format.trim().is_empty() {
            return Err(SubListError::Config {
                message: "output.timestamp_format must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn export_directory(&self) -> PathBuf {
        self.output.base_directory.join(&self.output.export_dir)
    }

    pub fn compare_directory(&self) -> PathBuf {
        self.output.base_directory.join(&self.output.compare_dir)
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}
