use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubListError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid IMSI '{imsi}': {reason}")]
    InvalidImsi { imsi: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No input provided for {what}")]
    MissingInput { what: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SubListError {
    fn user_message(&self) -> String {
        match self {
            SubListError::InputNotFound { path } => {
                format!("Error: {} file not found!", path.display())
            }
            SubListError::InvalidImsi { imsi, reason } => {
                format!("Invalid IMSI '{}': {}", imsi, reason)
            }
            SubListError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            SubListError::OutputWrite { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            SubListError::MissingInput { what } => {
                format!("No {} was entered", what)
            }
            _ => format!("An error occurred: {}", self),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SubListError::InputNotFound { .. } => Some(
                "Place the LST dump next to the binary as sub-list.txt, or point to it with --input <FILE>.".to_string()
            ),
            SubListError::InvalidImsi { .. } => Some(
                "IMSIs are matched literally against the quoted value in %%LST headers; enter it without quotes.".to_string()
            ),
            SubListError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with `sublist init-config`.".to_string()
            ),
            SubListError::OutputWrite { .. } => Some(
                "Ensure you have write permission for the output directory, or choose another with --output-dir.".to_string()
            ),
            SubListError::MissingInput { .. } => Some(
                "Pass both IMSIs on the command line: sublist compare <IMSI1> <IMSI2>".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SubListError {
    fn from(error: toml::de::Error) -> Self {
        SubListError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_message() {
        let error = SubListError::InputNotFound {
            path: PathBuf::from("sub-list.txt"),
        };
        assert_eq!(error.user_message(), "Error: sub-list.txt file not found!");
        assert!(error.suggestion().unwrap().contains("--input"));
    }

    #[test]
    fn test_generic_errors_carry_underlying_message() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error = SubListError::from(io);
        assert_eq!(
            error.user_message(),
            "An error occurred: IO operation failed: disk full"
        );
        assert!(error.suggestion().is_none());
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = SubListError::from(parse_error);
        assert!(matches!(error, SubListError::Config { .. }));
    }
}
