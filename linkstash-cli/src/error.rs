//! Error handling for the linkstash CLI
//!
//! Preserves error context while mapping failures onto process exit codes.

use std::error::Error;
use std::fmt;

use crate::cli_builder::GenerationError;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use crate::query::ConversionError;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// A malformed catalog entry is a data bug: fatal, reported with the
/// offending registration.
impl From<GenerationError> for CliError {
    fn from(error: GenerationError) -> Self {
        Self {
            message: error.to_string(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

impl From<ConversionError> for CliError {
    fn from(error: ConversionError) -> Self {
        Self {
            message: error.to_string(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("Error: {}", e.full_chain());
            eprintln!("{e}");
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_chain_includes_the_source() {
        let matches = clap::Command::new("test")
            .try_get_matches_from(["test"])
            .unwrap();
        let source = ConversionError::Extraction {
            name: "param1".to_string(),
            source: matches.try_get_one::<String>("param1").unwrap_err(),
        };
        let error = CliError {
            message: "request composition failed".to_string(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(source)),
        };

        let chain = error.full_chain();
        assert!(chain.starts_with("request composition failed"));
        assert!(chain.contains("Caused by:"));
    }

    #[test]
    fn handle_cli_result_maps_ok_to_success() {
        assert_eq!(handle_cli_result(Ok(())), EXIT_SUCCESS);
    }

    #[test]
    fn handle_cli_result_returns_the_error_code() {
        let result: CliResult<()> = Err(CliError::new("boom", EXIT_ERROR));
        assert_eq!(handle_cli_result(result), EXIT_ERROR);
    }
}
