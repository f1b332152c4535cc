use sectorlens_core::{AnalyticsError, CoreError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("command error: {0}")]
    Command(String),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for CliError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::Validation(error) => Self::Validation(error),
            CoreError::Analytics(error) => Self::Analytics(error),
            CoreError::Serialization(error) => Self::Serialization(error),
            CoreError::Io(error) => Self::Io(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Analytics(AnalyticsError::Validation(_)) => 2,
            Self::Analytics(_) => 3,
            Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Command(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use sectorlens_core::TradeDate;

    use super::*;

    #[test]
    fn maps_categories_to_exit_codes() {
        let start = TradeDate::parse("2024-02-01").expect("date");
        let end = TradeDate::parse("2024-01-01").expect("date");
        assert_eq!(
            CliError::from(AnalyticsError::InvalidRange { start, end }).exit_code(),
            3
        );
        assert_eq!(CliError::from(ValidationError::EmptySymbol).exit_code(), 2);
        assert_eq!(
            CliError::StrictModeViolation {
                warning_count: 1,
                error_count: 0
            }
            .exit_code(),
            5
        );
    }

    #[test]
    fn core_errors_keep_their_category() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(CliError::from(CoreError::Io(io)).exit_code(), 10);

        let malformed = serde_json::from_str::<serde_json::Value>("{").expect_err("must fail");
        assert_eq!(CliError::from(CoreError::Serialization(malformed)).exit_code(), 4);
    }
}
