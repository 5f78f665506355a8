use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::ingest::ImportError;
use crate::workflows::lending::LendingError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(ImportError),
    Lending(LendingError),
    Output(serde_json::Error),
}

impl AppError {
    /// Process exit code reported by the command line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Lending(LendingError::InvalidInput { .. })
            | AppError::Lending(LendingError::Overflow) => 2,
            AppError::Lending(LendingError::CustomerNotFound(_))
            | AppError::Lending(LendingError::LoanNotFound(_)) => 3,
            AppError::Config(_) | AppError::Import(_) => 4,
            AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Output(_)
            | AppError::Lending(_) => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Lending(err) => write!(f, "lending error: {}", err),
            AppError::Output(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Lending(err) => Some(err),
            AppError::Output(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<LendingError> for AppError {
    fn from(value: LendingError) -> Self {
        Self::Lending(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::lending::CustomerId;

    #[test]
    fn exit_codes_separate_caller_mistakes_from_failures() {
        let invalid = AppError::from(LendingError::invalid("tenure", "missing"));
        assert_eq!(invalid.exit_code(), 2);

        let missing = AppError::from(LendingError::CustomerNotFound(CustomerId(9)));
        assert_eq!(missing.exit_code(), 3);
        assert_eq!(missing.to_string(), "lending error: customer 9 does not exist");

        let io = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "closed"));
        assert_eq!(io.exit_code(), 1);
    }
}
