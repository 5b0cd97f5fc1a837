use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::market::ArtifactError;
use crate::workflows::market::PublishError;
use crate::workflows::molit::SourceError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Artifact(ArtifactError),
    /// An HTTP adapter could not be constructed.
    Client(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Artifact(err) => write!(f, "artifact error: {}", err),
            AppError::Client(message) => write!(f, "client setup error: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Artifact(err) => Some(err),
            AppError::Client(_) => None,
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

impl From<ArtifactError> for AppError {
    fn from(value: ArtifactError) -> Self {
        Self::Artifact(value)
    }
}

impl From<SourceError> for AppError {
    fn from(value: SourceError) -> Self {
        Self::Client(value.to_string())
    }
}

impl From<PublishError> for AppError {
    fn from(value: PublishError) -> Self {
        Self::Client(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn artifact_failures_keep_their_source() {
        let err = AppError::from(ArtifactError::Io {
            path: PathBuf::from("/tmp/out/report.html"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });

        assert!(err
            .to_string()
            .starts_with("artifact error: unable to write /tmp/out/report.html"));
        assert!(err.source().is_some());
    }
}
