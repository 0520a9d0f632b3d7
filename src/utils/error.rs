use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdCardError {
    #[error("Image processing error: {0}")]
    ImageProcessingError(String),
    #[error("OCR error: {0}")]
    OcrError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistError),
}

/// Failure kinds of the persistence adapter.
///
/// Only `Configuration` and `Runtime` are fatal: they cannot be fixed by
/// retrying the next request, so the service refuses to start on them.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("database configuration error: {0}")]
    Configuration(#[source] sqlx::Error),
    #[error("constraint violation: {0}")]
    Constraint(#[source] sqlx::Error),
    #[error("data error: {0}")]
    Data(#[source] sqlx::Error),
    #[error("failed to start database runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl PersistError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, PersistError::Configuration(_) | PersistError::Runtime(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PersistError::Connection(_) => "connection",
            PersistError::Configuration(_) => "configuration",
            PersistError::Constraint(_) => "constraint",
            PersistError::Data(_) => "data",
            PersistError::Runtime(_) => "runtime",
        }
    }
}

// SQLSTATE codes that point at the deployment rather than the row
// 28xxx: invalid authorization, 3D000: unknown database, 42P01: unknown table
fn is_configuration_sqlstate(code: &str) -> bool {
    code.starts_with("28") || code == "3D000" || code == "42P01"
}

impl From<sqlx::Error> for PersistError {
    fn from(err: sqlx::Error) -> Self {
        let wrap: fn(sqlx::Error) -> PersistError = match &err {
            sqlx::Error::Configuration(_) => PersistError::Configuration,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => PersistError::Connection,
            sqlx::Error::Database(db_err) => {
                let config_code = db_err
                    .code()
                    .map(|code| is_configuration_sqlstate(&code))
                    .unwrap_or(false);
                if config_code {
                    PersistError::Configuration
                } else {
                    match db_err.kind() {
                        ErrorKind::UniqueViolation
                        | ErrorKind::ForeignKeyViolation
                        | ErrorKind::NotNullViolation
                        | ErrorKind::CheckViolation => PersistError::Constraint,
                        _ => PersistError::Data,
                    }
                }
            }
            _ => PersistError::Data,
        };
        wrap(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_errors_are_connection_errors() {
        let err = sqlx::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        let persist: PersistError = err.into();
        assert!(matches!(persist, PersistError::Connection(_)));
        assert!(!persist.is_fatal());
        assert_eq!(persist.kind_name(), "connection");
    }

    #[test]
    fn test_configuration_errors_are_fatal() {
        let err = sqlx::Error::Configuration("invalid port".into());
        let persist: PersistError = err.into();
        assert!(matches!(persist, PersistError::Configuration(_)));
        assert!(persist.is_fatal());
    }

    #[test]
    fn test_decode_errors_are_data_errors() {
        let err = sqlx::Error::ColumnNotFound("dob".to_string());
        let persist: PersistError = err.into();
        assert!(matches!(persist, PersistError::Data(_)));
        assert!(!persist.is_fatal());
    }

    #[test]
    fn test_configuration_sqlstates() {
        assert!(is_configuration_sqlstate("28P01"));
        assert!(is_configuration_sqlstate("28000"));
        assert!(is_configuration_sqlstate("3D000"));
        assert!(is_configuration_sqlstate("42P01"));
        assert!(!is_configuration_sqlstate("23505"));
    }

    #[test]
    fn test_persist_error_wraps_into_idcard_error() {
        let err: IdCardError = PersistError::Runtime(io::Error::new(io::ErrorKind::Other, "no threads")).into();
        assert!(err.to_string().starts_with("Persistence error"));
    }
}
