use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum LibraryError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // Persistence read/write failure on the catalog file.
    Io {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    // A remote collaborator (e.g. the enrichment service) failed or timed out.
    Unavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn io(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Io { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Unavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::Validation { .. } => { false }
            LibraryError::Io { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Unavailable { retryable, .. } => { *retryable }
            LibraryError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::io(
            format!("catalog io {:?}", err).as_str(), Some(format!("{:?}", err.kind())))
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::Io { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Unavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let lib_err = LibraryError::from(err);
        assert!(matches!(lib_err, LibraryError::Io{ message: _, reason_code: Some(_) }));
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        let err = serde_json::from_str::<Vec<String>>("{").expect_err("bad json");
        assert!(matches!(LibraryError::from(err), LibraryError::Serialization{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, LibraryError::duplicate_key("test").retryable());
        assert_eq!(false, LibraryError::not_found("test").retryable());
        assert_eq!(false, LibraryError::validation("test", None).retryable());
        assert_eq!(false, LibraryError::io("test", None).retryable());
        assert_eq!(false, LibraryError::serialization("test").retryable());
        assert_eq!(false, LibraryError::unavailable("test", None, false).retryable());
        assert_eq!(true, LibraryError::unavailable("test", None, true).retryable());
        assert_eq!(false, LibraryError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_display_message() {
        assert_eq!("isbn 111 already exists", LibraryError::duplicate_key("isbn 111 already exists").to_string());
        assert_eq!("title must not be empty", LibraryError::validation("title must not be empty", None).to_string());
    }
}
