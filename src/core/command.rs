use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
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
    Serialization {
        message: String,
    },
    Unavailable {
        message: String,
        reason_code: Option<String>,
    },
    Storage {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::DuplicateKey { message } => message,
            CommandError::NotFound { message } => message,
            CommandError::Validation { message, .. } => message,
            CommandError::Serialization { message } => message,
            CommandError::Unavailable { message, .. } => message,
            CommandError::Storage { message, .. } => message,
            CommandError::Runtime { message, .. } => message,
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Io { message, reason_code } => {
                CommandError::Storage { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Unavailable { message, reason_code, .. } => {
                CommandError::Unavailable { message, reason_code }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_convert_library_error() {
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("dup")), CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(LibraryError::not_found("missing")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::validation("bad", None)), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::io("disk", None)), CommandError::Storage { .. }));
        assert!(matches!(CommandError::from(LibraryError::unavailable("remote", None, true)), CommandError::Unavailable { .. }));
        assert!(matches!(CommandError::from(LibraryError::runtime("boom", None)), CommandError::Runtime { .. }));
    }

    #[tokio::test]
    async fn test_should_expose_message() {
        let err = CommandError::from(LibraryError::not_found("book not found for 111"));
        assert_eq!("book not found for 111", err.message());
    }
}
