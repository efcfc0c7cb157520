use std::io;
use thiserror::Error;

// libssh2 会话错误码
const LIBSSH2_ERROR_TIMEOUT: i32 = -9;
const LIBSSH2_ERROR_AUTHENTICATION_FAILED: i32 = -18;

// SFTP 状态码
const SFTP_NO_SUCH_FILE: i32 = 2;
const SFTP_PERMISSION_DENIED: i32 = 3;
const SFTP_NO_SUCH_PATH: i32 = 10;

/// Errors reported by session operations.
///
/// `cause` and `message` keep the text of the underlying libssh2 or I/O
/// error; it is what the session hands to the observer as detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("No connection to the SFTP server")]
    NoConnection,

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Authentication failed for user {user}")]
    AuthFailed { user: String, cause: String },

    #[error("Path not found: {path}")]
    PathNotFound { path: String, cause: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String, cause: String },

    #[error("Operation timed out")]
    Timeout { cause: String },

    #[error("Unexpected error: {message}")]
    Unknown { message: String },
}

impl TransferError {
    /// Classifies a libssh2 error raised while working on `path`.
    pub fn from_ssh(err: &ssh2::Error, path: &str) -> Self {
        let cause = ssh_cause(err);
        match err.code() {
            ssh2::ErrorCode::Session(LIBSSH2_ERROR_TIMEOUT) => TransferError::Timeout { cause },
            ssh2::ErrorCode::SFTP(SFTP_NO_SUCH_FILE) | ssh2::ErrorCode::SFTP(SFTP_NO_SUCH_PATH) => {
                TransferError::PathNotFound {
                    path: path.to_string(),
                    cause,
                }
            }
            ssh2::ErrorCode::SFTP(SFTP_PERMISSION_DENIED) => TransferError::PermissionDenied {
                path: path.to_string(),
                cause,
            },
            _ => TransferError::Unknown {
                message: format!("{}: {}", path, cause),
            },
        }
    }

    /// Classifies a libssh2 error raised before the session is usable
    /// (handshake or authentication).
    pub fn from_ssh_connect(err: &ssh2::Error, user: &str) -> Self {
        let cause = ssh_cause(err);
        match err.code() {
            ssh2::ErrorCode::Session(LIBSSH2_ERROR_AUTHENTICATION_FAILED) => {
                TransferError::AuthFailed {
                    user: user.to_string(),
                    cause,
                }
            }
            ssh2::ErrorCode::Session(LIBSSH2_ERROR_TIMEOUT) => TransferError::Timeout { cause },
            _ => TransferError::ConnectionFailed { message: cause },
        }
    }

    /// Classifies a local or streamed I/O error raised while working on `path`.
    pub fn from_io(err: &io::Error, path: &str) -> Self {
        let cause = err.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => TransferError::PathNotFound {
                path: path.to_string(),
                cause,
            },
            io::ErrorKind::PermissionDenied => TransferError::PermissionDenied {
                path: path.to_string(),
                cause,
            },
            io::ErrorKind::TimedOut => TransferError::Timeout { cause },
            _ => TransferError::Unknown {
                message: format!("{}: {}", path, cause),
            },
        }
    }

    /// Classifies a TCP connect error.
    pub fn from_connect(err: &io::Error, addr: &str) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut => TransferError::Timeout {
                cause: format!("{}: {}", addr, err),
            },
            _ => TransferError::ConnectionFailed {
                message: format!("{}: {}", addr, err),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TransferError::PathNotFound { .. })
    }

    /// Text of the underlying error, empty when there is none.
    pub fn detail(&self) -> &str {
        match self {
            TransferError::InvalidConfiguration { .. } | TransferError::NoConnection => "",
            TransferError::ConnectionFailed { message } | TransferError::Unknown { message } => {
                message.as_str()
            }
            TransferError::AuthFailed { cause, .. }
            | TransferError::PathNotFound { cause, .. }
            | TransferError::PermissionDenied { cause, .. }
            | TransferError::Timeout { cause } => cause.as_str(),
        }
    }
}

fn ssh_cause(err: &ssh2::Error) -> String {
    format!("{} ({:?})", err.message(), err.code())
}
