// 远程文件系统抽象
use crate::config::Endpoint;
use crate::utils::error::TransferError;
use std::path::Path;

/// One live SFTP connection.
///
/// Relative remote names resolve against the working directory last set with
/// `change_dir`, or against the login directory before that.
pub trait RemoteFs {
    fn change_dir(&mut self, path: &str) -> Result<(), TransferError>;

    /// Copies the local file to `remote`, creating or truncating it.
    /// Returns the number of bytes sent.
    fn put(&mut self, local: &Path, remote: &str) -> Result<u64, TransferError>;

    /// `Ok(false)` when `remote` is missing or not a regular file.
    fn is_file(&mut self, remote: &str) -> Result<bool, TransferError>;

    /// Copies `remote` into `local`. Returns the number of bytes received.
    fn get(&mut self, remote: &str, local: &Path) -> Result<u64, TransferError>;

    /// Entry names of the working directory, without `.` and `..`.
    fn list_dir(&mut self) -> Result<Vec<String>, TransferError>;

    fn close(&mut self) -> Result<(), TransferError>;
}

/// Opens connections for a session.
pub trait Connector {
    type Connection: RemoteFs;

    fn connect(&self, endpoint: &Endpoint) -> Result<Self::Connection, TransferError>;
}
