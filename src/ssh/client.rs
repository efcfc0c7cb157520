// SSH客户端封装
use crate::config::Endpoint;
use crate::ssh::transport::{Connector, RemoteFs};
use crate::transfer;
use crate::utils::error::TransferError;
use log::debug;
use ssh2::{FileStat, Session, Sftp};
use std::net::TcpStream;
use std::path::{Path, PathBuf};

pub struct SshClient {
    session: Session,
    sftp: Sftp,
    cwd: Option<PathBuf>,
}

impl SshClient {
    /// Connects and authenticates with a password.
    ///
    /// The server host key is not checked against any known_hosts file.
    pub fn connect(endpoint: &Endpoint) -> Result<Self, TransferError> {
        let addr = endpoint.address();
        let tcp = TcpStream::connect((endpoint.host.as_str(), endpoint.port))
            .map_err(|e| TransferError::from_connect(&e, &addr))?;
        debug!("TCP connection to {} established", addr);

        let mut session = Session::new().map_err(|e| TransferError::ConnectionFailed {
            message: format!("failed to create SSH session: {}", e.message()),
        })?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| TransferError::from_ssh_connect(&e, &endpoint.user))?;
        debug!("SSH handshake with {} completed, host key check skipped", addr);

        session
            .userauth_password(&endpoint.user, &endpoint.password)
            .map_err(|e| TransferError::from_ssh_connect(&e, &endpoint.user))?;
        if !session.authenticated() {
            return Err(TransferError::AuthFailed {
                user: endpoint.user.clone(),
                cause: "server did not accept the password".into(),
            });
        }

        let sftp = session.sftp().map_err(|e| TransferError::ConnectionFailed {
            message: format!("failed to start SFTP subsystem: {}", e.message()),
        })?;

        Ok(SshClient {
            session,
            sftp,
            cwd: None,
        })
    }

    fn resolve(&self, name: &str) -> PathBuf {
        resolve_remote(self.cwd.as_deref(), name)
    }
}

// 相对路径基于当前工作目录
fn resolve_remote(cwd: Option<&Path>, name: &str) -> PathBuf {
    let path = Path::new(name);
    match cwd {
        Some(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}

/// Maps a `stat` result to "is a regular file"; a missing path is `false`.
fn regular_file(stat: Result<FileStat, ssh2::Error>, remote: &str) -> Result<bool, TransferError> {
    match stat {
        Ok(stat) => Ok(stat.is_file()),
        Err(e) => {
            let err = TransferError::from_ssh(&e, remote);
            if err.is_not_found() {
                Ok(false)
            } else {
                Err(err)
            }
        }
    }
}

/// Bare entry names of a `readdir` listing.
fn entry_names<I: IntoIterator<Item = PathBuf>>(paths: I) -> Vec<String> {
    paths
        .into_iter()
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .filter(|name| name != "." && name != "..")
        .collect()
}

impl RemoteFs for SshClient {
    fn change_dir(&mut self, path: &str) -> Result<(), TransferError> {
        let target = self.resolve(path);
        let canonical = self
            .sftp
            .realpath(&target)
            .map_err(|e| TransferError::from_ssh(&e, path))?;
        let stat = self
            .sftp
            .stat(&canonical)
            .map_err(|e| TransferError::from_ssh(&e, path))?;
        if !stat.is_dir() {
            return Err(TransferError::PathNotFound {
                path: path.to_string(),
                cause: format!("{} is not a directory", canonical.display()),
            });
        }

        debug!("Remote working directory is now {}", canonical.display());
        self.cwd = Some(canonical);
        Ok(())
    }

    fn put(&mut self, local: &Path, remote: &str) -> Result<u64, TransferError> {
        let target = self.resolve(remote);
        transfer::upload_file(&self.sftp, local, &target)
    }

    fn is_file(&mut self, remote: &str) -> Result<bool, TransferError> {
        regular_file(self.sftp.stat(&self.resolve(remote)), remote)
    }

    fn get(&mut self, remote: &str, local: &Path) -> Result<u64, TransferError> {
        let source = self.resolve(remote);
        transfer::download_file(&self.sftp, &source, local)
    }

    fn list_dir(&mut self) -> Result<Vec<String>, TransferError> {
        let dir = self.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
        let entries = self
            .sftp
            .readdir(&dir)
            .map_err(|e| TransferError::from_ssh(&e, &dir.display().to_string()))?;

        Ok(entry_names(entries.into_iter().map(|(path, _)| path)))
    }

    fn close(&mut self) -> Result<(), TransferError> {
        self.session
            .disconnect(None, "Connection closed by client", None)
            .map_err(|e| TransferError::Unknown {
                message: format!("disconnect failed: {}", e.message()),
            })
    }
}

/// Opens `SshClient` connections through libssh2.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ssh2Connector;

impl Connector for Ssh2Connector {
    type Connection = SshClient;

    fn connect(&self, endpoint: &Endpoint) -> Result<SshClient, TransferError> {
        SshClient::connect(endpoint)
    }
}
