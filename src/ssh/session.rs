// SFTP会话管理
use crate::config::ConnectionConfig;
use crate::messages;
use crate::ssh::client::Ssh2Connector;
use crate::ssh::observer::{LogObserver, SessionObserver};
use crate::ssh::transport::{Connector, RemoteFs};
use crate::transfer::{BatchReport, DownloadOutcome};
use crate::utils::error::TransferError;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A single SFTP connection and the operations run over it.
///
/// Every operation reports its outcome to the observer and returns it;
/// nothing panics past this type. A connection still held when the session
/// is dropped gets closed.
pub struct SftpSession<C: Connector = Ssh2Connector> {
    config: ConnectionConfig,
    connector: C,
    observer: Arc<dyn SessionObserver>,
    connection: Option<C::Connection>,
}

impl SftpSession<Ssh2Connector> {
    /// Creates a libssh2-backed session that logs through the `log` crate.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_parts(config, Ssh2Connector, Arc::new(LogObserver))
    }
}

impl<C: Connector> SftpSession<C> {
    /// Never fails: missing configuration keys are only reported here and
    /// turned into an error by `open`.
    pub fn with_parts(
        config: ConnectionConfig,
        connector: C,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        let missing = config.missing_keys();
        if !missing.is_empty() {
            observer.error(messages::MISSING_ATTRIBUTES, &messages::key_list(&missing));
        }

        Self {
            config,
            connector,
            observer,
            connection: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Connects to the configured server, replacing any connection already held.
    pub fn open(&mut self) -> Result<(), TransferError> {
        if let Some(mut previous) = self.connection.take() {
            if let Err(e) = previous.close() {
                debug!("Closing the previous connection failed: {}", e);
            }
        }

        let endpoint = match self.config.endpoint() {
            Ok(endpoint) => endpoint,
            Err(e) => return Err(self.fail(e)),
        };

        match self.connector.connect(&endpoint) {
            Ok(connection) => {
                self.connection = Some(connection);
                self.observer
                    .info(&messages::established_connection(&endpoint.host));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Closes the connection if one is held. The session is unbound afterwards
    /// even when closing fails.
    pub fn close(&mut self) -> Result<(), TransferError> {
        let Some(mut connection) = self.connection.take() else {
            return Ok(());
        };

        match connection.close() {
            Ok(()) => {
                self.observer.info(messages::CLOSE_CONNECTION);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn change_directory(&mut self, path: &str) -> Result<(), TransferError> {
        let result = self.connection()?.change_dir(path);
        match result {
            Ok(()) => {
                self.observer.info(&messages::changed_path(path));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Uploads `local_path` as `remote_name`. Returns the bytes sent.
    pub fn upload_file<P: AsRef<Path>>(
        &mut self,
        local_path: P,
        remote_name: &str,
    ) -> Result<u64, TransferError> {
        let result = self.connection()?.put(local_path.as_ref(), remote_name);
        match result {
            Ok(sent) => {
                self.observer.info(&messages::uploaded_file(remote_name));
                Ok(sent)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Downloads `remote_filename` to `directory/local_filename`.
    ///
    /// A remote name that is missing or not a regular file is skipped
    /// without any observer output.
    pub fn download_file(
        &mut self,
        directory: &str,
        remote_filename: &str,
        local_filename: &str,
    ) -> Result<DownloadOutcome, TransferError> {
        let local_path = PathBuf::from(format!("{}/{}", directory, local_filename));

        let connection = self.connection()?;
        let result = match connection.is_file(remote_filename) {
            Ok(true) => connection.get(remote_filename, &local_path).map(Some),
            Ok(false) => Ok(None),
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(_)) => {
                self.observer
                    .info(&messages::downloaded_file(local_filename));
                Ok(DownloadOutcome::Downloaded(local_path))
            }
            Ok(None) => {
                debug!("Skipping {}: not a regular remote file", remote_filename);
                Ok(DownloadOutcome::Skipped)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Downloads every regular file of the remote working directory into
    /// `directory`. Subdirectories are skipped, not descended into.
    ///
    /// A failed listing aborts with an error. Failed files are recorded in
    /// the report and the batch continues.
    pub fn download_all_files(&mut self, directory: &str) -> Result<BatchReport, TransferError> {
        let listing = self.connection()?.list_dir();
        let names = match listing {
            Ok(names) => names,
            Err(e) => return Err(self.fail(e)),
        };

        let mut report = BatchReport::default();
        for name in &names {
            let result = self.download_file(directory, name, name);
            report.record(name, result);
        }
        Ok(report)
    }

    fn connection(&mut self) -> Result<&mut C::Connection, TransferError> {
        match self.connection.as_mut() {
            Some(connection) => Ok(connection),
            None => {
                self.observer.error(messages::NO_CONNECTION, "");
                Err(TransferError::NoConnection)
            }
        }
    }

    fn fail(&self, err: TransferError) -> TransferError {
        self.observer.error(&err.to_string(), err.detail());
        err
    }
}

impl<C: Connector> Drop for SftpSession<C> {
    fn drop(&mut self) {
        if self.connection.is_some() {
            let _ = self.close();
        }
    }
}
