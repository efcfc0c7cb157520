//! Common test utilities: an in-memory SFTP server and a recording observer.

#![allow(dead_code)]

use sftp_cnx::ssh::{Connector, RemoteFs, SessionObserver};
use sftp_cnx::{ConnectionConfig, Endpoint, TransferError};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const HOME: &str = "/home/alice";
pub const PASSWORD: &str = "secret";

/// State shared by every connection made through a `FakeConnector`.
pub struct FakeServer {
    pub reachable: bool,
    pub password: String,
    pub files: BTreeMap<String, Vec<u8>>,
    pub dirs: BTreeSet<String>,
    pub fail_listing: bool,
    pub fail_get: HashSet<String>,
    pub fail_close: bool,
    pub connects: usize,
    pub closes: usize,
}

impl Default for FakeServer {
    fn default() -> Self {
        let mut dirs = BTreeSet::new();
        for dir in ["/", "/home", HOME, "/tmp"] {
            dirs.insert(dir.to_string());
        }
        Self {
            reachable: true,
            password: PASSWORD.to_string(),
            files: BTreeMap::new(),
            dirs,
            fail_listing: false,
            fail_get: HashSet::new(),
            fail_close: false,
            connects: 0,
            closes: 0,
        }
    }
}

impl FakeServer {
    pub fn add_file(&mut self, path: &str, content: &[u8]) {
        self.files.insert(path.to_string(), content.to_vec());
    }

    pub fn add_dir(&mut self, path: &str) {
        self.dirs.insert(path.to_string());
    }
}

#[derive(Clone, Default)]
pub struct FakeConnector {
    pub server: Arc<Mutex<FakeServer>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server<F: FnOnce(&mut FakeServer)>(&self, f: F) {
        f(&mut self.server.lock().unwrap());
    }

    pub fn connects(&self) -> usize {
        self.server.lock().unwrap().connects
    }

    pub fn closes(&self) -> usize {
        self.server.lock().unwrap().closes
    }

    pub fn remote_file(&self, path: &str) -> Option<Vec<u8>> {
        self.server.lock().unwrap().files.get(path).cloned()
    }
}

impl Connector for FakeConnector {
    type Connection = FakeConnection;

    fn connect(&self, endpoint: &Endpoint) -> Result<FakeConnection, TransferError> {
        let mut server = self.server.lock().unwrap();
        server.connects += 1;
        if !server.reachable {
            return Err(TransferError::ConnectionFailed {
                message: format!("{}: connection refused", endpoint.address()),
            });
        }
        if endpoint.password != server.password {
            return Err(TransferError::AuthFailed {
                user: endpoint.user.clone(),
                cause: "password rejected".into(),
            });
        }
        Ok(FakeConnection {
            server: Arc::clone(&self.server),
            cwd: HOME.to_string(),
        })
    }
}

pub struct FakeConnection {
    server: Arc<Mutex<FakeServer>>,
    cwd: String,
}

impl FakeConnection {
    fn resolve(&self, name: &str) -> String {
        if name.starts_with('/') {
            name.to_string()
        } else if self.cwd == "/" {
            format!("/{}", name)
        } else {
            format!("{}/{}", self.cwd, name)
        }
    }
}

fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(i) => path[..i].to_string(),
        None => ".".to_string(),
    }
}

fn name_of(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

impl RemoteFs for FakeConnection {
    fn change_dir(&mut self, path: &str) -> Result<(), TransferError> {
        let target = self.resolve(path);
        let server = self.server.lock().unwrap();
        if server.dirs.contains(&target) {
            drop(server);
            self.cwd = target;
            Ok(())
        } else {
            Err(TransferError::PathNotFound {
                path: path.to_string(),
                cause: "no such directory".into(),
            })
        }
    }

    fn put(&mut self, local: &Path, remote: &str) -> Result<u64, TransferError> {
        let content = std::fs::read(local)
            .map_err(|e| TransferError::from_io(&e, &local.display().to_string()))?;
        let target = self.resolve(remote);
        let mut server = self.server.lock().unwrap();
        if !server.dirs.contains(&parent_of(&target)) {
            return Err(TransferError::PathNotFound {
                path: remote.to_string(),
                cause: "no such file".into(),
            });
        }
        let len = content.len() as u64;
        server.files.insert(target, content);
        Ok(len)
    }

    fn is_file(&mut self, remote: &str) -> Result<bool, TransferError> {
        let target = self.resolve(remote);
        Ok(self.server.lock().unwrap().files.contains_key(&target))
    }

    fn get(&mut self, remote: &str, local: &Path) -> Result<u64, TransferError> {
        let target = self.resolve(remote);
        let server = self.server.lock().unwrap();
        if server.fail_get.contains(remote) {
            return Err(TransferError::PermissionDenied {
                path: remote.to_string(),
                cause: "read access denied".into(),
            });
        }
        let content = server
            .files
            .get(&target)
            .ok_or_else(|| TransferError::PathNotFound {
                path: remote.to_string(),
                cause: "no such file".into(),
            })?;
        std::fs::write(local, content)
            .map_err(|e| TransferError::from_io(&e, &local.display().to_string()))?;
        Ok(content.len() as u64)
    }

    fn list_dir(&mut self) -> Result<Vec<String>, TransferError> {
        let server = self.server.lock().unwrap();
        if server.fail_listing {
            return Err(TransferError::Unknown {
                message: format!("{}: listing failed", self.cwd),
            });
        }
        let files = server.files.keys();
        let dirs = server.dirs.iter().filter(|d| d.as_str() != "/");
        Ok(files
            .chain(dirs)
            .filter(|path| parent_of(path) == self.cwd)
            .map(|path| name_of(path))
            .collect())
    }

    fn close(&mut self) -> Result<(), TransferError> {
        let mut server = self.server.lock().unwrap();
        server.closes += 1;
        if server.fail_close {
            return Err(TransferError::Unknown {
                message: "socket already closed".into(),
            });
        }
        Ok(())
    }
}

/// Observer that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingObserver {
    pub infos: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<(String, String)>>,
}

impl RecordingObserver {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str, detail: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((message.to_string(), detail.to_string()));
    }
}

pub fn full_config() -> ConnectionConfig {
    ConnectionConfig::from_pairs([
        ("host", "sftp.example.com"),
        ("port", "22"),
        ("user", "alice"),
        ("password", PASSWORD),
    ])
}
