// 配置管理
use crate::cli::{Cli, Commands};
use crate::messages;
use crate::utils::error::TransferError;
use anyhow::{Context, Result};
use dialoguer::Password;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Keys every connection configuration has to provide.
pub const REQUIRED_KEYS: [&str; 4] = ["host", "port", "user", "password"];

/// The connection settings of a session, kept as the string map callers hand in.
#[derive(Clone, Default)]
pub struct ConnectionConfig {
    values: HashMap<String, String>,
}

/// A fully resolved connection target.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl ConnectionConfig {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Required keys absent from the map, in `REQUIRED_KEYS` order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !self.values.contains_key(*key))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }

    /// Resolves the map into an `Endpoint`, parsing the port.
    pub fn endpoint(&self) -> std::result::Result<Endpoint, TransferError> {
        let missing = self.missing_keys();
        if !missing.is_empty() {
            return Err(TransferError::InvalidConfiguration {
                reason: format!("missing keys {}", messages::key_list(&missing)),
            });
        }

        let field = |key: &str| self.values.get(key).cloned().unwrap_or_default();
        let raw_port = field("port");
        let port = raw_port
            .trim()
            .parse::<u16>()
            .map_err(|e| TransferError::InvalidConfiguration {
                reason: format!("invalid port '{}': {}", raw_port, e),
            })?;

        Ok(Endpoint {
            host: field("host"),
            port,
            user: field("user"),
            password: field("password"),
        })
    }

    /// Loads a JSON object of connection keys. Scalar values are stringified
    /// so that `"port": 22` works as well as `"port": "22"`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(content)?;
        let mut values = HashMap::new();
        for (key, value) in file.entries {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => anyhow::bail!("Unsupported value for key '{}': {}", key, other),
            };
            values.insert(key, value);
        }
        Ok(Self { values })
    }
}

// 不在日志里输出密码
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        let mut map = f.debug_map();
        for key in keys {
            if key == "password" {
                map.entry(key, &"********");
            } else {
                map.entry(key, &self.values[key]);
            }
        }
        map.finish()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

impl Endpoint {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(flatten)]
    entries: HashMap<String, serde_json::Value>,
}

/// Everything the command-line tool needs for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub remote_dir: Option<String>,
    pub verbose: bool,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Upload {
        local_path: PathBuf,
        remote_name: String,
    },
    Download {
        remote_filename: String,
        directory: String,
        local_filename: String,
    },
    DownloadAll {
        directory: String,
    },
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut connection = match &cli.config {
            Some(path) => ConnectionConfig::from_json_file(path)?,
            None => ConnectionConfig::default(),
        };

        // 命令行参数覆盖配置文件
        if let Some(host) = &cli.host {
            connection.set("host", host.clone());
        }
        if let Some(port) = cli.port {
            connection.set("port", port.to_string());
        }
        if let Some(user) = &cli.user {
            connection.set("user", user.clone());
        }
        if let Some(password) = &cli.password {
            connection.set("password", password.clone());
        }

        // 没有密码且在终端中运行时，提示输入密码
        if connection.get("password").is_none() && std::io::stdin().is_terminal() {
            if let (Some(user), Some(host)) = (connection.get("user"), connection.get("host")) {
                let password = Password::new()
                    .with_prompt(format!("Enter password for {}@{}", user, host))
                    .interact()
                    .context("Failed to read password")?;
                connection.set("password", password);
            }
        }

        let operation = match &cli.command {
            Commands::Upload {
                local_path,
                remote_name,
            } => Operation::Upload {
                local_path: local_path.clone(),
                remote_name: remote_name.clone(),
            },
            Commands::Download {
                remote_filename,
                directory,
                local_filename,
            } => Operation::Download {
                remote_filename: remote_filename.clone(),
                directory: directory.clone(),
                local_filename: local_filename
                    .clone()
                    .unwrap_or_else(|| remote_filename.clone()),
            },
            Commands::DownloadAll { directory } => Operation::DownloadAll {
                directory: directory.clone(),
            },
        };

        Ok(Config {
            connection,
            remote_dir: cli.remote_dir.clone(),
            verbose: cli.verbose,
            operation,
        })
    }
}
