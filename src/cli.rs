// 命令行参数解析
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sftp-cnx")]
#[command(about = "Upload and download files over a single SFTP connection")]
#[command(version)]
pub struct Cli {
    /// SFTP server hostname or IP address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// SFTP server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SFTP username
    #[arg(short, long)]
    pub user: Option<String>,

    /// SFTP password (prompted for when omitted on a terminal)
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// JSON file with host, port, user and password keys
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Remote working directory to change into before the transfer
    #[arg(short = 'd', long)]
    pub remote_dir: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a local file to the remote working directory
    Upload {
        /// Local file path
        local_path: PathBuf,
        /// Name (or path) to store the file under on the server
        remote_name: String,
    },
    /// Download one remote file into a local directory
    Download {
        /// Remote file name
        remote_filename: String,
        /// Local destination directory
        directory: String,
        /// Local file name, defaults to the remote name
        #[arg(long = "as")]
        local_filename: Option<String>,
    },
    /// Download every regular file in the remote working directory
    DownloadAll {
        /// Local destination directory
        directory: String,
    },
}
