// 库文件，导出模块
pub mod cli;
pub mod config;
pub mod messages;
pub mod ssh;
pub mod transfer;
pub mod utils;

use anyhow::{Context, Result};
use config::{Config, Operation};
use ssh::Connector;

pub use config::{ConnectionConfig, Endpoint};
pub use ssh::SftpSession;
pub use transfer::{BatchReport, DownloadOutcome};
pub use utils::error::TransferError;

/// Runs one command-line operation over a fresh libssh2 session.
pub fn run_transfer(config: Config) -> Result<()> {
    let mut session = SftpSession::new(config.connection.clone());
    run_with_session(&mut session, &config)?;
    session.close().context("Failed to close the connection")?;
    Ok(())
}

/// Opens `session`, applies the remote directory and runs the operation.
pub fn run_with_session<C: Connector>(session: &mut SftpSession<C>, config: &Config) -> Result<()> {
    session.open().context("Failed to connect to the SFTP server")?;

    if let Some(dir) = &config.remote_dir {
        session
            .change_directory(dir)
            .with_context(|| format!("Failed to change remote directory to {}", dir))?;
    }

    match &config.operation {
        Operation::Upload {
            local_path,
            remote_name,
        } => {
            let sent = session
                .upload_file(local_path, remote_name)
                .with_context(|| format!("Failed to upload {}", local_path.display()))?;
            println!("Uploaded {} -> {} ({} bytes)", local_path.display(), remote_name, sent);
        }
        Operation::Download {
            remote_filename,
            directory,
            local_filename,
        } => {
            let outcome = session
                .download_file(directory, remote_filename, local_filename)
                .with_context(|| format!("Failed to download {}", remote_filename))?;
            if outcome.is_downloaded() {
                println!("Downloaded {} -> {}/{}", remote_filename, directory, local_filename);
            } else {
                println!("Skipped {}: not a regular remote file", remote_filename);
            }
        }
        Operation::DownloadAll { directory } => {
            let report = session
                .download_all_files(directory)
                .context("Failed to list the remote directory")?;
            println!(
                "Downloaded {} file(s), skipped {}, failed {}",
                report.downloaded.len(),
                report.skipped.len(),
                report.failed.len()
            );
            if !report.is_clean() {
                let names: Vec<&str> = report.failed.iter().map(|(n, _)| n.as_str()).collect();
                anyhow::bail!("Some files failed to download: {}", names.join(", "));
            }
        }
    }

    Ok(())
}
