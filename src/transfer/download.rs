// 下载功能
use crate::transfer::copy_chunks;
use crate::utils::error::TransferError;
use log::debug;
use ssh2::Sftp;
use std::fs::File;
use std::path::Path;

/// Downloads `remote` into `local`, replacing any existing local file.
///
/// The remote file is opened before the local one is created, so an
/// unreadable remote leaves the local side untouched.
pub fn download_file(sftp: &Sftp, remote: &Path, local: &Path) -> Result<u64, TransferError> {
    let remote_name = remote.display().to_string();
    let local_name = local.display().to_string();

    let mut remote_file = sftp
        .open(remote)
        .map_err(|e| TransferError::from_ssh(&e, &remote_name))?;
    let mut local_file =
        File::create(local).map_err(|e| TransferError::from_io(&e, &local_name))?;

    let received = copy_chunks(&mut remote_file, &mut local_file, &remote_name, &local_name)?;
    debug!("Downloaded {} -> {} ({} bytes)", remote_name, local_name, received);
    Ok(received)
}
