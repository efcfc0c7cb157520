// 上传功能
use crate::transfer::copy_chunks;
use crate::utils::error::TransferError;
use log::debug;
use ssh2::Sftp;
use std::fs::File;
use std::path::Path;

/// Uploads `local` to `remote`, creating or truncating the remote file.
///
/// The local source is opened and checked first, so a missing or
/// non-regular source never touches the remote side. A failure mid-copy
/// leaves the partial remote file.
pub fn upload_file(sftp: &Sftp, local: &Path, remote: &Path) -> Result<u64, TransferError> {
    let local_name = local.display().to_string();
    let remote_name = remote.display().to_string();

    let mut local_file = open_source(local)?;
    let mut remote_file = sftp
        .create(remote)
        .map_err(|e| TransferError::from_ssh(&e, &remote_name))?;

    let sent = copy_chunks(&mut local_file, &mut remote_file, &local_name, &remote_name)?;
    debug!("Uploaded {} -> {} ({} bytes)", local_name, remote_name, sent);
    Ok(sent)
}

/// Opens an upload source, which has to be a regular file.
pub fn open_source(local: &Path) -> Result<File, TransferError> {
    let local_name = local.display().to_string();
    let file = File::open(local).map_err(|e| TransferError::from_io(&e, &local_name))?;
    let metadata = file
        .metadata()
        .map_err(|e| TransferError::from_io(&e, &local_name))?;

    // 在 Unix 上目录也能被 open，需要单独检查
    if !metadata.is_file() {
        return Err(TransferError::Unknown {
            message: format!("{}: not a regular file", local_name),
        });
    }
    Ok(file)
}
