// 传输模块入口
pub mod download;
pub mod report;
pub mod upload;

pub use download::download_file;
pub use report::{BatchReport, DownloadOutcome};
pub use upload::upload_file;

use crate::utils::error::TransferError;
use std::io::{ErrorKind, Read, Write};

/// Buffer size of one copy step.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Streams `reader` into `writer` chunk by chunk. Read failures are
/// attributed to `source`, write failures to `dest`.
pub fn copy_chunks<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    source: &str,
    dest: &str,
) -> Result<u64, TransferError> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(bytes_read) => {
                writer
                    .write_all(&buffer[..bytes_read])
                    .map_err(|e| TransferError::from_io(&e, dest))?;
                total += bytes_read as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransferError::from_io(&e, source)),
        }
    }

    writer.flush().map_err(|e| TransferError::from_io(&e, dest))?;
    Ok(total)
}
