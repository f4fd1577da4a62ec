// # Copier
//
// Blocking byte copy from a content stream into the destination artifact.
// Bytes go to a staging file next to the destination which is renamed over it
// once flushed, so a failed copy never clobbers a previously imported artifact.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Size of the chunk buffer used by the copy loop
pub const COPY_BUFFER_SIZE: usize = 4 * 1024;

const STAGING_SUFFIX: &str = ".part";

/// Copy `reader` into `writer` until end-of-stream, then flush.
///
/// Only a zero-length read ends the copy; short reads keep going and
/// interrupted reads are retried.
pub fn copy_stream<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut total: u64 = 0;

    loop {
        let byte_count = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..byte_count])?;
        total += byte_count as u64;
    }

    writer.flush()?;
    Ok(total)
}

/// Staging path used while copying into `destination`
pub fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(STAGING_SUFFIX);
    destination.with_file_name(name)
}

/// Copy the whole stream into `destination`, replacing it on success.
///
/// On error the staging file is removed and `destination` is left as it was.
pub fn copy_into(reader: &mut dyn Read, destination: &Path) -> io::Result<u64> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(destination);
    match write_staging(reader, &staging) {
        Ok(bytes) => {
            if let Err(e) = fs::rename(&staging, destination) {
                discard_staging(&staging);
                return Err(e);
            }
            debug!(
                "Committed {} bytes from {} to {}",
                bytes,
                staging.display(),
                destination.display()
            );
            Ok(bytes)
        }
        Err(e) => {
            discard_staging(&staging);
            Err(e)
        }
    }
}

fn write_staging(reader: &mut dyn Read, staging: &Path) -> io::Result<u64> {
    let mut file = File::create(staging)?;
    let bytes = copy_stream(reader, &mut file)?;
    file.sync_all()?;
    Ok(bytes)
}

fn discard_staging(staging: &Path) {
    if let Err(e) = fs::remove_file(staging) {
        if e.kind() != ErrorKind::NotFound {
            warn!(
                "Failed to remove staging file {}: {}",
                staging.display(),
                e
            );
        }
    }
}
