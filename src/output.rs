//! Naming and writing the output file.

use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind as IoErrorKind, Write},
    path::{Path, PathBuf},
};

use url::Url;

use crate::error::{ErrorKind, ResizeError};
use crate::format::SourceFormat;
use crate::ro_err;

const FALLBACK_STEM: &str = "resize";

/// The output is readable by the owner only
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o400;

/// Last path segment of the URL.
/// URLs without one (e.g. `https://example.com/`) are named `resize.<ext>` after the output format.
pub fn output_filename(url: &Url, format: SourceFormat) -> PathBuf {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");
    if segment.is_empty() || segment == "." || segment == ".." {
        PathBuf::from(format!("{FALLBACK_STEM}.{}", format.extension()))
    } else {
        PathBuf::from(segment)
    }
}

/// Creates `path` and writes `bytes` to it. Never touches a file that already exists.
///
/// On a failed write the partially written file is removed.
pub fn write_new_file(path: &Path, bytes: &[u8]) -> Result<(), ResizeError> {
    let mut file = open_new(path).map_err(|e| match e.kind() {
        IoErrorKind::AlreadyExists => ro_err!(
            ErrorKind::FileExists,
            "output filename {} exists, quitting",
            path.display()
        ),
        _ => ro_err!(ErrorKind::Write, "unable to create {}: {e}", path.display()),
    })?;

    // The buffers will be flushed automatically when the file goes out of scope,
    // but that will not report any errors. This handles errors.
    let result = file.write_all(bytes).and_then(|_| file.sync_all());
    if let Err(e) = result {
        drop(file);
        let _ = std::fs::remove_file(path);
        return Err(ro_err!(ErrorKind::Write, "{}: {e}", path.display()));
    }
    Ok(())
}

fn open_new(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    // create_new fails atomically if the file exists, there is no window between check and create
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OUTPUT_MODE);
    }
    options.open(path)
}
