use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;

use imgforged_common::Result;
use tempfile::NamedTempFile;

/// Replace `dest` with `data` without ever exposing a partial file.
///
/// The bytes go to a temporary file in the destination directory, which is
/// closed and then renamed over `dest`. The temporary file is closed before
/// the rename so no write notification is ever reported under `dest`'s
/// name. A failure leaves `dest` untouched and removes the temporary file.
///
/// If `dest` is a symlink the file it points to is replaced and the link
/// is kept.
pub fn write_atomic(dest: &Path, data: &[u8], permissions: Option<Permissions>) -> Result<()> {
    let dest = match fs::symlink_metadata(dest) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(dest)?,
        _ => dest.to_path_buf(),
    };

    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }

    tmp.into_temp_path().persist(&dest).map_err(|e| e.error)?;
    Ok(())
}
