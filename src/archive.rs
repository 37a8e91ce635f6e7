//! Zip packing and unpacking for the secrets directory
//!
//! Entries are stored relative to the source directory root so extraction
//! does not introduce a wrapping directory. Unix file modes are preserved,
//! which matters for the SSH private key inside the archive.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Zip the contents of `source_dir` into `output`
pub fn create_zip(source_dir: &Path, output: &Path) -> Result<()> {
    let file = File::create(output)?;
    let mut zip = ZipWriter::new(file);

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| Error::Internal(e.to_string()))?;
        let name = relative.to_string_lossy().replace('\\', "/");

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(entry_mode(&entry));

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            zip.write_all(&fs::read(entry.path())?)?;
        }
    }

    zip.finish()?;
    Ok(())
}

/// Extract a zip archive into `dest_dir`, creating it if needed
pub fn extract_zip(zip_file: &Path, dest_dir: &Path) -> Result<()> {
    fs::create_dir_all(dest_dir)?;

    let mut archive = ZipArchive::new(File::open(zip_file)?)?;
    archive.extract(dest_dir)?;
    Ok(())
}

#[cfg(unix)]
fn entry_mode(entry: &walkdir::DirEntry) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    entry
        .metadata()
        .map(|m| m.permissions().mode())
        .unwrap_or(0o644)
}

#[cfg(not(unix))]
fn entry_mode(_entry: &walkdir::DirEntry) -> u32 {
    0o644
}
