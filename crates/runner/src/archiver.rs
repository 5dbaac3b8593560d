use polybuild::{Archiver, Error, Result};
use std::{fs::File, io, path::Path};
use walkdir::WalkDir;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

/// Compresses a build output directory into a single zip artifact. The zip
/// writing is blocking IO, so it runs on the blocking thread pool.
pub struct ZipArchiver;

#[async_trait::async_trait]
impl Archiver for ZipArchiver {
  async fn archive(&self, source_dir: &Path, dest_file: &Path) -> Result<()> {
    let source_dir = source_dir.to_path_buf();
    let dest_file = dest_file.to_path_buf();

    tokio::task::spawn_blocking(move || zip_directory(&source_dir, &dest_file))
      .await
      .map_err(|err| Error::archiver_error(format!("Archive task panicked: {}", err)))?
  }
}

fn zip_directory(source_dir: &Path, dest_file: &Path) -> Result<()> {
  if !source_dir.is_dir() {
    return Err(Error::archiver_error(format!(
      "{} is not a directory",
      source_dir.display()
    )));
  }

  let file = File::create(dest_file).map_err(|err| {
    Error::archiver_error(format!("Failed to create {}: {}", dest_file.display(), err))
  })?;

  let mut zip = ZipWriter::new(file);
  let dir_options = FileOptions::default().compression_method(CompressionMethod::Stored);
  let file_options = FileOptions::default().compression_method(CompressionMethod::Deflated);

  for entry in WalkDir::new(source_dir) {
    let entry = entry.map_err(Error::archiver_error)?;
    let path = entry.path();

    let rel = match path.strip_prefix(source_dir) {
      Ok(rel) if rel.as_os_str().is_empty() => continue,
      Ok(rel) => rel,
      Err(_) => continue,
    };

    // Zip entry names always use forward slashes.
    let mut name = rel.to_string_lossy().replace('\\', "/");

    if entry.file_type().is_dir() {
      if !name.ends_with('/') {
        name.push('/');
      }

      zip.add_directory(name, dir_options).map_err(Error::archiver_error)?;
      continue;
    }

    zip.start_file(name, file_options).map_err(Error::archiver_error)?;

    let mut input = File::open(path).map_err(Error::archiver_error)?;
    io::copy(&mut input, &mut zip).map_err(Error::archiver_error)?;
  }

  zip.finish().map_err(Error::archiver_error)?;

  Ok(())
}
