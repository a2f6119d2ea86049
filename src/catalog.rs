use crate::identify::identify;
use crate::models::rom::{RomEntry, StoredFile};
use crate::naming::original_hint;
use crate::storage::{is_in_flight, StorageError, UploadDir};
use std::path::PathBuf;
use std::io::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    InvalidName(#[from] StorageError),
    #[error("not found")]
    NotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn not_found_or_io(e: std::io::Error) -> CatalogError {
    if e.kind() == ErrorKind::NotFound {
        CatalogError::NotFound
    } else {
        CatalogError::Io(e)
    }
}

/// The upload directory viewed as a list of ROMs. Nothing is cached, every
/// call goes back to disk.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: UploadDir,
}

impl Catalog {
    pub fn new(dir: UploadDir) -> Self {
        Self { dir }
    }

    pub fn list(&self) -> Result<Vec<RomEntry>, CatalogError> {
        let entries = match std::fs::read_dir(self.dir.root()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let Ok(stored_name) = entry.file_name().into_string() else {
                log::warn!("skipping non utf-8 entry {:?}", entry.path());
                continue;
            };
            if is_in_flight(&stored_name) {
                continue;
            }
            // removed between readdir and stat
            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !meta.is_file() {
                continue;
            }
            files.push(StoredFile {
                original_name: original_hint(&stored_name).to_string(),
                stored_name,
                size_bytes: meta.len(),
            });
        }
        files.sort_by(|a, b| a.stored_name.cmp(&b.stored_name));

        Ok(files
            .into_iter()
            .map(|f| {
                let info = identify(&f.original_name);
                RomEntry::new(f, info)
            })
            .collect())
    }

    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>, CatalogError> {
        let path = self.entry_path(stored_name)?;
        std::fs::read(path).map_err(not_found_or_io)
    }

    pub fn delete(&self, stored_name: &str) -> Result<(), CatalogError> {
        let path = self.entry_path(stored_name)?;
        std::fs::remove_file(path).map_err(not_found_or_io)?;
        log::info!("deleted rom {stored_name}");
        Ok(())
    }

    /// Path of a file `list` would show. Anything it skips (directories,
    /// in-flight uploads) counts as absent.
    fn entry_path(&self, stored_name: &str) -> Result<PathBuf, CatalogError> {
        let path = self.dir.resolve(stored_name).map_err(|e| {
            log::warn!("rejected catalog access: {e}");
            e
        })?;
        if is_in_flight(stored_name) {
            return Err(CatalogError::NotFound);
        }
        let meta = std::fs::metadata(&path).map_err(not_found_or_io)?;
        if !meta.is_file() {
            return Err(CatalogError::NotFound);
        }
        Ok(path)
    }
}
