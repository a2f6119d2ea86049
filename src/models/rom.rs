use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RomInfo {
    pub name: String,
    pub system: String,
}

/// A file in the upload directory. Built from a directory entry on demand.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub stored_name: String,
    pub original_name: String,
    pub size_bytes: u64,
}

/// One row of `GET /api/roms`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RomEntry {
    pub filename: String,
    pub name: String,
    pub system: String,
    pub size: u64,
}

impl RomEntry {
    pub fn new(file: StoredFile, info: RomInfo) -> Self {
        Self { filename: file.stored_name, name: info.name, system: info.system, size: file.size_bytes }
    }
}
