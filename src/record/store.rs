use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{InvoiceError, Result};
use crate::record::schema::{InvoiceRecord, RECORD_EXTENSION};

/// Create a working directory if missing; any failure other than
/// "already exists" is fatal.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(source) => Err(InvoiceError::DirectoryCreation {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Accept `name` only when it names an entry directly inside a directory
pub fn plain_file_name(name: &str) -> Result<&str> {
    match Path::new(name).file_name() {
        Some(file) if file == name => Ok(name),
        _ => Err(InvoiceError::InvalidFileName(name.to_string())),
    }
}

/// Invoice records kept as one JSON file each under a single directory
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Open the store, creating its directory on first use
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Record file names in directory order (unsorted)
    pub fn list(&self) -> Result<Vec<String>> {
        let suffix = format!(".{RECORD_EXTENSION}");
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            // follows symlinks
            if !path.is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) if name.ends_with(&suffix) => names.push(name.to_string()),
                Some(_) => {}
                None => debug!("skipping non UTF-8 file name {}", path.display()),
            }
        }
        debug!("found {} record(s) in {}", names.len(), self.dir.display());
        Ok(names)
    }

    /// Path of a record given its file name or stem
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let suffix = format!(".{RECORD_EXTENSION}");
        let file = if name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{name}{suffix}")
        };
        Ok(self.dir.join(plain_file_name(&file)?))
    }

    pub fn load(&self, name: &str) -> Result<InvoiceRecord> {
        let path = self.path_for(name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(InvoiceError::RecordNotFound(path));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map_err(|source| InvoiceError::MalformedRecord { path, source })
    }

    /// Write the record, replacing any record with the same name
    pub fn save(&self, record: &InvoiceRecord) -> Result<PathBuf> {
        let path = self.path_for(&record.record_file_name())?;
        ensure_dir(&self.dir)?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| InvoiceError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&path, json)?;
        debug!("saved record {}", path.display());
        Ok(path)
    }
}
