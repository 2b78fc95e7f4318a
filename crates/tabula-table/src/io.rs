//! Workbook container format and file operations.
//!
//! ```text
//! +------------------+
//! | Magic: "TBL\x01" | 4 bytes - file identification
//! +------------------+
//! | Version: 1       | 4 bytes - u32 little-endian schema version
//! +------------------+
//! | JSON Payload     | Variable - serde_json encoded workbook
//! +------------------+
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{Result, TableError};
use crate::workbook::Workbook;

/// Current container schema version.
///
/// Containers with a higher version are rejected on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Magic bytes at the start of every workbook container.
pub const MAGIC_BYTES: [u8; 4] = [b'T', b'B', b'L', 0x01];

const HEADER_LEN: usize = 8;

impl Workbook {
    /// Serializes the workbook into a container.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload =
            serde_json::to_vec(self).map_err(|source| TableError::Serialization { source })?;

        let mut output = Vec::with_capacity(HEADER_LEN + payload.len());
        output.extend_from_slice(&MAGIC_BYTES);
        output.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
        output.extend_from_slice(&payload);
        Ok(output)
    }

    /// Opens a workbook from container bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(TableError::InvalidFormat {
                reason: "container too small".to_string(),
            });
        }

        if bytes[0..4] != MAGIC_BYTES {
            return Err(TableError::InvalidFormat {
                reason: "invalid magic bytes".to_string(),
            });
        }

        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if version > CURRENT_SCHEMA_VERSION {
            return Err(TableError::UnsupportedVersion {
                found: version,
                max_supported: CURRENT_SCHEMA_VERSION,
            });
        }

        let workbook: Self = serde_json::from_slice(&bytes[HEADER_LEN..])
            .map_err(|source| TableError::Deserialization { source })?;
        workbook.ensure_unique_names()?;
        Ok(workbook)
    }

    /// Loads a workbook container from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| TableError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        let workbook = Self::from_bytes(&bytes)?;
        tracing::debug!(path = %path.display(), sheets = workbook.sheet_count(), "loaded workbook");
        Ok(workbook)
    }

    /// Saves the workbook container to disk.
    ///
    /// Writes a temp file next to the target and renames it into place, so a
    /// failed save never leaves a truncated file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        write_atomic(path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved workbook");
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| TableError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let mut file = File::create(&temp_path).map_err(|source| TableError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;

    file.write_all(bytes).map_err(|source| TableError::Io {
        operation: "write",
        path: temp_path.clone(),
        source,
    })?;

    file.sync_all().map_err(|source| TableError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| TableError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Worksheet;
    use tempfile::tempdir;

    fn sample() -> Workbook {
        let mut sheet = Worksheet::new("Data");
        sheet.set_cell_value(0, 0, "Name");
        sheet.set_cell_value(1, 0, 12.5);
        Workbook::with_sheet(sheet)
    }

    #[test]
    fn test_container_header() {
        let bytes = sample().to_bytes().unwrap();
        assert_eq!(&bytes[0..4], &MAGIC_BYTES);
        assert_eq!(
            u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            CURRENT_SCHEMA_VERSION
        );
    }

    #[test]
    fn test_reject_invalid_magic() {
        let err = Workbook::from_bytes(b"NOT_A_WORKBOOK").unwrap_err();
        assert!(matches!(err, TableError::InvalidFormat { .. }));
    }

    #[test]
    fn test_reject_too_small() {
        let err = Workbook::from_bytes(b"TBL").unwrap_err();
        assert!(matches!(err, TableError::InvalidFormat { .. }));
    }

    #[test]
    fn test_reject_newer_version() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        let err = Workbook::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            TableError::UnsupportedVersion { found: 99, max_supported: 1 }
        ));
    }

    #[test]
    fn test_reject_corrupt_payload() {
        let mut bytes = MAGIC_BYTES.to_vec();
        bytes.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
        bytes.extend_from_slice(b"{not json");
        let err = Workbook::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TableError::Deserialization { .. }));
    }

    #[test]
    fn test_reject_duplicate_sheet_names() {
        let mut workbook = sample();
        workbook.add_sheet(Worksheet::new("Spare")).unwrap();
        let bytes = sample_bytes_with_renamed(&workbook, "\"Spare\"", "\"Data\"");

        let err = Workbook::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TableError::DuplicateSheet { name } if name == "Data"));
    }

    fn sample_bytes_with_renamed(workbook: &Workbook, from: &str, to: &str) -> Vec<u8> {
        let bytes = workbook.to_bytes().unwrap();
        let payload = std::str::from_utf8(&bytes[HEADER_LEN..]).unwrap();
        let mut renamed = bytes[..HEADER_LEN].to_vec();
        renamed.extend_from_slice(payload.replace(from, to).as_bytes());
        renamed
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("book.tbl");

        let workbook = sample();
        workbook.save(&path).unwrap();

        assert!(!dir.path().join("nested").join("book.tbl.tmp").exists());
        assert_eq!(Workbook::load(&path).unwrap(), workbook);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Workbook::load(&dir.path().join("missing.tbl")).unwrap_err();
        assert!(matches!(err, TableError::Io { operation: "read", .. }));
    }
}
