// rotating_file.rs
// Purpose: Size-capped append-only log file with numbered backups
//
// Layout: `<path>` is the live file, `<path>.1` the newest backup and
// `<path>.<max_files>` the oldest one kept.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{LogError, LogResult};

/// Bytes in one MiB; `fileSizeMax` is configured in these units.
pub const BYTES_PER_MIB: u64 = 1_048_576;

/// Append-only file that rolls over before a write would exceed `max_bytes`.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_files: usize,
    file: File,
    size: u64,
    // set once the live file has been moved aside but not yet reopened
    detached: bool,
}

impl RotatingFile {
    /// Opens (or creates) the live file, creating missing parent directories.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, max_files: usize) -> LogResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| LogError::io(format!("creating {}", parent.display()), e))?;
        }
        let file = open_append(&path)?;
        let size = file
            .metadata()
            .map_err(|e| LogError::io("reading log file size", e))?
            .len();

        Ok(RotatingFile {
            path,
            max_bytes,
            max_files,
            file,
            size,
            detached: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written to the live file so far.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Appends one complete record. An oversized record still lands, alone,
    /// in a fresh file.
    pub fn write_line(&mut self, bytes: &[u8]) -> LogResult<()> {
        if self.detached {
            self.reopen()?;
        }
        if self.size > 0 && self.size + bytes.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file
            .write_all(bytes)
            .map_err(|e| LogError::io("writing log file", e))?;
        self.size += bytes.len() as u64;
        Ok(())
    }

    /// Moves the live file to `<path>.1`, shifting older backups up by one
    /// and discarding whatever falls past `max_files`.
    ///
    /// If the live path has vanished there is nothing to move aside and the
    /// backups stay where they are. If reopening fails after the move, the
    /// next write retries the reopen without shifting the backups again.
    pub fn rotate(&mut self) -> LogResult<()> {
        if self.detached {
            return self.reopen();
        }
        self.file
            .flush()
            .map_err(|e| LogError::io("flushing log file", e))?;

        if self.max_files == 0 {
            self.file
                .set_len(0)
                .map_err(|e| LogError::io("truncating log file", e))?;
            self.size = 0;
            return Ok(());
        }

        if !self.path.exists() {
            return self.reopen();
        }

        let oldest = self.backup_path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)
                .map_err(|e| LogError::io(format!("removing {}", oldest.display()), e))?;
        }
        for index in (1..self.max_files).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))
                    .map_err(|e| LogError::io(format!("shifting {}", from.display()), e))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
            .map_err(|e| LogError::io("rotating log file", e))?;
        self.detached = true;
        self.reopen()
    }

    fn reopen(&mut self) -> LogResult<()> {
        let file = open_append(&self.path)?;
        let size = file
            .metadata()
            .map_err(|e| LogError::io("reading log file size", e))?
            .len();
        self.file = file;
        self.size = size;
        self.detached = false;
        Ok(())
    }

    /// Path of the `index`-th backup, `1` being the newest.
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

fn open_append(path: &Path) -> LogResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::io(format!("opening {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/app.log");
        let mut file = RotatingFile::open(&path, 1024, 3).unwrap();
        file.write_line(b"first\n").unwrap();
        assert_eq!(read(&path), "first\n");
    }

    #[test]
    fn resumes_size_from_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, b"0123456789\n").unwrap();

        let file = RotatingFile::open(&path, 1024, 3).unwrap();
        assert_eq!(file.size(), 11);
    }

    #[test]
    fn rotates_before_exceeding_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RotatingFile::open(&path, 10, 3).unwrap();

        file.write_line(b"aaaa\n").unwrap();
        file.write_line(b"bbbb\n").unwrap();
        // 10 bytes written; one more would exceed the cap
        file.write_line(b"cccc\n").unwrap();

        assert_eq!(read(&file.backup_path(1)), "aaaa\nbbbb\n");
        assert_eq!(read(&path), "cccc\n");
    }

    #[test]
    fn oversized_record_is_written_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RotatingFile::open(&path, 4, 2).unwrap();

        file.write_line(b"this line is long\n").unwrap();
        assert_eq!(read(&path), "this line is long\n");
        assert!(!file.backup_path(1).exists());
    }

    #[test]
    fn drops_oldest_backup_past_max_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RotatingFile::open(&path, 2, 2).unwrap();

        for line in ["1\n", "2\n", "3\n", "4\n"] {
            file.write_line(line.as_bytes()).unwrap();
        }

        assert_eq!(read(&path), "4\n");
        assert_eq!(read(&file.backup_path(1)), "3\n");
        assert_eq!(read(&file.backup_path(2)), "2\n");
        assert!(!file.backup_path(3).exists());
    }

    #[test]
    fn vanished_live_file_is_recreated_without_rotating() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RotatingFile::open(&path, 4, 2).unwrap();

        file.write_line(b"1\n").unwrap();
        file.write_line(b"2\n").unwrap();
        fs::remove_file(&path).unwrap();

        file.write_line(b"3\n").unwrap();
        assert!(!file.backup_path(1).exists());
        assert_eq!(read(&path), "3\n");

        file.write_line(b"4\n").unwrap();
        file.write_line(b"5\n").unwrap();
        assert_eq!(read(&file.backup_path(1)), "3\n4\n");
        assert_eq!(read(&path), "5\n");
    }

    #[test]
    fn unfinished_rotation_reopens_without_shifting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RotatingFile::open(&path, 4, 3).unwrap();

        file.write_line(b"1\n").unwrap();
        file.write_line(b"2\n").unwrap();
        // the live file was moved aside but reopening it failed
        fs::rename(&path, file.backup_path(1)).unwrap();
        file.detached = true;

        for line in ["3\n", "4\n", "5\n"] {
            file.write_line(line.as_bytes()).unwrap();
        }

        assert_eq!(read(&file.backup_path(1)), "3\n4\n");
        assert_eq!(read(&file.backup_path(2)), "1\n2\n");
        assert!(!file.backup_path(3).exists());
        assert_eq!(read(&path), "5\n");
    }

    #[test]
    fn zero_max_files_truncates_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RotatingFile::open(&path, 2, 0).unwrap();

        file.write_line(b"1\n").unwrap();
        file.write_line(b"2\n").unwrap();

        assert_eq!(read(&path), "2\n");
        assert!(!file.backup_path(1).exists());
    }
}
