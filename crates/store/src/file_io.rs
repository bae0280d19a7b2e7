//! File I/O operations
//!
//! Exported documents are handed to a [`FileSink`]. [`DirectorySink`]
//! saves them the way a browser download does: into one directory, never
//! overwriting, and never leaving a half-written file behind.

use crate::{Result, StoreError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Longest file name, in bytes, most filesystems accept
pub const MAX_FILENAME_BYTES: usize = 255;

/// Extensions longer than this are treated as part of the stem
const MAX_EXTENSION_BYTES: usize = 16;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Destination for exported files
pub trait FileSink: Send + Sync {
    /// Store `bytes` under `filename`, returning where they ended up
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves files into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// First path for `filename` that is not taken: `name.pdf`,
    /// `name (1).pdf`, `name (2).pdf`, ...
    fn free_path(&self, filename: &str) -> PathBuf {
        let candidate = self.directory.join(filename);
        if !candidate.exists() {
            return candidate;
        }

        let (stem, ext) = split_extension(filename);
        (1u32..)
            .map(|n| self.directory.join(fit_name(stem, &format!(" ({})", n), ext)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

impl FileSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let filename = saveable_filename(filename)?;
        std::fs::create_dir_all(&self.directory)?;

        let target = self.free_path(&filename);
        let temp = self.directory.join(format!(
            ".export-{}-{}.part",
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        let written = std::fs::File::create(&temp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| std::fs::rename(&temp, &target)) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::info!(path = %target.display(), bytes = bytes.len(), "Saved file");
        Ok(target)
    }
}

/// Keeps saved files in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved `(filename, bytes)` pairs in save order
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        match self.files.lock() {
            Ok(files) => files.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FileSink for MemorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let filename = saveable_filename(filename)?;
        let mut files = match self.files.lock() {
            Ok(files) => files,
            Err(poisoned) => poisoned.into_inner(),
        };
        files.push((filename.clone(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

/// Turn a requested name into one that can be saved in a single directory.
///
/// Path separators and NUL become `_`, and the stem is shortened so the
/// name fits in [`MAX_FILENAME_BYTES`] with its extension intact. Names
/// that are empty or only dots are rejected.
pub fn saveable_filename(filename: &str) -> Result<String> {
    let cleaned: String = filename
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        return Err(StoreError::InvalidFilename(filename.to_string()));
    }

    let (stem, ext) = split_extension(&cleaned);
    Ok(fit_name(stem, "", ext))
}

fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(dot) if dot > 0 && filename.len() - dot <= MAX_EXTENSION_BYTES => {
            filename.split_at(dot)
        }
        _ => (filename, ""),
    }
}

/// `{stem}{suffix}{ext}`, with the stem cut on a char boundary to fit
fn fit_name(stem: &str, suffix: &str, ext: &str) -> String {
    let budget = MAX_FILENAME_BYTES.saturating_sub(suffix.len() + ext.len());
    let mut end = stem.len().min(budget);
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}{}", &stem[..end], suffix, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        let path = sink.save("cover.pdf", b"%PDF-1.4").unwrap();
        assert_eq!(path, dir.path().join("cover.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_save_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.save("cover.pdf", b"first").unwrap();
        let second = sink.save("cover.pdf", b"second").unwrap();
        let third = sink.save("cover.pdf", b"third").unwrap();

        assert_eq!(second, dir.path().join("cover (1).pdf"));
        assert_eq!(third, dir.path().join("cover (2).pdf"));
        assert_eq!(std::fs::read(dir.path().join("cover.pdf")).unwrap(), b"first");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        DirectorySink::new(dir.path()).save("a.pdf", b"x").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["a.pdf".to_string()]);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("2024");
        let path = DirectorySink::new(&nested).save("a.pdf", b"x").unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_path_separators_are_replaced() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        let path = sink
            .save("Jane_CS101_Assignment_1/2_Cover_2024-01-15.pdf", b"x")
            .unwrap();
        assert_eq!(
            path,
            dir.path().join("Jane_CS101_Assignment_1_2_Cover_2024-01-15.pdf")
        );
        let escaped = sink.save("../escape.pdf", b"x").unwrap();
        assert_eq!(escaped, dir.path().join(".._escape.pdf"));
        assert_eq!(
            sink.save("a\\b.pdf", b"x").unwrap(),
            dir.path().join("a_b.pdf")
        );
    }

    #[test]
    fn test_empty_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());
        for name in ["", ".", ".."] {
            let err = sink.save(name, b"x").unwrap_err();
            assert!(matches!(err, StoreError::InvalidFilename(_)), "{:?}", name);
        }
    }

    #[test]
    fn test_long_names_are_shortened() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());
        let name = format!(
            "{}_CS101_Assignment_3_Cover_2024-01-15.pdf",
            "J".repeat(220)
        );

        let first = sink.save(&name, b"first").unwrap();
        let second = sink.save(&name, b"second").unwrap();

        let first_name = first.file_name().unwrap().to_str().unwrap();
        let second_name = second.file_name().unwrap().to_str().unwrap();
        assert_eq!(first_name.len(), MAX_FILENAME_BYTES);
        assert_eq!(second_name.len(), MAX_FILENAME_BYTES);
        assert!(first_name.ends_with(".pdf"));
        assert!(second_name.ends_with(" (1).pdf"));
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
    }

    #[test]
    fn test_shortening_respects_char_boundaries() {
        let name = format!("{}.pdf", "é".repeat(200));
        let fitted = saveable_filename(&name).unwrap();
        assert!(fitted.len() <= MAX_FILENAME_BYTES);
        assert!(fitted.ends_with("é.pdf"));
    }

    #[test]
    fn test_short_names_are_unchanged() {
        assert_eq!(saveable_filename("cover.pdf").unwrap(), "cover.pdf");
    }

    #[test]
    fn test_memory_sink_records_files() {
        let sink = MemorySink::new();
        sink.save("one.pdf", b"1").unwrap();
        sink.save("two.pdf", b"2").unwrap();
        let names: Vec<_> = sink.files().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["one.pdf", "two.pdf"]);
    }
}
