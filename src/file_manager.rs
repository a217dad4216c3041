//! # File Management Module
//!
//! Questo modulo raccoglie le operazioni sui file usate dall'ottimizzatore e dalla CLI.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file target in directory
//! - Costruzione dei path fratelli (`<file>.orig`, `<file>.tmp`)
//! - Utilità per calcoli dimensioni e percentuali
//!
//! ## Nota:
//! La discovery non filtra per estensione: il tipo di file viene deciso
//! dal contenuto, quindi ogni file regolare è un candidato.
//!
//! ## Esempio:
//! ```rust
//! use image_optimizer::file_manager::FileManager;
//! use std::path::Path;
//!
//! let backup = FileManager::with_suffix(Path::new("/img/a.png"), ".orig");
//! assert_eq!(backup, Path::new("/img/a.png.orig"));
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Append `suffix` to the full file name (`a.png` -> `a.png.orig`)
    pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Expand CLI arguments into target files.
    ///
    /// Directories are walked recursively and contribute their regular files.
    /// Other paths are kept as given so the optimizer can reject them itself.
    pub fn collect_targets(paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_dir() {
                let mut found: Vec<PathBuf> = WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path())
                    .filter(|p| !Self::is_side_file(p))
                    .collect();
                found.sort();
                files.extend(found);
            } else {
                files.push(path.clone());
            }
        }

        files
    }

    /// `<x>.orig` debug copies and `<x>.tmp` pngcrush leftovers are skipped,
    /// but only while `<x>` itself sits next to them
    fn is_side_file(path: &Path) -> bool {
        let side = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("orig") | Some("tmp")
        );
        side && path.with_extension("").is_file()
    }

    /// Size of a file in bytes
    pub async fn file_size(path: &Path) -> Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_suffix_keeps_extension() {
        assert_eq!(
            FileManager::with_suffix(Path::new("/a/b.tar.png"), ".tmp"),
            PathBuf::from("/a/b.tar.png.tmp")
        );
    }

    #[test]
    fn test_collect_targets() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(temp_dir.path().join("b.png"), "x").unwrap();
        std::fs::write(nested.join("a.bin"), "x").unwrap();
        std::fs::write(temp_dir.path().join("b.png.orig"), "x").unwrap();
        std::fs::write(temp_dir.path().join("b.png.tmp"), "x").unwrap();
        // no sibling, so these are ordinary images with odd names
        std::fs::write(temp_dir.path().join("old.orig"), "x").unwrap();
        std::fs::write(temp_dir.path().join("scan.tmp"), "x").unwrap();

        let missing = temp_dir.path().join("missing.jpg");
        let roots = [temp_dir.path().to_path_buf(), missing.clone()];
        let targets = FileManager::collect_targets(&roots);

        assert_eq!(
            targets,
            vec![
                temp_dir.path().join("b.png"),
                nested.join("a.bin"),
                temp_dir.path().join("old.orig"),
                temp_dir.path().join("scan.tmp"),
                missing
            ]
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(1536), "1.50 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(FileManager::calculate_reduction(0, 0), 0.0);
        assert_eq!(FileManager::calculate_reduction(200, 150), 25.0);
    }
}
