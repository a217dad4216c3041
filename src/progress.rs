//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche della CLI.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Gestisce la progress bar principale (`indicatif`)
//! - `OptimizationStats`: Traccia statistiche cumulative della run
//!
//! ## Statistiche tracciate:
//! - **files_processed**: Totale file elaborati
//! - **files_succeeded**: File per cui `optimize` ha riportato `true`
//! - **files_not_reported**: File per cui `optimize` ha riportato `false`
//!   (fallimento, tipo non supportato, o modalità legacy)
//! - **total_bytes_saved**: Byte risparmiati, misurati su disco
//! - **total_original_size**: Dimensione totale file originali
//!
//! I byte risparmiati vengono misurati confrontando le dimensioni prima e
//! dopo, quindi sono corretti anche quando `optimize` riporta `false`.

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a batch of files
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] \
                 {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Hidden bar, for single-file runs
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for a CLI run
#[derive(Debug, Default)]
pub struct OptimizationStats {
    pub files_processed: usize,
    pub files_succeeded: usize,
    pub files_not_reported: usize,
    pub total_bytes_saved: u64,
    pub total_original_size: u64,
}

impl OptimizationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, succeeded: bool, original_size: u64, new_size: u64) {
        self.files_processed += 1;
        if succeeded {
            self.files_succeeded += 1;
        } else {
            self.files_not_reported += 1;
        }
        self.total_original_size += original_size;
        self.total_bytes_saved += original_size.saturating_sub(new_size);
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            (self.total_bytes_saved as f64 / self.total_original_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Succeeded: {} | Not reported: {} | Total saved: {} ({:.2}%)",
            self.files_processed,
            self.files_succeeded,
            self.files_not_reported,
            FileManager::format_size(self.total_bytes_saved),
            self.overall_reduction_percent()
        )
    }
}
