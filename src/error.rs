//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore dell'ottimizzatore.
//!
//! ## Responsabilità:
//! - Definisce `OptimizeError` enum per categorizzare tutti i fallimenti possibili
//! - Fornisce messaggi di errore descrittivi per il logging
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `InvalidPath`: Il target non è un file regolare
//! - `UnsupportedType`: Tipo rilevato fuori da {gif, jpeg, png}
//! - `NoToolAvailable`: Tipo supportato ma nessun tool configurato
//! - `ToolFailed`: Il tool esterno è uscito con status non-zero (porta la riga di comando)
//! - `ToolSpawn`: Il processo non è partito (binario mancante, permessi)
//! - `Io`: Errori di I/O durante sniffing o sostituzione file
//! - `Config`: Nome tool o valore di configurazione non valido
//!
//! ## Nota:
//! `Optimizer::optimize` non propaga mai questi errori: li logga e li
//! converte in `false`. Il tipo esiste per dare contesto ai log.

use crate::file_type::FileType;
use crate::tool::ToolName;
use std::path::PathBuf;

/// Custom error types for image optimization
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("'{}' is not a file.", .0.display())]
    InvalidPath(PathBuf),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No {0} optimization tool configured")]
    NoToolAvailable(FileType),

    #[error("{tool} exited with {}: {command}", describe_exit(.code))]
    ToolFailed {
        tool: ToolName,
        /// The stage as it would read on a shell line
        command: String,
        code: Option<i32>,
    },

    #[error("Failed to start {tool}: {source}")]
    ToolSpawn {
        tool: ToolName,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
