//! # Image Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione esplicita (tool abilitati, debug, compatibilità risultato)
//! - `error`: Tipi di errore per il logging dei fallimenti
//! - `tool`: Tool supportati e set configurabile
//! - `file_type`: Rilevamento tipo dal contenuto (magic bytes)
//! - `command`: Costruzione della pipeline di tool per tipo
//! - `runner`: Esecuzione dei processi esterni
//! - `tool_resolver`: Ricerca dei binari (`TOOLS_DIR`, `PATH`)
//! - `optimizer`: Il dispatcher `Optimizer`
//! - `file_manager`: Discovery file e utilità dimensioni
//! - `progress`: Progress bar e statistiche della CLI
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use image_optimizer::{Config, Optimizer};
//! use std::path::Path;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let optimizer = Optimizer::new(Config::from_env()?);
//! optimizer.optimize(Path::new("static/banner.jpg")).await;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod file_type;
pub mod optimizer;
pub mod progress;
pub mod runner;
pub mod tool;
pub mod tool_resolver;

pub use command::{Command, Stage};
pub use config::Config;
pub use error::OptimizeError;
pub use file_type::FileType;
pub use optimizer::Optimizer;
pub use runner::{CommandRunner, SystemRunner};
pub use tool::{ToolName, ToolSet};
pub use tool_resolver::ToolPathResolver;
