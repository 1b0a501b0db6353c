//! Getting lyrics in and out of verso.
//!
//! Imports LRC, TXT, and JSON lyric files into validated songs, exports a
//! catalog back to JSON or TXT, persists the library file, and loads the
//! user configuration.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod library;

pub use config::{Config, LoggingConfig};
pub use error::{ImportError, ImportResult};
pub use export::{export_songs, to_json, to_txt, ExportFormat};
pub use import::{import_path, ImportFailure, ImportReport, SourceFormat};
pub use library::{load_library, save_library};
