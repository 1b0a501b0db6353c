pub mod analyze;
pub mod config;
pub mod export;
pub mod import;
pub mod library;
pub mod recommend;
pub mod session;
pub mod stats;

pub use export::run_export;
pub use import::run_import;
pub use session::Session;
