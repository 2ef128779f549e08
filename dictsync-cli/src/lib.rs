//! CLI library for testing purposes

pub mod config;
pub mod export;
pub mod import;
pub mod list;
pub mod validation;
pub mod view;

pub use config::{DictsyncConfig, load_config};
pub use dictsync::JsonFileStore;
pub use export::LanguageSelection;
