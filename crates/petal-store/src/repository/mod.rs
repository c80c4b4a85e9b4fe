//! # Repository Module
//!
//! Store access behind small typed APIs.
//!
//! ## Available Repositories
//!
//! - [`settings::SettingsRepository`] - Key-value settings (JSON blobs)
//! - [`presets::PresetRepository`] - Saved user presets, on top of settings

pub mod presets;
pub mod settings;
