//! Game configuration resource.
//!
//! Room dimensions, handle diagnostics, and asset paths loaded from an INI
//! configuration file. Provides defaults for safe startup.
//!
//! # Configuration File Format
//!
//! ```ini
//! [room]
//! width = 640
//! height = 480
//!
//! [graphics]
//! strict_handles = true
//!
//! [assets]
//! backgrounds = ./assets/backgrounds.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_ROOM_WIDTH: u32 = 640;
const DEFAULT_ROOM_HEIGHT: u32 = 480;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_MANIFEST_PATH: &str = "./assets/backgrounds.json";

use crate::resources::roomsize::RoomSize;

/// Engine configuration resource.
///
/// `strict_handles` controls whether failed background lookups are reported
/// through the log; it defaults to the build profile (on for debug builds).
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Room width in pixels.
    pub room_width: u32,
    /// Room height in pixels.
    pub room_height: u32,
    /// Report invalid background handles through the diagnostic sink.
    pub strict_handles: bool,
    /// Path to the background manifest JSON.
    pub manifest_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            room_width: DEFAULT_ROOM_WIDTH,
            room_height: DEFAULT_ROOM_HEIGHT,
            strict_handles: cfg!(debug_assertions),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [room] section
        if let Some(width) = config.getuint("room", "width").ok().flatten() {
            self.room_width = width as u32;
        }
        if let Some(height) = config.getuint("room", "height").ok().flatten() {
            self.room_height = height as u32;
        }

        // [graphics] section
        if let Some(strict) = config.getbool("graphics", "strict_handles").ok().flatten() {
            self.strict_handles = strict;
        }

        // [assets] section
        if let Some(path) = config.get("assets", "backgrounds") {
            self.manifest_path = PathBuf::from(path);
        }

        info!(
            "Loaded config: {}x{} room, strict_handles={}, backgrounds={:?}",
            self.room_width, self.room_height, self.strict_handles, self.manifest_path
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("room", "width", Some(self.room_width.to_string()));
        config.set("room", "height", Some(self.room_height.to_string()));
        config.set(
            "graphics",
            "strict_handles",
            Some(self.strict_handles.to_string()),
        );
        config.set(
            "assets",
            "backgrounds",
            Some(self.manifest_path.display().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Room dimensions as the resource the renderer consumes.
    pub fn room_size(&self) -> RoomSize {
        RoomSize {
            w: self.room_width as i32,
            h: self.room_height as i32,
        }
    }
}
