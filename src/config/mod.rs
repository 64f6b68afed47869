// SPDX-License-Identifier: MPL-2.0
//! This module handles the presenter configuration, including loading and
//! saving default request parameters to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_blocker::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.display_threshold_ms = Some(250);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // Seed a request from it
//! let request = config.request_builder().message("Syncing").build();
//! assert_eq!(request.display_threshold().value(), 250);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::timing::{DisplayThreshold, FrameInterval, MinimumDisplayTime};
use crate::error::Result;
use crate::presenter::RequestBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedBlocker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display_threshold_ms: Option<u32>,
    #[serde(default)]
    pub minimum_display_time_ms: Option<u32>,
    #[serde(default)]
    pub frame_interval_ms: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub closeable: Option<bool>,
    #[serde(default)]
    pub blocking_screen: Option<bool>,
    #[serde(default)]
    pub background_alpha: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_threshold_ms: Some(DEFAULT_DISPLAY_THRESHOLD_MS),
            minimum_display_time_ms: Some(DEFAULT_MINIMUM_DISPLAY_TIME_MS),
            frame_interval_ms: Some(DEFAULT_FRAME_INTERVAL_MS),
            message: None,
            closeable: Some(DEFAULT_CLOSEABLE),
            blocking_screen: Some(DEFAULT_BLOCKING_SCREEN),
            background_alpha: Some(DEFAULT_BACKGROUND_ALPHA),
        }
    }
}

impl Config {
    /// Display threshold, falling back to the default when unset.
    #[must_use]
    pub fn display_threshold(&self) -> DisplayThreshold {
        DisplayThreshold::new(
            self.display_threshold_ms
                .unwrap_or(DEFAULT_DISPLAY_THRESHOLD_MS),
        )
    }

    /// Minimum display time, falling back to the default when unset.
    #[must_use]
    pub fn minimum_display_time(&self) -> MinimumDisplayTime {
        MinimumDisplayTime::new(
            self.minimum_display_time_ms
                .unwrap_or(DEFAULT_MINIMUM_DISPLAY_TIME_MS),
        )
    }

    /// Frame interval, falling back to the default when unset.
    #[must_use]
    pub fn frame_interval(&self) -> FrameInterval {
        FrameInterval::new(self.frame_interval_ms.unwrap_or(DEFAULT_FRAME_INTERVAL_MS))
    }

    /// Starts a request pre-filled with these settings.
    #[must_use]
    pub fn request_builder(&self) -> RequestBuilder {
        let mut builder = RequestBuilder::default()
            .display_threshold(self.display_threshold())
            .minimum_display_time(self.minimum_display_time())
            .closeable(self.closeable.unwrap_or(DEFAULT_CLOSEABLE))
            .blocking_screen(self.blocking_screen.unwrap_or(DEFAULT_BLOCKING_SCREEN))
            .background_alpha(self.background_alpha.unwrap_or(DEFAULT_BACKGROUND_ALPHA));
        if let Some(message) = &self.message {
            builder = builder.message(message.clone());
        }
        builder
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
