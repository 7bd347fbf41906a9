use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub pager: PagerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// When the tracker recomputes progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Recompute on every scroll or resize event
    #[default]
    Immediate,
    /// Mark dirty on scroll/resize, recompute on the next animation frame
    Frame,
}

/// Easing curve used when smoothing reported progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the target when the smoothing window ends
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Update cadence
    #[serde(default)]
    pub sync_mode: SyncMode,
    /// Ease reported progress toward the raw value instead of jumping
    #[serde(default)]
    pub smoothing_enabled: bool,
    /// Length of one smoothing run in milliseconds
    #[serde(default = "default_smoothing_duration")]
    pub smoothing_duration_ms: u64,
    /// Easing curve for smoothing
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate used by hosts that pace frames themselves
    #[serde(default = "default_frame_fps")]
    pub frame_fps: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            sync_mode: SyncMode::default(),
            smoothing_enabled: false,
            smoothing_duration_ms: default_smoothing_duration(),
            easing: EasingType::default(),
            frame_fps: default_frame_fps(),
        }
    }
}

impl ProgressConfig {
    pub fn smoothing_duration(&self) -> Duration {
        Duration::from_millis(self.smoothing_duration_ms)
    }

    /// Interval between frames
    pub fn frame_interval(&self) -> Duration {
        if self.frame_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.frame_fps as u64).max(1))
        }
    }

    /// Smoothing only applies when enabled and the window is non-empty
    pub fn is_smooth(&self) -> bool {
        self.smoothing_enabled && self.smoothing_duration_ms > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Lines moved per j/k press
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Show the progress gauge in the status bar
    #[serde(default = "default_true")]
    pub show_gauge: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll_lines: default_scroll_lines(),
            show_gauge: default_true(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_smoothing_duration() -> u64 {
    150
}

fn default_frame_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_scroll_lines() -> u16 {
    1
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollsync/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollsync")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.progress.sync_mode, SyncMode::Immediate);
        assert!(!config.progress.smoothing_enabled);
        assert_eq!(config.progress.smoothing_duration_ms, 150);
        assert_eq!(config.progress.easing, EasingType::Cubic);
        assert_eq!(config.progress.frame_fps, 60);
        assert_eq!(config.pager.scroll_lines, 1);
        assert!(config.pager.show_gauge);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::parse(
            r#"
            [progress]
            sync_mode = "frame"
            easing = "ease_out"
            smoothing_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.progress.sync_mode, SyncMode::Frame);
        assert_eq!(config.progress.easing, EasingType::EaseOut);
        assert!(config.progress.is_smooth());
        assert_eq!(config.progress.frame_fps, 60);
        assert_eq!(config.pager.tick_rate_ms, 100);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::parse("[progress]\nsync_mode = \"sometimes\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ProgressConfig::default();
        assert!(!config.is_smooth());

        config.smoothing_enabled = true;
        assert!(config.is_smooth());

        config.smoothing_duration_ms = 0;
        assert!(!config.is_smooth());
    }

    #[test]
    fn test_frame_interval_fallback() {
        let config = ProgressConfig {
            frame_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(16));

        let fast = ProgressConfig {
            frame_fps: 5000,
            ..Default::default()
        };
        assert_eq!(fast.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join(format!("scrollsync-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.progress.sync_mode = SyncMode::Frame;
        config.pager.scroll_lines = 3;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.progress.sync_mode, SyncMode::Frame);
        assert_eq!(loaded.pager.scroll_lines, 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("scrollsync-does-not-exist/config.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.progress.sync_mode, SyncMode::Immediate);
    }
}
