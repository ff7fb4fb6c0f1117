//! Game balance settings
//!
//! Loaded from a JSON file next to the binary. The file's `difficulty` picks the
//! preset that fills the difficulty-dependent fields it leaves out; every other
//! missing field keeps its default. An unreadable file falls back to defaults
//! entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Ball speed per axis at the start of a game (pixels/s)
    pub fn ball_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 80.0,
            Difficulty::Normal => 100.0,
            Difficulty::Hard => 130.0,
        }
    }

    /// Speed added to ball and paddle on every block hit
    pub fn difficulty_step(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Normal => 2.0,
            Difficulty::Hard => 3.0,
        }
    }

    pub fn starting_lives(&self) -> u8 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal | Difficulty::Hard => 3,
        }
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SettingsFile")]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Speeds ===
    /// Ball speed per axis (pixels/s); the ball always travels on a diagonal
    pub ball_speed: f32,
    /// Paddle speed (pixels/s)
    pub paddle_speed: f32,
    /// Added to ball and paddle speed on every block hit
    pub difficulty_step: f32,

    // === Power-ups ===
    /// Speed shift applied by Speed/Slow power-ups
    pub power_bonus: f32,
    /// Seconds a Speed/Slow power-up lasts
    pub power_duration: f32,
    pub speed_blocks: usize,
    pub slow_blocks: usize,
    pub extra_life_blocks: usize,

    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            ball_speed: 100.0,
            paddle_speed: 150.0,
            difficulty_step: 2.0,

            power_bonus: 50.0,
            power_duration: 10.0,
            speed_blocks: 3,
            slow_blocks: 3,
            extra_life_blocks: 1,

            starting_lives: 3,
        }
    }
}

/// On-disk form of [`Settings`]; absent fields are filled in on conversion
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    difficulty: Difficulty,
    ball_speed: Option<f32>,
    paddle_speed: Option<f32>,
    difficulty_step: Option<f32>,
    power_bonus: Option<f32>,
    power_duration: Option<f32>,
    speed_blocks: Option<usize>,
    slow_blocks: Option<usize>,
    extra_life_blocks: Option<usize>,
    starting_lives: Option<u8>,
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        let preset = Settings::from_preset(file.difficulty);
        Self {
            difficulty: file.difficulty,
            ball_speed: file.ball_speed.unwrap_or(preset.ball_speed),
            paddle_speed: file.paddle_speed.unwrap_or(preset.paddle_speed),
            difficulty_step: file.difficulty_step.unwrap_or(preset.difficulty_step),
            power_bonus: file.power_bonus.unwrap_or(preset.power_bonus),
            power_duration: file.power_duration.unwrap_or(preset.power_duration),
            speed_blocks: file.speed_blocks.unwrap_or(preset.speed_blocks),
            slow_blocks: file.slow_blocks.unwrap_or(preset.slow_blocks),
            extra_life_blocks: file.extra_life_blocks.unwrap_or(preset.extra_life_blocks),
            starting_lives: file.starting_lives.unwrap_or(preset.starting_lives),
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates difficulty-dependent settings)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.ball_speed = preset.ball_speed();
        self.difficulty_step = preset.difficulty_step();
        self.starting_lives = preset.starting_lives();
    }

    /// Total number of blocks carrying a power-up
    pub fn powered_blocks(&self) -> usize {
        self.speed_blocks + self.slow_blocks + self.extra_life_blocks
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_names() {
        assert_eq!(Difficulty::Easy.as_str(), "Easy");
        assert_eq!(Difficulty::default().as_str(), "Normal");
    }

    #[test]
    fn test_preset_applies_speeds() {
        let settings = Settings::from_preset(Difficulty::Hard);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.ball_speed, 130.0);
        assert_eq!(settings.difficulty_step, 3.0);
        // Untouched by presets
        assert_eq!(settings.paddle_speed, 150.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "ball_speed": 120.0, "slow_blocks": 0 }"#)
            .expect("valid json");
        assert_eq!(settings.ball_speed, 120.0);
        assert_eq!(settings.slow_blocks, 0);
        assert_eq!(settings.power_duration, 10.0);
        assert_eq!(settings.powered_blocks(), 4);
    }

    #[test]
    fn test_json_difficulty_picks_preset() {
        let settings = Settings::from_json(r#"{ "difficulty": "Hard" }"#).expect("valid json");
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.ball_speed, 130.0);
        assert_eq!(settings.difficulty_step, 3.0);
        assert_eq!(settings.starting_lives, 3);

        let settings = Settings::from_json(r#"{ "difficulty": "Easy" }"#).expect("valid json");
        assert_eq!(settings.ball_speed, 80.0);
        assert_eq!(settings.starting_lives, 5);
        // Not preset dependent
        assert_eq!(settings.paddle_speed, 150.0);
    }

    #[test]
    fn test_json_fields_override_preset() {
        let settings = Settings::from_json(r#"{ "difficulty": "Hard", "ball_speed": 90.0 }"#)
            .expect("valid json");
        assert_eq!(settings.ball_speed, 90.0);
        // The rest still come from Hard
        assert_eq!(settings.difficulty_step, 3.0);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(Settings::from_json("{}").expect("valid json"), Settings::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "difficulty": "Impossible" }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("breakout-settings-does-not-exist.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("breakout-settings-{}.json", std::process::id()));
        let settings = Settings::from_preset(Difficulty::Easy);
        settings.save(&path).expect("writable temp dir");

        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
