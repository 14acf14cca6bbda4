// ABOUTME: Configuration management for squash-match
// TOML file under ~/.squash-match plus environment overrides; every field has a default

use crate::flows::MatchingSchedule;
use crate::models::SlotGrid;
use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

pub mod time_format;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub invite: InviteConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub offer: OfferConfig,

    #[serde(default)]
    pub preferences: PreferencesConfig,

    #[serde(default)]
    pub swipe: SwipeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteConfig {
    /// Links are built as `<base_url>/invite/<id>`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First start time in the weekly slot grid
    #[serde(default = "default_first_slot", with = "time_format::hhmm")]
    pub first_slot: NaiveTime,

    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,

    /// Slots per day in the weekly grid
    #[serde(default = "default_slot_count")]
    pub slot_count: u32,

    /// Days from today to the first swipe candidate
    #[serde(default = "default_match_offset_days")]
    pub match_offset_days: u32,

    #[serde(default = "default_match_days")]
    pub match_days: u32,

    #[serde(default = "default_match_times", with = "time_format::hhmm_list")]
    pub match_times: Vec<NaiveTime>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            first_slot: default_first_slot(),
            step_minutes: default_step_minutes(),
            slot_count: default_slot_count(),
            match_offset_days: default_match_offset_days(),
            match_days: default_match_days(),
            match_times: default_match_times(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferConfig {
    /// Start times offered on the game details step
    #[serde(default = "default_time_options", with = "time_format::hhmm_list")]
    pub time_options: Vec<NaiveTime>,

    /// Minutes; one of 30, 60, 90, 120
    #[serde(default = "default_duration")]
    pub default_duration: u32,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            time_options: default_time_options(),
            default_duration: default_duration(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Locations offered on the preferences step
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            locations: default_locations(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeConfig {
    /// Drag distance in pixels that counts as a swipe
    #[serde(default = "default_threshold_px")]
    pub threshold_px: f64,

    /// Card animation time before the decision is applied
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_px: default_threshold_px(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_base_url() -> String {
    "https://squashmatch.app".to_string()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn default_first_slot() -> NaiveTime {
    hm(6, 0)
}

fn default_step_minutes() -> u32 {
    30
}

fn default_slot_count() -> u32 {
    24
}

fn default_match_offset_days() -> u32 {
    1
}

fn default_match_days() -> u32 {
    7
}

fn default_match_times() -> Vec<NaiveTime> {
    vec![hm(10, 0), hm(15, 0), hm(19, 0)]
}

fn default_time_options() -> Vec<NaiveTime> {
    (8..=20).map(|hour| hm(hour, 0)).collect()
}

fn default_duration() -> u32 {
    60
}

fn default_locations() -> Vec<String> {
    ["Downtown", "North Side", "South Side", "East Side", "West Side"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_threshold_px() -> f64 {
    100.0
}

fn default_delay_ms() -> u64 {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            invite: InviteConfig::default(),
            schedule: ScheduleConfig::default(),
            offer: OfferConfig::default(),
            preferences: PreferencesConfig::default(),
            swipe: SwipeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the user config file (defaults if absent), then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// ~/.squash-match
    pub fn data_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".squash-match"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("config.toml"))
    }

    /// `SQUASH_MATCH_BASE_URL` replaces the invite base URL
    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("SQUASH_MATCH_BASE_URL") {
            match Url::parse(&raw) {
                Ok(_) => self.invite.base_url = raw,
                Err(e) => warn!("Ignoring SQUASH_MATCH_BASE_URL '{}': {}", raw, e),
            }
        }
    }

    /// Parsed invite base URL
    pub fn invite_base_url(&self) -> Result<Url> {
        Url::parse(&self.invite.base_url)
            .with_context(|| format!("Invalid invite base URL '{}'", self.invite.base_url))
    }

    pub fn slot_grid(&self) -> SlotGrid {
        SlotGrid {
            first_slot: self.schedule.first_slot,
            step_minutes: self.schedule.step_minutes,
            slot_count: self.schedule.slot_count,
        }
    }

    pub fn matching_schedule(&self) -> MatchingSchedule {
        MatchingSchedule {
            first_day_offset: self.schedule.match_offset_days,
            days: self.schedule.match_days,
            times: self.schedule.match_times.clone(),
        }
    }
}
