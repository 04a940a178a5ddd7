use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::keyboard::KeyboardMode;
use crate::sequencer::PlaybackTiming;
use crate::shell::AdvancePolicy;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    card: CardConfig,
    #[serde(default)]
    playback: PlaybackConfig,
}

#[derive(Deserialize, Default)]
struct CardConfig {
    advance: Option<String>,
    keyboard: Option<String>,
    catalog: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct PlaybackConfig {
    note_spacing_secs: Option<f32>,
    sustain_secs: Option<f32>,
    volume: Option<f32>,
    muted: Option<bool>,
}

pub struct Config {
    card: CardConfig,
    playback: PlaybackConfig,
}

impl Config {
    /// Embedded defaults overlaid with `<config dir>/chordmaster/config.toml`.
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    /// Embedded defaults overlaid with `user`, if given and present.
    pub fn load_from(user: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_card(&mut base.card, user.card);
                            merge_playback(&mut base.playback, user.playback);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            card: base.card,
            playback: base.playback,
        }
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.card
            .advance
            .as_deref()
            .and_then(parse_advance_policy)
            .unwrap_or_default()
    }

    pub fn keyboard_mode(&self) -> KeyboardMode {
        self.card
            .keyboard
            .as_deref()
            .and_then(parse_keyboard_mode)
            .unwrap_or_default()
    }

    /// Replacement chord catalog, if configured.
    pub fn catalog_path(&self) -> Option<&Path> {
        self.card.catalog.as_deref()
    }

    /// Note spacing clamped to 0.05..2s, sustain to 0.1..10s.
    pub fn timing(&self) -> PlaybackTiming {
        let fallback = PlaybackTiming::default();
        PlaybackTiming {
            note_spacing: self
                .playback
                .note_spacing_secs
                .and_then(|s| secs(s, 0.05, 2.0))
                .unwrap_or(fallback.note_spacing),
            sustain: self
                .playback
                .sustain_secs
                .and_then(|s| secs(s, 0.1, 10.0))
                .unwrap_or(fallback.sustain),
        }
    }

    /// Output gain, clamped to 0..1.
    pub fn volume(&self) -> f32 {
        let volume = self.playback.volume.unwrap_or(0.6);
        if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.6
        }
    }

    pub fn muted(&self) -> bool {
        self.playback.muted.unwrap_or(false)
    }
}

/// `<config dir>/chordmaster`, home of the user config, key bindings and log.
pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chordmaster"))
}

fn user_config_path() -> Option<PathBuf> {
    app_config_dir().map(|d| d.join("config.toml"))
}

fn secs(value: f32, min: f32, max: f32) -> Option<Duration> {
    value
        .is_finite()
        .then(|| Duration::from_millis((value.clamp(min, max) * 1000.0).round() as u64))
}

fn merge_card(base: &mut CardConfig, user: CardConfig) {
    if user.advance.is_some() {
        base.advance = user.advance;
    }
    if user.keyboard.is_some() {
        base.keyboard = user.keyboard;
    }
    if user.catalog.is_some() {
        base.catalog = user.catalog;
    }
}

fn merge_playback(base: &mut PlaybackConfig, user: PlaybackConfig) {
    if user.note_spacing_secs.is_some() {
        base.note_spacing_secs = user.note_spacing_secs;
    }
    if user.sustain_secs.is_some() {
        base.sustain_secs = user.sustain_secs;
    }
    if user.volume.is_some() {
        base.volume = user.volume;
    }
    if user.muted.is_some() {
        base.muted = user.muted;
    }
}

fn parse_advance_policy(s: &str) -> Option<AdvancePolicy> {
    match s.to_lowercase().as_str() {
        "exclude-current" | "exclude_current" | "no-repeat" => Some(AdvancePolicy::ExcludeCurrent),
        "uniform" | "random" => Some(AdvancePolicy::Uniform),
        _ => None,
    }
}

fn parse_keyboard_mode(s: &str) -> Option<KeyboardMode> {
    match s.to_lowercase().as_str() {
        "single-octave" | "single_octave" | "octave" => Some(KeyboardMode::SingleOctave),
        "wide" => Some(KeyboardMode::Wide),
        _ => None,
    }
}
