use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{InputEvent, KeyCode};

/// What a key press asks the flashcard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    /// Reveal a hidden card, or move on from a revealed one.
    Flip,
    Replay,
    Next,
    Quit,
}

impl CardAction {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "flip" => Some(CardAction::Flip),
            "replay" => Some(CardAction::Replay),
            "next" => Some(CardAction::Next),
            "quit" => Some(CardAction::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    Char(char),
    Key(KeyCode),
    Ctrl(char),
}

impl KeyPattern {
    fn matches(&self, event: &InputEvent) -> bool {
        match *self {
            KeyPattern::Char(c) => {
                event.key == KeyCode::Char(c) && !event.modifiers.ctrl && !event.modifiers.alt
            }
            KeyPattern::Key(code) => event.key == code && !event.modifiers.ctrl,
            KeyPattern::Ctrl(c) => event.key == KeyCode::Char(c) && event.modifiers.ctrl,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub pattern: KeyPattern,
    pub label: String,
    pub action: CardAction,
    pub description: String,
}

/// Ordered key bindings; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn lookup(&self, event: &InputEvent) -> Option<CardAction> {
        self.bindings
            .iter()
            .find(|b| b.pattern.matches(event))
            .map(|b| b.action)
    }

    /// One (keys, description) entry per action, in first-binding order.
    /// Used for the footer hint line.
    pub fn hints(&self) -> Vec<(String, String)> {
        let mut hints: Vec<(CardAction, String, String)> = Vec::new();
        for b in &self.bindings {
            match hints.iter_mut().find(|(a, _, _)| *a == b.action) {
                Some((_, keys, _)) => {
                    keys.push('/');
                    keys.push_str(&b.label);
                }
                None => hints.push((b.action, b.label.clone(), b.description.clone())),
            }
        }
        hints.into_iter().map(|(_, k, d)| (k, d)).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[derive(Deserialize)]
struct KeybindingConfig {
    #[serde(default)]
    bindings: Vec<RawBinding>,
}

#[derive(Deserialize)]
struct RawBinding {
    key: String,
    action: String,
    #[serde(default)]
    description: String,
}

/// Parse a key notation string into a KeyPattern.
///
/// - `"q"` → Char('q')
/// - `"Space"` → Char(' ')
/// - `"Enter"` → Key(KeyCode::Enter)
/// - `"Ctrl+c"` → Ctrl('c')
/// - `"F1"` → Key(KeyCode::F(1))
fn parse_key(s: &str) -> Option<KeyPattern> {
    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeyPattern::Ctrl(c.to_ascii_lowercase())),
            _ => None,
        }
    } else if s == "Space" {
        Some(KeyPattern::Char(' '))
    } else if s.chars().count() == 1 {
        s.chars().next().map(KeyPattern::Char)
    } else {
        parse_named_key(s).map(KeyPattern::Key)
    }
}

fn parse_named_key(s: &str) -> Option<KeyCode> {
    match s {
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Escape),
        "Backspace" => Some(KeyCode::Backspace),
        "Tab" => Some(KeyCode::Tab),
        _ if s.starts_with('F') => s[1..].parse::<u8>().ok().map(KeyCode::F),
        _ => None,
    }
}

fn label_for(key: &str) -> String {
    match key {
        "Escape" | "Esc" => "Esc".to_string(),
        "Right" => "→".to_string(),
        other => other.to_string(),
    }
}

const DEFAULT_KEYBINDINGS: &str = include_str!("../../keybindings.toml");

/// Embedded bindings, merged with the user file in the config dir if present.
pub fn load_keybindings() -> Keymap {
    load_keybindings_from(user_keybindings_path().as_deref())
}

pub fn load_keybindings_from(user: Option<&Path>) -> Keymap {
    let mut config: KeybindingConfig =
        toml::from_str(DEFAULT_KEYBINDINGS).expect("Failed to parse embedded keybindings.toml");

    if let Some(path) = user {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<KeybindingConfig>(&contents) {
                    Ok(user_config) => merge_config(&mut config, user_config),
                    Err(e) => {
                        log::warn!(target: "ui::keybindings", "ignoring malformed keybindings {}: {}", path.display(), e)
                    }
                },
                Err(e) => {
                    log::warn!(target: "ui::keybindings", "could not read keybindings {}: {}", path.display(), e)
                }
            }
        }
    }

    let keymap = Keymap {
        bindings: build_bindings(&config.bindings),
    };
    log::debug!(target: "ui::keybindings", "{} key bindings loaded", keymap.len());
    keymap
}

fn user_keybindings_path() -> Option<PathBuf> {
    chordmaster_core::app_config_dir().map(|d| d.join("keybindings.toml"))
}

/// User bindings replace every default binding of the actions they name.
fn merge_config(base: &mut KeybindingConfig, user: KeybindingConfig) {
    let overridden: Vec<&str> = user.bindings.iter().map(|b| b.action.as_str()).collect();
    base.bindings
        .retain(|b| !overridden.contains(&b.action.as_str()));
    base.bindings.extend(user.bindings);
}

fn build_bindings(raw: &[RawBinding]) -> Vec<KeyBinding> {
    raw.iter()
        .filter_map(|b| {
            let Some(pattern) = parse_key(&b.key) else {
                log::warn!(target: "ui::keybindings", "ignoring unknown key '{}' in keybindings", b.key);
                return None;
            };
            let Some(action) = CardAction::parse(&b.action) else {
                log::warn!(target: "ui::keybindings", "ignoring unknown action '{}'", b.action);
                return None;
            };
            Some(KeyBinding {
                pattern,
                label: label_for(&b.key),
                action,
                description: b.description.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Modifiers;

    fn press(key: KeyCode) -> InputEvent {
        InputEvent::key(key)
    }

    #[test]
    fn test_parse_key_char() {
        assert_eq!(parse_key("q"), Some(KeyPattern::Char('q')));
        assert_eq!(parse_key("Space"), Some(KeyPattern::Char(' ')));
    }

    #[test]
    fn test_parse_key_named() {
        assert_eq!(parse_key("Enter"), Some(KeyPattern::Key(KeyCode::Enter)));
        assert_eq!(parse_key("Esc"), Some(KeyPattern::Key(KeyCode::Escape)));
        assert_eq!(parse_key("F5"), Some(KeyPattern::Key(KeyCode::F(5))));
    }

    #[test]
    fn test_parse_key_ctrl() {
        assert_eq!(parse_key("Ctrl+c"), Some(KeyPattern::Ctrl('c')));
        assert_eq!(parse_key("Ctrl+Left"), None);
    }

    #[test]
    fn test_parse_key_unknown() {
        assert_eq!(parse_key("Bogus"), None);
        assert_eq!(parse_key("Fx"), None);
    }

    #[test]
    fn test_default_bindings() {
        let keymap = load_keybindings_from(None);
        assert_eq!(keymap.lookup(&press(KeyCode::Enter)), Some(CardAction::Flip));
        assert_eq!(keymap.lookup(&press(KeyCode::Char(' '))), Some(CardAction::Flip));
        assert_eq!(keymap.lookup(&press(KeyCode::Char('r'))), Some(CardAction::Replay));
        assert_eq!(keymap.lookup(&press(KeyCode::Char('n'))), Some(CardAction::Next));
        assert_eq!(keymap.lookup(&press(KeyCode::Char('q'))), Some(CardAction::Quit));
        assert_eq!(keymap.lookup(&press(KeyCode::Escape)), Some(CardAction::Quit));
        assert_eq!(
            keymap.lookup(&InputEvent::new(KeyCode::Char('c'), Modifiers::ctrl())),
            Some(CardAction::Quit)
        );
        assert_eq!(keymap.lookup(&press(KeyCode::Char('c'))), None);
        assert_eq!(keymap.lookup(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_does_not_trigger_plain_char_binding() {
        let keymap = load_keybindings_from(None);
        let ctrl_r = InputEvent::new(KeyCode::Char('r'), Modifiers::ctrl());
        assert_eq!(keymap.lookup(&ctrl_r), None);
    }

    #[test]
    fn test_user_file_replaces_bindings_per_action() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybindings.toml");
        std::fs::write(
            &path,
            "[[bindings]]\nkey = \"p\"\naction = \"replay\"\ndescription = \"play again\"\n",
        )
        .unwrap();
        let keymap = load_keybindings_from(Some(&path));
        assert_eq!(keymap.lookup(&press(KeyCode::Char('p'))), Some(CardAction::Replay));
        assert_eq!(keymap.lookup(&press(KeyCode::Char('r'))), None);
        assert_eq!(keymap.lookup(&press(KeyCode::Enter)), Some(CardAction::Flip));
    }

    #[test]
    fn test_bad_user_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybindings.toml");
        std::fs::write(
            &path,
            "[[bindings]]\nkey = \"Hyper+z\"\naction = \"next\"\n\n[[bindings]]\nkey = \"z\"\naction = \"explode\"\n",
        )
        .unwrap();
        let keymap = load_keybindings_from(Some(&path));
        // "next" was overridden by an unparsable key, so nothing maps to it.
        assert_eq!(keymap.lookup(&press(KeyCode::Char('n'))), None);
        assert_eq!(keymap.lookup(&press(KeyCode::Char('z'))), None);
        assert_eq!(keymap.lookup(&press(KeyCode::Enter)), Some(CardAction::Flip));
    }

    #[test]
    fn test_malformed_user_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybindings.toml");
        std::fs::write(&path, "[[bindings]\nkey =").unwrap();
        let keymap = load_keybindings_from(Some(&path));
        assert_eq!(keymap.len(), load_keybindings_from(None).len());
    }

    #[test]
    fn test_hints_group_keys_by_action() {
        let keymap = load_keybindings_from(None);
        let hints = keymap.hints();
        assert_eq!(hints[0], ("Enter/Space".to_string(), "reveal / next".to_string()));
        assert_eq!(hints[3].0, "q/Esc/Ctrl+c");
        assert_eq!(hints.len(), 4);
    }
}
