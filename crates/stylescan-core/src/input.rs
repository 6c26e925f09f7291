//! Keyboard input and the shortcut registry.

use serde::{Deserialize, Serialize};

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A key press as reported by the page (`KeyboardEvent.key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }
}

/// Action triggered by a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanCommand {
    ToggleScan,
    /// Leave scan mode; does nothing when it is already off.
    StopScan,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub alt: bool,
    pub command: ScanCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, alt: bool, command: ScanCommand, description: &'static str) -> Self {
        Self {
            key,
            alt,
            command,
            description,
        }
    }

    /// Whether `input` triggers this shortcut. Letter keys ignore case.
    pub fn matches(&self, input: &KeyInput) -> bool {
        if self.alt && !input.modifiers.alt {
            return false;
        }
        input.key.eq_ignore_ascii_case(self.key)
    }

    /// Format the shortcut for display (e.g., "Alt+C").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.key.len() == 1 {
            parts.push(self.key.to_uppercase());
        } else {
            parts.push(self.key.to_string());
        }
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Escape", false, ScanCommand::StopScan, "Stop element scan"),
            Shortcut::new("c", true, ScanCommand::ToggleScan, "Toggle element scan"),
        ]
    }

    /// The command bound to `input`, if any.
    pub fn resolve(input: &KeyInput) -> Option<ScanCommand> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(input))
            .map(|s| s.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_stops() {
        assert_eq!(ShortcutRegistry::resolve(&KeyInput::new("Escape")), Some(ScanCommand::StopScan));
    }

    #[test]
    fn test_alt_c_toggles() {
        assert_eq!(ShortcutRegistry::resolve(&KeyInput::new("c").with_alt()), Some(ScanCommand::ToggleScan));
        assert_eq!(ShortcutRegistry::resolve(&KeyInput::new("C").with_alt()), Some(ScanCommand::ToggleScan));
    }

    #[test]
    fn test_plain_c_ignored() {
        assert_eq!(ShortcutRegistry::resolve(&KeyInput::new("c")), None);
        assert_eq!(ShortcutRegistry::resolve(&KeyInput::new("Enter")), None);
    }

    #[test]
    fn test_format() {
        let formatted: Vec<_> = ShortcutRegistry::all().iter().map(|s| s.format()).collect();
        assert_eq!(formatted, vec!["Escape", "Alt+C"]);
    }
}
