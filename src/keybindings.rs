//! Customizable keybindings for imlabel.
//!
//! Navigation keys plus one hotkey per taxonomy position. The default label
//! hotkeys follow the keyboard: `1`-`9`, then the top letter row `q`-`p`.

use eframe::egui::Key;

/// Maximum number of labels that can have hotkeys.
pub const MAX_LABEL_HOTKEYS: usize = 19;

/// Non-label actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Show the previous image
    PrevImage,
    /// Show the next image
    NextImage,
    /// Save the selected label and advance
    SaveAndNext,
}

impl KeyAction {
    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::PrevImage => "Previous image",
            KeyAction::NextImage => "Next image",
            KeyAction::SaveAndNext => "Save & Next",
        }
    }

    /// All actions in display order.
    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::PrevImage,
            KeyAction::NextImage,
            KeyAction::SaveAndNext,
        ]
    }
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Hotkey for the previous image
    pub prev_image: Key,
    /// Hotkey for the next image
    pub next_image: Key,
    /// Hotkey for save & next
    pub save_and_next: Key,

    /// Hotkeys for label selection by taxonomy position.
    /// None means no hotkey assigned for that slot
    pub label_hotkeys: [Option<Key>; MAX_LABEL_HOTKEYS],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            prev_image: Key::ArrowLeft,
            next_image: Key::ArrowRight,
            save_and_next: Key::Enter,
            label_hotkeys: default_label_hotkeys(),
        }
    }
}

/// Default label hotkeys: `1`..`9` then `q w e r t y u i o p`.
pub fn default_label_hotkeys() -> [Option<Key>; MAX_LABEL_HOTKEYS] {
    [
        Some(Key::Num1),
        Some(Key::Num2),
        Some(Key::Num3),
        Some(Key::Num4),
        Some(Key::Num5),
        Some(Key::Num6),
        Some(Key::Num7),
        Some(Key::Num8),
        Some(Key::Num9),
        Some(Key::Q),
        Some(Key::W),
        Some(Key::E),
        Some(Key::R),
        Some(Key::T),
        Some(Key::Y),
        Some(Key::U),
        Some(Key::I),
        Some(Key::O),
        Some(Key::P),
    ]
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<KeyAction> {
        KeyAction::all()
            .iter()
            .copied()
            .find(|action| self.key_for_action(*action) == key)
    }

    /// Get the hotkey for an action.
    pub fn key_for_action(&self, action: KeyAction) -> Key {
        match action {
            KeyAction::PrevImage => self.prev_image,
            KeyAction::NextImage => self.next_image,
            KeyAction::SaveAndNext => self.save_and_next,
        }
    }

    /// Get the taxonomy position (0-based) bound to a key, if any.
    pub fn label_index_for_key(&self, key: Key) -> Option<usize> {
        self.label_hotkeys
            .iter()
            .position(|hotkey| *hotkey == Some(key))
    }

    /// Get the hotkey for a taxonomy position, if any.
    pub fn key_for_label_index(&self, index: usize) -> Option<Key> {
        self.label_hotkeys.get(index).copied().flatten()
    }

    /// Check if a key is already used by any binding.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: Key, exclude_action: Option<KeyAction>) -> Option<String> {
        for action in KeyAction::all() {
            if exclude_action != Some(*action) && self.key_for_action(*action) == key {
                return Some(action.name().to_string());
            }
        }

        self.label_index_for_key(key)
            .map(|index| format!("Label {}", index + 1))
    }

    /// Navigation keys that are also bound elsewhere, as
    /// `(action, other use)` pairs. Navigation wins such a key press.
    pub fn conflicts(&self) -> Vec<(KeyAction, String)> {
        KeyAction::all()
            .iter()
            .filter_map(|action| {
                self.key_conflict(self.key_for_action(*action), Some(*action))
                    .map(|other| (*action, other))
            })
            .collect()
    }

    /// Button caption for a label, prefixed with its hotkey when it has one.
    pub fn label_caption(&self, index: usize, name: &str) -> String {
        match self.key_for_label_index(index) {
            Some(key) => format!("{}. {}", key_symbol(key), name),
            None => name.to_string(),
        }
    }
}

/// Short lowercase symbol for a key, as shown on label buttons.
pub fn key_symbol(key: Key) -> String {
    key.symbol_or_name().to_lowercase()
}
