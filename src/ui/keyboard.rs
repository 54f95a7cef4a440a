//! Keyboard shortcuts.

use eframe::egui::{self, Event, Key};

use crate::app::LabelingApp;
use crate::keybindings::{KeyAction, KeyBindings};
use crate::message::Message;
use crate::ui::Dialog;

impl LabelingApp {
    /// Turn this frame's key presses into messages.
    pub(crate) fn collect_key_messages(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let pressed: Vec<Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } if !modifiers.ctrl && !modifiers.alt && !modifiers.command => Some(*key),
                    _ => None,
                })
                .collect()
        });

        for key in pressed {
            let message = match &self.dialog {
                Some(dialog) => dialog_key_message(dialog, key),
                None if self.entry_has_focus || self.entry_submitted => None,
                None => key_message(&self.keybindings, key),
            };
            if let Some(message) = message {
                messages.push(message);
            }
        }
    }
}

/// Message for a key press while a dialog is open.
fn dialog_key_message(dialog: &Dialog, key: Key) -> Option<Message> {
    match key {
        Key::Enter => Some(dialog.accept_message()),
        Key::Escape => Some(Message::DismissDialog),
        _ => None,
    }
}

/// Message for a key press on the main screen.
fn key_message(bindings: &KeyBindings, key: Key) -> Option<Message> {
    if let Some(action) = bindings.action_for_key(key) {
        return Some(match action {
            KeyAction::PrevImage => Message::PrevImage,
            KeyAction::NextImage => Message::NextImage,
            KeyAction::SaveAndNext => Message::SaveAndNext,
        });
    }
    bindings.label_index_for_key(key).map(Message::LabelHotkey)
}
