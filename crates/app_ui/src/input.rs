//! Input handling and keybinding resolution

use app_core::Command;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Input handler that maps key chords to commands
pub struct InputHandler {
    /// Key bindings: key string -> command ID
    bindings: HashMap<String, String>,

    /// Current modifier state
    modifiers: ModifiersState,
}

impl InputHandler {
    /// Create a new input handler with bindings
    pub fn new(bindings: &HashMap<String, Vec<String>>) -> Self {
        // Invert the bindings map: command -> keys becomes key -> command
        let mut key_to_command = HashMap::new();

        for (command, keys) in bindings {
            for key in keys {
                key_to_command.insert(key.to_lowercase(), command.clone());
            }
        }

        Self {
            bindings: key_to_command,
            modifiers: ModifiersState::empty(),
        }
    }

    /// Update modifier state
    pub fn update_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Handle a key event and return the corresponding command
    pub fn handle_key(&self, event: &KeyEvent) -> Option<Command> {
        if event.state != ElementState::Pressed {
            return None;
        }

        let key_str = key_to_string(&event.logical_key);
        if key_str.is_empty() {
            return None;
        }
        let full_key = self.build_key_string(&key_str);

        tracing::debug!("Key pressed: {}", full_key);

        self.bindings
            .get(&full_key.to_lowercase())
            .map(|cmd_id| Command::new(cmd_id))
    }

    /// Build a key string with modifiers
    fn build_key_string(&self, key: &str) -> String {
        let mut parts = Vec::new();

        if self.modifiers.control_key() {
            parts.push("Ctrl");
        }
        if self.modifiers.alt_key() {
            parts.push("Alt");
        }
        if self.modifiers.shift_key() {
            parts.push("Shift");
        }
        if self.modifiers.super_key() {
            parts.push("Super");
        }

        parts.push(key);
        parts.join("+")
    }
}

/// Convert a logical key to a binding string. Named keys not listed here
/// fall back to their debug name, which already matches chords like "F11".
fn key_to_string(key: &Key) -> String {
    match key {
        Key::Named(named) => match named {
            NamedKey::Space => "Space".to_string(),
            NamedKey::Enter => "Return".to_string(),
            NamedKey::Tab => "Tab".to_string(),
            NamedKey::Escape => "Escape".to_string(),
            NamedKey::Backspace => "Backspace".to_string(),
            NamedKey::Delete => "Delete".to_string(),
            NamedKey::Home => "Home".to_string(),
            NamedKey::End => "End".to_string(),
            NamedKey::PageUp => "PageUp".to_string(),
            NamedKey::PageDown => "PageDown".to_string(),
            NamedKey::ArrowUp => "Up".to_string(),
            NamedKey::ArrowDown => "Down".to_string(),
            NamedKey::ArrowLeft => "Left".to_string(),
            NamedKey::ArrowRight => "Right".to_string(),
            _ => format!("{:?}", named),
        },
        Key::Character(c) => c.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::CommandId;

    fn bindings() -> HashMap<String, Vec<String>> {
        let mut kb = HashMap::new();
        kb.insert(
            CommandId::GALLERY_CLOSE.to_string(),
            vec!["Escape".to_string()],
        );
        kb.insert(
            CommandId::VIEW_TOGGLE_FULLSCREEN.to_string(),
            vec!["F11".to_string(), "f".to_string()],
        );
        kb.insert(CommandId::APP_QUIT.to_string(), vec!["Ctrl+q".to_string()]);
        kb
    }

    #[test]
    fn test_bindings_inverted_case_insensitive() {
        let handler = InputHandler::new(&bindings());
        assert_eq!(
            handler.bindings.get("escape").map(String::as_str),
            Some(CommandId::GALLERY_CLOSE)
        );
        assert_eq!(
            handler.bindings.get("f11").map(String::as_str),
            Some(CommandId::VIEW_TOGGLE_FULLSCREEN)
        );
        assert_eq!(
            handler.bindings.get("ctrl+q").map(String::as_str),
            Some(CommandId::APP_QUIT)
        );
    }

    #[test]
    fn test_chord_string_includes_modifiers() {
        let mut handler = InputHandler::new(&bindings());
        handler.update_modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert_eq!(handler.build_key_string("q"), "Ctrl+Shift+q");
        handler.update_modifiers(ModifiersState::empty());
        assert_eq!(handler.build_key_string("Escape"), "Escape");
    }

    #[test]
    fn test_named_key_strings() {
        assert_eq!(key_to_string(&Key::Named(NamedKey::Escape)), "Escape");
        assert_eq!(key_to_string(&Key::Named(NamedKey::F11)), "F11");
        assert_eq!(key_to_string(&Key::Character("f".into())), "f");
    }
}
