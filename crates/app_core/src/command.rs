//! Command system for user actions

use serde::{Deserialize, Serialize};

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Gallery commands
    pub const GALLERY_CLOSE: &'static str = "gallery.close";

    // View commands
    pub const VIEW_TOGGLE_FULLSCREEN: &'static str = "view.toggle_fullscreen";

    // App commands
    pub const APP_QUIT: &'static str = "app.quit";
}

/// A resolved user command
#[derive(Debug, Clone)]
pub struct Command {
    pub id: CommandId,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_id_round_trip() {
        let cmd = Command::new(CommandId::GALLERY_CLOSE);
        assert_eq!(cmd.id.as_str(), "gallery.close");
    }
}
