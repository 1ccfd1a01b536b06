//! Theme preference
//!
//! Only the name lives here; colours belong to the host.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeName {
    #[default]
    Blue,
    Orange,
    Pink,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Blue, ThemeName::Orange, ThemeName::Pink];

    pub fn name(self) -> &'static str {
        match self {
            ThemeName::Blue => "Blue",
            ThemeName::Orange => "Orange",
            ThemeName::Pink => "Pink",
        }
    }

    /// Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Orange" => ThemeName::Orange,
            "Pink" => ThemeName::Pink,
            _ => ThemeName::Blue,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
