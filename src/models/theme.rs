// Light/dark theme flag and the chrome palette derived from it

use crate::error::UnknownTheme;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn palette(self) -> ThemePalette {
        ThemePalette::for_theme(self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

/// Grid and text colors for chart chrome. Never stored; recomputed from the theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub grid_color: &'static str,
    pub text_color: &'static str,
}

impl ThemePalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            // Barely visible grid on dark backgrounds
            Theme::Dark => ThemePalette {
                grid_color: "rgba(156, 163, 175, 0.15)",
                text_color: "#9ca3af",
            },
            Theme::Light => ThemePalette {
                grid_color: "#f3f4f6",
                text_color: "#6b7280",
            },
        }
    }
}
