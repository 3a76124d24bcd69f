//! Visual themes for the docking widget
//!
//! The set is fixed; the persisted form is the variant name. Unknown
//! names read back from the settings store are ignored in favor of the
//! default.

use std::fmt;

/// Selectable workspace themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    VisualStudio,
    Abyss,
    Dracula,
    Replit,
    AbyssSpaced,
    LightSpaced,
}

impl Theme {
    /// Every theme, in menu order
    pub const ALL: [Theme; 8] = [
        Theme::Dark,
        Theme::Light,
        Theme::VisualStudio,
        Theme::Abyss,
        Theme::Dracula,
        Theme::Replit,
        Theme::AbyssSpaced,
        Theme::LightSpaced,
    ];

    /// Stable name used for persistence and display
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::VisualStudio => "VisualStudio",
            Theme::Abyss => "Abyss",
            Theme::Dracula => "Dracula",
            Theme::Replit => "Replit",
            Theme::AbyssSpaced => "AbyssSpaced",
            Theme::LightSpaced => "LightSpaced",
        }
    }

    /// Parse a persisted theme name
    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|theme| theme.name() == name)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
