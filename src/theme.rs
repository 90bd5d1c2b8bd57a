pub const THEME_KEY: &str = "ks-theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Stored value wins, then the OS light signal, then dark.
///
/// An unrecognised stored value counts as no stored value.
pub fn resolve_theme(stored: Option<&str>, system_prefers_light: bool) -> Theme {
    stored.and_then(Theme::from_str).unwrap_or(if system_prefers_light {
        Theme::Light
    } else {
        Theme::Dark
    })
}
