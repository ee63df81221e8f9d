use serde::{Deserialize, Serialize};

/// Release regions as reported in the exported catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    /// Japan
    #[serde(rename = "NTSC-J")]
    NtscJ,
    /// North America
    #[serde(rename = "NTSC-U")]
    NtscU,
    /// Europe / Australia (PAL)
    #[serde(rename = "PAL")]
    Pal,
    /// Germany
    #[serde(rename = "GER")]
    Germany,
    /// France
    #[serde(rename = "FRA")]
    France,
    /// Italy
    #[serde(rename = "ITA")]
    Italy,
    /// Spain
    #[serde(rename = "ESP")]
    Spain,
    /// Korea
    #[serde(rename = "KOR")]
    Korea,
    /// Region-free or unknown
    #[default]
    #[serde(rename = "ANY")]
    Any,
}

impl Region {
    /// Returns the label written to the catalog.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NtscJ => "NTSC-J",
            Self::NtscU => "NTSC-U",
            Self::Pal => "PAL",
            Self::Germany => "GER",
            Self::France => "FRA",
            Self::Italy => "ITA",
            Self::Spain => "ESP",
            Self::Korea => "KOR",
            Self::Any => "ANY",
        }
    }

    /// Map the region character of a game code (its 4th character).
    pub fn from_code_char(c: char) -> Self {
        match c.to_ascii_uppercase() {
            'J' => Self::NtscJ,
            'E' => Self::NtscU,
            'P' | 'X' => Self::Pal,
            'D' => Self::Germany,
            'F' => Self::France,
            'I' => Self::Italy,
            'S' => Self::Spain,
            'K' => Self::Korea,
            _ => Self::Any,
        }
    }

    /// Derive the region from a 4-character game code.
    ///
    /// Codes shorter than 4 characters have no region character.
    pub fn from_game_code(code: &str) -> Self {
        code.chars()
            .nth(3)
            .map(Self::from_code_char)
            .unwrap_or(Self::Any)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
