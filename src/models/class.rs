//! The fixed game class taxonomy.
//!
//! Every archetype belongs to exactly one of eight classes. The set is
//! closed: display names and icon identifiers are exhaustive `match`
//! tables, so adding a class is a compile error until every table is
//! updated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight fixed game classes.
///
/// The `blood` and `shadow` classes were retired by the publisher and
/// merged into `abyss`; stored data may still carry the old spellings,
/// which deserialize onto [`GameClass::Abyss`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameClass {
    Forest,
    Sword,
    Rune,
    Dragon,
    #[serde(alias = "blood", alias = "shadow")]
    Abyss,
    Haven,
    Portal,
    /// Classless reference data, e.g. the reserved unknown archetype.
    Neutral,
}

impl GameClass {
    /// All classes in taxonomy order.
    pub const ALL: [GameClass; 8] = [
        GameClass::Forest,
        GameClass::Sword,
        GameClass::Rune,
        GameClass::Dragon,
        GameClass::Abyss,
        GameClass::Haven,
        GameClass::Portal,
        GameClass::Neutral,
    ];

    /// Stable storage key for this class.
    pub fn key(&self) -> &'static str {
        match self {
            GameClass::Forest => "forest",
            GameClass::Sword => "sword",
            GameClass::Rune => "rune",
            GameClass::Dragon => "dragon",
            GameClass::Abyss => "abyss",
            GameClass::Haven => "haven",
            GameClass::Portal => "portal",
            GameClass::Neutral => "neutral",
        }
    }

    /// Localized display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            GameClass::Forest => "Forest",
            GameClass::Sword => "Sword",
            GameClass::Rune => "Rune",
            GameClass::Dragon => "Dragon",
            GameClass::Abyss => "Abyss",
            GameClass::Haven => "Haven",
            GameClass::Portal => "Portal",
            GameClass::Neutral => "Neutral",
        }
    }

    /// Icon identifier for the presentation layer.
    pub fn icon(&self) -> &'static str {
        match self {
            GameClass::Forest => "class-forest",
            GameClass::Sword => "class-sword",
            GameClass::Rune => "class-rune",
            GameClass::Dragon => "class-dragon",
            GameClass::Abyss => "class-abyss",
            GameClass::Haven => "class-haven",
            GameClass::Portal => "class-portal",
            GameClass::Neutral => "class-neutral",
        }
    }
}

impl fmt::Display for GameClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for GameClass {
    type Err = String;

    /// Parse a stored class value. Accepts the retired `blood` and
    /// `shadow` spellings, mapping both onto [`GameClass::Abyss`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forest" => Ok(GameClass::Forest),
            "sword" => Ok(GameClass::Sword),
            "rune" => Ok(GameClass::Rune),
            "dragon" => Ok(GameClass::Dragon),
            "abyss" | "blood" | "shadow" => Ok(GameClass::Abyss),
            "haven" => Ok(GameClass::Haven),
            "portal" => Ok(GameClass::Portal),
            "neutral" => Ok(GameClass::Neutral),
            other => Err(format!("unknown class: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_key_round_trips() {
        for class in GameClass::ALL {
            assert_eq!(class.key().parse::<GameClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_class_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&GameClass::Abyss).unwrap();
        assert_eq!(json, "\"abyss\"");
        let parsed: GameClass = serde_json::from_str("\"portal\"").unwrap();
        assert_eq!(parsed, GameClass::Portal);
    }

    #[test]
    fn test_retired_classes_deserialize_to_abyss() {
        let blood: GameClass = serde_json::from_str("\"blood\"").unwrap();
        let shadow: GameClass = serde_json::from_str("\"shadow\"").unwrap();
        assert_eq!(blood, GameClass::Abyss);
        assert_eq!(shadow, GameClass::Abyss);
    }

    #[test]
    fn test_retired_classes_parse_to_abyss() {
        assert_eq!("blood".parse::<GameClass>().unwrap(), GameClass::Abyss);
        assert_eq!("Shadow".parse::<GameClass>().unwrap(), GameClass::Abyss);
    }

    #[test]
    fn test_unknown_class_rejected() {
        assert!("pirate".parse::<GameClass>().is_err());
        assert!(serde_json::from_str::<GameClass>("\"pirate\"").is_err());
    }

    #[test]
    fn test_display_matches_display_name() {
        assert_eq!(format!("{}", GameClass::Forest), "Forest");
        assert_eq!(format!("{}", GameClass::Neutral), "Neutral");
    }

    #[test]
    fn test_icon_identifiers() {
        assert_eq!(GameClass::Sword.icon(), "class-sword");
        assert_eq!(GameClass::Abyss.icon(), "class-abyss");
    }
}
