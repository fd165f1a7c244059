//! Fixed classification axes for equipment: location, category and state.
//!
//! Each enum travels as a snake_case slug (JSON bodies, query strings, the
//! `equipment` table) and carries a human label used by exports and charts.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Slug/label pair, as listed by the options endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnumOption {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! text_enum {
    ($name:ident { $($variant:ident => ($slug:literal, $label:literal)),+ $(,)? }) => {
        impl $name {
            /// Every member, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn options() -> Vec<EnumOption> {
                Self::ALL
                    .iter()
                    .map(|v| EnumOption { value: v.as_str(), label: v.label() })
                    .collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            /// Accepts the slug or the label, ignoring case
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle || v.label().to_lowercase() == needle)
                    .ok_or_else(|| format!("Invalid {}: {}", stringify!($name), s))
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Room or area where equipment is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    ZiteCece,
    ZiteGym,
    Informatica,
    Auditorio,
    TecEdu,
    /// Checked out, not in any room
    EnUso,
}

text_enum!(Location {
    ZiteCece => ("zite_cece", "ZITE CECE"),
    ZiteGym => ("zite_gym", "ZITE GYM"),
    Informatica => ("informatica", "Informática"),
    Auditorio => ("auditorio", "Auditorio"),
    TecEdu => ("tec_edu", "TEC EDU"),
    EnUso => ("en_uso", "En Uso"),
});

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Equipment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AudioInterfaces,
    AudioConsoles,
    VideoCapture,
    Speakers,
    Laptops,
    Tripods,
    Microphones,
    Cameras,
    Drones,
    Hubs,
    AudioCables,
    VideoCables,
    AdaptersExtenders,
    PowerExtensions,
    SwitchersSplitters,
}

text_enum!(Category {
    AudioInterfaces => ("audio_interfaces", "Audio Interfaces"),
    AudioConsoles => ("audio_consoles", "Audio Consoles"),
    VideoCapture => ("video_capture", "Video Capture"),
    Speakers => ("speakers", "Speakers"),
    Laptops => ("laptops", "Laptops"),
    Tripods => ("tripods", "Tripods"),
    Microphones => ("microphones", "Microphones"),
    Cameras => ("cameras", "Cameras"),
    Drones => ("drones", "Drones"),
    Hubs => ("hubs", "Hubs"),
    AudioCables => ("audio_cables", "Audio Cables"),
    VideoCables => ("video_cables", "Video Cables"),
    AdaptersExtenders => ("adapters_extenders", "Adapters & Extenders"),
    PowerExtensions => ("power_extensions", "Power Extensions"),
    SwitchersSplitters => ("switchers_splitters", "Switchers & Splitters"),
});

// ---------------------------------------------------------------------------
// EquipmentState
// ---------------------------------------------------------------------------

/// Operational state of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentState {
    Available,
    InUse,
    Damaged,
    InRepair,
}

text_enum!(EquipmentState {
    Available => ("available", "Available"),
    InUse => ("in_use", "In Use"),
    Damaged => ("damaged", "Damaged"),
    InRepair => ("in_repair", "In Repair"),
});

impl Default for EquipmentState {
    fn default() -> Self {
        EquipmentState::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slug_and_label_ignoring_case() {
        assert_eq!("zite_gym".parse::<Location>().unwrap(), Location::ZiteGym);
        assert_eq!("informática".parse::<Location>().unwrap(), Location::Informatica);
        assert_eq!("In Repair".parse::<EquipmentState>().unwrap(), EquipmentState::InRepair);
        assert_eq!(" LAPTOPS ".parse::<Category>().unwrap(), Category::Laptops);
        assert!("garage".parse::<Location>().is_err());
    }

    #[test]
    fn serde_slug_matches_as_str() {
        for location in Location::ALL {
            let json = serde_json::to_string(location).unwrap();
            assert_eq!(json, format!("\"{}\"", location.as_str()));
        }
        for category in Category::ALL {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        for state in EquipmentState::ALL {
            let json = serde_json::to_string(state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
    }

    #[test]
    fn fixed_lists_have_expected_sizes() {
        assert_eq!(Location::ALL.len(), 6);
        assert_eq!(Category::ALL.len(), 15);
        assert_eq!(EquipmentState::ALL.len(), 4);
        assert_eq!(EquipmentState::options()[1].label, "In Use");
    }
}
