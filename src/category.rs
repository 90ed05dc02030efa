use crate::types::Color;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The seven chakras. Variant order is the canonical display order, so
/// `Ord` and [`Category::ALL`] agree everywhere a list is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Root,
    Sacral,
    SolarPlexus,
    Heart,
    Throat,
    ThirdEye,
    Crown,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Root,
        Category::Sacral,
        Category::SolarPlexus,
        Category::Heart,
        Category::Throat,
        Category::ThirdEye,
        Category::Crown,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn id(self) -> &'static str {
        match self {
            Category::Root => "root",
            Category::Sacral => "sacral",
            Category::SolarPlexus => "solar_plexus",
            Category::Heart => "heart",
            Category::Throat => "throat",
            Category::ThirdEye => "third_eye",
            Category::Crown => "crown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Root => "Root Chakra",
            Category::Sacral => "Sacral Chakra",
            Category::SolarPlexus => "Solar Plexus Chakra",
            Category::Heart => "Heart Chakra",
            Category::Throat => "Throat Chakra",
            Category::ThirdEye => "Third Eye Chakra",
            Category::Crown => "Crown Chakra",
        }
    }

    /// Fill used for the bar, the coach-summary header and the guidance header.
    pub fn color(self) -> Color {
        match self {
            Category::Root => Color::rgb8(220, 38, 38),
            Category::Sacral => Color::rgb8(249, 115, 22),
            Category::SolarPlexus => Color::rgb8(234, 179, 8),
            Category::Heart => Color::rgb8(22, 163, 74),
            Category::Throat => Color::rgb8(37, 99, 235),
            Category::ThirdEye => Color::rgb8(79, 70, 229),
            Category::Crown => Color::rgb8(147, 51, 234),
        }
    }

    /// Accepts ids (`solar_plexus`) and display labels (`Solar Plexus Chakra`),
    /// ignoring case and punctuation.
    pub fn from_id(raw: &str) -> Option<Self> {
        let norm: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();
        let norm = norm.strip_suffix("chakra").unwrap_or(&norm);
        Category::ALL.into_iter().find(|category| {
            category
                .id()
                .chars()
                .filter(|ch| *ch != '_')
                .eq(norm.chars())
        })
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Category::from_id(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown chakra '{raw}'")))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ord_matches_canonical_order() {
        let mut shuffled = vec![
            Category::Crown,
            Category::Heart,
            Category::Root,
            Category::ThirdEye,
            Category::Sacral,
            Category::Throat,
            Category::SolarPlexus,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Category::ALL.to_vec());
    }

    #[test]
    fn ids_parse_back() {
        for category in Category::ALL {
            assert_eq!(Category::from_id(category.id()), Some(category));
            assert_eq!(Category::from_id(category.label()), Some(category));
        }
        assert_eq!(Category::from_id("Third-Eye"), Some(Category::ThirdEye));
        assert_eq!(Category::from_id("spleen"), None);
    }

    #[test]
    fn colors_are_distinct() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn serde_keys_are_snake_case() {
        let json = serde_json::to_string(&Category::SolarPlexus).unwrap();
        assert_eq!(json, "\"solar_plexus\"");
    }

    #[test]
    fn map_keys_accept_display_labels() {
        let parsed: std::collections::BTreeMap<Category, u8> =
            serde_json::from_str(r#"{"Root Chakra": 1, "third_eye": 2, "Solar Plexus": 3}"#)
                .unwrap();
        assert_eq!(parsed[&Category::Root], 1);
        assert_eq!(parsed[&Category::ThirdEye], 2);
        assert_eq!(parsed[&Category::SolarPlexus], 3);

        let err = serde_json::from_str::<Category>("\"spleen\"").unwrap_err();
        assert!(err.to_string().contains("unknown chakra"));
    }
}
