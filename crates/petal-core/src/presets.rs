//! # Presets
//!
//! Designer presets shipped with the studio and collections saved by users.
//!
//! A preset replaces the canvas wholesale. Loading one goes through the
//! builder so that it lands on the undo history like any other edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::types::{Composition, Placement, WrapStyle};

// =============================================================================
// Designer Presets
// =============================================================================

/// A curated starting arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DesignerPreset {
    pub name: String,
    pub composition: Composition,
}

/// Names of the designer presets, in display order.
pub const DESIGNER_PRESET_NAMES: [&str; 3] = ["Romantic", "Modern Minimalist", "Wild Garden"];

/// All designer presets, in display order.
pub fn designer_presets() -> Vec<DesignerPreset> {
    DESIGNER_PRESET_NAMES
        .iter()
        .filter_map(|name| designer_preset(name))
        .collect()
}

/// Looks up a designer preset by name (case-insensitive).
pub fn designer_preset(name: &str) -> Option<DesignerPreset> {
    let (name, placements, wrap, ribbon) = match name.trim().to_lowercase().as_str() {
        "romantic" => (
            "Romantic",
            vec![
                Placement::new("f1").with_quantity(3).rotated(15.0).scaled(1.1).at(50.0, 40.0),
                Placement::new("f2").with_quantity(2).rotated(5.0).at(60.0, 50.0),
            ],
            WrapStyle::Silk,
            "#f472b6",
        ),
        "modern minimalist" => (
            "Modern Minimalist",
            vec![
                Placement::new("f7").scaled(1.2).at(50.0, 45.0),
                Placement::new("f5").with_quantity(2).rotated(-10.0).scaled(0.9).at(40.0, 55.0),
            ],
            WrapStyle::Paper,
            "#a8a29e",
        ),
        "wild garden" => (
            "Wild Garden",
            vec![
                Placement::new("f3").with_quantity(2).rotated(10.0).at(50.0, 40.0),
                Placement::new("f14").with_quantity(3).rotated(-5.0).scaled(0.8).at(55.0, 50.0),
                Placement::new("f16").with_quantity(2).rotated(15.0).scaled(0.9).at(45.0, 55.0),
            ],
            WrapStyle::Jute,
            "#86efac",
        ),
        _ => return None,
    };

    Some(DesignerPreset {
        name: name.to_string(),
        composition: Composition {
            placements,
            wrap,
            ribbon_color: ribbon.to_string(),
        },
    })
}

// =============================================================================
// User Presets
// =============================================================================

/// A composition a user saved to their collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserPreset {
    pub id: String,
    pub name: String,
    pub composition: Composition,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl UserPreset {
    /// Creates a preset with a fresh id. The name is trimmed.
    pub fn new(name: &str, composition: Composition, created_at: DateTime<Utc>) -> Self {
        UserPreset {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            composition,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_designer_presets_reference_catalog_stems() {
        let catalog = Catalog::standard().unwrap();
        let presets = designer_presets();
        assert_eq!(presets.len(), 3);

        for preset in &presets {
            for placement in &preset.composition.placements {
                assert!(
                    catalog.get(&placement.flower_id).is_some(),
                    "{} references missing {}",
                    preset.name,
                    placement.flower_id
                );
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let preset = designer_preset("wild GARDEN").unwrap();
        assert_eq!(preset.name, "Wild Garden");
        assert_eq!(preset.composition.wrap, WrapStyle::Jute);
        assert_eq!(preset.composition.stem_count(), 7);
        assert!(designer_preset("Baroque").is_none());
    }

    #[test]
    fn test_user_preset_trims_name() {
        let preset = UserPreset::new("  June Wedding ", Composition::new(), Utc::now());
        assert_eq!(preset.name, "June Wedding");
        assert!(Uuid::parse_str(&preset.id).is_ok());
    }
}
