//! # Catalog Commands
//!
//! Read-only lookups for the flower picker and design controls.

use serde::Serialize;
use tracing::debug;

use petal_core::presets::{designer_presets, DesignerPreset};
use petal_core::{Catalog, Flower, FlowerCategory, Money, WrapStyle};

use crate::error::ApiError;

/// Wrap style as listed in the design controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapOption {
    pub style: WrapStyle,
    pub name: &'static str,
    pub surcharge: Money,
}

/// Category tab of the flower picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub category: FlowerCategory,
    pub label: &'static str,
}

/// Flowers matching the picker's category tab and search box.
///
/// `None` category means all; an empty search matches every name.
pub fn list_flowers(
    catalog: &Catalog,
    category: Option<FlowerCategory>,
    search: Option<String>,
) -> Vec<Flower> {
    let search = search.unwrap_or_default();
    debug!(?category, search = %search, "list_flowers command");

    catalog.filter(category, &search).into_iter().cloned().collect()
}

pub fn get_flower(catalog: &Catalog, flower_id: &str) -> Result<Flower, ApiError> {
    debug!(flower_id, "get_flower command");
    Ok(catalog.require(flower_id)?.clone())
}

pub fn list_categories() -> Vec<CategoryOption> {
    FlowerCategory::ALL
        .iter()
        .map(|c| CategoryOption {
            category: *c,
            label: c.label(),
        })
        .collect()
}

pub fn list_wrap_styles() -> Vec<WrapOption> {
    WrapStyle::ALL
        .iter()
        .map(|w| WrapOption {
            style: *w,
            name: w.display_name(),
            surcharge: w.surcharge(),
        })
        .collect()
}

pub fn list_designer_presets() -> Vec<DesignerPreset> {
    designer_presets()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_flowers_filters_by_category_and_name() {
        let catalog = Catalog::standard().unwrap();

        let all = list_flowers(&catalog, None, None);
        assert_eq!(all.len(), catalog.len());

        let roses = list_flowers(&catalog, None, Some("ROSE".into()));
        assert!(!roses.is_empty());
        assert!(roses.iter().all(|f| f.name.to_lowercase().contains("rose")));

        let greenery = list_flowers(&catalog, Some(FlowerCategory::Greenery), None);
        assert!(greenery.iter().all(|f| f.category == FlowerCategory::Greenery));
    }

    #[test]
    fn test_get_unknown_flower_is_not_found() {
        let catalog = Catalog::standard().unwrap();
        let err = get_flower(&catalog, "f999").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[test]
    fn test_wrap_styles_carry_surcharges() {
        let wraps = list_wrap_styles();
        assert_eq!(wraps.len(), 6);

        let silk = wraps.iter().find(|w| w.style == WrapStyle::Silk).unwrap();
        assert_eq!(silk.surcharge, Money::from_cents(1500));
    }

    #[test]
    fn test_designer_presets_listed_in_order() {
        let names: Vec<String> = list_designer_presets().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Romantic", "Modern Minimalist", "Wild Garden"]);
    }
}
