//! # Catalog
//!
//! The stem catalog: loaded once at startup, validated at load time, read-only
//! afterwards.
//!
//! ## Load Flow
//! ```text
//! data/catalog.json (embedded) ──► serde ──► Vec<Flower>
//!                                               │
//!                                               ▼
//!                              validate_flower() for every record
//!                                               │
//!                                               ▼
//!                              Catalog { flowers, index: id → position }
//! ```
//!
//! Pricing only needs `id → Flower`, expressed by the [`ComponentLookup`]
//! trait so tests and callers can price against any map.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Composition, Flower, FlowerCategory};
use crate::validation::validate_flower;

/// House catalog shipped with the studio.
const STANDARD_CATALOG: &str = include_str!("../data/catalog.json");

// =============================================================================
// Lookup Trait
// =============================================================================

/// Read-only `id → Flower` mapping.
pub trait ComponentLookup {
    fn component(&self, id: &str) -> Option<&Flower>;
}

impl ComponentLookup for HashMap<String, Flower> {
    fn component(&self, id: &str) -> Option<&Flower> {
        self.get(id)
    }
}

impl ComponentLookup for [Flower] {
    fn component(&self, id: &str) -> Option<&Flower> {
        self.iter().find(|f| f.id == id)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The validated stem catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    flowers: Vec<Flower>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, validating every record.
    ///
    /// ## Errors
    /// - Any record failing [`validate_flower`]
    /// - Two records sharing an id
    pub fn from_components(flowers: Vec<Flower>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(flowers.len());

        for (position, flower) in flowers.iter().enumerate() {
            validate_flower(flower)?;

            if index.insert(flower.id.clone(), position).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "flower id".to_string(),
                    value: flower.id.clone(),
                }
                .into());
            }
        }

        Ok(Catalog { flowers, index })
    }

    /// Parses and validates a JSON array of flowers.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let flowers: Vec<Flower> =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidCatalog(e.to_string()))?;
        Self::from_components(flowers)
    }

    /// Loads the embedded house catalog.
    pub fn standard() -> CoreResult<Self> {
        Self::from_json(STANDARD_CATALOG)
    }

    /// Gets a flower by id.
    pub fn get(&self, id: &str) -> Option<&Flower> {
        self.index.get(id).map(|&i| &self.flowers[i])
    }

    /// Gets a flower by id, failing with `UnknownComponent`.
    pub fn require(&self, id: &str) -> CoreResult<&Flower> {
        self.get(id)
            .ok_or_else(|| CoreError::UnknownComponent(id.to_string()))
    }

    /// All flowers in catalog order.
    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    /// Filters the catalog for the picker.
    ///
    /// ## Rules
    /// - `category`: `None` means all categories
    /// - `search`: case-insensitive substring of the name; empty matches all
    /// - Catalog order is preserved
    pub fn filter(&self, category: Option<FlowerCategory>, search: &str) -> Vec<&Flower> {
        let needle = search.trim().to_lowercase();

        self.flowers
            .iter()
            .filter(|f| category.map_or(true, |c| f.category == c))
            .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Names of the stems in a composition, in paint order.
    ///
    /// Placements whose flower left the catalog are skipped.
    pub fn names_in<'a>(&'a self, composition: &Composition) -> Vec<&'a str> {
        composition
            .placements
            .iter()
            .filter_map(|p| self.get(&p.flower_id))
            .map(|f| f.name.as_str())
            .collect()
    }
}

impl ComponentLookup for Catalog {
    fn component(&self, id: &str) -> Option<&Flower> {
        self.get(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Placement;

    fn flower(id: &str, price_cents: i64) -> Flower {
        Flower {
            id: id.to_string(),
            name: format!("Stem {}", id),
            scientific_name: None,
            price_cents,
            category: FlowerCategory::Focal,
            color: "White".to_string(),
            meaning: "Test".to_string(),
            stock: 10,
            origin: None,
            season: None,
            care_instructions: None,
            style: None,
        }
    }

    #[test]
    fn test_standard_catalog_loads() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.len(), 25);

        let peony = catalog.get("f1").unwrap();
        assert_eq!(peony.name, "Sarah Bernhardt Peony");
        assert_eq!(peony.price_cents, 1250);
        assert_eq!(peony.category, FlowerCategory::Focal);
        assert_eq!(peony.scientific_name.as_deref(), Some("PAEONIA LACTIFLORA"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_components(vec![flower("f1", 100), flower("f1", 200)]);
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Catalog::from_components(vec![flower("f1", -1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = Catalog::from_json("[{\"id\": \"f1\"}]");
        assert!(matches!(result, Err(CoreError::InvalidCatalog(_))));
    }

    #[test]
    fn test_filter_by_category_and_search() {
        let catalog = Catalog::standard().unwrap();

        let greenery = catalog.filter(Some(FlowerCategory::Greenery), "");
        assert!(!greenery.is_empty());
        assert!(greenery.iter().all(|f| f.category == FlowerCategory::Greenery));

        let roses = catalog.filter(None, "ROSE");
        let names: Vec<&str> = roses.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Quicksand Rose", "Juliet Garden Rose"]);

        assert_eq!(catalog.filter(None, "").len(), catalog.len());
    }

    #[test]
    fn test_require_unknown() {
        let catalog = Catalog::standard().unwrap();
        assert!(matches!(
            catalog.require("f999"),
            Err(CoreError::UnknownComponent(id)) if id == "f999"
        ));
    }

    #[test]
    fn test_names_in_skips_discontinued() {
        let catalog = Catalog::standard().unwrap();
        let mut composition = Composition::new();
        composition.placements.push(Placement::new("f2"));
        composition.placements.push(Placement::new("gone"));
        composition.placements.push(Placement::new("f1"));

        assert_eq!(
            catalog.names_in(&composition),
            vec!["Quicksand Rose", "Sarah Bernhardt Peony"]
        );
    }
}
