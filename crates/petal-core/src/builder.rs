//! # Bouquet Builder
//!
//! The design session behind the canvas: the live composition, its undo
//! history and the selected placement.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   add / remove / move layer / wrap / ribbon / preset                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   mutate live Composition ──► history.push(&composition)               │
//! │                                                                         │
//! │   drag / rotate / scale (in progress)                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   mutate live Composition ──► push only when commit == true            │
//! │                                                                         │
//! │   undo / redo ──► composition = history snapshot (clone), deselect     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::history::EditHistory;
use crate::presets::{designer_preset, UserPreset};
use crate::types::{Composition, Flower, LayerMove, Placement, PlacementUpdate, WrapStyle};
use crate::validation::{validate_preset_name, validate_quantity};
use crate::HISTORY_CAPACITY;

/// A single user's design session.
#[derive(Debug, Clone)]
pub struct BouquetBuilder {
    composition: Composition,
    history: EditHistory<Composition>,
    selected: Option<usize>,
}

impl Default for BouquetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BouquetBuilder {
    /// Starts a session on an empty composition.
    pub fn new() -> Self {
        Self::with_history_capacity(HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        let composition = Composition::new();
        BouquetBuilder {
            history: EditHistory::with_capacity(composition.clone(), capacity),
            composition,
            selected: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn history(&self) -> &EditHistory<Composition> {
        &self.history
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Selects a placement, or clears the selection with `None`.
    pub fn select(&mut self, index: Option<usize>) -> CoreResult<()> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.selected = index;
        Ok(())
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Places one stem of `flower` on the canvas and selects it.
    ///
    /// New stems land near the upper centre, fanned out by placement count so
    /// consecutive additions don't stack exactly.
    pub fn add_flower(&mut self, flower: &Flower) -> CoreResult<usize> {
        if !flower.in_stock() {
            return Err(CoreError::OutOfStock {
                id: flower.id.clone(),
                name: flower.name.clone(),
            });
        }

        let n = self.composition.len();
        let offset = ((n * 7) % 21) as f64 - 10.0;
        let rotation = ((n * 11) % 31) as f64 - 15.0;

        self.composition.placements.push(
            Placement::new(flower.id.clone())
                .at(50.0 + offset, 40.0 + offset)
                .rotated(rotation),
        );

        let index = self.composition.len() - 1;
        self.commit();
        self.selected = Some(index);
        Ok(index)
    }

    /// Applies a partial update to one placement.
    ///
    /// `commit` is false while a drag is in progress; the gesture is recorded
    /// once, on release.
    pub fn update_placement(
        &mut self,
        index: usize,
        update: &PlacementUpdate,
        commit: bool,
    ) -> CoreResult<()> {
        self.check_index(index)?;

        if let Some(quantity) = update.quantity {
            // non-positive quantities report InvalidQuantity; validate_quantity covers the upper bound
            if quantity <= 0 {
                return Err(CoreError::InvalidQuantity { quantity });
            }
            validate_quantity(quantity)?;
        }

        update.apply_to(&mut self.composition.placements[index]);

        if commit {
            self.commit();
        }
        Ok(())
    }

    /// Removes a placement and clears the selection.
    pub fn remove_placement(&mut self, index: usize) -> CoreResult<Placement> {
        self.check_index(index)?;

        let removed = self.composition.placements.remove(index);
        self.commit();
        self.selected = None;
        Ok(removed)
    }

    /// Changes the paint order of a placement and returns its new index.
    ///
    /// Forward at the top or backward at the bottom leaves the order as is.
    pub fn move_layer(&mut self, index: usize, direction: LayerMove) -> CoreResult<usize> {
        self.check_index(index)?;

        let placements = &mut self.composition.placements;
        let last = placements.len() - 1;

        let next = match direction {
            LayerMove::Front => {
                let placement = placements.remove(index);
                placements.push(placement);
                last
            }
            LayerMove::Back => {
                let placement = placements.remove(index);
                placements.insert(0, placement);
                0
            }
            LayerMove::Forward if index < last => {
                placements.swap(index, index + 1);
                index + 1
            }
            LayerMove::Backward if index > 0 => {
                placements.swap(index, index - 1);
                index - 1
            }
            LayerMove::Forward | LayerMove::Backward => index,
        };

        self.commit();
        self.selected = Some(next);
        Ok(next)
    }

    pub fn set_wrap(&mut self, wrap: WrapStyle) {
        self.composition.wrap = wrap;
        self.commit();
    }

    pub fn set_ribbon_color(&mut self, color: impl Into<String>) {
        self.composition.ribbon_color = color.into();
        self.commit();
    }

    /// Replaces the canvas with a designer preset.
    pub fn load_preset(&mut self, name: &str) -> CoreResult<()> {
        let preset = designer_preset(name).ok_or_else(|| CoreError::UnknownPreset(name.to_string()))?;
        self.load_composition(preset.composition);
        Ok(())
    }

    /// Replaces the canvas with `composition`, as one undoable step.
    pub fn load_composition(&mut self, composition: Composition) {
        self.composition = composition;
        self.commit();
        self.selected = None;
    }

    pub fn undo(&mut self) -> &Composition {
        self.composition = self.history.undo().clone();
        self.selected = None;
        &self.composition
    }

    pub fn redo(&mut self) -> &Composition {
        self.composition = self.history.redo().clone();
        self.selected = None;
        &self.composition
    }

    /// Empties the canvas and forgets the history.
    pub fn reset(&mut self) {
        self.composition = Composition::new();
        self.history.reset(self.composition.clone());
        self.selected = None;
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Snapshots the canvas into a named collection entry.
    ///
    /// ## Errors
    /// - `Validation` if the name is blank or too long
    /// - `EmptyComposition` if nothing is on the canvas
    pub fn save_preset(&self, name: &str, now: DateTime<Utc>) -> CoreResult<UserPreset> {
        validate_preset_name(name)?;
        if self.composition.is_empty() {
            return Err(CoreError::EmptyComposition);
        }
        Ok(UserPreset::new(name, self.composition.clone(), now))
    }

    /// Pretty-printed JSON of the canvas, for download.
    pub fn export_json(&self) -> CoreResult<String> {
        if self.composition.is_empty() {
            return Err(CoreError::EmptyComposition);
        }
        Ok(serde_json::to_string_pretty(&self.composition)?)
    }

    /// One-line description used as advisor context.
    ///
    /// `Bouquet with 2 stems: Quicksand Rose, Eucalyptus. Wrap style: silk.`
    pub fn describe(&self, catalog: &Catalog) -> String {
        format!(
            "Bouquet with {} stems: {}. Wrap style: {}.",
            self.composition.len(),
            catalog.names_in(&self.composition).join(", "),
            self.composition.wrap.id()
        )
    }

    fn commit(&mut self) {
        self.history.push(&self.composition);
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        let len = self.composition.len();
        if index >= len {
            return Err(CoreError::PlacementOutOfRange { index, len });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
