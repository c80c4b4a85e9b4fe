//! # Builder Commands
//!
//! Canvas edits for the design session.
//!
//! ## Edit Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_flower ─────┐                                                      │
//! │  remove_placement┤                                                      │
//! │  move_layer ─────┼──► composition changed ──► snapshot pushed ──► UI   │
//! │  set_wrap ───────┤                               (undo/redo)            │
//! │  load_preset ────┘                                                      │
//! │                                                                         │
//! │  update_placement(commit = false) ──► composition changed ──► UI       │
//! │  update_placement(commit = true)  ──► snapshot pushed (drag released)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command answers with the full session so the UI redraws from one
//! payload.

use serde::Serialize;
use tracing::{debug, info};

use petal_core::{
    BouquetBuilder, Catalog, Composition, LayerMove, PlacementUpdate, WrapStyle,
};

use crate::error::ApiError;
use crate::state::BuilderState;

/// Session snapshot returned by builder commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderResponse {
    pub composition: Composition,
    pub selected: Option<usize>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub stem_count: i64,
}

impl From<&BouquetBuilder> for BuilderResponse {
    fn from(builder: &BouquetBuilder) -> Self {
        BuilderResponse {
            composition: builder.composition().clone(),
            selected: builder.selected(),
            can_undo: builder.can_undo(),
            can_redo: builder.can_redo(),
            stem_count: builder.composition().stem_count(),
        }
    }
}

fn respond<F>(builder: &BuilderState, edit: F) -> Result<BuilderResponse, ApiError>
where
    F: FnOnce(&mut BouquetBuilder) -> Result<(), ApiError>,
{
    builder.with_builder_mut(|b| {
        edit(b)?;
        Ok::<_, ApiError>(BuilderResponse::from(&*b))
    })?
}

pub fn get_design(builder: &BuilderState) -> Result<BuilderResponse, ApiError> {
    builder.with_builder(|b| BuilderResponse::from(b))
}

/// Drops a catalog flower onto the canvas and selects it.
pub fn add_flower(
    catalog: &Catalog,
    builder: &BuilderState,
    flower_id: &str,
) -> Result<BuilderResponse, ApiError> {
    debug!(flower_id, "add_flower command");
    let flower = catalog.require(flower_id)?;

    respond(builder, |b| {
        b.add_flower(flower)?;
        Ok(())
    })
}

pub fn select_placement(
    builder: &BuilderState,
    index: Option<usize>,
) -> Result<BuilderResponse, ApiError> {
    respond(builder, |b| Ok(b.select(index)?))
}

/// Applies a partial placement edit.
///
/// Drags send `commit = false` while moving and `commit = true` on release.
pub fn update_placement(
    builder: &BuilderState,
    index: usize,
    update: PlacementUpdate,
    commit: bool,
) -> Result<BuilderResponse, ApiError> {
    debug!(index, commit, "update_placement command");
    respond(builder, |b| Ok(b.update_placement(index, &update, commit)?))
}

pub fn remove_placement(builder: &BuilderState, index: usize) -> Result<BuilderResponse, ApiError> {
    debug!(index, "remove_placement command");
    respond(builder, |b| {
        b.remove_placement(index)?;
        Ok(())
    })
}

/// Changes paint order; the moved placement stays selected.
pub fn move_layer(
    builder: &BuilderState,
    index: usize,
    direction: LayerMove,
) -> Result<BuilderResponse, ApiError> {
    debug!(index, ?direction, "move_layer command");
    respond(builder, |b| {
        b.move_layer(index, direction)?;
        Ok(())
    })
}

pub fn set_wrap(builder: &BuilderState, wrap: WrapStyle) -> Result<BuilderResponse, ApiError> {
    respond(builder, |b| {
        b.set_wrap(wrap);
        Ok(())
    })
}

pub fn set_ribbon_color(builder: &BuilderState, color: String) -> Result<BuilderResponse, ApiError> {
    if color.trim().is_empty() {
        return Err(ApiError::validation("Ribbon color is required"));
    }
    respond(builder, |b| {
        b.set_ribbon_color(color);
        Ok(())
    })
}

/// Replaces the canvas with a designer preset.
pub fn load_designer_preset(builder: &BuilderState, name: &str) -> Result<BuilderResponse, ApiError> {
    info!(preset = name, "load_designer_preset command");
    respond(builder, |b| Ok(b.load_preset(name)?))
}

pub fn undo(builder: &BuilderState) -> Result<BuilderResponse, ApiError> {
    respond(builder, |b| {
        b.undo();
        Ok(())
    })
}

pub fn redo(builder: &BuilderState) -> Result<BuilderResponse, ApiError> {
    respond(builder, |b| {
        b.redo();
        Ok(())
    })
}

/// Clears the canvas and the undo history.
pub fn reset_design(builder: &BuilderState) -> Result<BuilderResponse, ApiError> {
    info!("reset_design command");
    respond(builder, |b| {
        b.reset();
        Ok(())
    })
}

/// Pretty-printed composition JSON for download.
pub fn export_design(builder: &BuilderState) -> Result<String, ApiError> {
    builder.with_builder(|b| b.export_json())?.map_err(ApiError::from)
}

pub fn describe_design(catalog: &Catalog, builder: &BuilderState) -> Result<String, ApiError> {
    builder.with_builder(|b| b.describe(catalog))
}
