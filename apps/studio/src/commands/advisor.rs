//! # Advisor Commands
//!
//! Best-effort calls to the AI collaborator. Any failure (no advisor
//! configured, service down, malformed answer) is logged and answered
//! with `None`, which the UI shows as "no suggestion available".

use std::collections::HashSet;

use tracing::{debug, warn};

use petal_core::advisor::{
    render_prompt, AdvisorError, ImageAttachment, PairingSuggestion, RenderedImage,
    StructuredAdvice,
};
use petal_core::Catalog;

use crate::state::{AdvisorState, BuilderState};

fn settle<T>(call: &str, result: Result<T, AdvisorError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(call, error = %e, "Advisor call failed");
            None
        }
    }
}

/// Design advice for `prompt`.
///
/// With `include_canvas` the current design is described to the advisor
/// as context, otherwise the request is treated as a fresh inquiry.
pub async fn request_advice(
    advisor: &AdvisorState,
    catalog: &Catalog,
    builder: &BuilderState,
    prompt: String,
    include_canvas: bool,
    image: Option<ImageAttachment>,
) -> Option<StructuredAdvice> {
    let service = advisor.advisor()?;

    if prompt.trim().is_empty() && image.is_none() {
        return settle("advise", Err(AdvisorError::EmptyRequest));
    }

    let context = if include_canvas {
        builder
            .with_builder(|b| (!b.composition().is_empty()).then(|| b.describe(catalog)))
            .ok()
            .flatten()
    } else {
        None
    };

    debug!(with_context = context.is_some(), "request_advice command");
    settle(
        "advise",
        service.advise(prompt.trim(), context.as_deref(), image.as_ref()).await,
    )
}

/// Stems that pair with what is on the canvas.
pub async fn request_pairings(
    advisor: &AdvisorState,
    catalog: &Catalog,
    builder: &BuilderState,
) -> Option<Vec<PairingSuggestion>> {
    let service = advisor.advisor()?;

    let mut names: Vec<String> = builder
        .with_builder(|b| {
            catalog
                .names_in(b.composition())
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .ok()?;
    let mut seen = HashSet::new();
    names.retain(|n| seen.insert(n.clone()));

    if names.is_empty() {
        return settle("pairings", Err(AdvisorError::EmptyRequest));
    }

    debug!(stems = names.len(), "request_pairings command");
    settle("pairings", service.pairings(&names).await)
}

/// Photoreal rendering of the current design against `background`.
pub async fn render_design(
    advisor: &AdvisorState,
    catalog: &Catalog,
    builder: &BuilderState,
    background: String,
) -> Option<RenderedImage> {
    let service = advisor.advisor()?;

    let prompt = builder
        .with_builder(|b| {
            (!b.composition().is_empty())
                .then(|| render_prompt(b.composition(), catalog, &background))
        })
        .ok()?;

    let Some(prompt) = prompt else {
        return settle("render", Err(AdvisorError::EmptyRequest));
    };

    debug!(background = %background, "render_design command");
    settle("render", service.render(&prompt).await)
}
