//! # Design Advisor
//!
//! Contract of the generative-AI design advisor ("Iris") and the request and
//! response shapes it speaks. The transport to the AI vendor lives outside
//! this crate; anything implementing [`FloralAdvisor`] can be plugged in.
//!
//! ## Request Flow
//! ```text
//! builder.describe() ──► advice_prompt(prompt, context) ──► advisor.advise()
//!                                                               │
//!                       parse_advice(json) ◄── vendor JSON ◄────┘
//!                              │
//!                              ▼
//!                  StructuredAdvice  (or AdvisorError → "no suggestion")
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::types::Composition;

/// Failure of an advisor call. Callers treat every variant as
/// "no suggestion available".
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Nothing to ask about.
    #[error("Empty request")]
    EmptyRequest,

    /// The service could not be reached or refused the call.
    #[error("Advisor unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something that isn't the expected shape.
    #[error("Malformed advisor response: {0}")]
    MalformedResponse(String),
}

// =============================================================================
// Response Types
// =============================================================================

/// Structured design advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAdvice {
    /// Critique or encouraging vision.
    pub suggestion: String,
    /// Colour, shape and balance analysis.
    pub design_analysis: String,
    /// Catalog flower names.
    pub recommended_flowers: Vec<String>,
    /// Actionable steps, usually three.
    pub design_checklist: Vec<String>,
    /// Pointer to a studio control.
    pub tool_tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

/// A stem suggested to go with the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PairingSuggestion {
    pub name: String,
    pub reason: String,
}

#[derive(Deserialize)]
struct PairingsEnvelope {
    #[serde(default)]
    pairings: Vec<PairingSuggestion>,
}

/// A rendered photograph of a bouquet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RenderedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// An image attached to an advice request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

// =============================================================================
// Advisor Trait
// =============================================================================

/// The external AI collaborator. Best-effort, no retries.
#[async_trait]
pub trait FloralAdvisor: Send + Sync {
    /// Design advice for a prompt, optionally about the current canvas.
    async fn advise(
        &self,
        prompt: &str,
        context: Option<&str>,
        image: Option<&ImageAttachment>,
    ) -> Result<StructuredAdvice, AdvisorError>;

    /// Photoreal rendering of a text description.
    async fn render(&self, prompt: &str) -> Result<RenderedImage, AdvisorError>;

    /// Stems that pair with the given flower names.
    async fn pairings(&self, names: &[String]) -> Result<Vec<PairingSuggestion>, AdvisorError>;
}

// =============================================================================
// Prompts
// =============================================================================

/// Persona and house rules, with the catalog inlined so suggestions name
/// stems the studio actually sells.
pub fn system_instruction(catalog: &Catalog) -> String {
    let knowledge: Vec<String> = catalog
        .flowers()
        .iter()
        .map(|f| format!("{} (ID: {}, Meaning: {})", f.name, f.id, f.meaning))
        .collect();

    format!(
        "You are Iris, the Elite Floral Architect for \"Petal & Prose\". \
         You are a mentor guiding the user from a blank canvas to a professional-grade arrangement.\n\
         Thrillers are large focal blooms, fillers bridge gaps, spillers and greenery add movement.\n\
         Suggest specific stems from our catalog: {}.\n\
         Always provide a designChecklist of three actionable steps and a toolTip naming a studio control.",
        knowledge.join("; ")
    )
}

/// Request text for an advice call.
pub fn advice_prompt(prompt: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.trim().is_empty()) {
        Some(state) => format!(
            "Analysis Request: \"{}\". \nCurrent Studio State: {}. \nCritique the arrangement and provide a roadmap to excellence.",
            prompt, state
        ),
        None => format!(
            "New Inquiry: \"{}\". Help them conceptualize a new arrangement from scratch using professional design theory.",
            prompt
        ),
    }
}

/// Request text for a pairing call, `None` when there is nothing to pair.
pub fn pairing_prompt(names: &[String]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    Some(format!("Suggest pairings for: {}.", names.join(", ")))
}

/// Request text for a photoreal rendering of a composition.
pub fn render_prompt(composition: &Composition, catalog: &Catalog, background: &str) -> String {
    format!(
        "A professional, realistic, high-resolution studio photograph of a lush floral bouquet. \
         The arrangement contains: {}. \
         The bouquet is wrapped in {}. \
         It is placed against a solid {} background. \
         Cinematic soft lighting, shallow depth of field, sharp focus on petals, droplets of water, \
         8k resolution, elegant florist composition.",
        catalog.names_in(composition).join(", "),
        composition.wrap.display_name(),
        background
    )
}

// =============================================================================
// Response Parsing
// =============================================================================

/// Decodes a structured advice response.
pub fn parse_advice(json: &str) -> Result<StructuredAdvice, AdvisorError> {
    serde_json::from_str(json).map_err(|e| AdvisorError::MalformedResponse(e.to_string()))
}

/// Decodes a `{ "pairings": [...] }` response.
pub fn parse_pairings(json: &str) -> Result<Vec<PairingSuggestion>, AdvisorError> {
    serde_json::from_str::<PairingsEnvelope>(json)
        .map(|envelope| envelope.pairings)
        .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Placement, WrapStyle};

    #[test]
    fn test_advice_prompt_with_and_without_context() {
        let with = advice_prompt("More romance?", Some("Bouquet with 1 stems: Quicksand Rose. Wrap style: silk."));
        assert!(with.starts_with("Analysis Request: \"More romance?\"."));
        assert!(with.contains("Current Studio State: Bouquet with 1 stems"));

        let without = advice_prompt("Autumn wedding", None);
        assert!(without.starts_with("New Inquiry: \"Autumn wedding\"."));

        assert_eq!(advice_prompt("x", Some("  ")), advice_prompt("x", None));
    }

    #[test]
    fn test_render_prompt_names_stems_and_wrap() {
        let catalog = Catalog::standard().unwrap();
        let mut composition = Composition::new();
        composition.placements.push(Placement::new("f1"));
        composition.placements.push(Placement::new("f2"));
        composition.wrap = WrapStyle::Silk;

        let prompt = render_prompt(&composition, &catalog, "#fdf2f8");
        assert!(prompt.contains("contains: Sarah Bernhardt Peony, Quicksand Rose."));
        assert!(prompt.contains("wrapped in Italian Silk."));
        assert!(prompt.contains("solid #fdf2f8 background"));
    }

    #[test]
    fn test_parse_advice() {
        let json = r##"{
            "suggestion": "Lovely start",
            "designAnalysis": "Balanced",
            "recommendedFlowers": ["Silver Dollar Eucalyptus"],
            "designChecklist": ["Add greenery", "Vary heights", "Try silk"],
            "toolTip": "Use the rotation slider",
            "colorPalette": ["#fff"]
        }"##;

        let advice = parse_advice(json).unwrap();
        assert_eq!(advice.design_checklist.len(), 3);
        assert_eq!(advice.color_palette, Some(vec!["#fff".to_string()]));
        assert!(advice.mood.is_none());
    }

    #[test]
    fn test_parse_advice_missing_required_field() {
        let json = r#"{"suggestion": "Hi"}"#;
        assert!(matches!(
            parse_advice(json),
            Err(AdvisorError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_pairings() {
        assert!(pairing_prompt(&[]).is_none());
        assert_eq!(
            pairing_prompt(&["Peony".to_string(), "Rose".to_string()]).unwrap(),
            "Suggest pairings for: Peony, Rose."
        );

        let parsed = parse_pairings(r#"{"pairings": [{"name": "Eucalyptus", "reason": "Movement"}]}"#).unwrap();
        assert_eq!(parsed[0].name, "Eucalyptus");
        assert!(parse_pairings("{}").unwrap().is_empty());
    }

    #[test]
    fn test_system_instruction_lists_catalog() {
        let catalog = Catalog::standard().unwrap();
        let instruction = system_instruction(&catalog);
        assert!(instruction.contains("Sarah Bernhardt Peony (ID: f1"));
    }
}
