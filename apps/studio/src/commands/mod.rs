//! # Studio Commands
//!
//! Functions the storefront UI invokes. Each takes only the state it
//! needs and returns `Result<T, ApiError>` (advisor commands return
//! `Option<T>`: a failed suggestion is simply absent).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── catalog.rs    ◄─── Flower picker, wraps, designer presets
//! ├── builder.rs    ◄─── Canvas edits, undo/redo
//! ├── pricing.rs    ◄─── Price panel
//! ├── wholesale.rs  ◄─── Admin: tiers, segments, simulation
//! ├── presets.rs    ◄─── Saved collection
//! ├── cart.rs       ◄─── Cart drawer
//! ├── checkout.rs   ◄─── Order summary and placement
//! └── advisor.rs    ◄─── AI suggestions and renders
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the session
//! fn undo(builder: &BuilderState)
//!
//! // Needs session, catalog and wholesale settings
//! async fn get_pricing_summary(catalog: &Catalog, builder: &BuilderState, wholesale: &WholesaleState)
//! ```

pub mod advisor;
pub mod builder;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod presets;
pub mod pricing;
pub mod wholesale;
