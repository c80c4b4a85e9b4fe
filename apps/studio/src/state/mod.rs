//! # State Module
//!
//! Managed state for the studio, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Studio State                                       │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────┐                │
//! │  │ BuilderState │  │  CartState   │  │ WholesaleState │                │
//! │  │ std Mutex    │  │  std Mutex   │  │ tokio Mutex    │                │
//! │  │ (sync edits) │  │ (sync edits) │  │ (held over     │                │
//! │  └──────────────┘  └──────────────┘  │  a store save) │                │
//! │                                      └────────────────┘                │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────┐                │
//! │  │ StudioConfig │  │   Catalog    │  │  AdvisorState  │                │
//! │  │ (read-only)  │  │ (read-only)  │  │ (optional)     │                │
//! │  └──────────────┘  └──────────────┘  └────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands declare only the state they touch, so an advisor call never
//! blocks a cart edit.

mod advisor;
mod builder;
mod cart;
mod config;
mod wholesale;

pub use advisor::AdvisorState;
pub use builder::BuilderState;
pub use cart::CartState;
pub use config::StudioConfig;
pub use wholesale::WholesaleState;
