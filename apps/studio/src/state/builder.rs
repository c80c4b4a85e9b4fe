//! # Builder State
//!
//! The single design session, behind a `std::sync::Mutex`. Every builder
//! edit is synchronous, so the lock is never held across an await.

use std::sync::Mutex;

use petal_core::BouquetBuilder;

use crate::error::ApiError;

#[derive(Debug)]
pub struct BuilderState {
    builder: Mutex<BouquetBuilder>,
}

impl Default for BuilderState {
    fn default() -> Self {
        BuilderState::new(BouquetBuilder::new())
    }
}

impl BuilderState {
    pub fn new(builder: BouquetBuilder) -> Self {
        BuilderState {
            builder: Mutex::new(builder),
        }
    }

    /// Runs `f` with read access to the session.
    pub fn with_builder<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&BouquetBuilder) -> R,
    {
        let builder = self.builder.lock().map_err(|_| ApiError::poisoned("Builder"))?;
        Ok(f(&builder))
    }

    /// Runs `f` with write access to the session.
    pub fn with_builder_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut BouquetBuilder) -> R,
    {
        let mut builder = self.builder.lock().map_err(|_| ApiError::poisoned("Builder"))?;
        Ok(f(&mut builder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::WrapStyle;

    #[test]
    fn test_mutation_is_visible_to_readers() {
        let state = BuilderState::default();
        state.with_builder_mut(|b| b.set_wrap(WrapStyle::Silk)).unwrap();

        let wrap = state.with_builder(|b| b.composition().wrap).unwrap();
        assert_eq!(wrap, WrapStyle::Silk);
    }

    #[test]
    fn test_history_capacity_is_respected() {
        let state = BuilderState::new(BouquetBuilder::with_history_capacity(5));
        let capacity = state.with_builder(|b| b.history().capacity()).unwrap();
        assert_eq!(capacity, 5);
    }
}
