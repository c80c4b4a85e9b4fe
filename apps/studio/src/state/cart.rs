//! # Cart State
//!
//! The shopping cart, behind a `std::sync::Mutex`.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action              Command                   Cart Change           │
//! │  ─────────              ───────                   ───────────           │
//! │  Add design ──────────► add_design_to_cart() ───► custom line pushed   │
//! │  Add stems ───────────► add_flower_to_cart() ───► line merged/pushed   │
//! │  Change qty ──────────► update_cart_item() ─────► items[i].qty = n     │
//! │  Remove ──────────────► remove_from_cart() ─────► items.remove(i)      │
//! │  Order placed ────────► place_order() ──────────► items.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use petal_core::Cart;

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct CartState {
    cart: Mutex<Cart>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cart<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().map_err(|_| ApiError::poisoned("Cart"))?;
        Ok(f(&cart))
    }

    pub fn with_cart_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().map_err(|_| ApiError::poisoned("Cart"))?;
        Ok(f(&mut cart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::Catalog;

    #[test]
    fn test_cart_starts_empty() {
        let state = CartState::new();
        assert!(state.with_cart(|c| c.is_empty()).unwrap());
    }

    #[test]
    fn test_mutation_persists_between_calls() {
        let catalog = Catalog::standard().unwrap();
        let state = CartState::new();

        state
            .with_cart_mut(|c| c.add_ready_made(catalog.get("f1").unwrap(), 2))
            .unwrap()
            .unwrap();

        assert_eq!(state.with_cart(|c| c.total_quantity()).unwrap(), 2);
    }
}
