//! # Advisor State
//!
//! Optional handle to the AI collaborator. The studio runs without one;
//! advisor commands then answer `None`.

use std::sync::Arc;

use petal_core::advisor::FloralAdvisor;

#[derive(Clone, Default)]
pub struct AdvisorState {
    advisor: Option<Arc<dyn FloralAdvisor>>,
}

impl AdvisorState {
    pub fn new(advisor: Arc<dyn FloralAdvisor>) -> Self {
        AdvisorState {
            advisor: Some(advisor),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn advisor(&self) -> Option<&dyn FloralAdvisor> {
        self.advisor.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.advisor.is_some()
    }
}

impl std::fmt::Debug for AdvisorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorState")
            .field("available", &self.is_available())
            .finish()
    }
}
