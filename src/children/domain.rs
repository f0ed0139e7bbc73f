use crate::core::domain::Identifiable;

pub mod model;

// Child is the sponsorship-eligible child record as seen by the hold lifecycle.
pub trait Child: Identifiable {
    fn is_sponsored(&self) -> bool;
    fn is_available(&self) -> bool;
}
