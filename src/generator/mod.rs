use crate::{BoardConfig, Minefield};

pub use random::*;

mod random;

/// Produces the minefield a new game plays on. Generators are consumed by
/// [`generate`](BoardGenerator::generate); the engine owns everything
/// afterwards.
pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Minefield;
}
