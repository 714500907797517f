use crate::species::SpeciesDescriptor;
use std::sync::Arc;

/// One cohort of larvae of a single species, tracked through all rearing phases.
///
/// A batch is fixed at creation: both schedulers read the same batch list and neither
/// may alter it, so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    species: Arc<SpeciesDescriptor>,
    larvae_count: u64,
}

impl Batch {
    pub fn new(species: Arc<SpeciesDescriptor>, larvae_count: u64) -> Self {
        Self {
            species,
            larvae_count,
        }
    }

    pub fn species(&self) -> &SpeciesDescriptor {
        &self.species
    }

    pub fn larvae_count(&self) -> u64 {
        self.larvae_count
    }
}
