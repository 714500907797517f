//! Batch generation: one batch per species, each seeded with a larvae count drawn from a
//! pluggable source.

use crate::error::AquaforgeError;
use aquaforge_schemas::{batch::Batch, measurement::InclusiveRange, species::SpeciesDescriptor};
use rand::Rng;
use std::{collections::VecDeque, sync::Arc};
use tracing::debug;

/// Default bounds for the larvae drawn per batch.
pub const DEFAULT_LARVAE_RANGE: InclusiveRange<u64> = InclusiveRange {
    min: 1_000_000,
    max: 2_500_000,
};

/// Supplies the larvae count for each generated batch.
pub trait LarvaeSource {
    /// Returns the next count, or `None` when the source has nothing left.
    fn draw(&mut self, species: &SpeciesDescriptor, range: &InclusiveRange<u64>) -> Option<u64>;
}

/// Draws uniformly from the inclusive range.
#[derive(Debug)]
pub struct UniformLarvae<R> {
    rng: R,
}

impl<R: Rng> UniformLarvae<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LarvaeSource for UniformLarvae<R> {
    fn draw(&mut self, _species: &SpeciesDescriptor, range: &InclusiveRange<u64>) -> Option<u64> {
        Some(self.rng.gen_range(range.min..=range.max))
    }
}

/// Hands out predetermined counts in order, ignoring the range.
#[derive(Debug, Clone, Default)]
pub struct FixedLarvae {
    counts: VecDeque<u64>,
}

impl FixedLarvae {
    pub fn new(counts: impl IntoIterator<Item = u64>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }
}

impl LarvaeSource for FixedLarvae {
    fn draw(&mut self, _species: &SpeciesDescriptor, _range: &InclusiveRange<u64>) -> Option<u64> {
        self.counts.pop_front()
    }
}

pub fn validate_range(range: &InclusiveRange<u64>) -> Result<(), AquaforgeError> {
    let reason = if range.min > range.max {
        "minimum exceeds maximum"
    } else if range.min == 0 {
        "minimum must be at least one larva"
    } else {
        return Ok(());
    };
    Err(AquaforgeError::InvalidLarvaeRange {
        min: range.min,
        max: range.max,
        reason: reason.to_string(),
    })
}

/// Creates one batch per species, in species order.
pub fn generate_batches<S: LarvaeSource + ?Sized>(
    species: &[Arc<SpeciesDescriptor>],
    range: InclusiveRange<u64>,
    source: &mut S,
) -> Result<Vec<Batch>, AquaforgeError> {
    if species.is_empty() {
        return Err(AquaforgeError::NoSpeciesProvided);
    }
    validate_range(&range)?;

    species
        .iter()
        .enumerate()
        .map(|(index, descriptor)| -> Result<Batch, AquaforgeError> {
            let larvae = source
                .draw(descriptor, &range)
                .ok_or(AquaforgeError::LarvaeSourceExhausted(index))?;
            debug!(species = %descriptor.species_name, larvae, "batch generated");
            Ok(Batch::new(Arc::clone(descriptor), larvae))
        })
        .collect()
}
