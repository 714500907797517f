//! Converts head counts into tank and cage counts for each rearing phase.
//!
//! Every calculator provisions one unit more than the integer quotient, even when the count
//! divides exactly, and then clamps to what the facility owns. The clamp is silent in
//! `allocated`; callers that care about infeasible plans check [`ResourceRequirement::is_over_capacity`].

use aquaforge_schemas::{batch::Batch, facility::FacilityConfiguration, species::SpeciesDescriptor};
use serde::{Deserialize, Serialize};

/// Blended volume of a small/medium/large larval tank, in litres.
pub const LARVAL_TANK_CAPACITY_L: u64 = 8_000;

/// Volume of a pre-growth tank, in litres.
pub const PREGROWTH_TANK_CAPACITY_L: u64 = 40_000;

/// Fry per m³ in pre-growth, reduced below species figures for welfare.
pub const PREGROWTH_DENSITY_PER_M3: u64 = 400;

const LITRES_PER_M3: u64 = 1_000;

/// Units needed for one phase of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    /// Units the head count calls for before clamping.
    pub required: u32,
    /// Units the facility owns for this phase.
    pub available: u32,
    /// `required` clamped to `available`.
    pub allocated: u32,
}

impl ResourceRequirement {
    fn clamp(required: u64, available: u32) -> Self {
        let required = u32::try_from(required).unwrap_or(u32::MAX);
        Self {
            required,
            available,
            allocated: required.min(available),
        }
    }

    pub fn is_over_capacity(&self) -> bool {
        self.required > self.available
    }
}

fn units_for(count: u64, capacity_per_unit: u64) -> u64 {
    count / capacity_per_unit + 1
}

/// Larvae one larval tank can hold for this species.
pub fn larvae_per_tank(species: &SpeciesDescriptor) -> u64 {
    LARVAL_TANK_CAPACITY_L * u64::from(species.densities.larval_per_litre)
}

/// Fry one pre-growth tank can hold: 40 m³ at 400 fry/m³.
pub fn fry_per_pregrowth_tank() -> u64 {
    PREGROWTH_TANK_CAPACITY_L / LITRES_PER_M3 * PREGROWTH_DENSITY_PER_M3
}

/// Fish one sea cage can hold for this species.
pub fn fish_per_cage(species: &SpeciesDescriptor, config: &FacilityConfiguration) -> u64 {
    u64::from(config.grow_out.cage_volume_m3) * u64::from(species.densities.fattening_per_m3)
}

/// Larval tanks needed to seed the whole batch.
///
/// # Panics
///
/// Panics if the species larval density is zero. Species pass through
/// [`crate::validation::validate_species`] before reaching the planner.
pub fn larval_tanks_required(batch: &Batch, config: &FacilityConfiguration) -> ResourceRequirement {
    let required = units_for(batch.larvae_count(), larvae_per_tank(batch.species()));
    ResourceRequirement::clamp(required, config.total_larval_tanks())
}

/// Pre-growth tanks needed for the larvae that survived the larval phase.
pub fn pregrowth_tanks_required(survivors: u64, config: &FacilityConfiguration) -> ResourceRequirement {
    let required = units_for(survivors, fry_per_pregrowth_tank());
    ResourceRequirement::clamp(required, config.hatchery.pregrowth_tanks)
}

/// Sea cages needed to fatten the fry leaving pre-growth.
///
/// # Panics
///
/// Panics if the cage volume or the species fattening density is zero.
pub fn fattening_cages_required(
    fry: u64,
    species: &SpeciesDescriptor,
    config: &FacilityConfiguration,
) -> ResourceRequirement {
    let required = units_for(fry, fish_per_cage(species, config));
    ResourceRequirement::clamp(required, config.total_cages())
}
