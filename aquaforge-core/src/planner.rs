use crate::{
    batches::{generate_batches, LarvaeSource},
    comparison::{self, ComparisonReport},
    error::AquaforgeError,
    schedule::{ScheduleResult, SchedulingPolicy},
    validation::{validate_facility, validate_species},
};
use aquaforge_schemas::{
    batch::Batch, facility::FacilityConfiguration, measurement::InclusiveRange,
    species::SpeciesDescriptor,
};
use std::sync::Arc;
use tracing::info;

/// A fluent builder for constructing a `ProductionPlanner`.
///
/// Batches can be supplied directly or drawn from a [`LarvaeSource`]; when both are given,
/// the explicit batches win.
#[derive(Default)]
pub struct PlannerBuilder {
    species: Vec<Arc<SpeciesDescriptor>>,
    facility: Option<FacilityConfiguration>,
    batches: Vec<Batch>,
}

impl PlannerBuilder {
    /// Creates a new, empty `PlannerBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the species that batches may reference.
    pub fn with_species(mut self, species: Vec<Arc<SpeciesDescriptor>>) -> Self {
        self.species = species;
        self
    }

    /// Sets the facility configuration. Defaults to the reference plant when omitted.
    pub fn with_facility(mut self, facility: FacilityConfiguration) -> Self {
        self.facility = Some(facility);
        self
    }

    /// Uses the given batches as-is, in order.
    pub fn with_batches(mut self, batches: Vec<Batch>) -> Self {
        self.batches = batches;
        self
    }

    /// Draws one batch per configured species from `source`.
    ///
    /// # Errors
    ///
    /// Fails if no species were set, the range is invalid, or the source runs dry.
    pub fn with_generated_batches<S: LarvaeSource + ?Sized>(
        mut self,
        range: InclusiveRange<u64>,
        source: &mut S,
    ) -> Result<Self, AquaforgeError> {
        self.batches = generate_batches(&self.species, range, source)?;
        Ok(self)
    }

    /// Consumes the builder and returns a validated `ProductionPlanner`.
    ///
    /// # Errors
    ///
    /// Returns an `AquaforgeError` if a species or the facility breaks its invariants, if no
    /// batch was provided, or if a batch has no larvae.
    pub fn build(self) -> Result<ProductionPlanner, AquaforgeError> {
        if self.species.is_empty() {
            return Err(AquaforgeError::NoSpeciesProvided);
        }
        for species in &self.species {
            validate_species(species)?;
        }

        let facility = self.facility.unwrap_or_default();
        validate_facility(&facility)?;

        if self.batches.is_empty() {
            return Err(AquaforgeError::NoBatchProvided);
        }
        for batch in &self.batches {
            validate_species(batch.species())?;
            if batch.larvae_count() == 0 {
                return Err(AquaforgeError::ZeroLarvae(batch.species().species_name.clone()));
            }
        }

        Ok(ProductionPlanner {
            species: self.species,
            facility,
            batches: self.batches,
        })
    }
}

/// Everything one planning run needs, validated and read-only.
#[derive(Debug, Clone)]
pub struct ProductionPlanner {
    species: Vec<Arc<SpeciesDescriptor>>,
    facility: FacilityConfiguration,
    batches: Vec<Batch>,
}

/// Both schedules of a run and their comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub sequential: ScheduleResult,
    pub overlapping: ScheduleResult,
    pub comparison: ComparisonReport,
}

impl ProductionPlanner {
    pub fn schedule(&self, policy: SchedulingPolicy) -> Result<ScheduleResult, AquaforgeError> {
        policy.schedule(&self.batches, &self.facility)
    }

    /// Schedules the batch list under both policies and compares the results.
    pub fn run(&self) -> Result<PlanOutcome, AquaforgeError> {
        info!(
            species = self.species.len(),
            batches = self.batches.len(),
            "planning production"
        );
        let sequential = self.schedule(SchedulingPolicy::Sequential)?;
        let overlapping = self.schedule(SchedulingPolicy::Overlapping)?;
        let comparison = comparison::compare(&sequential, &overlapping, &self.facility)?;
        Ok(PlanOutcome {
            sequential,
            overlapping,
            comparison,
        })
    }

    pub fn species(&self) -> &[Arc<SpeciesDescriptor>] {
        &self.species
    }

    pub fn facility(&self) -> &FacilityConfiguration {
        &self.facility
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }
}
