//! Places batches on a production timeline under one of two policies and collects the
//! per-batch results.
//!
//! The yield math is shared ([`batch_yield::compute_batch_yield`]); a policy only decides
//! where each batch sits in time and how the schedule's total cycle time is derived.

pub mod batch_yield;
pub mod overlapping;
pub mod sequential;

#[cfg(test)]
pub(crate) mod test_support;

use crate::error::AquaforgeError;
use aquaforge_schemas::{batch::Batch, facility::FacilityConfiguration, species::PhaseDurations};
use batch_yield::{compute_batch_yield, round_decimal, BatchYield};
use overlapping::OverlappingTimeline;
use sequential::SequentialTimeline;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Absolute day markers of one batch, counted from day 0 of the programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimeline {
    pub start_day: u32,
    pub larval_end_day: u32,
    pub pregrowth_end_day: u32,
    pub fattening_end_day: u32,
}

impl PhaseTimeline {
    /// Chains the phase end days from `start_day`, or `None` if a day overflows `u32`.
    pub fn starting_at(start_day: u32, durations: &PhaseDurations) -> Option<Self> {
        let larval_end_day = start_day.checked_add(durations.larval_days)?;
        let pregrowth_end_day = larval_end_day.checked_add(durations.pregrowth_days)?;
        Some(Self {
            start_day,
            larval_end_day,
            pregrowth_end_day,
            fattening_end_day: pregrowth_end_day.checked_add(durations.fattening_days)?,
        })
    }
}

/// Phases whose requirement exceeded the installed units and was clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityFlags {
    pub larval_tanks: bool,
    pub pregrowth_tanks: bool,
    pub fattening_cages: bool,
}

impl CapacityFlags {
    pub fn any(&self) -> bool {
        self.larval_tanks || self.pregrowth_tanks || self.fattening_cages
    }
}

/// Output record for one batch under one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDetail {
    pub species_name: String,
    pub larvae_seeded: u64,
    pub larval_tanks: u32,
    pub pregrowth_tanks: u32,
    pub fattening_cages: u32,
    pub larval_days: u32,
    pub pregrowth_days: u32,
    pub fattening_days: u32,
    pub total_days: u32,
    pub larval_survivors: u64,
    pub fry_produced: u64,
    pub commercial_fish: u64,
    pub tonnes_produced: f64,
    pub overall_survival_pct: f64,
    pub over_capacity: CapacityFlags,
    /// Only the overlapping policy places batches on absolute days.
    pub timeline: Option<PhaseTimeline>,
}

impl BatchDetail {
    fn new(batch: &Batch, yielded: BatchYield, timeline: Option<PhaseTimeline>) -> Self {
        Self {
            species_name: batch.species().display_name(),
            larvae_seeded: batch.larvae_count(),
            larval_tanks: yielded.larval_tanks.allocated,
            pregrowth_tanks: yielded.pregrowth_tanks.allocated,
            fattening_cages: yielded.fattening_cages.allocated,
            larval_days: yielded.durations.larval_days,
            pregrowth_days: yielded.durations.pregrowth_days,
            fattening_days: yielded.durations.fattening_days,
            total_days: yielded.durations.total_days(),
            larval_survivors: yielded.larval_survivors,
            fry_produced: yielded.fry_produced,
            commercial_fish: yielded.commercial_fish,
            tonnes_produced: yielded.tonnes_produced,
            overall_survival_pct: yielded.overall_survival_pct,
            over_capacity: CapacityFlags {
                larval_tanks: yielded.larval_tanks.is_over_capacity(),
                pregrowth_tanks: yielded.pregrowth_tanks.is_over_capacity(),
                fattening_cages: yielded.fattening_cages.is_over_capacity(),
            },
            timeline,
        }
    }
}

/// The complete outcome of scheduling a batch list under one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub policy: SchedulingPolicy,
    pub method: String,
    pub details: Vec<BatchDetail>,
    pub total_cycle_days: u32,
}

impl ScheduleResult {
    pub fn total_tonnes(&self) -> f64 {
        self.details.iter().map(|d| d.tonnes_produced).sum()
    }

    pub fn total_commercial_fish(&self) -> u64 {
        self.details.iter().map(|d| d.commercial_fish).sum()
    }

    pub fn total_larvae_seeded(&self) -> u64 {
        self.details.iter().map(|d| d.larvae_seeded).sum()
    }

    /// Commercial fish over larvae seeded across every batch, in percent, to one decimal.
    /// Zero for a schedule without larvae.
    pub fn programme_survival_pct(&self) -> f64 {
        let larvae = self.total_larvae_seeded();
        if larvae == 0 {
            return 0.0;
        }
        round_decimal(self.total_commercial_fish() as f64 / larvae as f64 * 100.0, 1)
    }
}

/// A placement ran past the last representable day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOverflow;

/// Decides where a batch sits in time and accumulates the schedule's cycle time.
pub trait Timeline {
    /// Places the next batch and returns its absolute markers, if the policy tracks them.
    ///
    /// Returns [`DayOverflow`] when the batch would end past `u32::MAX` days.
    fn place(&mut self, durations: &PhaseDurations) -> Result<Option<PhaseTimeline>, DayOverflow>;

    fn total_days(&self) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// One batch at a time, from hatching to commercial size.
    Sequential,
    /// A batch starts as soon as the previous one leaves the larval tanks.
    Overlapping,
}

impl SchedulingPolicy {
    pub const ALL: [SchedulingPolicy; 2] = [SchedulingPolicy::Sequential, SchedulingPolicy::Overlapping];

    pub fn label(&self) -> &'static str {
        match self {
            SchedulingPolicy::Sequential => "Sequential (hatching to commercial size)",
            SchedulingPolicy::Overlapping => "Integrated overlapping (simultaneous multi-batch)",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            SchedulingPolicy::Sequential => "sequential",
            SchedulingPolicy::Overlapping => "overlapping",
        }
    }

    /// Schedules the batches in input order.
    ///
    /// # Errors
    ///
    /// Fails on an empty batch list or a batch without larvae.
    pub fn schedule(
        &self,
        batches: &[Batch],
        config: &FacilityConfiguration,
    ) -> Result<ScheduleResult, AquaforgeError> {
        match self {
            SchedulingPolicy::Sequential => {
                run_schedule(*self, SequentialTimeline::default(), batches, config)
            }
            SchedulingPolicy::Overlapping => {
                run_schedule(*self, OverlappingTimeline::default(), batches, config)
            }
        }
    }
}

fn run_schedule<T: Timeline>(
    policy: SchedulingPolicy,
    mut timeline: T,
    batches: &[Batch],
    config: &FacilityConfiguration,
) -> Result<ScheduleResult, AquaforgeError> {
    if batches.is_empty() {
        return Err(AquaforgeError::NoBatchProvided);
    }

    let mut details = Vec::with_capacity(batches.len());
    for batch in batches {
        let yielded = compute_batch_yield(batch, config)?;
        let placed = timeline
            .place(&yielded.durations)
            .map_err(|DayOverflow| AquaforgeError::CycleTimeOverflow(policy.label().to_string()))?;
        let detail = BatchDetail::new(batch, yielded, placed);
        debug!(
            policy = policy.slug(),
            species = %detail.species_name,
            larvae = detail.larvae_seeded,
            commercial_fish = detail.commercial_fish,
            total_days = detail.total_days,
            "batch scheduled"
        );
        if detail.over_capacity.any() {
            debug!(species = %detail.species_name, flags = ?detail.over_capacity, "requirement clamped to installed capacity");
        }
        details.push(detail);
    }

    let result = ScheduleResult {
        policy,
        method: policy.label().to_string(),
        details,
        total_cycle_days: timeline.total_days(),
    };
    info!(
        policy = policy.slug(),
        batches = result.details.len(),
        total_cycle_days = result.total_cycle_days,
        "schedule complete"
    );
    Ok(result)
}
