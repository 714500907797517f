use super::{DayOverflow, PhaseTimeline, Timeline};
use aquaforge_schemas::species::PhaseDurations;

/// Pipelines batches through the hatchery.
///
/// Only larval-tank turnover gates the next batch: it starts on the day the previous batch
/// leaves the larval tanks, while that batch carries on through pre-growth and fattening.
/// Contention for pre-growth tanks or cages between concurrent batches is not checked.
#[derive(Debug, Default)]
pub struct OverlappingTimeline {
    next_start_day: u32,
    completion_day: u32,
}

impl Timeline for OverlappingTimeline {
    fn place(&mut self, durations: &PhaseDurations) -> Result<Option<PhaseTimeline>, DayOverflow> {
        let placed = PhaseTimeline::starting_at(self.next_start_day, durations).ok_or(DayOverflow)?;
        self.next_start_day = placed.larval_end_day;
        self.completion_day = self.completion_day.max(placed.fattening_end_day);
        Ok(Some(placed))
    }

    fn total_days(&self) -> u32 {
        self.completion_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{
        test_support::{reference_batches, sea_bass},
        SchedulingPolicy,
    };
    use aquaforge_schemas::{batch::Batch, facility::FacilityConfiguration};
    use std::sync::Arc;

    #[test]
    fn next_batch_starts_when_larval_tanks_free_up() {
        let config = FacilityConfiguration::default();
        let result = SchedulingPolicy::Overlapping
            .schedule(&reference_batches(), &config)
            .unwrap();

        let starts: Vec<u32> = result
            .details
            .iter()
            .map(|d| d.timeline.unwrap().start_day)
            .collect();
        assert_eq!(starts, vec![0, 40, 85]);

        let ends: Vec<u32> = result
            .details
            .iter()
            .map(|d| d.timeline.unwrap().fattening_end_day)
            .collect();
        assert_eq!(ends, vec![560, 570, 680]);
        assert_eq!(result.total_cycle_days, 680);
    }

    #[test]
    fn phase_markers_chain_within_a_batch() {
        let mut timeline = OverlappingTimeline::default();
        let placed = timeline.place(&sea_bass().phase_durations).unwrap().unwrap();
        assert_eq!(
            placed,
            PhaseTimeline {
                start_day: 0,
                larval_end_day: 40,
                pregrowth_end_day: 110,
                fattening_end_day: 560,
            }
        );
    }

    #[test]
    fn single_batch_matches_sequential_total() {
        let config = FacilityConfiguration::default();
        let batches = vec![Batch::new(Arc::new(sea_bass()), 1_500_000)];
        let sequential = SchedulingPolicy::Sequential.schedule(&batches, &config).unwrap();
        let overlapping = SchedulingPolicy::Overlapping.schedule(&batches, &config).unwrap();
        assert_eq!(sequential.total_cycle_days, overlapping.total_cycle_days);
    }

    #[test]
    fn earlier_long_batch_can_finish_last() {
        let mut timeline = OverlappingTimeline::default();
        let long = PhaseDurations {
            larval_days: 10,
            pregrowth_days: 10,
            fattening_days: 500,
        };
        let short = PhaseDurations {
            larval_days: 10,
            pregrowth_days: 10,
            fattening_days: 10,
        };
        timeline.place(&long).unwrap();
        timeline.place(&short).unwrap();
        assert_eq!(timeline.total_days(), 520);
    }

    #[test]
    fn late_start_past_day_counter_is_refused() {
        let mut timeline = OverlappingTimeline {
            next_start_day: u32::MAX - 10,
            completion_day: u32::MAX - 10,
        };
        assert_eq!(timeline.place(&sea_bass().phase_durations), Err(DayOverflow));
        assert_eq!(timeline.total_days(), u32::MAX - 10);
    }
}
