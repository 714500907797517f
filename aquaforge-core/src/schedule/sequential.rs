use super::{DayOverflow, PhaseTimeline, Timeline};
use aquaforge_schemas::species::PhaseDurations;

/// The facility is dedicated to one batch at a time, so cycle times add up.
#[derive(Debug, Default)]
pub struct SequentialTimeline {
    elapsed_days: u32,
}

impl Timeline for SequentialTimeline {
    fn place(&mut self, durations: &PhaseDurations) -> Result<Option<PhaseTimeline>, DayOverflow> {
        self.elapsed_days = durations
            .checked_total_days()
            .and_then(|days| self.elapsed_days.checked_add(days))
            .ok_or(DayOverflow)?;
        Ok(None)
    }

    fn total_days(&self) -> u32 {
        self.elapsed_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{
        test_support::{meagre, reference_batches, sea_bass, sea_bream},
        SchedulingPolicy,
    };
    use aquaforge_schemas::{batch::Batch, facility::FacilityConfiguration};
    use std::sync::Arc;

    #[test]
    fn totals_are_summed_across_batches() {
        let config = FacilityConfiguration::default();
        let result = SchedulingPolicy::Sequential
            .schedule(&reference_batches(), &config)
            .unwrap();

        // 560 + 530 + 595
        assert_eq!(result.total_cycle_days, 1685);
        let totals: Vec<u32> = result.details.iter().map(|d| d.total_days).collect();
        assert_eq!(totals, vec![560, 530, 595]);
        assert!(result.details.iter().all(|d| d.timeline.is_none()));
        assert_eq!(result.method, SchedulingPolicy::Sequential.label());
    }

    #[test]
    fn order_is_preserved_and_total_is_order_independent() {
        let config = FacilityConfiguration::default();
        let reversed = vec![
            Batch::new(Arc::new(meagre()), 2_400_000),
            Batch::new(Arc::new(sea_bream()), 1_800_000),
            Batch::new(Arc::new(sea_bass()), 1_200_000),
        ];
        let forward = SchedulingPolicy::Sequential
            .schedule(&reference_batches(), &config)
            .unwrap();
        let backward = SchedulingPolicy::Sequential.schedule(&reversed, &config).unwrap();

        assert_eq!(forward.total_cycle_days, backward.total_cycle_days);
        assert_eq!(backward.details[0].species_name, "meagre");
        assert_eq!(backward.details[2].species_name, "sea-bass");
    }

    #[test]
    fn timeline_accumulates_without_markers() {
        let mut timeline = SequentialTimeline::default();
        let durations = sea_bass().phase_durations;
        assert_eq!(timeline.place(&durations), Ok(None));
        assert_eq!(timeline.place(&durations), Ok(None));
        assert_eq!(timeline.total_days(), 1120);
    }

    #[test]
    fn elapsed_days_do_not_wrap() {
        let mut timeline = SequentialTimeline {
            elapsed_days: u32::MAX - 100,
        };
        assert_eq!(timeline.place(&sea_bass().phase_durations), Err(DayOverflow));
        assert_eq!(timeline.total_days(), u32::MAX - 100);
    }
}
