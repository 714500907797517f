use crate::{error::AquaforgeError, schedule::ScheduleResult};
use aquaforge_schemas::facility::FacilityConfiguration;
use serde::{Deserialize, Serialize};
use tracing::info;

const DAYS_PER_YEAR: f64 = 365.0;

/// Side-by-side metrics for the sequential and overlapping schedules of one batch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub sequential_days: u32,
    pub overlapping_days: u32,
    /// Negative when overlap is slower, which normal parameters never produce.
    pub days_saved: i64,
    pub percent_saved: f64,
    /// Tonnes harvested by one pass through the batch list.
    pub tonnes_per_cycle: f64,
    pub commercial_fish_per_cycle: u64,
    /// Overlapping cycles that fit in a year of continuous operation, not rounded down.
    pub annual_cycles: f64,
    pub projected_annual_tonnes: f64,
    pub annual_target_tonnes: f64,
    pub target_attainment_pct: f64,
}

impl ComparisonReport {
    pub fn overlap_is_faster(&self) -> bool {
        self.days_saved > 0
    }
}

/// Compares both schedules and projects annual output from the overlapping cycle time.
///
/// The per-cycle harvest is taken from the sequential details; both policies yield the same
/// fish, only their timing differs.
///
/// # Errors
///
/// Returns `AquaforgeError::ZeroCycleTime` if either schedule has a total of zero days.
pub fn compare(
    sequential: &ScheduleResult,
    overlapping: &ScheduleResult,
    config: &FacilityConfiguration,
) -> Result<ComparisonReport, AquaforgeError> {
    for schedule in [sequential, overlapping] {
        if schedule.total_cycle_days == 0 {
            return Err(AquaforgeError::ZeroCycleTime(schedule.method.clone()));
        }
    }

    let sequential_days = sequential.total_cycle_days;
    let overlapping_days = overlapping.total_cycle_days;
    let days_saved = i64::from(sequential_days) - i64::from(overlapping_days);
    let percent_saved = days_saved as f64 / f64::from(sequential_days) * 100.0;

    let tonnes_per_cycle = sequential.total_tonnes();
    let annual_cycles = DAYS_PER_YEAR / f64::from(overlapping_days);
    let projected_annual_tonnes = tonnes_per_cycle * annual_cycles;
    let annual_target_tonnes = config.annual_capacity_target_tonnes;
    let target_attainment_pct = projected_annual_tonnes / annual_target_tonnes * 100.0;

    info!(
        days_saved,
        annual_cycles,
        projected_annual_tonnes,
        "schedules compared"
    );

    Ok(ComparisonReport {
        sequential_days,
        overlapping_days,
        days_saved,
        percent_saved,
        tonnes_per_cycle,
        commercial_fish_per_cycle: sequential.total_commercial_fish(),
        annual_cycles,
        projected_annual_tonnes,
        annual_target_tonnes,
        target_attainment_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{test_support::reference_batches, SchedulingPolicy};

    fn reference_schedules() -> (ScheduleResult, ScheduleResult) {
        let config = FacilityConfiguration::default();
        let batches = reference_batches();
        (
            SchedulingPolicy::Sequential.schedule(&batches, &config).unwrap(),
            SchedulingPolicy::Overlapping.schedule(&batches, &config).unwrap(),
        )
    }

    #[test]
    fn savings_and_projection() {
        let config = FacilityConfiguration::default();
        let (sequential, overlapping) = reference_schedules();
        let report = compare(&sequential, &overlapping, &config).unwrap();

        assert_eq!(report.sequential_days, 1685);
        assert_eq!(report.overlapping_days, 680);
        assert_eq!(report.days_saved, 1005);
        assert!(report.overlap_is_faster());
        assert!((report.percent_saved - 1005.0 / 1685.0 * 100.0).abs() < 1e-9);
        assert!((report.annual_cycles - 365.0 / 680.0).abs() < 1e-12);

        let expected = sequential.total_tonnes() * 365.0 / 680.0;
        assert!((report.projected_annual_tonnes - expected).abs() < 1e-9);
        assert!((report.target_attainment_pct - expected / 4500.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_cycle_time_is_rejected() {
        let config = FacilityConfiguration::default();
        let (sequential, mut overlapping) = reference_schedules();
        overlapping.total_cycle_days = 0;
        assert!(matches!(
            compare(&sequential, &overlapping, &config),
            Err(AquaforgeError::ZeroCycleTime(_))
        ));
    }

    #[test]
    fn slower_overlap_reports_negative_savings() {
        let config = FacilityConfiguration::default();
        let (mut sequential, overlapping) = reference_schedules();
        sequential.total_cycle_days = 600;
        let report = compare(&sequential, &overlapping, &config).unwrap();
        assert_eq!(report.days_saved, -80);
        assert!(!report.overlap_is_faster());
    }
}
