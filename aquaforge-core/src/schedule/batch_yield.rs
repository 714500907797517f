use crate::{
    error::AquaforgeError,
    resources::{self, ResourceRequirement},
};
use aquaforge_schemas::{batch::Batch, facility::FacilityConfiguration, species::PhaseDurations};

const GRAMS_PER_TONNE: f64 = 1_000_000.0;

/// Resources, head counts and output of one batch, independent of where it sits on a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchYield {
    pub larval_tanks: ResourceRequirement,
    pub pregrowth_tanks: ResourceRequirement,
    pub fattening_cages: ResourceRequirement,
    pub durations: PhaseDurations,
    pub larval_survivors: u64,
    /// Fry leaving pre-growth at about 2 g.
    pub fry_produced: u64,
    pub commercial_fish: u64,
    /// Rounded to two decimals, so schedule totals add up the reported figures.
    pub tonnes_produced: f64,
    /// Commercial fish over larvae seeded, in percent, rounded to one decimal.
    pub overall_survival_pct: f64,
}

fn survivors(count: u64, rates: &[f64]) -> u64 {
    rates
        .iter()
        .fold(count as f64, |heads, rate| heads * rate)
        .floor() as u64
}

/// Rounds to `places` decimals from the exact binary value, with exact ties going to the
/// even digit: 50.25 gives 50.2, and 0.15 (stored just below 0.15) gives 0.1.
pub fn round_decimal(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Runs a batch through the larval, pre-growth and fattening phases.
///
/// Larval survival is scaled by the operational efficiency; the later phases apply their
/// survival rate alone. Each head count is floored before it feeds the next phase.
///
/// # Errors
///
/// Returns `AquaforgeError::ZeroLarvae` when the batch has no larvae, since the overall
/// survival percentage is undefined.
pub fn compute_batch_yield(
    batch: &Batch,
    config: &FacilityConfiguration,
) -> Result<BatchYield, AquaforgeError> {
    let species = batch.species();
    let larvae = batch.larvae_count();
    if larvae == 0 {
        return Err(AquaforgeError::ZeroLarvae(species.species_name.clone()));
    }
    let rates = &config.rates;

    let larval_tanks = resources::larval_tanks_required(batch, config);
    let larval_survivors = survivors(
        larvae,
        &[rates.larval_survival(), rates.operational_efficiency()],
    );

    let pregrowth_tanks = resources::pregrowth_tanks_required(larval_survivors, config);
    let fry_produced = survivors(larval_survivors, &[rates.pregrowth_survival()]);

    let fattening_cages = resources::fattening_cages_required(fry_produced, species, config);
    let commercial_fish = survivors(fry_produced, &[rates.fattening_survival()]);

    let tonnes_produced = round_decimal(
        commercial_fish as f64 * species.commercial_weight.value / GRAMS_PER_TONNE,
        2,
    );
    let overall_survival_pct = round_decimal(commercial_fish as f64 / larvae as f64 * 100.0, 1);

    Ok(BatchYield {
        larval_tanks,
        pregrowth_tanks,
        fattening_cages,
        durations: species.phase_durations,
        larval_survivors,
        fry_produced,
        commercial_fish,
        tonnes_produced,
        overall_survival_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::test_support::sea_bass;
    use std::sync::Arc;

    #[test]
    fn yield_follows_reference_rates() {
        let config = FacilityConfiguration::default();
        let batch = Batch::new(Arc::new(sea_bass()), 1_200_000);

        let result = compute_batch_yield(&batch, &config).unwrap();
        // 1_200_000 * 0.70 * 0.85 = 714_000
        assert_eq!(result.larval_survivors, 714_000);
        assert_eq!(result.fry_produced, 642_600);
        assert_eq!(result.commercial_fish, 610_470);
        // 610_470 fish at 380 g = 231.9786 t
        assert_eq!(result.tonnes_produced, 231.98);
        assert_eq!(result.overall_survival_pct, 50.9);
        assert_eq!(result.larval_tanks.allocated, 2);
        assert_eq!(result.pregrowth_tanks.allocated, 40);
        assert_eq!(result.fattening_cages.allocated, 43);
        assert_eq!(result.durations.total_days(), 560);
    }

    #[test]
    fn zero_larvae_is_rejected() {
        let config = FacilityConfiguration::default();
        let batch = Batch::new(Arc::new(sea_bass()), 0);
        assert!(matches!(
            compute_batch_yield(&batch, &config),
            Err(AquaforgeError::ZeroLarvae(_))
        ));
    }

    #[test]
    fn perfect_survival_keeps_every_larva() {
        let mut config = FacilityConfiguration::default();
        config.rates.set_larval_survival(1.0);
        config.rates.set_pregrowth_survival(1.0);
        config.rates.set_fattening_survival(1.0);
        config.rates.set_operational_efficiency(1.0);
        let batch = Batch::new(Arc::new(sea_bass()), 1_000);

        let result = compute_batch_yield(&batch, &config).unwrap();
        assert_eq!(result.commercial_fish, 1_000);
        assert_eq!(result.overall_survival_pct, 100.0);
    }

    #[test]
    fn rounding_uses_exact_value_and_even_ties() {
        assert_eq!(round_decimal(50.87, 1), 50.9);
        assert_eq!(round_decimal(50.84, 1), 50.8);
        assert_eq!(round_decimal(0.0, 1), 0.0);
        assert_eq!(round_decimal(50.25, 1), 50.2);
        assert_eq!(round_decimal(50.75, 1), 50.8);
        assert_eq!(round_decimal(0.15, 1), 0.1);
        assert_eq!(round_decimal(0.35, 1), 0.3);
        assert_eq!(round_decimal(2.675, 2), 2.67);
        assert_eq!(round_decimal(231.9786, 2), 231.98);
        assert!(round_decimal(f64::NAN, 1).is_nan());
    }

    #[test]
    fn schedule_totals_add_rounded_tonnes() {
        let config = FacilityConfiguration::default();
        let batches = crate::schedule::test_support::reference_batches();
        let tonnes: Vec<f64> = batches
            .iter()
            .map(|b| compute_batch_yield(b, &config).unwrap().tonnes_produced)
            .collect();
        // 302.18265 t of bream and 1098.846 t of meagre before rounding
        assert_eq!(tonnes, vec![231.98, 302.18, 1098.85]);

        let schedule = crate::schedule::SchedulingPolicy::Sequential
            .schedule(&batches, &config)
            .unwrap();
        assert_eq!(schedule.total_tonnes(), 231.98 + 302.18 + 1098.85);
    }
}
