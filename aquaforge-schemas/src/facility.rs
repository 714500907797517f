//! Static description of the production group: hatchery tanks, grow-out sites and the
//! survival and efficiency rates applied to every batch.
//!
//! Every section implements `Default` with the reference plant figures, and every field is
//! `#[serde(default)]`, so a facility file only has to list the values it changes.

use serde::{Deserialize, Serialize};

/// Larval tanks grouped by size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LarvalTankCounts {
    /// 2-5 m³ tanks.
    pub small: u32,
    /// 10 m³ tanks.
    pub medium: u32,
    /// 20 m³ tanks.
    pub large: u32,
}

impl Default for LarvalTankCounts {
    fn default() -> Self {
        Self {
            small: 30,
            medium: 25,
            large: 10,
        }
    }
}

impl LarvalTankCounts {
    /// Saturates at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.small.saturating_add(self.medium).saturating_add(self.large)
    }

    /// `None` when the tank count does not fit in a `u32`.
    pub fn checked_total(&self) -> Option<u32> {
        self.small.checked_add(self.medium)?.checked_add(self.large)
    }
}

/// Tanks available in the hatchery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HatcheryCapacity {
    pub larval_tanks: LarvalTankCounts,
    /// 40 m³ tanks holding fry up to about 2 g.
    pub pregrowth_tanks: u32,
}

impl Default for HatcheryCapacity {
    fn default() -> Self {
        Self {
            larval_tanks: LarvalTankCounts::default(),
            pregrowth_tanks: 40,
        }
    }
}

/// Fattening sites: sea cages plus one land-based tank farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowOutCapacity {
    pub sites: u32,
    pub cages_per_site: u32,
    pub cage_volume_m3: u32,
    /// Land-based tanks are part of the plant but are not allocated by the planner.
    pub land_tanks: u32,
    pub land_tank_volume_m3: u32,
}

impl Default for GrowOutCapacity {
    fn default() -> Self {
        Self {
            sites: 6,
            cages_per_site: 20,
            cage_volume_m3: 1000,
            land_tanks: 50,
            land_tank_volume_m3: 200,
        }
    }
}

impl GrowOutCapacity {
    /// Saturates at `u32::MAX`.
    pub fn total_cages(&self) -> u32 {
        self.cages_per_site.saturating_mul(self.sites)
    }

    pub fn checked_total_cages(&self) -> Option<u32> {
        self.cages_per_site.checked_mul(self.sites)
    }
}

/// Clamps a rate into `[0, 1]`. NaN is treated as zero.
pub fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

/// Survival and efficiency fractions, always within `[0, 1]`.
///
/// Fields are private so that every write path goes through the clamping setters,
/// deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProductionRates")]
pub struct ProductionRates {
    larval_survival: f64,
    pregrowth_survival: f64,
    fattening_survival: f64,
    operational_efficiency: f64,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawProductionRates {
    larval_survival: f64,
    pregrowth_survival: f64,
    fattening_survival: f64,
    operational_efficiency: f64,
}

impl Default for RawProductionRates {
    fn default() -> Self {
        Self {
            larval_survival: 0.70,
            pregrowth_survival: 0.90,
            fattening_survival: 0.95,
            operational_efficiency: 0.85,
        }
    }
}

impl From<RawProductionRates> for ProductionRates {
    fn from(raw: RawProductionRates) -> Self {
        Self::new(
            raw.larval_survival,
            raw.pregrowth_survival,
            raw.fattening_survival,
            raw.operational_efficiency,
        )
    }
}

impl Default for ProductionRates {
    fn default() -> Self {
        RawProductionRates::default().into()
    }
}

impl ProductionRates {
    pub fn new(
        larval_survival: f64,
        pregrowth_survival: f64,
        fattening_survival: f64,
        operational_efficiency: f64,
    ) -> Self {
        Self {
            larval_survival: clamp_rate(larval_survival),
            pregrowth_survival: clamp_rate(pregrowth_survival),
            fattening_survival: clamp_rate(fattening_survival),
            operational_efficiency: clamp_rate(operational_efficiency),
        }
    }

    pub fn larval_survival(&self) -> f64 {
        self.larval_survival
    }

    pub fn pregrowth_survival(&self) -> f64 {
        self.pregrowth_survival
    }

    pub fn fattening_survival(&self) -> f64 {
        self.fattening_survival
    }

    pub fn operational_efficiency(&self) -> f64 {
        self.operational_efficiency
    }

    pub fn set_larval_survival(&mut self, rate: f64) {
        self.larval_survival = clamp_rate(rate);
    }

    pub fn set_pregrowth_survival(&mut self, rate: f64) {
        self.pregrowth_survival = clamp_rate(rate);
    }

    pub fn set_fattening_survival(&mut self, rate: f64) {
        self.fattening_survival = clamp_rate(rate);
    }

    pub fn set_operational_efficiency(&mut self, rate: f64) {
        self.operational_efficiency = clamp_rate(rate);
    }
}

/// The top-level facility record, loaded once per run and passed by reference everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfiguration {
    pub hatchery: HatcheryCapacity,
    pub grow_out: GrowOutCapacity,
    pub rates: ProductionRates,
    pub annual_capacity_target_tonnes: f64,
    pub certifications: Vec<String>,
}

impl Default for FacilityConfiguration {
    fn default() -> Self {
        Self {
            hatchery: HatcheryCapacity::default(),
            grow_out: GrowOutCapacity::default(),
            rates: ProductionRates::default(),
            annual_capacity_target_tonnes: 4500.0,
            certifications: vec![
                "Global GAP".to_string(),
                "Antibiotic Free".to_string(),
                "IFS Food".to_string(),
            ],
        }
    }
}

impl FacilityConfiguration {
    pub fn total_larval_tanks(&self) -> u32 {
        self.hatchery.larval_tanks.total()
    }

    pub fn total_cages(&self) -> u32 {
        self.grow_out.total_cages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_plant() {
        let config = FacilityConfiguration::default();
        assert_eq!(config.total_larval_tanks(), 65);
        assert_eq!(config.hatchery.pregrowth_tanks, 40);
        assert_eq!(config.total_cages(), 120);
        assert_eq!(config.rates.larval_survival(), 0.70);
        assert_eq!(config.rates.operational_efficiency(), 0.85);
        assert_eq!(config.annual_capacity_target_tonnes, 4500.0);
    }

    #[test]
    fn setters_clamp_into_unit_interval() {
        let mut rates = ProductionRates::default();
        rates.set_larval_survival(1.7);
        rates.set_pregrowth_survival(-0.2);
        rates.set_fattening_survival(f64::NAN);
        rates.set_operational_efficiency(0.5);

        assert_eq!(rates.larval_survival(), 1.0);
        assert_eq!(rates.pregrowth_survival(), 0.0);
        assert_eq!(rates.fattening_survival(), 0.0);
        assert_eq!(rates.operational_efficiency(), 0.5);
    }

    #[test]
    fn partial_yaml_keeps_defaults_and_clamps_rates() {
        let yaml = r#"
hatchery:
  pregrowth_tanks: 12
rates:
  larval_survival: 1.4
"#;
        let config: FacilityConfiguration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.hatchery.pregrowth_tanks, 12);
        assert_eq!(config.hatchery.larval_tanks.total(), 65);
        assert_eq!(config.rates.larval_survival(), 1.0);
        assert_eq!(config.rates.pregrowth_survival(), 0.90);
        assert_eq!(config.grow_out.cage_volume_m3, 1000);
    }

    #[test]
    fn oversized_totals_saturate() {
        let mut config = FacilityConfiguration::default();
        config.grow_out.sites = 100_000;
        config.grow_out.cages_per_site = 100_000;
        assert_eq!(config.grow_out.checked_total_cages(), None);
        assert_eq!(config.total_cages(), u32::MAX);

        config.hatchery.larval_tanks.small = u32::MAX;
        assert_eq!(config.hatchery.larval_tanks.checked_total(), None);
        assert_eq!(config.total_larval_tanks(), u32::MAX);
    }
}
