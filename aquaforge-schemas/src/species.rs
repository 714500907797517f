//! Defines the data structures for representing a farmed fish species in the AquaForge
//! knowledge base. A species carries the stocking densities and phase durations that drive
//! resource and timeline calculations, plus a few informational attributes.

use crate::measurement::Measurement;
use serde::{Deserialize, Serialize};

/// Number of days a cohort spends in each rearing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    /// Days in the hatchery larval tanks.
    pub larval_days: u32,
    /// Days in the pre-growth tanks, until the fry reach about 2 g.
    pub pregrowth_days: u32,
    /// Days in sea cages until commercial size.
    pub fattening_days: u32,
}

impl PhaseDurations {
    /// Saturates at `u32::MAX`.
    pub fn total_days(&self) -> u32 {
        self.larval_days
            .saturating_add(self.pregrowth_days)
            .saturating_add(self.fattening_days)
    }

    /// `None` when the cycle does not fit in a `u32` day count.
    pub fn checked_total_days(&self) -> Option<u32> {
        self.larval_days
            .checked_add(self.pregrowth_days)?
            .checked_add(self.fattening_days)
    }
}

/// Stocking densities for each rearing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockingDensities {
    /// Larvae seeded per litre of larval tank volume.
    pub larval_per_litre: u32,
    /// Fry per m³ in pre-growth. Informational: pre-growth tanks use a fixed welfare density.
    pub pregrowth_per_m3: u32,
    /// Fish per m³ of cage volume during fattening.
    pub fattening_per_m3: u32,
}

/// The top-level struct representing a complete species definition in the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDescriptor {
    pub species_id: String,
    pub species_name: String,
    pub scientific_name: Option<String>,
    pub densities: StockingDensities,
    pub phase_durations: PhaseDurations,
    /// Weight at which fry are sold or transferred out of the hatchery.
    pub fry_sale_weight: Measurement<f64>,
    /// Target harvest weight, used to convert fish counts into tonnes.
    pub commercial_weight: Measurement<f64>,
    /// Not used by any calculation.
    pub optimal_temperature: Measurement<f64>,
}

impl SpeciesDescriptor {
    /// Full label used in reports, e.g. "Gilthead sea bream (Sparus aurata)".
    pub fn display_name(&self) -> String {
        match &self.scientific_name {
            Some(scientific) => format!("{} ({})", self.species_name, scientific),
            None => self.species_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEAGRE_JSON: &str = r#"{
        "species_id": "SPC-MEAGRE",
        "species_name": "Meagre",
        "scientific_name": null,
        "densities": { "larval_per_litre": 80, "pregrowth_per_m3": 350, "fattening_per_m3": 12 },
        "phase_durations": { "larval_days": 35, "pregrowth_days": 80, "fattening_days": 480 },
        "fry_sale_weight": { "value": 2.0, "unit": "g" },
        "commercial_weight": { "value": 900.0, "unit": "g" },
        "optimal_temperature": { "value": 19.0, "unit": "C" }
    }"#;

    #[test]
    fn display_name_without_scientific_name() {
        let mut meagre: SpeciesDescriptor = serde_json::from_str(MEAGRE_JSON).unwrap();
        assert_eq!(meagre.display_name(), "Meagre");
        assert_eq!(meagre.phase_durations.total_days(), 595);

        meagre.scientific_name = Some("Argyrosomus regius".to_string());
        assert_eq!(meagre.display_name(), "Meagre (Argyrosomus regius)");
    }

    #[test]
    fn overlong_cycle_has_no_checked_total() {
        let durations = PhaseDurations {
            larval_days: 2_000_000_000,
            pregrowth_days: 2_000_000_000,
            fattening_days: 2_000_000_000,
        };
        assert_eq!(durations.checked_total_days(), None);
        assert_eq!(durations.total_days(), u32::MAX);
    }
}
