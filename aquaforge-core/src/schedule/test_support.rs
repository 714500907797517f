use aquaforge_schemas::{
    batch::Batch,
    measurement::Measurement,
    species::{PhaseDurations, SpeciesDescriptor, StockingDensities},
};
use std::sync::Arc;

pub fn species_with(
    id: &str,
    (larval_days, pregrowth_days, fattening_days): (u32, u32, u32),
    larval_per_litre: u32,
    fattening_per_m3: u32,
) -> SpeciesDescriptor {
    SpeciesDescriptor {
        species_id: id.to_string(),
        species_name: id.to_string(),
        scientific_name: None,
        densities: StockingDensities {
            larval_per_litre,
            pregrowth_per_m3: 400,
            fattening_per_m3,
        },
        phase_durations: PhaseDurations {
            larval_days,
            pregrowth_days,
            fattening_days,
        },
        fry_sale_weight: Measurement::new(2.0, "g"),
        commercial_weight: Measurement::new(380.0, "g"),
        optimal_temperature: Measurement::new(18.0, "°C"),
    }
}

pub fn sea_bass() -> SpeciesDescriptor {
    species_with("sea-bass", (40, 70, 450), 100, 15)
}

pub fn sea_bream() -> SpeciesDescriptor {
    let mut species = species_with("sea-bream", (45, 65, 420), 120, 18);
    species.commercial_weight.value = 330.0;
    species
}

pub fn meagre() -> SpeciesDescriptor {
    let mut species = species_with("meagre", (35, 80, 480), 80, 12);
    species.commercial_weight.value = 900.0;
    species
}

/// Sea bass, sea bream and meagre, in that order.
pub fn reference_batches() -> Vec<Batch> {
    vec![
        Batch::new(Arc::new(sea_bass()), 1_200_000),
        Batch::new(Arc::new(sea_bream()), 1_800_000),
        Batch::new(Arc::new(meagre()), 2_400_000),
    ]
}
