use anyhow::{Context, Result};
use aquaforge_schemas::{
    facility::FacilityConfiguration,
    file_formats::{FacilityFile, SpeciesFile},
    measurement::Measurement,
    species::{PhaseDurations, SpeciesDescriptor, StockingDensities},
};
use clap::Args;
use std::{fs, path::Path, sync::Arc};
use tracing::info;

/// A container for the static data of a planning run: the farmed species and the plant.
pub struct KnowledgeBase {
    pub species: Vec<Arc<SpeciesDescriptor>>,
    pub facility: FacilityConfiguration,
}

impl KnowledgeBase {
    /// Loads species from `species_path` (a YAML file or a directory of them) and the facility
    /// from `facility_path`, falling back to the built-in species and the reference plant.
    /// Overrides are applied last.
    pub fn load(
        species_path: Option<&Path>,
        facility_path: Option<&Path>,
        overrides: &FacilityOverrides,
    ) -> Result<Self> {
        let species = match species_path {
            Some(path) => {
                info!(path = %path.display(), "loading species");
                load_yaml_files_into_vec(path, |file: SpeciesFile| file.species)?
            }
            None => default_species(),
        };

        let mut facility = match facility_path {
            Some(path) => {
                info!(path = %path.display(), "loading facility configuration");
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read facility file: {:?}", path))?;
                let file: FacilityFile = serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
                file.facility
            }
            None => FacilityConfiguration::default(),
        };
        overrides.apply(&mut facility);

        info!(species = species.len(), "knowledge base loaded");
        Ok(Self {
            species: species.into_iter().map(Arc::new).collect(),
            facility,
        })
    }
}

/// Facility fields that can be overridden from the command line or the environment.
#[derive(Debug, Default, Args)]
pub struct FacilityOverrides {
    #[arg(long, env = "AQUAFORGE_LARVAL_TANKS_SMALL")]
    pub larval_tanks_small: Option<u32>,
    #[arg(long, env = "AQUAFORGE_LARVAL_TANKS_MEDIUM")]
    pub larval_tanks_medium: Option<u32>,
    #[arg(long, env = "AQUAFORGE_LARVAL_TANKS_LARGE")]
    pub larval_tanks_large: Option<u32>,
    #[arg(long, env = "AQUAFORGE_PREGROWTH_TANKS")]
    pub pregrowth_tanks: Option<u32>,
    #[arg(long, env = "AQUAFORGE_SITES")]
    pub sites: Option<u32>,
    #[arg(long, env = "AQUAFORGE_CAGES_PER_SITE")]
    pub cages_per_site: Option<u32>,
    #[arg(long, env = "AQUAFORGE_CAGE_VOLUME_M3")]
    pub cage_volume_m3: Option<u32>,
    #[arg(long, env = "AQUAFORGE_LAND_TANKS")]
    pub land_tanks: Option<u32>,
    #[arg(long, env = "AQUAFORGE_LAND_TANK_VOLUME_M3")]
    pub land_tank_volume_m3: Option<u32>,
    #[arg(long, env = "AQUAFORGE_LARVAL_SURVIVAL")]
    pub larval_survival: Option<f64>,
    #[arg(long, env = "AQUAFORGE_PREGROWTH_SURVIVAL")]
    pub pregrowth_survival: Option<f64>,
    #[arg(long, env = "AQUAFORGE_FATTENING_SURVIVAL")]
    pub fattening_survival: Option<f64>,
    #[arg(long, env = "AQUAFORGE_OPERATIONAL_EFFICIENCY")]
    pub operational_efficiency: Option<f64>,
    #[arg(long, env = "AQUAFORGE_ANNUAL_TARGET_TONNES")]
    pub annual_target_tonnes: Option<f64>,
}

impl FacilityOverrides {
    pub fn apply(&self, config: &mut FacilityConfiguration) {
        let hatchery = &mut config.hatchery;
        override_with(&mut hatchery.larval_tanks.small, self.larval_tanks_small);
        override_with(&mut hatchery.larval_tanks.medium, self.larval_tanks_medium);
        override_with(&mut hatchery.larval_tanks.large, self.larval_tanks_large);
        override_with(&mut hatchery.pregrowth_tanks, self.pregrowth_tanks);

        let grow_out = &mut config.grow_out;
        override_with(&mut grow_out.sites, self.sites);
        override_with(&mut grow_out.cages_per_site, self.cages_per_site);
        override_with(&mut grow_out.cage_volume_m3, self.cage_volume_m3);
        override_with(&mut grow_out.land_tanks, self.land_tanks);
        override_with(&mut grow_out.land_tank_volume_m3, self.land_tank_volume_m3);

        // Rates go through the setters so they stay clamped.
        let rates = &mut config.rates;
        if let Some(rate) = self.larval_survival {
            rates.set_larval_survival(rate);
        }
        if let Some(rate) = self.pregrowth_survival {
            rates.set_pregrowth_survival(rate);
        }
        if let Some(rate) = self.fattening_survival {
            rates.set_fattening_survival(rate);
        }
        if let Some(rate) = self.operational_efficiency {
            rates.set_operational_efficiency(rate);
        }

        override_with(&mut config.annual_capacity_target_tonnes, self.annual_target_tonnes);
    }
}

fn override_with<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn species(
    species_id: &str,
    species_name: &str,
    scientific_name: &str,
    densities: (u32, u32, u32),
    durations: (u32, u32, u32),
    commercial_grams: f64,
    optimal_celsius: f64,
) -> SpeciesDescriptor {
    SpeciesDescriptor {
        species_id: species_id.to_string(),
        species_name: species_name.to_string(),
        scientific_name: Some(scientific_name.to_string()),
        densities: StockingDensities {
            larval_per_litre: densities.0,
            pregrowth_per_m3: densities.1,
            fattening_per_m3: densities.2,
        },
        phase_durations: PhaseDurations {
            larval_days: durations.0,
            pregrowth_days: durations.1,
            fattening_days: durations.2,
        },
        fry_sale_weight: Measurement::new(2.0, "g"),
        commercial_weight: Measurement::new(commercial_grams, "g"),
        optimal_temperature: Measurement::new(optimal_celsius, "°C"),
    }
}

/// The three species raised by the reference plant, in processing order.
pub fn default_species() -> Vec<SpeciesDescriptor> {
    vec![
        // harvested at 350-400 g
        species(
            "SPC-SEABASS",
            "European sea bass",
            "Dicentrarchus labrax",
            (100, 400, 15),
            (40, 70, 450),
            380.0,
            18.0,
        ),
        // harvested at 300-350 g
        species(
            "SPC-SEABREAM",
            "Gilthead sea bream",
            "Sparus aurata",
            (120, 450, 18),
            (45, 65, 420),
            330.0,
            20.0,
        ),
        // larger fish, harvested at 800 g-1 kg
        species(
            "SPC-MEAGRE",
            "Meagre",
            "Argyrosomus regius",
            (80, 350, 12),
            (35, 80, 480),
            900.0,
            19.0,
        ),
    ]
}

/// Loads a YAML file, or every YAML file of a directory in file-name order, and
/// concatenates the items each one holds.
fn load_yaml_files_into_vec<P, F, E, T>(path: P, extract_vec: E) -> Result<Vec<T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., SpeciesFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
{
    let path = path.as_ref();
    let mut files = Vec::new();
    if path.is_dir() {
        for entry in fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {:?}", path))?
        {
            let file_path = entry?.path();
            if file_path.is_file()
                && file_path
                    .extension()
                    .map_or(false, |s| s == "yaml" || s == "yml")
            {
                files.push(file_path);
            }
        }
        files.sort();
    } else {
        files.push(path.to_path_buf());
    }

    let mut items = Vec::new();
    for file_path in files {
        let content = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {:?}", file_path))?;
        let file_wrapper: F = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", file_path))?;
        items.extend(extract_vec(file_wrapper));
    }
    Ok(items)
}
