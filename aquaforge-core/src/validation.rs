use crate::error::AquaforgeError;
use aquaforge_schemas::{facility::FacilityConfiguration, species::SpeciesDescriptor};

fn invalid_species(species: &SpeciesDescriptor, reason: &str) -> AquaforgeError {
    AquaforgeError::InvalidSpecies {
        species: species.species_id.clone(),
        reason: reason.to_string(),
    }
}

/// Densities and phase durations must be strictly positive, as must the commercial weight.
pub fn validate_species(species: &SpeciesDescriptor) -> Result<(), AquaforgeError> {
    let densities = &species.densities;
    if densities.larval_per_litre == 0
        || densities.pregrowth_per_m3 == 0
        || densities.fattening_per_m3 == 0
    {
        return Err(invalid_species(species, "stocking densities must be positive"));
    }

    let durations = &species.phase_durations;
    if durations.larval_days == 0 || durations.pregrowth_days == 0 || durations.fattening_days == 0 {
        return Err(invalid_species(species, "phase durations must be positive"));
    }
    if durations.checked_total_days().is_none() {
        return Err(invalid_species(species, "total cycle length exceeds the day counter"));
    }

    let weight = species.commercial_weight.value;
    if !weight.is_finite() || weight <= 0.0 {
        return Err(invalid_species(species, "commercial weight must be a positive number of grams"));
    }
    Ok(())
}

pub fn validate_facility(config: &FacilityConfiguration) -> Result<(), AquaforgeError> {
    let checks = [
        (
            config.hatchery.larval_tanks.checked_total().is_some(),
            "larval tank count exceeds the supported range",
        ),
        (config.total_larval_tanks() > 0, "the hatchery has no larval tanks"),
        (config.hatchery.pregrowth_tanks > 0, "the hatchery has no pre-growth tanks"),
        (
            config.grow_out.checked_total_cages().is_some(),
            "sea cage count exceeds the supported range",
        ),
        (config.total_cages() > 0, "no sea cages are installed"),
        (config.grow_out.cage_volume_m3 > 0, "cage volume must be positive"),
        (
            config.annual_capacity_target_tonnes.is_finite() && config.annual_capacity_target_tonnes > 0.0,
            "annual capacity target must be positive",
        ),
    ];
    match checks.iter().find(|(ok, _)| !ok) {
        Some((_, reason)) => Err(AquaforgeError::InvalidFacility(reason.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::test_support::sea_bass;

    #[test]
    fn reference_inputs_are_valid() {
        assert!(validate_species(&sea_bass()).is_ok());
        assert!(validate_facility(&FacilityConfiguration::default()).is_ok());
    }

    #[test]
    fn zero_density_or_duration_is_rejected() {
        let mut species = sea_bass();
        species.densities.fattening_per_m3 = 0;
        assert!(matches!(
            validate_species(&species),
            Err(AquaforgeError::InvalidSpecies { .. })
        ));

        let mut species = sea_bass();
        species.phase_durations.pregrowth_days = 0;
        assert!(validate_species(&species).is_err());

        let mut species = sea_bass();
        species.commercial_weight.value = -1.0;
        assert!(validate_species(&species).is_err());
    }

    #[test]
    fn facility_without_cages_is_rejected() {
        let mut config = FacilityConfiguration::default();
        config.grow_out.sites = 0;
        let err = validate_facility(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Facility configuration is invalid: no sea cages are installed"
        );
    }

    #[test]
    fn cage_count_beyond_range_is_rejected_not_wrapped() {
        let mut config = FacilityConfiguration::default();
        config.grow_out.sites = 65_536;
        config.grow_out.cages_per_site = 65_536;
        let err = validate_facility(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Facility configuration is invalid: sea cage count exceeds the supported range"
        );

        let mut config = FacilityConfiguration::default();
        config.hatchery.larval_tanks.medium = u32::MAX;
        assert!(matches!(
            validate_facility(&config),
            Err(AquaforgeError::InvalidFacility(_))
        ));
    }

    #[test]
    fn overlong_cycle_is_rejected() {
        let mut species = sea_bass();
        species.phase_durations.larval_days = 2_000_000_000;
        species.phase_durations.pregrowth_days = 2_000_000_000;
        species.phase_durations.fattening_days = 2_000_000_000;
        assert!(matches!(
            validate_species(&species),
            Err(AquaforgeError::InvalidSpecies { .. })
        ));
    }
}
