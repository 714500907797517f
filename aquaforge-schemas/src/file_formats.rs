use crate::{facility::FacilityConfiguration, species::SpeciesDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeciesFile {
    pub schema_version: String,
    pub species: Vec<SpeciesDescriptor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FacilityFile {
    pub schema_version: String,
    pub facility: FacilityConfiguration,
}
