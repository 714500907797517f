use thiserror::Error;

#[derive(Debug, Error)]
pub enum AquaforgeError {
    #[error("Species '{species}' is invalid: {reason}")]
    InvalidSpecies { species: String, reason: String },

    #[error("Facility configuration is invalid: {0}")]
    InvalidFacility(String),

    #[error("At least one species must be provided for planning")]
    NoSpeciesProvided,

    #[error("At least one batch must be provided for scheduling")]
    NoBatchProvided,

    #[error("Larvae range [{min}, {max}] is invalid: {reason}")]
    InvalidLarvaeRange { min: u64, max: u64, reason: String },

    #[error("Batch of '{0}' has no larvae")]
    ZeroLarvae(String),

    #[error("Schedule '{0}' has a total cycle time of zero days")]
    ZeroCycleTime(String),

    #[error("Schedule '{0}' runs past the last representable day")]
    CycleTimeOverflow(String),

    #[error("Fixed larvae source ran out of counts after {0} batches")]
    LarvaeSourceExhausted(usize),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("Failed to encode schedule row: {0}")]
    JsonEncoding(#[from] serde_json::Error),
}
