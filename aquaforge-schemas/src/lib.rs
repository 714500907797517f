pub mod batch;
pub mod facility;
pub mod file_formats;
pub mod measurement;
pub mod species;
