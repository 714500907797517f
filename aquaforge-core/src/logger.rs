use crate::{
    error::AquaforgeError,
    schedule::{BatchDetail, ScheduleResult},
};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One CSV row per batch. Nested values are stored as JSON strings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleLogEntry {
    pub policy: String,
    pub position: usize,
    pub species_name: String,
    pub larvae_seeded: u64,
    pub larval_tanks: u32,
    pub pregrowth_tanks: u32,
    pub fattening_cages: u32,
    pub larval_days: u32,
    pub pregrowth_days: u32,
    pub fattening_days: u32,
    pub total_days: u32,
    pub larval_survivors: u64,
    pub fry_produced: u64,
    pub commercial_fish: u64,
    pub tonnes_produced: f64,
    pub overall_survival_pct: f64,
    pub over_capacity_json: String,
    pub timeline_json: String,
}

pub struct ScheduleLogger {
    path: String,
    writer: Writer<fs::File>,
}

impl ScheduleLogger {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AquaforgeError> {
        let path = path.as_ref().display().to_string();
        let writer = Writer::from_path(&path).map_err(|e| AquaforgeError::CsvError(path.clone(), e))?;
        Ok(Self { path, writer })
    }

    pub fn log_detail(
        &mut self,
        policy: &str,
        position: usize,
        detail: &BatchDetail,
    ) -> Result<(), AquaforgeError> {
        let entry = ScheduleLogEntry {
            policy: policy.to_string(),
            position,
            species_name: detail.species_name.clone(),
            larvae_seeded: detail.larvae_seeded,
            larval_tanks: detail.larval_tanks,
            pregrowth_tanks: detail.pregrowth_tanks,
            fattening_cages: detail.fattening_cages,
            larval_days: detail.larval_days,
            pregrowth_days: detail.pregrowth_days,
            fattening_days: detail.fattening_days,
            total_days: detail.total_days,
            larval_survivors: detail.larval_survivors,
            fry_produced: detail.fry_produced,
            commercial_fish: detail.commercial_fish,
            tonnes_produced: detail.tonnes_produced,
            overall_survival_pct: detail.overall_survival_pct,
            over_capacity_json: serde_json::to_string(&detail.over_capacity)?,
            timeline_json: serde_json::to_string(&detail.timeline)?,
        };

        self.writer
            .serialize(entry)
            .map_err(|e| AquaforgeError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| AquaforgeError::FileIO(self.path.clone(), e))?;
        Ok(())
    }

    pub fn log_schedule(&mut self, schedule: &ScheduleResult) -> Result<(), AquaforgeError> {
        for (position, detail) in schedule.details.iter().enumerate() {
            self.log_detail(schedule.policy.slug(), position, detail)?;
        }
        Ok(())
    }
}

/// Writes a schedule to `path`, replacing any existing file.
pub fn export_schedule<P: AsRef<Path>>(path: P, schedule: &ScheduleResult) -> Result<(), AquaforgeError> {
    let mut logger = ScheduleLogger::new(path)?;
    logger.log_schedule(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{test_support::reference_batches, PhaseTimeline, SchedulingPolicy};
    use aquaforge_schemas::facility::FacilityConfiguration;

    #[test]
    fn exported_rows_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlapping.csv");
        let schedule = SchedulingPolicy::Overlapping
            .schedule(&reference_batches(), &FacilityConfiguration::default())
            .unwrap();

        export_schedule(&path, &schedule).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<ScheduleLogEntry> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].policy, "overlapping");
        assert_eq!(rows[1].position, 1);
        assert_eq!(rows[1].commercial_fish, schedule.details[1].commercial_fish);

        let timeline: Option<PhaseTimeline> = serde_json::from_str(&rows[2].timeline_json).unwrap();
        assert_eq!(timeline.unwrap().start_day, 85);
    }
}
