use crate::config::KnowledgeBase;
use crate::plotting;
use crate::Cli;
use anyhow::{Context, Result};
use aquaforge_core::{
    batches::UniformLarvae,
    comparison::ComparisonReport,
    logger::export_schedule,
    planner::{PlanOutcome, PlannerBuilder},
    schedule::ScheduleResult,
};
use aquaforge_schemas::{
    facility::FacilityConfiguration, file_formats::FacilityFile, measurement::InclusiveRange,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// What a run used and what it concluded, written next to the exports for traceability.
#[derive(Debug, Serialize)]
struct RunManifest<'a> {
    created_at: String,
    seed: u64,
    larvae_range: InclusiveRange<u64>,
    batches: Vec<ManifestBatch>,
    comparison: &'a ComparisonReport,
}

#[derive(Debug, Serialize)]
struct ManifestBatch {
    species_id: String,
    larvae_count: u64,
}

/// Runs the full planning workflow and returns the directory the results were written to.
pub fn run(cli: &Cli) -> Result<PathBuf> {
    let kb = KnowledgeBase::load(
        cli.species.as_deref(),
        cli.facility_file.as_deref(),
        &cli.facility,
    )?;
    print_facility(&kb.facility);

    // A drawn seed is still recorded so the run can be replayed.
    let seed = cli.seed.unwrap_or_else(rand::random);
    let range = InclusiveRange {
        min: cli.min_larvae,
        max: cli.max_larvae,
    };
    info!(seed, min = range.min, max = range.max, "generating batches");

    let planner = PlannerBuilder::new()
        .with_species(kb.species.clone())
        .with_facility(kb.facility.clone())
        .with_generated_batches(range, &mut UniformLarvae::new(StdRng::seed_from_u64(seed)))?
        .build()?;

    println!("\nBatches generated for planning:");
    for batch in planner.batches() {
        println!(
            "  - {}: {} larvae",
            batch.species().display_name(),
            group_thousands(batch.larvae_count())
        );
    }

    let outcome = planner.run()?;
    print_schedule(&outcome.sequential);
    print_schedule(&outcome.overlapping);
    print_comparison(&outcome.comparison);

    let created_at = chrono::Utc::now();
    let output_dir = cli
        .output_dir
        .join(format!("plan_{}", created_at.format("%Y%m%d_%H%M%S")));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    write_outputs(&output_dir, &outcome, &kb.facility)?;

    let manifest = RunManifest {
        created_at: created_at.to_rfc3339(),
        seed,
        larvae_range: range,
        batches: planner
            .batches()
            .iter()
            .map(|b| ManifestBatch {
                species_id: b.species().species_id.clone(),
                larvae_count: b.larvae_count(),
            })
            .collect(),
        comparison: &outcome.comparison,
    };
    fs::write(
        output_dir.join("run_manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )
    .context("Failed to write run manifest")?;

    if cli.no_charts {
        info!("chart generation skipped");
    } else {
        plotting::generate_all_plots(&output_dir, &outcome)?;
    }

    Ok(output_dir)
}

/// Writes the CSV exports, the markdown comparison and a copy of the facility used.
fn write_outputs(output_dir: &Path, outcome: &PlanOutcome, facility: &FacilityConfiguration) -> Result<()> {
    for schedule in [&outcome.sequential, &outcome.overlapping] {
        let path = output_dir.join(format!("schedule_{}.csv", schedule.policy.slug()));
        export_schedule(&path, schedule)?;
        info!(path = %path.display(), "schedule exported");
    }

    let table = generate_comparison_table(outcome);
    fs::write(output_dir.join("comparison_report.md"), table)
        .context("Failed to write comparison report")?;

    // Copy the effective facility, overrides included, for traceability.
    let facility_file = FacilityFile {
        schema_version: "1.0".to_string(),
        facility: facility.clone(),
    };
    fs::write(
        output_dir.join("facility.yaml"),
        serde_yaml::to_string(&facility_file)?,
    )
    .context("Failed to write facility copy")?;
    Ok(())
}

fn generate_comparison_table(outcome: &PlanOutcome) -> String {
    let comparison = &outcome.comparison;
    let mut table = String::from("| Metric | Sequential | Overlapping |\n");
    table.push_str("|--------|------------|-------------|\n");
    table.push_str(&format!(
        "| Total cycle time (days) | {} | {} |\n",
        comparison.sequential_days, comparison.overlapping_days
    ));
    table.push_str(&format!(
        "| Larvae seeded | {} | {} |\n",
        group_thousands(outcome.sequential.total_larvae_seeded()),
        group_thousands(outcome.overlapping.total_larvae_seeded())
    ));
    table.push_str(&format!(
        "| Commercial fish | {} | {} |\n",
        group_thousands(outcome.sequential.total_commercial_fish()),
        group_thousands(outcome.overlapping.total_commercial_fish())
    ));
    table.push_str(&format!(
        "| Tonnes per cycle | {:.2} | {:.2} |\n",
        outcome.sequential.total_tonnes(),
        outcome.overlapping.total_tonnes()
    ));
    table.push_str(&format!(
        "| Programme survival (%) | {:.1} | {:.1} |\n",
        outcome.sequential.programme_survival_pct(),
        outcome.overlapping.programme_survival_pct()
    ));

    table.push_str("\n| Species | Larvae | Commercial fish | Tonnes | Survival (%) | Start day | Harvest day |\n");
    table.push_str("|---------|--------|-----------------|--------|--------------|-----------|-------------|\n");
    for detail in &outcome.overlapping.details {
        let (start, end) = match detail.timeline {
            Some(t) => (t.start_day.to_string(), t.fattening_end_day.to_string()),
            None => ("N/A".to_string(), "N/A".to_string()),
        };
        table.push_str(&format!(
            "| {} | {} | {} | {:.2} | {:.1} | {} | {} |\n",
            detail.species_name,
            group_thousands(detail.larvae_seeded),
            group_thousands(detail.commercial_fish),
            detail.tonnes_produced,
            detail.overall_survival_pct,
            start,
            end
        ));
    }

    table.push_str(&format!(
        "\nDays saved: {} ({:.1}%). Projected annual production: {:.2} t over {:.2} cycles, {:.1}% of the {:.0} t target.\n",
        comparison.days_saved,
        comparison.percent_saved,
        comparison.projected_annual_tonnes,
        comparison.annual_cycles,
        comparison.target_attainment_pct,
        comparison.annual_target_tonnes
    ));
    table
}

fn print_facility(facility: &FacilityConfiguration) {
    let hatchery = &facility.hatchery;
    let grow_out = &facility.grow_out;
    println!("\nFacility configuration:");
    println!(
        "  Larval tanks: {} (small {}, medium {}, large {})",
        facility.total_larval_tanks(),
        hatchery.larval_tanks.small,
        hatchery.larval_tanks.medium,
        hatchery.larval_tanks.large
    );
    println!("  Pre-growth tanks: {}", hatchery.pregrowth_tanks);
    println!(
        "  Sea cages: {} sites x {} cages of {} m3",
        grow_out.sites, grow_out.cages_per_site, grow_out.cage_volume_m3
    );
    println!(
        "  Land tanks: {} of {} m3",
        grow_out.land_tanks, grow_out.land_tank_volume_m3
    );
    println!(
        "  Survival: larval {:.0}%, pre-growth {:.0}%, fattening {:.0}%; efficiency {:.0}%",
        facility.rates.larval_survival() * 100.0,
        facility.rates.pregrowth_survival() * 100.0,
        facility.rates.fattening_survival() * 100.0,
        facility.rates.operational_efficiency() * 100.0
    );
    println!("  Annual target: {:.0} t", facility.annual_capacity_target_tonnes);
    if !facility.certifications.is_empty() {
        println!("  Certifications: {}", facility.certifications.join(", "));
    }
}

fn print_schedule(schedule: &ScheduleResult) {
    println!("\n========================================");
    println!("{}", schedule.method.to_uppercase());
    println!("========================================");

    for detail in &schedule.details {
        println!("\n{}", detail.species_name);
        println!("  NUMBERS:");
        println!("    Larvae seeded: {}", group_thousands(detail.larvae_seeded));
        println!("    Larval survivors: {}", group_thousands(detail.larval_survivors));
        println!("    Fry produced: {}", group_thousands(detail.fry_produced));
        println!("    Commercial fish: {}", group_thousands(detail.commercial_fish));
        println!("  RESOURCES:");
        println!("    Larval tanks: {}", detail.larval_tanks);
        println!("    Pre-growth tanks: {}", detail.pregrowth_tanks);
        println!("    Fattening cages: {}", detail.fattening_cages);
        if detail.over_capacity.any() {
            println!("    WARNING: requirement exceeds installed capacity and was capped");
        }
        println!("  TIMES:");
        println!("    Larval phase: {} days", detail.larval_days);
        println!("    Pre-growth phase: {} days", detail.pregrowth_days);
        println!("    Fattening phase: {} days", detail.fattening_days);
        if let Some(t) = detail.timeline {
            println!("    Start day: {}", t.start_day);
            println!("    Harvest day: {}", t.fattening_end_day);
        } else {
            println!("    Total: {} days", detail.total_days);
        }
        println!("  PERFORMANCE:");
        println!("    Production: {:.2} t", detail.tonnes_produced);
        println!("    Overall survival: {:.1}%", detail.overall_survival_pct);
    }

    println!("\nTOTALS:");
    println!("  Cycle time: {} days", schedule.total_cycle_days);
    println!("  Larvae seeded: {}", group_thousands(schedule.total_larvae_seeded()));
    println!("  Commercial fish: {}", group_thousands(schedule.total_commercial_fish()));
    println!("  Programme survival: {:.1}%", schedule.programme_survival_pct());
    println!("  Production: {:.2} t", schedule.total_tonnes());
}

fn print_comparison(comparison: &ComparisonReport) {
    println!("\n========================================");
    println!("COMPARISON");
    println!("========================================");
    println!("  Sequential cycle: {} days", comparison.sequential_days);
    println!("  Overlapping cycle: {} days", comparison.overlapping_days);
    if comparison.overlap_is_faster() {
        println!(
            "  Time saved: {} days ({:.1}%)",
            comparison.days_saved, comparison.percent_saved
        );
    } else {
        println!("  Overlapping schedule saves no time ({} days)", comparison.days_saved);
    }

    println!("\nESTIMATED ANNUAL PRODUCTION:");
    println!("  Production per cycle: {:.2} t", comparison.tonnes_per_cycle);
    println!("  Cycles per year: {:.2}", comparison.annual_cycles);
    println!("  Annual production: {:.2} t", comparison.projected_annual_tonnes);
    println!("  Target: {:.0} t", comparison.annual_target_tonnes);
    println!("  Target attainment: {:.1}%", comparison.target_attainment_pct);
}

/// Formats a count with comma thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
