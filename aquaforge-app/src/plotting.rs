//! This module is responsible for generating all visualizations from a planning run.

use anyhow::Result;
use aquaforge_core::{planner::PlanOutcome, schedule::ScheduleResult};
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, warn};

const COLORS: [RGBColor; 6] = [BLUE, RED, GREEN, MAGENTA, CYAN, YELLOW];
const ORANGE: RGBColor = RGBColor(255, 140, 0);

/// The main function to generate and save all charts for a planning run.
pub fn generate_all_plots(output_dir: &Path, outcome: &PlanOutcome) -> Result<()> {
    info!("[Plotting] Generating charts from schedule results...");

    if outcome.sequential.details.is_empty() {
        warn!("[Plotting] No batches to plot.");
        return Ok(());
    }

    let comparison = &outcome.comparison;
    plot_bar_chart(
        &output_dir.join("1_cycle_time_comparison.png"),
        "Production Cycle Time",
        "Days",
        &[
            ("Sequential".to_string(), f64::from(comparison.sequential_days)),
            ("Overlapping".to_string(), f64::from(comparison.overlapping_days)),
        ],
    )?;

    let tonnes: Vec<(String, f64)> = outcome
        .sequential
        .details
        .iter()
        .map(|d| (d.species_name.clone(), d.tonnes_produced))
        .collect();
    plot_bar_chart(
        &output_dir.join("2_production_by_species.png"),
        "Production per Species (one cycle)",
        "Tonnes",
        &tonnes,
    )?;

    let survival: Vec<(String, f64)> = outcome
        .sequential
        .details
        .iter()
        .map(|d| (d.species_name.clone(), d.overall_survival_pct))
        .collect();
    plot_bar_chart(
        &output_dir.join("3_overall_survival.png"),
        "Overall Survival Rate",
        "Survival (%)",
        &survival,
    )?;

    plot_overlapping_timeline(output_dir, &outcome.overlapping)?;
    plot_resource_usage(output_dir, &outcome.sequential)?;

    plot_bar_chart(
        &output_dir.join("6_annual_projection.png"),
        "Estimated Annual Production",
        "Tonnes",
        &[
            ("Per cycle".to_string(), comparison.tonnes_per_cycle),
            ("Projected per year".to_string(), comparison.projected_annual_tonnes),
            ("Annual target".to_string(), comparison.annual_target_tonnes),
        ],
    )?;

    info!("[Plotting] Charts have been saved to '{}'.", output_dir.display());
    Ok(())
}

/// Draws one bar per entry, each with its own legend line carrying the value.
fn plot_bar_chart(path: &Path, caption: &str, y_desc: &str, bars: &[(String, f64)]) -> Result<()> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_value = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..bars.len() as f64, 0f64..max_value * 1.15)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc(y_desc)
        .draw()?;

    for (i, (label, value)) in bars.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let x = i as f64;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x + 0.15, 0.0), (x + 0.85, *value)],
                color.mix(0.7).filled(),
            )))?
            .label(format!("{}: {:.1}", label, value))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Generates a Gantt chart of the overlapping schedule, one row per batch.
fn plot_overlapping_timeline(output_dir: &Path, schedule: &ScheduleResult) -> Result<()> {
    let path = output_dir.join("4_overlapping_timeline.png");
    let root = BitMapBackend::new(&path, (1280, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let rows = schedule.details.len();
    let names: Vec<String> = schedule.details.iter().map(|d| d.species_name.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Production Timeline (overlapping)", ("sans-serif", 30).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(260)
        .build_cartesian_2d(0u32..schedule.total_cycle_days.max(1), (0..rows).into_segmented())?;

    chart
        .configure_mesh()
        .x_desc("Day")
        .y_labels(rows)
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    let phases = [("Larval", BLUE), ("Pre-growth", GREEN), ("Fattening", ORANGE)];
    for (phase, (label, color)) in phases.into_iter().enumerate() {
        let bars = schedule.details.iter().enumerate().filter_map(|(row, detail)| {
            detail.timeline.map(|t| {
                let (start, end) = match phase {
                    0 => (t.start_day, t.larval_end_day),
                    1 => (t.larval_end_day, t.pregrowth_end_day),
                    _ => (t.pregrowth_end_day, t.fattening_end_day),
                };
                Rectangle::new(
                    [(start, SegmentValue::Exact(row)), (end, SegmentValue::Exact(row + 1))],
                    color.mix(0.7).filled(),
                )
            })
        });
        chart
            .draw_series(bars)?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Generates grouped bars of tanks and cages per phase, one colour per species.
fn plot_resource_usage(output_dir: &Path, schedule: &ScheduleResult) -> Result<()> {
    let path = output_dir.join("5_resource_usage.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let groups = ["Larval tanks", "Pre-growth tanks", "Fattening cages"];
    let max_units = schedule
        .details
        .iter()
        .flat_map(|d| [d.larval_tanks, d.pregrowth_tanks, d.fattening_cages])
        .max()
        .unwrap_or(1)
        .max(1) as f64;
    // Room below zero for the group names.
    let label_floor = -max_units * 0.08;

    let mut chart = ChartBuilder::on(&root)
        .caption("Resources Allocated per Batch", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(10)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..groups.len() as f64, label_floor..max_units * 1.15)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("Units")
        .draw()?;

    let width = 0.8 / schedule.details.len() as f64;
    for (i, detail) in schedule.details.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let counts = [detail.larval_tanks, detail.pregrowth_tanks, detail.fattening_cages];
        chart
            .draw_series(counts.into_iter().enumerate().map(|(group, units)| {
                let left = group as f64 + 0.1 + i as f64 * width;
                Rectangle::new([(left, 0.0), (left + width, f64::from(units))], color.mix(0.7).filled())
            }))?
            .label(detail.species_name.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart.draw_series(groups.iter().enumerate().map(|(group, name)| {
        Text::new(
            name.to_string(),
            (group as f64 + 0.3, label_floor * 0.3),
            ("sans-serif", 16).into_font(),
        )
    }))?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
