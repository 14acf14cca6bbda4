// ABOUTME: CLI availability command - render a weekly grid and the times that match it

use super::util::{format_slot, print_json};
use super::{AvailabilityArgs, OutputFormat};
use crate::config::AppConfig;
use crate::flows::candidate_slots;
use crate::models::{AvailabilityMatrix, Clock, SlotGrid, SystemClock, WeekView};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AvailabilityReport {
    pub availability: AvailabilityMatrix,
    /// Upcoming times an invitee would be offered
    pub candidates: Vec<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<WeekSlots>,
}

/// Future start times of one week that fall into the grid
#[derive(Debug, Serialize)]
pub struct WeekSlots {
    pub label: String,
    pub slots: Vec<NaiveDateTime>,
}

/// Execute the availability command
#[allow(clippy::unused_async)] // Async for consistency with other CLI commands
pub async fn execute(args: AvailabilityArgs, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let report = build(&args, config, SystemClock.now())?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => output_text(&report),
    }
    Ok(())
}

pub fn build(
    args: &AvailabilityArgs,
    config: &AppConfig,
    now: NaiveDateTime,
) -> Result<AvailabilityReport> {
    let availability = AvailabilityMatrix::from_cells(args.available.iter().copied());
    let candidates = candidate_slots(now.date(), &config.matching_schedule(), &availability);
    let week = args
        .week
        .map(|ahead| week_slots(now, ahead, &config.slot_grid(), &availability))
        .transpose()?;

    Ok(AvailabilityReport {
        availability,
        candidates,
        week,
    })
}

fn week_slots(
    now: NaiveDateTime,
    weeks_ahead: u32,
    grid: &SlotGrid,
    availability: &AvailabilityMatrix,
) -> Result<WeekSlots> {
    let view = WeekView::containing(now.date())
        .weeks_after(weeks_ahead)
        .with_context(|| format!("--week {weeks_ahead} is past the end of the calendar"))?;
    let slots = view
        .slots(grid)
        .into_iter()
        .filter(|slot| *slot >= now)
        .filter(|slot| availability.is_empty() || availability.matches(*slot))
        .collect();
    Ok(WeekSlots {
        label: view.label(),
        slots,
    })
}

fn output_text(report: &AvailabilityReport) {
    print!("{}", report.availability.render_grid());
    println!();
    if report.availability.is_empty() {
        println!("No availability set; every upcoming time is offered.");
    }
    println!("Upcoming match times ({}):", report.candidates.len());
    for slot in &report.candidates {
        println!("  {}", format_slot(*slot));
    }
    if let Some(week) = &report.week {
        println!();
        println!("{} ({} open slots)", week.label, week.slots.len());
        for slot in &week.slots {
            println!("  {}", format_slot(*slot));
        }
    }
}
