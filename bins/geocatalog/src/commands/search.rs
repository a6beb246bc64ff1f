//! Radius search and pair distance

use super::{print_json, CenterArgs, Context};
use anyhow::Result;
use geocatalog_cli::output::{format_coordinate, format_count, format_distance, Status};
use geocatalog_cli::table::distance_table;
use geocatalog_core::error::Error;
use geocatalog_geo::PairDistance;
use geocatalog_telemetry::Timer;
use serde_json::json;

pub fn nearby(
    ctx: &Context,
    city: &str,
    state: &str,
    center: &CenterArgs,
    radius: Option<f64>,
) -> Result<()> {
    let Some(origin) = center.resolve(&ctx.catalog, city, state)? else {
        return Err(Error::validation("A search center is required")
            .with_suggestion("Pass --lat and --lon, or --from <LOCATION>")
            .into());
    };
    let radius = ctx.radius(radius);

    let timer = Timer::start("nearby");
    let records = ctx.catalog.nearby(city, state, &origin, radius);
    timer.finish();

    if ctx.is_json() {
        return print_json(&json!({
            "center": origin,
            "radius_km": radius,
            "results": records,
        }));
    }

    Status::heading(&format!(
        "Within {} of {} ({}/{})",
        format_distance(radius),
        format_coordinate(origin.latitude, origin.longitude),
        city.trim(),
        state.trim().to_uppercase()
    ));
    if records.is_empty() {
        Status::note("No locations in range");
        return Ok(());
    }
    println!("{}", distance_table(&records).render());
    println!();
    println!("{}", format_count(records.len(), "location", "locations"));
    Ok(())
}

pub fn distance(ctx: &Context, city: &str, state: &str, from: &str, to: &str) -> Result<()> {
    let report = ctx.catalog.pair_distance(city, state, from, to);

    if ctx.is_json() {
        return print_json(&report);
    }
    match report {
        PairDistance::Computed { .. } => Status::done(&report.to_string()),
        PairDistance::NotComputed { .. } => Status::skipped(&report.to_string()),
    }
    Ok(())
}
