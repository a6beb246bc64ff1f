//! Location document commands

use super::{print_json, Context};
use anyhow::Result;
use geocatalog_cli::output::{format_count, Status};
use geocatalog_cli::table::locations_table;
use geocatalog_core::error::Error;
use geocatalog_store::InsertOutcome;
use serde_json::json;

pub fn add(
    ctx: &mut Context,
    name: &str,
    city: &str,
    state: &str,
    latitude: f64,
    longitude: f64,
    description: &str,
) -> Result<()> {
    let outcome = ctx
        .catalog
        .add_location(name, city, state, latitude, longitude, description)?;

    if ctx.is_json() {
        let body = match &outcome {
            InsertOutcome::Inserted(id) => json!({ "inserted": true, "id": id }),
            InsertOutcome::Invalid => json!({ "inserted": false, "reason": "invalid" }),
            InsertOutcome::UnknownCity => json!({ "inserted": false, "reason": "unknown_city" }),
        };
        return print_json(&body);
    }

    match outcome {
        InsertOutcome::Inserted(id) => Status::done(&format!("Location {} added ({})", name.trim(), id)),
        InsertOutcome::Invalid => Status::skipped(&format!(
            "Location {} not added: empty field or coordinates out of range",
            name.trim()
        )),
        InsertOutcome::UnknownCity => Status::skipped(&format!(
            "Location {} not added: {}/{} is not a registered city",
            name.trim(),
            city.trim(),
            state.trim().to_uppercase()
        )),
    }
    Ok(())
}

/// List every location, or only those of one city.
pub fn list(ctx: &Context, city_state: Option<(&str, &str)>) -> Result<()> {
    let documents = match city_state {
        Some((city, state)) => ctx.catalog.locations_in(city, state),
        None => ctx.catalog.locations.list_all(),
    };

    if ctx.is_json() {
        return print_json(&documents);
    }
    if documents.is_empty() {
        Status::note("No locations found");
        return Ok(());
    }

    println!("{}", locations_table(&documents).render());
    println!();
    println!("{}", format_count(documents.len(), "location", "locations"));
    Ok(())
}

pub fn delete(ctx: &mut Context, name: &str) -> Result<()> {
    let deleted = ctx.catalog.locations.delete_by_name(name)?;

    if ctx.is_json() {
        return print_json(&json!({ "deleted": deleted }));
    }
    if deleted == 0 {
        Status::skipped(&format!("No location named '{}'", name));
    } else {
        Status::done(&format!("Deleted {}", format_count(deleted, "location", "locations")));
    }
    Ok(())
}

pub fn clear(ctx: &mut Context, confirmed: bool) -> Result<()> {
    if !confirmed {
        return Err(Error::validation("Refusing to delete every location without confirmation")
            .with_suggestion("Re-run with --yes")
            .into());
    }

    let deleted = ctx.catalog.locations.delete_all()?;

    if ctx.is_json() {
        return print_json(&json!({ "deleted": deleted }));
    }
    if deleted == 0 {
        Status::note("Nothing to delete");
    } else {
        Status::done(&format!("Deleted {}", format_count(deleted, "location", "locations")));
    }
    Ok(())
}
