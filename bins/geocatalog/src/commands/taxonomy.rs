//! State and city commands

use super::{print_json, Context};
use anyhow::Result;
use geocatalog_cli::output::{format_count, Status};
use geocatalog_cli::table::Table;
use geocatalog_core::error::Error;
use geocatalog_store::ufs::{state_name, BRAZILIAN_STATES};
use serde_json::json;

/// Register a state, taking its name from the UF table when not given.
pub fn add_state(ctx: &mut Context, uf: &str, name: Option<&str>) -> Result<()> {
    let name = match name.or_else(|| state_name(uf)) {
        Some(name) => name.to_string(),
        None => return Err(Error::unknown_uf(uf).into()),
    };

    let inserted = ctx.catalog.taxonomy.insert_state(&name, uf)?;

    if ctx.is_json() {
        return print_json(&json!({ "inserted": inserted, "uf": uf.trim().to_uppercase(), "name": name }));
    }
    if inserted {
        Status::done(&format!("State {} ({}) added", name, uf.trim().to_uppercase()));
    } else {
        Status::skipped(&format!("State {} not added: invalid or already registered", uf));
    }
    Ok(())
}

pub fn list_states(ctx: &Context) -> Result<()> {
    let states = ctx.catalog.taxonomy.list_states();

    if ctx.is_json() {
        return print_json(&states);
    }
    if states.is_empty() {
        Status::note("No states registered");
        return Ok(());
    }

    let mut table = Table::new(["UF", "Name"]);
    for state in &states {
        table.push_row([state.uf.as_str(), state.name.as_str()]);
    }
    println!("{}", table.render());
    println!();
    println!("{}", format_count(states.len(), "state", "states"));
    Ok(())
}

pub fn add_city(ctx: &mut Context, name: &str, uf: &str) -> Result<()> {
    let inserted = ctx.catalog.taxonomy.insert_city(name, uf)?;

    if ctx.is_json() {
        return print_json(&json!({ "inserted": inserted, "name": name.trim(), "uf": uf.trim().to_uppercase() }));
    }
    if inserted {
        Status::done(&format!("City {} added to {}", name.trim(), uf.trim().to_uppercase()));
    } else {
        Status::skipped(&format!(
            "City {} not added: invalid, unknown state or already registered",
            name.trim()
        ));
    }
    Ok(())
}

pub fn list_cities(ctx: &Context, uf: &str) -> Result<()> {
    let cities = ctx.catalog.taxonomy.list_cities_by_state(uf);

    if ctx.is_json() {
        return print_json(&cities);
    }
    if cities.is_empty() {
        Status::note(&format!("No cities registered for {}", uf.trim().to_uppercase()));
        return Ok(());
    }

    for city in &cities {
        println!("{}", city);
    }
    println!();
    println!("{}", format_count(cities.len(), "city", "cities"));
    Ok(())
}

/// The fixed table of Brazilian state codes.
pub fn list_ufs(ctx: &Context) -> Result<()> {
    if ctx.is_json() {
        let rows: Vec<_> = BRAZILIAN_STATES
            .iter()
            .map(|(uf, name)| json!({ "uf": uf, "name": name }))
            .collect();
        return print_json(&rows);
    }

    let mut table = Table::new(["UF", "Name"]);
    for (uf, name) in BRAZILIAN_STATES {
        table.push_row([*uf, *name]);
    }
    println!("{}", table.render());
    Ok(())
}
