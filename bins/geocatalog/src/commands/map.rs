//! Map export

use super::{print_json, CenterArgs, Context};
use anyhow::{Context as _, Result};
use geocatalog_cli::map::{markers_from_documents, markers_from_records, MapView};
use geocatalog_cli::output::{format_count, Status};
use serde_json::json;
use std::path::Path;

/// Write a city's locations as an HTML page or GeoJSON.
///
/// With a center, only locations within the radius are drawn and the
/// radius is shown as a circle.
pub fn run(
    ctx: &Context,
    city: &str,
    state: &str,
    center: &CenterArgs,
    radius: Option<f64>,
    output: &Path,
    geojson: bool,
) -> Result<()> {
    let origin = center.resolve(&ctx.catalog, city, state)?;
    let title = format!("{} / {}", city.trim(), state.trim().to_uppercase());

    let view = match origin {
        Some(origin) => {
            let radius = ctx.radius(radius);
            MapView {
                title,
                markers: markers_from_records(&ctx.catalog.nearby(city, state, &origin, radius)),
                center: Some(origin),
                radius_km: Some(radius),
            }
        }
        None => MapView {
            title,
            markers: markers_from_documents(&ctx.catalog.locations_in(city, state)),
            center: None,
            radius_km: None,
        },
    };

    let contents = if geojson {
        serde_json::to_string_pretty(&view.to_geojson())?
    } else {
        view.render_html()?
    };
    std::fs::write(output, contents)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(path = %output.display(), markers = view.markers.len(), "Map written");

    if ctx.is_json() {
        return print_json(&json!({ "path": output, "markers": view.markers.len() }));
    }
    Status::done(&format!(
        "Wrote {} to {}",
        format_count(view.markers.len(), "marker", "markers"),
        output.display()
    ));
    Ok(())
}
