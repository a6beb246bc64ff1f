//! One-line status messages and number formatting

use owo_colors::OwoColorize;

/// Status lines. Results go to stdout, anything that did not happen to stderr.
pub struct Status;

impl Status {
    /// Something was written or computed
    pub fn done(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Nothing changed or nothing could be computed
    pub fn skipped(message: &str) {
        eprintln!("{} {}", "–".yellow(), message);
    }

    /// Neutral information, such as an empty listing
    pub fn note(message: &str) {
        println!("{} {}", "·".dimmed(), message);
    }

    /// Bold title with a rule the width of the text
    pub fn heading(title: &str) {
        println!("{}", title.bold());
        println!("{}", "─".repeat(console::measure_text_width(title)));
    }
}

/// Distance for display: whole meters below 1 km, otherwise km with 2 decimals
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.2} km", km)
    }
}

/// `lat, lon` with 5 decimals (about a meter)
pub fn format_coordinate(latitude: f64, longitude: f64) -> String {
    format!("{:.5}, {:.5}", latitude, longitude)
}

/// `1 location`, `3 locations`
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{} {}", count, noun)
}
