use city_match::engine::CityProfile;
use city_match::models::{CatalogRanges, DataView, Dimension, ResultEntry, ResultsResponse};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Format a price with thousands separators
pub fn format_price(amount: u32, currency: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match currency {
        "USD" => format!("${}", grouped),
        other => format!("{} {}", grouped, other),
    }
}

fn flags(entry: &ResultEntry) -> String {
    entry
        .sketchy_dimensions
        .iter()
        .map(|d| format!("!{}", d))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bar(distance: f64) -> String {
    let filled = ((1.0 - distance).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Plain-text rendering of the results page for the active view
pub fn results(response: &ResultsResponse, currency: &str) -> String {
    let mut out = String::new();

    if !response.ranked {
        let _ = writeln!(out, "No active priorities: cities in catalog order.");
    }
    if response.excluded_cities > 0 {
        let _ = writeln!(
            out,
            "{} city(ies) could not be scored and were left out.",
            response.excluded_cities
        );
    }

    match response.data_view {
        DataView::TableView => table(&mut out, response, currency),
        DataView::PhotoView => photos(&mut out, response, currency),
        DataView::ChartView => chart(&mut out, response),
        DataView::MapView => map(&mut out, response),
    }

    out
}

fn table(out: &mut String, response: &ResultsResponse, currency: &str) {
    let _ = writeln!(
        out,
        "{:>4}  {:<28} {:>12} {:>9} {:>7} {:>7}  {}",
        "#", "City", "Price", "Happiness", "Rep %", "Score", "Flags"
    );
    for entry in &response.results {
        let score = entry
            .score
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:>12} {:>9.2} {:>7.1} {:>7}  {}",
            entry.rank,
            entry.name,
            format_price(entry.affordability, currency),
            entry.happiness,
            entry.politics.rep16_frac,
            score,
            flags(entry)
        );
    }
}

fn photos(out: &mut String, response: &ResultsResponse, currency: &str) {
    for entry in &response.results {
        let _ = writeln!(
            out,
            "{}. {}  {}  happiness {:.2}  {}",
            entry.rank,
            entry.name,
            format_price(entry.affordability, currency),
            entry.happiness,
            flags(entry)
        );
        if let Some(img) = &entry.img {
            let _ = writeln!(out, "   {}", img.source);
            let _ = writeln!(out, "   Photo: {} {}", img.author, img.license);
        }
    }
}

fn chart(out: &mut String, response: &ResultsResponse) {
    for entry in &response.results {
        let _ = writeln!(out, "{}. {}", entry.rank, entry.name);
        if entry.distances.is_empty() {
            let _ = writeln!(out, "   (no priorities to compare against)");
        }
        for (dimension, distance) in &entry.distances {
            let _ = writeln!(out, "   {:<14} {} {:.2}", dimension, bar(*distance), 1.0 - distance);
        }
    }
}

fn map(out: &mut String, response: &ResultsResponse) {
    if let Some(frame) = &response.map_frame {
        let _ = writeln!(
            out,
            "Center {:.4}, {:.4}  bounds ({:.4}, {:.4}) - ({:.4}, {:.4})",
            frame.center.lat,
            frame.center.lng,
            frame.south_west.lat,
            frame.south_west.lng,
            frame.north_east.lat,
            frame.north_east.lng
        );
    }
    for entry in &response.results {
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:>9.4} {:>10.4}",
            entry.rank, entry.name, entry.location.lat, entry.location.lng
        );
    }
}

pub fn ranges(ranges: &CatalogRanges) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<14} {:>12} {:>12} {:>12}", "Dimension", "Min", "Mid", "Max");
    for dimension in Dimension::ALL {
        let r = ranges.get(dimension);
        let _ = writeln!(
            out,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            dimension, r.min, r.mid, r.max
        );
    }
    out
}

pub fn profile(profile: &CityProfile<'_>, currency: &str) -> String {
    let city = profile.city;
    let mut out = String::new();
    let _ = writeln!(out, "{}", city.name);
    let _ = writeln!(out, "  Price      {}", format_price(city.affordability, currency));
    let _ = writeln!(out, "  Happiness  {:.2}", city.happiness);
    let _ = writeln!(
        out,
        "  Politics   {:.1}% R / {:.1}% D",
        city.politics.rep16_frac, city.politics.dem16_frac
    );
    let _ = writeln!(out, "  Location   {:.4}, {:.4}", city.location.lat, city.location.lng);
    for (dimension, quartile) in &profile.quartiles {
        let marker = if profile.sketchy.contains(dimension) { "  (sketchy)" } else { "" };
        let _ = writeln!(out, "  {:<10} quartile {}{}", dimension, quartile.number(), marker);
    }
    out
}
