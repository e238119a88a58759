use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::api::Category;

/// Color for categories missing from the palette.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Icon for unrecognized file types.
pub const DEFAULT_FILE_ICON: &str = "📁";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Largest fitting unit, rounded to two decimals with trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut threshold = 1024u64;
    while unit < SIZE_UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }
    let scaled = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// `dd/mm/yyyy HH:MM` in the given zone.
pub fn format_date<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string()
}

/// Glyph for a file extension, case-insensitive.
pub fn file_icon(file_type: &str) -> &'static str {
    match file_type.trim().to_lowercase().as_str() {
        "pdf" => "📄",
        "docx" | "doc" => "📝",
        "txt" => "📃",
        "xlsx" | "xls" => "📊",
        "pptx" | "ppt" => "📽️",
        "jpg" | "jpeg" | "png" | "gif" => "🖼️",
        _ => DEFAULT_FILE_ICON,
    }
}

/// Color for a category label as reported by analytics.
pub fn category_color(label: &str) -> &'static str {
    Category::ALL
        .into_iter()
        .find(|c| c.label() == label)
        .map(Category::color)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

/// Split a comma-separated tag field, trimming and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
