use colored::Colorize;
use serde_json::Value;

use crate::api::backend::HistoryPoint;
use crate::models::{Banner, BannerLevel, DashboardFrame};
use crate::utils::time::format_timestamp;
use crate::utils::Table;

pub const TITLE: &str = "📊 Multi-Stock IV & Sentiment Dashboard";
pub const CAPTION: &str = "Live data fetched from the option chain backend";
pub const NO_HISTORY: &str = "No history data available yet.";

/// Most recent history rows shown under the payload
const TABLE_ROWS: usize = 10;
/// Scalar pass-through columns shown next to fetched_at/last_price
const EXTRA_COLUMNS: usize = 3;

/// Clears the terminal and homes the cursor before a redraw
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

pub fn render_banner(banner: &Banner) -> String {
    match banner.level {
        BannerLevel::Info => format!("ℹ️  {}", banner.message).blue().to_string(),
        BannerLevel::Warning => format!("⚠️  {}", banner.message).yellow().to_string(),
        BannerLevel::Error => format!("❌ {}", banner.message).red().to_string(),
    }
}

/// Render one cycle of the dashboard as terminal text
pub fn render_frame(frame: &DashboardFrame) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", TITLE.bold()));
    out.push_str(&format!("{}\n\n", CAPTION.dimmed()));

    if let Some(symbol) = &frame.symbol {
        out.push_str(&format!("{}\n\n", format!("📈 {} — Live Option Chain Sentiment", symbol).bold()));
    }

    for banner in &frame.banners {
        out.push_str(&render_banner(banner));
        out.push('\n');
    }
    if !frame.banners.is_empty() {
        out.push('\n');
    }

    if let (Some(last_update), Some(payload)) = (&frame.last_update, &frame.payload) {
        out.push_str(&format!("{} {}\n", "Last Update:".bold(), format_timestamp(last_update)));
        out.push_str(&render_payload(payload));
        out.push_str("\n\n");
    }

    if frame.symbol.is_some() {
        if frame.history.is_empty() {
            out.push_str(&render_banner(&Banner::info(NO_HISTORY)));
            out.push('\n');
        } else {
            out.push_str(&format!(
                "{} ({} of {} points, limit {})\n",
                "History".bold(),
                frame.history.len().min(TABLE_ROWS),
                frame.history.len(),
                frame.limit
            ));
            out.push_str(&render_history_table(&frame.history));
            if let Some(path) = &frame.chart_path {
                out.push_str(&format!("\n{} {}\n", "Chart:".bold(), path.display()));
            }
        }
    }

    out.push_str(&format!("\n{}\n", "─".repeat(60)));
    out.push_str(&format!(
        "{}\n",
        format!(
            "Auto-refreshes every {}s · cycle started {} · type $help for controls",
            frame.refresh_interval,
            format_timestamp(&frame.started_at)
        )
        .dimmed()
    ));

    out
}

/// Pretty-printed JSON of the display payload
pub fn render_payload(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

/// The last few rows of history, oldest first, with a handful of scalar extras
pub fn render_history_table(history: &[HistoryPoint]) -> String {
    let tail = &history[history.len().saturating_sub(TABLE_ROWS)..];
    let extras = extra_columns(tail);

    let mut headers = vec!["fetched_at".to_string(), "last_price".to_string()];
    headers.extend(extras.iter().cloned());

    let mut table = Table::new(&headers);
    for point in tail {
        let mut row = vec![
            format_timestamp(&point.fetched_at),
            point
                .last_price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string()),
        ];
        for key in &extras {
            row.push(point.extra.get(key).map(format_cell).unwrap_or_else(|| "-".to_string()));
        }
        table.add_row(row);
    }

    table.render()
}

/// Keys whose values are scalars in the newest row, in the backend's key order
fn extra_columns(rows: &[HistoryPoint]) -> Vec<String> {
    rows.last()
        .map(|newest| {
            newest
                .extra
                .iter()
                .filter(|(_, v)| v.is_number() || v.is_string() || v.is_boolean())
                .map(|(k, _)| k.clone())
                .take(EXTRA_COLUMNS)
                .collect()
        })
        .unwrap_or_default()
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.2}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
