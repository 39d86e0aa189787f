//! Plain-text progress dialog and status line

use super::glyphs::glyph;
use crate::config::{SummaryStyle, Theme};
use crate::progress::{ProgressSnapshot, StageStatus};
use crate::status::StatusSnapshot;
use crate::utils::{format_clock, rounded_percent, truncate_with_ellipsis};

const STAGE_BAR_WIDTH: usize = 20;
const NAME_COLUMN_WIDTH: usize = 24;
const PLATFORM_LABEL_MAX_CHARS: usize = 60;

/// Horizontal bar with `width` cells filled to `percent`
#[must_use]
pub fn bar(percent: f64, width: usize, theme: &Theme) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat_n(theme.bar_filled, filled));
    out.extend(std::iter::repeat_n(theme.bar_empty, width - filled));
    out
}

fn accent(text: &str, theme: &Theme) -> String {
    match &theme.accent {
        Some(code) => format!("\x1b[{code}m{text}\x1b[0m"),
        None => text.to_string(),
    }
}

fn marker(status: StageStatus, theme: &Theme) -> &str {
    match status {
        StageStatus::Completed => &theme.completed_marker,
        StageStatus::Active => &theme.active_marker,
        StageStatus::Pending => &theme.pending_marker,
    }
}

/// Lines of the progress dialog for one snapshot
#[must_use]
pub fn dialog(snapshot: &ProgressSnapshot, theme: &Theme, style: SummaryStyle) -> Vec<String> {
    let percent = rounded_percent(snapshot.percent_complete);
    let stage = snapshot.current_stage();

    let mut lines = vec![
        format!("Digital Footprint Search  {percent}%"),
        accent(&bar(snapshot.percent_complete, theme.bar_width, theme), theme),
        format!(
            "{} {}  ({}/{})",
            glyph(&stage.icon),
            snapshot.current_stage_name,
            snapshot.current_stage_index + 1,
            snapshot.stages.len()
        ),
    ];

    if !snapshot.current_platform_label.is_empty() {
        lines.push(format!(
            "   Searching: {}",
            truncate_with_ellipsis(&snapshot.current_platform_label, PLATFORM_LABEL_MAX_CHARS)
        ));
    }

    if style == SummaryStyle::Compact {
        lines.push(format!(
            "   Results found: {}   Time left: {}",
            snapshot.simulated_result_count,
            format_clock(snapshot.remaining_secs)
        ));
        return lines;
    }

    lines.push(format!(
        "   Stage progress: {} {}%",
        bar(snapshot.stage_fill_percent(), STAGE_BAR_WIDTH, theme),
        rounded_percent(snapshot.stage_fill_percent())
    ));
    lines.push(format!("   Results found: {}", snapshot.simulated_result_count));
    lines.push(String::new());

    for (stage, status) in snapshot.checklist() {
        let row = format!(
            "{} {} {:<width$} {}",
            marker(status, theme),
            glyph(&stage.icon),
            stage.name,
            status.label(),
            width = NAME_COLUMN_WIDTH
        );
        let row = if status == StageStatus::Active {
            accent(&row, theme)
        } else {
            row
        };
        match snapshot.stage_results.get(&stage.name) {
            Some(found) => lines.push(format!("{row}  ({found} found)")),
            None => lines.push(row),
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Platforms: {}   Completed: {}   Time left: {}   Success rate: {}%",
        snapshot.stages.len(),
        snapshot.completed_stage_count(),
        format_clock(snapshot.remaining_secs),
        snapshot.success_rate()
    ));
    lines
}

/// The floating status line; empty while the rotator is stopped
#[must_use]
pub fn status_line(snapshot: &StatusSnapshot) -> String {
    if snapshot.is_blank() {
        return String::new();
    }
    let icon = glyph(&snapshot.icon);
    if icon.is_empty() {
        snapshot.message.clone()
    } else {
        format!("{icon} {}", snapshot.message)
    }
}
