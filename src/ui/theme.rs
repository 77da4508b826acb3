//! Shared colours and class names for the dashboard.

use crate::ui::components::toast::ToastKind;

/// Bar fills, assigned to series in order.
pub const SERIES_COLORS: [&str; 2] = ["#8884d8", "#82ca9d"];
pub const GRID_COLOR: &str = "#cbd5e1";
pub const AXIS_COLOR: &str = "#64748b";

pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

pub fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    }
}

pub fn toast_icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "✅",
        ToastKind::Error => "⛔",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_cycle() {
        assert_eq!(series_color(0), "#8884d8");
        assert_eq!(series_color(1), "#82ca9d");
        assert_eq!(series_color(2), series_color(0));
    }
}
