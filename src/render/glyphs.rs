//! Icon names to terminal glyphs

use crate::icon::Icon;

/// Glyph for a symbolic icon name; unknown names fall back to a bullet
#[must_use]
pub fn glyph(icon: &Icon) -> &'static str {
    match icon.as_str() {
        "search" => "🔍",
        "users" => "👥",
        "briefcase" => "💼",
        "academic-cap" => "🎓",
        "globe" => "🌐",
        "newspaper" => "📰",
        "chart-bar" => "📊",
        "" => "",
        _ => "•",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_unknown_and_empty_icons() {
        assert_eq!(glyph(&Icon::from("globe")), "🌐");
        assert_eq!(glyph(&Icon::from("rocket")), "•");
        assert_eq!(glyph(&Icon::none()), "");
    }
}
