use serde::Deserialize;

use crate::render::Color;

// ── CoordinatorConfig ─────────────────────────────────────────────────────────

/// Presentation settings for a level coordinator.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "marker_radius": 8.0, "draw_highlights": true }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Radius of the movement marker circle in pixels.
    pub marker_radius: f32,
    /// Fill colour of the movement marker.
    pub marker_color: Color,
    /// Tint recorded for cells inside an enemy attack pattern.
    pub highlight_color: Color,
    /// Paint interaction highlights over their cells when drawing.
    pub draw_highlights: bool,
    /// Fill colour of the hero placeholder.
    pub hero_color: Color,
}

impl Default for CoordinatorConfig {
    /// A 12 px blue marker, red highlights that are recorded but not drawn.
    fn default() -> Self {
        Self {
            marker_radius: 12.0,
            marker_color: Color::BLUE,
            highlight_color: Color::RED,
            draw_highlights: false,
            hero_color: Color::YELLOW,
        }
    }
}

impl CoordinatorConfig {
    /// Deserialise a config from JSON, filling absent keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
