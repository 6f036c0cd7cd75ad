//! Style configuration for LST map rendering.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::gradient::{Color, Gradient};

/// Color stop for a gradient, in data units (Kelvin for LST).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: String,
}

/// A style definition, loadable from JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleDefinition {
    pub name: String,
    pub units: Option<String>,
    pub stops: Vec<ColorStop>,
}

impl StyleDefinition {
    /// Load a style definition from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Load a style definition from a JSON file.
    pub fn from_file(path: &std::path::Path) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RenderError::InvalidStyle(format!("{}: {e}", path.display())))?;
        Self::from_json(&content).map_err(|e| RenderError::InvalidStyle(e.to_string()))
    }

    /// The built-in thermal ramp for land surface temperature in Kelvin,
    /// deep purple through blue/cyan/green/yellow/orange to dark red.
    pub fn lst_default() -> Self {
        let stops = [
            (223.15, "#19004C"),
            (243.15, "#0000FF"),
            (273.15, "#00FFFF"),
            (283.15, "#00FF00"),
            (293.15, "#FFFF00"),
            (303.15, "#FFA500"),
            (313.15, "#FF0000"),
            (323.15, "#8B0000"),
        ];
        Self {
            name: "lst_thermal".to_string(),
            units: Some("K".to_string()),
            stops: stops
                .iter()
                .map(|(value, color)| ColorStop {
                    value: *value,
                    color: (*color).to_string(),
                })
                .collect(),
        }
    }

    /// Convert the stops into a normalized gradient. Stop values only fix
    /// the relative spacing of the colors; the caller maps its own data
    /// range onto 0..1.
    pub fn to_gradient(&self) -> RenderResult<Gradient> {
        if self.stops.len() < 2 {
            return Err(RenderError::InvalidStyle(format!(
                "style '{}' needs at least two color stops",
                self.name
            )));
        }

        let mut parsed: Vec<(f32, Color)> = Vec::with_capacity(self.stops.len());
        for stop in &self.stops {
            let (r, g, b) = hex_to_rgb(&stop.color).ok_or_else(|| {
                RenderError::InvalidStyle(format!(
                    "style '{}': bad hex color '{}'",
                    self.name, stop.color
                ))
            })?;
            parsed.push((stop.value, Color::opaque(r, g, b)));
        }
        parsed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let first = parsed[0].0;
        let last = parsed[parsed.len() - 1].0;
        let span = last - first;
        if span <= 0.0 {
            return Err(RenderError::InvalidStyle(format!(
                "style '{}': stop values must span a range",
                self.name
            )));
        }

        let normalized = parsed
            .into_iter()
            .map(|(v, c)| ((v - first) / span, c))
            .collect();
        Gradient::new(normalized).ok_or_else(|| {
            RenderError::InvalidStyle(format!("style '{}' produced no gradient", self.name))
        })
    }
}

/// Parse a `#RRGGBB` hex color string.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#FF8000"), Some((255, 128, 0)));
        assert_eq!(hex_to_rgb("00ff00"), Some((0, 255, 0)));
        assert_eq!(hex_to_rgb("#FFF"), None);
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
    }

    #[test]
    fn default_style_builds_a_gradient() {
        let style = StyleDefinition::lst_default();
        let gradient = style.to_gradient().unwrap();
        // Cold end is dark, hot end is dark red
        assert_eq!(gradient.color_at(0.0), Color::opaque(0x19, 0x00, 0x4C));
        assert_eq!(gradient.color_at(1.0), Color::opaque(0x8B, 0x00, 0x00));
    }

    #[test]
    fn style_roundtrips_through_json() {
        let style = StyleDefinition::lst_default();
        let json = serde_json::to_string(&style).unwrap();
        let back = StyleDefinition::from_json(&json).unwrap();
        assert_eq!(back.name, style.name);
        assert_eq!(back.stops.len(), style.stops.len());
    }

    #[test]
    fn degenerate_styles_are_rejected() {
        let one_stop = StyleDefinition {
            name: "bad".into(),
            units: None,
            stops: vec![ColorStop {
                value: 0.0,
                color: "#000000".into(),
            }],
        };
        assert!(matches!(
            one_stop.to_gradient(),
            Err(RenderError::InvalidStyle(_))
        ));

        let flat = StyleDefinition {
            name: "flat".into(),
            units: None,
            stops: vec![
                ColorStop {
                    value: 5.0,
                    color: "#000000".into(),
                },
                ColorStop {
                    value: 5.0,
                    color: "#FFFFFF".into(),
                },
            ],
        };
        assert!(flat.to_gradient().is_err());
    }
}
