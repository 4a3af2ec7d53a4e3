use serde::{Deserialize, Serialize};

/// One image plus its hotspots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    /// Image location; relative paths resolve against the tour file's directory.
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl Slide {
    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }
}

/// A clickable polygonal region on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<PopupContent>,
    #[serde(flatten)]
    pub coordinates: HotspotCoordinates,
}

impl Hotspot {
    /// Accessible name for the region: label, then id, then a generic prompt.
    pub fn display_label(&self) -> &str {
        [self.label.as_deref(), Some(self.id.as_str())]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("Learn more")
    }

    /// Key used to collapse repeated hotspots during the auto tour.
    ///
    /// The trimmed label when non-empty, otherwise the trimmed id.
    pub fn tour_key(&self) -> &str {
        match self.label.as_deref().filter(|l| !l.is_empty()) {
            Some(label) => label.trim(),
            None => self.id.trim(),
        }
    }
}

/// Raw coordinate data exactly as stored in the tour file.
///
/// Either `points_px` (with a declared source size) or `points`
/// (percentages) is expected; see [`crate::geometry::resolve_points`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotCoordinates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_px: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjust_offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjust_offset_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjust_scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjust_scale_y: Option<f64>,
}

impl HotspotCoordinates {
    /// `true` when pixel coordinates will be used but the declared source
    /// size is missing or zero on either axis.
    pub fn has_degenerate_source_size(&self) -> bool {
        let uses_px = self.points_px.as_ref().is_some_and(|px| px.len() >= 4);
        let bad = |v: Option<f64>| v.is_none_or(|v| v == 0.0 || !v.is_finite());
        uses_px && (bad(self.source_width) || bad(self.source_height))
    }
}

/// Tour-wide fallbacks for per-hotspot offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjustDefaults {
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
}

/// Popup content: either a bare title string or a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PopupContent {
    Text(String),
    Detailed(PopupDetails),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopupDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,
}

impl PopupContent {
    pub fn title(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Detailed(d) => d.title.as_deref().unwrap_or(""),
        }
    }

    /// Body paragraphs in `what → role → integration` order, skipping empty fields.
    pub fn paragraphs(&self) -> Vec<&str> {
        match self {
            Self::Text(_) => Vec::new(),
            Self::Detailed(d) => [&d.what, &d.role, &d.integration]
                .into_iter()
                .filter_map(|p| p.as_deref())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}
