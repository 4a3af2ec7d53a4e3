//! Tour data loading with permissive validation.
//!
//! The document layout is `{ "images": [Slide...], "defaultAdjustOffsetX": n,
//! "defaultAdjustOffsetY": n }`. Malformed slides and hotspots are logged
//! and skipped; only unreadable or non-JSON input is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{AdjustDefaults, Hotspot, HotspotCoordinates, Slide};

/// A validated tour: the slide list plus tour-wide defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourData {
    pub slides: Vec<Slide>,
    pub defaults: AdjustDefaults,
    /// Directory that relative image sources resolve against.
    pub base_dir: Option<PathBuf>,
}

impl TourData {
    /// Read and validate a tour file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CoreError::ReadData {
            path: path.to_path_buf(),
            source,
        })?;
        let mut data = Self::from_json_str(&text)?;
        data.base_dir = path.parent().map(Path::to_path_buf);
        info!(
            slides = data.slides.len(),
            "Loaded tour data from {}",
            path.display()
        );
        Ok(data)
    }

    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Build from an already parsed document. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let images = match value.get("images") {
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                warn!("Tour data: 'images' is not a list; no slides loaded");
                &[]
            }
            None => {
                warn!("Tour data: 'images' is missing; no slides loaded");
                &[]
            }
        };

        let slides: Vec<Slide> = images
            .iter()
            .enumerate()
            .filter_map(|(i, v)| parse_slide(i, v))
            .collect();

        if slides.is_empty() {
            warn!("Tour data contains no usable slides");
        }

        Self {
            slides,
            defaults: AdjustDefaults {
                offset_x: value.get("defaultAdjustOffsetX").and_then(Value::as_f64),
                offset_y: value.get("defaultAdjustOffsetY").and_then(Value::as_f64),
            },
            base_dir: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Resolve a slide's `src` to a filesystem path.
    pub fn image_path(&self, src: &str) -> PathBuf {
        let p = Path::new(src);
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }
}

fn parse_slide(index: usize, value: &Value) -> Option<Slide> {
    let Some(obj) = value.as_object() else {
        warn!("Skipping slide at index {index}: expected an object");
        return None;
    };

    let Some(src) = obj.get("src").and_then(Value::as_str) else {
        warn!("Skipping slide at index {index}: missing image 'src'");
        return None;
    };

    let id = match obj.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => {
            warn!("Slide at index {index} has no string 'id'; expected {{ id, src, alt, hotspots }}");
            format!("slide-{}", index + 1)
        }
    };

    let alt = match obj.get("alt") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            warn!(slide = %id, "Slide has no string 'alt'");
            String::new()
        }
    };

    let hotspots = match obj.get("hotspots") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, h)| parse_hotspot(&id, i, h))
            .collect(),
        _ => {
            warn!(slide = %id, "Slide 'hotspots' is not a list; showing the image without hotspots");
            Vec::new()
        }
    };

    debug!(slide = %id, "Parsed slide");
    Some(Slide {
        id,
        src: src.to_string(),
        alt,
        hotspots,
    })
}

/// Fields that decide where a hotspot is drawn. A wrong type in any of
/// them drops the hotspot.
const COORDINATE_KEYS: [&str; 4] = ["pointsPx", "sourceWidth", "sourceHeight", "points"];

fn parse_hotspot(slide_id: &str, index: usize, value: &Value) -> Option<Hotspot> {
    let Some(obj) = value.as_object() else {
        warn!(slide = %slide_id, "Skipping hotspot at index {index}: expected an object");
        return None;
    };

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            let id = format!("{slide_id}-hotspot-{}", index + 1);
            warn!(slide = %slide_id, "Hotspot at index {index} has no id; using '{id}'");
            id
        }
    };

    let coordinate_fields: Map<String, Value> = COORDINATE_KEYS
        .iter()
        .filter_map(|k| obj.get(*k).map(|v| ((*k).to_string(), v.clone())))
        .collect();
    let mut coordinates =
        match serde_json::from_value::<HotspotCoordinates>(Value::Object(coordinate_fields)) {
            Ok(c) => c,
            Err(e) => {
                warn!(slide = %slide_id, hotspot = %id, "Skipping hotspot with malformed coordinates: {e}");
                return None;
            }
        };
    coordinates.adjust_offset_x = number_field(obj, "adjustOffsetX", &id);
    coordinates.adjust_offset_y = number_field(obj, "adjustOffsetY", &id);
    coordinates.adjust_scale_x = number_field(obj, "adjustScaleX", &id);
    coordinates.adjust_scale_y = number_field(obj, "adjustScaleY", &id);

    if coordinates.has_degenerate_source_size() {
        warn!(
            slide = %slide_id,
            hotspot = %id,
            "Hotspot pixel coordinates have a missing or zero source size; scaling against 1"
        );
    }

    Some(Hotspot {
        label: optional_field(obj, "label", &id),
        content: optional_field(obj, "content", &id),
        id,
        coordinates,
    })
}

/// Read an optional field, ignoring it with a warning when it has the
/// wrong type.
fn optional_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, hotspot: &str) -> Option<T> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => match serde_json::from_value(v.clone()) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!(hotspot = %hotspot, "Ignoring hotspot '{key}': {e}");
                None
            }
        },
    }
}

/// Numeric adjustment field. Numeric strings are accepted; anything else
/// is ignored with a warning.
fn number_field(obj: &Map<String, Value>, key: &str, hotspot: &str) -> Option<f64> {
    let value = obj.get(key)?;
    let number = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    if number.is_none() {
        warn!(hotspot = %hotspot, "Ignoring hotspot '{key}': expected a number, got {value}");
    }
    number
}
