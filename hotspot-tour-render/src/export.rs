//! SVG export of an overlay.
//!
//! The document uses the natural image size as its `viewBox` and
//! `preserveAspectRatio="none"`, so it can be stretched over the image at
//! any display size.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::RenderError;
use crate::overlay::Overlay;

/// Serialise `overlay` as a standalone SVG document.
///
/// `image_href`, when given, is drawn underneath the regions.
pub fn overlay_to_svg(overlay: &Overlay, image_href: Option<&str>) -> String {
    let (w, h) = (overlay.view_box.width, overlay.view_box.height);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="hotspot-svg" viewBox="0 0 {w} {h}" preserveAspectRatio="none" data-slide-id="{}">"#,
        escape_xml(&overlay.slide_id)
    );
    if let Some(href) = image_href {
        let _ = writeln!(
            svg,
            r#"  <image href="{}" x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="none"/>"#,
            escape_xml(href)
        );
    }
    for region in &overlay.regions {
        let _ = writeln!(
            svg,
            r#"  <g class="hotspot-region" role="button" tabindex="0" aria-label="{}" data-hotspot-id="{}">"#,
            escape_xml(&region.label),
            escape_xml(&region.hotspot_id)
        );
        let _ = writeln!(
            svg,
            r#"    <path d="{}" fill="transparent"/>"#,
            region.polygon.to_svg_path()
        );
        svg.push_str("  </g>\n");
    }
    svg.push_str("</svg>\n");
    svg
}

/// Write `overlay` as an SVG file.
pub fn export_svg(overlay: &Overlay, image_href: Option<&str>, path: &Path) -> crate::Result<()> {
    let svg = overlay_to_svg(overlay, image_href);
    fs::write(path, svg).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        regions = overlay.regions.len(),
        "Exported overlay SVG to {}",
        path.display()
    );
    Ok(())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::build_overlay;
    use hotspot_tour_core::{AdjustDefaults, Size, TourData};
    use serde_json::json;

    fn overlay() -> Overlay {
        let data = TourData::from_value(&json!({
            "images": [{
                "id": "front", "src": "front.png", "alt": "",
                "hotspots": [
                    { "id": "psu", "label": "Power <PSU> & \"fans\"", "points": [[0, 0], [50, 0], [50, 50]] }
                ]
            }]
        }));
        build_overlay(&data.slides[0], Size::new(200.0, 100.0), &AdjustDefaults::default())
    }

    #[test]
    fn svg_uses_natural_view_box() {
        let svg = overlay_to_svg(&overlay(), None);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"preserveAspectRatio="none""#));
        assert!(svg.contains(r#"<path d="M 0 0 L 100 0 L 100 50 Z" fill="transparent"/>"#));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = overlay_to_svg(&overlay(), Some("img/a&b.png"));
        assert!(svg.contains(r#"aria-label="Power &lt;PSU&gt; &amp; &quot;fans&quot;""#));
        assert!(svg.contains(r#"href="img/a&amp;b.png""#));
    }

    #[test]
    fn export_writes_file() {
        let dir = std::env::temp_dir().join("hotspot_tour_test_export_svg");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("overlay.svg");
        export_svg(&overlay(), None, &path).expect("export should succeed");

        let text = std::fs::read_to_string(&path).expect("file should exist");
        assert!(text.contains(r#"data-hotspot-id="psu""#));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("hotspot_tour_no_such_dir")
            .join("nested")
            .join("overlay.svg");
        assert!(matches!(
            export_svg(&overlay(), None, &path),
            Err(RenderError::Io { .. })
        ));
    }
}
