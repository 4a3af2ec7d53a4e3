//! Fixtures shared by the unit tests.

use crate::data::TourData;
use crate::geometry::Size;
use crate::model::{Hotspot, HotspotCoordinates, PopupContent, Slide};
use crate::tour::TourTiming;
use crate::viewer::{Effect, RequestId, Viewer, ViewerEvent, ViewerOptions};

pub const NATURAL: Size = Size {
    width: 800.0,
    height: 600.0,
};

/// A hotspot with a valid percentage rectangle.
pub fn hotspot(id: &str, label: Option<&str>) -> Hotspot {
    Hotspot {
        id: id.to_string(),
        label: label.map(str::to_string),
        content: Some(PopupContent::Text(format!("About {id}"))),
        coordinates: HotspotCoordinates {
            points: Some(vec![
                vec![10.0, 10.0],
                vec![30.0, 10.0],
                vec![30.0, 30.0],
                vec![10.0, 30.0],
            ]),
            ..HotspotCoordinates::default()
        },
    }
}

/// `n` slides `s0..`, each with one hotspot `s{i}-h{j}` per label.
pub fn tour(n: usize, labels: &[&str]) -> TourData {
    let slides = (0..n)
        .map(|i| Slide {
            id: format!("s{i}"),
            src: format!("s{i}.png"),
            alt: format!("Slide {i}"),
            hotspots: labels
                .iter()
                .enumerate()
                .map(|(j, label)| hotspot(&format!("s{i}-h{j}"), Some(label)))
                .collect(),
        })
        .collect();
    TourData {
        slides,
        ..TourData::default()
    }
}

pub fn viewer(data: TourData, fade: bool) -> Viewer {
    Viewer::new(
        data,
        ViewerOptions {
            fade,
            timing: TourTiming::default(),
        },
    )
}

pub fn load_ok(v: &mut Viewer, request: RequestId) -> bool {
    v.handle_event(ViewerEvent::ImageLoaded {
        request,
        natural: NATURAL,
    })
}

/// Complete every pending fade and image load until the viewer settles.
/// Returns all effects drained along the way. Timers are left alone.
pub fn drain_loads(v: &mut Viewer) -> Vec<Effect> {
    let mut all = Vec::new();
    loop {
        let effects = v.drain_effects();
        let mut answered = false;
        for effect in &effects {
            match effect {
                Effect::LoadImage { request, .. } => {
                    answered |= load_ok(v, *request);
                }
                Effect::FadeOut { request } => {
                    answered |= v.handle_event(ViewerEvent::FadeOutFinished { request: *request });
                }
                _ => {}
            }
        }
        all.extend(effects);
        if !answered {
            all.extend(v.drain_effects());
            return all;
        }
    }
}

/// Fire the pending tour step, if any.
pub fn fire_pending(v: &mut Viewer) -> bool {
    match v.pending_step() {
        Some(token) => v.handle_event(ViewerEvent::TimerFired { token }),
        None => false,
    }
}
