use hotspot_tour_core::{
    unique_hotspots_by_label, Effect, NavPhase, Size, TourData, Viewer, ViewerEvent, ViewerKey,
    ViewerOptions,
};
use serde_json::json;

fn rect_hotspot(id: &str, label: &str, x: f64) -> serde_json::Value {
    json!({
        "id": id,
        "label": label,
        "content": { "title": label, "what": "Part", "role": "Does things" },
        "points": [[x, 10], [x + 10.0, 10], [x + 10.0, 20], [x, 20]]
    })
}

fn two_slide_tour() -> TourData {
    TourData::from_value(&json!({
        "images": [
            {
                "id": "front", "src": "front.png", "alt": "Front",
                "hotspots": [
                    rect_hotspot("ram-1", "RAM", 10.0),
                    rect_hotspot("ram-2", "RAM", 30.0),
                    rect_hotspot("gpu", "GPU", 50.0)
                ]
            },
            {
                "id": "back", "src": "back.png", "alt": "Back",
                "hotspots": [
                    rect_hotspot("psu", "PSU", 10.0),
                    rect_hotspot("nic", "NIC", 30.0)
                ]
            }
        ]
    }))
}

/// Plays the role of the display surface: completes loads and fades at once.
fn settle(v: &mut Viewer) -> Vec<Effect> {
    let mut seen = Vec::new();
    loop {
        let effects = v.drain_effects();
        if effects.is_empty() {
            return seen;
        }
        for effect in &effects {
            match effect {
                Effect::LoadImage { request, .. } => {
                    v.handle_event(ViewerEvent::ImageLoaded {
                        request: *request,
                        natural: Size::new(1600.0, 900.0),
                    });
                }
                Effect::FadeOut { request } => {
                    v.handle_event(ViewerEvent::FadeOutFinished { request: *request });
                }
                _ => {}
            }
        }
        seen.extend(effects);
    }
}

fn fire(v: &mut Viewer) -> bool {
    let token = v.pending_step().expect("a tour step should be scheduled");
    v.handle_event(ViewerEvent::TimerFired { token })
}

#[test]
fn duplicate_labels_collapse_for_the_tour() {
    let data = two_slide_tour();
    let unique = unique_hotspots_by_label(&data.slides[0].hotspots);
    let labels: Vec<_> = unique.iter().map(|h| h.display_label()).collect();
    assert_eq!(labels, ["RAM", "GPU"]);
}

#[test]
fn full_tour_cycle_visits_four_hotspots() {
    let mut v = Viewer::new(two_slide_tour(), ViewerOptions::default());
    settle(&mut v);
    v.start_tour();
    settle(&mut v);

    let mut activations = Vec::new();
    // 2 hotspots + advance, 2 hotspots + advance back to the start.
    for _ in 0..6 {
        assert!(fire(&mut v));
        for effect in settle(&mut v) {
            if let Effect::PopupOpened { hotspot_id } = effect {
                activations.push(hotspot_id);
            }
        }
    }

    assert_eq!(activations, ["ram-1", "gpu", "psu", "nic"]);
    assert_eq!(v.state().current_index, 0);
    assert_eq!(v.state().auto_tour_hotspot_index, 0);
    assert!(v.tour_running());
    assert!(!v.popup_open());
}

#[test]
fn manual_navigation_stops_tour_and_cancels_step() {
    for action in ["prev", "next", "click", "select"] {
        let mut v = Viewer::new(two_slide_tour(), ViewerOptions::default());
        settle(&mut v);
        v.start_tour();
        settle(&mut v);
        assert!(fire(&mut v));
        settle(&mut v);
        let token = v.pending_step().expect("dwell scheduled");

        match action {
            "prev" => v.prev(),
            "next" => v.next(),
            "click" => {
                assert!(v.click_hotspot("gpu"));
            }
            _ => v.select_slide(1),
        }

        let effects = settle(&mut v);
        assert!(!v.tour_running(), "{action} should stop the tour");
        assert_eq!(v.pending_step(), None);
        assert!(effects.contains(&Effect::CancelStep { token }));
        assert!(effects.contains(&Effect::TourStateChanged { running: false }));
        // The cancelled timer firing late does nothing.
        assert!(!v.handle_event(ViewerEvent::TimerFired { token }));
        assert!(v.drain_effects().is_empty());
    }
}

#[test]
fn wraparound_navigation() {
    let images: Vec<_> = (0..5)
        .map(|i| json!({ "id": format!("s{i}"), "src": format!("{i}.png"), "alt": "", "hotspots": [] }))
        .collect();
    let data = TourData::from_value(&json!({ "images": images }));
    let mut v = Viewer::new(data, ViewerOptions::default());
    v.go_to_slide(-1);
    assert_eq!(v.state().current_index, 4);
    v.go_to_slide(5);
    assert_eq!(v.state().current_index, 0);
}

#[test]
fn leaving_a_slide_mid_load_never_rebuilds_the_old_overlay() {
    let mut v = Viewer::new(two_slide_tour(), ViewerOptions::default());
    let first = match v.drain_effects().as_slice() {
        [Effect::LoadImage { request, .. }] => *request,
        other => panic!("unexpected effects: {other:?}"),
    };
    // Nothing is displayed yet, so the next slide loads without a fade.
    v.next();
    let second = match v.drain_effects().as_slice() {
        [Effect::LoadImage { request, slide_index: 1, .. }] => *request,
        other => panic!("unexpected effects: {other:?}"),
    };

    assert!(!v.handle_event(ViewerEvent::ImageLoaded {
        request: first,
        natural: Size::new(10.0, 10.0),
    }));
    assert!(v.drain_effects().is_empty());
    assert_eq!(v.phase(), NavPhase::Loading(second));
}

#[test]
fn keyboard_flow() {
    let mut v = Viewer::new(two_slide_tour(), ViewerOptions::default());
    settle(&mut v);

    assert!(v.handle_key(ViewerKey::ArrowRight));
    settle(&mut v);
    assert_eq!(v.current_slide().map(|s| s.id.as_str()), Some("back"));

    assert!(v.click_hotspot("nic"));
    assert!(!v.handle_key(ViewerKey::ArrowLeft), "arrows are ignored while a popup is open");
    assert!(v.handle_key(ViewerKey::Escape));
    assert!(v.handle_key(ViewerKey::ArrowLeft));
    settle(&mut v);
    assert_eq!(v.current_slide().map(|s| s.id.as_str()), Some("front"));
}

#[test]
fn load_failure_keeps_viewer_usable() {
    let mut v = Viewer::new(two_slide_tour(), ViewerOptions::default());
    let request = match v.drain_effects().as_slice() {
        [Effect::LoadImage { request, .. }] => *request,
        other => panic!("unexpected effects: {other:?}"),
    };
    v.handle_event(ViewerEvent::ImageFailed {
        request,
        reason: "missing file".into(),
    });
    let effects = v.drain_effects();
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::ShowImageError { slide_index: 0, .. })));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::RebuildOverlay { .. })));
    assert!(!v.click_hotspot("gpu"));

    v.next();
    settle(&mut v);
    assert!(v.current_image_size().is_some());
    assert!(v.click_hotspot("psu"));
}
