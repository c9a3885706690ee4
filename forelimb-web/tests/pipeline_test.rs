//! End-to-end: flat detector buffers through to the model transform

use forelimb_web::config::OverlayConfig;
use forelimb_web::overlay::{AssetHandle, AssetRequest, ModelSlot, SkeletonOverlay};
use forelimb_web::pose::{
    LandmarkSet, FLOATS_PER_HAND, INDEX_MCP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP, WRIST,
};

/// Reference hand, shifted right by `dx`
fn flat_hand(dx: f32) -> Vec<f32> {
    let mut data = vec![0.5; FLOATS_PER_HAND];
    let mut put = |index: usize, x: f32, y: f32| {
        data[index * 3] = x + dx;
        data[index * 3 + 1] = y;
        data[index * 3 + 2] = 0.0;
    };
    put(WRIST, 0.5, 0.5);
    put(INDEX_MCP, 0.5, 0.4);
    put(PINKY_MCP, 0.6, 0.4);
    put(MIDDLE_MCP, 0.55, 0.4);
    put(MIDDLE_TIP, 0.55, 0.2);
    data
}

fn overlay_with(json: &str) -> SkeletonOverlay {
    let mut overlay = SkeletonOverlay::new(OverlayConfig::from_json(json).unwrap());
    let generation = match overlay.select_species("human").unwrap() {
        AssetRequest::Load(ticket) => ticket.generation,
        other => panic!("expected load, got {other:?}"),
    };
    assert!(overlay.complete_load(generation, Ok(AssetHandle(1))));
    overlay
}

#[test]
fn test_reference_scenario_without_smoothing() {
    let mut overlay = overlay_with(r#"{"smoothing_factor": 0.0}"#);
    let set = LandmarkSet::from_flat(&flat_hand(0.0), 0).unwrap();

    let transform = overlay.update(Some(&set)).transform.unwrap();
    assert!((transform.position.x - 0.05).abs() < 1e-5);
    assert!((transform.position.y - 0.1).abs() < 1e-5);
    assert!((transform.scale - 0.304_138 * 40.0).abs() < 1e-3);

    // Moving hand is tracked with no lag
    let moved = LandmarkSet::from_flat(&flat_hand(0.1), 0).unwrap();
    let transform = overlay.update(Some(&moved)).transform.unwrap();
    assert!((transform.position.x - 0.25).abs() < 1e-5);
}

#[test]
fn test_smoothed_position_lags_then_settles() {
    let mut overlay = overlay_with(r#"{"smoothing_factor": 0.6}"#);
    let start = LandmarkSet::from_flat(&flat_hand(0.0), 0).unwrap();
    let target = LandmarkSet::from_flat(&flat_hand(0.1), 0).unwrap();

    overlay.update(Some(&start));
    let first = overlay.update(Some(&target)).transform.unwrap().position.x;
    assert!(first > 0.05 && first < 0.25);

    let mut last = first;
    for _ in 0..40 {
        let x = overlay.update(Some(&target)).transform.unwrap().position.x;
        assert!(x >= last - 1e-6);
        last = x;
    }
    assert!((last - 0.25).abs() < 1e-3);
}

#[test]
fn test_reset_policy_avoids_snap_from_stale_pose() {
    let mut overlay = overlay_with(r#"{"smoothing_factor": 0.9, "stale_policy": {"reset_after": 2}}"#);
    let left = LandmarkSet::from_flat(&flat_hand(-0.2), 0).unwrap();
    let right = LandmarkSet::from_flat(&flat_hand(0.2), 0).unwrap();

    overlay.update(Some(&left));
    for _ in 0..3 {
        let out = overlay.update(None);
        assert!(!out.visible);
    }

    // State expired, so the reappearing hand is adopted directly
    let out = overlay.update(Some(&right));
    assert!(out.visible);
    assert!((out.transform.unwrap().position.x - 0.45).abs() < 1e-5);
}

#[test]
fn test_hold_policy_resumes_from_stale_pose() {
    let mut overlay = overlay_with(r#"{"smoothing_factor": 0.5, "stale_policy": "hold"}"#);
    let left = LandmarkSet::from_flat(&flat_hand(-0.2), 0).unwrap();
    let right = LandmarkSet::from_flat(&flat_hand(0.2), 0).unwrap();

    overlay.update(Some(&left));
    for _ in 0..30 {
        overlay.update(None);
    }
    let x = overlay.update(Some(&right)).transform.unwrap().position.x;
    // Halfway between -0.35 and 0.45
    assert!((x - 0.05).abs() < 1e-5);
}

#[test]
fn test_species_switch_race() {
    let mut overlay = SkeletonOverlay::default();
    let bat = match overlay.select_species("bat").unwrap() {
        AssetRequest::Load(ticket) => ticket,
        other => panic!("expected load, got {other:?}"),
    };
    let human = match overlay.select_species("human").unwrap() {
        AssetRequest::Load(ticket) => ticket,
        other => panic!("expected load, got {other:?}"),
    };

    assert!(overlay.complete_load(human.generation, Ok(AssetHandle(20))));
    assert!(!overlay.complete_load(bat.generation, Ok(AssetHandle(10))));

    let set = LandmarkSet::from_flat(&flat_hand(0.0), 0).unwrap();
    let out = overlay.update(Some(&set));
    assert_eq!(out.slot, ModelSlot::LoadedAsset(AssetHandle(20)));
    assert_eq!(overlay.selected_species(), Some("human"));

    // Bat finished late but is cached for the next switch
    assert_eq!(
        overlay.select_species("bat").unwrap(),
        AssetRequest::Cached(AssetHandle(10))
    );
}

#[test]
fn test_user_scale_clamped_in_transform() {
    let mut overlay = overlay_with(r#"{"smoothing_factor": 0.0}"#);
    assert_eq!(overlay.user_scale_mut().set(10.0), 2.0);
    let set = LandmarkSet::from_flat(&flat_hand(0.0), 0).unwrap();
    let scale = overlay.update(Some(&set)).transform.unwrap().scale;
    assert!((scale - 0.304_138 * 40.0 * 2.0).abs() < 1e-3);
}
