//! Navigation scenarios driven through the public controller API.
//!
//! Every test runs headless: a seeded RNG, a recording overlay, and fixed
//! 60 Hz ticks standing in for the render loop.

use glam::{Vec2, Vec3, Vec4};
use morph::{
    Gesture, KeyCode, MeshGeometry, MeshId, MeshLibrary, MorphController, MorphSettings,
    RecordingOverlay, TimelineAssets, TimelineEntry, TimelineState, TransitionPhase,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const POINTS: usize = 300;
const FRAME: f32 = 1.0 / 60.0;

fn entry(mesh: &str, year: u32, rate: f64) -> TimelineEntry {
    TimelineEntry {
        mesh: MeshId::new(mesh),
        year: year.to_string(),
        event: format!("{} washed ashore", mesh),
        species: "Northern fulmar".to_string(),
        contamination_rate: rate,
        description: "of birds examined, had plastic".to_string(),
        references: Some("https://example.org/study".to_string()),
    }
}

fn geometry(seed: f32) -> MeshGeometry {
    MeshGeometry::from_vertices(&[
        [seed, 0.0, 0.0],
        [0.0, seed, 0.0],
        [0.0, 0.0, seed],
        [-seed, -seed, 0.5],
    ])
    .unwrap()
}

fn controller_for(entries: Vec<TimelineEntry>, loaded: &[&str]) -> MorphController<RecordingOverlay> {
    let mut meshes = MeshLibrary::new();
    for (i, id) in loaded.iter().enumerate() {
        meshes.insert(MeshId::new(*id), geometry(0.25 * (i + 1) as f32));
    }
    let settings = MorphSettings {
        point_count: POINTS,
        ..Default::default()
    };
    let mut controller = MorphController::with_rng(
        TimelineAssets::new(entries, meshes),
        settings,
        RecordingOverlay::new(),
        StdRng::seed_from_u64(42),
    );
    controller.show_initial_cloud();
    controller
}

fn abc() -> MorphController<RecordingOverlay> {
    controller_for(
        vec![entry("A", 1960, 0.2), entry("B", 1990, 0.5), entry("C", 2020, 0.9)],
        &["A", "B", "C"],
    )
}

fn settle(controller: &mut MorphController<RecordingOverlay>) -> usize {
    for frame in 0..20_000 {
        if controller.is_settled() {
            return frame;
        }
        controller.tick(FRAME);
    }
    panic!("controller never settled: {:?}", controller.phase());
}

fn mesh_at(controller: &MorphController<RecordingOverlay>) -> Option<&str> {
    controller
        .current_state()
        .and_then(TimelineState::mesh_id)
        .map(MeshId::as_str)
}

// ============================================================================
// Intro
// ============================================================================

#[test]
fn test_backward_on_intro_is_ignored() {
    let mut c = abc();
    assert!(!c.gesture(Gesture::Backward));
    c.on_key(KeyCode::PageUp);
    assert_eq!(c.active_index(), 0);
    assert!(c.intro_visible());
    assert!(!c.is_locked());
}

#[test]
fn test_forward_on_intro_jumps_to_first_mesh() {
    let mut c = abc();
    c.on_key(KeyCode::ArrowDown);
    assert_eq!(c.active_index(), 1);
    assert!(!c.intro_visible());
    assert_eq!(c.presenter().intro_visible(), Some(false));
    settle(&mut c);
    assert_eq!(mesh_at(&c), Some("A"));
}

// ============================================================================
// Locking
// ============================================================================

#[test]
fn test_gesture_while_locked_is_dropped() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    assert!(c.is_locked());
    assert!(!c.gesture(Gesture::Forward));
    c.on_key(KeyCode::PageDown);
    c.on_wheel(Vec2::new(0.0, 500.0));
    assert_eq!(c.active_index(), 1);
    settle(&mut c);
    assert_eq!(c.active_index(), 1);
}

#[test]
fn test_lock_holds_through_post_mesh_grace_period() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    while matches!(c.phase(), TransitionPhase::Morphing { .. }) {
        c.tick(FRAME);
    }
    // Stats are already showing but input stays locked for the grace period.
    assert!(c.presenter().last_update().is_some_and(|u| u.show));
    assert!(c.is_locked());
    assert!(!c.gesture(Gesture::Forward));
    settle(&mut c);
    assert!(!c.is_locked());
}

// ============================================================================
// Full walk
// ============================================================================

#[test]
fn test_three_entries_walk_forward_to_outro() {
    let mut c = abc();
    assert_eq!(c.states().len(), 7);

    c.gesture(Gesture::Forward);
    settle(&mut c);
    assert_eq!(c.active_index(), 1);

    // Mesh -> cloud chains straight into the next mesh.
    c.gesture(Gesture::Forward);
    settle(&mut c);
    assert_eq!(c.active_index(), 3);
    assert_eq!(mesh_at(&c), Some("B"));

    c.gesture(Gesture::Forward);
    settle(&mut c);
    assert_eq!(c.active_index(), 5);
    assert_eq!(mesh_at(&c), Some("C"));
    assert_eq!(c.presenter().outro_visible(), Some(false));

    // Last mesh -> terminal cloud shows the outro instead of chaining.
    c.gesture(Gesture::Forward);
    settle(&mut c);
    assert_eq!(c.active_index(), 6);
    assert_eq!(c.presenter().outro_visible(), Some(true));
    assert!(!c.presenter().last_update().unwrap().show);

    assert!(!c.gesture(Gesture::Forward));
    assert_eq!(c.active_index(), 6);

    let shown: Vec<_> = c.presenter().shown().iter().map(|u| u.year.clone()).collect();
    assert_eq!(shown, ["1960", "1990", "2020"]);
}

#[test]
fn test_overlay_carries_entry_and_step() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    settle(&mut c);
    c.gesture(Gesture::Forward);
    settle(&mut c);
    let update = c.presenter().last_update().unwrap();
    assert!(update.show);
    assert_eq!(update.event, "B washed ashore");
    assert_eq!(update.species, "Northern fulmar");
    assert_eq!(update.contamination_rate, 0.5);
    assert_eq!(update.references.as_deref(), Some("https://example.org/study"));
    assert_eq!((update.step, update.total_steps), (Some(2), Some(3)));
}

#[test]
fn test_round_trip_returns_to_same_mesh() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    settle(&mut c);
    c.gesture(Gesture::Forward);
    settle(&mut c);
    assert_eq!(mesh_at(&c), Some("B"));

    c.gesture(Gesture::Backward);
    settle(&mut c);
    assert_eq!(c.active_index(), 1);
    assert_eq!(mesh_at(&c), Some("A"));
}

#[test]
fn test_backward_from_terminal_cloud_lands_on_last_mesh() {
    let mut c = abc();
    for _ in 0..4 {
        c.gesture(Gesture::Forward);
        settle(&mut c);
    }
    assert_eq!(c.active_index(), 6);
    c.gesture(Gesture::Backward);
    assert_eq!(c.presenter().outro_visible(), Some(false));
    settle(&mut c);
    assert_eq!(mesh_at(&c), Some("C"));
}

#[test]
fn test_cloud_to_cloud_jump_does_not_chain() {
    let mut c = abc();
    assert!(c.transition_to(2, 1));
    settle(&mut c);
    assert_eq!(c.active_index(), 2);

    assert!(c.transition_to(4, 1));
    assert!(c.is_locked());
    assert!(!c.presenter().last_update().unwrap().show);
    let frames = settle(&mut c);
    assert!(frames > 0);
    // No auto-advance into mesh C.
    assert_eq!(c.active_index(), 4);
    assert_eq!(mesh_at(&c), None);
    assert!(!c.is_locked());
    assert_eq!(c.presenter().outro_visible(), Some(false));
    for _ in 0..120 {
        c.tick(FRAME);
    }
    assert_eq!(c.active_index(), 4);

    assert!(c.transition_to(6, 1));
    settle(&mut c);
    assert_eq!(c.active_index(), 6);
    assert_eq!(c.presenter().outro_visible(), Some(true));
    assert!(!c.is_locked());
    assert!(c.presenter().shown().is_empty());
}

// ============================================================================
// Return to start
// ============================================================================

#[test]
fn test_backward_from_first_mesh_restores_intro() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    settle(&mut c);
    c.gesture(Gesture::Backward);
    assert!(c.is_locked());
    settle(&mut c);

    assert_eq!(c.active_index(), 0);
    assert!(c.intro_visible());
    assert_eq!(c.presenter().intro_visible(), Some(true));
    assert!(!c.presenter().last_update().unwrap().show);

    // The intro behaves exactly as on first launch.
    assert!(!c.gesture(Gesture::Backward));
    assert!(c.gesture(Gesture::Forward));
    assert_eq!(c.active_index(), 1);
}

#[test]
fn test_return_to_start_scatters_points_back_into_cloud() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    settle(&mut c);
    c.gesture(Gesture::Backward);
    settle(&mut c);
    let radius = c.settings().cloud_radius();
    for p in c.points().unwrap().positions() {
        let r = p.length();
        assert!(r >= radius.start - 1e-3 && r <= radius.end + 1e-3, "radius {}", r);
    }
}

// ============================================================================
// Geometry and color
// ============================================================================

#[test]
fn test_mesh_arrival_matches_wrapped_targets() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    settle(&mut c);
    let geometry = &c.meshes()[&MeshId::new("A")];
    let expected = procgen::mesh_targets(geometry.positions(), POINTS, c.settings().mesh_scale);
    assert_eq!(c.points().unwrap().positions(), expected.as_slice());
}

#[test]
fn test_zero_rate_leaves_colors_untouched() {
    let mut c = controller_for(vec![entry("A", 1970, 0.0)], &["A"]);
    c.gesture(Gesture::Forward);
    settle(&mut c);
    for _ in 0..300 {
        c.tick(FRAME);
    }
    assert!(c.points().unwrap().colors().iter().all(|&col| col == Vec4::ONE));
    assert!(c.highlight().effect().is_none());
}

#[test]
fn test_highlight_quota_and_restore_on_leave() {
    let mut c = abc();
    c.gesture(Gesture::Forward);
    settle(&mut c);
    let effect = c.highlight().effect().unwrap();
    assert_eq!(effect.selected().len(), (POINTS as f32 * 0.2) as usize);
    assert_eq!(effect.version(), c.highlight_version());
    for _ in 0..200 {
        c.tick(FRAME);
    }
    assert!(c.points().unwrap().colors().iter().any(|&col| col != Vec4::ONE));

    c.gesture(Gesture::Forward);
    assert!(c.points().unwrap().colors().iter().all(|&col| col == Vec4::ONE));
}

// ============================================================================
// Missing assets
// ============================================================================

#[test]
fn test_missing_mesh_is_tolerated() {
    let mut c = controller_for(
        vec![entry("A", 1960, 0.1), entry("B", 1990, 0.3), entry("C", 2020, 0.1)],
        &["A", "C"],
    );
    c.gesture(Gesture::Forward);
    settle(&mut c);
    c.gesture(Gesture::Forward);
    settle(&mut c);
    assert_eq!(c.active_index(), 3);
    assert_eq!(mesh_at(&c), Some("B"));
    assert_eq!(c.presenter().last_update().unwrap().year, "1990");

    // The buffer stayed on the intermediate cloud; navigation carries on.
    let positions = c.points().unwrap().positions();
    assert!(positions.iter().all(|p| p.length() >= 2.0 - 1e-3));
    c.gesture(Gesture::Forward);
    settle(&mut c);
    assert_eq!(mesh_at(&c), Some("C"));
}

#[test]
fn test_empty_timeline_never_moves() {
    let mut c = controller_for(Vec::new(), &[]);
    assert_eq!(c.states().len(), 1);
    assert!(!c.gesture(Gesture::Forward));
    assert_eq!(c.active_index(), 0);
    assert_eq!(c.points().unwrap().position(0).map(|p| p != Vec3::ZERO), Some(true));
    // Nothing to navigate to, so the intro stays up.
    assert!(c.intro_visible());
    assert!(!c.cursor().intro_dismissed());
    assert_ne!(c.presenter().intro_visible(), Some(false));
}
