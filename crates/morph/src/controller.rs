//! Timeline navigation: the state machine that owns the point buffer and drives
//! morphs, overlay notifications and the contamination highlight.
//!
//! Everything advances from [`MorphController::tick`], called once per rendered
//! frame. A transition waiting on a morph keeps its continuation as an
//! [`Arrival`]; delayed steps (unlocking, chaining into the next mesh) sit in a
//! small timer queue. Only one transition is ever in flight, guarded by the
//! navigation lock.

use crate::geometry::{MeshLibrary, TimelineAssets};
use crate::highlight::Highlight;
use crate::overlay::{OverlayPresenter, OverlayUpdate};
use crate::settings::{MorphCurve, MorphSettings};
use crate::timeline::{self, MeshId, TimelineState};
use crate::tween::{MorphEngine, MorphHandle, MorphStart};
use engine_core::PointBuffer;
use glam::{Vec2, Vec3, Vec4};
use input::{Gesture, GestureInput, KeyCode};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What a transition does once its morph resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Back on the opening cloud: restore the intro, settle, unlock.
    ReturnToStart,
    /// A cloud reached from a mesh: chain into the neighbouring mesh or show the outro.
    CloudAfterMesh { index: usize, direction: i32 },
    /// Reveal the entry's statistics and start the highlight.
    Mesh { index: usize },
    /// A cloud reached from another cloud.
    Cloud { index: usize },
}

/// Where the single in-flight transition currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Morphing { handle: MorphHandle, arrival: Arrival },
    /// Morph done, waiting on an unlock or auto-advance delay.
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimerAction {
    Unlock,
    AutoAdvance { from: usize, target: usize, direction: i32 },
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    remaining: f32,
    action: TimerAction,
}

/// Navigation position and input guards.
#[derive(Debug, Clone)]
pub struct NavigationCursor {
    active_index: usize,
    locked: bool,
    intro_dismissed: bool,
    gestures: GestureInput,
}

impl NavigationCursor {
    fn new(wheel_threshold: f32) -> Self {
        Self {
            active_index: 0,
            locked: false,
            intro_dismissed: false,
            gestures: GestureInput::new(wheel_threshold),
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn intro_dismissed(&self) -> bool {
        self.intro_dismissed
    }

    /// Wheel delta accumulated toward the next gesture.
    pub fn accumulated_scroll(&self) -> f32 {
        self.gestures.accumulated()
    }
}

pub struct MorphController<P: OverlayPresenter> {
    states: Vec<TimelineState>,
    meshes: MeshLibrary,
    /// Created by [`MorphController::show_initial_cloud`].
    points: Option<PointBuffer>,
    morph: MorphEngine,
    highlight: Highlight,
    cursor: NavigationCursor,
    /// Bumped on every transition; highlights started under an older value stop.
    highlight_version: u64,
    in_flight: Option<(MorphHandle, Arrival)>,
    timers: Vec<Timer>,
    rng: StdRng,
    settings: MorphSettings,
    presenter: P,
}

impl<P: OverlayPresenter> MorphController<P> {
    pub fn new(assets: TimelineAssets, settings: MorphSettings, presenter: P) -> Self {
        Self::with_rng(assets, settings, presenter, StdRng::from_entropy())
    }

    /// Like [`MorphController::new`] with a caller-supplied RNG, for reproducible runs.
    pub fn with_rng(assets: TimelineAssets, settings: MorphSettings, presenter: P, rng: StdRng) -> Self {
        for missing in assets.missing_meshes() {
            log::warn!("Timeline references mesh '{}' which is not loaded", missing);
        }
        let states = timeline::build(&assets.entries);
        log::info!(
            "Timeline built: {} states, {} meshes",
            states.len(),
            assets.entries.len()
        );

        Self {
            states,
            meshes: assets.meshes,
            points: None,
            morph: MorphEngine::new(settings.timing),
            highlight: Highlight::new(settings.highlight),
            cursor: NavigationCursor::new(settings.wheel_threshold),
            highlight_version: 0,
            in_flight: None,
            timers: Vec::new(),
            rng,
            settings,
            presenter,
        }
    }

    // ── Setup ──────────────────────────────────────────────────────────────

    /// Create the point buffer as a fresh white cloud and park on the opening state.
    ///
    /// Does not morph and does not reveal any statistics; the intro stays up
    /// until the first forward gesture.
    pub fn show_initial_cloud(&mut self) {
        let cloud = self.fresh_cloud();
        self.points = Some(PointBuffer::from_positions(cloud, Vec4::ONE));
        self.morph.cancel_all();
        self.highlight.discard();
        self.in_flight = None;
        self.timers.clear();
        self.cursor = NavigationCursor::new(self.settings.wheel_threshold);

        self.presenter.update(&OverlayUpdate::hidden());
        self.presenter.set_outro_visible(false);
        self.presenter.set_intro_visible(true);
        log::info!("Initial cloud of {} points displayed", self.point_count());
    }

    // ── Input ──────────────────────────────────────────────────────────────

    /// Browser-style wheel delta (positive `y` = forward). Ignored while locked.
    pub fn on_wheel(&mut self, delta: Vec2) {
        if self.cursor.locked {
            return;
        }
        if let Some(gesture) = self.cursor.gestures.process_wheel(delta) {
            self.gesture(gesture);
        }
    }

    pub fn on_key(&mut self, key: KeyCode) {
        if self.cursor.locked {
            return;
        }
        if let Some(gesture) = self.cursor.gestures.process_key(key) {
            self.gesture(gesture);
        }
    }

    /// Apply one navigation step. Returns whether a transition started.
    pub fn gesture(&mut self, gesture: Gesture) -> bool {
        if self.cursor.locked {
            log::debug!("{:?} dropped, navigation locked", gesture);
            return false;
        }
        let direction = gesture.direction();

        if !self.cursor.intro_dismissed {
            if direction < 0 {
                return false;
            }
            let Some(first) = timeline::first_mesh_index(&self.states) else {
                log::debug!("No mesh states, intro stays up");
                return false;
            };
            self.cursor.intro_dismissed = true;
            self.presenter.set_intro_visible(false);
            return self.transition_to(first, direction);
        }

        let last = self.states.len().saturating_sub(1);
        let target = if direction > 0 {
            (self.cursor.active_index + 1).min(last)
        } else {
            self.cursor.active_index.saturating_sub(1)
        };
        if target == self.cursor.active_index {
            return false;
        }
        self.transition_to(target, direction)
    }

    // ── Transitions ────────────────────────────────────────────────────────

    /// Move to state `index` (clamped), travelling in `direction` (+1 / -1).
    ///
    /// Dropped while locked or when the clamped target is already active.
    pub fn transition_to(&mut self, index: usize, direction: i32) -> bool {
        if self.cursor.locked {
            log::debug!("Transition to {} dropped, navigation locked", index);
            return false;
        }
        let Some(last) = self.states.len().checked_sub(1) else {
            return false;
        };
        let target = index.min(last);
        let previous = self.cursor.active_index;
        if target == previous {
            return false;
        }

        let from_mesh = self.states.get(previous).is_some_and(TimelineState::is_mesh);
        self.cursor.active_index = target;
        self.cursor.locked = true;
        self.highlight_version += 1;
        self.cancel_highlight();
        if !timeline::is_terminal(&self.states, target) {
            self.presenter.set_outro_visible(false);
        }
        log::info!(
            "Transition {} -> {} ({})",
            previous,
            target,
            if direction >= 0 { "forward" } else { "backward" }
        );

        match self.states[target].mesh_id().cloned() {
            Some(mesh_id) => {
                let destination = self.mesh_destination(&mesh_id);
                self.begin_morph(destination, self.settings.mesh_morph, Arrival::Mesh { index: target });
            }
            None => {
                self.presenter.update(&OverlayUpdate::hidden());
                let arrival = if target == 0 {
                    Arrival::ReturnToStart
                } else if from_mesh {
                    Arrival::CloudAfterMesh {
                        index: target,
                        direction,
                    }
                } else {
                    Arrival::Cloud { index: target }
                };
                // The opening cloud is only re-scattered when leaving a mesh.
                let destination = if target == 0 && !from_mesh {
                    None
                } else {
                    Some(self.fresh_cloud())
                };
                self.begin_morph(destination, self.settings.cloud_morph, arrival);
            }
        }
        true
    }

    fn begin_morph(&mut self, destination: Option<Vec<Vec3>>, curve: MorphCurve, arrival: Arrival) {
        let started = match destination {
            Some(end) => {
                let start = self
                    .points
                    .as_ref()
                    .map(|p| p.positions().to_vec())
                    .unwrap_or_default();
                self.morph
                    .start(self.points.as_ref(), start, end, curve.duration, curve.easing)
            }
            None => {
                self.morph.cancel_all();
                MorphStart::Resolved
            }
        };

        match started {
            MorphStart::InFlight(handle) => self.in_flight = Some((handle, arrival)),
            MorphStart::Resolved => self.arrive(arrival),
        }
    }

    /// Continuation of a transition after its morph.
    fn arrive(&mut self, arrival: Arrival) {
        log::debug!("Arrived: {:?}", arrival);
        match arrival {
            Arrival::ReturnToStart => {
                self.presenter.set_intro_visible(true);
                self.cursor.intro_dismissed = false;
                self.cursor.gestures.reset();
                self.schedule(self.settings.return_settle, TimerAction::Unlock);
            }
            Arrival::CloudAfterMesh { index, direction } => {
                if !timeline::is_terminal(&self.states, index) {
                    let next = if direction > 0 {
                        Some(index + 1)
                    } else {
                        index.checked_sub(1)
                    };
                    if let Some(next) = next {
                        if self.states.get(next).is_some_and(TimelineState::is_mesh) {
                            self.cursor.locked = false;
                            self.schedule(
                                self.settings.auto_advance_delay,
                                TimerAction::AutoAdvance {
                                    from: index,
                                    target: next,
                                    direction,
                                },
                            );
                            return;
                        }
                    }
                }
                self.finish_cloud(index);
            }
            Arrival::Mesh { index } => {
                self.schedule(self.settings.post_mesh_unlock, TimerAction::Unlock);
                let Some((step, total)) = timeline::mesh_step(&self.states, index) else {
                    return;
                };
                if let Some(entry) = self.states[index].entry() {
                    self.presenter.update(&OverlayUpdate::for_entry(entry, step, total));
                    if let Some(points) = self.points.as_mut() {
                        self.highlight.start(
                            points,
                            entry.contamination_rate,
                            self.highlight_version,
                            &mut self.rng,
                        );
                    }
                }
            }
            Arrival::Cloud { index } => self.finish_cloud(index),
        }
    }

    fn finish_cloud(&mut self, index: usize) {
        let terminal = timeline::is_terminal(&self.states, index);
        self.presenter.set_outro_visible(terminal);
        if terminal {
            log::info!("End of timeline reached");
        }
        self.cursor.locked = false;
    }

    // ── Per-frame ──────────────────────────────────────────────────────────

    /// Advance one rendered frame: morph, arrival continuation, highlight, timers.
    pub fn tick(&mut self, dt: f32) {
        let finished = match self.points.as_mut() {
            Some(points) => self.morph.step(points, dt),
            None => None,
        };
        if let Some(done) = finished {
            match self.in_flight {
                Some((handle, arrival)) if handle == done => {
                    self.in_flight = None;
                    self.arrive(arrival);
                }
                _ => log::debug!("Morph {:?} finished with no transition waiting on it", done),
            }
        }

        if let Some(points) = self.points.as_mut() {
            self.highlight.step(points, dt, self.highlight_version);
        }

        self.advance_timers(dt);
    }

    fn schedule(&mut self, delay: f32, action: TimerAction) {
        self.timers.push(Timer {
            remaining: delay.max(0.0),
            action,
        });
    }

    fn advance_timers(&mut self, dt: f32) {
        if self.timers.is_empty() {
            return;
        }
        for timer in &mut self.timers {
            timer.remaining -= dt.max(0.0);
        }
        let (due, pending): (Vec<Timer>, Vec<Timer>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.remaining <= 0.0);
        self.timers = pending;
        for timer in due {
            self.fire(timer.action);
        }
    }

    fn fire(&mut self, action: TimerAction) {
        match action {
            TimerAction::Unlock => {
                self.cursor.locked = false;
                log::debug!("Navigation unlocked at state {}", self.cursor.active_index);
            }
            TimerAction::AutoAdvance {
                from,
                target,
                direction,
            } => {
                if self.cursor.active_index == from {
                    self.transition_to(target, direction);
                } else {
                    log::debug!(
                        "Auto-advance from {} skipped, now at {}",
                        from,
                        self.cursor.active_index
                    );
                }
            }
        }
    }

    // ── Helpers ────────────────────────────────────────────────────────────

    fn point_count(&self) -> usize {
        self.points
            .as_ref()
            .map_or(self.settings.point_count, PointBuffer::len)
    }

    fn fresh_cloud(&mut self) -> Vec<Vec3> {
        let count = self.point_count();
        let radius = self.settings.cloud_radius();
        procgen::random_cloud(&mut self.rng, count, &radius)
    }

    fn mesh_destination(&self, mesh_id: &MeshId) -> Option<Vec<Vec3>> {
        let Some(geometry) = self.meshes.get(mesh_id) else {
            log::warn!("Mesh '{}' is not loaded, morph skipped", mesh_id);
            return None;
        };
        let targets = procgen::mesh_targets(geometry.positions(), self.point_count(), self.settings.mesh_scale);
        (!targets.is_empty()).then_some(targets)
    }

    fn cancel_highlight(&mut self) {
        match self.points.as_mut() {
            Some(points) => self.highlight.cancel(points),
            None => self.highlight.discard(),
        }
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn phase(&self) -> TransitionPhase {
        match self.in_flight {
            Some((handle, arrival)) => TransitionPhase::Morphing { handle, arrival },
            None if !self.timers.is_empty() => TransitionPhase::Settling,
            None => TransitionPhase::Idle,
        }
    }

    /// No transition in flight, nothing scheduled, input accepted.
    pub fn is_settled(&self) -> bool {
        self.phase() == TransitionPhase::Idle && !self.cursor.locked
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn active_index(&self) -> usize {
        self.cursor.active_index
    }

    pub fn is_locked(&self) -> bool {
        self.cursor.locked
    }

    pub fn intro_visible(&self) -> bool {
        !self.cursor.intro_dismissed
    }

    pub fn highlight_version(&self) -> u64 {
        self.highlight_version
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn current_state(&self) -> Option<&TimelineState> {
        self.states.get(self.cursor.active_index)
    }

    pub fn states(&self) -> &[TimelineState] {
        &self.states
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    pub fn settings(&self) -> &MorphSettings {
        &self.settings
    }

    pub fn points(&self) -> Option<&PointBuffer> {
        self.points.as_ref()
    }

    /// Render-surface access, used to collect dirty flags after upload.
    pub fn points_mut(&mut self) -> Option<&mut PointBuffer> {
        self.points.as_mut()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
