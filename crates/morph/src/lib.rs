//! Timeline morphing core: a point cloud that gathers into one mesh per timeline
//! entry and scatters back into a cloud between them.
//!
//! [`MorphController`] owns the point buffer and is the only thing that mutates
//! it. Front ends feed it gestures, call [`MorphController::tick`] once per frame
//! and read [`MorphController::points`] to draw.

pub mod controller;
pub mod geometry;
pub mod highlight;
pub mod overlay;
pub mod settings;
pub mod timeline;
pub mod tween;

pub use controller::{Arrival, MorphController, NavigationCursor, TransitionPhase};
pub use geometry::{GeometryError, MeshGeometry, MeshLibrary, TimelineAssets};
pub use highlight::{Highlight, HighlightEffect};
pub use overlay::{
    format_percent, split_lead_phrase, step_bars, OverlayEvent, OverlayPresenter, OverlayUpdate,
    RecordingOverlay,
};
pub use settings::{HighlightSettings, MorphCurve, MorphSettings, MorphTiming};
pub use timeline::{MeshId, TimelineEntry, TimelineState};
pub use tween::{MorphEngine, MorphHandle, MorphStart, MorphTween};

// Re-exported so front ends need not depend on the leaf crates directly.
pub use engine_core::{Easing, PointBuffer};
pub use input::{Gesture, KeyCode};
