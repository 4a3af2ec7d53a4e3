pub mod data;
pub mod error;
pub mod geometry;
pub mod model;
mod navigator;
pub mod popup;
pub mod tour;
pub mod viewer;

#[cfg(test)]
mod test_support;

// Re-export primary types for convenience.
pub use data::TourData;
pub use error::{CoreError, GeometryError};
pub use geometry::{effective_natural_size, resolve_hotspot, Point, Polygon, Rect, Size};
pub use model::{AdjustDefaults, Hotspot, HotspotCoordinates, PopupContent, PopupDetails, Slide};
pub use popup::{clamp_placement, provisional_placement, LayoutMetrics, PopupPlacement, PopupTransform};
pub use tour::{unique_hotspots_by_label, TourTiming};
pub use viewer::{
    Effect, NavPhase, RequestId, StepToken, Viewer, ViewerEvent, ViewerKey, ViewerOptions,
    ViewerState,
};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
