pub mod error;
pub mod export;
pub mod layout;
pub mod overlay;

pub use error::RenderError;
pub use export::{export_svg, overlay_to_svg};
pub use layout::{centered, fit_within};
pub use overlay::{build_overlay, Overlay, OverlayRegion, OverlayTransform};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
