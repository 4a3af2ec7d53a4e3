/// What the main area is showing.
///
/// Used to dispatch `update()` to the right drawing logic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum AppScreen {
    /// A tour with at least one slide is loaded.
    Viewer,
    /// The tour file could not be read or has no usable slides.
    NoContent { message: String },
    /// Startup, before any tour was opened.
    #[default]
    Empty,
}

impl AppScreen {
    pub(crate) fn no_content(message: impl Into<String>) -> Self {
        Self::NoContent {
            message: message.into(),
        }
    }
}
