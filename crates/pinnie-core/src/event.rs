/// A platform-agnostic window event.
///
/// These represent the OS notifications the pinning engine reacts to.
/// Platform crates translate raw hook callbacks into these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// The user started dragging or resizing a window.
    MoveSizeStart { hwnd: usize },

    /// The user finished dragging or resizing a window.
    MoveSizeEnd { hwnd: usize },

    /// A window's position or size changed.
    LocationChanged { hwnd: usize },

    /// A window became the foreground window.
    Foreground { hwnd: usize },
}

impl WindowEvent {
    /// Returns the window handle associated with this event.
    pub fn hwnd(&self) -> usize {
        match self {
            Self::MoveSizeStart { hwnd }
            | Self::MoveSizeEnd { hwnd }
            | Self::LocationChanged { hwnd }
            | Self::Foreground { hwnd } => *hwnd,
        }
    }
}
