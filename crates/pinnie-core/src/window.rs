use crate::config::VisualSettings;
use crate::{Point, Rect};

/// A boxed error type for window operations.
///
/// Any error type that implements the `Error` trait can be boxed into this.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Window-manager primitives the pinning engine depends on.
///
/// Handles are opaque pointer-sized integers. Queries take `&self` and are
/// expected to be fast, local, synchronous calls. Each platform crate (e.g.
/// `pinnie-windows`) provides its own implementation.
pub trait WindowManager {
    /// Returns whether the handle still refers to an existing window.
    fn is_window(&self, hwnd: usize) -> bool;

    /// Returns the cursor position in physical screen coordinates.
    fn cursor_pos(&self) -> WindowResult<Point>;

    /// Returns the window directly under the given screen point.
    fn window_from_point(&self, point: Point) -> Option<usize>;

    /// Returns the window that currently has keyboard focus.
    fn foreground_window(&self) -> Option<usize>;

    /// Returns the top-level window reached by walking the parent chain.
    ///
    /// Child controls resolve to the window that hosts them. Owned
    /// windows are already top-level and are returned unchanged.
    fn root(&self, hwnd: usize) -> usize;

    /// Returns the owner of a top-level window, if any.
    fn owner(&self, hwnd: usize) -> Option<usize>;

    /// Returns the rectangle the OS reports for the window.
    ///
    /// Cheap, but may include invisible resize margins.
    fn window_rect(&self, hwnd: usize) -> WindowResult<Rect>;

    /// Returns the visually rendered bounds of the window.
    ///
    /// More expensive than [`WindowManager::window_rect`].
    fn frame_bounds(&self, hwnd: usize) -> WindowResult<Rect>;

    /// Returns whether the window has the visible style bit set.
    fn is_visible(&self, hwnd: usize) -> bool;

    /// Returns whether the window is cloaked (e.g. on another virtual desktop).
    fn is_cloaked(&self, hwnd: usize) -> bool;

    /// Returns whether the window's placement is maximized.
    fn is_maximized(&self, hwnd: usize) -> WindowResult<bool>;

    /// Returns the DPI scale factor of the window (1.0 = 96 DPI).
    fn dpi_scale(&self, hwnd: usize) -> f64;

    /// Sets or clears the owner of a top-level window.
    fn set_owner(&self, hwnd: usize, owner: Option<usize>) -> WindowResult<()>;

    /// Adds or removes the window from the always-on-top band without
    /// moving, resizing, or activating it.
    fn set_topmost(&self, hwnd: usize, topmost: bool) -> WindowResult<()>;
}

/// A decoration window drawn around a pinned target.
///
/// Implementations must be click-through, never take focus, and stay out
/// of the taskbar/Alt-Tab list. Dropping the value closes the window.
pub trait Decoration {
    /// Returns the OS handle of the decoration window.
    fn handle(&self) -> usize;

    /// Moves and resizes the decoration without touching z-order or focus.
    ///
    /// `header` is the height of the icon band at the top of `bounds`;
    /// the rest of the area frames the target.
    fn set_bounds(&mut self, bounds: &Rect, header: i32) -> WindowResult<()>;

    /// Shows or hides the decoration.
    fn set_visible(&mut self, visible: bool);

    /// Shows or hides the floating icon inside the header band.
    fn set_icon_visible(&mut self, visible: bool);

    /// Applies border and icon styling.
    fn apply_style(&mut self, settings: &VisualSettings);

    /// Returns the header height the decoration actually needs, in
    /// physical pixels, at the given DPI scale.
    ///
    /// `None` when the decoration cannot tell (e.g. no icon loaded).
    fn header_height(&self, scale: f64) -> Option<i32>;
}

/// Creates decoration windows.
pub trait DecorationFactory {
    type Overlay: Decoration;

    /// Creates a new decoration styled with `settings`.
    fn create(&mut self, settings: &VisualSettings) -> WindowResult<Self::Overlay>;
}
