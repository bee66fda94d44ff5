//! Keeps each overlay glued to its target window.
//!
//! A 10 ms timer re-syncs every overlay and move/size hook events re-sync
//! the one window that changed. Both arrive on the same thread.

use std::collections::HashMap;

use crate::config::{Color, IconPosition, VisualSettings};
use crate::{
    Decoration, DecorationFactory, FrameOffset, Rect, WindowEvent, WindowManager, WindowResult,
};

/// Timer cadence of the full re-sync pass.
pub const TICK_INTERVAL_MS: u64 = 10;

/// Timer ticks an overlay stays hidden after a maximize/restore change.
pub const SETTLE_TICKS: u32 = 5;

/// Height of the icon band above non-maximized targets, in logical pixels.
pub const HEADER_BAND: i32 = 150;

/// What triggered a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCause {
    /// The periodic timer. Only ticks consume settle suppression.
    Tick,
    /// A hook event, a new overlay, or a settings change.
    Event,
}

/// Per-target tracking state.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub dpi_scale: f64,
    pub frame_offset: FrameOffset,
    pub suppression_ticks: u32,
    pub is_animating: bool,
    pub was_maximized: bool,
    /// A maximize/restore change was seen mid-gesture.
    pub transition_pending: bool,
    /// `dpi_scale` and `frame_offset` are usable by the cheap path.
    pub cache_valid: bool,
    pub last_bounds: Option<Rect>,
    pub visible: bool,
    pub icon_visible: Option<bool>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            dpi_scale: 1.0,
            frame_offset: FrameOffset::default(),
            suppression_ticks: 0,
            is_animating: false,
            was_maximized: false,
            transition_pending: false,
            cache_valid: false,
            last_bounds: None,
            visible: false,
            icon_visible: None,
        }
    }
}

enum Probe {
    Bounds(Rect),
    NotReady,
    Gone,
}

enum SyncOutcome {
    Synced,
    Skipped,
    Gone,
}

struct Tracked<D> {
    overlay: D,
    state: OverlayState,
}

impl<D: Decoration> Tracked<D> {
    fn show(&mut self, visible: bool) {
        if self.state.visible != visible {
            self.overlay.set_visible(visible);
            self.state.visible = visible;
        }
    }
}

/// Owns one decoration per pinned target and keeps it in sync.
///
/// Never changes pin membership or z-order; targets found closed are
/// reported back to the caller.
pub struct OverlayTracker<D: Decoration> {
    entries: HashMap<usize, Tracked<D>>,
    settings: VisualSettings,
}

impl<D: Decoration> OverlayTracker<D> {
    pub fn new(settings: VisualSettings) -> Self {
        Self {
            entries: HashMap::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &VisualSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates and syncs the overlay for `target`, returning its handle.
    ///
    /// Calling this for an already tracked target returns the existing
    /// overlay.
    pub fn add<W, F>(&mut self, wm: &W, factory: &mut F, target: usize) -> WindowResult<usize>
    where
        W: WindowManager,
        F: DecorationFactory<Overlay = D>,
    {
        if let Some(tracked) = self.entries.get(&target) {
            return Ok(tracked.overlay.handle());
        }
        let overlay = factory.create(&self.settings)?;
        let handle = overlay.handle();
        let state = OverlayState {
            was_maximized: wm.is_maximized(target).unwrap_or(false),
            ..OverlayState::default()
        };
        self.entries.insert(target, Tracked { overlay, state });
        if let SyncOutcome::Gone = self.sync_one(wm, target, SyncCause::Event) {
            crate::log_debug!("Target {target:#x} vanished while adding its overlay");
        }
        Ok(handle)
    }

    /// Closes the overlay of `target`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, target: usize) -> bool {
        self.entries.remove(&target).is_some()
    }

    /// Closes every overlay.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn overlay_for(&self, target: usize) -> Option<usize> {
        self.entries.get(&target).map(|t| t.overlay.handle())
    }

    pub fn target_for_overlay(&self, overlay: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, t)| t.overlay.handle() == overlay)
            .map(|(&target, _)| target)
    }

    pub fn state(&self, target: usize) -> Option<&OverlayState> {
        self.entries.get(&target).map(|t| &t.state)
    }

    /// Re-syncs every overlay. Returns the targets that no longer exist.
    pub fn sync_all<W: WindowManager>(&mut self, wm: &W, cause: SyncCause) -> Vec<usize> {
        let targets: Vec<usize> = self.entries.keys().copied().collect();
        targets
            .into_iter()
            .filter(|&t| matches!(self.sync_one(wm, t, cause), SyncOutcome::Gone))
            .collect()
    }

    /// Applies a move/size hook event. Untracked handles are ignored.
    ///
    /// Returns the target if it turned out to be gone.
    pub fn handle_event<W: WindowManager>(
        &mut self,
        wm: &W,
        event: &WindowEvent,
    ) -> Option<usize> {
        let target = event.hwnd();
        let tracked = self.entries.get_mut(&target)?;
        let state = &mut tracked.state;
        match event {
            WindowEvent::MoveSizeStart { .. } => state.is_animating = true,
            WindowEvent::MoveSizeEnd { .. } => {
                state.is_animating = false;
                state.cache_valid = false;
                if state.transition_pending {
                    state.transition_pending = false;
                    state.suppression_ticks = SETTLE_TICKS;
                }
            }
            WindowEvent::LocationChanged { .. } => {}
            WindowEvent::Foreground { .. } => return None,
        }
        match self.sync_one(wm, target, SyncCause::Event) {
            SyncOutcome::Gone => Some(target),
            SyncOutcome::Synced | SyncOutcome::Skipped => None,
        }
    }

    pub fn set_show_border<W: WindowManager>(&mut self, wm: &W, show: bool) -> Vec<usize> {
        self.update(wm, |s| s.show_border = show)
    }

    pub fn set_border_thickness<W: WindowManager>(&mut self, wm: &W, px: i32) -> Vec<usize> {
        self.update(wm, |s| s.border_thickness = px.max(0))
    }

    pub fn set_corner_radius<W: WindowManager>(&mut self, wm: &W, px: i32) -> Vec<usize> {
        self.update(wm, |s| s.corner_radius = px.max(0))
    }

    pub fn set_border_color<W: WindowManager>(&mut self, wm: &W, color: Color) -> Vec<usize> {
        self.update(wm, |s| s.border_color = color)
    }

    pub fn set_show_icon<W: WindowManager>(&mut self, wm: &W, show: bool) -> Vec<usize> {
        self.update(wm, |s| s.show_icon = show)
    }

    pub fn set_icon_path<W: WindowManager>(
        &mut self,
        wm: &W,
        path: Option<String>,
    ) -> Vec<usize> {
        self.update(wm, |s| s.icon_path = path)
    }

    pub fn set_icon_size<W: WindowManager>(&mut self, wm: &W, px: i32) -> Vec<usize> {
        self.update(wm, |s| s.icon_size = px.max(1))
    }

    pub fn set_icon_position<W: WindowManager>(
        &mut self,
        wm: &W,
        position: IconPosition,
    ) -> Vec<usize> {
        self.update(wm, |s| s.icon_position = position)
    }

    /// Replaces the whole settings snapshot.
    pub fn apply_settings<W: WindowManager>(
        &mut self,
        wm: &W,
        settings: VisualSettings,
    ) -> Vec<usize> {
        self.update(wm, |s| *s = settings)
    }

    /// Mutates the settings, restyles every overlay and re-syncs at once.
    fn update<W: WindowManager>(
        &mut self,
        wm: &W,
        change: impl FnOnce(&mut VisualSettings),
    ) -> Vec<usize> {
        change(&mut self.settings);
        for tracked in self.entries.values_mut() {
            tracked.overlay.apply_style(&self.settings);
            tracked.state.last_bounds = None;
            tracked.state.icon_visible = None;
        }
        self.sync_all(wm, SyncCause::Event)
    }

    fn sync_one<W: WindowManager>(
        &mut self,
        wm: &W,
        target: usize,
        cause: SyncCause,
    ) -> SyncOutcome {
        let show_icon = self.settings.show_icon;
        let Some(tracked) = self.entries.get_mut(&target) else {
            return SyncOutcome::Skipped;
        };

        let visual = match probe_bounds(wm, target, &mut tracked.state) {
            Probe::Bounds(rect) => rect,
            Probe::NotReady => return SyncOutcome::Skipped,
            Probe::Gone => return SyncOutcome::Gone,
        };

        if !wm.is_visible(target) || wm.is_cloaked(target) {
            tracked.show(false);
            return SyncOutcome::Skipped;
        }

        let state = &mut tracked.state;
        let maximized = wm.is_maximized(target).unwrap_or(state.was_maximized);
        if maximized != state.was_maximized {
            state.was_maximized = maximized;
            state.cache_valid = false;
            if state.is_animating {
                state.transition_pending = true;
            } else {
                state.suppression_ticks = SETTLE_TICKS;
            }
        }
        if state.is_animating && state.transition_pending {
            tracked.show(false);
            return SyncOutcome::Skipped;
        }
        if state.suppression_ticks > 0 {
            if cause == SyncCause::Tick {
                state.suppression_ticks -= 1;
            }
            tracked.show(false);
            return SyncOutcome::Skipped;
        }

        let band = if maximized {
            0
        } else {
            header_px(&tracked.overlay, state.dpi_scale)
        };
        let bounds = visual.extend_top(band);
        if state.last_bounds != Some(bounds) {
            match tracked.overlay.set_bounds(&bounds, band) {
                Ok(()) => state.last_bounds = Some(bounds),
                Err(e) => {
                    crate::log_debug!("Failed to move overlay for {target:#x}: {e}");
                    return SyncOutcome::Skipped;
                }
            }
        }

        let icon = !maximized && show_icon;
        if state.icon_visible != Some(icon) {
            tracked.overlay.set_icon_visible(icon);
            state.icon_visible = Some(icon);
        }
        tracked.show(true);
        SyncOutcome::Synced
    }
}

/// Reads the target's visible bounds, refreshing the cache when needed.
fn probe_bounds<W: WindowManager>(wm: &W, target: usize, state: &mut OverlayState) -> Probe {
    if state.cache_valid
        && let Ok(rect) = wm.window_rect(target)
    {
        let visual = state.frame_offset.apply(&rect);
        if visual.has_area() {
            return Probe::Bounds(visual);
        }
    }

    match wm.frame_bounds(target) {
        Ok(frame) => {
            if !frame.has_area() {
                return Probe::NotReady;
            }
            if let Ok(rect) = wm.window_rect(target) {
                state.frame_offset = FrameOffset::between(&rect, &frame);
                state.dpi_scale = wm.dpi_scale(target);
                state.cache_valid = true;
            }
            Probe::Bounds(frame)
        }
        Err(_) if !wm.is_window(target) => Probe::Gone,
        Err(_) => match wm.window_rect(target) {
            Ok(rect) if rect.has_area() => {
                // No DWM frame: the reported rect is the best we get.
                state.frame_offset = FrameOffset::default();
                state.dpi_scale = wm.dpi_scale(target);
                state.cache_valid = true;
                Probe::Bounds(rect)
            }
            _ => Probe::NotReady,
        },
    }
}

/// Physical height of the header band at `scale`.
///
/// Uses the decoration's own measurement when it is larger than the
/// DPI-scaled nominal band, which acts as the floor.
fn header_px<D: Decoration>(overlay: &D, scale: f64) -> i32 {
    let floor = (f64::from(HEADER_BAND) * scale).ceil() as i32;
    overlay.header_height(scale).map_or(floor, |h| h.max(floor))
}
