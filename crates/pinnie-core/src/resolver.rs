//! Decides which window a pin toggle refers to.

use std::time::{Duration, Instant};

use crate::WindowManager;
use crate::pin_set::PinSet;

/// Delay a foreground change must survive before it is committed.
pub const FOREGROUND_DEBOUNCE: Duration = Duration::from_millis(100);

/// Upper bound on owner links followed during normalization.
const MAX_OWNER_DEPTH: usize = 32;

/// Debounces foreground-change notifications.
///
/// Each event replaces the pending handle and restarts the delay. A
/// handle is committed only when the delay elapses with no newer event.
#[derive(Debug)]
pub struct ForegroundDebounce {
    delay: Duration,
    pending: Option<(usize, Instant)>,
    committed: Option<usize>,
}

impl ForegroundDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            committed: None,
        }
    }

    pub fn on_event(&mut self, hwnd: usize, now: Instant) {
        self.pending = Some((hwnd, now));
    }

    /// Commits the pending handle if its delay has elapsed.
    ///
    /// Returns the newly committed handle.
    pub fn poll(&mut self, now: Instant) -> Option<usize> {
        let (hwnd, since) = self.pending?;
        if now.saturating_duration_since(since) < self.delay {
            return None;
        }
        self.pending = None;
        self.committed = Some(hwnd);
        Some(hwnd)
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending.map(|(hwnd, _)| hwnd)
    }

    pub fn committed(&self) -> Option<usize> {
        self.committed
    }
}

impl Default for ForegroundDebounce {
    fn default() -> Self {
        Self::new(FOREGROUND_DEBOUNCE)
    }
}

/// Resolves the toggle target from the cursor position.
///
/// The window under the cursor always wins. The last toggled window and
/// the debounced foreground window are tracked but never override it.
#[derive(Debug, Default)]
pub struct TargetResolver {
    last_toggled: Option<usize>,
    foreground: ForegroundDebounce,
}

impl TargetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the top-level window the user is pointing at.
    ///
    /// Falls back to the foreground window when the cursor query fails.
    pub fn resolve<W: WindowManager>(&self, wm: &W, pins: &PinSet) -> Option<usize> {
        let hit = wm
            .cursor_pos()
            .ok()
            .and_then(|point| wm.window_from_point(point))
            .filter(|&h| h != 0)
            .or_else(|| wm.foreground_window())
            .filter(|&h| h != 0)?;
        Some(normalize(wm, pins, hit))
    }

    pub fn record_toggled(&mut self, hwnd: usize) {
        self.last_toggled = Some(hwnd);
    }

    pub fn last_toggled(&self) -> Option<usize> {
        self.last_toggled
    }

    pub fn on_foreground(&mut self, hwnd: usize, now: Instant) {
        self.foreground.on_event(hwnd, now);
    }

    pub fn poll_foreground(&mut self, now: Instant) -> Option<usize> {
        self.foreground.poll(now)
    }

    pub fn committed_foreground(&self) -> Option<usize> {
        self.foreground.committed()
    }
}

/// Maps a hit-tested handle to the whole application window it belongs to.
///
/// Child controls go to their root, owned windows to their owner. The walk
/// stops at pinned targets, since those are owned by the pin chain
/// themselves, and overlays are swapped for the target they decorate.
fn normalize<W: WindowManager>(wm: &W, pins: &PinSet, hit: usize) -> usize {
    if let Some(target) = pins.target_for_overlay(hit) {
        return target;
    }
    let mut hwnd = wm.root(hit);
    for _ in 0..MAX_OWNER_DEPTH {
        if pins.contains(hwnd) {
            return hwnd;
        }
        if let Some(target) = pins.target_for_overlay(hwnd) {
            return target;
        }
        match wm.owner(hwnd) {
            Some(owner) if owner != 0 && owner != hwnd => hwnd = owner,
            _ => break,
        }
    }
    hwnd
}
