//! The ordered set of pinned windows and the ownership chain derived from it.
//!
//! Index 0 is the topmost pin. The OS keeps an owned window directly above
//! its owner, so stacking is expressed purely through owner links built
//! from the bottom of the list upward:
//!
//! ```text
//! [A, B, C]   C -> overlay(C) -> B -> overlay(B) -> A -> overlay(A)
//! ```
//!
//! where `x -> y` reads "x owns y".

/// A pinned target and the overlay that decorates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedWindow {
    pub target: usize,
    pub overlay: usize,
}

/// Pinned windows in stacking order, unique by target.
#[derive(Debug, Default)]
pub struct PinSet {
    entries: Vec<PinnedWindow>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, target: usize) -> bool {
        self.entries.iter().any(|e| e.target == target)
    }

    /// Stack position of a target (0 = topmost).
    pub fn pin_order(&self, target: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.target == target)
    }

    /// Returns the target decorated by `overlay`.
    pub fn target_for_overlay(&self, overlay: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.overlay == overlay)
            .map(|e| e.target)
    }

    /// Returns `true` if the handle is a pinned target or one of the overlays.
    pub fn involves(&self, hwnd: usize) -> bool {
        self.entries
            .iter()
            .any(|e| e.target == hwnd || e.overlay == hwnd)
    }

    /// Places a new entry on top of the stack.
    ///
    /// Returns `false` and leaves the set unchanged if the target is
    /// already pinned.
    pub fn push_top(&mut self, entry: PinnedWindow) -> bool {
        if self.contains(entry.target) {
            return false;
        }
        self.entries.insert(0, entry);
        true
    }

    pub fn remove(&mut self, target: usize) -> Option<PinnedWindow> {
        let idx = self.pin_order(target)?;
        Some(self.entries.remove(idx))
    }

    /// Drops every entry whose target fails `keep`, returning the dropped ones.
    pub fn retain_targets(&mut self, mut keep: impl FnMut(usize) -> bool) -> Vec<PinnedWindow> {
        let mut dropped = Vec::new();
        self.entries.retain(|e| {
            let kept = keep(e.target);
            if !kept {
                dropped.push(*e);
            }
            kept
        });
        dropped
    }

    pub fn take_all(&mut self) -> Vec<PinnedWindow> {
        std::mem::take(&mut self.entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinnedWindow> {
        self.entries.iter()
    }

    pub fn targets(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.target).collect()
    }

    /// Every handle taking part in the chain (targets and overlays).
    pub fn handles(&self) -> Vec<usize> {
        self.entries
            .iter()
            .flat_map(|e| [e.target, e.overlay])
            .collect()
    }

    /// The ownership chain for the current order.
    pub fn chain(&self) -> Vec<(usize, Option<usize>)> {
        chain(&self.entries)
    }
}

/// Computes `(window, owner)` links for a stack, bottom entry first.
///
/// The bottom target has no owner, each target owns its own overlay, and
/// each overlay owns the target directly above it. The result depends only
/// on the order of `entries`.
pub fn chain(entries: &[PinnedWindow]) -> Vec<(usize, Option<usize>)> {
    let mut links = Vec::with_capacity(entries.len() * 2);
    let mut below: Option<usize> = None;
    for entry in entries.iter().rev() {
        links.push((entry.target, below));
        links.push((entry.overlay, Some(entry.target)));
        below = Some(entry.overlay);
    }
    links
}
