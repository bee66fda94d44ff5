//! Pin/unpin orchestration: pin set, overlay tracker, resolver and hotkey.

use std::sync::mpsc::Sender;
use std::time::Instant;

use crate::config::{Config, VisualSettings};
use crate::hotkey::{Hotkey, HotkeyBackend, HotkeyDispatch};
use crate::ipc::{Command, PinnedEntry, Response};
use crate::pin_set::{PinSet, PinnedWindow};
use crate::resolver::TargetResolver;
use crate::tracker::{OverlayTracker, SyncCause};
use crate::{DecorationFactory, WindowEvent, WindowManager};

/// A unit of work for the engine's single dispatch thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Work {
    /// Periodic timer tick.
    Tick(Instant),
    /// A translated window hook event.
    Event(WindowEvent),
    /// A window message that may be the pin hotkey.
    Hotkey { message: u32, param: usize },
}

/// State changes reported to presentation collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Pinned { hwnd: usize },
    Unpinned { hwnd: usize },
    HotkeyChanged { hotkey: Hotkey },
}

/// The pinning engine.
///
/// Owns every piece of mutable state and must only be driven from one
/// thread. Dropping it restores all pinned windows.
pub struct PinEngine<W, F, B>
where
    W: WindowManager,
    F: DecorationFactory,
    B: HotkeyBackend,
{
    wm: W,
    factory: F,
    pins: PinSet,
    tracker: OverlayTracker<F::Overlay>,
    resolver: TargetResolver,
    hotkey: HotkeyDispatch<B>,
    notify: Sender<Notification>,
}

impl<W, F, B> PinEngine<W, F, B>
where
    W: WindowManager,
    F: DecorationFactory,
    B: HotkeyBackend,
{
    pub fn new(
        wm: W,
        factory: F,
        backend: B,
        settings: VisualSettings,
        notify: Sender<Notification>,
    ) -> Self {
        Self {
            wm,
            factory,
            pins: PinSet::new(),
            tracker: OverlayTracker::new(settings),
            resolver: TargetResolver::new(),
            hotkey: HotkeyDispatch::new(backend),
            notify,
        }
    }

    pub fn window_manager(&self) -> &W {
        &self.wm
    }

    pub fn resolver(&self) -> &TargetResolver {
        &self.resolver
    }

    pub fn settings(&self) -> &VisualSettings {
        self.tracker.settings()
    }

    /// Pinned targets, topmost first.
    pub fn pinned(&self) -> Vec<usize> {
        self.pins.targets()
    }

    pub fn is_pinned(&self, hwnd: usize) -> bool {
        self.pins.contains(hwnd)
    }

    pub fn overlay_for(&self, target: usize) -> Option<usize> {
        self.tracker.overlay_for(target)
    }

    pub fn hotkey(&self) -> Option<Hotkey> {
        self.hotkey.current()
    }

    /// Registers the startup hotkey. Returns `false` on conflict.
    pub fn register_hotkey(&mut self, hotkey: Hotkey) -> bool {
        self.hotkey.register(hotkey)
    }

    /// Changes the hotkey, keeping the old one if the new one is refused.
    pub fn rebind_hotkey(&mut self, hotkey: Hotkey) -> bool {
        if !self.hotkey.rebind(hotkey) {
            return false;
        }
        self.emit(Notification::HotkeyChanged { hotkey });
        true
    }

    /// Pushes new visual settings to every overlay.
    pub fn apply_settings(&mut self, settings: VisualSettings) {
        let gone = self.tracker.apply_settings(&self.wm, settings);
        self.drop_gone(gone);
    }

    /// Applies a freshly loaded configuration.
    ///
    /// Returns `false` if the configured hotkey could not be bound.
    pub fn apply_config(&mut self, config: &Config) -> bool {
        if config.overlay != *self.settings() {
            self.apply_settings(config.overlay.clone());
        }
        let Some(hotkey) = config.hotkey.to_hotkey() else {
            crate::log_warn!("Unknown hotkey key name {:?}", config.hotkey.key);
            return false;
        };
        if self.hotkey.current() == Some(hotkey) {
            return true;
        }
        self.rebind_hotkey(hotkey)
    }

    /// Resolves the window the user is pointing at.
    pub fn resolve_target(&self) -> Option<usize> {
        self.resolver.resolve(&self.wm, &self.pins)
    }

    /// Toggles the window under the cursor.
    ///
    /// Returns the target and whether it is now pinned.
    pub fn toggle_under_cursor(&mut self) -> Option<(usize, bool)> {
        let Some(target) = self.resolve_target() else {
            crate::log_debug!("Toggle: no window under cursor");
            return None;
        };
        let pinned = self.toggle(target);
        Some((target, pinned))
    }

    /// Pins `hwnd` if unpinned and unpins it otherwise.
    ///
    /// Returns `true` when the window is pinned afterwards.
    pub fn toggle(&mut self, hwnd: usize) -> bool {
        self.resolver.record_toggled(hwnd);
        if self.pins.contains(hwnd) {
            self.unpin(hwnd);
            false
        } else {
            self.pin(hwnd)
        }
    }

    /// Pins `hwnd` on top of the stack.
    ///
    /// Returns `false` without touching any window when the handle is
    /// not a live window or its overlay cannot be created.
    pub fn pin(&mut self, hwnd: usize) -> bool {
        if self.pins.contains(hwnd) {
            return true;
        }
        if hwnd == 0 || !self.wm.is_window(hwnd) {
            crate::log_debug!("Refusing to pin invalid window {hwnd:#x}");
            return false;
        }
        let overlay = match self.tracker.add(&self.wm, &mut self.factory, hwnd) {
            Ok(overlay) => overlay,
            Err(e) => {
                crate::log_warn!("Failed to create overlay for {hwnd:#x}: {e}");
                return false;
            }
        };
        self.pins.push_top(PinnedWindow {
            target: hwnd,
            overlay,
        });
        self.rebuild();
        crate::log_info!("Pinned {hwnd:#x} ({} pinned)", self.pins.len());
        self.emit(Notification::Pinned { hwnd });
        true
    }

    /// Unpins `hwnd`. Returns `false` if it was not pinned.
    pub fn unpin(&mut self, hwnd: usize) -> bool {
        if !self.pins.contains(hwnd) {
            return false;
        }
        if let Err(e) = self.wm.set_owner(hwnd, None) {
            crate::log_debug!("Failed to clear owner of {hwnd:#x}: {e}");
        }
        self.pins.remove(hwnd);
        // The window above still hangs off this overlay until the chain is
        // relinked, and destroying an owner destroys what it owns.
        self.rebuild();
        self.tracker.remove(hwnd);
        if let Err(e) = self.wm.set_topmost(hwnd, false) {
            crate::log_debug!("Failed to clear topmost on {hwnd:#x}: {e}");
        }
        crate::log_info!("Unpinned {hwnd:#x} ({} pinned)", self.pins.len());
        self.emit(Notification::Unpinned { hwnd });
        true
    }

    /// Re-applies the ownership chain for the current pin order.
    ///
    /// Closed targets leave the chain first; their overlays close only
    /// after the relink. A failing call only affects its own window; the
    /// rest of the chain is still applied.
    pub fn rebuild(&mut self) {
        let wm = &self.wm;
        let closed = self.pins.retain_targets(|t| wm.is_window(t));
        self.relink();
        for entry in closed {
            crate::log_info!("Pinned window {:#x} closed, dropping", entry.target);
            self.tracker.remove(entry.target);
        }
    }

    fn relink(&mut self) {
        for hwnd in self.pins.handles() {
            if let Err(e) = self.wm.set_owner(hwnd, None) {
                crate::log_debug!("Failed to clear owner of {hwnd:#x}: {e}");
            }
        }
        let links = self.pins.chain();
        for &(hwnd, owner) in &links {
            if owner.is_some()
                && let Err(e) = self.wm.set_owner(hwnd, owner)
            {
                crate::log_debug!("Failed to chain {hwnd:#x}: {e}");
            }
        }
        for &(hwnd, _) in &links {
            if let Err(e) = self.wm.set_topmost(hwnd, true) {
                crate::log_debug!("Failed to mark {hwnd:#x} topmost: {e}");
            }
        }
    }

    /// Restores every pinned window and closes all overlays.
    pub fn unpin_all(&mut self) {
        for entry in self.pins.take_all() {
            let _ = self.wm.set_owner(entry.overlay, None);
            let _ = self.wm.set_owner(entry.target, None);
            let _ = self.wm.set_topmost(entry.target, false);
        }
        self.tracker.clear();
    }

    /// Runs one unit of work to completion.
    pub fn process(&mut self, work: Work) {
        match work {
            Work::Tick(now) => {
                let gone = self.tracker.sync_all(&self.wm, SyncCause::Tick);
                self.drop_gone(gone);
                if let Some(hwnd) = self.resolver.poll_foreground(now) {
                    crate::log_debug!("Foreground committed: {hwnd:#x}");
                }
            }
            Work::Event(WindowEvent::Foreground { hwnd }) => {
                if !self.pins.involves(hwnd) || self.pins.contains(hwnd) {
                    self.resolver.on_foreground(hwnd, Instant::now());
                }
            }
            Work::Event(event) => {
                if let Some(gone) = self.tracker.handle_event(&self.wm, &event) {
                    self.drop_gone(vec![gone]);
                }
            }
            Work::Hotkey { message, param } => {
                if self.hotkey.dispatch_if_matches(message, param) {
                    self.toggle_under_cursor();
                }
            }
        }
    }

    /// Executes an IPC command.
    ///
    /// `Stop` is answered here but acting on it is up to the daemon.
    pub fn execute(&mut self, command: &Command) -> Response {
        match command {
            Command::Stop => Response::ok_with_message("Stopping"),
            Command::Status => Response {
                hotkey: self.hotkey.current().map(|h| h.to_string()),
                ..Response::ok_with_message(self.status_line())
            },
            Command::Toggle => {
                let Some(target) = self.resolve_target() else {
                    return Response::error("No window under the cursor");
                };
                let was_pinned = self.is_pinned(target);
                match (was_pinned, self.toggle(target)) {
                    (true, _) => Response::ok_with_message(format!("Unpinned {target:#x}")),
                    (false, true) => Response::ok_with_message(format!("Pinned {target:#x}")),
                    (false, false) => Response::error(format!("Could not pin {target:#x}")),
                }
            }
            Command::Pin { hwnd } => {
                let target = self.pins.target_for_overlay(*hwnd).unwrap_or(*hwnd);
                if self.pin(target) {
                    Response::ok_with_message(format!("Pinned {target:#x}"))
                } else {
                    Response::error(format!("{target:#x} is not a window that can be pinned"))
                }
            }
            Command::Unpin { hwnd } => {
                if self.unpin(*hwnd) {
                    Response::ok_with_message(format!("Unpinned {hwnd:#x}"))
                } else {
                    Response::error(format!("{hwnd:#x} is not pinned"))
                }
            }
            Command::List => Response::with_pinned(
                self.pinned()
                    .into_iter()
                    .map(|hwnd| PinnedEntry {
                        hwnd,
                        title: String::new(),
                    })
                    .collect(),
            ),
            Command::Reload => {
                let config = crate::config::load();
                if self.apply_config(&config) {
                    Response::ok_with_message("Configuration reloaded")
                } else {
                    Response::ok_with_message(format!(
                        "Configuration reloaded, but hotkey {:?} could not be registered",
                        config.hotkey.key
                    ))
                }
            }
        }
    }

    fn status_line(&self) -> String {
        let hotkey = self
            .hotkey
            .current()
            .map_or_else(|| "not registered".to_string(), |h| h.to_string());
        format!(
            "Pinnie is running ({} pinned, hotkey: {hotkey})",
            self.pins.len()
        )
    }

    /// Silently drops targets that were found closed.
    fn drop_gone(&mut self, gone: Vec<usize>) {
        if gone.is_empty() {
            return;
        }
        for &target in &gone {
            crate::log_info!("Pinned window {target:#x} closed, dropping");
            self.pins.remove(target);
        }
        self.rebuild();
        for target in gone {
            self.tracker.remove(target);
        }
    }

    fn emit(&self, notification: Notification) {
        let _ = self.notify.send(notification);
    }
}

impl<W, F, B> Drop for PinEngine<W, F, B>
where
    W: WindowManager,
    F: DecorationFactory,
    B: HotkeyBackend,
{
    fn drop(&mut self) {
        self.unpin_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;
    use crate::Rect;
    use crate::hotkey::{HOTKEY_ID, WM_HOTKEY};
    use crate::testing::{FakeDesktop, FakeFactory, FakeHotkeys, FakeWindow};

    type Engine = PinEngine<FakeDesktop, FakeFactory, FakeHotkeys>;

    const CTRL_WIN_T: Hotkey = Hotkey {
        modifiers: 0x0002 | 0x0008,
        key: 0x54,
    };

    fn engine_with(handles: &[usize]) -> (Engine, FakeFactory, Receiver<Notification>) {
        let wm = FakeDesktop::default();
        for (i, &h) in handles.iter().enumerate() {
            let offset = i as i32 * 50;
            wm.add(h, FakeWindow::at(Rect::new(offset, 200 + offset, 640, 480)));
        }
        let factory = FakeFactory::default();
        factory.watch_owners(wm.owner_links());
        let (tx, rx) = mpsc::channel();
        let engine = PinEngine::new(
            wm,
            factory.clone(),
            FakeHotkeys::default(),
            VisualSettings::default(),
            tx,
        );
        (engine, factory, rx)
    }

    #[test]
    fn pin_chains_and_marks_topmost() {
        // Arrange
        let (mut engine, _factory, rx) = engine_with(&[1, 2, 3]);

        // Act
        for hwnd in [3, 2, 1] {
            assert!(engine.pin(hwnd));
        }

        // Assert
        let wm = engine.window_manager();
        let overlay = |t| engine.overlay_for(t).unwrap();
        assert_eq!(engine.pinned(), vec![1, 2, 3]);
        assert_eq!(wm.owner_of(3), None);
        assert_eq!(wm.owner_of(overlay(3)), Some(3));
        assert_eq!(wm.owner_of(2), Some(overlay(3)));
        assert_eq!(wm.owner_of(overlay(2)), Some(2));
        assert_eq!(wm.owner_of(1), Some(overlay(2)));
        assert_eq!(wm.owner_of(overlay(1)), Some(1));
        for t in [1, 2, 3] {
            assert!(wm.is_topmost(t));
            assert!(wm.is_topmost(overlay(t)));
        }
        let events: Vec<Notification> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Notification::Pinned { hwnd: 3 });
    }

    #[test]
    fn rebuild_twice_gives_same_owners() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[1, 2, 3]);
        for hwnd in [3, 2, 1] {
            engine.pin(hwnd);
        }
        let handles: Vec<usize> = [1, 2, 3]
            .into_iter()
            .flat_map(|t| [t, engine.overlay_for(t).unwrap()])
            .collect();
        let snapshot = |e: &Engine| -> Vec<Option<usize>> {
            handles.iter().map(|&h| e.window_manager().owner_of(h)).collect()
        };
        let before = snapshot(&engine);

        // Act
        engine.rebuild();
        let once = snapshot(&engine);
        engine.rebuild();
        let twice = snapshot(&engine);

        // Assert
        assert_eq!(before, once);
        assert_eq!(once, twice);
    }

    #[test]
    fn unpin_middle_leaves_two_entry_chain() {
        // Arrange
        let (mut engine, factory, rx) = engine_with(&[1, 2, 3]);
        for hwnd in [3, 2, 1] {
            engine.pin(hwnd);
        }
        let overlay_b = engine.overlay_for(2).unwrap();
        let _ = rx.try_iter().count();

        // Act
        let unpinned = engine.unpin(2);

        // Assert
        let wm = engine.window_manager();
        let overlay_a = engine.overlay_for(1).unwrap();
        let overlay_c = engine.overlay_for(3).unwrap();
        assert!(unpinned);
        assert_eq!(engine.pinned(), vec![1, 3]);
        assert_eq!(wm.owner_of(2), None);
        assert!(!wm.is_topmost(2));
        assert!(factory.probe(overlay_b).closed);
        assert_eq!(wm.owner_of(3), None);
        assert_eq!(wm.owner_of(overlay_c), Some(3));
        assert_eq!(wm.owner_of(1), Some(overlay_c));
        assert_eq!(wm.owner_of(overlay_a), Some(1));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![Notification::Unpinned { hwnd: 2 }]
        );
    }

    #[test]
    fn invalid_handle_creates_nothing_and_mutates_nothing() {
        // Arrange
        let (mut engine, factory, rx) = engine_with(&[1]);
        engine.window_manager().close(1);
        engine.window_manager().clear_mutations();

        // Act
        let pinned = engine.toggle(1);
        let null = engine.toggle(0);

        // Assert
        assert!(!pinned);
        assert!(!null);
        assert!(engine.pinned().is_empty());
        assert_eq!(factory.created(), 0);
        assert!(engine.window_manager().mutations().is_empty());
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn toggle_counts_match_net_pins() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[1, 2, 3, 4]);
        let sequence = [1, 2, 1, 3, 4, 2, 2, 4, 1];

        // Act
        let mut expected: Vec<usize> = Vec::new();
        for hwnd in sequence {
            let now_pinned = engine.toggle(hwnd);
            if let Some(pos) = expected.iter().position(|&h| h == hwnd) {
                expected.remove(pos);
                assert!(!now_pinned);
            } else {
                expected.push(hwnd);
                assert!(now_pinned);
            }
        }

        // Assert
        let mut pinned = engine.pinned();
        pinned.sort_unstable();
        expected.sort_unstable();
        assert_eq!(pinned, expected);
        pinned.dedup();
        assert_eq!(pinned.len(), expected.len());
    }

    #[test]
    fn closed_target_is_dropped_on_tick() {
        // Arrange
        let (mut engine, factory, rx) = engine_with(&[1, 2]);
        engine.pin(2);
        engine.pin(1);
        let overlay = engine.overlay_for(2).unwrap();
        let _ = rx.try_iter().count();

        // Act
        engine.window_manager().close(2);
        engine.process(Work::Tick(Instant::now()));

        // Assert
        assert_eq!(engine.pinned(), vec![1]);
        assert!(factory.probe(overlay).closed);
        assert_eq!(engine.window_manager().owner_of(1), None);
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn unpinned_overlay_owns_nothing_when_it_closes() {
        // Arrange
        let (mut engine, factory, _rx) = engine_with(&[1, 2, 3]);
        for hwnd in [3, 2, 1] {
            engine.pin(hwnd);
        }
        let overlay_b = engine.overlay_for(2).unwrap();
        assert_eq!(engine.window_manager().owner_of(1), Some(overlay_b));

        // Act
        engine.unpin(2);

        // Assert
        let probe = factory.probe(overlay_b);
        assert!(probe.closed);
        assert_eq!(probe.owned_at_close, Vec::<usize>::new());
    }

    #[test]
    fn closed_middle_target_is_unlinked_before_its_overlay_closes() {
        // Arrange
        let (mut engine, factory, _rx) = engine_with(&[1, 2, 3]);
        for hwnd in [3, 2, 1] {
            engine.pin(hwnd);
        }
        let overlay_b = engine.overlay_for(2).unwrap();

        // Act
        engine.window_manager().close(2);
        engine.process(Work::Tick(Instant::now()));

        // Assert
        let probe = factory.probe(overlay_b);
        assert!(probe.closed);
        assert_eq!(probe.owned_at_close, Vec::<usize>::new());
        assert_eq!(
            engine.window_manager().owner_of(1),
            engine.overlay_for(3)
        );
    }

    #[test]
    fn rebuild_survives_failing_entry() {
        // Arrange
        let (mut engine, factory, _rx) = engine_with(&[1, 2, 3]);
        for hwnd in [3, 2, 1] {
            engine.pin(hwnd);
        }
        let overlay_b = engine.overlay_for(2).unwrap();

        // Act
        engine.window_manager().close(2);
        engine.rebuild();

        // Assert
        let wm = engine.window_manager();
        assert_eq!(engine.pinned(), vec![1, 3]);
        assert_eq!(wm.owner_of(1), Some(engine.overlay_for(3).unwrap()));
        assert!(wm.is_topmost(1));
        assert_eq!(factory.probe(overlay_b).owned_at_close, Vec::<usize>::new());
    }

    #[test]
    fn hotkey_message_toggles_window_under_cursor() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[7]);
        assert!(engine.register_hotkey(CTRL_WIN_T));
        engine.window_manager().point_at(7);

        // Act
        engine.process(Work::Hotkey {
            message: WM_HOTKEY,
            param: HOTKEY_ID as usize,
        });
        let after_first = engine.is_pinned(7);
        engine.process(Work::Hotkey {
            message: WM_HOTKEY,
            param: 1,
        });

        // Assert
        assert!(after_first);
        assert!(engine.is_pinned(7));
        assert_eq!(engine.resolver().last_toggled(), Some(7));
    }

    #[test]
    fn hotkey_on_overlay_unpins_its_target() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[7]);
        engine.pin(7);
        let overlay = engine.overlay_for(7).unwrap();
        engine.window_manager().point_at(overlay);

        // Act
        let result = engine.toggle_under_cursor();

        // Assert
        assert_eq!(result, Some((7, false)));
        assert!(!engine.is_pinned(7));
    }

    #[test]
    fn rebind_emits_hotkey_changed() {
        // Arrange
        let (mut engine, _factory, rx) = engine_with(&[]);
        engine.register_hotkey(CTRL_WIN_T);
        let alt_p = Hotkey {
            modifiers: 0x0001,
            key: 0x50,
        };

        // Act
        let ok = engine.rebind_hotkey(alt_p);

        // Assert
        assert!(ok);
        assert_eq!(engine.hotkey(), Some(alt_p));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![Notification::HotkeyChanged { hotkey: alt_p }]
        );
    }

    #[test]
    fn overlay_creation_failure_pins_nothing() {
        // Arrange
        let (mut engine, factory, _rx) = engine_with(&[1]);
        factory.set_fail(true);
        engine.window_manager().clear_mutations();

        // Act
        let pinned = engine.pin(1);

        // Assert
        assert!(!pinned);
        assert!(engine.pinned().is_empty());
        assert!(engine.window_manager().mutations().is_empty());
    }

    #[test]
    fn unpin_all_restores_windows() {
        // Arrange
        let (mut engine, factory, _rx) = engine_with(&[1, 2]);
        engine.pin(1);
        engine.pin(2);
        let overlay = engine.overlay_for(1).unwrap();

        // Act
        engine.unpin_all();

        // Assert
        let wm = engine.window_manager();
        assert!(engine.pinned().is_empty());
        assert_eq!(wm.owner_of(1), None);
        assert!(!wm.is_topmost(1));
        assert!(!wm.is_topmost(2));
        assert!(factory.probe(overlay).closed);
    }

    #[test]
    fn execute_list_reports_topmost_first() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[1, 2]);
        engine.pin(1);
        engine.pin(2);

        // Act
        let response = engine.execute(&Command::List);

        // Assert
        let handles: Vec<usize> = response.pinned.iter().map(|e| e.hwnd).collect();
        assert_eq!(handles, vec![2, 1]);
    }

    #[test]
    fn execute_unpin_of_unknown_window_is_error() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[1]);

        // Act
        let response = engine.execute(&Command::Unpin { hwnd: 1 });

        // Assert
        assert!(!response.is_ok());
    }

    #[test]
    fn execute_status_mentions_pin_count() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[1]);
        engine.pin(1);

        // Act
        let response = engine.execute(&Command::Status);

        // Assert
        assert_eq!(
            response.message.as_deref(),
            Some("Pinnie is running (1 pinned, hotkey: not registered)")
        );
        assert_eq!(response.hotkey, None);
    }

    #[test]
    fn execute_status_reports_bound_hotkey() {
        // Arrange
        let (mut engine, _factory, _rx) = engine_with(&[]);
        assert!(engine.register_hotkey(CTRL_WIN_T));

        // Act
        let response = engine.execute(&Command::Status);

        // Assert
        assert_eq!(response.hotkey, Some(CTRL_WIN_T.to_string()));
    }
}
