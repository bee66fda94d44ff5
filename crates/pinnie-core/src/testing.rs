//! In-memory window manager, decorations and hotkey backend for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::config::VisualSettings;
use crate::hotkey::{Hotkey, HotkeyBackend};
use crate::{Decoration, DecorationFactory, Point, Rect, WindowManager, WindowResult};

/// Geometry and state of a fake top-level or child window.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub rect: Rect,
    /// Visible frame; `None` makes the frame query fail.
    pub frame: Option<Rect>,
    pub visible: bool,
    pub cloaked: bool,
    pub maximized: bool,
    pub dpi_scale: f64,
    pub parent: Option<usize>,
}

impl FakeWindow {
    pub fn at(rect: Rect) -> Self {
        Self {
            rect,
            frame: Some(rect),
            visible: true,
            cloaked: false,
            maximized: false,
            dpi_scale: 1.0,
            parent: None,
        }
    }

    pub fn child_of(parent: usize) -> Self {
        Self {
            parent: Some(parent),
            ..Self::at(Rect::new(10, 10, 50, 20))
        }
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn with_dpi(mut self, scale: f64) -> Self {
        self.dpi_scale = scale;
        self
    }

    pub fn maximized(mut self) -> Self {
        self.maximized = true;
        self
    }
}

/// Owner links by owned window, shared with overlays that want to see
/// them when they close.
pub type OwnerLinks = Rc<RefCell<HashMap<usize, usize>>>;

/// A state-changing call made against the fake desktop.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Owner(usize, Option<usize>),
    Topmost(usize, bool),
}

#[derive(Default)]
pub struct FakeDesktop {
    windows: RefCell<HashMap<usize, FakeWindow>>,
    closed: RefCell<HashSet<usize>>,
    owners: OwnerLinks,
    topmost: RefCell<HashSet<usize>>,
    mutations: RefCell<Vec<Mutation>>,
    under_cursor: Cell<Option<usize>>,
    foreground: Cell<Option<usize>>,
    frame_queries: Cell<usize>,
}

impl FakeDesktop {
    pub fn add(&self, hwnd: usize, window: FakeWindow) {
        self.closed.borrow_mut().remove(&hwnd);
        self.windows.borrow_mut().insert(hwnd, window);
    }

    pub fn update(&self, hwnd: usize, change: impl FnOnce(&mut FakeWindow)) {
        if let Some(window) = self.windows.borrow_mut().get_mut(&hwnd) {
            change(window);
        }
    }

    /// Destroys the window. Later calls against it fail.
    pub fn close(&self, hwnd: usize) {
        self.windows.borrow_mut().remove(&hwnd);
        self.closed.borrow_mut().insert(hwnd);
    }

    /// Sets an owner link without recording it as a mutation.
    pub fn link_owner(&self, hwnd: usize, owner: usize) {
        self.owners.borrow_mut().insert(hwnd, owner);
    }

    pub fn point_at(&self, hwnd: usize) {
        self.under_cursor.set(Some(hwnd));
    }

    pub fn set_foreground(&self, hwnd: Option<usize>) {
        self.foreground.set(hwnd);
    }

    pub fn owner_links(&self) -> OwnerLinks {
        self.owners.clone()
    }

    pub fn owner_of(&self, hwnd: usize) -> Option<usize> {
        self.owners.borrow().get(&hwnd).copied()
    }

    pub fn is_topmost(&self, hwnd: usize) -> bool {
        self.topmost.borrow().contains(&hwnd)
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.borrow().clone()
    }

    pub fn clear_mutations(&self) {
        self.mutations.borrow_mut().clear();
    }

    pub fn frame_queries(&self) -> usize {
        self.frame_queries.get()
    }

    fn with<T>(&self, hwnd: usize, read: impl FnOnce(&FakeWindow) -> T) -> WindowResult<T> {
        self.windows
            .borrow()
            .get(&hwnd)
            .map(read)
            .ok_or_else(|| format!("no window {hwnd:#x}").into())
    }

    fn check_open(&self, hwnd: usize) -> WindowResult<()> {
        if self.closed.borrow().contains(&hwnd) {
            return Err(format!("invalid window handle {hwnd:#x}").into());
        }
        Ok(())
    }
}

impl WindowManager for FakeDesktop {
    fn is_window(&self, hwnd: usize) -> bool {
        self.windows.borrow().contains_key(&hwnd)
    }

    fn cursor_pos(&self) -> WindowResult<Point> {
        match self.under_cursor.get() {
            Some(_) => Ok(Point::new(0, 0)),
            None => Err("cursor position unavailable".into()),
        }
    }

    fn window_from_point(&self, _point: Point) -> Option<usize> {
        self.under_cursor.get()
    }

    fn foreground_window(&self) -> Option<usize> {
        self.foreground.get()
    }

    fn root(&self, hwnd: usize) -> usize {
        let windows = self.windows.borrow();
        let mut current = hwnd;
        while let Some(parent) = windows.get(&current).and_then(|w| w.parent) {
            current = parent;
        }
        current
    }

    fn owner(&self, hwnd: usize) -> Option<usize> {
        self.owner_of(hwnd)
    }

    fn window_rect(&self, hwnd: usize) -> WindowResult<Rect> {
        self.with(hwnd, |w| w.rect)
    }

    fn frame_bounds(&self, hwnd: usize) -> WindowResult<Rect> {
        self.frame_queries.set(self.frame_queries.get() + 1);
        self.with(hwnd, |w| w.frame)?
            .ok_or_else(|| "frame bounds unavailable".into())
    }

    fn is_visible(&self, hwnd: usize) -> bool {
        self.with(hwnd, |w| w.visible).unwrap_or(false)
    }

    fn is_cloaked(&self, hwnd: usize) -> bool {
        self.with(hwnd, |w| w.cloaked).unwrap_or(false)
    }

    fn is_maximized(&self, hwnd: usize) -> WindowResult<bool> {
        self.with(hwnd, |w| w.maximized)
    }

    fn dpi_scale(&self, hwnd: usize) -> f64 {
        self.with(hwnd, |w| w.dpi_scale).unwrap_or(1.0)
    }

    fn set_owner(&self, hwnd: usize, owner: Option<usize>) -> WindowResult<()> {
        self.mutations
            .borrow_mut()
            .push(Mutation::Owner(hwnd, owner));
        self.check_open(hwnd)?;
        match owner {
            Some(o) => self.owners.borrow_mut().insert(hwnd, o),
            None => self.owners.borrow_mut().remove(&hwnd),
        };
        Ok(())
    }

    fn set_topmost(&self, hwnd: usize, topmost: bool) -> WindowResult<()> {
        self.mutations
            .borrow_mut()
            .push(Mutation::Topmost(hwnd, topmost));
        self.check_open(hwnd)?;
        if topmost {
            self.topmost.borrow_mut().insert(hwnd);
        } else {
            self.topmost.borrow_mut().remove(&hwnd);
        }
        Ok(())
    }
}

/// What a fake overlay has been told to do.
#[derive(Debug, Clone, Default)]
pub struct OverlayProbe {
    pub bounds: Option<Rect>,
    pub header: i32,
    pub bounds_calls: usize,
    pub visible: bool,
    pub icon_visible: bool,
    pub style: VisualSettings,
    pub closed: bool,
    /// Windows still owned by the overlay when it closed.
    pub owned_at_close: Vec<usize>,
}

pub struct FakeOverlay {
    handle: usize,
    header: Option<i32>,
    probe: Rc<RefCell<OverlayProbe>>,
    links: Option<OwnerLinks>,
}

impl Decoration for FakeOverlay {
    fn handle(&self) -> usize {
        self.handle
    }

    fn set_bounds(&mut self, bounds: &Rect, header: i32) -> WindowResult<()> {
        let mut probe = self.probe.borrow_mut();
        probe.bounds = Some(*bounds);
        probe.header = header;
        probe.bounds_calls += 1;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.probe.borrow_mut().visible = visible;
    }

    fn set_icon_visible(&mut self, visible: bool) {
        self.probe.borrow_mut().icon_visible = visible;
    }

    fn apply_style(&mut self, settings: &VisualSettings) {
        self.probe.borrow_mut().style = settings.clone();
    }

    fn header_height(&self, scale: f64) -> Option<i32> {
        self.header.map(|h| (f64::from(h) * scale).ceil() as i32)
    }
}

impl Drop for FakeOverlay {
    fn drop(&mut self) {
        let mut owned: Vec<usize> = self
            .links
            .as_ref()
            .map(|links| {
                links
                    .borrow()
                    .iter()
                    .filter(|&(_, &owner)| owner == self.handle)
                    .map(|(&hwnd, _)| hwnd)
                    .collect()
            })
            .unwrap_or_default();
        owned.sort_unstable();
        let mut probe = self.probe.borrow_mut();
        probe.closed = true;
        probe.owned_at_close = owned;
    }
}

#[derive(Default)]
struct FactoryState {
    created: usize,
    fail: bool,
    header: Option<i32>,
    links: Option<OwnerLinks>,
    probes: HashMap<usize, Rc<RefCell<OverlayProbe>>>,
}

/// Hands out [`FakeOverlay`]s. Clones share state, so a test can keep
/// one clone after moving another into the engine.
#[derive(Clone, Default)]
pub struct FakeFactory {
    state: Rc<RefCell<FactoryState>>,
}

impl FakeFactory {
    /// First handle handed out; later overlays count up from here.
    pub const FIRST_HANDLE: usize = 0xA000;

    pub fn probe(&self, overlay: usize) -> OverlayProbe {
        self.state
            .borrow()
            .probes
            .get(&overlay)
            .map(|p| p.borrow().clone())
            .unwrap_or_default()
    }

    pub fn created(&self) -> usize {
        self.state.borrow().created
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.borrow_mut().fail = fail;
    }

    pub fn set_header(&self, header: Option<i32>) {
        self.state.borrow_mut().header = header;
    }

    /// Lets overlays record what they still own when they close.
    pub fn watch_owners(&self, links: OwnerLinks) {
        self.state.borrow_mut().links = Some(links);
    }
}

impl DecorationFactory for FakeFactory {
    type Overlay = FakeOverlay;

    fn create(&mut self, settings: &VisualSettings) -> WindowResult<FakeOverlay> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err("overlay creation failed".into());
        }
        let handle = Self::FIRST_HANDLE + state.created;
        state.created += 1;
        let probe = Rc::new(RefCell::new(OverlayProbe {
            style: settings.clone(),
            ..Default::default()
        }));
        state.probes.insert(handle, probe.clone());
        Ok(FakeOverlay {
            handle,
            header: state.header,
            probe,
            links: state.links.clone(),
        })
    }
}

/// Hotkey backend that refuses anything listed in `taken`.
#[derive(Clone, Default)]
pub struct FakeHotkeys {
    pub registered: Rc<RefCell<Vec<Hotkey>>>,
    pub taken: Rc<RefCell<Vec<Hotkey>>>,
}

impl HotkeyBackend for FakeHotkeys {
    fn register(&mut self, _id: i32, hotkey: Hotkey) -> WindowResult<()> {
        if self.taken.borrow().contains(&hotkey) {
            return Err("hotkey already registered".into());
        }
        *self.registered.borrow_mut() = vec![hotkey];
        Ok(())
    }

    fn unregister(&mut self, _id: i32) {
        self.registered.borrow_mut().clear();
    }
}
