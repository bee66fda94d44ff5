use std::mem;
use std::sync::Once;

use image::DynamicImage;
use image::imageops::FilterType;
use pinnie_core::config::VisualSettings;
use pinnie_core::{Decoration, DecorationFactory, Rect, WindowResult};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    AC_SRC_ALPHA, AC_SRC_OVER, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION,
    CreateCompatibleDC, CreateDIBSection, DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC,
    ReleaseDC, SelectObject,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DestroyWindow, RegisterClassW, SW_HIDE,
    SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOSIZE, SWP_NOZORDER, SetWindowPos, ShowWindow,
    ULW_ALPHA, UpdateLayeredWindow, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
    WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::w;

use crate::dpi;

#[path = "overlay_render.rs"]
mod render;

use render::{Frame, Sprite};

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(overlay_wnd_proc),
            lpszClassName: w!("PinnieOverlay"),
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// Where the floating icon comes from.
enum IconSource {
    /// No icon file configured: draw the built-in badge.
    Badge,
    Image(DynamicImage),
    /// The configured file could not be loaded: draw the border only.
    Missing,
}

/// A click-through layered window framing one pinned target.
///
/// Content is pushed with `UpdateLayeredWindow` using per-pixel alpha,
/// so the window never paints in response to messages.
pub struct Overlay {
    hwnd: HWND,
    style: VisualSettings,
    icon: IconSource,
    bounds: Option<Rect>,
    header: i32,
    visible: bool,
    icon_visible: bool,
}

impl Overlay {
    /// Creates a new hidden overlay window.
    pub fn new(style: &VisualSettings) -> WindowResult<Self> {
        ensure_class_registered();

        let ex = WS_EX_LAYERED
            | WS_EX_TOOLWINDOW
            | WS_EX_TOPMOST
            | WS_EX_TRANSPARENT
            | WS_EX_NOACTIVATE;
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                w!("PinnieOverlay"),
                w!("Pinnie overlay"),
                WS_POPUP,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                0,
                0,
                None,
                None,
                None,
                None,
            )?
        };

        Ok(Self {
            hwnd,
            style: style.clone(),
            icon: load_icon(style),
            bounds: None,
            header: 0,
            visible: false,
            icon_visible: false,
        })
    }

    fn sprite(&self, scale: f64) -> Option<Sprite> {
        if !self.icon_visible || !self.style.show_icon {
            return None;
        }
        let size = (f64::from(self.style.icon_size) * scale).round().max(1.0) as u32;
        match &self.icon {
            IconSource::Image(image) => {
                let width = (u64::from(size) * u64::from(image.width())
                    / u64::from(image.height().max(1)))
                .max(1) as u32;
                let rgba = image
                    .resize_exact(width, size, FilterType::Triangle)
                    .to_rgba8();
                Some(Sprite::from_rgba(width as i32, size as i32, rgba.as_raw()))
            }
            IconSource::Badge => Some(Sprite::badge(size as i32, self.style.border_color)),
            IconSource::Missing => None,
        }
    }

    /// Renders the current state and pushes it to the window.
    fn redraw(&self) -> WindowResult<()> {
        let Some(bounds) = self.bounds else {
            return Ok(());
        };
        let frame = Frame {
            width: bounds.width,
            height: bounds.height,
            header: self.header,
            scale: dpi::scale_for_rect(&bounds),
        };
        let pixels = render::render(&frame, &self.style, self.sprite(frame.scale).as_ref());
        self.present(&bounds, &pixels)
    }

    /// Copies premultiplied pixels into a DIB and applies it via
    /// `UpdateLayeredWindow`.
    fn present(&self, bounds: &Rect, pixels: &[u32]) -> WindowResult<()> {
        let (w, h) = (bounds.width, bounds.height);
        if w <= 0 || h <= 0 {
            return Ok(());
        }

        unsafe {
            let screen_dc = GetDC(None);
            let mem_dc = CreateCompatibleDC(Some(screen_dc));

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: w,
                    biHeight: -h, // top-down
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let mut bits = std::ptr::null_mut();
            let bmp = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
            {
                Ok(bmp) if !bits.is_null() => bmp,
                Ok(bmp) => {
                    let _ = DeleteObject(bmp.into());
                    let _ = DeleteDC(mem_dc);
                    let _ = ReleaseDC(None, screen_dc);
                    return Err("CreateDIBSection returned no pixel buffer".into());
                }
                Err(e) => {
                    let _ = DeleteDC(mem_dc);
                    let _ = ReleaseDC(None, screen_dc);
                    return Err(e.into());
                }
            };

            let old = SelectObject(mem_dc, bmp.into());

            // SAFETY: `bits` is non-null and points to `w * h` pixels
            // allocated by CreateDIBSection; `pixels` has the same length.
            let buf = std::slice::from_raw_parts_mut(bits as *mut u32, (w * h) as usize);
            buf.copy_from_slice(pixels);

            let pt_dst = POINT {
                x: bounds.x,
                y: bounds.y,
            };
            let size = SIZE { cx: w, cy: h };
            let pt_src = POINT::default();
            let blend = BLENDFUNCTION {
                BlendOp: AC_SRC_OVER as u8,
                SourceConstantAlpha: 255,
                AlphaFormat: AC_SRC_ALPHA as u8,
                ..Default::default()
            };

            let result = UpdateLayeredWindow(
                self.hwnd,
                Some(screen_dc),
                Some(&pt_dst),
                Some(&size),
                Some(mem_dc),
                Some(&pt_src),
                COLORREF(0),
                Some(&blend),
                ULW_ALPHA,
            );

            SelectObject(mem_dc, old);
            let _ = DeleteObject(bmp.into());
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);

            result?;
        }
        Ok(())
    }
}

impl Decoration for Overlay {
    fn handle(&self) -> usize {
        self.hwnd.0 as usize
    }

    fn set_bounds(&mut self, bounds: &Rect, header: i32) -> WindowResult<()> {
        let moved_only = self.bounds.is_some_and(|old| {
            old.width == bounds.width && old.height == bounds.height && self.header == header
        });
        self.bounds = Some(*bounds);
        self.header = header;

        if moved_only {
            // SAFETY: a pure move; z-order and activation are untouched.
            unsafe {
                SetWindowPos(
                    self.hwnd,
                    None,
                    bounds.x,
                    bounds.y,
                    0,
                    0,
                    SWP_NOZORDER | SWP_NOACTIVATE | SWP_NOSIZE,
                )?
            };
            return Ok(());
        }
        self.redraw()
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        let cmd = if visible { SW_SHOWNOACTIVATE } else { SW_HIDE };
        // SAFETY: ShowWindow on our own window.
        unsafe {
            let _ = ShowWindow(self.hwnd, cmd);
        }
    }

    fn set_icon_visible(&mut self, visible: bool) {
        if self.icon_visible == visible {
            return;
        }
        self.icon_visible = visible;
        if let Err(e) = self.redraw() {
            pinnie_core::log_debug!("Failed to redraw overlay {:#x}: {e}", self.handle());
        }
    }

    fn apply_style(&mut self, settings: &VisualSettings) {
        if settings.icon_path != self.style.icon_path {
            self.icon = load_icon(settings);
        }
        self.style = settings.clone();
        if let Err(e) = self.redraw() {
            pinnie_core::log_debug!("Failed to redraw overlay {:#x}: {e}", self.handle());
        }
    }

    fn header_height(&self, scale: f64) -> Option<i32> {
        self.style
            .show_icon
            .then(|| render::icon_header(self.style.icon_size, scale))
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

/// Loads the configured icon image.
///
/// An unreadable file is logged; the overlay then shows its border only.
fn load_icon(style: &VisualSettings) -> IconSource {
    let Some(path) = style.icon_path.as_deref() else {
        return IconSource::Badge;
    };
    match image::open(path) {
        Ok(image) => IconSource::Image(image),
        Err(e) => {
            pinnie_core::log_warn!("Failed to load icon {path:?}: {e}");
            IconSource::Missing
        }
    }
}

/// Creates [`Overlay`] windows on the calling thread.
#[derive(Debug, Default)]
pub struct OverlayFactory;

impl DecorationFactory for OverlayFactory {
    type Overlay = Overlay;

    fn create(&mut self, settings: &VisualSettings) -> WindowResult<Overlay> {
        Overlay::new(settings)
    }
}
