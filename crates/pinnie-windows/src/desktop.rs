use pinnie_core::{Point, Rect, WindowManager, WindowResult};
use windows::Win32::Foundation::{HWND, POINT, SetLastError, WIN32_ERROR};
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    GA_ROOT, GW_OWNER, GWLP_HWNDPARENT, GetAncestor, GetCursorPos, GetForegroundWindow, GetWindow,
    GetWindowPlacement, GetWindowTextLengthW, GetWindowTextW, HWND_NOTOPMOST, HWND_TOPMOST,
    IsWindow, IsWindowVisible, SW_SHOWMAXIMIZED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SetWindowLongPtrW, SetWindowPos, WINDOWPLACEMENT, WindowFromPoint,
};

use crate::frame;

/// Converts a raw handle value (pointer-sized integer) into an `HWND`.
pub(crate) fn hwnd(raw: usize) -> HWND {
    HWND(raw as *mut _)
}

fn raw(hwnd: HWND) -> Option<usize> {
    (!hwnd.is_invalid()).then_some(hwnd.0 as usize)
}

/// The live Win32 desktop.
///
/// Every call goes straight to user32/dwmapi; nothing is cached here.
#[derive(Debug, Default, Clone, Copy)]
pub struct Desktop;

impl WindowManager for Desktop {
    fn is_window(&self, handle: usize) -> bool {
        // SAFETY: IsWindow accepts any value and only validates it.
        handle != 0 && unsafe { IsWindow(Some(hwnd(handle))).as_bool() }
    }

    fn cursor_pos(&self) -> WindowResult<Point> {
        let mut pt = POINT::default();
        // SAFETY: GetCursorPos writes into our stack POINT.
        unsafe { GetCursorPos(&mut pt)? };
        Ok(Point::new(pt.x, pt.y))
    }

    fn window_from_point(&self, point: Point) -> Option<usize> {
        // SAFETY: WindowFromPoint is a pure query.
        raw(unsafe {
            WindowFromPoint(POINT {
                x: point.x,
                y: point.y,
            })
        })
    }

    fn foreground_window(&self) -> Option<usize> {
        // SAFETY: GetForegroundWindow is a pure query.
        raw(unsafe { GetForegroundWindow() })
    }

    fn root(&self, handle: usize) -> usize {
        // SAFETY: GetAncestor returns null for invalid handles.
        raw(unsafe { GetAncestor(hwnd(handle), GA_ROOT) }).unwrap_or(handle)
    }

    fn owner(&self, handle: usize) -> Option<usize> {
        // SAFETY: GetWindow(GW_OWNER) is a pure query.
        unsafe { GetWindow(hwnd(handle), GW_OWNER) }
            .ok()
            .and_then(raw)
    }

    fn window_rect(&self, handle: usize) -> WindowResult<Rect> {
        frame::window_rect(hwnd(handle))
    }

    fn frame_bounds(&self, handle: usize) -> WindowResult<Rect> {
        frame::visible_rect(hwnd(handle))
    }

    fn is_visible(&self, handle: usize) -> bool {
        // SAFETY: IsWindowVisible is a simple query that returns a BOOL.
        unsafe { IsWindowVisible(hwnd(handle)).as_bool() }
    }

    fn is_cloaked(&self, handle: usize) -> bool {
        frame::is_cloaked(hwnd(handle))
    }

    fn is_maximized(&self, handle: usize) -> WindowResult<bool> {
        let mut placement = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };
        // SAFETY: `length` is set as the API requires.
        unsafe { GetWindowPlacement(hwnd(handle), &mut placement)? };
        Ok(placement.showCmd == SW_SHOWMAXIMIZED.0 as u32)
    }

    fn dpi_scale(&self, handle: usize) -> f64 {
        // SAFETY: GetDpiForWindow returns 0 for invalid handles.
        match unsafe { GetDpiForWindow(hwnd(handle)) } {
            0 => 1.0,
            dpi => f64::from(dpi) / 96.0,
        }
    }

    fn set_owner(&self, handle: usize, owner: Option<usize>) -> WindowResult<()> {
        let value = owner.unwrap_or(0) as isize;
        // SAFETY: GWLP_HWNDPARENT on a top-level window changes its owner.
        // A zero return is only an error if the last-error code is set, so
        // it is cleared first.
        unsafe {
            SetLastError(WIN32_ERROR(0));
            if SetWindowLongPtrW(hwnd(handle), GWLP_HWNDPARENT, value) == 0 {
                let err = windows::core::Error::from_win32();
                if err.code().is_err() {
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    fn set_topmost(&self, handle: usize, topmost: bool) -> WindowResult<()> {
        let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        // SAFETY: SetWindowPos with NOMOVE|NOSIZE|NOACTIVATE only touches
        // the z-order band.
        unsafe {
            SetWindowPos(
                hwnd(handle),
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?
        };
        Ok(())
    }
}

/// Returns the window caption, or an empty string.
pub fn window_title(handle: usize) -> String {
    let hwnd = hwnd(handle);
    // SAFETY: GetWindowTextLengthW and GetWindowTextW are safe to call
    // with any HWND. They read window text without modifying state.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}
