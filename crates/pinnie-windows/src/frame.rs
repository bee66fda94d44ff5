use std::ffi::c_void;
use std::mem;

use pinnie_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{
    DWMWA_CLOAKED, DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute,
};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

/// Converts a Win32 `RECT` (edges) into a [`Rect`] (origin + size).
pub fn to_rect(r: &RECT) -> Rect {
    Rect::from_edges(r.left, r.top, r.right, r.bottom)
}

/// Returns the rectangle `GetWindowRect` reports.
///
/// On Windows 10/11 this includes the invisible resize borders
/// (typically ~7px left/right/bottom) around the visible frame.
pub fn window_rect(hwnd: HWND) -> WindowResult<Rect> {
    let mut rect = RECT::default();
    // SAFETY: GetWindowRect writes into our stack RECT.
    unsafe { GetWindowRect(hwnd, &mut rect)? };
    Ok(to_rect(&rect))
}

/// Returns the visible bounds of a window using DWM extended frame bounds.
///
/// Fails when DWM cannot answer (closed window, composition off). The
/// overlay tracker decides how to fall back.
pub fn visible_rect(hwnd: HWND) -> WindowResult<Rect> {
    let mut frame = RECT::default();
    // SAFETY: the output buffer is a RECT of the size we pass.
    unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut frame as *mut RECT as *mut c_void,
            mem::size_of::<RECT>() as u32,
        )?
    };
    Ok(to_rect(&frame))
}

/// Returns whether DWM has cloaked the window (e.g. on another virtual
/// desktop). Query failures count as not cloaked.
pub fn is_cloaked(hwnd: HWND) -> bool {
    let mut cloaked: u32 = 0;
    // SAFETY: the output buffer is a u32 of the size we pass.
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut u32 as *mut c_void,
            mem::size_of::<u32>() as u32,
        )
    };
    result.is_ok() && cloaked != 0
}
