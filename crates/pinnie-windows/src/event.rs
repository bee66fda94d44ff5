use pinnie_core::WindowEvent;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_LOCATIONCHANGE, EVENT_SYSTEM_FOREGROUND, EVENT_SYSTEM_MOVESIZEEND,
    EVENT_SYSTEM_MOVESIZESTART,
};

/// Object ID indicating the event applies to the window itself,
/// not a child element like a scrollbar or caret.
const OBJID_WINDOW: i32 = 0;

/// Translates a raw Win32 event into a platform-agnostic `WindowEvent`.
///
/// Returns `None` for child-object events and event types the pinning
/// engine does not react to.
pub fn translate(event: u32, hwnd: HWND, id_object: i32) -> Option<WindowEvent> {
    if id_object != OBJID_WINDOW || hwnd.is_invalid() {
        return None;
    }

    let hwnd = hwnd.0 as usize;

    match event {
        e if e == EVENT_SYSTEM_FOREGROUND => Some(WindowEvent::Foreground { hwnd }),
        e if e == EVENT_SYSTEM_MOVESIZESTART => Some(WindowEvent::MoveSizeStart { hwnd }),
        e if e == EVENT_SYSTEM_MOVESIZEEND => Some(WindowEvent::MoveSizeEnd { hwnd }),
        e if e == EVENT_OBJECT_LOCATIONCHANGE => Some(WindowEvent::LocationChanged { hwnd }),
        _ => None,
    }
}
