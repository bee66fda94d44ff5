use std::cell::RefCell;

use pinnie_core::{WindowEvent, WindowResult};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, EVENT_OBJECT_LOCATIONCHANGE, EVENT_SYSTEM_FOREGROUND,
    EVENT_SYSTEM_MOVESIZEEND, EVENT_SYSTEM_MOVESIZESTART, GetMessageW, KillTimer, MSG,
    PostThreadMessageW, SetTimer, TranslateMessage, WINEVENT_OUTOFCONTEXT,
    WINEVENT_SKIPOWNPROCESS, WM_APP, WM_QUIT,
};

use crate::event;

/// Posted to the engine thread when another thread queued work for it.
pub const WM_WAKE: u32 = WM_APP + 1;

type EventSink = Box<dyn Fn(WindowEvent)>;

// Thread-local sink for the WinEvent callback.
thread_local! {
    static EVENT_SINK: RefCell<Option<EventSink>> = const { RefCell::new(None) };
}

/// Event hooks installed for the calling thread.
///
/// Out-of-context hooks are delivered while this thread pumps messages.
/// Dropping the value removes every hook.
pub struct HookGuard {
    hooks: Vec<HWINEVENTHOOK>,
}

impl HookGuard {
    /// Installs the foreground, move/size and location hooks.
    ///
    /// Translated events are handed to `sink` on this thread.
    pub fn install(sink: impl Fn(WindowEvent) + 'static) -> WindowResult<Self> {
        EVENT_SINK.with(|cell| *cell.borrow_mut() = Some(Box::new(sink)));

        let ranges = [
            (EVENT_SYSTEM_FOREGROUND, EVENT_SYSTEM_FOREGROUND),
            (EVENT_SYSTEM_MOVESIZESTART, EVENT_SYSTEM_MOVESIZEEND),
            (EVENT_OBJECT_LOCATIONCHANGE, EVENT_OBJECT_LOCATIONCHANGE),
        ];

        let mut guard = Self { hooks: Vec::new() };
        for (min, max) in ranges {
            // SAFETY: SetWinEventHook registers our callback for system-wide
            // window events. WINEVENT_OUTOFCONTEXT means the callback runs in
            // our process. WINEVENT_SKIPOWNPROCESS ignores our own overlays.
            let hook = unsafe {
                SetWinEventHook(
                    min,
                    max,
                    None,
                    Some(win_event_proc),
                    0,
                    0,
                    WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
                )
            };
            if hook.is_invalid() {
                return Err(format!("failed to set WinEvent hook {min:#x}..{max:#x}").into());
            }
            guard.hooks.push(hook);
        }
        Ok(guard)
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        for hook in self.hooks.drain(..) {
            // SAFETY: each hook was returned by SetWinEventHook.
            unsafe {
                let _ = UnhookWinEvent(hook);
            }
        }
        EVENT_SINK.with(|cell| *cell.borrow_mut() = None);
    }
}

/// A thread timer that posts `WM_TIMER` to the calling thread's queue.
pub struct TimerGuard {
    id: usize,
}

impl TimerGuard {
    pub fn start(interval_ms: u32) -> WindowResult<Self> {
        // SAFETY: a null HWND creates a thread timer; the returned id is
        // what identifies it.
        let id = unsafe { SetTimer(None, 0, interval_ms, None) };
        if id == 0 {
            return Err("failed to create tick timer".into());
        }
        Ok(Self { id })
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        // SAFETY: the id came from SetTimer on this thread.
        unsafe {
            let _ = KillTimer(None, self.id);
        }
    }
}

/// Returns the id other threads use to wake this one.
pub fn current_thread_id() -> u32 {
    // SAFETY: GetCurrentThreadId has no preconditions.
    unsafe { GetCurrentThreadId() }
}

/// Wakes the message pump on `thread_id` so it drains its channel.
pub fn wake(thread_id: u32) -> bool {
    // SAFETY: posting to a thread queue has no memory-safety requirements.
    unsafe { PostThreadMessageW(thread_id, WM_WAKE, WPARAM(0), LPARAM(0)).is_ok() }
}

/// Asks the message pump on `thread_id` to exit.
pub fn quit(thread_id: u32) {
    // SAFETY: see `wake`.
    unsafe {
        let _ = PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
    }
}

/// The Win32 message pump.
///
/// Thread messages (hotkeys, timer ticks, wake-ups) go to `on_message`
/// with their `(message, wParam)`; window messages are dispatched as
/// usual. Returns when `WM_QUIT` arrives or `on_message` returns `false`.
pub fn run_message_pump(mut on_message: impl FnMut(u32, usize) -> bool) {
    let mut msg = MSG::default();

    // SAFETY: GetMessageW fills our stack MSG; it returns 0 on WM_QUIT
    // and -1 on error, both of which end the loop.
    while unsafe { GetMessageW(&mut msg, None, 0, 0).0 } > 0 {
        if msg.hwnd.is_invalid() {
            if !on_message(msg.message, msg.wParam.0) {
                return;
            }
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        if !on_message(msg.message, msg.wParam.0) {
            return;
        }
    }
}

/// The WinEvent callback.
unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if let Some(window_event) = event::translate(event, hwnd, id_object) {
        EVENT_SINK.with(|cell| {
            if let Some(sink) = cell.borrow().as_ref() {
                sink(window_event);
            }
        });
    }
}
