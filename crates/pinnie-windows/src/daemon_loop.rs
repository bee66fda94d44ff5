use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Instant;

use pinnie_core::config::{self, Config};
use pinnie_core::ipc::Command;
use pinnie_core::tracker::TICK_INTERVAL_MS;
use pinnie_core::{PinEngine, WM_HOTKEY, WindowEvent, WindowResult, Work};
use windows::Win32::UI::WindowsAndMessaging::WM_TIMER;

use crate::desktop::Desktop;
use crate::event_loop::{self, HookGuard, TimerGuard};
use crate::hotkey::ThreadHotkeys;
use crate::overlay::OverlayFactory;

use super::daemon_ipc;
use super::daemon_loop_handlers;
use super::daemon_types::{DaemonMsg, Engine};

/// The inner daemon loop, separated so cleanup always runs in `run()`.
pub(super) fn daemon_loop() -> WindowResult<()> {
    let config = config::load();
    pinnie_core::log::init(&config.logging);

    pinnie_core::log_info!("Daemon started (PID: {})", std::process::id());
    pinnie_core::log_info!(
        "Config: hotkey={:?}+{}, border(show={}, thickness={}, color={}), icon(show={}, size={})",
        config.hotkey.modifiers,
        config.hotkey.key,
        config.overlay.show_border,
        config.overlay.border_thickness,
        config.overlay.border_color,
        config.overlay.show_icon,
        config.overlay.icon_size
    );

    let (tx, rx) = mpsc::channel::<DaemonMsg>();
    let (notify_tx, notify_rx) = mpsc::channel();

    let mut engine: Engine = PinEngine::new(
        Desktop,
        OverlayFactory,
        ThreadHotkeys,
        config.overlay.clone(),
        notify_tx,
    );
    register_hotkey(&mut engine, &config);

    let pump_thread = event_loop::current_thread_id();
    let wake_pending = Rc::new(Cell::new(false));
    let hooks = HookGuard::install(forward_events(
        tx.clone(),
        wake_pending.clone(),
        move || {
            event_loop::wake(pump_thread);
        },
    ))?;
    let timer = TimerGuard::start(TICK_INTERVAL_MS as u32)?;

    let ipc_thread = daemon_ipc::spawn_ipc_listener(tx, pump_thread);

    let mut stop_requested = false;
    event_loop::run_message_pump(|message, param| {
        // Queued hook events happened before this message; handle them first.
        wake_pending.set(false);
        for msg in rx.try_iter() {
            match msg {
                DaemonMsg::Event(event) => engine.process(Work::Event(event)),
                DaemonMsg::Command(command, reply_tx) => {
                    let response = daemon_loop_handlers::handle_command(&command, &mut engine);
                    let _ = reply_tx.send(response);
                    if matches!(command, Command::Stop) {
                        stop_requested = true;
                    }
                }
            }
            if stop_requested {
                break;
            }
        }

        if !stop_requested {
            match message {
                WM_TIMER if param == timer.id() => engine.process(Work::Tick(Instant::now())),
                WM_HOTKEY => engine.process(Work::Hotkey { message, param }),
                _ => {}
            }
        }

        daemon_loop_handlers::drain_notifications(&notify_rx);
        !stop_requested
    });

    drop(timer);
    drop(hooks);
    // Dropping the engine unpins everything.
    drop(engine);
    daemon_loop_handlers::drain_notifications(&notify_rx);
    pinnie_core::log_info!("Daemon stopped");

    // The listener only exits on its own after relaying a stop command.
    if stop_requested {
        let _ = ipc_thread.join();
    }

    Ok(())
}

/// Builds the hook sink: queue the event, then wake the pump so it is
/// handled now rather than after the next timer tick.
///
/// Hook callbacks run inside `GetMessageW`, which keeps blocking after
/// they return. One wake per drain is enough.
fn forward_events(
    tx: mpsc::Sender<DaemonMsg>,
    wake_pending: Rc<Cell<bool>>,
    wake: impl Fn() + 'static,
) -> impl Fn(WindowEvent) + 'static {
    move |event| {
        if tx.send(DaemonMsg::Event(event)).is_ok() && !wake_pending.replace(true) {
            wake();
        }
    }
}

fn register_hotkey(engine: &mut Engine, config: &Config) {
    let Some(hotkey) = config.hotkey.to_hotkey() else {
        eprintln!(
            "Warning: unknown hotkey key {:?}; use `pinnie toggle` instead.",
            config.hotkey.key
        );
        return;
    };
    if !engine.register_hotkey(hotkey) {
        eprintln!("Warning: {hotkey} is in use by another application; use `pinnie toggle`.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_events_wake_the_pump_once_per_drain() {
        // Arrange
        let (tx, rx) = mpsc::channel();
        let pending = Rc::new(Cell::new(false));
        let wakes = Rc::new(Cell::new(0));
        let counter = wakes.clone();
        let sink = forward_events(tx, pending.clone(), move || counter.set(counter.get() + 1));

        // Act
        sink(WindowEvent::MoveSizeStart { hwnd: 1 });
        sink(WindowEvent::LocationChanged { hwnd: 1 });
        let first_batch = rx.try_iter().count();
        pending.set(false);
        sink(WindowEvent::MoveSizeEnd { hwnd: 1 });

        // Assert
        assert_eq!(first_batch, 2);
        assert_eq!(rx.try_iter().count(), 1);
        assert_eq!(wakes.get(), 2);
    }
}
