use anyhow::{Context, Result};
use evdev::{Device, EventSummary, KeyCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

use crate::constants::{input, paths, permissions};
use crate::event::{AppEvent, EventSender};

/// Find all keyboard devices that support the X key
fn find_all_keyboard_devices() -> Result<Vec<Device>> {
    info!(path = %paths::DEV_INPUT, "Scanning for keyboard devices...");

    let mut devices = Vec::new();

    for entry in std::fs::read_dir(paths::DEV_INPUT)
        .context(format!("Failed to read {} - are you in the '{}' group?", paths::DEV_INPUT, permissions::INPUT_GROUP))?
    {
        let entry = entry?;
        let path = entry.path();

        if let Ok(device) = Device::open(&path) {
            let is_keyboard = device
                .supported_keys()
                .is_some_and(|keys| keys.contains(KeyCode::KEY_X) && keys.contains(KeyCode::KEY_LEFTALT));
            if is_keyboard {
                info!(device_path = %path.display(), name = ?device.name(), "Found keyboard device");
                devices.push(device);
            }
        }
    }

    if devices.is_empty() {
        anyhow::bail!(
            "No keyboard device found. Ensure you're in '{}' group:\n\
             {}\n\
             Then log out and back in.",
            permissions::INPUT_GROUP,
            permissions::ADD_TO_INPUT_GROUP
        )
    }

    info!(count = devices.len(), "Listening on keyboard device(s)");

    Ok(devices)
}

/// Number of hotkey listener threads still running
#[derive(Debug, Clone, Default)]
pub struct ListenerCount(Arc<AtomicUsize>);

impl ListenerCount {
    pub fn active(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    pub fn is_active(&self) -> bool {
        self.active() > 0
    }

    /// Count one listener until the returned guard is dropped
    fn register(&self) -> ListenerGuard {
        self.0.fetch_add(1, Ordering::AcqRel);
        ListenerGuard(self.clone())
    }
}

/// Decrements the count when its thread exits, including on panic
struct ListenerGuard(ListenerCount);

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if self.0.0.fetch_sub(1, Ordering::AcqRel) == 1 {
            warn!("All hotkey listeners stopped, Alt+X now only works while the settings window is focused");
        }
    }
}

/// Spawn background threads listening for Alt+X on all keyboard devices
pub fn spawn_listener(sender: EventSender) -> Result<ListenerCount> {
    let devices = find_all_keyboard_devices()?;
    let listeners = ListenerCount::default();

    for device in devices {
        let sender = sender.clone();
        let guard = listeners.register();
        thread::Builder::new()
            .name("hotkeys".to_string())
            .spawn(move || {
                let _guard = guard;
                info!(device = ?device.name(), "Hotkey listener started");
                if let Err(e) = listen_for_hotkeys(device, sender) {
                    error!(error = %e, "Hotkey listener error");
                }
            })
            .context("Failed to spawn hotkey listener thread")?;
    }

    Ok(listeners)
}

/// Listen for Alt+X presses on a single device
fn listen_for_hotkeys(mut device: Device, sender: EventSender) -> Result<()> {
    loop {
        // Collect presses first; the key state can only be queried once the
        // events iterator is done with the device
        let x_presses = device
            .fetch_events()
            .context("Failed to fetch events")?
            .filter(|event| {
                matches!(
                    event.destructure(),
                    EventSummary::Key(_, code, value)
                        if code == KeyCode::KEY_X && value == input::KEY_PRESS
                )
            })
            .count();

        for _ in 0..x_presses {
            let key_state = device.get_key_state()
                .context("Failed to get keyboard state")?;

            let alt_pressed = key_state.contains(KeyCode::KEY_LEFTALT)
                || key_state.contains(KeyCode::KEY_RIGHTALT);
            debug!(alt = alt_pressed, "X key pressed");

            if alt_pressed {
                info!("Alt+X hotkey pressed, toggling visibility");
                sender.send(AppEvent::ToggleVisibility);
            }
        }
    }
}

/// Check if hotkeys are available (user has input group permissions)
pub fn check_permissions() -> bool {
    std::fs::read_dir(paths::DEV_INPUT).is_ok()
}

/// Print helpful error message if permissions missing
pub fn print_permission_error() {
    error!(path = %paths::DEV_INPUT, "Cannot access input devices");
    error!(group = %permissions::INPUT_GROUP, "Global Alt+X requires group membership");
    error!(command = %permissions::ADD_TO_INPUT_GROUP, "Add user to input group");
    error!("  Then log out and back in");
    warn!(continuing = true, "Continuing without global hotkey, Alt+X works while the settings window is focused");
}
