use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Builder;

/// Runs the config watcher on its own thread so the GTK main loop never
/// blocks on file system events.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("gyre-watcher".into())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime, live reload disabled: {}", e);
                    return;
                }
            };

            rt.block_on(crate::config::run_async_watcher(tx));
            log::debug!("Config watcher stopped");
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn watcher thread: {}", e);
    }
}
