use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;

/// Runs the config watcher on a single-threaded tokio runtime of its own, off the GTK main loop.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("helium-services".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime, config reload disabled: {}", e);
                    return;
                }
            };

            runtime.block_on(crate::config::run_async_watcher(tx));
            log::debug!("Background services stopped");
        })?;
    Ok(())
}
