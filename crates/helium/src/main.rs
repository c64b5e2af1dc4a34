use helium::config;
use helium::gui::app::AppModel;
use helium::gui::remote::RemoteState;
use helium::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    let remote = RemoteState::from_config(&config)?;

    let (tx, rx) = async_channel::bounded(32);

    if let Err(e) = runtime::start_background_services(tx) {
        log::error!("Failed to start background services: {}", e);
    }

    let app = RelmApp::new("org.helium.remote");

    app.run::<AppModel>((remote, config.theme, rx));
    Ok(())
}
