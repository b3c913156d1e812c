use anyhow::Result;

mod app;
mod data;
mod handler;
mod intervention;
mod settings;
mod therapist;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the alternate screen lives on stdout, so
    // `impulse 2>impulse.log` keeps the display clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "impulse-stopper starting");
    let result = run(&mut terminal, &mut events, &mut app).await;
    tui::restore()?;
    tracing::info!("impulse-stopper exiting");
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event);
        }

        // Delivers the delayed therapist reply once its timer has fired;
        // the 300 ms tick keeps this loop turning while idle.
        app.poll_reply().await;
    }
    Ok(())
}
