mod chat;
mod common;
mod config;
mod engine;
mod error;
mod storage;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use dotenvy::dotenv;
use engine::ChatEngine;
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "rust_sim_chat",
    version,
    about = "Simulated chat client with scripted replies"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Directory holding the preference database (overrides the config file)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(data_dir) = cli.data_dir {
        app_config.data_dir = data_dir;
    }

    let preferences = storage::open_preferences(&app_config.data_dir);
    let theme = preferences
        .as_ref()
        .map(|store| store.load_theme_or_default())
        .unwrap_or_default();
    let session = engine::build_session(&app_config, theme);

    // UI -> engine
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Engine -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    tokio::spawn(async move {
        ChatEngine::new(session, preferences, event_tx, cmd_rx)
            .run()
            .await;
    });

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "ChatApp",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!(
                "Client started with {} contacts, theme {}",
                app_config.contacts().len(),
                theme.as_str()
            );

            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}
