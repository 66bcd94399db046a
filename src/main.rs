mod app;
mod config;
mod domain;
mod error;
mod models;
mod ui;

use gpui::{App, Application};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::ui::FileAssets;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load();

    Application::new()
        .with_assets(FileAssets::new())
        .run(move |cx: &mut App| app::run(cx, settings));
}
