use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    time::Instant,
};

mod controller;
mod host_bridge;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use election_core::{
    config::SETTINGS_FILE, load_settings_from, ElectionUi, RetainedSurface, RuntimeMode,
};

use crate::{
    controller::events::HostEvent,
    host_bridge::{runtime::launch_transport, stdin::spawn_stdin_reader},
    ui::{portraits::PortraitCache, ElectionGuiApp},
};

#[derive(Parser, Debug)]
struct Args {
    /// Run against the built-in fixture without a host controller.
    #[arg(long)]
    standalone: bool,
    /// Host resource name used to build `https://<name>/` callback URLs.
    #[arg(long)]
    resource_name: Option<String>,
    /// Directory that portrait paths are resolved against.
    #[arg(long, default_value = ".")]
    html_dir: PathBuf,
    #[arg(long, default_value = SETTINGS_FILE)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config, |name| std::env::var(name).ok());
    if let Some(name) = args.resource_name.filter(|name| !name.trim().is_empty()) {
        settings.resource_name = name;
    }

    let mode = RuntimeMode::detect(args.standalone, !io::stdin().is_terminal());
    tracing::info!(?mode, resource = %settings.resource_name, "starting election ui");

    let transport = launch_transport(mode, &settings)?;
    let (host_tx, host_rx) = bounded::<HostEvent>(256);
    if mode == RuntimeMode::Hosted {
        spawn_stdin_reader(host_tx);
    } else {
        drop(host_tx);
    }

    let mut engine = ElectionUi::new(&settings, mode, transport);
    let mut surface = RetainedSurface::new();
    if mode == RuntimeMode::Standalone {
        engine.start_standalone(Instant::now(), &mut surface);
    }
    let portraits = PortraitCache::new(args.html_dir);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Election")
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([600.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Election",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ElectionGuiApp::new(
                engine, surface, host_rx, portraits,
            )))
        }),
    )
    .map_err(|err| anyhow!("election ui exited with error: {err}"))
}
