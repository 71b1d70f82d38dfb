use std::{
    fs,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use election_core::{
    load_settings_from, standalone::fixture_update, transport::HostEndpoint, ElectionUi,
    RecordingTransport, RenderInstruction, RetainedSurface, RuntimeMode, Settings, UserAction,
};
use serde::Deserialize;
use serde_json::Value;
use shared::protocol::InboundMessage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = election_core::config::SETTINGS_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feeds a JSON-lines script of host messages and user actions through the engine.
    Replay {
        script: PathBuf,
        /// Seed the standalone fixture first and suppress outbound requests.
        #[arg(long)]
        standalone: bool,
    },
    /// Prints the standalone fixture as an `election:update` message.
    Fixture,
}

/// Script lines carrying an `action` key; every other line is a host message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptAction {
    SlotButton { slot: usize },
    SlotPortrait { slot: usize },
    CastVote,
    CloseModal,
    CloseUi,
    Escape,
    Advance { ms: u64 },
}

impl ScriptAction {
    fn user_action(self) -> Option<UserAction> {
        match self {
            ScriptAction::SlotButton { slot } => Some(UserAction::SlotButton(slot)),
            ScriptAction::SlotPortrait { slot } => Some(UserAction::SlotPortrait(slot)),
            ScriptAction::CastVote => Some(UserAction::CastVote),
            ScriptAction::CloseModal => Some(UserAction::CloseModal),
            ScriptAction::CloseUi => Some(UserAction::CloseUi),
            ScriptAction::Escape => Some(UserAction::Escape),
            ScriptAction::Advance { .. } => None,
        }
    }
}

struct Replay {
    engine: ElectionUi<RecordingTransport>,
    surface: RetainedSurface,
    endpoint: HostEndpoint,
    start: Instant,
    elapsed: Duration,
    output: Vec<String>,
}

impl Replay {
    fn new(settings: &Settings, mode: RuntimeMode) -> Result<Self> {
        let mut replay = Self {
            engine: ElectionUi::new(settings, mode, RecordingTransport::new()),
            surface: RetainedSurface::new(),
            endpoint: settings.endpoint()?,
            start: Instant::now(),
            elapsed: Duration::ZERO,
            output: Vec::new(),
        };
        if mode == RuntimeMode::Standalone {
            replay
                .engine
                .start_standalone(replay.start, &mut replay.surface);
            replay.flush()?;
        }
        Ok(replay)
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn run_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(line = line_no, "ignoring non-JSON replay line: {err}");
                self.output.push(format!("[{line_no}] ignored: {err}"));
                return Ok(());
            }
        };

        if value.get("action").is_some() {
            let action = ScriptAction::deserialize(&value)
                .with_context(|| format!("line {line_no}: invalid script action"))?;
            match action.user_action() {
                Some(user_action) => self.engine.handle_action(user_action, &mut self.surface),
                None => {
                    if let ScriptAction::Advance { ms } = action {
                        self.elapsed += Duration::from_millis(ms);
                        self.output.push(format!("[{line_no}] t+{}ms", self.elapsed.as_millis()));
                    }
                }
            }
        } else {
            let now = self.now();
            self.engine.handle_value(&value, now, &mut self.surface);
        }

        let now = self.now();
        self.engine.tick(now, &mut self.surface);
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        for instruction in self.surface.drain_history() {
            self.output.push(format!("render {}", describe(&instruction)));
        }
        for request in self.engine.transport().take() {
            let url = self.endpoint.url_for(&request)?;
            let body = String::from_utf8(request.body()?)?;
            self.output.push(format!("POST {url} {body}"));
        }
        Ok(())
    }
}

fn describe(instruction: &RenderInstruction) -> String {
    match instruction {
        RenderInstruction::Root(effect) => format!("root {effect:?}"),
        RenderInstruction::RegionTitle(title) => format!("region-title {title:?}"),
        RenderInstruction::PhaseLabel(label) => format!("phase {label:?}"),
        RenderInstruction::Slot(slot) => format!(
            "slot[{}] {:?} portrait={} button={:?}{}",
            slot.index,
            slot.name,
            slot.portrait,
            slot.button.label,
            if slot.button.enabled { "" } else { " (disabled)" },
        ),
        RenderInstruction::ModalOpened(modal) => format!(
            "modal-open {} {:?} vote={:?} message={:?}",
            modal.candidate_id, modal.name, modal.affordance, modal.message
        ),
        RenderInstruction::ModalClosed => "modal-closed".to_string(),
        RenderInstruction::VoteFeedback(feedback) => format!(
            "vote-feedback vote={:?} message={:?}",
            feedback.affordance, feedback.message
        ),
    }
}

fn replay_script(script: &str, settings: &Settings, mode: RuntimeMode) -> Result<Vec<String>> {
    let mut replay = Replay::new(settings, mode)?;
    for (idx, line) in script.lines().enumerate() {
        replay.run_line(idx + 1, line)?;
    }
    Ok(replay.output)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = load_settings_from(&cli.config, |name| std::env::var(name).ok());

    match cli.command {
        Command::Replay { script, standalone } => {
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script '{}'", script.display()))?;
            let mode = RuntimeMode::detect(standalone, true);
            tracing::info!(script = %script.display(), ?mode, "replaying script");
            for line in replay_script(&raw, &settings, mode)? {
                println!("{line}");
            }
        }
        Command::Fixture => {
            let message = InboundMessage::Update(fixture_update());
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
    }

    Ok(())
}
