//! Host-less preview mode with a fixed candidate fixture.

use std::time::Instant;

use shared::{domain::Candidate, protocol::StateUpdate};
use tracing::info;

use crate::{
    assets::DEFAULT_ASSET_ROOT, engine::ElectionUi, surface::RenderSurface,
    transport::HostTransport,
};

pub const STANDALONE_PHASE: &str = "Voting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    /// Embedded in a host that pushes state and receives requests.
    Hosted,
    /// Local preview; nothing is ever sent outbound.
    Standalone,
}

impl RuntimeMode {
    pub fn detect(force_standalone: bool, host_attached: bool) -> Self {
        if force_standalone || !host_attached {
            RuntimeMode::Standalone
        } else {
            RuntimeMode::Hosted
        }
    }
}

pub fn fixture_candidates() -> Vec<Candidate> {
    let portrait = |n: u8| format!("{DEFAULT_ASSET_ROOT}portrait{n}.png");
    vec![
        Candidate::new(1, "Sundance Kid")
            .with_region("new_hanover")
            .with_portrait(portrait(1))
            .with_bio("A sharpshooter with a silver tongue."),
        Candidate::new(2, "Billy the Kid")
            .with_region("new_hanover")
            .with_portrait(portrait(2))
            .with_bio("Fast on the draw. Faster on decisions."),
        Candidate::new(3, "Django")
            .with_region("new_hanover")
            .with_portrait(portrait(3))
            .with_bio("Tough as rawhide. Loyal to the town."),
    ]
}

pub fn fixture_update() -> StateUpdate {
    StateUpdate {
        region_title: None,
        phase: Some(STANDALONE_PHASE.to_string()),
        has_voted: Some(false),
        candidates: Some(fixture_candidates()),
    }
}

impl<T: HostTransport> ElectionUi<T> {
    /// Seeds the fixture, renders it, and schedules the UI to appear shortly after.
    pub fn start_standalone(&mut self, now: Instant, surface: &mut dyn RenderSurface) {
        info!("no host attached; starting standalone preview");
        self.apply_host_update(fixture_update(), surface);
        let show_at = now + self.standalone_show_delay();
        self.schedule_show(show_at);
    }
}
