//! Host → UI message intake.

use std::time::Instant;

use serde_json::Value;
use shared::protocol::{DecodedMessage, InboundMessage, StateUpdate};
use tracing::debug;

use crate::{
    engine::ElectionUi,
    surface::{emit, RenderInstruction, RenderSurface},
    transport::HostTransport,
};

impl<T: HostTransport> ElectionUi<T> {
    /// Handles one raw JSON message. Undecodable payloads are ignored.
    pub fn handle_raw(&mut self, raw: &str, now: Instant, surface: &mut dyn RenderSurface) {
        match InboundMessage::parse(raw) {
            Ok(decoded) => self.handle_message(decoded, now, surface),
            Err(err) => debug!("ignoring inbound payload: {err}"),
        }
    }

    pub fn handle_value(&mut self, value: &Value, now: Instant, surface: &mut dyn RenderSurface) {
        match InboundMessage::decode(value) {
            Ok(decoded) => self.handle_message(decoded, now, surface),
            Err(err) => debug!("ignoring inbound payload: {err}"),
        }
    }

    pub fn handle_message(
        &mut self,
        decoded: DecodedMessage,
        now: Instant,
        surface: &mut dyn RenderSurface,
    ) {
        if !decoded.rejected_fields.is_empty() {
            debug!(fields = ?decoded.rejected_fields, "dropped malformed inbound fields");
        }
        if decoded.dropped_candidates > 0 {
            debug!(
                count = decoded.dropped_candidates,
                "skipped candidate entries without a usable id"
            );
        }

        match decoded.message {
            InboundMessage::Toggle { display: true } => self.show_root(surface),
            InboundMessage::Toggle { display: false } => self.hide_root(now, surface),
            InboundMessage::Update(update) => self.apply_host_update(update, surface),
            InboundMessage::Unrecognized { kind } => {
                debug!(kind, "ignoring unrecognized inbound message")
            }
        }
    }

    pub(crate) fn apply_host_update(&mut self, update: StateUpdate, surface: &mut dyn RenderSurface) {
        let applied = self.view_model_mut().apply_update(update);

        if applied.region_title {
            if let Some(title) = self.view_model().region_title() {
                emit(surface, RenderInstruction::RegionTitle(title.to_string()));
            }
        }
        if applied.phase {
            let label = self.view_model().phase().label().to_string();
            emit(surface, RenderInstruction::PhaseLabel(label));
        }
        // Button labels depend on the phase, so a phase change re-renders as well.
        if applied.candidates || applied.phase {
            self.render_slots(surface);
        }
    }
}
