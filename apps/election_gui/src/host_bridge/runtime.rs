//! Picks the outbound transport for the detected runtime mode.

use election_core::{spawn_http_worker, HostTransport, NullTransport, RuntimeMode, Settings};

pub fn launch_transport(
    mode: RuntimeMode,
    settings: &Settings,
) -> anyhow::Result<Box<dyn HostTransport>> {
    match mode {
        RuntimeMode::Hosted => {
            let endpoint = settings.endpoint()?;
            Ok(Box::new(spawn_http_worker(endpoint)))
        }
        RuntimeMode::Standalone => Ok(Box::new(NullTransport)),
    }
}
