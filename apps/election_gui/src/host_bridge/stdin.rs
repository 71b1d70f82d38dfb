//! Reads host messages as JSON lines from stdin on a dedicated thread.

use std::{
    io::{self, BufRead},
    thread,
};

use crossbeam_channel::Sender;

use crate::controller::events::HostEvent;

pub fn spawn_stdin_reader(host_tx: Sender<HostEvent>) {
    let spawned = thread::Builder::new()
        .name("host-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        tracing::warn!("failed to read host message from stdin: {err}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                if host_tx.send(HostEvent::Message(line)).is_err() {
                    return;
                }
            }
            let _ = host_tx.send(HostEvent::Disconnected);
        });

    if let Err(err) = spawned {
        tracing::error!("failed to spawn host stdin reader: {err}");
    }
}
