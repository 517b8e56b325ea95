//! Worker thread standing in for the motion controller.

use std::{
    io::Write,
    thread::{self, JoinHandle},
};

use crossbeam_channel::Receiver;
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;

/// Drains `cmd_rx` until every sender is gone, echoing each MDI command to `out`.
pub fn launch<W>(cmd_rx: Receiver<BackendCommand>, mut out: W) -> JoinHandle<usize>
where
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        let mut sent = 0;
        for cmd in cmd_rx.iter() {
            match cmd {
                BackendCommand::SetMode(mode) => info!(?mode, "controller mode set"),
                BackendCommand::SendMdi(command) => {
                    sent += 1;
                    info!(command = %command, "executing mdi");
                    if let Err(err) = writeln!(out, "MDI> {command}").and_then(|()| out.flush()) {
                        error!("failed to echo mdi command: {err}");
                    }
                }
            }
        }
        sent
    })
}
