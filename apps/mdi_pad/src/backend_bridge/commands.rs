//! Machine commands queued from the keypad session to the worker.

use shared::protocol::ControllerMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    SetMode(ControllerMode),
    SendMdi(String),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SetMode(_) => "set_mode",
            BackendCommand::SendMdi(_) => "send_mdi",
        }
    }
}
