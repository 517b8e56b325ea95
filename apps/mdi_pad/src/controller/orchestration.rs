//! Queue-backed machine controller and the token loop driving the session.

use crossbeam_channel::{Sender, TrySendError};
use mdi_core::{EntrySession, KeypadEvent};
use shared::{
    domain::AxisMask,
    error::{DispatchError, DispatchOperation},
    protocol::{ControllerMode, MachineController, MachineStatus},
};

use crate::{backend_bridge::commands::BackendCommand, controller::events::TokenOutcome};

pub struct QueuedController {
    cmd_tx: Sender<BackendCommand>,
    axis_mask: AxisMask,
}

impl QueuedController {
    pub fn new(cmd_tx: Sender<BackendCommand>, axis_mask: AxisMask) -> Self {
        Self { cmd_tx, axis_mask }
    }

    fn dispatch(
        &self,
        operation: DispatchOperation,
        cmd: BackendCommand,
    ) -> Result<(), DispatchError> {
        let cmd_name = cmd.name();
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => {
                tracing::debug!(command = cmd_name, "queued machine command");
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(DispatchError::new(
                operation,
                "machine command queue is full; please retry",
            )),
            Err(TrySendError::Disconnected(_)) => Err(DispatchError::new(
                operation,
                "machine worker disconnected",
            )),
        }
    }
}

impl MachineController for QueuedController {
    fn poll_status(&mut self) -> MachineStatus {
        MachineStatus {
            axis_mask: self.axis_mask,
        }
    }

    fn set_mode(&mut self, mode: ControllerMode) -> Result<(), DispatchError> {
        self.dispatch(DispatchOperation::SetMode, BackendCommand::SetMode(mode))
    }

    fn send_mdi(&mut self, command: &str) -> Result<(), DispatchError> {
        self.dispatch(
            DispatchOperation::SendMdi,
            BackendCommand::SendMdi(command.to_string()),
        )
    }
}

pub fn apply_token<C: MachineController>(session: &mut EntrySession<C>, token: &str) -> TokenOutcome {
    let event = match token.parse::<KeypadEvent>() {
        Ok(event) => event,
        Err(err) => return TokenOutcome::Rejected(err),
    };
    match session.handle(event) {
        Ok(Some(command)) => TokenOutcome::Issued(command),
        Ok(None) => TokenOutcome::Applied,
        Err(err) => TokenOutcome::DispatchFailed(err),
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use mdi_core::KeypadParseError;

    use super::*;

    fn run(session: &mut EntrySession<QueuedController>, line: &str) -> Vec<TokenOutcome> {
        line.split_whitespace()
            .map(|token| apply_token(session, token))
            .collect()
    }

    #[test]
    fn issued_command_lands_on_queue_after_mode_switch() {
        let (tx, rx) = bounded(8);
        let mut session = EntrySession::with_controller(QueuedController::new(tx, AxisMask(0b011)));

        let outcomes = run(&mut session, "1 next 1 0 sel:3 2 0 0 ok");
        assert_eq!(outcomes.last(), Some(&TokenOutcome::Issued("G1X10F200".into())));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![
                BackendCommand::SetMode(ControllerMode::Mdi),
                BackendCommand::SendMdi("G1X10F200".into()),
            ]
        );
    }

    #[test]
    fn bad_token_is_rejected_without_touching_session() {
        let (tx, _rx) = bounded(8);
        let mut session = EntrySession::with_controller(QueuedController::new(tx, AxisMask(0b1)));
        let outcome = apply_token(&mut session, "feed");
        assert_eq!(
            outcome,
            TokenOutcome::Rejected(KeypadParseError::Unrecognized("feed".into()))
        );
        assert_eq!(session.code(), "G");
    }

    #[test]
    fn full_queue_reports_dispatch_failure() {
        let (tx, _rx) = bounded(1);
        let mut session = EntrySession::with_controller(QueuedController::new(tx, AxisMask(0b1)));
        let outcomes = run(&mut session, "0 ok");
        match outcomes.last() {
            Some(TokenOutcome::DispatchFailed(err)) => {
                assert_eq!(err.operation, DispatchOperation::SendMdi);
                assert!(err.message.contains("full"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn disconnected_worker_reports_dispatch_failure() {
        let (tx, rx) = bounded(4);
        drop(rx);
        let mut session = EntrySession::with_controller(QueuedController::new(tx, AxisMask(0b1)));
        let outcome = apply_token(&mut session, "ok");
        assert_eq!(
            outcome,
            TokenOutcome::DispatchFailed(DispatchError::new(
                DispatchOperation::SetMode,
                "machine worker disconnected"
            ))
        );
    }
}
