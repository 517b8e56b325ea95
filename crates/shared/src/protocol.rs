use serde::{Deserialize, Serialize};

use crate::{domain::AxisMask, error::DispatchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerMode {
    Manual,
    Auto,
    Mdi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MachineStatus {
    pub axis_mask: AxisMask,
}

/// The status and command surface of the motion controller.
///
/// Calls are made from a single thread; implementations need no locking of
/// their own unless they hand work to another thread.
pub trait MachineController {
    fn poll_status(&mut self) -> MachineStatus;
    fn set_mode(&mut self, mode: ControllerMode) -> Result<(), DispatchError>;
    fn send_mdi(&mut self, command: &str) -> Result<(), DispatchError>;
}

impl<C: MachineController + ?Sized> MachineController for &mut C {
    fn poll_status(&mut self) -> MachineStatus {
        (**self).poll_status()
    }

    fn set_mode(&mut self, mode: ControllerMode) -> Result<(), DispatchError> {
        (**self).set_mode(mode)
    }

    fn send_mdi(&mut self, command: &str) -> Result<(), DispatchError> {
        (**self).send_mdi(command)
    }
}
