//! Controller layer: keypad token intake and machine command orchestration.

pub mod events;
pub mod orchestration;
