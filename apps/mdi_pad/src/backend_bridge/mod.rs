//! Queue between the keypad session and the machine worker thread.

pub mod commands;
pub mod runtime;
