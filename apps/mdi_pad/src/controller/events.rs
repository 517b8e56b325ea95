//! Outcome of feeding one keypad token to the session.

use mdi_core::KeypadParseError;
use shared::error::DispatchError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenOutcome {
    Applied,
    Issued(String),
    Rejected(KeypadParseError),
    DispatchFailed(DispatchError),
}

impl TokenOutcome {
    /// Text to report to the operator, if any.
    pub fn status_line(&self) -> Option<String> {
        match self {
            TokenOutcome::Applied => None,
            TokenOutcome::Issued(command) => Some(format!("issued {command}")),
            TokenOutcome::Rejected(err) => Some(format!("skipped: {err}")),
            TokenOutcome::DispatchFailed(err) => Some(format!("dispatch failed: {err}")),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TokenOutcome::Rejected(_) | TokenOutcome::DispatchFailed(_)
        )
    }
}

/// Splits input lines into keypad tokens; `#` starts a comment.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split('#')
        .next()
        .unwrap_or_default()
        .split_whitespace()
}
