//! Discrete keypad inputs and their textual token form.

use std::{fmt, str::FromStr};

use shared::domain::CodeFamily;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadEvent {
    /// A single digit `0..=9`.
    Digit(u8),
    Decimal,
    Minus,
    Clear,
    Back,
    Next,
    Ok,
    /// Any other character key, appended verbatim.
    Key(char),
    /// Direct selection of a field by index.
    Select(usize),
    Family(CodeFamily),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeypadParseError {
    #[error("empty keypad token")]
    Empty,
    #[error("invalid field index in '{0}'")]
    FieldIndex(String),
    #[error("unrecognized keypad token '{0}'")]
    Unrecognized(String),
}

impl FromStr for KeypadEvent {
    type Err = KeypadParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(KeypadParseError::Empty);
        }

        if let Some(index) = token
            .strip_prefix("sel:")
            .or_else(|| token.strip_prefix("select:"))
        {
            return index
                .parse::<usize>()
                .map(KeypadEvent::Select)
                .map_err(|_| KeypadParseError::FieldIndex(token.to_string()));
        }

        let event = match token.to_ascii_lowercase().as_str() {
            "." | "decimal" => KeypadEvent::Decimal,
            "-" | "minus" => KeypadEvent::Minus,
            "clear" => KeypadEvent::Clear,
            "back" | "bs" => KeypadEvent::Back,
            "next" | "tab" => KeypadEvent::Next,
            "ok" | "enter" => KeypadEvent::Ok,
            "g" => KeypadEvent::Family(CodeFamily::G),
            "m" => KeypadEvent::Family(CodeFamily::M),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => match ch.to_digit(10) {
                        Some(digit) => KeypadEvent::Digit(digit as u8),
                        None => KeypadEvent::Key(ch),
                    },
                    _ => return Err(KeypadParseError::Unrecognized(token.to_string())),
                }
            }
        };
        Ok(event)
    }
}

impl fmt::Display for KeypadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeypadEvent::Digit(digit) => write!(f, "{digit}"),
            KeypadEvent::Decimal => f.write_str("."),
            KeypadEvent::Minus => f.write_str("-"),
            KeypadEvent::Clear => f.write_str("clear"),
            KeypadEvent::Back => f.write_str("back"),
            KeypadEvent::Next => f.write_str("next"),
            KeypadEvent::Ok => f.write_str("ok"),
            KeypadEvent::Key(ch) => write!(f, "{ch}"),
            KeypadEvent::Select(index) => write!(f, "sel:{index}"),
            KeypadEvent::Family(family) => write!(f, "{}", family.prefix().to_ascii_lowercase()),
        }
    }
}
