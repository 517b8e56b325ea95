//! Keypad-driven composer for MDI commands.
//!
//! [`EntrySession`] turns discrete keypad events into a command string such
//! as `G1X10F200`, using [`CodeCatalog`] to decide which words a code takes
//! and [`ActiveAxisSet`] to substitute the machine's axes.

pub mod axes;
pub mod builder;
pub mod catalog;
pub mod event;
pub mod session;

pub use axes::ActiveAxisSet;
pub use builder::CommandBuilder;
pub use catalog::{CodeCatalog, CodeEntry};
pub use event::{KeypadEvent, KeypadParseError};
pub use session::{mask_for_letters, EntrySession, FieldView, SessionSnapshot};
