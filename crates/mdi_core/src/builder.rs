use shared::{
    error::DispatchError,
    protocol::{ControllerMode, MachineController},
};
use tracing::{info, warn};

/// Accumulates the words of one MDI command.
///
/// Words keep the position of their first insertion; overwriting a letter
/// replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuilder {
    code: String,
    words: Vec<(char, String)>,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.words.clear();
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn set_word(&mut self, letter: char, value: impl Into<String>) {
        let value = value.into();
        match self.words.iter_mut().find(|(existing, _)| *existing == letter) {
            Some((_, slot)) => *slot = value,
            None => self.words.push((letter, value)),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn word(&self, letter: char) -> Option<&str> {
        self.words
            .iter()
            .find(|(existing, _)| *existing == letter)
            .map(|(_, value)| value.as_str())
    }

    pub fn words(&self) -> impl Iterator<Item = (char, &str)> {
        self.words.iter().map(|(letter, value)| (*letter, value.as_str()))
    }

    /// Code followed by every word that carries a value.
    pub fn assemble(&self) -> String {
        let mut command = self.code.clone();
        for (letter, value) in self.words.iter().filter(|(_, value)| !value.is_empty()) {
            command.push(*letter);
            command.push_str(value);
        }
        command
    }

    pub fn issue<C>(&self, controller: &mut C) -> Result<String, DispatchError>
    where
        C: MachineController + ?Sized,
    {
        let command = self.assemble();
        controller
            .set_mode(ControllerMode::Mdi)
            .and_then(|()| controller.send_mdi(&command))
            .inspect_err(|err| warn!(command = %command, error = %err, "mdi dispatch failed"))?;
        info!(command = %command, "issued mdi command");
        Ok(command)
    }
}
