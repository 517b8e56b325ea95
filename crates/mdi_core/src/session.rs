//! Keypad entry state machine.
//!
//! Field 0 holds the code being composed (`G1`, `M3`, ...). Once the code is
//! filled out, fields `1..=num_words` each hold one word of the expanded
//! template, starting with the word letter and followed by the typed value.

use serde::Serialize;
use shared::{
    domain::{AxisMask, CodeFamily},
    error::{DispatchError, MdiError},
    protocol::MachineController,
};
use tracing::debug;

use crate::{
    axes::ActiveAxisSet, builder::CommandBuilder, catalog::CodeCatalog, event::KeypadEvent,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub index: usize,
    pub text: String,
    pub selected: bool,
    /// False while the field holds only its leading letter.
    pub has_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub code: String,
    pub description: Option<String>,
    pub selected_field: usize,
    pub num_words: usize,
    pub fields: Vec<FieldView>,
}

pub struct EntrySession<C> {
    catalog: CodeCatalog,
    axes: ActiveAxisSet,
    builder: CommandBuilder,
    controller: C,
    selected: usize,
    num_words: usize,
    fields: Vec<String>,
}

impl<C: MachineController> EntrySession<C> {
    /// Polls the controller once for the axis mask; the resolved axes are
    /// fixed for the life of the session.
    pub fn new(catalog: CodeCatalog, mut controller: C, family: CodeFamily) -> Self {
        let status = controller.poll_status();
        let axes = ActiveAxisSet::resolve(status.axis_mask);
        debug!(axis_mask = status.axis_mask.0, axes = axes.len(), "entry session started");
        Self {
            catalog,
            axes,
            builder: CommandBuilder::new(),
            controller,
            selected: 0,
            num_words: 0,
            fields: vec![family.prefix().to_string()],
        }
    }

    pub fn with_controller(controller: C) -> Self {
        Self::new(CodeCatalog::standard(), controller, CodeFamily::default())
    }

    pub fn selected_field(&self) -> usize {
        self.selected
    }

    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Text of field `index`; fields past the current template read as blank.
    pub fn field_text(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn code(&self) -> &str {
        &self.fields[0]
    }

    pub fn axes(&self) -> &ActiveAxisSet {
        &self.axes
    }

    pub fn axis_letters(&self) -> String {
        self.axes.letters().iter().map(|axis| axis.as_char()).collect()
    }

    pub fn catalog(&self) -> &CodeCatalog {
        &self.catalog
    }

    pub fn builder(&self) -> &CommandBuilder {
        &self.builder
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn into_controller(self) -> C {
        self.controller
    }

    fn selected_text(&mut self) -> &mut String {
        &mut self.fields[self.selected]
    }

    /// Puts `code` into field 0 and returns to editing it. Empty text is ignored.
    pub fn set_code_text(&mut self, code: &str) {
        if code.is_empty() {
            return;
        }
        self.fields[0] = code.to_string();
        self.selected = 0;
    }

    pub fn digit(&mut self, digit: u8) {
        match char::from_digit(u32::from(digit), 10) {
            Some(ch) => self.keypad(ch),
            None => debug!(digit, "ignoring non-decimal digit"),
        }
    }

    pub fn keypad(&mut self, ch: char) {
        self.selected_text().push(ch);
    }

    pub fn decimal(&mut self) {
        let text = self.selected_text();
        if !text.contains('.') {
            text.push('.');
        }
    }

    /// Toggles the sign directly after the word letter.
    pub fn minus(&mut self) {
        if self.selected == 0 {
            return;
        }
        let text = self.selected_text();
        match text.find('-') {
            Some(pos) => {
                text.remove(pos);
            }
            None => {
                let after_letter = text.chars().next().map_or(0, char::len_utf8);
                text.insert(after_letter, '-');
            }
        }
    }

    /// Drops everything but the leading letter.
    pub fn clear(&mut self) {
        let text = self.selected_text();
        let keep = text.chars().next().map_or(0, char::len_utf8);
        text.truncate(keep);
    }

    /// Removes the last character, never the leading letter.
    pub fn back(&mut self) {
        let text = self.selected_text();
        if text.chars().nth(1).is_some() {
            text.pop();
        }
    }

    /// Expands the code in field 0 into word fields. Only acts while field 0
    /// is selected. Unknown codes expand to no words at all.
    pub fn fill_out(&mut self) {
        if self.selected != 0 {
            return;
        }
        let code = self.fields[0].clone();
        let letters = self.axes.expand(self.catalog.template(&code));
        if letters.is_empty() && !self.catalog.contains(&code) {
            debug!(code = %code, "unknown code, no words to fill out");
        }
        self.num_words = letters.len();
        self.fields.truncate(1);
        self.fields.extend(letters.into_iter().map(String::from));
        debug!(code = %code, num_words = self.num_words, "filled out template");
    }

    /// Moves to the next word field, wrapping past the last one back to field 1.
    pub fn next(&mut self) {
        self.fill_out();
        if self.num_words > 0 {
            self.selected = ((self.selected + 1) % (self.num_words + 1)).max(1);
            debug!(field = self.selected, "next field");
        }
    }

    pub fn try_select_field(&mut self, index: usize) -> Result<(), MdiError> {
        if self.selected == 0 {
            self.fill_out();
        }
        if index > self.num_words {
            return Err(MdiError::FieldOutOfRange {
                index,
                num_words: self.num_words,
            });
        }
        self.selected = index;
        debug!(field = index, "selected field");
        Ok(())
    }

    /// Like [`EntrySession::try_select_field`], but out-of-range indices are ignored.
    pub fn select_field(&mut self, index: usize) {
        if let Err(err) = self.try_select_field(index) {
            debug!(error = %err, "ignoring field selection");
        }
    }

    /// Starts a fresh code of the given family and forgets pending words.
    pub fn choose_code_family(&mut self, family: CodeFamily) {
        self.fields.clear();
        self.fields.push(family.prefix().to_string());
        self.selected = 0;
        self.num_words = 0;
        self.builder.clear();
        debug!(family = %family, "code family chosen");
    }

    /// Assembles the command from the current fields and hands it to the
    /// controller. Controller failures are returned as they came.
    pub fn confirm(&mut self) -> Result<String, DispatchError> {
        self.fill_out();
        self.builder.select_code(self.fields[0].clone());
        for text in &self.fields[1..=self.num_words] {
            let mut chars = text.chars();
            if let Some(letter) = chars.next() {
                self.builder.set_word(letter, chars.as_str());
            }
        }
        self.builder.issue(&mut self.controller)
    }

    /// Routes one keypad event. Returns the issued command for `Ok`.
    pub fn handle(&mut self, event: KeypadEvent) -> Result<Option<String>, DispatchError> {
        match event {
            KeypadEvent::Digit(digit) => self.digit(digit),
            KeypadEvent::Decimal => self.decimal(),
            KeypadEvent::Minus => self.minus(),
            KeypadEvent::Clear => self.clear(),
            KeypadEvent::Back => self.back(),
            KeypadEvent::Next => self.next(),
            KeypadEvent::Key(ch) => self.keypad(ch),
            KeypadEvent::Select(index) => self.select_field(index),
            KeypadEvent::Family(family) => self.choose_code_family(family),
            KeypadEvent::Ok => return self.confirm().map(Some),
        }
        Ok(None)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let code = self.code().to_string();
        let description = self.catalog.describe(&code).ok().map(str::to_string);
        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, text)| FieldView {
                index,
                text: text.clone(),
                selected: index == self.selected,
                has_value: text.chars().nth(1).is_some(),
            })
            .collect();
        SessionSnapshot {
            code,
            description,
            selected_field: self.selected,
            num_words: self.num_words,
            fields,
        }
    }
}

impl SessionSnapshot {
    /// One-line rendering: `[G1] X10 Y F200  (Straight feed)` with the
    /// selected field in brackets.
    pub fn render_line(&self) -> String {
        let mut parts: Vec<String> = self
            .fields
            .iter()
            .map(|field| {
                if field.selected {
                    format!("[{}]", field.text)
                } else {
                    field.text.clone()
                }
            })
            .collect();
        if let Some(description) = &self.description {
            parts.push(format!(" ({description})"));
        }
        parts.join(" ")
    }
}

/// Inverse of [`ActiveAxisSet::resolve`] for a string of axis letters.
pub fn mask_for_letters(letters: &str) -> AxisMask {
    let bits = shared::domain::AxisLetter::ALL
        .iter()
        .enumerate()
        .filter(|(_, axis)| letters.contains(axis.as_char()))
        .fold(0u16, |mask, (index, _)| mask | (1 << index));
    AxisMask(bits)
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
