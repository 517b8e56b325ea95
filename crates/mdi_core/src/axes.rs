use shared::domain::{AxisLetter, AxisMask, WordLetter};
use tracing::debug;

/// Axis letters present on the machine, in mask order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveAxisSet {
    axes: Vec<AxisLetter>,
}

impl ActiveAxisSet {
    pub fn resolve(mask: AxisMask) -> Self {
        let axes = AxisLetter::ALL
            .iter()
            .enumerate()
            .filter(|(index, _)| mask.contains(*index))
            .map(|(_, axis)| *axis)
            .collect();
        Self { axes }
    }

    pub fn letters(&self) -> &[AxisLetter] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Replaces the axis placeholder with the active axis letters.
    ///
    /// Only the first placeholder is substituted; a second one (which no
    /// catalog template has) is dropped.
    pub fn expand(&self, template: &[WordLetter]) -> Vec<char> {
        let mut expanded = Vec::with_capacity(template.len() + self.axes.len());
        let mut substituted = false;
        for word in template {
            match word {
                WordLetter::Param(letter) => expanded.push(*letter),
                WordLetter::Axes if !substituted => {
                    expanded.extend(self.axes.iter().map(|axis| axis.as_char()));
                    substituted = true;
                }
                WordLetter::Axes => debug!("dropping repeated axis placeholder"),
            }
        }
        expanded
    }
}
