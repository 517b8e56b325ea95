use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine axes in the fixed order the status mask enumerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisLetter {
    X,
    Y,
    Z,
    A,
    B,
    C,
    U,
    V,
    W,
}

impl AxisLetter {
    /// Bit `i` of an axis mask selects `ALL[i]`.
    pub const ALL: [AxisLetter; 9] = [
        AxisLetter::X,
        AxisLetter::Y,
        AxisLetter::Z,
        AxisLetter::A,
        AxisLetter::B,
        AxisLetter::C,
        AxisLetter::U,
        AxisLetter::V,
        AxisLetter::W,
    ];

    pub fn as_char(self) -> char {
        match self {
            AxisLetter::X => 'X',
            AxisLetter::Y => 'Y',
            AxisLetter::Z => 'Z',
            AxisLetter::A => 'A',
            AxisLetter::B => 'B',
            AxisLetter::C => 'C',
            AxisLetter::U => 'U',
            AxisLetter::V => 'V',
            AxisLetter::W => 'W',
        }
    }
}

impl fmt::Display for AxisLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One entry of a code template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordLetter {
    /// A concrete parameter letter such as `F` or `P`.
    Param(char),
    /// Stands for every active axis letter, in axis order.
    Axes,
}

impl WordLetter {
    pub fn is_placeholder(self) -> bool {
        matches!(self, WordLetter::Axes)
    }
}

/// Prefix of the code being composed in field 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CodeFamily {
    #[default]
    G,
    M,
}

impl CodeFamily {
    pub fn prefix(self) -> &'static str {
        match self {
            CodeFamily::G => "G",
            CodeFamily::M => "M",
        }
    }

    pub fn from_prefix(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("g") {
            Some(CodeFamily::G)
        } else if raw.eq_ignore_ascii_case("m") {
            Some(CodeFamily::M)
        } else {
            None
        }
    }
}

impl fmt::Display for CodeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// 9-bit axis selection as reported by the machine status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisMask(pub u16);

impl AxisMask {
    pub const NONE: AxisMask = AxisMask(0);

    pub fn contains(self, axis_index: usize) -> bool {
        axis_index < AxisLetter::ALL.len() && self.0 & (1 << axis_index) != 0
    }

    /// Accepts decimal, `0x` hex or `0b` binary text.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            u16::from_str_radix(hex, 16)
        } else if let Some(bin) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
            u16::from_str_radix(bin, 2)
        } else {
            raw.parse::<u16>()
        };
        parsed.ok().map(AxisMask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_mask_parses_all_radixes() {
        assert_eq!(AxisMask::parse("3"), Some(AxisMask(3)));
        assert_eq!(AxisMask::parse("0x1ff"), Some(AxisMask(0x1ff)));
        assert_eq!(AxisMask::parse(" 0b011 "), Some(AxisMask(0b011)));
        assert_eq!(AxisMask::parse("xyz"), None);
    }

    #[test]
    fn axis_mask_ignores_bits_past_w() {
        let mask = AxisMask(0xffff);
        assert!(mask.contains(8));
        assert!(!mask.contains(9));
    }

    #[test]
    fn family_prefix_is_case_insensitive() {
        assert_eq!(CodeFamily::from_prefix("m"), Some(CodeFamily::M));
        assert_eq!(CodeFamily::from_prefix("G"), Some(CodeFamily::G));
        assert_eq!(CodeFamily::from_prefix("T"), None);
    }
}
