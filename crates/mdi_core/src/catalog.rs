//! Static table of the codes the keypad can compose and their legal words.

use std::collections::HashMap;

use shared::{
    domain::WordLetter::{self, Axes as AX, Param as P},
    error::MdiError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub id: &'static str,
    pub description: &'static str,
    pub template: &'static [WordLetter],
}

const fn entry(
    id: &'static str,
    description: &'static str,
    template: &'static [WordLetter],
) -> CodeEntry {
    CodeEntry {
        id,
        description,
        template,
    }
}

const STRAIGHT_RAPID: &[WordLetter] = &[AX];
const STRAIGHT_FEED: &[WordLetter] = &[AX, P('F')];
const ARC: &[WordLetter] = &[AX, P('I'), P('J'), P('K'), P('R'), P('F')];
const DWELL: &[WordLetter] = &[P('P')];
const PROBE: &[WordLetter] = &[AX, P('F')];
const DRILL: &[WordLetter] = &[AX, P('R'), P('L'), P('F')];
const DRILL_DWELL: &[WordLetter] = &[AX, P('R'), P('L'), P('P'), P('F')];
const DRILL_PECK: &[WordLetter] = &[AX, P('R'), P('L'), P('Q'), P('F')];

const CODES: &[CodeEntry] = &[
    entry("M3", "Spindle CW", &[P('S')]),
    entry("M4", "Spindle CCW", &[P('S')]),
    entry("M6", "Tool change", &[P('T')]),
    entry("G0", "Straight rapid", STRAIGHT_RAPID),
    entry("G00", "Straight rapid", STRAIGHT_RAPID),
    entry("G1", "Straight feed", STRAIGHT_FEED),
    entry("G01", "Straight feed", STRAIGHT_FEED),
    entry("G2", "Arc CW", ARC),
    entry("G02", "Arc CW", ARC),
    entry("G3", "Arc CCW", ARC),
    entry("G03", "Arc CCW", ARC),
    entry("G4", "Dwell", DWELL),
    entry("G04", "Dwell", DWELL),
    entry("G10", "Setup", &[P('L'), P('P'), AX, P('Q'), P('R')]),
    entry("G33", "Spindle synchronized feed", &[AX, P('K')]),
    entry("G33.1", "Rigid tap", &[P('Z'), P('K')]),
    entry("G38.2", "Probe", PROBE),
    entry("G38.3", "Probe", PROBE),
    entry("G38.4", "Probe", PROBE),
    entry("G38.5", "Probe", PROBE),
    entry("G41", "Radius compensation left", &[P('D')]),
    entry("G42", "Radius compensation right", &[P('D')]),
    entry("G41.1", "Radius compensation left, immediate", &[P('D'), P('L')]),
    entry("G42.1", "Radius compensation right, immediate", &[P('D'), P('L')]),
    entry("G43", "Tool length offset", &[P('H')]),
    entry("G43.1", "Tool length offset immediate", &[P('I'), P('K')]),
    entry("G53", "Motion in unoffset coordinates", &[P('G'), AX, P('F')]),
    entry("G64", "Continuous mode", &[P('P')]),
    entry(
        "G76",
        "Thread",
        &[
            P('Z'),
            P('P'),
            P('I'),
            P('J'),
            P('K'),
            P('R'),
            P('Q'),
            P('H'),
            P('E'),
            P('L'),
        ],
    ),
    entry("G81", "Drill", DRILL),
    entry("G82", "Drill with dwell", DRILL_DWELL),
    entry("G83", "Peck drill", DRILL_PECK),
    entry("G73", "Chip-break drill", DRILL_PECK),
    entry("G85", "Bore", DRILL),
    entry("G89", "Bore with dwell", DRILL_DWELL),
    entry("G92", "Offset all coordinate systems", STRAIGHT_RAPID),
    entry("G96", "CSS Mode", &[P('S'), P('D')]),
];

/// Lookup over the fixed code table, keyed by the exact code text.
#[derive(Debug, Clone)]
pub struct CodeCatalog {
    by_id: HashMap<&'static str, &'static CodeEntry>,
}

impl Default for CodeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl CodeCatalog {
    pub fn standard() -> Self {
        Self {
            by_id: CODES.iter().map(|entry| (entry.id, entry)).collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&'static CodeEntry> {
        self.by_id.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_id.contains_key(code)
    }

    pub fn describe(&self, code: &str) -> Result<&'static str, MdiError> {
        self.get(code)
            .map(|entry| entry.description)
            .ok_or_else(|| MdiError::UnknownCode {
                code: code.to_string(),
            })
    }

    /// Unexpanded template; unknown codes yield an empty template.
    pub fn template(&self, code: &str) -> &'static [WordLetter] {
        self.get(code).map(|entry| entry.template).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &'static CodeEntry> {
        CODES.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn code_ids_are_unique() {
        let ids: HashSet<_> = CODES.iter().map(|entry| entry.id).collect();
        assert_eq!(ids.len(), CODES.len());
        assert_eq!(CodeCatalog::standard().len(), CODES.len());
    }

    #[test]
    fn templates_hold_at_most_one_axis_placeholder() {
        for entry in CODES {
            let placeholders = entry.template.iter().filter(|w| w.is_placeholder()).count();
            assert!(placeholders <= 1, "{} has {placeholders} placeholders", entry.id);
        }
    }

    #[test]
    fn describe_known_code() {
        let catalog = CodeCatalog::standard();
        assert_eq!(catalog.describe("G1"), Ok("Straight feed"));
        assert_eq!(catalog.describe("G01"), Ok("Straight feed"));
        assert_eq!(catalog.describe("M6"), Ok("Tool change"));
    }

    #[test]
    fn describe_unknown_code_fails() {
        let err = CodeCatalog::standard()
            .describe("G999")
            .expect_err("should fail");
        assert_eq!(
            err,
            MdiError::UnknownCode {
                code: "G999".into()
            }
        );
    }

    #[test]
    fn template_of_unknown_code_is_empty() {
        let catalog = CodeCatalog::standard();
        assert!(catalog.template("G999").is_empty());
        assert!(catalog.template("").is_empty());
        assert!(!catalog.contains("g1"));
    }

    #[test]
    fn template_keeps_placeholder_unexpanded() {
        let catalog = CodeCatalog::standard();
        assert_eq!(catalog.template("G1"), &[AX, P('F')]);
        assert_eq!(
            catalog.template("G10"),
            &[P('L'), P('P'), AX, P('Q'), P('R')]
        );
        assert_eq!(catalog.template("G33.1"), &[P('Z'), P('K')]);
    }
}
