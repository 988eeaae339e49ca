use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Used when an avoided ingredient has no entry in [`SUBSTITUTES`].
pub const FALLBACK_SUBSTITUTE: &str = "suitable alternative";

/// Default swap for "no X" / "avoid X" notes. Keys are lowercase.
pub const SUBSTITUTES: &[(&str, &str)] = &[
    ("red meat", "tofu"),
    ("meat", "plant-based protein"),
    ("beef", "lentils"),
    ("pork", "tempeh"),
    ("chicken", "chickpeas"),
    ("fish", "tofu"),
    ("salmon", "avocado"),
    ("dairy", "plant-based alternative"),
    ("cheese", "nutritional yeast"),
    ("milk", "plant milk"),
    ("eggs", "flax eggs"),
    ("gluten", "gluten-free alternative"),
    ("wheat", "quinoa"),
    ("rice", "cauliflower rice"),
    ("pasta", "zucchini noodles"),
];

static REPLACE_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"replace\s+(.+?)\s+with\s+(.+)").expect("replace-rule pattern is valid")
});

static AVOID_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:no|avoid)\s+(.+)").expect("avoid-rule pattern is valid")
});

/// A literal, case-insensitive text substitution derived from notes text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub from: String,
    pub to: String,
}

impl SubstitutionRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Looks up the default substitute for an avoided ingredient.
pub fn substitute_for(ingredient: &str) -> &'static str {
    SUBSTITUTES
        .iter()
        .find(|(key, _)| *key == ingredient)
        .map(|(_, substitute)| *substitute)
        .unwrap_or(FALLBACK_SUBSTITUTE)
}

/// Parses freeform dietary notes into an ordered list of substitution rules.
///
/// The notes are lowercased and split on `,`, `;` and newlines. Each piece is
/// either a replace-rule (`replace X with Y`) or an avoid-rule (`no X`,
/// `avoid X`); the first shape that applies wins and anything else is dropped
/// without complaint. Rule order follows line order.
pub fn parse_notes(notes: &str) -> Vec<SubstitutionRule> {
    let lowered = notes.to_lowercase();
    let rules: Vec<SubstitutionRule> = lowered
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect();
    tracing::debug!(rule_count = rules.len(), "parsed dietary notes");
    rules
}

fn parse_line(line: &str) -> Option<SubstitutionRule> {
    if line.contains("replace") && line.contains("with") {
        // A line naming both words is a replace attempt even if the pattern fails.
        let caps = REPLACE_RULE.captures(line)?;
        return Some(SubstitutionRule::new(caps[1].trim(), caps[2].trim()));
    }

    let caps = AVOID_RULE.captures(line)?;
    let ingredient = caps[1].trim();
    Some(SubstitutionRule::new(ingredient, substitute_for(ingredient)))
}
