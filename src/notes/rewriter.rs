use regex::{NoExpand, Regex, RegexBuilder};
use std::error::Error;
use std::fmt;

use super::rules::{parse_notes, SubstitutionRule};
use crate::meal_plan::{DayPlan, MealRecord};

#[derive(Debug)]
pub enum RewriteError {
    /// A rule would match the empty string and splice its replacement between every character.
    EmptyPattern { to: String },
    InvalidPattern { from: String, source: regex::Error },
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::EmptyPattern { to } => {
                write!(f, "Substitution to '{}' has nothing to replace", to)
            }
            RewriteError::InvalidPattern { from, source } => {
                write!(f, "Cannot build substitution for '{}': {}", from, source)
            }
        }
    }
}

impl Error for RewriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RewriteError::InvalidPattern { source, .. } => Some(source),
            RewriteError::EmptyPattern { .. } => None,
        }
    }
}

/// Compiles `text` into a case-insensitive pattern that matches it literally.
pub(crate) fn literal_pattern(text: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
}

struct CompiledRule<'a> {
    pattern: Regex,
    to: &'a str,
}

fn compile_rules(rules: &[SubstitutionRule]) -> Result<Vec<CompiledRule<'_>>, RewriteError> {
    rules
        .iter()
        .map(|rule| {
            if rule.from.trim().is_empty() {
                return Err(RewriteError::EmptyPattern {
                    to: rule.to.clone(),
                });
            }
            let pattern =
                literal_pattern(&rule.from).map_err(|source| RewriteError::InvalidPattern {
                    from: rule.from.clone(),
                    source,
                })?;
            Ok(CompiledRule {
                pattern,
                to: &rule.to,
            })
        })
        .collect()
}

fn rewrite_text(text: &str, rules: &[CompiledRule<'_>]) -> String {
    rules.iter().fold(text.to_string(), |current, rule| {
        rule.pattern.replace_all(&current, NoExpand(rule.to)).into_owned()
    })
}

fn rewrite_meal(meal: &MealRecord, rules: &[CompiledRule<'_>]) -> MealRecord {
    let name = rewrite_text(&meal.name, rules);
    MealRecord {
        is_modified: name != meal.name,
        name,
        nutrients: rewrite_text(&meal.nutrients, rules),
        prep_tip: rewrite_text(&meal.prep_tip, rules),
        ..meal.clone()
    }
}

/// Applies `rules` in order to the name, nutrients and prep tip of every meal.
///
/// Each rule is a global, case-insensitive literal replace that runs on the
/// output of the previous one, so a later rule can match text an earlier rule
/// inserted. All rules are compiled before any meal is touched; on error
/// nothing is returned but the error.
pub fn apply_rules(
    original: &[DayPlan],
    rules: &[SubstitutionRule],
) -> Result<Vec<DayPlan>, RewriteError> {
    let compiled = compile_rules(rules)?;
    Ok(original
        .iter()
        .map(|day| day.map_meals(|meal| rewrite_meal(meal, &compiled)))
        .collect())
}

/// Rewrites the original plan according to freeform dietary notes. Blank
/// notes return the plan unchanged.
pub fn apply_notes(original: &[DayPlan], notes: &str) -> Result<Vec<DayPlan>, RewriteError> {
    if notes.trim().is_empty() {
        return Ok(original.to_vec());
    }
    let rules = parse_notes(notes);
    tracing::info!(
        rules = rules.len(),
        days = original.len(),
        "applying dietary notes"
    );
    apply_rules(original, &rules)
}

pub fn reset_plan(original: &[DayPlan]) -> Vec<DayPlan> {
    original.to_vec()
}
