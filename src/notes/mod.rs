//! Dietary-notes interpreter: turns freeform notes into substitution rules and
//! rewrites a meal plan with them.

pub mod rewriter;
pub mod rules;

pub use rewriter::{apply_notes, apply_rules, reset_plan, RewriteError};
pub use rules::{parse_notes, substitute_for, SubstitutionRule, FALLBACK_SUBSTITUTE};
