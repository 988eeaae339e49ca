use std::fmt::Write;

use crate::meal_plan::DayPlan;
use crate::search::highlight_matches;

const HIGHLIGHT_OPEN: &str = "[";
const HIGHLIGHT_CLOSE: &str = "]";

/// Renders a plan for the terminal. Meal names have `search` hits bracketed
/// and rewritten meals carry a `(modified)` badge.
pub fn render_plan(title: &str, plan: &[DayPlan], search: &str) -> String {
    if plan.is_empty() {
        return if search.trim().is_empty() {
            "No meal plan available. Please select a diet type.\n".to_string()
        } else {
            format!(
                "No meals found containing \"{}\". Try a different ingredient!\n",
                search
            )
        };
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    if !search.trim().is_empty() {
        let _ = writeln!(
            out,
            "Showing {} day(s) with meals containing \"{}\"",
            plan.len(),
            search
        );
    }

    for day in plan {
        let _ = writeln!(out, "\n{}", day.day);
        for (slot, meal) in day.meals() {
            let badge = if meal.is_modified { " (modified)" } else { "" };
            let _ = writeln!(
                out,
                "  {:<10} {} [{}]{}",
                format!("{}:", slot.label()),
                highlight_matches(&meal.name, search, HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE),
                meal.calories,
                badge
            );
            let _ = writeln!(out, "             Nutrients: {}", meal.nutrients);
            let _ = writeln!(out, "             Prep tip:  {}", meal.prep_tip);
        }
    }
    out
}
