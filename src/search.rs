use crate::meal_plan::{DayPlan, MealRecord};
use crate::notes::rewriter::literal_pattern;

fn annotate(meal: &MealRecord, needle: &str) -> MealRecord {
    MealRecord {
        is_match: Some(meal.name.to_lowercase().contains(needle)),
        ..meal.clone()
    }
}

fn has_match(day: &DayPlan) -> bool {
    day.meals().any(|(_, meal)| meal.is_match == Some(true))
}

/// Marks each meal whose name contains `search` (case-insensitive) and keeps
/// only the days with at least one marked meal. A blank search returns the
/// plan as-is.
pub fn filter_by_search(plan: &[DayPlan], search: &str) -> Vec<DayPlan> {
    if search.trim().is_empty() {
        return plan.to_vec();
    }
    let needle = search.to_lowercase();
    plan.iter()
        .map(|day| day.map_meals(|meal| annotate(meal, &needle)))
        .filter(has_match)
        .collect()
}

/// Wraps every case-insensitive occurrence of `search` in `text` with `open`/`close`.
pub fn highlight_matches(text: &str, search: &str, open: &str, close: &str) -> String {
    if search.is_empty() || text.is_empty() {
        return text.to_string();
    }
    match literal_pattern(search) {
        Ok(pattern) => pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                format!("{}{}{}", open, &caps[0], close)
            })
            .into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "could not highlight search term");
            text.to_string()
        }
    }
}
