use crate::catalog::MealCatalog;
use crate::meal_plan::{DayPlan, DietCategory};
use crate::notes::{self, RewriteError};
use crate::search::filter_by_search;

pub const APPLY_FAILED_MESSAGE: &str =
    "Failed to apply dietary modifications. Please check your input and try again.";

/// What a planner screen holds between user actions.
///
/// `original_plan` is kept exactly as loaded from the catalog so notes are
/// always applied to it, never on top of an earlier rewrite, and `reset` can
/// restore it.
#[derive(Debug, Clone, Default)]
pub struct PlannerSession {
    selected_diet: Option<DietCategory>,
    original_plan: Vec<DayPlan>,
    plan: Vec<DayPlan>,
    notes: String,
    search: String,
    error: Option<String>,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_diet(&mut self, catalog: &MealCatalog, diet: DietCategory) {
        self.selected_diet = Some(diet);
        self.search.clear();
        self.notes.clear();
        self.error = None;

        match catalog.plan_for(diet) {
            Some(plan) => {
                self.original_plan = plan.to_vec();
                self.plan = plan.to_vec();
            }
            None => {
                tracing::warn!(%diet, "no catalog plan for diet");
                self.error = Some(format!(
                    "Menu not available yet for {} diet. Please try another diet type or check back later.",
                    diet
                ));
                self.original_plan.clear();
                self.plan.clear();
            }
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Whether an apply would do anything.
    pub fn can_apply(&self) -> bool {
        !self.notes.trim().is_empty() && !self.original_plan.is_empty()
    }

    /// Rewrites the original plan with the current notes. On failure the
    /// displayed plan stays as it was and a user-facing error is recorded.
    pub fn apply_notes(&mut self) -> Result<(), RewriteError> {
        if self.original_plan.is_empty() {
            return Ok(());
        }
        self.error = None;
        match notes::apply_notes(&self.original_plan, &self.notes) {
            Ok(modified) => {
                self.plan = modified;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "error applying modifications");
                self.error = Some(APPLY_FAILED_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        if self.original_plan.is_empty() {
            return;
        }
        self.plan = notes::reset_plan(&self.original_plan);
        self.notes.clear();
        self.error = None;
    }

    /// The displayed plan after the current search filter.
    pub fn visible_plan(&self) -> Vec<DayPlan> {
        filter_by_search(&self.plan, &self.search)
    }

    pub fn selected_diet(&self) -> Option<DietCategory> {
        self.selected_diet
    }

    pub fn original_plan(&self) -> &[DayPlan] {
        &self.original_plan
    }

    pub fn plan(&self) -> &[DayPlan] {
        &self.plan
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_plan::MealRecord;
    use std::collections::BTreeMap;

    fn catalog() -> MealCatalog {
        let day = |name: &str, dinner: &str| DayPlan {
            day: name.to_string(),
            breakfast: MealRecord::new("Beef liver with eggs", "450 kcal", "Iron", "Soak in milk"),
            lunch: MealRecord::new("Chicken salad", "350 kcal", "Protein", "Grill chicken"),
            dinner: MealRecord::new(dinner, "500 kcal", "Omega-3", "Bake"),
            snacks: None,
        };
        let mut plans = BTreeMap::new();
        plans.insert(
            DietCategory::LiverCentric,
            vec![day("Monday", "Grilled salmon"), day("Tuesday", "Baked cod")],
        );
        MealCatalog::from_plans(plans)
    }

    #[test]
    fn test_select_diet_loads_original_and_displayed_plan() {
        let mut session = PlannerSession::new();
        session.set_notes("no beef");
        session.select_diet(&catalog(), DietCategory::LiverCentric);

        assert_eq!(session.plan().len(), 2);
        assert_eq!(session.plan(), session.original_plan());
        assert_eq!(session.notes(), "");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_select_missing_diet_sets_error() {
        let mut session = PlannerSession::new();
        session.select_diet(&catalog(), DietCategory::Vegetarian);
        assert!(session.plan().is_empty());
        assert!(session
            .error()
            .unwrap()
            .starts_with("Menu not available yet for Vegetarian diet"));
        assert!(!session.can_apply());
    }

    #[test]
    fn test_apply_always_starts_from_original() {
        let mut session = PlannerSession::new();
        session.select_diet(&catalog(), DietCategory::LiverCentric);

        session.set_notes("replace beef with tofu");
        session.apply_notes().unwrap();
        assert_eq!(session.plan()[0].breakfast.name, "tofu liver with eggs");

        session.set_notes("replace chicken with chickpeas");
        session.apply_notes().unwrap();
        // The earlier beef rewrite is gone because the original was used.
        assert_eq!(session.plan()[0].breakfast.name, "Beef liver with eggs");
        assert_eq!(session.plan()[0].lunch.name, "chickpeas salad");
    }

    #[test]
    fn test_failed_apply_keeps_displayed_plan() {
        let mut session = PlannerSession::new();
        session.select_diet(&catalog(), DietCategory::LiverCentric);
        session.set_notes("no salmon");
        session.apply_notes().unwrap();
        let before = session.plan().to_vec();

        session.set_notes("replace   with tofu");
        assert!(session.apply_notes().is_err());
        assert_eq!(session.plan(), before.as_slice());
        assert_eq!(session.error(), Some(APPLY_FAILED_MESSAGE));
    }

    #[test]
    fn test_reset_restores_original_and_clears_state() {
        let mut session = PlannerSession::new();
        session.select_diet(&catalog(), DietCategory::LiverCentric);
        session.set_notes("replace   with tofu");
        let _ = session.apply_notes();
        session.set_notes("no beef");
        session.apply_notes().unwrap();

        session.reset();
        assert_eq!(session.plan(), session.original_plan());
        assert_eq!(session.notes(), "");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_reset_without_plan_is_noop() {
        let mut session = PlannerSession::new();
        session.set_notes("no beef");
        session.reset();
        assert_eq!(session.notes(), "no beef");
        assert!(session.plan().is_empty());
    }

    #[test]
    fn test_visible_plan_applies_search() {
        let mut session = PlannerSession::new();
        session.select_diet(&catalog(), DietCategory::LiverCentric);
        session.set_search("cod");
        let visible = session.visible_plan();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].day, "Tuesday");
        assert_eq!(visible[0].dinner.is_match, Some(true));
    }
}
