pub mod data_loader;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use crate::meal_plan::{DayPlan, DietCategory};

pub use data_loader::{load_meal_plans, read_meal_plans};

/// The authored, read-only weekly plans keyed by diet category.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    plans: BTreeMap<DietCategory, Vec<DayPlan>>,
}

impl MealCatalog {
    pub fn load(csv_path: &Path) -> Result<Self> {
        Ok(Self {
            plans: load_meal_plans(csv_path)?,
        })
    }

    pub fn from_plans(plans: BTreeMap<DietCategory, Vec<DayPlan>>) -> Self {
        Self { plans }
    }

    pub fn plan_for(&self, diet: DietCategory) -> Option<&[DayPlan]> {
        self.plans
            .get(&diet)
            .map(Vec::as_slice)
            .filter(|plan| !plan.is_empty())
    }

    pub fn diets(&self) -> impl Iterator<Item = DietCategory> + '_ {
        self.plans.keys().copied()
    }
}
