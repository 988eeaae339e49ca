use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// A single meal as authored in the catalog, plus the display flags derived by
/// note rewriting (`is_modified`) and search (`is_match`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    pub name: String,
    pub calories: String, // free-form range, e.g. "450-500 kcal"
    pub nutrients: String,
    pub prep_tip: String,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_match: Option<bool>,
}

impl MealRecord {
    pub fn new(
        name: impl Into<String>,
        calories: impl Into<String>,
        nutrients: impl Into<String>,
        prep_tip: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            calories: calories.into(),
            nutrients: nutrients.into(),
            prep_tip: prep_tip.into(),
            is_modified: false,
            is_match: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snacks => "Snacks",
        }
    }
}

impl FromStr for MealSlot {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" | "snacks" => Ok(MealSlot::Snacks),
            _ => Err(UnknownLabel::MealSlot(s.to_string())),
        }
    }
}

/// One day of a weekly plan. `snacks` is optional; the other three are always present.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub day: String,
    pub breakfast: MealRecord,
    pub lunch: MealRecord,
    pub dinner: MealRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snacks: Option<MealRecord>,
}

impl DayPlan {
    pub fn meal(&self, slot: MealSlot) -> Option<&MealRecord> {
        match slot {
            MealSlot::Breakfast => Some(&self.breakfast),
            MealSlot::Lunch => Some(&self.lunch),
            MealSlot::Dinner => Some(&self.dinner),
            MealSlot::Snacks => self.snacks.as_ref(),
        }
    }

    /// Meals in display order, skipping an absent snack.
    pub fn meals(&self) -> impl Iterator<Item = (MealSlot, &MealRecord)> {
        MealSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.meal(slot).map(|meal| (slot, meal)))
    }

    pub fn map_meals(&self, mut f: impl FnMut(&MealRecord) -> MealRecord) -> DayPlan {
        DayPlan {
            day: self.day.clone(),
            breakfast: f(&self.breakfast),
            lunch: f(&self.lunch),
            dinner: f(&self.dinner),
            snacks: self.snacks.as_ref().map(f),
        }
    }
}

#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum,
)]
pub enum DietCategory {
    #[serde(rename = "Liver-Centric")]
    LiverCentric,
    #[serde(rename = "Low-Sugar")]
    LowSugar,
    #[serde(rename = "Vegetarian")]
    Vegetarian,
}

impl DietCategory {
    pub const ALL: [DietCategory; 3] = [
        DietCategory::LiverCentric,
        DietCategory::LowSugar,
        DietCategory::Vegetarian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DietCategory::LiverCentric => "Liver-Centric",
            DietCategory::LowSugar => "Low-Sugar",
            DietCategory::Vegetarian => "Vegetarian",
        }
    }
}

impl fmt::Display for DietCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietCategory {
    type Err = UnknownLabel;

    /// Accepts the display label ("Low-Sugar") as well as spaced or snake-cased variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "liver-centric" => Ok(DietCategory::LiverCentric),
            "low-sugar" => Ok(DietCategory::LowSugar),
            "vegetarian" => Ok(DietCategory::Vegetarian),
            _ => Err(UnknownLabel::Diet(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownLabel {
    Diet(String),
    MealSlot(String),
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownLabel::Diet(label) => write!(f, "Unknown diet category: '{}'", label),
            UnknownLabel::MealSlot(label) => write!(f, "Unknown meal slot: '{}'", label),
        }
    }
}

impl Error for UnknownLabel {}
