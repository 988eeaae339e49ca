use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::meal_plan::{DayPlan, DietCategory, MealRecord, MealSlot};

// Expected column headers
const DIET_COL: &str = "diet";
const DAY_COL: &str = "day";
const SLOT_COL: &str = "slot";
const NAME_COL: &str = "name";
const CALORIES_COL: &str = "calories";
const NUTRIENTS_COL: &str = "nutrients";
const PREP_TIP_COL: &str = "prep_tip";

/// A day under construction while rows are read; slots fill in any order.
#[derive(Default)]
struct PartialDay {
    day: String,
    breakfast: Option<MealRecord>,
    lunch: Option<MealRecord>,
    dinner: Option<MealRecord>,
    snacks: Option<MealRecord>,
}

impl PartialDay {
    fn slot_mut(&mut self, slot: MealSlot) -> &mut Option<MealRecord> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    fn finish(self, diet: DietCategory) -> Result<DayPlan> {
        let missing = |slot: MealSlot| {
            anyhow!(
                "{} diet, {}: missing {} entry",
                diet,
                self.day,
                slot.label().to_lowercase()
            )
        };
        let breakfast = self.breakfast.clone().ok_or_else(|| missing(MealSlot::Breakfast))?;
        let lunch = self.lunch.clone().ok_or_else(|| missing(MealSlot::Lunch))?;
        let dinner = self.dinner.clone().ok_or_else(|| missing(MealSlot::Dinner))?;
        Ok(DayPlan {
            day: self.day,
            breakfast,
            lunch,
            dinner,
            snacks: self.snacks,
        })
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| anyhow!("Column '{}' not found", name))
}

pub fn load_meal_plans(csv_path: &Path) -> Result<BTreeMap<DietCategory, Vec<DayPlan>>> {
    if !csv_path.exists() {
        return Err(anyhow!("Meal plan CSV file not found at: {:?}", csv_path));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open meal plan CSV file at {:?}", csv_path))?;
    let plans = read_meal_plans(file)
        .with_context(|| format!("Invalid meal plan data in {:?}", csv_path))?;
    tracing::info!(path = ?csv_path, diets = plans.len(), "loaded meal plan catalog");
    Ok(plans)
}

/// Reads catalog rows from any CSV source. Day order follows first appearance per diet.
pub fn read_meal_plans<R: Read>(reader: R) -> Result<BTreeMap<DietCategory, Vec<DayPlan>>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let diet_idx = column_index(&headers, DIET_COL)?;
    let day_idx = column_index(&headers, DAY_COL)?;
    let slot_idx = column_index(&headers, SLOT_COL)?;
    let name_idx = column_index(&headers, NAME_COL)?;
    let calories_idx = column_index(&headers, CALORIES_COL)?;
    let nutrients_idx = column_index(&headers, NUTRIENTS_COL)?;
    let prep_tip_idx = column_index(&headers, PREP_TIP_COL)?;

    let mut partial: BTreeMap<DietCategory, Vec<PartialDay>> = BTreeMap::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let name = field(name_idx);
        if name.is_empty() {
            tracing::debug!(row_index, "skipping meal row with empty name");
            continue;
        }

        let diet: DietCategory = field(diet_idx)
            .parse()
            .with_context(|| format!("Bad diet at row {}", row_index))?;
        let slot: MealSlot = field(slot_idx)
            .parse()
            .with_context(|| format!("Bad slot at row {}", row_index))?;
        let day_name = field(day_idx);
        if day_name.is_empty() {
            return Err(anyhow!("Missing day at row {}", row_index));
        }

        let days = partial.entry(diet).or_default();
        let position = match days.iter().position(|d| d.day == day_name) {
            Some(position) => position,
            None => {
                days.push(PartialDay {
                    day: day_name.to_string(),
                    ..Default::default()
                });
                days.len() - 1
            }
        };

        let cell = days[position].slot_mut(slot);
        if cell.is_some() {
            return Err(anyhow!(
                "Duplicate {} entry for {} {} at row {}",
                slot.label().to_lowercase(),
                diet,
                day_name,
                row_index
            ));
        }
        *cell = Some(MealRecord::new(
            name,
            field(calories_idx),
            field(nutrients_idx),
            field(prep_tip_idx),
        ));
    }

    if partial.is_empty() {
        return Err(anyhow!("No valid meal plan rows loaded"));
    }

    partial
        .into_iter()
        .map(|(diet, days)| {
            let days = days
                .into_iter()
                .map(|day| day.finish(diet))
                .collect::<Result<Vec<_>>>()?;
            Ok((diet, days))
        })
        .collect()
}
