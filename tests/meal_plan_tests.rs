use anyhow::Result;
use menu_planner::catalog::MealCatalog;
use menu_planner::meal_plan::{DayPlan, DietCategory};
use menu_planner::notes::{apply_notes, reset_plan};
use menu_planner::search::filter_by_search;
use menu_planner::session::PlannerSession;
use std::path::Path;

fn shipped_catalog() -> Result<MealCatalog> {
    MealCatalog::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("data/meal_plans.csv"))
}

fn plan(catalog: &MealCatalog, diet: DietCategory) -> Vec<DayPlan> {
    catalog
        .plan_for(diet)
        .expect("shipped catalog covers every diet")
        .to_vec()
}

#[test]
fn test_shipped_catalog_has_a_week_per_diet() -> Result<()> {
    let catalog = shipped_catalog()?;
    let weekdays = [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ];
    for diet in DietCategory::ALL {
        let days: Vec<String> = plan(&catalog, diet).into_iter().map(|d| d.day).collect();
        assert_eq!(days, weekdays, "{} plan is not Monday..Sunday", diet);
    }
    Ok(())
}

#[test]
fn test_replace_beef_with_tofu_on_liver_plan() -> Result<()> {
    let original = plan(&shipped_catalog()?, DietCategory::LiverCentric);
    let modified = apply_notes(&original, "Replace beef with tofu")?;

    assert_eq!(original[0].breakfast.name, "Beef liver with scrambled eggs");
    assert_eq!(modified[0].breakfast.name, "tofu liver with scrambled eggs");
    assert!(modified[0].breakfast.is_modified);
    assert_eq!(modified.len(), original.len());

    let mixed_case = apply_notes(&original, "Replace Beef With Tofu")?;
    assert_eq!(mixed_case, modified);
    Ok(())
}

#[test]
fn test_avoid_dairy_and_unknown_ingredient() -> Result<()> {
    let original = plan(&shipped_catalog()?, DietCategory::LiverCentric);

    let no_milk = apply_notes(&original, "no milk")?;
    // "Soak liver in milk ..." is a prep tip; the name is untouched so the meal is not flagged.
    assert!(no_milk[0].breakfast.prep_tip.contains("plant milk"));
    assert!(!no_milk[0].breakfast.is_modified);

    let no_liver = apply_notes(&original, "no liver")?;
    assert_eq!(
        no_liver[0].breakfast.name,
        "Beef suitable alternative with scrambled eggs"
    );
    for day in &no_liver {
        for (_, meal) in day.meals() {
            assert!(!meal.name.to_lowercase().contains("liver"));
            assert!(!meal.nutrients.to_lowercase().contains("liver"));
            assert!(!meal.prep_tip.to_lowercase().contains("liver"));
        }
    }
    Ok(())
}

#[test]
fn test_reset_after_apply_is_identity() -> Result<()> {
    let catalog = shipped_catalog()?;
    for diet in DietCategory::ALL {
        let original = plan(&catalog, diet);
        for notes in ["", "no dairy", "replace chicken with chickpeas, avoid rice\nno kale"] {
            let _modified = apply_notes(&original, notes)?;
            assert_eq!(reset_plan(&original), original);
        }
        let unchanged = apply_notes(&original, "")?;
        assert_eq!(unchanged, original);
        assert!(unchanged
            .iter()
            .all(|day| day.meals().all(|(_, meal)| !meal.is_modified)));
    }
    Ok(())
}

#[test]
fn test_salmon_search_on_low_sugar_plan() -> Result<()> {
    let week = plan(&shipped_catalog()?, DietCategory::LowSugar);
    let filtered = filter_by_search(&week, "salmon");

    let days: Vec<&str> = filtered.iter().map(|d| d.day.as_str()).collect();
    assert_eq!(days, vec!["Monday", "Sunday"]);
    for day in &filtered {
        for (_, meal) in day.meals() {
            let expected = meal.name.to_lowercase().contains("salmon");
            assert_eq!(meal.is_match, Some(expected), "{} / {}", day.day, meal.name);
        }
    }
    Ok(())
}

#[test]
fn test_session_search_sees_rewritten_names() -> Result<()> {
    let catalog = shipped_catalog()?;
    let mut session = PlannerSession::new();
    session.select_diet(&catalog, DietCategory::LowSugar);
    session.set_notes("no salmon");
    session.apply_notes()?;

    session.set_search("salmon");
    assert!(session.visible_plan().is_empty());

    session.set_search("avocado");
    assert!(session.visible_plan().len() >= 2);

    session.reset();
    session.set_search("salmon");
    assert_eq!(session.visible_plan().len(), 2);
    Ok(())
}
