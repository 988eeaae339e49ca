use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::meal_plan::DietCategory;
use crate::preferences::{MealFocus, PlanDuration};

#[derive(Parser, Debug)]
#[command(author, version, about = "Weekly meal plans with dietary-note rewriting", long_about = None)]
pub struct Cli {
    /// Path to the meal plan catalog CSV
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Path to the saved preferences JSON file
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the diet categories available in the catalog
    Diets,
    /// Show a diet's 7-day plan, optionally rewritten by notes and filtered by search
    Show(ShowArgs),
    /// Print the substitution rules parsed from dietary notes
    Rules {
        #[arg(short, long)]
        notes: String,
    },
    /// Ask the AI provider for a personalised menu
    Generate(GenerateArgs),
    /// Inspect or clear saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(short, long, value_enum)]
    pub diet: DietCategory,

    /// Dietary notes, e.g. "replace beef with tofu, no dairy"
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Only show days with a meal whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(short, long, value_enum)]
    pub diet: DietCategory,

    #[arg(long)]
    pub likes: Option<String>,

    #[arg(long)]
    pub dislikes: Option<String>,

    #[arg(long, value_enum)]
    pub duration: Option<PlanDuration>,

    #[arg(long, value_enum)]
    pub meal_focus: Option<MealFocus>,

    #[arg(short, long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefsAction {
    Show,
    Clear,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
