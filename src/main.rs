use anyhow::{Context, Result};
use menu_planner::api_connection::endpoints::Provider;
use menu_planner::catalog::MealCatalog;
use menu_planner::cli::{parse_args, Command, GenerateArgs, PrefsAction, ShowArgs};
use menu_planner::config::AppConfig;
use menu_planner::display::render_plan;
use menu_planner::menu_generator::{GroqMenuGenerator, MenuGenerator, MenuRequest};
use menu_planner::notes::parse_notes;
use menu_planner::preferences::{JsonFilePreferencesStore, PreferencesStore};
use menu_planner::session::PlannerSession;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout stays clean for plans and JSON.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_catalog(config: &AppConfig) -> Result<MealCatalog> {
    MealCatalog::load(&config.catalog_path).with_context(|| {
        format!(
            "Failed to load meal plan catalog from '{}'",
            config.catalog_path.display()
        )
    })
}

fn list_diets(config: &AppConfig) -> Result<()> {
    let catalog = load_catalog(config)?;
    for diet in catalog.diets() {
        let days = catalog.plan_for(diet).map_or(0, |plan| plan.len());
        println!("{} ({} days)", diet, days);
    }
    Ok(())
}

fn show_plan(config: &AppConfig, args: ShowArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let mut session = PlannerSession::new();
    session.select_diet(&catalog, args.diet);
    if let Some(error) = session.error() {
        anyhow::bail!("{}", error);
    }

    if let Some(notes) = args.notes {
        session.set_notes(notes);
        if session.can_apply() {
            if let Err(e) = session.apply_notes() {
                let message = session.error().unwrap_or_default().to_string();
                return Err(anyhow::Error::new(e).context(message));
            }
        }
    }
    if let Some(search) = args.search {
        session.set_search(search);
    }

    let visible = session.visible_plan();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        let title = format!("{} Diet - 7-Day Meal Plan", args.diet);
        print!("{}", render_plan(&title, &visible, session.search()));
    }
    Ok(())
}

fn print_rules(notes: &str) {
    let rules = parse_notes(notes);
    if rules.is_empty() {
        println!("No substitution rules found.");
        return;
    }
    for (idx, rule) in rules.iter().enumerate() {
        println!("{}. \"{}\" -> \"{}\"", idx + 1, rule.from, rule.to);
    }
}

async fn generate_menu(
    config: &AppConfig,
    store: &dyn PreferencesStore,
    args: GenerateArgs,
) -> Result<()> {
    let mut preferences = store.load().context("Failed to load saved preferences")?;
    if let Some(likes) = args.likes {
        preferences.likes = likes;
    }
    if let Some(dislikes) = args.dislikes {
        preferences.dislikes = dislikes;
    }
    if let Some(duration) = args.duration {
        preferences.duration = duration;
    }
    if let Some(meal_focus) = args.meal_focus {
        preferences.meal_focus = meal_focus;
    }
    if let Some(notes) = args.notes {
        preferences.diet_notes = notes;
    }
    store.save(&preferences).context("Failed to save preferences")?;

    let provider = Provider::groq(&config.api_key_env_var).with_base_url(&config.api_base_url);
    let generator: Box<dyn MenuGenerator> =
        Box::new(GroqMenuGenerator::new(provider, &config.model));
    let request = MenuRequest {
        diet: args.diet,
        preferences,
    };

    eprintln!("Generating menu...");
    let menu = generator
        .generate(&request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to generate personalized menu: {}", e))?;
    println!("{}", menu);
    Ok(())
}

fn handle_prefs(store: &JsonFilePreferencesStore, action: PrefsAction) -> Result<()> {
    match action {
        PrefsAction::Show => {
            let preferences = store.load()?;
            println!("{}", serde_json::to_string_pretty(&preferences)?);
            if preferences.is_customized() {
                println!("(saved at {})", store.path().display());
            }
        }
        PrefsAction::Clear => {
            store.clear()?;
            println!("Preferences cleared.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli_args = parse_args();
    let mut config = AppConfig::from_env();
    if let Some(catalog) = cli_args.catalog {
        config.catalog_path = catalog;
    }
    if let Some(prefs) = cli_args.prefs {
        config.preferences_path = prefs;
    }
    tracing::debug!(?config, "configuration loaded");

    let store = JsonFilePreferencesStore::new(&config.preferences_path);

    match cli_args.command {
        Command::Diets => list_diets(&config),
        Command::Show(args) => show_plan(&config, args),
        Command::Rules { notes } => {
            print_rules(&notes);
            Ok(())
        }
        Command::Generate(args) => generate_menu(&config, &store, args).await,
        Command::Prefs { action } => handle_prefs(&store, action),
    }
}
