//! Binary entrypoint for the Recipe Box CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml` and an empty recipe document
//! - `status` - print collection totals and achievement progress
//! - `achievements` - print the achievement grid and lifetime counters
//! - `list [--sort date|title|category]` - list recipes
//! - `add-recipe --title <t> [...]` - add a recipe
//! - `favorite <id>` - toggle a recipe's favorite flag
//! - `add-category --name <n> [--emoji <e>]` - add a category
//! - `shop <recipe-id>` - push a recipe's ingredients onto the shopping list
//! - `clear-shopping` - empty the shopping list
//!
//! See the library crate docs for module-level details: `recipebox::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;
use uuid::Uuid;

use recipebox::achievements::CounterKey;
use recipebox::config::Config;
use recipebox::storage::types::{Category, Recipe, RecipeDifficulty, RecipeSort};
use recipebox::storage::RecipeBox;

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "A pocket recipe box with shopping lists and achievements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration and an empty recipe document
    Init,
    /// Show collection totals and achievement progress
    Status,
    /// Show every achievement and the lifetime counters
    Achievements,
    /// List recipes
    List {
        /// Sort order: date, title or category (defaults to the saved setting)
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Add a recipe
    AddRecipe {
        #[arg(short, long)]
        title: String,
        /// Total cooking time in minutes
        #[arg(short, long)]
        minutes: Option<u32>,
        /// easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: String,
        /// File name of an already stored photo
        #[arg(long)]
        image: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Category name (must already exist)
        #[arg(long)]
        category: Option<String>,
        /// Ingredient as NAME or NAME:QUANTITY (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,
        /// Step text (repeatable, kept in order)
        #[arg(long = "step")]
        steps: Vec<String>,
    },
    /// Toggle a recipe's favorite flag
    Favorite { id: Uuid },
    /// Add a category
    AddCategory {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// Add a recipe's ingredients to the shopping list
    Shop { recipe_id: Uuid },
    /// Remove every item from the shopping list
    ClearShopping,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        info!("Initializing new recipe box configuration");
        if tokio::fs::try_exists(&cli.config).await.unwrap_or(false) {
            info!("Configuration file {} already exists; leaving it", cli.config);
        } else {
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        let config = Config::load(&cli.config).await?;
        let mut book = RecipeBox::open(config.database_path())?;
        let profile = book.database().profile.clone();
        if profile.nickname != config.profile.nickname {
            book.set_profile(&config.profile.nickname, profile.avatar_index)?;
        }
        info!("Recipe document ready at {}", book.path().display());
        return Ok(());
    }

    let config = Config::load(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);
    let mut book = RecipeBox::open(config.database_path())?;

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Status => {
            let db = book.database();
            println!("Chef: {}", db.profile.nickname);
            println!("Recipes: {} ({} favorites)", db.recipes.len(), book.favorites().len());
            println!("Categories: {}", db.categories.len());
            let unchecked = db.shopping.iter().filter(|i| !i.checked).count();
            println!("Shopping list: {} items ({} to buy)", db.shopping.len(), unchecked);
            println!(
                "Achievements: {}/{}",
                book.progress().unlocked_count(),
                book.progress().grid().len()
            );
        }
        Commands::Achievements => {
            for row in book.progress().grid() {
                let mark = if row.unlocked { "x" } else { " " };
                println!("[{}] {} - {}", mark, row.info.title, row.info.description);
            }
            println!();
            for key in CounterKey::ALL {
                println!("{:>20}: {}", key.as_str(), book.progress().counter(key));
            }
        }
        Commands::List { sort } => {
            let sort = match sort {
                Some(s) => s.parse::<RecipeSort>().map_err(|e| anyhow!(e))?,
                None => book.database().settings.default_sort,
            };
            for recipe in book.sorted_recipes(sort) {
                let star = if recipe.favorite { "*" } else { " " };
                let minutes = recipe
                    .total_minutes
                    .map(|m| format!("{}m", m))
                    .unwrap_or_else(|| "-".to_string());
                let category = book.category_name(recipe.category_id).unwrap_or("-");
                println!(
                    "{} {} {:<30} {:>5} {:<7} {}",
                    star, recipe.id, recipe.title, minutes, recipe.difficulty, category
                );
            }
        }
        Commands::AddRecipe {
            title,
            minutes,
            difficulty,
            image,
            notes,
            category,
            ingredients,
            steps,
        } => {
            let difficulty: RecipeDifficulty = difficulty.parse().map_err(|e: String| anyhow!(e))?;
            let mut recipe = Recipe::new(&title).with_difficulty(difficulty);
            if let Some(m) = minutes {
                recipe = recipe.with_minutes(m);
            }
            if let Some(img) = image {
                recipe = recipe.with_image(&img);
            }
            if let Some(n) = notes {
                recipe = recipe.with_notes(&n);
            }
            if let Some(name) = category {
                let id = book
                    .categories()
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
                    .map(|c| c.id)
                    .ok_or_else(|| anyhow!("No category named '{}'", name))?;
                recipe = recipe.in_category(id);
            }
            for spec in &ingredients {
                let (name, quantity) = match spec.split_once(':') {
                    Some((n, q)) => (n, Some(q.trim())),
                    None => (spec.as_str(), None),
                };
                recipe = recipe.with_ingredient(name, quantity.filter(|q| !q.is_empty()));
            }
            for step in &steps {
                recipe = recipe.with_step(step);
            }
            let before = book.progress().unlocked_count();
            let id = book.add_recipe(recipe)?;
            println!("Added recipe {}", id);
            print_new_unlocks(&book, before);
        }
        Commands::Favorite { id } => {
            let before = book.progress().unlocked_count();
            let favorite = book.toggle_favorite(id)?;
            println!("{} is {}", id, if favorite { "a favorite" } else { "no longer a favorite" });
            print_new_unlocks(&book, before);
        }
        Commands::AddCategory { name, emoji } => {
            let before = book.progress().unlocked_count();
            let id = book.add_category(Category::new(&name, emoji.as_deref()))?;
            println!("Added category {}", id);
            print_new_unlocks(&book, before);
        }
        Commands::Shop { recipe_id } => {
            let before = book.progress().unlocked_count();
            let added = book.add_recipe_to_shopping(recipe_id)?;
            println!("Added {} items to the shopping list", added);
            print_new_unlocks(&book, before);
        }
        Commands::ClearShopping => {
            let cleared = book.clear_shopping()?;
            println!("Removed {} items from the shopping list", cleared);
        }
    }

    Ok(())
}

fn print_new_unlocks(book: &RecipeBox, before: usize) {
    let now = book.progress().unlocked_count();
    if now > before {
        println!("{} new achievement(s)! Run `recipebox achievements` to see them.", now - before);
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_deref())
        .filter(|file| !file.trim().is_empty())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Also echo to the console when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);

        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());

            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }

            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
