use std::sync::Arc;

use anyhow::{bail, Context, Result};
use barback_core::{
    Barback, BarbackConfig, Cocktail, CocktailDbClient, MatchResult, SearchSession, Vocabulary,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "barback")]
#[command(about = "Find cocktails you can make from what is on the shelf", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank cocktails by how many of the given ingredients they use
    Search {
        /// Catalog or display names, e.g. "Gin" or "Misket Limonu"
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// Print a preview image URL under each cocktail
        #[arg(long)]
        images: bool,
    },
    /// List catalog ingredients with their display names
    Ingredients {
        /// Only show ingredients matching this text
        #[arg(long)]
        query: Option<String>,
        /// Do not add common ingredients missing from the catalog
        #[arg(long)]
        no_popular: bool,
        /// Print each ingredient's image URL
        #[arg(long)]
        images: bool,
    },
    /// Look up a name in the vocabulary
    Translate {
        name: String,
        #[arg(long, value_enum, default_value_t = Kind::Ingredient)]
        kind: Kind,
    },
    /// Show a cocktail by catalog id
    Show { id: String },
    /// Show a random cocktail
    Random,
    /// Show the home screen's popular cocktails
    Popular,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Ingredient,
    Category,
    Glass,
    /// Display name back to catalog name
    Reverse,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = BarbackConfig::from_env().context("Invalid configuration")?;
    let vocabulary = config
        .load_vocabulary()
        .context("Failed to load vocabulary")?;
    let alternates = config
        .load_alternates()
        .context("Failed to load alternate names")?;
    let client = Arc::new(config.catalog_client()?);
    let engine = Barback::new(client.clone(), vocabulary, alternates);

    match cli.command {
        Commands::Search {
            ingredients,
            images,
        } => search(&engine, &ingredients, images).await?,
        Commands::Ingredients {
            query,
            no_popular,
            images,
        } => list_ingredients(&engine, query.as_deref(), !no_popular, images).await?,
        Commands::Translate { name, kind } => {
            println!("{}", translate(engine.vocabulary(), &name, kind));
        }
        Commands::Show { id } => match client.lookup_cocktail(&id).await? {
            Some(cocktail) => print_cocktail(engine.vocabulary(), &cocktail),
            None => bail!("No cocktail with id {}", id),
        },
        Commands::Random => {
            let cocktail = fetch_random(&client).await?;
            print_cocktail(engine.vocabulary(), &cocktail);
        }
        Commands::Popular => {
            let cocktails = client.popular_cocktails().await;
            if cocktails.is_empty() {
                bail!("Could not load any popular cocktails");
            }
            for cocktail in &cocktails {
                println!(
                    "{} (#{}, {})",
                    cocktail.name,
                    cocktail.id,
                    cocktail.difficulty().as_str()
                );
            }
        }
    }

    Ok(())
}

async fn search(engine: &Barback, names: &[String], images: bool) -> Result<()> {
    let mut session = SearchSession::new();
    for name in names {
        let canonical = engine.vocabulary().reverse_ingredient(name.trim());
        session.select_name(canonical, engine.vocabulary());
    }

    engine.search_session(&mut session).await?;

    let selected: Vec<&str> = session
        .selected()
        .iter()
        .map(|s| s.display_name.as_str())
        .collect();
    println!("Selected: {}", selected.join(", "));

    let partition = session.partition();
    if partition.full.is_empty() && partition.partial.is_empty() {
        println!("No cocktails found.");
        return Ok(());
    }

    print_matches(engine, "You can make", &partition.full, images);
    print_matches(engine, "Missing something", &partition.partial, images);
    Ok(())
}

fn print_matches(engine: &Barback, heading: &str, matches: &[MatchResult], images: bool) {
    if matches.is_empty() {
        return;
    }
    println!("\n{} ({}):", heading, matches.len());
    for result in matches {
        let used: Vec<&str> = result
            .matched_ingredients
            .iter()
            .map(|name| engine.translate_for_display(name))
            .collect();
        println!(
            "  [{:>3.0}%] {} ({}/{}: {})",
            result.match_percentage(),
            result.recipe.name,
            result.match_count,
            result.total_selected,
            used.join(", ")
        );
        if let Some(preview) = result.recipe.preview_thumbnail().filter(|_| images) {
            println!("         {}", preview);
        }
    }
}

async fn list_ingredients(
    engine: &Barback,
    query: Option<&str>,
    popular: bool,
    images: bool,
) -> Result<()> {
    let all = engine.load_ingredients(popular).await?;
    let shown = engine.filter_ingredients(query.unwrap_or(""), &all);

    for ingredient in &shown {
        let display = engine.translate_for_display(&ingredient.name);
        if display == ingredient.name {
            println!("{}", ingredient.name);
        } else {
            println!("{} ({})", display, ingredient.name);
        }
        if images {
            println!("  {}", ingredient.thumbnail_url());
        }
    }
    tracing::debug!(total = all.len(), shown = shown.len(), "listed ingredients");
    Ok(())
}

fn translate<'a>(vocabulary: &'a Vocabulary, name: &'a str, kind: Kind) -> &'a str {
    match kind {
        Kind::Ingredient => vocabulary.translate_ingredient(name),
        Kind::Category => vocabulary.translate_category(name),
        Kind::Glass => vocabulary.translate_glass(name),
        Kind::Reverse => vocabulary.reverse_ingredient(name),
    }
}

async fn fetch_random(client: &CocktailDbClient) -> Result<Cocktail> {
    match client.random_cocktail().await? {
        Some(cocktail) => Ok(cocktail),
        None => bail!("Catalog returned no random cocktail"),
    }
}

fn print_cocktail(vocabulary: &Vocabulary, cocktail: &Cocktail) {
    println!("{} (#{})", cocktail.name, cocktail.id);
    if let Some(category) = &cocktail.category {
        println!("Category:   {}", vocabulary.translate_category(category));
    }
    if let Some(glass) = &cocktail.glass {
        println!("Glass:      {}", vocabulary.translate_glass(glass));
    }
    println!(
        "Alcoholic:  {}",
        if cocktail.is_alcoholic() { "yes" } else { "no" }
    );
    println!("Difficulty: {}", cocktail.difficulty().as_str());

    println!("\nIngredients:");
    for (ingredient, measure) in cocktail.ingredients_with_measures() {
        let display = vocabulary.translate_ingredient(ingredient);
        if measure.is_empty() {
            println!("  - {}", display);
        } else {
            println!("  - {} {}", measure, display);
        }
    }

    if let Some(instructions) = &cocktail.instructions {
        println!("\n{}", instructions);
    }
    if let Some(thumbnail) = &cocktail.thumbnail {
        println!("\n{}", thumbnail);
    }
}
