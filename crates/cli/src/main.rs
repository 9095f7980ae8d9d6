use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use domain::{AnalysisContext, Domain, DomainPreferences, PastLikings, StressContext};
use server::{RecommendationOrchestrator, ServiceConfig};
use std::time::Instant;
use tracing::info;

/// Wellness Recs - stress-aware recommendations from the command line
#[derive(Parser)]
#[command(name = "wellness-recs")]
#[command(about = "Stress-aware movie, book, music and exercise recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prompt that would be sent to the model, without calling it
    Prompt {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Fetch live recommendations
    Recommend {
        #[command(flatten)]
        request: RequestArgs,

        #[command(flatten)]
        service: ServiceConfig,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Movies,
    Books,
    Music,
    Exercises,
    /// All four domains at once
    All,
}

impl Target {
    fn domain(self) -> Option<Domain> {
        match self {
            Target::Movies => Some(Domain::Movies),
            Target::Books => Some(Domain::Books),
            Target::Music => Some(Domain::Music),
            Target::Exercises => Some(Domain::Exercises),
            Target::All => None,
        }
    }
}

#[derive(clap::Args)]
struct RequestArgs {
    /// Which domain to recommend for
    #[arg(long, value_enum, default_value = "all")]
    domain: Target,

    /// Percentage of diary entries that were stressed (0-100)
    #[arg(long)]
    stress: f64,

    /// Favourite movie (repeatable)
    #[arg(long = "favorite-movie")]
    favorite_movies: Vec<String>,

    /// Favourite book (repeatable)
    #[arg(long = "favorite-book")]
    favorite_books: Vec<String>,

    /// Favourite song (repeatable)
    #[arg(long = "favorite-song")]
    favorite_songs: Vec<String>,

    /// Favourite exercise (repeatable)
    #[arg(long = "favorite-exercise")]
    favorite_exercises: Vec<String>,
}

impl RequestArgs {
    fn stress_context(&self) -> Result<StressContext> {
        StressContext::new(self.stress).context("Invalid --stress value")
    }

    /// `None` when no favourite was given at all
    fn past_likings(&self) -> Option<PastLikings> {
        let non_empty = |list: &Vec<String>| (!list.is_empty()).then(|| list.clone());
        let likings = PastLikings {
            favorite_movies: non_empty(&self.favorite_movies),
            favorite_books: non_empty(&self.favorite_books),
            favorite_songs: non_empty(&self.favorite_songs),
            favorite_exercises: non_empty(&self.favorite_exercises),
        };
        (likings != PastLikings::default()).then_some(likings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prompt { request } => handle_prompt(&request)?,
        Commands::Recommend { request, service } => handle_recommend(&request, &service).await?,
    }

    Ok(())
}

/// Handle the 'prompt' command
fn handle_prompt(request: &RequestArgs) -> Result<()> {
    let stress = request.stress_context()?;
    let past_likings = request.past_likings();

    let domains = match request.domain.domain() {
        Some(domain) => vec![domain],
        None => Domain::ALL.to_vec(),
    };

    for domain in domains {
        let prefs = DomainPreferences::extract(past_likings.as_ref(), domain);
        println!("{}", format!("── {} prompt ──", domain.label()).bold().blue());
        println!("{}\n", prompts::prompt_for(domain, &stress, &prefs));
    }
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(request: &RequestArgs, service: &ServiceConfig) -> Result<()> {
    let stress = request.stress_context()?;
    let past_likings = request.past_likings();
    let orchestrator = service.build_orchestrator()?;

    println!(
        "{} {}% stressed entries, {} mode",
        "•".cyan(),
        stress.percentage(),
        stress.mode()
    );

    let start = Instant::now();
    let context = match request.domain.domain() {
        Some(domain) => recommend_one(&orchestrator, domain, &stress, past_likings.as_ref()).await?,
        None => {
            let all = orchestrator.recommend_all(&stress, past_likings.as_ref()).await?;
            print_movies(&all.movies);
            print_books(&all.books);
            print_songs(&all.songs);
            print_exercises(&all.exercises);
            AnalysisContext::combined(&stress, all.flags)
        }
    };
    info!("Recommendations ready in {:?}", start.elapsed());

    println!(
        "\n{} Done in {:?}",
        "✓".green(),
        start.elapsed()
    );
    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}

async fn recommend_one(
    orchestrator: &RecommendationOrchestrator,
    domain: Domain,
    stress: &StressContext,
    past_likings: Option<&PastLikings>,
) -> Result<AnalysisContext> {
    let personalized = match domain {
        Domain::Movies => {
            let result = orchestrator.recommend_movies(stress, past_likings).await?;
            print_movies(&result.items);
            result.personalized
        }
        Domain::Books => {
            let result = orchestrator.recommend_books(stress, past_likings).await?;
            print_books(&result.items);
            result.personalized
        }
        Domain::Music => {
            let result = orchestrator.recommend_music(stress, past_likings).await?;
            print_songs(&result.items);
            result.personalized
        }
        Domain::Exercises => {
            let result = orchestrator.recommend_exercises(stress, past_likings).await?;
            print_exercises(&result.items);
            result.personalized
        }
    };
    Ok(AnalysisContext::single(stress, personalized))
}

fn print_movies(movies: &[domain::Movie]) {
    print!("{}", "Movies:\n".bold().blue());
    for (rank, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} ({}) - Rating: {}",
            (rank + 1).to_string().green(),
            movie.title,
            movie.release_date.as_deref().unwrap_or("????"),
            movie.rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "n/a".to_string())
        );
    }
}

fn print_books(books: &[domain::Book]) {
    print!("{}", "Books:\n".bold().blue());
    for (rank, book) in books.iter().enumerate() {
        println!(
            "{}. {} by {}",
            (rank + 1).to_string().green(),
            book.title,
            book.authors.join(", ")
        );
    }
}

fn print_songs(songs: &[domain::Song]) {
    print!("{}", "Music:\n".bold().blue());
    for (rank, song) in songs.iter().enumerate() {
        println!(
            "{}. {} - {}",
            (rank + 1).to_string().green(),
            song.title,
            song.artist
        );
    }
}

fn print_exercises(exercises: &[domain::Exercise]) {
    print!("{}", "Exercises:\n".bold().blue());
    for (rank, exercise) in exercises.iter().enumerate() {
        println!(
            "{}. {} [{}] {}",
            (rank + 1).to_string().green(),
            exercise.name,
            exercise.duration.as_deref().unwrap_or("any length"),
            exercise.description
        );
        if !exercise.benefits.is_empty() {
            println!("   Benefits: {}", exercise.benefits.join(", "));
        }
    }
}
