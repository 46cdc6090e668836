use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::context::AppContext;
use commands::discover::DiscoverArgs;
use commands::search::SearchArgs;
use commands::{auth, browse, clear, collections, config, details, discover, history, search, theme};
use movie_explorer_config::{Config, PathManager};
use movie_explorer_models::{SortBy, ThemeMode, TimeWindow};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "movie-explorer")]
#[command(about = "Movie Explorer - Browse, search and collect movies from TMDB")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show trending, popular and upcoming movies
    Home {
        /// Movies to show per row
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List one page of a movie category
    #[command(long_about = "List one page of a fixed movie category: popular, top_rated, upcoming or now_playing. Unknown categories fall back to popular.")]
    List {
        /// Category name
        #[arg(default_value = "popular")]
        category: String,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show trending movies
    Trending {
        /// Time window: day or week
        #[arg(long, default_value = "week")]
        window: TimeWindow,
    },
    /// Show details for one movie
    Details {
        /// TMDB movie id
        id: u64,

        /// Also load cast, trailer, similar movies, recommendations and collection
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Search movies by title or with advanced filters
    #[command(long_about = "Search movies by title. Queries starting with a filter prefix are turned into filtered discovery instead, e.g. 'genre:Action year:1999', 'rating:8', 'after:2010 before:2015'.")]
    Search {
        /// Search text or advanced query
        query: String,

        /// Number of result pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Retry a failed first page this many times
        #[arg(long, default_value_t = 0)]
        retries: u32,

        /// Do not record this search in the history
        #[arg(long, action = ArgAction::SetTrue)]
        no_history: bool,
    },
    /// Browse movies with explicit filters
    Discover(DiscoverCommand),
    /// Sign in (local mock account)
    Login {
        #[arg(long)]
        email: Option<String>,

        /// Remember the email for the next sign-in
        #[arg(long, action = ArgAction::SetTrue)]
        remember: bool,
    },
    /// Create a local mock account
    Register {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show or update the signed-in profile
    Profile {
        #[command(subcommand)]
        cmd: Option<ProfileCommands>,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: CollectionCommands,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        cmd: FavoriteCommands,
    },
    /// Show or clear recent searches
    History {
        #[command(subcommand)]
        cmd: HistoryCommands,
    },
    /// Show or change the theme mode
    Theme {
        #[command(subcommand)]
        cmd: Option<ThemeCommands>,
    },
    /// Configure the API token and settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Clear local data
    #[command(long_about = "Clear locally stored data or credentials. Use --storage to clear the session, watchlist, favorites, search history and theme, --credentials to remove the stored API token, or --all to clear everything.")]
    Clear {
        /// Clear all local data and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear session, collections, search history and theme
        #[arg(long, action = ArgAction::SetTrue)]
        storage: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Args)]
struct DiscoverCommand {
    /// Genre id or name
    #[arg(long)]
    genre: Option<String>,

    /// Minimum average rating (0-10)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Maximum average rating (0-10)
    #[arg(long)]
    max_rating: Option<f64>,

    /// Release year
    #[arg(long)]
    year: Option<u32>,

    /// Original language (ISO 639-1, e.g. "ja")
    #[arg(long)]
    language: Option<String>,

    /// Sort order, e.g. popularity.desc or vote_average.desc
    #[arg(long)]
    sort: Option<SortBy>,

    #[arg(long, action = ArgAction::SetTrue)]
    include_adult: bool,

    /// Number of result pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// Retry a failed request this many times
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

#[derive(Subcommand)]
pub enum CollectionCommands {
    /// List saved movies
    List,
    /// Add a movie by TMDB id
    Add { id: u64 },
    /// Remove a movie by TMDB id
    Remove { id: u64 },
    /// Move a movie to the other collection (watchlist <-> favorites)
    Move { id: u64 },
    /// Remove every movie
    Clear,
}

#[derive(Subcommand)]
pub enum FavoriteCommands {
    #[command(flatten)]
    Common(CollectionCommands),
    /// Add the movie if missing, remove it otherwise
    Toggle { id: u64 },
    /// Count favorites per genre
    Stats,
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recent searches, most recent first
    List,
    /// Forget every recent search
    Clear,
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    Show,
    Toggle,
    Set { mode: ThemeMode },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Avatar image URL
        #[arg(long)]
        avatar: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the access token)
    Show {
        /// Show the access token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the TMDB API read access token
    SetToken {
        /// Token (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file without asking
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext::new(paths, config)?;

    let result = match cli.command {
        Commands::Home { limit } => browse::run_home(&ctx, limit, &output).await,
        Commands::List { category, page } => browse::run_list(&ctx, &category, page, &output).await,
        Commands::Trending { window } => browse::run_trending(&ctx, window, &output).await,
        Commands::Details { id, full } => details::run_details(&ctx, id, full, &output).await,
        Commands::Search {
            query,
            pages,
            retries,
            no_history,
        } => {
            let args = SearchArgs {
                query,
                pages,
                retries,
                record_history: !no_history,
            };
            search::run_search(&ctx, args, &output).await
        }
        Commands::Discover(cmd) => {
            let args = DiscoverArgs {
                genre: cmd.genre,
                min_rating: cmd.min_rating,
                max_rating: cmd.max_rating,
                year: cmd.year,
                language: cmd.language,
                sort: cmd.sort,
                include_adult: cmd.include_adult,
                pages: cmd.pages,
                retries: cmd.retries,
            };
            discover::run_discover(&ctx, args, &output).await
        }
        Commands::Login { email, remember } => auth::run_login(&ctx, email, remember, &output).await,
        Commands::Register { name, email } => auth::run_register(&ctx, name, email, &output).await,
        Commands::Logout => auth::run_logout(&ctx, &output).await,
        Commands::Profile { cmd } => auth::run_profile(&ctx, cmd, &output).await,
        Commands::Watchlist { cmd } => collections::run_watchlist(&ctx, cmd, &output).await,
        Commands::Favorites { cmd } => collections::run_favorites(&ctx, cmd, &output).await,
        Commands::History { cmd } => history::run_history(&ctx, cmd, &output).await,
        Commands::Theme { cmd } => theme::run_theme(&ctx, cmd, &output).await,
        Commands::Config { cmd } => config::run_config(&ctx, cmd, &output).await,
        Commands::Clear {
            all,
            storage,
            credentials,
        } => clear::run_clear(&ctx, all, storage, credentials, &output).await,
    };

    // Scripts reading JSON from stdout still get a structured error
    if let Err(e) = &result {
        if !output.is_human() {
            output.error(format!("{:#}", e));
        }
    }
    result
}
