//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use lectern_core::api::ApiClient;
use lectern_core::config::Config;
use lectern_core::session::SessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(version)]
#[command(about = "Client for a personal digital-library service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Clear the stored session token
    Logout,

    /// Show or update the current user's profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Browse and manage books
    Books {
        #[command(subcommand)]
        command: BookCommands,
    },

    /// List authors (reference data)
    Authors,

    /// List categories (reference data)
    Categories,

    /// Render the first page of a PDF document to a PNG surface
    View {
        /// Document locator: an http(s) URL, a local path, or a viewer URL
        /// carrying a `file` query parameter
        locator: String,

        /// Output file for the rendered surface
        #[arg(long, default_value = "page.png")]
        out: String,

        /// Downscale the surface to at most this width
        #[arg(long, value_name = "PIXELS")]
        max_width: Option<u32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ProfileCommands {
    /// Show the authenticated user's profile
    Show,
    /// Update profile fields (unset fields are left unchanged)
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Profile image URL
        #[arg(long)]
        image: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum BookCommands {
    /// List the full shared catalog
    List,
    /// List only the books you uploaded
    Mine,
    /// Upload a new book (metadata + PDF file)
    Add {
        #[arg(long)]
        title: String,
        /// Author id (see `lectern authors`)
        #[arg(long)]
        author: String,
        /// Category id (see `lectern categories`)
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Cover image URL
        #[arg(long, default_value = "")]
        image: String,
        /// Path to the PDF file
        #[arg(long)]
        file: String,
    },
    /// Edit a book's metadata, optionally replacing the PDF
    Edit {
        #[arg(value_name = "BOOK_ID")]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Cover image URL
        #[arg(long)]
        image: Option<String>,
        /// Path to a replacement PDF file
        #[arg(long)]
        file: Option<String>,
    },
    /// Delete a book you own
    Rm {
        #[arg(value_name = "BOOK_ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Config subcommands need no API client or session.
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    // The viewer is independent of the session and the library API.
    if let Commands::View {
        locator,
        out,
        max_width,
    } = &cli.command
    {
        return commands::view::render(locator, out, *max_width).await;
    }

    let config = Config::load().context("load config")?;
    let api = ApiClient::new(&config).context("create API client")?;
    let mut store = SessionStore::open().context("open session store")?;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&api, username, email, password).await,
        Commands::Login { email, password } => {
            commands::auth::login(&api, &mut store, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&api, &mut store),
        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::profile::show(&api, &store).await,
            ProfileCommands::Update {
                username,
                email,
                image,
            } => commands::profile::update(&api, &store, username, email, image).await,
        },
        Commands::Books { command } => match command {
            BookCommands::List => commands::books::list(&api).await,
            BookCommands::Mine => commands::books::mine(&api, &store).await,
            BookCommands::Add {
                title,
                author,
                category,
                description,
                image,
                file,
            } => {
                let args = commands::books::AddArgs {
                    title,
                    author_id: author,
                    category_id: category,
                    description,
                    image_url: image,
                    file,
                };
                commands::books::add(&api, &store, args).await
            }
            BookCommands::Edit {
                id,
                title,
                description,
                image,
                file,
            } => commands::books::edit(&api, &store, &id, title, description, image, file).await,
            BookCommands::Rm { id, yes } => commands::books::rm(&api, &store, &id, yes).await,
        },
        Commands::Authors => commands::reference::authors(&api).await,
        Commands::Categories => commands::reference::categories(&api).await,
        Commands::View { .. } | Commands::Config { .. } => unreachable!("handled above"),
    }
}
