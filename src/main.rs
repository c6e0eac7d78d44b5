use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tidalplayer::{
    cli::{self, QueueAction},
    config, error, logging,
    types::{FavoriteKind, Order, OrderDirection, PageQuery},
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Handle favorite artists, albums, tracks, videos and playlists
    Favorites(FavoritesOptions),

    /// Handle the play queue
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Show cached collections and queue state
    Info,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle favorites")]
pub struct FavoritesOptions {
    /// Collection: artists, albums, tracks, videos or playlists
    pub kind: FavoriteKind,

    /// Search cached favorites by name or artist
    #[clap(long)]
    pub search: Option<String>,

    /// Subcommands under `favorites <kind>` (e.g., `update`)
    #[command(subcommand)]
    pub command: Option<FavoritesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// Fetch the collection from TIDAL and refresh the cache
    Update(FavoritesUpdateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct FavoritesUpdateOpts {
    /// Sort order, e.g. date, name, artist, release-date
    #[clap(long)]
    pub order: Option<Order>,

    /// Sort direction: asc or desc
    #[clap(long)]
    pub direction: Option<OrderDirection>,

    /// Items requested per page
    #[clap(long)]
    pub chunk_size: Option<usize>,

    /// Pages fetched at the same time
    #[clap(long)]
    pub concurrency: Option<usize>,

    /// Give up on a page after this many seconds
    #[clap(long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QueueCommand {
    /// Print the queue
    Show,
    /// Append a track
    Add { id: String },
    /// Queue a track after the current one
    Insert { id: String },
    /// Queue a track after the current one and play it
    Play { id: String },
    /// Jump to a position
    Position { index: usize },
    /// Play the next track
    Next,
    /// Play the previous track
    Previous,
    /// Remove all tracks
    Clear,
}

impl From<QueueCommand> for QueueAction {
    fn from(command: QueueCommand) -> Self {
        match command {
            QueueCommand::Show => QueueAction::Show,
            QueueCommand::Add { id } => QueueAction::Add(id),
            QueueCommand::Insert { id } => QueueAction::Insert(id),
            QueueCommand::Play { id } => QueueAction::Play(id),
            QueueCommand::Position { index } => QueueAction::Position(index),
            QueueCommand::Next => QueueAction::Next,
            QueueCommand::Previous => QueueAction::Previous,
            QueueCommand::Clear => QueueAction::Clear,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    if let Err(e) = logging::init_logging(&config::log_filter()) {
        error!("Cannot initialize logging. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Favorites(opt) => match opt.command {
            Some(FavoritesSubcommand::Update(u)) => {
                let base = match config::fetch_options() {
                    Ok(options) => options,
                    Err(e) => error!("Invalid pagination settings. Err: {}", e),
                };
                let options = utils::merge_fetch_options(base, u.chunk_size, u.concurrency, u.timeout);
                let query = PageQuery {
                    order: u.order,
                    direction: u.direction,
                };
                cli::update_favorites(opt.kind, query, options).await
            }
            None => cli::list_favorites(opt.kind, opt.search).await,
        },
        Command::Queue(command) => cli::queue(command.into()).await,
        Command::Info => cli::info().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
