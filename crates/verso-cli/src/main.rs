use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use verso_core::text::TokenizerKind;
use verso_etl::Config;

mod commands;
mod logging;

#[derive(Debug, Parser)]
#[command(name = "verso", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the library file (default: ~/.local/share/verso/library.json)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Path to the style dictionary, .json or .toml (default: ~/.config/verso/styles.json)
    #[arg(long, global = true)]
    styles: Option<PathBuf>,

    /// Word segmentation to use instead of the configured one
    #[arg(long, global = true, value_parser = parse_tokenizer)]
    tokenizer: Option<TokenizerKind>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Import lyric files (.lrc, .txt, .json) or directories of them
    ///
    /// Directories are walked recursively. Every record is validated on its
    /// own: a malformed record is reported and skipped while the rest of the
    /// batch is imported.
    Import {
        /// Files or directories to import
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report what would be imported without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Export the library as JSON or TXT
    Export {
        /// Destination file
        path: PathBuf,

        /// Output format (default: from the file extension)
        #[arg(long, value_parser = ["json", "txt"])]
        format: Option<String>,
    },
    /// List songs in the library
    List {
        /// Case-insensitive match on artist, title, or lyric
        #[arg(long)]
        search: Option<String>,
    },
    /// Remove a song
    Remove {
        /// Song id (or unique id prefix)
        id: String,
    },
    /// Edit a song's fields
    Edit {
        /// Song id (or unique id prefix)
        id: String,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Read the new lyric from this file
        #[arg(long)]
        lyric_file: Option<PathBuf>,
    },
    /// Classify a song (or free text) against the style dictionary
    Classify {
        /// Song id (or unique id prefix)
        id: Option<String>,

        /// Classify this text instead of a song
        #[arg(long, conflicts_with = "id")]
        text: Option<String>,

        /// Classify every song and print its primary style
        #[arg(long, conflicts_with_all = ["id", "text"])]
        all: bool,

        #[arg(long)]
        json: bool,
    },
    /// Extract TF-IDF keywords
    ///
    /// Keywords are weighed across the given songs (or the whole library),
    /// so terms shared by every song rank lower than distinctive ones.
    Keywords {
        /// Song ids (default: every song)
        ids: Vec<String>,

        #[arg(short = 'k', long, default_value_t = 10)]
        top_k: usize,
    },
    /// Most frequent words of a song
    Frequency {
        /// Song id (or unique id prefix)
        id: String,

        #[arg(short = 'n', long, default_value_t = 20)]
        top: usize,
    },
    /// Songs with lyrics most like a given song
    Similar {
        /// Song id (or unique id prefix)
        id: String,

        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Boost candidates that share the song's primary style
        #[arg(long)]
        style: bool,
    },
    /// Recommend songs for a free-text request
    ///
    /// The request may name a style from the dictionary and an artist as
    /// "X的歌"; whatever remains is matched against lyrics.
    Recommend {
        /// The request, e.g. "周杰伦的歌 中国风 雨"
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Pick random songs
    Pick {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Only songs by these artists
        #[arg(long = "artist")]
        artists: Vec<String>,

        /// Only songs with these primary styles
        #[arg(long = "style")]
        styles: Vec<String>,

        /// Seed for a repeatable pick
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Per-artist style and keyword statistics
    Stats {
        /// Only this artist
        #[arg(long)]
        artist: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Count songs per primary style
    Census,
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with commented defaults
    Init,
    /// Print an example config file
    Example,
}

fn parse_tokenizer(s: &str) -> Result<TokenizerKind, String> {
    match s {
        "jieba" => Ok(TokenizerKind::Jieba),
        "unicode" => Ok(TokenizerKind::Unicode),
        other => Err(format!("unknown tokenizer {other:?} (expected jieba or unicode)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.apply_overrides(cli.library, cli.styles);
    if let Some(tokenizer) = cli.tokenizer {
        config.tokenizer = tokenizer;
    }

    logging::init(&config.logging, cli.verbose)?;

    let session = commands::Session::new(config);

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&session.config),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Init => commands::config::init_config(),
            ConfigAction::Example => commands::config::show_example(),
        },
        Commands::Import { paths, dry_run } => commands::run_import(&session, &paths, dry_run),
        Commands::Export { path, format } => commands::run_export(&session, &path, format.as_deref()),
        Commands::List { search } => commands::library::list_songs(&session, search.as_deref()),
        Commands::Remove { id } => commands::library::remove_song(&session, &id),
        Commands::Edit {
            id,
            artist,
            title,
            lyric_file,
        } => commands::library::edit_song(&session, &id, artist, title, lyric_file.as_deref()),
        Commands::Classify {
            id,
            text,
            all,
            json,
        } => {
            let target = match (id, text, all) {
                (_, _, true) => commands::analyze::Target::All,
                (_, Some(text), _) => commands::analyze::Target::Text(text),
                (Some(id), None, false) => commands::analyze::Target::Song(id),
                (None, None, false) => anyhow::bail!("Give a song id, --text, or --all"),
            };
            commands::analyze::classify(&session, target, json)
        }
        Commands::Keywords { ids, top_k } => commands::analyze::keywords(&session, &ids, top_k),
        Commands::Frequency { id, top } => commands::analyze::frequency(&session, &id, top),
        Commands::Similar { id, count, style } => {
            commands::recommend::similar(&session, &id, count, style)
        }
        Commands::Recommend { query } => commands::recommend::recommend(&session, &query.join(" ")),
        Commands::Pick {
            count,
            artists,
            styles,
            seed,
        } => commands::recommend::pick(&session, count, artists, styles, seed),
        Commands::Stats { artist, json } => {
            commands::stats::show_stats(&session, artist.as_deref(), json)
        }
        Commands::Census => commands::stats::show_census(&session),
    }
}
