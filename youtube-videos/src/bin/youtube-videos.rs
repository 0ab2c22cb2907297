use clap::{Args, Parser, Subcommand, ValueEnum};
use eyre::Context;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_videos::key_store::DEFAULT_KEY_FILE;
use youtube_videos::{
    KeyStore, Order, RetrievalError, RetrievalOptions, SafeSearch, VideoDuration, VideoRecord,
    YouTubeClient,
};

#[derive(Parser)]
#[command(name = "youtube-videos")]
#[command(about = "List a YouTube channel's videos, or search videos by topic")]
#[command(version)]
#[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  youtube-videos key set AIza...                       Remember your API key
  youtube-videos channel @RickAstleyYT                 Newest uploads of a channel
  youtube-videos channel UCuAXFkgsw1L7xaCfnd5JJOw --order viewCount --limit 20
  youtube-videos search \"rust async\" --duration long   Long videos about a topic
  youtube-videos channel @RickAstleyYT --output links  One URL per line")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YouTube Data API v3 key (falls back to the stored key)
    #[arg(long, global = true, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Where `key set` stores the API key
    #[arg(long, global = true, env = "YOUTUBE_VIDEOS_KEY_FILE", default_value = DEFAULT_KEY_FILE)]
    key_file: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// More logging on stderr (repeat for more); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// List videos from a channel, given its URL, handle, name, or ID
    Channel {
        query: String,
        #[command(flatten)]
        filters: Filters,
    },
    /// Search all of YouTube for videos about a topic
    Search {
        query: String,
        #[command(flatten)]
        filters: Filters,
    },
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key for later runs
    Set { key: String },
    /// Print the stored API key
    Show,
    /// Delete the stored API key
    Forget,
}

#[derive(Args)]
struct Filters {
    /// Maximum number of videos to return
    #[arg(short, long, default_value_t = 300)]
    limit: usize,

    /// Result order: date, rating, relevance, title, viewCount
    #[arg(long)]
    order: Option<Order>,

    /// Video length: any, short (<4m), medium (4-20m), long (>20m)
    #[arg(long)]
    duration: Option<VideoDuration>,

    /// Restricted content filtering: moderate, none, strict
    #[arg(long)]
    safe_search: Option<SafeSearch>,
}

impl Filters {
    fn options(&self) -> RetrievalOptions {
        RetrievalOptions {
            order: self.order,
            video_duration: self.duration,
            safe_search: self.safe_search,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Title and URL of every video
    Text,
    /// A JSON array of `{title, url}` objects
    Json,
    /// Only the URLs, one per line
    Links,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let store = KeyStore::new(&cli.key_file);

    let (query, filters, is_channel) = match &cli.command {
        Command::Key { action } => return manage_key(&store, action).await,
        Command::Channel { query, filters } => (query, filters, true),
        Command::Search { query, filters } => (query, filters, false),
    };

    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None => store
            .load()
            .await
            .context("load stored API key")?
            .unwrap_or_default(),
    };

    let options = filters.options();
    let result = match YouTubeClient::new(api_key) {
        Ok(client) if is_channel => {
            client
                .fetch_channel_videos(query, filters.limit, &options)
                .await
        }
        Ok(client) => client.search_videos(query, filters.limit, &options).await,
        Err(e) => Err(e),
    };

    let videos = match result {
        Ok(videos) => videos,
        Err(e) => {
            eprintln!("Error: {}", failure_message(&e, is_channel));
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    render(&mut stdout, &videos, cli.output, is_channel).context("write results")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}

async fn manage_key(store: &KeyStore, action: &KeyAction) -> eyre::Result<()> {
    match action {
        KeyAction::Set { key } => {
            store.save(key).await.context("store API key")?;
            eprintln!("API key stored in {}", store.path().display());
        }
        KeyAction::Show => match store.load().await.context("load stored API key")? {
            Some(key) => println!("{key}"),
            None => eprintln!("No API key stored in {}", store.path().display()),
        },
        KeyAction::Forget => {
            store.forget().await.context("remove stored API key")?;
            eprintln!("API key removed");
        }
    }
    Ok(())
}

/// Prefixes retrieval failures with what was being attempted. Input problems are shown as-is.
fn failure_message(error: &RetrievalError, is_channel: bool) -> String {
    match error {
        RetrievalError::MissingCredential | RetrievalError::InvalidInput(_) => error.to_string(),
        _ if is_channel => format!("Failed to fetch videos. {error}"),
        _ => format!("Failed to search videos. {error}"),
    }
}

fn render(
    out: &mut impl Write,
    videos: &[VideoRecord],
    format: OutputFormat,
    is_channel: bool,
) -> eyre::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, videos).context("serialize videos")?;
            writeln!(out)?;
        }
        OutputFormat::Links => {
            for video in videos {
                writeln!(out, "{}", video.url())?;
            }
        }
        OutputFormat::Text if videos.is_empty() => {
            if is_channel {
                writeln!(
                    out,
                    "No public videos found for this channel matching the criteria, \
                    or the channel is invalid."
                )?;
            } else {
                writeln!(out, "No videos found for this topic with the selected filters.")?;
            }
        }
        OutputFormat::Text => {
            writeln!(out, "Found {} video(s):\n", videos.len())?;
            for (i, video) in videos.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, video.title())?;
                writeln!(out, "   {}", video.url())?;
            }
        }
    }
    Ok(())
}
