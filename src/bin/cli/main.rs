mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lexiloop-cli", about = "Spaced-repetition vocabulary trainer", version)]
struct Cli {
    /// Path to a lexiloop.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show counts per learning status
    Stats,

    /// List words to study now: due reviews, then new words
    Due {
        /// Maximum words (default: reviews_per_session from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List words that have never been studied
    New {
        /// Maximum words (default: new_words_per_session from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List all words with their status
    List {
        /// Case-insensitive text filter
        #[arg(long)]
        search: Option<String>,
        /// Sort Z to A
        #[arg(long)]
        desc: bool,
    },

    /// Show a word's details and progress
    Show {
        /// Word id or text
        word: String,
    },

    /// Start learning a new word
    Learn {
        /// Word id or text
        word: String,
    },

    /// Record a review answer for a word being learned
    Review {
        /// Word id or text
        word: String,
        #[command(flatten)]
        answer: Answer,
    },

    /// Review a word, starting it first if it is new
    Practice {
        /// Word id or text
        word: String,
        #[command(flatten)]
        answer: Answer,
    },

    /// Explain a word in your own words and have it judged
    Explain {
        /// Word id or text
        word: String,
        /// Your explanation or example sentence (use "-" to read from stdin)
        text: String,
    },

    /// Cache a definition and example for a word
    Define {
        /// Word id or text
        word: String,
        /// Definition text
        #[arg(long, requires = "example", conflicts_with = "json")]
        definition: Option<String>,
        /// Example sentence
        #[arg(long, requires = "definition")]
        example: Option<String>,
        /// JSON reply from a definition service (use "-" for stdin)
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Forget all progress on a word
    Reset {
        /// Word id or text
        word: String,
    },

    /// Add words from a text file, one per line
    Import {
        /// File to read (use "-" for stdin)
        file: PathBuf,

        /// JSON reply keyed by word with a definition and example for each
        #[arg(long)]
        details: Option<PathBuf>,
    },
}

#[derive(clap::Args, Clone, Copy)]
#[group(required = true, multiple = false)]
struct Answer {
    /// You remembered the word
    #[arg(long)]
    remembered: bool,
    /// You forgot the word
    #[arg(long)]
    forgot: bool,
}

impl Answer {
    fn remembered(self) -> bool {
        self.remembered && !self.forgot
    }
}

/// Read all of stdin
fn read_stdin() -> std::io::Result<String> {
    let mut buf = String::new();
    std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
    Ok(buf)
}

/// Read a file, or stdin when the path is "-"
fn read_input(path: &std::path::Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        read_stdin()
    } else {
        std::fs::read_to_string(path)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Due { limit } => {
            commands::due::run_due(&app, limit, &cli.format, use_color)?;
        }
        Command::New { limit } => {
            commands::due::run_new(&app, limit, &cli.format, use_color)?;
        }
        Command::List { search, desc } => {
            commands::list::run(&app, search.as_deref(), desc, &cli.format, use_color)?;
        }
        Command::Show { word } => {
            commands::show::run(&app, &word, &cli.format, use_color)?;
        }
        Command::Learn { word } => {
            commands::review::run_learn(&app, &word, &cli.format, use_color)?;
            app.save()?;
        }
        Command::Review { word, answer } => {
            commands::review::run_review(&app, &word, answer.remembered(), false, &cli.format, use_color)?;
            app.save()?;
        }
        Command::Practice { word, answer } => {
            commands::review::run_review(&app, &word, answer.remembered(), true, &cli.format, use_color)?;
            app.save()?;
        }
        Command::Explain { word, text } => {
            let text = if text == "-" { read_stdin()? } else { text };
            commands::explain::run(&app, &word, &text, &cli.format, use_color)?;
            app.save()?;
        }
        Command::Define { word, definition, example, json } => {
            let source = match (definition, example, json) {
                (Some(definition), Some(example), None) => {
                    commands::define::DetailsSource::Inline { definition, example }
                }
                (None, None, Some(path)) => commands::define::DetailsSource::Json(read_input(&path)?),
                _ => anyhow::bail!("Pass either --definition with --example, or --json"),
            };
            commands::define::run(&mut app, &word, source, &cli.format)?;
            app.save()?;
        }
        Command::Reset { word } => {
            commands::review::run_reset(&app, &word, &cli.format)?;
            app.save()?;
        }
        Command::Import { file, details } => {
            let content = read_input(&file)?;
            let details = details.map(std::fs::read_to_string).transpose()?;
            commands::import::run(&mut app, &content, details.as_deref(), &cli.format)?;
            app.save()?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}
