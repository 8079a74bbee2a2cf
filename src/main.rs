use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use jira_timeline::commands;
use jira_timeline::commands::convert::ConvertOptions;
use jira_timeline::hierarchy::DEFAULT_ROOT;
use jira_timeline::logging;
use jira_timeline::time::{TimeNormalizer, TimeZoneMode};

#[derive(Parser)]
#[command(name = "jira-timeline")]
#[command(about = "Turn a Jira CSV export into an edit log and an epic caption log")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log records as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Jira CSV export to read
    #[arg(short, long, env = "JIRA_TIMELINE_INPUT", default_value = "Jira.csv")]
    input: PathBuf,

    /// First segment of every issue path
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: String,

    /// Interpret export times in the local time zone instead of UTC
    #[arg(long)]
    local_time: bool,
}

impl SourceArgs {
    fn zone(&self) -> TimeZoneMode {
        if self.local_time {
            TimeZoneMode::Local
        } else {
            TimeZoneMode::Utc
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the edit log and caption log
    Convert {
        #[command(flatten)]
        source: SourceArgs,

        /// Edit log destination
        #[arg(long, env = "JIRA_TIMELINE_EDIT_LOG", default_value = "jira1.txt")]
        edit_log: PathBuf,

        /// Caption log destination
        #[arg(long, env = "JIRA_TIMELINE_CAPTION_LOG", default_value = "caption.txt")]
        caption_log: PathBuf,
    },

    /// Dump decoded issues as JSON
    Issues {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how each column of the export is interpreted
    Headers {
        /// Jira CSV export to read
        #[arg(short, long, env = "JIRA_TIMELINE_INPUT", default_value = "Jira.csv")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Convert {
            source,
            edit_log,
            caption_log,
        } => {
            let zone = source.zone();
            commands::convert::run(&ConvertOptions {
                input: source.input,
                edit_log,
                caption_log,
                root: source.root,
                zone,
            })
        }

        Commands::Issues { source, output } => {
            let times = TimeNormalizer::new(source.zone());
            commands::issues::run(&source.input, &source.root, &times, output.as_deref())
        }

        Commands::Headers { input, json } => commands::headers::run(&input, json),
    }
}
