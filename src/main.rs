mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "unisync")]
#[command(about = "Turn a university timetable page into weekly calendar events")]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a timetable page and print the classes found
    Parse {
        /// Timetable HTML file, or "-" for stdin
        html: PathBuf,

        /// Institution identifier (zcas, unza, cbu, unilus)
        #[arg(short, long)]
        institution: Option<String>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare a timetable page against a remote calendar snapshot
    Plan {
        /// Timetable HTML file, or "-" for stdin
        html: PathBuf,

        /// Remote calendar event list (JSON)
        #[arg(short, long)]
        remote: PathBuf,

        /// Institution identifier (zcas, unza, cbu, unilus)
        #[arg(short, long)]
        institution: Option<String>,

        /// Timezone written on created and updated events
        #[arg(long)]
        timezone: Option<String>,

        /// Print the executable plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and current settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Parse {
            html,
            institution,
            json,
        } => commands::parse::run(&html, institution.as_deref(), json),
        Commands::Plan {
            html,
            remote,
            institution,
            timezone,
            json,
        } => commands::plan::run(
            &html,
            &remote,
            institution.as_deref(),
            timezone.as_deref(),
            json,
        ),
        Commands::Config => commands::config::run(),
    }
}
