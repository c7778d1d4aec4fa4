// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Commands:
// - pick (default): the full-screen landing page with the repo picker
// - list: print the starred-and-owned repos once and exit
// - open: open a github.com/<owner>/<repo> path in the browser
//
// Options like --user and --api-base are `global`, so they can be written
// before or after the subcommand.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::github::{DEFAULT_API_BASE, DEFAULT_USERNAME};

pub const DEFAULT_DISPLAY_NAME: &str = "Isaac S.Silva";
pub const DEFAULT_TAGLINE: &str = "FullStack Developer, focused on BackEnd";

#[derive(Parser, Debug)]
#[command(
    name = "repo-picker",
    version,
    about = "A terminal landing page with a github.com/<user>/<repo> picker",
    long_about = "repo-picker shows a small portfolio landing page in your terminal. \
                  Type `/` after the github.com/<user> path (or press ctrl+/) to pick \
                  one of the repositories the user owns and has starred."
)]
pub struct Cli {
    /// GitHub user whose repositories are listed
    #[arg(long, global = true, default_value = DEFAULT_USERNAME)]
    pub user: String,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file (the picker defaults to a file in the temp dir)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Leaving the subcommand out runs `pick`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    // The subcommand to run, with `pick` filled in when none was given
    pub fn command_or_pick(&self) -> Commands {
        self.command.clone().unwrap_or_else(Commands::default_pick)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the landing page with the interactive repository picker
    ///
    /// Example: repo-picker pick --name "Ada L." --user ada
    Pick {
        /// Name shown as the page title
        #[arg(long, default_value = DEFAULT_DISPLAY_NAME)]
        name: String,

        /// Line shown under the title
        #[arg(long, default_value = DEFAULT_TAGLINE)]
        tagline: String,

        /// Start with this text in the field, e.g. github.com/<user>/<repo>
        #[arg(long)]
        path: Option<String>,
    },

    /// Print the repositories the user owns and has starred
    ///
    /// Example: repo-picker list --json
    List {
        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Open a github.com/<owner>/<repo> path in the default browser
    ///
    /// Example: repo-picker open github.com/IsaacSSilva/Portfolio
    Open {
        /// Path as shown in the picker; the scheme is optional
        path: String,
    },
}

impl Commands {
    pub fn default_pick() -> Self {
        Commands::Pick {
            name: DEFAULT_DISPLAY_NAME.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            path: None,
        }
    }
}
