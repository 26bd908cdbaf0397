//! Command implementations for the emap CLI.
//!
//! Provides subcommands to print the initial application state for a given
//! environment and to replay a log of dispatched actions.

use clap::Subcommand;

pub mod environment;
pub mod replay;

#[derive(Subcommand)]
pub enum Command {
    /// Print the initial root state for an environment
    Init {
        /// JSON file describing the environment (user agent, cookies, globals)
        #[arg(short = 'e', long)]
        env: Option<String>,
    },

    /// Replay a JSON-lines action log through the reducers
    Replay {
        /// Path to the action log, one JSON action per line ("-" for stdin)
        #[arg(short = 'a', long)]
        actions: String,

        /// JSON file describing the environment the session starts in
        #[arg(short = 'e', long)]
        env: Option<String>,

        /// Only print the final state
        #[arg(long)]
        final_only: bool,

        /// Report rejected actions and continue instead of stopping
        #[arg(long)]
        keep_going: bool,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Init { env } => {
            let probe = environment::load_probe(env.as_deref())?;
            replay::print_initial(&probe)
        }
        Command::Replay {
            actions,
            env,
            final_only,
            keep_going,
        } => {
            let probe = environment::load_probe(env.as_deref())?;
            let options = replay::ReplayOptions {
                final_only,
                keep_going,
            };
            replay::run_replay(&actions, &probe, options)
        }
    }
}
