//! CLI command definitions for the `persona` binary.
//!
//! Every command except `serve` and `completions` is a client of a running
//! `persona serve`, rendering the interviewer card in the terminal.

pub mod catalog;
pub mod interviewer;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Manage AI interviewer personas and their voice agents.
#[derive(Parser)]
#[command(name = "persona", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of a running `persona serve` (overrides `[dashboard] server_url`).
    #[arg(long, global = true, env = "PERSONA_SERVER_URL")]
    pub server: Option<String>,

    /// Also export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List interviewers.
    #[command(alias = "ls")]
    List,

    /// Show the details view of an interviewer.
    Show {
        /// Interviewer id.
        id: i64,
    },

    /// Create an interviewer.
    Create(CreateArgs),

    /// Edit an interviewer; prompts for each field when no flags are given.
    Edit(EditArgs),

    /// Delete an interviewer and its voice agent.
    #[command(alias = "rm")]
    Delete {
        /// Interviewer id.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// List the avatar gallery.
    Avatars,

    /// List the available voices.
    Voices,

    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides `[server] port`).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides `[server] host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    /// Display name (prompted when omitted).
    #[arg(long)]
    pub name: Option<String>,

    /// Remote voice agent this persona drives.
    #[arg(long)]
    pub agent_id: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Avatar id from `persona avatars`.
    #[arg(long)]
    pub avatar: Option<u32>,

    /// Voice reference from `persona voices`.
    #[arg(long)]
    pub audio: Option<String>,

    /// Empathy, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider, default_value_t = 0.5)]
    pub empathy: f64,

    /// Rapport, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider, default_value_t = 0.5)]
    pub rapport: f64,

    /// Exploration, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider, default_value_t = 0.5)]
    pub exploration: f64,

    /// Speed, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider, default_value_t = 0.5)]
    pub speed: f64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Interviewer id.
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Empathy, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider)]
    pub empathy: Option<f64>,

    /// Rapport, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider)]
    pub rapport: Option<f64>,

    /// Exploration, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider)]
    pub exploration: Option<f64>,

    /// Speed, 0.0 to 1.0.
    #[arg(long, value_parser = parse_slider)]
    pub speed: Option<f64>,

    /// Avatar id from `persona avatars`.
    #[arg(long)]
    pub avatar: Option<u32>,

    /// Voice reference from `persona voices`.
    #[arg(long)]
    pub audio: Option<String>,

    /// Play the selected voice before saving.
    #[arg(long)]
    pub preview: bool,
}

impl EditArgs {
    /// True when at least one field flag was given.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.empathy.is_some()
            || self.rapport.is_some()
            || self.exploration.is_some()
            || self.speed.is_some()
            || self.avatar.is_some()
            || self.audio.is_some()
    }
}

/// Parse a personality slider value in `[0, 1]`.
pub fn parse_slider(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{value} is outside 0.0..=1.0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slider() {
        assert_eq!(parse_slider("0.7"), Ok(0.7));
        assert_eq!(parse_slider(" 1 "), Ok(1.0));
        assert!(parse_slider("1.2").is_err());
        assert!(parse_slider("-0.1").is_err());
        assert!(parse_slider("loud").is_err());
    }

    #[test]
    fn test_cli_parses_edit_flags() {
        let cli = Cli::try_parse_from([
            "persona", "edit", "42", "--name", "Nova", "--audio", "/audio/Bob.wav", "--preview",
        ])
        .unwrap();

        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.id, 42);
        assert_eq!(args.name.as_deref(), Some("Nova"));
        assert!(args.preview);
        assert!(args.has_changes());
    }

    #[test]
    fn test_cli_rejects_out_of_range_slider() {
        assert!(Cli::try_parse_from(["persona", "edit", "1", "--empathy", "3"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
