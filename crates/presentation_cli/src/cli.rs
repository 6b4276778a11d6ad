//! Command-line definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use domain::SpeechProviderKind;

/// Default server URL for remote commands
pub const DEFAULT_URL: &str = "http://localhost:8001";

/// Voice relay CLI
#[derive(Debug, Parser)]
#[command(name = "voice-relay-cli")]
#[command(author, version, about = "Voice relay operator CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "VOICE_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a running server
    Status {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// List provider voices and the sender mapping in use
    Voices {
        /// Only this provider
        #[arg(short, long, value_enum)]
        provider: Option<ProviderArg>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Classify text and show the routing decision without synthesizing
    Classify {
        /// Text to classify
        text: String,

        /// Sender display name
        #[arg(short, long, default_value = "You")]
        sender: String,
    },

    /// Synthesize text locally and write the MP3 to a file
    Speak {
        /// Text to speak
        text: String,

        /// Sender display name
        #[arg(short, long, default_value = "You")]
        sender: String,

        /// Output file
        #[arg(short, long, default_value = "output.mp3")]
        output: PathBuf,
    },

    /// Request audio from a running server and write it to a file
    Generate {
        /// Text to speak
        text: String,

        /// Sender display name
        #[arg(short, long, default_value = "You")]
        sender: String,

        /// Output file
        #[arg(short, long, default_value = "output.mp3")]
        output: PathBuf,

        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },
}

/// Speech provider selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Elevenlabs,
    Cartesia,
}

impl From<ProviderArg> for SpeechProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Elevenlabs => Self::ElevenLabs,
            ProviderArg::Cartesia => Self::Cartesia,
        }
    }
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_defaults_to_local_server() {
        match parse(&["voice-relay-cli", "status"]).command {
            Commands::Status { url } => assert_eq!(url, DEFAULT_URL),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn speak_parses_sender_and_output() {
        let cli = parse(&[
            "voice-relay-cli",
            "-vv",
            "speak",
            "Sahi hai",
            "--sender",
            "Rahul",
            "-o",
            "rahul.mp3",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Speak {
                text,
                sender,
                output,
            } => {
                assert_eq!(text, "Sahi hai");
                assert_eq!(sender, "Rahul");
                assert_eq!(output, PathBuf::from("rahul.mp3"));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn voices_provider_filter() {
        match parse(&["voice-relay-cli", "voices", "--provider", "cartesia", "--json"]).command {
            Commands::Voices { provider, json } => {
                assert_eq!(provider.map(SpeechProviderKind::from), Some(SpeechProviderKind::Cartesia));
                assert!(json);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["voice-relay-cli", "voices", "--provider", "polly"]).is_err());
    }

    #[test]
    fn classify_requires_text() {
        assert!(Cli::try_parse_from(["voice-relay-cli", "classify"]).is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        assert_eq!(
            endpoint_url("http://localhost:8001/", "/health"),
            "http://localhost:8001/health"
        );
    }
}
