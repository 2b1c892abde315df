use std::ffi::OsString;

use clap::Parser;

pub const USAGE: &str = "Usage: goenv [destination_folder]";

/// Command line surface: an optional destination folder and nothing else.
///
/// Clap's generated help and version flags are disabled so that every
/// non-scaffolding path prints the single usage line instead.
#[derive(Parser, Debug)]
#[command(
    name = "goenv",
    about = "Create or refresh a Go workspace",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[arg(short = 'h', long = "help")]
    pub help: bool,
    #[arg(value_name = "destination_folder")]
    pub destinations: Vec<String>,
}

/// What a single run of the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Usage,
    Create { destination: Option<String> },
}

impl Cli {
    pub fn invocation(self) -> Invocation {
        if self.help || self.destinations.len() > 1 {
            return Invocation::Usage;
        }
        Invocation::Create {
            destination: self.destinations.into_iter().next(),
        }
    }
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Invocation {
    parse_from(std::env::args_os())
}

pub fn parse_from<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli.invocation(),
        Err(err) => {
            tracing::debug!(error = %err, "argument parsing failed; falling back to usage");
            Invocation::Usage
        }
    }
}
