use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rinha-fetch")]
#[command(about = "Download the rinha-de-compiler test-case files")]
#[command(version)]
pub struct Cli {
    /// Defaults to `download` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every listed file into the output directory
    Download {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of concurrent fetch workers
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Print the remote file names without downloading them
    List,
}

impl Cli {
    /// The subcommand to run; no subcommand means a plain download.
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Download {
            output: None,
            workers: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_download() {
        let cli = Cli::parse_from(["rinha-fetch"]);
        assert!(matches!(
            cli.into_command(),
            Commands::Download { output: None, workers: None }
        ));
    }

    #[test]
    fn test_download_overrides() {
        let cli = Cli::parse_from(["rinha-fetch", "download", "-o", "out", "--workers", "4"]);
        match cli.into_command() {
            Commands::Download { output, workers } => {
                assert_eq!(output, Some(PathBuf::from("out")));
                assert_eq!(workers, Some(4));
            }
            Commands::List => panic!("expected download"),
        }
    }

    #[test]
    fn test_list_subcommand() {
        let cli = Cli::parse_from(["rinha-fetch", "list"]);
        assert!(matches!(cli.into_command(), Commands::List));
    }
}
