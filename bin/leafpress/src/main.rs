//! Leafpress CLI
//!
//! Validate, preview and build sites of structured long-form articles.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use leafpress::cmd::show::OutputFormat;

/// Command-line interface for leafpress.
#[derive(Parser)]
#[command(
    name = "leafpress",
    version,
    about = "Structured article content checker and static site builder"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include draft articles
        #[arg(long)]
        drafts: bool,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Render a single article by slug
    Show {
        /// Article slug
        slug: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Resolve draft articles too
        #[arg(long)]
        drafts: bool,
    },
    /// Create a new draft article
    New {
        /// Slug of the new article (e.g., vat-registration)
        slug: String,
        /// Article title (defaults to the slug in words)
        #[arg(short, long)]
        title: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    leafpress::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, drafts } => {
            leafpress::cmd::build::run(&cli.config, output.as_deref(), drafts)?;
        }
        Commands::Check { strict } => {
            leafpress::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Show {
            slug,
            format,
            drafts,
        } => {
            leafpress::cmd::show::run(&cli.config, &slug, format, drafts)?;
        }
        Commands::New { slug, title } => {
            leafpress::cmd::new::run(&cli.config, &slug, title.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["leafpress", "build", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build { output, drafts } => {
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert!(!drafts);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_defaults() {
        let args = ["leafpress", "build", "--drafts"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { output, drafts } => {
                assert!(output.is_none());
                assert!(drafts);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["leafpress", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict } => {
                assert!(strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_show_command_parsing() {
        let args = ["leafpress", "show", "vat-registration", "--format", "json"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Show {
                slug,
                format,
                drafts,
            } => {
                assert_eq!(slug, "vat-registration");
                assert_eq!(format, OutputFormat::Json);
                assert!(!drafts);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_show_default_format() {
        let args = ["leafpress", "show", "vat-registration"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Show { format, .. } => assert_eq!(format, OutputFormat::Text),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_new_command_parsing() {
        let args = ["leafpress", "new", "payroll-basics", "--title", "Payroll Basics"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::New { slug, title } => {
                assert_eq!(slug, "payroll-basics");
                assert_eq!(title.as_deref(), Some("Payroll Basics"));
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["leafpress", "-vvv", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["leafpress", "--config", "site.toml", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }
}
