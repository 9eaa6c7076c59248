use clap::{Parser, Subcommand};
use showcase::fetch::{GitHubClient, JsonFileSource, RepositorySource};
use showcase::{assemble, config, fetch, output, select};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let describe = env!("SHOWCASE_GIT_DESCRIBE");
    if describe.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        describe
    }
}

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Build a project showcase page from a GitHub account")]
#[command(long_about = "\
Build a project showcase page from a GitHub account

Public, non-fork repositories become project cards. Repositories with a
homepage get a screenshot of it; the rest get a generated preview.

Site layout:

  index.html      # Template; must contain the projects marker exactly once:
                  #   <!-- Projects will be inserted here by build script -->
  profile.jpg     # Optional, copied to the output
  assets/         # Optional, copied to the output
  showcase.toml   # Optional config (see 'showcase gen-config')

Set RUST_LOG=debug for detailed logs on stderr.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "showcase.toml", global = true)]
    config: PathBuf,

    /// HTML template containing the projects marker
    #[arg(long, default_value = "index.html", global = true)]
    template: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Profile picture copied next to the page
    #[arg(long, default_value = "profile.jpg", global = true)]
    profile_image: PathBuf,

    /// Static assets directory copied into the output
    #[arg(long, default_value = "assets", global = true)]
    assets: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Shared flag for commands that can run from a saved repository list.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Read repositories from a JSON file instead of the hosting API
    #[arg(long)]
    repos: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: fetch → select → preview → render → assemble
    Build(SourceArgs),
    /// Fetch the account's repositories and list them
    Fetch {
        /// Save the fetched list as JSON (usable with --repos)
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// Show which repositories would get a card, without writing anything
    Check(SourceArgs),
    /// Print a stock showcase.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("build failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Build(source_args) => {
            let site_config = config::load_config(&cli.config)?;
            let source = repository_source(source_args.repos.as_deref(), &site_config)?;
            let paths = assemble::SitePaths {
                template: cli.template.clone(),
                output_dir: cli.output.clone(),
                profile_image: cli.profile_image.clone(),
                assets_dir: cli.assets.clone(),
            };

            println!("==> Building {}", cli.output.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_build_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = assemble::build(source.as_ref(), &paths, &site_config, Some(tx));
            if printer.join().is_err() {
                tracing::warn!("progress printer panicked");
            }
            let report = result?;
            output::print_build_summary(&report, &cli.output);
        }
        Command::Fetch { write } => {
            let site_config = config::load_config(&cli.config)?;
            let source = GitHubClient::new(&site_config.account)?;
            let repos = source.fetch(&site_config.account)?;
            output::print_fetched(&site_config.account.name, &repos, &site_config);
            if let Some(path) = write {
                fetch::write_records(path, &repos)?;
                println!("==> Saved {} repositories to {}", repos.len(), path.display());
            }
        }
        Command::Check(source_args) => {
            let site_config = config::load_config(&cli.config)?;
            assemble::read_template(&cli.template)?;
            let source = repository_source(source_args.repos.as_deref(), &site_config)?;
            let repos = source.fetch(&site_config.account)?;
            let total = repos.len();
            let selected = select::select_repositories(repos, &site_config.selection);
            output::print_selection(total, &selected, &site_config);
            println!("==> Template and selection are valid");
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

fn repository_source(
    repos_file: Option<&Path>,
    site_config: &config::SiteConfig,
) -> Result<Box<dyn RepositorySource>, fetch::FetchError> {
    Ok(match repos_file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(GitHubClient::new(&site_config.account)?),
    })
}
