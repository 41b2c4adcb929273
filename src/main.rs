use changelog::cli::change::{AddChangeArgs, AddVersionArgs};
use changelog::cli::versions::ShowArgs;
use changelog::cli::{self, Workspace};
use changelog::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "changelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read and edit Keep a Changelog files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Changelog file (overrides `file` in changelog.toml)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a changelog with the standard header
    Init {
        /// Overwrite an existing changelog
        #[arg(long)]
        force: bool,
    },

    /// List versions in file order
    Versions,

    /// Show one version
    Show(ShowArgs),

    /// Print the first version in the file
    Recent,

    /// Print the last version in the file
    Latest,

    /// Add an empty version at the top
    #[command(name = "add-version")]
    AddVersion(AddVersionArgs),

    /// Record changes under a version, creating it when missing
    #[command(name = "add-change")]
    AddChange(AddChangeArgs),

    /// Rewrite the changelog in canonical form
    Fmt {
        /// Exit with an error instead of rewriting when the file would change
        #[arg(long)]
        check: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "changelog", &mut io::stdout());
        return Ok(());
    }

    let ws = Workspace::load(cli.file)?;

    match cli.command {
        Commands::Init { force } => cli::init::run(&ws, force),
        Commands::Versions => cli::versions::list(&ws),
        Commands::Show(args) => cli::versions::show(&ws, &args),
        Commands::Recent => cli::versions::recent(&ws),
        Commands::Latest => cli::versions::latest(&ws),
        Commands::AddVersion(args) => cli::change::add_version(&ws, &args),
        Commands::AddChange(args) => cli::change::add_change(&ws, &args),
        Commands::Fmt { check } => cli::fmt::run(&ws, check),
        Commands::Completions { .. } => Ok(()),
    }
}
