//! Gitdrop - keep a working copy of a remote repository and drop files into it
//!
//! Usage:
//!   gitdrop sync <URL>                 # Clone or pull the working copy
//!   gitdrop add <URL> <SOURCE>         # Write SOURCE into the copy and commit it
//!   gitdrop push <URL>                 # Push committed changes
//!   gitdrop remote-url [FOLDER]        # Print a folder's origin URL
//!   gitdrop folder <URL>               # Print the default folder for a URL

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitdrop_core::config::{ConfigStore, FailureDetection, RepoOptions};
use gitdrop_core::git::SystemGit;
use gitdrop_core::repo::{RepoHandle, derive_repo_folder, remote_origin_url_with};

#[derive(Parser)]
#[command(name = "gitdrop")]
#[command(about = "Keep a working copy of a remote git repository", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/gitdrop/gitdrop.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log git commands and their output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Branch used by pull and push
    #[arg(long, global = true)]
    branch: Option<String>,

    /// Remote used by pull and push
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Judge git steps by exit status instead of output markers
    #[arg(long, global = true)]
    exit_status: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone the repository, or pull it if already cloned
    Sync(RepoArgs),

    /// Write a file into the working copy and commit it
    Add {
        #[command(flatten)]
        repo: RepoArgs,

        /// File to read the content from (`-` for stdin)
        source: PathBuf,

        /// Path inside the repository (defaults to SOURCE's file name)
        #[arg(long = "as", value_name = "REPO_PATH")]
        repo_path: Option<PathBuf>,
    },

    /// Push committed changes to the remote
    Push(RepoArgs),

    /// Print the origin URL configured in a folder
    RemoteUrl {
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Print the default working-copy folder name for a URL
    Folder { url: String },
}

#[derive(Args)]
struct RepoArgs {
    /// Remote repository URL
    url: String,

    /// Working copy directory (defaults to a folder named after the URL)
    #[arg(long)]
    dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;

    match cli.command {
        Commands::Sync(args) => {
            let repo = open_repo(&args, options)?;
            repo.sync()
                .with_context(|| format!("Failed to sync {}", repo.local_path().display()))?;
            println!("{}", repo.local_path().display());
        }
        Commands::Add {
            repo,
            source,
            repo_path,
        } => {
            let data = read_source(&source)?;
            let target = match repo_path {
                Some(path) => path,
                None => default_repo_path(&source)?,
            };
            let handle = open_repo(&repo, options)?;
            handle
                .add_data(&data, &target)
                .with_context(|| format!("Failed to commit {}", target.display()))?;
        }
        Commands::Push(args) => {
            let repo = open_repo(&args, options)?;
            repo.push()
                .with_context(|| format!("Failed to push {}", repo.local_path().display()))?;
        }
        Commands::RemoteUrl { folder } => {
            let git = SystemGit::new(&options.git);
            let url = remote_origin_url_with(&git, &folder).with_context(|| {
                format!("Failed to read remote.origin.url in {}", folder.display())
            })?;
            println!("{}", url);
        }
        Commands::Folder { url } => {
            println!("{}", derive_repo_folder(&url));
        }
    }

    Ok(())
}

/// Merge the config file with command-line overrides.
fn load_options(cli: &Cli) -> Result<RepoOptions> {
    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::from_default_dir()?,
    };
    let mut options = store.load()?;

    if cli.verbose {
        options.verbose = true;
    }
    if let Some(branch) = &cli.branch {
        options.branch = branch.clone();
    }
    if let Some(remote) = &cli.remote {
        options.remote = remote.clone();
    }
    if cli.exit_status {
        options.failure_detection = FailureDetection::ExitStatus;
    }
    tracing::debug!(config = %store.config_path().display(), ?options, "Loaded options");
    Ok(options)
}

fn open_repo(args: &RepoArgs, options: RepoOptions) -> Result<RepoHandle> {
    RepoHandle::create_with_options(&args.url, args.dir.as_deref(), options)
        .with_context(|| format!("Failed to prepare working copy for {}", args.url))
}

fn read_source(source: &Path) -> Result<Vec<u8>> {
    if source == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("Failed to read stdin")?;
        return Ok(data);
    }
    std::fs::read(source).with_context(|| format!("Failed to read {}", source.display()))
}

fn default_repo_path(source: &Path) -> Result<PathBuf> {
    source
        .file_name()
        .filter(|_| source != Path::new("-"))
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("--as is required when reading from stdin"))
}
