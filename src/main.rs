use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gitviz::areas::repository::Repository;
use gitviz::artifacts::core::settings::Settings;
use gitviz::artifacts::graph::walker::WalkPolicy;
use gitviz::commands::plumbing::cat_file::CatFileMode;
use gitviz::commands::porcelain::commits::CommitsOptions;
use gitviz::commands::porcelain::deps::DepsOptions;
use gitviz::commands::porcelain::graph::GraphOptions;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitviz",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Draw the object graph of a git repository",
    long_about = "This tool reads the loose objects of a git repository, starting from a branch tip, \
    and writes every reachable commit, tree and blob as a PlantUML diagram. \
    The diagram can optionally be rendered with a local PlantUML jar.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short, long, global = true, help = "Settings file (defaults to ./gitviz.toml when present)")]
    config: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Repository working tree containing .git")]
    repo: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Log walk progress to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "graph",
        about = "Write the object graph of a branch as a PlantUML diagram",
        long_about = "This command walks every object reachable from the branch tip and writes \
        the diagram to the output path. Nothing is written if any object cannot be read."
    )]
    Graph {
        #[arg(short, long, help = "Branch whose tip starts the walk")]
        branch: Option<String>,
        #[arg(short, long, help = "Where to write the diagram")]
        output: Option<PathBuf>,
        #[arg(long, help = "Render the diagram with PlantUML after writing it")]
        render: bool,
        #[arg(long, help = "Path to the PlantUML jar")]
        plantuml: Option<PathBuf>,
        #[arg(long, help = "Draw each object once instead of once per reference")]
        dedup: bool,
        #[arg(long, help = "Fail when the graph is deeper than this")]
        max_depth: Option<usize>,
    },
    #[command(
        name = "emit",
        about = "Print the PlantUML diagram to stdout",
        long_about = "This command builds the same diagram as graph, starting from an object ID \
        or the branch tip, and prints it instead of writing a file."
    )]
    Emit {
        #[arg(index = 1, help = "Object ID, abbreviation or branch to start from")]
        revision: Option<String>,
        #[arg(short, long, conflicts_with = "revision", help = "Branch whose tip starts the walk")]
        branch: Option<String>,
        #[arg(long, help = "Draw each object once instead of once per reference")]
        dedup: bool,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content, type or size of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', group = "mode", help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', group = "mode", help = "Print the object type")]
        show_type: bool,
        #[arg(short = 's', group = "mode", help = "Print the object size")]
        size: bool,
        #[arg(index = 1, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree, or of the tree of a commit. \
        Without an object the configured branch tip is used."
    )]
    LsTree {
        #[arg(short, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "Tree, commit or branch")]
        revision: Option<String>,
    },
    #[command(
        name = "commits",
        about = "List commits on the branch",
        long_about = "This command lists the commits reachable from the branch tip through git log, \
        newest first, optionally limited to those made after a date."
    )]
    Commits {
        #[arg(short, long, help = "Branch to list")]
        branch: Option<String>,
        #[arg(long, help = "Only commits after this date (YYYY-MM-DD)")]
        after: Option<NaiveDate>,
        #[arg(long, help = "Also list the files changed by each commit")]
        files: bool,
    },
    #[command(
        name = "deps",
        about = "Write one file dependency diagram per commit",
        long_about = "This command lists the commits on the branch through git log and, for each one, \
        writes <hash>.puml showing the files it changed and the imports those files declare. \
        Files are read from the working tree."
    )]
    Deps {
        #[arg(short, long, help = "Branch to list")]
        branch: Option<String>,
        #[arg(long, help = "Only commits after this date (YYYY-MM-DD)")]
        after: Option<NaiveDate>,
        #[arg(short, long, help = "Directory for the diagrams")]
        output_dir: Option<PathBuf>,
        #[arg(long, help = "Render every diagram with PlantUML after writing it")]
        render: bool,
        #[arg(long, help = "Path to the PlantUML jar")]
        plantuml: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "gitviz=debug" } else { "gitviz=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Command line overrides go through the same checks as the file and environment layers
fn open_repository(settings: Settings) -> Result<Repository> {
    settings.validate()?;
    Repository::new(settings, Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(repo) = &cli.repo {
        settings.repository_path = repo.clone();
    }

    match cli.command {
        Commands::Graph {
            branch,
            output,
            render,
            plantuml,
            dedup,
            max_depth,
        } => {
            if let Some(branch) = branch {
                settings.branch = branch;
            }
            if let Some(output) = output {
                settings.output_path = output;
            }
            if plantuml.is_some() {
                settings.plantuml_path = plantuml;
            }
            if dedup {
                settings.walk_policy = WalkPolicy::Dedup;
            }
            if max_depth.is_some() {
                settings.max_depth = max_depth;
            }

            let repository = open_repository(settings)?;
            repository.graph(&GraphOptions {
                revision: None,
                render,
            })?
        }
        Commands::Emit {
            revision,
            branch,
            dedup,
        } => {
            if let Some(branch) = branch {
                settings.branch = branch;
            }
            if dedup {
                settings.walk_policy = WalkPolicy::Dedup;
            }

            let repository = open_repository(settings)?;
            repository.emit_diagram(revision.as_deref())?
        }
        Commands::CatFile {
            pretty: _,
            show_type,
            size,
            sha,
        } => {
            let mode = if show_type {
                CatFileMode::Type
            } else if size {
                CatFileMode::Size
            } else {
                CatFileMode::Pretty
            };

            let repository = open_repository(settings)?;
            repository.cat_file(&sha, mode)?
        }
        Commands::LsTree {
            recursive,
            revision,
        } => {
            let repository = open_repository(settings)?;
            repository.ls_tree(revision.as_deref(), recursive)?
        }
        Commands::Commits {
            branch,
            after,
            files,
        } => {
            if let Some(branch) = branch {
                settings.branch = branch;
            }

            let repository = open_repository(settings)?;
            repository.commits(&CommitsOptions { after, files })?
        }
        Commands::Deps {
            branch,
            after,
            output_dir,
            render,
            plantuml,
        } => {
            if let Some(branch) = branch {
                settings.branch = branch;
            }
            if output_dir.is_some() {
                settings.output_dir = output_dir;
            }
            if plantuml.is_some() {
                settings.plantuml_path = plantuml;
            }

            let repository = open_repository(settings)?;
            repository.dependency_diagrams(&DepsOptions { after, render })?
        }
    }

    Ok(())
}
