use clap::{Args, Parser, Subcommand};
use git_changeset::{self, ChangedFile, FileStatus, Scope};
use std::path::PathBuf;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Git repository (or any directory inside it)
    #[arg(global = true, short, long, default_value = ".")]
    repo: PathBuf,

    /// Git executable to run
    #[arg(global = true, long, default_value = "git")]
    git: String,

    /// Log level
    #[arg(global = true, short, long, default_value = "error")]
    log: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show changed files grouped by status
    Files {
        #[command(flatten)]
        query: QueryArgs,

        /// Print the files as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print changed paths, one per line
    Names {
        #[command(flatten)]
        query: QueryArgs,

        /// Prefix every path with its status code
        #[arg(long)]
        status: bool,
    },
    /// Stream the diff of a single path
    Diff {
        path: String,

        /// Diff the index against HEAD instead of the working tree against the index
        #[arg(long)]
        staged: bool,
    },
    /// Mark untracked files as intent-to-add (git add -A -N)
    IntentToAdd,
}

#[derive(Args)]
struct QueryArgs {
    /// Query staged changes instead of working-tree changes
    #[arg(long)]
    staged: bool,

    /// Do not mark untracked files intent-to-add before a working-tree query
    #[arg(long)]
    no_intent_to_add: bool,
}

fn print_changes_summary(files: &[ChangedFile], scope: Scope) {
    let mut added = Vec::new();
    let mut modified = Vec::new();
    let mut deleted = Vec::new();
    let mut renamed = Vec::new();
    let mut other = Vec::new();

    for file in files {
        match file.kind() {
            FileStatus::Added | FileStatus::Copied => added.push(file),
            FileStatus::Modified | FileStatus::TypeChanged => modified.push(file),
            FileStatus::Deleted => deleted.push(file),
            FileStatus::Renamed => renamed.push(file),
            FileStatus::Unmerged | FileStatus::Unknown => other.push(file),
        }
    }

    let title = if scope.is_staged() {
        "Staged Changes"
    } else {
        "Unstaged Changes"
    };

    println!("\n📊 {title}:");
    println!("==================");
    println!("Total files: {}", files.len());
    println!("  Added:    {}", added.len());
    println!("  Modified: {}", modified.len());
    println!("  Deleted:  {}", deleted.len());
    println!("  Renamed:  {}", renamed.len());

    if !added.is_empty() {
        println!("\n✨ Added Files:");
        for file in added {
            println!("  + {}", file.path);
        }
    }

    if !modified.is_empty() {
        println!("\n🔄 Modified Files:");
        for file in modified {
            println!("  ~ {}", file.path);
        }
    }

    if !deleted.is_empty() {
        println!("\n❌ Deleted Files:");
        for file in deleted {
            println!("  - {}", file.path);
        }
    }

    if !renamed.is_empty() {
        println!("\n🔀 Renamed Files:");
        for file in renamed {
            let from = file.old_path.as_deref().unwrap_or("?");
            println!("  > {from} -> {}", file.path);
        }
    }

    if !other.is_empty() {
        println!("\n❓ Other Files:");
        for file in other {
            println!("  {} {}", file.status, file.path);
        }
    }
}

#[tokio::main]
async fn main() -> git_changeset::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive(cli.log.into());

    fmt()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .pretty()
        .init();

    let inspector = git_changeset::new(&cli.repo)?.with_program(cli.git);

    match cli.command {
        Command::Files { query, json } => {
            let scope = Scope::from_staged(query.staged);
            let files = inspector
                .intent_to_add(!query.no_intent_to_add)
                .get_changed_files(scope)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                print_changes_summary(&files, scope);
            }
        }
        Command::Names { query, status } => {
            let scope = Scope::from_staged(query.staged);
            let inspector = inspector.intent_to_add(!query.no_intent_to_add);
            let rows = if status {
                inspector.list_changed_paths_with_status(scope)?
            } else {
                inspector.list_changed_paths(scope)?
            };

            for row in rows {
                println!("{row}");
            }
        }
        Command::Diff { path, staged } => {
            debug!(path = %path, staged = staged, "Streaming diff");
            inspector.show_diff(&path, Scope::from_staged(staged))?;
        }
        Command::IntentToAdd => {
            inspector.stage_intent_to_add()?;
        }
    }

    Ok(())
}
