use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use cli::app::App;
use cli::launch::{Launcher, SystemLauncher};
use cli::paths::{self, DataPaths};
use cli::{logging, shell};
use pptview_core::config;
use pptview_core::scanner::ScanOptions;
use pptview_core::search::Filter;
use std::io;
use std::path::{Path, PathBuf};
use storage::{RemoveOutcome, TagStore};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = config::load(cli.config.as_deref())?;
    let data = DataPaths::resolve(cli.data_dir.as_deref(), settings.data_dir.as_deref())?;
    let scan = ScanOptions::from_settings(&settings.scan)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => run_shell(&data, scan),
        Commands::Folder { dir } => run_folder(&data, scan, &dir),
        Commands::List {
            folder,
            name,
            tag,
            json,
        } => run_list(&data, scan, folder.as_deref(), &name, &tag, json),
        Commands::Tags { file } => run_show_tags(&data, &file),
        Commands::Tag { action } => match action {
            TagAction::Add { file, tags } => run_add(&data, &file, &tags),
            TagAction::Remove { file, tags } => run_remove(&data, &file, &tags),
        },
        Commands::Open { file } => SystemLauncher
            .launch(&paths::absolutize(&file)?)
            .map_err(|e| anyhow!(e)),
    }
}

#[derive(Parser)]
#[command(name = "pptview")]
#[command(about = "Tag and filter presentation files", long_about = None)]
struct Cli {
    /// Path to settings TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding tags.json and config.json (default ~/.PPTView)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Shell,
    /// Choose a folder, remember it, and list its presentations
    Folder { dir: PathBuf },
    /// List presentations, optionally filtered
    List {
        /// Folder to list; defaults to the remembered one
        #[arg(long)]
        folder: Option<PathBuf>,
        /// Filename substrings, all must match (case-insensitive)
        #[arg(long, default_value = "")]
        name: String,
        /// Tags, all must be present (exact)
        #[arg(long, default_value = "")]
        tag: String,
        /// Output JSON rows
        #[arg(long)]
        json: bool,
    },
    /// Show the tags of a file
    Tags { file: PathBuf },
    /// Add or remove tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Open a file with its default application
    Open { file: PathBuf },
}

#[derive(Subcommand)]
enum TagAction {
    /// Add whitespace-separated tags to a file
    Add {
        file: PathBuf,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },
    /// Remove tags from a file
    Remove {
        file: PathBuf,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },
}

fn run_shell(data: &DataPaths, scan: ScanOptions) -> Result<()> {
    let mut app = App::open(data, scan);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell::run(&mut app, &SystemLauncher, stdin.lock(), &mut stdout)
}

fn run_folder(data: &DataPaths, scan: ScanOptions, dir: &Path) -> Result<()> {
    let mut app = App::open(data, scan);
    app.choose_folder(dir)?;
    shell::print_rows(&app, &mut io::stdout())
}

fn run_list(
    data: &DataPaths,
    scan: ScanOptions,
    folder: Option<&Path>,
    name: &str,
    tag: &str,
    json: bool,
) -> Result<()> {
    let mut app = App::open(data, scan);
    if let Some(dir) = folder {
        app.choose_folder(dir)?;
    } else if app.current_folder().is_none() {
        bail!("no folder remembered; pass --folder or run `pptview folder <dir>`");
    }
    app.search(name, tag);
    if json {
        let out = serde_json::json!({
            "folder": app.current_folder().map(|p| p.display().to_string()),
            "filter": filter_json(&app.filter()),
            "rows": app.rows(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        Ok(())
    } else {
        shell::print_rows(&app, &mut io::stdout())
    }
}

fn filter_json(f: &Filter) -> serde_json::Value {
    serde_json::json!({
        "filename_keywords": f.filename_keywords,
        "tag_keywords": f.tag_keywords,
    })
}

fn file_key(file: &Path) -> Result<String> {
    Ok(paths::absolutize(file)?.to_string_lossy().into_owned())
}

fn run_show_tags(data: &DataPaths, file: &Path) -> Result<()> {
    let store = TagStore::load(&data.tags);
    let key = file_key(file)?;
    let tags = store.tag_list(&key);
    if tags.is_empty() {
        println!("{key} has no tags");
    } else {
        println!("{}", tags.join(" "));
    }
    Ok(())
}

fn run_add(data: &DataPaths, file: &Path, tags: &[String]) -> Result<()> {
    let mut store = TagStore::load(&data.tags);
    let key = file_key(file)?;
    let added = store
        .add_tags(&key, &tags.join(" "))
        .context("failed to save tags")?;
    if added.is_empty() {
        println!("{key}: no new tags");
    } else {
        println!("{key}: added {}", added.join(" "));
    }
    Ok(())
}

fn run_remove(data: &DataPaths, file: &Path, tags: &[String]) -> Result<()> {
    let mut store = TagStore::load(&data.tags);
    let key = file_key(file)?;
    match store
        .remove_tags(&key, &tags.join(" "))
        .context("failed to save tags")?
    {
        RemoveOutcome::NoTags => println!("{key} has no tags"),
        RemoveOutcome::Removed { remaining } => {
            println!("{key}: remaining tags {}", remaining.join(" "))
        }
        RemoveOutcome::Cleared => println!("{key}: all tags removed"),
    }
    Ok(())
}
