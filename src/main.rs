// datavista - browse your data visualization projects from the terminal
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::Context;
use clap::{Parser, Subcommand};
use datavista_lib::{
    core::{AvailableFilters, FilterSelection, ProjectForm, SortOrder},
    db::{Project, TagKind},
    Config, DataVistaError, Database, ProjectStore,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// DataVista - data visualization project browser
#[derive(Parser, Debug)]
#[command(name = "datavista", version, about, long_about = None)]
struct Cli {
    /// Directory holding the project database
    #[arg(long, env = "DATAVISTA_HOME", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key holding the project list
    #[arg(long, env = "DATAVISTA_STORAGE_KEY", value_name = "KEY", global = true)]
    storage_key: Option<String>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List projects, optionally searched and filtered
    List {
        /// Case-insensitive text to look for in titles, descriptions and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only show projects in this category (repeatable)
        #[arg(short, long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Only show projects using this technology (repeatable)
        #[arg(short, long = "tech", value_name = "NAME")]
        technologies: Vec<String>,

        /// Ordering: stored, newest, oldest or title
        #[arg(long, default_value_t = SortOrder::Stored)]
        sort: SortOrder,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one project
    Show {
        id: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Add a new project
    Add {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Thumbnail image URL
        #[arg(long, default_value = "")]
        thumbnail: String,

        #[arg(long, default_value = "")]
        category: String,

        /// Primary technology tag
        #[arg(long, default_value = "")]
        tech: String,

        /// Optional second technology tag
        #[arg(long)]
        tech2: Option<String>,
    },
    /// Delete a project
    Remove {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the categories and technologies available for filtering
    Filters,
    /// Show storage location and stats
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<DataVistaError>() {
                Some(err) => eprintln!("✗ {}", err.user_message()),
                None => eprintln!("✗ {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "datavista=debug,datavista_lib=debug"
    } else {
        "datavista=warn,datavista_lib=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::resolve(cli.data_dir)?;
    if let Some(key) = cli.storage_key {
        config = config.with_storage_key(key);
    }
    let db = Arc::new(
        Database::new(config.db_path())
            .await
            .with_context(|| format!("opening {}", config.db_path().display()))?,
    );
    let mut store = ProjectStore::open(Arc::clone(&db), config.storage_key()).await;

    let code = match cli.command {
        Command::List {
            search,
            categories,
            technologies,
            sort,
            json,
        } => {
            let mut selection = FilterSelection::new();
            selection.categories.extend(categories);
            selection.technologies.extend(technologies);
            handle_list(&store, &search, &selection, sort, json)?
        }
        Command::Show { id, json } => handle_show(&store, &id, json)?,
        Command::Add {
            title,
            description,
            thumbnail,
            category,
            tech,
            tech2,
        } => {
            let form = ProjectForm {
                title,
                description,
                thumbnail,
                category,
                tech_primary: tech,
                tech_secondary: tech2,
            };
            handle_add(&mut store, form).await?
        }
        Command::Remove { id, yes } => handle_remove(&mut store, &id, yes).await?,
        Command::Filters => handle_filters(&store.available_filters()),
        Command::Status => handle_status(&store, &db, &config).await?,
    };

    db.close().await;
    Ok(code)
}

fn handle_list(
    store: &ProjectStore,
    search: &str,
    selection: &FilterSelection,
    sort: SortOrder,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let mut results = selection.apply(store.projects(), search);
    sort.apply(&mut results);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(ExitCode::SUCCESS);
    }

    if results.is_empty() {
        println!("No projects found.");
        if !search.is_empty() || !selection.is_empty() {
            println!("Try a different search term or clear your filters.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    println!("\nShowing {} of {} project(s):", results.len(), store.len());
    if selection.active_count() > 0 {
        println!("Active filters: {}", selection.active_count());
    }
    println!("{}", "=".repeat(60));
    for project in &results {
        println!("{:>4}  {}", project.id, project.title);
        println!("      {}", tag_line(project));
    }
    println!("{}", "=".repeat(60));

    Ok(ExitCode::SUCCESS)
}

fn handle_show(store: &ProjectStore, id: &str, json: bool) -> anyhow::Result<ExitCode> {
    let project = store
        .get(id)
        .ok_or_else(|| DataVistaError::ProjectNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(project)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("\n{}", project.title);
    println!("{}", "=".repeat(60));
    println!("{}", project.description);
    println!("\nTags:       {}", tag_line(project));
    println!("Thumbnail:  {}", project.thumbnail);
    println!(
        "Updated:    {}",
        project.updated_at.format("%B %-d, %Y")
    );
    println!("{}", "=".repeat(60));

    Ok(ExitCode::SUCCESS)
}

async fn handle_add(store: &mut ProjectStore, form: ProjectForm) -> anyhow::Result<ExitCode> {
    let draft = form.validate().map_err(DataVistaError::from)?;
    let project = store.add(draft).await?;
    println!("✓ Project added successfully (id {})", project.id);

    Ok(ExitCode::SUCCESS)
}

async fn handle_remove(store: &mut ProjectStore, id: &str, yes: bool) -> anyhow::Result<ExitCode> {
    let title = match store.get(id) {
        Some(project) => project.title.clone(),
        None => {
            println!("No project with id '{}'. Nothing to delete.", id);
            return Ok(ExitCode::SUCCESS);
        }
    };

    if !yes && !confirm(&format!("Delete project '{}'? This cannot be undone.", title))? {
        println!("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    store.remove(id).await?;
    println!("✓ Project deleted");

    Ok(ExitCode::SUCCESS)
}

fn handle_filters(filters: &AvailableFilters) -> ExitCode {
    println!("\nCategories:");
    for name in &filters.categories {
        println!("  - {}", name);
    }
    println!("\nTechnologies:");
    for name in &filters.technologies {
        println!("  - {}", name);
    }

    ExitCode::SUCCESS
}

async fn handle_status(
    store: &ProjectStore,
    db: &Database,
    config: &Config,
) -> anyhow::Result<ExitCode> {
    let stats = db.stats().await?;
    let saved = db.get_item(config.storage_key()).await?.is_some();

    println!("\nDataVista Status");
    println!("{}", "=".repeat(60));
    println!("  Database:     {}", db.path().display());
    println!("  Storage key:  {}", config.storage_key());
    println!("  Projects:     {}", store.len());
    println!(
        "  Source:       {}",
        if saved { "saved projects" } else { "built-in samples" }
    );
    println!("  Stored keys:  {}", stats.total_keys);
    println!("{}", "=".repeat(60));

    Ok(ExitCode::SUCCESS)
}

fn tag_line(project: &Project) -> String {
    project
        .tags
        .iter()
        .map(|tag| match tag.kind {
            TagKind::Category => format!("[{}]", tag.name),
            TagKind::Tech => tag.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
