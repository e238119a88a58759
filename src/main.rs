use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use docdesk::api::{Category, DocumentApi, HttpDocumentApi};
use docdesk::app::render::{render_document, render_list, render_review};
use docdesk::app::{DeleteOutcome, Filters, UploadReport};
use docdesk::config::Config;
use docdesk::observability::init_tracing;
use docdesk::ui::{AssumeYes, Confirm, ConsoleNotifier, TerminalConfirm};
use docdesk::DocumentManager;

#[derive(Parser, Debug)]
#[command(name = "docdesk", version, about = "Manage documents on a remote document server")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List documents
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        file_type: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show one document
    Show { id: String },
    /// Upload files, one after another
    Upload {
        #[arg(required = true)]
        paths: Vec<String>,
        /// Let the server analyze each file and apply its suggestions
        #[arg(long)]
        analyze: bool,
    },
    /// Edit document metadata; unspecified fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a document
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Ask the AI service for metadata suggestions
    Analyze {
        id: String,
        /// Apply suggestions without asking
        #[arg(long)]
        apply: bool,
    },
    /// Show the analytics dashboard
    Stats,
    /// Interactive list with live search
    Browse,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the default config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Print the JSON schema of the config file
    Schema,
}

/// One line typed in `browse`.
#[derive(Debug, PartialEq, Eq)]
enum BrowseInput {
    Search(String),
    Category(String),
    FileType(String),
    Refresh,
    Quit,
}

impl BrowseInput {
    fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return BrowseInput::Search(line.to_string());
        };
        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        let arg = arg.trim().to_string();
        match name {
            "category" | "c" => BrowseInput::Category(arg),
            "type" | "t" => BrowseInput::FileType(arg),
            "refresh" | "r" => BrowseInput::Refresh,
            "quit" | "q" => BrowseInput::Quit,
            _ => BrowseInput::Search(line.to_string()),
        }
    }
}

fn status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// One line per uploaded file, in batch order.
fn outcome_lines(report: &UploadReport) -> Vec<String> {
    report
        .outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(id) => format!("  ✔ {} → {}", outcome.name, id),
            Err(e) => format!("  ✘ {}: {}", outcome.name, e),
        })
        .collect()
}

/// A declined prompt is not an error.
fn delete_status(outcome: DeleteOutcome) -> ExitCode {
    status(!outcome.is_failure())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api = config.api.with_base_url(url);
    }

    if let Command::Config { action } = &cli.command {
        match action {
            ConfigAction::Path => match Config::default_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("(no config directory on this platform)"),
            },
            ConfigAction::Show => print!("{}", config.to_toml()?),
            ConfigAction::Schema => println!("{}", Config::json_schema()?),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let api: Arc<dyn DocumentApi> =
        Arc::new(HttpDocumentApi::new(config.api.clone()).context("Failed to build HTTP client")?);
    let confirm: Arc<dyn Confirm> = match &cli.command {
        Command::Delete { yes: true, .. } | Command::Analyze { apply: true, .. } => Arc::new(AssumeYes),
        _ => Arc::new(TerminalConfirm),
    };
    let mut app = DocumentManager::new(api.clone(), Arc::new(ConsoleNotifier), confirm.clone(), &config);

    let code = match cli.command {
        Command::List {
            category,
            file_type,
            search,
            limit,
            offset,
        } => {
            app.set_filters(Filters {
                category: category.unwrap_or_default(),
                file_type: file_type.unwrap_or_default(),
                search: search.unwrap_or_default(),
                limit,
                offset,
            });
            let ok = app.load_documents().await;
            print!("{}", render_list(app.list(), &Local));
            status(ok)
        }
        Command::Show { id } => match api.get_document(&id).await {
            Ok(doc) => {
                print!("{}", render_document(&doc, &Local));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ {e}");
                ExitCode::FAILURE
            }
        },
        Command::Upload { paths, analyze } => {
            if analyze {
                app.set_analyze_on_upload(true);
            }
            let report = app.upload_paths(&paths).await;
            for line in outcome_lines(&report) {
                println!("{line}");
            }
            status(report.error_count() == 0)
        }
        Command::Edit {
            id,
            title,
            author,
            category,
            tags,
            description,
        } => {
            if !app.edit_document(&id).await {
                return Ok(ExitCode::FAILURE);
            }
            let form = app.edit_form_mut();
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(author) = author {
                form.author = author;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(tags) = tags {
                form.tags = tags;
            }
            if let Some(description) = description {
                form.description = description;
            }
            status(app.save_document().await)
        }
        Command::Delete { id, .. } => delete_status(app.delete_document(&id).await),
        Command::Analyze { id, .. } => {
            if !app.analyze_with_ai(&id).await {
                return Ok(ExitCode::FAILURE);
            }
            print!("{}", render_review(app.review()));
            if confirm.confirm("Apply these suggestions?") {
                status(app.apply_ai_suggestions().await)
            } else {
                app.close_review();
                ExitCode::SUCCESS
            }
        }
        Command::Stats => {
            let ok = app.load_analytics().await;
            print!("{}", app.dashboard().render_text());
            status(ok)
        }
        Command::Browse => {
            browse(&mut app).await?;
            ExitCode::SUCCESS
        }
        Command::Config { .. } => ExitCode::SUCCESS,
    };
    Ok(code)
}

async fn browse(app: &mut DocumentManager) -> Result<()> {
    app.init().await;
    print!("{}", render_list(app.list(), &Local));
    eprintln!("Type to search. Commands: :category <name>, :type <ext>, :refresh, :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match BrowseInput::parse(&line) {
                    BrowseInput::Search(text) => app.on_search_input(&text),
                    BrowseInput::Category(category) => {
                        app.on_category_filter(&category).await;
                        print!("{}", render_list(app.list(), &Local));
                    }
                    BrowseInput::FileType(file_type) => {
                        app.on_type_filter(&file_type).await;
                        print!("{}", render_list(app.list(), &Local));
                    }
                    BrowseInput::Refresh => {
                        app.refresh_dashboard().await;
                        print!("{}", app.dashboard().render_text());
                        print!("{}", render_list(app.list(), &Local));
                    }
                    BrowseInput::Quit => break,
                }
            }
            () = app.run_pending_search() => {
                print!("{}", render_list(app.list(), &Local));
            }
        }
    }
    Ok(())
}
