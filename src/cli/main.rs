use core::time::Duration;
use std::{future::Future, process::exit};

use clap::{Parser, Subcommand};
use color_eyre::{
    config::HookBuilder,
    eyre::{self, eyre},
    Section,
};
use dialoguer::{theme::ColorfulTheme, Confirm};
use ecg_feed::{
    api::ArticleBackend,
    client::ArticleService,
    feed::{tag_universe, FeedFilter},
    models::Category,
    shell::{Shell, SubmitOutcome},
    views::{DetailView, EditorForm, FeedView},
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod browse;

#[derive(Parser)]
#[command(about = "Read and write ECG community articles", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Article service endpoint
    #[arg(long, env = "ECG_API_URL", global = true)]
    endpoint: Option<String>,

    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the feed, optionally searched and filtered by tag.
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value = "All")]
        tag: String,
    },

    /// Print every tag in use.
    Tags,

    /// Print one article in full.
    Show { id: String },

    /// Publish a new article (staff).
    Write {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "General", value_parser = parse_category)]
        category: Category,
        #[arg(long)]
        content: String,
        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// Delete an article (staff).
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive feed, detail and editor views.
    Browse,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = HookBuilder::default()
        .display_env_section(false)
        .panic_section("It looks like ecg-feed encountered a bug")
        .install()
    {
        eprintln!("Failed to install error report hook: {err}");
    }

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    if let Err(err) = entry(cli).await {
        error!("{:#}", err);
        exit(1);
    }
}

async fn entry(cli: Cli) -> eyre::Result<()> {
    let service = match cli.endpoint.as_deref() {
        Some(endpoint) => ArticleService::new(endpoint),
        None => ArticleService::load_from_env(),
    }
    .note("Set --endpoint or ECG_API_URL to a valid URL")?;
    info!(endpoint = %service.endpoint(), "Using article service");
    let shell = Shell::new(service);

    match cli.command {
        Commands::List { search, tag } => {
            load(&shell).await?;
            let state = shell.state();
            let filter = FeedFilter::new(search, tag.as_str());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&filter.apply(&state.articles))?);
            } else {
                print!(
                    "{}",
                    FeedView {
                        articles: &state.articles,
                        filter: &filter,
                        is_loading: false,
                    }
                );
            }
            Ok(())
        }
        Commands::Tags => {
            load(&shell).await?;
            let tags = shell.with_state(|s| tag_universe(&s.articles));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else {
                for tag in tags {
                    println!("{tag}");
                }
            }
            Ok(())
        }
        Commands::Show { id } => {
            load(&shell).await?;
            if !shell.open_article_by_id(&id) {
                return Err(eyre!("No article with id {id}")).suggestion("Run `ecg-feed list` to see ids");
            }
            let state = shell.state();
            let Some(article) = state.selected.as_ref() else {
                return Err(eyre!("No article selected"));
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(article)?);
            } else {
                print!("{}", DetailView { article, is_admin: false });
            }
            Ok(())
        }
        Commands::Write {
            title,
            author,
            category,
            content,
            image,
            tags,
        } => {
            shell.open_editor();
            let form = EditorForm {
                title,
                author,
                category,
                content,
                image,
                tags,
            };
            match with_spinner("Publishing article...", shell.submit_editor(&form)).await {
                SubmitOutcome::Created => {
                    after_mutation(&shell, "The article was published")?;
                    let count = shell.with_state(|s| s.articles.len());
                    println!("Article published. The feed now holds {count} article(s).");
                    Ok(())
                }
                SubmitOutcome::Invalid(e) => Err(e).note("Title, author and content are required"),
                SubmitOutcome::Failed | SubmitOutcome::Busy => Err(banner(&shell)),
            }
        }
        Commands::Delete { id, yes } => {
            load(&shell).await?;
            shell.open_editor();
            if !shell.open_article_by_id(&id) {
                return Err(eyre!("No article with id {id}")).suggestion("Run `ecg-feed list` to see ids");
            }
            let deleted = if yes {
                with_spinner("Deleting article...", shell.delete_selected(&|_: &str| true)).await
            } else {
                shell.delete_selected(&confirm_prompt).await
            };
            if deleted {
                after_mutation(&shell, &format!("Article {id} was deleted"))?;
                println!("Article {id} deleted.");
                Ok(())
            } else if shell.with_state(|s| s.error.is_some()) {
                Err(banner(&shell))
            } else {
                println!("Cancelled.");
                Ok(())
            }
        }
        Commands::Browse => browse::run(&shell).await,
    }
}

async fn load(shell: &Shell<ArticleService>) -> eyre::Result<()> {
    if with_spinner("Loading articles...", shell.load_articles()).await {
        Ok(())
    } else {
        Err(banner(shell))
    }
}

/// Reports a refresh that failed after `done` already went through.
fn after_mutation<B: ArticleBackend>(shell: &Shell<B>, done: &str) -> eyre::Result<()> {
    match shell.with_state(|s| s.error.clone()) {
        Some(message) => Err(eyre!(message))
            .note(format!("{done}, but the feed could not be reloaded afterwards")),
        None => Ok(()),
    }
}

fn banner(shell: &Shell<ArticleService>) -> eyre::Report {
    let message = shell
        .state()
        .error
        .unwrap_or_else(|| "Request failed".to_string());
    eyre!(message)
}

fn parse_category(raw: &str) -> Result<Category, String> {
    let category = Category::from(raw.to_string());
    if category.is_known() {
        Ok(category)
    } else {
        let choices = Category::CHOICES
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Err(format!("expected one of: {choices}"))
    }
}

pub(crate) fn confirm_prompt(prompt: &str) -> bool {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

pub(crate) async fn with_spinner<T>(message: &'static str, task: impl Future<Output = T>) -> T {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(message);

    let result = task.await;

    pb.finish_and_clear();
    result
}
