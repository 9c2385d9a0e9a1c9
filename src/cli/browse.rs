use color_eyre::eyre;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};
use ecg_feed::{
    client::ArticleService,
    feed::{tag_universe, FeedFilter, TagFilter},
    models::Category,
    shell::{Shell, SubmitOutcome, View},
    views::{EditorForm, Screen},
};

use crate::{confirm_prompt, with_spinner};

#[derive(Clone, Copy, strum::Display)]
enum Action {
    #[strum(serialize = "Search")]
    Search,
    #[strum(serialize = "Filter by tag")]
    FilterTag,
    #[strum(serialize = "Open article")]
    Open,
    #[strum(serialize = "Reload")]
    Reload,
    #[strum(serialize = "Staff Write")]
    Write,
    #[strum(serialize = "Back to Feed")]
    Back,
    #[strum(serialize = "Delete this article")]
    Delete,
    #[strum(serialize = "Edit title")]
    EditTitle,
    #[strum(serialize = "Edit author")]
    EditAuthor,
    #[strum(serialize = "Choose category")]
    EditCategory,
    #[strum(serialize = "Edit content")]
    EditContent,
    #[strum(serialize = "Edit image URL")]
    EditImage,
    #[strum(serialize = "Edit tags")]
    EditTags,
    #[strum(serialize = "Publish Article")]
    Publish,
    #[strum(serialize = "Cancel")]
    Cancel,
    #[strum(serialize = "Dismiss error")]
    Dismiss,
    #[strum(serialize = "Quit")]
    Quit,
}

/// Interactive loop over the feed, detail and editor views.
pub async fn run(shell: &Shell<ArticleService>) -> eyre::Result<()> {
    let theme = ColorfulTheme::default();
    // View-local input: reset whenever its view is left.
    let mut filter = FeedFilter::default();
    let mut form = EditorForm::default();

    with_spinner("Loading articles...", shell.load_articles()).await;

    loop {
        if shell.take_scroll_reset() {
            print!("\x1b[2J\x1b[H");
        }
        let state = shell.state();
        println!(
            "{}",
            Screen {
                state: &state,
                filter: &filter,
                form: &form,
            }
        );

        let mut actions = match state.view {
            View::Home => vec![
                Action::Search,
                Action::FilterTag,
                Action::Open,
                Action::Reload,
                Action::Write,
            ],
            View::Article
                if state.admin_mode
                    && state.selected.as_ref().is_some_and(|a| a.id.is_some()) =>
            {
                vec![Action::Back, Action::Delete]
            }
            View::Article => vec![Action::Back],
            View::Admin => vec![
                Action::EditTitle,
                Action::EditAuthor,
                Action::EditCategory,
                Action::EditContent,
                Action::EditImage,
                Action::EditTags,
                Action::Publish,
                Action::Cancel,
            ],
        };
        if state.error.is_some() {
            actions.push(Action::Dismiss);
        }
        actions.push(Action::Quit);

        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&actions)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::Search => {
                filter.search = Input::<String>::with_theme(&theme)
                    .with_prompt("Search")
                    .with_initial_text(filter.search.clone())
                    .allow_empty(true)
                    .interact_text()?;
            }
            Action::FilterTag => {
                let tags = tag_universe(&state.articles);
                let current = tags
                    .iter()
                    .position(|t| t == filter.tag.label())
                    .unwrap_or_default();
                let picked = Select::with_theme(&theme)
                    .with_prompt("Tag")
                    .items(&tags)
                    .default(current)
                    .interact()?;
                filter.tag = TagFilter::from(tags[picked].as_str());
            }
            Action::Open => {
                let visible = filter.apply(&state.articles);
                if visible.is_empty() {
                    continue;
                }
                let titles = visible
                    .iter()
                    .map(|a| format!("{} ({})", a.title, a.date))
                    .collect::<Vec<_>>();
                let picked = Select::with_theme(&theme)
                    .with_prompt("Article")
                    .items(&titles)
                    .default(0)
                    .interact()?;
                shell.open_article(visible[picked].clone());
                filter = FeedFilter::default();
            }
            Action::Reload => {
                with_spinner("Loading articles...", shell.load_articles()).await;
            }
            Action::Write => {
                shell.open_editor();
                filter = FeedFilter::default();
            }
            Action::Back => shell.go_home(),
            Action::Delete => {
                shell.delete_selected(&confirm_prompt).await;
            }
            Action::EditTitle => form.title = prompt_text(&theme, "Title", &form.title)?,
            Action::EditAuthor => form.author = prompt_text(&theme, "Author Name", &form.author)?,
            Action::EditCategory => {
                let current = Category::CHOICES
                    .iter()
                    .position(|c| *c == form.category)
                    .unwrap_or_default();
                let picked = Select::with_theme(&theme)
                    .with_prompt("Category")
                    .items(&Category::CHOICES)
                    .default(current)
                    .interact()?;
                form.category = Category::CHOICES[picked].clone();
            }
            Action::EditContent => {
                if let Some(content) = Editor::new().edit(&form.content)? {
                    form.content = content;
                }
            }
            Action::EditImage => {
                form.image = prompt_text(&theme, "Image URL (Optional)", &form.image)?;
            }
            Action::EditTags => {
                form.tags = prompt_text(&theme, "Tags (Comma separated)", &form.tags)?;
            }
            Action::Publish => {
                match with_spinner("Publishing article...", shell.submit_editor(&form)).await {
                    SubmitOutcome::Created => form = EditorForm::default(),
                    SubmitOutcome::Invalid(e) => println!("{e}"),
                    SubmitOutcome::Failed | SubmitOutcome::Busy => {}
                }
            }
            Action::Cancel => {
                shell.go_home();
                form = EditorForm::default();
            }
            Action::Dismiss => shell.dismiss_error(),
            Action::Quit => return Ok(()),
        }
    }
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, current: &str) -> eyre::Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}
