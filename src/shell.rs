//! Top-level controller: owns the article store and view state.
//!
//! Every mutation follows the same cycle: send it, then replace the whole
//! store with a fresh listing. Nothing is patched locally.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::Local;
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::{
    api::ArticleBackend,
    error::ValidationError,
    models::{Article, ArticleId},
    views::editor::EditorForm,
};

pub const LOAD_FAILED: &str = "Failed to load articles. Please try again in a little while.";
pub const SAVE_FAILED: &str = "Failed to save the article. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete the article. Please try again.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this article?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Article,
    Admin,
}

#[derive(Debug, Clone, Default)]
pub struct ShellState {
    pub articles: Vec<Article>,
    pub view: View,
    pub selected: Option<Article>,
    /// Unlocks the editor and delete actions for the rest of the session.
    /// It is a display toggle only; the service performs no access control.
    pub admin_mode: bool,
    /// The single error banner.
    pub error: Option<String>,
    pub(crate) in_flight: usize,
    pub(crate) applied_load: u64,
    pub(crate) scroll_to_top: bool,
}

impl ShellState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Asks the user to confirm an irreversible action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Failed,
    Invalid(ValidationError),
    /// Another request is still in flight.
    Busy,
}

/// Marks an operation in flight until dropped.
struct Busy<'a>(&'a RwLock<ShellState>);

impl<'a> Busy<'a> {
    fn begin(state: &'a RwLock<ShellState>) -> Self {
        let mut guard = state.write();
        guard.in_flight += 1;
        guard.error = None;
        Busy(state)
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        let mut guard = self.0.write();
        guard.in_flight = guard.in_flight.saturating_sub(1);
    }
}

#[derive(Debug, Clone)]
pub struct Shell<B> {
    backend: B,
    state: Arc<RwLock<ShellState>>,
    issued_loads: Arc<AtomicU64>,
}

impl<B: ArticleBackend> Shell<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(ShellState::default())),
            issued_loads: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> ShellState {
        self.state.read().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&ShellState) -> R) -> R {
        f(&self.state.read())
    }

    fn update_state(&self, f: impl FnOnce(&mut ShellState)) {
        f(&mut self.state.write());
    }

    pub fn is_loading(&self) -> bool {
        self.with_state(ShellState::is_loading)
    }

    /// Replaces the store with the service's current listing.
    ///
    /// A failed load empties the store and raises the banner. A listing that
    /// resolves after a newer one has been applied is dropped.
    pub async fn load_articles(&self) -> bool {
        let ticket = self.issued_loads.fetch_add(1, Ordering::SeqCst) + 1;
        let _busy = Busy::begin(&self.state);

        let outcome = self.backend.list_articles().await;

        let mut state = self.state.write();
        if ticket < state.applied_load {
            debug!(ticket, applied = state.applied_load, "Discarding stale listing");
            return outcome.is_ok();
        }
        state.applied_load = ticket;
        match outcome {
            Ok(articles) => {
                info!(count = articles.len(), "Article store refreshed");
                state.articles = articles;
                true
            }
            Err(e) => {
                error!("Failed to load articles: {}", e);
                state.articles.clear();
                state.error = Some(LOAD_FAILED.to_string());
                false
            }
        }
    }

    /// Sends a new article, then reloads and returns to the feed.
    ///
    /// On failure the view is left alone so the editor keeps its input.
    pub async fn create_article(&self, article: Article) -> bool {
        let _busy = Busy::begin(&self.state);

        if let Err(e) = self.backend.create_article(&article).await {
            error!(id = ?article.id, "Failed to save article: {}", e);
            self.update_state(|s| s.error = Some(SAVE_FAILED.to_string()));
            return false;
        }

        self.load_articles().await;
        self.update_state(|s| s.view = View::Home);
        true
    }

    /// Builds the article from the editor form and creates it.
    pub async fn submit_editor(&self, form: &EditorForm) -> SubmitOutcome {
        if self.is_loading() {
            debug!("Submit ignored while a request is in flight");
            return SubmitOutcome::Busy;
        }
        let article = match form.build(Local::now()) {
            Ok(article) => article,
            Err(e) => return SubmitOutcome::Invalid(e),
        };
        if self.create_article(article).await {
            SubmitOutcome::Created
        } else {
            SubmitOutcome::Failed
        }
    }

    /// Deletes by id once `confirm` agrees, then reloads.
    pub async fn delete_article(&self, id: &ArticleId, confirm: &impl Confirm) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(%id, "Delete cancelled");
            return false;
        }

        let _busy = Busy::begin(&self.state);

        if let Err(e) = self.backend.delete_article(id).await {
            error!(%id, "Failed to delete article: {}", e);
            self.update_state(|s| s.error = Some(DELETE_FAILED.to_string()));
            return false;
        }

        self.load_articles().await;
        true
    }

    /// Delete action of the detail view. Always ends on the feed.
    pub async fn delete_selected(&self, confirm: &impl Confirm) -> bool {
        let (selected, admin_mode) =
            self.with_state(|s| (s.selected.as_ref().map(|a| a.id.clone()), s.admin_mode));

        let deleted = match selected {
            Some(Some(id)) if admin_mode => self.delete_article(&id, confirm).await,
            Some(_) if !admin_mode => {
                warn!("Delete requested outside admin mode");
                false
            }
            Some(_) => {
                warn!("Selected article has no id to delete by");
                false
            }
            None => {
                warn!("Delete requested with no article selected");
                false
            }
        };
        self.go_home();
        deleted
    }

    pub fn open_article(&self, article: Article) {
        self.update_state(|s| {
            s.selected = Some(article);
            s.view = View::Article;
            s.scroll_to_top = true;
        });
    }

    /// Opens the stored article whose id matches `raw`.
    pub fn open_article_by_id(&self, raw: &str) -> bool {
        let found = self.with_state(|s| s.articles.iter().find(|a| a.id_matches(raw)).cloned());
        match found {
            Some(article) => {
                self.open_article(article);
                true
            }
            None => false,
        }
    }

    pub fn go_home(&self) {
        self.update_state(|s| {
            s.view = View::Home;
            s.selected = None;
            s.scroll_to_top = true;
        });
    }

    /// Switches to the editor and turns admin mode on for good.
    pub fn open_editor(&self) {
        self.update_state(|s| {
            s.view = View::Admin;
            s.admin_mode = true;
        });
    }

    pub fn dismiss_error(&self) {
        self.update_state(|s| s.error = None);
    }

    /// Whether the screen should be scrolled back to the top, clearing the request.
    pub fn take_scroll_reset(&self) -> bool {
        let mut state = self.state.write();
        std::mem::take(&mut state.scroll_to_top)
    }
}
