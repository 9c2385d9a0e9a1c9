//! Text rendering of the shell and its three views.

pub mod detail;
pub mod editor;
pub mod feed;

use std::fmt;

pub use detail::DetailView;
pub use editor::{parse_tags, EditorForm, EditorView};
pub use feed::{Card, FeedView};

use crate::{
    feed::FeedFilter,
    shell::{ShellState, View},
};

/// Whole screen: header, banner, loading line and the active view.
///
/// `filter` and `form` are view-local input owned by whoever drives the UI.
pub struct Screen<'a> {
    pub state: &'a ShellState,
    pub filter: &'a FeedFilter,
    pub form: &'a EditorForm,
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        writeln!(f, "ECG Community Hub  |  Community Feed  |  Staff Write")?;
        writeln!(f)?;

        if let Some(error) = &state.error {
            writeln!(f, "! Error: {error}")?;
            writeln!(f, "  (dismiss to close)")?;
            writeln!(f)?;
        }
        if state.is_loading() {
            writeln!(f, "Loading...")?;
            writeln!(f)?;
        }

        match (state.view, &state.selected) {
            (View::Home, _) => write!(
                f,
                "{}",
                FeedView {
                    articles: &state.articles,
                    filter: self.filter,
                    is_loading: state.is_loading(),
                }
            ),
            (View::Article, Some(article)) => write!(
                f,
                "{}",
                DetailView {
                    article,
                    is_admin: state.admin_mode,
                }
            ),
            (View::Article, None) => Ok(()),
            (View::Admin, _) => write!(
                f,
                "{}",
                EditorView {
                    form: self.form,
                    busy: state.is_loading(),
                }
            ),
        }
    }
}
