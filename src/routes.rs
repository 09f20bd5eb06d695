//! Path-to-view route table

/// Top-level views of the application
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Search,
    Trainer,
    Favorites,
    About,
    Help,
}

/// Route table; any other path redirects to the first entry
pub const ROUTES: [(&str, View); 5] = [
    ("/search", View::Search),
    ("/trainer", View::Trainer),
    ("/favorites", View::Favorites),
    ("/about", View::About),
    ("/help", View::Help),
];

impl View {
    /// Resolve a route path, falling back to `/search`
    pub fn from_path(path: &str) -> View {
        let path = path.trim_end_matches('/');
        ROUTES
            .iter()
            .find(|(route, _)| *route == path)
            .map(|(_, view)| *view)
            .unwrap_or_default()
    }

    pub fn path(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, view)| view == self)
            .map(|(route, _)| *route)
            .unwrap_or("/search")
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Search => "Search",
            View::Trainer => "Trainer",
            View::Favorites => "Favorites",
            View::About => "About",
            View::Help => "Help",
        }
    }

    /// Position in the tab bar
    pub fn index(&self) -> usize {
        ROUTES.iter().position(|(_, view)| view == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        ROUTES.get(index).map(|(_, view)| *view)
    }
}
