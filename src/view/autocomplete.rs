use crate::models::search::{Catalog, Suggestion};
use crate::services::search_service::SearchService;

/// Handle for one lookup. Only the ticket from the most recent
/// [`Autocomplete::input`] call can deliver results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// State of one search-as-you-type selection field.
#[derive(Debug, Clone)]
pub struct Autocomplete {
    catalog: Catalog,
    input: String,
    options: Vec<Suggestion>,
    selected: Option<Suggestion>,
    latest: u64,
}

impl Autocomplete {
    pub fn new(catalog: Catalog) -> Self {
        Autocomplete {
            catalog,
            input: String::new(),
            options: Vec::new(),
            selected: None,
            latest: 0,
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn options(&self) -> &[Suggestion] {
        &self.options
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.selected.as_ref()
    }

    /// Record a keystroke. Returns the ticket to look up, or `None` for blank
    /// input, which clears the options. Any earlier ticket becomes stale.
    pub fn input(&mut self, text: &str) -> Option<SearchTicket> {
        self.input = text.to_string();
        self.latest += 1;

        if self
            .selected
            .as_ref()
            .map_or(false, |s| self.display(s) != self.input)
        {
            self.selected = None;
        }

        let query = text.trim();
        if query.is_empty() {
            self.options.clear();
            self.selected = None;
            return None;
        }

        Some(SearchTicket {
            seq: self.latest,
            query: query.to_string(),
        })
    }

    /// Install lookup results. Results for a superseded ticket are dropped
    /// and `false` is returned.
    pub fn accept(&mut self, ticket: &SearchTicket, suggestions: Vec<Suggestion>) -> bool {
        if ticket.seq != self.latest {
            tracing::trace!(stale = ticket.seq, latest = self.latest, "dropping stale suggestions");
            return false;
        }
        self.options = suggestions;
        true
    }

    /// Pick a suggestion, or clear the pick with `None`.
    pub fn select(&mut self, suggestion: Option<Suggestion>) {
        match suggestion {
            Some(s) => {
                self.input = self.display(&s);
                self.selected = Some(s);
            }
            None => {
                self.input.clear();
                self.selected = None;
            }
        }
    }

    /// Keystroke plus lookup in one step.
    pub async fn search(&mut self, text: &str, service: &SearchService) -> bool {
        match self.input(text) {
            Some(ticket) => {
                let suggestions = service.suggest(self.catalog, ticket.query()).await;
                self.accept(&ticket, suggestions)
            }
            None => false,
        }
    }

    // airports show "Name (IATA)", airlines just the name
    fn display(&self, suggestion: &Suggestion) -> String {
        match self.catalog {
            Catalog::Airport => suggestion.label(),
            Catalog::Airline => suggestion.name.clone(),
        }
    }
}
