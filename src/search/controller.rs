//! Interactive search state.
//!
//! The controller owns everything the search box and result panel show. Each
//! submit hands out a [`SearchTicket`]; the caller runs the lookup and feeds
//! the outcome back through [`SearchController::complete`]. Completions are
//! applied in arrival order, so the last lookup to finish wins. Unmounting the
//! controller (or cancelling a ticket) turns later completions into no-ops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use super::source::NutritionSource;
use super::suggest::suggest;
use crate::error::NutritionError;
use crate::nutrition::dto::NutritionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Suggesting,
    Loading,
    ResultShown,
    NoResult,
}

/// Handle for one in-flight lookup.
#[derive(Debug)]
pub struct SearchTicket {
    id: u64,
    food: String,
    cancelled: AtomicBool,
    mounted: Arc<AtomicBool>,
}

impl SearchTicket {
    pub fn food(&self) -> &str {
        &self.food
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst) && self.mounted.load(Ordering::SeqCst)
    }

    pub async fn run(
        &self,
        source: &dyn NutritionSource,
    ) -> Result<NutritionResult, NutritionError> {
        source.lookup(&self.food).await
    }
}

#[derive(Debug)]
pub struct SearchController {
    query: String,
    suggestions: Vec<&'static str>,
    panel_open: bool,
    loading: bool,
    settled: SearchPhase,
    result: Option<NutritionResult>,
    next_ticket: u64,
    mounted: Arc<AtomicBool>,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            panel_open: false,
            loading: false,
            settled: SearchPhase::Idle,
            result: None,
            next_ticket: 0,
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.panel_visible() {
            SearchPhase::Suggesting
        } else {
            self.settled
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[&'static str] {
        &self.suggestions
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_open && !self.suggestions.is_empty()
    }

    pub fn result(&self) -> Option<&NutritionResult> {
        self.result.as_ref()
    }

    pub fn input_enabled(&self) -> bool {
        !self.loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Loading..."
        } else {
            "Search"
        }
    }

    /// Text box changed.
    pub fn input(&mut self, text: &str) {
        self.query = text.to_string();
        self.suggestions = suggest(text);
        self.panel_open = !self.suggestions.is_empty();
    }

    pub fn focus(&mut self) {
        if !self.suggestions.is_empty() {
            self.panel_open = true;
        }
    }

    pub fn click_outside(&mut self) {
        self.panel_open = false;
    }

    /// Picks the suggestion at `index` and searches for it.
    pub fn choose_suggestion(&mut self, index: usize) -> Option<SearchTicket> {
        let food = *self.suggestions.get(index)?;
        self.query = food.to_string();
        self.panel_open = false;
        self.submit_term(food)
    }

    /// Searches for the current text box contents.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        let query = self.query.clone();
        self.submit_term(&query)
    }

    /// Blank terms are ignored and leave the state untouched.
    pub fn submit_term(&mut self, term: &str) -> Option<SearchTicket> {
        let food = term.trim();
        if food.is_empty() {
            return None;
        }

        self.loading = true;
        self.panel_open = false;
        self.result = None;
        self.next_ticket += 1;

        debug!(ticket = self.next_ticket, %food, "search started");
        Some(SearchTicket {
            id: self.next_ticket,
            food: food.to_string(),
            cancelled: AtomicBool::new(false),
            mounted: Arc::clone(&self.mounted),
        })
    }

    /// Applies a finished lookup. Returns `false` when the ticket was
    /// cancelled or the controller unmounted, in which case nothing changes.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<NutritionResult, NutritionError>,
    ) -> bool {
        if !ticket.is_live() {
            debug!(ticket = ticket.id, "discarding stale search result");
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.settled = SearchPhase::ResultShown;
            }
            Err(e) => {
                warn!(ticket = ticket.id, error = %e, "search produced no result");
                self.result = None;
                self.settled = SearchPhase::NoResult;
            }
        }
        true
    }

    /// Submits the current text and waits for the answer.
    pub async fn search(&mut self, source: &dyn NutritionSource) -> SearchPhase {
        if let Some(ticket) = self.submit() {
            let outcome = ticket.run(source).await;
            self.complete(ticket, outcome);
        }
        self.phase()
    }

    pub fn unmount(&mut self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}
