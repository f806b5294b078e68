//! Listing feed controller.
//!
//! Every page request is tagged with the generation that was current when it
//! was issued. A criteria change bumps the generation, so responses that
//! arrive later for older generations are recognised and dropped without
//! touching the feed. Within one generation at most one request is ever
//! outstanding, which keeps committed pages in cursor order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::gateway::PageQuery;
use crate::model::{Attraction, Criteria, PageResponse};
use crate::{AppError, AppResult, FIRST_PAGE};

pub type Generation = u64;

/// Ledger entry for one outstanding page request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    pub generation: Generation,
    pub query: PageQuery,
}

impl FetchTicket {
    pub fn is_first_page(&self) -> bool {
        self.query.is_first_page()
    }
}

/// What the renderer has to do after a fetch completed.
#[derive(Clone, Debug, PartialEq)]
pub enum Reconciliation {
    /// The response belonged to a superseded generation (or was already
    /// settled) and was dropped.
    Stale,
    Replace {
        items: Vec<Attraction>,
        exhausted: bool,
    },
    Append {
        items: Vec<Attraction>,
        exhausted: bool,
    },
    Failed {
        error: AppError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    /// Not started, or waiting for the sentinel.
    Idle,
    Loading,
    /// Every page for the current criteria has been rendered.
    Exhausted,
    /// The current criteria matched nothing.
    Empty,
    Failed,
}

#[derive(Debug)]
struct FeedState {
    started: bool,
    criteria: Criteria,
    next_cursor: Option<u32>,
    generation: Generation,
    in_flight: bool,
    items: Vec<Attraction>,
    failure: Option<AppError>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            started: false,
            criteria: Criteria::default(),
            next_cursor: Some(FIRST_PAGE),
            generation: 0,
            in_flight: false,
            items: Vec::new(),
            failure: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FeedController {
    state: FeedState,
}

impl FeedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the feed with no filters and requests the first page.
    ///
    /// The first call keeps generation 0. Calling it again restarts the feed
    /// under a new generation so nothing requested before can commit.
    pub fn start(&mut self) -> FetchTicket {
        if self.state.started {
            self.state.generation += 1;
        }
        self.state.started = true;
        self.state.criteria = Criteria::default();
        self.reset_pages();

        info!(generation = self.state.generation, "feed started");
        self.issue_fetch(FIRST_PAGE)
    }

    /// Switches to `criteria` and requests its first page, superseding any
    /// outstanding request. Unchanged criteria are a no-op.
    pub fn on_criteria_changed(&mut self, criteria: Criteria) -> Option<FetchTicket> {
        let criteria = criteria.normalized();
        if self.state.started && criteria == self.state.criteria {
            debug!(generation = self.state.generation, "criteria unchanged");
            return None;
        }

        if self.state.started {
            self.state.generation += 1;
        }
        self.state.started = true;
        self.state.criteria = criteria;
        self.reset_pages();

        info!(
            generation = self.state.generation,
            category = self.state.criteria.category.as_deref().unwrap_or(""),
            keyword = self.state.criteria.keyword.as_deref().unwrap_or(""),
            "criteria changed"
        );
        Some(self.issue_fetch(FIRST_PAGE))
    }

    /// Requests the next page when the load-more marker becomes visible.
    ///
    /// Ignored while a request of the current generation is outstanding or
    /// once the cursor is terminal, so repeated signals never duplicate a
    /// fetch.
    pub fn on_sentinel_visible(&mut self) -> Option<FetchTicket> {
        if !self.state.started {
            return None;
        }
        if self.state.in_flight {
            debug!(
                generation = self.state.generation,
                "continuation suppressed: fetch in flight"
            );
            return None;
        }
        let Some(page) = self.state.next_cursor else {
            debug!(
                generation = self.state.generation,
                "continuation suppressed: no more pages"
            );
            return None;
        };
        Some(self.issue_fetch(page))
    }

    /// Settles a completed fetch. Runs exactly once per ticket.
    pub fn reconcile(
        &mut self,
        ticket: &FetchTicket,
        outcome: AppResult<PageResponse>,
    ) -> Reconciliation {
        if ticket.generation != self.state.generation {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.state.generation,
                page = ticket.query.page,
                "discarding stale page"
            );
            return Reconciliation::Stale;
        }
        if !self.state.in_flight || self.state.next_cursor != Some(ticket.query.page) {
            warn!(
                generation = ticket.generation,
                page = ticket.query.page,
                "discarding page that is not outstanding"
            );
            return Reconciliation::Stale;
        }

        self.state.in_flight = false;

        match outcome {
            Ok(response) => {
                self.state.next_cursor = match response.next_cursor {
                    Some(next) if next > ticket.query.page => Some(next),
                    Some(next) => {
                        warn!(
                            page = ticket.query.page,
                            next, "cursor did not advance; treating feed as exhausted"
                        );
                        None
                    }
                    None => None,
                };
                let exhausted = self.state.next_cursor.is_none();

                debug!(
                    generation = ticket.generation,
                    page = ticket.query.page,
                    count = response.items.len(),
                    exhausted,
                    "page committed"
                );

                if ticket.is_first_page() {
                    self.state.items.clone_from(&response.items);
                    Reconciliation::Replace {
                        items: response.items,
                        exhausted,
                    }
                } else {
                    self.state.items.extend(response.items.iter().cloned());
                    Reconciliation::Append {
                        items: response.items,
                        exhausted,
                    }
                }
            }
            Err(error) => {
                warn!(
                    generation = ticket.generation,
                    page = ticket.query.page,
                    %error,
                    "page fetch failed; stopping continuation"
                );
                self.state.next_cursor = None;
                self.state.failure = Some(error.clone());
                Reconciliation::Failed { error }
            }
        }
    }

    pub fn items(&self) -> &[Attraction] {
        &self.state.items
    }

    pub fn criteria(&self) -> &Criteria {
        &self.state.criteria
    }

    pub fn next_cursor(&self) -> Option<u32> {
        self.state.next_cursor
    }

    pub fn generation(&self) -> Generation {
        self.state.generation
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.state.in_flight
    }

    pub fn has_more(&self) -> bool {
        self.state.started && self.state.next_cursor.is_some()
    }

    pub fn failure(&self) -> Option<&AppError> {
        self.state.failure.as_ref()
    }

    pub fn status(&self) -> FeedStatus {
        if self.state.failure.is_some() {
            FeedStatus::Failed
        } else if self.state.in_flight {
            FeedStatus::Loading
        } else if !self.state.started || self.state.next_cursor.is_some() {
            FeedStatus::Idle
        } else if self.state.items.is_empty() {
            FeedStatus::Empty
        } else {
            FeedStatus::Exhausted
        }
    }

    fn reset_pages(&mut self) {
        self.state.items.clear();
        self.state.next_cursor = Some(FIRST_PAGE);
        self.state.in_flight = false;
        self.state.failure = None;
    }

    fn issue_fetch(&mut self, page: u32) -> FetchTicket {
        self.state.in_flight = true;
        FetchTicket {
            generation: self.state.generation,
            query: PageQuery::new(page, &self.state.criteria),
        }
    }
}
