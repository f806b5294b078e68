use tracing::{debug, warn};

use crate::capabilities::Capabilities;
use crate::cards::build_cards;
use crate::detail::{parse_attraction_id, DetailPage};
use crate::event::Event;
use crate::feed::{FeedStatus, FetchTicket, Reconciliation};
use crate::gateway;
use crate::model::{Criteria, Model};
use crate::sentinel::SentinelCommand;
use crate::view::{ListingStatus, ListingView, ViewModel};
use crate::SENTINEL_TARGET;

#[derive(Default)]
pub struct App;

impl App {
    /// Sends the page request for `ticket`. A request that cannot even be
    /// built settles the ticket as a failure right away.
    fn issue(model: &mut Model, caps: &Capabilities, ticket: FetchTicket) {
        match gateway::page_request(&model.api, &ticket.query) {
            Ok(request) => {
                debug!(
                    generation = ticket.generation,
                    page = ticket.query.page,
                    request_id = request.request_id(),
                    "fetching page"
                );
                caps.http.send(request, move |result| Event::PageLoaded {
                    ticket: Box::new(ticket),
                    result: Box::new(result),
                });
            }
            Err(error) => {
                let outcome = model.feed.reconcile(&ticket, Err(error));
                Self::apply_reconciliation(model, caps, outcome);
            }
        }
    }

    /// A new generation starts from an empty grid with observation
    /// re-established.
    fn begin_generation(model: &mut Model, caps: &Capabilities, ticket: FetchTicket) {
        caps.grid.replace(Vec::new());
        Self::drive_sentinel(caps, model.sentinel.arm());
        Self::issue(model, caps, ticket);
    }

    fn change_criteria(model: &mut Model, caps: &Capabilities, criteria: Criteria) {
        if let Some(ticket) = model.feed.on_criteria_changed(criteria) {
            Self::begin_generation(model, caps, ticket);
        }
    }

    fn apply_reconciliation(model: &mut Model, caps: &Capabilities, outcome: Reconciliation) {
        match outcome {
            Reconciliation::Stale => {}
            Reconciliation::Replace { items, exhausted } => {
                caps.grid.replace(build_cards(&items));
                Self::after_commit(model, caps, exhausted);
            }
            Reconciliation::Append { items, exhausted } => {
                caps.grid.append(build_cards(&items));
                Self::after_commit(model, caps, exhausted);
            }
            Reconciliation::Failed { error } => {
                caps.grid.show_message(error.user_facing_message());
                if let Some(command) = model.sentinel.disarm() {
                    Self::drive_sentinel(caps, command);
                }
            }
        }
    }

    /// Re-observing after every page makes the shell report the marker
    /// afresh, so a short page that leaves it on screen keeps loading.
    fn after_commit(model: &mut Model, caps: &Capabilities, exhausted: bool) {
        let command = if exhausted {
            model.sentinel.disarm()
        } else {
            Some(model.sentinel.arm())
        };
        if let Some(command) = command {
            Self::drive_sentinel(caps, command);
        }
    }

    fn drive_sentinel(caps: &Capabilities, command: SentinelCommand) {
        match command {
            SentinelCommand::Observe => caps.viewport.observe(SENTINEL_TARGET),
            SentinelCommand::Disconnect => caps.viewport.disconnect(SENTINEL_TARGET),
        }
    }

    fn listing_view(model: &Model) -> ListingView {
        let status = match model.feed.status() {
            FeedStatus::Idle => ListingStatus::Idle,
            FeedStatus::Loading => ListingStatus::Loading,
            FeedStatus::Exhausted => ListingStatus::Exhausted,
            FeedStatus::Empty => ListingStatus::Empty,
            FeedStatus::Failed => ListingStatus::Failed {
                message: model
                    .feed
                    .failure()
                    .map(crate::AppError::user_facing_message)
                    .unwrap_or_default(),
            },
        };

        ListingView {
            cards: build_cards(model.feed.items()),
            status,
            criteria: model.feed.criteria().clone(),
            keyword_draft: model.filters.keyword_draft().to_string(),
            category_options: model.filters.category_options(),
            mrt_stations: model.filters.mrts().to_vec(),
            has_more: model.feed.has_more(),
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(
            event = event.name(),
            user = event.is_user_initiated(),
            "update"
        );

        match event {
            Event::ListingMounted => {
                model.filters.reset();
                let ticket = model.feed.start();
                Self::begin_generation(model, caps, ticket);

                match gateway::categories_request(&model.api) {
                    Ok(request) => caps
                        .http
                        .send(request, |result| Event::CategoriesLoaded(Box::new(result))),
                    Err(error) => warn!(%error, "could not request categories"),
                }
                match gateway::mrts_request(&model.api) {
                    Ok(request) => caps
                        .http
                        .send(request, |result| Event::MrtsLoaded(Box::new(result))),
                    Err(error) => warn!(%error, "could not request stations"),
                }

                caps.render.render();
            }

            Event::CategorySelected { category } => {
                let criteria = model.filters.select_category(category);
                Self::change_criteria(model, caps, criteria);
                caps.render.render();
            }

            Event::KeywordEdited { text } => {
                model.filters.edit_keyword(text);
                caps.render.render();
            }

            Event::SearchSubmitted => {
                let criteria = model.filters.submit();
                Self::change_criteria(model, caps, criteria);
                caps.render.render();
            }

            Event::MrtSelected { station } => {
                let criteria = model.filters.pick_mrt(station);
                Self::change_criteria(model, caps, criteria);
                caps.render.render();
            }

            Event::SentinelIntersectionChanged { intersecting } => {
                if !model.sentinel.on_intersection(intersecting) {
                    return;
                }
                if let Some(ticket) = model.feed.on_sentinel_visible() {
                    Self::issue(model, caps, ticket);
                    caps.render.render();
                }
            }

            Event::PageLoaded { ticket, result } => {
                let outcome = model.feed.reconcile(&ticket, gateway::decode_page(*result));
                if outcome != Reconciliation::Stale {
                    Self::apply_reconciliation(model, caps, outcome);
                    caps.render.render();
                }
            }

            Event::CategoriesLoaded(result) => match gateway::decode_labels(*result) {
                Ok(categories) => {
                    model.filters.set_categories(categories);
                    caps.render.render();
                }
                Err(error) => warn!(%error, "category list unavailable"),
            },

            Event::MrtsLoaded(result) => match gateway::decode_labels(*result) {
                Ok(stations) => {
                    model.filters.set_mrts(stations);
                    caps.render.render();
                }
                Err(error) => warn!(%error, "station list unavailable"),
            },

            Event::DetailMounted { path } => {
                match parse_attraction_id(&path) {
                    Ok(id) => {
                        let mut page = DetailPage::loading(id);
                        match gateway::attraction_request(&model.api, id) {
                            Ok(request) => caps.http.send(request, move |result| {
                                Event::AttractionLoaded {
                                    id,
                                    result: Box::new(result),
                                }
                            }),
                            Err(error) => {
                                page.resolve(id, Err(error));
                            }
                        }
                        model.detail = Some(page);
                    }
                    Err(error) => {
                        warn!(%error, path = path.as_str(), "rejecting detail path");
                        model.detail = Some(DetailPage::failed(&error));
                    }
                }
                caps.render.render();
            }

            Event::AttractionLoaded { id, result } => {
                let outcome = gateway::decode_attraction(*result);
                if let Some(page) = model.detail.as_mut() {
                    if page.resolve(id, outcome) {
                        caps.render.render();
                    }
                }
            }

            Event::CarouselAdvanced => {
                if let Some(carousel) = model.detail.as_mut().and_then(DetailPage::carousel_mut) {
                    if carousel.advance().is_some() {
                        caps.render.render();
                    }
                }
            }

            Event::CarouselRetreated => {
                if let Some(carousel) = model.detail.as_mut().and_then(DetailPage::carousel_mut) {
                    if carousel.retreat().is_some() {
                        caps.render.render();
                    }
                }
            }

            Event::CarouselSegmentSelected { index } => {
                if let Some(carousel) = model.detail.as_mut().and_then(DetailPage::carousel_mut) {
                    if carousel.select(index).is_some() {
                        caps.render.render();
                    }
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel {
            listing: Self::listing_view(model),
            detail: model.detail.as_ref().map(DetailPage::view),
        }
    }
}
