//! Single attraction page: id parsing, load state and the image carousel.

use tracing::{debug, warn};

use crate::carousel::Carousel;
use crate::model::AttractionDetail;
use crate::view::DetailView;
use crate::{AppError, AppResult, INVALID_ID_MESSAGE};

/// Extracts the attraction id from a `/attraction/{id}` style path.
///
/// Only the last segment counts; query and fragment are ignored. Zero,
/// negative and non-numeric ids are rejected.
pub fn parse_attraction_id(path: &str) -> AppResult<u64> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

    match segment.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_input(INVALID_ID_MESSAGE)
            .with_internal(format!("path {path:?} has no positive id"))),
    }
}

#[derive(Clone, Debug, PartialEq)]
enum DetailState {
    Loading { id: u64 },
    Loaded { detail: AttractionDetail, carousel: Carousel },
    Failed { message: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailPage {
    state: DetailState,
}

impl DetailPage {
    pub fn loading(id: u64) -> Self {
        Self {
            state: DetailState::Loading { id },
        }
    }

    pub fn failed(error: &AppError) -> Self {
        Self {
            state: DetailState::Failed {
                message: error.user_facing_message(),
            },
        }
    }

    /// Id of the attraction still being fetched.
    pub fn pending_id(&self) -> Option<u64> {
        match self.state {
            DetailState::Loading { id } => Some(id),
            _ => None,
        }
    }

    /// Applies a fetch outcome. Returns `false` when the page is no longer
    /// waiting for `id`.
    pub fn resolve(&mut self, id: u64, outcome: AppResult<AttractionDetail>) -> bool {
        if self.pending_id() != Some(id) {
            debug!(id, "ignoring detail response for another attraction");
            return false;
        }

        self.state = match outcome {
            Ok(detail) => {
                let carousel = Carousel::new(detail.images.len());
                DetailState::Loaded { detail, carousel }
            }
            Err(error) => {
                warn!(id, %error, "attraction fetch failed");
                DetailState::Failed {
                    message: error.user_facing_message(),
                }
            }
        };
        true
    }

    pub fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        match &mut self.state {
            DetailState::Loaded { carousel, .. } => Some(carousel),
            _ => None,
        }
    }

    pub fn view(&self) -> DetailView {
        match &self.state {
            DetailState::Loading { id } => DetailView::Loading { id: *id },
            DetailState::Loaded { detail, carousel } => DetailView::Loaded {
                id: detail.id,
                name: detail.name.clone(),
                subtitle: subtitle(detail),
                description: detail.description.clone(),
                address: detail.address.clone(),
                transport: detail.transport.clone(),
                current_image: carousel.current_image(&detail.images).map(str::to_owned),
                segments: carousel.segments(),
            },
            DetailState::Failed { message } => DetailView::Failed {
                message: message.clone(),
            },
        }
    }
}

fn subtitle(detail: &AttractionDetail) -> String {
    format!("{} at {}", detail.category, detail.mrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, LOAD_FAILED_MESSAGE};

    fn detail(id: u64, images: usize) -> AttractionDetail {
        AttractionDetail {
            id,
            name: "Dadaocheng Wharf".into(),
            category: "藍色公路".into(),
            mrt: "北門".into(),
            description: "riverside".into(),
            address: "Datong".into(),
            transport: "walk".into(),
            lat: None,
            lng: None,
            images: (0..images).map(|i| format!("{i}.jpg")).collect(),
        }
    }

    #[test]
    fn test_parse_attraction_id() {
        assert_eq!(parse_attraction_id("/attraction/12").unwrap(), 12);
        assert_eq!(parse_attraction_id("/attraction/12/").unwrap(), 12);
        assert_eq!(parse_attraction_id("/attraction/7?ref=home#top").unwrap(), 7);
        assert_eq!(parse_attraction_id("33").unwrap(), 33);
    }

    #[test]
    fn test_parse_attraction_id_rejects_invalid() {
        for path in ["/attraction/0", "/attraction/-3", "/attraction/abc", "/attraction/", ""] {
            let error = parse_attraction_id(path).unwrap_err();
            assert_eq!(error.kind, ErrorKind::InvalidInput, "{path}");
            assert_eq!(error.user_facing_message(), INVALID_ID_MESSAGE);
        }
    }

    #[test]
    fn test_loaded_view_has_subtitle_and_first_image() {
        let mut page = DetailPage::loading(4);
        assert!(page.resolve(4, Ok(detail(4, 3))));

        match page.view() {
            DetailView::Loaded {
                subtitle,
                current_image,
                segments,
                ..
            } => {
                assert_eq!(subtitle, "藍色公路 at 北門");
                assert_eq!(current_image.as_deref(), Some("0.jpg"));
                assert_eq!(segments.len(), 3);
                assert!(segments[0].active);
            }
            other => panic!("expected loaded view, got {other:?}"),
        }
    }

    #[test]
    fn test_carousel_moves_current_image() {
        let mut page = DetailPage::loading(4);
        page.resolve(4, Ok(detail(4, 3)));

        page.carousel_mut().unwrap().retreat();

        match page.view() {
            DetailView::Loaded { current_image, .. } => {
                assert_eq!(current_image.as_deref(), Some("2.jpg"));
            }
            other => panic!("expected loaded view, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_fetch_shows_load_message() {
        let mut page = DetailPage::loading(9);
        page.resolve(9, Err(AppError::transport("reset")));

        assert_eq!(
            page.view(),
            DetailView::Failed {
                message: LOAD_FAILED_MESSAGE.into()
            }
        );
        assert!(page.carousel_mut().is_none());
    }

    #[test]
    fn test_mismatched_response_is_ignored() {
        let mut page = DetailPage::loading(9);
        assert!(!page.resolve(8, Ok(detail(8, 1))));
        assert_eq!(page.pending_id(), Some(9));

        page.resolve(9, Ok(detail(9, 1)));
        assert!(!page.resolve(9, Ok(detail(9, 2))));
        match page.view() {
            DetailView::Loaded { segments, .. } => assert_eq!(segments.len(), 1),
            other => panic!("expected loaded view, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_id_page() {
        let error = parse_attraction_id("/attraction/x").unwrap_err();
        let page = DetailPage::failed(&error);
        assert_eq!(
            page.view(),
            DetailView::Failed {
                message: INVALID_ID_MESSAGE.into()
            }
        );
    }
}
