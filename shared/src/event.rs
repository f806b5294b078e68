use serde::{Deserialize, Serialize};

use crate::capabilities::HttpResult;
use crate::feed::FetchTicket;

// --- Event enum: shell inputs first, capability responses boxed ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Listing
    ListingMounted,
    CategorySelected {
        category: Option<String>,
    },
    KeywordEdited {
        text: String,
    },
    SearchSubmitted,
    MrtSelected {
        station: String,
    },
    SentinelIntersectionChanged {
        intersecting: bool,
    },

    // Detail
    DetailMounted {
        path: String,
    },
    CarouselAdvanced,
    CarouselRetreated,
    CarouselSegmentSelected {
        index: usize,
    },

    // Capability Responses (boxed to keep enum size small)
    PageLoaded {
        ticket: Box<FetchTicket>,
        result: Box<HttpResult>,
    },
    CategoriesLoaded(Box<HttpResult>),
    MrtsLoaded(Box<HttpResult>),
    AttractionLoaded {
        id: u64,
        result: Box<HttpResult>,
    },
}

impl Event {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ListingMounted => "listing_mounted",
            Self::CategorySelected { .. } => "category_selected",
            Self::KeywordEdited { .. } => "keyword_edited",
            Self::SearchSubmitted => "search_submitted",
            Self::MrtSelected { .. } => "mrt_selected",
            Self::SentinelIntersectionChanged { .. } => "sentinel_intersection_changed",
            Self::DetailMounted { .. } => "detail_mounted",
            Self::CarouselAdvanced => "carousel_advanced",
            Self::CarouselRetreated => "carousel_retreated",
            Self::CarouselSegmentSelected { .. } => "carousel_segment_selected",
            Self::PageLoaded { .. } => "page_loaded",
            Self::CategoriesLoaded(_) => "categories_loaded",
            Self::MrtsLoaded(_) => "mrts_loaded",
            Self::AttractionLoaded { .. } => "attraction_loaded",
        }
    }

    /// `false` for events the core sends itself when a capability resolves.
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::PageLoaded { .. }
                | Self::CategoriesLoaded(_)
                | Self::MrtsLoaded(_)
                | Self::AttractionLoaded { .. }
        )
    }
}
