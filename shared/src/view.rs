use serde::{Deserialize, Serialize};

use crate::cards::AttractionCard;
use crate::carousel::IndicatorSegment;
use crate::model::Criteria;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub listing: ListingView,
    pub detail: Option<DetailView>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingView {
    pub cards: Vec<AttractionCard>,
    pub status: ListingStatus,
    pub criteria: Criteria,
    pub keyword_draft: String,
    pub category_options: Vec<CategoryOption>,
    pub mrt_stations: Vec<String>,
    pub has_more: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Idle,
    Loading,
    Exhausted,
    Empty,
    Failed { message: String },
}

/// Entry of the category dropdown; `value: None` is "all categories".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: Option<String>,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetailView {
    Loading {
        id: u64,
    },
    Loaded {
        id: u64,
        name: String,
        subtitle: String,
        description: String,
        address: String,
        transport: String,
        current_image: Option<String>,
        segments: Vec<IndicatorSegment>,
    },
    Failed {
        message: String,
    },
}
