use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ApiConfig;
use crate::detail::DetailPage;
use crate::feed::FeedController;
use crate::filters::FilterInputs;
use crate::sentinel::Sentinel;

/// One attraction as listed by `/api/attractions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Nearest MRT (transit) station.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mrt: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Full record from `/api/attraction/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttractionDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mrt: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transport: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// One page of the listing. `next_cursor == None` means the listing is exhausted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "nextPage")]
    pub next_cursor: Option<u32>,
    #[serde(rename = "data")]
    pub items: Vec<Attraction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Active category/keyword filter pair. Blank values mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criteria {
    pub category: Option<String>,
    pub keyword: Option<String>,
}

impl Criteria {
    pub fn new(category: Option<&str>, keyword: Option<&str>) -> Self {
        Self {
            category: normalize(category),
            keyword: normalize(keyword),
        }
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(self.category.as_deref(), self.keyword.as_deref())
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.keyword.is_none()
    }
}

pub(crate) fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Application state. The feed state itself lives inside
/// [`FeedController`] and is only reachable through its entry points.
#[derive(Debug, Default)]
pub struct Model {
    pub api: ApiConfig,
    pub feed: FeedController,
    pub sentinel: Sentinel,
    pub filters: FilterInputs,
    pub detail: Option<DetailPage>,
}

impl Model {
    pub fn with_api(api: ApiConfig) -> Self {
        Self {
            api,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_decodes_wire_shape() {
        let json = r#"{
            "nextPage": 1,
            "data": [
                {"id": 1, "name": "Beitou Hot Spring", "category": "養生溫泉",
                 "mrt": "新北投", "images": ["https://img.example.com/1.jpg"],
                 "description": "ignored", "lat": 25.13, "lng": 121.5}
            ]
        }"#;
        let page: PageResponse = serde_json::from_str(json).unwrap();

        assert_eq!(page.next_cursor, Some(1));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].mrt, "新北投");
        assert_eq!(page.items[0].images.len(), 1);
    }

    #[test]
    fn test_null_labels_become_empty() {
        let json = r#"{"id": 7, "name": "Somewhere", "category": null, "mrt": null}"#;
        let item: Attraction = serde_json::from_str(json).unwrap();

        assert_eq!(item.category, "");
        assert_eq!(item.mrt, "");
        assert!(item.images.is_empty());
    }

    #[test]
    fn test_null_or_missing_name_becomes_empty() {
        let page: PageResponse = serde_json::from_str(
            r#"{"nextPage": 2, "data": [{"id": 3, "name": null}, {"id": 4}]}"#,
        )
        .unwrap();
        assert_eq!(page.items[0].name, "");
        assert_eq!(page.items[1].name, "");

        let detail: AttractionDetail =
            serde_json::from_str(r#"{"id": 5, "name": null, "images": []}"#).unwrap();
        assert_eq!(detail.name, "");
    }

    #[test]
    fn test_terminal_page() {
        let page: PageResponse = serde_json::from_str(r#"{"nextPage": null, "data": []}"#).unwrap();
        assert_eq!(page.next_cursor, None);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_criteria_normalizes_blank_values() {
        let criteria = Criteria::new(Some(""), Some("  tea  "));
        assert_eq!(criteria.category, None);
        assert_eq!(criteria.keyword.as_deref(), Some("tea"));

        let criteria = Criteria {
            category: Some("   ".into()),
            keyword: None,
        }
        .normalized();
        assert!(criteria.is_unfiltered());
        assert_eq!(criteria, Criteria::default());
    }
}
