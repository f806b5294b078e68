use serde::{Deserialize, Serialize};

use crate::model::Attraction;
use crate::ATTRACTION_PAGE_PATH;

/// Display node for one attraction in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionCard {
    pub id: u64,
    pub href: String,
    /// First gallery image, if the attraction has any.
    pub image: Option<String>,
    pub title: String,
    pub mrt: String,
    pub category: String,
}

impl From<&Attraction> for AttractionCard {
    fn from(item: &Attraction) -> Self {
        Self {
            id: item.id,
            href: format!("{ATTRACTION_PAGE_PATH}/{}", item.id),
            image: item.images.first().cloned(),
            title: item.name.clone(),
            mrt: item.mrt.clone(),
            category: item.category.clone(),
        }
    }
}

pub fn build_cards(items: &[Attraction]) -> Vec<AttractionCard> {
    items.iter().map(AttractionCard::from).collect()
}
