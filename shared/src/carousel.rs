use serde::{Deserialize, Serialize};

/// Image gallery position on the detail view.
///
/// Transitions wrap in both directions. A carousel built with no images is
/// inert: it shows nothing and ignores every transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carousel {
    index: usize,
    image_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSegment {
    pub index: usize,
    pub active: bool,
}

impl Carousel {
    pub fn new(image_count: usize) -> Self {
        Self {
            index: 0,
            image_count,
        }
    }

    pub fn index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn is_empty(&self) -> bool {
        self.image_count == 0
    }

    /// Returns the new index, or `None` when there is nothing to show.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.image_count;
        Some(self.index)
    }

    pub fn retreat(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.index = self
            .index
            .checked_sub(1)
            .unwrap_or(self.image_count - 1);
        Some(self.index)
    }

    /// Jumps to `index`; out-of-range requests leave the position unchanged.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.image_count {
            return None;
        }
        self.index = index;
        Some(self.index)
    }

    pub fn current_image<'a>(&self, images: &'a [String]) -> Option<&'a str> {
        self.index().and_then(|i| images.get(i)).map(String::as_str)
    }

    pub fn segments(&self) -> Vec<IndicatorSegment> {
        (0..self.image_count)
            .map(|index| IndicatorSegment {
                index,
                active: index == self.index,
            })
            .collect()
    }
}
