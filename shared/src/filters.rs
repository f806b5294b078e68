use crate::model::{normalize, Criteria};
use crate::view::CategoryOption;

pub const ALL_CATEGORIES_LABEL: &str = "All categories";

/// Search form state.
///
/// The category applies as soon as it is picked. The keyword is a draft
/// until the search is submitted, so typing alone never reaches the feed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterInputs {
    categories: Vec<String>,
    mrts: Vec<String>,
    selected_category: Option<String>,
    keyword_draft: String,
    applied_keyword: Option<String>,
}

impl FilterInputs {
    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    pub fn set_mrts(&mut self, mrts: Vec<String>) {
        self.mrts = mrts;
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn mrts(&self) -> &[String] {
        &self.mrts
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn keyword_draft(&self) -> &str {
        &self.keyword_draft
    }

    /// Selecting a blank label is the same as "all categories".
    pub fn select_category(&mut self, category: Option<String>) -> Criteria {
        self.selected_category = normalize(category.as_deref());
        self.criteria()
    }

    pub fn edit_keyword(&mut self, text: impl Into<String>) {
        self.keyword_draft = text.into();
    }

    pub fn submit(&mut self) -> Criteria {
        self.applied_keyword = normalize(Some(self.keyword_draft.as_str()));
        self.criteria()
    }

    /// Picking a station fills the keyword box with its name and submits.
    pub fn pick_mrt(&mut self, station: impl Into<String>) -> Criteria {
        self.keyword_draft = station.into();
        self.submit()
    }

    /// The filters the feed should currently be running with.
    pub fn criteria(&self) -> Criteria {
        Criteria {
            category: self.selected_category.clone(),
            keyword: self.applied_keyword.clone(),
        }
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        let all = CategoryOption {
            value: None,
            label: ALL_CATEGORIES_LABEL.to_string(),
            selected: self.selected_category.is_none(),
        };
        std::iter::once(all)
            .chain(self.categories.iter().map(|category| CategoryOption {
                value: Some(category.clone()),
                label: category.clone(),
                selected: self.selected_category.as_deref() == Some(category.as_str()),
            }))
            .collect()
    }

    /// Clears the form but keeps the loaded dropdown data.
    pub fn reset(&mut self) {
        self.selected_category = None;
        self.keyword_draft.clear();
        self.applied_keyword = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_is_draft_until_submitted() {
        let mut inputs = FilterInputs::default();
        inputs.edit_keyword("tea");

        assert!(inputs.criteria().is_unfiltered());
        assert_eq!(inputs.submit(), Criteria::new(None, Some("tea")));
    }

    #[test]
    fn test_category_applies_with_current_applied_keyword() {
        let mut inputs = FilterInputs::default();
        inputs.edit_keyword("park");
        inputs.submit();
        inputs.edit_keyword("unsubmitted");

        let criteria = inputs.select_category(Some("親子共遊".into()));

        assert_eq!(criteria, Criteria::new(Some("親子共遊"), Some("park")));
    }

    #[test]
    fn test_blank_category_means_all() {
        let mut inputs = FilterInputs::default();
        inputs.select_category(Some("其他".into()));

        let criteria = inputs.select_category(Some("  ".into()));

        assert_eq!(criteria.category, None);
        assert_eq!(inputs.selected_category(), None);
    }

    #[test]
    fn test_blank_submit_clears_keyword() {
        let mut inputs = FilterInputs::default();
        inputs.edit_keyword("tea");
        inputs.submit();
        inputs.edit_keyword("   ");

        assert!(inputs.submit().is_unfiltered());
    }

    #[test]
    fn test_pick_mrt_fills_keyword_and_submits() {
        let mut inputs = FilterInputs::default();
        inputs.set_mrts(vec!["淡水".into(), "北投".into()]);

        let criteria = inputs.pick_mrt("北投");

        assert_eq!(inputs.keyword_draft(), "北投");
        assert_eq!(criteria.keyword.as_deref(), Some("北投"));
    }

    #[test]
    fn test_category_options_mark_selection() {
        let mut inputs = FilterInputs::default();
        inputs.set_categories(vec!["其他".into(), "養生溫泉".into()]);

        let options = inputs.category_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, ALL_CATEGORIES_LABEL);
        assert!(options[0].selected);

        inputs.select_category(Some("養生溫泉".into()));
        let options = inputs.category_options();
        assert!(!options[0].selected);
        assert!(options[2].selected);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn test_reset_keeps_dropdown_data() {
        let mut inputs = FilterInputs::default();
        inputs.set_categories(vec!["其他".into()]);
        inputs.select_category(Some("其他".into()));
        inputs.edit_keyword("x");
        inputs.submit();

        inputs.reset();

        assert!(inputs.criteria().is_unfiltered());
        assert_eq!(inputs.keyword_draft(), "");
        assert_eq!(inputs.categories().len(), 1);
    }
}
