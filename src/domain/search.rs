//! Car search filters.

/// Optional filters for a car search.
///
/// Every filter is optional; a blank string or an empty name set counts as
/// absent. Year bounds stay raw strings here and are parsed when the
/// predicate is built, so a malformed bound is reported to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParameters {
    /// Exact manufacturer name
    pub manufacturer_name: Option<String>,
    /// Exact model name
    pub model: Option<String>,
    /// Match-any set of category names
    pub category_names: Vec<String>,
    /// Inclusive lower bound on production year
    pub min_year: Option<String>,
    /// Inclusive upper bound on production year
    pub max_year: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl SearchParameters {
    pub fn manufacturer_name(&self) -> Option<&str> {
        present(&self.manufacturer_name)
    }

    pub fn model(&self) -> Option<&str> {
        present(&self.model)
    }

    pub fn min_year(&self) -> Option<&str> {
        present(&self.min_year)
    }

    pub fn max_year(&self) -> Option<&str> {
        present(&self.max_year)
    }

    /// Non-blank category names, without duplicates, in first-seen order
    pub fn category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.category_names.len());
        for name in &self.category_names {
            if !name.trim().is_empty() && !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// True when no filter is present
    pub fn is_unfiltered(&self) -> bool {
        self.manufacturer_name().is_none()
            && self.model().is_none()
            && self.min_year().is_none()
            && self.max_year().is_none()
            && self.category_names().is_empty()
    }

    pub fn with_manufacturer(mut self, name: impl Into<String>) -> Self {
        self.manufacturer_name = Some(name.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_years(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.min_year = min.map(str::to_owned);
        self.max_year = max.map(str::to_owned);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_absent() {
        let params = SearchParameters {
            manufacturer_name: Some("  ".into()),
            model: Some(String::new()),
            category_names: vec!["".into(), " ".into()],
            min_year: None,
            max_year: Some("\t".into()),
        };
        assert!(params.is_unfiltered());
    }

    #[test]
    fn test_category_names_are_deduplicated() {
        let params = SearchParameters::default().with_categories(["Compact", "SUV", "Compact"]);
        assert_eq!(params.category_names(), vec!["Compact", "SUV"]);
        assert!(!params.is_unfiltered());
    }
}
