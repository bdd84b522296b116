use crate::core::catalog::Catalog;
use crate::core::search::{case_matches, normalize_query};
use crate::domain::model::CaseStudy;
use crate::utils::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Category value the case list uses for "no restriction".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl FromStr for SortOrder {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title" => Ok(Self::Title),
            other => Err(SiteError::validation(format!(
                "Unknown sort order '{}'. Valid values: newest, oldest, title",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub category: Option<String>,
    pub query: Option<String>,
    pub sort: SortOrder,
    pub featured_only: bool,
}

impl CaseFilter {
    fn category_needle(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
            .map(str::to_lowercase)
    }

    /// Filters then sorts the catalog's case studies. The sort is stable, so
    /// ties keep catalog order.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a CaseStudy> {
        let category = self.category_needle();
        let needle = self.query.as_deref().and_then(normalize_query);

        let mut cases: Vec<&CaseStudy> = catalog
            .case_studies
            .iter()
            .filter(|c| !self.featured_only || c.featured)
            .filter(|c| {
                category
                    .as_deref()
                    .map_or(true, |cat| c.category.to_lowercase() == cat)
            })
            .filter(|c| needle.as_deref().map_or(true, |n| case_matches(c, n)))
            .collect();

        match self.sort {
            SortOrder::Newest => cases.sort_by(|a, b| b.published.cmp(&a.published)),
            SortOrder::Oldest => cases.sort_by(|a, b| a.published.cmp(&b.published)),
            SortOrder::Title => cases.sort_by_key(|c| c.title.to_lowercase()),
        }

        cases
    }
}
