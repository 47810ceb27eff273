use serde::{Deserialize, Serialize};

use super::domain::{LifecycleStatus, Program};

/// Tabs of the public listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingTab {
    #[default]
    Live,
    Upcoming,
    AlwaysOpen,
}

impl ListingTab {
    pub const fn status(self) -> LifecycleStatus {
        match self {
            ListingTab::Live => LifecycleStatus::Active,
            ListingTab::Upcoming => LifecycleStatus::Upcoming,
            ListingTab::AlwaysOpen => LifecycleStatus::AlwaysOpen,
        }
    }
}

/// Filters for browsing published programs without a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingQuery {
    pub tab: ListingTab,
    /// Navigation category slug, e.g. `agriculture`.
    pub category: Option<String>,
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub state: Option<String>,
}

impl ListingQuery {
    pub fn matches(&self, program: &Program) -> bool {
        program.published
            && program.lifecycle_status == self.tab.status()
            && self.matches_category(program)
            && self.matches_search(program)
            && self.matches_state(program)
    }

    fn matches_category(&self, program: &Program) -> bool {
        let Some(slug) = non_blank(self.category.as_deref()) else {
            return true;
        };
        program
            .nav_categories
            .iter()
            .any(|category| category.trim().eq_ignore_ascii_case(slug))
    }

    fn matches_search(&self, program: &Program) -> bool {
        let Some(term) = non_blank(self.search.as_deref()) else {
            return true;
        };
        let term = term.to_lowercase();
        let haystacks = [
            Some(program.title.as_str()),
            Some(program.description.as_str()),
            program.department.as_deref(),
            program.listing_category.as_deref(),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&term))
    }

    fn matches_state(&self, program: &Program) -> bool {
        let Some(state) = non_blank(self.state.as_deref()) else {
            return true;
        };
        if state.contains("All") || program.eligibility.states_unrestricted() {
            return true;
        }
        let state = state.to_lowercase();
        program
            .eligibility
            .states
            .iter()
            .any(|allowed| allowed.trim().to_lowercase() == state)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Published programs matching the query, in catalog order.
pub fn browse<'a>(programs: &'a [Program], query: &ListingQuery) -> Vec<&'a Program> {
    programs
        .iter()
        .filter(|program| query.matches(program))
        .collect()
}
