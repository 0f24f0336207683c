// src/filters.rs
//! Per-category filter selections.
//!
//! Each category is either unrestricted or restricted to a set of concrete
//! options; the `ShowAll` sentinel never coexists with concrete options once
//! [`FilterState::select`] returns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{FilterCategory, FilterOption, Identifier};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "options", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Unrestricted,
    Restricted(Vec<FilterOption>),
}

impl Selection {
    /// Normalize a raw multi-select choice.
    pub fn from_choice(chosen: &[FilterOption]) -> Self {
        let mut concrete: Vec<FilterOption> = Vec::new();
        for option in chosen {
            match option {
                FilterOption::ShowAll => {}
                FilterOption::Value { value, .. } => {
                    if !concrete.iter().any(|o| o.value() == Some(value)) {
                        concrete.push(option.clone());
                    }
                }
            }
        }

        if concrete.is_empty() {
            Selection::Unrestricted
        } else {
            Selection::Restricted(concrete)
        }
    }

    /// Options as a multi-select widget should display them.
    pub fn displayed_options(&self) -> Vec<FilterOption> {
        match self {
            Selection::Unrestricted => vec![FilterOption::ShowAll],
            Selection::Restricted(options) => options.clone(),
        }
    }

    pub fn values(&self) -> Vec<Identifier> {
        match self {
            Selection::Unrestricted => Vec::new(),
            Selection::Restricted(options) => {
                options.iter().filter_map(|o| o.value().cloned()).collect()
            }
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Selection::Unrestricted)
    }
}

/// Immutable snapshot of every category's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selections: BTreeMap<FilterCategory, Selection>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the state with `category` set from `chosen`.
    pub fn select(&self, category: FilterCategory, chosen: &[FilterOption]) -> Self {
        let mut next = self.clone();
        match Selection::from_choice(chosen) {
            Selection::Unrestricted => {
                next.selections.remove(&category);
            }
            restricted => {
                next.selections.insert(category, restricted);
            }
        }
        next
    }

    pub fn selection(&self, category: FilterCategory) -> Selection {
        self.selections.get(&category).cloned().unwrap_or_default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn to_query_filters(&self) -> QueryFilters {
        let values = |category| self.selection(category).values();
        QueryFilters {
            company_id: values(FilterCategory::Company),
            experience_level: values(FilterCategory::ExperienceLevel),
            stream_id: values(FilterCategory::Stream),
            education_level: values(FilterCategory::EducationLevel),
            major_id: values(FilterCategory::Major),
        }
    }
}

/// Filter lists as the listing endpoint expects them; empty means unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilters {
    pub company_id: Vec<Identifier>,
    pub experience_level: Vec<Identifier>,
    pub stream_id: Vec<Identifier>,
    pub education_level: Vec<Identifier>,
    pub major_id: Vec<Identifier>,
}

impl QueryFilters {
    pub fn get(&self, category: FilterCategory) -> &[Identifier] {
        match category {
            FilterCategory::Company => &self.company_id,
            FilterCategory::ExperienceLevel => &self.experience_level,
            FilterCategory::Stream => &self.stream_id,
            FilterCategory::EducationLevel => &self.education_level,
            FilterCategory::Major => &self.major_id,
        }
    }

    pub fn to_body_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        FilterCategory::ALL
            .into_iter()
            .map(|category| {
                (
                    category.query_key().to_string(),
                    serde_json::json!(self.get(category)),
                )
            })
            .collect()
    }
}

/// Options offered for a category: the sentinel first, then (for majors) the
/// "all majors" choice, then the reference list.
pub fn selectable_options(category: FilterCategory, reference: Vec<FilterOption>) -> Vec<FilterOption> {
    let mut options = vec![FilterOption::ShowAll];
    if category == FilterCategory::Major {
        options.push(FilterOption::all_majors());
    }
    options.extend(reference);
    options
}
