// src/types/options.rs
//! Filter categories and the `{value, label}` options offered for each of them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::id::Identifier;

pub const SHOW_ALL_LABEL: &str = "Tampilkan Semua";
pub const ALL_MAJORS_VALUE: &str = "all-major";
pub const ALL_MAJORS_LABEL: &str = "Semua Jurusan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    Company,
    ExperienceLevel,
    Stream,
    EducationLevel,
    Major,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::Company,
        FilterCategory::ExperienceLevel,
        FilterCategory::Stream,
        FilterCategory::EducationLevel,
        FilterCategory::Major,
    ];

    /// Key used in the `/list-vacancy` request body.
    pub fn query_key(self) -> &'static str {
        match self {
            FilterCategory::Company => "company_id",
            FilterCategory::ExperienceLevel => "experience_level",
            FilterCategory::Stream => "stream_id",
            FilterCategory::EducationLevel => "education_level",
            FilterCategory::Major => "major_id",
        }
    }

    /// Reference list endpoint for this category.
    pub fn endpoint(self) -> &'static str {
        match self {
            FilterCategory::Company => "/list-company",
            FilterCategory::ExperienceLevel => "/list-experience-level",
            FilterCategory::Stream => "/list-stream",
            FilterCategory::EducationLevel => "/list-education-level",
            FilterCategory::Major => "/list-major",
        }
    }

    /// Field of a reference list item carrying the option value.
    pub fn value_field(self) -> &'static str {
        match self {
            FilterCategory::Company => "id",
            FilterCategory::ExperienceLevel => "experience_level_id",
            FilterCategory::Stream => "stream_id",
            FilterCategory::EducationLevel => "value",
            FilterCategory::Major => "id",
        }
    }

    /// Field of a reference list item carrying the option label.
    pub fn label_field(self) -> &'static str {
        match self {
            FilterCategory::Company => "company_name",
            FilterCategory::ExperienceLevel => "experience_level_name",
            FilterCategory::Stream => "stream_name",
            FilterCategory::EducationLevel => "label",
            FilterCategory::Major => "label",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FilterCategory::Company => "Perusahaan",
            FilterCategory::ExperienceLevel => "Jenis Pengalaman",
            FilterCategory::Stream => "Jenis Bidang",
            FilterCategory::EducationLevel => "Tingkat Pendidikan",
            FilterCategory::Major => "Jurusan",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterCategory::Company => "company",
            FilterCategory::ExperienceLevel => "experience_level",
            FilterCategory::Stream => "stream",
            FilterCategory::EducationLevel => "education_level",
            FilterCategory::Major => "major",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        FilterCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized || c.query_key() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown filter category: {}. Use company, experience_level, stream, education_level or major",
                    s
                )
            })
    }
}

impl<'a> rocket::request::FromParam<'a> for FilterCategory {
    type Error = &'a str;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse().map_err(|_| param)
    }
}

/// A selectable filter option. `ShowAll` is the "no restriction" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireOption", into = "WireOption")]
pub enum FilterOption {
    ShowAll,
    Value { value: Identifier, label: String },
}

impl FilterOption {
    pub fn new(value: impl Into<Identifier>, label: &str) -> Self {
        FilterOption::Value {
            value: value.into(),
            label: label.to_string(),
        }
    }

    /// The "all majors" choice offered on the major category.
    pub fn all_majors() -> Self {
        FilterOption::new(ALL_MAJORS_VALUE, ALL_MAJORS_LABEL)
    }

    /// Option typed on a command line: the value doubles as the label.
    pub fn from_input(raw: &str) -> Self {
        let value = Identifier::parse(raw);
        if value.is_empty() {
            FilterOption::ShowAll
        } else {
            FilterOption::Value {
                value,
                label: raw.trim().to_string(),
            }
        }
    }

    pub fn value(&self) -> Option<&Identifier> {
        match self {
            FilterOption::ShowAll => None,
            FilterOption::Value { value, .. } => Some(value),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FilterOption::ShowAll => SHOW_ALL_LABEL,
            FilterOption::Value { label, .. } => label,
        }
    }
}

/// `{value, label}` as exchanged with front-ends; an empty value is the sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireOption {
    pub value: Identifier,
    #[serde(default)]
    pub label: String,
}

impl From<WireOption> for FilterOption {
    fn from(wire: WireOption) -> Self {
        if wire.value.is_empty() {
            FilterOption::ShowAll
        } else {
            FilterOption::Value {
                value: wire.value,
                label: wire.label,
            }
        }
    }
}

impl From<FilterOption> for WireOption {
    fn from(option: FilterOption) -> Self {
        match option {
            FilterOption::ShowAll => WireOption {
                value: Identifier::Text(String::new()),
                label: SHOW_ALL_LABEL.to_string(),
            },
            FilterOption::Value { value, label } => WireOption { value, label },
        }
    }
}
