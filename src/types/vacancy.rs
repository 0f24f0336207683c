// src/types/vacancy.rs
//! Vacancy records and their side data, shaped after the recruitment API payloads.
//!
//! The remote API is loose with types (numbers arrive as strings, lists arrive as
//! plain strings, nulls everywhere), so most fields go through lenient helpers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::id::VacancyId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub vacancy_id: VacancyId,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub company_name: String,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub experience_level_name: Option<String>,
    #[serde(default)]
    pub stream_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_applied: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_quota: Option<f64>,
    #[serde(default)]
    pub placement_region_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub qualifications: Option<Qualifications>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Fields returned by `/detail-vacancy`. Anything present overrides the listed vacancy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VacancyDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub experience_level_name: Option<String>,
    #[serde(default)]
    pub stream_name: Option<String>,
    #[serde(default)]
    pub placement_region_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub qualifications: Option<Qualifications>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Qualifications {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub education_level: Vec<EducationQualification>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub major: Option<QualificationMajors>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationQualification {
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub score_min: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualificationMajors {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub list_major: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MajorType {
    /// Every major may apply.
    All,
    /// Every major except the listed ones.
    NotIn,
    /// Only the listed majors.
    List,
}

impl From<String> for MajorType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "all" => MajorType::All,
            "notin" => MajorType::NotIn,
            _ => MajorType::List,
        }
    }
}

impl From<MajorType> for String {
    fn from(value: MajorType) -> Self {
        match value {
            MajorType::All => "all",
            MajorType::NotIn => "notin",
            MajorType::List => "in",
        }
        .to_string()
    }
}

/// `/vacancy-major` record. The default value means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MajorEligibility {
    #[serde(default)]
    pub vacancy_id: Option<VacancyId>,
    #[serde(default)]
    pub major_type: Option<MajorType>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub list_major: Vec<String>,
}

impl MajorEligibility {
    pub fn is_unrestricted(&self) -> bool {
        match self.major_type {
            None | Some(MajorType::All) => self.list_major.is_empty(),
            Some(MajorType::NotIn) => self.list_major.is_empty(),
            Some(MajorType::List) => false,
        }
    }
}

/// `/vacancy-education` record. The default value renders as "not specified".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRequirement {
    #[serde(default)]
    pub vacancy_id: Option<VacancyId>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub score_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub age_max: Option<f64>,
}

/// A listed vacancy joined with its side data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedVacancy {
    #[serde(flatten)]
    pub vacancy: Vacancy,
    pub major: MajorEligibility,
    pub education: EducationRequirement,
}

impl Vacancy {
    pub fn new(vacancy_id: impl Into<VacancyId>, title: &str) -> Self {
        Self {
            vacancy_id: vacancy_id.into(),
            title: title.to_string(),
            company_name: String::new(),
            company_logo: None,
            employment_status: None,
            experience_level_name: None,
            stream_name: None,
            total_applied: None,
            total_quota: None,
            placement_region_name: None,
            description: None,
            requirement: None,
            qualifications: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Whether the lazily fetched detail fields are already present.
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn apply_detail(&mut self, detail: VacancyDetail) {
        fn take(target: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *target = value;
            }
        }

        if let Some(title) = detail.title {
            self.title = title;
        }
        if let Some(company_name) = detail.company_name {
            self.company_name = company_name;
        }
        take(&mut self.company_logo, detail.company_logo);
        take(&mut self.employment_status, detail.employment_status);
        take(&mut self.experience_level_name, detail.experience_level_name);
        take(&mut self.stream_name, detail.stream_name);
        take(&mut self.placement_region_name, detail.placement_region_name);
        take(&mut self.description, detail.description);
        take(&mut self.requirement, detail.requirement);
        if detail.qualifications.is_some() {
            self.qualifications = detail.qualifications;
        }
        self.extra.extend(detail.extra);
    }
}

// ===== Lenient field helpers =====

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|n| n.is_finite()))
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}
