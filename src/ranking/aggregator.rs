// src/ranking/aggregator.rs
use std::collections::HashMap;

use crate::types::{EducationRequirement, EnrichedVacancy, MajorEligibility, Vacancy, VacancyId};

/// Join each vacancy with its major and education records by vacancy id.
///
/// Output order matches `vacancies`. Vacancies without side data get default
/// records; duplicate side records resolve last-write-wins.
pub fn merge(
    vacancies: Vec<Vacancy>,
    majors: Vec<MajorEligibility>,
    educations: Vec<EducationRequirement>,
) -> Vec<EnrichedVacancy> {
    let mut major_by_id: HashMap<VacancyId, MajorEligibility> = HashMap::with_capacity(majors.len());
    for record in majors {
        if let Some(id) = record.vacancy_id.clone() {
            major_by_id.insert(id, record);
        }
    }

    let mut education_by_id: HashMap<VacancyId, EducationRequirement> =
        HashMap::with_capacity(educations.len());
    for record in educations {
        if let Some(id) = record.vacancy_id.clone() {
            education_by_id.insert(id, record);
        }
    }

    vacancies
        .into_iter()
        .map(|vacancy| {
            // get().cloned() rather than remove(): the listing may repeat an id.
            let major = major_by_id.get(&vacancy.vacancy_id).cloned().unwrap_or_default();
            let education = education_by_id
                .get(&vacancy.vacancy_id)
                .cloned()
                .unwrap_or_default();
            EnrichedVacancy {
                vacancy,
                major,
                education,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Identifier, MajorType};

    fn major(id: i64, kind: MajorType, list: &[&str]) -> MajorEligibility {
        MajorEligibility {
            vacancy_id: Some(Identifier::Number(id)),
            major_type: Some(kind),
            list_major: list.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn education(id: i64, level: &str) -> EducationRequirement {
        EducationRequirement {
            vacancy_id: Some(Identifier::Number(id)),
            education_level: Some(level.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_vacancy_appears_once_in_order() {
        let vacancies = vec![
            Vacancy::new(3, "C"),
            Vacancy::new(1, "A"),
            Vacancy::new(2, "B"),
        ];
        let merged = merge(
            vacancies,
            vec![major(1, MajorType::All, &[])],
            vec![education(2, "S1")],
        );

        let titles: Vec<&str> = merged.iter().map(|v| v.vacancy.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);

        assert_eq!(merged[0].major, MajorEligibility::default());
        assert_eq!(merged[0].education, EducationRequirement::default());
        assert_eq!(merged[1].major.major_type, Some(MajorType::All));
        assert_eq!(merged[2].education.education_level.as_deref(), Some("S1"));
    }

    #[test]
    fn test_duplicate_side_records_last_write_wins() {
        let merged = merge(
            vec![Vacancy::new(7, "Auditor")],
            vec![
                major(7, MajorType::List, &["Akuntansi"]),
                major(7, MajorType::NotIn, &["Kedokteran"]),
            ],
            vec![education(7, "D3"), education(7, "S1")],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].major.major_type, Some(MajorType::NotIn));
        assert_eq!(merged[0].education.education_level.as_deref(), Some("S1"));
    }

    #[test]
    fn test_side_records_without_id_are_ignored() {
        let orphan = MajorEligibility {
            vacancy_id: None,
            major_type: Some(MajorType::List),
            list_major: vec!["Hukum".to_string()],
        };
        let merged = merge(vec![Vacancy::new(1, "A")], vec![orphan], Vec::new());
        assert!(merged[0].major.is_unrestricted());
    }

    #[test]
    fn test_empty_input() {
        assert!(merge(Vec::new(), Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_numeric_and_text_ids_join() {
        let vacancies = vec![Vacancy::new(8, "Numeric"), Vacancy::new("9", "Text")];
        let majors = vec![MajorEligibility {
            vacancy_id: Some(Identifier::from("8")),
            major_type: Some(MajorType::List),
            list_major: vec!["TI".to_string()],
        }];
        let educations = vec![education(9, "S1")];

        let merged = merge(vacancies, majors, educations);

        assert_eq!(merged[0].major.list_major, vec!["TI"]);
        assert_eq!(merged[1].education.education_level.as_deref(), Some("S1"));
    }
}
