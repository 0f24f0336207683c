// src/utils.rs
//! Display helpers for vacancy fields: HTML cleanup, regions, fill ratio, qualifications

use scraper::Html;
use serde::Serialize;

use crate::types::{EducationRequirement, MajorEligibility, MajorType, Qualifications};

pub const NATIONWIDE: &str = "Seluruh Indonesia";
pub const NOT_SPECIFIED: &str = "-";

const SKIPPED_ELEMENTS: [&str; 4] = ["style", "xml", "meta", "script"];

/// Render the (often entity-escaped) HTML of a description as plain text lines.
///
/// Drops `<meta>`, `<style>`, `<xml>` and `<script>` content.
pub fn html_to_text(raw: &str) -> String {
    let decoded = if raw.contains("&lt;") {
        Html::parse_fragment(raw).root_element().text().collect::<String>()
    } else {
        raw.to_string()
    };

    let fragment = Html::parse_fragment(&decoded);
    let mut lines: Vec<String> = Vec::new();

    for node in fragment.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| SKIPPED_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
    }

    lines.join("\n")
}

/// Parse `placement_region_name`, a list literal such as `["Jakarta","Bandung"]`.
pub fn placement_regions(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    let parsed = serde_json::from_str::<Vec<String>>(raw)
        .or_else(|_| serde_json::from_str::<Vec<String>>(&raw.replace('\'', "\"")));

    match parsed {
        Ok(regions) => regions
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect(),
        Err(_) if raw.starts_with('[') => Vec::new(),
        Err(_) => vec![raw.to_string()],
    }
}

pub fn regions_label(raw: Option<&str>) -> String {
    let regions = placement_regions(raw);
    if regions.is_empty() {
        NATIONWIDE.to_string()
    } else {
        regions.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillBand {
    Low,
    Medium,
    High,
}

/// Applied/quota as a whole percentage for progress bars, clamped to `[0, 100]`.
/// `None` when the quota is missing or zero.
pub fn fill_percent(applied: Option<f64>, quota: Option<f64>) -> Option<u8> {
    match (applied, quota) {
        (Some(applied), Some(quota)) if quota > 0.0 => {
            Some((applied / quota * 100.0).trunc().clamp(0.0, 100.0) as u8)
        }
        _ => None,
    }
}

pub fn fill_band(percent: u8) -> FillBand {
    match percent {
        0..=39 => FillBand::Low,
        40..=69 => FillBand::Medium,
        _ => FillBand::High,
    }
}

pub fn gender_label(gender: Option<&str>) -> &'static str {
    match gender {
        Some("male") => "Laki-laki",
        _ => "Perempuan",
    }
}

/// Heading for the eligible-majors block of a vacancy.
pub fn majors_heading(major: &MajorEligibility) -> &'static str {
    match major.major_type {
        Some(MajorType::NotIn) => "Semua jurusan kecuali:",
        Some(MajorType::All) => "Semua jurusan",
        _ => "",
    }
}

/// Majors line of a vacancy card.
pub fn majors_summary(major: &MajorEligibility) -> String {
    if major.list_major.is_empty() {
        "Semua Jurusan".to_string()
    } else {
        major.list_major.join(", ")
    }
}

pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{:.2}", v),
        None => NOT_SPECIFIED.to_string(),
    }
}

/// Education line of a vacancy card, e.g. `S1 | Min IPK: 3.00 | Max Usia: 27 Tahun`.
pub fn education_summary(education: &EducationRequirement) -> String {
    let mut parts = vec![
        education
            .education_level
            .clone()
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        format!("Min IPK: {}", format_number(education.score_min)),
    ];
    if let Some(age) = education.age_max {
        parts.push(format!("Max Usia: {} Tahun", format_number(Some(age))));
    }
    parts.join(" | ")
}

/// First education qualification of a detailed vacancy, e.g. `S1 - Min. IPK: 3`.
pub fn qualification_summary(qualifications: &Qualifications) -> Option<String> {
    qualifications.education_level.first().map(|q| {
        format!(
            "{} - Min. IPK: {}",
            q.education_level.as_deref().unwrap_or(NOT_SPECIFIED),
            format_number(q.score_min)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_decodes_and_strips() {
        let raw = "&lt;meta charset=&quot;utf-8&quot;&gt;&lt;style&gt;p { color: red; }&lt;/style&gt;\
                   &lt;p&gt;Mengelola   &amp;amp; menganalisis data&lt;/p&gt;\
                   &lt;xml&gt;&lt;w:WordDocument&gt;junk&lt;/w:WordDocument&gt;&lt;/xml&gt;\
                   &lt;ul&gt;&lt;li&gt;SQL&lt;/li&gt;&lt;/ul&gt;";
        assert_eq!(html_to_text(raw), "Mengelola & menganalisis data\nSQL");
    }

    #[test]
    fn test_html_to_text_plain_html() {
        assert_eq!(html_to_text("<p>Hello <b>world</b></p>"), "Hello\nworld");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_placement_regions() {
        assert_eq!(
            placement_regions(Some(r#"["Jakarta", "Bandung"]"#)),
            vec!["Jakarta".to_string(), "Bandung".to_string()]
        );
        assert_eq!(
            placement_regions(Some("['Medan']")),
            vec!["Medan".to_string()]
        );
        assert_eq!(placement_regions(Some("Surabaya")), vec!["Surabaya".to_string()]);
        assert!(placement_regions(Some("[]")).is_empty());
        assert_eq!(regions_label(None), NATIONWIDE);
        assert_eq!(regions_label(Some("[]")), NATIONWIDE);
    }

    #[test]
    fn test_fill_percent_clamps_and_truncates() {
        assert_eq!(fill_percent(Some(10.0), Some(100.0)), Some(10));
        assert_eq!(fill_percent(Some(2.0), Some(3.0)), Some(66));
        assert_eq!(fill_percent(Some(250.0), Some(100.0)), Some(100));
        assert_eq!(fill_percent(Some(5.0), Some(0.0)), None);
        assert_eq!(fill_percent(None, Some(10.0)), None);
    }

    #[test]
    fn test_fill_band() {
        assert_eq!(fill_band(39), FillBand::Low);
        assert_eq!(fill_band(40), FillBand::Medium);
        assert_eq!(fill_band(70), FillBand::High);
    }

    #[test]
    fn test_education_summary() {
        assert_eq!(education_summary(&EducationRequirement::default()), "- | Min IPK: -");

        let education = EducationRequirement {
            education_level: Some("S1".to_string()),
            score_min: Some(3.0),
            age_max: Some(27.0),
            ..Default::default()
        };
        assert_eq!(
            education_summary(&education),
            "S1 | Min IPK: 3 | Max Usia: 27 Tahun"
        );
    }

    #[test]
    fn test_majors_text() {
        let notin = MajorEligibility {
            vacancy_id: None,
            major_type: Some(MajorType::NotIn),
            list_major: vec!["Kedokteran".to_string()],
        };
        assert_eq!(majors_heading(&notin), "Semua jurusan kecuali:");
        assert_eq!(majors_summary(&notin), "Kedokteran");
        assert_eq!(majors_summary(&MajorEligibility::default()), "Semua Jurusan");
        assert_eq!(gender_label(Some("male")), "Laki-laki");
        assert_eq!(gender_label(Some("female")), "Perempuan");
    }
}
