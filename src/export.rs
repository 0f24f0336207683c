// src/export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::ranking::ScoredVacancy;
use crate::utils;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    rank: usize,
    score: u8,
    vacancy_id: String,
    title: &'a str,
    company: &'a str,
    stream: &'a str,
    employment_status: &'a str,
    experience_level: &'a str,
    applied: String,
    quota: String,
    fill_percent: String,
    education: String,
    majors: String,
    regions: String,
}

/// Write a ranked list as CSV, one row per vacancy, best first.
pub fn write_csv<W: Write>(writer: W, vacancies: &[ScoredVacancy]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (index, scored) in vacancies.iter().enumerate() {
        let enriched = &scored.vacancy;
        let vacancy = &enriched.vacancy;

        csv_writer
            .serialize(CsvRow {
                rank: index + 1,
                score: scored.score,
                vacancy_id: vacancy.vacancy_id.to_string(),
                title: &vacancy.title,
                company: &vacancy.company_name,
                stream: vacancy.stream_name.as_deref().unwrap_or(""),
                employment_status: vacancy.employment_status.as_deref().unwrap_or(""),
                experience_level: vacancy.experience_level_name.as_deref().unwrap_or(""),
                applied: utils::format_number(vacancy.total_applied),
                quota: utils::format_number(vacancy.total_quota),
                fill_percent: utils::fill_percent(vacancy.total_applied, vacancy.total_quota)
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
                education: utils::education_summary(&enriched.education),
                majors: utils::majors_summary(&enriched.major),
                regions: utils::regions_label(vacancy.placement_region_name.as_deref()),
            })
            .context("Failed to write CSV row")?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn export_csv(path: &Path, vacancies: &[ScoredVacancy]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_csv(file, vacancies)
}
