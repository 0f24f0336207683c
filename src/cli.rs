// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::browser::{Notification, Session, VacancyBrowser};
use crate::config::AppConfig;
use crate::core::CareerClient;
use crate::export;
use crate::filters::{selectable_options, FilterState};
use crate::ranking::ScoredVacancy;
use crate::types::{FilterCategory, FilterOption, VacancyId};
use crate::utils;
use crate::weights::{StreamWeights, WeightAdvisor, KNOWN_STREAMS};

#[derive(Parser)]
#[command(name = "vacancy-browser")]
#[command(about = "Filter, rank and inspect recruitment vacancies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the JSON API server
    Serve,
    /// Fetch, rank and print vacancies matching the filters
    Vacancies(VacancyArgs),
    /// Show the full detail of a vacancy
    Detail { id: String },
    /// List the options available for a filter category
    Options {
        category: FilterCategory,
        #[arg(long)]
        search: Option<String>,
    },
    /// Ask the LLM for stream weights matching an interest
    Weights { interest: String },
}

#[derive(Args)]
pub struct VacancyArgs {
    /// Company ids (repeatable)
    #[arg(long = "company")]
    pub companies: Vec<String>,
    /// Experience level values (repeatable)
    #[arg(long = "experience-level")]
    pub experience_levels: Vec<String>,
    /// Stream ids (repeatable)
    #[arg(long = "stream")]
    pub streams: Vec<String>,
    /// Education level values (repeatable)
    #[arg(long = "education-level")]
    pub education_levels: Vec<String>,
    /// Major ids, or "all-major" (repeatable)
    #[arg(long = "major")]
    pub majors: Vec<String>,
    /// Free-text interest used to derive stream weights
    #[arg(long)]
    pub interest: Option<String>,
    /// Stream weight override, e.g. --weight "Treasury=5"
    #[arg(long = "weight", value_parser = parse_weight)]
    pub weights: Vec<(String, i64)>,
    /// Write the ranked list to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Number of vacancies to print
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

impl VacancyArgs {
    pub fn filter_state(&self) -> FilterState {
        let lists = [
            (FilterCategory::Company, &self.companies),
            (FilterCategory::ExperienceLevel, &self.experience_levels),
            (FilterCategory::Stream, &self.streams),
            (FilterCategory::EducationLevel, &self.education_levels),
            (FilterCategory::Major, &self.majors),
        ];

        lists
            .into_iter()
            .fold(FilterState::new(), |state, (category, raw)| {
                let chosen: Vec<FilterOption> =
                    raw.iter().map(|value| FilterOption::from_input(value)).collect();
                state.select(category, &chosen)
            })
    }
}

pub fn parse_weight(raw: &str) -> Result<(String, i64), String> {
    let (stream, weight) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("Expected STREAM=WEIGHT, got: {}", raw))?;
    let weight = weight
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Weight must be an integer: {}", weight))?;
    let stream = stream.trim();
    if stream.is_empty() {
        return Err("Stream name is empty".to_string());
    }
    Ok((stream.to_string(), weight))
}

pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Command::Serve => crate::web::start_web_server(&config).await,
        Command::Vacancies(args) => run_vacancies(args, &config).await,
        Command::Detail { id } => run_detail(&id, &config).await,
        Command::Options { category, search } => {
            let client = CareerClient::from_config(&config.career_api)?;
            let reference = client.list_options(category, search.as_deref()).await?;

            println!("{} ({})", category.display_name(), category);
            for option in selectable_options(category, reference) {
                let value = option.value().map(|v| v.to_string()).unwrap_or_default();
                println!("  {:<12} {}", value, option.label());
            }
            Ok(())
        }
        Command::Weights { interest } => {
            let advisor = WeightAdvisor::new(&config.llm)?;
            if !advisor.is_configured() {
                warn!("TOGETHER_API_KEY is not set, no weights can be suggested");
            }
            let weights = advisor.suggest(&interest, &KNOWN_STREAMS).await;
            if weights.is_empty() {
                println!("No weights suggested.");
            }
            for (stream, weight) in weights.iter() {
                println!("{:>2}  {}", weight, stream);
            }
            Ok(())
        }
    }
}

async fn run_vacancies(args: VacancyArgs, config: &AppConfig) -> Result<()> {
    let browser = VacancyBrowser::new(CareerClient::from_config(&config.career_api)?);

    let mut weights = StreamWeights::defaults();
    if let Some(interest) = args.interest.as_deref() {
        let advisor = WeightAdvisor::new(&config.llm)?;
        weights = advisor.suggest(interest, &KNOWN_STREAMS).await;
        if weights.is_empty() {
            warn!("No weights suggested, every stream weighs 0");
        }
    }
    for (stream, weight) in &args.weights {
        weights.set(stream, *weight);
    }

    let filters = args.filter_state();
    let mut session = Session::new(weights);
    for category in FilterCategory::ALL {
        session.select(category, &filters.selection(category).displayed_options());
    }

    let snapshot = session.begin_apply();
    println!("{}", session.notification());

    let outcome = browser.apply(&snapshot.filters, &snapshot.weights).await;
    let notification = session.finish_apply(outcome).clone();
    println!("{}", notification);

    if notification == Notification::FetchFailed {
        anyhow::bail!("{}", notification);
    }

    print_cards(session.vacancies(), args.limit);

    if let Some(path) = args.csv.as_deref() {
        export::export_csv(path, session.vacancies())?;
        info!("Wrote {} vacancies to {}", session.vacancies().len(), path.display());
        println!("Saved CSV: {}", path.display());
    }

    Ok(())
}

fn print_cards(vacancies: &[ScoredVacancy], limit: usize) {
    for (index, scored) in vacancies.iter().take(limit).enumerate() {
        let vacancy = &scored.vacancy.vacancy;
        let fill = utils::fill_percent(vacancy.total_applied, vacancy.total_quota)
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| utils::NOT_SPECIFIED.to_string());

        println!();
        println!("{}. {}  [score {}]", index + 1, vacancy.title, scored.score);
        println!("   {}", vacancy.company_name);
        println!(
            "   {} | {} | {}",
            vacancy.stream_name.as_deref().unwrap_or(utils::NOT_SPECIFIED),
            vacancy
                .employment_status
                .as_deref()
                .unwrap_or(utils::NOT_SPECIFIED),
            utils::regions_label(vacancy.placement_region_name.as_deref())
        );
        println!("   {}", utils::education_summary(&scored.vacancy.education));
        println!("   Jurusan: {}", utils::majors_summary(&scored.vacancy.major));
        println!(
            "   Applied: {} / {} ({})",
            utils::format_number(vacancy.total_applied),
            utils::format_number(vacancy.total_quota),
            fill
        );
    }

    if vacancies.len() > limit {
        println!();
        println!("... {} more", vacancies.len() - limit);
    }
}

async fn run_detail(raw_id: &str, config: &AppConfig) -> Result<()> {
    let client = CareerClient::from_config(&config.career_api)?;
    let id = VacancyId::parse(raw_id);

    let detail = client
        .fetch_vacancy_detail(&id)
        .await
        .context("Error fetching vacancy details")?;

    let mut vacancy = crate::types::Vacancy::new(id, "");
    vacancy.apply_detail(detail);
    let qualifications = vacancy.qualifications.clone().unwrap_or_default();

    println!("{}", vacancy.title);
    println!("{}", vacancy.company_name);
    println!(
        "📍 {}  🎯 {}  💼 {}  ⚙️ {}",
        utils::regions_label(vacancy.placement_region_name.as_deref()),
        vacancy.employment_status.as_deref().unwrap_or(utils::NOT_SPECIFIED),
        vacancy
            .experience_level_name
            .as_deref()
            .unwrap_or(utils::NOT_SPECIFIED),
        vacancy.stream_name.as_deref().unwrap_or(utils::NOT_SPECIFIED)
    );

    println!("\nDeskripsi Pekerjaan");
    println!("{}", utils::html_to_text(vacancy.description.as_deref().unwrap_or("")));
    println!("\nPersyaratan");
    println!("{}", utils::html_to_text(vacancy.requirement.as_deref().unwrap_or("")));

    println!("\nKualifikasi");
    if let Some(summary) = utils::qualification_summary(&qualifications) {
        println!("🎓 {}", summary);
    }
    println!("🚻 {}", utils::gender_label(qualifications.gender.as_deref()));

    if let Some(majors) = qualifications.major.as_ref().filter(|m| !m.list_major.is_empty()) {
        println!("\nJurusan yang dapat melamar:");
        for major in &majors.list_major {
            println!("  - {}", major);
        }
    }

    Ok(())
}
