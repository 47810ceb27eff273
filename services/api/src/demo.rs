use crate::infra::{InMemoryCatalogStore, InMemoryProfileStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use scheme_finder::eligibility::{
    CatalogStore, EligibilityReport, EligibilityService, ListingQuery, ListingTab,
    ProfileDocument, ProfileStore, UserId,
};
use scheme_finder::error::AppError;
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Profile document (JSON) as saved by the profile editor
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Catalog export (JSON). Defaults to the bundled sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Catalog export (JSON). Defaults to the bundled sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Skip the public listing portion of the demo.
    #[arg(long)]
    pub(crate) skip_listing: bool,
}

type DemoService = EligibilityService<InMemoryProfileStore, InMemoryCatalogStore>;

fn build_service(catalog: Option<PathBuf>) -> Result<DemoService, AppError> {
    let catalog = InMemoryCatalogStore::load(catalog.as_deref())?;
    Ok(EligibilityService::new(
        Arc::new(InMemoryProfileStore::default()),
        Arc::new(catalog),
    ))
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        profile,
        catalog,
        json,
    } = args;

    let reader = BufReader::new(File::open(&profile)?);
    let document: ProfileDocument = serde_json::from_reader(reader)?;
    let service = build_service(catalog)?;

    let report = check_document(&service, &document)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&profile.display().to_string(), &report, today());
    }
    Ok(())
}

fn check_document<P, C>(
    service: &EligibilityService<P, C>,
    document: &ProfileDocument,
) -> Result<EligibilityReport, AppError>
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    Ok(service.check(&document.to_profile())?)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog,
        skip_listing,
    } = args;

    let service = build_service(catalog)?;
    println!("Scheme finder demo");

    if !skip_listing {
        let query = ListingQuery {
            tab: ListingTab::Live,
            ..ListingQuery::default()
        };
        match service.browse(&query) {
            Ok(programs) => {
                println!("\nLive programs ({})", programs.len());
                for program in programs {
                    println!(
                        "  - {} [{}] {}",
                        program.title,
                        program.status,
                        program.benefit.as_deref().unwrap_or("benefit not listed")
                    );
                }
            }
            Err(err) => println!("  Listing unavailable: {}", err),
        }
    }

    for (user, document) in demo_profiles()? {
        let record = match service.save_profile(UserId(user.to_string()), document) {
            Ok(record) => record,
            Err(err) => {
                println!("  Profile rejected: {}", err);
                continue;
            }
        };
        let report = match service.eligibility_for(&record.user_id) {
            Ok(report) => report,
            Err(err) => {
                println!("  Eligibility unavailable: {}", err);
                continue;
            }
        };
        render_report(user, &report, today());
    }

    Ok(())
}

fn demo_profiles() -> Result<Vec<(&'static str, ProfileDocument)>, AppError> {
    let documents = [
        (
            "student-priya",
            json!({
                "role": "Student",
                "age": "19",
                "gender": "Female",
                "state": "Maharashtra",
                "category": "SC",
                "religion": "Buddhist",
                "educationLevel": "Undergraduate",
                "class": "Class 12",
                "annualIncome": "1,80,000"
            }),
        ),
        (
            "farmer-ramesh",
            json!({
                "role": "Farmer",
                "age": 46,
                "gender": "Male",
                "state": "Maharashtra",
                "category": "OBC",
                "religion": "Hindu",
                "annualIncome": 90000,
                "landSize": "2.5"
            }),
        ),
        (
            "citizen-incomplete",
            json!({
                "role": "General Citizen",
                "state": "Kerala"
            }),
        ),
    ];

    documents
        .into_iter()
        .map(|(user, value)| -> Result<_, AppError> {
            Ok((user, serde_json::from_value(value)?))
        })
        .collect()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn render_report(subject: &str, report: &EligibilityReport, today: NaiveDate) {
    println!("\nEligibility for {}", subject);
    if !report.profile_complete {
        println!(
            "  Profile incomplete, missing: {}",
            report.missing_fields.join(", ")
        );
    }

    println!("  Eligible ({}):", report.eligible.len());
    for program in &report.eligible {
        let deadline = program
            .deadline
            .map(|date| deadline_note(date, today))
            .unwrap_or_default();
        println!("    - {}{}", program.title, deadline);
        if !program.required_documents.is_empty() {
            println!(
                "      documents: {}",
                program.required_documents.join(", ")
            );
        }
    }

    println!("  Not eligible ({}):", report.ineligible.len());
    for entry in &report.ineligible {
        println!("    - {}", entry.program.title);
        for reason in &entry.reasons {
            println!("      {}", reason);
        }
    }
}

fn deadline_note(deadline: NaiveDate, today: NaiveDate) -> String {
    let days_left = (deadline - today).num_days();
    if days_left < 0 {
        format!(" | closed on {}", deadline.format("%d %b %Y"))
    } else {
        format!(
            " | apply by {} ({} days left)",
            deadline.format("%d %b %Y"),
            days_left
        )
    }
}
