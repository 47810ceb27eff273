use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::eligibility::domain::{
    Category, EligibilityCriteria, Gender, LifecycleStatus, Program, ProgramId, ProgramKind,
    Religion, Role, RoleRestriction, UnrecognisedValues, UserId, UserProfile, ALL_INDIA,
};
use crate::eligibility::repository::{CatalogStore, ProfileRecord, ProfileStore, StoreError};
use crate::eligibility::{eligibility_router, EligibilityService};

pub(super) fn complete_profile() -> UserProfile {
    UserProfile {
        role: Some(Role::Student),
        age: Some(20),
        gender: Some(Gender::Female),
        state: Some("Maharashtra".to_string()),
        category: Some(Category::Obc),
        religion: Some(Religion::Hindu),
        education_level: Some("Undergraduate".to_string()),
        class: Some("Class 12".to_string()),
        course: Some("B.Sc".to_string()),
        annual_income: Some(80000.0),
        disability_status: false,
        land_size: None,
    }
}

pub(super) fn open_program(id: &str) -> Program {
    Program {
        id: ProgramId(id.to_string()),
        kind: ProgramKind::Scheme,
        title: format!("Program {id}"),
        description: "Financial assistance for eligible citizens".to_string(),
        department: Some("Ministry of Social Justice".to_string()),
        benefit: Some("₹12,000 per year".to_string()),
        link: None,
        deadline: NaiveDate::from_ymd_opt(2026, 12, 31),
        listing_category: None,
        nav_categories: Vec::new(),
        featured: false,
        lifecycle_status: LifecycleStatus::Active,
        published: true,
        eligibility: EligibilityCriteria::unrestricted(),
        required_documents: vec!["Aadhaar Card".to_string()],
    }
}

pub(super) fn program_with(id: &str, eligibility: EligibilityCriteria) -> Program {
    Program {
        eligibility,
        ..open_program(id)
    }
}

/// Restricts every check the complete profile can fail.
pub(super) fn strict_criteria() -> EligibilityCriteria {
    EligibilityCriteria {
        roles: RoleRestriction::Roles(vec![Role::Farmer]),
        income_limit: Some(50000.0),
        age_min: Some(40),
        age_max: Some(60),
        states: vec!["Punjab".to_string()],
        categories: vec![Category::Sc],
        genders: vec![Gender::Male],
        religions: vec![Religion::Sikh],
        education_levels: vec!["Postgraduate".to_string()],
        classes: vec!["Class 10".to_string()],
        unrecognised: UnrecognisedValues::default(),
    }
}

/// A mixed catalog: open, restricted, closed, and nationwide programs.
pub(super) fn sample_catalog() -> Vec<Program> {
    let mut upcoming = open_program("upcoming-fellowship");
    upcoming.lifecycle_status = LifecycleStatus::Upcoming;

    let mut draft = open_program("draft-scheme");
    draft.published = false;

    let mut scholarship = program_with(
        "post-matric-scholarship",
        EligibilityCriteria {
            roles: RoleRestriction::Roles(vec![Role::Student]),
            income_limit: Some(250000.0),
            categories: vec![Category::Sc, Category::St, Category::Obc],
            states: vec![ALL_INDIA.to_string()],
            ..EligibilityCriteria::default()
        },
    );
    scholarship.kind = ProgramKind::Scholarship;

    vec![
        open_program("open-scheme"),
        program_with("farmer-scheme", strict_criteria()),
        upcoming,
        scholarship,
        draft,
    ]
}

pub(super) type TestService = EligibilityService<MemoryProfileStore, MemoryCatalogStore>;

pub(super) fn build_service(programs: Vec<Program>) -> (TestService, Arc<MemoryProfileStore>) {
    let profiles = Arc::new(MemoryProfileStore::default());
    let catalog = Arc::new(MemoryCatalogStore::new(programs));
    let service = EligibilityService::new(profiles.clone(), catalog);
    (service, profiles)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    eligibility_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfileStore {
    pub(super) records: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
}

impl ProfileStore for MemoryProfileStore {
    fn save(&self, record: ProfileRecord) -> Result<ProfileRecord, StoreError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        guard.insert(record.user_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, StoreError> {
        let guard = self.records.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalogStore {
    programs: Vec<Program>,
}

impl MemoryCatalogStore {
    pub(super) fn new(programs: Vec<Program>) -> Self {
        Self { programs }
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn programs(&self) -> Result<Vec<Program>, StoreError> {
        Ok(self.programs.clone())
    }

    fn program(&self, id: &ProgramId) -> Result<Option<Program>, StoreError> {
        Ok(self.programs.iter().find(|program| &program.id == id).cloned())
    }
}

pub(super) struct UnavailableStore;

impl ProfileStore for UnavailableStore {
    fn save(&self, _record: ProfileRecord) -> Result<ProfileRecord, StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }

    fn fetch(&self, _user_id: &UserId) -> Result<Option<ProfileRecord>, StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }
}

impl CatalogStore for UnavailableStore {
    fn programs(&self) -> Result<Vec<Program>, StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }

    fn program(&self, _id: &ProgramId) -> Result<Option<Program>, StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }
}

pub(super) fn ids(programs: &[&Program]) -> Vec<String> {
    programs.iter().map(|program| program.id.0.clone()).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
