use metrics_exporter_prometheus::PrometheusHandle;
use scheme_finder::eligibility::{
    load_programs, CatalogFile, CatalogLoadError, CatalogStore, ProfileRecord, ProfileStore,
    Program, ProgramId, StoreError, UserId, ALL_INDIA,
};
use scheme_finder::error::AppError;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    records: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
}

impl ProfileStore for InMemoryProfileStore {
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

/// Read-only catalog held in memory for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalogStore {
    programs: Arc<Vec<Program>>,
}

impl InMemoryCatalogStore {
    pub(crate) fn from_programs(programs: Vec<Program>) -> Self {
        Self {
            programs: Arc::new(programs),
        }
    }

    /// Load the export at `path`, or fall back to the bundled sample catalog.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let programs = match path {
            Some(path) => {
                info!(path = %path.display(), "loading catalog export");
                load_programs(path)?
            }
            None => {
                info!("no catalog export configured, using sample catalog");
                sample_catalog()?
            }
        };
        Ok(Self::from_programs(programs))
    }

    pub(crate) fn len(&self) -> usize {
        self.programs.len()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn programs(&self) -> Result<Vec<Program>, StoreError> {
        Ok(self.programs.as_ref().clone())
    }

    fn program(&self, id: &ProgramId) -> Result<Option<Program>, StoreError> {
        Ok(self.programs.iter().find(|program| &program.id == id).cloned())
    }
}

/// A small national and state catalog in the admin panel's export format.
pub(crate) fn sample_catalog() -> Result<Vec<Program>, AppError> {
    let export = json!({
        "schemes": [
            {
                "id": "pm-kisan",
                "name": "PM-KISAN Samman Nidhi",
                "department": "Ministry of Agriculture & Farmers Welfare",
                "description": "Direct income support to landholding farmer families.",
                "benefitAmount": "₹6,000 per year",
                "targetRole": "Farmer",
                "category": "All",
                "state": ALL_INDIA,
                "ageMin": 18,
                "documents": ["Aadhaar Card", "Land Records", "Bank Passbook"],
                "status": "Active",
                "navCategories": ["agriculture"]
            },
            {
                "id": "ayushman-bharat",
                "name": "Ayushman Bharat PM-JAY",
                "department": "Ministry of Health & Family Welfare",
                "description": "Cashless hospital cover for economically weaker families.",
                "benefitAmount": "₹5,00,000 health cover per family",
                "targetRole": "General Citizen",
                "incomeLimit": "2,50,000",
                "category": "All",
                "state": ALL_INDIA,
                "documents": ["Aadhaar Card", "Ration Card"],
                "status": "Active",
                "navCategories": ["health"]
            },
            {
                "id": "ignoaps",
                "name": "Indira Gandhi National Old Age Pension",
                "department": "Ministry of Rural Development",
                "description": "Monthly pension for senior citizens from low income households.",
                "benefitAmount": "₹500 per month",
                "targetRole": "Senior Citizen",
                "incomeLimit": 100000,
                "ageMin": 60,
                "state": ALL_INDIA,
                "documents": ["Aadhaar Card", "Age Proof", "Income Certificate"],
                "status": "Active",
                "navCategories": ["social-welfare"]
            },
            {
                "id": "mh-farm-mechanisation",
                "name": "Maharashtra Farm Mechanisation Subsidy",
                "department": "Agriculture Department, Government of Maharashtra",
                "description": "Subsidy on tractors and implements for small farmers.",
                "benefitAmount": "Up to 50% of equipment cost",
                "targetRole": "Farmer",
                "incomeLimit": 150000,
                "category": ["SC", "ST"],
                "state": "Maharashtra",
                "documents": ["7/12 Extract", "Caste Certificate"],
                "status": "Active",
                "navCategories": ["agriculture"]
            },
            {
                "id": "pm-svanidhi",
                "name": "PM SVANidhi",
                "department": "Ministry of Housing & Urban Affairs",
                "description": "Working capital loans for street vendors.",
                "benefitAmount": "₹10,000 collateral-free loan",
                "targetRole": "Worker",
                "state": ALL_INDIA,
                "status": "Upcoming",
                "navCategories": ["employment"]
            }
        ],
        "scholarships": [
            {
                "id": "post-matric-sc",
                "title": "Post Matric Scholarship for SC Students",
                "description": "Tuition and maintenance support after Class 10.",
                "award": "Full tuition + ₹1,200 per month",
                "status": "live",
                "isPublished": true,
                "isFeatured": true,
                "category": "Merit-cum-Means",
                "eligibleRoles": ["Student"],
                "eligibleCategories": ["SC"],
                "eligibleStates": [ALL_INDIA],
                "eligibleEducationLevels": ["Undergraduate", "Postgraduate"],
                "incomeLimit": 250000,
                "requiredDocuments": ["Caste Certificate", "Income Certificate", "Marksheet"],
                "deadline": "2026-11-30"
            },
            {
                "id": "begum-hazrat-mahal",
                "title": "Begum Hazrat Mahal National Scholarship",
                "description": "Scholarship for girls from minority communities.",
                "award": "₹5,000 - ₹6,000 per year",
                "status": "live",
                "isPublished": true,
                "category": "Minority",
                "eligibleRoles": ["Student"],
                "eligibleGenders": ["Female"],
                "eligibleReligions": ["Muslim", "Christian", "Sikh", "Buddhist"],
                "eligibleClasses": ["Class 9", "Class 10", "Class 11", "Class 12"],
                "incomeLimit": 200000,
                "requiredDocuments": ["Income Certificate", "Marksheet"]
            },
            {
                "id": "inspire-she",
                "title": "INSPIRE Scholarship for Higher Education",
                "description": "Support for top performers pursuing natural sciences.",
                "award": "₹80,000 per year",
                "status": "always_open",
                "isPublished": true,
                "category": "Science",
                "eligibleRoles": ["Student"],
                "eligibleEducationLevels": ["Undergraduate"],
                "ageMin": 17,
                "ageMax": 22
            },
            {
                "id": "central-sector-scholarship",
                "title": "Central Sector Scheme of Scholarships",
                "status": "live",
                "isPublished": false
            }
        ]
    });

    let file: CatalogFile = serde_json::from_value(export).map_err(CatalogLoadError::from)?;
    Ok(file.into_programs()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_adapts_every_document() {
        let programs = sample_catalog().expect("sample catalog adapts");

        assert_eq!(programs.len(), 9);
        assert_eq!(programs[0].id.0, "pm-kisan");
        assert!(programs
            .iter()
            .any(|program| program.id.0 == "central-sector-scholarship" && !program.is_open()));
    }

    #[test]
    fn catalog_store_finds_programs_by_id() {
        let store = InMemoryCatalogStore::load(None).expect("sample catalog loads");

        let found = store
            .program(&ProgramId("ignoaps".to_string()))
            .expect("lookup succeeds");
        assert!(found.is_some());
        assert_eq!(store.programs().expect("list succeeds").len(), store.len());
    }
}
