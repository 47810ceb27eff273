//! End-to-end scenarios: a catalog export on disk is loaded, a citizen saves a profile, and
//! the eligibility report is requested through both the service facade and the HTTP router.

mod common {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use scheme_finder::eligibility::{
        load_programs, CatalogStore, EligibilityService, ProfileRecord, ProfileStore, Program,
        ProgramId, StoreError, UserId,
    };
    use serde_json::json;

    #[derive(Default, Clone)]
    pub(super) struct MemoryProfiles {
        records: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
    }

    impl ProfileStore for MemoryProfiles {
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

    pub(super) struct FileCatalog {
        programs: Vec<Program>,
    }

    impl CatalogStore for FileCatalog {
        fn programs(&self) -> Result<Vec<Program>, StoreError> {
            Ok(self.programs.clone())
        }

        fn program(&self, id: &ProgramId) -> Result<Option<Program>, StoreError> {
            Ok(self.programs.iter().find(|program| &program.id == id).cloned())
        }
    }

    pub(super) fn write_catalog(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "scheme-finder-{}-{}.json",
            name,
            std::process::id()
        ));
        let export = json!({
            "schemes": [
                {
                    "id": "pm-kisan",
                    "name": "PM-KISAN Samman Nidhi",
                    "targetRole": "Farmer",
                    "state": "All India",
                    "status": "Active"
                },
                {
                    "id": "ayushman-bharat",
                    "name": "Ayushman Bharat PM-JAY",
                    "targetRole": "General Citizen",
                    "incomeLimit": "1,00,000",
                    "status": "Active"
                }
            ],
            "scholarships": [
                {
                    "id": "pragati",
                    "title": "AICTE Pragati Scholarship for Girls",
                    "status": "live",
                    "isPublished": true,
                    "eligibleRoles": ["Student"],
                    "eligibleGenders": ["Female"],
                    "ageMin": 18,
                    "ageMax": 25,
                    "eligibleStates": ["karnataka", "Tamil Nadu"]
                },
                {
                    "id": "coming-soon",
                    "title": "State Merit Scholarship",
                    "status": "upcoming",
                    "isPublished": true
                }
            ]
        });
        std::fs::write(&path, export.to_string()).expect("catalog written");
        path
    }

    pub(super) fn service_from(path: &Path) -> EligibilityService<MemoryProfiles, FileCatalog> {
        let programs = load_programs(path).expect("catalog loads");
        EligibilityService::new(
            Arc::new(MemoryProfiles::default()),
            Arc::new(FileCatalog { programs }),
        )
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use scheme_finder::eligibility::{
    eligibility_router, EligibilityServiceError, ProfileDocument, UserId,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn student_document(income: &str, age: u32) -> ProfileDocument {
    serde_json::from_value(json!({
        "role": "Student",
        "age": age,
        "gender": "Female",
        "state": "Karnataka",
        "category": "General",
        "annualIncome": income
    }))
    .expect("profile document")
}

#[test]
fn saved_profile_is_matched_against_exported_catalog() {
    let path = common::write_catalog("service");
    let service = common::service_from(&path);
    let user = UserId("uid-anika".to_string());

    service
        .save_profile(user.clone(), student_document("100000", 21))
        .expect("profile saved");
    let report = service.eligibility_for(&user).expect("report built");

    let eligible: Vec<&str> = report
        .eligible
        .iter()
        .map(|program| program.id.0.as_str())
        .collect();
    assert_eq!(eligible, vec!["ayushman-bharat", "pragati"]);
    assert_eq!(report.ineligible.len(), 2);
    let closed = report
        .ineligible
        .iter()
        .find(|entry| entry.program.id.0 == "coming-soon")
        .expect("upcoming program listed");
    assert_eq!(closed.reasons.len(), 1);

    let _ = std::fs::remove_file(path);
}

#[test]
fn income_and_age_boundaries_hold_end_to_end() {
    let path = common::write_catalog("boundaries");
    let service = common::service_from(&path);

    let over_income = service
        .check(&student_document("1,00,001", 25).to_profile())
        .expect("report built");
    let over_age = service
        .check(&student_document("50000", 26).to_profile())
        .expect("report built");

    assert!(over_income
        .ineligible
        .iter()
        .any(|entry| entry.program.id.0 == "ayushman-bharat"
            && entry.reasons.iter().any(|reason| reason.contains("income"))));
    assert!(over_income
        .eligible
        .iter()
        .any(|program| program.id.0 == "pragati"));
    assert!(over_age
        .ineligible
        .iter()
        .any(|entry| entry.program.id.0 == "pragati"));

    let _ = std::fs::remove_file(path);
}

#[test]
fn unknown_user_is_reported() {
    let path = common::write_catalog("unknown");
    let service = common::service_from(&path);

    match service.eligibility_for(&UserId("missing".to_string())) {
        Err(EligibilityServiceError::ProfileNotFound(_)) => {}
        other => panic!("expected missing profile, got {other:?}"),
    }

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn router_serves_profile_and_report() {
    let path = common::write_catalog("router");
    let router = eligibility_router(Arc::new(common::service_from(&path)));

    let saved = router
        .clone()
        .oneshot(
            Request::put("/api/v1/profiles/uid-anika")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "role": "Student",
                        "age": 20,
                        "gender": "Female",
                        "state": "Tamil Nadu",
                        "category": "OBC",
                        "annualIncome": 40000
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(saved.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::get("/api/v1/profiles/uid-anika/eligibility")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let report: Value = serde_json::from_slice(&body).expect("json payload");
    let eligible: Vec<&str> = report["eligible"]
        .as_array()
        .expect("eligible list")
        .iter()
        .filter_map(|entry| entry["id"].as_str())
        .collect();
    assert_eq!(eligible, vec!["ayushman-bharat", "pragati"]);

    let _ = std::fs::remove_file(path);
}
