//! Matching citizen profiles against government schemes and scholarships.
//!
//! Catalog documents are adapted into [`Program`] records, the matcher explains every
//! failed restriction, and the service/router pair exposes both over HTTP.

pub mod catalog;
pub mod documents;
pub mod domain;
pub mod listing;
pub mod matcher;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{load_programs, CatalogFile, CatalogLoadError};
pub use documents::{ProfileDocument, ScholarshipDocument, SchemeDocument};
pub use domain::{
    Category, EligibilityCriteria, Gender, LifecycleStatus, Program, ProgramId, ProgramKind,
    ProgramSummary, Religion, Role, RoleRestriction, UnrecognisedValues, UserId, UserProfile,
    ALL_INDIA,
};
pub use listing::{browse, ListingQuery, ListingTab};
pub use matcher::{
    evaluate, filter_eligible, format_rupees, partition, EligibilityCheck, EligibilityMatcher,
    IneligibilityReason, MatchResult, MatchingConfig, Partition, Rejection,
};
pub use repository::{CatalogStore, ProfileRecord, ProfileStore, ProfileView, StoreError};
pub use router::eligibility_router;
pub use service::{
    EligibilityReport, EligibilityService, EligibilityServiceError, IneligibleProgram,
};
