use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::documents::ProfileDocument;
use super::domain::{Program, ProgramId, ProgramSummary, UserId, UserProfile};
use super::listing::{browse, ListingQuery};
use super::matcher::{EligibilityMatcher, MatchingConfig, Partition};
use super::repository::{CatalogStore, ProfileRecord, ProfileStore, StoreError};

/// Service composing the profile store, catalog store, and matcher.
pub struct EligibilityService<P, C> {
    profiles: Arc<P>,
    catalog: Arc<C>,
    matcher: Arc<EligibilityMatcher>,
}

impl<P, C> EligibilityService<P, C>
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    pub fn new(profiles: Arc<P>, catalog: Arc<C>) -> Self {
        Self::with_config(profiles, catalog, MatchingConfig::default())
    }

    pub fn with_config(profiles: Arc<P>, catalog: Arc<C>, config: MatchingConfig) -> Self {
        Self {
            profiles,
            catalog,
            matcher: Arc::new(EligibilityMatcher::new(config)),
        }
    }

    /// Store a profile for the user, replacing any previous version.
    pub fn save_profile(
        &self,
        user_id: UserId,
        document: ProfileDocument,
    ) -> Result<ProfileRecord, EligibilityServiceError> {
        let record = ProfileRecord {
            user_id,
            profile: document.to_profile(),
            last_updated: Utc::now(),
        };

        let stored = self.profiles.save(record)?;
        info!(
            user = %stored.user_id,
            complete = stored.profile.is_complete(),
            "profile saved"
        );
        Ok(stored)
    }

    pub fn profile(&self, user_id: &UserId) -> Result<ProfileRecord, EligibilityServiceError> {
        self.profiles
            .fetch(user_id)?
            .ok_or_else(|| EligibilityServiceError::ProfileNotFound(user_id.clone()))
    }

    /// Match the user's stored profile against the whole catalog.
    pub fn eligibility_for(
        &self,
        user_id: &UserId,
    ) -> Result<EligibilityReport, EligibilityServiceError> {
        let record = self.profile(user_id)?;
        let report = self.check(&record.profile)?;
        debug!(
            user = %user_id,
            eligible = report.eligible.len(),
            ineligible = report.ineligible.len(),
            "eligibility computed"
        );
        Ok(report)
    }

    /// Match an ad-hoc profile, e.g. from the anonymous quick check form.
    pub fn check(&self, profile: &UserProfile) -> Result<EligibilityReport, EligibilityServiceError> {
        let programs = self.catalog.programs()?;
        let partition = self.matcher.partition(profile, &programs);
        Ok(EligibilityReport::from_partition(profile, &partition))
    }

    pub fn browse(
        &self,
        query: &ListingQuery,
    ) -> Result<Vec<ProgramSummary>, EligibilityServiceError> {
        let programs = self.catalog.programs()?;
        Ok(browse(&programs, query)
            .into_iter()
            .map(Program::summary)
            .collect())
    }

    pub fn program(&self, program_id: &ProgramId) -> Result<Program, EligibilityServiceError> {
        self.catalog
            .program(program_id)?
            .ok_or_else(|| EligibilityServiceError::ProgramNotFound(program_id.clone()))
    }
}

/// Eligibility screen payload: qualifying programs plus explained rejections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub profile_complete: bool,
    pub missing_fields: Vec<&'static str>,
    pub eligible: Vec<ProgramSummary>,
    pub ineligible: Vec<IneligibleProgram>,
}

impl EligibilityReport {
    pub fn from_partition(profile: &UserProfile, partition: &Partition<'_>) -> Self {
        Self {
            profile_complete: profile.is_complete(),
            missing_fields: profile.missing_fields(),
            eligible: partition
                .eligible
                .iter()
                .map(|program| program.summary())
                .collect(),
            ineligible: partition
                .ineligible
                .iter()
                .map(|rejection| IneligibleProgram {
                    program: rejection.program.summary(),
                    reasons: rejection.reasons().to_vec(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IneligibleProgram {
    pub program: ProgramSummary,
    pub reasons: Vec<String>,
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error("no profile saved for user '{0}'")]
    ProfileNotFound(UserId),
    #[error("program '{0}' not found")]
    ProgramNotFound(ProgramId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
