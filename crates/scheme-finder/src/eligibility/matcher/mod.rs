mod config;
mod policy;
mod rules;

pub use config::MatchingConfig;
pub use policy::{format_rupees, EligibilityCheck, IneligibilityReason, MatchResult};

use super::domain::{Program, UserProfile};

/// Stateless matcher comparing a profile with program restrictions.
///
/// Holds only immutable configuration, so one instance can be shared across threads
/// and calls without any cross-call interference.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityMatcher {
    config: MatchingConfig,
}

impl EligibilityMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Typed failures for one program, in evaluation order.
    pub fn failures(&self, profile: &UserProfile, program: &Program) -> Vec<IneligibilityReason> {
        rules::run_all_checks(profile, program, &self.config)
    }

    pub fn evaluate(&self, profile: &UserProfile, program: &Program) -> MatchResult {
        let failures = self.failures(profile, program);
        MatchResult::from_failures(program.id.clone(), &failures)
    }

    /// Programs the profile qualifies for, in catalog order.
    pub fn filter_eligible<'a>(
        &self,
        profile: &UserProfile,
        programs: &'a [Program],
    ) -> Vec<&'a Program> {
        programs
            .iter()
            .filter(|program| self.failures(profile, program).is_empty())
            .collect()
    }

    /// Splits the catalog in one pass. Every program lands in exactly one side.
    pub fn partition<'a>(&self, profile: &UserProfile, programs: &'a [Program]) -> Partition<'a> {
        let mut partition = Partition {
            eligible: Vec::new(),
            ineligible: Vec::new(),
        };

        for program in programs {
            let result = self.evaluate(profile, program);
            if result.eligible {
                partition.eligible.push(program);
            } else {
                partition.ineligible.push(Rejection { program, result });
            }
        }

        partition
    }
}

/// A program the profile does not qualify for, with the full explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection<'a> {
    pub program: &'a Program,
    pub result: MatchResult,
}

impl Rejection<'_> {
    pub fn reasons(&self) -> &[String] {
        &self.result.reasons
    }
}

/// Eligible and ineligible programs, each preserving catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    pub eligible: Vec<&'a Program>,
    pub ineligible: Vec<Rejection<'a>>,
}

impl Partition<'_> {
    pub fn len(&self) -> usize {
        self.eligible.len() + self.ineligible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Evaluate one program with the default matcher.
pub fn evaluate(profile: &UserProfile, program: &Program) -> MatchResult {
    EligibilityMatcher::default().evaluate(profile, program)
}

/// Stable filter over `programs` with the default matcher.
pub fn filter_eligible<'a>(profile: &UserProfile, programs: &'a [Program]) -> Vec<&'a Program> {
    EligibilityMatcher::default().filter_eligible(profile, programs)
}

/// One-pass eligible/ineligible split with the default matcher.
pub fn partition<'a>(profile: &UserProfile, programs: &'a [Program]) -> Partition<'a> {
    EligibilityMatcher::default().partition(profile, programs)
}
