use serde::{Deserialize, Serialize};

use super::super::domain::{LifecycleStatus, ProgramId};

/// The individual checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCheck {
    Availability,
    ProfileCompleteness,
    Role,
    Income,
    Age,
    State,
    Category,
    Gender,
    Religion,
    EducationLevel,
    Class,
}

/// Why a profile failed a single check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IneligibilityReason {
    NotOpen {
        status: LifecycleStatus,
        published: bool,
    },
    IncompleteProfile {
        missing: Vec<String>,
    },
    RoleMismatch {
        required: Vec<String>,
    },
    IncomeAboveLimit {
        limit: f64,
        declared: f64,
    },
    AgeOutOfRange {
        age: u32,
        min: u32,
        max: u32,
    },
    StateMismatch {
        required: Vec<String>,
    },
    CategoryMismatch {
        required: Vec<String>,
    },
    GenderMismatch {
        required: Vec<String>,
    },
    ReligionMismatch {
        required: Vec<String>,
    },
    EducationLevelMismatch {
        required: Vec<String>,
    },
    ClassMismatch {
        required: Vec<String>,
    },
}

impl IneligibilityReason {
    pub fn check(&self) -> EligibilityCheck {
        match self {
            IneligibilityReason::NotOpen { .. } => EligibilityCheck::Availability,
            IneligibilityReason::IncompleteProfile { .. } => EligibilityCheck::ProfileCompleteness,
            IneligibilityReason::RoleMismatch { .. } => EligibilityCheck::Role,
            IneligibilityReason::IncomeAboveLimit { .. } => EligibilityCheck::Income,
            IneligibilityReason::AgeOutOfRange { .. } => EligibilityCheck::Age,
            IneligibilityReason::StateMismatch { .. } => EligibilityCheck::State,
            IneligibilityReason::CategoryMismatch { .. } => EligibilityCheck::Category,
            IneligibilityReason::GenderMismatch { .. } => EligibilityCheck::Gender,
            IneligibilityReason::ReligionMismatch { .. } => EligibilityCheck::Religion,
            IneligibilityReason::EducationLevelMismatch { .. } => EligibilityCheck::EducationLevel,
            IneligibilityReason::ClassMismatch { .. } => EligibilityCheck::Class,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::NotOpen { status, published } => format!(
                "Program is not active or approved by admin (status {}, {})",
                status.label(),
                if *published { "published" } else { "unpublished" }
            ),
            IneligibilityReason::IncompleteProfile { missing } => {
                format!("Profile incomplete. Missing: {}", missing.join(", "))
            }
            IneligibilityReason::RoleMismatch { required } => {
                format!("Role mismatch. Required: {}", required.join(", "))
            }
            IneligibilityReason::IncomeAboveLimit { limit, declared } => format!(
                "Annual income {} exceeds limit. Maximum: {}",
                format_rupees(*declared),
                format_rupees(*limit)
            ),
            IneligibilityReason::AgeOutOfRange { age, min, max } => {
                format!("Age {age} outside eligible range {min}-{max}")
            }
            IneligibilityReason::StateMismatch { required } => {
                format!("State mismatch. Required: {}", required.join(", "))
            }
            IneligibilityReason::CategoryMismatch { required } => {
                format!("Category mismatch. Required: {}", required.join(", "))
            }
            IneligibilityReason::GenderMismatch { required } => {
                format!("Gender mismatch. Required: {}", required.join(", "))
            }
            IneligibilityReason::ReligionMismatch { required } => {
                format!("Religion mismatch. Required: {}", required.join(", "))
            }
            IneligibilityReason::EducationLevelMismatch { required } => {
                format!("Education level mismatch. Required: {}", required.join(", "))
            }
            IneligibilityReason::ClassMismatch { required } => {
                format!("Class mismatch. Required: {}", required.join(", "))
            }
        }
    }
}

impl std::fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Formats whole rupees with Indian digit grouping, e.g. `₹1,00,000`.
pub fn format_rupees(amount: f64) -> String {
    let rupees = if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    };
    let digits = rupees.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

/// Outcome of matching one profile against one program.
///
/// `reasons` is empty exactly when `eligible` is true, and lists every failed check in
/// evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub program_id: ProgramId,
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub failed_checks: Vec<EligibilityCheck>,
}

impl MatchResult {
    pub(crate) fn from_failures(program_id: ProgramId, failures: &[IneligibilityReason]) -> Self {
        Self {
            program_id,
            eligible: failures.is_empty(),
            reasons: failures.iter().map(IneligibilityReason::summary).collect(),
            failed_checks: failures.iter().map(IneligibilityReason::check).collect(),
        }
    }

    pub fn failed(&self, check: EligibilityCheck) -> bool {
        self.failed_checks.contains(&check)
    }

    /// First reason, for compact displays that only show one line.
    pub fn headline(&self) -> Option<&str> {
        self.reasons.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupees_use_indian_grouping() {
        assert_eq!(format_rupees(0.0), "₹0");
        assert_eq!(format_rupees(999.0), "₹999");
        assert_eq!(format_rupees(1000.0), "₹1,000");
        assert_eq!(format_rupees(100000.0), "₹1,00,000");
        assert_eq!(format_rupees(250000.0), "₹2,50,000");
        assert_eq!(format_rupees(12345678.0), "₹1,23,45,678");
        assert_eq!(format_rupees(f64::NAN), "₹0");
    }

    #[test]
    fn income_summary_mentions_income_and_limit() {
        let reason = IneligibilityReason::IncomeAboveLimit {
            limit: 100000.0,
            declared: 100001.0,
        };
        let summary = reason.summary();
        assert!(summary.to_lowercase().contains("income"));
        assert!(summary.contains("₹1,00,000"));
        assert_eq!(reason.check(), EligibilityCheck::Income);
    }
}
