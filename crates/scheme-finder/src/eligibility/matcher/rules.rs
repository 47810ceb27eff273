use super::super::domain::{EligibilityCriteria, Gender, Program, Religion, UserProfile};
use super::config::MatchingConfig;
use super::policy::IneligibilityReason;

/// Runs every check against the profile and returns the failures in evaluation order.
///
/// Availability is the only short-circuit: a closed program reports a single reason.
pub(crate) fn run_all_checks(
    profile: &UserProfile,
    program: &Program,
    config: &MatchingConfig,
) -> Vec<IneligibilityReason> {
    if !program.is_open() {
        return vec![IneligibilityReason::NotOpen {
            status: program.lifecycle_status,
            published: program.published,
        }];
    }

    let criteria = &program.eligibility;
    let checks = [
        check_completeness(profile),
        check_role(profile, criteria),
        check_income(profile, criteria),
        check_age(profile, criteria, config),
        check_state(profile, criteria),
        check_category(profile, criteria),
        check_gender(profile, criteria),
        check_religion(profile, criteria),
        check_education_level(profile, criteria),
        check_class(profile, criteria),
    ];

    checks.into_iter().flatten().collect()
}

fn check_completeness(profile: &UserProfile) -> Option<IneligibilityReason> {
    let missing = profile.missing_fields();
    if missing.is_empty() {
        return None;
    }
    Some(IneligibilityReason::IncompleteProfile {
        missing: missing.into_iter().map(str::to_string).collect(),
    })
}

fn check_role(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    let unrecognised = &criteria.unrecognised.roles;
    if unrecognised.is_empty() && criteria.roles.admits(profile.role) {
        return None;
    }
    let allowed = criteria.roles.roles();
    if profile.role.is_some_and(|role| allowed.contains(&role)) {
        return None;
    }
    Some(IneligibilityReason::RoleMismatch {
        required: required_labels(allowed.iter().map(|role| role.label()), unrecognised),
    })
}

fn check_income(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    let limit = criteria.effective_income_limit()?;
    let declared = profile
        .annual_income
        .filter(|income| income.is_finite() && *income >= 0.0)
        .unwrap_or(0.0);

    if declared <= limit {
        None
    } else {
        Some(IneligibilityReason::IncomeAboveLimit { limit, declared })
    }
}

fn check_age(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
    config: &MatchingConfig,
) -> Option<IneligibilityReason> {
    let age = profile.age.unwrap_or(0);
    let min = criteria.age_min.unwrap_or(config.default_age_min);
    let max = criteria.age_max.unwrap_or(config.default_age_max);

    if (min..=max).contains(&age) {
        None
    } else {
        Some(IneligibilityReason::AgeOutOfRange { age, min, max })
    }
}

fn check_state(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    if criteria.states_unrestricted() {
        return None;
    }

    let matches = profile.state.as_deref().is_some_and(|state| {
        criteria
            .states
            .iter()
            .any(|allowed| same_text(allowed, state))
    });

    if matches {
        None
    } else {
        Some(IneligibilityReason::StateMismatch {
            required: criteria.states.clone(),
        })
    }
}

fn check_category(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    let unrecognised = &criteria.unrecognised.categories;
    if enum_set_admits(&criteria.categories, unrecognised, None, profile.category) {
        return None;
    }
    Some(IneligibilityReason::CategoryMismatch {
        required: required_labels(
            criteria.categories.iter().map(|category| category.label()),
            unrecognised,
        ),
    })
}

fn check_gender(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    let unrecognised = &criteria.unrecognised.genders;
    if enum_set_admits(&criteria.genders, unrecognised, Some(Gender::All), profile.gender) {
        return None;
    }
    Some(IneligibilityReason::GenderMismatch {
        required: required_labels(
            criteria.genders.iter().map(|gender| gender.label()),
            unrecognised,
        ),
    })
}

fn check_religion(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    let unrecognised = &criteria.unrecognised.religions;
    if enum_set_admits(
        &criteria.religions,
        unrecognised,
        Some(Religion::All),
        profile.religion,
    ) {
        return None;
    }
    Some(IneligibilityReason::ReligionMismatch {
        required: required_labels(
            criteria.religions.iter().map(|religion| religion.label()),
            unrecognised,
        ),
    })
}

fn check_education_level(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    if text_set_admits(&criteria.education_levels, profile.education_level.as_deref()) {
        None
    } else {
        Some(IneligibilityReason::EducationLevelMismatch {
            required: criteria.education_levels.clone(),
        })
    }
}

fn check_class(
    profile: &UserProfile,
    criteria: &EligibilityCriteria,
) -> Option<IneligibilityReason> {
    if text_set_admits(&criteria.classes, profile.class.as_deref()) {
        None
    } else {
        Some(IneligibilityReason::ClassMismatch {
            required: criteria.classes.clone(),
        })
    }
}

/// Enum restriction lists: nothing listed (recognised or not) or the wildcard admits
/// everyone. Unrecognised entries match no profile value.
fn enum_set_admits<T: Copy + PartialEq>(
    allowed: &[T],
    unrecognised: &[String],
    wildcard: Option<T>,
    value: Option<T>,
) -> bool {
    if allowed.is_empty() && unrecognised.is_empty() {
        return true;
    }
    if wildcard.is_some_and(|wildcard| allowed.contains(&wildcard)) {
        return true;
    }
    value.is_some_and(|value| allowed.contains(&value))
}

fn required_labels<'a>(
    labels: impl Iterator<Item = &'a str>,
    unrecognised: &[String],
) -> Vec<String> {
    labels
        .map(str::to_string)
        .chain(unrecognised.iter().cloned())
        .collect()
}

/// Free-form restriction lists: empty or containing "All" admits everyone, otherwise the
/// profile value must appear (trimmed, case-insensitive).
fn text_set_admits(allowed: &[String], value: Option<&str>) -> bool {
    if allowed.is_empty() || allowed.iter().any(|entry| same_text(entry, "All")) {
        return true;
    }
    value.is_some_and(|value| allowed.iter().any(|entry| same_text(entry, value)))
}

fn same_text(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::domain::Role;

    #[test]
    fn text_sets_ignore_case_and_padding() {
        let allowed = vec!["Class 12".to_string(), "Graduation".to_string()];
        assert!(text_set_admits(&allowed, Some(" class 12 ")));
        assert!(!text_set_admits(&allowed, Some("Class 10")));
        assert!(!text_set_admits(&allowed, None));
    }

    #[test]
    fn unrecognised_entries_still_restrict() {
        let unknown = vec!["EWS".to_string()];
        assert!(!enum_set_admits::<Role>(&[], &unknown, None, Some(Role::Student)));
        assert!(enum_set_admits(&[Role::Student], &unknown, None, Some(Role::Student)));
        assert!(enum_set_admits::<Role>(&[], &[], None, None));
        assert!(enum_set_admits(
            &[Religion::All],
            &unknown,
            Some(Religion::All),
            Some(Religion::Hindu)
        ));
    }

    #[test]
    fn all_entry_lifts_text_restriction() {
        let allowed = vec!["Engineering".to_string(), "all".to_string()];
        assert!(text_set_admits(&allowed, None));
        assert!(text_set_admits(&[], Some("anything")));
    }
}
