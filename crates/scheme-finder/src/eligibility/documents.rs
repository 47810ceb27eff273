//! Adapters from the loosely typed documents kept by the profile and catalog stores into
//! the strongly typed [`UserProfile`] and [`Program`] the matcher consumes.
//!
//! Stored documents were written by web forms, so numbers frequently arrive as strings
//! and optional lists as single values. Nothing here fails: unreadable values fall back
//! to "absent", which the matcher treats as unrestricted (programs) or missing (profiles).
//! Restriction entries naming no known role, category, gender, or religion are kept in
//! [`UnrecognisedValues`] so the program stays restricted.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::domain::{
    normalize_token, Category, EligibilityCriteria, Gender, LifecycleStatus, Program, ProgramId,
    ProgramKind, Religion, Role, RoleRestriction, UnrecognisedValues, UserProfile,
};

/// Scheme record as written by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemeDocument {
    pub id: Value,
    pub name: Value,
    pub title: Value,
    pub department: Value,
    pub description: Value,
    pub benefit_amount: Value,
    pub link: Value,
    pub target_role: Value,
    pub income_limit: Value,
    pub category: Value,
    pub state: Value,
    pub age_min: Value,
    pub age_max: Value,
    pub documents: Value,
    pub status: Value,
    pub deadline: Value,
    pub nav_categories: Value,
}

impl SchemeDocument {
    /// Schemes have no separate publication flag: "Active" is the visible state.
    pub fn into_program(self, fallback_id: &str) -> Program {
        let lifecycle_status = lifecycle(&self.status);
        let published = lifecycle_status == LifecycleStatus::Active;

        let roles = wildcard_list(&self.target_role, "targetRole", Role::parse);
        let categories = wildcard_list(&self.category, "category", Category::parse);
        let unrecognised = UnrecognisedValues {
            roles: roles.unknown,
            categories: categories.unknown,
            ..UnrecognisedValues::default()
        };

        Program {
            id: program_id(&self.id, fallback_id),
            kind: ProgramKind::Scheme,
            title: text(&self.name)
                .or_else(|| text(&self.title))
                .unwrap_or_else(|| "Untitled scheme".to_string()),
            description: text(&self.description).unwrap_or_default(),
            department: text(&self.department),
            benefit: text(&self.benefit_amount),
            link: text(&self.link),
            deadline: date(&self.deadline),
            listing_category: None,
            nav_categories: text_list(&self.nav_categories),
            featured: false,
            lifecycle_status,
            published,
            eligibility: EligibilityCriteria {
                roles: role_restriction(roles.known),
                income_limit: number(&self.income_limit),
                age_min: whole(&self.age_min),
                age_max: whole(&self.age_max),
                states: state_list(&self.state),
                categories: categories.known,
                unrecognised,
                ..EligibilityCriteria::default()
            },
            required_documents: dedup(text_list(&self.documents)),
        }
    }
}

/// Scholarship record, including the older single-value filter fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScholarshipDocument {
    pub id: Value,
    pub title: Value,
    pub description: Value,
    pub award: Value,
    pub link: Value,
    pub deadline: Value,
    pub status: Value,
    pub is_published: Value,
    pub is_featured: Value,
    pub category: Value,
    pub eligible_roles: Value,
    pub eligible_classes: Value,
    pub eligible_categories: Value,
    pub eligible_genders: Value,
    pub eligible_states: Value,
    pub eligible_religions: Value,
    pub eligible_education_levels: Value,
    pub income_limit: Value,
    pub age_min: Value,
    pub age_max: Value,
    pub required_documents: Value,
    pub class: Value,
    pub gender: Value,
    pub state: Value,
    pub religion: Value,
    pub study_level: Value,
}

impl ScholarshipDocument {
    pub fn into_program(self, fallback_id: &str) -> Program {
        let classes = prefer(text_list(&self.eligible_classes), || text_list(&self.class));
        let education_levels = prefer(text_list(&self.eligible_education_levels), || {
            text_list(&self.study_level)
        });
        let genders = enum_list(&self.eligible_genders, "eligibleGenders", Gender::parse)
            .or_else(|| enum_list(&self.gender, "gender", Gender::parse));
        let religions = enum_list(&self.eligible_religions, "eligibleReligions", Religion::parse)
            .or_else(|| enum_list(&self.religion, "religion", Religion::parse));
        let roles = wildcard_list(&self.eligible_roles, "eligibleRoles", Role::parse);
        let categories = wildcard_list(
            &self.eligible_categories,
            "eligibleCategories",
            Category::parse,
        );
        let unrecognised = UnrecognisedValues {
            roles: roles.unknown,
            categories: categories.unknown,
            genders: genders.unknown,
            religions: religions.unknown,
        };
        let states = prefer(state_list(&self.eligible_states), || state_list(&self.state));

        Program {
            id: program_id(&self.id, fallback_id),
            kind: ProgramKind::Scholarship,
            title: text(&self.title).unwrap_or_else(|| "Untitled scholarship".to_string()),
            description: text(&self.description).unwrap_or_default(),
            department: None,
            benefit: text(&self.award),
            link: text(&self.link),
            deadline: date(&self.deadline),
            listing_category: text(&self.category),
            nav_categories: Vec::new(),
            featured: flag(&self.is_featured),
            lifecycle_status: lifecycle(&self.status),
            published: flag(&self.is_published),
            eligibility: EligibilityCriteria {
                roles: role_restriction(roles.known),
                income_limit: number(&self.income_limit),
                age_min: whole(&self.age_min),
                age_max: whole(&self.age_max),
                states,
                categories: categories.known,
                genders: genders.known,
                religions: religions.known,
                education_levels,
                classes,
                unrecognised,
            },
            required_documents: dedup(text_list(&self.required_documents)),
        }
    }
}

/// Profile document as saved by the profile editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDocument {
    pub role: Value,
    pub age: Value,
    pub gender: Value,
    pub state: Value,
    pub category: Value,
    pub religion: Value,
    pub education_level: Value,
    pub class: Value,
    pub course: Value,
    pub annual_income: Value,
    pub disability_status: Value,
    pub land_size: Value,
}

impl ProfileDocument {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            role: text(&self.role).and_then(|raw| parse_or_warn(&raw, "role", Role::parse)),
            age: whole(&self.age),
            gender: text(&self.gender).and_then(|raw| parse_or_warn(&raw, "gender", Gender::parse)),
            state: text(&self.state),
            category: text(&self.category)
                .and_then(|raw| parse_or_warn(&raw, "category", Category::parse)),
            religion: text(&self.religion)
                .and_then(|raw| parse_or_warn(&raw, "religion", Religion::parse)),
            education_level: text(&self.education_level),
            class: text(&self.class),
            course: text(&self.course),
            annual_income: number(&self.annual_income),
            disability_status: flag(&self.disability_status),
            land_size: number(&self.land_size),
        }
    }
}

impl From<&ProfileDocument> for UserProfile {
    fn from(document: &ProfileDocument) -> Self {
        document.to_profile()
    }
}

impl From<ProfileDocument> for UserProfile {
    fn from(document: ProfileDocument) -> Self {
        document.to_profile()
    }
}

fn program_id(raw: &Value, fallback: &str) -> ProgramId {
    ProgramId(text(raw).unwrap_or_else(|| fallback.to_string()))
}

fn lifecycle(raw: &Value) -> LifecycleStatus {
    match text(raw) {
        None => LifecycleStatus::Draft,
        Some(status) => LifecycleStatus::parse(&status).unwrap_or_else(|| {
            warn!(field = "status", value = %status, "unknown lifecycle status, treating as draft");
            LifecycleStatus::Draft
        }),
    }
}

fn role_restriction(roles: Vec<Role>) -> RoleRestriction {
    if roles.is_empty() {
        RoleRestriction::AnyRole
    } else {
        RoleRestriction::Roles(dedup(roles))
    }
}

/// "All India" (or any value containing "All") means no state restriction.
fn state_list(raw: &Value) -> Vec<String> {
    let states = text_list(raw);
    if states.iter().any(|state| state.contains("All")) {
        return Vec::new();
    }
    dedup(states)
}

fn is_wildcard(raw: &str) -> bool {
    matches!(normalize_token(raw).as_str(), "all" | "any" | "allcategories")
}

fn prefer<T>(primary: Vec<T>, fallback: impl FnOnce() -> Vec<T>) -> Vec<T> {
    if primary.is_empty() {
        fallback()
    } else {
        primary
    }
}

fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

fn parse_or_warn<T>(
    raw: &str,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let parsed = parse(raw);
    if parsed.is_none() {
        warn!(field, value = %raw, "dropping unrecognised value");
    }
    parsed
}

/// Restriction entries split into parsed values and raw text that matched no variant.
struct ParsedList<T> {
    known: Vec<T>,
    unknown: Vec<String>,
}

impl<T> ParsedList<T> {
    fn empty() -> Self {
        Self {
            known: Vec::new(),
            unknown: Vec::new(),
        }
    }

    fn or_else(self, fallback: impl FnOnce() -> Self) -> Self {
        if self.known.is_empty() && self.unknown.is_empty() {
            fallback()
        } else {
            self
        }
    }
}

fn enum_list<T: PartialEq>(
    raw: &Value,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> ParsedList<T> {
    let mut parsed = ParsedList::empty();
    for value in text_list(raw) {
        match parse(&value) {
            Some(known) => parsed.known.push(known),
            None => {
                warn!(
                    field,
                    value = %value,
                    "unrecognised restriction value, no profile can match it"
                );
                parsed.unknown.push(value);
            }
        }
    }
    ParsedList {
        known: dedup(parsed.known),
        unknown: dedup(parsed.unknown),
    }
}

/// Role and category restrictions have no wildcard variant, so "All" clears the list.
fn wildcard_list<T: PartialEq>(
    raw: &Value,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> ParsedList<T> {
    if text_list(raw).iter().any(|value| is_wildcard(value)) {
        return ParsedList::empty();
    }
    enum_list(raw, field, parse)
}

/// Non-empty trimmed text. Placeholders such as "Not specified" count as absent.
pub(crate) fn text(raw: &Value) -> Option<String> {
    let value = match raw {
        Value::String(value) => value.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    if value.is_empty() || value.eq_ignore_ascii_case("not specified") {
        None
    } else {
        Some(value)
    }
}

/// A string, or an array of strings, flattened into a list of non-empty entries.
pub(crate) fn text_list(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => items.iter().filter_map(text).collect(),
        other => text(other).into_iter().collect(),
    }
}

/// Numbers or numeric strings, non-negative and finite. Thousands separators and a
/// leading rupee sign are tolerated.
pub(crate) fn number(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(value) => value
            .trim()
            .trim_start_matches('₹')
            .replace(',', "")
            .trim()
            .parse::<f64>()
            .ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

pub(crate) fn whole(raw: &Value) -> Option<u32> {
    number(raw).map(|value| value.floor().min(u32::MAX as f64) as u32)
}

pub(crate) fn flag(raw: &Value) -> bool {
    match raw {
        Value::Bool(flag) => *flag,
        Value::String(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        _ => false,
    }
}

/// `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn date(raw: &Value) -> Option<NaiveDate> {
    let value = text(raw)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(&value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}
