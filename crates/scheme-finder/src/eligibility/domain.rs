use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier handed out by the auth provider for a signed-in citizen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Catalog identifier for a scheme or scholarship record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ProgramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercases and strips separators so "General Citizen", "general_citizen" and
/// "GeneralCitizen" compare equal.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Occupation-style role a citizen registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Student,
    Farmer,
    Worker,
    #[serde(rename = "General Citizen")]
    GeneralCitizen,
    #[serde(rename = "Senior Citizen")]
    SeniorCitizen,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Farmer => "Farmer",
            Role::Worker => "Worker",
            Role::GeneralCitizen => "General Citizen",
            Role::SeniorCitizen => "Senior Citizen",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "student" => Some(Role::Student),
            "farmer" => Some(Role::Farmer),
            "worker" => Some(Role::Worker),
            "generalcitizen" | "citizen" => Some(Role::GeneralCitizen),
            "seniorcitizen" | "senior" => Some(Role::SeniorCitizen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    All,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::All => "All",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            "all" | "any" => Some(Gender::All),
            _ => None,
        }
    }
}

/// Social category used by reservation-based programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    General,
    #[serde(rename = "OBC")]
    Obc,
    #[serde(rename = "SC")]
    Sc,
    #[serde(rename = "ST")]
    St,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Obc => "OBC",
            Category::Sc => "SC",
            Category::St => "ST",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "general" | "gen" => Some(Category::General),
            "obc" => Some(Category::Obc),
            "sc" => Some(Category::Sc),
            "st" => Some(Category::St),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Religion {
    All,
    Hindu,
    Muslim,
    Christian,
    Sikh,
    Buddhist,
}

impl Religion {
    pub const fn label(self) -> &'static str {
        match self {
            Religion::All => "All",
            Religion::Hindu => "Hindu",
            Religion::Muslim => "Muslim",
            Religion::Christian => "Christian",
            Religion::Sikh => "Sikh",
            Religion::Buddhist => "Buddhist",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "all" | "any" => Some(Religion::All),
            "hindu" => Some(Religion::Hindu),
            "muslim" => Some(Religion::Muslim),
            "christian" => Some(Religion::Christian),
            "sikh" => Some(Religion::Sikh),
            "buddhist" => Some(Religion::Buddhist),
            _ => None,
        }
    }
}

/// Sentinel state value meaning "every state".
pub const ALL_INDIA: &str = "All India";

/// Attributes of a citizen that programs can restrict on.
///
/// Every field is optional because profiles arrive from a document store that may hold
/// partial data. The matcher substitutes defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub role: Option<Role>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub state: Option<String>,
    pub category: Option<Category>,
    pub religion: Option<Religion>,
    pub education_level: Option<String>,
    pub class: Option<String>,
    pub course: Option<String>,
    pub annual_income: Option<f64>,
    #[serde(default)]
    pub disability_status: bool,
    pub land_size: Option<f64>,
}

impl UserProfile {
    /// Names of the fields that must be present before any program can match.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.role.is_none() {
            missing.push("role");
        }
        if self.age.is_none() {
            missing.push("age");
        }
        if self
            .state
            .as_deref()
            .map(|state| state.trim().is_empty())
            .unwrap_or(true)
        {
            missing.push("state");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.annual_income.is_none() {
            missing.push("annualIncome");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Publication lifecycle shared by schemes ("Active") and scholarships ("live").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Draft,
    #[serde(alias = "live")]
    Active,
    AlwaysOpen,
    Upcoming,
    Expired,
}

impl LifecycleStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LifecycleStatus::Draft => "draft",
            LifecycleStatus::Active => "active",
            LifecycleStatus::AlwaysOpen => "always_open",
            LifecycleStatus::Upcoming => "upcoming",
            LifecycleStatus::Expired => "expired",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "draft" | "hidden" => Some(LifecycleStatus::Draft),
            "active" | "live" => Some(LifecycleStatus::Active),
            "alwaysopen" => Some(LifecycleStatus::AlwaysOpen),
            "upcoming" => Some(LifecycleStatus::Upcoming),
            "expired" | "closed" => Some(LifecycleStatus::Expired),
            _ => None,
        }
    }

    /// Only running programs can be matched against a profile.
    pub const fn is_matchable(self) -> bool {
        matches!(self, LifecycleStatus::Active | LifecycleStatus::AlwaysOpen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Scheme,
    Scholarship,
}

/// Which roles a program targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleRestriction {
    #[default]
    AnyRole,
    Roles(Vec<Role>),
}

impl RoleRestriction {
    /// A program aimed only at "General Citizen" is open to everyone, as is an empty list.
    pub fn is_unrestricted(&self) -> bool {
        match self {
            RoleRestriction::AnyRole => true,
            RoleRestriction::Roles(roles) => {
                roles.is_empty() || roles.iter().all(|role| *role == Role::GeneralCitizen)
            }
        }
    }

    pub fn admits(&self, role: Option<Role>) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        match (self, role) {
            (RoleRestriction::Roles(roles), Some(role)) => roles.contains(&role),
            _ => false,
        }
    }

    pub fn roles(&self) -> &[Role] {
        match self {
            RoleRestriction::AnyRole => &[],
            RoleRestriction::Roles(roles) => roles,
        }
    }
}

/// Catalog restriction entries that name no known role, category, gender, or religion.
///
/// They still restrict: a list holding only unrecognised entries admits no profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnrecognisedValues {
    pub roles: Vec<String>,
    pub categories: Vec<String>,
    pub genders: Vec<String>,
    pub religions: Vec<String>,
}

impl UnrecognisedValues {
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
            && self.categories.is_empty()
            && self.genders.is_empty()
            && self.religions.is_empty()
    }
}

/// Restriction fields of a program. Empty collections and `None` never exclude anyone,
/// unless `unrecognised` holds entries for the same field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityCriteria {
    pub roles: RoleRestriction,
    pub income_limit: Option<f64>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub states: Vec<String>,
    pub categories: Vec<Category>,
    pub genders: Vec<Gender>,
    pub religions: Vec<Religion>,
    pub education_levels: Vec<String>,
    pub classes: Vec<String>,
    pub unrecognised: UnrecognisedValues,
}

impl EligibilityCriteria {
    /// Criteria that admit every complete profile.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// The "All India" sentinel, or any entry mentioning "All", lifts the state restriction.
    pub fn states_unrestricted(&self) -> bool {
        self.states.is_empty() || self.states.iter().any(|state| state.contains("All"))
    }

    /// The effective limit, ignoring zero, negative, and non-finite values.
    pub fn effective_income_limit(&self) -> Option<f64> {
        self.income_limit
            .filter(|limit| limit.is_finite() && *limit > 0.0)
    }
}

/// Unified scheme/scholarship record as the matcher sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: ProgramId,
    pub kind: ProgramKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub benefit: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub listing_category: Option<String>,
    #[serde(default)]
    pub nav_categories: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub lifecycle_status: LifecycleStatus,
    pub published: bool,
    #[serde(default)]
    pub eligibility: EligibilityCriteria,
    #[serde(default)]
    pub required_documents: Vec<String>,
}

impl Program {
    /// Both the lifecycle status and the publication flag must allow matching.
    pub fn is_open(&self) -> bool {
        self.lifecycle_status.is_matchable() && self.published
    }

    pub fn summary(&self) -> ProgramSummary {
        ProgramSummary {
            id: self.id.clone(),
            kind: self.kind,
            title: self.title.clone(),
            department: self.department.clone(),
            benefit: self.benefit.clone(),
            deadline: self.deadline,
            link: self.link.clone(),
            status: self.lifecycle_status.label(),
            required_documents: self.required_documents.clone(),
        }
    }
}

/// Card-sized view of a program for listings and eligibility reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramSummary {
    pub id: ProgramId,
    pub kind: ProgramKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub status: &'static str,
    pub required_documents: Vec<String>,
}
