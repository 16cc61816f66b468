//! Role catalog.
//!
//! Store systems report job codes with location-specific spellings
//! (`"CASH"`, `"CSH"`, `"Cashier"`, ...). Every component of the engine works
//! on the closed [`Role`] enumeration instead, reached through
//! [`canonicalize`].
//!
//! # Canonicalization
//! 1. Trim and upper-case the raw code.
//! 2. Map a variant spelling to its standard code (static table).
//! 3. Map the standard code to a [`Role`].
//!
//! Codes that match nothing become [`Role::Other`] carrying the upper-cased
//! code, so the function is total and idempotent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Canonical store role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Role {
    /// Production station: sorts and hangs donated apparel.
    ApparelProcessor,
    /// Production station: prices donated goods.
    DonationPricer,
    Cashier,
    DonorGreeter,
    StoreManager,
    AssistantManager,
    TeamLead,
    Custodian,
    PartTimeStaff,
    /// Unrecognized code, kept verbatim (upper-cased).
    Other(String),
}

/// Standard code, role, and display title.
const STANDARD_CODES: &[(&str, Role, &str)] = &[
    ("APP_PROC", Role::ApparelProcessor, "Apparel Processor"),
    ("DON_PRICER", Role::DonationPricer, "Donation Pricer"),
    ("CASHIER", Role::Cashier, "Cashier"),
    ("DONOR_GREETER", Role::DonorGreeter, "Donor Greeter"),
    ("STORE_MGR", Role::StoreManager, "Store Manager"),
    ("ASST_MGR", Role::AssistantManager, "Assistant Manager"),
    ("TEAM_LEAD", Role::TeamLead, "Team Lead"),
    ("CUSTODIAN", Role::Custodian, "Custodian"),
    ("PT_STAFF", Role::PartTimeStaff, "Part-Time Staff"),
];

/// Variant spelling → standard code.
const VARIANT_CODES: &[(&str, &str)] = &[
    ("APPAREL_PROCESSOR", "APP_PROC"),
    ("APPAREL PROCESSOR", "APP_PROC"),
    ("APP-PROC", "APP_PROC"),
    ("APPPROC", "APP_PROC"),
    ("PROCESSOR", "APP_PROC"),
    ("DONATION_PRICER", "DON_PRICER"),
    ("DONATION PRICER", "DON_PRICER"),
    ("DON-PRICER", "DON_PRICER"),
    ("PRICER", "DON_PRICER"),
    ("CASH", "CASHIER"),
    ("CSH", "CASHIER"),
    ("SALES_ASSOC", "CASHIER"),
    ("GREETER", "DONOR_GREETER"),
    ("DONOR GREETER", "DONOR_GREETER"),
    ("DG", "DONOR_GREETER"),
    ("SM", "STORE_MGR"),
    ("MGR", "STORE_MGR"),
    ("STORE_MANAGER", "STORE_MGR"),
    ("STORE MANAGER", "STORE_MGR"),
    ("ASM", "ASST_MGR"),
    ("AM", "ASST_MGR"),
    ("ASSISTANT_MANAGER", "ASST_MGR"),
    ("ASSISTANT MANAGER", "ASST_MGR"),
    ("TL", "TEAM_LEAD"),
    ("LEAD", "TEAM_LEAD"),
    ("TEAM LEAD", "TEAM_LEAD"),
    ("JANITOR", "CUSTODIAN"),
    ("CUST", "CUSTODIAN"),
    ("PT", "PT_STAFF"),
    ("PART_TIME", "PT_STAFF"),
    ("PART TIME", "PT_STAFF"),
];

/// Resolves a raw job code to its canonical role. Never fails.
pub fn canonicalize(code: &str) -> Role {
    let upper = code.trim().to_uppercase();
    let standard = VARIANT_CODES
        .iter()
        .find(|(variant, _)| *variant == upper)
        .map(|(_, standard)| *standard)
        .unwrap_or(upper.as_str());

    match STANDARD_CODES.iter().find(|(code, _, _)| *code == standard) {
        Some((_, role, _)) => role.clone(),
        None => Role::Other(upper),
    }
}

/// Returns the standard code plus every variant spelling of a role.
///
/// Empty for [`Role::Other`], which has no registered codes.
pub fn equivalent_codes(role: &Role) -> BTreeSet<&'static str> {
    let Some(standard) = STANDARD_CODES
        .iter()
        .find(|(_, r, _)| r == role)
        .map(|(code, _, _)| *code)
    else {
        return BTreeSet::new();
    };

    let mut codes: BTreeSet<&'static str> = VARIANT_CODES
        .iter()
        .filter(|(_, s)| *s == standard)
        .map(|(variant, _)| *variant)
        .collect();
    codes.insert(standard);
    codes
}

/// Human-readable title for a raw or canonical code.
///
/// Falls back to the raw code when no title is registered.
pub fn job_title(code: &str) -> String {
    match canonicalize(code).title() {
        Some(title) => title.to_string(),
        None => code.to_string(),
    }
}

impl Role {
    /// Standard code of this role.
    pub fn code(&self) -> &str {
        match self {
            Role::Other(code) => code.as_str(),
            known => STANDARD_CODES
                .iter()
                .find(|(_, r, _)| r == known)
                .map(|(code, _, _)| *code)
                .unwrap_or_default(),
        }
    }

    /// Registered display title, if any.
    pub fn title(&self) -> Option<&'static str> {
        STANDARD_CODES
            .iter()
            .find(|(_, r, _)| r == self)
            .map(|(_, _, title)| *title)
    }

    /// Roles with a hard per-day headcount ceiling.
    pub fn is_production_station(&self) -> bool {
        matches!(self, Role::ApparelProcessor | Role::DonationPricer)
    }

    /// Store manager or assistant manager.
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::StoreManager | Role::AssistantManager)
    }

    /// Managers plus team leads.
    pub fn is_leadership(&self) -> bool {
        self.is_manager() || *self == Role::TeamLead
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Role {
    fn from(code: String) -> Self {
        canonicalize(&code)
    }
}

impl From<&str> for Role {
    fn from(code: &str) -> Self {
        canonicalize(code)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.code().to_string()
    }
}
