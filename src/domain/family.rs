//! Families and members.
//!
//! A family groups members paying together. Members may also stand alone.
//! Minor members must name a guardian reachable by email or phone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    normalize_optional, require_text, FamilyId, MemberId, Timestamp, ValidationError,
};

// ════════════════════════════════════════════════════════════════════════════════
// Family
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct FamilyDetails {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Family {
    pub fn create(details: FamilyDetails) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        let mut family = Self {
            id: FamilyId::new(),
            name: String::new(),
            address: None,
            phone: None,
            email: None,
            created_at: now,
            updated_at: now,
        };
        family.apply(details)?;
        Ok(family)
    }

    pub fn update(&mut self, details: FamilyDetails) -> Result<(), ValidationError> {
        self.apply(details)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn apply(&mut self, details: FamilyDetails) -> Result<(), ValidationError> {
        self.name = require_text("name", &details.name)?;
        self.address = normalize_optional(details.address);
        self.phone = normalize_optional(details.phone);
        self.email = normalize_optional(details.email);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Member
// ════════════════════════════════════════════════════════════════════════════════

/// Legal guardian of a minor member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Guardian {
    fn normalized(self) -> Result<Self, ValidationError> {
        let guardian = Guardian {
            first_name: require_text("guardian_first_name", &self.first_name)?,
            last_name: require_text("guardian_last_name", &self.last_name)?,
            email: normalize_optional(self.email),
            phone: normalize_optional(self.phone),
        };
        if guardian.email.is_none() && guardian.phone.is_none() {
            return Err(ValidationError::invalid_format(
                "guardian",
                "an email or a phone number is required",
            ));
        }
        Ok(guardian)
    }

    fn is_blank(&self) -> bool {
        self.first_name.trim().is_empty()
            && self.last_name.trim().is_empty()
            && self.email.as_deref().map_or(true, |e| e.trim().is_empty())
            && self.phone.as_deref().map_or(true, |p| p.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemberDetails {
    pub family_id: Option<FamilyId>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_minor: bool,
    pub guardian: Option<Guardian>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub family_id: Option<FamilyId>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_minor: bool,
    pub guardian: Option<Guardian>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    pub fn create(details: MemberDetails) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        let mut member = Self {
            id: MemberId::new(),
            family_id: None,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone: None,
            birth_date: None,
            is_minor: false,
            guardian: None,
            created_at: now,
            updated_at: now,
        };
        member.apply(details)?;
        Ok(member)
    }

    pub fn update(&mut self, details: MemberDetails) -> Result<(), ValidationError> {
        self.apply(details)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn apply(&mut self, details: MemberDetails) -> Result<(), ValidationError> {
        let guardian = match details.guardian.filter(|g| !g.is_blank()) {
            Some(g) => Some(g.normalized()?),
            None if details.is_minor => {
                return Err(ValidationError::empty_field("guardian"));
            }
            None => None,
        };

        self.family_id = details.family_id;
        self.first_name = require_text("first_name", &details.first_name)?;
        self.last_name = require_text("last_name", &details.last_name)?;
        self.email = normalize_optional(details.email);
        self.phone = normalize_optional(details.phone);
        self.birth_date = details.birth_date;
        self.is_minor = details.is_minor;
        self.guardian = guardian;
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match on first name, last name or email.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.first_name.to_lowercase().contains(&term)
            || self.last_name.to_lowercase().contains(&term)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult() -> MemberDetails {
        MemberDetails {
            first_name: "Alice".to_string(),
            last_name: "Martin".to_string(),
            email: Some("alice@example.org".to_string()),
            ..Default::default()
        }
    }

    fn guardian() -> Guardian {
        Guardian {
            first_name: "Paul".to_string(),
            last_name: "Martin".to_string(),
            email: None,
            phone: Some("0600000000".to_string()),
        }
    }

    #[test]
    fn family_requires_name() {
        let result = Family::create(FamilyDetails {
            name: "  ".to_string(),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn family_blank_optionals_become_none() {
        let family = Family::create(FamilyDetails {
            name: "Martin".to_string(),
            email: Some("   ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(family.email, None);
    }

    #[test]
    fn adult_without_guardian_is_valid() {
        let member = Member::create(adult()).unwrap();
        assert!(member.guardian.is_none());
        assert_eq!(member.full_name(), "Alice Martin");
    }

    #[test]
    fn minor_requires_guardian() {
        let details = MemberDetails {
            is_minor: true,
            ..adult()
        };
        assert!(matches!(
            Member::create(details),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn minor_guardian_needs_contact() {
        let details = MemberDetails {
            is_minor: true,
            guardian: Some(Guardian {
                phone: None,
                ..guardian()
            }),
            ..adult()
        };
        assert!(matches!(
            Member::create(details),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn minor_with_guardian_phone_is_valid() {
        let details = MemberDetails {
            is_minor: true,
            guardian: Some(guardian()),
            ..adult()
        };
        let member = Member::create(details).unwrap();
        assert_eq!(member.guardian.unwrap().last_name, "Martin");
    }

    #[test]
    fn blank_guardian_counts_as_missing() {
        let details = MemberDetails {
            is_minor: true,
            guardian: Some(Guardian::default()),
            ..adult()
        };
        assert!(Member::create(details).is_err());
    }

    #[test]
    fn search_matches_names_and_email_case_insensitively() {
        let member = Member::create(adult()).unwrap();
        assert!(member.matches_search("ALI"));
        assert!(member.matches_search("mart"));
        assert!(member.matches_search("example.org"));
        assert!(!member.matches_search("bob"));
        assert!(member.matches_search(""));
    }
}
