//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype.
///
/// Each generated type gets `new`/`from_uuid`/`as_uuid`, `Default`,
/// `Display` and `FromStr`, and serializes as a bare UUID string.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a season (one school year).
    SeasonId
);
uuid_id!(
    /// Unique identifier for a family grouping members.
    FamilyId
);
uuid_id!(
    /// Unique identifier for a member.
    MemberId
);
uuid_id!(
    /// Unique identifier for a workshop.
    WorkshopId
);
uuid_id!(
    /// Unique identifier for a member's yearly membership.
    MembershipId
);
uuid_id!(
    /// Unique identifier for a member's season registration.
    RegistrationId
);
uuid_id!(
    /// Unique identifier for one workshop line of a registration.
    WorkshopRegistrationId
);
uuid_id!(
    /// Unique identifier for a payment.
    PaymentId
);
uuid_id!(
    /// Unique identifier for a show client.
    ShowClientId
);
uuid_id!(
    /// Unique identifier for a show booking.
    ShowId
);
