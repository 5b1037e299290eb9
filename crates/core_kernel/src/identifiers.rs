//! Identifiers for the chart of accounts and counterparties
//!
//! Each identifier is a UUID newtype so an account id can never be passed
//! where a group or party id is expected. On the wire they are bare UUIDs;
//! `Display` adds a short prefix for log lines and error messages, and
//! parsing accepts either form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

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
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(bare).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// A node of the chart of accounts (e.g. "Current Assets")
    AccountGroupId,
    "GRP"
);

define_id!(
    /// A ledger account postings are made to
    LedgerAccountId,
    "LAC"
);

define_id!(
    /// A customer or supplier whose balances are aged
    PartyId,
    "PTY"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_account_id_display() {
        let id = LedgerAccountId::new();
        assert!(id.to_string().starts_with("LAC-"));
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        let id = AccountGroupId::new();
        let parsed: AccountGroupId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        let bare: AccountGroupId = id.as_uuid().to_string().parse().unwrap();
        assert_eq!(id, bare);
    }

    #[test]
    fn test_other_prefix_is_rejected() {
        let id = PartyId::new();
        let as_account = format!("LAC-{}", id.as_uuid());
        assert!(as_account.parse::<PartyId>().is_err());
    }
}
