//! Tests for strongly-typed identifiers

use core_kernel::{AccountGroupId, LedgerAccountId, PartyId};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

mod creation {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let ids: HashSet<LedgerAccountId> = (0..100).map(|_| LedgerAccountId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_new_ids_are_random_v4() {
        let id = AccountGroupId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_from_uuid_round_trips() {
        let uuid = Uuid::new_v4();
        let id = PartyId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
        assert_eq!(Uuid::from(id), uuid);
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert!(AccountGroupId::new().to_string().starts_with("GRP-"));
        assert!(LedgerAccountId::new().to_string().starts_with("LAC-"));
        assert!(PartyId::new().to_string().starts_with("PTY-"));
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let id = LedgerAccountId::new();
        assert_eq!(LedgerAccountId::from_str(&id.to_string()).unwrap(), id);
        assert_eq!(
            LedgerAccountId::from_str(&id.as_uuid().to_string()).unwrap(),
            id
        );
        assert!(LedgerAccountId::from_str("LAC-not-a-uuid").is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = PartyId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: PartyId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
