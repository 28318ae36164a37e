//! Ownership trait for user-owned resources.
//!
//! Trips are the only directly owned aggregate; budgets, packing lists and
//! activities inherit their owner through the trip they belong to.

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning `Forbidden` if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this trip",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owned {
        owner: UserId,
    }

    impl OwnedByUser for Owned {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn check_ownership_succeeds_for_owner() {
        let resource = Owned { owner: user("owner-1") };
        assert!(resource.check_ownership(&user("owner-1")).is_ok());
    }

    #[test]
    fn check_ownership_fails_with_forbidden_for_other_user() {
        let resource = Owned { owner: user("owner-1") };
        let err = resource.check_ownership(&user("intruder")).unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.details.get("owner_id"), Some(&"owner-1".to_string()));
        assert_eq!(err.details.get("requested_by"), Some(&"intruder".to_string()));
    }
}
