use std::fmt;

use thiserror::Error;

/// Kind of state change being attempted on an owned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Update => f.write_str("modify"),
            Mutation::Delete => f.write_str("delete"),
        }
    }
}

/// Raised when the acting identity is not the resource owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OwnershipError {
    #[error("Cannot {0} a resource owned by another identity")]
    NotOwner(Mutation),
}

/// A resource with exactly one owning identity.
pub trait Owned {
    type Owner: PartialEq;

    fn owner(&self) -> &Self::Owner;
}

/// Allow a mutation only when `acting` equals `owner`.
///
/// Callers must confirm the resource exists before asking, so a missing
/// resource is reported as not found rather than as an ownership failure.
pub fn authorize_mutation<I>(acting: &I, owner: &I, mutation: Mutation) -> Result<(), OwnershipError>
where
    I: PartialEq + ?Sized,
{
    if acting == owner {
        Ok(())
    } else {
        Err(OwnershipError::NotOwner(mutation))
    }
}

/// [`authorize_mutation`] against the owner recorded on `resource`.
pub fn ensure_owner<R>(
    resource: &R,
    acting: &R::Owner,
    mutation: Mutation,
) -> Result<(), OwnershipError>
where
    R: Owned,
{
    authorize_mutation(acting, resource.owner(), mutation)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        author: u64,
    }

    impl Owned for Note {
        type Owner = u64;

        fn owner(&self) -> &u64 {
            &self.author
        }
    }

    #[test]
    fn test_owner_may_mutate() {
        assert_eq!(authorize_mutation(&7, &7, Mutation::Update), Ok(()));
        assert_eq!(authorize_mutation("a", "a", Mutation::Delete), Ok(()));
    }

    #[test]
    fn test_other_identity_rejected() {
        assert_eq!(
            authorize_mutation(&8, &7, Mutation::Update),
            Err(OwnershipError::NotOwner(Mutation::Update))
        );
        assert_eq!(
            authorize_mutation(&8, &7, Mutation::Delete),
            Err(OwnershipError::NotOwner(Mutation::Delete))
        );
    }

    #[test]
    fn test_ensure_owner_on_resource() {
        let note = Note { author: 1 };

        assert!(ensure_owner(&note, &1, Mutation::Delete).is_ok());
        assert!(ensure_owner(&note, &2, Mutation::Delete).is_err());
    }

    #[test]
    fn test_mutation_wording() {
        assert_eq!(Mutation::Update.to_string(), "modify");
        assert_eq!(Mutation::Delete.to_string(), "delete");
        assert_eq!(
            OwnershipError::NotOwner(Mutation::Delete).to_string(),
            "Cannot delete a resource owned by another identity"
        );
    }
}
