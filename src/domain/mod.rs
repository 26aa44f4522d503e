//! The four table-backed records, their transport payloads and the identity
//! type they share.

pub mod etudiant;
pub mod filiere;
pub mod niveau;
pub mod pays;

pub use etudiant::Etudiant;
pub use filiere::Filiere;
pub use niveau::Niveau;
pub use pays::Pays;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage-assigned identity of a record.
///
/// Unassigned until the first save, immutable afterwards. Equality is the
/// storage layer's identity equality: two values compare equal only when
/// both are assigned and carry the same id. An unassigned identity equals
/// nothing, itself included, so `Eq` is deliberately not implemented.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Option<i64>)]
pub struct Identity(Option<i64>);

impl Identity {
    #[must_use]
    pub const fn assigned(id: i64) -> Self {
        Self(Some(id))
    }

    #[must_use]
    pub const fn unassigned() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn value(self) -> Option<i64> {
        self.0
    }

    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0.is_some()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.0, other.0), (Some(a), Some(b)) if a == b)
    }
}

impl From<i64> for Identity {
    fn from(id: i64) -> Self {
        Self(Some(id))
    }
}

impl From<Option<i64>> for Identity {
    fn from(id: Option<i64>) -> Self {
        Self(id)
    }
}

/// Record equality is identity equality, never structural.
macro_rules! identity_equality {
    ($($record:ty),+ $(,)?) => {$(
        impl PartialEq for $record {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }
    )+};
}
pub(crate) use identity_equality;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_identities_compare_by_value() {
        assert_eq!(Identity::assigned(1), Identity::assigned(1));
        assert_ne!(Identity::assigned(1), Identity::assigned(2));
    }

    #[test]
    fn unassigned_identity_equals_nothing() {
        assert_ne!(Identity::unassigned(), Identity::unassigned());
        assert_ne!(Identity::unassigned(), Identity::assigned(1));
        assert_ne!(Identity::assigned(1), Identity::unassigned());
    }

    #[test]
    fn record_equality_follows_identity() {
        let a = Pays { id: Identity::assigned(3), name: Some("Cameroun".to_owned()) };
        let b = Pays { id: Identity::assigned(3), name: Some("Sénégal".to_owned()) };
        let c = Pays { id: Identity::unassigned(), name: Some("Cameroun".to_owned()) };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(c.clone(), c);
    }

    #[test]
    fn identity_serializes_transparently() {
        assert_eq!(serde_json::to_string(&Identity::assigned(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Identity::unassigned()).unwrap(), "null");
    }
}
