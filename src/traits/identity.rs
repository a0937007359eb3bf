//! Identifier source consumed by the expansion engine

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Hands out fresh identities for cloned modules
///
/// Every call must return a value never returned before for the same model.
/// The expansion engine calls it synchronously, once per cloned descendant.
pub trait IdentitySource {
    /// Mint the next identity
    fn next_identity(&mut self) -> Uuid;
}

impl<T: IdentitySource + ?Sized> IdentitySource for &mut T {
    fn next_identity(&mut self) -> Uuid {
        (**self).next_identity()
    }
}

/// Random (v4) identities minted on behalf of one model file
#[derive(Debug, Clone)]
pub struct ModelIdentities {
    model_path: PathBuf,
    issued: u64,
}

impl ModelIdentities {
    /// Create a source scoped to the model at `path`
    pub fn for_model<P: AsRef<Path>>(path: P) -> Self {
        Self {
            model_path: path.as_ref().to_path_buf(),
            issued: 0,
        }
    }

    /// Model path this source mints identities for
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Number of identities issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl IdentitySource for ModelIdentities {
    fn next_identity(&mut self) -> Uuid {
        self.issued += 1;
        Uuid::new_v4()
    }
}

/// Deterministic identities counting up from a base value
///
/// Used where the expanded output must be reproducible, e.g. golden tests.
#[derive(Debug, Clone)]
pub struct SequentialIdentities {
    next: u128,
}

impl SequentialIdentities {
    /// Start counting at `base`
    pub fn starting_at(base: u128) -> Self {
        Self { next: base }
    }
}

impl IdentitySource for SequentialIdentities {
    fn next_identity(&mut self) -> Uuid {
        let id = Uuid::from_u128(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_identities_count_up() {
        let mut ids = SequentialIdentities::starting_at(0x100);
        assert_eq!(ids.next_identity(), Uuid::from_u128(0x100));
        assert_eq!(ids.next_identity(), Uuid::from_u128(0x101));
        assert_eq!(ids.next_identity(), Uuid::from_u128(0x102));
    }

    #[test]
    fn test_model_identities_are_fresh() {
        let mut ids = ModelIdentities::for_model("model.phml");
        let minted: HashSet<Uuid> = (0..1000).map(|_| ids.next_identity()).collect();

        assert_eq!(minted.len(), 1000);
        assert_eq!(ids.issued(), 1000);
        assert_eq!(ids.model_path(), Path::new("model.phml"));
    }

    #[test]
    fn test_borrowed_source_advances_owner() {
        fn mint_two<S: IdentitySource>(mut source: S) -> (Uuid, Uuid) {
            (source.next_identity(), source.next_identity())
        }

        let mut ids = SequentialIdentities::starting_at(7);
        assert_eq!(
            mint_two(&mut ids),
            (Uuid::from_u128(7), Uuid::from_u128(8))
        );
        assert_eq!(ids.next_identity(), Uuid::from_u128(9));
    }
}
