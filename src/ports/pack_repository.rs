//! Pack repository port.

use crate::domain::foundation::{DomainError, PackId};
use crate::domain::pack::Pack;
use async_trait::async_trait;

/// Repository port for Pack aggregate persistence.
#[async_trait]
pub trait PackRepository: Send + Sync {
    /// Save a new pack.
    async fn save(&self, pack: &Pack) -> Result<(), DomainError>;

    /// Update an existing pack.
    ///
    /// # Errors
    ///
    /// - `PackNotFound` if the pack doesn't exist
    async fn update(&self, pack: &Pack) -> Result<(), DomainError>;

    /// Find a pack by its ID.
    async fn find_by_id(&self, id: &PackId) -> Result<Option<Pack>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PackRepository) {}
    }
}
