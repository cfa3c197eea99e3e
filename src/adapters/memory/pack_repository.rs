//! In-Memory Pack Repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PackId};
use crate::domain::pack::Pack;
use crate::ports::PackRepository;

/// In-memory storage for lesson packs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPackRepository {
    packs: Arc<RwLock<HashMap<PackId, Pack>>>,
}

impl InMemoryPackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packs(packs: impl IntoIterator<Item = Pack>) -> Self {
        let map = packs.into_iter().map(|p| (*p.id(), p)).collect();
        Self {
            packs: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl PackRepository for InMemoryPackRepository {
    async fn save(&self, pack: &Pack) -> Result<(), DomainError> {
        self.packs.write().await.insert(*pack.id(), pack.clone());
        Ok(())
    }

    async fn update(&self, pack: &Pack) -> Result<(), DomainError> {
        let mut packs = self.packs.write().await;
        match packs.get_mut(pack.id()) {
            Some(stored) => {
                *stored = pack.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::PackNotFound,
                format!("Pack not found: {}", pack.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &PackId) -> Result<Option<Pack>, DomainError> {
        Ok(self.packs.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Location, SessionType, StudentId, Timestamp};

    fn pack() -> Pack {
        Pack::new(
            PackId::new(),
            StudentId::new(),
            "Cello",
            SessionType::Solo,
            Location::Offline,
            10,
            Timestamp::now(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn update_persists_consumed_credit() {
        let mut pack = pack();
        let repo = InMemoryPackRepository::with_packs([pack.clone()]);

        pack.consume().unwrap();
        repo.update(&pack).await.unwrap();

        let stored = repo.find_by_id(pack.id()).await.unwrap().unwrap();
        assert_eq!(stored.sessions_used(), 1);
    }

    #[tokio::test]
    async fn update_unknown_pack_fails() {
        let repo = InMemoryPackRepository::new();
        let err = repo.update(&pack()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PackNotFound);
    }
}
