use crate::domain::model::Pos;
use crate::domain::ports::PosDataService;
use crate::utils::error::{PosError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct StoreState {
    next_id: u64,
    records: BTreeMap<u64, Pos>,
}

/// Process-local [`PosDataService`], used by the CLI and in tests.
///
/// Name uniqueness is checked under the same lock as the write, so
/// concurrent upserts cannot both claim one name.
#[derive(Debug)]
pub struct InMemoryPosStore {
    state: Mutex<StoreState>,
}

impl InMemoryPosStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|_| PosError::StorageError {
            message: "POS store lock poisoned".to_string(),
        })
    }
}

impl Default for InMemoryPosStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PosDataService for InMemoryPosStore {
    async fn clear(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.records.clear();
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Pos>> {
        let state = self.lock()?;
        Ok(state.records.values().cloned().collect())
    }

    async fn get_by_id(&self, id: u64) -> Result<Pos> {
        let state = self.lock()?;
        state
            .records
            .get(&id)
            .cloned()
            .ok_or(PosError::PosNotFound(id))
    }

    async fn upsert(&self, mut pos: Pos) -> Result<Pos> {
        let mut state = self.lock()?;

        let name_taken = state
            .records
            .values()
            .any(|existing| existing.name == pos.name && existing.id != pos.id);
        if name_taken {
            return Err(PosError::DuplicatePosName(pos.name));
        }

        let now = Utc::now();
        match pos.id {
            None => {
                let id = state.next_id;
                state.next_id += 1;
                pos.id = Some(id);
                pos.created_at = Some(now);
                pos.updated_at = Some(now);
                state.records.insert(id, pos.clone());
            }
            Some(id) => {
                let existing = state.records.get(&id).ok_or(PosError::PosNotFound(id))?;
                pos.created_at = existing.created_at;
                pos.updated_at = Some(now);
                state.records.insert(id, pos.clone());
            }
        }
        Ok(pos)
    }
}
