use crate::database::{Database, DbError};
use serde::{Deserialize, Serialize};

const ID_LENGTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateRecord {
    pub id: String,
    pub user_id_1: u64,
    pub user_id_2: u64,
    pub topic: String,
    pub winner_id: u64,
}

/// Fields supplied by `/debate add`; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDebate {
    pub user_id_1: u64,
    pub user_id_2: u64,
    pub topic: String,
    pub winner_id: u64,
}

impl NewDebate {
    pub fn validate(&self) -> Result<(), DbError> {
        if self.topic.trim().is_empty() {
            return Err(DbError::Validation("The debate topic can't be empty.".into()));
        }
        if self.winner_id != self.user_id_1 && self.winner_id != self.user_id_2 {
            return Err(DbError::Validation(
                "The winner has to be one of the two debaters.".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct DebateDatabase {
    /// Insertion order.
    pub records: Vec<DebateRecord>,
}

impl DebateDatabase {
    fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id: String = std::iter::repeat_with(fastrand::alphanumeric)
                .take(ID_LENGTH)
                .collect();
            if !self.contains_id(&id) {
                return id;
            }
        }
    }
}

pub type DebateStore = Database<DebateDatabase>;

impl DebateStore {
    pub async fn create(&self, debate: NewDebate) -> Result<DebateRecord, DbError> {
        debate.validate()?;

        self.transaction(|db| {
            let record = DebateRecord {
                id: db.fresh_id(),
                user_id_1: debate.user_id_1,
                user_id_2: debate.user_id_2,
                topic: debate.topic,
                winner_id: debate.winner_id,
            };
            db.records.push(record.clone());
            Ok(record)
        })
        .await
    }

    pub async fn find_all(&self) -> Result<Vec<DebateRecord>, DbError> {
        self.read(|db| db.records.clone()).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), DbError> {
        let id = id.trim();
        self.transaction(|db| {
            let index = db
                .records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| DbError::NotFound(id.to_string()))?;
            db.records.remove(index);
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::temp_db_path;
    use crate::modules::debates::ranking::rank_records;

    async fn ready_store(name: &str) -> DebateStore {
        let store = DebateStore::new(temp_db_path(name));
        store.connect().await.unwrap();
        store
    }

    fn debate(user_id_1: u64, user_id_2: u64, topic: &str, winner_id: u64) -> NewDebate {
        NewDebate {
            user_id_1,
            user_id_2,
            topic: topic.to_string(),
            winner_id,
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let store = ready_store("round-trip").await;
        let created = store.create(debate(11, 22, "Topic X", 11)).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![created.clone()]);
        assert_eq!(created.id.len(), ID_LENGTH);
        assert_eq!(created.user_id_1, 11);
        assert_eq!(created.user_id_2, 22);
        assert_eq!(created.topic, "Topic X");
        assert_eq!(created.winner_id, 11);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_order_is_insertion() {
        let store = ready_store("unique").await;
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(store.create(debate(1, 2, &format!("t{}", i), 1)).await.unwrap().id);
        }

        let found: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(found, ids);

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = ready_store("delete").await;
        let keep = store.create(debate(1, 2, "keep", 1)).await.unwrap();
        let gone = store.create(debate(3, 4, "gone", 4)).await.unwrap();

        store.delete_by_id(&gone.id).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![keep]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = ready_store("not-found").await;
        store.create(debate(1, 2, "a", 2)).await.unwrap();

        let err = store.delete_by_id("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(id) if id == "missing"));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_is_repeatable() {
        let store = ready_store("repeatable").await;
        store.create(debate(1, 2, "a", 2)).await.unwrap();
        store.create(debate(2, 3, "b", 3)).await.unwrap();

        assert_eq!(store.find_all().await.unwrap(), store.find_all().await.unwrap());
    }

    #[tokio::test]
    async fn test_add_updates_leaderboard() {
        let store = ready_store("leaderboard").await;
        store.create(debate(1, 2, "a", 1)).await.unwrap();
        assert_eq!(rank_records(&store.find_all().await.unwrap()), vec![(1, 1)]);

        store.create(debate(1, 3, "b", 1)).await.unwrap();
        store.create(debate(2, 3, "c", 3)).await.unwrap();
        assert_eq!(
            rank_records(&store.find_all().await.unwrap()),
            vec![(1, 2), (3, 1)]
        );
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_all_kept() {
        let store = ready_store("concurrent").await;
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(debate(1, 2, &format!("t{}", i), 2)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.find_all().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let store = ready_store("invalid").await;

        let err = store.create(debate(1, 2, "a", 3)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        let err = store.create(debate(1, 2, "   ", 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unready_store_is_unavailable() {
        let store = DebateStore::new(temp_db_path("unready-debates"));
        assert!(matches!(
            store.create(debate(1, 2, "a", 1)).await,
            Err(DbError::Unavailable)
        ));
        assert!(matches!(store.find_all().await, Err(DbError::Unavailable)));
        assert!(matches!(store.delete_by_id("x").await, Err(DbError::Unavailable)));
    }
}
