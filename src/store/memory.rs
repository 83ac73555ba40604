//! In-memory repository store.

use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::observability::metrics;
use crate::store::id::generate_id;
use crate::store::repository::{Repository, RepositoryInput};
use crate::store::StoreError;

/// Ordered collection of repository records.
///
/// Records keep insertion order. At most one record exists per id; ids are
/// only ever assigned by [`RepositoryStore::create`]. The store-size gauge is
/// set while the lock is held, so it always matches a real state.
#[derive(Debug, Default)]
pub struct RepositoryStore {
    repositories: Mutex<Vec<Repository>>,
}

impl RepositoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation completes before the guard drops, so a poisoned lock
    // still holds a consistent vector.
    fn lock(&self) -> MutexGuard<'_, Vec<Repository>> {
        self.repositories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all records in store order.
    pub fn list(&self) -> Vec<Repository> {
        self.lock().clone()
    }

    /// Append a new record with a fresh id and zero likes.
    pub fn create(&self, input: RepositoryInput) -> Repository {
        let repository = Repository::new(generate_id(), input);
        let mut repositories = self.lock();
        repositories.push(repository.clone());
        metrics::set_repository_count(repositories.len());
        repository
    }

    pub fn find(&self, id: &Uuid) -> Option<Repository> {
        self.lock().iter().find(|r| r.id == *id).cloned()
    }

    /// Replace title, url and techs of an existing record in place.
    pub fn update(&self, id: &Uuid, input: RepositoryInput) -> Result<Repository, StoreError> {
        let mut repositories = self.lock();
        let repository = repositories
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or(StoreError::NotFound(*id))?;

        repository.apply(input);
        Ok(repository.clone())
    }

    /// Remove a record, returning it.
    pub fn delete(&self, id: &Uuid) -> Result<Repository, StoreError> {
        let mut repositories = self.lock();
        let index = repositories
            .iter()
            .position(|r| r.id == *id)
            .ok_or(StoreError::NotFound(*id))?;

        let removed = repositories.remove(index);
        metrics::set_repository_count(repositories.len());
        Ok(removed)
    }

    /// Increment the like counter by one.
    pub fn like(&self, id: &Uuid) -> Result<Repository, StoreError> {
        let mut repositories = self.lock();
        let repository = repositories
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or(StoreError::NotFound(*id))?;

        repository.likes = repository.likes.saturating_add(1);
        Ok(repository.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use std::sync::Arc;

    fn input(title: &str) -> RepositoryInput {
        RepositoryInput {
            title: title.to_string(),
            url: format!("https://github.com/example/{}", title),
            techs: vec!["rust".to_string()],
        }
    }

    #[test]
    fn test_create_assigns_id_and_zero_likes() {
        let store = RepositoryStore::new();
        let a = store.create(input("a"));
        let b = store.create(input("b"));

        assert_ne!(a.id, b.id);
        assert_eq!(a.likes, 0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(&a.id), Some(a));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = RepositoryStore::new();
        let titles = ["one", "two", "three"];
        for title in titles {
            store.create(input(title));
        }

        let listed: Vec<String> = store.list().into_iter().map(|r| r.title).collect();
        assert_eq!(listed, titles);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let store = RepositoryStore::new();
        let first = store.create(input("first"));
        let second = store.create(input("second"));
        store.like(&second.id).unwrap();

        let updated = store
            .update(
                &second.id,
                RepositoryInput {
                    title: "renamed".into(),
                    url: "http://renamed".into(),
                    techs: vec![],
                },
            )
            .unwrap();

        assert_eq!(updated.id, second.id);
        assert_eq!(updated.likes, 1);
        assert_eq!(updated.title, "renamed");

        let listed = store.list();
        assert_eq!(listed[0], first);
        assert_eq!(listed[1], updated);
    }

    #[test]
    fn test_like_increments_by_one() {
        let store = RepositoryStore::new();
        let repo = store.create(input("liked"));

        for expected in 1..=5 {
            assert_eq!(store.like(&repo.id).unwrap().likes, expected);
        }
    }

    #[test]
    fn test_delete_removes_only_target() {
        let store = RepositoryStore::new();
        let a = store.create(input("a"));
        let b = store.create(input("b"));
        let c = store.create(input("c"));

        assert_eq!(store.delete(&b.id).unwrap(), b);
        assert_eq!(store.list(), vec![a, c]);
        assert_eq!(store.delete(&b.id), Err(StoreError::NotFound(b.id)));
    }

    #[test]
    fn test_unknown_id_leaves_store_untouched() {
        let store = RepositoryStore::new();
        let repo = store.create(input("kept"));
        let unknown = Uuid::new_v4();

        assert_eq!(
            store.update(&unknown, input("x")),
            Err(StoreError::NotFound(unknown))
        );
        assert_eq!(store.like(&unknown), Err(StoreError::NotFound(unknown)));
        assert_eq!(store.delete(&unknown), Err(StoreError::NotFound(unknown)));
        assert_eq!(store.list(), vec![repo]);
    }

    #[test]
    fn test_size_gauge_follows_mutations() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let store = RepositoryStore::new();

        ::metrics::with_local_recorder(&recorder, || {
            let a = store.create(input("a"));
            store.create(input("b"));
            store.delete(&a.id).unwrap();
        });

        let gauge = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .find(|(key, _, _, _)| key.key().name() == metrics::REPOSITORIES)
            .map(|(_, _, _, value)| value);
        assert_eq!(gauge, Some(DebugValue::Gauge(1.0.into())));
    }

    #[test]
    fn test_concurrent_likes_are_not_lost() {
        let store = Arc::new(RepositoryStore::new());
        let repo = store.create(input("busy"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.like(&repo.id).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.find(&repo.id).unwrap().likes, 800);
    }
}
