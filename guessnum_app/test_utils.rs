#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::{HashMap, VecDeque},
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };
    use uuid::Uuid;

    use guessnum_types::{
        errors::{ApplicationError, DbError},
        player::Player,
    };

    use crate::{
        mutation::CancelHandle,
        repository::PlayerRepository,
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    /// A write committed by someone else right after one of our reads.
    #[derive(Debug, Clone)]
    pub enum Interference {
        /// Bumps the revision without changing any field.
        Touch,
        Rename(String),
        SetBestScore(u32),
        Delete,
    }

    /// In-memory versioned store.
    #[derive(Default, Clone)]
    pub struct MockPlayerRepository {
        players: Arc<Mutex<HashMap<Uuid, Player>>>,
        interference: Arc<Mutex<VecDeque<Option<Interference>>>>,
        cancel_on_fetch: Arc<Mutex<Option<CancelHandle>>>,
        fetches: Arc<AtomicUsize>,
        persists: Arc<AtomicUsize>,
    }

    impl MockPlayerRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores `player` as-is, revision included.
        pub fn insert(&self, player: Player) {
            self.players.lock().unwrap().insert(player.id, player);
        }

        pub fn stored(&self, player_id: Uuid) -> Option<Player> {
            self.players.lock().unwrap().get(&player_id).cloned()
        }

        /// Queues one entry per upcoming `get_by_id`; `None` lets that read pass.
        pub fn interfere_after_fetch(&self, script: Vec<Option<Interference>>) {
            self.interference.lock().unwrap().extend(script);
        }

        /// Fires `handle` from inside the next `get_by_id`.
        pub fn cancel_on_fetch(&self, handle: CancelHandle) {
            *self.cancel_on_fetch.lock().unwrap() = Some(handle);
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        pub fn persist_count(&self) -> usize {
            self.persists.load(Ordering::SeqCst)
        }

        fn interfere(&self, players: &mut HashMap<Uuid, Player>, player_id: Uuid) {
            let Some(Some(interference)) = self.interference.lock().unwrap().pop_front() else {
                return;
            };

            if let Interference::Delete = interference {
                players.remove(&player_id);
                return;
            }

            if let Some(player) = players.get_mut(&player_id) {
                match interference {
                    Interference::Rename(username) => player.username = username,
                    Interference::SetBestScore(score) => player.best_score = Some(score),
                    Interference::Touch | Interference::Delete => {}
                }
                player.revision += 1;
            }
        }
    }

    #[async_trait]
    impl PlayerRepository for MockPlayerRepository {
        async fn create(&self, player: &Player) -> Result<(), ApplicationError> {
            let mut players = self.players.lock().unwrap();
            if players.values().any(|p| p.username == player.username) {
                return Err(DbError::UsernameTaken(player.username.clone()).into());
            }
            players.insert(
                player.id,
                Player {
                    revision: 0,
                    ..player.clone()
                },
            );
            Ok(())
        }

        async fn get_by_id(&self, player_id: Uuid) -> Result<Player, ApplicationError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let mut players = self.players.lock().unwrap();
            let player = players
                .get(&player_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::PlayerNotFound(player_id)))?;

            self.interfere(&mut players, player_id);
            if let Some(handle) = self.cancel_on_fetch.lock().unwrap().take() {
                handle.cancel();
            }
            Ok(player)
        }

        async fn get_by_username(&self, username: &str) -> Result<Player, ApplicationError> {
            self.players
                .lock()
                .unwrap()
                .values()
                .find(|p| p.username == username)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::Db(DbError::PlayerByUsernameNotFound(username.to_string()))
                })
        }

        async fn list_all(&self) -> Result<Vec<Player>, ApplicationError> {
            let mut players: Vec<Player> = self.players.lock().unwrap().values().cloned().collect();
            players.sort_by(|a, b| a.username.cmp(&b.username));
            Ok(players)
        }

        async fn list_best(&self) -> Result<Vec<Player>, ApplicationError> {
            let players = self.list_all().await?;
            let Some(best) = players.iter().filter_map(|p| p.best_score).min() else {
                return Ok(vec![]);
            };
            Ok(players
                .into_iter()
                .filter(|p| p.best_score == Some(best))
                .collect())
        }

        async fn persist(&self, player: &Player) -> Result<Player, ApplicationError> {
            self.persists.fetch_add(1, Ordering::SeqCst);
            let mut players = self.players.lock().unwrap();

            let conflict = DbError::RevisionConflict {
                player_id: player.id,
                revision: player.revision,
            };
            match players.get(&player.id) {
                Some(stored) if stored.revision == player.revision => {}
                _ => return Err(conflict.into()),
            }

            if players
                .values()
                .any(|p| p.id != player.id && p.username == player.username)
            {
                return Err(DbError::UsernameTaken(player.username.clone()).into());
            }

            let saved = Player {
                revision: player.revision + 1,
                ..player.clone()
            };
            players.insert(saved.id, saved.clone());
            Ok(saved)
        }

        async fn delete(&self, player_id: Uuid) -> Result<(), ApplicationError> {
            self.players.lock().unwrap().remove(&player_id);
            Ok(())
        }
    }

    /// Writes land immediately; commit and rollback only get counted.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWork {
        players: MockPlayerRepository,
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
        rollback_error: Option<String>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_players(players: MockPlayerRepository) -> Self {
            Self {
                players,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
            Arc::new(self.players.clone())
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            match self.rollback_error {
                Some(reason) => Err(ApplicationError::Infrastructure(reason)),
                None => Ok(()),
            }
        }
    }

    /// Hands out units of work sharing one in-memory store.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWorkProvider {
        players: MockPlayerRepository,
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
        rollback_error: Option<String>,
    }

    impl MockUnitOfWorkProvider {
        pub fn new(players: MockPlayerRepository) -> Self {
            Self {
                players,
                ..Default::default()
            }
        }

        /// Every rollback still counts, then fails with `Infrastructure(reason)`.
        pub fn with_failing_rollback(mut self, reason: &str) -> Self {
            self.rollback_error = Some(reason.to_string());
            self
        }

        pub fn players(&self) -> MockPlayerRepository {
            self.players.clone()
        }

        pub fn commit_count(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        pub fn rollback_count(&self) -> usize {
            self.rollbacks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            Ok(Box::new(MockUnitOfWork {
                players: self.players.clone(),
                commits: self.commits.clone(),
                rollbacks: self.rollbacks.clone(),
                rollback_error: self.rollback_error.clone(),
            }))
        }
    }
}
