//! Fixed in-memory user dataset behind the demo routes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub is_active: bool,
}

impl User {
    fn new(id: i32, name: &str, is_active: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_active,
        }
    }
}

/// The dataset the cached routes query. Lookups optionally sleep to
/// stand in for a slow downstream, which makes the cache win visible
/// from curl. The lookup counter exists so tests can assert how many
/// times the "expensive" path actually ran.
pub struct UserData {
    users: HashMap<Uuid, User>,
    delay: Option<Duration>,
    lookups: AtomicUsize,
}

impl UserData {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert(
            Uuid::parse_str("5acdbd58-14da-4048-8f1f-83359eca16bd").unwrap(),
            User::new(1, "Jerson", true),
        );
        users.insert(
            Uuid::parse_str("d9cd3c26-e5d6-45b8-b3df-fe80cc67ae17").unwrap(),
            User::new(2, "Brito", true),
        );
        users.insert(
            Uuid::parse_str("e9889f44-5791-4061-aab1-fd1bd8d41cb1").unwrap(),
            User::new(3, "Tonho", true),
        );
        users.insert(
            Uuid::parse_str("c9cae7ec-5761-4873-a855-6b1edba0482c").unwrap(),
            User::new(4, "Fulano", false),
        );
        users.insert(
            Uuid::parse_str("e0affce2-c4d4-45df-aacc-4dd339bccb1e").unwrap(),
            User::new(5, "Cicrano", false),
        );
        Self {
            users,
            delay: None,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    async fn touch(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    pub async fn get_all(&self) -> Vec<User> {
        self.touch().await;
        self.sorted(|_| true)
    }

    pub async fn get_actives(&self) -> Vec<User> {
        self.touch().await;
        self.sorted(|user| user.is_active)
    }

    pub async fn get_inactives(&self) -> Vec<User> {
        self.touch().await;
        self.sorted(|user| !user.is_active)
    }

    pub async fn get_by_id(&self, uuid: &Uuid) -> Option<User> {
        self.touch().await;
        self.users.get(uuid).cloned()
    }

    fn sorted(&self, keep: impl Fn(&User) -> bool) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().filter(|u| keep(u)).cloned().collect();
        users.sort_by_key(|user| user.id);
        users
    }
}

impl Default for UserData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dataset_holds_the_five_seed_users() {
        let data = UserData::new();
        assert_eq!(data.get_all().await.len(), 5);
        assert_eq!(data.get_actives().await.len(), 3);
        assert_eq!(data.get_inactives().await.len(), 2);
    }

    #[tokio::test]
    async fn lookup_by_known_uuid() {
        let data = UserData::new();
        let uuid = Uuid::parse_str("5acdbd58-14da-4048-8f1f-83359eca16bd").unwrap();

        let user = data.get_by_id(&uuid).await.unwrap();
        assert_eq!(user, User::new(1, "Jerson", true));
        assert_eq!(data.lookup_count(), 1);
    }

    #[tokio::test]
    async fn unknown_uuid_is_none() {
        let data = UserData::new();
        assert!(data.get_by_id(&Uuid::new_v4()).await.is_none());
    }
}
