use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use rail_core::UserRepository;
use rail_shared::{normalize_email, Masked, PassengerDetails, User};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
struct UserIndex {
    by_id: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

impl UserIndex {
    fn lookup(&self, email: &str) -> Option<&User> {
        self.by_email.get(email).and_then(|id| self.by_id.get(id))
    }
}

/// In-memory passenger registry keyed by normalised email
#[derive(Default)]
pub struct UserRegistry {
    index: RwLock<UserIndex>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for UserRegistry {
    fn find_or_create(&self, details: &PassengerDetails) -> User {
        let email = normalize_email(&details.email);

        // Only one upgradable reader exists at a time, so the miss-then-insert below
        // cannot interleave with another creation.
        let index = self.index.upgradable_read();
        if let Some(user) = index.lookup(&email) {
            return user.clone();
        }

        let mut index = RwLockUpgradableReadGuard::upgrade(index);
        let user = User::new(
            details.first_name.trim().to_string(),
            details.last_name.trim().to_string(),
            email.clone(),
        );
        index.by_email.insert(email, user.id);
        index.by_id.insert(user.id, user.clone());

        info!("Created user {} for {}", user.id, Masked(user.email.as_str()));
        user
    }

    fn find_by_id(&self, user_id: Uuid) -> Option<User> {
        self.index.read().by_id.get(&user_id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        self.index.read().lookup(&normalize_email(email)).cloned()
    }

    fn count(&self) -> usize {
        self.index.read().by_id.len()
    }
}
