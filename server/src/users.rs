//! Flat-file user accounts and watchlists.
//!
//! Accounts live in `users.json` under the data directory. Passwords are
//! stored as SHA-256 over a per-user random salt plus the password; the
//! file is rewritten through temp-then-rename like the catalog files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AppError;

pub const USERS_FILE: &str = "users.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_salt: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub watchlist: Vec<String>,
}

#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    users: Mutex<BTreeMap<String, UserRecord>>,
}

impl UserStore {
    /// Load the user file, or start empty when it does not exist yet.
    pub fn load(data_dir: &Path) -> Result<Self, AppError> {
        let path = data_dir.join(USERS_FILE);

        let users = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(internal)?;
            let records: Vec<UserRecord> = serde_json::from_str(&contents).map_err(internal)?;
            records
                .into_iter()
                .map(|u| (u.username.clone(), u))
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    /// Create an account. The username must be free.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::MalformedPayload);
        }

        let mut users = self.users.lock().unwrap();
        if users.contains_key(username) {
            return Err(AppError::UsernameTaken);
        }

        let salt = Uuid::new_v4().to_string();
        users.insert(
            username.to_string(),
            UserRecord {
                username: username.to_string(),
                password_hash: hash_password(&salt, password),
                password_salt: salt,
                created_at: Utc::now(),
                watchlist: Vec::new(),
            },
        );

        save(&self.path, &users)
    }

    /// Check a username/password pair.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let users = self.users.lock().unwrap();

        match users.get(username) {
            Some(user) => user.password_hash == hash_password(&user.password_salt, password),
            None => false,
        }
    }

    pub fn watchlist(&self, username: &str) -> Vec<String> {
        self.users
            .lock()
            .unwrap()
            .get(username)
            .map(|u| u.watchlist.clone())
            .unwrap_or_default()
    }

    /// Add a film to a user's watchlist. Adding twice is a no-op.
    pub fn add_to_watchlist(&self, username: &str, film_id: &str) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(username).ok_or(AppError::Unauthorized)?;

        if user.watchlist.iter().any(|id| id == film_id) {
            return Ok(());
        }
        user.watchlist.push(film_id.to_string());

        save(&self.path, &users)
    }

    /// Remove a film from a user's watchlist. Removing an absent id is a no-op.
    pub fn remove_from_watchlist(&self, username: &str, film_id: &str) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(username).ok_or(AppError::Unauthorized)?;

        let before = user.watchlist.len();
        user.watchlist.retain(|id| id != film_id);
        if user.watchlist.len() == before {
            return Ok(());
        }

        save(&self.path, &users)
    }
}

fn save(path: &Path, users: &BTreeMap<String, UserRecord>) -> Result<(), AppError> {
    let records: Vec<&UserRecord> = users.values().collect();
    let contents = serde_json::to_vec_pretty(&records).map_err(internal)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(internal)?;
    fs::rename(&tmp, path).map_err(internal)?;

    Ok(())
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());

    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn internal<E: std::error::Error + Send + Sync + 'static>(e: E) -> AppError {
    AppError::Internal(Box::new(e))
}
