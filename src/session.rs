//! Browser Session
//!
//! Everything the app keeps in `localStorage`: the signed-in user, the
//! remembered login email, the greeting flag and a store override.

use join_core::{ActiveUser, StoreConfig};
use serde::{Deserialize, Serialize};
use web_sys::Storage;

const ACTIVE_USER_KEY: &str = "activeUser";
const REMEMBER_ME_KEY: &str = "rememberMeData";
const GREETING_SHOWN_KEY: &str = "greetingShown";
const CONFIG_KEY: &str = "joinConfig";

/// Remembered login form data. Only the email is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RememberMe {
    email: String,
}

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

fn write(key: &str, value: &str) {
    match storage() {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                log::warn!("[session] could not write {}", key);
            }
        }
        None => log::warn!("[session] localStorage unavailable"),
    }
}

fn remove(key: &str) {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(key);
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let raw = read(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("[session] ignoring unreadable {}: {}", key, e);
            None
        }
    }
}

fn write_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => write(key, &raw),
        Err(e) => log::error!("[session] could not encode {}: {}", key, e),
    }
}

pub fn load_active_user() -> Option<ActiveUser> {
    read_json(ACTIVE_USER_KEY)
}

pub fn save_active_user(active: &ActiveUser) {
    write_json(ACTIVE_USER_KEY, active);
}

/// Forget the signed-in user and the greeting flag
pub fn clear_active_user() {
    remove(ACTIVE_USER_KEY);
    remove(GREETING_SHOWN_KEY);
}

pub fn remembered_email() -> Option<String> {
    read_json::<RememberMe>(REMEMBER_ME_KEY).map(|r| r.email)
}

/// Keep the email for the next visit, or forget it with `None`
pub fn remember_email(email: Option<&str>) {
    match email {
        Some(email) => write_json(REMEMBER_ME_KEY, &RememberMe { email: email.to_string() }),
        None => remove(REMEMBER_ME_KEY),
    }
}

pub fn greeting_shown() -> bool {
    read(GREETING_SHOWN_KEY).as_deref() == Some("true")
}

pub fn set_greeting_shown() {
    write(GREETING_SHOWN_KEY, "true");
}

/// Store location, overridable with `localStorage["joinConfig"]`
pub fn store_config() -> StoreConfig {
    read(CONFIG_KEY)
        .and_then(|raw| match StoreConfig::from_json(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("[session] ignoring invalid {}: {}", CONFIG_KEY, e);
                None
            }
        })
        .unwrap_or_default()
}
