//! Persistence helpers for the session token and endpoint override.

use crate::core::config::ClientConfig;
use crate::core::session::{EXPIRED_COOKIE, pick_stored_token, session_cookie, token_from_cookie};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::document;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub(crate) const TOKEN_KEY: &str = "lectern.token";
pub(crate) const API_URL_KEY: &str = "lectern.api_url";

pub(crate) fn load_client_config() -> ClientConfig {
    let stored = LocalStorage::get::<String>(API_URL_KEY).ok();
    ClientConfig::resolve(stored.as_deref())
}

/// Token to restore: local storage first, then the `token` cookie.
pub(crate) fn load_token() -> Option<String> {
    let local = LocalStorage::get::<String>(TOKEN_KEY).ok();
    let cookie = read_cookie().as_deref().and_then(token_from_cookie);
    pick_stored_token(local, cookie)
}

pub(crate) fn persist_token(token: &str) {
    set_storage(TOKEN_KEY, token);
    write_cookie(&session_cookie(token));
}

pub(crate) fn clear_token() {
    delete_storage(TOKEN_KEY);
    write_cookie(EXPIRED_COOKIE);
}

fn html_document() -> Option<HtmlDocument> {
    document().dyn_into::<HtmlDocument>().ok()
}

fn read_cookie() -> Option<String> {
    html_document()?.cookie().ok()
}

fn write_cookie(value: &str) {
    let Some(doc) = html_document() else {
        console::error!("cookie unavailable: document is not an HtmlDocument");
        return;
    };
    if let Err(err) = doc.set_cookie(value) {
        console::error!("cookie write failed", err);
    }
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn delete_storage(key: &'static str) {
    LocalStorage::delete(key);
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
