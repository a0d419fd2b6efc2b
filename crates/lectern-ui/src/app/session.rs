//! Login, restore and logout flows.
//!
//! # Design
//! - Each flow is a plain async function over the client and the store
//!   dispatch, spawned by the component that triggers it.
//! - Restore failures are logged only; login failures are surfaced.

use crate::app::preferences::{clear_token, load_token, persist_token};
use crate::core::error::ApiError;
use crate::core::store::AppStore;
use crate::services::api::ApiClient;
use gloo::console;
use std::rc::Rc;
use yewdux::prelude::Dispatch;

/// Exchange credentials for a token, validate it and install the session.
pub(crate) async fn login(
    client: Rc<ApiClient>,
    dispatch: Dispatch<AppStore>,
    username: String,
    password: String,
) {
    let result: Result<_, ApiError> = async {
        let token = client.login(&username, &password).await?;
        let user = client.user_info(&token).await?;
        Ok((token, user))
    }
    .await;
    match result {
        Ok((token, user)) => {
            persist_token(&token);
            dispatch.reduce_mut(|store| {
                store.session.install(token, user);
            });
        }
        Err(err) => dispatch.reduce_mut(|store| {
            store.notify_error(&err);
        }),
    }
}

/// Re-validate a persisted token on boot.
pub(crate) async fn restore(client: Rc<ApiClient>, dispatch: Dispatch<AppStore>) {
    let Some(token) = load_token() else {
        return;
    };
    match client.user_info(&token).await {
        Ok(user) => {
            persist_token(&token);
            dispatch.reduce_mut(|store| {
                store.session.install(token, user);
            });
        }
        Err(err) => console::error!("session restore failed", err.to_string()),
    }
}

/// Drop the session and every persisted copy of the token.
pub(crate) fn logout(dispatch: &Dispatch<AppStore>) {
    clear_token();
    dispatch.reduce_mut(|store| {
        store.sign_out();
    });
}
