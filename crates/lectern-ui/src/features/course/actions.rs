//! Course outline refresh and authoring actions.
//!
//! # Design
//! - Actions take the client and store dispatch explicitly; nothing reads
//!   ambient globals.
//! - Failures are pushed to the notification queue and leave previously
//!   loaded state in place.

use crate::core::content::ContentBlock;
use crate::core::error::ApiError;
use crate::core::sidebar::SidebarAction;
use crate::core::store::AppStore;
use crate::core::structure::{CourseView, Structure};
use crate::features::course::state::ContentSource;
use crate::services::api::ApiClient;
use std::rc::Rc;
use yewdux::prelude::Dispatch;

/// Fetch course info and outline together and install the rebuilt outline.
///
/// Does nothing without a token and user id.
pub(crate) async fn refresh_structure(
    client: Rc<ApiClient>,
    dispatch: Dispatch<AppStore>,
    course_id: i64,
    view: CourseView,
) {
    let Some((token, user_id)) = dispatch
        .get()
        .session
        .credentials()
        .map(|(token, user_id)| (token.to_string(), user_id))
    else {
        return;
    };
    let fetched = futures_util::try_join!(
        client.course_info(&token, course_id, user_id),
        client.structure_data(&token, course_id),
    );
    match fetched {
        Ok((info, milestones)) => {
            let structure = Structure::build(info.name, &milestones, view);
            dispatch.reduce_mut(|store| {
                if let Some(slice) = store.course_mut(course_id, view) {
                    slice.install_structure(structure);
                }
            });
        }
        Err(err) => dispatch.reduce_mut(|store| {
            store.notify_error(&err);
        }),
    }
}

/// Send an authoring request, then refresh the outline on success.
pub(crate) async fn apply_sidebar_action(
    client: Rc<ApiClient>,
    dispatch: Dispatch<AppStore>,
    course_id: i64,
    view: CourseView,
    action: SidebarAction,
) {
    let Some(token) = dispatch.get().session.token.clone() else {
        return;
    };
    match client.update(&token, action.into_update(course_id)).await {
        Ok(()) => refresh_structure(client, dispatch, course_id, view).await,
        Err(err) => dispatch.reduce_mut(|store| {
            store.notify_error(&err);
        }),
    }
}

/// Load the blocks shown for a published page.
pub(crate) async fn load_content(
    client: &ApiClient,
    token: &str,
    course_id: i64,
    source: ContentSource,
) -> Result<Vec<ContentBlock>, ApiError> {
    match source.query(course_id) {
        Some(args) => client.content(token, args).await,
        None => Ok(Vec::new()),
    }
}
