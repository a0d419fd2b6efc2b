//! Hooks shared by the published and draft course screens.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::routes::IndexQuery;
use crate::core::navigation::parse_index_param;
use crate::core::store::{AppStore, CourseSlice};
use crate::core::structure::CourseView;
use crate::features::course::actions::refresh_structure;
use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Open `course_id` in `view`, keep it loaded and mirror the page index
/// into the URL.
#[hook]
pub(crate) fn use_course(course_id: i64, view: CourseView) -> Option<CourseSlice> {
    let dispatch = Dispatch::<AppStore>::new();
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let location = use_location();
    let token = use_selector(|store: &AppStore| store.session.token.clone());
    let course = use_selector(|store: &AppStore| store.course.clone());

    let initial_index = parse_index_param(
        location
            .and_then(|location| location.query::<IndexQuery>().ok())
            .and_then(|query| query.index)
            .as_deref(),
    );

    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |(course_id, view, _token)| {
                let (course_id, view) = (*course_id, *view);
                dispatch.reduce_mut(|store| {
                    store.open_course(course_id, view, initial_index);
                });
                if let Some(api) = api {
                    yew::platform::spawn_local(refresh_structure(
                        api.client.clone(),
                        dispatch,
                        course_id,
                        view,
                    ));
                }
                || ()
            },
            (course_id, view, (*token).clone()),
        );
    }

    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                let mut update = None;
                dispatch.reduce_mut(|store| {
                    update = store
                        .course_mut(course_id, view)
                        .and_then(|slice| slice.navigation.take_url_update());
                });
                if let (Some(index), Some(navigator)) = (update, navigator) {
                    let route = match view {
                        CourseView::Published => Route::Course { id: course_id },
                        CourseView::Draft => Route::CourseEdit { id: course_id },
                    };
                    let query = IndexQuery {
                        index: Some(index.to_string()),
                    };
                    if let Err(err) = navigator.replace_with_query(&route, &query) {
                        console::error!("url update failed", err.to_string());
                    }
                }
                || ()
            },
            course.clone(),
        );
    }

    (*course)
        .clone()
        .filter(|slice| slice.navigation.is_for(course_id, view))
}
