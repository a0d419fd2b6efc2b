//! Published course screen.

use crate::app::api::ApiCtx;
use crate::components::content::ContentList;
use crate::components::course_layout::CourseLayout;
use crate::core::content::ContentBlock;
use crate::core::store::AppStore;
use crate::core::structure::{CourseView, PageRef};
use crate::features::course::actions::load_content;
use crate::features::course::hooks::use_course;
use crate::features::course::state::ContentSource;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct CoursePageProps {
    pub course_id: i64,
}

#[function_component(CoursePage)]
pub(crate) fn course_page(props: &CoursePageProps) -> Html {
    let course_id = props.course_id;
    let dispatch = Dispatch::<AppStore>::new();
    let api = use_context::<ApiCtx>();
    let token = use_selector(|store: &AppStore| store.session.token.clone());
    let slice = use_course(course_id, CourseView::Published);
    let contents = use_state(Vec::<ContentBlock>::new);

    let current_page: Option<PageRef> = slice.as_ref().and_then(|s| s.navigation.page());
    let source = slice.as_ref().and_then(|s| {
        let structure = s.navigation.structure()?;
        let node = s.navigation.current()?;
        Some(ContentSource::for_node(structure, node))
    });

    {
        let contents = contents.clone();
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |(page, token)| {
                contents.set(Vec::new());
                if let (Some(_), Some(source), Some(token), Some(api)) =
                    (page, source, (**token).clone(), api)
                {
                    yew::platform::spawn_local(async move {
                        match load_content(&api.client, &token, course_id, source).await {
                            Ok(blocks) => contents.set(blocks),
                            Err(err) => dispatch.reduce_mut(|store| {
                                store.notify_error(&err);
                            }),
                        }
                    });
                }
                || ()
            },
            (current_page, token),
        );
    }

    let on_previous = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.reduce_mut(|store| {
                if let Some(slice) = store.course_mut(course_id, CourseView::Published) {
                    slice.previous();
                }
            });
        })
    };
    let on_next = Callback::from(move |_: MouseEvent| {
        dispatch.reduce_mut(|store| {
            if let Some(slice) = store.course_mut(course_id, CourseView::Published) {
                slice.next();
            }
        });
    });

    html! {
        <CourseLayout course_id={course_id} view={CourseView::Published}>
            <div class="course-content">
                <ContentList blocks={(*contents).clone()} />
            </div>
            <div class="course-pager">
                <button class="ghost" onclick={on_previous}>{"Previous"}</button>
                <div class="grow" />
                <button class="ghost" onclick={on_next}>{"Next"}</button>
            </div>
        </CourseLayout>
    }
}
