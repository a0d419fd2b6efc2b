//! Course preview dashboard.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::store::AppStore;
use crate::features::dashboard::state::{CourseCard, Role, dashboard_query};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let cards = use_state(Vec::<CourseCard>::new);
    let role = Role::of(&session);

    {
        let cards = cards.clone();
        use_effect_with_deps(
            move |session| {
                let query = dashboard_query(session);
                let token = session.token.clone();
                if let (Some(query), Some(token), Some(api)) = (query, token, api) {
                    yew::platform::spawn_local(async move {
                        match api.client.dashboard(&token, query).await {
                            Ok(courses) => {
                                cards.set(courses.into_iter().map(CourseCard::from).collect());
                            }
                            Err(err) => dispatch.reduce_mut(|store| {
                                store.notify_error(&err);
                            }),
                        }
                    });
                }
                || ()
            },
            session.clone(),
        );
    }

    html! {
        <div class="dashboard">
            <div class="dashboard-header">
                <h1>{"Dashboard"}</h1>
                <span class={classes!("role-badge", role.class())}>{role.label()}</span>
            </div>
            <div class="course-previews">
                {for cards.iter().map(|card| render_card(card, role, navigator.clone()))}
            </div>
        </div>
    }
}

fn render_card(card: &CourseCard, role: Role, navigator: Option<Navigator>) -> Html {
    let id = card.course_id;
    let open = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Course { id });
            }
        })
    };
    let edit = Callback::from(move |event: MouseEvent| {
        event.stop_propagation();
        if let Some(navigator) = &navigator {
            navigator.push(&Route::CourseEdit { id });
        }
    });

    html! {
        <div class="course-preview" onclick={open}>
            <div class="preview-heading">
                <h2>{card.name.clone()}</h2>
                <div class="grow" />
                if role == Role::Instructor {
                    <button class="ghost" onclick={edit}>{"Edit"}</button>
                }
            </div>
            <div class="preview-body">
                {for card.sections.iter().map(|(label, text)| html! {
                    <section class="preview-section">
                        <h3>{*label}</h3>
                        <p>{text.clone()}</p>
                    </section>
                })}
            </div>
            <div class="preview-facts">
                <div><span class="label">{"Start"}</span>{card.start.clone()}</div>
                <div><span class="label">{"Finish"}</span>{card.finish.clone()}</div>
                <div><span class="label">{"Location"}</span>{card.location.clone()}</div>
                <div><span class="label">{"Progress"}</span>{card.progress.clone()}</div>
                <div><span class="label">{"Milestones"}</span>{card.milestones.clone()}</div>
            </div>
        </div>
    }
}
