use crate::app::api::ApiCtx;
use crate::components::login::LoginForm;
use crate::components::navigation::NavBar;
use crate::components::toast::ToastHost;
use crate::core::store::AppStore;
use crate::features::course::view::CoursePage;
use crate::features::dashboard::view::DashboardPage;
use crate::features::draft::view::DraftPage;
use preferences::load_client_config;
pub(crate) use routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) mod api;
mod preferences;
pub(crate) mod routes;
mod session;

#[function_component(LecternApp)]
pub(crate) fn lectern_app() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let api_ctx = use_memo(|_| ApiCtx::new(&load_client_config()), ());
    let current = use_selector(|store: &AppStore| store.session.clone());
    let notifications = use_selector(|store: &AppStore| store.notifications.items().to_vec());

    {
        let dispatch = dispatch.clone();
        let client = api_ctx.client.clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(session::restore(client, dispatch));
                || ()
            },
            (),
        );
    }

    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: u64| {
            dispatch.reduce_mut(|store| {
                store.notifications.remove(id);
            });
        })
    };
    let on_login = {
        let dispatch = dispatch.clone();
        let client = api_ctx.client.clone();
        Callback::from(move |(username, password): (String, String)| {
            yew::platform::spawn_local(session::login(
                client.clone(),
                dispatch.clone(),
                username,
                password,
            ));
        })
    };
    let on_logout = Callback::from(move |()| session::logout(&dispatch));

    let toasts = html! {
        <ToastHost notifications={(*notifications).clone()} on_dismiss={on_dismiss} />
    };

    let Some(user) = current.user.as_ref().filter(|_| current.is_authenticated()) else {
        return html! {
            <>
                <LoginForm on_submit={on_login} />
                {toasts}
            </>
        };
    };
    let display_name = user.display_name();

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <NavBar display_name={display_name} on_logout={on_logout} />
                <Switch<Route> render={switch} />
                {toasts}
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Course { id } => html! { <CoursePage course_id={id} /> },
        Route::CourseEdit { id } => html! { <DraftPage course_id={id} /> },
        Route::NotFound => html! {
            <div class="not-found">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Dashboard}>{"Back to dashboard"}</Link<Route>>
            </div>
        },
    }
}

/// Mount the portal into `#root`, or the document body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<LecternApp>::with_root(root).render();
    } else {
        yew::Renderer::<LecternApp>::new().render();
    }
}
