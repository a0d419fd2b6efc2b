use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct NavBarProps {
    pub display_name: AttrValue,
    pub on_logout: Callback<()>,
}

#[function_component(NavBar)]
pub(crate) fn nav_bar(props: &NavBarProps) -> Html {
    let show_menu = use_state(|| false);

    let open = {
        let show_menu = show_menu.clone();
        Callback::from(move |_: MouseEvent| show_menu.set(true))
    };
    let close = {
        let show_menu = show_menu.clone();
        Callback::from(move |_: MouseEvent| show_menu.set(false))
    };
    let logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <nav class="nav-bar">
            <span class="nav-brand">{"Specialist Investigator Training Portal"}</span>
            <div class="grow" />
            <Link<Route> classes={classes!("nav-item")} to={Route::Dashboard}>{"Dashboard"}</Link<Route>>
            <div class="nav-item profile" onmouseenter={open} onmouseleave={close}>
                <button class="ghost">{"My Profile"}</button>
                if *show_menu {
                    <ul class="profile-menu">
                        <li>{props.display_name.clone()}</li>
                        <li class="clickable" onclick={logout}>{"Logout"}</li>
                    </ul>
                }
            </div>
        </nav>
    }
}
