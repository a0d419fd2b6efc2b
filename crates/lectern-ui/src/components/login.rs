use crate::components::form_fields::TextField;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LoginFormProps {
    /// Emits `(username, password)`.
    pub on_submit: Callback<(String, String)>,
}

#[function_component(LoginForm)]
pub(crate) fn login_form(props: &LoginFormProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(((*username).clone(), (*password).clone()));
        })
    };
    let set_username = {
        let username = username.clone();
        Callback::from(move |value: String| username.set(value))
    };
    let set_password = {
        let password = password.clone();
        Callback::from(move |value: String| password.set(value))
    };

    html! {
        <div class="login-screen">
            <h1 class="login-title">{"Specialist Investigator Training Portal"}</h1>
            <form class="login-form" {onsubmit}>
                <TextField value={(*username).clone()} on_change={set_username} placeholder={"Username"} />
                <TextField value={(*password).clone()} on_change={set_password} placeholder={"Password"} password=true />
                <button type="submit" class="solid">{"Login"}</button>
            </form>
            <div class="login-links">
                <a>{"Reset Password"}</a>
                <a>{"View Courses"}</a>
            </div>
        </div>
    }
}
