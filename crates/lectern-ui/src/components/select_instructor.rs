use crate::core::session::UserInfo;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SelectInstructorProps {
    pub instructor: UserInfo,
    pub on_add: Callback<i64>,
    pub on_remove: Callback<i64>,
}

#[function_component(SelectInstructor)]
pub(crate) fn select_instructor(props: &SelectInstructorProps) -> Html {
    let user_id = props.instructor.user_id;
    let teaching = props.instructor.is_teaching.unwrap_or(false);
    let onclick = if teaching {
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(user_id))
    } else {
        let on_add = props.on_add.clone();
        Callback::from(move |_: MouseEvent| on_add.emit(user_id))
    };

    html! {
        <div class="select-instructor">
            <p>{format!("{} - {user_id}", props.instructor.display_name())}</p>
            <div class="grow" />
            if teaching {
                <button class="danger" {onclick}>{"Remove"}</button>
            } else {
                <button class="success" {onclick}>{"Add"}</button>
            }
        </div>
    }
}
