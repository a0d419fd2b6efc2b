//! Small controlled form inputs.

use crate::components::content::file_caption;
use crate::core::content::SubmittedFile;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LabeledFieldProps {
    pub label: AttrValue,
    #[prop_or_default]
    pub notes: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(LabeledField)]
pub(crate) fn labeled_field(props: &LabeledFieldProps) -> Html {
    html! {
        <label class="labeled-field">
            <span class="field-label">{props.label.clone()}</span>
            {if let Some(notes) = &props.notes {
                html! { <span class="field-notes">{notes.clone()}</span> }
            } else { html! {} }}
            {for props.children.iter()}
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct TextFieldProps {
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or(false)]
    pub password: bool,
    #[prop_or(false)]
    pub multiline: bool,
}

#[function_component(TextField)]
pub(crate) fn text_field(props: &TextFieldProps) -> Html {
    if props.multiline {
        let oninput = {
            let on_change = props.on_change.clone();
            Callback::from(move |e: InputEvent| {
                if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                    on_change.emit(area.value());
                }
            })
        };
        return html! {
            <textarea class="text-field" value={props.value.clone()} {oninput} />
        };
    }
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_change.emit(input.value());
            }
        })
    };
    html! {
        <input
            class="text-field"
            type={if props.password { "password" } else { "text" }}
            value={props.value.clone()}
            placeholder={props.placeholder.clone()}
            {oninput}
        />
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DateTimeFieldProps {
    /// `YYYY-MM-DDTHH:MM` value.
    pub value: AttrValue,
    pub on_change: Callback<String>,
}

#[function_component(DateTimeField)]
pub(crate) fn date_time_field(props: &DateTimeFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_change.emit(input.value());
            }
        })
    };
    html! {
        <input class="date-field" type="datetime-local" value={props.value.clone()} {onchange} />
    }
}

/// File picker listing the chosen files with their sizes.
#[derive(Properties, PartialEq)]
pub(crate) struct FileFieldProps {
    /// Form field name; unnamed inputs are not submitted.
    #[prop_or_default]
    pub name: Option<AttrValue>,
}

#[function_component(FileField)]
pub(crate) fn file_field(props: &FileFieldProps) -> Html {
    let files = use_state(Vec::<SubmittedFile>::new);
    let onchange = {
        let files = files.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(list) = input.files() else {
                return;
            };
            let picked = (0..list.length())
                .filter_map(|i| list.get(i))
                .map(|file| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let size = file.size() as u64;
                    SubmittedFile::new(file.name(), size)
                })
                .collect();
            files.set(picked);
        })
    };
    html! {
        <div class="file-field">
            <input type="file" name={props.name.clone()} multiple=true {onchange} />
            {for files.iter().map(file_caption)}
        </div>
    }
}
