//! Draft (authoring) course screen.

use crate::app::api::ApiCtx;
use crate::components::content::NoContent;
use crate::components::course_layout::CourseLayout;
use crate::components::form_fields::{DateTimeField, FileField, LabeledField, TextField};
use crate::components::select_instructor::SelectInstructor;
use crate::core::content::now_local;
use crate::core::error::ApiError;
use crate::core::session::UserInfo;
use crate::core::store::AppStore;
use crate::core::structure::CourseView;
use crate::features::course::hooks::use_course;
use crate::features::draft::state::{DraftForm, EditorTarget};
use chrono::Local;
use lectern_api_models::UpdateArgs;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct DraftPageProps {
    pub course_id: i64,
}

#[function_component(DraftPage)]
pub(crate) fn draft_page(props: &DraftPageProps) -> Html {
    let course_id = props.course_id;
    let dispatch = Dispatch::<AppStore>::new();
    let api = use_context::<ApiCtx>();
    let token = use_selector(|store: &AppStore| store.session.token.clone());
    let slice = use_course(course_id, CourseView::Draft);
    let form = use_state(DraftForm::default);
    let instructors = use_state(Vec::<UserInfo>::new);
    let reload = use_state(|| 0_u32);

    let target = slice.as_ref().and_then(|s| {
        let structure = s.navigation.structure()?;
        let node = s.navigation.current()?;
        Some(EditorTarget::for_node(structure, node))
    });

    let notify = {
        let dispatch = dispatch.clone();
        Callback::from(move |err: ApiError| {
            dispatch.reduce_mut(|store| {
                store.notify_error(&err);
            });
        })
    };

    {
        let form = form.clone();
        let instructors = instructors.clone();
        let api = api.clone();
        let notify = notify.clone();
        use_effect_with_deps(
            move |(target, token, _reload)| {
                form.set(DraftForm::default());
                instructors.set(Vec::new());
                if let (Some(target), Some(token), Some(api)) = (*target, (**token).clone(), api) {
                    yew::platform::spawn_local(async move {
                        match target {
                            EditorTarget::Page {
                                milestone_id,
                                page_id,
                            } => {
                                let args = lectern_api_models::QueryArgs::GetPage {
                                    course_id,
                                    milestone_id,
                                    page_id,
                                };
                                match api.client.content(&token, args).await {
                                    Ok(blocks) => form.set(DraftForm::from_blocks(blocks)),
                                    Err(err) => notify.emit(err),
                                }
                            }
                            EditorTarget::Instructors => {
                                match api.client.active_instructors(&token, course_id).await {
                                    Ok(list) => instructors.set(list),
                                    Err(err) => notify.emit(err),
                                }
                            }
                            EditorTarget::Empty => {}
                        }
                    });
                }
                || ()
            },
            (target, token.clone(), *reload),
        );
    }

    let edit = |apply: fn(&mut DraftForm, usize, String), index: usize| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, index, value);
            form.set(next);
        })
    };

    let append_content = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.append_content();
            form.set(next);
        })
    };
    let append_assessment = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.append_assessment(now_local());
            form.set(next);
        })
    };

    let run_update = {
        let api = api.clone();
        let token = token.clone();
        let reload = reload.clone();
        let notify = notify.clone();
        Callback::from(move |args: UpdateArgs| {
            let (Some(api), Some(token)) = (api.clone(), (*token).clone()) else {
                return;
            };
            let reload = reload.clone();
            let notify = notify.clone();
            yew::platform::spawn_local(async move {
                match api.client.update(&token, args).await {
                    Ok(()) => reload.set(*reload + 1),
                    Err(err) => notify.emit(err),
                }
            });
        })
    };

    let on_save = {
        let form = form.clone();
        let run_update = run_update.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(EditorTarget::Page {
                milestone_id,
                page_id,
            }) = target
            {
                run_update.emit(UpdateArgs::UpdatePage {
                    course_id,
                    milestone_id,
                    page_id,
                    course_content: form.to_updates(&Local),
                });
            }
        })
    };
    let on_add_instructor = {
        let run_update = run_update.clone();
        Callback::from(move |user_id: i64| {
            run_update.emit(UpdateArgs::AddInstructor { course_id, user_id });
        })
    };
    let on_remove_instructor = Callback::from(move |user_id: i64| {
        run_update.emit(UpdateArgs::RemoveInstructor { course_id, user_id });
    });

    let editing_page = matches!(target, Some(EditorTarget::Page { .. }));
    let body = if target == Some(EditorTarget::Instructors) {
        html! {
            <div class="instructor-list">
                {for instructors.iter().map(|instructor| html! {
                    <SelectInstructor
                        instructor={instructor.clone()}
                        on_add={on_add_instructor.clone()}
                        on_remove={on_remove_instructor.clone()}
                    />
                })}
            </div>
        }
    } else if form.is_empty() {
        html! { <NoContent /> }
    } else {
        html! {
            <div class="draft-blocks">
                {for form.blocks().iter().enumerate().map(|(index, block)| html! {
                    <div class="draft-block">
                        <LabeledField label="Content Title" notes={Some(AttrValue::from("Title for this block"))}>
                            <TextField
                                value={block.title.clone()}
                                on_change={edit(|f, i, v| f.set_title(i, v), index)}
                            />
                        </LabeledField>
                        <LabeledField label="Content Body" notes={Some(AttrValue::from("Text body for this block"))}>
                            <TextField
                                value={block.body.clone()}
                                on_change={edit(|f, i, v| f.set_body(i, v), index)}
                                multiline=true
                            />
                        </LabeledField>
                        <LabeledField label="Learning Material" notes={Some(AttrValue::from("Downloadable media files for this block"))}>
                            <FileField />
                        </LabeledField>
                        if block.assessment {
                            <div class="draft-assessment">
                                <LabeledField label="Assessment Due Date" notes={Some(AttrValue::from("Due date for this assessment module in AEST"))}>
                                    <DateTimeField
                                        value={block.due_input_value()}
                                        on_change={edit(|f, i, v| f.set_due_input(i, &v), index)}
                                    />
                                </LabeledField>
                            </div>
                        }
                    </div>
                })}
            </div>
        }
    };

    html! {
        <CourseLayout course_id={course_id} view={CourseView::Draft}>
            {body}
            if editing_page {
                <div class="draft-actions">
                    <button class="ghost" onclick={append_content}>{"Add Content Module"}</button>
                    <button class="ghost" onclick={append_assessment}>{"Add Assessment Module"}</button>
                    <button class="solid" onclick={on_save}>{"Save"}</button>
                </div>
            }
        </CourseLayout>
    }
}
