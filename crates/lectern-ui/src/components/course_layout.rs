//! Course shell: collapsible outline sidebar plus the page area.

use crate::app::api::ApiCtx;
use crate::core::sidebar::{ExpansionSet, RenameState, SelectOutcome, SidebarAction, affordances};
use crate::core::store::AppStore;
use crate::core::structure::{CourseView, NodeId, NodeKind, PageRef, Structure};
use crate::features::course::actions::apply_sidebar_action;
use lectern_api_models::MilestoneType;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct CourseLayoutProps {
    pub course_id: i64,
    pub view: CourseView,
    #[prop_or_default]
    pub children: Children,
}

/// Everything a row needs to render itself and its children.
struct RowCtx<'a> {
    structure: &'a Structure,
    expansion: &'a ExpansionSet,
    rename: &'a RenameState,
    current: Option<PageRef>,
    view: CourseView,
    on_select: Callback<NodeId>,
    on_rename_begin: Callback<NodeId>,
    on_rename_input: Callback<String>,
    on_rename_commit: Callback<()>,
    on_action: Callback<SidebarAction>,
}

#[function_component(CourseLayout)]
pub(crate) fn course_layout(props: &CourseLayoutProps) -> Html {
    let course_id = props.course_id;
    let view = props.view;
    let dispatch = Dispatch::<AppStore>::new();
    let api = use_context::<ApiCtx>();
    let course = use_selector(|store: &AppStore| store.course.clone());

    let on_action = {
        let dispatch = dispatch.clone();
        Callback::from(move |action: SidebarAction| {
            if let Some(api) = api.clone() {
                yew::platform::spawn_local(apply_sidebar_action(
                    api.client,
                    dispatch.clone(),
                    course_id,
                    view,
                    action,
                ));
            }
        })
    };
    let on_select = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: NodeId| {
            dispatch.reduce_mut(|store| {
                let Some(slice) = store.course_mut(course_id, view) else {
                    return;
                };
                let outcome = match slice.navigation.structure() {
                    Some(structure) => slice.expansion.select(structure, id),
                    None => None,
                };
                if let Some(SelectOutcome::OpenPage(page)) = outcome {
                    slice.open_page(page);
                }
            });
        })
    };
    let on_rename_begin = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: NodeId| {
            dispatch.reduce_mut(|store| {
                if let Some(slice) = store.course_mut(course_id, view)
                    && let Some(structure) = slice.navigation.structure()
                {
                    slice.rename.begin(structure, id);
                }
            });
        })
    };
    let on_rename_input = {
        let dispatch = dispatch.clone();
        Callback::from(move |text: String| {
            dispatch.reduce_mut(|store| {
                if let Some(slice) = store.course_mut(course_id, view) {
                    slice.rename.input(text);
                }
            });
        })
    };
    let on_rename_commit = {
        let on_action = on_action.clone();
        Callback::from(move |()| {
            let mut request = None;
            dispatch.reduce_mut(|store| {
                request = store
                    .course_mut(course_id, view)
                    .and_then(|slice| slice.rename.commit());
            });
            if let Some(request) = request {
                on_action.emit(SidebarAction::Rename(request));
            }
        })
    };

    let Some(slice) = (*course)
        .as_ref()
        .filter(|slice| slice.navigation.is_for(course_id, view))
    else {
        return html! { <div class="course-layout loading">{"Loading course..."}</div> };
    };
    let Some(structure) = slice.navigation.structure() else {
        return html! { <div class="course-layout loading">{"Loading course..."}</div> };
    };

    let ctx = RowCtx {
        structure,
        expansion: &slice.expansion,
        rename: &slice.rename,
        current: slice.navigation.page(),
        view,
        on_select,
        on_rename_begin,
        on_rename_input,
        on_rename_commit,
        on_action: on_action.clone(),
    };

    let add_milestone = |kind: MilestoneType| {
        let on_action = on_action.clone();
        Callback::from(move |_: MouseEvent| on_action.emit(SidebarAction::CreateMilestone(kind)))
    };

    html! {
        <div class="course-layout">
            <aside class="course-sidebar">
                <h2 class="course-title">{structure.title().to_string()}</h2>
                {for structure.sections().iter().map(|section| html! {
                    <ul class="sidebar-section">
                        {for section.iter().map(|id| render_row(&ctx, *id))}
                    </ul>
                })}
                if view.is_draft() {
                    <div class="sidebar-authoring">
                        <button class="ghost" onclick={add_milestone(MilestoneType::Precourse)}>
                            {"Add Pre-Course Milestone"}
                        </button>
                        <button class="ghost" onclick={add_milestone(MilestoneType::Incourse)}>
                            {"Add In-Course Milestone"}
                        </button>
                    </div>
                }
            </aside>
            <main class="course-main">
                {for props.children.iter()}
            </main>
        </div>
    }
}

fn render_row(ctx: &RowCtx<'_>, id: NodeId) -> Html {
    let Some(node) = ctx.structure.node(id) else {
        return Html::default();
    };
    let allowed = affordances(ctx.view, node.kind);
    let expanded = ctx.expansion.is_expanded(node.key);
    let selected = ctx.current.is_some_and(|page| page.node() == id);
    let editing = ctx.rename.is_editing(node.key);
    let milestone = node.kind.is_milestone();

    let onclick = {
        let on_select = ctx.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id))
    };

    let label = if editing {
        let oninput = {
            let on_input = ctx.on_rename_input.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlInputElement = event.target_unchecked_into();
                on_input.emit(input.value());
            })
        };
        let onkeydown = {
            let on_commit = ctx.on_rename_commit.clone();
            Callback::from(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    on_commit.emit(());
                }
            })
        };
        let onblur = {
            let on_commit = ctx.on_rename_commit.clone();
            Callback::from(move |_: FocusEvent| on_commit.emit(()))
        };
        html! {
            <input class="rename-input" value={ctx.rename.pending().to_string()} {oninput} {onkeydown} {onblur} />
        }
    } else {
        html! { <span class="row-title" {onclick}>{node.title.clone()}</span> }
    };

    let rename_button = (allowed.rename && !editing).then(|| {
        let on_begin = ctx.on_rename_begin.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_begin.emit(id);
        });
        html! { <button class="ghost row-action" {onclick}>{"Rename"}</button> }
    });
    let delete_button = allowed
        .delete
        .then(|| SidebarAction::delete_for(ctx.structure, id))
        .flatten()
        .map(|action| {
            let on_action = ctx.on_action.clone();
            let onclick = Callback::from(move |event: MouseEvent| {
                event.stop_propagation();
                on_action.emit(action.clone());
            });
            html! { <button class="ghost row-action danger" {onclick}>{"Delete"}</button> }
        });

    let children = (milestone && expanded).then(|| {
        let add_page = allowed.add_page.then(|| {
            let on_action = ctx.on_action.clone();
            let milestone_id = node.id;
            let onclick = Callback::from(move |_: MouseEvent| {
                on_action.emit(SidebarAction::CreatePage { milestone_id });
            });
            html! { <li class="sidebar-row add-page"><button class="ghost" {onclick}>{"Add New Page"}</button></li> }
        });
        html! {
            <ul class="sidebar-children">
                {for node.children.iter().map(|child| render_row(ctx, *child))}
                {add_page.unwrap_or_default()}
            </ul>
        }
    });

    let row_class = classes!(
        "sidebar-row",
        kind_class(node.kind),
        selected.then_some("selected"),
        (milestone && expanded).then_some("expanded"),
    );

    html! {
        <li key={node.key.value().to_string()} class={row_class}>
            <div class="row-line">
                {label}
                {rename_button.unwrap_or_default()}
                {delete_button.unwrap_or_default()}
            </div>
            {children.unwrap_or_default()}
        </li>
    }
}

const fn kind_class(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::IncourseMilestone | NodeKind::PrecourseMilestone => "milestone",
        NodeKind::Page => "page",
        _ => "virtual",
    }
}
