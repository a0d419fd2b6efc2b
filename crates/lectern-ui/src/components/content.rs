//! Read-only renderers for page content.

use crate::components::form_fields::FileField;
use crate::core::content::{
    Assessment, ContentBlock, NO_CONTENT_TEXT, ResultBlock, SubmittedFile, body_lines,
    format_due_date, format_timestamp,
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ContentListProps {
    pub blocks: Vec<ContentBlock>,
    /// Per-milestone results. The Results page has no backing query yet, so
    /// course pages leave this empty and the page shows the no-content text.
    #[prop_or_default]
    pub results: Vec<ResultBlock>,
}

#[function_component(ContentList)]
pub(crate) fn content_list(props: &ContentListProps) -> Html {
    if props.blocks.is_empty() && props.results.is_empty() {
        return html! { <NoContent /> };
    }
    html! {
        <div class="content-list">
            {for props.blocks.iter().map(render_block)}
            {for props.results.iter().map(render_result)}
        </div>
    }
}

#[function_component(NoContent)]
pub(crate) fn no_content() -> Html {
    html! { <div class="content-empty">{NO_CONTENT_TEXT}</div> }
}

/// Body text with newlines rendered as line breaks; no markup is injected.
pub(crate) fn render_body(body: &str) -> Html {
    let lines = body_lines(body);
    let last = lines.len().saturating_sub(1);
    html! {
        <p class="content-body">
            {for lines.into_iter().enumerate().map(|(i, line)| html! {
                <>
                    {line.to_string()}
                    if i < last { <br/> }
                </>
            })}
        </p>
    }
}

fn render_block(block: &ContentBlock) -> Html {
    html! {
        <div class="content-block">
            <div class="content-main">
                if let Some(title) = &block.title {
                    <p class="content-title">{title.clone()}</p>
                }
                if let Some(body) = &block.body {
                    {render_body(body)}
                }
                if !block.files.is_empty() {
                    <div class="content-files">
                        <p class="label">{"Download File"}</p>
                        {for block.files.iter().map(|url| html! {
                            <a class="download" href={url.clone()} target="_blank">{url.clone()}</a>
                        })}
                    </div>
                }
                if let Some(assessment) = &block.assessment {
                    {render_assessment(assessment)}
                }
            </div>
            <div class="content-meta">
                if let Some(author) = &block.author {
                    <p>{author.clone()}</p>
                }
                if let Some(date) = &block.date {
                    <p>{format_timestamp(date)}</p>
                }
                if let Some(edited) = &block.date_edit {
                    <p class="edited">{format!("Edited: {}", format_timestamp(edited))}</p>
                }
            </div>
        </div>
    }
}

fn render_assessment(assessment: &Assessment) -> Html {
    html! {
        <div class="assessment">
            if let Some(due) = &assessment.due_date {
                <p class="label">{"Due Date"}</p>
                <p>{format_due_date(due)}</p>
            }
            if let Some(submit) = &assessment.submit {
                <p class="label">{"Submission Link"}</p>
                <form class="assessment-submit" action={submit.clone()} method="post" enctype="multipart/form-data">
                    <FileField name={Some(AttrValue::from("files"))} />
                    <button type="submit">{"Submit"}</button>
                </form>
            }
            if let Some(previous) = &assessment.previous_submissions {
                <p class="label">{"Previous Submissions"}</p>
                <ul class="submissions">
                    {for previous.iter().map(|file| html! { <li>{file_caption(file)}</li> })}
                </ul>
            }
        </div>
    }
}

fn render_result(result: &ResultBlock) -> Html {
    html! {
        <div class="content-block result">
            <p class="content-title">{result.title.clone()}</p>
            {for result.assessments.iter().map(|entry| html! {
                <div class="result-entry">
                    <h3>{entry.title.clone()}</h3>
                    <div>{format!("Due: {}", entry.due_date)}</div>
                    <div>{"Status: "}<span class="status">{entry.status.clone()}</span></div>
                    <div>{"Submission: "}<a href={entry.submission.clone()}>{entry.submission.clone()}</a></div>
                    <div>{"Feedback: "}<a href={entry.feedback.clone()}>{entry.feedback.clone()}</a></div>
                </div>
            })}
        </div>
    }
}

/// File name with its human-readable size.
pub(crate) fn file_caption(file: &SubmittedFile) -> Html {
    html! {
        <div class="file-caption">
            <span class="file-name">{file.name.clone()}</span>
            <span class="file-size">{file.size_label()}</span>
        </div>
    }
}
