//! Server-side HTML for the check-in chat and the configured form.
//!
//! Pages carry everything needed to continue: the chat keeps the answers given so far in a
//! hidden `state` field, so the server holds no per-visitor session.

use std::fmt::Write;
use std::sync::LazyLock;

use chatreport_core::domain::conversation::{Conversation, Speaker};
use chatreport_core::domain::form::{FieldKind, FormDefinition, FormField};
use chatreport_core::domain::questionnaire::response::{scale_hint, PainBand};
use chatreport_core::domain::questionnaire::step::SCALE_MAX;
use chatreport_core::domain::questionnaire::{Answers, BodyRegion, Step, StepKind};
use chatreport_core::domain::report::SymptomReport;
use regex::Regex;
use strum::IntoEnumIterator;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

const STYLE: &str = "
body { font-family: system-ui, sans-serif; background: #f5f7fb; margin: 0; color: #1f2937; }
main { max-width: 760px; margin: 0 auto; padding: 24px; }
header h1 { margin: 0 0 4px; font-size: 1.5rem; }
.progress { background: #e5e7eb; border-radius: 8px; height: 10px; overflow: hidden; }
.progress > div { background: #2563eb; height: 100%; }
.areas { display: flex; flex-wrap: wrap; gap: 8px; margin: 12px 0; padding: 0;
         list-style: none; font-size: .85rem; }
.areas .done { color: #15803d; font-weight: 600; }
.bubble { padding: 12px 16px; border-radius: 14px; margin: 8px 0; max-width: 85%; }
.bot { background: #fff; border: 1px solid #e5e7eb; }
.patient { background: #2563eb; color: #fff; margin-left: auto; }
.bubble small { display: block; opacity: .6; font-size: .7rem; margin-top: 4px; }
.notice { padding: 12px 16px; border-radius: 8px; margin: 12px 0; }
.notice.ok { background: #dcfce7; color: #166534; }
.notice.error { background: #fee2e2; color: #991b1b; }
.chips button, .scale button { margin: 4px; padding: 8px 14px; border-radius: 999px;
                               border: 1px solid #cbd5e1; background: #fff; cursor: pointer; }
.scale button { color: #fff; border: none; min-width: 40px; }
.regions label { display: inline-block; margin: 4px 8px 4px 0; }
pre.report { background: #fff; border: 1px solid #e5e7eb; padding: 16px; overflow-x: auto; }
form.survey label { display: block; margin-top: 12px; font-weight: 600; }
form.survey input, form.survey textarea, form.survey select {
    width: 100%; padding: 8px; margin-top: 4px; box-sizing: border-box;
}
";

/// Banner shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes a bot message and renders its `**bold**` spans and line breaks.
pub fn message_html(text: &str) -> String {
    BOLD.replace_all(&escape_html(text), "<strong>$1</strong>")
        .replace('\n', "<br>")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Success(text)) => {
            format!("<div class=\"notice ok\">✅ {}</div>", escape_html(text))
        }
        Some(Notice::Error(text)) => {
            format!("<div class=\"notice error\">❌ {}</div>", escape_html(text))
        }
        None => String::new(),
    }
}

fn state_field(answers: &Answers) -> String {
    let state = serde_json::to_string(answers).unwrap_or_else(|_| "{}".to_string());
    format!(
        "<input type=\"hidden\" name=\"state\" value=\"{}\">",
        escape_html(&state)
    )
}

/// The chat transcript with the input for the current step, or the report once finished.
pub fn chat_page(
    conversation: &Conversation,
    report: Option<&SymptomReport>,
    notice: Option<&Notice>,
) -> String {
    let mut body = String::new();
    let progress = conversation.progress_percent();

    let _ = write!(
        body,
        "<header><h1>🩺 ChatReport</h1><p>Pre-appointment symptom check-in</p></header>\n\
         <div class=\"progress\" title=\"{progress}% complete\">\
         <div style=\"width: {progress}%\"></div></div>\n\
         <ul class=\"areas\">"
    );
    for (area, visited) in conversation.area_progress() {
        let (class, mark) = if visited { ("done", "✅") } else { ("", "⬜") };
        let _ = write!(body, "<li class=\"{class}\">{mark} {area}</li>");
    }
    body.push_str("</ul>\n<section class=\"chat\">\n");

    for message in conversation.messages() {
        let class = match message.speaker {
            Speaker::Bot => "bot",
            Speaker::Patient => "patient",
        };
        let _ = writeln!(
            body,
            "<div class=\"bubble {class}\">{}<small>{}</small></div>",
            message_html(&message.text),
            message.timestamp()
        );
    }
    body.push_str("</section>\n");
    body.push_str(&notice_html(notice));

    match (conversation.current_step(), report) {
        (Some(step), _) => body.push_str(&answer_form(step, conversation.answers())),
        (None, Some(report)) => {
            let _ = write!(
                body,
                "<h2>Your summary</h2>\n<pre class=\"report\">{}</pre>\n\
                 <form method=\"post\" action=\"/chat/report\">{}\
                 <button type=\"submit\">⬇️ Download report</button></form>\n\
                 <p><a href=\"/chat\">Start a new check-in</a></p>",
                escape_html(&report.render()),
                state_field(conversation.answers()),
            );
        }
        (None, None) => body.push_str("<p><a href=\"/chat\">Start a new check-in</a></p>"),
    }

    page("ChatReport", &body)
}

fn answer_form(step: &Step, answers: &Answers) -> String {
    let mut form = format!("<form method=\"post\" action=\"/chat\">{}", state_field(answers));

    match step.kind {
        StepKind::Text | StepKind::Info => {
            form.push_str(
                "<input type=\"text\" name=\"answer\" required autofocus \
                 placeholder=\"Type your answer here...\">\
                 <button type=\"submit\">Send</button>",
            );
        }
        StepKind::Scale => {
            form.push_str("<div class=\"scale\">");
            for score in 0..=SCALE_MAX {
                let _ = write!(
                    form,
                    "<button type=\"submit\" name=\"answer\" value=\"{score}\" title=\"{}\" \
                     style=\"background: {}\">{score}</button>",
                    scale_hint(score),
                    PainBand::from_score(score).color(),
                );
            }
            form.push_str("</div>");
        }
        StepKind::Choice(options) => {
            form.push_str("<div class=\"chips\">");
            for option in options {
                let option = escape_html(option);
                let _ = write!(
                    form,
                    "<button type=\"submit\" name=\"answer\" value=\"{option}\">{option}</button>"
                );
            }
            form.push_str("</div>");
        }
        StepKind::BodyMap => {
            form.push_str("<fieldset class=\"regions\"><legend>Where is the pain?</legend>");
            for region in BodyRegion::iter() {
                let _ = write!(
                    form,
                    "<label><input type=\"checkbox\" name=\"region\" value=\"{}\"> {}</label>",
                    region.key(),
                    region.label()
                );
            }
            form.push_str(
                "</fieldset><button type=\"submit\">✅ Done selecting</button>",
            );
        }
    }

    form.push_str("</form>");
    form
}

/// The operator's form, refilled with `values` when it is shown again after an error.
pub fn form_page(
    definition: &FormDefinition,
    values: &[(String, String)],
    notice: Option<&Notice>,
) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape_html(&definition.title));
    body.push_str(&notice_html(notice));
    body.push_str("<form class=\"survey\" method=\"post\" action=\"/form\">\n");

    for field in &definition.fields {
        let value = values
            .iter()
            .find(|(name, _)| *name == field.name)
            .map_or("", |(_, value)| value.as_str());
        body.push_str(&field_html(field, value));
    }

    body.push_str("<button type=\"submit\">Submit</button>\n</form>");
    page(&definition.title, &body)
}

fn field_html(field: &FormField, value: &str) -> String {
    let name = escape_html(&field.name);
    let value = escape_html(value);
    let required = if field.required { " required" } else { "" };
    let label = format!(
        "<label for=\"{name}\">{}{}</label>",
        escape_html(&field.label),
        if field.required { " *" } else { "" }
    );

    let ids = format!("id=\"{name}\" name=\"{name}\"");
    let input = match &field.kind {
        FieldKind::Text => {
            format!("<input type=\"text\" {ids} value=\"{value}\"{required}>")
        }
        FieldKind::LongText => {
            format!("<textarea {ids} rows=\"4\"{required}>{value}</textarea>")
        }
        FieldKind::Email => {
            format!("<input type=\"email\" {ids} value=\"{value}\"{required}>")
        }
        FieldKind::Number { min, max } => {
            let mut bounds = String::new();
            if let Some(min) = min {
                let _ = write!(bounds, " min=\"{min}\"");
            }
            if let Some(max) = max {
                let _ = write!(bounds, " max=\"{max}\"");
            }
            format!("<input type=\"number\" step=\"1\" {ids} value=\"{value}\"{bounds}{required}>")
        }
        FieldKind::Choice { options } => {
            let mut select = format!("<select {ids}{required}><option value=\"\"></option>");
            for option in options {
                let option = escape_html(option);
                let selected = if option == value { " selected" } else { "" };
                let _ = write!(
                    select,
                    "<option value=\"{option}\"{selected}>{option}</option>"
                );
            }
            select.push_str("</select>");
            select
        }
    };

    format!("{label}\n{input}\n")
}

/// Plain page with a banner and a way back.
pub fn message_page(title: &str, notice: &Notice, back_to: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n{}\n<p><a href=\"{}\">Back</a></p>",
        escape_html(title),
        notice_html(Some(notice)),
        escape_html(back_to),
    );
    page(title, &body)
}
