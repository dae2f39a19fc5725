use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chatreport_core::domain::conversation::Conversation;
use chatreport_core::domain::form::FormDefinition;
use chatreport_core::domain::questionnaire::{Answers, StepKind, CHATREPORT};
use chatreport_core::ports::submission_service::{SubmissionError, SubmissionService};
use chrono::Local;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::render::{self, Notice};

type Fields = Vec<(String, String)>;

/// Shared app state for the handlers
#[derive(Clone)]
pub struct WebState {
    service: Arc<dyn SubmissionService>,
    form: Option<Arc<FormDefinition>>,
}

impl WebState {
    pub fn new(service: Arc<dyn SubmissionService>, form: Option<FormDefinition>) -> Self {
        Self {
            service,
            form: form.map(Arc::new),
        }
    }
}

pub fn create_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/chat") }))
        .route("/chat", get(start_chat_handler).post(answer_handler))
        .route("/chat/report", post(report_handler))
        .route("/form", get(show_form_handler).post(submit_form_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(state))
}

fn field<'a>(fields: &'a Fields, name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Rebuilds the conversation carried by the page's hidden `state` field.
fn restore(fields: &Fields) -> Result<Conversation<'static>, Response> {
    let invalid_session = |details: String| {
        warn!("Cannot restore check-in: {}", details);
        (
            StatusCode::BAD_REQUEST,
            Html(render::message_page(
                "ChatReport",
                &Notice::Error("Your check-in could not be restored, please start again.".into()),
                "/chat",
            )),
        )
            .into_response()
    };

    let answers: Answers = serde_json::from_str(field(fields, "state").unwrap_or("{}"))
        .map_err(|e| invalid_session(e.to_string()))?;
    Conversation::resume(&CHATREPORT, &answers).map_err(|e| invalid_session(e.to_string()))
}

async fn start_chat_handler() -> Html<String> {
    let conversation = Conversation::start(&CHATREPORT);
    Html(render::chat_page(&conversation, None, None))
}

#[instrument(skip_all)]
async fn answer_handler(
    State(state): State<Arc<WebState>>,
    Form(fields): Form<Fields>,
) -> Response {
    let mut conversation = match restore(&fields) {
        Ok(conversation) => conversation,
        Err(response) => return response,
    };

    let raw = match conversation.current_step().map(|step| step.kind) {
        Some(StepKind::BodyMap) => fields
            .iter()
            .filter(|(name, _)| name == "region")
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(","),
        _ => field(&fields, "answer").unwrap_or_default().to_string(),
    };

    if let Err(e) = conversation.answer(&raw) {
        let notice = Notice::Error(e.to_string());
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render::chat_page(&conversation, None, Some(&notice))),
        )
            .into_response();
    }

    if !conversation.is_finished() {
        return Html(render::chat_page(&conversation, None, None)).into_response();
    }

    let (status, notice) = match state.service.submit_check_in(conversation.answers()).await {
        Ok(_) => (
            StatusCode::OK,
            Notice::Success("Your check-in was sent to your care team.".into()),
        ),
        Err(report) => (
            StatusCode::BAD_GATEWAY,
            Notice::Error(report.current_context().to_string()),
        ),
    };
    let report = conversation.report(Local::now());

    (
        status,
        Html(render::chat_page(&conversation, report.as_ref(), Some(&notice))),
    )
        .into_response()
}

async fn report_handler(Form(fields): Form<Fields>) -> Response {
    let conversation = match restore(&fields) {
        Ok(conversation) => conversation,
        Err(response) => return response,
    };

    let Some(report) = conversation.report(Local::now()) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render::message_page(
                "ChatReport",
                &Notice::Error("The check-in is not finished yet.".into()),
                "/chat",
            )),
        )
            .into_response();
    };

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.file_name()),
            ),
        ],
        report.render(),
    )
        .into_response()
}

fn no_form() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render::message_page(
            "Form",
            &Notice::Error("No form is configured.".into()),
            "/chat",
        )),
    )
        .into_response()
}

async fn show_form_handler(State(state): State<Arc<WebState>>) -> Response {
    match &state.form {
        Some(form) => Html(render::form_page(form, &[], None)).into_response(),
        None => no_form(),
    }
}

#[instrument(skip_all)]
async fn submit_form_handler(
    State(state): State<Arc<WebState>>,
    Form(fields): Form<Fields>,
) -> Response {
    let Some(form) = &state.form else {
        return no_form();
    };

    let submission = match form.collect(&fields) {
        Ok(submission) => submission,
        Err(e) => {
            let notice = Notice::Error(e.to_string());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render::form_page(form, &fields, Some(&notice))),
            )
                .into_response();
        }
    };

    match state.service.submit(submission).await {
        Ok(_) => Html(render::message_page(
            &form.title,
            &Notice::Success("Thank you! Your response was recorded.".into()),
            "/form",
        ))
        .into_response(),
        Err(_) => (
            StatusCode::BAD_GATEWAY,
            Html(render::form_page(
                form,
                &fields,
                Some(&Notice::Error(SubmissionError::Failed.to_string())),
            )),
        )
            .into_response(),
    }
}

async fn health_handler(State(state): State<Arc<WebState>>) -> String {
    state.service.health_check().await
}
