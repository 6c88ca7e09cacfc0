//! HTTP request handlers for the web server.
//!
//! Serves the verification form, accepts multipart form posts and a JSON
//! equivalent, and exposes a health check, using axum.

use crate::page::{self, Outcome, PageView};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use claimcheck_domain::{CompletionClient, FormInput, InputError, SectionInput, Upload};
use claimcheck_llm::LlmError;
use claimcheck_verifier::{DisplayState, Verifier, VerifyError, GUIDANCE_MESSAGE};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Largest accepted request body (both uploads together)
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Completion client shared by all handlers
pub type SharedClient = dyn CompletionClient<Error = LlmError>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Verifier wrapping the configured completion client
    pub verifier: Verifier<SharedClient>,
}

/// JSON verification request
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    /// Section A text
    #[serde(default)]
    pub claims: Option<String>,
    /// Section B text
    #[serde(default)]
    pub sources: Option<String>,
}

/// JSON verification response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VerifyResponse {
    /// Inputs incomplete; no request was made
    Pending {
        /// Guidance for the user
        message: String,
    },
    /// The model's reply
    Complete {
        /// Completion text, unmodified
        result: String,
    },
}

impl From<DisplayState> for VerifyResponse {
    fn from(state: DisplayState) -> Self {
        match state {
            DisplayState::Pending => VerifyResponse::Pending {
                message: GUIDANCE_MESSAGE.to_string(),
            },
            DisplayState::Complete(result) => VerifyResponse::Complete {
                result: result.into_inner(),
            },
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model requests are sent to
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Verification failed
    Verify(VerifyError),
    /// The request body could not be read
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Verify(VerifyError::Input(InputError::UnsupportedFileType { .. })) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Verify(VerifyError::Input(InputError::InvalidUtf8 { .. })) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Verify(e) => match e.llm_error::<LlmError>() {
                Some(LlmError::RateLimitExceeded) => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Verify(e) => e.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message(),
        });
        (self.status(), body).into_response()
    }
}

impl From<VerifyError> for AppError {
    fn from(e: VerifyError) -> Self {
        AppError::Verify(e)
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid form data: {}", e))
    }
}

/// Read the four form fields into a `FormInput`
async fn read_form(mut multipart: Multipart) -> Result<FormInput, AppError> {
    let mut form = FormInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let section: &mut SectionInput = match name.as_str() {
            "claims_text" | "claims_file" => &mut form.claims,
            "sources_text" | "sources_file" => &mut form.sources,
            _ => continue,
        };

        if name.ends_with("_text") {
            section.pasted = Some(field.text().await?);
        } else {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;
            section.upload = Some(Upload {
                file_name,
                bytes: bytes.to_vec(),
            });
        }
    }

    Ok(form)
}

/// GET / - The empty form
async fn index() -> Html<String> {
    Html(page::render(&PageView::empty()))
}

/// POST /verify - Form submission
///
/// Always answers with the page; failures are shown in the output area with
/// a matching status code.
async fn verify_form(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => return render_error(PageView::empty(), e),
    };

    let mut view = PageView {
        claims_text: form.claims.pasted.clone().unwrap_or_default(),
        sources_text: form.sources.pasted.clone().unwrap_or_default(),
        outcome: Outcome::Guidance,
    };

    match state.verifier.run(&form).await {
        Ok(display) => {
            view.outcome = display.into();
            Html(page::render(&view)).into_response()
        }
        Err(e) => render_error(view, AppError::from(e)),
    }
}

fn render_error(mut view: PageView, error: AppError) -> Response {
    warn!("Verification failed: {}", error.message());
    let status = error.status();
    view.outcome = Outcome::Error(error.message());
    (status, Html(page::render(&view))).into_response()
}

/// POST /api/verify - JSON verification
async fn verify_json(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let form = FormInput::new(
        SectionInput {
            pasted: request.claims,
            upload: None,
        },
        SectionInput {
            pasted: request.sources,
            upload: None,
        },
    );

    let outcome = state.verifier.run(&form).await?;
    info!(pending = outcome.is_pending(), "API verification handled");
    Ok(Json(outcome.into()))
}

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model: state.verifier.model().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(index))
        .route("/verify", post(verify_form))
        .route("/api/verify", post(verify_json))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
