//! JSON routes. Sessions travel with every request, so handlers are pure
//! functions of their input and the server keeps no state.

use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{Json, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rrg_utils::diagnostics::{self, Prompt};
use rrg_utils::session::{
    AktionsartSession, Handoff, Input, LogicalStructureSession, SessionError,
};
use rrg_utils::{
    Aktionsart, ArgumentSlots, ClauseOperator, FeatureVector, Language, LogicalStructure, classify,
};
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/", get(|| async { "rrg-backend is up" }))
        .route("/aktionsart/categories", get(categories))
        .route("/classify", post(classify_features))
        .route("/aktionsart/start", post(start_aktionsart))
        .route("/aktionsart/step", post(step_aktionsart))
        .route("/logical-structure/start", post(start_logical_structure))
        .route("/logical-structure/step", post(step_logical_structure))
        .route("/logical-structure", post(generate_logical_structure))
        .route("/schema", get(schema))
        .layer(CompressionLayer::new())
        .layer(cors)
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    state: Option<serde_json::Value>,
}

#[derive(Serialize, schemars::JsonSchema)]
struct ErrorBody {
    error: String,
    /// The session as it was before the rejected input.
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<serde_json::Value>,
}

impl ApiError {
    fn unprocessable(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: error.to_string(),
            state: None,
        }
    }

    fn from_session<S: Serialize>(error: SessionError, state: &S, language: Language) -> Self {
        let (status, message) = match &error {
            SessionError::InvalidAnswer(_) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
            SessionError::Unclassifiable => (
                StatusCode::UNPROCESSABLE_ENTITY,
                diagnostics::unclassifiable(language).join(" "),
            ),
            SessionError::Finished => (StatusCode::CONFLICT, error.to_string()),
        };
        log::debug!("rejected session input: {error}");
        Self {
            status,
            error: message,
            state: serde_json::to_value(state).ok(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            state: self.state,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Deserialize, schemars::JsonSchema)]
struct LanguageQuery {
    language: Option<String>,
}

impl LanguageQuery {
    fn language(&self) -> Result<Language, ApiError> {
        match &self.language {
            None => Ok(Language::default()),
            Some(code) => Language::from_iso_639_1(code)
                .ok_or_else(|| ApiError::unprocessable(format!("unsupported language {code:?}"))),
        }
    }
}

#[derive(Serialize, Deserialize, schemars::JsonSchema)]
struct Category {
    aktionsart: Aktionsart,
    label: String,
    causative: bool,
}

async fn categories(Query(query): Query<LanguageQuery>) -> Result<Json<Vec<Category>>, ApiError> {
    let language = query.language()?;
    Ok(Json(
        Aktionsart::ALL
            .into_iter()
            .map(|aktionsart| Category {
                aktionsart,
                label: aktionsart.label(language),
                causative: aktionsart.is_causative(),
            })
            .collect(),
    ))
}

#[derive(Deserialize, schemars::JsonSchema)]
struct ClassifyRequest {
    #[serde(flatten)]
    features: FeatureVector,
    #[serde(default)]
    language: Language,
}

#[derive(Serialize, Deserialize, schemars::JsonSchema)]
struct ClassifyResponse {
    aktionsart: Aktionsart,
    label: String,
    /// e.g. `[+causativo] [-estativo] [+puntual] [+télico] [-dinámico]`
    features: String,
}

async fn classify_features(Json(request): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let aktionsart = classify(&request.features);
    Json(ClassifyResponse {
        aktionsart,
        label: aktionsart.label(request.language),
        features: request.features.summary(aktionsart, request.language),
    })
}

#[derive(Deserialize, schemars::JsonSchema)]
struct StepRequest<S> {
    state: S,
    input: Input,
}

#[derive(Deserialize, schemars::JsonSchema)]
struct StartAktionsart {
    #[serde(default)]
    language: Language,
}

#[derive(Serialize, Deserialize, schemars::JsonSchema)]
struct AktionsartView {
    state: AktionsartSession,
    prompt: Option<Prompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aktionsart: Option<Aktionsart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    /// Present once the user asked to continue to the logical structure.
    #[serde(skip_serializing_if = "Option::is_none")]
    handoff: Option<Handoff>,
}

impl AktionsartView {
    fn new(state: AktionsartSession, notice: Option<String>) -> Self {
        let aktionsart = state.aktionsart();
        Self {
            prompt: state.prompt(),
            notice,
            aktionsart,
            label: aktionsart.map(|aktionsart| aktionsart.label(state.language)),
            handoff: state.handoff(),
            state,
        }
    }
}

async fn start_aktionsart(Json(request): Json<StartAktionsart>) -> Json<AktionsartView> {
    Json(AktionsartView::new(
        AktionsartSession::new(request.language),
        None,
    ))
}

async fn step_aktionsart(
    Json(request): Json<StepRequest<AktionsartSession>>,
) -> Result<Json<AktionsartView>, ApiError> {
    let state = request.state;
    let transition = state
        .step(&request.input)
        .map_err(|error| ApiError::from_session(error, &state, state.language))?;
    Ok(Json(AktionsartView::new(
        transition.session,
        transition.notice,
    )))
}

#[derive(Deserialize, schemars::JsonSchema)]
struct StartLogicalStructure {
    #[serde(default)]
    language: Language,
    aktionsart: Option<Aktionsart>,
    clause: Option<String>,
    dynamic: Option<bool>,
}

#[derive(Serialize, Deserialize, schemars::JsonSchema)]
struct LogicalStructureView {
    state: LogicalStructureSession,
    prompt: Option<Prompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    /// Set once the questionnaire is finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    logical_structure: Option<String>,
}

impl LogicalStructureView {
    fn new(state: LogicalStructureSession, notice: Option<String>) -> Self {
        let logical_structure = state
            .is_finished()
            .then(|| state.structure())
            .flatten()
            .map(|structure| structure.to_string());
        Self {
            prompt: state.prompt(),
            notice,
            logical_structure,
            state,
        }
    }
}

async fn start_logical_structure(
    Json(request): Json<StartLogicalStructure>,
) -> Json<LogicalStructureView> {
    let state = LogicalStructureSession::with_known(
        request.language,
        request.aktionsart,
        request.clause,
        request.dynamic,
    );
    Json(LogicalStructureView::new(state, None))
}

async fn step_logical_structure(
    Json(request): Json<StepRequest<LogicalStructureSession>>,
) -> Result<Json<LogicalStructureView>, ApiError> {
    let state = request.state;
    let transition = state
        .step(&request.input)
        .map_err(|error| ApiError::from_session(error, &state, state.language))?;
    Ok(Json(LogicalStructureView::new(
        transition.session,
        transition.notice,
    )))
}

#[derive(Deserialize, schemars::JsonSchema)]
struct GenerateRequest {
    aktionsart: Aktionsart,
    x: String,
    y: String,
    #[serde(default)]
    z: String,
    predicate: String,
    #[serde(default)]
    intentional: bool,
    #[serde(default)]
    operators: BTreeMap<ClauseOperator, String>,
}

#[derive(Serialize, Deserialize, schemars::JsonSchema)]
struct GenerateResponse {
    logical_structure: String,
    structure: LogicalStructure,
}

async fn generate_logical_structure(
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let arguments =
        ArgumentSlots::new(&request.x, &request.y, &request.z).map_err(ApiError::unprocessable)?;
    if request.predicate.trim().is_empty() {
        return Err(ApiError::unprocessable(rrg_utils::Error::EmptyAnswer));
    }
    let structure = LogicalStructure::build(
        request.aktionsart,
        &arguments,
        &request.predicate,
        request.intentional,
    )
    .with_operators(request.operators);
    Ok(Json(GenerateResponse {
        logical_structure: structure.to_string(),
        structure,
    }))
}

async fn schema() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ClassifyRequest": schemars::schema_for!(ClassifyRequest),
        "ClassifyResponse": schemars::schema_for!(ClassifyResponse),
        "StartAktionsart": schemars::schema_for!(StartAktionsart),
        "AktionsartStep": schemars::schema_for!(StepRequest<AktionsartSession>),
        "AktionsartView": schemars::schema_for!(AktionsartView),
        "StartLogicalStructure": schemars::schema_for!(StartLogicalStructure),
        "LogicalStructureStep": schemars::schema_for!(StepRequest<LogicalStructureSession>),
        "LogicalStructureView": schemars::schema_for!(LogicalStructureView),
        "GenerateRequest": schemars::schema_for!(GenerateRequest),
        "GenerateResponse": schemars::schema_for!(GenerateResponse),
        "Error": schemars::schema_for!(ErrorBody),
    }))
}
