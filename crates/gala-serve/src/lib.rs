use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use gala_pipeline::intake::{next_prompt, EventDetails};
use gala_pipeline::AgentRun;
use gala_store::JsonlStore;

// ── Config ──

pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
}

// ── Transcript producer boundary ──

/// The upstream multi-agent planning process, as seen from this crate: a
/// black box that turns one user message into an ordered, finite
/// transcript. The real producer lives outside the workspace; callers
/// inject whatever implementation they have.
pub trait Planner: Send + Sync {
    fn plan(&self, message: &str) -> anyhow::Result<Vec<String>>;
}

/// Fallback planner: the transcript is the user message itself. With no
/// topic markers present this degrades to an echo stream, which is the
/// honest behavior when no upstream process is wired in.
pub struct EchoPlanner;

impl Planner for EchoPlanner {
    fn plan(&self, message: &str) -> anyhow::Result<Vec<String>> {
        Ok(vec![message.to_string()])
    }
}

// ── App State ──

struct AppState {
    store_root: PathBuf,
    planner: Arc<dyn Planner>,
}

impl AppState {
    fn open_store(&self) -> anyhow::Result<JsonlStore> {
        Ok(JsonlStore::open(&self.store_root)?)
    }
}

// ── Error Handling ──

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ── Entrypoint ──

pub async fn serve(
    store_root: &Path,
    planner: Arc<dyn Planner>,
    config: ServeConfig,
) -> anyhow::Result<()> {
    let app = router(store_root, planner);
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("gala HTTP server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router (for testing without binding to a port).
pub fn router(store_root: &Path, planner: Arc<dyn Planner>) -> Router {
    let state = Arc::new(AppState {
        store_root: store_root.to_path_buf(),
        planner,
    });
    Router::new()
        .route("/api/health", get(health))
        .route("/agent", post(post_agent))
        .route("/events", get(get_events))
        .route("/social_outreach", post(post_social_outreach))
        .route("/resources", post(post_resources))
        .route("/volunteer_outreach", post(post_volunteer_outreach))
        .route("/intake", post(post_intake))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// ── POST /agent ──

#[derive(Deserialize)]
struct AgentBody {
    message: String,
}

/// Stream the agent run as plain text: each transcript record echoed as
/// it is processed, then the deterministic summary. A planner or store
/// failure after streaming began ends the stream with one explicit
/// error chunk; chunks already sent and facts already persisted stand.
async fn post_agent(State(state): State<Arc<AppState>>, Json(body): Json<AgentBody>) -> Response {
    let stream = async_stream::stream! {
        let store = match state.open_store() {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!("agent stream aborted opening store: {err}");
                yield Ok::<_, std::convert::Infallible>(Bytes::from(format!("\nerror: {err}\n")));
                return;
            }
        };
        let records = match state.planner.plan(&body.message) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("agent stream aborted in planner: {err}");
                yield Ok(Bytes::from(format!("\nerror: {err}\n")));
                return;
            }
        };

        let mut run = AgentRun::new(&store);
        for record in &records {
            match run.ingest(record) {
                Ok(chunk) => yield Ok(Bytes::from(chunk)),
                Err(err) => {
                    tracing::warn!("agent stream aborted mid-transcript: {err}");
                    yield Ok(Bytes::from(format!("\nerror: {err}\n")));
                    return;
                }
            }
        }
        for chunk in run.finish() {
            yield Ok(Bytes::from(chunk));
        }
    };

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream),
    )
        .into_response()
}

// ── GET /events ──

async fn get_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<gala_core::EventRecord>>, AppError> {
    let store = state.open_store()?;
    Ok(Json(store.events()?))
}

// ── Per-event fact listings ──

#[derive(Deserialize)]
struct EventQuery {
    #[serde(rename = "eventId", default)]
    event_id: Option<String>,
}

fn require_event_id(query: &EventQuery) -> Result<&str, Response> {
    match query.event_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Missing eventId in request body" })),
        )
            .into_response()),
    }
}

async fn post_social_outreach(
    State(state): State<Arc<AppState>>,
    Json(query): Json<EventQuery>,
) -> Response {
    let event_id = match require_event_id(&query) {
        Ok(id) => id.to_string(),
        Err(resp) => return resp,
    };
    match state.open_store().and_then(|s| Ok(s.groups_for(&event_id)?)) {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

async fn post_resources(
    State(state): State<Arc<AppState>>,
    Json(query): Json<EventQuery>,
) -> Response {
    let event_id = match require_event_id(&query) {
        Ok(id) => id.to_string(),
        Err(resp) => return resp,
    };
    match state
        .open_store()
        .and_then(|s| Ok(s.resources_for(&event_id)?))
    {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

async fn post_volunteer_outreach(
    State(state): State<Arc<AppState>>,
    Json(query): Json<EventQuery>,
) -> Response {
    let event_id = match require_event_id(&query) {
        Ok(id) => id.to_string(),
        Err(resp) => return resp,
    };
    match state.open_store().and_then(|s| Ok(s.emails_for(&event_id)?)) {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

// ── POST /intake ──

#[derive(Deserialize)]
struct IntakeBody {
    #[serde(default)]
    current: EventDetails,
    #[serde(default)]
    update: EventDetails,
}

#[derive(Serialize)]
struct IntakeResponse {
    details: EventDetails,
    prompt: String,
}

/// Deterministic half of the slot-filling dialogue: fold freshly
/// extracted details into the known ones and say what to ask next.
async fn post_intake(Json(body): Json<IntakeBody>) -> Json<IntakeResponse> {
    let mut details = body.current;
    details.merge(&body.update);
    let prompt = next_prompt(&details);
    Json(IntakeResponse { details, prompt })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use gala_core::sink::FactSink;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct ScriptedPlanner(Vec<String>);

    impl Planner for ScriptedPlanner {
        fn plan(&self, _message: &str) -> anyhow::Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingPlanner;

    impl Planner for FailingPlanner {
        fn plan(&self, _message: &str) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("upstream process unavailable")
        }
    }

    fn test_router(store_root: &Path, records: &[&str]) -> Router {
        let planner = Arc::new(ScriptedPlanner(
            records.iter().map(|r| r.to_string()).collect(),
        ));
        router(store_root, planner)
    }

    async fn body_text(resp: Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path(), &[]);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn agent_streams_echo_and_summary() {
        let tmp = tempfile::tempdir().unwrap();
        let record =
            "AIMessage(content='- Red Cross\n- Local Shelter', name='Social_Outreach')";
        let app = test_router(tmp.path(), &[record]);

        let resp = app
            .oneshot(post_json("/agent", serde_json::json!({"message": "plan it"})))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let text = body_text(resp).await;
        assert!(text.contains(record));
        assert!(text.contains("\n----\n"));
        assert!(text.contains("*Social Outreach Groups*"));
        assert!(text.contains("- Red Cross\n"));
        assert!(text.contains("- Local Shelter\n"));
        assert!(text.contains("*Event ID*: evt_"));

        // Facts landed in the store under the event from the summary.
        let store = JsonlStore::open(tmp.path()).unwrap();
        let events = store.events().unwrap();
        assert_eq!(events.len(), 1);
        assert!(text.contains(&events[0].event_id));
        assert_eq!(store.groups_for(&events[0].event_id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn agent_with_unrelated_transcript_echoes_only() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path(), &["let me think about that"]);

        let resp = app
            .oneshot(post_json("/agent", serde_json::json!({"message": "hi"})))
            .await
            .unwrap();

        let text = body_text(resp).await;
        assert_eq!(text, "let me think about that\n----\n");

        let store = JsonlStore::open(tmp.path()).unwrap();
        assert!(store.events().unwrap().is_empty());
    }

    #[tokio::test]
    async fn agent_planner_failure_yields_error_chunk() {
        let tmp = tempfile::tempdir().unwrap();
        let app = router(tmp.path(), Arc::new(FailingPlanner));

        let resp = app
            .oneshot(post_json("/agent", serde_json::json!({"message": "hi"})))
            .await
            .unwrap();

        let text = body_text(resp).await;
        assert!(text.contains("error: upstream process unavailable"));
    }

    #[tokio::test]
    async fn resources_requires_event_id() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path(), &[]);

        let resp = app
            .oneshot(post_json("/resources", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value =
            serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["error"], "Missing eventId in request body");
    }

    #[tokio::test]
    async fn fact_listings_filter_by_event() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(tmp.path()).unwrap();
        store.add_group("evt_a", "Red Cross").unwrap();
        store.add_group("evt_b", "Food Bank").unwrap();
        store.add_resource("evt_a", "Tents").unwrap();

        let app = test_router(tmp.path(), &[]);
        let resp = app
            .clone()
            .oneshot(post_json(
                "/social_outreach",
                serde_json::json!({"eventId": "evt_a"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let rows: serde_json::Value =
            serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["group_name"], "Red Cross");

        let resp = app
            .oneshot(post_json(
                "/resources",
                serde_json::json!({"eventId": "evt_a"}),
            ))
            .await
            .unwrap();
        let rows: serde_json::Value =
            serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["resource"], "Tents");
    }

    #[tokio::test]
    async fn events_lists_created_events() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(tmp.path()).unwrap();
        let event = gala_core::EventRecord::new();
        store.create_event(&event).unwrap();

        let app = test_router(tmp.path(), &[]);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let rows: serde_json::Value =
            serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["event_id"], event.event_id.as_str());
    }

    #[tokio::test]
    async fn intake_merges_and_prompts() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path(), &[]);

        let resp = app
            .oneshot(post_json(
                "/intake",
                serde_json::json!({
                    "current": {"event": "Charity Gala"},
                    "update": {"location": "Town Hall"}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["details"]["event"], "Charity Gala");
        assert_eq!(json["details"]["location"], "Town Hall");
        assert_eq!(json["prompt"], "What's your budget for this event?");
    }
}
