//! HTTP + WebSocket surface and the fixed-rate tick loop
//!
//! Endpoints:
//! - GET  /health    - Health check
//! - GET  /state     - Current state record
//! - GET  /frame     - Everything a renderer draws this frame
//! - POST /utterance - Queue recognized text
//! - POST /volume    - Queue a volume sample
//! - POST /control   - Reset / flash / spawn_word / state overwrite
//! - WS   /ws        - Outbound state + flash records, inbound control messages

use axum::{
    extract::{State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::core::{inbox, Atmosphere, ControlOutcome, Feeds, Inbox};
use crate::error::AtmosphereError;
use crate::types::{AtmosphereConfig, ControlMessage, Frame, Outbound, StateRecord};

/// Minimum cadence of state records
const STATE_HEARTBEAT: Duration = Duration::from_secs(1);

/// Shared server state
pub struct AppState {
    /// The single lock over all mutable engine state
    pub atmosphere: Mutex<Atmosphere>,
    pub feeds: Feeds,
    pub updates: broadcast::Sender<Outbound>,
}

/// Queue an utterance
#[derive(Debug, Deserialize)]
pub struct UtteranceRequest {
    pub text: String,
}

/// Queue a volume sample
#[derive(Debug, Deserialize)]
pub struct VolumeRequest {
    pub level: f64,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub particles: usize,
    pub tick: u64,
}

/// Control response
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub applied: String,
    pub state: StateRecord,
}

/// Build shared state plus the tick loop's end of the queues
pub fn create_state(config: AtmosphereConfig) -> (Arc<AppState>, Inbox) {
    let (feeds, inbox) = inbox::channel(config.queue_capacity);
    let (updates, _) = broadcast::channel(100);
    let state = Arc::new(AppState {
        atmosphere: Mutex::new(Atmosphere::new(config)),
        feeds,
        updates,
    });
    (state, inbox)
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/frame", get(get_frame))
        .route("/utterance", post(post_utterance))
        .route("/volume", post(post_volume))
        .route("/control", post(post_control))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

fn status_of(err: &AtmosphereError) -> StatusCode {
    match err {
        AtmosphereError::MalformedControl(_)
        | AtmosphereError::EmptyUtterance
        | AtmosphereError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
        AtmosphereError::QueueFull(_) => StatusCode::TOO_MANY_REQUESTS,
        AtmosphereError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let atmo = state.atmosphere.lock().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        particles: atmo.particles().len(),
        tick: atmo.tick_count(),
    })
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateRecord> {
    let mut atmo = state.atmosphere.lock().await;
    Json(atmo.reading())
}

async fn get_frame(State(state): State<Arc<AppState>>) -> Json<Frame> {
    let atmo = state.atmosphere.lock().await;
    Json(atmo.frame())
}

async fn post_utterance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UtteranceRequest>,
) -> StatusCode {
    match state.feeds.push_text(req.text) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => status_of(&e),
    }
}

async fn post_volume(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VolumeRequest>,
) -> StatusCode {
    match state.feeds.push_volume(req.level) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => status_of(&e),
    }
}

async fn post_control(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ControlResponse>, StatusCode> {
    let message = ControlMessage::parse(&body).map_err(|e| {
        warn!(error = %e, "dropping malformed control message");
        status_of(&e)
    })?;
    let (outcome, record) = apply_control(&state, message).await;
    Ok(Json(ControlResponse {
        applied: format!("{:?}", outcome),
        state: record,
    }))
}

/// Apply a control message under the lock and broadcast what changed
async fn apply_control(state: &AppState, message: ControlMessage) -> (ControlOutcome, StateRecord) {
    let mut atmo = state.atmosphere.lock().await;
    let now = Instant::now();
    let outcome = atmo.apply_at(message, now);
    let record = atmo.reading_at(now);
    drop(atmo);

    if let ControlOutcome::Flash(flash) = &outcome {
        let _ = state.updates.send(Outbound::Flash(flash.clone()));
    }
    let _ = state.updates.send(Outbound::State(record.clone()));
    (outcome, record)
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Forward broadcasts out; apply inbound control messages
async fn handle_websocket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.updates.subscribe();

    let mut forward = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(update) => {
                    let json = serde_json::to_string(&update).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "socket lagging behind updates");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let inbound_state = Arc::clone(&state);
    let mut inbound = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(raw) => match ControlMessage::parse(&raw) {
                    Ok(control) => {
                        apply_control(&inbound_state, control).await;
                    }
                    Err(e) => warn!(error = %e, "dropping malformed socket message"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut forward => inbound.abort(),
        _ = &mut inbound => forward.abort(),
    }
}

/// One tick: drain queues, hear utterances, advance the simulation.
/// Returns the state records produced by utterances.
pub async fn step(state: &AppState, inbox: &mut Inbox, now: Instant) -> Vec<StateRecord> {
    let volumes = inbox.drain_volume();
    let texts = inbox.drain_text();

    let mut atmo = state.atmosphere.lock().await;
    if volumes.is_empty() {
        atmo.observe_volume(None);
    }
    for level in volumes {
        atmo.observe_volume(Some(level));
    }

    let mut records = Vec::new();
    for text in texts {
        if let Some(heard) = atmo.hear_at(&text, now) {
            let _ = state.updates.send(Outbound::Flash(heard.flash));
            let _ = state.updates.send(Outbound::State(heard.record.clone()));
            records.push(heard.record);
        }
    }
    atmo.tick_at(now);
    records
}

/// Tracks when the last state record went out
#[derive(Debug, Clone)]
pub struct Heartbeat {
    last: Instant,
}

impl Heartbeat {
    pub fn starting_at(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whether a standalone state record is due. Records sent for heard
    /// utterances restart the interval.
    pub fn due(&mut self, now: Instant, heard: bool) -> bool {
        if heard {
            self.last = now;
            return false;
        }
        if now.saturating_duration_since(self.last) >= STATE_HEARTBEAT {
            self.last = now;
            return true;
        }
        false
    }
}

/// One loop iteration: `step`, then a state record if the heartbeat is due
pub async fn advance(
    state: &AppState,
    inbox: &mut Inbox,
    heartbeat: &mut Heartbeat,
    now: Instant,
) -> Vec<StateRecord> {
    let heard = step(state, inbox, now).await;
    if heartbeat.due(now, !heard.is_empty()) {
        let record = state.atmosphere.lock().await.reading_at(now);
        let _ = state.updates.send(Outbound::State(record));
    }
    heard
}

/// Drive the simulation at the configured rate until the process exits
pub async fn run_tick_loop(state: Arc<AppState>, mut inbox: Inbox) {
    let hz = state.atmosphere.lock().await.config().tick_hz.max(1);
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / hz as f64));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut heartbeat = Heartbeat::starting_at(Instant::now());

    loop {
        interval.tick().await;
        advance(&state, &mut inbox, &mut heartbeat, Instant::now()).await;
    }
}

/// Run the API server and tick loop
pub async fn run_server(addr: &str, config: AtmosphereConfig) -> Result<(), AtmosphereError> {
    config.validate()?;
    let hz = config.tick_hz;
    let (state, inbox) = create_state(config);
    tokio::spawn(run_tick_loop(Arc::clone(&state), inbox));

    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, hz, "kuuki authority listening");
    info!("  GET  /health     - Health check");
    info!("  GET  /state      - Current state");
    info!("  GET  /frame      - Renderer frame");
    info!("  POST /utterance  - Queue recognized text");
    info!("  POST /volume     - Queue volume sample");
    info!("  POST /control    - Control message");
    info!("  WS   /ws         - Live updates");
    axum::serve(listener, router).await?;
    Ok(())
}
