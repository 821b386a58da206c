//! HTTP endpoints: room lifecycle plus one-shot mirrors of the WebSocket
//! actions. Both entry points converge on the same state-machine calls.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::GameError;
use crate::prompts;
use crate::state::AppState;
use crate::types::{Elimination, PlayerId, RoomId, RoomSnapshot};
use crate::ws;

/// Build the application router. `main` adds the CORS and trace layers on
/// top; tests drive this directly with `tower::ServiceExt`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/create_room", get(create_room))
        .route("/join_room/{room_id}", get(join_room))
        .route("/start_round/{room_id}", get(start_round))
        .route("/submit_answer/{room_id}", post(submit_answer))
        .route("/submit_vote/{room_id}", post(submit_vote))
        .route("/generate_ai_answers/{room_id}", post(generate_ai_answers))
        .route("/ws/{room_id}/{player_id}", get(ws::ws_handler))
        .with_state(state)
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Who is AI? Game is running!" }))
}

#[derive(Debug, Serialize)]
struct CreateRoomResponse {
    room_id: RoomId,
}

/// Creates a room and immediately starts round 1
async fn create_room(State(state): State<Arc<AppState>>) -> Json<CreateRoomResponse> {
    let room_id = state.create_room().await;
    tracing::info!("Created room {}", room_id);
    Json(CreateRoomResponse { room_id })
}

#[derive(Debug, Deserialize)]
struct JoinQuery {
    player_id: Option<PlayerId>,
    name: Option<String>,
    #[serde(default)]
    is_ai: bool,
}

#[derive(Debug, Serialize)]
struct JoinResponse {
    status: &'static str,
    #[serde(flatten)]
    snapshot: RoomSnapshot,
}

/// With `player_id` this registers the player; without it it's a read-only
/// snapshot of the room
async fn join_room(
    Path(room_id): Path<RoomId>,
    Query(query): Query<JoinQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<JoinResponse>, GameError> {
    let snapshot = match query.player_id {
        Some(player_id) => {
            state
                .join_room(&room_id, &player_id, query.name, query.is_ai)
                .await?
        }
        None => state.snapshot(&room_id).await?,
    };

    Ok(Json(JoinResponse {
        status: "ok",
        snapshot,
    }))
}

#[derive(Debug, Serialize)]
struct StartRoundResponse {
    status: &'static str,
    question: String,
}

/// Picks a prompt from the pool and broadcasts it to the room
async fn start_round(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StartRoundResponse>, GameError> {
    let question = state
        .start_round(&room_id, prompts::random_question())
        .await?;

    Ok(Json(StartRoundResponse {
        status: "Round started",
        question,
    }))
}

#[derive(Debug, Deserialize)]
struct AnswerQuery {
    player_id: PlayerId,
    answer: String,
}

/// One-shot mirror of the `submit_answer` WebSocket action
async fn submit_answer(
    Path(room_id): Path<RoomId>,
    Query(query): Query<AnswerQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, GameError> {
    state
        .submit_answer(&room_id, &query.player_id, query.answer)
        .await?;
    Ok(Json(json!({ "status": "ok" })))
}

#[derive(Debug, Deserialize)]
struct VoteQuery {
    voter_id: PlayerId,
    target_id: PlayerId,
}

#[derive(Debug, Serialize)]
struct VoteResponse {
    status: &'static str,
    #[serde(flatten)]
    elimination: Elimination,
}

/// One-shot mirror of the `submit_vote` WebSocket action. Responds with the
/// current plurality leader.
async fn submit_vote(
    Path(room_id): Path<RoomId>,
    Query(query): Query<VoteQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<VoteResponse>, GameError> {
    let elimination = state
        .submit_vote(&room_id, &query.voter_id, &query.target_id)
        .await?;

    Ok(Json(VoteResponse {
        status: "ok",
        elimination,
    }))
}

#[derive(Debug, Serialize)]
struct GenerateAiResponse {
    status: &'static str,
    generated: usize,
}

/// Fill in canned answers for every AI player in the roster
async fn generate_ai_answers(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<GenerateAiResponse>, GameError> {
    let generated = state.generate_ai_answers(&room_id).await?;
    Ok(Json(GenerateAiResponse {
        status: "ok",
        generated,
    }))
}
