// HTTP handler bindings for the engine
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Engine's methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Extracting the Engine instance from Rocket's managed state
// - Moving the CPU-bound search off the async workers
// - Serializing responses

use log::{error, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, routes, Build, Rocket};
use serde_json::{json, Value};

use crate::engine::{Engine, SearchReport};
use crate::types::{MoveRequest, MoveResponse};

type ErrorResponse = (Status, Json<Value>);

/// GET / endpoint
/// Returns engine metadata
#[get("/")]
pub fn index(engine: &rocket::State<Engine>) -> Json<Value> {
    Json(engine.info())
}

/// POST /move endpoint
/// Computes the next move for a flat 16-tile board
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(
    engine: &rocket::State<Engine>,
    move_req: Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ErrorResponse> {
    let engine = engine.inner().clone();
    let board = move_req.into_inner().board;

    let result = tokio::task::spawn_blocking(move || engine.get_move(&board))
        .await
        .map_err(|e| {
            error!("Search task failed: {}", e);
            (
                Status::InternalServerError,
                Json(json!({ "error": "search task failed" })),
            )
        })?;

    match result {
        Ok(direction) => Ok(Json(MoveResponse { direction })),
        Err(e) => {
            warn!("Rejected board: {}", e);
            Err((Status::BadRequest, Json(json!({ "error": e.to_string() }))))
        }
    }
}

/// GET /stats endpoint
/// Returns the report of the most recent decision
#[get("/stats")]
pub fn stats(engine: &rocket::State<Engine>) -> Option<Json<SearchReport>> {
    engine.last_report().map(Json)
}

/// Assembles the server around an engine
pub fn build_rocket(engine: Engine) -> Rocket<Build> {
    rocket::build()
        .manage(engine)
        .mount("/", routes![index, get_move, stats])
}
