// Integration tests for the HTTP entry point
//
// Drives the mounted routes through Rocket's local client:
// - metadata on GET /
// - move selection and input rejection on POST /move
// - the diagnostics report on GET /stats

use rocket::http::Status;
use rocket::local::blocking::Client;
use serde_json::{json, Value};

use capped_2048_ai::config::Config;
use capped_2048_ai::engine::{Engine, SearchReport};
use capped_2048_ai::handler::build_rocket;
use capped_2048_ai::types::{MoveRequest, MoveResponse};

fn client() -> Client {
    Client::tracked(build_rocket(Engine::new(Config::default_hardcoded())))
        .expect("valid rocket instance")
}

#[test]
fn test_index_reports_search_settings() {
    let client = client();
    let response = client.get("/").dispatch();
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["search_depth"], 3);
    assert_eq!(body["merge_cap"], 1024);
}

#[test]
fn test_move_returns_direction_code() {
    let client = client();
    let response = client
        .post("/move")
        .json(&MoveRequest {
            board: vec![2, 4, 8, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        })
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let body: MoveResponse = response.into_json().expect("json body");
    assert_eq!(body, MoveResponse { direction: 2 });
}

#[test]
fn test_move_on_terminal_board_returns_minus_one() {
    let client = client();
    let response = client
        .post("/move")
        .json(&json!({ "board": [2, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2] }))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().expect("json body");
    assert_eq!(body, json!({ "move": -1 }));
}

#[test]
fn test_malformed_board_is_bad_request() {
    let client = client();
    let response = client
        .post("/move")
        .json(&json!({ "board": [2, 2, 2] }))
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    let body: Value = response.into_json().expect("json body");
    assert!(body["error"].as_str().unwrap().contains("expected 16"));
}

#[test]
fn test_stats_available_after_first_move() {
    let client = client();
    assert_eq!(client.get("/stats").dispatch().status(), Status::NotFound);

    client
        .post("/move")
        .json(&MoveRequest {
            board: vec![2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
        })
        .dispatch();

    let response = client.get("/stats").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["branches"].as_array().map(|b| b.len()), Some(4));
    assert!(body["nodes"].as_u64().unwrap() > 0);
}

#[test]
fn test_search_report_serializes_directions_lowercase() {
    let engine = Engine::new(Config::default_hardcoded().with_search_depth(1));
    engine.get_move(&[2, 4, 8, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    let report: SearchReport = engine.last_report().unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["best"], "down");
    assert_eq!(json["branches"][0]["direction"], "up");
}
