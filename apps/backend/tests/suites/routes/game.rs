use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem;
use hexlink_backend::services::notify::Notification;
use hexlink_backend::AppError;
use serde_json::{json, Value};

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::factory::{create_test_user, quick_match, start_session};
use crate::support::test_state::{build_recording_state, build_test_state};

fn place_body(room_id: &str, player_id: i64, q: i32, tile_id: &str) -> Value {
    json!({
        "room_id": room_id,
        "player_id": player_id,
        "q": q,
        "r": 0,
        "tile_id": tile_id,
        "rotation": 60,
    })
}

#[actix_web::test]
async fn state_of_waiting_room() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;
    let opened = quick_match(&state, alice).await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/game/state/{}", opened.room_id.to_lowercase()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    assert_eq!(body["room_id"], opened.room_id.as_str());
    assert_eq!(body["status"], "waiting");
    assert_eq!(body["message"], "Waiting for player 2");
    assert_eq!(body["waiting_for_opponent"], true);
    assert!(body.get("placed_tiles").is_none());
    Ok(())
}

#[actix_web::test]
async fn state_of_active_room() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, _alice, _bob) = start_session(&state).await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/game/state/{room_id}"))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;

    assert_eq!(body["status"], "playing");
    assert_eq!(body["current_turn"], 1);
    assert_eq!(body["tiles_remaining"], 35);
    assert_eq!(body["player1_score"], 0);
    assert_eq!(body["player2_score"], 0);
    assert!(body["winner"].is_null());
    assert!(body["current_tile_p1"].is_string());
    assert!(body["current_tile_p2"].is_string());

    let tiles = body["placed_tiles"].as_array().expect("placed_tiles");
    assert_eq!(tiles.len(), 1);
    assert_eq!(
        tiles[0],
        json!({"q": 0, "r": 0, "tile_id": "starter_y_junction", "player": 0, "rotation": 0})
    );
    Ok(())
}

#[actix_web::test]
async fn state_of_unknown_room_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/game/state/ZZZZZZ").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "ROOM_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn state_with_malformed_room_id_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    for raw in ["abc", "ROOM1234", "AB-12C"] {
        let req = test::TestRequest::get()
            .uri(&format!("/game/state/{raw}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::NOT_FOUND, "ROOM_NOT_FOUND").await;
    }
    Ok(())
}

#[actix_web::test]
async fn place_tile_round_trip() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, alice, bob) = start_session(&state).await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/game/place_tile")
        .set_json(place_body(&room_id, alice, 1, "road_curve"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(
        body,
        json!({"message": "Tile placed", "current_turn": 2, "game_over": false, "winner": null})
    );

    // alice again: turn has passed to bob
    let req = test::TestRequest::post()
        .uri("/game/place_tile")
        .set_json(place_body(&room_id, alice, 2, "road_curve"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "NOT_YOUR_TURN").await;

    let req = test::TestRequest::post()
        .uri("/game/place_tile")
        .set_json(json!({
            "room_id": room_id,
            "user_id": bob,
            "q": -1,
            "r": 1,
            "tile_id": "road_straight",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/game/state/{room_id}"))
        .to_request();
    let state_body = read_json(test::call_service(&app, req).await).await;
    let tiles = state_body["placed_tiles"].as_array().expect("placed_tiles");
    assert_eq!(tiles.len(), 3);
    assert_eq!(tiles[1]["rotation"], 60);
    assert_eq!(tiles[1]["player"], 1);
    assert_eq!(tiles[2]["rotation"], 0);
    assert_eq!(tiles[2]["player"], 2);
    assert_eq!(state_body["player1_score"], 1);
    assert_eq!(state_body["player2_score"], 1);
    assert_eq!(state_body["current_turn"], 1);
    Ok(())
}

#[actix_web::test]
async fn finishing_move_reports_winner_and_notifies() -> Result<(), AppError> {
    let (state, notifier) = build_recording_state().await?;
    let (room_id, alice, bob) = start_session(&state).await?;
    let app = create_test_app(state).build().await;

    let mut last = Value::Null;
    for q in 1..=35 {
        let player = if q % 2 == 1 { alice } else { bob };
        let req = test::TestRequest::post()
            .uri("/game/place_tile")
            .set_json(place_body(&room_id, player, q, "road_straight"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "move {q}");
        last = read_json(resp).await;
    }

    assert_eq!(last["game_over"], true);
    assert_eq!(last["winner"], 1);

    let seen = notifier.wait_for(1).await;
    assert_eq!(
        seen,
        vec![Notification::GameOver {
            room_id: room_id.clone(),
            winner: 1,
        }]
    );

    let req = test::TestRequest::get()
        .uri(&format!("/game/state/{room_id}"))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["status"], "finished");
    assert_eq!(body["winner"], 1);
    assert_eq!(body["tiles_remaining"], 0);

    let req = test::TestRequest::post()
        .uri("/game/place_tile")
        .set_json(place_body(&room_id, bob, 36, "road_straight"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "SESSION_FINISHED").await;
    Ok(())
}

#[actix_web::test]
async fn place_tile_with_missing_fields_is_a_bad_request() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/game/place_tile")
        .set_json(json!({"room_id": "ABCDEF", "player_id": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem(resp, StatusCode::BAD_REQUEST, "MISSING_PARAMETERS").await;
    assert_eq!(problem.detail, "Missing parameters");
    Ok(())
}

#[actix_web::test]
async fn place_tile_on_unknown_room_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/game/place_tile")
        .set_json(place_body("ABCDEF", 1, 0, "road_straight"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem(resp, StatusCode::NOT_FOUND, "ROOM_NOT_FOUND").await;
    assert_eq!(problem.detail, "Game not found");
    Ok(())
}
