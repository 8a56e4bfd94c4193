use hexlink_backend::domain::SessionState;
use hexlink_backend::entities::rooms::RoomStatus;
use hexlink_backend::errors::ErrorCode;
use hexlink_backend::repos::{rooms, sessions};
use hexlink_backend::services::sessions::{PlaceTileInput, PlaceTileOutcome, SessionService};
use hexlink_backend::{with_txn, AppError, AppState};

use crate::support::factory::{create_test_user, quick_match, start_session};
use crate::support::test_state::build_test_state;

fn placement(room_id: &str, player_id: i64, q: i32, tile_id: &str) -> PlaceTileInput {
    PlaceTileInput {
        room_id: Some(room_id.to_string()),
        player_id: Some(player_id),
        q: Some(q),
        r: Some(0),
        tile_id: Some(tile_id.to_string()),
        rotation: Some(0),
    }
}

async fn place(state: &AppState, input: PlaceTileInput) -> Result<PlaceTileOutcome, AppError> {
    with_txn(state, move |txn| {
        Box::pin(async move { SessionService::new().place_tile(txn, input).await })
    })
    .await
}

async fn load(state: &AppState, room_id: &str) -> Result<SessionState, AppError> {
    let room_id = room_id.to_string();
    with_txn(state, move |txn| {
        Box::pin(async move {
            let stored = sessions::find_by_room(txn, &room_id)
                .await?
                .expect("session exists");
            Ok(stored.state)
        })
    })
    .await
}

#[tokio::test]
async fn placement_scores_draws_and_flips_turn() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, alice, _bob) = start_session(&state).await?;
    let before = load(&state, &room_id).await?;
    let hand = before.current_tile_p1.clone().expect("player 1 holds a tile");

    let outcome = place(&state, placement(&room_id, alice, 1, &hand)).await?;
    assert_eq!(outcome.current_turn, 2);
    assert!(!outcome.game_over);
    assert_eq!(outcome.winner, None);
    assert!(outcome.notification().is_none());

    let after = load(&state, &room_id).await?;
    assert_eq!(after.placed_tiles.len(), 2);
    let placed = &after.placed_tiles[1];
    assert_eq!((placed.q, placed.r, placed.player), (1, 0, 1));
    assert_eq!(placed.tile_id, hand);
    assert_eq!(after.player1_score, 1);
    assert_eq!(after.player2_score, 0);
    assert_eq!(after.tiles_remaining(), before.tiles_remaining() - 1);
    assert_eq!(after.current_tile_p1.as_ref(), before.deck.front());
    assert_eq!(after.current_tile_p2, before.current_tile_p2);
    Ok(())
}

#[tokio::test]
async fn lowercase_room_id_is_accepted() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, alice, _bob) = start_session(&state).await?;

    let outcome = place(
        &state,
        placement(&room_id.to_lowercase(), alice, 1, "road_straight"),
    )
    .await?;
    assert_eq!(outcome.room_id, room_id);
    Ok(())
}

#[tokio::test]
async fn out_of_turn_placement_is_forbidden_and_changes_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, _alice, bob) = start_session(&state).await?;
    let before = load(&state, &room_id).await?;

    let err = place(&state, placement(&room_id, bob, 1, "road_straight"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);
    assert_eq!(err.status().as_u16(), 403);

    assert_eq!(load(&state, &room_id).await?, before);
    Ok(())
}

#[tokio::test]
async fn stranger_cannot_place() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, _alice, _bob) = start_session(&state).await?;
    let mallory = create_test_user(&state, "mallory").await?;

    let err = place(&state, placement(&room_id, mallory, 1, "road_straight"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);
    Ok(())
}

#[tokio::test]
async fn full_game_drains_deck_and_finishes_room() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, alice, bob) = start_session(&state).await?;
    let initial = load(&state, &room_id).await?;

    let mut moves = 0;
    let last = loop {
        let current = load(&state, &room_id).await?;
        let (player, hand) = if current.current_turn == 1 {
            (alice, current.current_tile_p1.clone())
        } else {
            (bob, current.current_tile_p2.clone())
        };
        let hand = hand.expect("turn holder has a tile while the deck lasts");

        let outcome = place(&state, placement(&room_id, player, moves + 1, &hand)).await?;
        moves += 1;
        if outcome.game_over {
            break outcome;
        }
    };

    assert_eq!(moves as usize, initial.tiles_remaining());
    // player 1 moves first, so an odd move count leaves them one tile ahead
    assert_eq!(last.winner, Some(1));
    assert_eq!(last.current_turn, 2);
    assert!(last.notification().is_some());

    let final_state = load(&state, &room_id).await?;
    assert_eq!(final_state.tiles_remaining(), 0);
    assert_eq!(final_state.placed_tiles.len(), initial.tiles_remaining() + 1);
    assert_eq!(
        final_state.player1_score + final_state.player2_score,
        moves
    );
    assert_eq!(final_state.winner, Some(1));

    let id = room_id.clone();
    let room = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(rooms::require_room(txn, &id).await?) })
    })
    .await?;
    assert_eq!(room.status, RoomStatus::Finished);

    let err = place(&state, placement(&room_id, bob, 99, "road_straight"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionFinished);
    assert_eq!(err.status().as_u16(), 409);
    assert_eq!(load(&state, &room_id).await?, final_state);
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_rejected_before_lookup() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let input = PlaceTileInput {
        room_id: Some("ZZZZZZ".into()),
        player_id: Some(1),
        q: None,
        r: Some(0),
        tile_id: Some("road_straight".into()),
        rotation: None,
    };
    let err = place(&state, input).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingParameters);
    assert_eq!(err.status().as_u16(), 400);
    Ok(())
}

#[tokio::test]
async fn malformed_room_id_is_an_unknown_room() -> Result<(), AppError> {
    let state = build_test_state().await?;

    for raw in ["NOT-A-ROOM", "abc", "ROOM1234"] {
        let err = place(&state, placement(raw, 1, 0, "road_straight"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::RoomNotFound, "{raw}");
        assert_eq!(err.status().as_u16(), 404);
    }
    Ok(())
}

#[tokio::test]
async fn unknown_room_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = place(&state, placement("ZZZZZZ", 1, 0, "road_straight"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoomNotFound);
    assert_eq!(err.status().as_u16(), 404);
    Ok(())
}

#[tokio::test]
async fn waiting_room_has_no_session_to_place_on() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;
    let opened = quick_match(&state, alice).await?;

    let err = place(&state, placement(&opened.room_id, alice, 1, "road_straight"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    assert_eq!(err.status().as_u16(), 404);
    Ok(())
}
