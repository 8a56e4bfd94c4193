use hexlink_backend::entities::rooms::RoomStatus;
use hexlink_backend::errors::ErrorCode;
use hexlink_backend::repos::{rooms, sessions};
use hexlink_backend::services::matchmaking::MatchmakingService;
use hexlink_backend::{with_txn, AppError};

use crate::support::factory::{create_test_user, quick_match};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn first_player_opens_a_waiting_room() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;

    let outcome = quick_match(&state, alice).await?;
    assert_eq!(outcome.player_number, 1);
    assert_eq!(outcome.opponent_id, None);
    assert_eq!(outcome.room_id.len(), 6);
    assert!(outcome
        .room_id
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    let room_id = outcome.room_id.clone();
    let (room, session) = with_txn(&state, move |txn| {
        Box::pin(async move {
            let room = rooms::require_room(txn, &room_id).await?;
            let session = sessions::find_by_room(txn, &room_id).await?;
            Ok((room, session))
        })
    })
    .await?;

    assert_eq!(room.status, RoomStatus::Waiting);
    assert_eq!(room.player1_id, alice);
    assert!(room.has_open_seat());
    assert!(session.is_none(), "no session before a second player joins");
    Ok(())
}

#[tokio::test]
async fn second_player_joins_and_session_starts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;
    let bob = create_test_user(&state, "bob").await?;

    let opened = quick_match(&state, alice).await?;
    let joined = quick_match(&state, bob).await?;

    assert_eq!(joined.room_id, opened.room_id);
    assert_eq!(joined.player_number, 2);
    assert_eq!(joined.opponent_id, Some(alice));

    let room_id = joined.room_id.clone();
    let (room, session) = with_txn(&state, move |txn| {
        Box::pin(async move {
            let room = rooms::require_room(txn, &room_id).await?;
            let session = sessions::find_by_room(txn, &room_id).await?;
            Ok((room, session))
        })
    })
    .await?;

    assert_eq!(room.status, RoomStatus::Playing);
    assert_eq!(room.player2_id, bob);

    let session = session.expect("session created on join");
    assert_eq!(session.state.current_turn, 1);
    assert_eq!(session.state.placed_tiles.len(), 1);
    assert_eq!(session.state.tiles_remaining(), 35);
    assert!(session.state.current_tile_p1.is_some());
    assert!(session.state.current_tile_p2.is_some());
    assert_eq!(
        (session.state.player1_score, session.state.player2_score),
        (0, 0)
    );
    Ok(())
}

#[tokio::test]
async fn player_is_not_matched_with_their_own_room() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;

    let first = quick_match(&state, alice).await?;
    let second = quick_match(&state, alice).await?;

    assert_eq!(second.player_number, 1);
    assert_ne!(first.room_id, second.room_id);
    Ok(())
}

#[tokio::test]
async fn oldest_waiting_room_is_joined_first() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;
    let bob = create_test_user(&state, "bob").await?;
    let carol = create_test_user(&state, "carol").await?;

    let older = quick_match(&state, alice).await?;
    let newer = quick_match(&state, bob).await?;
    // bob joined alice's room instead of opening one
    assert_eq!(newer.room_id, older.room_id);

    let third = quick_match(&state, carol).await?;
    assert_eq!(third.player_number, 1);
    assert_ne!(third.room_id, older.room_id);
    Ok(())
}

// The in-memory test pool holds a single connection, so the two transactions
// below run one after the other. Interleaved claims on one snapshot are
// covered by the `claim_or_open` tests that follow.
#[tokio::test]
async fn racing_joiners_never_share_seat_two() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;
    let bob = create_test_user(&state, "bob").await?;
    let carol = create_test_user(&state, "carol").await?;

    let opened = quick_match(&state, alice).await?;

    let (b, c) = tokio::join!(quick_match(&state, bob), quick_match(&state, carol));
    let (b, c) = (b?, c?);

    let joined: Vec<_> = [&b, &c]
        .into_iter()
        .filter(|o| o.room_id == opened.room_id)
        .collect();
    assert_eq!(joined.len(), 1, "exactly one joiner takes the room");
    assert_eq!(joined[0].player_number, 2);

    let loser = if b.room_id == opened.room_id { &c } else { &b };
    assert_eq!(loser.player_number, 1);
    Ok(())
}

#[tokio::test]
async fn loser_of_a_stale_claim_opens_its_own_room() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;
    let bob = create_test_user(&state, "bob").await?;
    let carol = create_test_user(&state, "carol").await?;
    let opened = quick_match(&state, alice).await?;

    let (won, lost) = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = MatchmakingService::new();
            // Both joiners read the waiting room before either claims it
            let bob_view = rooms::waiting_rooms_for(txn, bob, 10).await?;
            let carol_view = rooms::waiting_rooms_for(txn, carol, 10).await?;
            assert_eq!(bob_view, carol_view);

            let won = service.claim_or_open(txn, bob, bob_view).await?;
            let lost = service.claim_or_open(txn, carol, carol_view).await?;
            Ok((won, lost))
        })
    })
    .await?;

    assert_eq!(won.room_id, opened.room_id);
    assert_eq!(won.player_number, 2);
    assert_eq!(won.opponent_id, Some(alice));

    assert_ne!(lost.room_id, opened.room_id);
    assert_eq!(lost.player_number, 1);
    assert_eq!(lost.opponent_id, None);

    let lost_room = lost.room_id.clone();
    let room = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(rooms::require_room(txn, &lost_room).await?) })
    })
    .await?;
    assert_eq!(room.status, RoomStatus::Waiting);
    assert_eq!(room.player1_id, carol);
    Ok(())
}

#[tokio::test]
async fn stale_candidate_is_skipped_for_the_next_one() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_test_user(&state, "alice").await?;
    let dave = create_test_user(&state, "dave").await?;
    let bob = create_test_user(&state, "bob").await?;
    let carol = create_test_user(&state, "carol").await?;
    let first = quick_match(&state, alice).await?;
    let second = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = MatchmakingService::new();
            service.claim_or_open(txn, dave, Vec::new()).await
        })
    })
    .await?;
    assert_eq!(second.player_number, 1);

    let (snapshot, taken, joined) = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = MatchmakingService::new();
            let snapshot = rooms::waiting_rooms_for(txn, carol, 10).await?;

            // Bob claims the head of Carol's snapshot before she does
            let taken = service.quick_match(txn, Some(bob)).await?;
            let joined = service.claim_or_open(txn, carol, snapshot.clone()).await?;
            Ok((snapshot, taken, joined))
        })
    })
    .await?;

    let ids: Vec<_> = snapshot.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.room_id) && ids.contains(&second.room_id));

    assert_eq!(taken.room_id, ids[0]);
    assert_eq!(joined.room_id, ids[1]);
    assert_eq!(joined.player_number, 2);
    assert_eq!(joined.opponent_id, Some(snapshot[1].player1_id));
    Ok(())
}

#[tokio::test]
async fn missing_player_id_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = with_txn(&state, |txn| {
        Box::pin(async move { MatchmakingService::new().quick_match(txn, None).await })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::MissingPlayerId);
    assert_eq!(err.status().as_u16(), 400);
    Ok(())
}

#[tokio::test]
async fn unknown_player_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = quick_match(&state, 999_999).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::PlayerNotFound);
    assert_eq!(err.status().as_u16(), 404);

    let rooms = with_txn(&state, |txn| Box::pin(async move { Ok(rooms::list_all(txn).await?) }))
        .await?;
    assert!(rooms.is_empty(), "failed match leaves no room behind");
    Ok(())
}
