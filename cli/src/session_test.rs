use super::*;

use board::doc::{Board, Point, Stroke};

fn session() -> Session {
    let mut engine = EngineCore::new("Calm Fox".to_owned(), 800.0, 600.0);
    engine.load_board(Board {
        id: "b1".to_owned(),
        strokes: Vec::new(),
    });
    Session {
        engine,
        api: ApiClient::new("http://localhost:3000"),
        gate: ThrottleDebounce::new(Duration::from_millis(50)),
        channel: frames::board_channel("b1"),
        status: ConnectionStatus::Disconnected,
        emit_scenes: false,
    }
}

// =============================================================================
// Username generation
// =============================================================================

#[test]
fn generated_username_is_adjective_space_animal() {
    for _ in 0..20 {
        let name = generate_username();
        let mut parts = name.split(' ');
        let adjective = parts.next().unwrap();
        let animal = parts.next().unwrap();
        assert!(parts.next().is_none());
        assert!(ADJECTIVES.contains(&adjective), "unexpected adjective {adjective}");
        assert!(ANIMALS.contains(&animal), "unexpected animal {animal}");
    }
}

// =============================================================================
// Frame handling
// =============================================================================

#[test]
fn cursor_frame_updates_the_collaborator_map() {
    let mut session = session();
    let frame = r#"{"messagetype":"cursor","payload":{"username":"Swift Hawk","x":4.0,"y":9.0}}"#;

    session.handle_frame(&Message::Text(frame.into()));

    let cursor = &session.engine.collaborators["Swift Hawk"];
    assert_eq!((cursor.x, cursor.y), (4.0, 9.0));
}

#[test]
fn own_cursor_echo_is_ignored() {
    let mut session = session();
    let frame = r#"{"messagetype":"cursor","payload":{"username":"Calm Fox","x":4.0,"y":9.0}}"#;

    session.handle_frame(&Message::Text(frame.into()));

    assert!(session.engine.collaborators.is_empty());
}

#[test]
fn board_frame_replaces_the_document() {
    let mut session = session();
    session.engine.doc.push_stroke(Stroke {
        color: "#000000".to_owned(),
        size: 5,
        points: vec![Point::new(1.0, 1.0)],
        timestamp: 1,
    });
    let frame = concat!(
        r#"{"messagetype":"board","payload":{"payload":"#,
        r#"{"id":"b1","strokes":[]}}}"#,
    );

    session.handle_frame(&Message::Text(frame.into()));

    assert_eq!(session.engine.doc.stroke_count(), 0);
}

#[test]
fn unknown_and_malformed_frames_change_nothing() {
    let mut session = session();

    session.handle_frame(&Message::Text(
        r#"{"messagetype":"presence","payload":{}}"#.into(),
    ));
    session.handle_frame(&Message::Text("not json".into()));
    session.handle_frame(&Message::Binary(vec![1, 2, 3].into()));

    assert!(session.engine.collaborators.is_empty());
    assert_eq!(session.engine.doc.stroke_count(), 0);
}

// =============================================================================
// Input with the channel down
// =============================================================================

#[tokio::test]
async fn input_is_handled_while_the_channel_is_down() {
    let mut session = session();
    let mut link = Link::Down {
        retry_at: Instant::now() + Duration::from_secs(3600),
    };
    let mut trailing = None;

    // A full pen gesture, including the pointer move that would normally
    // broadcast a cursor frame.
    for line in [
        r#"{"event":"pointerdown","x":1.0,"y":2.0}"#,
        r#"{"event":"pointermove","x":3.0,"y":4.0}"#,
        r#"{"event":"pointerup"}"#,
    ] {
        session.handle_line(line, &mut link, &mut trailing).await;
    }

    assert_eq!(session.engine.doc.stroke_count(), 1);
    assert!(matches!(link, Link::Down { .. }));
}

#[tokio::test]
async fn undo_works_while_the_channel_is_down() {
    let mut session = session();
    let mut link = Link::Down {
        retry_at: Instant::now() + Duration::from_secs(3600),
    };
    let mut trailing = None;

    for line in [
        r#"{"event":"pointerdown","x":1.0,"y":2.0}"#,
        r#"{"event":"pointerup"}"#,
        r#"{"event":"keydown","key":"z","ctrl":true}"#,
    ] {
        session.handle_line(line, &mut link, &mut trailing).await;
    }

    assert_eq!(session.engine.doc.stroke_count(), 0);
    assert_eq!(session.engine.doc.redo_len(), 1);
}

// =============================================================================
// Clock
// =============================================================================

#[test]
fn now_ms_is_a_plausible_unix_timestamp() {
    // 2020-01-01 in milliseconds.
    assert!(now_ms() > 1_577_836_800_000);
}
