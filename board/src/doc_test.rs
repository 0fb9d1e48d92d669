#![allow(clippy::float_cmp)]

use super::*;

fn make_stroke(ts: i64) -> Stroke {
    Stroke {
        color: "#112233".to_owned(),
        size: 4,
        points: vec![Point::new(10.0, 10.0), Point::new(20.0, 15.0)],
        timestamp: ts,
    }
}

fn doc_with_strokes(n: i64) -> BoardDoc {
    let mut doc = BoardDoc::from_board(Board {
        id: "b-1".to_owned(),
        strokes: Vec::new(),
    });
    for ts in 0..n {
        doc.push_stroke(make_stroke(ts));
    }
    doc
}

// =============================================================
// Board serde
// =============================================================

#[test]
fn board_round_trips_through_json() {
    let board = Board {
        id: "b-42".to_owned(),
        strokes: vec![make_stroke(7)],
    };
    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}

#[test]
fn board_strokes_default_to_empty_when_absent() {
    let board: Board = serde_json::from_str(r#"{"id":"b-9"}"#).unwrap();
    assert_eq!(board.id, "b-9");
    assert!(board.strokes.is_empty());
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn undo_moves_strokes_to_redo_stack() {
    let mut doc = doc_with_strokes(5);
    for _ in 0..3 {
        assert!(doc.undo());
    }
    assert_eq!(doc.stroke_count(), 2);
    assert_eq!(doc.redo_len(), 3);
}

#[test]
fn undo_on_empty_board_is_a_no_op() {
    let mut doc = doc_with_strokes(0);
    assert!(!doc.undo());
    assert_eq!(doc.redo_len(), 0);
}

#[test]
fn redo_restores_the_exact_popped_stroke() {
    let mut doc = doc_with_strokes(2);
    let last = doc.board().strokes.last().cloned().unwrap();
    doc.undo();
    assert!(doc.redo());
    assert_eq!(doc.board().strokes.last(), Some(&last));
    assert_eq!(doc.redo_len(), 0);
}

#[test]
fn redo_on_empty_stack_is_a_no_op() {
    let mut doc = doc_with_strokes(1);
    assert!(!doc.redo());
    assert_eq!(doc.stroke_count(), 1);
}

#[test]
fn new_stroke_after_undo_leaves_redo_stack_in_place() {
    // Observed behavior of the original page; pinned on purpose.
    let mut doc = doc_with_strokes(2);
    doc.undo();
    doc.push_stroke(make_stroke(99));
    assert_eq!(doc.redo_len(), 1);
    assert_eq!(doc.stroke_count(), 2);
}

// =============================================================
// Erase
// =============================================================

#[test]
fn erase_removes_strokes_within_tolerance_only() {
    let mut doc = doc_with_strokes(0);
    doc.push_stroke(Stroke {
        color: "#000".to_owned(),
        size: 2,
        points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        timestamp: 1,
    });
    doc.push_stroke(Stroke {
        color: "#000".to_owned(),
        size: 2,
        points: vec![Point::new(500.0, 500.0)],
        timestamp: 2,
    });

    let removed = doc.erase_at(Point::new(101.0, 0.0), 3.0);
    assert_eq!(removed, 1);
    assert_eq!(doc.stroke_count(), 1);
    assert_eq!(doc.board().strokes[0].points[0].x, 500.0);
}

#[test]
fn erase_with_no_match_removes_nothing() {
    let mut doc = doc_with_strokes(3);
    let removed = doc.erase_at(Point::new(900.0, 900.0), 6.0);
    assert_eq!(removed, 0);
    assert_eq!(doc.stroke_count(), 3);
}

// =============================================================
// Clear / replace
// =============================================================

#[test]
fn clear_empties_strokes_but_not_the_redo_stack() {
    let mut doc = doc_with_strokes(3);
    doc.undo();
    doc.clear();
    assert!(doc.is_empty());
    assert_eq!(doc.redo_len(), 1);
}

#[test]
fn replace_overwrites_the_whole_board() {
    let mut doc = doc_with_strokes(4);
    let incoming = Board {
        id: "b-remote".to_owned(),
        strokes: vec![make_stroke(50)],
    };
    doc.replace(incoming.clone());
    assert_eq!(doc.board(), &incoming);
    assert_eq!(doc.board_id(), "b-remote");
}
