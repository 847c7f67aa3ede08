use rasterpad::fill::FillError;
use rasterpad::session::DrawingSession;
use rasterpad::surface::Rgba;

const RED: Rgba = Rgba::opaque(255, 0, 0);
const BLUE: Rgba = Rgba::opaque(0, 0, 255);

/// Paint a single pixel with a width-1 freehand dab.
fn dab(session: &mut DrawingSession, point: (i32, i32)) {
    session.pointer_down(point);
    session.pointer_up(point);
}

#[test]
fn paint_fill_undo_redo_walkthrough() {
    // Uncapped so the 15-pixel fill on a 16-pixel canvas is not truncated.
    let mut session = DrawingSession::new(4, 4).with_cap_fraction(1.0);
    session.set_stroke_width(1);
    assert_eq!(session.history_len(), 1);
    assert_eq!(session.history_cursor(), 0);

    // Paint (0,0) red: one committed entry.
    session.set_color(RED);
    dab(&mut session, (0, 0));
    assert_eq!(session.history_len(), 2);
    assert_eq!(session.history_cursor(), 1);
    assert_eq!(session.surface().pixel(0, 0), RED);

    // Fill the transparent remainder with blue: 15 pixels, the red one
    // excluded, all 4-connected around it.
    session.set_color(BLUE);
    let report = session.fill(1, 1).expect("fill in bounds");
    assert_eq!(report.pixels_filled, 15);
    assert!(!report.saturated);
    assert_eq!(session.history_len(), 3);
    assert_eq!(session.history_cursor(), 2);
    assert_eq!(session.surface().pixel(0, 0), RED);
    assert_eq!(session.surface().pixel(3, 3), BLUE);

    // Undo: back to the single red pixel.
    assert!(session.undo());
    assert_eq!(session.history_cursor(), 1);
    assert_eq!(session.surface().pixel(0, 0), RED);
    assert_eq!(session.surface().pixel(1, 1), Rgba::TRANSPARENT);

    // Redo: the blue fill comes back.
    assert!(session.redo());
    assert_eq!(session.history_cursor(), 2);
    assert_eq!(session.surface().pixel(3, 3), BLUE);

    // Filling red with red is a no-op and must not grow the history.
    session.set_color(RED);
    let report = session.fill(0, 0).expect("fill in bounds");
    assert_eq!(report.pixels_filled, 0);
    assert_eq!(session.history_len(), 3);
}

#[test]
fn commit_after_undo_prunes_redo_branch_through_session() {
    let mut session = DrawingSession::new(16, 16);
    session.set_stroke_width(1);
    session.set_color(RED);

    // commit x3
    dab(&mut session, (1, 1));
    dab(&mut session, (3, 3));
    dab(&mut session, (5, 5));
    assert_eq!(session.history_len(), 4);

    // undo x2, then one new commit: 4 - 2 + 1 entries, no redo left.
    assert!(session.undo());
    assert!(session.undo());
    dab(&mut session, (7, 7));
    assert_eq!(session.history_len(), 3);
    assert!(!session.redo());

    // The pruned states are gone from the canvas too.
    assert_eq!(session.surface().pixel(1, 1), RED);
    assert_eq!(session.surface().pixel(3, 3), Rgba::TRANSPARENT);
    assert_eq!(session.surface().pixel(5, 5), Rgba::TRANSPARENT);
    assert_eq!(session.surface().pixel(7, 7), RED);
}

#[test]
fn boundary_undo_redo_never_move_the_cursor() {
    let mut session = DrawingSession::new(8, 8);
    for _ in 0..3 {
        assert!(!session.undo());
        assert!(!session.redo());
        assert_eq!(session.history_cursor(), 0);
    }
    assert!(session.surface().as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn out_of_bounds_fill_is_reported_and_harmless() {
    let mut session = DrawingSession::new(8, 8);
    let before = session.surface().as_bytes().to_vec();

    let err = session.fill(8, 0).unwrap_err();
    assert!(matches!(err, FillError::OutOfBounds { .. }));
    assert_eq!(session.surface().as_bytes(), before.as_slice());
    assert_eq!(session.history_len(), 1);
}

#[test]
fn default_cap_saturates_whole_canvas_fill() {
    let mut session = DrawingSession::new(10, 10);
    session.set_color(BLUE);

    let report = session.fill(5, 5).expect("fill in bounds");
    assert_eq!(report.pixels_filled, 80);
    assert!(report.saturated);
    // Saturated fills still changed pixels, so they commit.
    assert_eq!(session.history_len(), 2);
}
