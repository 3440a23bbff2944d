use super::*;

fn snapshot() -> DebugSnapshot {
    DebugSnapshot {
        poll_active: true,
        countdown: 12,
        surface_position: Some(Point::new(5.0, 7.5)),
        cell_size: 10,
        cell_position: Some(CellPosition { col: 1, row: 2 }),
    }
}

#[test]
fn poll_status_text() {
    assert_eq!(snapshot().poll_status(), "Active");
    let idle = DebugSnapshot { poll_active: false, ..snapshot() };
    assert_eq!(idle.poll_status(), "Inactive");
}

#[test]
fn cursor_and_cell_text() {
    let s = snapshot();
    assert_eq!(s.cursor_text(), "x: 5, y: 7.5");
    assert_eq!(s.cell_size_text(), "10x10");
    assert_eq!(s.cell_text(), "x: 1, y: 2");
}

#[test]
fn unknown_positions_render_placeholders() {
    let s = DebugSnapshot { surface_position: None, cell_position: None, ..snapshot() };
    assert_eq!(s.cursor_text(), "x: -, y: -");
    assert_eq!(s.cell_text(), "x: -, y: -");
}

#[test]
fn snapshot_serializes_for_the_host() {
    let json = serde_json::to_value(snapshot()).unwrap();
    assert_eq!(json["poll_active"], true);
    assert_eq!(json["countdown"], 12);
    assert_eq!(json["surface_position"]["x"], 5.0);
    assert_eq!(json["cell_size"], 10);
    assert_eq!(json["cell_position"]["row"], 2);
}
