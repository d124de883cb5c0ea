use pixel_canvas::input::{InputEvent, KeyCommand, Phase, PointerButtons};
use pixel_canvas::{Color, Coord, EditorConfig, EditorSession, Effect, ToolKind};

fn session_with_background(background: Color) -> EditorSession {
    let config = EditorConfig { default_grid_size: 5, background, ..EditorConfig::default() };
    EditorSession::with_seed(config, 3).unwrap()
}

fn mouse(phase: Phase, coord: (usize, usize), buttons: PointerButtons) -> InputEvent {
    InputEvent::mouse(phase, Some(coord.into()), buttons)
}

#[test]
fn drag_paints_each_cell_under_one_undo_point() {
    let mut session = session_with_background(Color::WHITE);

    session.handle(mouse(Phase::Begin, (0, 0), PointerButtons::PRIMARY));
    session.handle(mouse(Phase::Move, (0, 1), PointerButtons::PRIMARY));
    session.handle(mouse(Phase::Move, (1, 1), PointerButtons::PRIMARY));
    session.handle(InputEvent::mouse(Phase::Move, None, PointerButtons::PRIMARY));
    session.handle(mouse(Phase::End, (1, 1), PointerButtons::NONE));

    for cell in [Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)] {
        assert_eq!(session.cell(cell), Ok(Color::BLACK));
    }
    assert_eq!(session.undo_steps(), 1);
    assert!(!session.is_drawing());

    session.undo();
    assert!(session.grid().cells().all(|(_, color)| color == Color::WHITE));
}

#[test]
fn moves_after_release_do_not_paint() {
    let mut session = session_with_background(Color::WHITE);
    session.handle(mouse(Phase::Begin, (0, 0), PointerButtons::PRIMARY));
    session.handle(mouse(Phase::End, (0, 0), PointerButtons::NONE));

    let effects = session.handle(mouse(Phase::Move, (3, 3), PointerButtons::PRIMARY));
    assert!(effects.is_empty());
    assert_eq!(session.cell(Coord::new(3, 3)), Ok(Color::WHITE));
}

#[test]
fn concurrent_touches_are_independent_gestures() {
    let mut session = session_with_background(Color::WHITE);

    session.handle(InputEvent::touch(1, Phase::Begin, Some(Coord::new(0, 0))));
    session.handle(InputEvent::touch(2, Phase::Begin, Some(Coord::new(4, 4))));
    assert_eq!(session.undo_steps(), 2);

    session.handle(InputEvent::touch(1, Phase::Move, Some(Coord::new(0, 1))));
    session.handle(InputEvent::touch(1, Phase::End, None));
    assert!(session.is_drawing());

    session.handle(InputEvent::touch(2, Phase::Move, Some(Coord::new(4, 3))));
    session.handle(InputEvent::touch(2, Phase::End, None));
    assert!(!session.is_drawing());

    for cell in [Coord::new(0, 0), Coord::new(0, 1), Coord::new(4, 4), Coord::new(4, 3)] {
        assert_eq!(session.cell(cell), Ok(Color::BLACK));
    }
}

#[test]
fn clearing_ends_open_touches() {
    let mut session = session_with_background(Color::WHITE);

    session.handle(InputEvent::touch(1, Phase::Begin, Some(Coord::new(0, 0))));
    session.handle(InputEvent::touch(2, Phase::Begin, Some(Coord::new(4, 4))));
    session.clear_grid();
    assert!(!session.is_drawing());

    let effects = session.handle(InputEvent::touch(1, Phase::Move, Some(Coord::new(0, 1))));
    assert!(effects.is_empty());
    assert_eq!(session.cell(Coord::new(0, 1)), Ok(Color::WHITE));
    assert_eq!(session.undo_steps(), 0);
}

#[test]
fn secondary_button_erases_or_darkens() {
    let gray = Color::rgb(128, 128, 128);
    let mut session = session_with_background(gray);
    session.set_primary_color(Color::rgb(255, 0, 0));

    session.handle(mouse(Phase::Begin, (2, 2), PointerButtons::PRIMARY));
    session.handle(mouse(Phase::End, (2, 2), PointerButtons::NONE));
    session.handle(mouse(Phase::Begin, (2, 2), PointerButtons::SECONDARY));
    assert_eq!(session.cell(Coord::new(2, 2)), Ok(gray));
    session.handle(mouse(Phase::End, (2, 2), PointerButtons::NONE));

    session.select_tool(ToolKind::Lighten);
    session.handle(mouse(Phase::Begin, (1, 1), PointerButtons::SECONDARY));
    let shade = session.cell(Coord::new(1, 1)).unwrap();
    assert!(shade.to_hsl().l < gray.to_hsl().l);
    assert_eq!(session.tool(), ToolKind::Lighten);
}

#[test]
fn middle_button_picks_and_switches_to_pencil() {
    let mut session = session_with_background(Color::WHITE);
    let green = Color::rgb(0, 160, 0);
    session.set_primary_color(green);
    session.handle(mouse(Phase::Begin, (3, 0), PointerButtons::PRIMARY));
    session.handle(mouse(Phase::End, (3, 0), PointerButtons::NONE));

    session.set_primary_color(Color::BLACK);
    session.select_tool(ToolKind::Rainbow);
    let effects = session.handle(mouse(Phase::Begin, (3, 0), PointerButtons::MIDDLE));

    assert!(effects.contains(&Effect::PrimaryColorChanged(green)));
    assert!(effects.contains(&Effect::ToolChanged(ToolKind::Pencil)));
    assert_eq!(session.primary_color(), green);
    assert_eq!(session.cell(Coord::new(3, 0)), Ok(green));
}

#[test]
fn chorded_buttons_do_nothing() {
    let mut session = session_with_background(Color::WHITE);
    let chord = PointerButtons { primary: true, secondary: true, middle: false };
    session.handle(mouse(Phase::Begin, (1, 1), chord));
    assert_eq!(session.cell(Coord::new(1, 1)), Ok(Color::WHITE));
}

#[test]
fn keyboard_commands_drive_the_session() {
    let mut session = session_with_background(Color::WHITE);

    let effects = session.execute_key(KeyCommand::SelectTool(ToolKind::Eraser));
    assert_eq!(effects, vec![Effect::ToolChanged(ToolKind::Eraser)]);
    session.execute_key(KeyCommand::SelectTool(ToolKind::Pencil));

    session.handle(mouse(Phase::Begin, (0, 4), PointerButtons::PRIMARY));
    session.handle(mouse(Phase::End, (0, 4), PointerButtons::NONE));

    let effects = session.execute_key(KeyCommand::Undo);
    let erased = Effect::SetCellDisplay { coord: Coord::new(0, 4), color: Color::WHITE };
    assert!(effects.contains(&erased));
    assert!(effects.contains(&Effect::HistoryChanged { undo_steps: 0, redo_steps: 1 }));

    session.execute_key(KeyCommand::Redo);
    assert_eq!(session.cell(Coord::new(0, 4)), Ok(Color::BLACK));
}
