use std::collections::HashMap;

use egui::{Context, Event, LayerId, PointerButton, Pos2, Rect, TouchPhase};

use crate::grid::Coord;
use crate::renderer::CanvasView;

use super::{InputEvent, KeyCommand, Phase, PointerButtons, PointerId};

/// Converts raw egui input into [`InputEvent`]s for the session.
///
/// Hit-testing happens here so the session only ever sees grid coordinates.
/// Mouse events are suppressed while touches are active, since egui also
/// reports the primary touch as a simulated pointer.
#[derive(Debug, Default)]
pub struct InputRouter {
    mouse_down: bool,
    last_mouse_cell: Option<Coord>,
    /// Open touches and the last cell each one reported
    touches: HashMap<u64, Option<Coord>>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the pointer events of this frame that concern the canvas in `rect`.
    ///
    /// `canvas_layer` is the layer the canvas is painted on. Presses that land
    /// on a window or popup above it do not start a gesture.
    pub fn collect(
        &mut self,
        ctx: &Context,
        view: &CanvasView,
        rect: Rect,
        canvas_layer: LayerId,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let reaches_canvas =
            |pos: Pos2| ctx.layer_id_at(pos).is_none_or(|layer| layer == canvas_layer);

        let touches: Vec<(u64, TouchPhase, Pos2)> = ctx.input(|input| {
            input
                .raw
                .events
                .iter()
                .filter_map(|event| match event {
                    Event::Touch { id, phase, pos, .. } => Some((id.0, *phase, *pos)),
                    _ => None,
                })
                .collect()
        });
        let saw_touch = !touches.is_empty();
        for (id, phase, pos) in touches {
            let coord = view.hit_test(rect, pos);
            if phase == TouchPhase::Start && !reaches_canvas(pos) {
                continue;
            }
            self.route_touch(id, phase, coord, &mut events);
        }
        if saw_touch || !self.touches.is_empty() {
            return events;
        }

        let (buttons, pos, any_pressed, any_down) = ctx.input(|input| {
            let pointer = &input.pointer;
            let held = |button| pointer.button_down(button) || pointer.button_pressed(button);
            let buttons = PointerButtons {
                primary: held(PointerButton::Primary),
                secondary: held(PointerButton::Secondary),
                middle: held(PointerButton::Middle),
            };
            let pos = pointer.interact_pos().or_else(|| pointer.hover_pos());
            (buttons, pos, pointer.any_pressed(), pointer.any_down())
        });
        let coord = pos.and_then(|pos| view.hit_test(rect, pos));

        if !self.mouse_down && any_pressed && coord.is_some() {
            if pos.is_some_and(reaches_canvas) {
                self.mouse_down = true;
                self.last_mouse_cell = coord;
                events.push(InputEvent::mouse(Phase::Begin, coord, buttons));
            }
        } else if self.mouse_down && coord != self.last_mouse_cell {
            self.last_mouse_cell = coord;
            events.push(InputEvent::mouse(Phase::Move, coord, buttons));
        }

        if self.mouse_down && !any_down {
            self.mouse_down = false;
            self.last_mouse_cell = None;
            events.push(InputEvent::mouse(Phase::End, coord, PointerButtons::NONE));
        }

        events
    }

    fn route_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        coord: Option<Coord>,
        events: &mut Vec<InputEvent>,
    ) {
        let pointer = touch_pointer(id);
        match phase {
            TouchPhase::Start => {
                // Touches that start off the canvas are not tracked
                if coord.is_some() {
                    self.touches.insert(id, coord);
                    events.push(InputEvent::touch(pointer, Phase::Begin, coord));
                }
            }
            TouchPhase::Move => {
                if let Some(last) = self.touches.get_mut(&id) {
                    if *last != coord {
                        *last = coord;
                        events.push(InputEvent::touch(pointer, Phase::Move, coord));
                    }
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if self.touches.remove(&id).is_some() {
                    events.push(InputEvent::touch(pointer, Phase::End, coord));
                }
            }
        }
    }

    /// Keyboard shortcuts pressed this frame, unless a text field has focus.
    pub fn key_commands(&self, ctx: &Context) -> Vec<KeyCommand> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input(|input| {
            input
                .raw
                .events
                .iter()
                .filter_map(|event| match event {
                    Event::Key { key, pressed: true, modifiers, .. } => {
                        let mut chars = key.name().chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => {
                                KeyCommand::from_key(c, modifiers.command, modifiers.shift)
                            }
                            _ => None,
                        }
                    }
                    _ => None,
                })
                .collect()
        })
    }

    pub fn is_drawing(&self) -> bool {
        self.mouse_down || !self.touches.is_empty()
    }
}

/// Touch ids are shifted so they never collide with the mouse pointer.
fn touch_pointer(id: u64) -> PointerId {
    id.wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::grid::Grid;
    use crate::input::Device;

    fn router_with_view() -> (InputRouter, CanvasView) {
        (InputRouter::new(), CanvasView::new(&Grid::new(4, Color::WHITE).unwrap()))
    }

    #[test]
    fn touches_track_their_own_cells() {
        let (mut router, _) = router_with_view();
        let mut events = Vec::new();

        router.route_touch(3, TouchPhase::Start, Some(Coord::new(0, 0)), &mut events);
        router.route_touch(4, TouchPhase::Start, Some(Coord::new(2, 2)), &mut events);
        router.route_touch(3, TouchPhase::Move, Some(Coord::new(0, 0)), &mut events);
        router.route_touch(3, TouchPhase::Move, Some(Coord::new(0, 1)), &mut events);
        router.route_touch(4, TouchPhase::Cancel, None, &mut events);

        let phases: Vec<_> = events.iter().map(|e| (e.pointer, e.phase)).collect();
        assert_eq!(
            phases,
            vec![(4, Phase::Begin), (5, Phase::Begin), (4, Phase::Move), (5, Phase::End)]
        );
        assert!(events.iter().all(|e| e.device == Device::Touch));
        assert!(router.is_drawing());
    }

    #[test]
    fn touches_starting_off_canvas_are_ignored() {
        let (mut router, _) = router_with_view();
        let mut events = Vec::new();

        router.route_touch(1, TouchPhase::Start, None, &mut events);
        router.route_touch(1, TouchPhase::Move, Some(Coord::new(1, 1)), &mut events);
        router.route_touch(1, TouchPhase::End, Some(Coord::new(1, 1)), &mut events);

        assert!(events.is_empty());
        assert!(!router.is_drawing());
    }

    #[test]
    fn no_events_without_input() {
        let (mut router, view) = router_with_view();
        let ctx = Context::default();
        let rect = Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(40.0, 40.0));
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert!(router.collect(ctx, &view, rect, LayerId::background()).is_empty());
            assert!(router.key_commands(ctx).is_empty());
        });
    }

    fn press_at(pos: Pos2) -> egui::RawInput {
        egui::RawInput {
            events: vec![Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                modifiers: Default::default(),
            }],
            ..Default::default()
        }
    }

    fn hover_at(pos: Pos2) -> egui::RawInput {
        egui::RawInput { events: vec![Event::PointerMoved(pos)], ..Default::default() }
    }

    /// Presses at `pos` on a 100x100 canvas, optionally with a popup covering it.
    fn press_events(pos: Pos2, with_popup: bool) -> Vec<InputEvent> {
        let (mut router, view) = router_with_view();
        let ctx = Context::default();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let popup = |ctx: &Context| {
            if with_popup {
                egui::Area::new(egui::Id::new("color_popup"))
                    .order(egui::Order::Foreground)
                    .fixed_pos(Pos2::ZERO)
                    .show(ctx, |ui| {
                        ui.allocate_exact_size(egui::vec2(100.0, 100.0), egui::Sense::click());
                    });
            }
        };

        let _ = ctx.run(hover_at(pos), |ctx| popup(ctx));
        let mut events = Vec::new();
        let _ = ctx.run(press_at(pos), |ctx| {
            popup(ctx);
            events = router.collect(ctx, &view, rect, LayerId::background());
        });
        events
    }

    #[test]
    fn press_on_canvas_begins_a_gesture() {
        let events = press_events(egui::pos2(50.0, 50.0), false);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, Phase::Begin);
        assert_eq!(events[0].coord, Some(Coord::new(2, 2)));
    }

    #[test]
    fn press_on_popup_over_canvas_is_ignored() {
        assert!(press_events(egui::pos2(50.0, 50.0), true).is_empty());
    }
}
