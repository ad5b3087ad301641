use macroquad::prelude::*;

use crate::application::Simulation;
use crate::domain::EditKind;
use crate::graphics::GraphicsBackend;

/// Edit selected by a pointer button: left paints, right erases
pub fn edit_kind_for(button: MouseButton) -> Option<EditKind> {
    match button {
        MouseButton::Left => Some(EditKind::Paint),
        MouseButton::Right => Some(EditKind::Erase),
        _ => None,
    }
}

/// Buttons pressed this frame that map to an edit
fn pressed_edits() -> impl Iterator<Item = EditKind> {
    [MouseButton::Left, MouseButton::Right]
        .into_iter()
        .filter(|button| is_mouse_button_pressed(*button))
        .filter_map(edit_kind_for)
}

/// Queue one edit per pointer press this frame
pub fn queue_pointer_edits<B: GraphicsBackend>(sim: &mut Simulation<B>, display: (f32, f32)) {
    let pointer = mouse_position();
    for kind in pressed_edits() {
        sim.press(pointer, kind, display);
    }
}

/// Escape closes the window
pub fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape)
}

/// Tab toggles the statistics overlay
pub fn overlay_toggled() -> bool {
    is_key_pressed(KeyCode::Tab)
}
