/// Map a pointer position in display pixels to a grid cell.
///
/// Display space has its origin at the top-left, grid space at the
/// bottom-left, so the vertical axis is flipped. Integer pointer
/// coordinates name whole pixels and are sampled at the pixel centre,
/// which keeps every on-screen pixel inside the grid. The result is
/// floored, not rounded, and may lie outside the grid for pointers
/// outside the display.
pub fn screen_to_grid(
    pointer: (f32, f32),
    display: (f32, f32),
    grid: (usize, usize),
) -> (i32, i32) {
    let (px, py) = (pointer.0 as f64 + 0.5, pointer.1 as f64 + 0.5);
    let (w, h) = (display.0 as f64, display.1 as f64);
    let (gx, gy) = (grid.0 as f64, grid.1 as f64);

    let grid_x = (px / w * gx).floor() as i32;
    let grid_y = ((1.0 - py / h) * gy).floor() as i32;
    (grid_x, grid_y)
}
