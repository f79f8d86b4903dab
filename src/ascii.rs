use contour_map::Map;

/// Whole grid as text: `#` filled, `.` empty, top row first.
pub fn render(map: &Map) -> String {
    let n = map.total_cells() as i32;
    let mut out = String::with_capacity((n as usize + 1) * n as usize);
    for gy in (0..n).rev() {
        for gx in 0..n {
            out.push(if map.state_at(gx, gy) == Some(true) {
                '#'
            } else {
                '.'
            });
        }
        out.push('\n');
    }
    out
}
