use lopdf::content::Operation;
use lopdf::Object;

use super::pdf::encode_text;
use super::profile::Rgb;

/// The eight unit-offset directions of the simulated stroke.
///
/// Corner offsets are not distance-normalized (a diagonal sits √2 × offset
/// away); the slightly heavier diagonals are part of the intended look, not
/// a bug. The target surface has no per-glyph stroking, so the halo is
/// produced by redrawing the run at each of these offsets.
pub const OUTLINE_DIRECTIONS: [(f32, f32); 8] = [
    (-1.0, 0.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (-1.0, -1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (1.0, 1.0),
];

/// Emit one text run at an absolute baseline position in a flat color.
pub fn draw_text(
    ops: &mut Vec<Operation>,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    font_res: &str,
    color: Rgb,
) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font_res.into(), size.into()]));
    ops.push(Operation::new(
        "rg",
        vec![color.r.into(), color.g.into(), color.b.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_text(text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Paint `text` with a simulated outline.
///
/// Eight draws in `outline` at the scaled unit offsets, then exactly one
/// draw in `fill` at the true position. The fill is always last, so it sits
/// fully opaque on top of the halo.
#[allow(clippy::too_many_arguments)]
pub fn draw_outlined(
    ops: &mut Vec<Operation>,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    font_res: &str,
    fill: Rgb,
    outline: Rgb,
    offset: f32,
) {
    for (dx, dy) in OUTLINE_DIRECTIONS {
        draw_text(
            ops,
            text,
            x + dx * offset,
            y + dy * offset,
            size,
            font_res,
            outline,
        );
    }
    draw_text(ops, text, x, y, size, font_res, fill);
}
