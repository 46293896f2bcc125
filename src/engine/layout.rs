use rusttype::Scale;

use super::assets::FontAsset;
use super::profile::Anchor;

/// Width of `text` at `size`, as the sum of glyph advance widths.
///
/// A viewer advances an unkerned text run by exactly these widths, so
/// centering computed from this measure is exact on the rendered page. An
/// empty string measures zero.
pub fn measure(text: &str, font: &FontAsset, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    text.chars()
        .map(|c| font.font().glyph(c).scaled(scale).h_metrics().advance_width)
        .sum()
}

/// Horizontal offset that centers a run of the given width.
pub fn center_x(page_width: f32, width: f32) -> f32 {
    (page_width - width) / 2.0
}

/// Ascent-to-descent height of the face at `size`.
pub fn text_height(font: &FontAsset, size: f32) -> f32 {
    let vm = font.font().v_metrics(Scale::uniform(size));
    vm.ascent - vm.descent
}

/// Resolve a profile anchor to a baseline y.
///
/// Vertical position is a fixed per-field anchor, never auto-centered:
/// certificate layouts tune each line independently.
pub fn anchor_y(anchor: Anchor, page_height: f32, text_height: f32) -> f32 {
    match anchor {
        Anchor::Fraction(f) => page_height * f - text_height / 2.0,
        Anchor::Absolute(y) => y,
    }
}
