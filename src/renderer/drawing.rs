use crate::renderer::fonts::FontConfig;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut,
};
use imageproc::rect::Rect;

pub fn horizontal_line(image: &mut RgbaImage, x: u32, y: u32, width: u32, colour: Rgba<u8>) {
    draw_line_segment_mut(
        image,
        (x as f32, y as f32),
        ((x + width) as f32, y as f32),
        colour,
    );
}

pub fn text(
    image: &mut RgbaImage,
    colour: Rgba<u8>,
    x: i32,
    y: i32,
    font_config: &FontConfig,
    content: &str,
) {
    draw_text_mut(
        image,
        colour,
        x,
        y,
        font_config.scale,
        &font_config.font,
        content,
    );
}

/// Horizontal gauge bar. The fraction is clamped to 0..=1 so over-threshold
/// readings fill the bar instead of overflowing it.
pub fn progress_bar(
    image: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    fraction: f32,
    colour: Rgba<u8>,
) {
    let bg_colour = Rgba([30, 30, 30, 255]);

    // Background
    draw_filled_rect_mut(image, Rect::at(x, y).of_size(width, height), bg_colour);

    // Fill
    let bar_width = (fraction.clamp(0.0, 1.0) * width as f32) as u32;

    if bar_width > 0 {
        draw_filled_rect_mut(image, Rect::at(x, y).of_size(bar_width, height), colour);
    }

    // Border
    draw_hollow_rect_mut(
        image,
        Rect::at(x, y).of_size(width, height),
        Rgba([100, 100, 100, 255]),
    );
}

/// Hollow rectangle outlining one machine tile.
pub fn tile_border(
    image: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    colour: Rgba<u8>,
) {
    draw_hollow_rect_mut(image, Rect::at(x, y).of_size(width, height), colour);
}
