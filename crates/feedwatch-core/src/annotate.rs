//! Result image: the analysed photo with its region outlined, under a
//! status panel holding a level bar with the level percentage written on it.

use image::{Rgb, RgbImage};

use crate::consts::{OVERLAY_OUTLINE_THICKNESS, OVERLAY_PANEL_HEIGHT};
use crate::frame::{Frame, Region};
use crate::io::image_io::frame_to_rgb;
use crate::level::LevelReading;

const PANEL_BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const BAR_BACKGROUND: Rgb<u8> = Rgb([80, 80, 80]);
const BAR_BORDER: Rgb<u8> = Rgb([255, 255, 255]);
const REGION_OUTLINE: Rgb<u8> = Rgb([255, 255, 0]);
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

/// 3x5 bitmap rows, most significant of the three bits on the left.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        _ => return None,
    };
    Some(rows)
}

/// Draw the overlay for one reading.
pub fn render_overlay(frame: &Frame, region: &Region, reading: &LevelReading) -> RgbImage {
    let photo = frame_to_rgb(frame);
    let (w, h) = photo.dimensions();
    let mut out = RgbImage::from_pixel(w, h + OVERLAY_PANEL_HEIGHT, PANEL_BACKGROUND);

    for (x, y, px) in photo.enumerate_pixels() {
        out.put_pixel(x, y + OVERLAY_PANEL_HEIGHT, *px);
    }

    outline(
        &mut out,
        region.x,
        region.y + OVERLAY_PANEL_HEIGHT,
        region.width,
        region.height,
        REGION_OUTLINE,
    );

    let status_color = Rgb(reading.status.color());
    let margin = 10.min(w / 10);
    let bar_width = w.saturating_sub(2 * margin);
    let bar_height = OVERLAY_PANEL_HEIGHT / 2;
    let bar_y = (OVERLAY_PANEL_HEIGHT - bar_height) / 2;
    let filled = (bar_width as f64 * reading.level / 100.0).round() as u32;

    fill_rect(&mut out, margin, bar_y, bar_width, bar_height, BAR_BACKGROUND);
    fill_rect(&mut out, margin, bar_y, filled, bar_height, status_color);
    outline(&mut out, margin, bar_y, bar_width, bar_height, BAR_BORDER);

    let text = format!("{:.0}%", reading.level);
    let scale = (bar_height * 2 / 3 / GLYPH_HEIGHT).max(1);
    let text_width = text_width(&text, scale);
    let text_x = margin + bar_width.saturating_sub(text_width) / 2;
    let text_y = bar_y + bar_height.saturating_sub(GLYPH_HEIGHT * scale) / 2;
    draw_text(&mut out, &text, text_x, text_y, scale, TEXT_COLOR);

    out
}

fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    (n * (GLYPH_WIDTH + 1)).saturating_sub(1) * scale
}

/// Block-scaled bitmap text; characters without a glyph are skipped.
fn draw_text(img: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let advance = (GLYPH_WIDTH + 1) * scale;
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let gx = x + i as u32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    fill_rect(
                        img,
                        gx + col * scale,
                        y + row as u32 * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(img.width());
    let y_end = (y + height).min(img.height());
    for row in y..y_end {
        for col in x..x_end {
            img.put_pixel(col, row, color);
        }
    }
}

fn outline(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let t = OVERLAY_OUTLINE_THICKNESS.min(width / 2).min(height / 2).max(1);
    fill_rect(img, x, y, width, t, color);
    fill_rect(img, x, (y + height).saturating_sub(t), width, t, color);
    fill_rect(img, x, y, t, height, color);
    fill_rect(img, (x + width).saturating_sub(t), y, t, height, color);
}
