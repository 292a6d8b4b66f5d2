use anyhow::{Context, Result};
use chrono::Local;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::config::AppConfig;
use crate::models::{MachineRegistry, SensorReading};
use crate::renderer::colours::Colours;
use crate::renderer::drawing;
use crate::renderer::fonts::FontSet;
use crate::status::{classify, MetricKind, Status};

const COLUMNS: u32 = 2;
const HEADER_HEIGHT: u32 = 36;
const TILE_INSET: u32 = 6;

// Create a dashboard image with one tile per tracked machine
pub fn create_image(
    config: &AppConfig,
    registry: &MachineRegistry,
    fonts: &FontSet,
) -> DynamicImage {
    let width = config.dashboard.width as u32;
    let height = config.dashboard.height as u32;

    // Create a new image
    let mut image = RgbaImage::new(width, height);

    // Fill with black
    for pixel in image.pixels_mut() {
        *pixel = Rgba([0, 0, 0, 255]);
    }

    let colours = Colours::default();

    render_header(&mut image, &colours, fonts, registry, width);
    drawing::horizontal_line(&mut image, 0, HEADER_HEIGHT, width, colours.grid);

    // Machine tiles below the header, two columns like the original layout
    let body_height = height.saturating_sub(HEADER_HEIGHT);
    let rects = tile_rects(width, body_height, registry.len());

    for ((id, reading), (x, y, w, h)) in registry.iter().zip(rects) {
        render_tile(
            &mut image,
            &colours,
            fonts,
            id,
            reading,
            (x, y + HEADER_HEIGHT, w, h),
        );
    }

    DynamicImage::ImageRgba8(image)
}

/// Row-major tile layout: two columns, as many rows as the machine count
/// needs. Returns (x, y, width, height) per tile, relative to the body area.
pub(crate) fn tile_rects(width: u32, height: u32, count: usize) -> Vec<(u32, u32, u32, u32)> {
    if count == 0 {
        return Vec::new();
    }

    let rows = (count as u32 + COLUMNS - 1) / COLUMNS;
    let tile_width = width / COLUMNS;
    let tile_height = height / rows;

    (0..count as u32)
        .map(|i| {
            let col = i % COLUMNS;
            let row = i / COLUMNS;
            (col * tile_width, row * tile_height, tile_width, tile_height)
        })
        .collect()
}

fn render_header(
    image: &mut RgbaImage,
    colours: &Colours,
    fonts: &FontSet,
    registry: &MachineRegistry,
    width: u32,
) {
    let header_text = format!("MACHINE DASHBOARD | {} machines", registry.len());
    drawing::text(image, colours.header, 8, 6, &fonts.title, &header_text);

    // Current time at top right
    let current_time = Local::now().format("%H:%M:%S").to_string();
    drawing::text(
        image,
        colours.header,
        width as i32 - 110,
        8,
        &fonts.regular,
        &current_time,
    );
}

fn render_tile(
    image: &mut RgbaImage,
    colours: &Colours,
    fonts: &FontSet,
    id: &str,
    reading: &SensorReading,
    rect: (u32, u32, u32, u32),
) {
    let (x, y, width, height) = rect;

    let inner_x = (x + TILE_INSET) as i32;
    let inner_y = (y + TILE_INSET) as i32;
    let inner_width = width.saturating_sub(2 * TILE_INSET);
    let inner_height = height.saturating_sub(2 * TILE_INSET);

    // Border picks up the alert colour when any metric is over threshold
    let border_colour = match reading.worst_status() {
        Status::Alert => colours.alert,
        Status::Normal => colours.grid,
    };
    drawing::tile_border(image, inner_x, inner_y, inner_width, inner_height, border_colour);

    // Machine name
    drawing::text(
        image,
        colours.text,
        inner_x + 8,
        inner_y + 6,
        &fonts.title,
        id,
    );

    // One row per metric: label, value and a gauge bar. The bar is
    // normalized against a per-metric display scale, not the threshold.
    let metrics: [(&str, String, f32, f32, Option<MetricKind>); 4] = [
        (
            "TEMP",
            reading.temperature_display(),
            reading.temperature,
            100.0,
            Some(MetricKind::Temperature),
        ),
        (
            "VIB",
            reading.vibration_display(),
            reading.vibration,
            10.0,
            Some(MetricKind::Vibration),
        ),
        (
            "PRESS",
            reading.pressure_display(),
            reading.pressure,
            4.0,
            Some(MetricKind::Pressure),
        ),
        (
            "HUM",
            reading.humidity_display(),
            reading.humidity.unwrap_or(0.0),
            100.0,
            None,
        ),
    ];

    let bar_width = inner_width.saturating_sub(16);
    let bar_height = 10;
    let row_stride = 44;
    let mut y_pos = inner_y + 40;

    for (label, value_display, value, scale, kind) in metrics {
        // Humidity has no threshold and always renders as normal
        let status = kind.map_or(Status::Normal, |kind| classify(value, kind));

        let label_text = format!("{:<5} {}", label, value_display);
        let text_colour = match status {
            Status::Alert => colours.alert,
            Status::Normal => colours.label,
        };
        drawing::text(
            image,
            text_colour,
            inner_x + 8,
            y_pos,
            &fonts.small,
            &label_text,
        );

        drawing::progress_bar(
            image,
            inner_x + 8,
            y_pos + 20,
            bar_width,
            bar_height,
            value / scale,
            colours.status_colour(status),
        );

        y_pos += row_stride;
    }
}

pub fn save_image(config: &AppConfig, image: &DynamicImage) -> Result<()> {
    let target_file = &config.dashboard.file;

    image
        .save(target_file)
        .context(format!("Failed to save dashboard to {}", target_file))?;

    Ok(())
}
