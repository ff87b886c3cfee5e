//! Image preview loading
//!
//! Downloads an image from the static origin, decodes it off the UI thread
//! and prepares a terminal graphics protocol for rendering.

use image::imageops::FilterType;
use image::DynamicImage;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::api::{Image, ImageManagerClient};
use crate::log_debug;
use crate::logic::errors::format_error_message;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewMetadata {
    pub dimensions: (u32, u32),
    pub format: String,
}

/// Largest pixel size worth keeping: ~200x60 cells plus 25% headroom
pub fn max_preview_pixels(font_size: (u16, u16)) -> (u32, u32) {
    (
        200 * font_size.0 as u32 * 5 / 4,
        60 * font_size.1 as u32 * 5 / 4,
    )
}

/// Resize filter by downscale factor: faster filters for larger reductions
pub fn choose_filter(scale_factor: f32) -> FilterType {
    if scale_factor > 4.0 {
        FilterType::Triangle
    } else if scale_factor > 2.0 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

fn color_label(img: &DynamicImage) -> &'static str {
    match img.color() {
        image::ColorType::L8 => "Grayscale 8-bit",
        image::ColorType::La8 => "Grayscale+Alpha 8-bit",
        image::ColorType::Rgb8 => "RGB 8-bit",
        image::ColorType::Rgba8 => "RGBA 8-bit",
        image::ColorType::L16 => "Grayscale 16-bit",
        image::ColorType::La16 => "Grayscale+Alpha 16-bit",
        image::ColorType::Rgb16 => "RGB 16-bit",
        image::ColorType::Rgba16 => "RGBA 16-bit",
        image::ColorType::Rgb32F => "RGB 32-bit float",
        image::ColorType::Rgba32F => "RGBA 32-bit float",
        _ => "Unknown",
    }
}

fn downscale(img: DynamicImage, font_size: (u16, u16)) -> DynamicImage {
    let (max_width, max_height) = max_preview_pixels(font_size);
    if img.width() <= max_width && img.height() <= max_height {
        return img;
    }

    let scale_factor = (img.width() as f32 / max_width as f32)
        .max(img.height() as f32 / max_height as f32);
    let filter = choose_filter(scale_factor);
    log_debug(&format!(
        "Pre-downscaling {}x{} by {:.2}x with {:?}",
        img.width(),
        img.height(),
        scale_factor,
        filter
    ));
    img.resize(max_width, max_height, filter)
}

/// Fetch, decode and prepare an image for display
pub async fn load_image_preview(
    client: ImageManagerClient,
    image: Image,
    picker: Picker,
) -> Result<(StatefulProtocol, PreviewMetadata), String> {
    let load_start = std::time::Instant::now();

    let bytes = client
        .fetch_image_bytes(&image)
        .await
        .map_err(|e| format_error_message(&e))?;

    let font_size = picker.font_size();
    let decoded = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map(|img| {
            let metadata = PreviewMetadata {
                dimensions: (img.width(), img.height()),
                format: color_label(&img).to_string(),
            };
            (downscale(img, font_size), metadata)
        })
    })
    .await;

    let (img, metadata) = match decoded {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => return Err(format!("Load error: {}", e)),
        Err(e) => return Err(format!("Task error: {}", e)),
    };

    let protocol = picker.new_resize_protocol(img);
    log_debug(&format!(
        "Image preview for {} ready in {:.2}s",
        image.id,
        load_start.elapsed().as_secs_f32()
    ));

    Ok((protocol, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_preview_pixels() {
        assert_eq!(max_preview_pixels((8, 16)), (2000, 1200));
    }

    #[test]
    fn test_choose_filter() {
        assert_eq!(choose_filter(1.5), FilterType::Lanczos3);
        assert_eq!(choose_filter(3.0), FilterType::CatmullRom);
        assert_eq!(choose_filter(8.0), FilterType::Triangle);
    }

    #[test]
    fn test_downscale_keeps_small_images() {
        let img = DynamicImage::new_rgb8(100, 50);
        let out = downscale(img, (8, 16));
        assert_eq!((out.width(), out.height()), (100, 50));
    }

    #[test]
    fn test_downscale_fits_bounds() {
        let img = DynamicImage::new_rgb8(4000, 1000);
        let out = downscale(img, (8, 16));
        assert!(out.width() <= 2000 && out.height() <= 1200);
        assert_eq!(out.width(), 2000);
    }
}
