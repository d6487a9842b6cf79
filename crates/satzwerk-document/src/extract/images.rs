// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image extractor — decodes embedded images to a canonical PNG encoding.

use std::io::Cursor;

use image::ImageFormat;
use satzwerk_core::ExtractedImage;
use tracing::{debug, warn};

use crate::extract::events::{ImagePaint, PaintEvent};

/// Fold a page's event sequence into its extracted images.
///
/// Image-paint events are decoded from whatever container format the source
/// embeds and re-encoded as PNG, preserving encounter order. Faults are
/// isolated per image: empty sample data and undecodable bytes are skipped
/// with a warning, and never abort the remaining images or the page's text
/// chunks.
pub fn collect_images(events: &[PaintEvent]) -> Vec<ExtractedImage> {
    let images: Vec<ExtractedImage> = events
        .iter()
        .filter_map(|event| match event {
            PaintEvent::Image(paint) => decode_image(paint),
            PaintEvent::Text(_) => None,
        })
        .collect();

    debug!(image_count = images.len(), "Page images extracted");
    images
}

/// Decode one embedded image, or `None` if it must be skipped.
fn decode_image(paint: &ImagePaint) -> Option<ExtractedImage> {
    if paint.data.is_empty() {
        warn!("skipping image event with no sample data");
        return None;
    }

    let decoded = match image::load_from_memory(&paint.data) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(%err, "skipping undecodable embedded image");
            return None;
        }
    };

    let (width, height) = (decoded.width(), decoded.height());

    let mut data = Vec::new();
    let mut cursor = Cursor::new(&mut data);
    if let Err(err) = decoded.write_to(&mut cursor, ImageFormat::Png) {
        warn!(%err, width, height, "skipping image that failed PNG re-encoding");
        return None;
    }

    Some(ExtractedImage {
        data,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::events::TextPaint;
    use image::{Rgb, RgbImage};

    /// Encode a small solid-color bitmap into the given container format.
    fn sample_image_bytes(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let bitmap = RgbImage::from_pixel(width, height, Rgb([200u8, 40, 40]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(bitmap)
            .write_to(&mut Cursor::new(&mut bytes), format)
            .expect("in-memory encode");
        bytes
    }

    fn image_event(data: Vec<u8>) -> PaintEvent {
        PaintEvent::Image(ImagePaint { data })
    }

    /// Decoded dimensions are the bitmap's pixel dimensions, and the output
    /// is canonical PNG regardless of the embedded container format.
    #[test]
    fn decodes_and_reencodes_to_png() {
        let events = vec![image_event(sample_image_bytes(ImageFormat::Jpeg, 6, 4))];

        let images = collect_images(&events);
        assert_eq!(images.len(), 1);
        assert_eq!((images[0].width, images[0].height), (6, 4));
        // PNG signature.
        assert_eq!(&images[0].data[..4], &[0x89, b'P', b'N', b'G']);
    }

    /// One corrupt image among N leaves exactly N-1 records; encounter order
    /// of the survivors is preserved.
    #[test]
    fn corrupt_image_is_isolated() {
        let events = vec![
            image_event(sample_image_bytes(ImageFormat::Png, 2, 2)),
            image_event(vec![0xde, 0xad, 0xbe, 0xef]),
            image_event(sample_image_bytes(ImageFormat::Png, 3, 5)),
        ];

        let images = collect_images(&events);
        assert_eq!(images.len(), 2);
        assert_eq!((images[0].width, images[0].height), (2, 2));
        assert_eq!((images[1].width, images[1].height), (3, 5));
    }

    /// Zero-length sample data is skipped without a placeholder record.
    #[test]
    fn empty_sample_data_is_skipped() {
        let images = collect_images(&[image_event(Vec::new())]);
        assert!(images.is_empty());
    }

    /// Text events are invisible to the image extractor.
    #[test]
    fn text_events_are_filtered_out() {
        let events = vec![
            PaintEvent::Text(TextPaint::new("x", "Times", 10.0, 0.0, 0.0, 5.0, 10.0)),
            image_event(sample_image_bytes(ImageFormat::Png, 1, 1)),
        ];
        assert_eq!(collect_images(&events).len(), 1);
    }
}
