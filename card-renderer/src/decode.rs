//! Bitmap decoding for image uploads.
//!
//! Decoding is the host's one suspend point: it either yields a bitmap the
//! host then inserts into the scene, or fails with no scene change.
//! Non-image bytes are rejected here, before anything touches the scene.

use card_core::Bitmap;

use crate::error::{RenderError, RenderResult};

/// Decode raw image bytes into an RGBA8 bitmap with its natural
/// dimensions.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] for non-image or corrupt input.
pub fn decode_bitmap(bytes: &[u8]) -> RenderResult<Bitmap> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| RenderError::Decode(format!("not a decodable image: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Bitmap::new(width, height, rgba.into_raw())
        .map_err(|e| RenderError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode test png");
        buf.into_inner()
    }

    #[test]
    fn test_decode_round_trip() {
        let bytes = png_bytes(3, 2, [10, 20, 30, 255]);
        let bitmap = decode_bitmap(&bytes).expect("decode");
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(&bitmap.data()[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_rejects_non_image() {
        assert!(decode_bitmap(b"definitely not an image").is_err());
        assert!(decode_bitmap(&[]).is_err());
    }
}
