//! QR code decoding from image files and luminance frames

use std::collections::HashSet;
use std::path::Path;

use phishguard_core::prelude::*;
use rxing::common::HybridBinarizer;
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintValue, DecodeHints, Exceptions, Luma8LuminanceSource,
    MultiFormatReader, Reader,
};

const CAPABILITY: &str = "Image";

/// Decode a QR code from an 8-bit luminance plane (`width * height` bytes).
///
/// Returns `Ok(None)` when the frame contains no QR code.
pub fn decode_luma(luma: &[u8], width: u32, height: u32) -> Result<Option<String>> {
    let expected = (width as usize) * (height as usize);
    if luma.len() < expected {
        return Err(Error::qr_decode(format!(
            "frame too short: {} bytes for {}x{}",
            luma.len(),
            width,
            height
        )));
    }

    let hints = DecodeHints::default()
        .with(DecodeHintValue::TryHarder(true))
        .with(DecodeHintValue::PossibleFormats(HashSet::from([
            BarcodeFormat::QR_CODE,
        ])));

    let source = Luma8LuminanceSource::new(luma[..expected].to_vec(), width, height);
    let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
    let mut reader = MultiFormatReader::default();

    match reader.decode_with_hints(&mut bitmap, &hints) {
        Ok(result) => Ok(Some(result.getText().to_string())),
        Err(Exceptions::NotFoundException(_)) => Ok(None),
        Err(e) => Err(Error::qr_decode(format!("{e:?}"))),
    }
}

/// Decode the QR code in a PNG or JPEG file.
///
/// A missing or unreadable file is a capability error (the terminal stand-in
/// for denied photo access); an image without a QR code is a decode error.
pub fn decode_image_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::capability(
            CAPABILITY,
            format!("no such file: {}", path.display()),
        ));
    }

    let img = image::open(path)
        .map_err(|e| Error::capability(CAPABILITY, format!("{}: {}", path.display(), e)))?;
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    debug!("Decoding QR from {} ({}x{})", path.display(), width, height);

    decode_luma(luma.as_raw(), width, height)?
        .ok_or_else(|| Error::qr_decode("No QR code found in image"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_qr;
    use tempfile::TempDir;

    #[test]
    fn test_decode_luma_frame() {
        let img = render_qr("https://example.com/login");
        let (w, h) = img.dimensions();
        let text = decode_luma(img.as_raw(), w, h).unwrap();
        assert_eq!(text.as_deref(), Some("https://example.com/login"));
    }

    #[test]
    fn test_blank_frame_has_no_code() {
        let frame = vec![255u8; 64 * 64];
        assert_eq!(decode_luma(&frame, 64, 64).unwrap(), None);
    }

    #[test]
    fn test_short_frame_rejected() {
        assert!(decode_luma(&[0u8; 10], 64, 64).is_err());
    }

    #[test]
    fn test_decode_png_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("code.png");
        render_qr("WIFI:S:home;T:WPA;P:secret;;").save(&path).unwrap();

        assert_eq!(
            decode_image_file(&path).unwrap(),
            "WIFI:S:home;T:WPA;P:secret;;"
        );
    }

    #[test]
    fn test_missing_file_is_capability_error() {
        let err = decode_image_file(Path::new("/nonexistent/phishguard/qr.png")).unwrap_err();
        assert!(matches!(err, Error::Capability { .. }));
    }

    #[test]
    fn test_image_without_code() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.png");
        image::GrayImage::from_pixel(80, 80, image::Luma([255u8]))
            .save(&path)
            .unwrap();

        let err = decode_image_file(&path).unwrap_err();
        assert!(matches!(err, Error::QrDecode { .. }));
    }
}
