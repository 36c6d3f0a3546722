//! Pairing code rendering: QR at medium error correction, fixed-size PNG, base64.

use base64::Engine;
use image::{ImageBuffer, ImageEncoder, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::InternalFault;

/// Edge length of the rendered barcode in pixels.
pub const BARCODE_DIMENSION: u32 = 152;

/// Quiet zone modules on each side of the symbol.
const QUIET_ZONE: u32 = 4;

/// Render `content` into a base64-encoded 152×152 grayscale PNG.
///
/// Every module is drawn as a whole number of pixels and the symbol is centered
/// on a white canvas. A symbol wider than the canvas at one pixel per module is
/// an [`InternalFault::Rasterize`].
pub fn render_pairing_code(content: &str) -> Result<String, InternalFault> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M)
        .map_err(|e| InternalFault::Encode(e.to_string()))?;

    let total = code.width() as u32 + 2 * QUIET_ZONE;
    if total > BARCODE_DIMENSION {
        return Err(InternalFault::Rasterize(format!(
            "QR needs {total} modules, raster is {BARCODE_DIMENSION} px"
        )));
    }
    let scale = BARCODE_DIMENSION / total;
    let symbol = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(scale, scale)
        .build();

    let mut raster = ImageBuffer::from_pixel(BARCODE_DIMENSION, BARCODE_DIMENSION, Luma([255u8]));
    let offset = i64::from((BARCODE_DIMENSION - symbol.width()) / 2);
    image::imageops::overlay(&mut raster, &symbol, offset, offset);

    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(
            raster.as_raw(),
            BARCODE_DIMENSION,
            BARCODE_DIMENSION,
            image::ExtendedColorType::L8,
        )
        .map_err(|e| InternalFault::Rasterize(e.to_string()))?;
    Ok(base64::prelude::BASE64_STANDARD.encode(&png))
}
