//! Raster-in-SVG wrapping.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, ImageResult, RgbaImage};

/// Encode `icon` as PNG in memory.
pub fn encode_png(icon: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut png_data = Vec::new();
    icon.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)?;
    Ok(png_data)
}

/// Wrap PNG bytes in a minimal SVG document of the given size.
///
/// The raster is inlined as a base64 `data:` URI on a single `<image>`
/// element covering the whole viewBox.
pub fn wrap_png(png_data: &[u8], width: u32, height: u32) -> String {
    let b64 = general_purpose::STANDARD.encode(png_data);
    format!(
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
    <image width="{width}" height="{height}" xlink:href="data:image/png;base64,{b64}"/>
</svg>"#
    )
}

/// Encode `icon` and wrap it as an SVG document.
pub fn icon_to_svg(icon: &RgbaImage) -> ImageResult<String> {
    let png_data = encode_png(icon)?;
    Ok(wrap_png(&png_data, icon.width(), icon.height()))
}

/// Extract and decode the base64 payload of an SVG produced by [`wrap_png`].
#[cfg(test)]
pub fn decode_payload(svg: &str) -> Option<Vec<u8>> {
    const PREFIX: &str = "data:image/png;base64,";
    let start = svg.find(PREFIX)? + PREFIX.len();
    let end = start + svg[start..].find('"')?;
    general_purpose::STANDARD.decode(&svg[start..end]).ok()
}
