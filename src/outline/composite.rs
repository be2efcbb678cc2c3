use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

const OUTLINE_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Build the outlined composite from the original image and its dilated
/// edge mask.
///
/// The base layer is opaque black wherever the mask is set and fully
/// transparent elsewhere. The original is then pasted on top using its
/// own alpha channel as a stencil: every pixel with alpha > 0 overwrites
/// the base, including its alpha value, so interior detail and partial
/// transparency survive unchanged.
pub fn apply_outline(img: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(img.dimensions(), mask.dimensions());

    let mut out = RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        if mask.get_pixel(x, y).0[0] == 255 {
            OUTLINE_BLACK
        } else {
            TRANSPARENT
        }
    });

    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] > 0 {
            out.put_pixel(x, y, *px);
        }
    }
    out
}

/// Flatten an RGBA image onto a solid background color, dropping alpha.
///
/// Used for JPEG output, which cannot carry an alpha channel. Pixels are
/// alpha-blended over the background so partial transparency degrades
/// gracefully instead of being truncated.
pub fn flatten_onto(img: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let px = img.get_pixel(x, y);
        let a = px.0[3] as u16;
        let blend = |fg: u8, bg: u8| ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8;
        Rgb([
            blend(px.0[0], background.0[0]),
            blend(px.0[1], background.0[1]),
            blend(px.0[2], background.0[2]),
        ])
    })
}
