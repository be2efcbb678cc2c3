use image::{GrayImage, RgbaImage};
use imageproc::filter::filter3x3;

/// 3x3 "find edges" kernel: Laplacian-style eight-neighbor difference.
/// Flat regions respond with 0, luminance steps with a large positive
/// value on the darker side of the step.
const FIND_EDGES_KERNEL: [i32; 9] = [-1, -1, -1, -1, 8, -1, -1, -1, -1];

/// Convert an RGBA image to grayscale using the `image` crate's fixed
/// BT.709 luma weighting. Alpha is ignored.
pub fn to_grayscale(img: &RgbaImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Compute the edge response of a grayscale image.
///
/// Applies the find-edges kernel and clamps the response to [0, 255].
/// Border pixels are convolved against replicated edge samples.
pub fn edge_mask(gray: &GrayImage) -> GrayImage {
    filter3x3::<_, i32, u8>(gray, &FIND_EDGES_KERNEL)
}

/// Binarize an edge mask: 255 where the response is strictly greater
/// than `threshold`, 0 elsewhere.
pub fn threshold_mask(edges: &GrayImage, threshold: u8) -> GrayImage {
    let mut mask = edges.clone();
    for px in mask.pixels_mut() {
        px.0[0] = if px.0[0] > threshold { 255 } else { 0 };
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    fn gray_of(pixels: &[(u32, u32, u8)], w: u32, h: u32) -> GrayImage {
        let mut img = GrayImage::new(w, h);
        for &(x, y, v) in pixels {
            img.put_pixel(x, y, Luma([v]));
        }
        img
    }

    #[test]
    fn flat_image_has_no_edges() {
        let gray = GrayImage::from_pixel(8, 8, Luma([120]));
        let edges = edge_mask(&gray);
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn isolated_bright_pixel_responds() {
        let gray = gray_of(&[(4, 4, 255)], 9, 9);
        let edges = edge_mask(&gray);
        // The bright pixel itself saturates the kernel response.
        assert_eq!(edges.get_pixel(4, 4).0[0], 255);
        // Far away from the step the response stays zero.
        assert_eq!(edges.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn threshold_is_strictly_greater() {
        let edges = gray_of(&[(0, 0, 30), (1, 0, 31)], 2, 1);
        let mask = threshold_mask(&edges, 30);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn lower_threshold_never_loses_edge_pixels() {
        // A gradient gives a spread of edge intensities.
        let mut gray = GrayImage::new(16, 16);
        for (x, y, px) in gray.enumerate_pixels_mut() {
            px.0[0] = ((x * 13 + y * 7) % 256) as u8;
        }
        let edges = edge_mask(&gray);

        let count = |t: u8| {
            threshold_mask(&edges, t)
                .pixels()
                .filter(|p| p.0[0] == 255)
                .count()
        };
        for t in [200u8, 100, 50, 30, 10, 0] {
            assert!(count(t) >= count(t.saturating_add(50)));
        }
    }

    #[test]
    fn grayscale_preserves_dimensions() {
        let img = RgbaImage::from_pixel(7, 5, Rgba([10, 200, 30, 255]));
        let gray = to_grayscale(&img);
        assert_eq!(gray.dimensions(), (7, 5));
    }
}
