use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;

/// Thicken a binary mask by `rounds` pixels in every direction.
///
/// One round equals a 3x3 max filter with boundary clamping, so `rounds`
/// iterations are a single L-infinity dilation of radius `rounds`.
/// `rounds == 0` returns the mask unchanged.
pub fn dilate_mask(mask: &GrayImage, rounds: u8) -> GrayImage {
    if rounds == 0 {
        return mask.clone();
    }
    dilate(mask, Norm::LInf, rounds)
}
