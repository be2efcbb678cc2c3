pub mod composite;
pub mod edges;
pub mod morphology;

use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat, Rgb, RgbaImage};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::utils::{has_valid_extension, verbose_println};

/// Parameters for one batch run. Every per-file operation reads from
/// this value, so two engines with different settings can run side by
/// side without touching process-wide state.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Dilation rounds applied to the edge mask; 0 keeps the raw
    /// one-pixel outline.
    pub thickness: u8,
    /// Edge intensities strictly greater than this become outline.
    pub threshold: u8,
    /// Accepted file extensions, lowercase, without the dot.
    pub extensions: Vec<String>,
    /// Background color used when flattening for JPEG output.
    pub background: Rgb<u8>,
    pub verbose: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            thickness: 3,
            threshold: 30,
            extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            background: Rgb([255, 255, 255]),
            verbose: false,
        }
    }
}

/// Outcome of one successfully processed file.
#[derive(Debug)]
pub struct OutlineResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Foreground pixels in the dilated mask, before the original is
    /// pasted back on top.
    pub outline_pixels: u64,
}

pub struct OutlineEngine {
    config: OutlineConfig,
}

impl OutlineEngine {
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// List the image files directly inside `input_dir`.
    ///
    /// Only immediate children are considered; subdirectories are
    /// skipped. Results are sorted so batch order is deterministic.
    pub fn discover_images(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        verbose_println(
            self.config.verbose,
            &format!("Scanning directory: {}", input_dir.display()),
        );

        let mut image_files = Vec::new();
        for entry in WalkDir::new(input_dir)
            .follow_links(false)
            .min_depth(1)
            .max_depth(1)
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if path.is_file() && has_valid_extension(path, &self.config.extensions) {
                image_files.push(path.to_path_buf());
            }
        }
        image_files.sort();

        verbose_println(
            self.config.verbose,
            &format!("Found {} image files", image_files.len()),
        );
        Ok(image_files)
    }

    /// Process every file in parallel, writing each result into
    /// `output_dir` under the same filename.
    ///
    /// Per-file failures are returned in place; they never abort the
    /// rest of the batch. The result vector is index-aligned with
    /// `image_files`.
    pub fn process_batch(
        &self,
        image_files: &[PathBuf],
        output_dir: &Path,
        progress: &ProgressBar,
    ) -> Vec<Result<OutlineResult>> {
        image_files
            .par_iter()
            .map(|input_path| {
                let output_path = output_path_for(input_path, output_dir);
                progress.println(format!(
                    "Processing {} -> {}",
                    input_path.display(),
                    output_path.display()
                ));
                let result = self.process_file(input_path, &output_path);
                progress.inc(1);
                result
            })
            .collect()
    }

    /// Run the full outline pipeline on a single file.
    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<OutlineResult> {
        let img = image::open(input_path)
            .with_context(|| format!("Failed to decode image: {}", input_path.display()))?
            .to_rgba8();

        let mask = outline_mask(&img, self.config.thickness, self.config.threshold);
        let outline_pixels = mask.pixels().filter(|p| p.0[0] == 255).count() as u64;
        let outlined = composite::apply_outline(&img, &mask);

        save_image(&outlined, output_path, self.config.background)
            .with_context(|| format!("Failed to write output: {}", output_path.display()))?;

        verbose_println(
            self.config.verbose,
            &format!(
                "{}: {}x{}, {} outline pixels",
                input_path.display(),
                img.width(),
                img.height(),
                outline_pixels
            ),
        );

        Ok(OutlineResult {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            outline_pixels,
        })
    }
}

/// Destination path for an input file: same filename, new directory.
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> PathBuf {
    let name = input_path.file_name().unwrap_or_default();
    output_dir.join(name)
}

/// Derive the dilated outline mask for an image.
fn outline_mask(img: &RgbaImage, thickness: u8, threshold: u8) -> GrayImage {
    let gray = edges::to_grayscale(img);
    let edge = edges::edge_mask(&gray);
    let mask = edges::threshold_mask(&edge, threshold);
    morphology::dilate_mask(&mask, thickness)
}

/// Pure outline transformation: edge detection, thresholding, dilation
/// and compositing, with no filesystem involvement.
pub fn render_outline(img: &RgbaImage, thickness: u8, threshold: u8) -> RgbaImage {
    let mask = outline_mask(img, thickness, threshold);
    composite::apply_outline(img, &mask)
}

/// Encode `img` at `path` in the format implied by its extension.
///
/// JPEG cannot carry alpha, so the composite is flattened onto the
/// configured background color first. The encoded bytes go to a
/// temporary sibling file which is renamed into place, so a failed
/// encode never leaves a truncated output behind.
fn save_image(img: &RgbaImage, path: &Path, background: Rgb<u8>) -> Result<()> {
    let format = ImageFormat::from_path(path)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output");
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    let write_result = match format {
        ImageFormat::Jpeg => composite::flatten_onto(img, background)
            .save_with_format(&tmp_path, format)
            .map_err(anyhow::Error::from),
        _ => img
            .save_with_format(&tmp_path, format)
            .map_err(anyhow::Error::from),
    };

    if let Err(err) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
