use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "outliner",
    about = "Batch image outliner: thick black borders around image silhouettes",
    long_about = "
Outliner - Batch Image Outline Processor

Detects edges in each source image, thickens them into a rounded black
border and composites the original image back on top, so interior detail
and transparency are preserved. One output file is written per input
file, under the same filename.

Example Usage:
  # Outline every PNG/JPEG in ./images into ./images/outlined
  outliner -i ./images

  # Thicker border, more sensitive edge detection, custom output dir
  outliner -i ./sprites -o ./sprites/bordered -t 5 --threshold 15

  # Flatten JPEG outputs onto black instead of white
  outliner -i ./photos --background #000000

  # Single-threaded run with per-file detail
  outliner -i ./images -j 1 --verbose"
)]
pub struct Args {
    /// Source directory containing the images to outline
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output directory for outlined images (default: <input>/outlined)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Outline thickness: number of dilation rounds applied to the edge
    /// mask (0 keeps the raw one-pixel outline)
    #[arg(short = 't', long = "thickness", default_value = "3", value_name = "N")]
    pub thickness: u8,

    /// Edge threshold (0-255); lower values classify more pixels as edges
    #[arg(long = "threshold", default_value = "30", value_name = "N")]
    pub threshold: u8,

    /// Comma-separated list of image extensions to process
    #[arg(long = "extensions", default_value = "png,jpg,jpeg")]
    pub extensions_str: String,

    /// Background color for flattening JPEG output (hex RGB, e.g. #FFFFFF)
    #[arg(long = "background", default_value = "#FFFFFF", value_name = "COLOR")]
    pub background: String,

    /// Number of parallel processing jobs (0 = auto-detect CPU cores)
    #[arg(short = 'j', long = "jobs", default_value = "0", value_name = "N")]
    pub jobs: usize,

    /// Enable verbose output with detailed progress information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Parse the extensions string into a vector
    pub fn parse_extensions(&self) -> Vec<String> {
        self.extensions_str
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Resolve the output directory, defaulting to a subdirectory of the
    /// input directory
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join("outlined"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions() {
        let args = Args {
            extensions_str: "png,jpg,jpeg".to_string(),
            ..Default::default()
        };
        assert_eq!(args.parse_extensions(), vec!["png", "jpg", "jpeg"]);

        let args = Args {
            extensions_str: "PNG, JPG , JPEG ".to_string(),
            ..Default::default()
        };
        assert_eq!(args.parse_extensions(), vec!["png", "jpg", "jpeg"]);
    }

    #[test]
    fn test_resolved_output_dir_defaults_under_input() {
        let args = Args {
            input_dir: PathBuf::from("/data/images"),
            ..Default::default()
        };
        assert_eq!(
            args.resolved_output_dir(),
            PathBuf::from("/data/images/outlined")
        );

        let args = Args {
            input_dir: PathBuf::from("/data/images"),
            output_dir: Some(PathBuf::from("/elsewhere")),
            ..Default::default()
        };
        assert_eq!(args.resolved_output_dir(), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let args = Args::parse_from(["outliner", "-i", "images"]);
        assert_eq!(args.thickness, 3);
        assert_eq!(args.threshold, 30);
        assert_eq!(args.jobs, 0);
        assert_eq!(args.background, "#FFFFFF");
        assert!(!args.verbose);
    }
}

// Default implementation for tests
#[cfg(test)]
impl Default for Args {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: None,
            thickness: 3,
            threshold: 30,
            extensions_str: "png,jpg,jpeg".to_string(),
            background: "#FFFFFF".to_string(),
            jobs: 0,
            verbose: false,
        }
    }
}
