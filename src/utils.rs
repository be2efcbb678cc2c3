use anyhow::Result;
use console::style;
use image::Rgb;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;

/// Create a styled progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.blue} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg} ({eta})",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Validate command line arguments
pub fn validate_inputs(args: &Args) -> Result<()> {
    if !args.input_dir.exists() {
        return Err(anyhow::anyhow!(
            "Input directory does not exist: {}",
            args.input_dir.display()
        ));
    }
    if !args.input_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "Input path is not a directory: {}",
            args.input_dir.display()
        ));
    }

    let extensions = args.parse_extensions();
    if extensions.is_empty() {
        return Err(anyhow::anyhow!("No valid extensions specified"));
    }

    if args.jobs > 32 {
        return Err(anyhow::anyhow!(
            "Job count too high (max 32), got: {}",
            args.jobs
        ));
    }

    parse_hex_color(&args.background)
        .map_err(|e| anyhow::anyhow!("Invalid background color '{}': {}", args.background, e))?;

    Ok(())
}

/// Parse a `#RGB` or `#RRGGBB` hex color string
pub fn parse_hex_color(color: &str) -> Result<Rgb<u8>, String> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| "expected leading '#'".to_string())?;

    let channel =
        |s: &str| u8::from_str_radix(s, 16).map_err(|_| format!("bad hex digit in '{}'", s));

    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                channels[i] = channel(&c.to_string())? * 17;
            }
            Ok(Rgb(channels))
        }
        6 => Ok(Rgb([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ])),
        _ => Err("expected #RGB or #RRGGBB".to_string()),
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a file has one of the specified extensions
pub fn has_valid_extension(path: &Path, extensions: &[String]) -> bool {
    if let Some(ext) = get_file_extension(path) {
        extensions.contains(&ext)
    } else {
        false
    }
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.000s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#000000").unwrap(), Rgb([0, 0, 0]));
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_hex_color("#ff8000").unwrap(), Rgb([255, 128, 0]));
        assert_eq!(parse_hex_color("#fff").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_hex_color("#f00").unwrap(), Rgb([255, 0, 0]));

        assert!(parse_hex_color("FFFFFF").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("#12345").is_err());
    }

    #[test]
    fn test_has_valid_extension() {
        let exts: Vec<String> = vec!["png".into(), "jpg".into(), "jpeg".into()];
        assert!(has_valid_extension(&PathBuf::from("photo.png"), &exts));
        assert!(has_valid_extension(&PathBuf::from("photo.PNG"), &exts));
        assert!(has_valid_extension(&PathBuf::from("photo.Jpeg"), &exts));
        assert!(!has_valid_extension(&PathBuf::from("notes.txt"), &exts));
        assert!(!has_valid_extension(&PathBuf::from("no_extension"), &exts));
    }
}
