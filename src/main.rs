use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::time::Instant;

use outliner::cli::Args;
use outliner::outline::{OutlineConfig, OutlineEngine};
use outliner::utils::{create_progress_bar, format_duration, parse_hex_color, validate_inputs};

fn main() -> Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    // Print banner
    println!("{}", style("Outliner - Batch Image Outliner").bold().blue());
    println!(
        "{}",
        style("Edge detection, dilation and silhouette compositing").dim()
    );
    println!();

    validate_inputs(&args)?;

    let config = OutlineConfig {
        thickness: args.thickness,
        threshold: args.threshold,
        extensions: args.parse_extensions(),
        // Validated by validate_inputs above.
        background: parse_hex_color(&args.background)
            .map_err(|e| anyhow::anyhow!("Invalid background color: {}", e))?,
        verbose: args.verbose,
    };

    let parallel_jobs = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(parallel_jobs)
        .build_global()
        .context("Failed to initialize thread pool")?;

    if config.verbose {
        println!("{}", style("Configuration:").bold());
        println!("  Thickness: {}", config.thickness);
        println!("  Threshold: {}", config.threshold);
        println!("  Extensions: {:?}", config.extensions);
        println!("  Background: {}", args.background);
        println!("  Parallel jobs: {}", parallel_jobs);
        println!();
    }

    let output_dir = args.resolved_output_dir();
    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let engine = OutlineEngine::new(config);
    let image_files = engine.discover_images(&args.input_dir)?;

    if image_files.is_empty() {
        println!(
            "{} {}",
            style("No images found in").yellow(),
            args.input_dir.display()
        );
        println!("{}", style("Done.").bold().green());
        return Ok(());
    }

    let progress = create_progress_bar(image_files.len() as u64);
    progress.set_message("Outlining images");

    let results = engine.process_batch(&image_files, &output_dir, &progress);

    progress.finish_with_message("Processing complete");
    println!();

    // Print results summary
    let successful = results.iter().filter(|r| r.is_ok()).count();
    let failed = results.len() - successful;
    let total_time = start_time.elapsed();

    println!("{}", style("Results Summary:").bold().green());
    println!(
        "  Successfully processed: {}",
        style(successful).bold().green()
    );
    if failed > 0 {
        println!("  Failed: {}", style(failed).bold().red());
    }
    println!(
        "  Total processing time: {}",
        style(format_duration(total_time)).bold()
    );
    println!("  Output directory: {}", output_dir.display());

    if failed > 0 {
        println!();
        println!("{}", style("Errors encountered:").bold().red());
        for (image_path, result) in image_files.iter().zip(&results) {
            if let Err(e) = result {
                let filename = image_path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("unknown");
                println!("  {}: {:#}", style(filename).bold().red(), e);
            }
        }
    }

    println!();
    println!("{}", style("Done.").bold().green());

    // Per-file failures never fail the run as a whole.
    Ok(())
}
