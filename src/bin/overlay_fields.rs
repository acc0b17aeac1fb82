use complexity_fields::config::overlay::load_config;
use complexity_fields::image::io::{load_color_image, save_grayscale_f32, write_json_file};
use complexity_fields::overlay::analyze_overlay;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let image = load_color_image(&config.input)?;
    let report = analyze_overlay(&image.as_view(), &config.options);

    for (name, field) in report.named_fields() {
        let path = config.output.field_dir.join(format!("{name}.png"));
        save_grayscale_f32(field, &path)?;
    }
    write_json_file(&config.output.summary_json, &report)?;

    println!(
        "Analyzed {}x{} in {:.2} ms: D={:.3} lacunarity={:.3} branching={:.3}",
        report.width,
        report.height,
        report.timings.total_ms,
        report.fractal.dimension,
        report.lacunarity.mean_lambda,
        report.skeleton.branching_norm
    );
    println!(
        "Saved fields to {} and summary to {}",
        config.output.field_dir.display(),
        config.output.summary_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: overlay_fields <config.json>".to_string()
}
