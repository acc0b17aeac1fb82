mod common;

use common::synthetic_image::color_scene_rgb;
use complexity_fields::image::ColorImage;
use complexity_fields::overlay::{analyze_overlay, OverlayOptions, PersistenceMode};

fn scene(w: usize, h: usize) -> Vec<u8> {
    color_scene_rgb(w, h)
}

#[test]
fn overlay_fields_match_raster_dimensions() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (64usize, 48usize);
    let data = scene(w, h);
    let img = ColorImage {
        w,
        h,
        stride: w * 3,
        channels: 3,
        data: &data,
    };
    let report = analyze_overlay(&img, &OverlayOptions::default());
    assert_eq!((report.width, report.height), (w, h));
    for (name, field) in report.named_fields() {
        assert_eq!(field.len(), w * h, "field {name}");
        assert!(
            field.data.iter().all(|v| v.is_finite() && (-1e-5..=1.0 + 1e-5).contains(v)),
            "field {name} leaves [0, 1]"
        );
    }
    assert!(report.fractal.dimension > 0.0);
    assert!(report.persistence.bars.iter().all(|b| b.birth == b.death));
    assert!(report.attention.tension.point.x < w as u32);
    assert!(report.attention.tension.point.y < h as u32);
    let labels: Vec<&str> = report.timings.stages.iter().map(|s| s.label.as_str()).collect();
    for expected in ["attention_inputs", "fractal", "persistence", "skeleton"] {
        assert!(labels.contains(&expected), "missing stage {expected}");
    }
}

#[test]
fn overlay_is_deterministic_and_leaves_input_untouched() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (40usize, 40usize);
    let data = scene(w, h);
    let original = data.clone();
    let img = ColorImage {
        w,
        h,
        stride: w * 3,
        channels: 3,
        data: &data,
    };
    let opts = OverlayOptions::default();
    let a = analyze_overlay(&img, &opts);
    let b = analyze_overlay(&img, &opts);
    assert_eq!(data, original);
    assert_eq!(a.attention.phi, b.attention.phi);
    assert_eq!(a.fractal.dimension, b.fractal.dimension);
    assert_eq!(a.persistence.bars, b.persistence.bars);
    assert_eq!(a.attention.center, b.attention.center);
}

#[test]
fn rgba_input_ignores_alpha() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (32usize, 24usize);
    let rgb = scene(w, h);
    let mut rgba = Vec::with_capacity(w * h * 4);
    for (i, px) in rgb.chunks_exact(3).enumerate() {
        rgba.extend_from_slice(px);
        rgba.push((i % 256) as u8);
    }
    let opts = OverlayOptions::default();
    let from_rgb = analyze_overlay(
        &ColorImage {
            w,
            h,
            stride: w * 3,
            channels: 3,
            data: &rgb,
        },
        &opts,
    );
    let from_rgba = analyze_overlay(
        &ColorImage {
            w,
            h,
            stride: w * 4,
            channels: 4,
            data: &rgba,
        },
        &opts,
    );
    assert_eq!(from_rgb.attention.phi, from_rgba.attention.phi);
    assert_eq!(from_rgb.skeleton.skeleton, from_rgba.skeleton.skeleton);
}

#[test]
fn union_find_mode_and_summary_serialization() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (48usize, 32usize);
    let data = scene(w, h);
    let img = ColorImage {
        w,
        h,
        stride: w * 3,
        channels: 3,
        data: &data,
    };
    let opts = OverlayOptions {
        persistence_mode: PersistenceMode::UnionFind,
        ..Default::default()
    };
    let report = analyze_overlay(&img, &opts);
    assert!(report.persistence.span > 0.0);

    let json = serde_json::to_value(&report).expect("report serializes");
    assert!(json["fractal"]["dimension"].is_number());
    assert!(json["fractal"].get("heat").is_none());
    assert!(json["attention"]["center"]["radius"].is_number());
    assert!(json["persistence"]["bars"].is_array());
    assert!(json["skeleton"]["branchingNorm"].is_number());
    assert!(json["timings"]["totalMs"].is_number());
}
