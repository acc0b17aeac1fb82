use complexity_fields::config::overlay::load_config;
use complexity_fields::image::io::{load_color_image, save_grayscale_f32, write_json_file};
use complexity_fields::image::ImageF32;
use complexity_fields::overlay::PersistenceMode;
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("complexity_fields_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn grayscale_field_round_trips_through_png() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = scratch_dir("png");
    let path = dir.join("nested/field.png");
    let field = ImageF32::from_vec(4, 1, vec![0.0, 0.5, 1.0, 2.0]);
    save_grayscale_f32(&field, &path).expect("save field");

    let loaded = load_color_image(&path).expect("load field");
    assert_eq!((loaded.width(), loaded.height()), (4, 1));
    let view = loaded.as_view();
    let values: Vec<u8> = (0..4).map(|x| view.rgb(x, 0)[0]).collect();
    assert_eq!(values, vec![0, 127, 255, 255]);
    assert!((0..4).all(|x| {
        let [r, g, b] = view.rgb(x, 0);
        r == g && g == b
    }));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn summary_json_and_tool_config_are_read_back() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = scratch_dir("json");

    let summary = dir.join("out/summary.json");
    write_json_file(&summary, &serde_json::json!({ "dimension": 1.5 })).expect("write json");
    let text = fs::read_to_string(&summary).expect("read json");
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("parse json");
    assert_eq!(parsed["dimension"], 1.5);

    let config_path = dir.join("overlay.json");
    fs::write(
        &config_path,
        r#"{
            "input": "scene.png",
            "options": { "persistence_mode": "union_find" },
            "output": { "field_dir": "fields", "summary_json": "summary.json" }
        }"#,
    )
    .expect("write config");
    let cfg = load_config(&config_path).expect("load config");
    assert_eq!(cfg.input, PathBuf::from("scene.png"));
    assert_eq!(cfg.options.persistence_mode, PersistenceMode::UnionFind);
    assert_eq!(cfg.output.field_dir, PathBuf::from("fields"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_files_report_their_path() {
    let dir = scratch_dir("missing");
    let err = load_config(&dir.join("absent.json")).unwrap_err();
    assert!(err.starts_with("Failed to read config"), "{err}");
    assert!(err.contains("absent.json"));

    let err = load_color_image(&dir.join("absent.png")).unwrap_err();
    assert!(err.starts_with("Failed to open"), "{err}");
}
