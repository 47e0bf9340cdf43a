use std::io::Cursor;
use std::path::{Path, PathBuf};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "framefit_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

const REGISTRY_JSON: &str = r#"{
    "custom": {
        "40x60": {
            "frameWidth": 60,
            "frameHeight": 80,
            "screenshotWidth": 40,
            "screenshotHeight": 60,
            "innerLeft": 10,
            "innerTop": 10,
            "innerWidth": 40,
            "innerHeight": 60,
            "cornerCutSize": 0,
            "assetPath": "custom/bezel.png"
        }
    }
}"#;

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_framefit")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "framefit.exe"
            } else {
                "framefit"
            });
            p
        })
}

fn setup(name: &str) -> (PathBuf, PathBuf, PathBuf) {
    let root = temp_dir(name);
    let frames = root.join("frames");
    std::fs::create_dir_all(frames.join("custom")).unwrap();
    write_png(&frames.join("custom/bezel.png"), 60, 80, [0, 0, 0, 0]);

    let registry = root.join("devices.json");
    std::fs::write(&registry, REGISTRY_JSON).unwrap();
    (root, frames, registry)
}

#[test]
fn cli_run_writes_framed_png() {
    let (root, frames, registry) = setup("cli_run");
    let shot = root.join("shot.png");
    write_png(&shot, 40, 60, [9, 9, 9, 255]);
    let dest = root.join("out");

    let status = std::process::Command::new(bin_path())
        .arg("--frames-dir")
        .arg(&frames)
        .arg("--registry")
        .arg(&registry)
        .arg("run")
        .arg("custom")
        .arg(&shot)
        .arg(&dest)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(dest.join("shot_framed.png").is_file());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn cli_run_unknown_platform_is_fatal() {
    let (root, frames, registry) = setup("cli_bad_platform");
    let shot = root.join("shot.png");
    write_png(&shot, 40, 60, [9, 9, 9, 255]);

    let status = std::process::Command::new(bin_path())
        .arg("--frames-dir")
        .arg(&frames)
        .arg("--registry")
        .arg(&registry)
        .arg("run")
        .arg("webos")
        .arg(&shot)
        .status()
        .unwrap();

    assert!(!status.success());
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn cli_missing_frames_dir_refuses_to_start() {
    let status = std::process::Command::new(bin_path())
        .arg("--frames-dir")
        .arg("/no/such/frames/dir")
        .arg("validate")
        .status()
        .unwrap();

    assert!(!status.success());
}

#[test]
fn cli_validate_reports_every_profile() {
    let (root, frames, registry) = setup("cli_validate");

    let out = std::process::Command::new(bin_path())
        .arg("--frames-dir")
        .arg(&frames)
        .arg("--registry")
        .arg(&registry)
        .arg("validate")
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    // the custom profile is consistent; the builtin ones have no artwork here
    assert!(stdout.contains("custom 40x60: OK"));
    assert!(stdout.contains("android 1080x2340 [pixel_5, 6\"]:"));
    assert!(stdout.contains("does not exist"));

    std::fs::remove_dir_all(&root).ok();
}
