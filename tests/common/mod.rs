#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tempfile::TempDir;

use laureate::engine::{profile, Award, VerifiedRecord, FONT_KEY};

/// Probe the font paths a dev box usually has. Rendering tests skip
/// themselves when none of these exist; layout math does not depend on
/// which face is found.
pub fn system_font() -> Option<Vec<u8>> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation2/LiberationSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ];
    CANDIDATES.iter().find_map(|p| fs::read(p).ok())
}

/// A flat-color PNG standing in for certificate artwork.
pub fn template_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([24, 49, 120]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    bytes
}

pub fn write_asset(root: &Path, key: &str, bytes: &[u8]) {
    let path = root.join(key);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// An asset directory holding the font and a 1984x1240 template per award.
pub fn asset_dir(font: &[u8]) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_asset(dir.path(), FONT_KEY, font);
    for award in Award::ALL {
        write_asset(
            dir.path(),
            profile(award).template_key,
            &template_png(1984, 1240),
        );
    }
    dir
}

pub fn record(name: &str, student_id: &str, award: Award, gpa: Option<&str>) -> VerifiedRecord {
    VerifiedRecord {
        name: name.to_string(),
        student_id: student_id.to_string(),
        award,
        gpa: gpa.map(str::to_string),
    }
}

pub fn dl_record() -> VerifiedRecord {
    record("Juan Dela Cruz", "2025-00001-MN-0", Award::DeansLister, None)
}
