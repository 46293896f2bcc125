mod common;

use std::path::Path;
use std::time::Duration;

use lopdf::content::{Content, Operation};
use lopdf::Document;

use common::{asset_dir, dl_record, record, system_font, template_png, write_asset};
use laureate::engine::{
    layout, profile, Award, DirSource, Engine, FontAsset, RenderError, MIME_TYPE,
};

fn engine_over(dir: &Path) -> Engine<DirSource> {
    Engine::new(DirSource::new(dir.to_path_buf()), Duration::from_secs(5))
}

fn load_single_page(bytes: &[u8]) -> (Document, lopdf::ObjectId) {
    let doc = Document::load_mem(bytes).expect("output parses as a PDF");
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1, "certificates are a single page");
    let page_id = *pages.values().next().unwrap();
    (doc, page_id)
}

fn num(obj: &lopdf::Object) -> f64 {
    match obj {
        lopdf::Object::Integer(i) => *i as f64,
        lopdf::Object::Real(r) => *r as f64,
        other => panic!("not a number: {other:?}"),
    }
}

fn page_size(bytes: &[u8]) -> (f64, f64) {
    let (doc, page_id) = load_single_page(bytes);
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    (num(&media_box[2]), num(&media_box[3]))
}

fn content_ops(bytes: &[u8]) -> Vec<Operation> {
    let (doc, page_id) = load_single_page(bytes);
    let data = doc.get_page_content(page_id).unwrap();
    Content::decode(&data).unwrap().operations
}

#[tokio::test]
async fn end_to_end_deans_lister() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    let engine = engine_over(dir.path());

    let doc = engine.render(&dl_record()).await.unwrap();
    assert!(!doc.bytes.is_empty());
    assert!(doc.bytes.starts_with(b"%PDF"));
    assert_eq!(doc.filename, "Certificate_DL_Juan_Dela_Cruz.pdf");
    assert_eq!(MIME_TYPE, "application/pdf");
}

#[tokio::test]
async fn template_dimensions_win_over_the_floor() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    let engine = engine_over(dir.path());

    let doc = engine.render(&dl_record()).await.unwrap();
    assert_eq!(page_size(&doc.bytes), (1984.0, 1240.0));
}

#[tokio::test]
async fn floor_wins_over_a_small_template() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    write_asset(
        dir.path(),
        profile(Award::DeansLister).template_key,
        &template_png(400, 300),
    );
    let engine = engine_over(dir.path());

    let doc = engine.render(&dl_record()).await.unwrap();
    assert_eq!(page_size(&doc.bytes), (842.0, 595.0));
}

#[tokio::test]
async fn renders_are_deterministic() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    let engine = engine_over(dir.path());

    let first = engine.render(&dl_record()).await.unwrap();
    let second = engine.render(&dl_record()).await.unwrap();
    assert_eq!(page_size(&first.bytes), page_size(&second.bytes));
    assert_eq!(content_ops(&first.bytes), content_ops(&second.bytes));
}

#[tokio::test]
async fn name_field_is_eight_strokes_and_a_fill() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    let engine = engine_over(dir.path());

    let doc = engine.render(&dl_record()).await.unwrap();
    let ops = content_ops(&doc.bytes);
    assert_eq!(ops.iter().filter(|op| op.operator == "Tj").count(), 9);
    // Background is painted before any text run.
    let do_pos = ops.iter().position(|op| op.operator == "Do").unwrap();
    let first_text = ops.iter().position(|op| op.operator == "BT").unwrap();
    assert!(do_pos < first_text);
}

#[tokio::test]
async fn academic_achiever_adds_one_flat_subtitle_run() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    let engine = engine_over(dir.path());

    let rec = record(
        "Jose Protacio Mercado",
        "2025-00003-MN-0",
        Award::AcademicAchiever,
        Some("1.25"),
    );
    let doc = engine.render(&rec).await.unwrap();
    let ops = content_ops(&doc.bytes);

    let shows: Vec<_> = ops.iter().filter(|op| op.operator == "Tj").collect();
    assert_eq!(shows.len(), 10);
    assert_eq!(
        shows[9].operands[0],
        lopdf::Object::string_literal("With an average of 1.25")
    );
}

#[tokio::test]
async fn academic_achiever_without_an_average_is_refused() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    let engine = engine_over(dir.path());

    let rec = record(
        "Jose Protacio Mercado",
        "2025-00003-MN-0",
        Award::AcademicAchiever,
        None,
    );
    let err = engine.render(&rec).await.unwrap_err();
    assert!(matches!(err, RenderError::VerificationRequired));
}

#[tokio::test]
async fn empty_name_renders_centered_at_the_midpoint() {
    let Some(font) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let dir = asset_dir(&font);
    let engine = engine_over(dir.path());

    let rec = record("", "2025-00001-MN-0", Award::DeansLister, None);
    let doc = engine.render(&rec).await.unwrap();

    let ops = content_ops(&doc.bytes);
    // The last Td belongs to the fill draw at the true position.
    let fill_td = ops.iter().rfind(|op| op.operator == "Td").unwrap();
    assert_eq!(num(&fill_td.operands[0]), 1984.0 / 2.0);
}

#[test]
fn measure_is_zero_for_the_empty_string_and_centering_is_exact() {
    let Some(bytes) = system_font() else {
        eprintln!("no system font available, skipping");
        return;
    };
    let font = FontAsset::parse(bytes).unwrap();

    assert_eq!(layout::measure("", &font, 110.0), 0.0);

    for text in ["Juan Dela Cruz", "A", "Maria Clara Ibarra"] {
        let width = layout::measure(text, &font, 110.0);
        assert!(width > 0.0);
        let x = layout::center_x(1984.0, width);
        assert!(
            (x + width - (1984.0 - x)).abs() < 1e-2,
            "off-center for {text:?}: left {x}, width {width}"
        );
    }
}
