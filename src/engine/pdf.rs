use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use rusttype::Scale;

use super::assets::{FontAsset, TemplateAsset};
use super::error::RenderError;
use super::profile::AwardProfile;
use super::{layout, outline, VerifiedRecord};

/// Resource name of the embedded face inside each page's content stream.
const FONT_RES: &str = "F1";
const IMAGE_RES: &str = "Im0";
const BASE_FONT: &str = "Poppins-Bold";

// Simple-font code range covered by the Widths array.
const FIRST_CHAR: u8 = 0x20;
const LAST_CHAR: u8 = 0xFF;

/// Map text to WinAnsi bytes for a `Tj` string.
///
/// ASCII and the Latin-1 block map straight through; anything else becomes
/// `?`. Roster names are Latin text, so this covers the real input space.
pub(super) fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Inverse of [`encode_text`] for building the Widths array.
fn winansi_char(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        _ => None,
    }
}

/// Embed the TTF program as a simple TrueType font object.
///
/// Widths and the descriptor metrics are expressed in the PDF's 1000-unit
/// glyph space, derived from the face's own metrics so viewer advances match
/// [`layout::measure`] exactly.
fn embed_font(doc: &mut Document, asset: &FontAsset) -> ObjectId {
    let font = asset.font();
    let scale = Scale::uniform(1000.0);
    let vm = font.v_metrics(scale);

    let widths: Vec<Object> = (FIRST_CHAR..=LAST_CHAR)
        .map(|code| {
            let width = winansi_char(code)
                .map(|c| font.glyph(c).scaled(scale).h_metrics().advance_width)
                .unwrap_or(0.0);
            width.into()
        })
        .collect();

    let file_id = doc.add_object(Stream::new(
        dictionary! {
            "Length1" => asset.bytes().len() as i64,
        },
        asset.bytes().to_vec(),
    ));

    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => BASE_FONT,
        "Flags" => 32,
        "FontBBox" => vec![(-1000.0f32).into(), vm.descent.into(), 2000.0f32.into(), vm.ascent.into()],
        "ItalicAngle" => 0,
        "Ascent" => vm.ascent,
        "Descent" => vm.descent,
        "CapHeight" => vm.ascent,
        "StemV" => 80,
        "FontFile2" => file_id,
    });

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => BASE_FONT,
        "FirstChar" => FIRST_CHAR as i64,
        "LastChar" => LAST_CHAR as i64,
        "Widths" => widths,
        "FontDescriptor" => descriptor_id,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Embed the background artwork as a DCTDecode image XObject.
///
/// The cache only probed the header; a full decode can still fail here on
/// bytes that looked like an image, which is a composition fault.
fn embed_template(doc: &mut Document, template: &TemplateAsset) -> Result<ObjectId, RenderError> {
    let decoded = image::load_from_memory(template.bytes())
        .map_err(|e| RenderError::composition("image decode", e))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 90)
        .encode(rgb.as_raw(), width, height, image::ColorType::Rgb8)
        .map_err(|e| RenderError::composition("image encode", e))?;

    Ok(doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    )))
}

fn pdf_date() -> String {
    format!("D:{}", Utc::now().format("%Y%m%d%H%M%SZ"))
}

/// Assemble and serialize the single certificate page.
pub(super) fn compose(
    record: &VerifiedRecord,
    profile: &AwardProfile,
    font: &FontAsset,
    template: &TemplateAsset,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = embed_font(&mut doc, font);
    let image_id = embed_template(&mut doc, template)?;

    // The template fills the page edge to edge, so the page adopts the
    // artwork's aspect ratio unless it is smaller than the landscape floor,
    // in which case the floor wins and the artwork is stretched over it.
    let page_width = (template.width() as f32).max(profile.min_width);
    let page_height = (template.height() as f32).max(profile.min_height);

    let mut ops = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                page_width.into(),
                0.into(),
                0.into(),
                page_height.into(),
                0.into(),
                0.into(),
            ],
        ),
        Operation::new("Do", vec![IMAGE_RES.into()]),
        Operation::new("Q", vec![]),
    ];

    let name_width = layout::measure(&record.name, font, profile.name_size);
    let name_x = layout::center_x(page_width, name_width);
    let name_height = layout::text_height(font, profile.name_size);
    let name_y = layout::anchor_y(profile.name_anchor, page_height, name_height);
    outline::draw_outlined(
        &mut ops,
        &record.name,
        name_x,
        name_y,
        profile.name_size,
        FONT_RES,
        profile.fill,
        profile.outline,
        profile.outline_offset,
    );

    if let Some(sub) = &profile.subtitle {
        let gpa = record
            .gpa
            .as_deref()
            .ok_or(RenderError::VerificationRequired)?;
        let text = sub.template.replace("{gpa}", gpa);
        let width = layout::measure(&text, font, sub.size);
        let x = layout::center_x(page_width, width);
        let y = layout::anchor_y(sub.anchor, page_height, layout::text_height(font, sub.size));
        outline::draw_text(&mut ops, &text, x, y, sub.size, FONT_RES, sub.color);
    }

    let content = Content { operations: ops };
    let encoded = content
        .encode()
        .map_err(|e| RenderError::composition("content encode", e))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { FONT_RES => font_id },
            "XObject" => dictionary! { IMAGE_RES => image_id },
        },
        "MediaBox" => vec![0.0.into(), 0.0.into(), page_width.into(), page_height.into()],
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
        "CreationDate" => Object::string_literal(pdf_date()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::composition("serialization", e))?;
    Ok(bytes)
}
