//! End-to-end tests for manual PDF export

use super::*;
use doc_model::{Manual, Section};
use flate2::read::ZlibDecoder;
use layout_engine::{LayoutConfig, Paginator};
use std::io::Read;
use text_engine::StandardFont;

fn sample_manual() -> Manual {
    Manual::new("Acme")
        .with_section(Section::new("Overview").with_content(
            "# Getting started\nAcme ships a CLI.\n\n- install it\n- run it\n1. configure\n2. deploy",
        ))
        .with_section(Section::new("Reference"))
}

fn uncompressed() -> PdfExportOptions {
    PdfExportOptions::new().with_compression(false)
}

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Inflate every Flate stream in the file and concatenate the results
fn inflate_streams(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut rest = bytes;
    while let Some(start) = find(rest, b"stream\n") {
        let body = &rest[start + 7..];
        let Some(end) = find(body, b"\nendstream") else {
            break;
        };
        let mut decoded = Vec::new();
        if ZlibDecoder::new(&body[..end]).read_to_end(&mut decoded).is_ok() {
            out.push_str(&as_text(&decoded));
        }
        rest = &body[end + b"\nendstream".len()..];
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[test]
fn test_render_manual_structure() {
    let rendered = render_manual(&sample_manual(), &LayoutConfig::default(), &uncompressed()).unwrap();
    assert_eq!(rendered.page_count, 1);

    let text = as_text(&rendered.bytes);
    assert!(text.starts_with("%PDF-1.4"));
    assert!(text.ends_with("%%EOF\n"));
    assert!(text.contains("/Count 1"));
    assert!(text.contains("/Title (Acme Documentation)"));
    assert!(text.contains("/BaseFont /Helvetica-Bold"));
    assert!(text.contains("/Encoding /WinAnsiEncoding"));
}

#[test]
fn test_render_manual_content_order() {
    let rendered = render_manual(&sample_manual(), &LayoutConfig::default(), &uncompressed()).unwrap();
    let text = as_text(&rendered.bytes);

    let expected = [
        "(Acme Documentation) Tj",
        "(Overview) Tj",
        "(Getting started) Tj",
        "(Acme ships a CLI.) Tj",
        "(\\225 install it) Tj",
        "(1. configure) Tj",
        "(2. deploy) Tj",
        "(Reference) Tj",
        "(No content yet.) Tj",
    ];
    let mut cursor = 0;
    for needle in expected {
        let found = text[cursor..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle} missing after offset {cursor}"));
        cursor += found + needle.len();
    }
}

#[test]
fn test_compressed_content_inflates() {
    let rendered = render_manual(&sample_manual(), &LayoutConfig::default(), &PdfExportOptions::default()).unwrap();
    let raw = as_text(&rendered.bytes);
    assert!(!raw.contains("(Overview) Tj"));

    let content = inflate_streams(&rendered.bytes);
    assert!(content.contains("(Overview) Tj"));
    assert!(content.contains("0.07 0.09 0.15 rg"));
}

#[test]
fn test_empty_manual_renders_placeholder_page() {
    let rendered = render_manual(&Manual::default(), &LayoutConfig::default(), &uncompressed()).unwrap();
    assert_eq!(rendered.page_count, 1);
    let text = as_text(&rendered.bytes);
    assert!(text.contains("(No documentation sections available yet.) Tj"));
    assert!(!text.contains("/Title"));
}

#[test]
fn test_explicit_title_wins() {
    let options = uncompressed().with_title("Custom");
    let rendered = render_manual(&sample_manual(), &LayoutConfig::default(), &options).unwrap();
    let text = as_text(&rendered.bytes);
    assert!(text.contains("/Title (Custom)"));
}

#[test]
fn test_long_manual_page_count() {
    let content = (0..400)
        .map(|i| format!("Line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let manual = Manual::new("Big").with_section(Section::new("Everything").with_content(content));
    let rendered = render_manual(&manual, &LayoutConfig::default(), &uncompressed()).unwrap();
    assert!(rendered.page_count >= 8);

    let text = as_text(&rendered.bytes);
    assert!(text.contains(&format!("/Count {}", rendered.page_count)));
    assert_eq!(text.matches("/Type /Page ").count(), rendered.page_count);
}

#[test]
fn test_render_canvas_directly() {
    let mut paginator = Paginator::new(612.0, 792.0, 72.0);
    paginator.draw_line("Letter page", StandardFont::Helvetica, 11.0, 0.0, 14.0);
    let bytes = render_canvas(&paginator.finish(), &uncompressed()).unwrap();
    let text = as_text(&bytes);
    assert!(text.contains("/MediaBox [0 0 612 792]"));
    assert!(text.contains("1 0 0 1 72 720 Tm\n(Letter page) Tj"));
}

#[test]
fn test_invalid_layout_is_an_error() {
    let layout = LayoutConfig::default().with_margin(-1.0);
    let err = render_manual(&sample_manual(), &layout, &uncompressed()).unwrap_err();
    assert!(matches!(err, PdfError::Layout(_)));
}

#[test]
fn test_write_canvas_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manual.pdf");
    let mut paginator = Paginator::new(595.28, 841.89, 50.0);
    paginator.draw_line("Saved", StandardFont::HelveticaBold, 16.0, 0.0, 22.0);
    write_canvas(&paginator.finish(), &path, &PdfExportOptions::default()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}
