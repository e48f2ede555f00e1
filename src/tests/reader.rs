use super::ReaderSurface;
use crate::document::{DocLine, Document, LineKind};
use crate::viewport::{Alignment, Rect, ScrollBehavior, ScrollOptions, Surface};

/// 100 rows with sections at rows 0, 40 (subsection at 60) and 80.
fn document() -> Document {
    let lines = (0..100)
        .map(|i| DocLine::plain(LineKind::Body, format!("row {i}")))
        .collect();
    Document::new(
        None,
        lines,
        vec![
            ("intro".to_string(), 0, 0),
            ("mechanics".to_string(), 40, 0),
            ("mechanics-sub".to_string(), 60, 1),
            ("tools".to_string(), 80, 0),
        ],
    )
}

fn reader() -> ReaderSurface {
    let mut reader = ReaderSurface::new(document());
    reader.set_viewport_height(20);
    reader
}

#[test]
fn test_anchor_spans_follow_nesting() {
    let doc = document();
    assert_eq!(doc.anchor("intro").unwrap().rows, 0..40);
    assert_eq!(doc.anchor("mechanics").unwrap().rows, 40..80);
    assert_eq!(doc.anchor("mechanics-sub").unwrap().rows, 60..80);
    assert_eq!(doc.anchor("tools").unwrap().rows, 80..100);
    assert!(doc.anchor("missing").is_none());
}

#[test]
fn test_bounds_shift_with_offset() {
    let mut reader = reader();
    let element = reader.resolve("mechanics").unwrap();
    assert_eq!(reader.bounds(&element), Rect { top: 40, bottom: 80 });

    reader.scroll_by(30);
    assert_eq!(reader.bounds(&element), Rect { top: 10, bottom: 50 });
}

#[test]
fn test_smooth_scroll_converges_on_target() {
    let mut reader = reader();
    let element = reader.resolve("mechanics-sub").unwrap();
    reader.scroll_into_view(&element, ScrollOptions::default());
    assert!(reader.is_animating());
    assert_eq!(reader.offset(), 0, "smooth scroll waits for ticks");

    let mut ticks = 0;
    while reader.tick() {
        ticks += 1;
        assert!(ticks < 100, "animation must terminate");
    }
    assert_eq!(reader.offset(), 60);
    assert!(!reader.is_animating());
    assert!(ticks > 1);
}

#[test]
fn test_auto_scroll_jumps_and_clamps() {
    let mut reader = reader();
    let element = reader.resolve("tools").unwrap();
    reader.scroll_into_view(
        &element,
        ScrollOptions {
            behavior: ScrollBehavior::Auto,
            block: Alignment::Start,
        },
    );
    assert_eq!(reader.offset(), 80);

    reader.set_viewport_height(30);
    assert_eq!(reader.offset(), 70, "offset clamps to the last full page");
}

#[test]
fn test_manual_scroll_cancels_animation() {
    let mut reader = reader();
    let element = reader.resolve("tools").unwrap();
    reader.scroll_into_view(&element, ScrollOptions::default());
    reader.tick();
    reader.scroll_by(-1);
    assert!(!reader.is_animating());
}

#[test]
fn test_paging_and_progress() {
    let mut reader = reader();
    assert_eq!(reader.progress(), 0);
    reader.page_down();
    assert_eq!(reader.offset(), 19);
    reader.to_bottom();
    assert_eq!(reader.offset(), 80);
    assert_eq!(reader.progress(), 100);
    reader.page_up();
    assert_eq!(reader.offset(), 61);
    reader.to_top();
    assert_eq!(reader.offset(), 0);
    assert_eq!(reader.visible_lines().len(), 20);
    assert_eq!(reader.visible_lines()[0].text(), "row 0");
}

#[test]
fn test_short_document_counts_as_read() {
    let mut reader = ReaderSurface::new(Document::new(
        None,
        vec![DocLine::blank(); 5],
        Vec::new(),
    ));
    reader.set_viewport_height(20);
    assert_eq!(reader.max_offset(), 0);
    assert_eq!(reader.progress(), 100);
}

#[test]
fn test_alignment_places_section_in_viewport() {
    let mut reader = reader();
    reader.set_viewport_height(30);
    let element = reader.resolve("mechanics-sub").unwrap();
    let jump = |block| ScrollOptions {
        behavior: ScrollBehavior::Auto,
        block,
    };

    reader.scroll_into_view(&element, jump(Alignment::Center));
    assert_eq!(reader.offset(), 55);
    reader.scroll_into_view(&element, jump(Alignment::End));
    assert_eq!(reader.offset(), 50);
    reader.scroll_into_view(&element, jump(Alignment::Start));
    assert_eq!(reader.offset(), 60);
}
