//! Benchmarks for editor hot paths: offset translation, typing, formatting
//!
//! Run with: cargo bench editor_ops

use lilac::dom::Dom;
use lilac::offset::{position_at_offset, text_offset};
use lilac::{ContentMode, Editor, EditorConfig, SelectionRange, ToolbarTool};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn paragraphs(count: usize) -> String {
    (0..count)
        .map(|i| format!("<p>Paragraph {} with <b>bold</b> and <i>italic</i> text.</p>", i))
        .collect()
}

fn markup_editor(content: &str) -> Editor {
    let config = EditorConfig {
        content_mode: ContentMode::Markup,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config, content);
    editor.mount();
    editor
}

// ============================================================================
// Offset translation
// ============================================================================

#[divan::bench(args = [10, 100, 1_000])]
fn offset_round_trip(paragraph_count: usize) {
    let mut dom = Dom::new();
    let root = dom.create_element("div");
    dom.set_inner_html(root, &paragraphs(paragraph_count))
        .expect("valid markup");
    let total = dom.text_content(root).chars().count();

    for offset in [0, total / 4, total / 2, total] {
        let position = position_at_offset(&dom, root, offset);
        divan::black_box(text_offset(&dom, root, position));
    }
}

// ============================================================================
// Editing
// ============================================================================

#[divan::bench(args = [10, 100])]
fn type_at_end(paragraph_count: usize) {
    let mut editor = markup_editor(&paragraphs(paragraph_count));
    for ch in ["a", "b", "c", "d", "e"] {
        editor.type_text(ch).expect("no max length");
    }
    divan::black_box(editor.content().len());
}

#[divan::bench(args = [10, 100])]
fn toggle_bold(paragraph_count: usize) {
    let mut editor = markup_editor(&paragraphs(paragraph_count));
    editor.set_selection(Some(SelectionRange::new(0, 9)));
    for _ in 0..2 {
        editor
            .apply_tool(ToolbarTool::Bold, None)
            .expect("bold is supported");
        editor.flush_deferred();
    }
    divan::black_box(editor.active_formats().len());
}
