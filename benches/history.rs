//! Benchmarks for undo history
//!
//! Run with: cargo bench history

use lilac::{EditorStateController, HistoryStore};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn snapshot(len: usize) -> String {
    "lorem ipsum ".repeat(len / 12 + 1)
}

// ============================================================================
// HistoryStore
// ============================================================================

#[divan::bench(args = [10, 50, 200])]
fn push_past_capacity(max_size: usize) {
    let mut history = HistoryStore::with_max_size(max_size);
    let content = snapshot(1_000);
    for _ in 0..max_size * 2 {
        history.push(content.as_str());
    }
    divan::black_box(history.undo_count());
}

#[divan::bench(args = [100, 10_000, 100_000])]
fn undo_redo_cycle(content_len: usize) {
    let content = snapshot(content_len);
    let mut history = HistoryStore::with_max_size(50);
    for _ in 0..50 {
        history.push(content.as_str());
    }

    let mut current = content;
    while let Some(previous) = history.undo(&current) {
        current = previous;
    }
    while let Some(next) = history.redo(&current) {
        current = next;
    }
    divan::black_box(current);
}

// ============================================================================
// EditorStateController
// ============================================================================

#[divan::bench(args = [10, 100, 1_000])]
fn controller_typing(keystrokes: usize) {
    let mut controller = EditorStateController::new("", 50).with_on_change(|content| {
        divan::black_box(content.len());
    });
    let mut content = String::new();
    for i in 0..keystrokes {
        content.push(char::from(b'a' + (i % 26) as u8));
        controller.update_content(content.clone(), true);
    }
    divan::black_box(controller.can_undo());
}
