//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use lilac::dom::{DomPosition, DomRange, NodeId};
use lilac::{ContentMode, Editor, EditorConfig, EditorError, EditorPlugin};

/// Shared, clonable log that closures can push into
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Plain-text editor, mounted
pub fn mounted(content: &str) -> Editor {
    mounted_with(EditorConfig::default(), content)
}

/// Markup-mode editor, mounted
pub fn markup_editor(content: &str) -> Editor {
    let config = EditorConfig {
        content_mode: ContentMode::Markup,
        ..EditorConfig::default()
    };
    mounted_with(config, content)
}

pub fn mounted_with(config: EditorConfig, content: &str) -> Editor {
    let mut editor = Editor::new(config, content);
    editor.mount();
    editor
}

/// Unmounted editor whose errors are recorded as their display strings
pub fn with_error_log(config: EditorConfig, content: &str) -> (Editor, Log) {
    let log = new_log();
    let sink = log.clone();
    let editor = Editor::new(config, content)
        .on_error(move |e: &EditorError| sink.borrow_mut().push(e.to_string()));
    (editor, log)
}

pub fn root(editor: &Editor) -> NodeId {
    editor.root().expect("editor is mounted")
}

/// Markup of the editable root
pub fn html(editor: &Editor) -> String {
    editor.dom().inner_html(root(editor))
}

/// Select a char span of a single text node
pub fn select_in(editor: &mut Editor, node: NodeId, start: usize, end: usize) {
    editor.dom_mut().set_selection(DomRange::new(
        DomPosition::new(node, start),
        DomPosition::new(node, end),
    ));
    editor.handle_selection_change();
}

/// Plugin that records every lifecycle hook it sees as `<id>:<hook>`
pub fn recording_plugin(id: &str, log: &Log) -> EditorPlugin {
    let tag = |hook: &'static str| {
        let log = log.clone();
        let id = id.to_string();
        move |_: &lilac::EditorContext| -> anyhow::Result<()> {
            log.borrow_mut().push(format!("{}:{}", id, hook));
            Ok(())
        }
    };

    let content_log = log.clone();
    let content_id = id.to_string();
    let selection_log = log.clone();
    let selection_id = id.to_string();

    EditorPlugin::new(id, id, "1.0.0")
        .on_install(tag("install"))
        .on_uninstall(tag("uninstall"))
        .on_editor_mount(tag("mount"))
        .on_editor_unmount(tag("unmount"))
        .on_content_change(move |content, _| {
            content_log
                .borrow_mut()
                .push(format!("{}:content:{}", content_id, content));
            Ok(())
        })
        .on_selection_change(move |selection, _| {
            selection_log
                .borrow_mut()
                .push(format!("{}:selection:{:?}", selection_id, selection.map(|s| (s.start, s.end))));
            Ok(())
        })
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a WARN-level subscriber and return the emitted lines
pub fn capture_warnings(f: impl FnOnce()) -> Vec<String> {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
