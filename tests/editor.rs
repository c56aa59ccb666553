//! Editor surface tests: rendering, input, selection, formatting, keys

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{html, markup_editor, mounted, mounted_with, root, with_error_log};
use lilac::dom::{DomPosition, DomRange};
use lilac::editor::{ToolbarItem, ROOT_CLASS};
use lilac::keymap::KeyEvent;
use lilac::{
    ContentMode, Editor, EditorConfig, EditorError, FormatError, SelectionRange, Theme,
    ToolbarTool,
};

// ========================================================================
// Mounting
// ========================================================================

#[test]
fn test_mount_renders_plain_text() {
    let editor = mounted("Hello <b>not bold</b>");
    assert_eq!(editor.dom().text_content(root(&editor)), "Hello <b>not bold</b>");
    assert_eq!(html(&editor), "Hello &lt;b&gt;not bold&lt;/b&gt;");
}

#[test]
fn test_mount_renders_markup() {
    let editor = markup_editor("<p>Hi <b>there</b></p>");
    assert_eq!(html(&editor), "<p>Hi <b>there</b></p>");
}

#[test]
fn test_root_attributes() {
    let editor = mounted("");
    let root = root(&editor);
    assert_eq!(editor.dom().attribute(root, "class"), Some(ROOT_CLASS));
    assert_eq!(editor.dom().attribute(root, "contenteditable"), Some("true"));
    assert_eq!(
        editor.dom().attribute(root, "data-placeholder"),
        Some("Start writing...")
    );
    assert_eq!(editor.dom().parent(root), Some(editor.dom().body()));
}

#[test]
fn test_unmount_detaches_root() {
    let mut editor = mounted("text");
    let root = root(&editor);
    editor.unmount();
    assert!(!editor.is_mounted());
    assert_eq!(editor.dom().parent(root), None);
    // Content survives unmounting
    assert_eq!(editor.content(), "text");
}

#[test]
fn test_auto_focus() {
    let focused = Rc::new(RefCell::new(0));
    let count = focused.clone();
    let config = EditorConfig {
        auto_focus: true,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config, "").on_focus(move || *count.borrow_mut() += 1);
    assert!(!editor.is_focused());
    editor.mount();
    assert!(editor.is_focused());
    editor.focus();
    assert_eq!(*focused.borrow(), 1, "focusing twice fires once");
}

#[test]
fn test_blur_fires_callback() {
    let blurred = Rc::new(RefCell::new(false));
    let flag = blurred.clone();
    let mut editor = Editor::new(EditorConfig::default(), "")
        .on_blur(move || *flag.borrow_mut() = true);
    editor.mount();
    editor.blur();
    assert!(!*blurred.borrow(), "blur without focus is a no-op");
    editor.focus();
    editor.blur();
    assert!(*blurred.borrow());
    assert!(!editor.is_focused());
}

// ========================================================================
// Input and history
// ========================================================================

#[test]
fn test_typing_updates_content_and_history() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    let mut editor = Editor::new(EditorConfig::default(), "")
        .on_change(move |content| sink.borrow_mut().push(content.to_string()));
    editor.mount();

    editor.type_text("Hello").unwrap();
    editor.type_text(" world").unwrap();

    assert_eq!(editor.content(), "Hello world");
    assert_eq!(editor.selection(), Some(SelectionRange::caret(11)));
    assert_eq!(*changes.borrow(), vec!["Hello", "Hello world"]);

    assert!(editor.undo());
    assert_eq!(editor.content(), "Hello");
    assert_eq!(editor.dom().text_content(root(&editor)), "Hello");
    assert!(editor.redo());
    assert_eq!(editor.content(), "Hello world");
    assert!(!editor.redo());
}

#[test]
fn test_typing_replaces_selection() {
    let mut editor = mounted("Hello world");
    editor.set_selection(Some(SelectionRange::new(6, 11)));
    editor.type_text("there").unwrap();
    assert_eq!(editor.content(), "Hello there");
}

#[test]
fn test_handle_input_reads_dom_edits() {
    let mut editor = mounted("abc");
    let root = root(&editor);
    let text = editor.dom().children(root)[0];
    editor.dom_mut().set_text(text, "abcd");
    editor.handle_input().unwrap();
    assert_eq!(editor.content(), "abcd");
    assert!(editor.can_undo());
}

#[test]
fn test_max_length_reverts_input() {
    let config = EditorConfig {
        max_length: Some(5),
        ..EditorConfig::default()
    };
    let (mut editor, errors) = with_error_log(config, "abc");
    editor.mount();

    let err = editor.type_text("def").unwrap_err();
    assert!(matches!(err, EditorError::LengthExceeded { length: 6, max: 5 }));
    assert_eq!(editor.content(), "abc");
    assert_eq!(editor.dom().text_content(root(&editor)), "abc");
    assert!(!editor.can_undo());
    assert_eq!(
        *errors.borrow(),
        vec!["Content length 6 exceeds maximum of 5"]
    );

    editor.type_text("de").unwrap();
    assert_eq!(editor.content(), "abcde");
    assert_eq!(editor.char_counter().as_deref(), Some("5/5"));
}

#[test]
fn test_read_only_reverts_input() {
    let config = EditorConfig {
        read_only: true,
        ..EditorConfig::default()
    };
    let (mut editor, errors) = with_error_log(config, "fixed");
    editor.mount();
    assert_eq!(editor.dom().attribute(root(&editor), "contenteditable"), Some("false"));

    assert!(matches!(editor.type_text("!"), Err(EditorError::ReadOnly)));
    assert_eq!(editor.content(), "fixed");
    assert_eq!(editor.dom().text_content(root(&editor)), "fixed");
    assert_eq!(errors.borrow().len(), 1);

    editor.set_read_only(false);
    assert_eq!(editor.dom().attribute(root(&editor), "contenteditable"), Some("true"));
    editor.type_text("!").unwrap();
    assert_eq!(editor.content(), "fixed!");
}

#[test]
fn test_set_content_is_undoable() {
    let mut editor = mounted("one");
    editor.set_content("two");
    assert_eq!(editor.dom().text_content(root(&editor)), "two");
    assert!(editor.undo());
    assert_eq!(editor.content(), "one");
}

#[test]
fn test_load_content_starts_new_history() {
    let mut editor = mounted("one");
    editor.set_content("two");
    assert!(editor.can_undo());

    editor.load_content("three");
    assert_eq!(editor.dom().text_content(root(&editor)), "three");
    assert!(!editor.can_undo());
    assert!(!editor.undo());
    assert_eq!(editor.content(), "three");

    editor.type_text("!").unwrap();
    assert!(editor.undo());
    assert_eq!(editor.content(), "three");
}

#[test]
fn test_invalid_markup_renders_as_text() {
    let config = EditorConfig {
        content_mode: ContentMode::Markup,
        ..EditorConfig::default()
    };
    let (mut editor, errors) = with_error_log(config, "");
    editor.mount();

    editor.set_content("<p class=\"x");
    assert_eq!(editor.dom().text_content(root(&editor)), "<p class=\"x");
    assert_eq!(editor.content(), "<p class=\"x");
    assert!(errors.borrow()[0].starts_with("Invalid markup"));
}

// ========================================================================
// Selection
// ========================================================================

#[test]
fn test_selection_round_trips_through_dom() {
    let mut editor = markup_editor("<p>Hello <b>big</b> world</p>");
    editor.set_selection(Some(SelectionRange::new(6, 9)));
    assert_eq!(editor.selection(), Some(SelectionRange::new(6, 9)));
    assert_eq!(editor.selected_text(), "big");
}

#[test]
fn test_selection_outside_root_clears_state() {
    let mut editor = mounted("inside");
    editor.set_selection(Some(SelectionRange::new(0, 3)));

    let body = editor.dom().body();
    let outside = editor.dom_mut().create_text("outside");
    editor.dom_mut().append_child(body, outside);
    editor
        .dom_mut()
        .set_selection(DomRange::caret(DomPosition::new(outside, 2)));

    assert_eq!(editor.handle_selection_change(), None);
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.selected_text(), "");
}

#[test]
fn test_selection_callback() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut editor = Editor::new(EditorConfig::default(), "abcdef")
        .on_selection_change(move |s| sink.borrow_mut().push(s));
    editor.mount();

    editor.set_selection(Some(SelectionRange::new(4, 2)));
    editor.set_selection(None);
    assert_eq!(*seen.borrow(), vec![Some(SelectionRange::new(2, 4)), None]);
}

#[test]
fn test_undo_keeps_caret_offset() {
    let mut editor = mounted("");
    editor.type_text("abc").unwrap();
    editor.type_text("def").unwrap();
    editor.set_selection(Some(SelectionRange::caret(2)));
    editor.undo();

    let range = *editor.dom().selection().unwrap();
    assert_eq!(editor.dom().text(range.start.node), Some("abc"));
    assert_eq!(range.start.offset, 2);
}

// ========================================================================
// Formatting
// ========================================================================

#[test]
fn test_bold_tool_wraps_selection() {
    let mut editor = markup_editor("Hello world");
    editor.set_selection(Some(SelectionRange::new(6, 11)));

    assert!(editor.apply_tool(ToolbarTool::Bold, None).unwrap());
    assert_eq!(editor.content(), "Hello <b>world</b>");
    assert!(editor.can_undo());

    assert_eq!(editor.pending_tasks(), 2);
    assert_eq!(editor.flush_deferred(), 2);
    assert!(editor.active_formats().contains(&ToolbarTool::Bold));
    assert!(!editor.active_formats().contains(&ToolbarTool::Italic));
    assert_eq!(editor.selection(), Some(SelectionRange::new(6, 11)));
}

#[test]
fn test_heading_tool() {
    let mut editor = markup_editor("Title");
    editor.set_selection(Some(SelectionRange::caret(2)));
    assert!(editor.apply_tool(ToolbarTool::Heading1, None).unwrap());
    assert_eq!(editor.content(), "<h1>Title</h1>");

    editor.flush_deferred();
    assert!(editor.active_formats().contains(&ToolbarTool::Heading1));
    assert!(!editor.active_formats().contains(&ToolbarTool::Paragraph));
}

#[test]
fn test_collapsed_bold_changes_nothing() {
    let mut editor = markup_editor("abc");
    editor.set_selection(Some(SelectionRange::caret(1)));
    assert!(!editor.apply_tool(ToolbarTool::Bold, None).unwrap());
    assert!(!editor.can_undo());
    assert_eq!(editor.pending_tasks(), 0);
}

#[test]
fn test_list_tool_reports_backend_error() {
    let config = EditorConfig {
        content_mode: ContentMode::Markup,
        ..EditorConfig::default()
    };
    let (mut editor, errors) = with_error_log(config, "item");
    editor.mount();
    editor.set_selection(Some(SelectionRange::new(0, 4)));

    let err = editor.apply_tool(ToolbarTool::BulletList, None).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Format(FormatError::Backend {
            tool: ToolbarTool::BulletList,
            ..
        })
    ));
    assert_eq!(editor.content(), "item");
    assert_eq!(errors.borrow().len(), 1);
}

#[test]
fn test_separator_and_unmounted_tools_are_no_ops() {
    let mut editor = Editor::new(EditorConfig::default(), "x");
    assert!(!editor.apply_tool(ToolbarTool::Bold, None).unwrap());
    editor.mount();
    assert!(!editor.apply_tool(ToolbarTool::Separator, None).unwrap());
}

#[test]
fn test_tools_rejected_when_read_only() {
    let mut editor = markup_editor("abc");
    editor.set_selection(Some(SelectionRange::new(0, 3)));
    editor.set_read_only(true);
    assert!(matches!(
        editor.apply_tool(ToolbarTool::Bold, None),
        Err(EditorError::ReadOnly)
    ));
    assert_eq!(editor.content(), "abc");
}

#[test]
fn test_link_uses_prompted_url() {
    let config = EditorConfig {
        content_mode: ContentMode::Markup,
        ..EditorConfig::default()
    };
    let asked = Rc::new(RefCell::new(Vec::new()));
    let sink = asked.clone();
    let mut editor = Editor::new(config, "Visit site").with_url_prompt(move |tool| {
        sink.borrow_mut().push(tool);
        Some("https://lilac.dev".to_string())
    });
    editor.mount();
    editor.set_selection(Some(SelectionRange::new(6, 10)));

    assert!(editor.apply_tool(ToolbarTool::Link, None).unwrap());
    assert_eq!(editor.content(), "Visit <a href=\"https://lilac.dev\">site</a>");
    assert_eq!(*asked.borrow(), vec![ToolbarTool::Link]);

    // Link insertion clears the selection
    editor.flush_deferred();
    assert_eq!(editor.selection(), None);
}

#[test]
fn test_cancelled_prompt_changes_nothing() {
    let config = EditorConfig {
        content_mode: ContentMode::Markup,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config, "abc").with_url_prompt(|_| None);
    editor.mount();
    editor.set_selection(Some(SelectionRange::new(0, 3)));
    assert!(!editor.apply_tool(ToolbarTool::Link, None).unwrap());
    assert!(!editor.apply_tool(ToolbarTool::Image, Some("  ")).unwrap());
    assert_eq!(editor.content(), "abc");
}

#[test]
fn test_image_inserted_at_caret() {
    let mut editor = markup_editor("ab");
    editor.set_selection(Some(SelectionRange::caret(1)));
    assert!(editor.apply_tool(ToolbarTool::Image, Some("cat.png")).unwrap());
    assert_eq!(
        editor.content(),
        "a<img src=\"cat.png\" alt=\"Image\" style=\"max-width: 100%; height: auto\">b"
    );
}

#[test]
fn test_link_without_selection_is_an_error() {
    let mut editor = markup_editor("abc");
    let err = editor.apply_tool(ToolbarTool::Link, Some("https://x.y")).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Format(FormatError::NoSelection(ToolbarTool::Link))
    ));
}

#[test]
fn test_insert_content_at_caret() {
    let mut editor = markup_editor("ab");
    editor.set_selection(Some(SelectionRange::caret(1)));
    editor.insert_content("<i>x</i>").unwrap();
    assert_eq!(editor.content(), "a<i>x</i>b");
    assert_eq!(editor.selection(), Some(SelectionRange::caret(2)));
}

#[test]
fn test_insert_content_appends_without_selection() {
    let mut editor = markup_editor("<p>one</p>");
    editor.insert_content("<p>two</p>").unwrap();
    assert_eq!(editor.content(), "<p>one</p><p>two</p>");
}

#[test]
fn test_format_selection_unknown_command() {
    let mut editor = markup_editor("abc");
    editor.set_selection(Some(SelectionRange::new(0, 1)));
    let err = editor.format_selection("fontSize", Some("7")).unwrap_err();
    assert!(err.to_string().starts_with("Failed to execute command fontSize"));
    assert!(editor.format_selection("italic", None).unwrap());
    assert_eq!(editor.content(), "<i>a</i>bc");
}

// ========================================================================
// Keyboard
// ========================================================================

#[test]
fn test_shortcut_applies_format() {
    let mut editor = markup_editor("bold me");
    editor.set_selection(Some(SelectionRange::new(0, 4)));
    assert!(editor.handle_key_down(&KeyEvent::cmd("b")));
    assert_eq!(editor.content(), "<b>bold</b> me");
}

#[test]
fn test_undo_redo_shortcuts() {
    let mut editor = mounted("");
    editor.type_text("a").unwrap();
    editor.type_text("b").unwrap();

    assert!(editor.handle_key_down(&KeyEvent::cmd("z")));
    assert_eq!(editor.content(), "a");
    assert!(editor.handle_key_down(&KeyEvent::cmd("Z").with_shift()));
    assert_eq!(editor.content(), "ab");
    assert!(editor.handle_key_down(&KeyEvent::cmd("z")));
    assert!(editor.handle_key_down(&KeyEvent::cmd("y")));
    assert_eq!(editor.content(), "ab");
}

#[test]
fn test_ctrl_and_meta_both_undo() {
    let mut editor = mounted("");
    editor.type_text("a").unwrap();
    editor.type_text("b").unwrap();

    assert!(editor.handle_key_down(&KeyEvent::new("z").with_meta()));
    assert_eq!(editor.content(), "a");
    assert!(editor.handle_key_down(&KeyEvent::new("z").with_ctrl()));
    assert_eq!(editor.content(), "");
    assert!(editor.handle_key_down(&KeyEvent::new("y").with_meta()));
    assert_eq!(editor.content(), "a");
}

#[test]
fn test_format_shortcuts_need_toolbar() {
    let mut config = EditorConfig {
        content_mode: ContentMode::Markup,
        ..EditorConfig::default()
    };
    config.toolbar.show = false;
    let mut editor = mounted_with(config, "abc");
    editor.set_selection(Some(SelectionRange::new(0, 3)));

    assert!(!editor.handle_key_down(&KeyEvent::cmd("b")));
    assert_eq!(editor.content(), "abc");
    assert!(editor.toolbar().is_empty());
}

#[test]
fn test_shortcuts_ignored_when_read_only() {
    let mut editor = mounted("");
    editor.type_text("a").unwrap();
    editor.set_read_only(true);
    assert!(!editor.handle_key_down(&KeyEvent::cmd("z")));
    assert_eq!(editor.content(), "a");
}

#[test]
fn test_unbound_key_is_not_handled() {
    let mut editor = mounted("");
    assert!(!editor.handle_key_down(&KeyEvent::new("a")));
    assert!(!editor.handle_key_down(&KeyEvent::cmd("q")));
}

// ========================================================================
// View model
// ========================================================================

#[test]
fn test_toolbar_lists_configured_tools() {
    let mut config = EditorConfig::default();
    config.toolbar.tools = vec![ToolbarTool::Bold, ToolbarTool::Separator, ToolbarTool::Link];
    let mut editor = mounted_with(config, "abc");
    editor.set_selection(Some(SelectionRange::new(0, 1)));

    let toolbar = editor.toolbar();
    assert_eq!(toolbar.len(), 3);
    assert!(matches!(
        toolbar[0],
        ToolbarItem::Tool {
            tool: ToolbarTool::Bold,
            active: false,
            disabled: false,
            ..
        }
    ));
    assert_eq!(toolbar[1], ToolbarItem::Separator);

    let json = serde_json::to_value(&toolbar[2]).unwrap();
    assert_eq!(json["kind"], "tool");
    assert_eq!(json["tool"], "link");
}

#[test]
fn test_toolbar_disabled_when_read_only() {
    let config = EditorConfig {
        read_only: true,
        ..EditorConfig::default()
    };
    let editor = mounted_with(config, "");
    assert!(editor.toolbar().iter().all(|item| match item {
        ToolbarItem::Tool { disabled, .. } => *disabled,
        _ => true,
    }));
}

#[test]
fn test_presentation_state() {
    let mut config = EditorConfig {
        theme: Theme::Dark,
        max_length: Some(100),
        class_name: Some("notes".to_string()),
        ..EditorConfig::default()
    };
    config.placeholder = "Say something".to_string();
    let mut editor = mounted_with(config, " \n ");

    assert!(editor.is_empty());
    assert_eq!(editor.placeholder(), Some("Say something"));
    assert_eq!(
        editor.class_names(),
        vec!["lilac-editor", "lilac-editor--dark", "lilac-editor--empty", "notes"]
    );

    editor.set_content("héllo");
    assert!(!editor.is_empty());
    assert_eq!(editor.placeholder(), None);
    assert_eq!(editor.char_count(), 5);
    assert_eq!(editor.char_counter().as_deref(), Some("5/100"));
}

#[test]
fn test_markup_emptiness_ignores_tags() {
    let editor = markup_editor("<p> </p><br>");
    assert!(editor.is_empty());
    assert_eq!(editor.char_counter(), None);
}
