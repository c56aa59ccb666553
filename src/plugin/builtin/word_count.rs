//! `word-count`: document statistics in a side panel

use std::rc::Rc;

use serde::Serialize;

use crate::plugin::{EditorPanel, EditorPlugin, PanelPosition};
use crate::util::strip_tags;

const STYLES: &str = r#"
.lilac-word-count-panel {
  padding: 16px;
  font-family: var(--lilac-font-family);
  font-size: 13px;
  line-height: 1.4;
}
.lilac-word-count-stats {
  display: flex;
  flex-direction: column;
  gap: 8px;
}
.lilac-word-count-stat {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 4px 0;
  border-bottom: 1px solid var(--lilac-color-border);
}
.lilac-word-count-stat:last-child {
  border-bottom: none;
}
.lilac-word-count-stat .label {
  color: var(--lilac-color-text-secondary);
  font-weight: 500;
}
.lilac-word-count-stat .value {
  font-weight: 600;
  color: var(--lilac-color-primary);
  font-variant-numeric: tabular-nums;
}
"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    /// Blocks of text separated by blank lines
    pub paragraphs: usize,
}

impl DocumentStats {
    /// Statistics of `content` with markup tags stripped
    pub fn of(content: &str) -> Self {
        let text = strip_tags(content);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self {
                characters: text.chars().count(),
                ..Self::default()
            };
        }

        Self {
            words: trimmed.split_whitespace().count(),
            characters: text.chars().count(),
            characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
            paragraphs: paragraph_count(&text),
        }
    }

    fn render(&self) -> String {
        let rows = [
            ("Words:", self.words),
            ("Characters:", self.characters),
            ("Characters (no spaces):", self.characters_no_spaces),
            ("Paragraphs:", self.paragraphs),
        ];

        let mut html = String::from(
            "<div class=\"lilac-word-count-panel\"><h3>Document Statistics</h3><div class=\"lilac-word-count-stats\">",
        );
        for (label, value) in rows {
            html.push_str(&format!(
                "<div class=\"lilac-word-count-stat\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>",
                label,
                group_thousands(value)
            ));
        }
        html.push_str("</div></div>");
        html
    }
}

/// Pieces left after splitting on every newline-whitespace-newline run,
/// scanning left to right. Leading and trailing blank lines count, so
/// "\n\na" has two.
fn paragraph_count(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 1;
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\n' {
            let run_end = chars[i + 1..]
                .iter()
                .position(|c| !c.is_whitespace())
                .map_or(chars.len(), |n| i + 1 + n);
            if let Some(last) = chars[i + 1..run_end].iter().rposition(|&c| c == '\n') {
                count += 1;
                i += last + 2;
                continue;
            }
        }
        i += 1;
    }
    count
}

/// `12345` -> `12,345`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn word_count_plugin() -> EditorPlugin {
    let panel = EditorPanel {
        id: "word-count-panel".to_string(),
        title: "Word Count".to_string(),
        icon: Some("file-text".to_string()),
        position: PanelPosition::Right,
        default_open: false,
        render: Rc::new(|ctx| DocumentStats::of(&ctx.state().content).render()),
    };

    EditorPlugin::new("word-count", "Word Count", "1.0.0")
        .with_description("Displays word count and document statistics")
        .with_author("Lilac Editor")
        .with_panel(panel)
        .with_styles(STYLES)
        .on_install(|_| {
            tracing::info!("Word Count plugin installed");
            Ok(())
        })
        .on_uninstall(|_| {
            tracing::info!("Word Count plugin uninstalled");
            Ok(())
        })
}
