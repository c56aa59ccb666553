//! Link and image insertion, which have no declarative command

use crate::dom::{Dom, DomPosition, DomRange};

pub const DEFAULT_IMAGE_ALT: &str = "Image";
pub const IMAGE_STYLE: &str = "max-width: 100%; height: auto";

/// Replace the selection with an anchor to `url`, or insert one at the caret.
///
/// The link text is `text`, else the selected text, else the URL itself.
/// Clears the selection afterwards. Returns false when there is no range.
pub fn insert_link(dom: &mut Dom, url: &str, text: Option<&str>) -> bool {
    let Some(range) = dom.selection().copied() else {
        return false;
    };

    let selected = dom.range_text(&range);
    let link_text = text
        .filter(|t| !t.is_empty())
        .or(Some(selected.as_str()).filter(|t| !t.is_empty()))
        .unwrap_or(url)
        .to_string();

    let link = dom.create_element("a");
    dom.set_attribute(link, "href", url);
    dom.set_text_content(link, &link_text);

    let at = if selected.is_empty() {
        range.start
    } else {
        dom.delete_range_contents(&range)
    };
    dom.insert_at(at, link);
    dom.remove_all_ranges();

    tracing::debug!(url, "inserted link");
    true
}

/// Insert an image at the start of the selection and collapse the caret
/// after it. Returns false when there is no range.
pub fn insert_image(dom: &mut Dom, src: &str, alt: Option<&str>) -> bool {
    let Some(range) = dom.selection().copied() else {
        return false;
    };

    let image = dom.create_element("img");
    dom.set_attribute(image, "src", src);
    dom.set_attribute(image, "alt", alt.filter(|a| !a.is_empty()).unwrap_or(DEFAULT_IMAGE_ALT));
    dom.set_attribute(image, "style", IMAGE_STYLE);
    dom.insert_at(range.start, image);

    if let (Some(parent), Some(idx)) = (dom.parent(image), dom.index_in_parent(image)) {
        dom.set_selection(DomRange::caret(DomPosition::new(parent, idx + 1)));
    }

    tracing::debug!(src, "inserted image");
    true
}
