//! Per-div dialog classification.
//!
//! Agent turns carry their text directly inside the marked div. User turns
//! nest it two levels down: marked div -> container div -> p.

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Node};

use crate::transcript::{DialogLine, Speaker};

const AGENT_MARKER: &str = "agentSpeech";
const USER_MARKER: &str = "userSpeech";

/// Classify one div against the speech markers.
///
/// Returns `Ok(None)` for divs that are not dialog turns. A div carrying
/// both markers counts as agent speech. A `userSpeech` div without the
/// expected `div > p` nesting is an error.
pub fn dialog_line(el: ElementRef) -> Result<Option<DialogLine>> {
    if has_class(el, AGENT_MARKER) {
        Ok(Some(DialogLine {
            speaker: Speaker::Furhat,
            text: own_text(el),
        }))
    } else if has_class(el, USER_MARKER) {
        Ok(Some(DialogLine {
            speaker: Speaker::User,
            text: nested_paragraph_text(el)?,
        }))
    } else {
        Ok(None)
    }
}

fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Direct text content of the element itself. Child markup is ignored, so a
/// div holding only nested elements yields an empty string.
fn own_text(el: ElementRef) -> String {
    let mut text = String::new();
    for child in el.children() {
        if let Node::Text(t) = child.value() {
            text.push_str(t);
        }
    }
    text.trim().to_string()
}

/// Text of the first `p` inside the first child `div` container.
fn nested_paragraph_text(el: ElementRef) -> Result<String> {
    let container = child_element(el, "div")
        .ok_or_else(|| anyhow!("userSpeech element has no child div container"))?;
    let paragraph = child_element(container, "p")
        .ok_or_else(|| anyhow!("userSpeech container has no child p element"))?;
    Ok(paragraph.text().collect::<String>().trim().to_string())
}

fn child_element<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .find(|c| c.value().name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn classify_first(html: &str) -> Result<Option<DialogLine>> {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        dialog_line(el)
    }

    #[test]
    fn agent_turn() {
        let line = classify_first(r#"<div class="agentSpeech">Hello</div>"#)
            .unwrap()
            .unwrap();
        assert_eq!(line.speaker, Speaker::Furhat);
        assert_eq!(line.text, "Hello");
    }

    #[test]
    fn user_turn() {
        let line =
            classify_first(r#"<div class="userSpeech"><div><p>Hi there</p></div></div>"#)
                .unwrap()
                .unwrap();
        assert_eq!(line.speaker, Speaker::User);
        assert_eq!(line.text, "Hi there");
    }

    #[test]
    fn both_markers_prefer_agent() {
        let line = classify_first(r#"<div class="agentSpeech userSpeech">Hm</div>"#)
            .unwrap()
            .unwrap();
        assert_eq!(line.speaker, Speaker::Furhat);
        assert_eq!(line.text, "Hm");
    }

    #[test]
    fn extra_classes_still_match() {
        let line = classify_first(r#"<div class="logRow agentSpeech left">Ok</div>"#)
            .unwrap()
            .unwrap();
        assert_eq!(line.speaker, Speaker::Furhat);
    }

    #[test]
    fn agent_without_direct_text_is_empty() {
        let line = classify_first(r#"<div class="agentSpeech"><span>Hi</span></div>"#)
            .unwrap()
            .unwrap();
        assert_eq!(line.text, "");
    }

    #[test]
    fn unmarked_div_skipped() {
        let line = classify_first(r#"<div class="console">noise</div>"#).unwrap();
        assert!(line.is_none());
    }

    #[test]
    fn pretty_printed_markup_is_trimmed() {
        let html = "<div class=\"userSpeech\">\n  <div>\n    <p>\n      Yes please\n    </p>\n  </div>\n</div>";
        let line = classify_first(html).unwrap().unwrap();
        assert_eq!(line.text, "Yes please");
    }

    #[test]
    fn missing_container_errors() {
        let err = classify_first(r#"<div class="userSpeech">loose text</div>"#).unwrap_err();
        assert!(err.to_string().contains("child div container"));
    }

    #[test]
    fn missing_paragraph_errors() {
        let err =
            classify_first(r#"<div class="userSpeech"><div><span>Hi</span></div></div>"#)
                .unwrap_err();
        assert!(err.to_string().contains("child p element"));
    }
}
