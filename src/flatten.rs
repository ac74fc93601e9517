use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Node, NodeId};

use crate::document::{COLUMN_TAG, PARAGRAPH_TAG};

static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Flatten every paragraph under `node` into one line of prose.
///
/// Subtrees whose root is in `claimed` belong to another unit and are
/// skipped. Printed column numbers (`<col>`) never reach the output.
///
/// Fragments are joined with a single space, except that a fragment ending
/// in `-` is a word broken across lines: the hyphen is dropped and the next
/// fragment is glued on directly.
///
/// A `node` that is itself a `<p>` is its own single paragraph.
pub fn flatten(node: Node, claimed: &HashSet<NodeId>) -> String {
    let mut paragraphs = Vec::new();
    if node.has_tag_name(PARAGRAPH_TAG) {
        paragraphs.push(node);
    } else {
        collect_paragraphs(node, claimed, &mut paragraphs);
    }

    let mut text = String::new();
    for p in paragraphs {
        let mut fragments = Vec::new();
        collect_fragments(p, &mut fragments);
        for fragment in fragments {
            push_fragment(&mut text, fragment);
        }
    }

    RE_SPACES.replace_all(text.trim_end(), " ").into_owned()
}

fn push_fragment(text: &mut String, fragment: &str) {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return;
    }
    match fragment.strip_suffix('-') {
        Some(stem) => text.push_str(stem),
        None => {
            text.push_str(fragment);
            text.push(' ');
        }
    }
}

/// Outermost `<p>` elements under `node`, in document order.
fn collect_paragraphs<'a, 'input>(
    node: Node<'a, 'input>,
    claimed: &HashSet<NodeId>,
    out: &mut Vec<Node<'a, 'input>>,
) {
    for child in node.children().filter(Node::is_element) {
        if claimed.contains(&child.id()) {
            continue;
        }
        if child.has_tag_name(PARAGRAPH_TAG) {
            out.push(child);
        } else {
            collect_paragraphs(child, claimed, out);
        }
    }
}

/// Text nodes of a paragraph, minus column markers.
fn collect_fragments<'a>(node: Node<'a, '_>, out: &mut Vec<&'a str>) {
    for child in node.children() {
        if child.is_text() {
            if let Some(t) = child.text() {
                out.push(t);
            }
        } else if child.is_element() && !child.has_tag_name(COLUMN_TAG) {
            collect_fragments(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn flat(xml: &str) -> String {
        let doc = Document::parse(xml).unwrap();
        flatten(doc.root_element(), &HashSet::new())
    }

    #[test]
    fn test_paragraphs_joined_with_single_space() {
        assert_eq!(
            flat("<debate><p>  The House met.  </p><p>Prayers.</p></debate>"),
            "The House met. Prayers."
        );
    }

    #[test]
    fn test_soft_hyphen_joins_across_fragments() {
        assert_eq!(
            flat("<debate><p>an extra-<lb/>ordinary <i>meet-</i>ing</p></debate>"),
            "an extraordinary meeting"
        );
    }

    #[test]
    fn test_soft_hyphen_joins_across_paragraphs() {
        assert_eq!(flat("<debate><p>Parlia-</p><p>ment rose.</p></debate>"), "Parliament rose.");
    }

    #[test]
    fn test_column_numbers_suppressed() {
        assert_eq!(
            flat("<debate><p>the noble <col>1234</col> Lord said</p></debate>"),
            "the noble Lord said"
        );
        assert_eq!(
            flat("<debate><p>consti-</p><col>57</col><p>tution</p></debate>"),
            "constitution"
        );
    }

    #[test]
    fn test_space_runs_collapsed() {
        assert_eq!(flat("<debate><p>Order,    order.</p></debate>"), "Order, order.");
    }

    #[test]
    fn test_text_outside_paragraphs_ignored() {
        assert_eq!(
            flat("<debate><title>SUPPLY</title><section><p>Motion made.</p></section></debate>"),
            "Motion made."
        );
    }

    #[test]
    fn test_claimed_subtree_skipped() {
        let doc = Document::parse(
            "<house><p>Own text.</p><sub><date format=\"1900-01-01\"/><p>Other.</p></sub></house>",
        )
        .unwrap();
        let root = doc.root_element();
        let sub = root.children().find(|n| n.has_tag_name("sub")).unwrap();
        let claimed = HashSet::from([sub.id()]);
        assert_eq!(flatten(root, &claimed), "Own text.");
        assert_eq!(flatten(sub, &HashSet::new()), "Other.");
    }

    #[test]
    fn test_paragraph_node_flattens_itself() {
        assert_eq!(flat("<p>Lost <col>9</col> prose here.</p>"), "Lost prose here.");
    }
}
