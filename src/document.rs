use std::fs;
use std::path::Path;

use lexicon_types::Chamber;
use roxmltree::{Document, Node};

use crate::error::{Error, Result};

/// Tag of the dated-element marker.
pub const DATE_TAG: &str = "date";
/// Tag wrapping a printed column number.
pub const COLUMN_TAG: &str = "col";
/// Tag of a paragraph of prose.
pub const PARAGRAPH_TAG: &str = "p";

/// File name used as the source identifier of a transcript.
pub fn source_id(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

pub fn read_transcript(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ReadDocument {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_transcript<'a>(path: &Path, xml: &'a str) -> Result<Document<'a>> {
    Document::parse(xml).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Sitting elements directly under the root: all Commons sittings, then all
/// Lords sittings.
pub fn sittings<'a, 'input>(doc: &'a Document<'input>) -> Vec<(Chamber, Node<'a, 'input>)> {
    let root = doc.root_element();
    [Chamber::Commons, Chamber::Lords]
        .into_iter()
        .flat_map(|chamber| {
            root.children()
                .filter(move |n| n.has_tag_name(chamber.tag()))
                .map(move |n| (chamber, n))
        })
        .collect()
}

/// First element child with the given tag.
pub fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Raw `format` attribute of a `<date>` element.
pub fn date_format<'a>(date: Node<'a, '_>, source_id: &str) -> Result<&'a str> {
    date.attribute("format").ok_or_else(|| Error::MissingDateFormat {
        source_id: source_id.to_string(),
    })
}

/// Raw date of an element that must carry a `<date>` child.
pub fn own_date<'a>(node: Node<'a, '_>, source_id: &str) -> Result<&'a str> {
    let date = child_element(node, DATE_TAG).ok_or_else(|| Error::MissingDate {
        source_id: source_id.to_string(),
        element: node.tag_name().name().to_string(),
    })?;
    date_format(date, source_id)
}

/// Concatenated text of a subtree, whitespace-trimmed.
pub fn inner_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}
