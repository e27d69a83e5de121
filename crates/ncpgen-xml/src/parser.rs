//! Parse XML text into an element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Element, Error, Result};

/// Parse XML text into its root element.
///
/// Character data is kept byte for byte unless the whole run between two tags
/// is whitespace.
pub(crate) fn parse_element_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut pending = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                flush_text(&mut stack, &mut pending);
                stack.push(start_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut stack, &mut pending);
                let element = start_element(&e)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                flush_text(&mut stack, &mut pending);
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Ok(Event::Text(e)) => {
                if !stack.is_empty() {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    pending.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if !stack.is_empty() {
                    pending.push_str(std::str::from_utf8(&e)?);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // Declarations, comments, processing instructions, doctype
            Err(e) => {
                return Err(Error::Xml(format!(
                    "parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml(format!("unclosed element <{}>", open.name)));
    }

    root.ok_or(Error::NoRoot)
}

/// Hand a run of character data to the innermost open element: as its text
/// before the first child, otherwise as the tail of its last child.
fn flush_text(stack: &mut [Element], pending: &mut String) {
    if pending.trim().is_empty() {
        pending.clear();
        return;
    }
    let text = std::mem::take(pending);
    if let Some(parent) = stack.last_mut() {
        match parent.children.last_mut() {
            Some(child) => child.tail.push_str(&text),
            None => parent.text.push_str(&text),
        }
    }
}

/// Build an element (without children) from a start tag.
fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut element = Element::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Attach a finished element to its parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    }
}
