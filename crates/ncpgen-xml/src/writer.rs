//! Write an element tree as indented XML.

use std::io::Write;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Element, Error, Result};

const INDENT: usize = 2;

/// Write an XML declaration followed by `root`, indented by two spaces.
///
/// Indentation is only added between children of elements that hold no
/// character data of their own, so text is written back exactly as parsed.
pub(crate) fn write_element_tree<W: Write>(writer: W, root: &Element) -> Result<()> {
    let mut xml_writer = Writer::new(writer);

    write_event(
        &mut xml_writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    write_raw(&mut xml_writer, "\n")?;
    write_element(&mut xml_writer, root, Some(0))?;
    write_raw(&mut xml_writer, "\n")?;

    Ok(())
}

/// Write a single element and its children.
///
/// `depth` is `None` inside mixed content, where nothing may be indented.
fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    depth: Option<usize>,
) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;

    if !element.text.is_empty() {
        write_text(writer, &element.text)?;
    }

    let child_depth = if has_mixed_content(element) {
        None
    } else {
        depth.map(|d| d + 1)
    };
    for child in &element.children {
        if let Some(d) = child_depth {
            write_indent(writer, d)?;
        }
        write_element(writer, child, child_depth)?;
        if !child.tail.is_empty() {
            write_text(writer, &child.tail)?;
        }
    }
    if let (Some(d), Some(_)) = (depth, child_depth) {
        if !element.children.is_empty() {
            write_indent(writer, d)?;
        }
    }

    write_event(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn has_mixed_content(element: &Element) -> bool {
    !element.children.is_empty()
        && (!element.text.is_empty() || element.children.iter().any(|c| !c.tail.is_empty()))
}

/// Character data with only `<`, `>` and `&` escaped, so quotes stay as written.
fn write_text<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    write_event(writer, Event::Text(BytesText::from_escaped(partial_escape(text))))
}

fn write_indent<W: Write>(writer: &mut Writer<W>, depth: usize) -> Result<()> {
    write_raw(writer, &format!("\n{:width$}", "", width = depth * INDENT))
}

fn write_raw<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    writer
        .get_mut()
        .write_all(text.as_bytes())
        .map_err(|e| Error::Xml(e.to_string()))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}
