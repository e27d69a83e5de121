//! Whole-document load and save.

use std::path::Path;

use ncpgen_common::artifact;

use crate::parser::parse_element_tree;
use crate::writer::write_element_tree;
use crate::{Element, Error, Result};

/// A loaded XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wrap an existing element tree.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse a document from XML text.
    pub fn parse(xml: &str) -> Result<Self> {
        parse_element_tree(xml).map(Self::new)
    }

    /// Load and parse a document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = artifact::read(path.as_ref())?;
        let xml = std::str::from_utf8(&bytes)?;
        Self::parse(xml)
    }

    /// Look up an element by its tag path, starting with the root's name.
    pub fn element(&self, path: &[&str]) -> Option<&Element> {
        let (first, rest) = path.split_first()?;
        if self.root.name != *first {
            return None;
        }
        rest.iter()
            .try_fold(&self.root, |element, name| element.find_child(name))
    }

    /// Look up an element by its tag path, mutably.
    pub fn element_mut(&mut self, path: &[&str]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        if self.root.name != *first {
            return None;
        }
        rest.iter()
            .try_fold(&mut self.root, |element, name| element.find_child_mut(name))
    }

    /// Look up an element by path, failing with [`Error::MissingElement`].
    pub fn require(&self, path: &[&str]) -> Result<&Element> {
        self.element(path)
            .ok_or_else(|| Error::MissingElement(path.join("/")))
    }

    /// Look up an element by path mutably, failing with [`Error::MissingElement`].
    pub fn require_mut(&mut self, path: &[&str]) -> Result<&mut Element> {
        self.element_mut(path)
            .ok_or_else(|| Error::MissingElement(path.join("/")))
    }

    /// Convert to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        write_element_tree(&mut output, &self.root)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write the document to disk, replacing the existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let xml = self.to_xml_string()?;
        artifact::write(path.as_ref(), xml.as_bytes())?;
        Ok(())
    }
}
