//! Element tree document model for ROM project files.
//!
//! Project files are plain XML. This crate loads them into a mutable tree of
//! [`Element`]s, offers the handful of lookups the transcoders need (child by
//! name, children filtered by name, attribute get/set, child text get/set,
//! child replacement) and writes the tree back out with two-space indentation.
//!
//! Comments and processing instructions are not retained; whitespace-only text
//! is dropped and the output is re-indented.
//!
//! # Example
//!
//! ```no_run
//! use ncpgen_xml::Document;
//!
//! let doc = Document::load("rom/project.xml")?;
//! if let Some(header) = doc.element(&["NDSProjectFile", "RomInfo", "Header"]) {
//!     println!("{:?}", header.child_text("MainRamAddress"));
//! }
//! doc.save("rom/project.xml")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod element;
mod error;
mod parser;
mod writer;

pub use document::Document;
pub use element::Element;
pub use error::{Error, Result};
