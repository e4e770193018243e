//! Body paragraph reader for Office Open XML word-processing packages.

use crate::core::DocumentReader;
use crate::domain::model::Paragraph;
use crate::utils::error::{EtlError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read_paragraphs(&self, path: &Path) -> Result<Vec<Paragraph>> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let styles = match read_part(&mut archive, STYLES_PART)? {
            Some(xml) => StyleTable::parse(&xml)?,
            None => {
                tracing::debug!("{} has no {}", path.display(), STYLES_PART);
                StyleTable::builtin()
            }
        };

        let document = read_part(&mut archive, DOCUMENT_PART)?.ok_or_else(|| {
            EtlError::DocumentError {
                message: format!("{} is missing {}", path.display(), DOCUMENT_PART),
            }
        })?;

        parse_body_paragraphs(&document, &styles)
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

/// Style declarations of `word/styles.xml`, keyed by style id.
#[derive(Debug, Default)]
struct StyleTable {
    /// First declaration wins for a given id.
    styles: HashMap<String, StyleEntry>,
    /// Last style declared with `w:type="paragraph"` and `w:default="1"`.
    default_style: Option<StyleEntry>,
}

#[derive(Debug, Clone)]
struct StyleEntry {
    id: String,
    kind: Option<String>,
    default: bool,
    name: Option<String>,
}

impl StyleEntry {
    fn builtin(id: &str, name: &str, default: bool) -> Self {
        Self {
            id: id.to_string(),
            kind: Some("paragraph".to_string()),
            default,
            name: Some(name.to_string()),
        }
    }

    /// w:type 省略時視為段落樣式
    fn is_paragraph(&self) -> bool {
        self.kind.as_deref().map_or(true, |kind| kind == "paragraph")
    }

    fn display_name(&self) -> Result<String> {
        self.name
            .as_deref()
            .map(ui_style_name)
            .ok_or_else(|| EtlError::DocumentError {
                message: format!("paragraph style '{}' has no name", self.id),
            })
    }
}

impl StyleTable {
    /// Styles assumed for packages without `word/styles.xml`.
    fn builtin() -> Self {
        let mut table = Self::default();
        table.insert(StyleEntry::builtin("Normal", "Normal", true));
        for level in 1..=9 {
            table.insert(StyleEntry::builtin(
                &format!("Heading{}", level),
                &format!("heading {}", level),
                false,
            ));
        }
        table.insert(StyleEntry::builtin("Title", "Title", false));
        table
    }

    fn parse(xml: &str) -> Result<Self> {
        let mut reader = XmlReader::from_str(xml);
        let mut buf = Vec::new();
        let mut table = Self::default();
        let mut current: Option<StyleEntry> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.local_name().as_ref() == b"style" => {
                    current = Some(StyleEntry {
                        id: attribute(e, b"styleId")?.unwrap_or_default(),
                        kind: attribute(e, b"type")?,
                        default: attribute(e, b"default")?.as_deref() == Some("1"),
                        name: None,
                    });
                }
                Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"name" => {
                    if let Some(entry) = current.as_mut() {
                        entry.name = attribute(e, b"val")?;
                    }
                }
                Event::End(ref e) if e.local_name().as_ref() == b"style" => {
                    if let Some(entry) = current.take() {
                        table.insert(entry);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    fn insert(&mut self, entry: StyleEntry) {
        if entry.default && entry.kind.as_deref() == Some("paragraph") {
            self.default_style = Some(entry.clone());
        }
        self.styles.entry(entry.id.clone()).or_insert(entry);
    }

    /// Unknown ids, non-paragraph styles and absent ids use the default paragraph style.
    fn resolve(&self, style_id: Option<&str>) -> Result<String> {
        let style = style_id
            .and_then(|id| self.styles.get(id))
            .filter(|entry| entry.is_paragraph())
            .or(self.default_style.as_ref());

        match style {
            Some(entry) => entry.display_name(),
            None => Err(EtlError::DocumentError {
                message: "styles.xml declares no default paragraph style".to_string(),
            }),
        }
    }
}

/// Built-in styles are stored with lower-case names; Word shows them capitalised.
fn ui_style_name(name: &str) -> String {
    match name {
        "caption" => "Caption".to_string(),
        "header" => "Header".to_string(),
        "footer" => "Footer".to_string(),
        _ => match name.strip_prefix("heading ") {
            Some(level) if matches!(level.as_bytes(), [b'1'..=b'9']) => {
                format!("Heading {}", level)
            }
            _ => name.to_string(),
        },
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// `w:r` directly under the paragraph or under a `w:hyperlink`.
fn is_run(path: &[Vec<u8>]) -> bool {
    match path {
        [run] => run.as_slice() == b"r",
        [link, run] => link.as_slice() == b"hyperlink" && run.as_slice() == b"r",
        _ => false,
    }
}

struct OpenParagraph {
    /// Index of the `w:p` element in the element stack.
    depth: usize,
    style_id: Option<String>,
    text: String,
}

impl OpenParagraph {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            style_id: None,
            text: String::new(),
        }
    }

    /// Handles a start or empty element whose ancestors below `w:p` are `path`.
    fn element(&mut self, path: &[Vec<u8>], name: &[u8], e: &BytesStart<'_>) -> Result<()> {
        if name == b"pStyle" {
            if matches!(path, [ppr] if ppr.as_slice() == b"pPr") {
                let id = attribute(e, b"val")?.ok_or_else(|| EtlError::DocumentError {
                    message: "w:pStyle element without w:val".to_string(),
                })?;
                self.style_id = Some(id);
            }
            return Ok(());
        }

        if !is_run(path) {
            return Ok(());
        }

        match name {
            b"tab" | b"ptab" => self.text.push('\t'),
            b"cr" => self.text.push('\n'),
            b"noBreakHyphen" => self.text.push('-'),
            b"br" => {
                let kind = attribute(e, b"type")?;
                if matches!(kind.as_deref(), None | Some("textWrapping")) {
                    self.text.push('\n');
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn accepts_text(&self, stack: &[Vec<u8>]) -> bool {
        match &stack[self.depth + 1..] {
            [run_path @ .., t] => t.as_slice() == b"t" && is_run(run_path),
            [] => false,
        }
    }
}

fn is_body(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|parent| parent.as_slice() == b"body")
}

/// Collects the `w:p` children of `w:body` in document order.
///
/// Paragraphs inside tables, text boxes and other containers are skipped.
fn parse_body_paragraphs(xml: &str, styles: &StyleTable) -> Result<Vec<Paragraph>> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut open: Option<OpenParagraph> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = e.local_name().as_ref().to_vec();
                if let Some(paragraph) = open.as_mut() {
                    let path = &stack[paragraph.depth + 1..];
                    paragraph.element(path, &name, e)?;
                } else if name.as_slice() == b"p" && is_body(&stack) {
                    open = Some(OpenParagraph::new(stack.len()));
                }
                stack.push(name);
            }
            Event::Empty(ref e) => {
                let name = e.local_name().as_ref().to_vec();
                if let Some(paragraph) = open.as_mut() {
                    let path = &stack[paragraph.depth + 1..];
                    paragraph.element(path, &name, e)?;
                } else if name.as_slice() == b"p" && is_body(&stack) {
                    paragraphs.push(Paragraph::new(styles.resolve(None)?, ""));
                }
            }
            Event::Text(ref e) => {
                if let Some(paragraph) = open.as_mut() {
                    if paragraph.accepts_text(&stack) {
                        paragraph.text.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(_) => {
                stack.pop();
                if open.as_ref().is_some_and(|p| p.depth == stack.len()) {
                    if let Some(done) = open.take() {
                        let style = styles.resolve(done.style_id.as_deref())?;
                        paragraphs.push(Paragraph::new(style, done.text));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
