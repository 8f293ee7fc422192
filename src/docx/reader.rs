use log::{debug, info};
use roxmltree::Node;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::docx::{DOCUMENT_PART, WORDML_NS};
use crate::extractor::ExtractError;

/// Plain text of every paragraph in a .docx file.
///
/// Each paragraph is followed by a blank line. Tabs and manual line breaks
/// inside a paragraph become `\t` and `\n`. Formatting is dropped.
pub fn extract_raw_text(path: &Path) -> Result<String, ExtractError> {
    info!("Extracting text from {}", path.display());
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    extract_raw_text_from(BufReader::new(file))
}

pub fn extract_raw_text_from<R: Read + Seek>(reader: R) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| ExtractError::invalid(format!("not a Word document: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractError::invalid(format!("missing {DOCUMENT_PART}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::invalid(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    document_xml_to_text(&xml)
}

pub(crate) fn document_xml_to_text(xml: &str) -> Result<String, ExtractError> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| ExtractError::invalid(format!("malformed {DOCUMENT_PART}: {e}")))?;

    let mut text = String::new();
    let mut paragraphs = 0usize;
    collect_paragraphs(doc.root(), &mut text, &mut paragraphs);

    debug!("Extracted {paragraphs} paragraphs, {} bytes", text.len());
    Ok(text)
}

fn is_wordml(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace().is_none_or(|ns| ns == WORDML_NS)
}

fn collect_paragraphs(node: Node, out: &mut String, count: &mut usize) {
    for child in node.children().filter(Node::is_element) {
        if is_wordml(&child, "p") {
            append_run_text(child, out);
            out.push_str("\n\n");
            *count += 1;
        } else {
            collect_paragraphs(child, out, count);
        }
    }
}

fn append_run_text(node: Node, out: &mut String) {
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "t" if is_wordml(&child, "t") => {
                if let Some(text) = child.text() {
                    out.push_str(text);
                }
            }
            "tab" if is_wordml(&child, "tab") => out.push('\t'),
            "br" | "cr" => out.push('\n'),
            // a paragraph nested in a text box still reads as its own line
            "p" if is_wordml(&child, "p") => {
                out.push('\n');
                append_run_text(child, out);
                out.push('\n');
            }
            _ => append_run_text(child, out),
        }
    }
}
