use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::docx::{DOCUMENT_PART, WORDML_NS};
use crate::export::{AuthorError, BlockKind, DocumentAuthor, ExportBlock};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

/// Space after a question paragraph, in twentieths of a point.
const QUESTION_SPACING_AFTER: u32 = 200;
/// Left indent of answer paragraphs, in twips (half an inch).
const ANSWER_INDENT_LEFT: u32 = 720;

/// Writes export blocks as a minimal WordprocessingML package.
#[derive(Debug, Clone)]
pub struct DocxAuthor {
    title: String,
}

impl Default for DocxAuthor {
    fn default() -> Self {
        Self::new("Selected answers")
    }
}

impl DocxAuthor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn core_properties(&self, created: DateTime<Utc>) -> String {
        let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>
<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(&self.title)
        )
    }
}

impl DocumentAuthor for DocxAuthor {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn author(&self, blocks: &[ExportBlock]) -> Result<Vec<u8>, AuthorError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(ROOT_RELS.as_bytes())?;

        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(self.core_properties(Utc::now()).as_bytes())?;

        zip.start_file(DOCUMENT_PART, options)?;
        zip.write_all(document_xml(blocks).as_bytes())?;

        let bytes = zip.finish()?.into_inner();
        debug!("Authored .docx: {} blocks, {} bytes", blocks.len(), bytes.len());
        Ok(bytes)
    }
}

pub(crate) fn document_xml(blocks: &[ExportBlock]) -> String {
    let mut xml = String::with_capacity(256 + blocks.len() * 128);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:document xmlns:w="{WORDML_NS}"><w:body>"#));

    for block in blocks {
        match block.kind {
            BlockKind::Question => {
                xml.push_str(&format!(
                    r#"<w:p><w:pPr><w:spacing w:after="{QUESTION_SPACING_AFTER}"/></w:pPr>"#
                ));
                push_run(&mut xml, &block.text, block.emphasized);
                xml.push_str("</w:p>");
            }
            BlockKind::Answer => {
                xml.push_str(&format!(
                    r#"<w:p><w:pPr><w:ind w:left="{ANSWER_INDENT_LEFT}"/></w:pPr>"#
                ));
                push_run(&mut xml, &block.text, block.emphasized);
                xml.push_str("</w:p>");
            }
            BlockKind::Separator => xml.push_str("<w:p/>"),
        }
    }

    xml.push_str("<w:sectPr/></w:body></w:document>");
    xml
}

fn push_run(xml: &mut String, text: &str, bold: bool) {
    xml.push_str("<w:r>");
    if bold {
        xml.push_str("<w:rPr><w:b/></w:rPr>");
    }
    xml.push_str(r#"<w:t xml:space="preserve">"#);
    xml.push_str(&escape_xml(text));
    xml.push_str("</w:t></w:r>");
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            // not representable in XML 1.0
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::reader::{document_xml_to_text, extract_raw_text_from};
    use std::io::Read;

    fn sample_blocks() -> Vec<ExportBlock> {
        vec![
            ExportBlock::question("1. Is 1 < 2 & 3 > 2?"),
            ExportBlock::answer("a) yes", true),
            ExportBlock::answer("b) no", false),
            ExportBlock::separator(),
        ]
    }

    #[test]
    fn question_and_selected_answer_are_bold() {
        let xml = document_xml(&sample_blocks());
        let doc = roxmltree::Document::parse(&xml).unwrap();

        let bold_texts: Vec<&str> = doc
            .descendants()
            .filter(|n| n.tag_name().name() == "r")
            .filter(|r| r.descendants().any(|n| n.tag_name().name() == "b"))
            .filter_map(|r| {
                r.descendants()
                    .find(|n| n.tag_name().name() == "t")
                    .and_then(|t| t.text())
            })
            .collect();

        assert_eq!(bold_texts, vec!["1. Is 1 < 2 & 3 > 2?", "a) yes"]);
    }

    #[test]
    fn answers_are_indented_and_questions_spaced() {
        let xml = document_xml(&sample_blocks());
        assert_eq!(xml.matches(r#"<w:ind w:left="720"/>"#).count(), 2);
        assert_eq!(xml.matches(r#"<w:spacing w:after="200"/>"#).count(), 1);
        assert!(xml.contains("<w:p/>"));
    }

    #[test]
    fn escapes_markup_and_drops_control_characters() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("bell\u{7}tab\t"), "belltab\t");
    }

    #[test]
    fn authored_package_reads_back_as_text() {
        let bytes = DocxAuthor::default().author(&sample_blocks()).unwrap();

        let text = extract_raw_text_from(Cursor::new(bytes.clone())).unwrap();
        assert_eq!(
            text,
            "1. Is 1 < 2 & 3 > 2?\n\na) yes\n\nb) no\n\n\n\n"
        );

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut core = String::new();
        archive
            .by_name("docProps/core.xml")
            .unwrap()
            .read_to_string(&mut core)
            .unwrap();
        assert!(core.contains("<dc:title>Selected answers</dc:title>"));
        assert!(archive.by_name("[Content_Types].xml").is_ok());
    }

    #[test]
    fn document_xml_round_trips_through_the_reader() {
        let xml = document_xml(&[ExportBlock::question("  leading space kept")]);
        assert_eq!(document_xml_to_text(&xml).unwrap(), "  leading space kept\n\n");
    }
}
