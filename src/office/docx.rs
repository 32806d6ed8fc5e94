//! WordprocessingML document generation.
//!
//! Fills a fixed narrative template: cover heading, introduction, a styled
//! content sampler, bullet list, example table and conclusion, with a
//! centered page footer.

use crate::model::DocumentRequest;

use super::{filename_slug, xml_escape, Package, PackageError};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
<Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>
</Relationships>"#;

/// Heading/title style definitions. Sizes are half-points.
fn styles_xml() -> String {
    let style = |id: &str, name: &str, size: u32| {
        format!(
            "<w:style w:type=\"paragraph\" w:styleId=\"{id}\">\
             <w:name w:val=\"{name}\"/>\
             <w:pPr><w:spacing w:before=\"240\" w:after=\"120\"/></w:pPr>\
             <w:rPr><w:b/><w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/></w:rPr>\
             </w:style>"
        )
    };
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:styles xmlns:w=\"{W_NS}\">{}{}{}</w:styles>",
        style("Title", "Title", 56),
        style("Heading1", "heading 1", 32),
        style("Heading2", "heading 2", 26),
    )
}

fn numbering_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:numbering xmlns:w=\"{W_NS}\">\
         <w:abstractNum w:abstractNumId=\"0\">\
         <w:lvl w:ilvl=\"0\"><w:numFmt w:val=\"bullet\"/><w:lvlText w:val=\"\u{2022}\"/>\
         <w:lvlJc w:val=\"left\"/><w:pPr><w:ind w:left=\"720\" w:hanging=\"360\"/></w:pPr></w:lvl>\
         </w:abstractNum>\
         <w:num w:numId=\"1\"><w:abstractNumId w:val=\"0\"/></w:num>\
         </w:numbering>"
    )
}

fn footer_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:ftr xmlns:w=\"{W_NS}\">\
         <w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr>\
         <w:r><w:t xml:space=\"preserve\">Documento generado autom\u{e1}ticamente \u{2022} P\u{e1}gina </w:t></w:r>\
         </w:p></w:ftr>"
    )
}

fn styled_paragraph(style: &str, text: &str) -> String {
    format!(
        "<w:p><w:pPr><w:pStyle w:val=\"{style}\"/></w:pPr>\
         <w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        xml_escape(text)
    )
}

fn plain_paragraph(text: &str) -> String {
    format!(
        "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        xml_escape(text)
    )
}

fn bullet_paragraph(text: &str) -> String {
    format!(
        "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr></w:pPr>\
         <w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        xml_escape(text)
    )
}

/// The "Contenido principal" sampler with plain, bold and italic runs.
fn content_sampler() -> String {
    "<w:p>\
     <w:r><w:t xml:space=\"preserve\">Texto normal, seguido de </w:t></w:r>\
     <w:r><w:rPr><w:b/></w:rPr><w:t>texto en negrita</w:t></w:r>\
     <w:r><w:t xml:space=\"preserve\"> y </w:t></w:r>\
     <w:r><w:rPr><w:i/></w:rPr><w:t>texto en cursiva.</w:t></w:r>\
     </w:p>"
        .to_string()
}

fn table_cell(text: &str) -> String {
    format!(
        "<w:tc><w:tcPr><w:tcW w:w=\"0\" w:type=\"auto\"/></w:tcPr>{}</w:tc>",
        plain_paragraph(text)
    )
}

/// Example table: header row plus the request's body rows, padded or
/// truncated to the header width.
fn table(rows: &[Vec<String>]) -> String {
    let columns = rows.first().map_or(3, Vec::len).max(1);
    let headers: Vec<String> = if columns == 3 {
        vec!["Columna A".into(), "Columna B".into(), "Columna C".into()]
    } else {
        (1..=columns).map(|i| format!("Columna {i}")).collect()
    };

    let mut xml = String::from(
        "<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/>\
         <w:tblBorders>\
         <w:top w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:left w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:bottom w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:right w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:insideH w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:insideV w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         </w:tblBorders></w:tblPr>",
    );

    xml.push_str("<w:tr>");
    for header in &headers {
        xml.push_str(&table_cell(header));
    }
    xml.push_str("</w:tr>");

    for row in rows {
        xml.push_str("<w:tr>");
        for i in 0..columns {
            xml.push_str(&table_cell(row.get(i).map_or("", String::as_str)));
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
    xml
}

fn document_xml(request: &DocumentRequest) -> String {
    let mut body = String::new();
    body.push_str(&styled_paragraph("Title", &request.title));
    body.push_str(&plain_paragraph("Generado autom\u{e1}ticamente por docforge."));
    body.push_str("<w:p/>");

    body.push_str(&styled_paragraph("Heading1", "1. Introducci\u{f3}n"));
    body.push_str(&plain_paragraph(&request.intro));

    body.push_str(&styled_paragraph("Heading1", "2. Contenido principal"));
    body.push_str(&content_sampler());

    body.push_str(&styled_paragraph("Heading2", "3. Lista de puntos"));
    for item in &request.items {
        body.push_str(&bullet_paragraph(item));
    }

    body.push_str(&styled_paragraph("Heading2", "4. Tabla de ejemplo"));
    body.push_str(&table(&request.table_rows));

    body.push_str(&styled_paragraph("Heading1", "5. Conclusi\u{f3}n"));
    body.push_str(&plain_paragraph(
        "Aqu\u{ed} puedes poner conclusiones, pr\u{f3}ximos pasos y referencias.",
    ));

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"{W_NS}\" xmlns:r=\"{R_NS}\">\
         <w:body>{body}\
         <w:sectPr><w:footerReference w:type=\"default\" r:id=\"rId3\"/></w:sectPr>\
         </w:body></w:document>"
    )
}

/// Build a complete `.docx` package.
///
/// Returns the document bytes and a suggested download filename.
///
/// # Errors
///
/// Returns a [`PackageError`] if the zip container cannot be assembled.
pub fn build_docx(request: &DocumentRequest) -> Result<(Vec<u8>, String), PackageError> {
    let mut package = Package::new();
    package.part("[Content_Types].xml", CONTENT_TYPES)?;
    package.part("_rels/.rels", ROOT_RELS)?;
    package.part("word/_rels/document.xml.rels", DOCUMENT_RELS)?;
    package.part("word/styles.xml", &styles_xml())?;
    package.part("word/numbering.xml", &numbering_xml())?;
    package.part("word/footer1.xml", &footer_xml())?;
    package.part("word/document.xml", &document_xml(request))?;

    let filename = format!("{}.docx", filename_slug(&request.title, "documento"));
    Ok((package.finish()?, filename))
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use super::*;

    fn sample_request() -> DocumentRequest {
        DocumentRequest {
            title: "Informe de Red".to_string(),
            intro: "Descripci\u{f3}n general & alcance".to_string(),
            items: vec!["Primero".to_string(), "Segundo".to_string()],
            table_rows: vec![
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
                vec!["d".to_string(), "e".to_string()],
            ],
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_build_docx_is_a_zip_with_required_parts() {
        let (bytes, filename) = build_docx(&sample_request()).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        assert_eq!(filename, "informe_de_red.docx");

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/footer1.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part {part}");
        }
    }

    #[test]
    fn test_document_contains_escaped_content() {
        let (bytes, _) = build_docx(&sample_request()).unwrap();
        let document = read_part(&bytes, "word/document.xml");
        assert!(document.contains("Informe de Red"));
        assert!(document.contains("Descripci\u{f3}n general &amp; alcance"));
        assert!(document.contains("texto en negrita"));
    }

    #[test]
    fn test_table_pads_short_rows() {
        let (bytes, _) = build_docx(&sample_request()).unwrap();
        let document = read_part(&bytes, "word/document.xml");
        // Header row + two body rows, three cells each.
        assert_eq!(document.matches("<w:tr>").count(), 3);
        assert_eq!(document.matches("<w:tc>").count(), 9);
        assert!(document.contains("Columna A"));
    }

    #[test]
    fn test_empty_table_still_emits_headers() {
        let mut request = sample_request();
        request.table_rows.clear();
        let (bytes, _) = build_docx(&request).unwrap();
        let document = read_part(&bytes, "word/document.xml");
        assert_eq!(document.matches("<w:tr>").count(), 1);
    }
}
