//! PresentationML deck generation.
//!
//! Fills a fixed four-slide template: title slide, agenda, a two-column
//! features slide with a visual placeholder, and a closing/contact slide.
//! The package carries one minimal master/layout/theme chain; slide content
//! is positioned with plain text boxes.

use crate::model::PresentationRequest;

use super::{filename_slug, xml_escape, Package, PackageError};

const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// English Metric Units per inch.
const EMU: i64 = 914_400;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
<Override PartName="/ppt/slides/slide2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
<Override PartName="/ppt/slides/slide3.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
<Override PartName="/ppt/slides/slide4.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#;

const PRESENTATION_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/>
<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml"/>
<Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide4.xml"/>
</Relationships>"#;

const MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#;

const LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#;

const SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#;

fn presentation_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:presentation xmlns:a=\"{A_NS}\" xmlns:r=\"{R_NS}\" xmlns:p=\"{P_NS}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>\
         <p:sldId id=\"256\" r:id=\"rId2\"/>\
         <p:sldId id=\"257\" r:id=\"rId3\"/>\
         <p:sldId id=\"258\" r:id=\"rId4\"/>\
         <p:sldId id=\"259\" r:id=\"rId5\"/>\
         </p:sldIdLst>\
         <p:sldSz cx=\"9144000\" cy=\"6858000\"/>\
         <p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>"
    )
}

const EMPTY_SP_TREE: &str = "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>";

fn slide_master_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldMaster xmlns:a=\"{A_NS}\" xmlns:r=\"{R_NS}\" xmlns:p=\"{P_NS}\">\
         <p:cSld><p:spTree>{EMPTY_SP_TREE}</p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" \
         accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" \
         accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>"
    )
}

fn slide_layout_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldLayout xmlns:a=\"{A_NS}\" xmlns:r=\"{R_NS}\" xmlns:p=\"{P_NS}\" type=\"blank\">\
         <p:cSld><p:spTree>{EMPTY_SP_TREE}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>"
    )
}

/// Minimal but complete theme: PowerPoint requires the full color scheme and
/// three entries in each format-scheme style list.
fn theme_xml() -> String {
    let fills = "<a:fillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:fillStyleLst>";
    let lines = "<a:lnStyleLst>\
         <a:ln w=\"9525\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln w=\"25400\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln w=\"38100\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         </a:lnStyleLst>";
    let effects = "<a:effectStyleLst>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         </a:effectStyleLst>";
    let backgrounds = "<a:bgFillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:bgFillStyleLst>";
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <a:theme xmlns:a=\"{A_NS}\" name=\"docforge\">\
         <a:themeElements>\
         <a:clrScheme name=\"docforge\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
         <a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"docforge\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"docforge\">{fills}{lines}{effects}{backgrounds}</a:fmtScheme>\
         </a:themeElements>\
         </a:theme>"
    )
}

/// One paragraph of run text. `size` is in hundredths of a point.
fn paragraph(text: &str, size: u32, bold: bool, centered: bool) -> String {
    let align = if centered { " algn=\"ctr\"" } else { "" };
    let weight = if bold { " b=\"1\"" } else { "" };
    format!(
        "<a:p><a:pPr{align}/><a:r><a:rPr lang=\"es-MX\" sz=\"{size}\"{weight} dirty=\"0\"/>\
         <a:t>{}</a:t></a:r></a:p>",
        xml_escape(text)
    )
}

/// A positioned text box. Geometry is in EMU.
fn textbox(id: u32, name: &str, x: i64, y: i64, cx: i64, cy: i64, paragraphs: &str) -> String {
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/>\
         <p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"
    )
}

/// The rounded-rectangle visual placeholder on the features slide.
fn placeholder_shape(id: u32, x: i64, y: i64, cx: i64, cy: i64) -> String {
    let text = format!(
        "{}{}",
        paragraph("Espacio para imagen o gr\u{e1}fico", 1400, false, true),
        paragraph("Puedes reemplazarlo con tu imagen", 1400, false, true),
    );
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Placeholder Visual\"/>\
         <p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"roundRect\"><a:avLst/></a:prstGeom>\
         <a:solidFill><a:srgbClr val=\"E8F2FF\"/></a:solidFill>\
         <a:ln w=\"12700\"><a:solidFill><a:srgbClr val=\"4472C4\"/></a:solidFill></a:ln></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\" anchor=\"ctr\"/><a:lstStyle/>{text}</p:txBody></p:sp>"
    )
}

fn slide_xml(shapes: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld xmlns:a=\"{A_NS}\" xmlns:r=\"{R_NS}\" xmlns:p=\"{P_NS}\">\
         <p:cSld><p:spTree>{EMPTY_SP_TREE}{shapes}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>"
    )
}

fn inches(value: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let emu = (value * EMU as f64) as i64;
    emu
}

fn title_slide(request: &PresentationRequest) -> String {
    let title = textbox(
        2,
        "Title",
        inches(0.5),
        inches(2.0),
        inches(9.0),
        inches(1.4),
        &paragraph(&request.title, 4000, true, true),
    );
    let subtitle = textbox(
        3,
        "Subtitle",
        inches(0.5),
        inches(3.5),
        inches(9.0),
        inches(1.0),
        &paragraph(&request.subtitle, 2000, false, true),
    );
    slide_xml(&format!("{title}{subtitle}"))
}

fn agenda_slide(request: &PresentationRequest) -> String {
    let title = textbox(
        2,
        "Title",
        inches(0.5),
        inches(0.4),
        inches(9.0),
        inches(1.0),
        &paragraph("Agenda", 3200, true, false),
    );
    let mut body = paragraph("Introducci\u{f3}n", 1800, false, false);
    for item in &request.agenda_items {
        body.push_str(&paragraph(item, 1800, false, false));
    }
    let list = textbox(
        3,
        "Agenda Items",
        inches(0.8),
        inches(1.6),
        inches(8.4),
        inches(4.5),
        &body,
    );
    slide_xml(&format!("{title}{list}"))
}

fn features_slide(request: &PresentationRequest) -> String {
    let mut left_body = paragraph("Caracter\u{ed}sticas clave", 2800, true, false);
    for item in &request.features_items {
        left_body.push_str(&paragraph(&format!("\u{2022} {item}"), 1800, false, false));
    }
    let left = textbox(
        2,
        "Features",
        inches(0.5),
        inches(1.0),
        inches(4.2),
        inches(4.0),
        &left_body,
    );
    let right = placeholder_shape(3, inches(5.0), inches(1.0), inches(4.0), inches(3.0));
    slide_xml(&format!("{left}{right}"))
}

fn closing_slide() -> String {
    let title = textbox(
        2,
        "Title",
        inches(0.5),
        inches(0.4),
        inches(9.0),
        inches(1.0),
        &paragraph("Cierre y contacto", 3200, true, false),
    );
    let body = format!(
        "{}{}{}",
        paragraph("Gracias por tu atenci\u{f3}n", 2000, false, false),
        paragraph("Email: tu.email@ejemplo.com", 1400, false, false),
        paragraph(
            "\u{bf}Quieres que personalice esto con tus colores, logo o contenido?",
            1400,
            false,
            false,
        ),
    );
    let contact = textbox(
        3,
        "Contact",
        inches(0.8),
        inches(1.6),
        inches(8.4),
        inches(3.5),
        &body,
    );
    slide_xml(&format!("{title}{contact}"))
}

/// Build a complete `.pptx` package.
///
/// Returns the deck bytes and a suggested download filename.
///
/// # Errors
///
/// Returns a [`PackageError`] if the zip container cannot be assembled.
pub fn build_pptx(request: &PresentationRequest) -> Result<(Vec<u8>, String), PackageError> {
    let mut package = Package::new();
    package.part("[Content_Types].xml", CONTENT_TYPES)?;
    package.part("_rels/.rels", ROOT_RELS)?;
    package.part("ppt/presentation.xml", &presentation_xml())?;
    package.part("ppt/_rels/presentation.xml.rels", PRESENTATION_RELS)?;
    package.part("ppt/slideMasters/slideMaster1.xml", &slide_master_xml())?;
    package.part("ppt/slideMasters/_rels/slideMaster1.xml.rels", MASTER_RELS)?;
    package.part("ppt/slideLayouts/slideLayout1.xml", &slide_layout_xml())?;
    package.part("ppt/slideLayouts/_rels/slideLayout1.xml.rels", LAYOUT_RELS)?;
    package.part("ppt/theme/theme1.xml", &theme_xml())?;

    let slides = [
        title_slide(request),
        agenda_slide(request),
        features_slide(request),
        closing_slide(),
    ];
    for (index, slide) in slides.iter().enumerate() {
        let number = index + 1;
        package.part(&format!("ppt/slides/slide{number}.xml"), slide)?;
        package.part(
            &format!("ppt/slides/_rels/slide{number}.xml.rels"),
            SLIDE_RELS,
        )?;
    }

    let filename = format!("{}.pptx", filename_slug(&request.title, "presentacion"));
    Ok((package.finish()?, filename))
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use super::*;

    fn sample_request() -> PresentationRequest {
        PresentationRequest {
            title: "Propuesta T\u{e9}cnica".to_string(),
            subtitle: "Arquitectura distribuida".to_string(),
            agenda_items: vec!["Contexto".to_string(), "Soluci\u{f3}n".to_string()],
            features_items: vec!["Replicaci\u{f3}n".to_string()],
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
    fn test_build_pptx_contains_four_slides_and_master_chain() {
        let (bytes, filename) = build_pptx(&sample_request()).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        assert_eq!(filename, "propuesta_t_cnica.pptx");

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();
        for part in [
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide4.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part {part}");
        }
    }

    #[test]
    fn test_title_slide_carries_request_text() {
        let (bytes, _) = build_pptx(&sample_request()).unwrap();
        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("Propuesta T\u{e9}cnica"));
        assert!(slide.contains("Arquitectura distribuida"));
        assert!(slide.contains("sz=\"4000\""));
    }

    #[test]
    fn test_agenda_slide_lists_items_after_intro() {
        let (bytes, _) = build_pptx(&sample_request()).unwrap();
        let slide = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(slide.contains("Agenda"));
        assert!(slide.contains("Introducci\u{f3}n"));
        assert!(slide.contains("Contexto"));
        assert!(slide.contains("Soluci\u{f3}n"));
    }

    #[test]
    fn test_features_slide_has_placeholder_shape() {
        let (bytes, _) = build_pptx(&sample_request()).unwrap();
        let slide = read_part(&bytes, "ppt/slides/slide3.xml");
        assert!(slide.contains("roundRect"));
        assert!(slide.contains("E8F2FF"));
        assert!(slide.contains("\u{2022} Replicaci\u{f3}n"));
    }
}
