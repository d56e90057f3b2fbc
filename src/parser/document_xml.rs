//! Parsing of the main document part (`word/document.xml`) and of
//! running header/footer parts.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{attr_f32, attr_toggle, attr_value, UNSUPPORTED_CONSTRUCT};
use crate::error::{Error, Result};
use crate::model::{twips_to_points, Alignment, LineSpacing, PageSetup, Paragraph, Run};
use crate::report::Diagnostic;

/// Recognized-but-unhandled constructs. Anything on this list is skipped
/// with a warning; elements not on it are plain unknown markup and are
/// skipped silently for forward compatibility.
const UNSUPPORTED: &[&[u8]] = &[b"tbl", b"drawing", b"pict", b"object", b"oMath", b"oMathPara"];

/// Parsed body of the main document part.
#[derive(Debug, Default)]
pub(crate) struct DocumentBody {
    pub paragraphs: Vec<Paragraph>,
    /// Geometry from the body-level `sectPr`, when declared
    pub page_setup: Option<PageSetup>,
}

/// Accumulates a `sectPr` subtree into a [`PageSetup`].
#[derive(Debug, Default)]
struct SectionBuilder {
    width: Option<f32>,
    height: Option<f32>,
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
    /// Whether the `sectPr` sits inside a paragraph's `pPr` (section
    /// break carrier) rather than at body level
    in_paragraph: bool,
}

impl SectionBuilder {
    fn finish(self) -> PageSetup {
        let fallback = PageSetup::default();
        PageSetup {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
            margin_top: self.top.unwrap_or(fallback.margin_top),
            margin_right: self.right.unwrap_or(fallback.margin_right),
            margin_bottom: self.bottom.unwrap_or(fallback.margin_bottom),
            margin_left: self.left.unwrap_or(fallback.margin_left),
        }
    }
}

fn malformed(part: &str, reason: impl std::fmt::Display) -> Error {
    Error::MalformedMarkup {
        part: part.to_string(),
        reason: reason.to_string(),
    }
}

fn unescape_text(raw: &[u8], part: &str) -> Result<String> {
    let text = std::str::from_utf8(raw).map_err(|e| malformed(part, e))?;
    let text = quick_xml::escape::unescape(text).map_err(|e| malformed(part, e))?;
    Ok(text.into_owned())
}

/// Parse the main document part into paragraphs and page geometry.
///
/// `warnings` collects one diagnostic per skipped unsupported construct,
/// anchored to the paragraph position where it was encountered.
pub(crate) fn parse_document(
    xml: &[u8],
    part: &str,
    warnings: &mut Vec<Diagnostic>,
) -> Result<DocumentBody> {
    let mut reader = Reader::from_reader(xml);

    let mut body = DocumentBody::default();
    let mut para: Option<Paragraph> = None;
    let mut run: Option<Run> = None;
    let mut sect: Option<SectionBuilder> = None;
    let mut in_ppr = false;
    let mut in_run_rpr = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_owned = e.local_name().as_ref().to_vec();
                if UNSUPPORTED.contains(&name_owned.as_slice()) {
                    warnings.push(unsupported_warning(&name_owned, body.paragraphs.len()));
                    let end = e.to_end().into_owned();
                    reader
                        .read_to_end(end.name())
                        .map_err(|err| malformed(part, err))?;
                    continue;
                }
                match name_owned.as_slice() {
                    b"p" => para = Some(Paragraph::new()),
                    b"pPr" => in_ppr = true,
                    b"r" => {
                        if para.is_some() && !in_ppr {
                            run = Some(Run::default());
                        }
                    }
                    b"rPr" => {
                        if run.is_some() && !in_ppr {
                            in_run_rpr = true;
                        }
                    }
                    b"t" => in_text = run.is_some(),
                    b"sectPr" => {
                        sect = Some(SectionBuilder {
                            in_paragraph: in_ppr,
                            ..Default::default()
                        });
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name_owned = e.local_name().as_ref().to_vec();
                if UNSUPPORTED.contains(&name_owned.as_slice()) {
                    warnings.push(unsupported_warning(&name_owned, body.paragraphs.len()));
                    continue;
                }
                handle_empty(
                    &e,
                    &name_owned,
                    &mut para,
                    &mut run,
                    &mut sect,
                    in_ppr,
                    in_run_rpr,
                );
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    if let Some(r) = run.as_mut() {
                        r.text.push_str(&unescape_text(e.as_ref(), part)?);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => {
                    if let (Some(p), Some(r)) = (para.as_mut(), run.take()) {
                        p.add_run(r);
                    }
                }
                b"rPr" => in_run_rpr = false,
                b"pPr" => in_ppr = false,
                b"sectPr" => {
                    if let Some(builder) = sect.take() {
                        let in_paragraph = builder.in_paragraph;
                        let setup = builder.finish();
                        if in_paragraph {
                            if let Some(p) = para.as_mut() {
                                p.section_break = Some(setup);
                            }
                        } else {
                            body.page_setup = Some(setup);
                        }
                    }
                }
                b"p" => {
                    if let Some(p) = para.take() {
                        body.paragraphs.push(p);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    Ok(body)
}

/// Properties arrive as empty elements (`<w:jc w:val="both"/>`); route
/// each to the builder the current context selects.
fn handle_empty(
    e: &BytesStart,
    name: &[u8],
    para: &mut Option<Paragraph>,
    run: &mut Option<Run>,
    sect: &mut Option<SectionBuilder>,
    in_ppr: bool,
    in_run_rpr: bool,
) {
    match name {
        b"jc" if in_ppr => {
            if let (Some(p), Some(v)) = (para.as_mut(), attr_value(e, b"val")) {
                if let Some(alignment) = Alignment::from_wml(&v) {
                    p.alignment = Some(alignment);
                }
            }
        }
        b"spacing" if in_ppr && !in_run_rpr => {
            if let Some(p) = para.as_mut() {
                if let Some(spacing) = parse_line_spacing(e) {
                    p.line_spacing = Some(spacing);
                }
                if let Some(before) = attr_f32(e, b"before") {
                    p.space_before = Some(twips_to_points(before));
                }
                if let Some(after) = attr_f32(e, b"after") {
                    p.space_after = Some(twips_to_points(after));
                }
            }
        }
        b"ind" if in_ppr => {
            if let Some(p) = para.as_mut() {
                if let Some(indent) = parse_first_line_indent(e) {
                    p.first_line_indent = Some(indent);
                }
            }
        }
        b"pStyle" if in_ppr => {
            if let (Some(p), Some(v)) = (para.as_mut(), attr_value(e, b"val")) {
                p.style_id = Some(v);
            }
        }
        b"rStyle" if in_run_rpr => {
            if let (Some(r), Some(v)) = (run.as_mut(), attr_value(e, b"val")) {
                r.style_id = Some(v);
            }
        }
        b"rFonts" if in_run_rpr => {
            if let Some(r) = run.as_mut() {
                let family = attr_value(e, b"ascii").or_else(|| attr_value(e, b"hAnsi"));
                if let Some(family) = family {
                    r.properties.font_family = Some(family);
                }
            }
        }
        b"sz" if in_run_rpr => {
            if let (Some(r), Some(half_points)) = (run.as_mut(), attr_f32(e, b"val")) {
                r.properties.font_size = Some(half_points / 2.0);
            }
        }
        b"b" if in_run_rpr => {
            if let Some(r) = run.as_mut() {
                r.properties.bold = Some(attr_toggle(e));
            }
        }
        b"i" if in_run_rpr => {
            if let Some(r) = run.as_mut() {
                r.properties.italic = Some(attr_toggle(e));
            }
        }
        b"br" => {
            if let Some(r) = run.as_mut() {
                r.text.push('\n');
            }
        }
        b"tab" => {
            if let Some(r) = run.as_mut() {
                r.text.push('\t');
            }
        }
        b"pgSz" => {
            if let Some(s) = sect.as_mut() {
                s.width = attr_f32(e, b"w").map(twips_to_points);
                s.height = attr_f32(e, b"h").map(twips_to_points);
            }
        }
        b"pgMar" => {
            if let Some(s) = sect.as_mut() {
                s.top = attr_f32(e, b"top").map(twips_to_points);
                s.right = attr_f32(e, b"right").map(twips_to_points);
                s.bottom = attr_f32(e, b"bottom").map(twips_to_points);
                s.left = attr_f32(e, b"left").map(twips_to_points);
            }
        }
        b"sectPr" => {
            // An empty sectPr declares a section with default geometry.
            let builder = SectionBuilder {
                in_paragraph: in_ppr,
                ..Default::default()
            };
            if in_ppr {
                if let Some(p) = para.as_mut() {
                    p.section_break = Some(builder.finish());
                }
            }
            *sect = None;
        }
        _ => {}
    }
}

/// `w:spacing` line spacing: `lineRule="auto"` (or absent) carries a
/// multiplier in 240ths; `exact`/`atLeast` carry twips.
fn parse_line_spacing(e: &BytesStart) -> Option<LineSpacing> {
    let line = attr_f32(e, b"line")?;
    match attr_value(e, b"lineRule").as_deref() {
        Some("exact") | Some("atLeast") => Some(LineSpacing::Exact(twips_to_points(line))),
        _ => Some(LineSpacing::Multiple(line / 240.0)),
    }
}

/// `w:ind`: `firstLine` indents the first line, `hanging` outdents it.
fn parse_first_line_indent(e: &BytesStart) -> Option<f32> {
    if let Some(first_line) = attr_f32(e, b"firstLine") {
        return Some(twips_to_points(first_line));
    }
    attr_f32(e, b"hanging").map(|h| -twips_to_points(h))
}

fn unsupported_warning(name: &[u8], paragraph_index: usize) -> Diagnostic {
    let name = String::from_utf8_lossy(name);
    Diagnostic::warning(
        UNSUPPORTED_CONSTRUCT,
        format!("unsupported construct ignored: {name}"),
    )
    .at_paragraph(paragraph_index)
}

/// Extract the plain text of a header/footer part: `w:t` content joined
/// with newlines at paragraph boundaries.
pub(crate) fn extract_text(xml: &[u8], part: &str) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::Text(e)) => {
                if in_text {
                    out.push_str(&unescape_text(e.as_ref(), part)?);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> (DocumentBody, Vec<Diagnostic>) {
        let mut warnings = Vec::new();
        let body = parse_document(xml.as_bytes(), "word/document.xml", &mut warnings).unwrap();
        (body, warnings)
    }

    #[test]
    fn test_paragraph_and_runs() {
        let (body, warnings) = parse(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p>
                  <w:pPr><w:jc w:val="both"/><w:pStyle w:val="Body"/></w:pPr>
                  <w:r>
                    <w:rPr><w:rFonts w:ascii="Times New Roman"/><w:sz w:val="28"/><w:b/></w:rPr>
                    <w:t>Hello </w:t>
                  </w:r>
                  <w:r><w:t xml:space="preserve">world &amp; co</w:t></w:r>
                </w:p>
              </w:body>
            </w:document>"#,
        );

        assert!(warnings.is_empty());
        assert_eq!(body.paragraphs.len(), 1);
        let p = &body.paragraphs[0];
        assert_eq!(p.alignment, Some(Alignment::Justify));
        assert_eq!(p.style_id.as_deref(), Some("Body"));
        assert_eq!(p.runs.len(), 2);
        assert_eq!(p.runs[0].text, "Hello ");
        assert_eq!(p.runs[0].properties.font_size, Some(14.0));
        assert_eq!(p.runs[0].properties.bold, Some(true));
        assert_eq!(
            p.runs[0].properties.font_family.as_deref(),
            Some("Times New Roman")
        );
        assert_eq!(p.runs[1].text, "world & co");
        assert!(p.runs[1].properties.is_plain());
    }

    #[test]
    fn test_spacing_and_indent() {
        let (body, _) = parse(
            r#"<w:document><w:body>
              <w:p>
                <w:pPr>
                  <w:spacing w:line="276" w:lineRule="auto" w:before="120" w:after="240"/>
                  <w:ind w:firstLine="709"/>
                </w:pPr>
                <w:r><w:t>text</w:t></w:r>
              </w:p>
            </w:body></w:document>"#,
        );

        let p = &body.paragraphs[0];
        match p.line_spacing {
            Some(LineSpacing::Multiple(m)) => assert!((m - 1.15).abs() < 1e-3),
            other => panic!("expected multiple spacing, got {other:?}"),
        }
        assert!((p.space_before.unwrap() - 6.0).abs() < 1e-4);
        assert!((p.space_after.unwrap() - 12.0).abs() < 1e-4);
        assert!((p.first_line_indent.unwrap() - 35.45).abs() < 0.01);
    }

    #[test]
    fn test_exact_line_spacing() {
        let (body, _) = parse(
            r#"<w:document><w:body>
              <w:p>
                <w:pPr><w:spacing w:line="360" w:lineRule="exact"/></w:pPr>
                <w:r><w:t>text</w:t></w:r>
              </w:p>
            </w:body></w:document>"#,
        );
        assert_eq!(
            body.paragraphs[0].line_spacing,
            Some(LineSpacing::Exact(18.0))
        );
    }

    #[test]
    fn test_section_break_and_body_geometry() {
        let (body, _) = parse(
            r#"<w:document><w:body>
              <w:p>
                <w:pPr><w:sectPr><w:pgSz w:w="11906" w:h="16838"/>
                  <w:pgMar w:top="1134" w:right="1134" w:bottom="1134" w:left="1134"/>
                </w:sectPr></w:pPr>
                <w:r><w:t>first section</w:t></w:r>
              </w:p>
              <w:p><w:r><w:t>second section</w:t></w:r></w:p>
              <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
            </w:body></w:document>"#,
        );

        let carrier = &body.paragraphs[0];
        let setup = carrier.section_break.expect("section break carrier");
        assert!((setup.width - 595.3).abs() < 0.1);
        assert!((setup.margin_top - 56.7).abs() < 0.1);

        let default = body.page_setup.expect("body-level sectPr");
        assert!((default.width - 612.0).abs() < 0.1);
        // pgMar absent: letter margins fill in.
        assert!((default.margin_left - 72.0).abs() < 0.1);
    }

    #[test]
    fn test_unsupported_construct_warns_and_skips() {
        let (body, warnings) = parse(
            r#"<w:document><w:body>
              <w:p><w:r><w:t>before</w:t></w:r></w:p>
              <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
              <w:p><w:r><w:t>after</w:t></w:r></w:p>
            </w:body></w:document>"#,
        );

        // The table's inner paragraph must not leak into the body.
        assert_eq!(body.paragraphs.len(), 2);
        assert_eq!(body.paragraphs[1].text(), "after");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, UNSUPPORTED_CONSTRUCT);
        assert_eq!(warnings[0].paragraph_index, Some(1));
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let mut warnings = Vec::new();
        let result = parse_document(
            b"<w:document><w:body><w:p></w:body>",
            "word/document.xml",
            &mut warnings,
        );
        assert!(matches!(result, Err(Error::MalformedMarkup { .. })));
    }

    #[test]
    fn test_break_and_tab_become_text() {
        let (body, _) = parse(
            r#"<w:document><w:body>
              <w:p><w:r><w:t>a</w:t><w:br/><w:t>b</w:t><w:tab/><w:t>c</w:t></w:r></w:p>
            </w:body></w:document>"#,
        );
        assert_eq!(body.paragraphs[0].text(), "a\nb\tc");
    }

    #[test]
    fn test_extract_text_for_header_parts() {
        let text = extract_text(
            br#"<w:hdr><w:p><w:r><w:t>Page header</w:t></w:r></w:p></w:hdr>"#,
            "word/header1.xml",
        )
        .unwrap();
        assert_eq!(text.trim(), "Page header");
    }

    #[test]
    fn test_paragraph_mark_rpr_does_not_leak() {
        // rPr inside pPr styles the paragraph mark, not any run.
        let (body, _) = parse(
            r#"<w:document><w:body>
              <w:p>
                <w:pPr><w:rPr><w:sz w:val="48"/></w:rPr></w:pPr>
                <w:r><w:t>text</w:t></w:r>
              </w:p>
            </w:body></w:document>"#,
        );
        assert_eq!(body.paragraphs[0].runs[0].properties.font_size, None);
    }
}
