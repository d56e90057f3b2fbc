//! Parsing of the style definitions part (`word/styles.xml`).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{attr_f32, attr_toggle, attr_value};
use crate::error::{Error, Result};
use crate::model::{
    twips_to_points, Alignment, LineSpacing, StyleCatalogue, StyleDefinition,
};

fn malformed(part: &str, reason: impl std::fmt::Display) -> Error {
    Error::MalformedMarkup {
        part: part.to_string(),
        reason: reason.to_string(),
    }
}

/// Formatting fields shared by style definitions and `docDefaults`.
#[derive(Debug, Default)]
struct PropertySink {
    font_family: Option<String>,
    font_size: Option<f32>,
    bold: Option<bool>,
    italic: Option<bool>,
    alignment: Option<Alignment>,
    line_spacing: Option<LineSpacing>,
    first_line_indent: Option<f32>,
}

/// Parse the styles part into a catalogue.
///
/// Paragraph and character styles land in one map; the validator's
/// cascade does not care which flavor a referenced id is. `docDefaults`
/// overrides the factory defaults field by field.
pub(crate) fn parse_styles(xml: &[u8], part: &str) -> Result<StyleCatalogue> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut catalogue = StyleCatalogue::new();
    let mut current: Option<(Option<String>, Option<String>, PropertySink)> = None;
    let mut defaults_sink: Option<PropertySink> = None;
    let mut in_defaults = false;
    let mut in_ppr = false;
    let mut in_rpr = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"docDefaults" => {
                    in_defaults = true;
                    defaults_sink = Some(PropertySink::default());
                }
                b"style" => {
                    let id = attr_value(&e, b"styleId");
                    current = Some((id, None, PropertySink::default()));
                }
                b"pPr" => in_ppr = true,
                b"rPr" => in_rpr = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"basedOn" {
                    if let Some((_, based_on, _)) = current.as_mut() {
                        *based_on = attr_value(&e, b"val");
                    }
                    continue;
                }
                let sink = if in_defaults {
                    defaults_sink.as_mut()
                } else {
                    current.as_mut().map(|(_, _, sink)| sink)
                };
                if let Some(sink) = sink {
                    let name = e.local_name().as_ref().to_vec();
                    collect_property(&name, &e, sink, in_ppr, in_rpr);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"docDefaults" => {
                    in_defaults = false;
                    if let Some(sink) = defaults_sink.take() {
                        apply_defaults(&mut catalogue, sink);
                    }
                }
                b"style" => {
                    if let Some((Some(id), based_on, sink)) = current.take() {
                        catalogue.insert(StyleDefinition {
                            id,
                            based_on,
                            font_family: sink.font_family,
                            font_size: sink.font_size,
                            bold: sink.bold,
                            italic: sink.italic,
                            alignment: sink.alignment,
                            line_spacing: sink.line_spacing,
                            first_line_indent: sink.first_line_indent,
                        });
                    }
                }
                b"pPr" => in_ppr = false,
                b"rPr" => in_rpr = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    log::debug!("parsed {} style definition(s)", catalogue.len());
    Ok(catalogue)
}

fn collect_property(
    name: &[u8],
    e: &BytesStart,
    sink: &mut PropertySink,
    in_ppr: bool,
    in_rpr: bool,
) {
    match name {
        b"rFonts" if in_rpr => {
            if let Some(family) = attr_value(e, b"ascii").or_else(|| attr_value(e, b"hAnsi")) {
                sink.font_family = Some(family);
            }
        }
        b"sz" if in_rpr => {
            if let Some(half_points) = attr_f32(e, b"val") {
                sink.font_size = Some(half_points / 2.0);
            }
        }
        b"b" if in_rpr => sink.bold = Some(attr_toggle(e)),
        b"i" if in_rpr => sink.italic = Some(attr_toggle(e)),
        b"jc" if in_ppr => {
            if let Some(v) = attr_value(e, b"val") {
                if let Some(alignment) = Alignment::from_wml(&v) {
                    sink.alignment = Some(alignment);
                }
            }
        }
        // Inside rPr, w:spacing is letter spacing; only the pPr variant
        // carries line spacing.
        b"spacing" if in_ppr && !in_rpr => {
            if let Some(line) = attr_f32(e, b"line") {
                sink.line_spacing = match attr_value(e, b"lineRule").as_deref() {
                    Some("exact") | Some("atLeast") => {
                        Some(LineSpacing::Exact(twips_to_points(line)))
                    }
                    _ => Some(LineSpacing::Multiple(line / 240.0)),
                };
            }
        }
        b"ind" if in_ppr => {
            if let Some(first_line) = attr_f32(e, b"firstLine") {
                sink.first_line_indent = Some(twips_to_points(first_line));
            } else if let Some(hanging) = attr_f32(e, b"hanging") {
                sink.first_line_indent = Some(-twips_to_points(hanging));
            }
        }
        _ => {}
    }
}

fn apply_defaults(catalogue: &mut StyleCatalogue, sink: PropertySink) {
    let defaults = &mut catalogue.defaults;
    if let Some(family) = sink.font_family {
        defaults.font_family = family;
    }
    if let Some(size) = sink.font_size {
        defaults.font_size = size;
    }
    if let Some(alignment) = sink.alignment {
        defaults.alignment = alignment;
    }
    if let Some(spacing) = sink.line_spacing {
        defaults.line_spacing = spacing;
    }
    if let Some(indent) = sink.first_line_indent {
        defaults.first_line_indent = indent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> StyleCatalogue {
        parse_styles(xml.as_bytes(), "word/styles.xml").unwrap()
    }

    #[test]
    fn test_doc_defaults() {
        let catalogue = parse(
            r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:docDefaults>
                <w:rPrDefault><w:rPr>
                  <w:rFonts w:ascii="Times New Roman"/><w:sz w:val="28"/>
                </w:rPr></w:rPrDefault>
                <w:pPrDefault><w:pPr>
                  <w:jc w:val="both"/><w:spacing w:line="276" w:lineRule="auto"/>
                </w:pPr></w:pPrDefault>
              </w:docDefaults>
            </w:styles>"#,
        );

        assert_eq!(catalogue.defaults.font_family, "Times New Roman");
        assert_eq!(catalogue.defaults.font_size, 14.0);
        assert_eq!(catalogue.defaults.alignment, Alignment::Justify);
        match catalogue.defaults.line_spacing {
            LineSpacing::Multiple(m) => assert!((m - 1.15).abs() < 1e-3),
            other => panic!("expected multiple spacing, got {other:?}"),
        }
    }

    #[test]
    fn test_style_definitions_with_inheritance() {
        let catalogue = parse(
            r#"<w:styles>
              <w:style w:type="paragraph" w:styleId="Base">
                <w:rPr><w:rFonts w:ascii="Times New Roman"/><w:sz w:val="28"/></w:rPr>
              </w:style>
              <w:style w:type="paragraph" w:styleId="Body">
                <w:basedOn w:val="Base"/>
                <w:pPr><w:jc w:val="both"/><w:ind w:firstLine="709"/></w:pPr>
              </w:style>
              <w:style w:type="character" w:styleId="Emphasis">
                <w:rPr><w:i/></w:rPr>
              </w:style>
            </w:styles>"#,
        );

        assert_eq!(catalogue.len(), 3);
        let base = catalogue.get("Base").unwrap();
        assert_eq!(base.font_size, Some(14.0));
        assert!(base.based_on.is_none());

        let body = catalogue.get("Body").unwrap();
        assert_eq!(body.based_on.as_deref(), Some("Base"));
        assert_eq!(body.alignment, Some(Alignment::Justify));
        assert!((body.first_line_indent.unwrap() - 35.45).abs() < 0.01);
        // Inherited fields stay unresolved at parse time.
        assert!(body.font_size.is_none());

        assert_eq!(catalogue.get("Emphasis").unwrap().italic, Some(true));
    }

    #[test]
    fn test_style_without_id_is_dropped() {
        let catalogue = parse(
            r#"<w:styles><w:style w:type="paragraph">
              <w:rPr><w:sz w:val="20"/></w:rPr>
            </w:style></w:styles>"#,
        );
        assert!(catalogue.is_empty());
    }

    #[test]
    fn test_malformed_styles_is_fatal() {
        let result = parse_styles(b"<w:styles><w:style>", "word/styles.xml");
        assert!(matches!(result, Err(Error::MalformedMarkup { .. })));
    }

    #[test]
    fn test_character_spacing_not_line_spacing() {
        // w:spacing inside rPr tweaks letter spacing and must not be
        // read as a line-spacing declaration.
        let catalogue = parse(
            r#"<w:styles><w:style w:styleId="S">
              <w:rPr><w:spacing w:val="20"/></w:rPr>
            </w:style></w:styles>"#,
        );
        assert!(catalogue.get("S").unwrap().line_spacing.is_none());
    }
}
