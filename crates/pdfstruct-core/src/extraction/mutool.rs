use crate::error::PdfStructError;
use crate::extraction::{BBox, PageSpans, Span, SpanSource};
use std::io::Write;
use std::process::Command;

/// Span backend using mutool (from mupdf-tools).
///
/// Runs `mutool draw -F stext` and parses the structured-text XML: each
/// `<font>` run inside a `<line>` becomes one span, carrying the font size
/// from the run and the vertical bounds of the enclosing line.
pub struct MutoolSource;

impl MutoolSource {
    pub fn new() -> Self {
        MutoolSource
    }

    /// Check if mutool is available on the system.
    pub fn is_available() -> bool {
        Command::new("mutool")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for MutoolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanSource for MutoolSource {
    fn load_pages(&self, doc_bytes: &[u8]) -> Result<Vec<PageSpans>, PdfStructError> {
        // Write document bytes to a temp file; dropped (and deleted) on every
        // exit path, error or not.
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| PdfStructError::InvalidDocument(e.to_string()))?;
        tmpfile
            .write_all(doc_bytes)
            .map_err(|e| PdfStructError::InvalidDocument(e.to_string()))?;

        let output = Command::new("mutool")
            .arg("draw")
            .arg("-F")
            .arg("stext")
            .arg("-o")
            .arg("-") // output to stdout
            .arg(tmpfile.path())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PdfStructError::MutoolNotFound
                } else {
                    PdfStructError::InvalidDocument(format!("mutool failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(PdfStructError::MutoolFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_stext_xml(&xml);

        if pages.is_empty() {
            return Err(PdfStructError::NoUsableText(
                "mutool produced no pages".into(),
            ));
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "mutool"
    }
}

fn parse_stext_xml(xml: &str) -> Vec<PageSpans> {
    let mut pages: Vec<PageSpans> = Vec::new();
    let mut current_lines: Vec<Vec<Span>> = Vec::new();
    let mut current_spans: Vec<Span> = Vec::new();
    let mut line_bbox: Option<BBox> = None;
    let mut font_size: f64 = 0.0;
    let mut text = String::new();
    let mut in_page = false;

    for raw in xml.lines() {
        let line = raw.trim();

        if line.starts_with("<page ") {
            in_page = true;
            current_lines.clear();
            continue;
        }

        if line.starts_with("</page>") {
            if in_page {
                pages.push(PageSpans {
                    page_index: pages.len(),
                    lines: std::mem::take(&mut current_lines),
                });
            }
            in_page = false;
            continue;
        }

        if line.starts_with("<line ") {
            line_bbox = parse_attr(line, "bbox").and_then(parse_bbox);
            current_spans.clear();
            continue;
        }

        if line.starts_with("<font ") {
            font_size = parse_attr_f64(line, "size").unwrap_or(0.0);
            text.clear();
            continue;
        }

        if line.starts_with("<char ") {
            if let Some(c) = parse_attr(line, "c") {
                text.push_str(&decode_xml_entities(c));
            }
            continue;
        }

        if line.starts_with("</font>") {
            if !text.is_empty() {
                current_spans.push(Span {
                    text: std::mem::take(&mut text),
                    font_size,
                    bbox: line_bbox.clone(),
                });
            }
            continue;
        }

        if line.starts_with("</line>") {
            if !current_spans.is_empty() {
                current_lines.push(std::mem::take(&mut current_spans));
            }
            line_bbox = None;
        }
    }

    pages
}

fn parse_attr_f64(tag: &str, name: &str) -> Option<f64> {
    parse_attr(tag, name)?.parse().ok()
}

fn parse_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// An stext bbox attribute holds four space-separated coordinates.
fn parse_bbox(attr: &str) -> Option<BBox> {
    let mut parts = attr.split_whitespace().map(|p| p.parse::<f64>());
    Some(BBox {
        left: parts.next()?.ok()?,
        top: parts.next()?.ok()?,
        right: parts.next()?.ok()?,
        bottom: parts.next()?.ok()?,
    })
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<document name="sample.pdf">
  <page id="page1" width="612" height="792">
    <block bbox="72.0 72.0 540.0 96.0">
      <line bbox="72.0 72.0 540.0 96.0" wmode="0" dir="1 0">
        <font name="Helvetica-Bold" size="24">
          <char quad="q" x="72" y="90" c="B"/>
          <char quad="q" x="86" y="90" c="i"/>
          <char quad="q" x="94" y="90" c="g"/>
        </font>
      </line>
      <line bbox="72.0 110.0 540.0 122.0" wmode="0" dir="1 0">
        <font name="Helvetica" size="10">
          <char quad="q" x="72" y="120" c="a"/>
          <char quad="q" x="80" y="120" c="&amp;"/>
          <char quad="q" x="88" y="120" c="b"/>
        </font>
      </line>
    </block>
  </page>
</document>
"#;

    #[test]
    fn parses_pages_lines_and_font_runs() {
        let pages = parse_stext_xml(SAMPLE);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_index, 0);
        assert_eq!(pages[0].lines.len(), 2);

        let title = &pages[0].lines[0][0];
        assert_eq!(title.text, "Big");
        assert_eq!(title.font_size, 24.0);
        let bbox = title.bbox.as_ref().unwrap();
        assert_eq!(bbox.top, 72.0);
        assert_eq!(bbox.bottom, 96.0);

        let body = &pages[0].lines[1][0];
        assert_eq!(body.text, "a&b");
        assert_eq!(body.font_size, 10.0);
    }

    #[test]
    fn empty_document_yields_no_pages() {
        assert!(parse_stext_xml("<document name=\"x\">\n</document>").is_empty());
    }

    #[test]
    fn bbox_attr_parses_four_coordinates() {
        let bbox = parse_bbox("10.5 20 30.5 40").unwrap();
        assert_eq!(bbox.left, 10.5);
        assert_eq!(bbox.bottom, 40.0);
        assert!(parse_bbox("10 20 30").is_none());
    }
}
