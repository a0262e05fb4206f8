//! Minimal PDF 1.4 writer: standard Type1 fonts, text, and filled rectangles.
//!
//! Output is fully deterministic (no timestamps, no document ID) so identical
//! input always yields identical bytes.

use std::fmt::Write as _;

pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;

// Fixed object numbers; pages follow as (page, content) pairs.
const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const INFO_ID: usize = 5;
const FIRST_PAGE_ID: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

/// RGB fill color, components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f64, pub f64, pub f64);

/// Content stream of a single page.
#[derive(Debug, Default, Clone)]
pub struct Page {
    content: Vec<u8>,
}

impl Page {
    /// Draw `text` with its baseline starting at (`x`, `y`).
    pub fn text(&mut self, font: Font, size: f64, x: f64, y: f64, text: &str) {
        let mut op = String::new();
        let _ = write!(
            op,
            "BT /{} {:.2} Tf {:.2} {:.2} Td (",
            font.resource_name(),
            size,
            x,
            y
        );
        self.content.extend_from_slice(op.as_bytes());
        self.content.extend_from_slice(&encode_text(text));
        self.content.extend_from_slice(b") Tj ET\n");
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let op = format!(
            "{:.3} {:.3} {:.3} rg {:.2} {:.2} {:.2} {:.2} re f 0 g\n",
            color.0, color.1, color.2, x, y, width, height
        );
        self.content.extend_from_slice(op.as_bytes());
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: vec![Page::default()],
        }
    }

    pub fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn new_page(&mut self) -> &mut Page {
        self.pages.push(Page::default());
        self.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();

        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let kids: Vec<String> = (0..self.pages.len())
            .map(|i| format!("{} 0 R", page_id(i)))
            .collect();

        push_object(
            &mut out,
            &mut offsets,
            CATALOG_ID,
            format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
        );
        push_object(
            &mut out,
            &mut offsets,
            PAGES_ID,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                self.pages.len()
            )
            .as_bytes(),
        );
        for (id, font) in [(FONT_REGULAR_ID, Font::Regular), (FONT_BOLD_ID, Font::Bold)] {
            push_object(
                &mut out,
                &mut offsets,
                id,
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .as_bytes(),
            );
        }

        let mut info = b"<< /Title (".to_vec();
        info.extend_from_slice(&encode_text(&self.title));
        info.extend_from_slice(b") /Producer (");
        info.extend_from_slice(&encode_text(concat!(
            env!("CARGO_PKG_NAME"),
            " ",
            env!("CARGO_PKG_VERSION")
        )));
        info.extend_from_slice(b") >>");
        push_object(&mut out, &mut offsets, INFO_ID, &info);

        for (i, page) in self.pages.iter().enumerate() {
            let page_dict = format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> /Contents {} 0 R >>",
                PAGES_ID,
                PAGE_WIDTH,
                PAGE_HEIGHT,
                FONT_REGULAR_ID,
                FONT_BOLD_ID,
                page_id(i) + 1
            );
            push_object(&mut out, &mut offsets, page_id(i), page_dict.as_bytes());

            let mut stream = format!("<< /Length {} >>\nstream\n", page.content.len()).into_bytes();
            stream.extend_from_slice(&page.content);
            stream.extend_from_slice(b"\nendstream");
            push_object(&mut out, &mut offsets, page_id(i) + 1, &stream);
        }

        let xref_offset = out.len();
        let size = offsets.len() + 1;
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for offset in &offsets {
            let _ = write!(xref, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG_ID, INFO_ID, xref_offset
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

fn page_id(index: usize) -> usize {
    FIRST_PAGE_ID + index * 2
}

// Objects are written in id order, so `offsets[id - 1]` is the offset of `id`.
fn push_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize, body: &[u8]) {
    debug_assert_eq!(offsets.len() + 1, id);
    offsets.push(out.len());
    out.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
    out.extend_from_slice(body);
    out.extend_from_slice(b"\nendobj\n");
}

/// Encode text as the body of a PDF literal string in WinAnsiEncoding.
/// Characters the encoding lacks become `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\t' | '\n' | '\r' => out.push(b' '),
            ' '..='~' => out.push(c as u8),
            '\u{A0}'..='\u{FF}' => out.push(c as u32 as u8),
            '€' => out.push(0x80),
            '…' => out.push(0x85),
            '‘' => out.push(0x91),
            '’' => out.push(0x92),
            '“' => out.push(0x93),
            '”' => out.push(0x94),
            '•' => out.push(0x95),
            '–' => out.push(0x96),
            '—' => out.push(0x97),
            _ => out.push(b'?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_encode_text_escapes() {
        assert_eq!(encode_text("a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
        assert_eq!(encode_text("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_text("it’s"), vec![b'i', b't', 0x92, b's']);
        assert_eq!(encode_text("日本"), b"??".to_vec());
        assert_eq!(encode_text("a\nb"), b"a b".to_vec());
    }

    #[test]
    fn test_empty_document_structure() {
        let doc = Document::new("Empty");
        let bytes = doc.to_bytes();
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(find(&bytes, b"/Count 1").is_some());
        assert!(find(&bytes, b"/Title (Empty)").is_some());
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut doc = Document::new("Offsets");
        doc.current_page().text(Font::Bold, 16.0, 50.0, 742.0, "Hello");
        doc.new_page().text(Font::Regular, 12.0, 50.0, 742.0, "World");
        let bytes = doc.to_bytes();

        let marker = b"startxref\n";
        let startxref = bytes.windows(marker.len()).rposition(|w| w == marker).unwrap();
        let tail = std::str::from_utf8(&bytes[startxref + marker.len()..]).unwrap();
        let xref_offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_offset..].starts_with(b"xref\n"));

        let table = std::str::from_utf8(&bytes[xref_offset..]).unwrap();
        let entries: Vec<&str> = table.lines().skip(3).take(9).collect();
        assert_eq!(entries.len(), 9);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.len(), 19); // 20 bytes with the newline
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj\n", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn test_page_operators() {
        let mut page = Page::default();
        assert!(page.is_empty());
        page.text(Font::Regular, 12.0, 50.0, 700.5, "Score (avg)");
        page.fill_rect(45.0, 690.0, 200.0, 18.0, Rgb(0.9, 0.94, 1.0));
        let content = String::from_utf8(page.content.clone()).unwrap();
        assert!(content.contains("BT /F1 12.00 Tf 50.00 700.50 Td (Score \\(avg\\)) Tj ET\n"));
        assert!(content.contains("0.900 0.940 1.000 rg 45.00 690.00 200.00 18.00 re f 0 g\n"));
    }

    #[test]
    fn test_stream_length_matches_content() {
        let mut doc = Document::new("Len");
        doc.current_page().text(Font::Regular, 10.0, 1.0, 2.0, "abc");
        let bytes = doc.to_bytes();
        let start = find(&bytes, b"/Length ").unwrap() + 8;
        let digits: String = bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .map(|b| *b as char)
            .collect();
        let len: usize = digits.parse().unwrap();
        let stream_start = find(&bytes, b"stream\n").unwrap() + 7;
        assert_eq!(&bytes[stream_start + len..stream_start + len + 10], b"\nendstream");
    }
}
