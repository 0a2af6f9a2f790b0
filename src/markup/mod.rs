//! XHTML well-formedness checking
//!
//! The document is tokenized with `quick-xml` and a small checker tracks
//! open elements and entity references. Every problem is reported with the
//! position just past the offending character: the line is zero-based and
//! the column counts characters consumed on that line.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;

/// XML's predefined entities; anything else must be a character reference
const PREDEFINED_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

/// A single well-formedness problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub character: char,
}

impl MarkupError {
    /// Renders the error as a single-line issue message
    pub fn to_issue_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .message
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{}, Line: {}, Column: {}, Char: {}",
            message, self.line, self.column, self.character
        )
    }
}

/// Checks a document for well-formedness
///
/// Returns every problem found, in document order. A tokenizer error ends
/// the scan since no reliable position follows it.
///
/// # Example
///
/// ```
/// use page_checker::markup::check_well_formed;
///
/// assert!(check_well_formed("<html><body/></html>").is_empty());
///
/// let errors = check_well_formed("<html>\n<p></div>\n</html>");
/// assert_eq!(errors[0].message, "Unexpected close tag");
/// ```
pub fn check_well_formed(text: &str) -> Vec<MarkupError> {
    let mut checker = Checker {
        text,
        errors: Vec::new(),
    };
    checker.run();
    checker.errors
}

struct Checker<'a> {
    text: &'a str,
    errors: Vec<MarkupError>,
}

impl<'a> Checker<'a> {
    fn run(&mut self) {
        let mut reader = Reader::from_str(self.text);
        reader.check_end_names(false);

        let mut open: Vec<Vec<u8>> = Vec::new();
        let mut seen_root = false;

        loop {
            let start = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.check_attributes(&e, reader.buffer_position());
                    open.push(e.name().as_ref().to_vec());
                    seen_root = true;
                }
                Ok(Event::Empty(e)) => {
                    self.check_attributes(&e, reader.buffer_position());
                    seen_root = true;
                }
                Ok(Event::End(e)) => {
                    let end = reader.buffer_position();
                    let name = e.name();
                    match open.iter().rposition(|n| n.as_slice() == name.as_ref()) {
                        Some(index) if index + 1 == open.len() => {
                            open.pop();
                        }
                        Some(index) => {
                            self.report("Unexpected close tag", end);
                            open.truncate(index);
                        }
                        None => {
                            let name = String::from_utf8_lossy(name.as_ref()).into_owned();
                            self.report(&format!("Unmatched closing tag: {}", name), end);
                        }
                    }
                }
                Ok(Event::Text(t)) => {
                    let raw: &[u8] = &t;
                    if open.is_empty() && raw.iter().any(|b| !b.is_ascii_whitespace()) {
                        let message = if seen_root {
                            "Text data outside of root node."
                        } else {
                            "Non-whitespace before first tag."
                        };
                        let offset = start
                            + raw
                                .iter()
                                .position(|b| !b.is_ascii_whitespace())
                                .unwrap_or(0)
                            + 1;
                        self.report(message, offset);
                    }
                    self.check_entities(raw, start);
                }
                Ok(Event::Eof) => {
                    if !open.is_empty() {
                        self.report("Unclosed root tag", self.text.len());
                    }
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    self.report(&e.to_string(), reader.buffer_position());
                    break;
                }
            }
        }
    }

    fn check_attributes(&mut self, element: &quick_xml::events::BytesStart<'_>, tag_end: usize) {
        for attribute in element.attributes() {
            match attribute {
                Ok(attribute) => {
                    if let Some((message, _)) = scan_entities(&attribute.value) {
                        self.report(message, tag_end);
                    }
                }
                Err(e) => {
                    self.report(&e.to_string(), tag_end);
                    return;
                }
            }
        }
    }

    /// Reports every bad entity reference in a run of text starting at `base`
    fn check_entities(&mut self, raw: &[u8], base: usize) {
        let mut consumed = 0;
        while let Some((message, end)) = scan_entities(&raw[consumed..]) {
            self.report(message, base + consumed + end);
            consumed += end;
        }
    }

    fn report(&mut self, message: &str, offset: usize) {
        let offset = floor_char_boundary(self.text, offset.min(self.text.len()));
        let consumed = &self.text[..offset];
        let line = consumed.matches('\n').count();
        let column = match consumed.rfind('\n') {
            Some(newline) => consumed[newline + 1..].chars().count(),
            None => consumed.chars().count(),
        };
        let character = consumed.chars().last().unwrap_or(' ');

        tracing::trace!("Markup error at {}:{}: {}", line, column, message);
        self.errors.push(MarkupError {
            message: message.to_string(),
            line,
            column,
            character,
        });
    }
}

/// Finds the first bad entity reference in raw text
///
/// Returns the message and the offset just past the character that made it
/// invalid.
fn scan_entities(raw: &[u8]) -> Option<(&'static str, usize)> {
    let mut index = 0;
    while index < raw.len() {
        if raw[index] != b'&' {
            index += 1;
            continue;
        }

        let name_start = index + 1;
        let mut end = name_start;
        loop {
            match raw.get(end) {
                Some(b';') => break,
                Some(b) if b.is_ascii_alphanumeric() || *b == b'#' || *b == b'_' || *b == b'-' || *b == b'.' => {
                    end += 1;
                }
                Some(_) => return Some(("Invalid character in entity name", end + 1)),
                None => return Some(("Invalid character in entity name", raw.len())),
            }
        }

        let name = &raw[name_start..end];
        if !is_valid_entity(name) {
            return Some(("Invalid character entity", end + 1));
        }
        index = end + 1;
    }
    None
}

fn is_valid_entity(name: &[u8]) -> bool {
    let Ok(name) = std::str::from_utf8(name) else {
        return false;
    };

    if let Some(hex) = name.strip_prefix("#x") {
        return !hex.is_empty() && u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).is_some();
    }
    if let Some(decimal) = name.strip_prefix('#') {
        return !decimal.is_empty() && decimal.parse::<u32>().ok().and_then(char::from_u32).is_some();
    }
    PREDEFINED_ENTITIES.contains(&name)
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
