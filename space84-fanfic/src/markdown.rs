//! Markdown artist document parser
//!
//! Artist pages are Markdown files that open with a `---` delimited
//! frontmatter block of `key: value` lines, followed by a body split into
//! `#` headed sections.
//!
//! Structural problems (no frontmatter, unclosed block, stray lines inside
//! it) are parse errors. A section that simply isn't there yields an empty
//! list.

use space84_common::{Error, Result};
use std::collections::BTreeMap;

const FRONTMATTER_DELIMITER: &str = "---";

/// A frontmatter value: either a single scalar or a YAML-style block list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    Scalar(String),
    List(Vec<String>),
}

/// Parsed `key: value` block at the top of the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: BTreeMap<String, FrontmatterValue>,
}

impl Frontmatter {
    /// Scalar value for the first key present; empty strings count as absent
    pub fn scalar(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| match self.entries.get(*key) {
            Some(FrontmatterValue::Scalar(value)) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        })
    }

    /// List value for the first key present
    ///
    /// Scalars are accepted as inline lists, either `[a, b]` or `a, b`.
    pub fn list(&self, keys: &[&str]) -> Vec<String> {
        for key in keys {
            match self.entries.get(*key) {
                Some(FrontmatterValue::List(items)) if !items.is_empty() => return items.clone(),
                Some(FrontmatterValue::Scalar(value)) if !value.is_empty() => {
                    return split_inline_list(value)
                }
                _ => {}
            }
        }
        Vec::new()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A `#` headed section of the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text with the hashes stripped
    pub title: String,
    /// Raw lines up to the next heading
    pub lines: Vec<String>,
}

impl Section {
    /// Case-insensitive substring match on the heading
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }

    /// `- item` bullet entries, in authored order
    pub fn bullet_items(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| line.trim_start().strip_prefix("- "))
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Names captured from `N. [Name](url)` numbered links
    pub fn numbered_link_names(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| numbered_link_name(line))
            .map(str::to_string)
            .collect()
    }
}

/// Parsed Markdown artist document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub frontmatter: Frontmatter,
    pub sections: Vec<Section>,
}

impl MarkdownDocument {
    /// First section whose heading contains any of `needles` (lowercase)
    pub fn section(&self, needles: &[&str]) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| needles.iter().any(|needle| section.title_contains(needle)))
    }
}

/// Parse a whole Markdown document
///
/// # Examples
/// ```
/// use space84_fanfic::markdown::parse_document;
///
/// let doc = parse_document("---\nartist_name: \"Test Band\"\n---\n## Playlist\n- Song A\n").unwrap();
/// assert_eq!(doc.frontmatter.scalar(&["artist_name"]), Some("Test Band"));
/// assert_eq!(doc.section(&["playlist"]).unwrap().bullet_items(), vec!["Song A"]);
/// ```
pub fn parse_document(text: &str) -> Result<MarkdownDocument> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines();

    match lines.next() {
        Some(first) if first.trim_end() == FRONTMATTER_DELIMITER => {}
        _ => {
            return Err(Error::Parse(
                "document does not start with a frontmatter block".to_string(),
            ))
        }
    }

    let frontmatter = parse_frontmatter(&mut lines)?;
    let sections = parse_sections(lines);

    Ok(MarkdownDocument {
        frontmatter,
        sections,
    })
}

/// Consume frontmatter lines up to and including the closing delimiter
fn parse_frontmatter<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Result<Frontmatter> {
    let mut frontmatter = Frontmatter::default();
    let mut open_list: Option<String> = None;
    // Line 1 is the opening delimiter
    let mut line_no = 1;

    for line in lines.by_ref() {
        line_no += 1;
        if line.trim_end() == FRONTMATTER_DELIMITER {
            return Ok(frontmatter);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix('-') {
            let key = open_list.as_ref().ok_or_else(|| {
                Error::Parse(format!("frontmatter line {}: list item without a key", line_no))
            })?;
            if let Some(FrontmatterValue::List(items)) = frontmatter.entries.get_mut(key) {
                items.push(unquote(item.trim()).to_string());
            }
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| {
            Error::Parse(format!("frontmatter line {}: expected 'key: value'", line_no))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Parse(format!("frontmatter line {}: empty key", line_no)));
        }

        let value = unquote(value.trim());
        if value.is_empty() {
            open_list = Some(key.to_string());
            frontmatter
                .entries
                .insert(key.to_string(), FrontmatterValue::List(Vec::new()));
        } else {
            open_list = None;
            frontmatter
                .entries
                .insert(key.to_string(), FrontmatterValue::Scalar(value.to_string()));
        }
    }

    Err(Error::Parse("frontmatter block is not closed".to_string()))
}

fn parse_sections<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in lines {
        if let Some(title) = heading_text(line) {
            sections.push(Section {
                title: title.to_string(),
                lines: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.lines.push(line.to_string());
        }
    }

    sections
}

/// `## Title` → `Title`; `#hashtag` is not a heading
fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('#') {
        return None;
    }
    let rest = trimmed.trim_start_matches('#');
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// `3. [Name](https://...)` → `Name`
fn numbered_link_name(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?.trim_start();
    let rest = rest.strip_prefix('[')?;
    let end = rest.find("](")?;
    let name = rest[..end].trim();
    (!name.is_empty()).then_some(name)
}

/// Strip one pair of matching single or double quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn split_inline_list(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    inner
        .split(',')
        .map(|item| unquote(item.trim()).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
