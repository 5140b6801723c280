//! Parse annotation blocks into structured doc blocks
//!
//! An annotation block is free text followed by `@tag` lines:
//!
//! ```text
//! /**
//!  * Endpoint title.
//!  * Longer description,
//!  * possibly over several lines.
//!  * @group Users
//!  * APIs for managing users.
//!  * @authenticated
//!  */
//! ```
//!
//! Comment decoration is stripped first. The first free-text line is the
//! title, the remaining free text before the first tag is the description.
//! Lines after a tag that are not tags themselves are the tag's trailing
//! text. Nothing here fails: text that does not look like a tag is free text.

use scrivener_domain::{AnnotationBlock, Field, MetadataRecord, TriState};

/// One `@tag` with its inline value and trailing lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    lines: Vec<String>,
}

impl Tag {
    /// Tag name without the `@`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the tag name, ignoring ASCII case
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Text on the tag line itself
    pub fn value(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    /// Lines following the tag line, joined and trimmed
    pub fn trailing(&self) -> String {
        self.lines
            .iter()
            .skip(1)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Inline value and trailing lines, joined and trimmed
    pub fn content(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

/// A parsed annotation block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    title: String,
    description: String,
    tags: Vec<Tag>,
}

impl DocBlock {
    /// First free-text line (empty if none)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Remaining free text before the first tag
    pub fn description(&self) -> &str {
        &self.description
    }

    /// All tags in source order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags with the given name, in source order
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |tag| tag.is(name))
    }

    /// First tag with the given name
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.is(name))
    }

    /// True when the block has neither free text nor tags
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tags.is_empty()
    }

    /// The metadata keys this block mentions on its own
    ///
    /// Free text yields `title` and `description` (possibly `""`); `@group`
    /// yields both group keys; flags yield tri-states. When a block carries
    /// conflicting flag tags, the first one wins.
    pub fn metadata(&self) -> MetadataRecord {
        let mut record = MetadataRecord::new();

        if !self.title.is_empty() {
            record.title = Field::Set(self.title.clone());
            record.description = Field::Set(self.description.clone());
        }

        if let Some(group) = self.tag("group") {
            record.group_name = Field::Set(group.value().to_string());
            record.group_description = Field::Set(group.trailing());
        }

        if let Some(subgroup) = self.tag("subgroup") {
            record.subgroup = Field::Set(subgroup.value().to_string());
        }
        if let Some(description) = self.tag("subgroupDescription") {
            record.subgroup_description = Field::Set(description.content());
        }

        for tag in &self.tags {
            if record.authenticated.is_unset() {
                if tag.is("authenticated") {
                    record.authenticated = TriState::True;
                } else if tag.is("unauthenticated") {
                    record.authenticated = TriState::False;
                }
            }
            if record.try_out.is_unset() {
                if tag.is("tryOut") {
                    record.try_out = TriState::True;
                } else if tag.is("noTryOut") {
                    record.try_out = TriState::False;
                }
            }
        }

        record
    }
}

/// Parse an annotation block
pub fn parse_block(block: &AnnotationBlock) -> DocBlock {
    parse(block.text())
}

/// Parse annotation text
pub fn parse(text: &str) -> DocBlock {
    let mut free_text: Vec<&str> = Vec::new();
    let mut tags: Vec<Tag> = Vec::new();

    for raw in text.lines() {
        let line = strip_decoration(raw);
        if let Some((name, value)) = split_tag(line) {
            tags.push(Tag {
                name: name.to_string(),
                lines: vec![value.to_string()],
            });
        } else if let Some(tag) = tags.last_mut() {
            tag.lines.push(line.to_string());
        } else {
            free_text.push(line);
        }
    }

    let mut lines = free_text.into_iter().skip_while(|line| line.is_empty());
    let title = lines.next().unwrap_or("").to_string();
    let description = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    DocBlock {
        title,
        description,
        tags,
    }
}

/// Strip comment markers (`/**`, `*/`, leading `*`, `///`, `//!`)
fn strip_decoration(line: &str) -> &str {
    let mut line = line.trim();

    for opener in ["/**", "/*!", "/*", "///", "//!"] {
        if let Some(rest) = line.strip_prefix(opener) {
            line = rest;
            break;
        }
    }
    if let Some(rest) = line.strip_suffix("*/") {
        line = rest;
    }

    let line = line.trim();
    if line == "*" {
        return "";
    }
    match line.strip_prefix("* ").or_else(|| line.strip_prefix("*\t")) {
        Some(rest) => rest.trim(),
        None => line,
    }
}

/// Split `@name value` into its parts
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('@')?;
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    let (name, value) = rest.split_at(end);
    if !value.is_empty() && !value.starts_with(char::is_whitespace) {
        return None;
    }
    Some((name, value.trim()))
}
