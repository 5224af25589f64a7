//! Extracted tag records. Built fresh per lookup, never mutated afterwards.

use indexmap::IndexMap;
use serde::Serialize;

/// Parsed tags keyed by tag name without the leading `@`, in lookup order.
pub type TagMap = IndexMap<String, TagValue>;

/// Freeform tag: `@since v1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainTag {
    pub tag: String,
    /// Text after the tag name, inline links rendered. Empty for flag tags like `@readonly`.
    pub value: String,
    pub raw: String,
}

/// Tag with an optional value and description: `@template {T} - Description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptiveTag {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub raw: String,
}

/// Type-and-description tag without a name: `@returns {T} - The result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedTag {
    pub tag: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub raw: String,
}

/// `@param {type} [name=default] - description` and its aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamTag {
    pub tag: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Parameter name; copied verbatim when it is an object literal.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name was wrapped in `[...]`.
    pub optional: bool,
    /// Text after the first `=` of an optional name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub raw: String,
}

/// One extracted tag occurrence, in the shape its registry entry dictates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Tag {
    Plain(PlainTag),
    Descriptive(DescriptiveTag),
    Typed(TypedTag),
    Param(ParamTag),
}

impl Tag {
    /// Tag name including the `@`.
    pub fn tag(&self) -> &str {
        match self {
            Tag::Plain(t) => &t.tag,
            Tag::Descriptive(t) => &t.tag,
            Tag::Typed(t) => &t.tag,
            Tag::Param(t) => &t.tag,
        }
    }

    /// Source text of this occurrence, decoration stripped.
    pub fn raw(&self) -> &str {
        match self {
            Tag::Plain(t) => &t.raw,
            Tag::Descriptive(t) => &t.raw,
            Tag::Typed(t) => &t.raw,
            Tag::Param(t) => &t.raw,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Tag::Plain(t) => Some(&t.value),
            Tag::Descriptive(t) => t.value.as_deref(),
            Tag::Typed(_) | Tag::Param(_) => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Tag::Plain(_) => None,
            Tag::Descriptive(t) => t.description.as_deref(),
            Tag::Typed(t) => t.description.as_deref(),
            Tag::Param(t) => t.description.as_deref(),
        }
    }
}

/// Arity-collapsed result of looking a tag up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Single(Tag),
    Many(Vec<Tag>),
}

impl TagValue {
    /// Collapse extracted records: none → `None`, one → `Single`, more → `Many`.
    pub fn collapse(mut tags: Vec<Tag>) -> Option<TagValue> {
        match tags.len() {
            0 => None,
            1 => tags.pop().map(TagValue::Single),
            _ => Some(TagValue::Many(tags)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TagValue::Single(_) => 1,
            TagValue::Many(tags) => tags.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_single(&self) -> Option<&Tag> {
        match self {
            TagValue::Single(tag) => Some(tag),
            TagValue::Many(_) => None,
        }
    }

    /// All records, whether one or many.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        match self {
            TagValue::Single(tag) => std::slice::from_ref(tag).iter(),
            TagValue::Many(tags) => tags.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a TagValue {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
