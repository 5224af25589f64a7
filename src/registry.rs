//! Tag registry. Maps every standard tag name, aliases included, to the
//! shape it is extracted with. Built once, read-only afterwards.

use crate::extract;
use crate::links::LinkRenderer;
use crate::model::Tag;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Structural shape of a tag's extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `@tag value`
    Freeform,
    /// `@tag {type} description`
    Typed,
    /// `@tag {type} [name=default] description`
    Param,
    /// `@template {constraint} description`
    Template,
    /// Explicit `@description` or the untagged leading text.
    Description,
}

impl Shape {
    /// Extract every occurrence of `tag` from `body` in this shape.
    pub fn extract(self, tag: &str, body: &str, links: &dyn LinkRenderer) -> Vec<Tag> {
        match self {
            Shape::Freeform => extract::extract_freeform(tag, body, links),
            Shape::Typed => extract::extract_typed(tag, body, links),
            Shape::Param => extract::extract_param(tag, body, links),
            Shape::Template => extract::extract_template(tag, body, links),
            Shape::Description => extract::resolve_description(body, links).into_iter().collect(),
        }
    }
}

use Shape::*;

/// Registered tags in enumeration order.
const TAGS: &[(&str, Shape)] = &[
    ("@abstract", Freeform),
    ("@access", Freeform),
    ("@alias", Freeform),
    ("@arg", Param),
    ("@argument", Param),
    ("@async", Freeform),
    ("@augments", Freeform),
    ("@author", Freeform),
    ("@borrows", Freeform),
    ("@category", Freeform),
    ("@callback", Freeform),
    ("@class", Freeform),
    ("@classdesc", Freeform),
    ("@const", Freeform),
    ("@constant", Freeform),
    ("@constructor", Freeform),
    ("@constructs", Freeform),
    ("@copyright", Freeform),
    ("@default", Freeform),
    ("@defaultvalue", Freeform),
    ("@deprecated", Freeform),
    ("@desc", Description),
    ("@description", Description),
    ("@emits", Freeform),
    ("@enum", Typed),
    ("@event", Freeform),
    ("@example", Freeform),
    ("@exception", Freeform),
    ("@exports", Freeform),
    ("@extends", Freeform),
    ("@external", Freeform),
    ("@file", Freeform),
    ("@fileoverview", Freeform),
    ("@fires", Freeform),
    ("@func", Freeform),
    ("@function", Freeform),
    ("@generator", Freeform),
    ("@global", Freeform),
    ("@hideconstructor", Freeform),
    ("@host", Freeform),
    ("@ignore", Freeform),
    ("@implements", Typed),
    ("@inheritdoc", Freeform),
    ("@inner", Freeform),
    ("@instance", Freeform),
    ("@interface", Freeform),
    ("@kind", Freeform),
    ("@lends", Freeform),
    ("@license", Freeform),
    ("@listens", Freeform),
    ("@member", Typed),
    ("@memberof", Freeform),
    ("@method", Freeform),
    ("@mixes", Freeform),
    ("@mixin", Freeform),
    ("@module", Freeform),
    ("@name", Freeform),
    ("@namespace", Freeform),
    ("@override", Freeform),
    ("@overview", Freeform),
    ("@package", Freeform),
    ("@param", Param),
    ("@private", Freeform),
    ("@prop", Param),
    ("@property", Param),
    ("@protected", Freeform),
    ("@public", Freeform),
    ("@readonly", Freeform),
    ("@requires", Freeform),
    ("@return", Typed),
    ("@returns", Typed),
    ("@see", Freeform),
    ("@since", Freeform),
    ("@static", Freeform),
    ("@summary", Freeform),
    ("@template", Template),
    ("@this", Freeform),
    ("@throws", Freeform),
    ("@todo", Freeform),
    ("@tutorial", Freeform),
    ("@type", Typed),
    ("@typedef", Typed),
    ("@var", Typed),
    ("@variation", Freeform),
    ("@version", Freeform),
    ("@virtual", Freeform),
    ("@yield", Typed),
    ("@yields", Typed),
];

static REGISTRY: LazyLock<HashMap<&'static str, Shape>> =
    LazyLock::new(|| TAGS.iter().copied().collect());

/// Shape registered for `tag` (with its `@`), if any.
pub fn lookup(tag: &str) -> Option<Shape> {
    REGISTRY.get(tag).copied()
}

/// Shape for `tag`, falling back to [`Shape::Freeform`] for custom tags.
pub fn shape_of(tag: &str) -> Shape {
    lookup(tag).unwrap_or_else(|| {
        tracing::debug!(tag, "unregistered tag, using freeform extraction");
        Shape::Freeform
    })
}

/// Every registered tag name, in registry order.
pub fn known_tags() -> impl Iterator<Item = &'static str> {
    TAGS.iter().map(|(name, _)| *name)
}
