// Copyright 2024 Ryan McKenzie
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Type registry & parser (§4.1).
//!
//! Canonicalizes textual type spellings into [`Type`] value objects.
//! Mirrors the teacher's `Qualifiers` bitflags (`nodes/enums.rs`) and its
//! pointer-affinity enum, generalized from MSVC mangling tokens to C++
//! type spellings.

use std::collections::HashMap;

bitflags::bitflags! {
    #[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Debug)]
    pub struct Qualifiers: u8 {
        const NONE     = 0;
        const CONST    = 1 << 0;
        const VOLATILE = 1 << 1;
        const RESTRICT = 1 << 2;
    }
}

/// Provenance of a [`Type`], per the glossary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Origin {
    Declared,
    Dataflow,
    Guessed,
    Unresolved,
}

/// What kind of indirection a pointer/reference layer adds. The teacher's
/// `PointerAffinity` (`nodes/enums.rs`) distinguishes pointer / reference /
/// rvalue-reference for printing; this frontend only needs the
/// pointer-vs-array provenance the propagation bus cares about (§4.4), plus
/// a reference marker for completeness of §3's layer stack.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LayerKind {
    FromPointer,
    FromArray,
    Reference,
}

/// The origin tag passed to [`Type::pointer_of`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PointerOrigin {
    Pointer,
    Array,
}

/// A canonical, interned-by-value type. Two canonicalizations of the same
/// spelling compare equal; `Unknown` is the explicit "not yet known"
/// sentinel rather than an empty name.
///
/// `origin` is deliberately excluded from `PartialEq`/`Hash`: it is
/// provenance metadata the propagation bus stamps as a type flows through
/// the cascade, not part of what type a node has. Without this, the same
/// canonical type arriving via a different path (declared vs. propagated)
/// would compare unequal, defeating the idempotence check in
/// `propagation::apply_new_type`.
#[derive(Clone, Debug)]
pub struct Type {
    name: String,
    quals: Qualifiers,
    layers: Vec<LayerKind>,
    origin: Origin,
    unknown: bool,
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.quals == other.quals
            && self.layers == other.layers
            && self.unknown == other.unknown
    }
}

impl Eq for Type {}

impl std::hash::Hash for Type {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.quals.hash(state);
        self.layers.hash(state);
        self.unknown.hash(state);
    }
}

impl Type {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: String::new(),
            quals: Qualifiers::NONE,
            layers: Vec::new(),
            origin: Origin::Unresolved,
            unknown: true,
        }
    }

    #[must_use]
    pub(crate) fn named(name: String, quals: Qualifiers, origin: Origin) -> Self {
        Self {
            name,
            quals,
            layers: Vec::new(),
            origin,
            unknown: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn qualifiers(&self) -> Qualifiers {
        self.quals
    }

    #[must_use]
    pub fn layers(&self) -> &[LayerKind] {
        &self.layers
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.unknown
    }

    /// True for a fundamental C++ type with no indirection layers.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        !self.unknown && self.layers.is_empty() && is_primitive_spelling(&self.name)
    }

    /// Removes the outermost pointer/array layer. A non-pointer type (or
    /// `Unknown`) is returned unchanged — errors here are non-fatal per
    /// §4.1.
    #[must_use]
    pub fn dereference(&self) -> Self {
        if self.unknown || self.layers.is_empty() {
            return self.clone();
        }
        let mut next = self.clone();
        next.layers.pop();
        next
    }

    /// Pushes a pointer layer tagged with `origin`.
    #[must_use]
    pub fn pointer_of(&self, origin: PointerOrigin) -> Self {
        let mut next = self.clone();
        next.layers.push(match origin {
            PointerOrigin::Pointer => LayerKind::FromPointer,
            PointerOrigin::Array => LayerKind::FromArray,
        });
        next
    }

    /// Pushes a reference layer. Not exposed by §4.1 directly but needed to
    /// round-trip the `REFERENCE` layer kind named in §3.
    #[must_use]
    pub fn reference_of(&self) -> Self {
        let mut next = self.clone();
        next.layers.push(LayerKind::Reference);
        next
    }

    /// Full spelling including qualifiers and indirection, used by the
    /// dispatcher when it needs to fabricate a spelling for the type
    /// registry (e.g. appending `*` per §4.6's cast fallback rules).
    #[must_use]
    pub fn spelling(&self) -> String {
        if self.unknown {
            return "<unknown>".to_string();
        }
        let mut out = String::new();
        if self.quals.contains(Qualifiers::CONST) {
            out.push_str("const ");
        }
        if self.quals.contains(Qualifiers::VOLATILE) {
            out.push_str("volatile ");
        }
        out.push_str(&self.name);
        for layer in &self.layers {
            match layer {
                LayerKind::FromPointer | LayerKind::FromArray => out.push('*'),
                LayerKind::Reference => out.push('&'),
            }
        }
        out
    }
}

const PRIMITIVE_SPELLINGS: &[&str] = &[
    "void",
    "bool",
    "char",
    "signed char",
    "unsigned char",
    "char8_t",
    "char16_t",
    "char32_t",
    "wchar_t",
    "short",
    "unsigned short",
    "int",
    "unsigned int",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "float",
    "double",
    "long double",
];

#[must_use]
fn is_primitive_spelling(name: &str) -> bool {
    PRIMITIVE_SPELLINGS.contains(&name)
}

/// Per-translation-unit alias table consulted when `resolve_alias` is set.
/// A real frontend would seed this from the vendor's typedef table; this
/// core ships the handful of standard-library aliases the dispatcher
/// itself relies on (§4.6's `TypeIdExpr` result types) plus the common
/// fixed-width aliases, and otherwise leaves unknown aliases spelled as
/// written — alias resolution failure is non-fatal per §4.1.
fn builtin_aliases() -> &'static HashMap<&'static str, &'static str> {
    use std::sync::OnceLock;
    static ALIASES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    ALIASES.get_or_init(|| {
        HashMap::from([
            ("std::size_t", "unsigned long"),
            ("size_t", "unsigned long"),
            ("std::ptrdiff_t", "long"),
            ("ptrdiff_t", "long"),
            ("int8_t", "signed char"),
            ("uint8_t", "unsigned char"),
            ("int16_t", "short"),
            ("uint16_t", "unsigned short"),
            ("int32_t", "int"),
            ("uint32_t", "unsigned int"),
            ("int64_t", "long long"),
            ("uint64_t", "unsigned long long"),
        ])
    })
}

/// Canonicalizes type spellings (§4.1). Caches by `(spelling, quals,
/// resolve_alias)` so repeated declarations of the same type share a
/// `Type` instance's *value* (equality is structural, so true pointer
/// identity is unnecessary — see DESIGN.md).
#[derive(Default)]
pub struct TypeRegistry {
    cache: HashMap<(String, Qualifiers, bool), Type>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `spelling` (trailing `*`/`&` indirection, leading
    /// `const`/`volatile` keywords) into a canonical [`Type`]. Unknown or
    /// empty spellings produce `Unknown` rather than an error.
    pub fn create_from(&mut self, spelling: &str, resolve_alias: bool, extra: Qualifiers) -> Type {
        let key = (spelling.to_string(), extra, resolve_alias);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }
        let ty = Self::parse(spelling, resolve_alias, extra);
        self.cache.insert(key, ty.clone());
        ty
    }

    #[must_use]
    pub fn is_primitive(ty: &Type) -> bool {
        ty.is_primitive()
    }

    #[must_use]
    pub fn is_unknown(ty: &Type) -> bool {
        ty.is_unknown()
    }

    fn parse(spelling: &str, resolve_alias: bool, extra: Qualifiers) -> Type {
        let trimmed = spelling.trim();
        if trimmed.is_empty() {
            return Type::unknown();
        }

        let mut layers = Vec::new();
        let mut rest = trimmed;
        while let Some(stripped) = rest.strip_suffix('*') {
            layers.push(LayerKind::FromPointer);
            rest = stripped.trim_end();
        }
        let mut is_reference = false;
        if let Some(stripped) = rest.strip_suffix('&') {
            is_reference = true;
            rest = stripped.trim_end();
        }

        let mut quals = extra;
        let mut base = rest;
        loop {
            if let Some(stripped) = base.strip_prefix("const ") {
                quals |= Qualifiers::CONST;
                base = stripped.trim_start();
            } else if let Some(stripped) = base.strip_prefix("volatile ") {
                quals |= Qualifiers::VOLATILE;
                base = stripped.trim_start();
            } else {
                break;
            }
        }
        if base.is_empty() {
            return Type::unknown();
        }

        let resolved_name = if resolve_alias {
            builtin_aliases()
                .get(base)
                .map_or(base, |resolved| *resolved)
        } else {
            base
        };

        let mut ty = Type::named(resolved_name.to_string(), quals, Origin::Declared);
        for layer in layers.into_iter().rev() {
            ty.layers.push(layer);
        }
        if is_reference {
            ty.layers.push(LayerKind::Reference);
        }
        ty
    }
}
