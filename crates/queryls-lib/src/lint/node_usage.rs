//! Well-formed concrete-node usage.
//!
//! Each named node is checked on its own match:
//! 1. Its kind name (and `supertype/subtype` path) must resolve in the grammar
//! 2. Its items, with groupings and lists flattened away, must fit the kind:
//!    child kinds and literals against its allow-sets, field names against its
//!    fields, field values against the field's allow-sets
//! 3. Negated fields must exist somewhere; negating one the kind lacks or
//!    always has is only a warning
//!
//! A kind that doesn't resolve stops at step 1. Its own items are still
//! checked by their own matches.
//!
//! Fields no named node owns, such as `(name: (identifier))` at the top level,
//! have no parent kind. They are checked like the fields of a supertype,
//! against the grammar-wide field index.

use indexmap::IndexSet;
use queryls_core::{CheckableNamed, CheckableSubnode, Literal, TypeEnvironment, TypeName};
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::{self, Item, NamedNode};
use crate::parser::cst::{SyntaxNode, SyntaxToken};
use crate::utils::{find_similar, format_list};

use super::{Lint, LintContext, query};

/// Kind names accepted anywhere a named node may appear.
const PSEUDO_KINDS: [&str; 2] = ["ERROR", "MISSING"];

pub struct NodeUsage;

impl Lint for NodeUsage {
    fn name(&self) -> &'static str {
        query::NODE
    }

    fn check(&self, ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        if ctx.env.is_empty() {
            return;
        }
        let Some(node) = NamedNode::cast(node.clone()) else {
            return;
        };
        let mut checker = Checker {
            env: ctx.env,
            max_distance: ctx.suggestion_distance,
            diagnostics,
        };
        checker.check_node(&node);
    }
}

pub struct UnownedField;

impl Lint for UnownedField {
    fn name(&self) -> &'static str {
        query::FIELD
    }

    fn check(&self, ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        if ctx.env.is_empty() {
            return;
        }
        let Some(field) = ast::FieldDefinition::cast(node.clone()) else {
            return;
        };
        let mut checker = Checker {
            env: ctx.env,
            max_distance: ctx.suggestion_distance,
            diagnostics,
        };
        checker.check_field(&field, &Resolved::Open, node.text_range());
    }
}

pub struct UnownedNegatedField;

impl Lint for UnownedNegatedField {
    fn name(&self) -> &'static str {
        query::NEGATED_FIELD
    }

    fn check(&self, ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        if ctx.env.is_empty() {
            return;
        }
        let Some(negated) = ast::NegatedField::cast(node.clone()) else {
            return;
        };
        let mut checker = Checker {
            env: ctx.env,
            max_distance: ctx.suggestion_distance,
            diagnostics,
        };
        checker.check_negated_field(&negated, &Resolved::Open);
    }
}

/// What a named node's kind resolved to.
#[derive(Clone, Copy)]
enum Resolved<'e> {
    Kind(&'e CheckableNamed),
    /// Supertypes, wildcards and pseudo kinds: only field names are checked,
    /// against the grammar-wide field index.
    Open,
    Unknown,
}

/// Where a subnode reference sits: a kind's children or a field's value.
struct Slot<'a> {
    type_names: &'a IndexSet<TypeName>,
    literals: &'a IndexSet<Literal>,
    owner: String,
}

struct Checker<'a, 'd> {
    env: &'a TypeEnvironment,
    max_distance: usize,
    diagnostics: &'d mut Diagnostics,
}

impl<'a> Checker<'a, '_> {
    fn check_node(&mut self, node: &NamedNode) {
        let resolved = self.resolve(node);
        if matches!(resolved, Resolved::Unknown) {
            return;
        }

        let parent_range = node
            .name()
            .map_or_else(|| node.as_cst().text_range(), |t| t.text_range());
        let mut items = Vec::new();
        flatten_items(node.items(), &mut items);

        for item in &items {
            match item {
                Item::NamedNode(child) => {
                    if let Resolved::Kind(parent) = resolved {
                        self.check_child_kind(child, parent);
                    }
                }
                Item::AnonymousNode(child) => {
                    if let Resolved::Kind(parent) = resolved {
                        self.check_child_literal(child, parent);
                    }
                }
                Item::FieldDefinition(field) => self.check_field(field, &resolved, parent_range),
                Item::NegatedField(negated) => self.check_negated_field(negated, &resolved),
                Item::Grouping(_) | Item::List(_) | Item::Predicate(_) => {}
            }
        }
    }

    fn resolve(&mut self, node: &NamedNode) -> Resolved<'a> {
        if node.is_wildcard() {
            return Resolved::Open;
        }
        let Some(name) = node.name() else {
            return Resolved::Unknown;
        };
        let kind = name.text();
        if PSEUDO_KINDS.contains(&kind) {
            return Resolved::Open;
        }

        if let Some(subtype) = node.subtype() {
            return self.resolve_subtype(&name, &subtype);
        }

        if let Some(named) = self.env.get_named(kind) {
            return Resolved::Kind(named);
        }
        if self.env.has_supertype(kind) {
            return Resolved::Open;
        }

        self.report_unknown_kind(&name);
        Resolved::Unknown
    }

    /// `(supertype/subtype)` matches a `subtype` node, checked like one.
    fn resolve_subtype(&mut self, name: &SyntaxToken, subtype: &SyntaxToken) -> Resolved<'a> {
        let Some(supertype) = self.env.get_supertype(name.text()) else {
            if self.env.has_type_name(name.text()) {
                self.diagnostics
                    .report(DiagnosticKind::InvalidSubtype, name.text_range())
                    .message(format!("`{}` is not a supertype", name.text()))
                    .emit();
            } else {
                self.report_unknown_kind(name);
            }
            return Resolved::Unknown;
        };

        if !supertype.subtype_names().contains(subtype.text()) {
            let mut report = self
                .diagnostics
                .report(DiagnosticKind::InvalidSubtype, subtype.text_range())
                .message(format!(
                    "`{}` is not a subtype of `{}`",
                    subtype.text(),
                    name.text()
                ));
            let members = supertype.subtype_names().iter().map(|t| t.as_str());
            if let Some(similar) = find_similar(subtype.text(), members, self.max_distance) {
                report = report.hint(format!("did you mean `{similar}`?"));
            }
            report.emit();
            return Resolved::Unknown;
        }

        self.env
            .get_named(subtype.text())
            .map_or(Resolved::Unknown, Resolved::Kind)
    }

    fn report_unknown_kind(&mut self, name: &SyntaxToken) {
        let suggestion = find_similar(name.text(), self.env.kind_names(), self.max_distance);
        let mut report = self
            .diagnostics
            .report(DiagnosticKind::UnknownNodeType, name.text_range())
            .message(name.text());
        if let Some(similar) = suggestion {
            report = report.hint(format!("did you mean `{similar}`?"));
        }
        report.emit();
    }

    fn check_child_kind(&mut self, child: &NamedNode, parent: &CheckableNamed) {
        let Some(name) = checkable_name(child) else {
            return;
        };
        let kind = name.text();
        // Unknown kinds are reported on their own match.
        if !self.env.has_type_name(kind) && !self.env.has_supertype(kind) {
            return;
        }
        if self.env.get_named(kind).is_some_and(|n| n.extra) {
            return;
        }

        if !parent.accepts_subnodes() {
            self.diagnostics
                .report(DiagnosticKind::NodeHasNoChildren, name.text_range())
                .message(parent.name.as_str())
                .emit();
            return;
        }

        let slot = Slot {
            type_names: parent.type_names(),
            literals: parent.literals(),
            owner: format!("`{}`", parent.name),
        };
        if !self.kind_fits(name.text(), &slot) {
            self.diagnostics
                .report(DiagnosticKind::InvalidChildType, name.text_range())
                .message(format!(
                    "`{}` is not a valid child of {}",
                    name.text(),
                    slot.owner
                ))
                .emit();
        }
    }

    fn check_child_literal(&mut self, child: &ast::AnonymousNode, parent: &CheckableNamed) {
        let Some(string) = child.string() else {
            return;
        };
        let value = string.value();
        let range = string.as_cst().text_range();

        if parent.literals().is_empty() {
            self.diagnostics
                .report(DiagnosticKind::NoLiteralChildren, range)
                .message(parent.name.as_str())
                .emit();
            return;
        }
        if !parent.literals().contains(value.as_str()) {
            self.diagnostics
                .report(DiagnosticKind::InvalidChildLiteral, range)
                .message(format!(
                    "`\"{}\"` is not a valid child of `{}`",
                    value, parent.name
                ))
                .emit();
        }
    }

    fn check_field(
        &mut self,
        field: &ast::FieldDefinition,
        parent: &Resolved<'_>,
        parent_range: TextRange,
    ) {
        let Some(name) = field.name() else {
            return;
        };
        let field_name = name.text();

        let declared = match parent {
            Resolved::Kind(named) => named.field(field_name),
            _ => self.env.get_field(field_name),
        };
        let Some(declared) = declared else {
            self.report_unknown_field(&name, parent, parent_range);
            return;
        };

        let Some(value) = field.value() else {
            return;
        };
        let slot = Slot {
            type_names: declared.type_names(),
            literals: declared.literals(),
            owner: format!("field `{field_name}`"),
        };
        let mut values = Vec::new();
        flatten_items(std::iter::once(value), &mut values);
        for value in &values {
            self.check_field_value(value, &slot);
        }
    }

    fn check_field_value(&mut self, value: &Item, slot: &Slot<'_>) {
        match value {
            Item::NamedNode(node) => {
                if let Some(name) = checkable_name(node)
                    && !self.kind_fits(name.text(), slot)
                {
                    self.diagnostics
                        .report(DiagnosticKind::InvalidFieldValue, name.text_range())
                        .message(format!(
                            "`{}` is not a valid value for {}",
                            name.text(),
                            slot.owner
                        ))
                        .emit();
                }
            }
            Item::AnonymousNode(node) => {
                let Some(string) = node.string() else {
                    return;
                };
                let value = string.value();
                if !slot.literals.contains(value.as_str()) {
                    self.diagnostics
                        .report(DiagnosticKind::InvalidFieldValue, string.as_cst().text_range())
                        .message(format!(
                            "`\"{}\"` is not a valid value for {}",
                            value, slot.owner
                        ))
                        .emit();
                }
            }
            _ => {}
        }
    }

    fn report_unknown_field(
        &mut self,
        name: &SyntaxToken,
        parent: &Resolved<'_>,
        parent_range: TextRange,
    ) {
        let field_name = name.text();
        let mut report = self
            .diagnostics
            .report(DiagnosticKind::UnknownField, name.text_range())
            .message(field_name);

        match parent {
            Resolved::Kind(named) => {
                report = report.related_to(format!("on `{}`", named.name), parent_range);
                if named.fields.is_empty() {
                    report = report.hint(format!("`{}` has no fields", named.name));
                } else {
                    let fields = named.fields.keys().map(|f| f.as_str());
                    if let Some(similar) =
                        find_similar(field_name, fields.clone(), self.max_distance)
                    {
                        report = report.hint(format!("did you mean `{similar}`?"));
                    }
                    report = report.hint(format!(
                        "valid fields for `{}`: {}",
                        named.name,
                        format_list(fields, 5)
                    ));
                }
            }
            _ => {
                let fields = self.env.fields().map(|(f, _)| f.as_str());
                if let Some(similar) = find_similar(field_name, fields, self.max_distance) {
                    report = report.hint(format!("did you mean `{similar}`?"));
                }
            }
        }
        report.emit();
    }

    fn check_negated_field(&mut self, negated: &ast::NegatedField, parent: &Resolved<'_>) {
        let Some(name) = negated.name() else {
            return;
        };
        let field_name = name.text();
        let range = negated.as_cst().text_range();

        if !self.env.has_field(field_name) {
            let fields = self.env.fields().map(|(f, _)| f.as_str());
            let suggestion = find_similar(field_name, fields, self.max_distance);
            let mut report = self
                .diagnostics
                .report(DiagnosticKind::UnknownField, name.text_range())
                .message(field_name);
            if let Some(similar) = suggestion {
                report = report.hint(format!("did you mean `{similar}`?"));
            }
            report.emit();
            return;
        }

        let Resolved::Kind(named) = parent else {
            return;
        };
        match named.field(field_name) {
            None => self
                .diagnostics
                .report(DiagnosticKind::RedundantNegation, range)
                .message(format!("`{}` never has field `{}`", named.name, field_name))
                .emit(),
            Some(CheckableSubnode { required: true, .. }) => self
                .diagnostics
                .report(DiagnosticKind::NegatedRequiredField, range)
                .message(format!(
                    "`{}` always has field `{}`; this pattern never matches",
                    named.name, field_name
                ))
                .emit(),
            Some(_) => {}
        }
    }

    /// Whether kind `name` may fill `slot`. Extras fit anywhere; a supertype
    /// fits when any member does.
    fn kind_fits(&self, name: &str, slot: &Slot<'_>) -> bool {
        if slot.type_names.contains(name) {
            return true;
        }
        if let Some(named) = self.env.get_named(name) {
            return named.extra;
        }
        match self.env.get_supertype(name) {
            Some(supertype) => supertype
                .subtype_names()
                .iter()
                .any(|member| slot.type_names.contains(member.as_str())),
            // Unknown kinds are reported on their own match.
            None => true,
        }
    }
}

/// The kind name a child is checked by, if it is checked at all. For
/// `(supertype/subtype)` that is the subtype.
fn checkable_name(node: &NamedNode) -> Option<SyntaxToken> {
    if node.is_wildcard() {
        return None;
    }
    let name = node.name()?;
    if PSEUDO_KINDS.contains(&name.text()) {
        return None;
    }
    node.subtype().or(Some(name))
}

/// Replace groupings and lists by the items inside them.
fn flatten_items(items: impl Iterator<Item = Item>, out: &mut Vec<Item>) {
    for item in items {
        match item {
            Item::Grouping(grouping) => flatten_items(grouping.items(), out),
            Item::List(list) => flatten_items(list.items(), out),
            item => out.push(item),
        }
    }
}
