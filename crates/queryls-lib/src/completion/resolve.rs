//! Turn a completion context into the items offered at that position.

use queryls_core::{CheckableSubnode, TypeEnvironment};

use super::captures::CaptureIndex;
use super::context::CompletionContext;
use super::items::{CompletionItem, CompletionItemKind, CompletionPools};

/// Items for `context`. Pure in its inputs; `captures` only matters for the
/// capture context.
pub fn resolve(
    context: &CompletionContext,
    env: &TypeEnvironment,
    pools: &CompletionPools,
    captures: Option<&CaptureIndex>,
) -> Vec<CompletionItem> {
    match context {
        CompletionContext::None => Vec::new(),
        CompletionContext::Unhandled => everything(pools, captures),
        CompletionContext::Capture { identifier } => {
            capture_names(captures, identifier.as_deref())
        }
        CompletionContext::Node {
            transform,
            enclosing_node_type,
        }
        | CompletionContext::Child {
            transform,
            enclosing_node_type,
        } => nodes_within(env, pools, *transform, enclosing_node_type.as_deref()),
        CompletionContext::FieldValue {
            transform,
            field_name,
            parent_type,
        } => field_value(env, pools, *transform, field_name, parent_type.as_deref()),
        CompletionContext::FieldName {
            transform,
            parent_type,
        } => field_names(env, pools, *transform, parent_type.as_deref()),
        CompletionContext::NegatedField { parent_type } => {
            field_names(env, pools, false, parent_type.as_deref())
        }
        CompletionContext::EmptyString {
            parent_type,
            field_name,
        } => string_contents(env, pools, parent_type.as_deref(), field_name.as_deref()),
    }
}

fn everything(pools: &CompletionPools, captures: Option<&CaptureIndex>) -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = [true, false]
        .into_iter()
        .flat_map(|wrapped| {
            pools
                .nodes
                .all(wrapped)
                .chain(pools.fields.all(wrapped))
                .chain(pools.literals.all(wrapped))
                .chain(pools.builtins.all(wrapped))
        })
        .cloned()
        .collect();
    items.extend(capture_names(captures, None));
    items
}

fn capture_names(captures: Option<&CaptureIndex>, typing: Option<&str>) -> Vec<CompletionItem> {
    let Some(captures) = captures else {
        return Vec::new();
    };
    captures
        .names()
        .filter(|name| Some(*name) != typing || captures.count(name) > 1)
        .map(|name| CompletionItem::new(name, CompletionItemKind::Capture))
        .collect()
}

/// Node names (and, in wrapped position, quoted literals) allowed under
/// `enclosing`: a concrete kind's allow-sets plus extras, or a supertype's
/// members.
fn nodes_within(
    env: &TypeEnvironment,
    pools: &CompletionPools,
    transform: bool,
    enclosing: Option<&str>,
) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    if let Some(named) = enclosing.and_then(|name| env.get_named(name)) {
        let kinds = named.type_names();
        let is_extra = |name: &str| env.get_named(name).is_some_and(|n| n.extra);
        items.extend(
            pools
                .nodes
                .filtered(transform, |name| {
                    kinds.contains(name)
                        || is_extra(name)
                        || supertype_overlaps(env, name, |k| kinds.contains(k))
                })
                .cloned(),
        );
        if transform {
            let literals = named.literals();
            items.extend(pools.literals.filtered(true, |l| literals.contains(l)).cloned());
        }
    } else if let Some(supertype) = enclosing.and_then(|name| env.get_supertype(name)) {
        let members = supertype.subtype_names();
        items.extend(pools.nodes.filtered(transform, |name| members.contains(name)).cloned());
    } else {
        items.extend(pools.nodes.all(transform).cloned());
        if transform {
            items.extend(pools.literals.all(true).cloned());
        }
    }

    items.extend(pools.builtins.all(transform).cloned());
    items
}

fn field_value(
    env: &TypeEnvironment,
    pools: &CompletionPools,
    transform: bool,
    field_name: &str,
    parent: Option<&str>,
) -> Vec<CompletionItem> {
    let Some(field) = resolve_field(env, field_name, parent) else {
        return nodes_within(env, pools, transform, None);
    };

    let kinds = field.type_names();
    let mut items: Vec<CompletionItem> = pools
        .nodes
        .filtered(transform, |name| {
            kinds.contains(name) || supertype_overlaps(env, name, |k| kinds.contains(k))
        })
        .cloned()
        .collect();
    if transform {
        let literals = field.literals();
        items.extend(pools.literals.filtered(true, |l| literals.contains(l)).cloned());
    }
    items.extend(pools.builtins.all(transform).cloned());
    items
}

fn field_names(
    env: &TypeEnvironment,
    pools: &CompletionPools,
    transform: bool,
    parent: Option<&str>,
) -> Vec<CompletionItem> {
    match parent.and_then(|name| env.get_named(name)) {
        Some(named) => pools
            .fields
            .filtered(transform, |name| named.has_field(name))
            .cloned()
            .collect(),
        None => pools.fields.all(transform).cloned().collect(),
    }
}

fn string_contents(
    env: &TypeEnvironment,
    pools: &CompletionPools,
    parent: Option<&str>,
    field_name: Option<&str>,
) -> Vec<CompletionItem> {
    if let Some(field) = field_name.and_then(|f| resolve_field(env, f, parent)) {
        let literals = field.literals();
        return pools.literals.filtered(false, |l| literals.contains(l)).cloned().collect();
    }
    if let Some(named) = parent.and_then(|name| env.get_named(name)) {
        let literals = named.literals();
        return pools.literals.filtered(false, |l| literals.contains(l)).cloned().collect();
    }
    pools.literals.all(false).cloned().collect()
}

/// The parent's own declaration of the field, else the grammar-wide union.
fn resolve_field<'e>(
    env: &'e TypeEnvironment,
    field_name: &str,
    parent: Option<&str>,
) -> Option<&'e CheckableSubnode> {
    parent
        .and_then(|name| env.get_named(name))
        .and_then(|named| named.field(field_name))
        .or_else(|| env.get_field(field_name))
}

/// Whether `name` is a supertype with at least one member passing `allowed`.
fn supertype_overlaps(env: &TypeEnvironment, name: &str, allowed: impl Fn(&str) -> bool) -> bool {
    env.get_supertype(name)
        .is_some_and(|s| s.subtype_names().iter().any(|member| allowed(member.as_str())))
}
