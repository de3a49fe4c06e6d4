//! # Child Layouts: Shared Composite Mechanics
//!
//! Composite types differ in how an appstruct addresses its children, not
//! in how flatten/unflatten/get/set walk them. [`ChildLayout`] captures the
//! three addressing schemes once and each composite type delegates to the
//! one it uses:
//!
//! | Layout | Appstruct | Child for segment `s` |
//! |---|---|---|
//! | `Keyed` | `Map` | the child named `s` |
//! | `Positional` | `Tuple`/`List` | `children[s]` |
//! | `Repeated` | `List` | the single item template |
//!
//! Flattened keys are dotted: a composite contributes `"<name>."` to the
//! prefix of its children (nothing when anonymous), and a repeated item
//! contributes `"<index>."`.

use std::collections::BTreeMap;

use strata_core::{Flattened, StrataError, Value, NULL};

use crate::node::SchemaNode;

/// How a composite appstruct addresses its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildLayout {
    /// Children addressed by name in a map.
    Keyed,
    /// Children addressed by index, one child node per position.
    Positional,
    /// Any number of items, all described by the node's only child.
    Repeated,
}

/// Split `"a.b.c"` into `("a", Some("b.c"))`.
pub(crate) fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

/// The item template of a repeated node.
pub(crate) fn only_child(node: &SchemaNode) -> Result<&SchemaNode, StrataError> {
    match node.children() {
        [child] => Ok(child),
        _ => Err(StrataError::Shape {
            node: node.name().to_string(),
            expected: "exactly one child node",
            actual: "a different number of child nodes",
        }),
    }
}

fn shape(node: &SchemaNode, expected: &'static str, actual: &Value) -> StrataError {
    StrataError::Shape {
        node: node.name().to_string(),
        expected,
        actual: actual.kind(),
    }
}

fn parse_index(node: &SchemaNode, segment: &str) -> Result<usize, StrataError> {
    segment.parse::<usize>().map_err(|_| StrataError::BadIndex {
        node: node.name().to_string(),
        segment: segment.to_string(),
    })
}

impl ChildLayout {
    fn child_prefix(node: &SchemaNode, prefix: &str, listitem: bool) -> String {
        if listitem || node.name().is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}{}.", node.name())
        }
    }

    /// Flatten a composite appstruct.
    pub fn flatten(
        self,
        node: &SchemaNode,
        appstruct: &Value,
        prefix: &str,
        listitem: bool,
    ) -> Result<Flattened, StrataError> {
        let mut out = Flattened::new();
        // An absent composite flattens to a single sentinel entry under its
        // own key, like a leaf.
        if appstruct.is_null() {
            let selfname = if listitem {
                prefix.to_string()
            } else {
                format!("{prefix}{}", node.name())
            };
            out.insert(selfname.trim_end_matches('.').to_string(), Value::Null);
            return Ok(out);
        }
        let selfprefix = Self::child_prefix(node, prefix, listitem);
        match self {
            ChildLayout::Keyed => {
                let entries = appstruct.as_map().ok_or_else(|| shape(node, "map", appstruct))?;
                for child in node.children() {
                    let sub = entries.get(child.name()).unwrap_or(&NULL);
                    out.extend(child.typ().flatten(child, sub, &selfprefix, false)?);
                }
            }
            ChildLayout::Positional => {
                let items = appstruct.as_items().ok_or_else(|| shape(node, "tuple", appstruct))?;
                for (index, child) in node.children().iter().enumerate() {
                    let sub = items.get(index).unwrap_or(&NULL);
                    out.extend(child.typ().flatten(child, sub, &selfprefix, false)?);
                }
            }
            ChildLayout::Repeated => {
                let template = only_child(node)?;
                let items = appstruct.as_items().ok_or_else(|| shape(node, "list", appstruct))?;
                for (index, item) in items.iter().enumerate() {
                    let subprefix = format!("{selfprefix}{index}.");
                    out.extend(template.typ().flatten(template, item, &subprefix, true)?);
                }
            }
        }
        Ok(out)
    }

    /// Rebuild a composite appstruct from flattened `paths`.
    ///
    /// Paths are grouped by their first segment below the node's prefix and
    /// each group is handed to the matching child. A path equal to the
    /// node's own name carries the whole value of an absent composite and is
    /// only used when no other path exists.
    pub fn unflatten(
        self,
        node: &SchemaNode,
        paths: &[String],
        fstruct: &Flattened,
    ) -> Result<Value, StrataError> {
        let node_name = node.name();
        let prefix = if node_name.is_empty() {
            String::new()
        } else {
            format!("{node_name}.")
        };
        let template_name = match self {
            ChildLayout::Repeated => Some(only_child(node)?.name()),
            _ => None,
        };

        let mut own: Option<Value> = None;
        let mut groups: Vec<(String, Vec<String>, Flattened)> = Vec::new();
        for path in paths {
            let value = fstruct
                .get(path)
                .cloned()
                .ok_or_else(|| StrataError::MissingKey(path.clone()))?;
            if path == node_name {
                own = Some(value);
                continue;
            }
            let subpath = path.strip_prefix(prefix.as_str()).ok_or_else(|| StrataError::BadPath {
                path: path.clone(),
                prefix: prefix.clone(),
            })?;
            let (name, rest) = split_path(subpath);
            let subpath = match (template_name, rest) {
                (Some(""), Some(rest)) => rest.to_string(),
                (Some(template), Some(rest)) => format!("{template}.{rest}"),
                (Some(template), None) => template.to_string(),
                (None, _) => subpath.to_string(),
            };

            let index = match groups.iter().position(|(n, _, _)| n == name) {
                Some(i) => i,
                None => {
                    groups.push((name.to_string(), Vec::new(), Flattened::new()));
                    groups.len() - 1
                }
            };
            let (_, subpaths, subfstruct) = &mut groups[index];
            subpaths.push(subpath.clone());
            subfstruct.insert(subpath, value);
        }

        // Only the node's own entry: the composite itself was flattened whole,
        // which happens when it was absent.
        if groups.is_empty() {
            if let Some(value) = own {
                return Ok(value);
            }
        }

        if self == ChildLayout::Repeated {
            let template = only_child(node)?;
            let mut items: BTreeMap<usize, Value> = BTreeMap::new();
            for (name, subpaths, subfstruct) in groups {
                let index = parse_index(node, &name)?;
                items.insert(index, template.typ().unflatten(template, &subpaths, &subfstruct)?);
            }
            let mut list = Vec::with_capacity(items.len());
            for (expected, (index, value)) in items.into_iter().enumerate() {
                if index != expected {
                    return Err(StrataError::MissingKey(format!("{prefix}{expected}")));
                }
                list.push(value);
            }
            return Ok(Value::List(list));
        }

        if let Some((name, _, _)) = groups.iter().find(|(name, _, _)| node.child(name).is_none()) {
            return Err(StrataError::UnknownChild {
                node: node_name.to_string(),
                child: name.clone(),
            });
        }

        // Every child is rebuilt, including those without flattened paths:
        // an empty sequence contributes no keys but still has a value.
        let mut values = Vec::with_capacity(node.children().len());
        for child in node.children() {
            let value = match groups.iter().position(|(name, _, _)| name == child.name()) {
                Some(i) => {
                    let (_, subpaths, subfstruct) = groups.swap_remove(i);
                    child.typ().unflatten(child, &subpaths, &subfstruct)?
                }
                None => child.typ().unflatten(child, &[], &Flattened::new())?,
            };
            values.push((child.name(), value));
        }

        match self {
            // Absent keys flatten to the sentinel; rebuild them as absent.
            ChildLayout::Keyed => Ok(Value::Map(
                values
                    .into_iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
            )),
            _ => Ok(Value::Tuple(values.into_iter().map(|(_, value)| value).collect())),
        }
    }

    /// Read the value at a dotted path.
    pub fn get_value(
        self,
        node: &SchemaNode,
        appstruct: &Value,
        path: &str,
    ) -> Result<Value, StrataError> {
        let (head, rest) = split_path(path);
        let (child, sub) = match self {
            ChildLayout::Keyed => {
                let entries = appstruct.as_map().ok_or_else(|| shape(node, "map", appstruct))?;
                let sub = entries
                    .get(head)
                    .ok_or_else(|| StrataError::MissingKey(head.to_string()))?;
                (node.child(head), sub)
            }
            ChildLayout::Positional | ChildLayout::Repeated => {
                let items = appstruct.as_items().ok_or_else(|| shape(node, "list", appstruct))?;
                let index = parse_index(node, head)?;
                let sub = items.get(index).ok_or_else(|| StrataError::BadIndex {
                    node: node.name().to_string(),
                    segment: head.to_string(),
                })?;
                let child = match self {
                    ChildLayout::Repeated => node.children().first(),
                    _ => node.children().get(index),
                };
                (child, sub)
            }
        };
        match rest {
            None => Ok(sub.clone()),
            Some(rest) => {
                let child = child.ok_or_else(|| StrataError::UnknownChild {
                    node: node.name().to_string(),
                    child: head.to_string(),
                })?;
                child.typ().get_value(child, sub, rest)
            }
        }
    }

    /// Write `value` at a dotted path.
    ///
    /// A keyed layout inserts the final segment when absent; positional
    /// layouts only overwrite existing items.
    pub fn set_value(
        self,
        node: &SchemaNode,
        appstruct: &mut Value,
        path: &str,
        value: Value,
    ) -> Result<(), StrataError> {
        let (head, rest) = split_path(path);
        match self {
            ChildLayout::Keyed => {
                let entries = match appstruct {
                    Value::Map(entries) => entries,
                    other => return Err(shape(node, "map", other)),
                };
                match rest {
                    None => {
                        entries.insert(head.to_string(), value);
                        Ok(())
                    }
                    Some(rest) => {
                        let child = node.child(head).ok_or_else(|| StrataError::UnknownChild {
                            node: node.name().to_string(),
                            child: head.to_string(),
                        })?;
                        let slot = entries
                            .get_mut(head)
                            .ok_or_else(|| StrataError::MissingKey(head.to_string()))?;
                        child.typ().set_value(child, slot, rest, value)
                    }
                }
            }
            ChildLayout::Positional | ChildLayout::Repeated => {
                let index = parse_index(node, head)?;
                let child = match self {
                    ChildLayout::Repeated => node.children().first(),
                    _ => node.children().get(index),
                };
                let items = match appstruct {
                    Value::List(items) | Value::Tuple(items) => items,
                    other => return Err(shape(node, "list", other)),
                };
                let slot = items.get_mut(index).ok_or_else(|| StrataError::BadIndex {
                    node: node.name().to_string(),
                    segment: head.to_string(),
                })?;
                match rest {
                    None => {
                        *slot = value;
                        Ok(())
                    }
                    Some(rest) => {
                        let child = child.ok_or_else(|| StrataError::UnknownChild {
                            node: node.name().to_string(),
                            child: head.to_string(),
                        })?;
                        child.typ().set_value(child, slot, rest, value)
                    }
                }
            }
        }
    }
}
