//! # Label Formatting
//!
//! Baked labels look like `0000002A:Position:Velocity`: the entity index as
//! eight uppercase hex digits, then the clean name of every attached
//! component in pool order.

use std::collections::HashMap;
use std::fmt::{self, Write};

/// An entity index displayed as eight uppercase hex digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityHex(pub u32);

impl fmt::Display for EntityHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Strips module paths from a Rust type name, keeping its generic shape.
///
/// ```rust
/// use lumen_inspect::naming::clean_type_name;
///
/// assert_eq!(clean_type_name("game::physics::Velocity"), "Velocity");
/// assert_eq!(
///     clean_type_name("alloc::vec::Vec<game::items::Item>"),
///     "Vec<Item>"
/// );
/// ```
#[must_use]
pub fn clean_type_name(raw: &str) -> String {
    let mut clean = String::with_capacity(raw.len());
    let mut path_start = None;

    for (pos, ch) in raw.char_indices() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            path_start.get_or_insert(pos);
            continue;
        }
        if let Some(start) = path_start.take() {
            clean.push_str(last_segment(&raw[start..pos]));
        }
        clean.push(ch);
    }
    if let Some(start) = path_start {
        clean.push_str(last_segment(&raw[start..]));
    }
    clean
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Clean names keyed by raw type name, each computed once.
#[derive(Debug, Default)]
pub struct CleanNames {
    names: HashMap<&'static str, String>,
}

impl CleanNames {
    /// Clean form of `raw`, computed on first request.
    pub fn get(&mut self, raw: &'static str) -> &str {
        self.names.entry(raw).or_insert_with(|| clean_type_name(raw))
    }
}

/// Writes the baked label for `index` into `out`, replacing its contents.
pub fn write_baked_label(
    out: &mut String,
    index: u32,
    component_names: &[&'static str],
    clean: &mut CleanNames,
) {
    out.clear();
    // Writing into a String cannot fail
    let _ = write!(out, "{}", EntityHex(index));
    for &name in component_names {
        out.push(':');
        out.push_str(clean.get(name));
    }
}
