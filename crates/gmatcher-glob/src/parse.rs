//! Glob tokenizer
//!
//! Splits pattern text into [`Item`]s one construct at a time. Literal runs,
//! `?` and `*` are handled inline; `[...]` compiles to a class and `{...}` to
//! a literal, class, [`StringList`] or [`Group`] depending on its members.

use crate::error::{Construct, GlobError};
use crate::group::{Chain, Group};
use crate::item::{push_merged, Item};
use crate::list::StringList;
use crate::runes::RuneRanges;
use crate::utils::{has_wildcard, index_wildcard};

/// Tokenize all of `s`, merging each item into `items`
pub(crate) fn parse_items(mut s: &str, items: &mut Vec<Item>) -> Result<(), GlobError> {
    while !s.is_empty() {
        s = next_item(s, items)?;
    }
    Ok(())
}

/// Merge the next construct off the front of a non-empty `s` into `items`,
/// returning the unparsed rest.
///
/// Constructs that match nothing but the empty string (`[]`, `{}`, `{,}`)
/// add no items.
fn next_item<'s>(s: &'s str, items: &mut Vec<Item>) -> Result<&'s str, GlobError> {
    match s.as_bytes()[0] {
        b'[' => {
            let end = s.find(']').ok_or_else(|| GlobError::UnclosedBracket {
                segment: s.to_string(),
            })?;
            if let Some(item) = class_item(&s[1..end]) {
                push_merged(items, item);
            }
            Ok(&s[end + 1..])
        }
        b'{' => {
            let end = s.find('}').ok_or_else(|| GlobError::UnclosedBracket {
                segment: s.to_string(),
            })?;
            list_item(&s[1..end], items)?;
            Ok(&s[end + 1..])
        }
        b'*' => {
            let run = s.bytes().take_while(|&b| b == b'*').count();
            push_merged(items, Item::Star(0));
            Ok(&s[run..])
        }
        b'?' => {
            push_merged(items, Item::Any(1));
            Ok(&s[1..])
        }
        b']' => Err(GlobError::MalformedClassOrList {
            kind: Construct::Class,
            text: s.to_string(),
        }),
        b'}' => Err(GlobError::MalformedClassOrList {
            kind: Construct::List,
            text: s.to_string(),
        }),
        _ => {
            let end = index_wildcard(s).unwrap_or(s.len());
            push_merged(items, Item::literal(&s[..end]));
            Ok(&s[end..])
        }
    }
}

fn class_item(body: &str) -> Option<Item> {
    let (ranges, reversed) = RuneRanges::from_class(body);
    if ranges.is_empty() {
        // Only reversed ranges: keep a class that never matches
        return reversed.then_some(Item::RuneRanges(ranges));
    }
    match ranges.single() {
        Some(c) => Some(Item::from_char(c)),
        None => Some(Item::RuneRanges(ranges)),
    }
}

fn list_item(body: &str, items: &mut Vec<Item>) -> Result<(), GlobError> {
    if body.is_empty() {
        return Ok(());
    }
    let mut vals = split_alternatives(body);
    vals.sort_unstable();
    vals.dedup();
    let optional = vals.first() == Some(&"");
    if optional {
        vals.remove(0);
    }

    if vals.iter().any(|v| has_wildcard(v)) {
        return group_item(&vals, optional, items);
    }
    let item = match vals.as_slice() {
        [] => return Ok(()),
        [only] if !optional => Item::literal(only),
        _ if !optional && vals.iter().all(|v| v.chars().nth(1).is_none()) => {
            let chars = vals.iter().filter_map(|v| v.chars().next());
            Item::RuneRanges(RuneRanges::from_alternatives(chars))
        }
        _ => {
            let vals = vals.into_iter().map(str::to_string).collect();
            Item::List(StringList::new(vals, optional))
        }
    };
    push_merged(items, item);
    Ok(())
}

fn group_item(vals: &[&str], mut optional: bool, items: &mut Vec<Item>) -> Result<(), GlobError> {
    let mut members = Vec::with_capacity(vals.len());
    for val in vals {
        let mut chain_items = Vec::new();
        parse_items(val, &mut chain_items)?;
        let chain = Chain::new(chain_items);
        if chain.is_star() {
            push_merged(items, Item::Star(0));
            return Ok(());
        }
        if chain.is_empty() {
            optional = true;
            continue;
        }
        members.push(chain);
    }
    members.sort_by_cached_key(|m| m.to_string());
    members.dedup();
    match members.len() {
        0 => {}
        // a lone member is spliced in as plain items
        1 if !optional => {
            for item in members.swap_remove(0).into_items() {
                push_merged(items, item);
            }
        }
        _ => push_merged(items, Item::Group(Group::new(members, optional))),
    }
    Ok(())
}

/// Split a list body on commas that are not inside a class
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_class = false;
    for (i, b) in body.bytes().enumerate() {
        match b {
            b'[' => in_class = true,
            b']' => in_class = false,
            b',' if !in_class => {
                out.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&body[start..]);
    out
}
