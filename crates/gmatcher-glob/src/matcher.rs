//! Greedy-star matching engine
//!
//! Matching walks an item sequence left to right. Each step either consumes
//! input at the current position (anchored) or, after a `*`, searches forward
//! for the next place the item can match (floating). Every way a sequence can
//! end is reported to a [`Sink`], which decides whether the search stops.
//!
//! # Pruning
//!
//! Steps report a [`Flow`]. `Abort` means no later start position can match
//! either, so an enclosing forward search stops instead of retrying. It is
//! only passed outward through items of fixed code point width; anchored
//! lists, groups and optional alternatives turn it back into `Continue`. A
//! forward search for a list remembers the earliest remainder that aborted
//! and skips every candidate that could only end at or after it.
//!
//! # Example
//!
//! ```
//! use gmatcher_glob::matcher::{each_end, Flow};
//! use gmatcher_glob::Glob;
//!
//! let glob = Glob::parse("a*b?c").unwrap();
//! let mut ends = Vec::new();
//! each_end("xbyzbqw", glob.items(), false, &mut |rest: &str, floating: bool| {
//!     ends.push((rest.to_string(), floating));
//!     Flow::Continue
//! });
//! assert_eq!(ends, vec![("zbqw".to_string(), false), ("w".to_string(), false)]);
//! ```

use crate::item::{Find, Item};
use crate::utils::{first_rune_len, skip_runes};

/// Outcome of a matching step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The sink accepted a match; unwind immediately
    Stop,
    /// No match from here, later positions may still match
    Continue,
    /// No match from here or from any later position
    Abort,
}

/// Receives the unconsumed remainder after a sequence matched, and whether a
/// `*` is still pending (so the remainder may be skipped entirely).
pub type Sink<'a> = dyn FnMut(&str, bool) -> Flow + 'a;

/// Enumerate every way `items` can match a prefix of `s`.
///
/// # Arguments
///
/// * `s` - Input text
/// * `items` - Merged item sequence
/// * `floating` - Whether the first item may start anywhere in `s`
/// * `sink` - Called with each remainder; returning `Flow::Stop` ends the search
pub fn each_end(s: &str, items: &[Item], floating: bool, sink: &mut Sink<'_>) -> Flow {
    let Some((head, rest)) = items.split_first() else {
        return sink(s, floating);
    };
    if s.len() < head.min_len() {
        return Flow::Abort;
    }
    if floating {
        scan(s, head, rest, sink)
    } else {
        anchored(s, head, rest, sink)
    }
}

/// Whether `items` match all of `s`
pub fn match_items(s: &str, items: &[Item]) -> bool {
    let flow = each_end(s, items, false, &mut |rest: &str, floating: bool| {
        if floating || rest.is_empty() {
            Flow::Stop
        } else {
            Flow::Continue
        }
    });
    flow == Flow::Stop
}

fn anchored(s: &str, head: &Item, rest: &[Item], sink: &mut Sink<'_>) -> Flow {
    match head {
        Item::Star(n) => match skip_runes(s, *n) {
            Some(at) => each_end(&s[at..], rest, true, sink),
            None => Flow::Abort,
        },
        Item::List(list) => {
            if list.is_optional() && each_end(s, rest, false, sink) == Flow::Stop {
                return Flow::Stop;
            }
            for len in list.prefix_matches(s) {
                if each_end(&s[len..], rest, false, sink) == Flow::Stop {
                    return Flow::Stop;
                }
            }
            Flow::Continue
        }
        Item::Group(group) => {
            if group.is_optional() && each_end(s, rest, false, sink) == Flow::Stop {
                return Flow::Stop;
            }
            for chain in group.members() {
                let flow = each_end(s, chain.items(), false, &mut |r: &str, fl: bool| {
                    each_end(r, rest, fl, &mut *sink)
                });
                if flow == Flow::Stop {
                    return Flow::Stop;
                }
            }
            Flow::Continue
        }
        _ => match head.match_fixed(s) {
            Some(len) => each_end(&s[len..], rest, false, sink),
            None => Flow::Continue,
        },
    }
}

fn scan(s: &str, head: &Item, rest: &[Item], sink: &mut Sink<'_>) -> Flow {
    match head {
        // a pending star is absorbed into this one
        Item::Star(_) => anchored(s, head, rest, sink),
        Item::List(list) => {
            if list.is_optional() && each_end(s, rest, true, sink) == Flow::Stop {
                return Flow::Stop;
            }
            // remainders starting at or after `dead` cannot match
            let mut dead = usize::MAX;
            let mut base = 0;
            while base < s.len() {
                let Some(offset) = list.find_candidate(&s[base..]) else {
                    break;
                };
                let at = base + offset;
                if at.saturating_add(list.min_len()) >= dead {
                    break;
                }
                let tail = &s[at..];
                for len in list.prefix_matches(tail) {
                    if at + len >= dead {
                        continue;
                    }
                    match each_end(&tail[len..], rest, false, sink) {
                        Flow::Stop => return Flow::Stop,
                        Flow::Abort => dead = at + len,
                        Flow::Continue => {}
                    }
                }
                base = at + first_rune_len(tail);
            }
            Flow::Abort
        }
        Item::Group(group) => {
            if group.is_optional() && each_end(s, rest, true, sink) == Flow::Stop {
                return Flow::Stop;
            }
            for chain in group.members() {
                let flow = each_end(s, chain.items(), true, &mut |r: &str, fl: bool| {
                    each_end(r, rest, fl, &mut *sink)
                });
                if flow == Flow::Stop {
                    return Flow::Stop;
                }
            }
            Flow::Abort
        }
        Item::Any(_) => {
            for (at, _) in s.char_indices() {
                match anchored(&s[at..], head, rest, sink) {
                    Flow::Continue => {}
                    flow => return flow,
                }
            }
            Flow::Abort
        }
        _ => {
            let mut base = 0;
            loop {
                let Find::Found { offset, len } = head.find(&s[base..]) else {
                    return Flow::Abort;
                };
                let at = base + offset;
                match each_end(&s[at + len..], rest, false, sink) {
                    Flow::Continue => {}
                    flow => return flow,
                }
                if at >= s.len() {
                    return Flow::Abort;
                }
                base = at + first_rune_len(&s[at..]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Glob;

    fn is_match(pattern: &str, s: &str) -> bool {
        Glob::parse(pattern).unwrap().is_match(s)
    }

    #[test]
    fn test_star_backtracking() {
        assert!(is_match("a*b?c", "abbec"));
        assert!(is_match("a*b?c", "ab?c"));
        assert!(!is_match("a*b?c", "abc"));
        assert!(is_match("*a*a*", "xaya"));
        assert!(!is_match("*a*a*", "xya"));
        assert!(is_match("a*cd*e", "acdxcde"));
    }

    #[test]
    fn test_any_runs() {
        assert!(is_match("a???", "aЯbc"));
        assert!(!is_match("a???", "aЯb"));
        assert!(is_match("*??x", "abx"));
        assert!(!is_match("*??x", "bx"));
    }

    #[test]
    fn test_floating_lists() {
        assert!(is_match("*{foo,bar}*", "xxbarxx"));
        assert!(!is_match("*{foo,bar}*", "xxbazxx"));
        assert!(is_match("a*{ab,b}c", "axabc"));
        assert!(is_match("a*{,x}c", "abc"));
        assert!(is_match("*{Яa,Юb}", "qqЮb"));
    }

    #[test]
    fn test_groups() {
        assert!(is_match("x{a*,b?}y", "xaqqy"));
        assert!(is_match("x{a*,b?}y", "xbqy"));
        assert!(!is_match("x{a*,b?}y", "xbqqy"));
        assert!(is_match("*{a?c,d*e}!", "zzdqqe!"));
        assert!(is_match("x{,a*}y", "xy"));
    }

    #[test]
    fn test_classes() {
        assert!(is_match("*[0-9]", "abc7"));
        assert!(!is_match("*[0-9]", "abc"));
        assert!(is_match("*[Э-Я]x", "abЮx"));
        assert!(!is_match("a[z-a]b", "a-b"));
    }

    fn count_ends(pattern: &str, s: &str, answer: Flow) -> usize {
        let glob = Glob::parse(pattern).unwrap();
        let mut calls = 0;
        each_end(s, glob.items(), false, &mut |_: &str, _: bool| {
            calls += 1;
            answer
        });
        calls
    }

    #[test]
    fn test_abort_prunes_star_splits() {
        let s = "a".repeat(40);
        // a failing continuation is tried once, not once per split
        assert_eq!(count_ends("*a*a*a*a*a*a*", &s, Flow::Abort), 1);
        assert!(count_ends("*a*a*", &s, Flow::Continue) > 40);
        assert!(!is_match("*a*a*a*a*a*a*x*", &s));
        assert!(!is_match("*a*a*a*a*a*a*a*a*a*a*x*", &"a".repeat(200)));
    }

    #[test]
    fn test_abort_prunes_floating_lists() {
        let s = "ab".repeat(20);
        assert!(count_ends("*{ab,c}*{ab,c}*{ab,c}*{ab,c}*", &s, Flow::Abort) <= 2);
        let pattern = format!("{}*x*", "*{ab,c}".repeat(7));
        assert!(!is_match(&pattern, &s));
        assert!(is_match(&pattern, &format!("{}x", s)));
        // a shorter member found later can still end before the aborted one
        assert!(is_match("*{abcd,b}???", "abcdx"));
        assert!(!is_match("*{abcd,b}???", "abcd"));
    }

    #[test]
    fn test_each_end_reports_remainders() {
        let items = vec![Item::Star(0), Item::Byte(b'b')];
        let mut ends = Vec::new();
        let flow = each_end("abab", &items, false, &mut |r: &str, fl: bool| {
            ends.push((r.to_string(), fl));
            Flow::Continue
        });
        assert_eq!(flow, Flow::Abort);
        assert_eq!(
            ends,
            vec![("ab".to_string(), false), (String::new(), false)]
        );
    }
}
