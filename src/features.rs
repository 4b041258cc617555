//! Feature-set generator (C1): turns a keyword or wildcard query into the
//! character-pattern multisets `S_K(w)` / `S_T(q)` from §3.
//!
//! Everything here is a pure function over `Vec<char>` — indexed by
//! Unicode scalar value rather than UTF-8 byte offset, so that multi-byte
//! alphabets index the same way the Python implementation this was
//! distilled from indexes plain `str`. Element order within a returned
//! `Vec<String>` is never significant: callers only ever check multiset
//! containment or feed every element through the same hash-and-insert
//! step, so repeats and reorderings are harmless.
//!
//! Repeated pair-patterns are turned into distinct features by prefixing
//! them with an ascending occurrence count ("1:", "2:", ...), which is
//! what lets plain set containment stand in for multiset containment
//! downstream (§3, "occurrence numbering").

use std::collections::HashMap;

/// Prefixes every distinct string in `items` with "1:", "2:", ... up to
/// its multiplicity, turning a multiset into a set of numbered copies.
fn occurrence_number(items: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in &items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    let mut out = Vec::with_capacity(items.len());
    for (item, count) in counts {
        for n in 1..=count {
            out.push(format!("{n}:{item}"));
        }
    }
    out
}

/// `S_K^o(w)`: positional features `"{i+1}:{w[i]}"`.
fn s_k_o(w: &[char]) -> Vec<String> {
    w.iter()
        .enumerate()
        .map(|(i, c)| format!("{}:{}", i + 1, c))
        .collect()
}

/// `S_K^{p1}(w)`: occurrence-numbered `"{distance}:{c1},{c2}"` over every
/// ordered character pair in `w`.
fn s_k_p1(w: &[char]) -> Vec<String> {
    let mut pairs = Vec::new();
    for c1 in 0..w.len() {
        for c2 in (c1 + 1)..w.len() {
            pairs.push(format!("{}:{},{}", c2 - c1, w[c1], w[c2]));
        }
    }
    occurrence_number(pairs)
}

/// `S_K^{p2}(w)`: occurrence-numbered `"{c1},{c2}"` over every ordered
/// character pair in `w`, i.e. `S_K^{p1}` without the distance field.
///
/// This implementation omits the `-:` infix some earlier drafts of this
/// scheme used (`"{n}:-:{c1},{c2}"`); see SPEC_FULL.md §9 for the
/// resolved Open Question.
fn s_k_p2(w: &[char]) -> Vec<String> {
    let mut pairs = Vec::new();
    for c1 in 0..w.len() {
        for c2 in (c1 + 1)..w.len() {
            pairs.push(format!("{},{}", w[c1], w[c2]));
        }
    }
    occurrence_number(pairs)
}

/// `S_K(w) = S_K^o(w) ⊎ S_K^{p1}(w) ⊎ S_K^{p2}(w)`.
///
/// Empty for an empty keyword.
pub fn s_k(w: &str) -> Vec<String> {
    let chars: Vec<char> = w.chars().collect();
    let mut out = s_k_o(&chars);
    out.extend(s_k_p1(&chars));
    out.extend(s_k_p2(&chars));
    out
}

/// `S_T^o(q)`: positional features over the prefix of `q` up to (but
/// excluding) its first `*`, skipping `_` positions. A `q` that begins
/// with `*` yields an empty prefix and hence an empty set.
fn s_t_o(q: &[char]) -> Vec<String> {
    let fixed_len = q.iter().position(|&c| c == '*').unwrap_or(q.len());
    (0..fixed_len)
        .filter(|&i| q[i] != '_')
        .map(|i| format!("{}:{}", i + 1, q[i]))
        .collect()
}

/// `S_T^{p1}(q)`: split `q` on `*` into groups; within each group, pair up
/// non-`_` characters using their intra-group distance, then apply the
/// same occurrence-numbering as `S_K^{p1}`.
fn s_t_p1(q: &[char]) -> Vec<String> {
    let mut pairs = Vec::new();
    for group in q.split(|&c| c == '*') {
        for c1 in 0..group.len() {
            if group[c1] == '_' {
                continue;
            }
            for c2 in (c1 + 1)..group.len() {
                if group[c2] == '_' {
                    continue;
                }
                pairs.push(format!("{}:{},{}", c2 - c1, group[c1], group[c2]));
            }
        }
    }
    occurrence_number(pairs)
}

/// `S_T^{p2}(q) = S_K^{p2}(q with all '*' and '_' removed)`.
fn s_t_p2(q: &[char]) -> Vec<String> {
    let stripped: Vec<char> = q.iter().copied().filter(|&c| c != '*' && c != '_').collect();
    s_k_p2(&stripped)
}

/// `S_T(q) = S_T^o(q) ⊎ S_T^{p1}(q) ⊎ S_T^{p2}(q)`.
///
/// Empty for an empty query. `"_"` or `"*"` alone produce an empty set
/// (they match everything, since an empty `srch_token` has no positions
/// to check — see [`crate::zn::server`]).
pub fn s_t(q: &str) -> Vec<String> {
    let chars: Vec<char> = q.chars().collect();
    let mut out = s_t_o(&chars);
    out.extend(s_t_p1(&chars));
    out.extend(s_t_p2(&chars));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn set(v: Vec<String>) -> HashSet<String> {
        v.into_iter().collect()
    }

    #[test]
    fn s_k_o_simple_keyword() {
        let got = set(s_k_o(&"keyword".chars().collect::<Vec<_>>()));
        let want: HashSet<String> = ["1:k", "2:e", "3:y", "4:w", "5:o", "6:r", "7:d"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn s_k_o_empty_keyword() {
        assert!(s_k_o(&[]).is_empty());
    }

    #[test]
    fn s_k_p1_repeating_keyword_gets_numbered() {
        let got = set(s_k_p1(&"keykey".chars().collect::<Vec<_>>()));
        let want: HashSet<String> = [
            "1:1:k,e", "1:2:k,y", "1:3:k,k", "1:4:k,e", "1:5:k,y", "1:1:e,y", "1:2:e,k",
            "1:3:e,e", "1:4:e,y", "1:1:y,k", "1:2:y,e", "1:3:y,y", "2:1:k,e", "2:2:k,y",
            "2:1:e,y",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn s_k_p2_has_no_dash_infix() {
        let got = set(s_k_p2(&"ab".chars().collect::<Vec<_>>()));
        assert_eq!(got, set(vec!["1:a,b".to_string()]));
    }

    #[test]
    fn s_t_o_stops_before_first_star() {
        let got = set(s_t_o(&"ab*cd".chars().collect::<Vec<_>>()));
        let want: HashSet<String> = ["1:a", "2:b"].into_iter().map(String::from).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn s_t_o_skips_underscore_positions() {
        let got = set(s_t_o(&"a_c".chars().collect::<Vec<_>>()));
        let want: HashSet<String> = ["1:a", "3:c"].into_iter().map(String::from).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn star_starting_query_has_empty_s_t_o() {
        assert!(s_t_o(&"*abc".chars().collect::<Vec<_>>()).is_empty());
    }

    #[test]
    fn lone_wildcard_queries_are_empty() {
        assert!(s_t(&"_").is_empty());
        assert!(s_t(&"*").is_empty());
        assert!(s_t(&"").is_empty());
    }

    /// Property 1: for every `q` that matches `w` under the standard
    /// semantics, `S_T(q)` must be contained in `S_K(w)` as a multiset.
    fn matches(w: &str, q: &str) -> bool {
        let w: Vec<char> = w.chars().collect();
        let q: Vec<char> = q.chars().collect();
        fn rec(w: &[char], q: &[char]) -> bool {
            if q.is_empty() {
                return w.is_empty();
            }
            match q[0] {
                '*' => (0..=w.len()).any(|k| rec(&w[k..], &q[1..])),
                '_' => !w.is_empty() && rec(&w[1..], &q[1..]),
                c => !w.is_empty() && w[0] == c && rec(&w[1..], &q[1..]),
            }
        }
        rec(&w, &q)
    }

    fn multiset_contains(haystack: &[String], needle: &[String]) -> bool {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for h in haystack {
            *counts.entry(h.as_str()).or_insert(0) += 1;
        }
        for n in needle {
            match counts.get_mut(n.as_str()) {
                Some(c) if *c > 0 => *c -= 1,
                _ => return false,
            }
        }
        true
    }

    #[test]
    fn property_1_containment_holds_for_matching_queries() {
        let cases: &[(&str, &[&str])] = &[
            ("abcdefghi", &["abcdefghi", "a_c_e_g_i", "*", "a*i", "*def*", "ab_defghi"]),
            ("cat", &["cat", "c_t", "_a_", "*"]),
            ("25-01-1996", &["25-01-1996", "__-__-____", "25-01-____", "*-1996"]),
        ];
        for (w, queries) in cases {
            let s_k = s_k(w);
            for q in *queries {
                assert!(matches(w, q), "test bug: {q} should match {w}");
                let s_t = s_t(q);
                assert!(
                    multiset_contains(&s_k, &s_t),
                    "S_T({q}) not contained in S_K({w}): s_t={s_t:?} s_k={s_k:?}"
                );
            }
        }
    }
}
