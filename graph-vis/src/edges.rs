use log::debug;
use serde_json::Value;

use crate::literal::{Literal, parse_literal};

/// An edge as written in the input. Endpoints may fall outside `0..n`.
pub type Edge = (i64, i64);

/// Parses a 2D edge list written as a JSON array or as a looser literal list.
///
/// Malformed input yields an empty list, and elements whose first two entries cannot be
/// read as integers are skipped.
pub fn parse_edges(text: &str) -> Vec<Edge> {
    let text = text.trim();
    if text.is_empty() {
        return vec![];
    }

    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
        debug!("decoded edge list as json");
        return collect_edges(&items);
    }

    if let Some(Literal::List(items)) = parse_literal(text) {
        debug!("decoded edge list as literal");
        return collect_edges(&items);
    }

    debug!("edge list could not be decoded");
    vec![]
}

fn collect_edges(items: &[Value]) -> Vec<Edge> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Array(pair) if pair.len() >= 2 => {
                Some((coerce_int(&pair[0])?, coerce_int(&pair[1])?))
            }
            _ => None,
        })
        .collect()
}

// Integers too large for an `i64` saturate, which keeps them out of range for any `n`.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                return Some(i);
            }
            if number.is_u64() {
                return Some(i64::MAX);
            }
            let f = number.as_f64()?;
            f.is_finite().then_some(f.trunc() as i64)
        }
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => parse_int_str(s),
        _ => None,
    }
}

/// Decimal integer with optional sign and single `_` separators between digits.
fn parse_int_str(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'_')
    {
        return None;
    }
    let sign = if negative { -1 } else { 1 };
    let value = digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10)
                .saturating_add(sign * i64::from(b - b'0'))
        });
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_edges() {
        assert!(parse_edges("").is_empty());
        assert!(parse_edges("   ").is_empty());
        assert!(parse_edges("\n\t").is_empty());
    }

    #[test]
    fn malformed_text_yields_no_edges() {
        assert!(parse_edges("not valid at all").is_empty());
        assert!(parse_edges("[[0, 1]").is_empty());
        assert!(parse_edges("{\"a\": [0, 1]}").is_empty());
        assert!(parse_edges("42").is_empty());
    }

    #[test]
    fn json_edges_keep_input_order() {
        assert_eq!(
            parse_edges("[[2,3],[0,1],[1,2],[0,1],[4,4]]"),
            vec![(2, 3), (0, 1), (1, 2), (0, 1), (4, 4)]
        );
    }

    #[test]
    fn literal_edges_are_accepted() {
        assert_eq!(
            parse_edges("[(0, 1), ('1', '2'), [2, 3],]"),
            vec![(0, 1), (1, 2), (2, 3)]
        );
    }

    #[test]
    fn extra_entries_are_ignored() {
        assert_eq!(parse_edges("[[0, 1, 2], [3, 4, \"x\"]]"), vec![(0, 1), (3, 4)]);
    }

    #[test]
    fn uncoercible_elements_are_skipped() {
        assert_eq!(
            parse_edges(r#"[[0, 1], [], [5], ["1.5", 2], [null, 1], [[0], 1], 7, [1, 2]]"#),
            vec![(0, 1), (1, 2)]
        );
    }

    #[test]
    fn entries_are_coerced_to_integers() {
        assert_eq!(
            parse_edges(r#"[[1.9, -2.7], [" 3 ", "4"], [true, false]]"#),
            vec![(1, -2), (3, 4), (1, 0)]
        );
    }

    #[test]
    fn negative_ids_parse_as_edges() {
        assert_eq!(parse_edges("[[-1, 0], [0, -5]]"), vec![(-1, 0), (0, -5)]);
    }

    #[test]
    fn oversized_numbers_saturate_and_stay_in_the_list() {
        assert_eq!(
            parse_edges("[[0, 99999999999999999999], [0, 18446744073709551615], [-1e300, 1]]"),
            vec![(0, i64::MAX), (0, i64::MAX), (i64::MIN, 1)]
        );
        assert_eq!(
            parse_edges("[(0, 99999999999999999999), (-99999999999999999999, 0x1ffffffffffffffff)]"),
            vec![(0, i64::MAX), (i64::MIN, i64::MAX)]
        );
        assert_eq!(
            parse_edges(r#"[["99999999999999999999", "-9223372036854775808"]]"#),
            vec![(i64::MAX, i64::MIN)]
        );
    }

    #[test]
    fn top_level_tuple_is_not_an_edge_list() {
        assert!(parse_edges("((0, 1), (1, 2))").is_empty());
        assert!(parse_edges("(0, 1), (1, 2)").is_empty());
        assert_eq!(parse_edges("([(0, 1), (1, 2)])"), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn numeric_strings_accept_digit_separators() {
        assert_eq!(
            parse_edges(r#"[["1_0", 2], [" -3 ", "+4"], ["1__0", 2], ["_1", 2], ["1_", 2]]"#),
            vec![(10, 2), (-3, 4)]
        );
    }

    #[test]
    fn non_finite_entries_drop_only_their_element() {
        assert_eq!(
            parse_edges("[[0, 1], [NaN, 2], [1, Infinity], [-Infinity, 0], [1, 2]]"),
            vec![(0, 1), (1, 2)]
        );
    }
}
