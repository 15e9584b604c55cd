//! Parser for the textual form of `points` geometry values.
//!
//! Tabular sources store geometry as text such as `[[0, 0], [1, 1]]` or
//! `((0.5, 1), (2, 3.25))`. Only nested lists of numbers are accepted:
//!
//! ```text
//! value  := list | number
//! list   := '[' items ']' | '(' items ')'
//! items  := (value (',' value)* ','?)?
//! number := ['+'|'-'] (digits ['.' digits*] | '.' digits) [('e'|'E') ['+'|'-'] digits]
//! ```
//!
//! Whitespace is allowed between tokens. The top-level value must be a list.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use serde_json::{Number, Value};

use crate::error::{Error, Result};

/// Deepest list nesting accepted.
const MAX_DEPTH: usize = 32;

/// Parse a textual coordinate list into a nested JSON array.
///
/// Integers stay integers; anything with a fraction or exponent becomes a
/// float.
///
/// # Example
///
/// ```
/// use layoutio::points::parse_points;
/// use serde_json::json;
///
/// let value = parse_points("[[0, 0], [1.5, 2]]").unwrap();
/// assert_eq!(value, json!([[0, 0], [1.5, 2]]));
/// ```
pub fn parse_points(text: &str) -> Result<Value> {
    if nesting_depth(text) > MAX_DEPTH {
        return Err(Error::InvalidPoints(format!(
            "nesting deeper than {} levels",
            MAX_DEPTH
        )));
    }

    all_consuming(delimited(multispace0, list, multispace0))(text)
        .map(|(_, value)| value)
        .map_err(|_| Error::InvalidPoints(text.to_string()))
}

fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for c in text.chars() {
        match c {
            '[' | '(' => {
                depth += 1;
                max = max.max(depth);
            }
            ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

fn value(input: &str) -> IResult<&str, Value> {
    delimited(multispace0, alt((list, number)), multispace0)(input)
}

fn items(input: &str) -> IResult<&str, Vec<Value>> {
    terminated(
        separated_list0(char(','), value),
        opt(preceded(multispace0, char(','))),
    )(input)
}

fn list(input: &str) -> IResult<&str, Value> {
    map(
        alt((
            delimited(char('['), items, preceded(multispace0, char(']'))),
            delimited(char('('), items, preceded(multispace0, char(')'))),
        )),
        Value::Array,
    )(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        number_value,
    )(input)
}

fn number_value(text: &str) -> std::result::Result<Value, String> {
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::from(n));
        }
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("number out of range: {}", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_pairs() {
        assert_eq!(
            parse_points("[[0,0],[1,1]]").unwrap(),
            json!([[0, 0], [1, 1]])
        );
    }

    #[test]
    fn test_parse_tuples_and_whitespace() {
        assert_eq!(
            parse_points("  ( (0.5, 1) , (2, -3.25e1) , )  ").unwrap(),
            json!([[0.5, 1], [2, -32.5]])
        );
    }

    #[test]
    fn test_parse_flat_list() {
        assert_eq!(
            parse_points("[1, 2, 3, 4, 5, 6, 7, 8]").unwrap(),
            json!([1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    #[test]
    fn test_parse_empty_list() {
        assert_eq!(parse_points("[]").unwrap(), json!([]));
    }

    #[test]
    fn test_parse_leading_dot_and_sign() {
        assert_eq!(parse_points("[.5, +2]").unwrap(), json!([0.5, 2]));
    }

    #[test]
    fn test_rejects_non_list_top_level() {
        assert!(matches!(parse_points("42"), Err(Error::InvalidPoints(_))));
        assert!(matches!(parse_points(""), Err(Error::InvalidPoints(_))));
    }

    #[test]
    fn test_rejects_arbitrary_literals() {
        assert!(parse_points("[__import__('os')]").is_err());
        assert!(parse_points("['a', 'b']").is_err());
        assert!(parse_points("{1: 2}").is_err());
        assert!(parse_points("[nan, inf]").is_err());
    }

    #[test]
    fn test_rejects_mismatched_brackets() {
        assert!(parse_points("[1, 2)").is_err());
        assert!(parse_points("[[1, 2]").is_err());
        assert!(parse_points("[1, 2]]").is_err());
        assert!(parse_points("[1 2]").is_err());
    }

    #[test]
    fn test_rejects_deep_nesting() {
        let text = format!("{}{}", "[".repeat(100), "]".repeat(100));
        assert!(matches!(parse_points(&text), Err(Error::InvalidPoints(_))));
    }
}
