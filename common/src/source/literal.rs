//! Lenient parser for JavaScript/TypeScript object and array literals.
//!
//! Accepts the subset of literal syntax hand-written data files use:
//! bare or quoted keys, single/double/backtick strings, trailing commas,
//! comments, `undefined`. The result is a `serde_json::Value` with keys in
//! source order.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while, take_while_m_n},
    character::complete::{anychar, char, digit1, multispace1, satisfy},
    combinator::{cut, map, map_opt, map_res, not, opt, recognize, value},
    error::{context, convert_error, ErrorKind, ParseError, VerboseError},
    multi::{fold_many0, many0_count, separated_list0},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use serde_json::{Map, Number, Value};

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// 2^53, the largest magnitude below which every integer is exact in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Parse the array literal at the start of `input` (leading whitespace and
/// comments allowed). Text after the closing bracket is returned untouched.
pub fn parse_array_literal(input: &str) -> Result<(Vec<Value>, &str), String> {
    match preceded(ws, array)(input) {
        Ok((rest, Value::Array(items))) => Ok((items, rest)),
        Ok(_) => Err("expected an array literal".to_string()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(convert_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err("incomplete input".to_string()),
    }
}

// ============================================================================
// Whitespace & comments
// ============================================================================

fn line_comment(input: &str) -> Res<&str> {
    recognize(pair(tag("//"), take_while(|c: char| c != '\n')))(input)
}

fn block_comment(input: &str) -> Res<&str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

fn ws(input: &str) -> Res<()> {
    value((), many0_count(alt((multispace1, line_comment, block_comment))))(input)
}

fn token<'a, O, F>(parser: F) -> impl FnMut(&'a str) -> Res<'a, O>
where
    F: FnMut(&'a str) -> Res<'a, O>,
{
    preceded(ws, parser)
}

// ============================================================================
// Values
// ============================================================================

fn literal(input: &str) -> Res<Value> {
    preceded(
        ws,
        context(
            "value",
            alt((
                object,
                array,
                map(string_literal, Value::String),
                keyword,
                number,
            )),
        ),
    )(input)
}

fn array(input: &str) -> Res<Value> {
    let (input, _) = char('[')(input)?;
    let (input, items) = separated_list0(token(char(',')), literal)(input)?;
    let (input, _) = opt(token(char(',')))(input)?;
    let (input, _) = cut(context("closing bracket", token(char(']'))))(input)?;
    Ok((input, Value::Array(items)))
}

fn object(input: &str) -> Res<Value> {
    let (input, _) = char('{')(input)?;
    let (input, members) = separated_list0(token(char(',')), member)(input)?;
    let (input, _) = opt(token(char(',')))(input)?;
    let (input, _) = cut(context("closing brace", token(char('}'))))(input)?;

    // a repeated key keeps its first position and takes the last value
    let mut fields = Map::new();
    for (key, val) in members {
        fields.insert(key, val);
    }
    Ok((input, Value::Object(fields)))
}

fn member(input: &str) -> Res<(String, Value)> {
    let (input, key) = token(property_key)(input)?;
    let (input, _) = cut(context("colon after property key", token(char(':'))))(input)?;
    let (input, val) = cut(literal)(input)?;
    Ok((input, (key, val)))
}

fn property_key(input: &str) -> Res<String> {
    alt((
        string_literal,
        map(identifier, str::to_string),
        map(digit1, str::to_string),
    ))(input)
}

fn keyword(input: &str) -> Res<Value> {
    terminated(
        alt((
            value(Value::Bool(true), tag("true")),
            value(Value::Bool(false), tag("false")),
            value(Value::Null, tag("null")),
            value(Value::Null, tag("undefined")),
        )),
        not(satisfy(is_ident_char)),
    )(input)
}

fn number(input: &str) -> Res<Value> {
    map_opt(recognize_float, number_value)(input)
}

/// Plain integer literals within i64 stay exact integers. Other integral
/// values below 2^53 become integers too, so `2.0` and `2` agree.
fn number_value(text: &str) -> Option<Value> {
    let text = text.strip_prefix('+').unwrap_or(text);
    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::from(int));
    }
    let real: f64 = text.parse().ok()?;
    if !real.is_finite() {
        return None;
    }
    if real.fract() == 0.0 && real.abs() < MAX_EXACT_INTEGER {
        return Some(Value::from(real as i64));
    }
    Number::from_f64(real).map(Value::Number)
}

fn identifier(input: &str) -> Res<&str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_char)))(input)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// ============================================================================
// Strings
// ============================================================================

#[derive(Debug, Clone)]
enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
    Continuation,
}

fn string_literal(input: &str) -> Res<String> {
    alt((quoted('"'), quoted('\''), quoted('`')))(input)
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> Res<'a, String> {
    move |input: &'a str| {
        let (input, _) = char(quote)(input)?;
        let (input, body) = fold_many0(
            |i: &'a str| string_fragment(i, quote),
            String::new,
            |mut acc, fragment| {
                match fragment {
                    Fragment::Literal(s) => acc.push_str(s),
                    Fragment::Escaped(c) => acc.push(c),
                    Fragment::Continuation => {}
                }
                acc
            },
        )(input)?;
        let (input, _) = cut(context("closing quote", char(quote)))(input)?;
        Ok((input, body))
    }
}

fn string_fragment(input: &str, quote: char) -> Res<Fragment<'_>> {
    let stop = match quote {
        '"' => "\"\\",
        '\'' => "'\\",
        _ => "`\\$",
    };
    alt((
        map(is_not(stop), Fragment::Literal),
        preceded(char('\\'), escape_sequence),
        // template strings: a lone `$` is text, `${` is an unsupported interpolation
        map(terminated(tag("$"), not(char('{'))), Fragment::Literal),
    ))(input)
}

fn escape_sequence(input: &str) -> Res<Fragment<'_>> {
    alt((
        // once `\u` or `\x` is seen the escape must be well formed
        map(preceded(char('u'), cut(unicode_escape)), Fragment::Escaped),
        map(preceded(char('x'), cut(hex_escape)), Fragment::Escaped),
        value(Fragment::Continuation, alt((tag("\r\n"), tag("\n")))),
        map(anychar, |c| {
            Fragment::Escaped(match c {
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'b' => '\u{08}',
                'f' => '\u{0C}',
                'v' => '\u{0B}',
                '0' => '\0',
                other => other,
            })
        }),
    ))(input)
}

fn hex_escape(input: &str) -> Res<char> {
    map_opt(
        map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |hex: &str| {
            u32::from_str_radix(hex, 16)
        }),
        char::from_u32,
    )(input)
}

fn code_unit(input: &str) -> Res<u32> {
    map_res(
        alt((
            delimited(
                char('{'),
                take_while_m_n(1, 6, |c: char| c.is_ascii_hexdigit()),
                char('}'),
            ),
            take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        )),
        |hex: &str| u32::from_str_radix(hex, 16),
    )(input)
}

/// `\uXXXX`, `\u{X..}`, and UTF-16 surrogate pairs written as two escapes
fn unicode_escape(input: &str) -> Res<char> {
    let (rest, code) = code_unit(input)?;
    if (0xD800..0xDC00).contains(&code) {
        let (rest, low) = cut(context("low surrogate", preceded(tag("\\u"), code_unit)))(rest)?;
        if (0xDC00..0xE000).contains(&low) {
            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            if let Some(c) = char::from_u32(combined) {
                return Ok((rest, c));
            }
        }
        return Err(nom::Err::Failure(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        )));
    }
    match char::from_u32(code) {
        Some(c) => Ok((rest, c)),
        None => Err(nom::Err::Failure(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(input: &str) -> Vec<Value> {
        parse_array_literal(input).unwrap().0
    }

    #[test]
    fn test_bare_and_quoted_keys() {
        let items = parse(r#"[{ id: 1, "title": "a", 'owner': 'b', 2: true }]"#);
        assert_eq!(
            items,
            vec![json!({"id": 1, "title": "a", "owner": "b", "2": true})]
        );
    }

    #[test]
    fn test_keys_keep_source_order() {
        let items = parse("[{ zeta: 1, alpha: 2, mid: 3 }]");
        let keys: Vec<&String> = items[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_trailing_commas_and_comments() {
        let input = r#"[
            // first task
            { id: 't1', done: false, },
            /* second */ { id: 't2', tags: ['x', 'y',], },
        ]"#;
        let items = parse(input);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["tags"], json!(["x", "y"]));
    }

    #[test]
    fn test_apostrophes_and_colons_survive() {
        let items = parse(r#"[{ note: "don't stop: keep going, ok" }]"#);
        assert_eq!(items[0]["note"], "don't stop: keep going, ok");

        let items = parse(r"[{ note: 'it\'s here' }]");
        assert_eq!(items[0]["note"], "it's here");
    }

    #[test]
    fn test_escapes() {
        let items = parse(r#"[{ a: "line\nbreak", b: "é\u{1F600}", c: "\x41", d: "😀" }]"#);
        assert_eq!(items[0]["a"], "line\nbreak");
        assert_eq!(items[0]["b"], "é😀");
        assert_eq!(items[0]["c"], "A");
        assert_eq!(items[0]["d"], "😀");
    }

    #[test]
    fn test_empty_strings() {
        let items = parse(r#"[{ a: "", b: '', c: `` }]"#);
        assert_eq!(items[0], json!({"a": "", "b": "", "c": ""}));
    }

    #[test]
    fn test_template_string_without_interpolation() {
        let items = parse("[{ price: `costs $5` }]");
        assert_eq!(items[0]["price"], "costs $5");
    }

    #[test]
    fn test_template_interpolation_rejected() {
        assert!(parse_array_literal("[{ a: `hi ${name}` }]").is_err());
    }

    #[test]
    fn test_numbers() {
        let items = parse("[{ a: 42, b: -3, c: 2.5, d: 2.0, e: 1e3, f: .5 }]");
        let record = &items[0];
        assert!(record["a"].is_i64());
        assert_eq!(record["b"], json!(-3));
        assert!(record["c"].is_f64());
        assert_eq!(record["d"], json!(2));
        assert!(record["d"].is_i64());
        assert_eq!(record["e"], json!(1000));
        assert_eq!(record["f"], json!(0.5));
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let items =
            parse("[{ a: 9007199254740993, b: -9007199254740993, c: 9007199254740993.0, d: 1e300 }]");
        let record = &items[0];
        assert_eq!(record["a"].as_i64(), Some(9_007_199_254_740_993));
        assert_eq!(record["b"].as_i64(), Some(-9_007_199_254_740_993));
        assert!(record["c"].is_f64());
        assert!(record["d"].is_f64());
    }

    #[test]
    fn test_malformed_escapes_rejected() {
        for input in [
            r#"[{ a: "\uD800" }]"#,
            r#"[{ a: "\uD800\u0041" }]"#,
            r#"[{ a: "\uDC00" }]"#,
            r#"[{ a: "\uZZZZ" }]"#,
            r#"[{ a: "\u12" }]"#,
            r#"[{ a: "\x4" }]"#,
            r#"[{ a: "\xZZ" }]"#,
            r#"[{ a: '\u{110000}' }]"#,
        ] {
            assert!(parse_array_literal(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let items = parse(r#"[{ a: "\uD83D\uDE00" }]"#);
        assert_eq!(items[0]["a"], "😀");
    }

    #[test]
    fn test_keywords() {
        let items = parse("[{ a: true, b: false, c: null, d: undefined }]");
        assert_eq!(
            items[0],
            json!({"a": true, "b": false, "c": null, "d": null})
        );
    }

    #[test]
    fn test_nested_structures() {
        let items = parse("[{ meta: { region: 'north', coords: [1, 2] }, list: [] }]");
        assert_eq!(items[0]["meta"], json!({"region": "north", "coords": [1, 2]}));
        assert_eq!(items[0]["list"], json!([]));
    }

    #[test]
    fn test_returns_remaining_text() {
        let (items, rest) = parse_array_literal("[1, 2] as const;").unwrap();
        assert_eq!(items, vec![json!(1), json!(2)]);
        assert_eq!(rest, " as const;");
    }

    #[test]
    fn test_unclosed_array_fails() {
        let err = parse_array_literal("[{ id: 1 }").unwrap_err();
        assert!(err.contains("closing bracket"));
    }

    #[test]
    fn test_missing_colon_fails() {
        assert!(parse_array_literal("[{ id 1 }]").is_err());
    }

    #[test]
    fn test_keyword_prefix_is_not_keyword() {
        assert!(parse_array_literal("[{ a: nullish }]").is_err());
    }
}
