//! tree::parser
//!
//! Bracket text to [`Node`] parsing.
//!
//! # Grammar
//!
//! ```text
//! node   := list | string | atom
//! list   := '{' ( node ( ',' node )* )? '}'
//! string := '"' ( any char except '"' | '""' )* '"'
//! atom   := one or more chars except '{' '}' ',' '"' and whitespace
//! ```
//!
//! Whitespace (including newlines) is allowed around every token, and a
//! leading byte order mark is ignored. Lists may nest at most
//! [`MAX_DEPTH`] levels deep.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, cut, map, value},
    error::{context, VerboseError, VerboseErrorKind},
    multi::{fold_many0, separated_list0},
    sequence::delimited,
    IResult,
};
use thiserror::Error;

use super::Node;

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Deepest list nesting accepted; deeper input is rejected.
pub const MAX_DEPTH: usize = 128;

/// Error from parsing bracket text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed bracket text: {message}")]
pub struct ParseError {
    pub message: String,
}

/// Parse a complete bracket document.
pub fn parse(text: &str) -> Result<Node, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    match all_consuming(delimited(multispace0, |i| node(i, 0), multispace0))(text) {
        Ok((_, node)) => Ok(node),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ParseError {
            message: nom::error::convert_error(text, e),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ParseError {
            message: "incomplete input".to_string(),
        }),
    }
}

fn node(input: &str, depth: usize) -> Res<'_, Node> {
    alt((|i| list(i, depth), quoted, atom))(input)
}

fn list(input: &str, depth: usize) -> Res<'_, Node> {
    let (input, _) = char('{')(input)?;
    if depth >= MAX_DEPTH {
        return Err(nom::Err::Failure(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("nesting too deep"))],
        }));
    }
    let (input, _) = multispace0(input)?;
    let (input, items) = separated_list0(
        delimited(multispace0, char(','), multispace0),
        |i| node(i, depth + 1),
    )(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(context("closing brace", char('}')))(input)?;
    Ok((input, Node::List(items)))
}

fn quoted(input: &str) -> Res<'_, Node> {
    let body = fold_many0(
        alt((value("\"", tag("\"\"")), is_not("\""))),
        String::new,
        |mut acc: String, chunk: &str| {
            acc.push_str(chunk);
            acc
        },
    );
    map(
        delimited(char('"'), body, cut(context("closing quote", char('"')))),
        Node::Str,
    )(input)
}

fn atom(input: &str) -> Res<'_, Node> {
    map(
        take_while1(|c: char| !matches!(c, '{' | '}' | ',' | '"') && !c.is_whitespace()),
        |s: &str| Node::Atom(s.to_string()),
    )(input)
}
