//! Line recognizers for the `runtimeclass` grammar subset.
//!
//! Each recognizer works on a single line of text and can be used
//! independently of the scanner. The nom parsers underneath are exposed
//! through thin extractor functions so callers never deal with `IResult`.

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while},
    character::complete::{char, satisfy, space0, space1},
    combinator::{all_consuming, opt, recognize, verify},
    error::ParseError,
    multi::{many0_count, separated_list1},
    sequence::{preceded, terminated},
};

/// Modifier keywords that may prefix a `runtimeclass` keyword.
const CLASS_MODIFIERS: [&str; 3] = ["unsealed", "static", "partial"];

/// Returns the class name if the line opens a `runtimeclass` block.
///
/// The rule is: optional modifier keywords, the `runtimeclass` keyword,
/// then an identifier. Anything after the identifier (a base class clause,
/// an opening brace) is ignored.
pub fn class_open(line: &str) -> Option<&str> {
    parse_class_open::<nom::error::Error<&str>>(line)
        .ok()
        .map(|(_, name)| name)
}

/// Returns `true` if the line closes a `runtimeclass` block.
///
/// A closing line consists solely of a `}` and surrounding whitespace.
pub fn class_close(line: &str) -> bool {
    all_consuming::<_, nom::error::Error<&str>, _>((space0, char('}'), space0))
        .parse(line)
        .is_ok()
}

/// Returns the member name if the line declares a class member.
///
/// The rule is: one or more whitespace separated type tokens (a token may
/// be a dotted name such as `Windows.Foundation.IAsyncAction`, and the
/// first may be the `static` keyword), then an identifier followed by a
/// parenthesized parameter list and a `;`. Properties and events carry no
/// parameter list and are not recognized.
pub fn member_decl(line: &str) -> Option<&str> {
    parse_member_decl::<nom::error::Error<&str>>(line)
        .ok()
        .map(|(_, name)| name)
}

fn parse_class_open<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    preceded(
        (
            space0,
            many0_count(terminated(class_modifier, space1)),
            tag("runtimeclass"),
            space1,
        ),
        identifier,
    )
    .parse(input)
}

fn class_modifier<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    verify(identifier, |word: &str| {
        CLASS_MODIFIERS.contains(&word)
    })
    .parse(input)
}

fn parse_member_decl<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    preceded(
        space0,
        terminated(
            verify(
                separated_list1(space1, dotted_name),
                |tokens: &Vec<&str>| {
                    // At least one type token before the member name, and
                    // the member name itself must be a plain identifier.
                    tokens.len() >= 2 && !tokens[tokens.len() - 1].contains('.')
                },
            ),
            (
                space0,
                char('('),
                take_while(|ch| ch != ')'),
                char(')'),
                space0,
                char(';'),
            ),
        ),
    )
    .map(|tokens| tokens[tokens.len() - 1])
    .parse(input)
}

/// Parses a `[a-zA-Z_][a-zA-Z0-9_]*` identifier.
fn identifier<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize((
        satisfy(|ch: char| ch.is_ascii_alphabetic() || ch == '_'),
        take_while(|ch: char| ch.is_ascii_alphanumeric() || ch == '_'),
    ))
    .parse(input)
}

/// Parses a dotted identifier chain such as `Windows.Foundation.Uri`.
fn dotted_name<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize((
        identifier,
        many0_count(preceded(char('.'), identifier)),
        // Generic type arguments are out of scope but must not be split
        // into a bogus member name, so reject them here.
        verify(opt(char::<_, E>('<')), |angle| angle.is_none()),
    ))
    .parse(input)
}
