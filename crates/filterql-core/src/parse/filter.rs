use crate::{
    coerce::{is_bracketed, is_quoted},
    config::QueryConfig,
    error::FormatError,
    statement::{Connector, FilterStatement},
};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

// Longer operator tokens come first; the regex engine is leftmost-first.
static STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        (?P<path>[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)
        \s+
        (?P<op>lengte|lenlte|leneq|lenne|lengt|lenlt|ctic|gte|lte|eq|ne|lt|gt|ct|in)
        \s+
        (?P<literal>'[^']*'|\[(?:'[^']*'|[^\]'])*\]|-?\d+(?:\.\d+)?\b|true\b|false\b)
        (?:\s+(?P<connector>[A-Za-z]+))?
        ",
    )
    .expect("filter statement pattern compiles")
});

///
/// Split a filter string into statements.
///
/// Every byte of the input must belong to a statement or be whitespace
/// between statements. Each statement after the first carries the
/// connector that preceded it.
///
pub fn parse_filter(
    input: &str,
    config: &QueryConfig,
) -> Result<Vec<FilterStatement>, FormatError> {
    let mut statements = Vec::new();
    let mut pending: Option<(Connector, String)> = None;
    let mut cursor = 0;

    for caps in STATEMENT.captures_iter(input) {
        let whole = caps.get(0).map_or(cursor..cursor, |m| m.range());
        check_gap(input, cursor, whole.start)?;
        cursor = whole.end;

        let statement = statement(&caps, pending.take().map(|(connector, _)| connector))?;
        statements.push(statement);

        if let Some(token) = caps.name("connector") {
            let connector = token.as_str().parse::<Connector>()?;
            pending = Some((connector, token.as_str().to_string()));
        }
    }

    if statements.is_empty() {
        return Err(FormatError::NoStatements);
    }
    check_gap(input, cursor, input.len())?;

    if let Some((_, token)) = pending {
        return Err(FormatError::DanglingConnector { token });
    }
    if statements.len() > config.max_statements {
        return Err(FormatError::TooManyStatements {
            count: statements.len(),
            max: config.max_statements,
        });
    }

    trace!(statements = statements.len(), "parsed filter string");

    Ok(statements)
}

fn statement(
    caps: &Captures<'_>,
    connector: Option<Connector>,
) -> Result<FilterStatement, FormatError> {
    let path = group(caps, "path");
    let literal = group(caps, "literal");

    if is_empty_literal(literal) {
        return Err(FormatError::EmptyLiteral {
            path: path.to_string(),
        });
    }

    Ok(FilterStatement {
        path: path.to_string(),
        literal: literal.to_string(),
        op: group(caps, "op").parse()?,
        connector,
    })
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn is_empty_literal(literal: &str) -> bool {
    (is_quoted(literal) || is_bracketed(literal))
        && literal[1..literal.len() - 1].trim().is_empty()
}

fn check_gap(input: &str, from: usize, to: usize) -> Result<(), FormatError> {
    let gap = &input[from..to];
    let trimmed = gap.trim_start();

    if trimmed.is_empty() {
        return Ok(());
    }

    Err(FormatError::UnexpectedText {
        text: trimmed.trim_end().to_string(),
        offset: from + (gap.len() - trimmed.len()),
    })
}
