use crate::{
    error::FormatError,
    sort::{SortDirection, SortDirective},
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<path>[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)(?:\s+(?P<direction>\w+))?\s*$")
        .expect("sort directive pattern compiles")
});

/// Parse `<path> [direction] (, <path> [direction])*`.
/// A missing direction means ascending.
pub fn parse_sort(input: &str) -> Result<Vec<SortDirective>, FormatError> {
    let invalid = || FormatError::InvalidSort {
        input: input.to_string(),
    };

    if input.trim().is_empty() {
        return Err(invalid());
    }

    let directives = input
        .split(',')
        .map(|part| {
            let caps = DIRECTIVE.captures(part).ok_or_else(invalid)?;
            let path = caps.name("path").ok_or_else(invalid)?.as_str();
            let direction = match caps.name("direction") {
                Some(token) => token.as_str().parse::<SortDirection>()?,
                None => SortDirection::default(),
            };

            Ok(SortDirective::new(path, direction))
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    trace!(directives = directives.len(), "parsed sort string");

    Ok(directives)
}
