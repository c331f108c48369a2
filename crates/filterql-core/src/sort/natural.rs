use std::cmp::Ordering;

///
/// Human ordering for text: digit runs compare by numeric value, other
/// runs compare case-insensitively, run by run from the left.
///
/// `"C1" < "C5" < "C10"`. Inputs that tie on every run fall back to a
/// plain byte comparison, so the order is total.
///
#[must_use]
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut left_runs = Runs::new(left);
    let mut right_runs = Runs::new(right);

    loop {
        match (left_runs.next(), right_runs.next()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                let ordering = a.cmp_run(&b);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }

    left.cmp(right)
}

///
/// Run
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl Run<'_> {
    fn cmp_run(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Digits(a), Self::Digits(b)) => cmp_digits(a, b),
            (Self::Text(a), Self::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            (Self::Digits(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Digits(_)) => Ordering::Greater,
        }
    }
}

// arbitrary length: no integer parse, so no overflow
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');

    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

///
/// Runs
///
/// Splits text into maximal digit and non-digit runs.
///

struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    const fn new(input: &'a str) -> Self {
        Self { rest: input }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();

        let end = self
            .rest
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);

        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;

        Some(if digits {
            Run::Digits(run)
        } else {
            Run::Text(run)
        })
    }
}
