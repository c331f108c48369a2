//! Module: parse
//! Responsibility: filter and sort grammar -> uncompiled statements and
//! directives.
//! Does not own: schema lookup or type checks; those happen on build.

mod filter;
mod sort;

#[cfg(test)]
mod tests;

// re-exports
pub use filter::parse_filter;
pub use sort::parse_sort;
