use crate::{
    predicate::{Expr, eval_root},
    traits::FieldValues,
};
use std::{borrow::Borrow, fmt, marker::PhantomData};

///
/// Filter
///
/// Compiled, immutable predicate over `E`.
/// Holds no reference to the builder that produced it; cloning is cheap
/// enough to hand one to every worker.
///

pub struct Filter<E> {
    expr: Expr,
    _marker: PhantomData<fn(&E) -> bool>,
}

impl<E> Filter<E> {
    pub(crate) const fn new(expr: Expr) -> Self {
        Self {
            expr,
            _marker: PhantomData,
        }
    }

    /// Compiled expression tree.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl<E: FieldValues> Filter<E> {
    #[must_use]
    pub fn matches(&self, entity: &E) -> bool {
        eval_root(&self.expr, entity)
    }

    /// Lazily keep the items that match.
    pub fn apply<I>(&self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        items
            .into_iter()
            .filter(move |item| self.matches(item.borrow()))
    }

    #[must_use]
    pub fn filter_vec(&self, items: Vec<E>) -> Vec<E> {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .collect()
    }
}

impl<E> Clone for Filter<E> {
    fn clone(&self) -> Self {
        Self::new(self.expr.clone())
    }
}

impl<E> fmt::Debug for Filter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("expr", &self.expr).finish()
    }
}

impl<E> fmt::Display for Filter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
