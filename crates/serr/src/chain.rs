//! Generic inspection of `source()` chains.
//!
//! These walk any chain exposed through [`std::error::Error::source`], not
//! just chains of [`crate::StructuredError`]. Chains are assumed finite: a
//! cause is fixed at construction, so a structured error cannot wrap itself.

use std::error::Error;
use std::iter::FusedIterator;

/// Iterator over an error and every cause below it, outermost first.
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// Whether `target` is `err` itself or appears anywhere in its chain.
///
/// Membership is identity: the comparison is by address, so a distinct
/// error that merely renders the same text does not match.
pub fn contains(err: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    chain(err).any(|layer| std::ptr::addr_eq(layer, target))
}

/// First member of the chain that is a `T`, walking outermost-in, so the
/// nearest match wins. Returns `None` when no layer has that type.
pub fn first_of<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    chain(err).find_map(|layer| layer.downcast_ref::<T>())
}

pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}
