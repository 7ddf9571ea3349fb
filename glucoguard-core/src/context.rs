//! Error-path tracking context
//!
//! A [`Context`] is a node in a tree that mirrors the shape of the document
//! being processed. Each node knows its slash-delimited path; all nodes created
//! from the same root share one error collection, so an error appended deep in
//! a nested structure is visible at the root without being returned upward.
//!
//! ```text
//! root ""  ─┬─ "/0" ─┬─ "/0/carbRatio" ── "/0/carbRatio/1"  (error: start)
//!           │        └─ "/0/units"
//!           └─ "/1"
//!                          all share ──► Rc<RefCell<Vec<ErrorRecord>>>
//! ```
//!
//! The shared collection is an `Rc`, which makes `Context` `!Send`: a context
//! tree belongs to one thread. Independent batches get independent roots.

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::errors::ErrorRecord;

/// A node in the error-path tree
#[derive(Clone, Default)]
pub struct Context {
    path: String,
    errors: Rc<RefCell<Vec<ErrorRecord>>>,
}

impl Context {
    /// Create a root context with an empty path and a fresh error collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of this node, e.g. `/0/carbRatio`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create a child node one segment below this one
    ///
    /// The child shares this node's error collection.
    pub fn child(&self, reference: impl Display) -> Context {
        Context {
            path: format!("{}/{}", self.path, reference),
            errors: Rc::clone(&self.errors),
        }
    }

    /// Record `error` against `reference` beneath this node
    pub fn append_error(&self, reference: impl Display, error: ErrorRecord) {
        let pointer = format!("{}/{}", self.path, reference);
        self.errors.borrow_mut().push(error.with_pointer(pointer));
    }

    /// Record `error` if there is one
    pub fn append_optional_error(&self, reference: impl Display, error: Option<ErrorRecord>) {
        if let Some(error) = error {
            self.append_error(reference, error);
        }
    }

    /// Snapshot of every error recorded anywhere in this tree, in append order
    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.errors.borrow().clone()
    }

    /// Number of errors recorded anywhere in this tree
    pub fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Errors appended after `mark`, a previous [`error_count`](Self::error_count)
    pub fn errors_since(&self, mark: usize) -> Vec<ErrorRecord> {
        self.errors
            .borrow()
            .iter()
            .skip(mark)
            .cloned()
            .collect()
    }

    /// True when both contexts append into the same collection
    pub fn shares_errors_with(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.errors, &other.errors)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.path)
            .field("errors", &self.error_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{self, codes};
    use proptest::prelude::*;

    #[test]
    fn nested_pointer() {
        let root = Context::new();
        root.child("a").child("b").append_error("c", errors::value_empty());

        let recorded = root.errors();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].pointer(), Some("/a/b/c"));
    }

    #[test]
    fn children_share_collection() {
        let root = Context::new();
        let first = root.child(0);
        let second = root.child(1).child("units");

        first.append_error("time", errors::value_not_exists());
        second.append_error("bg", errors::value_empty());

        assert!(first.shares_errors_with(&second));
        assert_eq!(root.error_count(), 2);
        assert_eq!(second.error_count(), 2);
        assert_eq!(root.errors()[1].pointer(), Some("/1/units/bg"));
    }

    #[test]
    fn append_order_is_call_order() {
        let root = Context::new();
        let child = root.child("z");
        child.append_error(2, errors::value_empty());
        root.append_error("a", errors::value_exists());
        child.append_error(1, errors::value_not_empty());

        let recorded: Vec<_> = root.errors().into_iter().map(|e| e.code).collect();
        assert_eq!(
            recorded,
            vec![codes::VALUE_EMPTY, codes::VALUE_EXISTS, codes::VALUE_NOT_EMPTY]
        );
    }

    #[test]
    fn optional_error_ignores_none() {
        let root = Context::new();
        root.append_optional_error("a", None);
        assert!(!root.has_errors());

        root.append_optional_error("a", Some(errors::value_exists()));
        assert_eq!(root.error_count(), 1);
    }

    #[test]
    fn errors_since_mark() {
        let root = Context::new();
        root.append_error("a", errors::value_exists());
        let mark = root.error_count();
        root.child(3).append_error("b", errors::value_empty());

        let since = root.errors_since(mark);
        assert_eq!(since.len(), 1);
        assert_eq!(since[0].pointer(), Some("/3/b"));
    }

    #[test]
    fn separate_roots_are_isolated() {
        let first = Context::new();
        let second = Context::new();
        first.append_error("a", errors::value_exists());

        assert!(!first.shares_errors_with(&second));
        assert_eq!(second.error_count(), 0);
    }

    proptest! {
        #[test]
        fn path_is_segment_concatenation(segments in proptest::collection::vec("[a-zA-Z0-9]{1,8}", 0..6)) {
            let mut context = Context::new();
            for segment in &segments {
                context = context.child(segment);
            }
            let expected: String = segments.iter().map(|s| format!("/{}", s)).collect();
            prop_assert_eq!(context.path(), expected.as_str());
        }
    }
}
