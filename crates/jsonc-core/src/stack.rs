//! Identity stack for cycle detection during tree walks.
//!
//! A walker entering an array or object calls [`VisitGuard::enter`] with the
//! container's identity. The guard derefs to the walker, so the walk continues
//! through it, and pops the identity when dropped, also when the walk
//! bails out early with `?`.

use crate::error::{JsonError, Result};
use std::ops::{Deref, DerefMut};

/// Identities of the containers currently being visited, outermost first.
#[derive(Debug)]
pub(crate) struct VisitStack {
    ids: Vec<usize>,
    max_depth: usize,
}

impl VisitStack {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            ids: Vec::new(),
            max_depth,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.ids.len()
    }

    fn push(&mut self, id: usize) -> Result<()> {
        if self.ids.contains(&id) {
            return Err(JsonError::CyclicReference {
                depth: self.ids.len(),
            });
        }
        if self.ids.len() >= self.max_depth {
            return Err(JsonError::DepthLimit {
                limit: self.max_depth,
            });
        }
        self.ids.push(id);
        Ok(())
    }

    fn pop(&mut self) {
        self.ids.pop();
    }
}

/// A walker that owns a [`VisitStack`].
pub(crate) trait Visitor {
    fn visit_stack(&mut self) -> &mut VisitStack;
}

/// Keeps one identity on the walker's stack for as long as it lives.
pub(crate) struct VisitGuard<'a, V: Visitor> {
    visitor: &'a mut V,
}

impl<'a, V: Visitor> VisitGuard<'a, V> {
    /// Push `id`, failing if it is already being visited or the stack is full.
    pub(crate) fn enter(visitor: &'a mut V, id: usize) -> Result<Self> {
        visitor.visit_stack().push(id)?;
        Ok(Self { visitor })
    }
}

impl<V: Visitor> Deref for VisitGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.visitor
    }
}

impl<V: Visitor> DerefMut for VisitGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.visitor
    }
}

impl<V: Visitor> Drop for VisitGuard<'_, V> {
    fn drop(&mut self) {
        self.visitor.visit_stack().pop();
    }
}
