//! A persistent cons list, newest entry first.
//!
//! Recorders and accumulators hand their state from one closure to the next,
//! so entries are kept in a list where adding is an O(1) prepend that shares
//! every older entry with the previous closure's state. The list is reversed
//! into call order once, when it is read back.
//!
//! Dropping a trail unlinks its nodes in a loop, stopping at the first node
//! another trail still holds, so arbitrarily long trails drop in constant
//! stack space.

use std::rc::Rc;

struct Node<T> {
    entry: T,
    next: Option<Rc<Node<T>>>,
}

pub(crate) struct Trail<T> {
    head: Option<Rc<Node<T>>>,
    length: usize,
}

impl<T> Trail<T> {
    pub(crate) fn cons(&self, entry: T) -> Self {
        Self {
            head: Some(Rc::new(Node {
                entry,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    fn iter(&self) -> TrailIterator<'_, T> {
        TrailIterator {
            current: self.head.as_ref(),
        }
    }
}

impl<T: Clone> Trail<T> {
    /// The entries, oldest first.
    pub(crate) fn to_call_order(&self) -> Vec<T> {
        let mut entries: Vec<T> = self.iter().cloned().collect();
        entries.reverse();
        entries
    }
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }
}

impl<T> Clone for Trail<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

impl<T> Drop for Trail<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match Rc::try_unwrap(node) {
                Ok(mut node) => current = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

struct TrailIterator<'a, T> {
    current: Option<&'a Rc<Node<T>>>,
}

impl<'a, T> Iterator for TrailIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            &node.entry
        })
    }
}
