//! Local cart overlay.
//!
//! The cart is fetched once; quantity changes and removals are layered on
//! top of that snapshot in memory. The overlay has no write path: nothing
//! here is ever sent back to the remote API or stored.

use crate::cart::{Cart, CartEdit};

/// A fetched cart snapshot with local edits applied on top.
#[derive(Debug, Clone, PartialEq)]
pub struct CartOverlay {
    snapshot: Cart,
    current: Cart,
    edits: Vec<CartEdit>,
}

impl CartOverlay {
    /// Start an overlay over a freshly fetched cart.
    pub fn new(snapshot: Cart) -> Self {
        Self {
            current: snapshot.clone(),
            snapshot,
            edits: Vec::new(),
        }
    }

    /// Apply an edit. Returns whether the cart changed.
    pub fn apply(&mut self, edit: CartEdit) -> bool {
        let next = edit.apply(&self.current);
        let changed = next != self.current;
        self.current = next;
        self.edits.push(edit);
        changed
    }

    /// The cart with every edit applied.
    pub fn current(&self) -> &Cart {
        &self.current
    }

    /// The cart as fetched.
    pub fn snapshot(&self) -> &Cart {
        &self.snapshot
    }

    /// Edits applied so far, oldest first.
    pub fn edits(&self) -> &[CartEdit] {
        &self.edits
    }

    /// Whether the local view diverges from the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.current.items != self.snapshot.items
    }

    /// Throw away local edits.
    pub fn reset(&mut self) {
        self.current = self.snapshot.clone();
        self.edits.clear();
    }
}
