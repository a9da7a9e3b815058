//! Red-black balancing for the tree core.
//!
//! Rules maintained after every insertion and removal:
//!
//! 1. the root is black,
//! 2. a red node has no red child,
//! 3. every path from a node down to an absent child passes the same number of black nodes.

use crate::node::{Handle, Side, Tree};

/// Balance metadata for a single node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl<K, V> Tree<K, V> {
    /// Absent children count as black.
    fn is_red(&self, h: Option<Handle>) -> bool {
        h.map_or(false, |h| self.node(h).color == Color::Red)
    }

    fn paint(&mut self, h: Option<Handle>, color: Color) {
        if let Some(h) = h { self.node_mut(h).color = color; }
    }

    fn color(&self, h: Handle) -> Color { self.node(h).color }

    /// Rotates the subtree at `x` so that `x` moves down towards `side` and its child on the
    /// opposite side takes its place.
    fn rotate(&mut self, x: Handle, side: Side) {
        let y = self.child(x, side.opposite()).expect("rotation needs a child to lift");
        let inner = self.child(y, side);

        self.set_child(x, side.opposite(), inner);
        self.set_parent(inner, Some(x));

        let parent = self.parent(x);
        self.replace_child(parent, x, Some(y));
        self.set_parent(Some(y), parent);

        self.set_child(y, side, Some(x));
        self.set_parent(Some(x), Some(y));
        log::trace!("rotated {:?} {:?} under {:?}", x, side, y);
    }

    /// Restores the balance rules after `z` was linked in as a red leaf.
    pub(crate) fn rebalance_insert(&mut self, mut z: Handle) {
        while let Some(p) = self.parent(z).filter(|&p| self.is_red(Some(p))) {
            let g = self.parent(p).expect("a red node is never the root");
            let side = self.side_of(g, Some(p));
            let uncle = self.child(g, side.opposite());

            if self.is_red(uncle) {
                self.paint(Some(p), Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(Some(g), Color::Red);
                z = g;
                continue;
            }

            if self.child(p, side.opposite()) == Some(z) {
                z = p;
                self.rotate(z, side);
            }

            let p = self.parent(z).expect("rotated node keeps a parent");
            let g = self.parent(p).expect("rotated node keeps a grandparent");
            self.paint(Some(p), Color::Black);
            self.paint(Some(g), Color::Red);
            self.rotate(g, side.opposite());
        }

        let root = self.root;
        self.paint(root, Color::Black);
    }

    /// Restores the balance rules after a black node was unlinked.
    ///
    /// `x` is the node that took the removed node's place (possibly absent) and `parent` is its
    /// parent; `x` carries an extra black until the loop pushes it up or absorbs it.
    pub(crate) fn rebalance_remove(&mut self, mut x: Option<Handle>,
                                   mut parent: Option<Handle>) {
        while x != self.root && !self.is_red(x) {
            let p = match parent {
                Some(p) => p,
                None => break,
            };
            let side = self.side_of(p, x);
            let far = side.opposite();
            let mut w = self.child(p, far).expect("a doubly black node has a sibling");

            if self.is_red(Some(w)) {
                self.paint(Some(w), Color::Black);
                self.paint(Some(p), Color::Red);
                self.rotate(p, side);
                w = self.child(p, far).expect("a doubly black node has a sibling");
            }

            if !self.is_red(self.child(w, Side::Left)) && !self.is_red(self.child(w, Side::Right)) {
                self.paint(Some(w), Color::Red);
                x = Some(p);
                parent = self.parent(p);
                continue;
            }

            if !self.is_red(self.child(w, far)) {
                let near = self.child(w, side);
                self.paint(near, Color::Black);
                self.paint(Some(w), Color::Red);
                self.rotate(w, far);
                w = self.child(p, far).expect("a doubly black node has a sibling");
            }

            let color = self.color(p);
            self.paint(Some(w), color);
            self.paint(Some(p), Color::Black);
            let far_child = self.child(w, far);
            self.paint(far_child, Color::Black);
            self.rotate(p, side);
            x = self.root;
            break;
        }

        self.paint(x, Color::Black);
    }
}
