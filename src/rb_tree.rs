//! RbTree: red-black tree engine backing the ordered set and map.
//!
//! Nodes live in a `slotmap` arena and link to each other through `NodeId`
//! handles, with `None` standing in for the black `nil` leaf. Parent links
//! let the iterators walk in order without recursion or an explicit stack.
//!
//! After every public mutation:
//! 1. the root is black (and `nil` leaves count as black),
//! 2. no red node has a red child,
//! 3. every root-to-`nil` path crosses the same number of black nodes,
//! 4. in-order traversal is strictly ascending under the comparator.
//!
//! `verify` checks all four (plus link consistency) and is what the tests
//! lean on.

use crate::compare::{Comparator, NaturalOrder};
use crate::error::InvariantViolation;
use crate::pair::Pair;
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use slotmap::SlotMap;

slotmap::new_key_type! {
    pub(crate) struct NodeId;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left,
    Right,
}

impl Dir {
    fn flip(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Debug)]
struct Node<K, V> {
    pair: Pair<K, V>,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    fn child(&self, dir: Dir) -> Option<NodeId> {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }
}

type Arena<K, V> = SlotMap<NodeId, Node<K, V>>;

/// Walk down from `id` as far as possible in direction `dir`.
fn extreme<K, V>(nodes: &Arena<K, V>, mut id: NodeId, dir: Dir) -> NodeId {
    while let Some(c) = nodes[id].child(dir) {
        id = c;
    }
    id
}

/// In-order neighbour of `id`: successor for `Dir::Right`, predecessor for
/// `Dir::Left`.
fn step<K, V>(nodes: &Arena<K, V>, id: NodeId, dir: Dir) -> Option<NodeId> {
    if let Some(c) = nodes[id].child(dir) {
        return Some(extreme(nodes, c, dir.flip()));
    }
    let mut cur = id;
    let mut parent = nodes[cur].parent;
    while let Some(p) = parent {
        if nodes[p].child(dir) != Some(cur) {
            return Some(p);
        }
        cur = p;
        parent = nodes[p].parent;
    }
    None
}

enum Search {
    Found(NodeId),
    /// Where a new node would hang: `None` for an empty tree.
    Vacant(Option<(NodeId, Dir)>),
}

#[derive(Clone)]
pub struct RbTree<K, V, C = NaturalOrder> {
    nodes: Arena<K, V>,
    root: Option<NodeId>,
    cmp: C,
    reentrancy: DebugReentrancy,
}

impl<K: Ord, V> RbTree<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RbTree<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            cmp,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// A fresh, empty tree ordered by a clone of this tree's comparator.
    pub fn empty_like(&self) -> Self
    where
        C: Clone,
    {
        Self::with_comparator(self.cmp.clone())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node; the comparator is kept.
    pub fn clear(&mut self) {
        let n = self.nodes.len();
        self.root = None;
        self.nodes.clear();
        log::trace!("rb_tree: cleared {} nodes", n);
    }

    /// Ascending iterator over `(&K, &V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.root.map(|r| extreme(&self.nodes, r, Dir::Left)),
            back: self.root.map(|r| extreme(&self.nodes, r, Dir::Right)),
            remaining: self.nodes.len(),
        }
    }

    /// Visit every entry in ascending key order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.root
            .map(|r| self.nodes[extreme(&self.nodes, r, Dir::Left)].pair.as_refs())
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.root
            .map(|r| self.nodes[extreme(&self.nodes, r, Dir::Right)].pair.as_refs())
    }

    pub fn pop_first(&mut self) -> Option<Pair<K, V>> {
        let id = extreme(&self.nodes, self.root?, Dir::Left);
        self.unlink(id)
    }

    pub fn pop_last(&mut self) -> Option<Pair<K, V>> {
        let id = extreme(&self.nodes, self.root?, Dir::Right);
        self.unlink(id)
    }

    fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.nodes[id].color)
    }

    fn set_child(&mut self, id: NodeId, dir: Dir, child: Option<NodeId>) {
        let n = &mut self.nodes[id];
        match dir {
            Dir::Left => n.left = child,
            Dir::Right => n.right = child,
        }
    }

    /// Which side of `parent` the (possibly `nil`) `child` hangs on.
    fn side_of(&self, parent: NodeId, child: Option<NodeId>) -> Dir {
        if self.nodes[parent].left == child {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let dir = self.side_of(p, Some(old));
                self.set_child(p, dir, new);
            }
        }
    }

    /// Put `v` where `u` hangs. `u`'s own links are left untouched.
    fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let up = self.nodes[u].parent;
        self.replace_child(up, u, v);
        if let Some(v) = v {
            self.nodes[v].parent = up;
        }
    }

    /// Rotate `x` down towards `dir`; its opposite child takes its place.
    fn rotate(&mut self, x: NodeId, dir: Dir) {
        let Some(y) = self.nodes[x].child(dir.flip()) else {
            return;
        };
        let inner = self.nodes[y].child(dir);
        self.set_child(x, dir.flip(), inner);
        if let Some(b) = inner {
            self.nodes[b].parent = Some(x);
        }
        let xp = self.nodes[x].parent;
        self.nodes[y].parent = xp;
        self.replace_child(xp, x, Some(y));
        self.set_child(y, dir, Some(x));
        self.nodes[x].parent = Some(y);
    }

    fn link_new(&mut self, at: Option<(NodeId, Dir)>, pair: Pair<K, V>) -> NodeId {
        let id = self.nodes.insert(Node {
            pair,
            color: Color::Red,
            parent: at.map(|(p, _)| p),
            left: None,
            right: None,
        });
        match at {
            None => self.root = Some(id),
            Some((p, dir)) => self.set_child(p, dir, Some(id)),
        }
        self.insert_fixup(id);
        id
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(p) = self.nodes[z].parent {
            if self.nodes[p].color == Color::Black {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(g) = self.nodes[p].parent else {
                break;
            };
            let side = self.side_of(g, Some(p));
            let uncle = self.nodes[g].child(side.flip());
            match uncle {
                Some(u) if self.nodes[u].color == Color::Red => {
                    self.nodes[p].color = Color::Black;
                    self.nodes[u].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    z = g;
                }
                _ => {
                    let mut p = p;
                    if self.nodes[p].child(side.flip()) == Some(z) {
                        // Inner grandchild: straighten the zig-zag first.
                        z = p;
                        self.rotate(z, side);
                        p = match self.nodes[z].parent {
                            Some(np) => np,
                            None => break,
                        };
                    }
                    self.nodes[p].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    self.rotate(g, side.flip());
                }
            }
        }
        if let Some(r) = self.root {
            self.nodes[r].color = Color::Black;
        }
    }

    /// Detach node `z` and return its pair. A node with two children is
    /// replaced by its in-order successor, which leaves its own position.
    fn unlink(&mut self, z: NodeId) -> Option<Pair<K, V>> {
        let (zl, zr, z_color, z_parent) = {
            let n = self.nodes.get(z)?;
            (n.left, n.right, n.color, n.parent)
        };
        let (x, x_parent, removed_color) = match (zl, zr) {
            (None, _) => {
                self.transplant(z, zr);
                (zr, z_parent, z_color)
            }
            (Some(_), None) => {
                self.transplant(z, zl);
                (zl, z_parent, z_color)
            }
            (Some(l), Some(r)) => {
                let y = extreme(&self.nodes, r, Dir::Left);
                let y_color = self.nodes[y].color;
                let x = self.nodes[y].right;
                let x_parent = if self.nodes[y].parent == Some(z) {
                    Some(y)
                } else {
                    let yp = self.nodes[y].parent;
                    self.transplant(y, x);
                    self.nodes[y].right = Some(r);
                    self.nodes[r].parent = Some(y);
                    yp
                };
                self.transplant(z, Some(y));
                self.nodes[y].left = Some(l);
                self.nodes[l].parent = Some(y);
                self.nodes[y].color = z_color;
                (x, x_parent, y_color)
            }
        };
        let node = self.nodes.remove(z)?;
        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
        Some(node.pair)
    }

    /// Restore black height after a black node left the path through `x`.
    /// `x` may be `nil`, hence the separately tracked parent.
    fn remove_fixup(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        while x != self.root && self.color(x) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = self.side_of(p, x);
            // The deficient side has black height >= 1 on its sibling, so
            // the sibling is a real node.
            let Some(mut s) = self.nodes[p].child(side.flip()) else {
                break;
            };
            if self.nodes[s].color == Color::Red {
                self.nodes[s].color = Color::Black;
                self.nodes[p].color = Color::Red;
                self.rotate(p, side);
                s = match self.nodes[p].child(side.flip()) {
                    Some(s) => s,
                    None => break,
                };
            }
            let near = self.nodes[s].child(side);
            let far = self.nodes[s].child(side.flip());
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                self.nodes[s].color = Color::Red;
                x = Some(p);
                parent = self.nodes[p].parent;
                continue;
            }
            if self.color(far) == Color::Black {
                if let Some(n) = near {
                    self.nodes[n].color = Color::Black;
                }
                self.nodes[s].color = Color::Red;
                self.rotate(s, side.flip());
                s = match self.nodes[p].child(side.flip()) {
                    Some(s) => s,
                    None => break,
                };
            }
            self.nodes[s].color = self.nodes[p].color;
            self.nodes[p].color = Color::Black;
            if let Some(f) = self.nodes[s].child(side.flip()) {
                self.nodes[f].color = Color::Black;
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }
        if let Some(x) = x {
            self.nodes[x].color = Color::Black;
        }
    }
}

impl<K, V, C> RbTree<K, V, C> {
    fn search<Q>(&self, q: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut cur = self.root;
        let mut at = None;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            match self.cmp.compare(q, node.pair.key().borrow()) {
                Ordering::Less => {
                    at = Some((id, Dir::Left));
                    cur = node.left;
                }
                Ordering::Greater => {
                    at = Some((id, Dir::Right));
                    cur = node.right;
                }
                Ordering::Equal => return Search::Found(id),
            }
        }
        Search::Vacant(at)
    }

    fn find<Q>(&self, q: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let _g = self.reentrancy.enter();
        match self.search(q) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(q).map(|id| self.nodes[id].pair.value())
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(q).map(|id| self.nodes[id].pair.as_refs())
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let id = self.find(q)?;
        self.nodes.get_mut(id).map(|n| n.pair.value_mut())
    }

    /// Remove the entry for `q`. Absent keys (and empty trees) yield `None`.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let id = self.find(q)?;
        self.unlink(id)
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Insert when absent. Returns `false`, dropping the offered key and
    /// value, when an equal key is already stored.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let found = {
            let _g = self.reentrancy.enter();
            self.search(&key)
        };
        match found {
            Search::Found(_) => false,
            Search::Vacant(at) => {
                self.link_new(at, Pair::new(key, value));
                true
            }
        }
    }

    /// Insert or replace. On an equal key the new pair takes the old one's
    /// place in the same node and the old pair is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<Pair<K, V>> {
        let found = {
            let _g = self.reentrancy.enter();
            self.search(&key)
        };
        match found {
            Search::Found(id) => Some(core::mem::replace(
                &mut self.nodes[id].pair,
                Pair::new(key, value),
            )),
            Search::Vacant(at) => {
                self.link_new(at, Pair::new(key, value));
                None
            }
        }
    }

    /// Fallible [`insert`](Self::insert). Reserves arena space for the new
    /// node first; on `Err` the tree is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> crate::error::Result<bool> {
        let found = {
            let _g = self.reentrancy.enter();
            self.search(&key)
        };
        match found {
            Search::Found(_) => Ok(false),
            Search::Vacant(at) => {
                self.nodes.try_reserve(1)?;
                self.link_new(at, Pair::new(key, value));
                Ok(true)
            }
        }
    }

    /// Fallible [`put`](Self::put). Replacing an existing pair never
    /// allocates and always succeeds.
    pub fn try_put(&mut self, key: K, value: V) -> crate::error::Result<Option<Pair<K, V>>> {
        let found = {
            let _g = self.reentrancy.enter();
            self.search(&key)
        };
        match found {
            Search::Found(id) => Ok(Some(core::mem::replace(
                &mut self.nodes[id].pair,
                Pair::new(key, value),
            ))),
            Search::Vacant(at) => {
                self.nodes.try_reserve(1)?;
                self.link_new(at, Pair::new(key, value));
                Ok(None)
            }
        }
    }

    /// Check every structural invariant. Returns the black height (black
    /// nodes on any root-to-`nil` path).
    pub fn verify(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            if self.nodes.is_empty() {
                return Ok(0);
            }
            return Err(InvariantViolation::LengthMismatch {
                reachable: 0,
                len: self.nodes.len(),
            });
        };
        let r = self
            .nodes
            .get(root)
            .ok_or(InvariantViolation::BrokenParentLink)?;
        if r.parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink);
        }
        if r.color == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }
        let mut reachable = 0;
        let black_height = self.verify_subtree(root, &mut reachable)?;
        if reachable != self.nodes.len() {
            return Err(InvariantViolation::LengthMismatch {
                reachable,
                len: self.nodes.len(),
            });
        }
        let mut prev: Option<&K> = None;
        for (k, _) in self.iter() {
            if let Some(p) = prev {
                if self.cmp.compare(p, k) != Ordering::Less {
                    return Err(InvariantViolation::OutOfOrder);
                }
            }
            prev = Some(k);
        }
        Ok(black_height)
    }

    fn verify_subtree(
        &self,
        id: NodeId,
        reachable: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        *reachable += 1;
        let node = &self.nodes[id];
        let mut heights = [0usize; 2];
        for (slot, dir) in heights.iter_mut().zip([Dir::Left, Dir::Right]) {
            if let Some(c) = node.child(dir) {
                let child = self
                    .nodes
                    .get(c)
                    .ok_or(InvariantViolation::BrokenParentLink)?;
                if child.parent != Some(id) {
                    return Err(InvariantViolation::BrokenParentLink);
                }
                if node.color == Color::Red && child.color == Color::Red {
                    return Err(InvariantViolation::RedRedEdge);
                }
                *slot = self.verify_subtree(c, reachable)?;
            }
        }
        if heights[0] != heights[1] {
            return Err(InvariantViolation::BlackHeightMismatch {
                left: heights[0],
                right: heights[1],
            });
        }
        Ok(heights[0] + usize::from(node.color == Color::Black))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RbTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order cursor over a tree. Walks parent links from the current node to
/// its successor; a fresh `iter()` is needed to start over.
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = step(self.nodes, id, Dir::Right);
        Some(self.nodes[id].pair.as_refs())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = step(self.nodes, id, Dir::Left);
        Some(self.nodes[id].pair.as_refs())
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Owning ascending iterator over the tree's pairs.
pub struct IntoIter<K, V> {
    nodes: Arena<K, V>,
    order: std::vec::IntoIter<NodeId>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = Pair<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.order.next()?;
        self.nodes.remove(id).map(|n| n.pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.order.next_back()?;
        self.nodes.remove(id).map(|n| n.pair)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C> IntoIterator for RbTree<K, V, C> {
    type Item = Pair<K, V>;
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut cur = self.root.map(|r| extreme(&self.nodes, r, Dir::Left));
        while let Some(id) = cur {
            order.push(id);
            cur = step(&self.nodes, id, Dir::Right);
        }
        IntoIter {
            nodes: self.nodes,
            order: order.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
