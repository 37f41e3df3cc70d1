//! Disjoint-set structure tracking blossom bases
//!
//! Every vertex belongs to exactly one set; a set is a (possibly trivial)
//! contracted blossom and carries a designated *base* vertex. Unlike a plain
//! union-find, the representative used for linking (the tree root chosen by
//! rank) is decoupled from the base reported to callers: contraction always
//! names the base of the merged set explicitly, while union-by-rank keeps the
//! trees shallow.
//!
//! `find` uses iterative path-halving, so the structure never recurses.

/// Union-find over dense vertex indices `0..n` with designated set bases
#[derive(Debug, Clone)]
pub struct BaseUnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Base vertex of the set rooted at each index (meaningful for roots only)
    base: Vec<usize>,
}

impl BaseUnionFind {
    /// Creates `n` singleton sets, each vertex its own base
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            base: (0..n).collect(),
        }
    }

    /// Restores every vertex to a singleton set that is its own base
    pub fn reset(&mut self) {
        for (i, (parent, base)) in self.parent.iter_mut().zip(self.base.iter_mut()).enumerate() {
            *parent = i;
            *base = i;
        }
        self.rank.fill(0);
    }

    /// Base of the blossom containing `x`
    #[inline]
    pub fn find(&mut self, x: usize) -> usize {
        let root = self.root(x);
        self.base[root]
    }

    /// Whether `a` and `b` lie in the same blossom
    #[inline]
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// Merges the set containing `member` into the set containing `into`.
    ///
    /// The merged set keeps the base of `into`'s set regardless of which tree
    /// root survives the link.
    pub fn contract(&mut self, member: usize, into: usize) {
        let rm = self.root(member);
        let ri = self.root(into);
        if rm == ri {
            return;
        }

        let base = self.base[ri];
        let root = match self.rank[rm].cmp(&self.rank[ri]) {
            std::cmp::Ordering::Less => {
                self.parent[rm] = ri;
                ri
            }
            std::cmp::Ordering::Greater => {
                self.parent[ri] = rm;
                rm
            }
            std::cmp::Ordering::Equal => {
                self.parent[rm] = ri;
                self.rank[ri] += 1;
                ri
            }
        };
        self.base[root] = base;
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn root(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }
}
