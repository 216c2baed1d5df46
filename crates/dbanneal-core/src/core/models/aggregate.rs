use super::ids::AggregateId;
use super::site::Site;
use slotmap::SlotMap;

/// A group of sites and nested groups mirroring the grouping of the source design.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    sites: Vec<Site>,
    children: Vec<AggregateId>,
}

impl Aggregate {
    /// Sites owned directly by this aggregate, in insertion order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Child aggregates, in insertion order.
    pub fn children(&self) -> &[AggregateId] {
        &self.children
    }
}

/// Ownership tree of aggregates, stored as an arena.
///
/// Every aggregate except the root has exactly one parent; nodes are only
/// ever added below an existing node, so the structure cannot form a DAG or a
/// cycle. The whole tree is discarded after flattening, so there is no node
/// removal.
#[derive(Debug, Clone)]
pub struct SiteTree {
    nodes: SlotMap<AggregateId, Aggregate>,
    root: AggregateId,
}

impl Default for SiteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteTree {
    /// Creates a tree holding a single empty root aggregate.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Aggregate::default());
        Self { nodes, root }
    }

    /// The aggregate representing the whole design.
    pub fn root(&self) -> AggregateId {
        self.root
    }

    pub fn aggregate(&self, id: AggregateId) -> Option<&Aggregate> {
        self.nodes.get(id)
    }

    /// Number of aggregates in the tree, root included.
    pub fn aggregate_count(&self) -> usize {
        self.nodes.len()
    }

    /// Appends a new, empty aggregate as the last child of `parent`.
    ///
    /// # Return
    ///
    /// The ID of the new aggregate, or `None` if `parent` is not in the tree.
    pub fn add_aggregate(&mut self, parent: AggregateId) -> Option<AggregateId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let child = self.nodes.insert(Aggregate::default());
        self.nodes[parent].children.push(child);
        Some(child)
    }

    /// Appends `site` to the sites owned by `aggregate`.
    ///
    /// # Return
    ///
    /// `Some(())` on success, `None` if `aggregate` is not in the tree.
    pub fn add_site(&mut self, aggregate: AggregateId, site: Site) -> Option<()> {
        self.nodes.get_mut(aggregate)?.sites.push(site);
        Some(())
    }

    /// Recursively counts the sites contained in `aggregate`, fixed and free alike.
    ///
    /// Unknown IDs count as empty.
    pub fn size_of(&self, aggregate: AggregateId) -> usize {
        self.nodes.get(aggregate).map_or(0, |node| {
            node.sites.len()
                + node
                    .children
                    .iter()
                    .map(|&child| self.size_of(child))
                    .sum::<usize>()
        })
    }

    /// Total number of sites in the design.
    pub fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the whole design into a depth-first sequence of sites.
    pub fn sites(&self) -> SiteIter<'_> {
        SiteIter::new(self, self.root)
    }

    /// Flattens the subtree rooted at `aggregate`.
    pub fn sites_in(&self, aggregate: AggregateId) -> SiteIter<'_> {
        SiteIter::new(self, aggregate)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: AggregateId,
    next_site: usize,
    next_child: usize,
}

impl Frame {
    fn enter(node: AggregateId) -> Self {
        Self {
            node,
            next_site: 0,
            next_child: 0,
        }
    }
}

/// Lazy depth-first traversal over every site below an aggregate.
///
/// Within an aggregate, its own sites are yielded before descending into its
/// children; siblings are visited in insertion order. The order depends only
/// on the shape of the tree, so positions in this sequence can key the index
/// arrays built by the engine.
#[derive(Debug, Clone)]
pub struct SiteIter<'a> {
    tree: &'a SiteTree,
    stack: Vec<Frame>,
}

impl<'a> SiteIter<'a> {
    fn new(tree: &'a SiteTree, start: AggregateId) -> Self {
        let stack = if tree.nodes.contains_key(start) {
            vec![Frame::enter(start)]
        } else {
            Vec::new()
        };
        Self { tree, stack }
    }
}

impl<'a> Iterator for SiteIter<'a> {
    type Item = &'a Site;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let frame = self.stack.last_mut()?;
            let node = &tree.nodes[frame.node];

            if let Some(site) = node.sites.get(frame.next_site) {
                frame.next_site += 1;
                return Some(site);
            }

            match node.children.get(frame.next_child) {
                Some(&child) => {
                    frame.next_child += 1;
                    self.stack.push(Frame::enter(child));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl std::iter::FusedIterator for SiteIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    // root: [s0, s1]
    //   a: []
    //     c: [s2]
    //   b: [s3]
    //     d: []
    //     e: [s4, s5]
    fn create_nested_tree() -> SiteTree {
        let mut tree = SiteTree::new();
        let root = tree.root();
        tree.add_site(root, Site::free(0.0, 0.0)).unwrap();
        tree.add_site(root, Site::free(1.0, 0.0)).unwrap();

        let a = tree.add_aggregate(root).unwrap();
        let c = tree.add_aggregate(a).unwrap();
        tree.add_site(c, Site::free(2.0, 0.0)).unwrap();

        let b = tree.add_aggregate(root).unwrap();
        tree.add_site(b, Site::fixed(3.0, 0.0)).unwrap();
        let _d = tree.add_aggregate(b).unwrap();
        let e = tree.add_aggregate(b).unwrap();
        tree.add_site(e, Site::free(4.0, 0.0)).unwrap();
        tree.add_site(e, Site::free(5.0, 0.0)).unwrap();
        tree
    }

    fn xs(iter: SiteIter<'_>) -> Vec<f64> {
        iter.map(Site::x).collect()
    }

    #[test]
    fn flattening_visits_local_sites_before_children_in_insertion_order() {
        let tree = create_nested_tree();
        assert_eq!(xs(tree.sites()), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn flattening_is_repeatable_and_synchronous_iterators_agree() {
        let tree = create_nested_tree();
        let first = xs(tree.sites());
        for _ in 0..5 {
            assert_eq!(xs(tree.sites()), first);
        }
        for (a, b) in tree.sites().zip(tree.sites()) {
            assert_eq!(a, b);
        }
        assert_eq!(tree.sites().count(), tree.len());
    }

    #[test]
    fn iterator_can_be_driven_step_by_step() {
        let tree = create_nested_tree();
        let mut iter = tree.sites();
        assert_eq!(iter.next().map(Site::x), Some(0.0));
        assert_eq!(iter.next().map(Site::x), Some(1.0));
        assert_eq!(iter.next().map(Site::x), Some(2.0));
        assert_eq!(iter.by_ref().count(), 3);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn empty_tree_yields_empty_sequence() {
        let tree = SiteTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.sites().count(), 0);
    }

    #[test]
    fn tree_of_empty_aggregates_yields_empty_sequence() {
        let mut tree = SiteTree::new();
        let a = tree.add_aggregate(tree.root()).unwrap();
        tree.add_aggregate(a).unwrap();
        tree.add_aggregate(tree.root()).unwrap();
        assert_eq!(tree.aggregate_count(), 4);
        assert_eq!(tree.sites().count(), 0);
    }

    #[test]
    fn unknown_aggregate_yields_empty_sequence_and_zero_size() {
        let tree = create_nested_tree();
        let null = AggregateId::default();
        assert!(tree.aggregate(null).is_none());
        assert_eq!(tree.sites_in(null).count(), 0);
        assert_eq!(tree.size_of(null), 0);
    }

    #[test]
    fn size_counts_sites_recursively() {
        let tree = create_nested_tree();
        let root = tree.root();
        assert_eq!(tree.size_of(root), 6);

        let children = tree.aggregate(root).unwrap().children().to_vec();
        assert_eq!(tree.size_of(children[0]), 1);
        assert_eq!(tree.size_of(children[1]), 3);
    }

    #[test]
    fn subtree_flattening_covers_only_the_subtree() {
        let tree = create_nested_tree();
        let b = tree.aggregate(tree.root()).unwrap().children()[1];
        assert_eq!(xs(tree.sites_in(b)), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn adding_below_unknown_parent_fails() {
        let mut tree = SiteTree::new();
        let null = AggregateId::default();
        assert!(tree.add_aggregate(null).is_none());
        assert!(tree.add_site(null, Site::free(0.0, 0.0)).is_none());
        assert_eq!(tree.aggregate_count(), 1);
    }

    #[test]
    fn deep_nesting_does_not_lose_sites() {
        let mut tree = SiteTree::new();
        let mut parent = tree.root();
        for i in 0..200 {
            parent = tree.add_aggregate(parent).unwrap();
            tree.add_site(parent, Site::free(i as f64, 0.0)).unwrap();
        }
        let expected: Vec<f64> = (0..200).map(|i| i as f64).collect();
        assert_eq!(xs(tree.sites()), expected);
    }
}
