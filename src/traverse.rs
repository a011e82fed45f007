use genawaiter::rc::gen;
use genawaiter::yield_;

use crate::node::Node;

// depth first, pre-order. Within a child group children come in encounter
// order; the order of the groups is that of the map.
pub(crate) fn descendants(node: &Node) -> impl Iterator<Item = &Node> + '_ {
    gen!({
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            yield_!(current);
            for group in current.children().values() {
                stack.extend(group.iter().rev());
            }
        }
    })
    .into_iter()
}

impl Node {
    /// Iterate over this node and all elements below it.
    ///
    /// Children with the same name are visited in encounter order. The order
    /// between differently named children is unspecified, just as it is in
    /// [`Node::children`].
    ///
    /// ```rust
    /// let root = xtree::parse_str("<a><b><c/></b><b/></a>")?;
    /// let names: Vec<_> = root.descendants().map(|n| n.name()).collect();
    /// assert_eq!(names, ["a", "b", "c", "b"]);
    /// # Ok::<(), xtree::Error>(())
    /// ```
    pub fn descendants(&self) -> impl Iterator<Item = &Node> + '_ {
        descendants(self)
    }

    /// Iterate over this node and all elements below it with the given tag
    /// name, compared case-insensitively.
    pub fn find_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Node> + 'a {
        let name = name.to_lowercase();
        descendants(self).filter(move |n| n.name().to_lowercase() == name)
    }
}
