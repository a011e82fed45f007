use ahash::HashMap;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A map of lower-cased attribute name to value.
pub type Attributes = HashMap<String, String>;
/// Child elements grouped by lower-cased tag name.
pub type Children = HashMap<String, Vec<Node>>;

/// An XML element together with everything found directly inside it.
///
/// Child elements are grouped by their lower-cased tag name. Within a group
/// children keep the order in which they were encountered; there is no order
/// between groups. Text runs and comments are kept in encounter order,
/// separately from the elements.
///
/// Equality is structural: two nodes are equal when their name, attributes,
/// children, texts and comments are equal.
///
/// ```rust
/// use xtree::Node;
///
/// let mut item = Node::new("Item");
/// item.add_attributes([("ID", "7")]);
/// item.add_text("  seven ");
///
/// let mut list = Node::new("list");
/// list.add_child(item);
///
/// let item = list.child("item").unwrap();
/// assert_eq!(item.name(), "Item");
/// assert_eq!(item.attribute("id"), Some("7"));
/// assert_eq!(item.texts(), ["seven"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    name: String,
    attributes: Attributes,
    children: Children,
    texts: Vec<String>,
    comments: Vec<String>,
}

impl Node {
    /// Create an empty node with the given tag name.
    ///
    /// The name is kept as given; it is not case folded.
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            attributes: Attributes::default(),
            children: Children::default(),
            texts: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// The tag name, as it was written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes. Keys are lower-cased.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up an attribute value. The name is matched case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// All child groups, keyed by lower-cased tag name.
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// The children with the given tag name, in encounter order.
    ///
    /// The name is matched case-insensitively. Returns an empty slice if
    /// there are no such children.
    pub fn children_named(&self, name: &str) -> &[Node] {
        self.children
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children_named(name).first()
    }

    /// Trimmed text runs found directly in this element.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// The first text run, if any.
    pub fn text(&self) -> Option<&str> {
        self.texts.first().map(String::as_str)
    }

    /// Comment bodies found directly in this element, untouched.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// True if the node has no attributes, children, texts or comments.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.children.is_empty()
            && self.texts.is_empty()
            && self.comments.is_empty()
    }

    /// Append a child element to the group for its lower-cased name.
    pub fn add_child(&mut self, child: Node) {
        self.children
            .entry(child.name.to_lowercase())
            .or_default()
            .push(child);
    }

    /// Merge attributes into this node.
    ///
    /// Names are lower-cased. If a name is already present, whether from an
    /// earlier call or earlier in `attributes`, the existing value is kept.
    ///
    /// ```rust
    /// use xtree::Node;
    ///
    /// let mut node = Node::new("a");
    /// node.add_attributes([("A", "1")]);
    /// node.add_attributes([("a", "2")]);
    /// assert_eq!(node.attribute("a"), Some("1"));
    /// ```
    pub fn add_attributes<I, K, V>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in attributes {
            self.attributes
                .entry(name.as_ref().to_lowercase())
                .or_insert_with(|| value.into());
        }
    }

    /// Add a text run. Surrounding whitespace is trimmed; a run that is
    /// empty after trimming is dropped.
    pub fn add_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.texts.push(text.to_string());
    }

    /// Add a comment body as is.
    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }
}

// Map entries are hashed in key order so the hash agrees with equality no
// matter how the maps happen to iterate.
impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        let mut attributes: Vec<_> = self.attributes.iter().collect();
        attributes.sort_unstable();
        attributes.hash(state);
        let mut children: Vec<_> = self.children.iter().collect();
        children.sort_unstable_by(|a, b| a.0.cmp(b.0));
        children.hash(state);
        self.texts.hash(state);
        self.comments.hash(state);
    }
}

// iterative, so deeply nested trees cannot overflow the stack
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Node> = Vec::new();
        for (_, group) in self.children.drain() {
            stack.extend(group);
        }
        while let Some(mut node) = stack.pop() {
            for (_, group) in node.children.drain() {
                stack.extend(group);
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut children: Vec<_> = self.children.keys().collect();
        children.sort_unstable();
        let mut attributes: Vec<_> = self.attributes.iter().collect();
        attributes.sort_unstable();
        write!(
            f,
            "name: {} texts: {:?} children: {:?} attributes: {{",
            self.name, self.texts, children
        )?;
        for (i, (name, value)) in attributes.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", name, value)?;
        }
        write!(f, "}}")
    }
}
