//! Proptest support
//!
//! Generates arbitrary XML documents together with the tree that parsing
//! them must produce. Enable it with the `proptest` feature:
//!
//! ```toml
//! [dependencies]
//! xtree = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use proptest::prelude::*;

use crate::node::Node;

// mixed case on purpose, so that folding is exercised
const ELEMENT_NAMES: &[&str] = &["a", "B", "item", "Item", "ITEM"];
const ATTRIBUTE_NAMES: &[&str] = &["q", "Q", "r", "Ref", "REF"];
const TEXT: &str = "[ \n\ta-zA-Z0-9]{0,12}";
const VALUE: &str = "[ a-zA-Z0-9]{0,8}";
const COMMENT: &str = "[ a-z]{0,10}";

/// Content of an arbitrary element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArbContent {
    /// Character data, without markup characters
    Text(String),
    /// A comment body
    Comment(String),
    /// A child element
    Element(ArbElement),
}

/// An arbitrary element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbElement {
    /// Tag name
    pub name: String,
    /// Attributes in source order; names may repeat when case is ignored
    pub attributes: Vec<(String, String)>,
    /// Content in document order
    pub children: Vec<ArbContent>,
}

impl ArbElement {
    /// Serialize to XML text.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                ArbContent::Text(text) => out.push_str(text),
                ArbContent::Comment(comment) => out.push_str(&format!("<!--{}-->", comment)),
                ArbContent::Element(element) => element.write(out),
            }
        }
        out.push_str(&format!("</{}>", self.name));
    }

    /// The tree that parsing [`ArbElement::to_xml`] must produce.
    ///
    /// Adjacent texts are serialized as one run, so they count as one.
    pub fn expected(&self) -> Node {
        let mut node = Node::new(self.name.as_str());
        node.add_attributes(self.attributes.iter().map(|(k, v)| (k, v.as_str())));
        let mut run = String::new();
        for child in &self.children {
            match child {
                ArbContent::Text(text) => {
                    run.push_str(text);
                    continue;
                }
                ArbContent::Comment(comment) => node.add_comment(comment.as_str()),
                ArbContent::Element(element) => node.add_child(element.expected()),
            }
            node.add_text(&run);
            run.clear();
        }
        node.add_text(&run);
        node
    }
}

fn arb_attributes() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (prop::sample::select(ATTRIBUTE_NAMES), VALUE),
        0..4,
    )
    .prop_map(|attributes| {
        // the tokenizer allows case variants but we keep exact names unique
        let mut seen = Vec::new();
        attributes
            .into_iter()
            .filter(|(name, _)| {
                let fresh = !seen.contains(name);
                seen.push(*name);
                fresh
            })
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    })
}

fn arb_content() -> impl Strategy<Value = ArbContent> {
    let leaf = prop_oneof![
        TEXT.prop_map(ArbContent::Text),
        COMMENT.prop_map(ArbContent::Comment),
        (prop::sample::select(ELEMENT_NAMES), arb_attributes()).prop_map(|(name, attributes)| {
            ArbContent::Element(ArbElement {
                name: name.to_string(),
                attributes,
                children: vec![],
            })
        }),
    ];

    leaf.prop_recursive(
        6,   // levels deep
        128, // maximum size of 128 nodes
        8,   // up to 8 items per collection
        |inner| {
            (
                prop::sample::select(ELEMENT_NAMES),
                arb_attributes(),
                prop::collection::vec(inner, 0..8),
            )
                .prop_map(|(name, attributes, children)| {
                    ArbContent::Element(ArbElement {
                        name: name.to_string(),
                        attributes,
                        children,
                    })
                })
        },
    )
}

prop_compose! {
    /// Generate an arbitrary document element.
    pub fn arb_document()(name in prop::sample::select(ELEMENT_NAMES),
                          attributes in arb_attributes(),
                          children in prop::collection::vec(arb_content(), 0..8)) -> ArbElement {
        ArbElement {
            name: name.to_string(),
            attributes,
            children,
        }
    }
}
