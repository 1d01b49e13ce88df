//! `BrowseNode`: a view over one node of Amazon's category tree.

use crate::amazon::models::BrowseNodeSummary;
use crate::amazon::paths::browse_node;
use crate::xml::Element;

/// A category node from `BrowseNodeLookup` or an item's `BrowseNodes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseNode {
    element: Element,
}

impl BrowseNode {
    /// Wraps a `BrowseNode` element.
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn id(&self) -> Option<u64> {
        self.element.find_text(browse_node::ID).and_then(|s| s.trim().parse().ok())
    }

    pub fn name(&self) -> Option<&str> {
        self.element.find_text(browse_node::NAME)
    }

    pub fn is_category_root(&self) -> bool {
        self.element
            .find_text(browse_node::IS_CATEGORY_ROOT)
            .is_some_and(|v| matches!(v.trim(), "1" | "true" | "True"))
    }

    /// The immediate parent node.
    pub fn ancestor(&self) -> Option<BrowseNode> {
        self.element.find(browse_node::ANCESTOR).cloned().map(BrowseNode::new)
    }

    /// Parents up to the category root, nearest first.
    pub fn ancestors(&self) -> Vec<BrowseNode> {
        let mut ancestors = Vec::new();
        let mut current = self.ancestor();
        while let Some(node) = current {
            current = node.ancestor();
            ancestors.push(node);
        }
        ancestors
    }

    pub fn children(&self) -> Vec<BrowseNode> {
        self.element
            .find_all(browse_node::CHILD)
            .into_iter()
            .cloned()
            .map(BrowseNode::new)
            .collect()
    }

    pub fn summary(&self) -> BrowseNodeSummary {
        let mut ancestry: Vec<String> =
            self.ancestors().iter().filter_map(|n| n.name().map(str::to_string)).collect();
        ancestry.reverse();

        BrowseNodeSummary {
            id: self.id(),
            name: self.name().map(str::to_string),
            is_category_root: self.is_category_root(),
            ancestry,
            children: self.children().iter().filter_map(|n| n.name().map(str::to_string)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: &str = r#"
        <BrowseNode>
            <BrowseNodeId>2642129011</BrowseNodeId>
            <Name>Kindle eBooks</Name>
            <Children>
                <BrowseNode><BrowseNodeId>154606011</BrowseNodeId><Name>Literature</Name></BrowseNode>
                <BrowseNode><BrowseNodeId>157325011</BrowseNodeId><Name>Mystery</Name></BrowseNode>
            </Children>
            <Ancestors>
                <BrowseNode>
                    <BrowseNodeId>154606011</BrowseNodeId>
                    <Name>Kindle Store</Name>
                    <IsCategoryRoot>1</IsCategoryRoot>
                    <Ancestors>
                        <BrowseNode><BrowseNodeId>133140011</BrowseNodeId><Name>Kindle</Name></BrowseNode>
                    </Ancestors>
                </BrowseNode>
            </Ancestors>
        </BrowseNode>
    "#;

    fn make_node() -> BrowseNode {
        BrowseNode::new(Element::parse(NODE).unwrap())
    }

    #[test]
    fn test_basic_fields() {
        let node = make_node();
        assert_eq!(node.id(), Some(2642129011));
        assert_eq!(node.name(), Some("Kindle eBooks"));
        assert!(!node.is_category_root());
    }

    #[test]
    fn test_ancestor_chain() {
        let node = make_node();
        let parent = node.ancestor().unwrap();
        assert_eq!(parent.name(), Some("Kindle Store"));
        assert!(parent.is_category_root());

        let ancestors = node.ancestors();
        let names: Vec<_> = ancestors.iter().filter_map(|n| n.name()).collect();
        assert_eq!(names, vec!["Kindle Store", "Kindle"]);
        assert!(ancestors[1].ancestor().is_none());
    }

    #[test]
    fn test_children() {
        let children = make_node().children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].id(), Some(157325011));
    }

    #[test]
    fn test_leaf_node() {
        let node = BrowseNode::new(Element::parse("<BrowseNode><Name>Leaf</Name></BrowseNode>").unwrap());
        assert!(node.id().is_none());
        assert!(node.ancestor().is_none());
        assert!(node.ancestors().is_empty());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_summary() {
        let summary = make_node().summary();
        assert_eq!(summary.id, Some(2642129011));
        assert_eq!(summary.ancestry, vec!["Kindle".to_string(), "Kindle Store".to_string()]);
        assert_eq!(summary.children, vec!["Literature".to_string(), "Mystery".to_string()]);
        assert_eq!(summary.path(), "Kindle > Kindle Store > Kindle eBooks");
    }
}
