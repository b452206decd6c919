use hackendot::tree::node::Node;

pub mod barcode;
pub mod from_barcode;
pub mod play;
pub mod random;
pub mod range;
pub mod solve;

/// Labels of the nodes, in the given order
pub fn labels(nodes: &[&Node]) -> Vec<String> {
    nodes.iter().map(|node| node.label().to_string()).collect()
}
