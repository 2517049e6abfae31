//! Tree induction, classification and rendering.
//!
//! [`DecisionTree::fit`] grows a tree top-down: at every node the rows are
//! scored once, the highest-gain attribute becomes the split, and the rows
//! are partitioned over its domain values with the chosen attribute removed
//! from the candidates handed to the children. Fitted trees are immutable;
//! classification and rendering only read them.

use crate::data::{CodeMatrix, DataSet, Instance, Schema};
use crate::errors::DichotomiserError;
use crate::metrics::accuracy_score;
use crate::node::{InternalNode, LeafNode, Node};
use crate::splitter::{best_attribute, information_gains, ClassCounts};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::time::Instant;

/// A fitted binary decision tree over discrete attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
    schema: Schema,
}

impl DecisionTree {
    /// Grow a tree from `data`, with the schema's first class label standing
    /// in as the default prediction for the degenerate empty-training case.
    pub fn fit(data: &DataSet) -> Result<Self, DichotomiserError> {
        Self::fit_with_default(data, data.schema().labels()[0].as_str())
    }

    /// Grow a tree from `data`, predicting `default_label` wherever the
    /// training rows run out before any evidence is seen.
    pub fn fit_with_default(data: &DataSet, default_label: &str) -> Result<Self, DichotomiserError> {
        let schema = data.schema();
        let default = schema
            .label_index(default_label)
            .ok_or_else(|| DichotomiserError::UnknownLabel(default_label.to_string()))?
            as u8;
        let start = Instant::now();
        let codes = data.encode()?;
        let rows: Vec<usize> = (0..codes.n_rows()).collect();
        let attributes: Vec<usize> = (0..schema.n_attributes()).collect();
        let root = grow(&codes, schema, rows, attributes, default);
        debug!(
            "grew a tree with {} leaves at depth {} in {:.3} seconds",
            root.n_leaves(),
            root.depth(),
            start.elapsed().as_secs_f64()
        );
        Ok(DecisionTree {
            root,
            schema: schema.clone(),
        })
    }

    /// Predict the class label of `instance`.
    ///
    /// The value list must line up with the schema. A value that was never
    /// declared in its attribute's domain falls back to the first class
    /// label, with a warning, rather than failing the whole call.
    pub fn classify(&self, instance: &Instance) -> Result<&str, DichotomiserError> {
        if instance.values.len() != self.schema.n_attributes() {
            return Err(DichotomiserError::InvalidInstance(format!(
                "{} attribute values, but the schema declares {} attributes",
                instance.values.len(),
                self.schema.n_attributes()
            )));
        }
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(leaf) => return Ok(self.schema.labels()[leaf.label].as_str()),
                Node::Internal(split) => {
                    let value = &instance.values[split.attribute];
                    match self.schema.value_index(split.attribute, value) {
                        Some(v) => node = &split.children[v],
                        None => {
                            warn!(
                                "value {:?} was never declared for attribute {:?}, falling back to {:?}",
                                value,
                                self.schema.attributes()[split.attribute],
                                self.schema.labels()[0]
                            );
                            return Ok(self.schema.labels()[0].as_str());
                        }
                    }
                }
            }
        }
    }

    /// Predict a label for every instance in `data`, in order.
    ///
    /// With `parallel` set the independent traversals are fanned out over
    /// the rayon thread pool; the tree is only read, so no locking is
    /// involved.
    pub fn predict(&self, data: &DataSet, parallel: bool) -> Result<Vec<&str>, DichotomiserError> {
        if parallel {
            data.instances()
                .par_iter()
                .map(|instance| self.classify(instance))
                .collect()
        } else {
            data.instances()
                .iter()
                .map(|instance| self.classify(instance))
                .collect()
        }
    }

    /// Accuracy of the tree over `data`: the exact-match fraction in
    /// `[0, 1]`.
    pub fn score(&self, data: &DataSet) -> Result<f64, DichotomiserError> {
        if data.is_empty() {
            return Err(DichotomiserError::EmptyDataSet);
        }
        let predicted = self.predict(data, false)?;
        let truth: Vec<&str> = data.instances().iter().map(|i| i.label.as_str()).collect();
        Ok(accuracy_score(&truth, &predicted))
    }

    /// Information gain of every attribute measured over the whole of
    /// `data`, paired with the attribute names, in declaration order.
    ///
    /// This is the ranking the root split is chosen from, exposed for
    /// inspection.
    pub fn root_gains(data: &DataSet) -> Result<Vec<(String, f64)>, DichotomiserError> {
        if data.is_empty() {
            return Err(DichotomiserError::EmptyDataSet);
        }
        let schema = data.schema();
        let codes = data.encode()?;
        let rows: Vec<usize> = (0..codes.n_rows()).collect();
        let candidates: Vec<usize> = (0..schema.n_attributes()).collect();
        let counts = ClassCounts::tally(&codes, schema, &rows);
        let gains = information_gains(&counts, &candidates);
        Ok(schema.attributes().iter().cloned().zip(gains).collect())
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The schema the tree was grown with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Maximum depth. A single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter,
        node: &Node,
        edge: Option<&str>,
        depth: usize,
    ) -> fmt::Result {
        let indent = "    ".repeat(depth);
        let lead = edge.unwrap_or("ROOT");
        match node {
            Node::Leaf(leaf) => {
                writeln!(f, "{}{} ({})", indent, lead, self.schema.labels()[leaf.label])
            }
            Node::Internal(split) => {
                writeln!(
                    f,
                    "{}{} {{{}?}}",
                    indent, lead, self.schema.attributes()[split.attribute]
                )?;
                for (value, child) in self
                    .schema
                    .domain(split.attribute)
                    .iter()
                    .zip(&split.children)
                {
                    self.fmt_node(f, child, Some(value), depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for DecisionTree {
    /// Depth-first rendering, four spaces of indent per level. Splits print
    /// as `{attribute?}`, leaves as `(label)`, and every line below the root
    /// leads with the parent's domain value it answers.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_node(f, &self.root, None, 0)
    }
}

/// Recursive induction over a row subset.
///
/// Base cases, in priority order: no rows left gives a leaf with the
/// inherited default; label-pure rows give a leaf with that label; an empty
/// candidate set gives a majority leaf. Otherwise the best candidate splits
/// the rows over its domain, and each child recurses without it. An
/// attribute is therefore used at most once per root-to-leaf path.
fn grow(
    codes: &CodeMatrix,
    schema: &Schema,
    rows: Vec<usize>,
    attributes: Vec<usize>,
    default: u8,
) -> Node {
    if rows.is_empty() {
        return Node::Leaf(LeafNode {
            label: default as usize,
            rows: None,
        });
    }
    if let Some(label) = uniform_label(codes, &rows) {
        return Node::Leaf(LeafNode {
            label: label as usize,
            rows: Some(rows),
        });
    }
    if attributes.is_empty() {
        let label = majority_vote(codes, &rows) as usize;
        return Node::Leaf(LeafNode {
            label,
            rows: Some(rows),
        });
    }

    let counts = ClassCounts::tally(codes, schema, &rows);
    let attribute = best_attribute(&counts, &attributes);
    // Children that end up empty fall back to this node's majority.
    let child_default = majority_vote(codes, &rows);
    let remaining: Vec<usize> = attributes.iter().copied().filter(|&a| a != attribute).collect();

    let mut children = Vec::with_capacity(schema.domain(attribute).len());
    for v in 0..schema.domain(attribute).len() {
        let child_rows: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&r| codes.value(r, attribute) as usize == v)
            .collect();
        children.push(grow(codes, schema, child_rows, remaining.clone(), child_default));
    }
    Node::Internal(InternalNode {
        attribute,
        children,
        rows: Some(rows),
    })
}

/// The label shared by every row, if the subset is label-pure.
fn uniform_label(codes: &CodeMatrix, rows: &[usize]) -> Option<u8> {
    let first = codes.label(rows[0]);
    rows.iter()
        .all(|&r| codes.label(r) == first)
        .then_some(first)
}

/// Majority label of the rows. The first class label wins ties.
fn majority_vote(codes: &CodeMatrix, rows: &[usize]) -> u8 {
    let first = rows.iter().filter(|&&r| codes.label(r) == 0).count();
    if first >= rows.len() - first {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_schema() -> Schema {
        Schema::new(
            vec!["Yes".to_string(), "No".to_string()],
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec!["x".to_string(), "y".to_string()],
                vec!["p".to_string(), "q".to_string()],
            ],
        )
        .unwrap()
    }

    fn toy_data() -> DataSet {
        let mut data = DataSet::new(toy_schema());
        data.push(Instance::new(vec!["x", "p"], "Yes")).unwrap();
        data.push(Instance::new(vec!["x", "q"], "Yes")).unwrap();
        data.push(Instance::new(vec!["y", "p"], "No")).unwrap();
        data.push(Instance::new(vec!["y", "q"], "No")).unwrap();
        data
    }

    fn contradictory_data() -> DataSet {
        let mut data = DataSet::new(toy_schema());
        data.push(Instance::new(vec!["x", "p"], "Yes")).unwrap();
        data.push(Instance::new(vec!["x", "p"], "Yes")).unwrap();
        data.push(Instance::new(vec!["x", "p"], "No")).unwrap();
        data.push(Instance::new(vec!["x", "p"], "No")).unwrap();
        data
    }

    /// Each non-default leaf must predict the majority label of the rows it
    /// retained, with ties going to the first class label.
    fn assert_leaf_majorities(node: &Node, data: &DataSet) {
        match node {
            Node::Leaf(leaf) => {
                let rows = match &leaf.rows {
                    Some(rows) => rows,
                    None => return,
                };
                let first = rows
                    .iter()
                    .filter(|&&r| data.instances()[r].label == data.schema().labels()[0])
                    .count();
                let majority = if first >= rows.len() - first { 0 } else { 1 };
                assert_eq!(leaf.label, majority);
            }
            Node::Internal(split) => {
                for child in &split.children {
                    assert_leaf_majorities(child, data);
                }
            }
        }
    }

    #[test]
    fn test_fit_splits_on_the_separating_attribute() {
        let data = toy_data();
        let tree = DecisionTree::fit(&data).unwrap();
        match tree.root() {
            Node::Internal(split) => {
                assert_eq!(split.attribute, 0);
                assert_eq!(split.children.len(), 2);
                assert!(split.children.iter().all(Node::is_leaf));
            }
            Node::Leaf(_) => panic!("expected a split at the root"),
        }
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_leaves(), 2);
        assert_leaf_majorities(tree.root(), &data);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let data = toy_data();
        let a = DecisionTree::fit(&data).unwrap();
        let b = DecisionTree::fit(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_classify() {
        let tree = DecisionTree::fit(&toy_data()).unwrap();
        let label = tree
            .classify(&Instance::new(vec!["x", "q"], "Yes"))
            .unwrap();
        assert_eq!(label, "Yes");
        let label = tree.classify(&Instance::new(vec!["y", "p"], "No")).unwrap();
        assert_eq!(label, "No");
    }

    #[test]
    fn test_classify_rejects_misaligned_instances() {
        let tree = DecisionTree::fit(&toy_data()).unwrap();
        let err = tree.classify(&Instance::new(vec!["x"], "Yes")).unwrap_err();
        assert!(matches!(err, DichotomiserError::InvalidInstance(_)));
    }

    #[test]
    fn test_classify_falls_back_on_undeclared_values() {
        let tree = DecisionTree::fit(&toy_data()).unwrap();
        let label = tree.classify(&Instance::new(vec!["z", "p"], "No")).unwrap();
        assert_eq!(label, "Yes");
    }

    #[test]
    fn test_predict_parallel_matches_sequential() {
        let data = toy_data();
        let tree = DecisionTree::fit(&data).unwrap();
        assert_eq!(
            tree.predict(&data, false).unwrap(),
            tree.predict(&data, true).unwrap()
        );
    }

    #[test]
    fn test_predictions_stay_within_the_label_set() {
        let data = toy_data();
        let tree = DecisionTree::fit(&data).unwrap();
        for label in tree.predict(&data, false).unwrap() {
            assert!(data.schema().label_index(label).is_some());
        }
    }

    #[test]
    fn test_training_accuracy_on_separable_data() {
        let data = toy_data();
        let tree = DecisionTree::fit(&data).unwrap();
        assert_eq!(tree.score(&data).unwrap(), 1.0);
    }

    #[test]
    fn test_score_rejects_empty_data() {
        let data = toy_data();
        let tree = DecisionTree::fit(&data).unwrap();
        let empty = DataSet::new(toy_schema());
        let err = tree.score(&empty).unwrap_err();
        assert!(matches!(err, DichotomiserError::EmptyDataSet));
    }

    #[test]
    fn test_fit_on_empty_data_yields_default_leaf() {
        let empty = DataSet::new(toy_schema());
        let tree = DecisionTree::fit_with_default(&empty, "No").unwrap();
        assert_eq!(
            tree.root(),
            &Node::Leaf(LeafNode {
                label: 1,
                rows: None
            })
        );
        let label = tree.classify(&Instance::new(vec!["x", "p"], "Yes")).unwrap();
        assert_eq!(label, "No");

        // Without an explicit default the first class label stands in.
        let tree = DecisionTree::fit(&empty).unwrap();
        let label = tree.classify(&Instance::new(vec!["x", "p"], "Yes")).unwrap();
        assert_eq!(label, "Yes");
    }

    #[test]
    fn test_fit_rejects_unknown_default_label() {
        let err = DecisionTree::fit_with_default(&toy_data(), "Maybe").unwrap_err();
        assert!(matches!(err, DichotomiserError::UnknownLabel(_)));
    }

    #[test]
    fn test_contradictory_rows_resolve_to_the_majority() {
        // Both attributes carry zero gain, so the path exhausts them and the
        // deepest leaf takes the majority, first label on ties.
        let data = contradictory_data();
        let tree = DecisionTree::fit(&data).unwrap();
        let label = tree.classify(&Instance::new(vec!["x", "p"], "No")).unwrap();
        assert_eq!(label, "Yes");
        assert_leaf_majorities(tree.root(), &data);
    }

    #[test]
    fn test_attribute_is_used_once_per_path() {
        fn walk(node: &Node, seen: &mut Vec<usize>) {
            if let Node::Internal(split) = node {
                assert!(!seen.contains(&split.attribute));
                seen.push(split.attribute);
                for child in &split.children {
                    walk(child, seen);
                }
                seen.pop();
            }
        }
        let tree = DecisionTree::fit(&contradictory_data()).unwrap();
        walk(tree.root(), &mut Vec::new());
    }

    #[test]
    fn test_root_gains() {
        let gains = DecisionTree::root_gains(&toy_data()).unwrap();
        assert_eq!(gains.len(), 2);
        assert_eq!(gains[0].0, "A");
        assert!((gains[0].1 - 1.0).abs() < 1e-9);
        assert_eq!(gains[1].0, "B");
        assert!(gains[1].1.abs() < 1e-9);
    }

    #[test]
    fn test_root_gains_reject_empty_data() {
        let empty = DataSet::new(toy_schema());
        let err = DecisionTree::root_gains(&empty).unwrap_err();
        assert!(matches!(err, DichotomiserError::EmptyDataSet));
    }

    #[test]
    fn test_render() {
        let tree = DecisionTree::fit(&toy_data()).unwrap();
        let expected = "ROOT {A?}\n    x (Yes)\n    y (No)\n";
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn test_render_single_leaf() {
        let empty = DataSet::new(toy_schema());
        let tree = DecisionTree::fit_with_default(&empty, "No").unwrap();
        assert_eq!(tree.to_string(), "ROOT (No)\n");
    }

    #[test]
    fn test_serde_round_trip() {
        let tree = DecisionTree::fit(&toy_data()).unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        let back: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
        let label = back.classify(&Instance::new(vec!["x", "q"], "Yes")).unwrap();
        assert_eq!(label, "Yes");
    }
}
