//! A binary decision-tree classifier for discrete attributes, grown with
//! the ID3 information-gain heuristic.
//!
//! Declare a [`Schema`] (two class labels, attributes, value domains), feed
//! a [`DataSet`] of conforming instances to [`DecisionTree::fit`], then
//! classify, score and print the result:
//!
//! ```
//! use dichotomiser::{DataSet, DecisionTree, Instance, Schema};
//!
//! # fn main() -> Result<(), dichotomiser::DichotomiserError> {
//! let schema = Schema::new(
//!     vec!["Yes".into(), "No".into()],
//!     vec!["Outlook".into(), "Windy".into()],
//!     vec![
//!         vec!["sunny".into(), "rain".into()],
//!         vec!["true".into(), "false".into()],
//!     ],
//! )?;
//! let mut train = DataSet::new(schema);
//! train.push(Instance::new(vec!["sunny", "false"], "Yes"))?;
//! train.push(Instance::new(vec!["sunny", "true"], "Yes"))?;
//! train.push(Instance::new(vec!["rain", "false"], "No"))?;
//! train.push(Instance::new(vec!["rain", "true"], "No"))?;
//!
//! let tree = DecisionTree::fit(&train)?;
//! assert_eq!(tree.classify(&Instance::new(vec!["sunny", "true"], "Yes"))?, "Yes");
//! assert_eq!(tree.score(&train)?, 1.0);
//! print!("{}", tree);
//! # Ok(())
//! # }
//! ```

mod splitter;

// Modules
pub mod arff;
pub mod data;
pub mod errors;
pub mod metrics;
pub mod node;
pub mod sampler;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use data::{DataSet, Instance, Schema};
pub use errors::DichotomiserError;
pub use tree::DecisionTree;
