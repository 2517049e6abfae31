//! Instances, schemas and datasets.
//!
//! A [`Schema`] is the immutable descriptor of a learning problem: the two
//! class labels, the attribute list and each attribute's finite value domain,
//! all in declaration order. A [`DataSet`] pairs a schema with the instances
//! that conform to it; [`DataSet::push`] is the validation gate, so the
//! induction core can assume a closed world behind it.

use crate::errors::DichotomiserError;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// A single labeled example: one value per schema attribute, in attribute
/// order, plus the class label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Attribute values, positionally aligned with [`Schema::attributes`].
    pub values: Vec<String>,
    /// The class label.
    pub label: String,
}

impl Instance {
    /// Create a new instance from attribute values and a class label.
    pub fn new<S, L>(values: Vec<S>, label: L) -> Self
    where
        S: Into<String>,
        L: Into<String>,
    {
        Instance {
            values: values.into_iter().map(Into::into).collect(),
            label: label.into(),
        }
    }
}

/// The immutable dataset descriptor: the ordered pair of class labels, the
/// ordered attribute list and each attribute's ordered value domain.
///
/// A schema is validated once on construction and only read afterwards.
/// Reverse lookup maps are built up front so that name and value lookups
/// stay O(1) during induction and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    labels: Vec<String>,
    attributes: Vec<String>,
    domains: Vec<Vec<String>>,
    attribute_index: HashMap<String, usize>,
    value_index: Vec<HashMap<String, usize>>,
}

impl Schema {
    /// Build a schema from the class labels, the attribute names and one
    /// value domain per attribute.
    ///
    /// Exactly two distinct labels must be declared. Every attribute needs a
    /// non-empty, duplicate-free domain, and attribute names may not repeat.
    pub fn new(
        labels: Vec<String>,
        attributes: Vec<String>,
        domains: Vec<Vec<String>>,
    ) -> Result<Self, DichotomiserError> {
        if labels.len() != 2 {
            return Err(DichotomiserError::LabelCount(labels.len()));
        }
        if labels[0] == labels[1] {
            return Err(DichotomiserError::InvalidSchema(format!(
                "class labels must be distinct, both are {:?}",
                labels[0]
            )));
        }
        if attributes.len() != domains.len() {
            return Err(DichotomiserError::InvalidSchema(format!(
                "{} attributes declared but {} value domains",
                attributes.len(),
                domains.len()
            )));
        }
        let mut attribute_index = HashMap::with_capacity(attributes.len());
        for (a, name) in attributes.iter().enumerate() {
            if attribute_index.insert(name.clone(), a).is_some() {
                return Err(DichotomiserError::InvalidSchema(format!(
                    "duplicate attribute {:?}",
                    name
                )));
            }
        }
        let mut value_index = Vec::with_capacity(domains.len());
        for (name, domain) in attributes.iter().zip(domains.iter()) {
            if domain.is_empty() {
                return Err(DichotomiserError::InvalidSchema(format!(
                    "attribute {:?} has an empty value domain",
                    name
                )));
            }
            if domain.len() > u16::MAX as usize {
                return Err(DichotomiserError::InvalidSchema(format!(
                    "attribute {:?} declares more than {} values",
                    name,
                    u16::MAX
                )));
            }
            let mut lookup = HashMap::with_capacity(domain.len());
            for (v, value) in domain.iter().enumerate() {
                if lookup.insert(value.clone(), v).is_some() {
                    return Err(DichotomiserError::InvalidSchema(format!(
                        "attribute {:?} repeats the value {:?}",
                        name, value
                    )));
                }
            }
            value_index.push(lookup);
        }
        Ok(Schema {
            labels,
            attributes,
            domains,
            attribute_index,
            value_index,
        })
    }

    /// The two class labels, in declaration order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The attribute names, in declaration order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// The ordered value domain of attribute `attribute`.
    pub fn domain(&self, attribute: usize) -> &[String] {
        &self.domains[attribute]
    }

    /// Number of attributes.
    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Position of `label` in the label list.
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Position of the attribute called `name`.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attribute_index.get(name).copied()
    }

    /// Position of `value` in the domain of attribute `attribute`.
    pub fn value_index(&self, attribute: usize, value: &str) -> Option<usize> {
        self.value_index.get(attribute)?.get(value).copied()
    }

    fn check_instance(&self, instance: &Instance) -> Result<(), DichotomiserError> {
        if instance.values.len() != self.attributes.len() {
            return Err(DichotomiserError::InvalidInstance(format!(
                "{} attribute values, but the schema declares {} attributes",
                instance.values.len(),
                self.attributes.len()
            )));
        }
        if self.label_index(&instance.label).is_none() {
            return Err(DichotomiserError::UnknownLabel(instance.label.clone()));
        }
        for (a, value) in instance.values.iter().enumerate() {
            if self.value_index(a, value).is_none() {
                return Err(DichotomiserError::InvalidInstance(format!(
                    "value {:?} is not in the domain of attribute {:?}",
                    value, self.attributes[a]
                )));
            }
        }
        Ok(())
    }
}

/// A schema plus the instances that conform to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    schema: Schema,
    instances: Vec<Instance>,
}

impl DataSet {
    /// An empty dataset over `schema`.
    pub fn new(schema: Schema) -> Self {
        DataSet {
            schema,
            instances: Vec::new(),
        }
    }

    /// Build a dataset from pre-assembled instances, validating every one.
    pub fn from_parts(schema: Schema, instances: Vec<Instance>) -> Result<Self, DichotomiserError> {
        let mut data = DataSet::new(schema);
        for instance in instances {
            data.push(instance)?;
        }
        Ok(data)
    }

    /// Append `instance`, rejecting it if it does not conform to the schema.
    pub fn push(&mut self, instance: Instance) -> Result<(), DichotomiserError> {
        self.schema.check_instance(&instance)?;
        self.instances.push(instance);
        Ok(())
    }

    /// The dataset descriptor.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The instances, in insertion order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the dataset holds no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Clone the selected rows into a new dataset over the same schema.
    /// Rows keep their relative order.
    ///
    /// Panics if a row index is out of bounds.
    pub fn subset(&self, rows: &[usize]) -> DataSet {
        DataSet {
            schema: self.schema.clone(),
            instances: rows.iter().map(|&r| self.instances[r].clone()).collect(),
        }
    }

    /// Encode every instance into domain-value codes, so that induction can
    /// work on row-index subsets with plain integer indexing instead of
    /// repeated string lookups.
    pub(crate) fn encode(&self) -> Result<CodeMatrix, DichotomiserError> {
        let n_cols = self.schema.n_attributes();
        let mut codes = Vec::with_capacity(self.instances.len() * n_cols);
        let mut labels = Vec::with_capacity(self.instances.len());
        for (r, instance) in self.instances.iter().enumerate() {
            if instance.values.len() != n_cols {
                return Err(DichotomiserError::InvalidInstance(format!(
                    "row {} has {} values, but the schema declares {} attributes",
                    r,
                    instance.values.len(),
                    n_cols
                )));
            }
            for (a, value) in instance.values.iter().enumerate() {
                let code = self.schema.value_index(a, value).ok_or_else(|| {
                    DichotomiserError::InvalidInstance(format!(
                        "row {}: value {:?} is not in the domain of attribute {:?}",
                        r, value, self.schema.attributes[a]
                    ))
                })?;
                codes.push(code as u16);
            }
            let label = self
                .schema
                .label_index(&instance.label)
                .ok_or_else(|| DichotomiserError::UnknownLabel(instance.label.clone()))?;
            labels.push(label as u8);
        }
        Ok(CodeMatrix {
            codes,
            labels,
            n_cols,
        })
    }
}

/// Row-major matrix of domain-value codes with one class code per row.
#[derive(Debug)]
pub(crate) struct CodeMatrix {
    codes: Vec<u16>,
    labels: Vec<u8>,
    n_cols: usize,
}

impl CodeMatrix {
    /// Value code of row `row` for attribute `attribute`.
    pub(crate) fn value(&self, row: usize, attribute: usize) -> u16 {
        self.codes[row * self.n_cols + attribute]
    }

    /// Class code (0 or 1) of row `row`.
    pub(crate) fn label(&self, row: usize) -> u8 {
        self.labels[row]
    }

    /// Number of rows.
    pub(crate) fn n_rows(&self) -> usize {
        self.labels.len()
    }
}
