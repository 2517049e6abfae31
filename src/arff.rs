//! ARFF-style dataset reader.
//!
//! Covers the nominal subset this crate works with: `@relation`,
//! `@attribute name {v1,v2,...}`, `@data`, `%` comment lines and
//! comma-separated value rows. The last declared attribute is the class
//! attribute; its domain supplies the two class labels.

use crate::data::{DataSet, Instance, Schema};
use crate::errors::DichotomiserError;
use std::fs;
use std::mem;
use std::path::Path;

/// Parse an ARFF document into a validated dataset.
///
/// ```
/// let text = "@relation toy\n\
///             @attribute a {x, y}\n\
///             @attribute class {p, n}\n\
///             @data\n\
///             x,p\n\
///             y,n\n";
/// let data = dichotomiser::arff::parse_arff(text).unwrap();
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.schema().labels(), ["p", "n"]);
/// ```
pub fn parse_arff(text: &str) -> Result<DataSet, DichotomiserError> {
    let mut attributes: Vec<String> = Vec::new();
    let mut domains: Vec<Vec<String>> = Vec::new();
    let mut data: Option<DataSet> = None;
    for (number, raw) in text.lines().enumerate() {
        let line_no = number + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        // Everything after @data is a value row.
        if let Some(dataset) = data.as_mut() {
            let arity = dataset.schema().n_attributes() + 1;
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != arity {
                return Err(DichotomiserError::Parse(
                    line_no,
                    format!(
                        "expected {} comma-separated fields, found {}",
                        arity,
                        fields.len()
                    ),
                ));
            }
            let instance = Instance::new(fields[..arity - 1].to_vec(), fields[arity - 1]);
            dataset
                .push(instance)
                .map_err(|e| DichotomiserError::Parse(line_no, e.to_string()))?;
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if lower.starts_with("@relation") {
            continue;
        } else if lower.starts_with("@attribute") {
            let (name, domain) = parse_attribute(line, line_no)?;
            attributes.push(name);
            domains.push(domain);
        } else if lower == "@data" {
            // The class attribute contributes the labels, not a column.
            let labels = match domains.pop() {
                Some(labels) => labels,
                None => {
                    return Err(DichotomiserError::Parse(
                        line_no,
                        "@data reached before any @attribute".to_string(),
                    ))
                }
            };
            attributes.pop();
            let schema = Schema::new(labels, mem::take(&mut attributes), mem::take(&mut domains))?;
            data = Some(DataSet::new(schema));
        } else {
            return Err(DichotomiserError::Parse(
                line_no,
                format!("unrecognized declaration {:?}", line),
            ));
        }
    }
    data.ok_or_else(|| {
        DichotomiserError::Parse(text.lines().count(), "missing @data section".to_string())
    })
}

/// Read and parse an ARFF file from disk.
pub fn read_arff<P: AsRef<Path>>(path: P) -> Result<DataSet, DichotomiserError> {
    let text = fs::read_to_string(&path).map_err(|e| {
        DichotomiserError::UnableToRead(format!("{}: {}", path.as_ref().display(), e))
    })?;
    parse_arff(&text)
}

/// Parse one `@attribute name {v1,v2,...}` declaration into the attribute
/// name and its ordered domain.
fn parse_attribute(line: &str, line_no: usize) -> Result<(String, Vec<String>), DichotomiserError> {
    let rest = line["@attribute".len()..].trim();
    let open = rest.find('{').ok_or_else(|| {
        DichotomiserError::Parse(
            line_no,
            "only nominal attributes with a {...} value list are supported".to_string(),
        )
    })?;
    let close = rest.rfind('}').ok_or_else(|| {
        DichotomiserError::Parse(line_no, "unterminated value list, missing }".to_string())
    })?;
    if close < open {
        return Err(DichotomiserError::Parse(
            line_no,
            "malformed value list".to_string(),
        ));
    }
    let name = rest[..open].trim();
    if name.is_empty() {
        return Err(DichotomiserError::Parse(
            line_no,
            "attribute declared without a name".to_string(),
        ));
    }
    let domain: Vec<String> = rest[open + 1..close]
        .split(',')
        .map(|v| v.trim().to_string())
        .collect();
    if domain.iter().any(String::is_empty) {
        return Err(DichotomiserError::Parse(
            line_no,
            format!("attribute {:?} declares an empty value", name),
        ));
    }
    Ok((name.to_string(), domain))
}
