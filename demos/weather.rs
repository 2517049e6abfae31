//! Play-tennis walkthrough.
//!
//! Loads the canonical fourteen-day weather dataset, reports the information
//! gain of every attribute, grows the tree, prints it and evaluates accuracy
//! on the training data and on a held-out split.
//!
//! ```bash
//! cargo run --example weather
//! ```

use dichotomiser::arff::parse_arff;
use dichotomiser::sampler::holdout_split;
use dichotomiser::DecisionTree;
use std::error::Error;

const WEATHER_ARFF: &str = include_str!("data/weather.arff");

fn main() -> Result<(), Box<dyn Error>> {
    let train = parse_arff(WEATHER_ARFF)?;
    println!(
        "Loaded {} instances over {} attributes.",
        train.len(),
        train.schema().n_attributes()
    );

    println!("\nInformation gain at the root:");
    for (attribute, gain) in DecisionTree::root_gains(&train)? {
        println!("  {} {:.5}", attribute, gain);
    }

    let tree = DecisionTree::fit(&train)?;
    println!("\n{}", tree);
    println!("Training accuracy: {:.5}", tree.score(&train)?);

    let (kept, held_out) = holdout_split(&train, 0.7, 42);
    if !kept.is_empty() && !held_out.is_empty() {
        let holdout_tree = DecisionTree::fit(&kept)?;
        println!(
            "Holdout accuracy ({} train, {} test): {:.5}",
            kept.len(),
            held_out.len(),
            holdout_tree.score(&held_out)?
        );
    }

    Ok(())
}
