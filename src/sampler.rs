//! Sampler
//!
//! Strategies for holding instances out of training, so a tree's accuracy
//! can be reported on data it never saw.
use crate::data::DataSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// A sampler can be used to subset the data prior to fitting a tree.
pub trait Sampler {
    /// Sample the rows, returning a tuple, where the first item is the rows
    /// chosen for training, and the second are the rows held out.
    fn sample(&mut self, rng: &mut StdRng, index: &[usize]) -> (Vec<usize>, Vec<usize>);
}

/// Keeps each row for training independently with probability `keep`.
pub struct RandomSampler {
    keep: f32,
}

impl RandomSampler {
    pub fn new(keep: f32) -> Self {
        RandomSampler { keep }
    }
}

impl Sampler for RandomSampler {
    fn sample(&mut self, rng: &mut StdRng, index: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let keep = self.keep;
        let mut chosen = Vec::new();
        let mut excluded = Vec::new();
        for i in index {
            if rng.gen::<f32>() < keep {
                chosen.push(*i);
            } else {
                excluded.push(*i)
            }
        }
        (chosen, excluded)
    }
}

/// Split `data` into a training set and a held-out set with a seeded RNG,
/// keeping each instance for training with probability `keep`.
pub fn holdout_split(data: &DataSet, keep: f32, seed: u64) -> (DataSet, DataSet) {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows: Vec<usize> = (0..data.len()).collect();
    let (chosen, excluded) = RandomSampler::new(keep).sample(&mut rng, &rows);
    (data.subset(&chosen), data.subset(&excluded))
}
