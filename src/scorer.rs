use crate::error::NotFoundError;
use crate::similarity::SimilarityMatrix;
use crate::vector_table::VectorTable;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Added to the denominator of the multiplicative rule only where the
/// similarity to `a` is exactly zero.
pub const MUL_EPSILON: f64 = 1e-10;

/// How the three similarity columns of a query are combined into one score
/// per vocabulary word.
pub trait Combine: Send + Sync {
    /// Adjust the matrix once, before any query is scored.
    fn prepare(&self, sims: SimilarityMatrix) -> SimilarityMatrix {
        sims
    }

    fn combine(&self, sim_a: &[f64], sim_a_: &[f64], sim_b: &[f64]) -> Vec<f64>;
}

/// 3CosAdd: sim(a_) - sim(a) + sim(b)
#[derive(Debug, Clone, Copy, Default)]
pub struct Additive;

impl Combine for Additive {
    fn combine(&self, sim_a: &[f64], sim_a_: &[f64], sim_b: &[f64]) -> Vec<f64> {
        sim_a
            .iter()
            .zip(sim_a_)
            .zip(sim_b)
            .map(|((a, a_), b)| a_ - a + b)
            .collect()
    }
}

/// 3CosMul: sim(a_) * sim(b) / sim(a), on similarities shifted into [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiplicative;

impl Combine for Multiplicative {
    fn prepare(&self, sims: SimilarityMatrix) -> SimilarityMatrix {
        sims.shifted()
    }

    fn combine(&self, sim_a: &[f64], sim_a_: &[f64], sim_b: &[f64]) -> Vec<f64> {
        sim_a
            .iter()
            .zip(sim_a_)
            .zip(sim_b)
            .map(|((&a, a_), b)| {
                let denom = if a == 0.0 { a + MUL_EPSILON } else { a };
                a_ * b / denom
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Add,
    Mul,
}

impl Method {
    pub fn strategy(self) -> Box<dyn Combine> {
        match self {
            Method::Add => Box::new(Additive),
            Method::Mul => Box::new(Multiplicative),
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Method::Add),
            "mul" => Ok(Method::Mul),
            other => Err(format!("unknown method '{other}', expected 'add' or 'mul'")),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Add => write!(f, "add"),
            Method::Mul => write!(f, "mul"),
        }
    }
}

/// Answers "a is to a_ as b is to ?" over one test file's similarity matrix.
pub struct AnalogyScorer<'v> {
    vocab: &'v VectorTable,
    sims: SimilarityMatrix,
    strategy: Box<dyn Combine>,
}

impl<'v> AnalogyScorer<'v> {
    pub fn new(vocab: &'v VectorTable, sims: SimilarityMatrix, method: Method) -> Self {
        Self::with_strategy(vocab, sims, method.strategy())
    }

    pub fn with_strategy(
        vocab: &'v VectorTable,
        sims: SimilarityMatrix,
        strategy: Box<dyn Combine>,
    ) -> Self {
        let sims = strategy.prepare(sims);
        AnalogyScorer {
            vocab,
            sims,
            strategy,
        }
    }

    /// Score every vocabulary word. The entries of in-vocabulary input words
    /// are set to zero.
    pub fn scores(&self, a: &str, a_: &str, b: &str) -> Result<Vec<f64>, NotFoundError> {
        let sim_a = self.sims.column(a)?;
        let sim_a_ = self.sims.column(a_)?;
        let sim_b = self.sims.column(b)?;

        let mut scores = self.strategy.combine(sim_a, sim_a_, sim_b);
        for idx in self.excluded(a, a_, b) {
            scores[idx] = 0.0;
        }
        Ok(scores)
    }

    /// Best-scoring vocabulary word. Ties go to the lowest index.
    pub fn run(&self, a: &str, a_: &str, b: &str) -> Result<&'v str, NotFoundError> {
        let scores = self.scores(a, a_, b)?;
        let mut best = 0;
        for (i, &s) in scores.iter().enumerate().skip(1) {
            if s > scores[best] {
                best = i;
            }
        }
        Ok(self.vocab.word(best))
    }

    /// The `n` best candidates as (index, score), highest first. Unlike `run`
    /// the input words are dropped from the listing rather than zeroed.
    pub fn rank(
        &self,
        a: &str,
        a_: &str,
        b: &str,
        n: usize,
    ) -> Result<Vec<(usize, f64)>, NotFoundError> {
        let excluded = self.excluded(a, a_, b);
        let mut scores: Vec<(usize, f64)> = self
            .scores(a, a_, b)?
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !excluded.contains(i))
            .collect();

        // stable sort keeps index order among equal scores
        scores.sort_by(|x, y| y.1.partial_cmp(&x.1).unwrap_or(Ordering::Equal));
        scores.truncate(n);
        Ok(scores)
    }

    pub fn vocab(&self) -> &'v VectorTable {
        self.vocab
    }

    fn excluded(&self, a: &str, a_: &str, b: &str) -> Vec<usize> {
        [a, a_, b]
            .iter()
            .filter_map(|w| self.vocab.index_of(w))
            .collect()
    }
}
