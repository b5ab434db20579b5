use crate::error::NotFoundError;
use crate::vector_table::VectorTable;
use rayon::prelude::*;
use std::collections::HashMap;

/// Dot products of every vocabulary vector against every query word of one
/// test file. Stored column by column, so a column is a contiguous slice of
/// length `rows()`.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    columns: HashMap<String, usize>,
    data: Vec<f64>,
    rows: usize,
}

impl SimilarityMatrix {
    /// Query words missing from the vocabulary get the zero vector, so their
    /// column is all zeros. Vectors are not normalised here.
    pub fn build(vocab: &VectorTable, query_words: &[String]) -> SimilarityMatrix {
        let rows = vocab.size();
        let dims = vocab.dimension();
        let zero = vec![0.0; dims];

        let mut columns: HashMap<String, usize> = HashMap::new();
        let mut queries: Vec<&[f64]> = Vec::new();
        for word in query_words {
            if columns.contains_key(word) {
                continue;
            }
            columns.insert(word.clone(), queries.len());
            queries.push(vocab.vector(word).unwrap_or(zero.as_slice()));
        }

        let mut data = vec![0.0; rows * queries.len()];
        if rows > 0 {
            data.par_chunks_mut(rows)
                .zip(queries.par_iter())
                .for_each(|(column, q)| {
                    for (entry, v) in column.iter_mut().zip(vocab.flat().chunks_exact(dims)) {
                        *entry = v.iter().zip(q.iter()).map(|(x, y)| x * y).sum::<f64>();
                    }
                });
        }

        SimilarityMatrix {
            columns,
            data,
            rows,
        }
    }

    /// Map every similarity s to (s + 1) / 2, moving cosines into [0, 1].
    pub fn shifted(mut self) -> SimilarityMatrix {
        self.data.par_iter_mut().for_each(|s| *s = (*s + 1.0) / 2.0);
        self
    }

    pub fn column(&self, word: &str) -> Result<&[f64], NotFoundError> {
        let q = self.columns.get(word).ok_or_else(|| NotFoundError {
            word: word.to_string(),
            within: "query universe",
        })?;
        Ok(&self.data[q * self.rows..(q + 1) * self.rows])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.columns.contains_key(word)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns.len()
    }
}
