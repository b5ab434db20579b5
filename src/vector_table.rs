use crate::error::{NotFoundError, ParseError, ParseErrorKind, Result};
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Word vectors held in a contiguous array. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct VectorTable {
    words: Vec<String>,               // vocabulary - index to word map
    word_map: HashMap<String, usize>, // word to index map
    vectors: Vec<f64>,                // A single, flattened Vec of all vector data
    dims: usize,                      // The dimension of each vector
}

impl VectorTable {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<VectorTable> {
        let file = fs::File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Read `<word> <float> ... <float>` rows. The first row fixes the
    /// dimension; vectors are stored exactly as read (no normalisation).
    pub fn load<R: BufRead>(reader: R) -> Result<VectorTable> {
        let mut words: Vec<String> = Vec::new();
        let mut word_map: HashMap<String, usize> = HashMap::new();
        let mut vectors: Vec<f64> = Vec::new();
        let mut dims: usize = 0;

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let lineno = index + 1;
            let mut parts = line.split_whitespace();

            let Some(key) = parts.next() else {
                return Err(ParseError::new(lineno, ParseErrorKind::MissingWord).into());
            };
            let values: Vec<f64> = parts
                .map(|s| match s.parse::<f64>() {
                    Ok(x) if x.is_finite() => Ok(x),
                    _ => Err(ParseError::new(
                        lineno,
                        ParseErrorKind::BadComponent(s.to_string()),
                    )),
                })
                .collect::<std::result::Result<_, _>>()?;

            if words.is_empty() {
                dims = values.len();
                if dims == 0 {
                    return Err(ParseError::new(lineno, ParseErrorKind::ZeroDimensions).into());
                }
            } else if values.len() != dims {
                let kind = ParseErrorKind::DimensionMismatch {
                    word: key.to_string(),
                    expected: dims,
                    got: values.len(),
                };
                return Err(ParseError::new(lineno, kind).into());
            }

            if word_map.contains_key(key) {
                let kind = ParseErrorKind::DuplicateWord(key.to_string());
                return Err(ParseError::new(lineno, kind).into());
            }
            word_map.insert(key.to_string(), words.len());
            words.push(key.to_string());
            vectors.extend_from_slice(&values);
        }

        if words.is_empty() {
            return Err(ParseError::new(0, ParseErrorKind::Empty).into());
        }

        Ok(VectorTable {
            words,
            word_map,
            vectors,
            dims,
        })
    }

    /// Rescale every vector to unit length, so that dot products become
    /// cosine similarities. Near-zero vectors are left alone.
    pub fn into_normalized(mut self) -> VectorTable {
        const EPS: f64 = 1e-8;
        for v in self.vectors.chunks_exact_mut(self.dims) {
            let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > EPS {
                v.iter_mut().for_each(|e| *e /= norm);
            }
        }
        self
    }

    pub fn size(&self) -> usize {
        self.words.len()
    }

    pub fn dimension(&self) -> usize {
        self.dims
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_map.contains_key(word)
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.word_map.get(word).copied()
    }

    pub fn word(&self, idx: usize) -> &str {
        &self.words[idx]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn vector(&self, word: &str) -> std::result::Result<&[f64], NotFoundError> {
        self.index_of(word)
            .map(|idx| self.vector_at(idx))
            .ok_or_else(|| NotFoundError {
                word: word.to_string(),
                within: "vocabulary",
            })
    }

    pub(crate) fn vector_at(&self, idx: usize) -> &[f64] {
        &self.vectors[idx * self.dims..(idx + 1) * self.dims]
    }

    /// All vectors, row after row.
    pub(crate) fn flat(&self) -> &[f64] {
        &self.vectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn parse_err(text: &str) -> ParseError {
        match VectorTable::load(Cursor::new(text)) {
            Err(Error::Parse(e)) => e,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn loads_rows_in_order() {
        let table = VectorTable::load(Cursor::new("king 1 0\nqueen 0.9 0.1\n")).unwrap();
        assert_eq!(table.size(), 2);
        assert_eq!(table.dimension(), 2);
        assert_eq!(table.index_of("queen"), Some(1));
        assert_eq!(table.word(0), "king");
        assert_eq!(table.vector("queen").unwrap(), &[0.9, 0.1]);
        assert!(table.contains("king"));
        assert!(!table.contains("man"));
    }

    #[test]
    fn missing_word_is_not_found() {
        let table = VectorTable::load(Cursor::new("a 1 2\n")).unwrap();
        let err = table.vector("b").unwrap_err();
        assert_eq!(err.word, "b");
    }

    #[test]
    fn rejects_malformed_rows() {
        assert_eq!(
            parse_err("a 1 2\nb 1\n").kind,
            ParseErrorKind::DimensionMismatch {
                word: "b".into(),
                expected: 2,
                got: 1
            }
        );
        let e = parse_err("a 1 x\n");
        assert_eq!(e.line, 1);
        assert_eq!(e.kind, ParseErrorKind::BadComponent("x".into()));
        assert_eq!(parse_err("a 1\n\nb 2\n").line, 2);
        for bad in ["NaN", "inf", "-infinity"] {
            let e = parse_err(&format!("a 1 2\nb 1 {bad}\n"));
            assert_eq!(e.line, 2);
            assert_eq!(e.kind, ParseErrorKind::BadComponent(bad.into()));
        }
        assert_eq!(parse_err("a\n").kind, ParseErrorKind::ZeroDimensions);
        assert_eq!(parse_err("a 1\na 2\n").kind, ParseErrorKind::DuplicateWord("a".into()));
        assert_eq!(parse_err("").kind, ParseErrorKind::Empty);
    }

    #[test]
    fn normalizes_to_unit_length() {
        let table = VectorTable::load(Cursor::new("a 3 4\nz 0 0\n"))
            .unwrap()
            .into_normalized();
        let a = table.vector("a").unwrap();
        assert!((a[0] - 0.6).abs() < 1e-12);
        assert!((a[1] - 0.8).abs() < 1e-12);
        assert_eq!(table.vector("z").unwrap(), &[0.0, 0.0]);
    }
}
