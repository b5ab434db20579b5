//! Word-analogy accuracy for distributional word vectors, scored with the
//! additive (3CosAdd) or multiplicative (3CosMul) offset method.

pub mod discovery;
pub mod error;
pub mod evaluator;
pub mod scorer;
pub mod similarity;
pub mod test_case;
pub mod vector_table;

pub use discovery::{TestGroup, discover};
pub use error::{Error, NotFoundError, ParseError, ParseErrorKind, Result};
pub use evaluator::{
    FileReport, GroupReport, Summary, Tally, evaluate, evaluate_file, evaluate_groups,
};
pub use scorer::{Additive, AnalogyScorer, Combine, Method, Multiplicative};
pub use similarity::SimilarityMatrix;
pub use test_case::{AnswerForm, Row, TestCase};
pub use vector_table::VectorTable;
