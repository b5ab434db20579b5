use crate::discovery::TestGroup;
use crate::error::{NotFoundError, Result};
use crate::scorer::{AnalogyScorer, Method};
use crate::similarity::SimilarityMatrix;
use crate::test_case::{AnswerForm, Row, TestCase};
use crate::vector_table::VectorTable;
use rayon::prelude::*;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Run every row of `test_case` against every row, in row-major order.
///
/// For rows `(a, tails_a)` and `(b, tails_b)` the query is "a is to t as b is
/// to ?" for each `t` in `tails_a`; the pair counts as correct if any `t`
/// yields a word in `tails_b`. A row paired with an identical row (same head
/// and same set of tails) produces no result.
pub fn evaluate(
    test_case: &TestCase,
    scorer: &AnalogyScorer,
) -> std::result::Result<Vec<bool>, NotFoundError> {
    let n = test_case.rows.len();
    let mut results = Vec::with_capacity(n * n);

    for row_a in &test_case.rows {
        for row_b in &test_case.rows {
            if row_a.same_as(row_b) {
                continue;
            }
            let correct = match test_case.form {
                AnswerForm::Single => {
                    scorer.run(&row_a.head, &row_a.tails[0], &row_b.head)? == row_b.tails[0]
                }
                AnswerForm::Multi => any_tail_correct(scorer, row_a, row_b)?,
            };
            results.push(correct);
        }
    }
    Ok(results)
}

fn any_tail_correct(
    scorer: &AnalogyScorer,
    row_a: &Row,
    row_b: &Row,
) -> std::result::Result<bool, NotFoundError> {
    for t in &row_a.tails {
        let guess = scorer.run(&row_a.head, t, &row_b.head)?;
        if row_b.tails.iter().any(|w| w == guess) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Build the similarity matrix for one file's query universe and evaluate it.
pub fn evaluate_file(vocab: &VectorTable, test_case: &TestCase, method: Method) -> Result<Tally> {
    let sims = SimilarityMatrix::build(vocab, test_case.query_universe());
    let scorer = AnalogyScorer::new(vocab, sims, method);
    let results = evaluate(test_case, &scorer)?;
    Ok(Tally::from_results(&results))
}

/// Correct answers out of questions asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub total: usize,
}

impl Tally {
    pub fn new(correct: usize, total: usize) -> Self {
        debug_assert!(correct <= total);
        Tally { correct, total }
    }

    pub fn from_results(results: &[bool]) -> Self {
        Tally {
            correct: results.iter().filter(|&&r| r).count(),
            total: results.len(),
        }
    }

    /// `None` when nothing was asked.
    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64)
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            correct: self.correct + other.correct,
            total: self.total + other.total,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        *self = *self + other;
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub name: String,
    pub files: Vec<FileReport>,
    pub tally: Tally,
}

impl GroupReport {
    pub fn new(name: String, files: Vec<FileReport>) -> Self {
        let tally = files.iter().map(|f| f.tally).sum();
        GroupReport { name, files, tally }
    }

    /// Single-file groups are reported by their file line alone.
    pub fn shows_group_line(&self) -> bool {
        self.files.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub groups: Vec<GroupReport>,
    pub overall: Tally,
}

impl Summary {
    pub fn new(groups: Vec<GroupReport>) -> Self {
        let overall = groups.iter().map(|g| g.tally).sum();
        Summary { groups, overall }
    }
}

/// Parse and evaluate every file of every group. Files within a group run in
/// parallel; `on_file` is called as each finishes, in no particular order.
/// The returned summary keeps group and file order.
pub fn evaluate_groups<F>(
    vocab: &VectorTable,
    groups: &[TestGroup],
    method: Method,
    on_file: F,
) -> Result<Summary>
where
    F: Fn(&str, &FileReport) + Sync,
{
    let mut reports = Vec::with_capacity(groups.len());
    for group in groups {
        let files = group
            .files
            .par_iter()
            .map(|path| -> Result<FileReport> {
                let test_case = TestCase::from_file(path)?;
                let tally = evaluate_file(vocab, &test_case, method)?;
                let report = FileReport {
                    path: path.clone(),
                    tally,
                };
                on_file(&group.name, &report);
                Ok(report)
            })
            .collect::<Result<Vec<_>>>()?;
        reports.push(GroupReport::new(group.name.clone(), files));
    }
    Ok(Summary::new(reports))
}
