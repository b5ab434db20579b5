use crate::error::{ParseError, ParseErrorKind, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whether any row of a test file lists alternative answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerForm {
    Single,
    Multi,
}

/// One line of a test file: `head tail[/tail...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub head: String,
    pub tails: Vec<String>,
}

impl Row {
    /// Same head and the same set of tails, in any order.
    pub fn same_as(&self, other: &Row) -> bool {
        self.head == other.head && tail_set(&self.tails) == tail_set(&other.tails)
    }
}

fn tail_set(tails: &[String]) -> HashSet<&str> {
    tails.iter().map(String::as_str).collect()
}

/// A parsed analogy test file.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub form: AnswerForm,
    pub rows: Vec<Row>,
    universe: Vec<String>,
}

impl TestCase {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<TestCase> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        Self::parse(&path.display().to_string(), BufReader::new(file))
    }

    pub fn parse<R: BufRead>(name: &str, reader: R) -> Result<TestCase> {
        let mut rows = Vec::new();
        let mut form = AnswerForm::Single;

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let lineno = index + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let &[head, tail] = fields.as_slice() else {
                let kind = ParseErrorKind::FieldCount(fields.len());
                return Err(ParseError::new(lineno, kind).into());
            };

            if tail.contains('/') {
                form = AnswerForm::Multi;
            }
            let tails: Vec<String> = tail.split('/').map(str::to_owned).collect();
            if tails.iter().any(String::is_empty) {
                return Err(ParseError::new(lineno, ParseErrorKind::EmptyAlternative).into());
            }
            rows.push(Row {
                head: head.to_string(),
                tails,
            });
        }

        let universe = query_universe(&rows);
        Ok(TestCase {
            name: name.to_string(),
            form,
            rows,
            universe,
        })
    }

    /// Distinct words of the file in order of first appearance.
    pub fn query_universe(&self) -> &[String] {
        &self.universe
    }

    pub fn is_multi_answer(&self) -> bool {
        self.form == AnswerForm::Multi
    }
}

fn query_universe(rows: &[Row]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .flat_map(|r| std::iter::once(&r.head).chain(&r.tails))
        .filter(|w| seen.insert(*w))
        .cloned()
        .collect()
}
