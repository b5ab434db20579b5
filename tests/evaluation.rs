use analogy_eval::{
    AnalogyScorer, Error, Method, SimilarityMatrix, Tally, TestCase, VectorTable, discover,
    evaluate, evaluate_groups,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::fs;
use std::io::Cursor;
use std::sync::Mutex;

const KING_QUEEN: &str = "king 1 0\nqueen 0.9 0.1\nman 0.8 0.2\nwoman 0.1 0.9\n";

fn random_vocab(rng: &mut StdRng, size: usize, dims: usize) -> (VectorTable, Vec<String>) {
    let mut text = String::new();
    let mut words = Vec::new();
    for i in 0..size {
        let word = format!("w{i}");
        write!(text, "{word}").unwrap();
        for _ in 0..dims {
            write!(text, " {}", rng.random_range(-1.0..1.0f64)).unwrap();
        }
        text.push('\n');
        words.push(word);
    }
    let vocab = VectorTable::load(Cursor::new(text)).unwrap().into_normalized();
    (vocab, words)
}

#[test]
fn column_matches_dot_products() {
    let mut rng = StdRng::seed_from_u64(11);
    let (vocab, words) = random_vocab(&mut rng, 20, 6);
    let query = vec![words[4].clone(), "unknown".to_string()];
    let sims = SimilarityMatrix::build(&vocab, &query);

    let q = vocab.vector(&words[4]).unwrap();
    for (v, sim) in sims.column(&words[4]).unwrap().iter().enumerate() {
        let row = vocab.vector(&words[v]).unwrap();
        let expected: f64 = row.iter().zip(q).map(|(x, y)| x * y).sum();
        assert!((sim - expected).abs() < 1e-12);
    }
    assert!(sims.column("unknown").unwrap().iter().all(|&s| s == 0.0));
}

#[test]
fn never_answers_with_an_input_word() {
    let mut rng = StdRng::seed_from_u64(42);
    let (vocab, words) = random_vocab(&mut rng, 40, 5);
    let sims = SimilarityMatrix::build(&vocab, &words);

    for method in [Method::Add, Method::Mul] {
        let scorer = AnalogyScorer::new(&vocab, sims.clone(), method);
        for _ in 0..50 {
            let a = &words[rng.random_range(0..words.len())];
            let a_ = &words[rng.random_range(0..words.len())];
            let b = &words[rng.random_range(0..words.len())];
            let guess = scorer.run(a, a_, b).unwrap();
            assert!(
                ![a, a_, b].contains(&&guess.to_string()),
                "{method}: {a} {a_} {b} -> {guess}"
            );
            assert_eq!(scorer.run(a, a_, b).unwrap(), guess);
        }
    }
}

#[test]
fn accuracy_stays_within_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    let (vocab, words) = random_vocab(&mut rng, 30, 4);
    let mut text = String::new();
    for pair in words.chunks_exact(3).take(6) {
        writeln!(text, "{} {}/{}", pair[0], pair[1], pair[2]).unwrap();
    }
    let tc = TestCase::parse("random", Cursor::new(text)).unwrap();

    for method in [Method::Add, Method::Mul] {
        let sims = SimilarityMatrix::build(&vocab, tc.query_universe());
        let scorer = AnalogyScorer::new(&vocab, sims, method);
        let tally = Tally::from_results(&evaluate(&tc, &scorer).unwrap());
        assert_eq!(tally.total, 30);
        assert!(tally.correct <= tally.total);
    }
}

#[test]
fn groups_files_and_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let vectors = dir.path().join("vectors.txt");
    fs::write(&vectors, KING_QUEEN).unwrap();

    let sem = dir.path().join("sem");
    fs::create_dir(&sem).unwrap();
    fs::write(sem.join("b.txt"), "king queen\n").unwrap();
    fs::write(sem.join("a.txt"), "king queen\nman woman\n").unwrap();
    let solo = dir.path().join("solo.txt");
    fs::write(&solo, "queen king\nwoman man\n").unwrap();

    let args = vec![sem.display().to_string(), format!("extra={}", solo.display())];
    let groups = discover(&args[..]).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].files, vec![sem.join("a.txt"), sem.join("b.txt")]);
    assert_eq!(groups[1].name, "extra");

    let vocab = VectorTable::from_file(&vectors).unwrap();
    let seen = Mutex::new(Vec::new());
    let summary = evaluate_groups(&vocab, &groups, Method::Add, |group, report| {
        seen.lock().unwrap().push((group.to_string(), report.path.clone()));
    })
    .unwrap();

    assert_eq!(seen.into_inner().unwrap().len(), 3);
    let sem_report = &summary.groups[0];
    assert_eq!(sem_report.files[0].tally, Tally::new(2, 2));
    assert_eq!(sem_report.files[1].tally, Tally::new(0, 0));
    assert_eq!(sem_report.tally, Tally::new(2, 2));
    assert!(sem_report.shows_group_line());
    assert!(!summary.groups[1].shows_group_line());
    assert_eq!(summary.groups[1].tally, Tally::new(2, 2));
    assert_eq!(summary.overall, Tally::new(4, 4));
}

#[test]
fn files_in_the_same_directory_share_a_group() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "x y\n").unwrap();
    fs::write(&b, "x y\n").unwrap();

    let groups = discover(&[b.display().to_string(), a.display().to_string()]).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, dir.path().display().to_string());
    assert_eq!(groups[0].files, vec![b, a]);
}

#[test]
fn malformed_test_file_aborts_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.txt");
    fs::write(&bad, "king queen\nman\n").unwrap();

    let vocab = VectorTable::load(Cursor::new(KING_QUEEN)).unwrap();
    let groups = discover(&[bad.display().to_string()]).unwrap();
    let err = evaluate_groups(&vocab, &groups, Method::Mul, |_, _| {}).unwrap_err();
    match err {
        Error::Parse(e) => assert_eq!(e.line, 2),
        other => panic!("expected parse error, got {other:?}"),
    }
}
