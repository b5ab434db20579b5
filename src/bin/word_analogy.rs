use analogy_eval::{AnalogyScorer, Method, SimilarityMatrix, VectorTable};
use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive word analogies: A is to A' as B is to ?", long_about = None)]
struct Args {
    /// Word vector file
    #[arg(long, default_value = "vectors.txt")]
    vectors: PathBuf,

    /// Scoring rule: add or mul
    #[arg(short, long, default_value_t = Method::Add)]
    method: Method,

    /// Rescale vectors to unit length after loading
    #[arg(long)]
    normalize: bool,

    /// Number of candidates to list
    #[arg(long, default_value_t = 30)]
    top_n: usize,
}

/// Next trimmed line, or `None` at end of input.
fn get_input<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut s = String::new();
    if reader.read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim().to_string()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut word_vectors = VectorTable::from_file(&args.vectors)
        .with_context(|| format!("loading vectors from {}", args.vectors.display()))?;
    if args.normalize {
        word_vectors = word_vectors.into_normalized();
    }

    let mut stdin = io::stdin().lock();
    loop {
        println!("\nWord analogy - KING is to QUEEN as MAN is to ?");
        print!("Enter 3 words: ");
        io::stdout().flush()?;
        let Some(s) = get_input(&mut stdin)? else {
            println!();
            break;
        };
        if s == "EXIT" {
            break;
        }
        let words: Vec<String> = s.split_whitespace().map(str::to_owned).collect();
        if words.len() != 3 {
            println!("Expected exactly 3 words, but got {}. Try again.", words.len());
            continue;
        }

        let oov_words: Vec<&String> = words
            .iter()
            .filter(|w| !word_vectors.contains(w))
            .collect();
        if !oov_words.is_empty() {
            for word in &oov_words {
                println!("'{word}' is out of vocabulary");
            }
            continue;
        }

        let sims = SimilarityMatrix::build(&word_vectors, &words);
        let scorer = AnalogyScorer::new(&word_vectors, sims, args.method);
        let topn = scorer.rank(&words[0], &words[1], &words[2], args.top_n)?;
        if topn.is_empty() {
            println!("No analogies");
            continue;
        }

        for (i, (idx, score)) in topn.iter().enumerate() {
            println!("{:3}: {:>8.5} {}", i + 1, score, word_vectors.word(*idx));
        }
    }

    Ok(())
}
