//! 語彙の検索モジュール
//!
//! 標準入力のトークンを語彙で引き、単語・接頭辞・未登録のいずれかを出力します。
//! `--join` を指定すると、各行を連結マーカー付きの形態素列とみなし、
//! マーカーを取り除いて連結した複合語を引きます。

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use hypscore::errors::HypscoreError;
use hypscore::feature::join_score::{BufferBound, CompoundBuffer};
use hypscore::phrase::Phrase;
use hypscore::Vocabulary;

use clap::Parser;

/// 検索コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "lookup", about = "Looks up tokens in a vocabulary.")]
pub struct Args {
    /// Vocabulary file, either in text or binary format.
    #[clap(short = 'i', long)]
    vocab_in: PathBuf,

    /// Joins the morphemes of each line into a compound before the lookup.
    #[clap(short = 'j', long)]
    join: bool,
}

/// 検索処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 語彙の読み込みエラー
    #[error("Vocabulary loading failed: {0}")]
    Hypscore(#[from] HypscoreError),
}

/// 検索結果
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Coverage {
    Word,
    Prefix,
    Missing,
}

impl Coverage {
    fn of(vocab: &Vocabulary, token: &str) -> Self {
        match vocab.find(token) {
            Some(node) if vocab.is_word(node) => Self::Word,
            Some(_) => Self::Prefix,
            None => Self::Missing,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Prefix => "prefix",
            Self::Missing => "missing",
        }
    }
}

/// 1行分の検索対象を返す
fn targets(line: &str, join: bool) -> Result<Vec<String>, LookupError> {
    if !join {
        return Ok(line.split_whitespace().map(str::to_string).collect());
    }
    let mut buffer = CompoundBuffer::new();
    for w in &Phrase::from_whitespace(line) {
        buffer.push(w.clone(), BufferBound::Unbounded)?;
    }
    Ok(vec![buffer.joined_surface()])
}

/// 検索コマンドを実行する
///
/// # エラー
///
/// 語彙の読み込みや入出力に失敗した場合、`LookupError`を返します。
pub fn run(args: Args) -> Result<(), LookupError> {
    eprintln!("Loading the vocabulary...");
    let vocab = Vocabulary::from_path(&args.vocab_in)?;
    eprintln!("Ready to look up");

    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());
    let mut num_missing = 0;
    let mut num_tokens = 0;
    for line in io::stdin().lock().lines() {
        let line = line?;
        for token in targets(&line, args.join)? {
            let coverage = Coverage::of(&vocab, &token);
            if coverage == Coverage::Missing {
                num_missing += 1;
            }
            num_tokens += 1;
            writeln!(out, "{}\t{}", token, coverage.as_str())?;
        }
    }
    out.flush()?;
    log::info!("{} of {} tokens are missing", num_missing, num_tokens);
    Ok(())
}
