//! 語彙のビルドモジュール
//!
//! テキスト形式の語彙ファイル（空白区切りのトークン列）からトライを構築し、
//! バイナリ形式で書き出します。

use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;

use hypscore::errors::HypscoreError;
use hypscore::Vocabulary;

use clap::Parser;

/// ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "build", about = "A program to build the binary vocabulary.")]
pub struct Args {
    /// Vocabulary file in text format. Every whitespace-separated token is a word.
    #[clap(short = 'i', long)]
    vocab_in: PathBuf,

    /// File to which the binary vocabulary is output.
    #[clap(short = 'o', long)]
    vocab_out: PathBuf,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 語彙構築エラー
    #[error("Vocabulary building failed: {0}")]
    Hypscore(#[from] HypscoreError),
}

/// ビルドコマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きや語彙の構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    println!("Compiling the vocabulary...");
    let vocab = build_vocabulary(File::open(&args.vocab_in)?)?;
    log::info!(
        "{}: {} words, {} trie nodes",
        args.vocab_in.display(),
        vocab.num_words(),
        vocab.num_nodes()
    );

    println!("Writing the binary vocabulary...");
    let file = File::create(&args.vocab_out)?;
    vocab.write(BufWriter::new(file))?;

    println!(
        "Successfully built the vocabulary to {}",
        args.vocab_out.display()
    );
    Ok(())
}

/// テキスト形式の語彙からトライを構築する
///
/// CLIに依存しないコアのビルドロジックです。
pub fn build_vocabulary<R: Read>(rdr: R) -> Result<Vocabulary, BuildError> {
    Ok(Vocabulary::from_reader(rdr)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_run() {
        let dir = tempdir().unwrap();
        let vocab_in = dir.path().join("vocab.txt");
        let vocab_out = dir.path().join("vocab.bin");
        fs::write(&vocab_in, "haus haustür\ntür\n").unwrap();

        run(Args {
            vocab_in,
            vocab_out: vocab_out.clone(),
        })
        .unwrap();

        let vocab = Vocabulary::from_path(&vocab_out).unwrap();
        assert_eq!(vocab.num_words(), 3);
        assert!(vocab.contains_word("haustür"));
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempdir().unwrap();
        let r = run(Args {
            vocab_in: dir.path().join("missing.txt"),
            vocab_out: dir.path().join("vocab.bin"),
        });
        assert!(matches!(r, Err(BuildError::Io(_))));
    }
}
