//! hypscore 語彙コンパイラのメインエントリーポイント
//!
//! テキスト形式の語彙からバイナリ形式の語彙を構築するサブコマンドと、
//! 構築した語彙でトークンを引くサブコマンドを提供します。

mod build;
mod lookup;

use clap::Parser;
use thiserror::Error;

use crate::{build::BuildError, lookup::LookupError};

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// テキスト形式の語彙からバイナリ語彙を構築します
    Build(build::Args),

    /// 語彙でトークンや複合語を引きます
    ///
    /// 標準入力の各トークン（または各行を連結した複合語）が、単語・接頭辞・未登録の
    /// いずれであるかを出力します。
    Lookup(lookup::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum CompileError {
    /// 語彙ビルド中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
    /// 語彙検索中のエラー
    #[error(transparent)]
    LookupError(#[from] LookupError),
}

/// メイン関数
///
/// コマンドライン引数をパースし、指定されたサブコマンドを実行します。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Lookup(args) => Ok(lookup::run(args)?),
    }
}
