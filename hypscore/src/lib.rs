//! # hypscore
//!
//! hypscoreは、統計的機械翻訳デコーダの仮説スコアリングを行う素性関数の実装です。
//!
//! ## 概要
//!
//! ビーム探索で部分翻訳（仮説）が翻訳候補によって拡張されるたびに、
//! 素性関数はスコアの増分を計算します。状態を持つ素性関数は仮説の連鎖に沿って
//! 状態を受け渡し、探索ドライバは状態が等しい仮説を再結合します。
//!
//! ## 主な機能
//!
//! - **素性関数の共通インターフェース**: 状態なし／状態付きの2種類の評価点の集合
//! - **JoinScore**: 連結マーカー付きの形態素から複合語を組み立て、語彙のトライで検証する
//! - **LongerPhrase**: より広いスパンで探索済みの翻訳候補のスコアを狭いスパンに加える
//! - **語彙のバイナリ形式**: rkyvによるトライの書き出しと読み込み
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use hypscore::feature::{JoinScore, JoinScoreConfig, FeatureParameters, StatefulFeatureFunction};
//! use hypscore::phrase::{Phrase, Sentence};
//! use hypscore::search::TargetExtension;
//! use hypscore::{ScoreBreakdown, Vocabulary};
//!
//! let vocab = Vocabulary::from_reader("unlocked".as_bytes())?;
//!
//! let mut config = JoinScoreConfig::default();
//! config.read_parameters([("tuneable", "false")])?;
//! let feature = JoinScore::new(config, Arc::new(vocab));
//!
//! // 複合語が2つの拡張にまたがる
//! let state = feature.empty_state(&Sentence::default());
//! let first = TargetExtension::new(Phrase::from_whitespace("un+"), false);
//! let second = TargetExtension::new(Phrase::from_whitespace("+lock+ +ed"), true);
//!
//! let mut scores = ScoreBreakdown::new();
//! let state = feature.evaluate_when_applied(&first, &state, &mut scores)?;
//! assert_eq!(state.morphemes().len(), 1);
//! let state = feature.evaluate_when_applied(&second, &state, &mut scores)?;
//! assert!(state.morphemes().is_empty());
//!
//! let inf = f32::NEG_INFINITY;
//! assert_eq!(
//!     scores.scores_for_producer("JoinScore"),
//!     Some(&[inf, inf, 0.0, 0.0][..])
//! );
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

/// エラー型の定義
pub mod errors;

/// 素性関数の実装
pub mod feature;

/// 語・語列・スパン
pub mod phrase;

/// スコア内訳
pub mod score;

/// 探索ドライバとの境界
pub mod search;

/// 内部ユーティリティ関数
pub mod utils;

/// 語彙とトライ
pub mod vocabulary;


// Re-exports
pub use feature::{Feature, FeatureState};
pub use score::ScoreBreakdown;
pub use vocabulary::Vocabulary;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
