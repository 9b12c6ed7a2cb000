//! 探索ドライバとの境界
//!
//! ビーム探索そのものはこのクレートの外にあります。
//! 素性関数は、ここで定義するビューとコレクションを通じてのみ探索の状態を参照します。

use hashbrown::HashMap;

use crate::phrase::{Phrase, Span};
use crate::score::ScoreBreakdown;

/// 素性関数から見た仮説（探索ノード）
pub trait HypothesisView {
    /// 今回の拡張で追加された目的言語側の語列
    fn current_target_phrase(&self) -> &Phrase;

    /// この拡張で入力文全体が翻訳済みになったかどうか
    fn is_source_completed(&self) -> bool;
}

/// 目的言語側の語列だけを持つ仮説の拡張
///
/// 探索ドライバを持たない呼び出し元（コマンドラインツールやテスト）で使います。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TargetExtension {
    target: Phrase,
    source_completed: bool,
}

impl TargetExtension {
    pub fn new(target: Phrase, source_completed: bool) -> Self {
        Self {
            target,
            source_completed,
        }
    }
}

impl HypothesisView for TargetExtension {
    fn current_target_phrase(&self) -> &Phrase {
        &self.target
    }

    fn is_source_completed(&self) -> bool {
        self.source_completed
    }
}

/// 入力スパンに対する翻訳候補
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationOption {
    span: Span,
    target: Phrase,
    scores: ScoreBreakdown,
}

impl TranslationOption {
    pub fn new(span: Span, target: Phrase) -> Self {
        Self {
            span,
            target,
            scores: ScoreBreakdown::new(),
        }
    }

    /// スコアを指定して作成します。
    pub fn with_scores(span: Span, target: Phrase, scores: ScoreBreakdown) -> Self {
        Self {
            span,
            target,
            scores,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn target(&self) -> &Phrase {
        &self.target
    }

    pub fn scores(&self) -> &ScoreBreakdown {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBreakdown {
        &mut self.scores
    }
}

/// スパンごとに計算済みの翻訳候補を返すコレクション
pub trait TranslationOptionCollection {
    /// `span` の翻訳候補。まだ探索されていないスパンでは空を返します。
    fn options(&self, span: Span) -> &[TranslationOption];
}

impl TranslationOptionCollection for HashMap<Span, Vec<TranslationOption>> {
    fn options(&self, span: Span) -> &[TranslationOption] {
        self.get(&span).map_or(&[], Vec::as_slice)
    }
}
