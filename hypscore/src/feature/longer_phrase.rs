//! より長いフレーズの翻訳確率を先読みする素性関数
//!
//! あるスパンの翻訳候補リストを使う前に、そのスパンを含むより広いスパンで
//! すでに探索された翻訳候補を調べ、その翻訳表スコアの最大値を狭いスパンの
//! 候補すべてに加えます。

use crate::errors::{HypscoreError, Result};
use crate::feature::{FeatureBase, FeatureFunction, FeatureParameters, StatelessFeatureFunction};
use crate::phrase::{InputPath, Phrase, Sentence, Span};
use crate::score::ScoreBreakdown;
use crate::search::{HypothesisView, TranslationOption, TranslationOptionCollection};

/// 参照する翻訳表
///
/// 翻訳候補のスコア内訳で、この名前のスコアベクトルを読みます。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhraseTableHandle {
    name: String,
    num_scores: usize,
}

impl PhraseTableHandle {
    pub fn new<S: Into<String>>(name: S, num_scores: usize) -> Self {
        Self {
            name: name.into(),
            num_scores,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_scores(&self) -> usize {
        self.num_scores
    }
}

/// [`LongerPhrase`] の設定
#[derive(Clone, Debug, PartialEq)]
pub struct LongerPhraseConfig {
    pub base: FeatureBase,
    /// 調べるスパンの最大幅
    pub max_phrase_length: usize,
    /// 翻訳表の名前。指定するとハンドルの名前を上書きします。
    pub phrase_table: Option<String>,
}

impl Default for LongerPhraseConfig {
    fn default() -> Self {
        Self {
            base: FeatureBase::new(LongerPhrase::TYPE_NAME),
            max_phrase_length: 20,
            phrase_table: None,
        }
    }
}

impl FeatureParameters for LongerPhraseConfig {
    fn base(&self) -> &FeatureBase {
        &self.base
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "max-phrase-length" => self.max_phrase_length = value.parse()?,
            "phrase-table" => self.phrase_table = Some(value.to_string()),
            _ => return self.base.set_parameter(key, value),
        }
        Ok(())
    }
}

/// より広いスパンの翻訳候補を先読みする素性関数
pub struct LongerPhrase {
    config: LongerPhraseConfig,
    phrase_table: PhraseTableHandle,
}

impl LongerPhrase {
    /// 設定行での型名
    pub const TYPE_NAME: &'static str = "LongerPhrase";

    /// 翻訳表のスコアベクトル中の、原言語を条件とした目的言語の翻訳確率の位置
    pub const TARGET_GIVEN_SOURCE: usize = 2;

    /// 素性関数を作成します。
    ///
    /// # 引数
    ///
    /// * `config` - 設定
    /// * `phrase_table` - スコアを読む翻訳表
    ///
    /// # エラー
    ///
    /// 翻訳表のスコア数が [`Self::TARGET_GIVEN_SOURCE`] を含まない場合にエラーを返します。
    pub fn new(config: LongerPhraseConfig, mut phrase_table: PhraseTableHandle) -> Result<Self> {
        if let Some(name) = &config.phrase_table {
            phrase_table.name.clone_from(name);
        }
        if phrase_table.num_scores <= Self::TARGET_GIVEN_SOURCE {
            return Err(HypscoreError::invalid_argument(
                "phrase-table",
                format!(
                    "{}: {} has {} scores, but index {} is read",
                    config.base.name,
                    phrase_table.name,
                    phrase_table.num_scores,
                    Self::TARGET_GIVEN_SOURCE
                ),
            ));
        }
        Ok(Self {
            config,
            phrase_table,
        })
    }

    pub fn config(&self) -> &LongerPhraseConfig {
        &self.config
    }

    pub fn phrase_table(&self) -> &PhraseTableHandle {
        &self.phrase_table
    }

    /// 翻訳候補から原言語を条件とした目的言語の翻訳確率を読みます。
    fn target_given_source(&self, option: &TranslationOption) -> Result<f32> {
        option
            .scores()
            .scores_for_producer(&self.phrase_table.name)
            .and_then(|scores| scores.get(Self::TARGET_GIVEN_SOURCE))
            .copied()
            .ok_or_else(|| {
                HypscoreError::invalid_state(
                    format!("{}: missing phrase table score", self.name()),
                    format!(
                        "option {:?} for span {:?} has no score {} of {}",
                        option.target().to_string(),
                        option.span(),
                        Self::TARGET_GIVEN_SOURCE,
                        self.phrase_table.name
                    ),
                )
            })
    }

    /// `[start, start + width - 1]` を含むより広いスパンの翻訳候補のうち、
    /// 最大の翻訳確率を返します。
    ///
    /// 幅は `width + 1` から `max-phrase-length` まで、開始位置は0から `start` までを調べ、
    /// 入力文からはみ出すスパンは調べません。該当する候補がなければ負の無限大を返します。
    ///
    /// # エラー
    ///
    /// 翻訳候補に翻訳表のスコアがない場合にエラーを返します。
    pub fn max_over_wider_spans(
        &self,
        input_size: usize,
        start: usize,
        width: usize,
        collection: &dyn TranslationOptionCollection,
    ) -> Result<f32> {
        let mut best = f32::NEG_INFINITY;
        for w in width + 1..=input_size {
            if w > self.config.max_phrase_length {
                break;
            }
            for s in 0..=start {
                let end = s + w - 1;
                if end >= input_size {
                    break;
                }
                for option in collection.options(Span::new(s, end)) {
                    best = best.max(self.target_given_source(option)?);
                }
            }
        }
        Ok(best)
    }
}

impl FeatureFunction for LongerPhrase {
    fn name(&self) -> &str {
        &self.config.base.name
    }

    fn num_scores(&self) -> usize {
        1
    }

    fn evaluate_in_isolation(
        &self,
        _source: &Phrase,
        _target: &Phrase,
        _scores: &mut ScoreBreakdown,
        _estimated_future_scores: &mut ScoreBreakdown,
    ) {
    }

    fn evaluate_with_source_context(
        &self,
        _input: &Sentence,
        _input_path: &InputPath,
        _target: &Phrase,
        _scores: &mut ScoreBreakdown,
        _estimated_future_scores: Option<&mut ScoreBreakdown>,
    ) {
    }

    fn evaluate_translation_option_list_with_source_context(
        &self,
        _input: &Sentence,
        _options: &mut [TranslationOption],
    ) {
    }

    fn evaluate_given_all_other_trans_opts(
        &self,
        input: &Sentence,
        span: Span,
        collection: &dyn TranslationOptionCollection,
        options: &mut [TranslationOption],
    ) -> Result<()> {
        let score = self.max_over_wider_spans(input.len(), span.start(), span.width(), collection)?;
        if self.config.base.verbose >= 1 {
            log::debug!("{}: {:?} -> {}", self.name(), span, score);
        }
        for option in options {
            option.scores_mut().plus_equals_single(self.name(), score);
        }
        Ok(())
    }
}

impl StatelessFeatureFunction for LongerPhrase {
    fn evaluate_when_applied(&self, _hypo: &dyn HypothesisView, _scores: &mut ScoreBreakdown) {}
}
