//! 素性関数の共通インターフェース
//!
//! 探索ドライバは、仮説を翻訳候補で拡張するたびに各素性関数を呼び出し、
//! 返されたスコアを仮説のスコア内訳に加算します。状態を持つ素性関数は
//! 直前の仮説の状態を受け取り、新しい状態を返します。ドライバは状態同士を
//! 比較し、以降のスコア計算で区別できない探索ノードを統合（再結合）します。
//!
//! # 構成
//!
//! - [`FeatureFunction`]: すべての素性関数が実装する評価点
//! - [`StatelessFeatureFunction`]: 状態を持たない素性関数
//! - [`StatefulFeatureFunction`]: 仮説の連鎖に沿って状態を受け渡す素性関数
//! - [`Feature`]: ドライバが扱う具体的な素性関数の列挙型
//! - [`FeatureState`]: 再結合のキーとして使える、全順序付きの状態
//!
//! 各実装はすべての評価点を明示的に書きます。使わない評価点は空の本体を持ちます。
pub mod join_score;
pub mod longer_phrase;

use std::fmt::Debug;

use crate::errors::{HypscoreError, Result};
use crate::phrase::{InputPath, Phrase, Sentence, Span};
use crate::score::ScoreBreakdown;
use crate::search::{HypothesisView, TranslationOption, TranslationOptionCollection};
use crate::utils::parse_bool;

pub use crate::feature::join_score::{JoinScore, JoinScoreConfig, JoinScoreState};
pub use crate::feature::longer_phrase::{LongerPhrase, LongerPhraseConfig, PhraseTableHandle};

/// すべての素性関数に共通する設定
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureBase {
    /// スコア内訳のキーとして使う名前
    pub name: String,
    /// 重みが調整対象かどうか
    pub tuneable: bool,
    /// ログの詳細度
    pub verbose: u32,
}

impl FeatureBase {
    /// 素性の型名を既定の名前とする設定を作成します。
    pub fn new(type_name: &str) -> Self {
        Self {
            name: type_name.to_string(),
            tuneable: true,
            verbose: 0,
        }
    }

    /// 共通のキーを設定します。
    ///
    /// # エラー
    ///
    /// 未知のキーは黙って無視せず、エラーを返します。
    pub fn set_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "name" => self.name = value.to_string(),
            "tuneable" => self.tuneable = parse_bool(key, value)?,
            "verbose" => self.verbose = value.parse()?,
            _ => {
                return Err(HypscoreError::invalid_argument(
                    "key",
                    format!("{}: unknown parameter {key:?}", self.name),
                ))
            }
        }
        Ok(())
    }
}

/// 文字列のキーと値で設定できる素性関数の設定
pub trait FeatureParameters {
    /// 共通の設定
    fn base(&self) -> &FeatureBase;

    /// 1つのキーを設定します。固有のキーでなければ [`FeatureBase::set_parameter`] に委ねます。
    fn set_parameter(&mut self, key: &str, value: &str) -> Result<()>;

    /// `key=value` の列をすべて設定します。
    fn read_parameters<'a, I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in args {
            log::debug!("{}: {}={}", self.base().name, key, value);
            self.set_parameter(key, value)?;
        }
        Ok(())
    }
}

/// 素性関数の設定行 `TypeName key=value key=value ...` を分解します。
///
/// # 戻り値
///
/// 型名と `(キー, 値)` の列
///
/// # エラー
///
/// 行が空の場合、または `=` を含まない引数がある場合にエラーを返します。
pub fn parse_feature_line(line: &str) -> Result<(&str, Vec<(&str, &str)>)> {
    let mut toks = line.split_whitespace();
    let type_name = toks
        .next()
        .ok_or_else(|| HypscoreError::invalid_argument("line", "empty feature line"))?;
    let mut args = vec![];
    for tok in toks {
        let (key, value) = tok.split_once('=').ok_or_else(|| {
            HypscoreError::invalid_argument(
                "line",
                format!("{type_name}: expected key=value, got {tok:?}"),
            )
        })?;
        args.push((key, value));
    }
    Ok((type_name, args))
}

/// すべての素性関数が実装する評価点
pub trait FeatureFunction {
    /// スコア内訳のキー
    fn name(&self) -> &str;

    /// 出力するスコアの数
    fn num_scores(&self) -> usize;

    /// 原言語句と目的言語句だけを使ってスコアを計算します。
    fn evaluate_in_isolation(
        &self,
        source: &Phrase,
        target: &Phrase,
        scores: &mut ScoreBreakdown,
        estimated_future_scores: &mut ScoreBreakdown,
    );

    /// 入力文の文脈を加えてスコアを計算します。
    fn evaluate_with_source_context(
        &self,
        input: &Sentence,
        input_path: &InputPath,
        target: &Phrase,
        scores: &mut ScoreBreakdown,
        estimated_future_scores: Option<&mut ScoreBreakdown>,
    );

    /// 1つのスパンの翻訳候補リスト全体に対して、入力文の文脈でスコアを計算します。
    fn evaluate_translation_option_list_with_source_context(
        &self,
        input: &Sentence,
        options: &mut [TranslationOption],
    );

    /// 他のスパンで計算済みの翻訳候補を参照して、`span` の候補リストにスコアを加えます。
    ///
    /// ドライバは候補リストごとに一度だけ、仮説の拡張に使う前に呼び出します。
    fn evaluate_given_all_other_trans_opts(
        &self,
        input: &Sentence,
        span: Span,
        collection: &dyn TranslationOptionCollection,
        options: &mut [TranslationOption],
    ) -> Result<()>;
}

/// 状態を持たない素性関数
pub trait StatelessFeatureFunction: FeatureFunction {
    /// 仮説の文脈でスコアを計算します。
    fn evaluate_when_applied(&self, hypo: &dyn HypothesisView, scores: &mut ScoreBreakdown);
}

/// 仮説の連鎖に沿って状態を受け渡す素性関数
pub trait StatefulFeatureFunction: FeatureFunction {
    /// 探索ノードごとの状態。等しい状態を持つノードは再結合されます。
    type State: Clone + Debug + Ord;

    /// 空の仮説（文頭）の状態
    fn empty_state(&self, input: &Sentence) -> Self::State;

    /// 直前の状態と仮説の文脈からスコアを計算し、新しい状態を返します。
    ///
    /// `prev_state` は変更されません。
    ///
    /// # エラー
    ///
    /// 状態の不変条件が破れている場合にエラーを返します。
    /// 呼び出し元は現在の入力文のデコードを中断するべきです。
    fn evaluate_when_applied(
        &self,
        hypo: &dyn HypothesisView,
        prev_state: &Self::State,
        scores: &mut ScoreBreakdown,
    ) -> Result<Self::State>;
}

/// 全順序付きの素性状態
///
/// 探索ノードが保持する状態の組（`Vec<Option<FeatureState>>` など）は
/// そのまま再結合のキーとして比較できます。
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum FeatureState {
    JoinScore(JoinScoreState),
}

/// ドライバが扱う素性関数
pub enum Feature {
    JoinScore(JoinScore),
    LongerPhrase(LongerPhrase),
}

impl Feature {
    /// 設定行から素性関数を構築します。
    ///
    /// `LongerPhrase` は参照する翻訳表を必要とするため、`phrase_table` を渡す必要があります。
    ///
    /// # エラー
    ///
    /// 型名が未知の場合、設定が不正な場合、語彙の読み込みに失敗した場合にエラーを返します。
    pub fn from_line(line: &str, phrase_table: Option<&PhraseTableHandle>) -> Result<Self> {
        let (type_name, args) = parse_feature_line(line)?;
        match type_name {
            JoinScore::TYPE_NAME => {
                let mut config = JoinScoreConfig::default();
                config.read_parameters(args)?;
                Ok(Self::JoinScore(JoinScore::load(config)?))
            }
            LongerPhrase::TYPE_NAME => {
                let phrase_table = phrase_table.ok_or_else(|| {
                    HypscoreError::invalid_argument(
                        "phrase_table",
                        "LongerPhrase requires a phrase table",
                    )
                })?;
                let mut config = LongerPhraseConfig::default();
                config.read_parameters(args)?;
                Ok(Self::LongerPhrase(LongerPhrase::new(
                    config,
                    phrase_table.clone(),
                )?))
            }
            _ => Err(HypscoreError::invalid_argument(
                "line",
                format!("unknown feature function {type_name:?}"),
            )),
        }
    }

    /// 状態を持つ素性関数かどうか
    pub fn is_stateful(&self) -> bool {
        match self {
            Self::JoinScore(_) => true,
            Self::LongerPhrase(_) => false,
        }
    }

    fn inner(&self) -> &dyn FeatureFunction {
        match self {
            Self::JoinScore(f) => f,
            Self::LongerPhrase(f) => f,
        }
    }

    pub fn name(&self) -> &str {
        self.inner().name()
    }

    pub fn num_scores(&self) -> usize {
        self.inner().num_scores()
    }

    pub fn evaluate_in_isolation(
        &self,
        source: &Phrase,
        target: &Phrase,
        scores: &mut ScoreBreakdown,
        estimated_future_scores: &mut ScoreBreakdown,
    ) {
        self.inner()
            .evaluate_in_isolation(source, target, scores, estimated_future_scores);
    }

    pub fn evaluate_with_source_context(
        &self,
        input: &Sentence,
        input_path: &InputPath,
        target: &Phrase,
        scores: &mut ScoreBreakdown,
        estimated_future_scores: Option<&mut ScoreBreakdown>,
    ) {
        self.inner().evaluate_with_source_context(
            input,
            input_path,
            target,
            scores,
            estimated_future_scores,
        );
    }

    pub fn evaluate_translation_option_list_with_source_context(
        &self,
        input: &Sentence,
        options: &mut [TranslationOption],
    ) {
        self.inner()
            .evaluate_translation_option_list_with_source_context(input, options);
    }

    pub fn evaluate_given_all_other_trans_opts(
        &self,
        input: &Sentence,
        span: Span,
        collection: &dyn TranslationOptionCollection,
        options: &mut [TranslationOption],
    ) -> Result<()> {
        self.inner()
            .evaluate_given_all_other_trans_opts(input, span, collection, options)
    }

    /// 文頭の状態。状態を持たない素性関数では `None` です。
    pub fn empty_state(&self, input: &Sentence) -> Option<FeatureState> {
        match self {
            Self::JoinScore(f) => Some(FeatureState::JoinScore(f.empty_state(input))),
            Self::LongerPhrase(_) => None,
        }
    }

    /// 仮説の文脈でスコアを計算します。
    ///
    /// 状態を持つ素性関数には対応する直前の状態を渡す必要があり、新しい状態が返されます。
    ///
    /// # エラー
    ///
    /// 状態を持つ素性関数に直前の状態が渡されなかった場合、
    /// および状態の不変条件が破れている場合にエラーを返します。
    pub fn evaluate_when_applied(
        &self,
        hypo: &dyn HypothesisView,
        prev_state: Option<&FeatureState>,
        scores: &mut ScoreBreakdown,
    ) -> Result<Option<FeatureState>> {
        match (self, prev_state) {
            (Self::JoinScore(f), Some(FeatureState::JoinScore(prev))) => Ok(Some(
                FeatureState::JoinScore(f.evaluate_when_applied(hypo, prev, scores)?),
            )),
            (Self::JoinScore(f), None) => Err(HypscoreError::invalid_state(
                format!("{}: missing the previous state", f.name()),
                "a stateful feature function was applied without a state",
            )),
            (Self::LongerPhrase(f), _) => {
                StatelessFeatureFunction::evaluate_when_applied(f, hypo, scores);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_line() {
        let (name, args) =
            parse_feature_line("JoinScore name=JS0  vocab-path=/tmp/v.txt").unwrap();
        assert_eq!(name, "JoinScore");
        assert_eq!(args, vec![("name", "JS0"), ("vocab-path", "/tmp/v.txt")]);
    }

    #[test]
    fn test_parse_feature_line_invalid() {
        assert!(parse_feature_line("").is_err());
        assert!(parse_feature_line("JoinScore verbose").is_err());
    }

    #[test]
    fn test_base_unknown_key() {
        let mut base = FeatureBase::new("JoinScore");
        assert!(base.set_parameter("frobnicate", "1").is_err());
        base.set_parameter("tuneable", "false").unwrap();
        base.set_parameter("name", "JS1").unwrap();
        assert!(!base.tuneable);
        assert_eq!(base.name, "JS1");
        assert!(base.set_parameter("verbose", "x").is_err());
    }

    #[test]
    fn test_from_line_unknown_type() {
        assert!(Feature::from_line("WordPenalty", None).is_err());
    }

    #[test]
    fn test_from_line_longer_phrase_requires_table() {
        assert!(Feature::from_line("LongerPhrase", None).is_err());
        let pt = PhraseTableHandle::new("TranslationModel0", 4);
        let f = Feature::from_line("LongerPhrase max-phrase-length=7", Some(&pt)).unwrap();
        assert!(!f.is_stateful());
        assert_eq!(f.num_scores(), 1);
        assert_eq!(f.name(), "LongerPhrase");
        assert!(f.empty_state(&Sentence::default()).is_none());
    }
}
