//! 複合語の連結を評価する状態付き素性関数
//!
//! 目的言語側の形態素列を1つずつ読み、連結マーカーから境界クラスを求め、
//! 直前のクラスとの組で決まる動作（[`Action`]）に従ってカウンタを増やし、
//! 複合語バッファを組み立てます。バッファが閉じるたびに、連結した文字列を
//! 語彙のトライで引き、語彙にない複合語にペナルティを与えます。
//!
//! バッファと直前のクラスは仮説の状態として次の拡張に引き継がれるので、
//! 翻訳候補の境界をまたぐ複合語も評価できます。
//!
//! # 例
//!
//! ```
//! use std::sync::Arc;
//!
//! use hypscore::feature::{JoinScore, JoinScoreConfig, StatefulFeatureFunction};
//! use hypscore::phrase::{Phrase, Sentence};
//! use hypscore::search::TargetExtension;
//! use hypscore::{ScoreBreakdown, Vocabulary};
//!
//! let vocab = Arc::new(Vocabulary::from_words(["unlocked"]).unwrap());
//! let feature = JoinScore::new(JoinScoreConfig::default(), vocab);
//!
//! let state = feature.empty_state(&Sentence::default());
//! let hypo = TargetExtension::new(Phrase::from_whitespace("un+ +lock+ +ed"), true);
//!
//! let mut scores = ScoreBreakdown::new();
//! feature.evaluate_when_applied(&hypo, &state, &mut scores).unwrap();
//! assert_eq!(
//!     scores.scores_for_producer("JoinScore"),
//!     Some(&[2.0, 1.0, 0.0, 0.0][..])
//! );
//! ```
mod buffer;
mod juncture;

use std::cmp::Ordering;
use std::ops::AddAssign;
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::{HypscoreError, Result};
use crate::feature::{
    FeatureBase, FeatureFunction, FeatureParameters, StatefulFeatureFunction,
};
use crate::phrase::{InputPath, Phrase, Sentence, Span, Word};
use crate::score::ScoreBreakdown;
use crate::search::{HypothesisView, TranslationOption, TranslationOptionCollection};
use crate::utils::parse_bool;
use crate::vocabulary::{NodeId, Vocabulary};

pub use crate::feature::join_score::buffer::{BufferBound, CompoundBuffer};
pub use crate::feature::join_score::juncture::{Action, BufferOp, Juncture, JOIN_MARKER};

/// [`JoinScore`] の設定
#[derive(Clone, Debug, PartialEq)]
pub struct JoinScoreConfig {
    pub base: FeatureBase,
    pub score_real_words: bool,
    pub score_num_compounds: bool,
    pub score_invalid_joins: bool,
    pub score_compound_word: bool,
    /// 受け付けるだけで、スコアには影響しません。
    pub score_compound_oov: bool,
    pub max_morpheme_state: BufferBound,
    pub multiplier: f32,
    pub vocab_path: Option<PathBuf>,
}

impl Default for JoinScoreConfig {
    fn default() -> Self {
        Self {
            base: FeatureBase::new(JoinScore::TYPE_NAME),
            score_real_words: true,
            score_num_compounds: true,
            score_invalid_joins: true,
            score_compound_word: true,
            score_compound_oov: false,
            max_morpheme_state: BufferBound::Unbounded,
            multiplier: 1.0,
            vocab_path: None,
        }
    }
}

impl JoinScoreConfig {
    /// 設定の整合性を検査します。
    ///
    /// # エラー
    ///
    /// 複合語のスコアが有効なのに語彙のパスが指定されていない場合にエラーを返します。
    pub fn validate(&self) -> Result<()> {
        if self.score_compound_word && self.vocab_path.is_none() {
            return Err(HypscoreError::invalid_argument(
                "vocab-path",
                format!(
                    "{}: vocab-path is required when score-compound-word is enabled",
                    self.base.name
                ),
            ));
        }
        Ok(())
    }

    /// 有効なサブスコアの数
    pub fn num_enabled(&self) -> usize {
        [
            self.score_real_words,
            self.score_num_compounds,
            self.score_invalid_joins,
            self.score_compound_word,
        ]
        .into_iter()
        .filter(|&b| b)
        .count()
    }
}

impl FeatureParameters for JoinScoreConfig {
    fn base(&self) -> &FeatureBase {
        &self.base
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "score-real-words" => self.score_real_words = parse_bool(key, value)?,
            "score-num-compounds" => self.score_num_compounds = parse_bool(key, value)?,
            "score-invalid-joins" => self.score_invalid_joins = parse_bool(key, value)?,
            "score-compound-word" => self.score_compound_word = parse_bool(key, value)?,
            "score-compound-oov" => self.score_compound_oov = parse_bool(key, value)?,
            "max-morpheme-state" => self.max_morpheme_state = value.parse()?,
            "multiplier" => self.multiplier = value.parse()?,
            "vocab-path" => {
                self.vocab_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => return self.base.set_parameter(key, value),
        }
        Ok(())
    }
}

/// 探索ノードごとの状態
///
/// 比較はバッファと直前の境界クラスだけで行います。
/// キャッシュしたトライのノードは比較に含めません。
#[derive(Clone, Debug, Default)]
pub struct JoinScoreState {
    morphemes: CompoundBuffer,
    juncture: Juncture,
    node: Option<NodeId>,
}

impl JoinScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み立て中の複合語
    pub fn morphemes(&self) -> &CompoundBuffer {
        &self.morphemes
    }

    /// 最後に読んだ形態素の境界クラス
    pub fn juncture(&self) -> Juncture {
        self.juncture
    }

    /// 最後に到達したトライのノード
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

impl PartialEq for JoinScoreState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JoinScoreState {}

impl PartialOrd for JoinScoreState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JoinScoreState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.morphemes
            .cmp(&other.morphemes)
            .then(self.juncture.cmp(&other.juncture))
    }
}

/// 1回の評価で数えたカウンタ
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JoinCounts {
    pub real_words: usize,
    pub compounds: usize,
    pub invalid_joins: usize,
    pub compound_word_penalty: f32,
}

impl JoinCounts {
    fn from_action(action: &Action) -> Self {
        Self {
            real_words: usize::from(action.real_word),
            compounds: usize::from(action.compound),
            invalid_joins: usize::from(action.invalid_join),
            compound_word_penalty: 0.0,
        }
    }
}

impl AddAssign for JoinCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.real_words += rhs.real_words;
        self.compounds += rhs.compounds;
        self.invalid_joins += rhs.invalid_joins;
        self.compound_word_penalty += rhs.compound_word_penalty;
    }
}

/// 1つの形態素を読んだ結果
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub counts: JoinCounts,
    pub state: JoinScoreState,
}

/// 複合語の連結を評価する素性関数
pub struct JoinScore {
    config: JoinScoreConfig,
    vocab: Arc<Vocabulary>,
}

impl JoinScore {
    /// 設定行での型名
    pub const TYPE_NAME: &'static str = "JoinScore";

    /// 読み込み済みの語彙から素性関数を作成します。
    ///
    /// `config.vocab_path` は参照しません。
    pub fn new(config: JoinScoreConfig, vocab: Arc<Vocabulary>) -> Self {
        Self { config, vocab }
    }

    /// 設定を検査し、`vocab-path` の語彙を読み込んで素性関数を作成します。
    ///
    /// パスが指定されていない場合は空の語彙を使います。
    ///
    /// # エラー
    ///
    /// 設定が不正な場合、または語彙の読み込みに失敗した場合にエラーを返します。
    pub fn load(config: JoinScoreConfig) -> Result<Self> {
        config.validate()?;
        let vocab = match &config.vocab_path {
            Some(path) => {
                log::info!("{}: loading vocabulary {}", config.base.name, path.display());
                Vocabulary::from_path(path)?
            }
            None => Vocabulary::default(),
        };
        Ok(Self::new(config, Arc::new(vocab)))
    }

    pub fn config(&self) -> &JoinScoreConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// カウントを素性値に変換します。
    ///
    /// 調整対象なら `count * multiplier`、そうでなければ `count > 0` で負の無限大、
    /// それ以外で0を返します。
    pub fn calc_score(&self, count: f32) -> f32 {
        if self.config.base.tuneable {
            count * self.config.multiplier
        } else if count > 0.0 {
            f32::NEG_INFINITY
        } else {
            0.0
        }
    }

    /// 有効なサブスコアだけを並べた素性値ベクトルを返します。
    pub fn scores(&self, counts: &JoinCounts) -> Vec<f32> {
        let mut scores = Vec::with_capacity(self.config.num_enabled());
        if self.config.score_real_words {
            scores.push(self.calc_score(counts.real_words as f32));
        }
        if self.config.score_num_compounds {
            scores.push(self.calc_score(counts.compounds as f32));
        }
        if self.config.score_invalid_joins {
            scores.push(self.calc_score(counts.invalid_joins as f32));
        }
        if self.config.score_compound_word {
            scores.push(self.calc_score(counts.compound_word_penalty));
        }
        scores
    }

    /// バッファを連結した文字列を語彙で引きます。
    ///
    /// # 戻り値
    ///
    /// ペナルティ（0か1）と到達したノード。`whole_word` が真なら完全な単語であることを、
    /// 偽なら接頭辞として存在することだけを要求します。
    pub fn lookup(&self, buffer: &CompoundBuffer, whole_word: bool) -> (f32, Option<NodeId>) {
        let node = self.vocab.find(&buffer.joined_surface());
        let penalty = match node {
            Some(n) if !whole_word || self.vocab.is_word(n) => 0.0,
            _ => 1.0,
        };
        (penalty, node)
    }

    fn flush(&self, state: &mut JoinScoreState) -> f32 {
        let (penalty, node) = self.lookup(&state.morphemes, true);
        state.morphemes.clear();
        state.node = node;
        penalty
    }

    /// 1つの形態素を読んだときの遷移を計算します。
    ///
    /// `morpheme` が `None` のときは文末の遷移で、返す状態の境界クラスは変わりません。
    ///
    /// # エラー
    ///
    /// バッファが上限を超えている場合、または文末の遷移で形態素の追加が必要になった
    /// 場合に [`HypscoreError::InvalidState`] を返します。
    pub fn transition(
        &self,
        mut state: JoinScoreState,
        morpheme: Option<&Word>,
        prev: Juncture,
        curr: Juncture,
    ) -> Result<Transition> {
        let action = Action::select(prev, curr);
        let mut counts = JoinCounts::from_action(&action);
        let bound = self.config.max_morpheme_state;
        let append = |state: &mut JoinScoreState| -> Result<()> {
            let morpheme = morpheme.ok_or_else(|| {
                HypscoreError::invalid_state(
                    format!("{}: no morpheme to append", self.name()),
                    format!("{prev:?} -> {curr:?} at the end of the sentence"),
                )
            })?;
            state.morphemes.push(morpheme.clone(), bound)
        };

        match action.buffer {
            BufferOp::Keep => (),
            BufferOp::Append => append(&mut state)?,
            BufferOp::FlushInclusive => {
                append(&mut state)?;
                counts.compound_word_penalty += self.flush(&mut state);
            }
            BufferOp::FlushExclusive => {
                counts.compound_word_penalty += self.flush(&mut state);
            }
            BufferOp::FlushThenStart => {
                counts.compound_word_penalty += self.flush(&mut state);
                append(&mut state)?;
            }
        }
        if morpheme.is_some() {
            state.juncture = curr;
        }
        Ok(Transition { counts, state })
    }

    /// 遷移のあと、開いたままの複合語を接頭辞として検査します。
    fn advance(
        &self,
        state: JoinScoreState,
        morpheme: Option<&Word>,
        prev: Juncture,
        curr: Juncture,
    ) -> Result<Transition> {
        let mut t = self.transition(state, morpheme, prev, curr)?;
        if t.state.morphemes.is_empty() {
            t.state.node = None;
        } else if curr.is_open() {
            let (penalty, node) = self.lookup(&t.state.morphemes, false);
            t.counts.compound_word_penalty += penalty;
            t.state.node = node;
        }
        if self.config.base.verbose >= 2 {
            log::debug!(
                "{}: {:?} -> {:?} {:?} buffer={:?}",
                self.name(),
                prev,
                curr,
                t.counts,
                t.state.morphemes.joined_surface()
            );
        }
        Ok(t)
    }
}

impl FeatureFunction for JoinScore {
    fn name(&self) -> &str {
        &self.config.base.name
    }

    fn num_scores(&self) -> usize {
        self.config.num_enabled()
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
        _input: &Sentence,
        _span: Span,
        _collection: &dyn TranslationOptionCollection,
        _options: &mut [TranslationOption],
    ) -> Result<()> {
        Ok(())
    }
}

impl StatefulFeatureFunction for JoinScore {
    type State = JoinScoreState;

    fn empty_state(&self, _input: &Sentence) -> JoinScoreState {
        JoinScoreState::new()
    }

    fn evaluate_when_applied(
        &self,
        hypo: &dyn HypothesisView,
        prev_state: &JoinScoreState,
        scores: &mut ScoreBreakdown,
    ) -> Result<JoinScoreState> {
        let mut state = prev_state.clone();
        let mut counts = JoinCounts::default();
        let mut prev = state.juncture;

        for morpheme in hypo.current_target_phrase() {
            let curr = Juncture::classify(morpheme);
            let t = self.advance(state, Some(morpheme), prev, curr)?;
            counts += t.counts;
            state = t.state;
            prev = curr;
        }
        if hypo.is_source_completed() {
            let t = self.advance(state, None, prev, Juncture::Standalone)?;
            counts += t.counts;
            state = t.state;
        }

        scores.plus_equals(self.name(), &self.scores(&counts));
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::search::TargetExtension;

    fn feature_with(words: &[&str], config: JoinScoreConfig) -> JoinScore {
        JoinScore::new(config, Arc::new(Vocabulary::from_words(words).unwrap()))
    }

    fn state_of(surfaces: &str, juncture: Juncture) -> JoinScoreState {
        let mut morphemes = CompoundBuffer::new();
        for w in Phrase::from_whitespace(surfaces).iter() {
            morphemes.push(w.clone(), BufferBound::Unbounded).unwrap();
        }
        JoinScoreState {
            morphemes,
            juncture,
            node: None,
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = JoinScoreConfig::default();
        assert_eq!(config.base.name, "JoinScore");
        assert!(config.base.tuneable);
        assert_eq!(config.num_enabled(), 4);
        assert_eq!(config.max_morpheme_state, BufferBound::Unbounded);
        assert_eq!(config.multiplier, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_read_parameters() {
        let mut config = JoinScoreConfig::default();
        config
            .read_parameters([
                ("name", "JoinScore1"),
                ("score-real-words", "false"),
                ("score-compound-word", "no"),
                ("score-compound-oov", "yes"),
                ("max-morpheme-state", "3"),
                ("multiplier", "0.25"),
                ("tuneable", "0"),
            ])
            .unwrap();
        assert_eq!(config.base.name, "JoinScore1");
        assert!(!config.base.tuneable);
        assert_eq!(config.num_enabled(), 2);
        assert!(config.score_compound_oov);
        assert_eq!(config.max_morpheme_state, BufferBound::Window(3));
        assert_eq!(config.multiplier, 0.25);
        config.validate().unwrap();
    }

    #[test]
    fn test_config_invalid_values() {
        let mut config = JoinScoreConfig::default();
        assert!(config.set_parameter("score-real-words", "maybe").is_err());
        assert!(config.set_parameter("max-morpheme-state", "1.5").is_err());
        assert!(config.set_parameter("multiplier", "x").is_err());
        assert!(config.set_parameter("score-compound", "true").is_err());
    }

    #[test]
    fn test_config_empty_vocab_path() {
        let mut config = JoinScoreConfig::default();
        config.set_parameter("vocab-path", "").unwrap();
        assert!(config.validate().is_err());
        config.set_parameter("vocab-path", "vocab.txt").unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_calc_score_tuneable() {
        let mut config = JoinScoreConfig::default();
        config.multiplier = -0.5;
        let feature = feature_with(&[], config);
        assert_eq!(feature.calc_score(0.0), 0.0);
        assert_eq!(feature.calc_score(3.0), -1.5);
    }

    #[test]
    fn test_calc_score_hard_veto() {
        let mut config = JoinScoreConfig::default();
        config.base.tuneable = false;
        config.multiplier = 100.0;
        let feature = feature_with(&[], config);
        assert_eq!(feature.calc_score(0.0), 0.0);
        assert_eq!(feature.calc_score(1.0), f32::NEG_INFINITY);
        assert_eq!(feature.calc_score(0.5), f32::NEG_INFINITY);
    }

    #[test]
    fn test_scores_omit_disabled() {
        let mut config = JoinScoreConfig::default();
        config.score_num_compounds = false;
        config.score_compound_word = false;
        let feature = feature_with(&[], config);
        let counts = JoinCounts {
            real_words: 3,
            compounds: 1,
            invalid_joins: 2,
            compound_word_penalty: 1.0,
        };
        assert_eq!(feature.num_scores(), 2);
        assert_eq!(feature.scores(&counts), vec![3.0, 2.0]);
    }

    #[test]
    fn test_lookup() {
        let feature = feature_with(&["unlocked"], JoinScoreConfig::default());
        let whole = state_of("un+ +lock+ +ed", Juncture::PrefixAttach);
        let prefix = state_of("un+ +lock+", Juncture::BothAttach);
        let missing = state_of("re+ +lock+", Juncture::BothAttach);

        assert_eq!(feature.lookup(whole.morphemes(), true).0, 0.0);
        assert_eq!(feature.lookup(prefix.morphemes(), true).0, 1.0);
        assert_eq!(feature.lookup(prefix.morphemes(), false).0, 0.0);
        assert_eq!(feature.lookup(missing.morphemes(), false), (1.0, None));
    }

    #[test]
    fn test_transition_is_pure() {
        let feature = feature_with(&["unlocked"], JoinScoreConfig::default());
        let prev = state_of("un+", Juncture::SuffixOpen);
        let word = Word::new("+lock+");
        let t = feature
            .transition(prev.clone(), Some(&word), Juncture::SuffixOpen, Juncture::BothAttach)
            .unwrap();
        assert_eq!(t.counts, JoinCounts::default());
        assert_eq!(t.state, state_of("un+ +lock+", Juncture::BothAttach));
        assert_eq!(prev, state_of("un+", Juncture::SuffixOpen));
    }

    #[test]
    fn test_transition_flush_then_start() {
        let feature = feature_with(&["unlocked"], JoinScoreConfig::default());
        let word = Word::new("re+");
        let t = feature
            .transition(
                state_of("un+ +lock+", Juncture::BothAttach),
                Some(&word),
                Juncture::BothAttach,
                Juncture::SuffixOpen,
            )
            .unwrap();
        assert_eq!(
            t.counts,
            JoinCounts {
                real_words: 1,
                compounds: 1,
                invalid_joins: 1,
                compound_word_penalty: 1.0,
            }
        );
        assert_eq!(t.state, state_of("re+", Juncture::SuffixOpen));
    }

    #[test]
    fn test_transition_end_of_sentence_keeps_juncture() {
        let feature = feature_with(&["unlock"], JoinScoreConfig::default());
        let t = feature
            .transition(
                state_of("un+ +lock+", Juncture::BothAttach),
                None,
                Juncture::BothAttach,
                Juncture::Standalone,
            )
            .unwrap();
        assert_eq!(t.counts.real_words, 1);
        assert_eq!(t.counts.invalid_joins, 1);
        assert_eq!(t.counts.compound_word_penalty, 0.0);
        assert!(t.state.morphemes().is_empty());
        assert_eq!(t.state.juncture(), Juncture::BothAttach);
    }

    #[test]
    fn test_transition_append_without_morpheme() {
        let feature = feature_with(&[], JoinScoreConfig::default());
        let r = feature.transition(
            JoinScoreState::new(),
            None,
            Juncture::Standalone,
            Juncture::SuffixOpen,
        );
        assert!(matches!(r, Err(HypscoreError::InvalidState(_))));
    }

    #[test]
    fn test_noop_keeps_open_buffer() {
        let feature = feature_with(&["unlocked"], JoinScoreConfig::default());
        let word = Word::oov("xyz");
        let t = feature
            .transition(
                state_of("un+", Juncture::SuffixOpen),
                Some(&word),
                Juncture::SuffixOpen,
                Juncture::OutOfVocabulary,
            )
            .unwrap();
        assert_eq!(t.counts, JoinCounts::default());
        assert_eq!(t.state.morphemes().morphemes().to_string(), "un+");
        assert_eq!(t.state.juncture(), Juncture::OutOfVocabulary);
    }

    #[test]
    fn test_supplementary_lookup() {
        let feature = feature_with(&["unlocked"], JoinScoreConfig::default());
        let hypo = TargetExtension::new(Phrase::from_whitespace("un+ +lock+"), false);
        let mut scores = ScoreBreakdown::new();
        let state = feature
            .evaluate_when_applied(&hypo, &JoinScoreState::new(), &mut scores)
            .unwrap();
        assert_eq!(
            scores.scores_for_producer("JoinScore"),
            Some(&[1.0, 1.0, 0.0, 0.0][..])
        );
        assert!(state.node().is_some());

        let hypo = TargetExtension::new(Phrase::from_whitespace("re+ +lock+"), false);
        let mut scores = ScoreBreakdown::new();
        let state = feature
            .evaluate_when_applied(&hypo, &JoinScoreState::new(), &mut scores)
            .unwrap();
        assert_eq!(
            scores.scores_for_producer("JoinScore"),
            Some(&[1.0, 1.0, 0.0, 2.0][..])
        );
        assert_eq!(state.node(), None);
    }

    #[test]
    fn test_zero_bound_penalizes_every_flush() {
        let mut config = JoinScoreConfig::default();
        config.max_morpheme_state = BufferBound::Disabled;
        let feature = feature_with(&["unlocked"], config);
        let hypo = TargetExtension::new(Phrase::from_whitespace("un+ +lock+ +ed"), true);
        let mut scores = ScoreBreakdown::new();
        let state = feature
            .evaluate_when_applied(&hypo, &JoinScoreState::new(), &mut scores)
            .unwrap();
        assert_eq!(
            scores.scores_for_producer("JoinScore"),
            Some(&[2.0, 1.0, 0.0, 1.0][..])
        );
        assert!(state.morphemes().is_empty());
    }

    #[test]
    fn test_window_bound() {
        let mut config = JoinScoreConfig::default();
        config.max_morpheme_state = BufferBound::Window(2);
        let feature = feature_with(&["locked"], config);
        let hypo = TargetExtension::new(Phrase::from_whitespace("un+ +lock+ +ed"), false);
        let mut scores = ScoreBreakdown::new();
        feature
            .evaluate_when_applied(&hypo, &JoinScoreState::new(), &mut scores)
            .unwrap();
        // "un" is not a prefix of "locked"; the window then drops "un+"
        assert_eq!(
            scores.scores_for_producer("JoinScore"),
            Some(&[1.0, 1.0, 0.0, 2.0][..])
        );
    }

    #[test]
    fn test_state_order_ignores_node() {
        let a = state_of("un+", Juncture::SuffixOpen);
        let mut b = a.clone();
        b.node = Some(NodeId::ROOT);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_ne!(a, state_of("un+", Juncture::BothAttach));
        assert_ne!(a, state_of("re+", Juncture::SuffixOpen));
        assert!(JoinScoreState::new() < a);
    }
}
