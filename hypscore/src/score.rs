//! 素性ごとのスコアの集計
//!
//! 各素性関数は自分の名前をキーにしてスコアベクトルを加算します。

use hashbrown::HashMap;

/// 素性名からスコアベクトルへの対応
///
/// 加算は要素ごとに行われ、足りない要素は0として扱われます。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    scores: HashMap<String, Vec<f32>>,
}

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// `producer` のスコアベクトルに `scores` を要素ごとに加算します。
    pub fn plus_equals(&mut self, producer: &str, scores: &[f32]) {
        let entry = self.scores.entry_ref(producer).or_default();
        if entry.len() < scores.len() {
            entry.resize(scores.len(), 0.0);
        }
        for (acc, s) in entry.iter_mut().zip(scores) {
            *acc += s;
        }
    }

    /// 単一のスコアを持つ素性に値を加算します。
    pub fn plus_equals_single(&mut self, producer: &str, score: f32) {
        self.plus_equals(producer, &[score]);
    }

    /// 別の集計結果をすべて加算します。
    pub fn plus_equals_all(&mut self, other: &ScoreBreakdown) {
        for (producer, scores) in &other.scores {
            self.plus_equals(producer, scores);
        }
    }

    /// `producer` のスコアベクトル
    pub fn scores_for_producer(&self, producer: &str) -> Option<&[f32]> {
        self.scores.get(producer).map(Vec::as_slice)
    }

    /// 素性名の昇順でスコアを列挙します。
    pub fn iter_sorted(&self) -> Vec<(&str, &[f32])> {
        let mut items: Vec<_> = self
            .scores
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        items.sort_unstable_by(|a, b| a.0.cmp(b.0));
        items
    }
}
