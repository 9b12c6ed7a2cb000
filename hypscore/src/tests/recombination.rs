use std::collections::BTreeMap;
use std::sync::Arc;

use crate::feature::*;
use crate::phrase::{Phrase, Sentence};
use crate::search::TargetExtension;
use crate::{ScoreBreakdown, Vocabulary};

fn features() -> Vec<Feature> {
    let vocab = Arc::new(Vocabulary::from_words(["haus", "haustür", "tür"]).unwrap());
    let pt = PhraseTableHandle::new("TranslationModel0", 4);
    vec![
        Feature::JoinScore(JoinScore::new(JoinScoreConfig::default(), vocab)),
        Feature::LongerPhrase(LongerPhrase::new(LongerPhraseConfig::default(), pt).unwrap()),
    ]
}

/// 文頭から拡張を順に適用したときの状態の組
fn states_after(features: &[Feature], extensions: &[&str]) -> Vec<Option<FeatureState>> {
    let input = Sentence::default();
    let mut states: Vec<_> = features.iter().map(|f| f.empty_state(&input)).collect();
    for target in extensions {
        let hypo = TargetExtension::new(Phrase::from_whitespace(target), false);
        let mut scores = ScoreBreakdown::new();
        states = features
            .iter()
            .zip(&states)
            .map(|(f, prev)| f.evaluate_when_applied(&hypo, prev.as_ref(), &mut scores))
            .collect::<Result<_, _>>()
            .unwrap();
    }
    states
}

#[test]
fn test_recombine_equal_states() {
    let features = features();
    let mut stacks = BTreeMap::new();
    for path in [
        &["das", "haus+"][..],
        &["ein haus+"][..],
        &["der", "alte", "haus+"][..],
        &["das", "haus"][..],
        &["tür+"][..],
    ] {
        *stacks.entry(states_after(&features, path)).or_insert(0) += 1;
    }
    // the three paths ending in an open "haus+" merge
    let counts: Vec<usize> = stacks.values().copied().collect();
    assert_eq!(stacks.len(), 3);
    assert_eq!(counts.iter().sum::<usize>(), 5);
    assert!(counts.contains(&3));
}

#[test]
fn test_stateless_feature_has_no_state() {
    let states = states_after(&features(), &["haus+"]);
    assert!(matches!(states[0], Some(FeatureState::JoinScore(_))));
    assert!(states[1].is_none());
}

#[test]
fn test_missing_previous_state() {
    let features = features();
    let hypo = TargetExtension::new(Phrase::from_whitespace("haus"), true);
    let mut scores = ScoreBreakdown::new();
    assert!(features[0]
        .evaluate_when_applied(&hypo, None, &mut scores)
        .is_err());
    assert!(features[1]
        .evaluate_when_applied(&hypo, None, &mut scores)
        .unwrap()
        .is_none());
}
