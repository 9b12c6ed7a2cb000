//! 形態素境界の分類と遷移表
//!
//! 形態素の表層形に付いた連結マーカー `+` から、その形態素が前後の形態素と
//! どう連結するかを分類します。直前と現在の分類の組から、カウンタの増分と
//! 複合語バッファへの操作が一意に決まります。

use crate::phrase::Word;

/// 連結マーカー
pub const JOIN_MARKER: char = '+';

/// 形態素の境界クラス
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Juncture {
    /// 単独の語
    #[default]
    Standalone,
    /// 先頭にマーカーがあり、直前の形態素に接続する（`+ed`）
    PrefixAttach,
    /// 末尾にマーカーがあり、次の形態素を待つ（`un+`）
    SuffixOpen,
    /// 両端にマーカーがある（`+lock+`）
    BothAttach,
    /// 上流で未知語と判定された
    OutOfVocabulary,
}

impl Juncture {
    /// 語の境界クラスを求めます。
    pub fn classify(word: &Word) -> Self {
        Self::classify_surface(word.surface(), word.is_oov())
    }

    /// 表層形と未知語フラグから境界クラスを求めます。
    ///
    /// 未知語フラグはマーカーより優先されます。2文字未満の表層形では
    /// マーカーを見ません。
    pub fn classify_surface(surface: &str, oov: bool) -> Self {
        if oov {
            return Self::OutOfVocabulary;
        }
        let mut chars = surface.chars();
        if chars.next().is_none() || chars.next().is_none() {
            return Self::Standalone;
        }
        match (
            surface.starts_with(JOIN_MARKER),
            surface.ends_with(JOIN_MARKER),
        ) {
            (false, false) => Self::Standalone,
            (true, false) => Self::PrefixAttach,
            (false, true) => Self::SuffixOpen,
            (true, true) => Self::BothAttach,
        }
    }

    /// 後続の形態素を待つ（複合語が開いたままになる）クラスかどうか
    #[inline(always)]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::SuffixOpen | Self::BothAttach)
    }
}

/// 複合語バッファへの操作
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BufferOp {
    /// 何もしない
    Keep,
    /// 現在の形態素を追加し、バッファを開いたままにする
    Append,
    /// 現在の形態素を追加してから、バッファを採点して空にする
    FlushInclusive,
    /// 現在の形態素を含めずに、バッファを採点して空にする
    FlushExclusive,
    /// バッファを採点して空にし、現在の形態素だけで新しいバッファを始める
    FlushThenStart,
}

/// 1つの形態素を処理するときの動作
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Action {
    pub real_word: bool,
    pub compound: bool,
    pub invalid_join: bool,
    pub buffer: BufferOp,
}

const fn act(real_word: bool, compound: bool, invalid_join: bool, buffer: BufferOp) -> Action {
    Action {
        real_word,
        compound,
        invalid_join,
        buffer,
    }
}

impl Action {
    /// カウンタもバッファも変えない動作
    pub const NOOP: Self = act(false, false, false, BufferOp::Keep);

    /// 直前と現在の境界クラスから動作を選びます。
    pub const fn select(prev: Juncture, curr: Juncture) -> Self {
        use BufferOp::*;
        use Juncture::*;

        match prev {
            Standalone | PrefixAttach => match curr {
                Standalone => act(true, false, false, Keep),
                PrefixAttach => act(true, true, true, FlushInclusive),
                SuffixOpen => act(true, true, false, Append),
                BothAttach => act(true, true, true, Append),
                OutOfVocabulary => act(true, false, false, Keep),
            },
            SuffixOpen | BothAttach => match curr {
                Standalone => act(true, false, true, FlushExclusive),
                PrefixAttach => act(false, false, false, FlushInclusive),
                SuffixOpen => act(true, true, true, FlushThenStart),
                BothAttach => act(false, false, false, Append),
                // an open compound stays open across an unknown word
                OutOfVocabulary => Self::NOOP,
            },
            OutOfVocabulary => match curr {
                Standalone => act(true, false, false, FlushExclusive),
                PrefixAttach => act(false, false, false, FlushInclusive),
                SuffixOpen => act(true, true, false, FlushThenStart),
                BothAttach => Self::NOOP,
                OutOfVocabulary => act(true, false, false, FlushThenStart),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Juncture::*;

    #[test]
    fn test_classify_markers() {
        assert_eq!(Juncture::classify(&Word::new("haus")), Standalone);
        assert_eq!(Juncture::classify(&Word::new("+ed")), PrefixAttach);
        assert_eq!(Juncture::classify(&Word::new("un+")), SuffixOpen);
        assert_eq!(Juncture::classify(&Word::new("+lock+")), BothAttach);
        assert_eq!(Juncture::classify(&Word::new("++")), BothAttach);
        assert_eq!(Juncture::classify(&Word::new("a+b")), Standalone);
    }

    #[test]
    fn test_classify_short_surfaces() {
        for s in ["", "+", "a", "ü"] {
            assert_eq!(Juncture::classify(&Word::new(s)), Standalone, "{s:?}");
            assert_eq!(Juncture::classify(&Word::oov(s)), OutOfVocabulary, "{s:?}");
        }
    }

    #[test]
    fn test_classify_counts_chars_not_bytes() {
        // two bytes, one char
        assert_eq!(Juncture::classify(&Word::new("ß")), Standalone);
        assert_eq!(Juncture::classify(&Word::new("ß+")), SuffixOpen);
    }

    #[test]
    fn test_classify_oov_wins() {
        for s in ["haus", "+ed", "un+", "+lock+"] {
            assert_eq!(Juncture::classify(&Word::oov(s)), OutOfVocabulary, "{s:?}");
        }
    }

    #[test]
    fn test_is_open() {
        assert!(SuffixOpen.is_open());
        assert!(BothAttach.is_open());
        assert!(!Standalone.is_open());
        assert!(!PrefixAttach.is_open());
        assert!(!OutOfVocabulary.is_open());
    }

    #[test]
    fn test_select_rows_share_behavior() {
        let all = [Standalone, PrefixAttach, SuffixOpen, BothAttach, OutOfVocabulary];
        for curr in all {
            assert_eq!(
                Action::select(Standalone, curr),
                Action::select(PrefixAttach, curr)
            );
            assert_eq!(
                Action::select(SuffixOpen, curr),
                Action::select(BothAttach, curr)
            );
        }
    }

    #[test]
    fn test_select_noop_cells() {
        assert_eq!(Action::select(SuffixOpen, OutOfVocabulary), Action::NOOP);
        assert_eq!(Action::select(BothAttach, OutOfVocabulary), Action::NOOP);
        assert_eq!(Action::select(OutOfVocabulary, BothAttach), Action::NOOP);
    }

    #[test]
    fn test_select_cells() {
        assert_eq!(
            Action::select(Standalone, PrefixAttach),
            act(true, true, true, BufferOp::FlushInclusive)
        );
        assert_eq!(
            Action::select(SuffixOpen, Standalone),
            act(true, false, true, BufferOp::FlushExclusive)
        );
        assert_eq!(
            Action::select(BothAttach, SuffixOpen),
            act(true, true, true, BufferOp::FlushThenStart)
        );
        assert_eq!(
            Action::select(OutOfVocabulary, SuffixOpen),
            act(true, true, false, BufferOp::FlushThenStart)
        );
        assert_eq!(
            Action::select(OutOfVocabulary, OutOfVocabulary),
            act(true, false, false, BufferOp::FlushThenStart)
        );
        assert_eq!(
            Action::select(Standalone, OutOfVocabulary),
            act(true, false, false, BufferOp::Keep)
        );
    }
}
