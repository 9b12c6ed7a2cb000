//! 語・句・スパンの表現
//!
//! デコーダが素性関数に渡す最小限の入出力データを定義します。
//! 入力文の前処理（トークン化や未知語の判定）はこのクレートの外で行われ、
//! ここではその結果だけを保持します。

use std::fmt;

/// 翻訳出力の最小単位（形態素）
///
/// 連結マーカー `+` を含む部分語であることがあります。
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Word {
    surface: String,
    oov: bool,
}

impl Word {
    /// 語彙内の語を作成します。
    pub fn new<S: Into<String>>(surface: S) -> Self {
        Self {
            surface: surface.into(),
            oov: false,
        }
    }

    /// 未知語フラグ付きの語を作成します。
    pub fn oov<S: Into<String>>(surface: S) -> Self {
        Self {
            surface: surface.into(),
            oov: true,
        }
    }

    /// 表層形
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// 上流で未知語と判定されたかどうか
    #[inline(always)]
    pub fn is_oov(&self) -> bool {
        self.oov
    }
}

/// 語の列
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Phrase {
    words: Vec<Word>,
}

impl Phrase {
    pub fn new() -> Self {
        Self::default()
    }

    /// 空白区切りの文字列から句を作成します。すべての語は語彙内として扱われます。
    pub fn from_whitespace(text: &str) -> Self {
        text.split_whitespace().map(Word::new).collect()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn push(&mut self, word: Word) {
        self.words.push(word);
    }

    /// 先頭の語を取り除きます。空の場合は何もしません。
    pub fn remove_first(&mut self) {
        if !self.words.is_empty() {
            self.words.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}

impl FromIterator<Word> for Phrase {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Phrase {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// 表層形を空白1つで連結して表示します。
impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, w) in self.words.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            f.write_str(w.surface())?;
        }
        Ok(())
    }
}

/// 入力文上の連続した範囲（両端を含む）
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// `start..=end` を覆うスパンを作成します。
    ///
    /// # パニック
    ///
    /// `end < start` の場合にパニックします。
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "invalid span: {start}..={end}");
        Self { start, end }
    }

    #[inline(always)]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// 覆っている語数
    #[inline(always)]
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// 翻訳対象の入力文
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sentence {
    words: Phrase,
}

impl Sentence {
    pub fn new(words: Phrase) -> Self {
        Self { words }
    }

    /// 入力文の語数
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &Phrase {
        &self.words
    }
}

/// 入力文の部分列とその位置
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputPath {
    pub span: Span,
    pub source: Phrase,
}
