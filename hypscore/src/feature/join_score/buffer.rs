//! 組み立て中の複合語を保持するバッファ

use std::str::FromStr;

use crate::errors::{HypscoreError, Result};
use crate::phrase::{Phrase, Word};

/// バッファに保持できる形態素数の上限
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BufferBound {
    /// 上限なし
    #[default]
    Unbounded,
    /// 形態素を一切保持しない
    Disabled,
    /// 最新の `n` 個だけを保持するスライディングウィンドウ
    Window(usize),
}

impl BufferBound {
    /// 設定値の整数から上限を作ります（負: 上限なし、0: 無効、正: ウィンドウ幅）。
    pub fn from_signed(n: i64) -> Result<Self> {
        Ok(match n {
            n if n < 0 => Self::Unbounded,
            0 => Self::Disabled,
            n => Self::Window(usize::try_from(n)?),
        })
    }
}

impl FromStr for BufferBound {
    type Err = HypscoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_signed(s.trim().parse()?)
    }
}

/// 組み立て中の複合語（形態素の列）
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CompoundBuffer {
    morphemes: Phrase,
}

impl CompoundBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }

    pub fn morphemes(&self) -> &Phrase {
        &self.morphemes
    }

    pub fn clear(&mut self) {
        self.morphemes.clear();
    }

    /// 形態素を末尾に追加します。
    ///
    /// ウィンドウが一杯なら最も古い形態素を捨てます。上限が無効なら何もしません。
    ///
    /// # エラー
    ///
    /// 追加前の時点で上限を超えていた場合、[`HypscoreError::InvalidState`] を返します。
    pub fn push(&mut self, morpheme: Word, bound: BufferBound) -> Result<()> {
        match bound {
            BufferBound::Unbounded => (),
            BufferBound::Disabled => return Ok(()),
            BufferBound::Window(n) => {
                if self.len() == n {
                    self.morphemes.remove_first();
                } else if self.len() > n {
                    log::error!("compound buffer holds {} morphemes, max {}", self.len(), n);
                    return Err(HypscoreError::invalid_state(
                        "compound buffer overflow",
                        format!("number of morphemes ({}) exceeds max ({})", self.len(), n),
                    ));
                }
            }
        }
        self.morphemes.push(morpheme);
        Ok(())
    }

    /// 連結マーカーを取り除いて連結した文字列を返します。
    ///
    /// 表層形を空白で連結し、`"+ +"` を削除したあと残りの `+` をすべて削除します。
    /// マーカーで接続されていない形態素の間には空白が残ります。
    pub fn joined_surface(&self) -> String {
        self.morphemes
            .to_string()
            .trim()
            .replace("+ +", "")
            .replace('+', "")
    }
}
