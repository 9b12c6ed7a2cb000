//! ユーティリティ関数と型変換トレイトを提供するモジュール
//!
//! - `FromU32`: u32からの型変換トレイト
//! - 設定値（真偽値）のパース

use crate::errors::{HypscoreError, Result};

/// u32から他の型への変換を提供するトレイト
pub trait FromU32 {
    /// u32値から実装型を生成する
    fn from_u32(src: u32) -> Self;
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl FromU32 for usize {
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // Since the pointer width is guaranteed to be 32 or 64,
        // the following process always succeeds.
        unsafe { Self::try_from(src).unwrap_unchecked() }
    }
}

/// 設定値を真偽値としてパースします。
///
/// `true`/`yes`/`y`/`1` と `false`/`no`/`n`/`0` を大文字小文字を区別せずに受け付けます。
/// それ以外の値は黙って `false` にせず、エラーを返します。
///
/// # 引数
///
/// * `key` - エラーメッセージに含める設定キー
/// * `value` - パース対象の文字列
pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(HypscoreError::invalid_argument(
            "value",
            format!("{key}: could not parse {value:?} as a boolean"),
        )),
    }
}
