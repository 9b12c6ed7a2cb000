//! 複合語検証のための語彙モジュール
//!
//! 語彙はロード時に一度だけ構築され、以降は読み取り専用です。
//! [`Vocabulary`] は `Send + Sync` なので、`Arc` で包んでデコード中の
//! すべてのスレッドからロックなしで参照できます。
//!
//! # 語彙の読み込み方法
//!
//! - [`Vocabulary::from_reader`]: テキスト形式（空白区切りのトークン列）から構築する
//! - [`Vocabulary::read`]: [`Vocabulary::write`] で書き出したバイナリ形式を読み込む
//! - [`Vocabulary::from_path`]: ファイルの先頭を見て上記のどちらかを選ぶ
pub mod trie;

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use rkyv::rancor::Error;
use rkyv::util::AlignedVec;

use crate::errors::{HypscoreError, Result};

pub use crate::vocabulary::trie::{NodeId, Trie};

/// バイナリ語彙ファイルを識別するマジックバイト。
pub const VOCAB_MAGIC: &[u8] = b"HypscoreVocabulary 0.1\n";

/// トライに基づく語彙
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    trie: Trie,
}

impl Vocabulary {
    /// 単語のイテレータから語彙を構築します。
    pub fn from_words<I, W>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut trie = Trie::new();
        for w in words {
            trie.insert(w.as_ref())?;
        }
        Ok(Self { trie })
    }

    /// テキスト形式の語彙から新しいインスタンスを構築します。
    ///
    /// 各行を空白で分割し、すべてのトークンを完全な単語として登録します。
    ///
    /// # 引数
    ///
    /// * `rdr` - 語彙ファイルのリーダー
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、または入力がUTF-8でない場合にエラーを返します。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut trie = Trie::new();
        let mut num_lines = 0;
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            for tok in line.split_whitespace() {
                trie.insert(tok)?;
            }
            num_lines += 1;
        }
        log::info!(
            "Loaded a vocabulary of {} words ({} lines, {} trie nodes)",
            trie.num_words(),
            num_lines,
            trie.num_nodes(),
        );
        Ok(Self { trie })
    }

    /// ファイルから語彙を読み込みます。
    ///
    /// ファイルが [`VOCAB_MAGIC`] で始まる場合はバイナリ形式として、
    /// それ以外はテキスト形式として扱います。
    ///
    /// # エラー
    ///
    /// パスがディレクトリの場合は [`HypscoreError::PathIsDirectory`] を返します。
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if fs::metadata(path)?.is_dir() {
            return Err(HypscoreError::PathIsDirectory(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        log::debug!("Reading vocabulary from {}", path.display());
        if bytes.starts_with(VOCAB_MAGIC) {
            Self::from_archive_bytes(&bytes[VOCAB_MAGIC.len()..])
        } else {
            Self::from_reader(bytes.as_slice())
        }
    }

    /// 語彙をバイナリ形式で書き出します。
    ///
    /// # 例
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use hypscore::Vocabulary;
    ///
    /// let vocab = Vocabulary::from_reader("haus tür\nhaustür".as_bytes())?;
    /// let mut buf = vec![];
    /// vocab.write(&mut buf)?;
    ///
    /// let vocab = Vocabulary::read(buf.as_slice())?;
    /// assert!(vocab.contains_word("haustür"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        let bytes = rkyv::to_bytes::<Error>(&self.trie)?;
        wtr.write_all(VOCAB_MAGIC)?;
        wtr.write_all(&bytes)?;
        wtr.flush()?;
        Ok(())
    }

    /// [`Vocabulary::write`] で書き出した語彙を読み込みます。
    ///
    /// # エラー
    ///
    /// マジックバイトが一致しない場合、またはデータが壊れている場合にエラーを返します。
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; VOCAB_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != VOCAB_MAGIC {
            return Err(HypscoreError::invalid_format(
                "vocabulary",
                "The magic number of the input vocabulary mismatches.",
            ));
        }
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        Self::from_archive_bytes(&buf)
    }

    fn from_archive_bytes(data: &[u8]) -> Result<Self> {
        let mut aligned = AlignedVec::<16>::with_capacity(data.len());
        aligned.extend_from_slice(data);
        let trie = rkyv::from_bytes::<Trie, Error>(&aligned)?;
        if !trie.verify() {
            return Err(HypscoreError::invalid_format(
                "vocabulary",
                "The archived trie is broken.",
            ));
        }
        log::info!(
            "Loaded a compiled vocabulary of {} words ({} trie nodes)",
            trie.num_words(),
            trie.num_nodes(),
        );
        Ok(Self { trie })
    }

    /// トークンに対応するノードを探します。
    ///
    /// 単語でなく接頭辞としてのみ存在する場合もノードを返します。
    #[inline(always)]
    pub fn find(&self, token: &str) -> Option<NodeId> {
        self.trie.find(token)
    }

    /// ノードが完全な単語を表すかどうかを返します。
    #[inline(always)]
    pub fn is_word(&self, node: NodeId) -> bool {
        self.trie.is_word(node)
    }

    /// トークンが完全な単語として登録されているかどうかを返します。
    pub fn contains_word(&self, token: &str) -> bool {
        self.find(token).is_some_and(|n| self.is_word(n))
    }

    /// 登録されている単語数
    pub fn num_words(&self) -> usize {
        self.trie.num_words()
    }

    /// トライのノード数
    pub fn num_nodes(&self) -> usize {
        self.trie.num_nodes()
    }

    /// 内部のトライへの参照
    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}
