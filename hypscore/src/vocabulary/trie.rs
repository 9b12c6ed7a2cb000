//! 語彙のための文字単位トライ
//!
//! ノードはアリーナ（`Vec`）に格納され、[`NodeId`] で参照されます。
//! ノードIDはトライが生きている間は常に有効なので、仮説の状態に
//! ポインタの代わりに保持できます。

use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::FromU32;

/// トライ内のノードを指すインデックス
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// 根ノード（空文字列に対応）
    pub const ROOT: Self = Self(0);

    /// アリーナ上の位置を返します。
    #[inline(always)]
    pub fn index(self) -> usize {
        usize::from_u32(self.0)
    }
}

/// 子ノードへの辺
#[derive(Clone, Debug, Eq, PartialEq, Archive, Serialize, Deserialize)]
pub(crate) struct Edge {
    /// 辺のラベル（文字のコードポイント）
    label: u32,
    target: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Archive, Serialize, Deserialize)]
pub(crate) struct TrieNode {
    is_word: bool,
    // sorted by label
    edges: Vec<Edge>,
}

/// 文字をキーとする接頭辞木
///
/// 各ノードは、根からそのノードまでの経路が語彙の完全な単語を表すかどうか
/// （`is_word`）を記録します。経路が存在するだけのノードは既知の接頭辞です。
#[derive(Clone, Debug, Eq, PartialEq, Archive, Serialize, Deserialize)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }
}

impl Trie {
    /// 根ノードのみを持つ空のトライを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 単語を挿入し、終端ノードに単語フラグを立てます。
    ///
    /// # 戻り値
    ///
    /// 終端ノードのID
    ///
    /// # エラー
    ///
    /// ノード数が`u32`の範囲を超えた場合にエラーを返します。
    pub(crate) fn insert(&mut self, word: &str) -> Result<NodeId> {
        let mut cur = 0;
        for c in word.chars() {
            cur = self.get_or_create_child(cur, u32::from(c))?;
        }
        self.nodes[usize::from_u32(cur)].is_word = true;
        Ok(NodeId(cur))
    }

    fn get_or_create_child(&mut self, parent: u32, label: u32) -> Result<u32> {
        let parent = usize::from_u32(parent);
        match self.nodes[parent]
            .edges
            .binary_search_by_key(&label, |e| e.label)
        {
            Ok(i) => Ok(self.nodes[parent].edges[i].target),
            Err(i) => {
                let target = u32::try_from(self.nodes.len())?;
                self.nodes.push(TrieNode::default());
                self.nodes[parent].edges.insert(i, Edge { label, target });
                Ok(target)
            }
        }
    }

    #[inline(always)]
    fn child(&self, node: u32, label: u32) -> Option<u32> {
        let edges = &self.nodes[usize::from_u32(node)].edges;
        edges
            .binary_search_by_key(&label, |e| e.label)
            .ok()
            .map(|i| edges[i].target)
    }

    /// トークンを1文字ずつたどります。
    ///
    /// トークン全体が経路として存在すれば、その終端ノードを返します。
    /// 終端ノードが単語かどうかは問いません（接頭辞の存在確認に使えます）。
    /// 途中で文字が見つからなければ `None` を返します。
    pub fn find(&self, token: &str) -> Option<NodeId> {
        let mut cur = 0;
        for c in token.chars() {
            cur = self.child(cur, u32::from(c))?;
        }
        Some(NodeId(cur))
    }

    /// ノードが完全な単語を表すかどうかを返します。
    ///
    /// # パニック
    ///
    /// 別のトライから得たIDを渡した場合、範囲外アクセスでパニックすることがあります。
    #[inline(always)]
    pub fn is_word(&self, node: NodeId) -> bool {
        self.nodes[node.index()].is_word
    }

    /// ノード数を返します（根を含む）。
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// 登録されている単語数を返します。
    pub fn num_words(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_word).count()
    }

    /// アーカイブから復元したトライの構造を検証します。
    ///
    /// 根が存在し、すべての辺の行き先がアリーナ内にあり、
    /// 各ノードの辺がラベル順に重複なく並んでいれば `true` を返します。
    pub(crate) fn verify(&self) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let num_nodes = self.nodes.len();
        for node in &self.nodes {
            for e in &node.edges {
                if usize::from_u32(e.target) >= num_nodes || e.target == 0 {
                    return false;
                }
            }
            if node.edges.windows(2).any(|w| w[0].label >= w[1].label) {
                return false;
            }
        }
        true
    }
}
