//! ID生成ユーティリティモジュール
//!
//! 名前を指定されずに追加された物理ボディのための、決定的な名前生成器を提供します。

/// 自動生成される名前の接頭辞
pub const BODY_NAME_PREFIX: &str = "physics_body_";

/// 単調増加カウンタによるボディ名生成器
///
/// 同じ呼び出し順序であれば常に同じ名前列を生成します。
#[derive(Debug, Clone, Default)]
pub struct BodyNameGenerator {
    /// 次に試すカウンタ値
    next_id: u64,
}

impl BodyNameGenerator {
    /// 新しい名前生成器を作成
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// まだ使われていない名前を生成
    ///
    /// # 引数
    ///
    /// * `is_taken` - 名前が既に使用されているかを判定する関数
    ///
    /// # 戻り値
    ///
    /// * 既存の名前と衝突しない新しい名前
    pub fn next_free(&mut self, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            let name = format!("{}{}", BODY_NAME_PREFIX, self.next_id);
            self.next_id += 1;

            if !is_taken(&name) {
                return name;
            }
        }
    }
}
