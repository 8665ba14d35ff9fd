//! 物理エラーモジュール

use thiserror::Error;

use crate::physics::body::BodyHandle;

/// 物理エンジンのエラー
///
/// いずれもボディ作成・設定読み込み時に同期的に報告されます。
/// シミュレーションの更新中にエラーは発生しません。
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// 質量が正でない
    #[error("質量は正の値でなければなりません: {0}")]
    InvalidMass(f64),

    /// 幅または高さが正でない
    #[error("大きさは正の値でなければなりません: {width} x {height}")]
    InvalidSize { width: f64, height: f64 },

    /// 有限でない値
    #[error("{field} が有限値ではありません")]
    NonFinite { field: &'static str },

    /// 名前の重複
    #[error("ボディ名が既に使用されています: {0}")]
    DuplicateName(String),

    /// 存在しないボディ
    #[error("ボディが見つかりません: {0}")]
    UnknownBody(BodyHandle),

    /// 不正な設定値
    #[error("不正な物理設定: {0}")]
    InvalidConfig(String),

    /// 設定の解析エラー
    #[error("物理設定の解析に失敗しました: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
