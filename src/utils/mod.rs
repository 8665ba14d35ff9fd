//! ユーティリティモジュール
//!
//! このモジュールには、物理エンジン全体で使用される一般的なユーティリティが含まれています。

pub mod id_generator;
pub mod math;

// サブモジュールの再エクスポート
pub use id_generator::*;
pub use math::*;
