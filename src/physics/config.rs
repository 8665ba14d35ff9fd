//! 物理設定モジュール

use serde::{Deserialize, Serialize};

use crate::physics::error::PhysicsError;

/// デフォルトの重力
pub const DEFAULT_GRAVITY: f64 = 1.0;
/// デフォルトの空気抵抗係数
pub const DEFAULT_FRICTION: f64 = 0.1;
/// ゼロ除算を避けるための微小値
pub const DEFAULT_EPSILON: f64 = 0.000001;

/// 力に経過時間を掛けるかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceScaling {
    /// 1ティックを単位時間とし、経過時間は力に影響しない
    #[default]
    Unscaled,
    /// 合力（外力 + 抵抗 + 重力）に経過時間を掛けてから質量で割る
    TimeScaled,
}

/// 物理ワールドの設定
///
/// 値はワールドの生存期間中は変わりません。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// 重力（下向き、質量に比例）
    pub gravity: f64,
    /// 速度に比例する抵抗の係数
    pub friction: f64,
    /// 線分判定で方向成分がゼロのときに使う微小値
    pub epsilon: f64,
    /// 経過時間の扱い
    pub force_scaling: ForceScaling,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
            epsilon: DEFAULT_EPSILON,
            force_scaling: ForceScaling::Unscaled,
        }
    }
}

impl PhysicsConfig {
    /// JSON文字列から設定を読み込む
    ///
    /// 省略された項目はデフォルト値になります。
    pub fn from_json(json: &str) -> Result<Self, PhysicsError> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!("gravity = {}", self.gravity)));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(PhysicsError::InvalidConfig(format!("friction = {}", self.friction)));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(PhysicsError::InvalidConfig(format!("epsilon = {}", self.epsilon)));
        }
        Ok(())
    }
}
