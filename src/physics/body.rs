//! 物理ボディモジュール
//!
//! 軸平行な矩形ボディの状態（位置、大きさ、質量、速度、蓄積された力、接触フラグ）を
//! 保持します。中心座標は保存せず、位置と大きさから毎回計算します。

use std::fmt;

use crate::physics::error::PhysicsError;
use crate::utils::math::{Rect, Vec2};

/// ボディのハンドル
///
/// ワールド内のアリーナのインデックスです。一度割り当てられると変わりません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// アリーナのインデックスとして取得
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 各方向の接触フラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFlags {
    /// 上面が接触している
    pub up: bool,
    /// 下面が接触している（接地）
    pub down: bool,
    /// 左面が接触している
    pub left: bool,
    /// 右面が接触している
    pub right: bool,
}

impl ContactFlags {
    /// 接触法線からフラグを記録
    ///
    /// 法線は衝突した相手の面の向きなので、x が正なら自分の左側、
    /// y が正なら自分の下側が触れています。
    pub fn record(&mut self, normal: Vec2) {
        if normal.x > 0.0 {
            self.left = true;
        } else if normal.x < 0.0 {
            self.right = true;
        }

        if normal.y > 0.0 {
            self.down = true;
        } else if normal.y < 0.0 {
            self.up = true;
        }
    }
}

/// 物理ボディ
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// x と y が最小となる隅（y軸上向きでは左下）
    position: Vec2,
    /// 幅と高さ
    size: Vec2,
    /// 質量
    mass: f64,
    /// シミュレーションで動かすかどうか
    movable: bool,
    /// 速度（1ティックあたりの移動量）
    velocity: Vec2,
    /// 次のティックで消費される力
    force: Vec2,
    /// 直前のティックでの接触状態
    contacts: ContactFlags,
}

impl Body {
    /// 新しいボディを作成
    ///
    /// # 引数
    ///
    /// * `position` - x と y が最小となる隅
    /// * `size` - 幅と高さ（正の値）
    /// * `mass` - 質量（正の値）
    /// * `movable` - シミュレーションで動かすかどうか
    ///
    /// # 戻り値
    ///
    /// * 作成されたボディ、または検証エラー
    pub fn new(position: Vec2, size: Vec2, mass: f64, movable: bool) -> Result<Self, PhysicsError> {
        if !position.is_finite() {
            return Err(PhysicsError::NonFinite { field: "position" });
        }
        if !size.is_finite() {
            return Err(PhysicsError::NonFinite { field: "size" });
        }
        if !mass.is_finite() {
            return Err(PhysicsError::NonFinite { field: "mass" });
        }
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(PhysicsError::InvalidSize { width: size.x, height: size.y });
        }
        if mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }

        Ok(Self {
            position,
            size,
            mass,
            movable,
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            contacts: ContactFlags::default(),
        })
    }

    /// 位置を相対的に移動
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.position += Vec2::new(dx, dy);
    }

    /// 力を加える（次のティックの終わりまで蓄積される）
    pub fn push(&mut self, fx: f64, fy: f64) {
        self.force += Vec2::new(fx, fy);
    }

    /// 速度を設定
    ///
    /// 動かないボディの速度は変更しません。
    pub fn set_velocity(&mut self, velocity: Vec2) -> &mut Self {
        if self.movable {
            self.velocity = velocity;
        }
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// 中心座標（位置と大きさから算出）
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn contacts(&self) -> ContactFlags {
        self.contacts
    }

    /// 地面に接しているか
    pub fn is_grounded(&self) -> bool {
        self.contacts.down
    }

    /// ボディの占める矩形
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub(crate) fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub(crate) fn contacts_mut(&mut self) -> &mut ContactFlags {
        &mut self.contacts
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vec2::zero();
    }
}
