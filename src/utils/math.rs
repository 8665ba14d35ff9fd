//! 数学ユーティリティモジュール
//!
//! このモジュールには、物理演算で使用される2次元ベクトルと矩形、
//! および浮動小数点の比較関数が含まれています。

use std::ops::{Add, AddAssign, Mul, Sub};

/// 浮動小数点比較の許容誤差
pub const TOLERANCE: f64 = 1e-9;

/// 値がほぼゼロかどうかを判定
///
/// # 引数
///
/// * `value` - 判定する値
///
/// # 戻り値
///
/// * `TOLERANCE` 以内なら `true`
pub fn approx_zero(value: f64) -> bool {
    value.abs() <= TOLERANCE
}

/// 2次元ベクトル
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// 両成分が厳密にゼロかどうか
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// 両成分が有限値かどうか
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// 軸平行な矩形
///
/// y軸は上向きです。`position` は x と y が最小となる隅（左下）、`size` は幅と高さです。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// x と y が最小となる隅
    pub position: Vec2,
    /// 幅と高さ
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_parts(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// 矩形の中心
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.size.x / 2.0,
            self.position.y + self.size.y / 2.0,
        )
    }

    /// x方向の終端
    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    /// y方向の終端
    pub fn top(&self) -> f64 {
        self.position.y + self.size.y
    }

    /// ミンコフスキー和で矩形を拡張
    ///
    /// 原点を `size` の半分だけ戻し、大きさを `size` だけ広げます。
    /// 移動する矩形の中心を点として扱えるようになります。
    ///
    /// # 引数
    ///
    /// * `size` - 移動する矩形の大きさ
    ///
    /// # 戻り値
    ///
    /// * 拡張された新しい矩形
    pub fn expanded_by(&self, size: Vec2) -> Rect {
        Rect {
            position: Vec2::new(
                self.position.x - size.x / 2.0,
                self.position.y - size.y / 2.0,
            ),
            size: Vec2::new(self.size.x + size.x, self.size.y + size.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let mut a = Vec2::new(1.5, -2.0);
        let b = Vec2::new(0.5, 4.0);

        assert_eq!(a + b, Vec2::new(2.0, 2.0));
        assert_eq!(a - b, Vec2::new(1.0, -6.0));
        assert_eq!(a * 2.0, Vec2::new(3.0, -4.0));

        a += b;
        assert_eq!(a, Vec2::new(2.0, 2.0));
        assert!(Vec2::zero().is_zero());
        assert!(!Vec2::new(f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_rect_edges() {
        // y軸は上向きなので top は y + 高さ
        let rect = Rect::new(20.0, 10.0, 30.0, 5.0);

        assert_eq!(rect.right(), 50.0);
        assert_eq!(rect.top(), 15.0);
        assert_eq!(rect.center(), Vec2::new(35.0, 12.5));
    }

    #[test]
    fn test_rect_expansion() {
        // 目標 (25, 0, 20, 20) を 20x20 の矩形で拡張
        let target = Rect::new(25.0, 0.0, 20.0, 20.0);
        let expanded = target.expanded_by(Vec2::new(20.0, 20.0));

        assert_eq!(expanded, Rect::new(15.0, -10.0, 40.0, 40.0));
        // 中心は変わらない
        assert_eq!(expanded.center(), target.center());
    }

    #[test]
    fn test_approx_zero() {
        assert!(approx_zero(1e-12));
        assert!(approx_zero(-1e-12));
        assert!(!approx_zero(1e-6));
    }
}
