use fixed::types::I32F32;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Fixed-point length in PDF points, stored with milli-point precision so
/// layout arithmetic is reproducible across platforms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Pt(I32F32);

impl Pt {
    pub const ZERO: Pt = Pt(I32F32::from_bits(0));

    /// Non-finite input collapses to zero.
    pub fn from_f32(value: f32) -> Pt {
        if !value.is_finite() {
            return Pt::ZERO;
        }
        Pt::from_milli_i64((f64::from(value) * 1000.0).round() as i64)
    }

    pub fn from_mm(value: f32) -> Pt {
        Pt::from_f32(value * PT_PER_MM)
    }

    pub fn from_milli_i64(milli: i64) -> Pt {
        Pt(I32F32::saturating_from_num(milli as f64 / 1000.0))
    }

    pub fn to_f32(self) -> f32 {
        self.0.to_num()
    }

    pub fn to_mm(self) -> f32 {
        self.to_f32() / PT_PER_MM
    }

    pub fn to_milli_i64(self) -> i64 {
        (self.0.to_num::<f64>() * 1000.0).round() as i64
    }

    pub fn max(self, other: Pt) -> Pt {
        if self >= other { self } else { other }
    }

    /// `self * num / denom`, rounded half away from zero at milli precision.
    pub fn mul_ratio(self, num: i32, denom: i32) -> Pt {
        if denom == 0 {
            return Pt::ZERO;
        }
        let scaled = i128::from(self.to_milli_i64()) * i128::from(num);
        let denom = i128::from(denom);
        let half = denom.abs() / 2;
        let rounded = if (scaled >= 0) == (denom > 0) {
            (scaled.abs() + half) / denom.abs()
        } else {
            -((scaled.abs() + half) / denom.abs())
        };
        Pt::from_milli_i64(rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

impl std::ops::Add for Pt {
    type Output = Pt;
    fn add(self, rhs: Pt) -> Pt {
        Pt::from_milli_i64(self.to_milli_i64().saturating_add(rhs.to_milli_i64()))
    }
}

impl std::ops::AddAssign for Pt {
    fn add_assign(&mut self, rhs: Pt) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Pt {
    type Output = Pt;
    fn sub(self, rhs: Pt) -> Pt {
        Pt::from_milli_i64(self.to_milli_i64().saturating_sub(rhs.to_milli_i64()))
    }
}

impl std::ops::Mul<i32> for Pt {
    type Output = Pt;
    fn mul(self, rhs: i32) -> Pt {
        self.mul_ratio(rhs, 1)
    }
}

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;
    fn mul(self, rhs: f32) -> Pt {
        Pt::from_f32(self.to_f32() * rhs)
    }
}

impl std::ops::Div<i32> for Pt {
    type Output = Pt;
    fn div(self, rhs: i32) -> Pt {
        self.mul_ratio(1, rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: Pt,
    pub height: Pt,
}

impl Size {
    /// 210mm x 297mm.
    pub fn a4() -> Self {
        Self::from_mm(210.0, 297.0)
    }

    pub fn letter() -> Self {
        Self {
            width: Pt::from_f32(612.0),
            height: Pt::from_f32(792.0),
        }
    }

    pub fn from_mm(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width: Pt::from_mm(width_mm),
            height: Pt::from_mm(height_mm),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    pub fn all_mm(value: f32) -> Self {
        let v = Pt::from_mm(value);
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm_round_trip_is_stable_to_a_micron() {
        let value = Pt::from_mm(250.0);
        assert!((value.to_mm() - 250.0).abs() < 0.001);
    }

    #[test]
    fn a4_matches_iso_points() {
        let size = Size::a4();
        assert!((size.width.to_f32() - 595.276).abs() < 0.01);
        assert!((size.height.to_f32() - 841.89).abs() < 0.01);
    }

    #[test]
    fn mul_ratio_rounds_half_away_from_zero() {
        let value = Pt::from_f32(10.0).mul_ratio(1, 3);
        assert_eq!(value.to_milli_i64(), 3333);
        assert_eq!(Pt::from_f32(-10.0).mul_ratio(1, 3).to_milli_i64(), -3333);
        assert_eq!(Pt::from_f32(10.0).mul_ratio(1, -3).to_milli_i64(), -3333);
        assert_eq!(Pt::from_f32(1.0).mul_ratio(1, 0), Pt::ZERO);
    }

    #[test]
    fn arithmetic_stays_on_the_milli_grid() {
        let a = Pt::from_f32(0.1);
        let b = Pt::from_f32(0.2);
        assert_eq!((a + b).to_milli_i64(), 300);
        assert_eq!((b - a).to_milli_i64(), 100);
        assert_eq!((Pt::from_f32(5.0) / 2).to_milli_i64(), 2500);
        assert_eq!((Pt::from_f32(1.5) * 2).to_milli_i64(), 3000);
        assert_eq!(Pt::from_f32(f32::NAN), Pt::ZERO);
    }

    #[test]
    fn rgb8_scales_channels() {
        let color = Color::rgb8(255, 0, 51);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-6);
    }
}
