//! Lengths crossing API boundaries; catalog values stay plain mm / m.

use uom::si::f64::Length as UomLength;

// Public canonical unit type (SI, f64)
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn as_m(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}
