//! Fixed-point compensation
//!
//! Integer formulas from the sensor datasheet (32-bit variant). The shift
//! and multiply order is part of the result: every intermediate is a
//! wrapping 32-bit operation, matching the datasheet code bit for bit.
//!
//! Pressure compensation needs the fine temperature from the same
//! measurement cycle. That value is only produced by
//! [`compensate_temperature`], so the order is enforced by the types.

use super::calibration::CalibrationParameters;

/// Fine-resolution temperature carried from temperature to pressure
/// compensation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TFine(i32);

impl TFine {
    /// Raw fine temperature value
    pub const fn value(self) -> i32 {
        self.0
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(value: i32) -> Self {
        Self(value)
    }
}

/// Result of temperature compensation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    /// Temperature in centi-degrees Celsius (2508 = 25.08 °C)
    pub centi_celsius: i32,
    /// Input for pressure compensation of the same cycle
    pub t_fine: TFine,
}

/// Compensate a raw 20-bit temperature code
pub fn compensate_temperature(raw: u32, calib: &CalibrationParameters) -> Temperature {
    let adc = raw as i32;
    let t1 = calib.t1 as i32;
    let t2 = calib.t2 as i32;
    let t3 = calib.t3 as i32;

    let var1 = ((adc >> 3).wrapping_sub(t1 << 1)).wrapping_mul(t2) >> 11;
    let delta = (adc >> 4).wrapping_sub(t1);
    let var2 = ((delta.wrapping_mul(delta) >> 12).wrapping_mul(t3)) >> 14;

    let t_fine = var1.wrapping_add(var2);
    Temperature {
        centi_celsius: t_fine.wrapping_mul(5).wrapping_add(128) >> 8,
        t_fine: TFine(t_fine),
    }
}

/// Compensate a raw 20-bit pressure code, in Pa
///
/// Returns `None` when the calibration drives the denominator to zero.
pub fn compensate_pressure_checked(
    raw: u32,
    t_fine: TFine,
    calib: &CalibrationParameters,
) -> Option<u32> {
    let adc = raw as i32;

    let mut var1 = (t_fine.0 >> 1).wrapping_sub(64_000);
    let mut var2 = (((var1 >> 2).wrapping_mul(var1 >> 2)) >> 11).wrapping_mul(calib.p6 as i32);
    var2 = var2.wrapping_add(var1.wrapping_mul(calib.p5 as i32) << 1);
    var2 = (var2 >> 2).wrapping_add((calib.p4 as i32) << 16);
    var1 = ((((calib.p3 as i32).wrapping_mul(((var1 >> 2).wrapping_mul(var1 >> 2)) >> 13)) >> 3)
        .wrapping_add((calib.p2 as i32).wrapping_mul(var1) >> 1))
        >> 18;
    var1 = (32_768i32.wrapping_add(var1)).wrapping_mul(calib.p1 as i32) >> 15;

    if var1 == 0 {
        return None;
    }

    let mut p = (1_048_576i32.wrapping_sub(adc) as u32)
        .wrapping_sub((var2 >> 12) as u32)
        .wrapping_mul(3125);
    // Shift first while the top bit is clear, otherwise divide first so the
    // numerator does not lose its top bit.
    if p < 0x8000_0000 {
        p = (p << 1) / var1 as u32;
    } else {
        p = (p / var1 as u32).wrapping_mul(2);
    }

    let var1 = (calib.p9 as i32).wrapping_mul(((p >> 3).wrapping_mul(p >> 3) >> 13) as i32) >> 12;
    let var2 = ((p >> 2) as i32).wrapping_mul(calib.p8 as i32) >> 13;
    let correction = var1.wrapping_add(var2).wrapping_add(calib.p7 as i32) >> 4;

    Some((p as i32).wrapping_add(correction) as u32)
}

/// Compensate a raw 20-bit pressure code, in Pa
///
/// A zero denominator yields 0 Pa instead of dividing.
pub fn compensate_pressure(raw: u32, t_fine: TFine, calib: &CalibrationParameters) -> u32 {
    compensate_pressure_checked(raw, t_fine, calib).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DATASHEET: CalibrationParameters = CalibrationParameters {
        t1: 27504,
        t2: 26435,
        t3: -1000,
        p1: 36477,
        p2: -10685,
        p3: 3024,
        p4: 2855,
        p5: 140,
        p6: -7,
        p7: 15500,
        p8: -14600,
        p9: 6000,
    };

    #[test]
    fn test_datasheet_temperature() {
        let temp = compensate_temperature(519_888, &DATASHEET);
        assert_eq!(temp.t_fine.value(), 128_422);
        assert_eq!(temp.centi_celsius, 2508);
    }

    #[test]
    fn test_below_freezing_stays_negative() {
        let temp = compensate_temperature(420_000, &DATASHEET);
        assert_eq!(temp.t_fine.value(), -32_397);
        assert_eq!(temp.centi_celsius, -633);
    }

    #[test]
    fn test_datasheet_pressure() {
        let temp = compensate_temperature(519_888, &DATASHEET);
        assert_eq!(compensate_pressure(415_148, temp.t_fine, &DATASHEET), 100_656);
    }

    #[test]
    fn test_zero_p1_hits_division_guard() {
        let calib = CalibrationParameters {
            p1: 0,
            ..DATASHEET
        };
        let temp = compensate_temperature(519_888, &calib);
        assert_eq!(compensate_pressure_checked(415_148, temp.t_fine, &calib), None);
        assert_eq!(compensate_pressure(415_148, temp.t_fine, &calib), 0);
    }

    #[test]
    fn test_all_zero_calibration_does_not_panic() {
        let calib = CalibrationParameters::default();
        let temp = compensate_temperature(0xF_FFFF, &calib);
        assert_eq!(temp.t_fine.value(), 0);
        assert_eq!(compensate_pressure(0xF_FFFF, temp.t_fine, &calib), 0);
    }

    #[test]
    fn test_pressure_depends_on_cycle_temperature() {
        let warm = compensate_temperature(519_888, &DATASHEET);
        let cold = compensate_temperature(480_000, &DATASHEET);
        assert_ne!(
            compensate_pressure(415_148, warm.t_fine, &DATASHEET),
            compensate_pressure(415_148, cold.t_fine, &DATASHEET)
        );
    }

    #[test]
    fn test_fine_temperature_passes_through() {
        let p = compensate_pressure(415_148, TFine::from_raw(128_422), &DATASHEET);
        assert_eq!(p, 100_656);
    }

    proptest! {
        #[test]
        fn prop_compensation_is_deterministic(
            raw_t in 0u32..=0xF_FFFF,
            raw_p in 0u32..=0xF_FFFF,
            t2 in any::<i16>(),
            p9 in any::<i16>(),
        ) {
            let calib = CalibrationParameters { t2, p9, ..DATASHEET };
            let a = compensate_temperature(raw_t, &calib);
            let b = compensate_temperature(raw_t, &calib);
            prop_assert_eq!(a, b);
            prop_assert_eq!(
                compensate_pressure_checked(raw_p, a.t_fine, &calib),
                compensate_pressure_checked(raw_p, b.t_fine, &calib)
            );
        }

        #[test]
        fn prop_guard_never_divides(raw_p in 0u32..=0xF_FFFF, t_fine in any::<i32>()) {
            let calib = CalibrationParameters { p1: 0, ..DATASHEET };
            prop_assert_eq!(compensate_pressure_checked(raw_p, TFine::from_raw(t_fine), &calib), None);
        }
    }
}
