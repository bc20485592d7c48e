//! LiPo charge estimation.
//!
//! The ADC sampling lives in the shell; the engine only converts pack
//! millivolts to a display percentage through a 5%-step discharge table
//! (single-cell LiPo, https://blog.ampow.com/lipo-voltage-chart/).

/// Battery voltage collaborator. Returns pack millivolts.
pub trait Battery {
    fn millivolts(&mut self) -> u16;
}

/// Discharge curve: (threshold millivolts, percent at or above it).
const CURVE: [(u16, u8); 21] = [
    (4200, 100),
    (4150, 95),
    (4110, 90),
    (4080, 85),
    (4020, 80),
    (3980, 75),
    (3950, 70),
    (3910, 65),
    (3870, 60),
    (3850, 55),
    (3840, 50),
    (3820, 45),
    (3800, 40),
    (3790, 35),
    (3770, 30),
    (3750, 25),
    (3730, 20),
    (3710, 15),
    (3690, 10),
    (3061, 5),
    (0, 0),
];

/// Map pack millivolts to a 0..=100 display percentage.
pub fn percent_from_millivolts(mv: u16) -> u8 {
    for &(threshold, percent) in &CURVE {
        if mv > threshold {
            return percent;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(percent_from_millivolts(4250), 100);
        assert_eq!(percent_from_millivolts(3000), 0);
        assert_eq!(percent_from_millivolts(0), 0);
    }

    #[test]
    fn mid_curve() {
        assert_eq!(percent_from_millivolts(3845), 50);
        assert_eq!(percent_from_millivolts(3700), 10);
    }

    #[test]
    fn monotonic_in_voltage() {
        let mut last = 0;
        for mv in (3000..=4300).step_by(10) {
            let pct = percent_from_millivolts(mv);
            assert!(pct >= last, "curve dipped at {mv} mV");
            last = pct;
        }
    }

    #[test]
    fn curve_thresholds_descend() {
        for pair in CURVE.windows(2) {
            assert!(pair[0].0 > pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
    }
}
