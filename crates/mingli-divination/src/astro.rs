//! Positions of the sun and moon for the calendar.
//!
//! The sun's apparent longitude comes from a truncated VSOP87 series for the
//! Earth (Meeus, *Astronomical Algorithms*, appendix III), which places solar
//! terms within a minute over the last few centuries. New moons follow Meeus
//! chapter 49. Julian days are UT unless named `jde` (dynamical time); civil
//! times are China Standard Time, UTC+8.

#![allow(clippy::unreadable_literal, clippy::excessive_precision)]

use chrono::{DateTime, NaiveDateTime};

const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const CST_OFFSET_SECS: i64 = 8 * 3600;
const SECONDS_PER_DAY: f64 = 86_400.0;
const TROPICAL_YEAR: f64 = 365.242_2;
pub const SYNODIC_MONTH: f64 = 29.530_588_861;
/// Mean new moon of 2000-01-06, lunation 0.
const LUNATION_ZERO: f64 = 2_451_550.097_66;

/// (amplitude, phase, frequency), scaled by 1e8.
type Term = (f64, f64, f64);

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

/// Sum of `A cos(B + C tau)` per power of `tau`.
fn series(powers: &[&[Term]], tau: f64) -> f64 {
    let sum = powers.iter().rev().fold(0.0, |acc, terms| {
        acc * tau + terms.iter().map(|(a, b, c)| a * (b + c * tau).cos()).sum::<f64>()
    });
    sum / 1e8
}

/// Apparent geocentric longitude of the sun, degrees in `[0, 360)`.
pub fn sun_longitude(jde: f64) -> f64 {
    let tau = (jde - J2000) / 365_250.0;
    let t = tau * 10.0;
    let earth = series(&[EARTH_L0, EARTH_L1, EARTH_L2, EARTH_L3, EARTH_L4, EARTH_L5], tau);
    let radius = series(&[EARTH_R0, EARTH_R1, EARTH_R2, EARTH_R3, EARTH_R4], tau);
    // heliocentric Earth to geocentric Sun, then to the FK5 frame
    let geometric = earth.to_degrees() + 180.0 - 0.090_33 / 3600.0;

    let omega = 125.044_52 - 1_934.136_261 * t;
    let sun_mean = 280.4665 + 36_000.7698 * t;
    let moon_mean = 218.3165 + 481_267.8813 * t;
    let nutation = (-17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * sun_mean) - 0.23 * sin_deg(2.0 * moon_mean)
        + 0.21 * sin_deg(2.0 * omega))
        / 3600.0;
    let aberration = -20.4898 / 3600.0 / radius;
    (geometric + nutation + aberration).rem_euclid(360.0)
}

/// TT minus UT in seconds, from the Espenak and Meeus polynomial fits.
pub fn delta_t(year: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match year {
        y if y < 1900.0 => long_term(y),
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2) + 0.0017275 * t.powi(3) + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

pub fn ut_to_tt(jd: f64) -> f64 {
    jd + delta_t(decimal_year(jd)) / SECONDS_PER_DAY
}

pub fn tt_to_ut(jde: f64) -> f64 {
    jde - delta_t(decimal_year(jde)) / SECONDS_PER_DAY
}

/// Julian day at 0h UT of a Gregorian date; `day` may carry a fraction.
pub fn julian_day(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 { (year - 1, month + 12) } else { (year, month) };
    let y = f64::from(y);
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * f64::from(m + 1)).floor() + day + b - 1524.5
}

pub fn jd_from_cst(at: NaiveDateTime) -> f64 {
    let secs = at.and_utc().timestamp() - CST_OFFSET_SECS;
    UNIX_EPOCH_JD + secs as f64 / SECONDS_PER_DAY
}

/// Civil time in China for a UT Julian day, to the second.
pub fn cst_from_jd(jd: f64) -> NaiveDateTime {
    let secs = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY).round() as i64 + CST_OFFSET_SECS;
    DateTime::from_timestamp(secs, 0).map_or(NaiveDateTime::MAX, |t| t.naive_utc())
}

/// UT Julian day when the sun's apparent longitude reaches `target` degrees,
/// searching from `guess`.
pub fn sun_reaches(target: f64, guess: f64) -> f64 {
    let mut jd = guess;
    for _ in 0..30 {
        let behind = (target - sun_longitude(ut_to_tt(jd)) + 180.0).rem_euclid(360.0) - 180.0;
        let step = behind * TROPICAL_YEAR / 360.0;
        jd += step;
        if step.abs() < 1e-7 {
            break;
        }
    }
    jd
}

/// Lunation number of the last mean new moon at or before `jd`.
pub fn lunation_index(jd: f64) -> i64 {
    ((jd - LUNATION_ZERO) / SYNODIC_MONTH).floor() as i64
}

// (coefficient, power of E, multiples of M, M', F, Ω)
const NEW_MOON_TERMS: [(f64, i32, f64, f64, f64, f64); 25] = [
    (-0.40720, 0, 0.0, 1.0, 0.0, 0.0),
    (0.17241, 1, 1.0, 0.0, 0.0, 0.0),
    (0.01608, 0, 0.0, 2.0, 0.0, 0.0),
    (0.01039, 0, 0.0, 0.0, 2.0, 0.0),
    (0.00739, 1, -1.0, 1.0, 0.0, 0.0),
    (-0.00514, 1, 1.0, 1.0, 0.0, 0.0),
    (0.00208, 2, 2.0, 0.0, 0.0, 0.0),
    (-0.00111, 0, 0.0, 1.0, -2.0, 0.0),
    (-0.00057, 0, 0.0, 1.0, 2.0, 0.0),
    (0.00056, 1, 1.0, 2.0, 0.0, 0.0),
    (-0.00042, 0, 0.0, 3.0, 0.0, 0.0),
    (0.00042, 1, 1.0, 0.0, 2.0, 0.0),
    (0.00038, 1, 1.0, 0.0, -2.0, 0.0),
    (-0.00024, 1, -1.0, 2.0, 0.0, 0.0),
    (-0.00017, 0, 0.0, 0.0, 0.0, 1.0),
    (-0.00007, 0, 2.0, 1.0, 0.0, 0.0),
    (0.00004, 0, 0.0, 2.0, -2.0, 0.0),
    (0.00004, 0, 3.0, 0.0, 0.0, 0.0),
    (0.00003, 0, 1.0, 1.0, -2.0, 0.0),
    (0.00003, 0, 0.0, 2.0, 2.0, 0.0),
    (-0.00003, 0, 1.0, 1.0, 2.0, 0.0),
    (0.00003, 0, -1.0, 1.0, 2.0, 0.0),
    (-0.00002, 0, -1.0, 1.0, -2.0, 0.0),
    (-0.00002, 0, 1.0, 3.0, 0.0, 0.0),
    (0.00002, 0, 0.0, 4.0, 0.0, 0.0),
];

// (argument at k = 0, per lunation, per T², coefficient)
const PLANETARY_TERMS: [(f64, f64, f64, f64); 14] = [
    (299.77, 0.107408, -0.009173, 0.000325),
    (251.88, 0.016321, 0.0, 0.000165),
    (251.83, 26.651886, 0.0, 0.000164),
    (349.42, 36.412478, 0.0, 0.000126),
    (84.66, 18.206239, 0.0, 0.000110),
    (141.74, 53.303771, 0.0, 0.000062),
    (207.14, 2.453732, 0.0, 0.000060),
    (154.84, 7.306860, 0.0, 0.000056),
    (34.52, 27.261239, 0.0, 0.000047),
    (207.19, 0.121824, 0.0, 0.000042),
    (291.34, 1.844379, 0.0, 0.000040),
    (161.72, 24.198154, 0.0, 0.000037),
    (239.56, 25.513099, 0.0, 0.000035),
    (331.55, 3.592518, 0.0, 0.000023),
];

/// UT Julian day of true new moon number `k` (0 = 2000-01-06).
pub fn new_moon(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1236.85;
    let (t2, t3, t4) = (t * t, t.powi(3), t.powi(4));
    let mean = LUNATION_ZERO + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3 + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let sun = 2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3;
    let moon = 201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3 - 0.000_000_058 * t4;
    let latitude = 160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3 + 0.000_000_011 * t4;
    let node = 124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3;

    let periodic: f64 = NEW_MOON_TERMS
        .iter()
        .map(|&(coef, e_pow, m, mp, f, o)| {
            coef * e.powi(e_pow) * sin_deg(m * sun + mp * moon + f * latitude + o * node)
        })
        .sum();
    let planetary: f64 = PLANETARY_TERMS
        .iter()
        .map(|&(base, per_k, per_t2, coef)| coef * sin_deg(base + per_k * k + per_t2 * t2))
        .sum();
    tt_to_ut(mean + periodic + planetary)
}

const EARTH_L0: &[Term] = &[
    (175_347_046.0, 0.0, 0.0),
    (3_341_656.0, 4.6692568, 6283.07585),
    (34894.0, 4.6261, 12566.1517),
    (3497.0, 2.7441, 5753.3849),
    (3418.0, 2.8289, 3.5231),
    (3136.0, 3.6277, 77713.7715),
    (2676.0, 4.4181, 7860.4194),
    (2343.0, 6.1352, 3930.2097),
    (1324.0, 0.7425, 11506.7698),
    (1273.0, 2.0371, 529.691),
    (1199.0, 1.1096, 1577.3435),
    (990.0, 5.233, 5884.927),
    (902.0, 2.045, 26.298),
    (857.0, 3.508, 398.149),
    (780.0, 1.179, 5223.694),
    (753.0, 2.533, 5507.553),
    (505.0, 4.583, 18849.228),
    (492.0, 4.205, 775.523),
    (357.0, 2.92, 0.067),
    (317.0, 5.849, 11790.629),
    (284.0, 1.899, 796.298),
    (271.0, 0.315, 10977.079),
    (243.0, 0.345, 5486.778),
    (206.0, 4.806, 2544.314),
    (205.0, 1.869, 5573.143),
    (202.0, 2.458, 6069.777),
    (156.0, 0.833, 213.299),
    (132.0, 3.411, 2942.463),
    (126.0, 1.083, 20.775),
    (115.0, 0.645, 0.98),
    (103.0, 0.636, 4694.003),
    (102.0, 0.976, 15720.839),
    (102.0, 4.267, 7.114),
    (99.0, 6.21, 2146.17),
    (98.0, 0.68, 155.42),
    (86.0, 5.98, 161000.69),
    (85.0, 1.3, 6275.96),
    (85.0, 3.67, 71430.7),
    (80.0, 1.81, 17260.15),
    (79.0, 3.04, 12036.46),
    (75.0, 1.76, 5088.63),
    (74.0, 3.5, 3154.69),
    (74.0, 4.68, 801.82),
    (70.0, 0.83, 9437.76),
    (62.0, 3.98, 8827.39),
    (61.0, 1.82, 7084.9),
    (57.0, 2.78, 6286.6),
    (56.0, 4.39, 14143.5),
    (56.0, 3.47, 6279.55),
    (52.0, 0.19, 12139.55),
    (52.0, 1.33, 1748.02),
    (51.0, 0.28, 5856.48),
    (49.0, 0.49, 1194.45),
    (41.0, 5.37, 8429.24),
    (41.0, 2.4, 19651.05),
    (39.0, 6.17, 10447.39),
    (37.0, 6.04, 10213.29),
    (37.0, 2.57, 1059.38),
    (36.0, 1.71, 2352.87),
    (36.0, 1.78, 6812.77),
    (33.0, 0.59, 17789.85),
    (30.0, 0.44, 83996.85),
    (30.0, 2.74, 1349.87),
    (25.0, 3.16, 4690.48),
];

const EARTH_L1: &[Term] = &[
    (628_331_966_747.0, 0.0, 0.0),
    (206_059.0, 2.678235, 6283.07585),
    (4303.0, 2.6351, 12566.1517),
    (425.0, 1.59, 3.523),
    (119.0, 5.796, 26.298),
    (109.0, 2.966, 1577.344),
    (93.0, 2.59, 18849.23),
    (72.0, 1.14, 529.69),
    (68.0, 1.87, 398.15),
    (67.0, 4.41, 5507.55),
    (59.0, 2.89, 5223.69),
    (56.0, 2.17, 155.42),
    (45.0, 0.4, 796.3),
    (36.0, 0.47, 775.52),
    (29.0, 2.65, 7.11),
    (21.0, 5.34, 0.98),
    (19.0, 1.85, 5486.78),
    (19.0, 4.97, 213.3),
    (17.0, 2.99, 6275.96),
    (16.0, 0.03, 2544.31),
    (16.0, 1.43, 2146.17),
    (15.0, 1.21, 10977.08),
    (12.0, 2.83, 1748.02),
    (12.0, 3.26, 5088.63),
    (12.0, 5.27, 1194.45),
    (12.0, 2.08, 4694.0),
    (11.0, 0.77, 553.57),
    (10.0, 1.3, 6286.6),
    (10.0, 4.24, 1349.87),
    (9.0, 2.7, 242.73),
    (9.0, 5.64, 951.72),
    (8.0, 5.3, 2352.87),
    (6.0, 2.65, 9437.76),
    (6.0, 4.67, 4690.48),
];

const EARTH_L2: &[Term] = &[
    (52919.0, 0.0, 0.0),
    (8720.0, 1.0721, 6283.0758),
    (309.0, 0.867, 12566.152),
    (27.0, 0.05, 3.52),
    (16.0, 5.19, 26.3),
    (16.0, 3.68, 155.42),
    (10.0, 0.76, 18849.23),
    (9.0, 2.06, 77713.77),
    (7.0, 0.83, 775.52),
    (5.0, 4.66, 1577.34),
    (4.0, 1.03, 7.11),
    (4.0, 3.44, 5573.14),
    (3.0, 5.14, 796.3),
    (3.0, 6.05, 5507.55),
    (3.0, 1.19, 242.73),
    (3.0, 6.12, 529.69),
    (3.0, 0.31, 398.15),
    (3.0, 2.28, 553.57),
    (2.0, 4.38, 5223.69),
    (2.0, 3.75, 0.98),
];

const EARTH_L3: &[Term] = &[
    (289.0, 5.844, 6283.076),
    (35.0, 0.0, 0.0),
    (17.0, 5.49, 12566.15),
    (3.0, 5.2, 155.42),
    (1.0, 4.72, 3.52),
    (1.0, 5.3, 18849.23),
    (1.0, 5.97, 242.73),
];

const EARTH_L4: &[Term] = &[
    (114.0, 3.142, 0.0),
    (8.0, 4.13, 6283.08),
    (1.0, 3.84, 12566.15),
];

const EARTH_L5: &[Term] = &[
    (1.0, 3.14, 0.0),
];

const EARTH_R0: &[Term] = &[
    (100_013_989.0, 0.0, 0.0),
    (1_670_700.0, 3.0984635, 6283.07585),
    (13956.0, 3.05525, 12566.1517),
    (3084.0, 5.1985, 77713.7715),
    (1628.0, 1.1739, 5753.3849),
    (1576.0, 2.8469, 7860.4194),
    (925.0, 5.453, 11506.77),
    (542.0, 4.564, 3930.21),
    (472.0, 3.661, 5884.927),
    (346.0, 0.964, 5507.553),
    (329.0, 5.9, 5223.694),
    (307.0, 0.299, 5573.143),
    (243.0, 4.273, 11790.629),
    (212.0, 5.847, 1577.344),
    (186.0, 5.022, 10977.079),
    (175.0, 3.012, 18849.228),
    (110.0, 5.055, 5486.778),
    (98.0, 0.89, 6069.78),
    (86.0, 5.69, 15720.84),
    (86.0, 1.27, 161000.69),
    (65.0, 0.27, 17260.15),
    (63.0, 0.92, 529.69),
    (57.0, 2.01, 83996.85),
    (56.0, 5.24, 71430.7),
    (49.0, 3.25, 2544.31),
    (47.0, 2.58, 775.52),
    (45.0, 5.54, 9437.76),
    (43.0, 6.01, 6275.96),
    (39.0, 5.36, 4694.0),
    (38.0, 2.39, 8827.39),
    (37.0, 0.83, 19651.05),
    (37.0, 4.9, 12139.55),
    (36.0, 1.67, 12036.46),
    (35.0, 1.84, 2942.46),
    (33.0, 0.24, 7084.9),
    (32.0, 0.18, 5088.63),
    (32.0, 1.78, 398.15),
    (28.0, 1.21, 6286.6),
    (28.0, 1.9, 6279.55),
    (26.0, 4.59, 10447.39),
];

const EARTH_R1: &[Term] = &[
    (103_019.0, 1.10749, 6283.07585),
    (1721.0, 1.0644, 12566.1517),
    (702.0, 3.142, 0.0),
    (32.0, 1.02, 18849.23),
    (31.0, 2.84, 5507.55),
    (25.0, 1.32, 5223.69),
    (18.0, 1.42, 1577.34),
    (10.0, 5.91, 10977.08),
    (9.0, 1.42, 6275.96),
    (9.0, 0.27, 5486.78),
];

const EARTH_R2: &[Term] = &[
    (4359.0, 5.7846, 6283.0758),
    (124.0, 5.579, 12566.152),
    (12.0, 3.14, 0.0),
    (9.0, 3.63, 77713.77),
    (6.0, 1.87, 5573.14),
    (3.0, 5.47, 18849.23),
];

const EARTH_R3: &[Term] = &[
    (145.0, 4.273, 6283.076),
    (7.0, 3.92, 12566.15),
];

const EARTH_R4: &[Term] = &[
    (4.0, 2.56, 6283.08),
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cst(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(h, min, 0)).expect("datetime")
    }

    #[test]
    fn julian_day_epochs() {
        assert_eq!(julian_day(2000, 1, 1.5), J2000);
        assert_eq!(julian_day(1970, 1, 1.0), UNIX_EPOCH_JD);
        assert_eq!(jd_from_cst(cst(2000, 1, 1, 20, 0)), J2000);
        assert_eq!(cst_from_jd(J2000), cst(2000, 1, 1, 20, 0));
    }

    #[test]
    fn march_equinox_2000() {
        // 2000-03-20 07:35 UT
        let jd = sun_reaches(0.0, julian_day(2000, 3, 20.0));
        let minutes = (jd - jd_from_cst(cst(2000, 3, 20, 15, 35))) * 1440.0;
        assert!(minutes.abs() < 2.0, "off by {minutes} minutes");
    }

    #[test]
    fn new_moon_of_spring_festival_2024() {
        // 2024-02-09 22:59 UT
        let k = lunation_index(jd_from_cst(cst(2024, 2, 10, 12, 0)));
        let at = cst_from_jd(new_moon(k));
        assert_eq!(at.date(), NaiveDate::from_ymd_opt(2024, 2, 10).expect("date"));
        let minutes = (new_moon(k) - jd_from_cst(cst(2024, 2, 10, 6, 59))) * 1440.0;
        assert!(minutes.abs() < 5.0, "off by {minutes} minutes");
    }

    #[test]
    fn delta_t_is_about_a_minute_today() {
        let dt = delta_t(2024.0);
        assert!((68.0..76.0).contains(&dt), "{dt}");
    }
}
