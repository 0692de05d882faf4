//! Gaussian CDF, PDF, and quantile.

use crate::*;

const SQRT_2: f64 = std::f64::consts::SQRT_2;
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Normal distribution with a given mean and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    mean: Probability,
    sd: Probability,
}

impl Gaussian {
    pub fn new(mean: Probability, sd: Probability) -> Self {
        Self { mean, sd }
    }
    pub fn mean(&self) -> Probability {
        self.mean
    }
    pub fn sd(&self) -> Probability {
        self.sd
    }
    pub fn cdf(&self, x: Probability) -> Probability {
        phi((x - self.mean) / self.sd)
    }
    pub fn pdf(&self, x: Probability) -> Probability {
        let z = (x - self.mean) / self.sd;
        (-0.5 * z * z).exp() / (SQRT_2PI * self.sd)
    }
    /// Inverse CDF. `p` is clamped into `[NORMAL_TAIL, 1 - NORMAL_TAIL]` so the
    /// result is always finite.
    pub fn quantile(&self, p: Probability) -> Probability {
        self.mean + self.sd * probit(p.clamp(NORMAL_TAIL, 1.0 - NORMAL_TAIL))
    }
}

/// Standard normal CDF.
pub fn phi(z: f64) -> f64 {
    (0.5 * erfc(-z / SQRT_2)).clamp(0.0, 1.0)
}

/// Complementary error function.
///
/// Rational approximations on `|x| <= 0.46875`, `|x| <= 4` and beyond, with
/// relative error near machine precision. `erfc(0)` is exactly 1.
pub fn erfc(x: f64) -> f64 {
    const A: [f64; 5] = [
        3.161_123_743_870_565_6,
        1.138_641_541_510_501_6e2,
        3.774_852_376_853_020_2e2,
        3.209_377_589_138_469_5e3,
        1.857_777_061_846_031_5e-1,
    ];
    const B: [f64; 4] = [
        2.360_129_095_234_412e1,
        2.440_246_379_344_441_7e2,
        1.282_616_526_077_372_3e3,
        2.844_236_833_439_170_6e3,
    ];
    const C: [f64; 9] = [
        5.641_884_969_886_701e-1,
        8.883_149_794_388_376,
        6.611_919_063_714_163e1,
        2.986_351_381_974_001_3e2,
        8.819_522_212_417_691e2,
        1.712_047_612_634_070_6e3,
        2.051_078_377_826_071_5e3,
        1.230_339_354_797_997_3e3,
        2.153_115_354_744_038_5e-8,
    ];
    const D: [f64; 8] = [
        1.574_492_611_070_983_5e1,
        1.176_939_508_913_125e2,
        5.371_811_018_620_099e2,
        1.621_389_574_566_690_2e3,
        3.290_799_235_733_459_6e3,
        4.362_619_090_143_247e3,
        3.439_367_674_143_721_6e3,
        1.230_339_354_803_749_4e3,
    ];
    const P: [f64; 6] = [
        3.053_266_349_612_323_4e-1,
        3.603_448_999_498_044_4e-1,
        1.257_817_261_112_292_5e-1,
        1.608_378_514_874_227_7e-2,
        6.587_491_615_298_378e-4,
        1.631_538_713_730_209_8e-2,
    ];
    const Q: [f64; 5] = [
        2.568_520_192_289_822,
        1.872_952_849_923_467_3,
        5.279_051_029_514_284e-1,
        6.051_834_131_244_132e-2,
        2.335_204_976_268_691_8e-3,
    ];
    const FRAC_1_SQRT_PI: f64 = 5.641_895_835_477_563e-1;
    let y = x.abs();
    if y <= 0.468_75 {
        let z = y * y;
        let (mut num, mut den) = (A[4] * z, z);
        for i in 0..3 {
            num = (num + A[i]) * z;
            den = (den + B[i]) * z;
        }
        return 1.0 - x * (num + A[3]) / (den + B[3]);
    }
    let ratio = if y <= 4.0 {
        let (mut num, mut den) = (C[8] * y, y);
        for i in 0..7 {
            num = (num + C[i]) * y;
            den = (den + D[i]) * y;
        }
        (num + C[7]) / (den + D[7])
    } else {
        let z = 1.0 / (y * y);
        let (mut num, mut den) = (P[5] * z, z);
        for i in 0..4 {
            num = (num + P[i]) * z;
            den = (den + Q[i]) * z;
        }
        (FRAC_1_SQRT_PI - z * (num + P[4]) / (den + Q[4])) / y
    };
    // exp(-y^2) split so the rounding of y^2 does not leak into the tail
    let head = (y * 16.0).trunc() / 16.0;
    let rest = (y - head) * (y + head);
    let tail = ratio * (-head * head).exp() * (-rest).exp();
    if x >= 0.0 { tail } else { 2.0 - tail }
}

/// Standard normal quantile for `p` strictly inside `(0, 1)`.
/// Rational approximation refined by one Halley step against [`phi`], so
/// `phi(probit(p))` reproduces `p` to the precision of `phi` itself.
pub fn probit(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_690e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const LOW: f64 = 0.024_25;
    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };
    let x = if p < LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p > 1.0 - LOW {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    };
    let e = phi(x) - p;
    let u = e * SQRT_2PI * (0.5 * x * x).exp();
    x - u / (1.0 + 0.5 * x * u)
}
