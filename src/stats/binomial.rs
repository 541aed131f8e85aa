//! Exact binomial test.
//!
//! All probabilities are evaluated in log space through `ln Γ` so that large
//! trial counts do not overflow the binomial coefficient. Tail sums are
//! clamped to `[0, 1]`.

use super::Alternative;

/// Relative tolerance when deciding whether an outcome is "no more likely"
/// than the observed one in the two-sided test.
const TWO_SIDED_REL_TOL: f64 = 1.0 + 1e-7;

/// Lanczos approximation parameters (g = 7, n = 9).
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Binomial test p-value for `successes` out of `trials` at success
/// probability `p`, against the given alternative.
pub fn test(alternative: Alternative, successes: u64, trials: u64, p: f64) -> f64 {
    match alternative {
        Alternative::Less => one_sided_less(successes, trials, p),
        Alternative::Greater => one_sided_greater(successes, trials, p),
        Alternative::TwoSided => two_sided(successes, trials, p),
    }
}

/// `P(X <= k)` for `X ~ Bin(n, p)`.
pub fn one_sided_less(k: u64, n: u64, p: f64) -> f64 {
    if k >= n {
        return 1.0;
    }
    clamp_probability((0..=k).map(|i| pmf(i, n, p)).sum())
}

/// `P(X >= k)` for `X ~ Bin(n, p)`.
pub fn one_sided_greater(k: u64, n: u64, p: f64) -> f64 {
    if k == 0 {
        return 1.0;
    }
    if k > n {
        return 0.0;
    }
    clamp_probability((k..=n).map(|i| pmf(i, n, p)).sum())
}

/// Two-sided p-value: total probability of every outcome whose probability
/// does not exceed that of the observed count.
///
/// The tail opposite the observation is located by scanning from the mode
/// outward, so only outcomes on that side are compared against `pmf(k)`.
pub fn two_sided(k: u64, n: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    if p <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p >= 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }

    let observed = pmf(k, n, p) * TWO_SIDED_REL_TOL;
    let mean = n as f64 * p;
    let kf = k as f64;

    if kf == mean {
        return 1.0;
    }

    let total = if kf < mean {
        // Upper tail: outcomes in [ceil(mean), n] no more likely than k.
        let start = mean.ceil() as u64;
        let y = (start..=n).filter(|&i| pmf(i, n, p) <= observed).count() as u64;
        one_sided_less(k, n, p) + one_sided_greater(n - y + 1, n, p)
    } else {
        // Lower tail: outcomes in [0, floor(mean)] no more likely than k.
        let end = mean.floor() as u64;
        let y = (0..=end).filter(|&i| pmf(i, n, p) <= observed).count() as u64;
        let lower = if y == 0 { 0.0 } else { one_sided_less(y - 1, n, p) };
        lower + one_sided_greater(k, n, p)
    };

    clamp_probability(total)
}

/// Probability mass `P(X = k)` for `X ~ Bin(n, p)`.
pub fn pmf(k: u64, n: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    if p <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p >= 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    let log_term = ln_choose(n, k) + k as f64 * p.ln() + (n - k) as f64 * (-p).ln_1p();
    log_term.exp()
}

/// `ln C(n, k)`.
fn ln_choose(n: u64, k: u64) -> f64 {
    if k == 0 || k == n {
        return 0.0;
    }
    ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
}

/// `ln Γ(x)` for `x >= 0.5`.
fn ln_gamma(x: f64) -> f64 {
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFS[0], |acc, (i, c)| acc + c / (x + i as f64));
    0.5 * std::f64::consts::TAU.ln() + (x + 0.5) * t.ln() - t + series.ln()
}

fn clamp_probability(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}
