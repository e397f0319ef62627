//! Statistisk sammenlikning av trekkverdier før/etter intervensjon.
//!
//! Likt antall svinger på begge sider kan pares, og da brukes Wilcoxon
//! signed-rank. Ulikt antall gir uavhengig to-utvalgs t-test. Brutte
//! testforutsetninger kollapser til et nøytralt resultat i stedet for
//! feil – en manglende test skal aldri stoppe pipelinen.

use log::warn;
use ordered_float::OrderedFloat;

use crate::derivatives::mean;
use crate::improvement::calculate_improvement_score;
use crate::metrics;
use crate::types::{ComparisonResult, TestMethod};

/// Signifikansnivå for `significant`-flagget.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Sammenlikner per-sving-verdier for ett enkelt trekk.
pub fn compare_feature(before: &[f64], after: &[f64]) -> ComparisonResult {
    let paired = before.len() == after.len();
    let outcome = if paired {
        wilcoxon_signed_rank(before, after)
    } else {
        students_t_test(before, after)
    };

    match outcome {
        Some((statistic, p_value)) if statistic.is_finite() && p_value.is_finite() => {
            ComparisonResult {
                statistic,
                p_value: p_value.clamp(0.0, 1.0),
                significant: p_value < SIGNIFICANCE_LEVEL,
                improvement: calculate_improvement_score(mean(before), mean(after)),
                method: if paired {
                    TestMethod::Paired
                } else {
                    TestMethod::Unpaired
                },
            }
        }
        _ => {
            warn!(
                "testforutsetninger brutt (n_før={}, n_etter={}), nøytralt resultat",
                before.len(),
                after.len()
            );
            metrics::stat_test_fallback_total().inc();
            ComparisonResult::neutral()
        }
    }
}

/// Wilcoxon signed-rank på parene (etter − før). Nulldifferanser
/// droppes etter testens standardkonvensjon. Returnerer (T, p) med
/// normalapproksimasjon og korreksjon for like rangeringer, eller
/// `None` ved brutte forutsetninger.
fn wilcoxon_signed_rank(before: &[f64], after: &[f64]) -> Option<(f64, f64)> {
    if before.len() < 2 {
        return None;
    }

    let diffs: Vec<f64> = after
        .iter()
        .zip(before)
        .map(|(a, b)| a - b)
        .filter(|d| *d != 0.0)
        .collect();
    if diffs.is_empty() {
        // alle differanser null
        return None;
    }

    let n = diffs.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| OrderedFloat(diffs[i].abs()));

    // Gjennomsnittsrang for grupper av like |d|
    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && diffs[order[j + 1]].abs() == diffs[order[i]].abs() {
            j += 1;
        }
        let avg_rank = (i + j + 2) as f64 / 2.0; // 1-baserte ranger
        let ties = (j - i + 1) as f64;
        tie_term += ties * ties * ties - ties;
        for k in i..=j {
            ranks[order[k]] = avg_rank;
        }
        i = j + 1;
    }

    let w_plus: f64 = (0..n).filter(|&k| diffs[k] > 0.0).map(|k| ranks[k]).sum();
    let nf = n as f64;
    let total = nf * (nf + 1.0) / 2.0;
    let statistic = w_plus.min(total - w_plus);

    let mean_t = total / 2.0;
    let var_t = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - tie_term / 48.0;
    if var_t <= 0.0 {
        return None;
    }

    let z = (statistic - mean_t) / var_t.sqrt();
    let p = 2.0 * normal_cdf(-z.abs());
    Some((statistic, p.min(1.0)))
}

/// Students uavhengige to-utvalgs t-test med felles varians.
/// Returnerer (t, tosidig p), eller `None` ved for små utvalg eller
/// degenerert varians.
fn students_t_test(before: &[f64], after: &[f64]) -> Option<(f64, f64)> {
    let (n1, n2) = (before.len(), after.len());
    if n1 < 2 || n2 < 2 {
        return None;
    }

    let (m1, m2) = (mean(before), mean(after));
    let v1 = sample_variance(before, m1);
    let v2 = sample_variance(after, m2);

    let df = (n1 + n2 - 2) as f64;
    let pooled = ((n1 - 1) as f64 * v1 + (n2 - 1) as f64 * v2) / df;
    if !(pooled.is_finite() && pooled > 0.0) {
        return None;
    }

    let se = (pooled * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();
    let t = (m1 - m2) / se;
    if !t.is_finite() {
        return None;
    }

    // Tosidig p fra t-fordelingen: I_{df/(df+t²)}(df/2, 1/2)
    let p = incomplete_beta(df / 2.0, 0.5, df / (df + t * t));
    Some((t, p))
}

/// Utvalgsvarians (deler på n − 1).
fn sample_variance(xs: &[f64], m: f64) -> f64 {
    xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (xs.len() - 1) as f64
}

/// Φ(x) via feilfunksjonen.
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Abramowitz & Stegun 7.1.26, maks absoluttfeil ~1.5e-7.
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}

/// Regularisert ufullstendig betafunksjon I_x(a, b),
/// kjedebrøk etter Lentz' metode.
fn incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b)
        + a * x.ln()
        + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // Kjedebrøken konvergerer raskt for x < (a+1)/(a+b+2); ellers
    // brukes symmetrien I_x(a,b) = 1 − I_{1−x}(b,a).
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 200;
    const EPS: f64 = 3.0e-14;
    const FPMIN: f64 = 1.0e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let mf = m as f64;
        let m2 = 2.0 * mf;

        let aa = mf * (b - mf) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + mf) * (qab + mf) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Lanczos-approksimasjon av ln Γ(x) for x > 0.
fn ln_gamma(x: f64) -> f64 {
    const COEF: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.120_865_097_386_617_9e-2,
        -0.539_523_938_495_3e-5,
    ];

    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut y = x;
    let mut ser = 1.000_000_000_190_015;
    for c in COEF {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.506_628_274_631_000_5 * ser / x).ln()
}
