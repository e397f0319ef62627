//! Numerisk derivasjon og små serie-hjelpere.

/// Tidsderivert av en serie: sentraldifferanser med ikke-uniform dt,
/// ensidige differanser i endepunktene (samme skjema som np.gradient).
/// Returnerer tom vektor hvis serien er for kort til å deriveres.
pub fn gradient(xs: &[f64], ts: &[f64]) -> Vec<f64> {
    let n = xs.len();
    if n < 2 || ts.len() != n {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    out.push((xs[1] - xs[0]) / (ts[1] - ts[0]));

    for i in 1..n - 1 {
        let hd = ts[i] - ts[i - 1];
        let hs = ts[i + 1] - ts[i];
        let num = hd * hd * xs[i + 1] + (hs * hs - hd * hd) * xs[i] - hs * hs * xs[i - 1];
        out.push(num / (hs * hd * (hd + hs)));
    }

    out.push((xs[n - 1] - xs[n - 2]) / (ts[n - 1] - ts[n - 2]));
    out
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().copied().sum::<f64>() / xs.len() as f64
    }
}

/// Populasjons-standardavvik (deler på n, som np.std).
pub fn std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64;
    var.sqrt()
}

/// Maks − min over serien; 0.0 for tom serie.
pub fn peak_to_peak(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

/// Ikke-finitte verdier (degenererte deriverte o.l.) saneres til 0.0.
#[inline]
pub fn safe_float(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Snitt med sanering: NaN i serien smitter snittet, og da blir svaret 0.0.
pub fn safe_mean(xs: &[f64]) -> f64 {
    safe_float(mean(xs))
}
