//! Svingsegmentering: albuens hastighetstopper deler opptaket i
//! diskrete repetisjoner ("svinger").

use log::debug;

use crate::derivatives::{gradient, mean, std_dev};
use crate::metrics;
use crate::types::{Swing, Trajectory};

/// Minste antall frames i en gyldig sving.
pub const MIN_SWING_FRAMES: usize = 10;
/// Minste avstand (samples) mellom hastighetstopper i første forsøk.
pub const MIN_PEAK_DISTANCE: usize = 15;
/// Avslappet toppavstand for andre forsøk.
pub const RELAXED_PEAK_DISTANCE: usize = 10;
/// Andel av standardavviket som legges på snittet i terskelen.
/// snitt + brøk·std tilpasser seg øktens bevegelsesamplitude uten
/// manuell kalibrering.
pub const THRESHOLD_STD_FRACTION: f64 = 0.2;

/// Albuens fart per sample: euklidsk norm av tidsderiverte av x/y/z.
/// Tom vektor hvis opptaket er for kort til derivasjon (< 2 samples).
pub fn elbow_speed(traj: &Trajectory) -> Vec<f64> {
    let ts: Vec<f64> = traj.samples.iter().map(|s| s.t).collect();
    let xs: Vec<f64> = traj.samples.iter().map(|s| s.elbow.x).collect();
    let ys: Vec<f64> = traj.samples.iter().map(|s| s.elbow.y).collect();
    let zs: Vec<f64> = traj.samples.iter().map(|s| s.elbow.z).collect();

    let vx = gradient(&xs, &ts);
    let vy = gradient(&ys, &ts);
    let vz = gradient(&zs, &ts);
    if vx.is_empty() {
        return Vec::new();
    }

    (0..vx.len())
        .map(|i| (vx[i] * vx[i] + vy[i] * vy[i] + vz[i] * vz[i]).sqrt())
        .collect()
}

/// Lokale maksima med høyde >= `height` og minst `distance` samples
/// mellom seg. Ved konflikt vinner den høyeste toppen.
fn find_peaks(xs: &[f64], height: f64, distance: usize) -> Vec<usize> {
    let mut candidates: Vec<usize> = Vec::new();
    for i in 1..xs.len().saturating_sub(1) {
        if xs[i] > xs[i - 1] && xs[i] > xs[i + 1] && xs[i] >= height {
            candidates.push(i);
        }
    }

    // Grådig utvelgelse i synkende høyde
    candidates.sort_by(|a, b| {
        xs[*b]
            .partial_cmp(&xs[*a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<usize> = Vec::new();
    for &idx in &candidates {
        if kept
            .iter()
            .all(|&k| idx.abs_diff(k) >= distance)
        {
            kept.push(idx);
        }
    }
    kept.sort_unstable();
    kept
}

/// Nabopar av topper blir svingkandidater `[topp_i, topp_{i+1})`;
/// spenn under [`MIN_SWING_FRAMES`] forkastes.
fn swings_between_peaks(speed: &[f64], height: f64, distance: usize) -> Vec<Swing> {
    let peaks = find_peaks(speed, height, distance);
    let mut swings = Vec::new();
    for pair in peaks.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if end - start < MIN_SWING_FRAMES {
            continue;
        }
        let peak_velocity = speed[start..end]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        swings.push(Swing {
            start,
            end,
            peak_velocity,
        });
    }
    swings
}

/// Segmenterer ett opptak i ordnede, ikke-overlappende svinger.
/// Tomt resultat er et gyldig utfall, ikke en feil.
pub fn segment_swings(traj: &Trajectory) -> Vec<Swing> {
    let speed = elbow_speed(traj);
    if speed.is_empty() {
        debug!(
            "for få samples til segmentering ({}), ingen svinger",
            traj.len()
        );
        metrics::swing_segmentation_empty_total().inc();
        return Vec::new();
    }

    let m = mean(&speed);
    let sd = std_dev(&speed);
    let strict_threshold = m + THRESHOLD_STD_FRACTION * sd;

    let mut swings = swings_between_peaks(&speed, strict_threshold, MIN_PEAK_DISTANCE);

    if swings.is_empty() {
        // Andre forsøk med avslappet terskel og kortere toppavstand
        debug!(
            "ingen svinger med terskel {:.5}, prøver avslappet ({:.5})",
            strict_threshold, m
        );
        metrics::swing_segmentation_relaxed_total().inc();
        swings = swings_between_peaks(&speed, m, RELAXED_PEAK_DISTANCE);
    }

    if swings.is_empty() {
        metrics::swing_segmentation_empty_total().inc();
    }
    swings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_peaks_respects_distance() {
        // To nære topper: bare den høyeste overlever
        let xs = [0.0, 1.0, 0.5, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let peaks = find_peaks(&xs, 0.5, 5);
        assert_eq!(peaks, vec![3]);
    }

    #[test]
    fn find_peaks_keeps_separated_maxima() {
        let mut xs = vec![0.0; 40];
        xs[5] = 1.0;
        xs[25] = 0.8;
        let peaks = find_peaks(&xs, 0.5, 15);
        assert_eq!(peaks, vec![5, 25]);
    }
}
