//! Minimal in-place radix-2 FFT.
//!
//! Complex values are (re, im) tuples; no external complex type needed
//! for a forward transform feeding a power spectrum.

use std::f64::consts::PI;

/// Smallest power of two >= `n`.
pub(crate) fn next_pow2(n: usize) -> usize {
    let mut p = 1;
    while p < n {
        p <<= 1;
    }
    p
}

#[inline]
fn cmul(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 * b.0 - a.1 * b.1, a.0 * b.1 + a.1 * b.0)
}

/// In-place Cooley-Tukey FFT. Input length must be a power of two.
pub(crate) fn fft(buf: &mut [(f64, f64)]) {
    let n = buf.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());

    // Bit-reversal permutation.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            buf.swap(i, j);
        }
    }

    // Butterflies, doubling the stage size each pass.
    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let angle = -2.0 * PI / size as f64;
        let step = (angle.cos(), angle.sin());
        for start in (0..n).step_by(size) {
            let mut w = (1.0, 0.0);
            for k in 0..half {
                let even = buf[start + k];
                let odd = cmul(w, buf[start + k + half]);
                buf[start + k] = (even.0 + odd.0, even.1 + odd.1);
                buf[start + k + half] = (even.0 - odd.0, even.1 - odd.1);
                w = cmul(w, step);
            }
        }
        size <<= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_is_flat() {
        let mut buf = vec![(0.0, 0.0); 8];
        buf[0] = (1.0, 0.0);
        fft(&mut buf);
        for &(re, im) in &buf {
            assert!((re - 1.0).abs() < 1e-12);
            assert!(im.abs() < 1e-12);
        }
    }

    #[test]
    fn parseval_holds() {
        let n = 16;
        let mut buf: Vec<(f64, f64)> = (0..n)
            .map(|i| ((2.0 * PI * 3.0 * i as f64 / n as f64).sin(), 0.0))
            .collect();
        let time_energy: f64 = buf.iter().map(|(r, i)| r * r + i * i).sum();
        fft(&mut buf);
        let freq_energy: f64 = buf.iter().map(|(r, i)| r * r + i * i).sum();
        assert!((time_energy * n as f64 - freq_energy).abs() < 1e-8);
    }

    #[test]
    fn pure_tone_peaks_at_bin() {
        // A sine at exactly bin 4 of a 32-point FFT.
        let n = 32;
        let mut buf: Vec<(f64, f64)> = (0..n)
            .map(|i| ((2.0 * PI * 4.0 * i as f64 / n as f64).sin(), 0.0))
            .collect();
        fft(&mut buf);
        let mags: Vec<f64> = buf.iter().map(|(r, i)| (r * r + i * i).sqrt()).collect();
        let peak = mags[..n / 2]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, 4);
    }

    #[test]
    fn next_pow2_rounds_up() {
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(2000), 2048);
        assert_eq!(next_pow2(2048), 2048);
    }
}
