//! Mean structural similarity over sliding windows.
//!
//! Window sums come from integer summed-area tables, so every window
//! statistic is exact and the result does not depend on evaluation order.

use super::SsimParams;
use crate::error::CompareError;
use image::GrayImage;
use rayon::prelude::*;

/// Summed-area tables of x, y, x², y² and xy, each `(width + 1) * (height + 1)`
struct WindowSums {
    stride: usize,
    x: Vec<u64>,
    y: Vec<u64>,
    xx: Vec<u64>,
    yy: Vec<u64>,
    xy: Vec<u64>,
}

/// Raw sums over one window
struct Moments {
    x: u64,
    y: u64,
    xx: u64,
    yy: u64,
    xy: u64,
}

impl WindowSums {
    fn build(a: &GrayImage, b: &GrayImage) -> Self {
        let (width, height) = a.dimensions();
        let (width, height) = (width as usize, height as usize);
        let stride = width + 1;
        let len = stride * (height + 1);

        let mut sums = Self {
            stride,
            x: vec![0; len],
            y: vec![0; len],
            xx: vec![0; len],
            yy: vec![0; len],
            xy: vec![0; len],
        };

        let pa = a.as_raw();
        let pb = b.as_raw();

        for row in 0..height {
            let (mut rx, mut ry, mut rxx, mut ryy, mut rxy) = (0u64, 0u64, 0u64, 0u64, 0u64);
            for col in 0..width {
                let va = pa[row * width + col] as u64;
                let vb = pb[row * width + col] as u64;
                rx += va;
                ry += vb;
                rxx += va * va;
                ryy += vb * vb;
                rxy += va * vb;

                let above = row * stride + col + 1;
                let here = above + stride;
                sums.x[here] = sums.x[above] + rx;
                sums.y[here] = sums.y[above] + ry;
                sums.xx[here] = sums.xx[above] + rxx;
                sums.yy[here] = sums.yy[above] + ryy;
                sums.xy[here] = sums.xy[above] + rxy;
            }
        }

        sums
    }

    fn window(&self, top: usize, left: usize, size: usize) -> Moments {
        let s = self.stride;
        let (t, l, b, r) = (top, left, top + size, left + size);
        let area = |table: &[u64]| table[b * s + r] + table[t * s + l] - table[t * s + r] - table[b * s + l];

        Moments {
            x: area(&self.x),
            y: area(&self.y),
            xx: area(&self.xx),
            yy: area(&self.yy),
            xy: area(&self.xy),
        }
    }
}

/// Compute mean SSIM between two equally sized grayscale images.
///
/// Only windows lying fully inside the image contribute, so no border
/// padding convention leaks into the result. The function is symmetric in
/// its arguments bit for bit.
pub fn mean_ssim(a: &GrayImage, b: &GrayImage, params: &SsimParams) -> Result<f64, CompareError> {
    let (width, height) = a.dimensions();
    if b.dimensions() != (width, height) {
        let (right_width, right_height) = b.dimensions();
        return Err(CompareError::DimensionMismatch {
            left_width: width,
            left_height: height,
            right_width,
            right_height,
        });
    }

    let window = params.window;
    if window == 0 || width < window || height < window {
        return Err(CompareError::ImageTooSmall {
            width,
            height,
            window,
        });
    }

    let sums = WindowSums::build(a, b);
    let size = window as usize;
    let rows = height as usize - size + 1;
    let cols = width as usize - size + 1;

    let n = (size * size) as f64;
    let cov_norm = if params.sample_covariance && size > 1 {
        n / (n - 1.0)
    } else {
        1.0
    };
    let c1 = (params.k1 * params.data_range).powi(2);
    let c2 = (params.k2 * params.data_range).powi(2);

    // Each row is summed left to right; rows are then combined in order,
    // which keeps the result identical across thread counts.
    let row_totals: Vec<f64> = (0..rows)
        .into_par_iter()
        .map(|top| {
            (0..cols)
                .map(|left| {
                    let m = sums.window(top, left, size);
                    window_index(&m, n, cov_norm, c1, c2)
                })
                .sum::<f64>()
        })
        .collect();

    let total: f64 = row_totals.iter().sum();
    Ok(total / (rows * cols) as f64)
}

fn window_index(m: &Moments, n: f64, cov_norm: f64, c1: f64, c2: f64) -> f64 {
    let ux = m.x as f64 / n;
    let uy = m.y as f64 / n;
    let uxx = m.xx as f64 / n;
    let uyy = m.yy as f64 / n;
    let uxy = m.xy as f64 / n;

    let vx = cov_norm * (uxx - ux * ux);
    let vy = cov_norm * (uyy - uy * uy);
    let vxy = cov_norm * (uxy - ux * uy);

    let luminance_num = 2.0 * (ux * uy) + c1;
    let structure_num = 2.0 * vxy + c2;
    let luminance_den = ux * ux + uy * uy + c1;
    let structure_den = vx + vy + c2;

    (luminance_num * structure_num) / (luminance_den * structure_den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn params() -> SsimParams {
        SsimParams::default()
    }

    fn pattern(width: u32, height: u32, seed: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([((x * 31 + y * 17 + seed * 7) % 251) as u8])
        })
    }

    #[test]
    fn identical_images_score_exactly_one() {
        let image = pattern(40, 30, 1);
        assert_eq!(mean_ssim(&image, &image, &params()).unwrap(), 1.0);
    }

    #[test]
    fn flat_identical_images_score_one() {
        let image = GrayImage::from_pixel(20, 20, Luma([200]));
        assert_eq!(mean_ssim(&image, &image, &params()).unwrap(), 1.0);
    }

    #[test]
    fn black_against_white_is_near_zero() {
        let black = GrayImage::from_pixel(300, 300, Luma([0]));
        let white = GrayImage::from_pixel(300, 300, Luma([255]));

        let value = mean_ssim(&black, &white, &params()).unwrap();
        assert!(value > 0.0 && value < 0.001, "got {}", value);
    }

    #[test]
    fn ssim_is_symmetric() {
        let a = pattern(50, 50, 1);
        let b = pattern(50, 50, 9);

        let ab = mean_ssim(&a, &b, &params()).unwrap();
        let ba = mean_ssim(&b, &a, &params()).unwrap();
        assert_eq!(ab.to_bits(), ba.to_bits());
    }

    #[test]
    fn inverted_image_scores_negative() {
        let a = GrayImage::from_fn(30, 30, |x, _| Luma([if x % 2 == 0 { 0 } else { 255 }]));
        let b = GrayImage::from_fn(30, 30, |x, _| Luma([if x % 2 == 0 { 255 } else { 0 }]));

        assert!(mean_ssim(&a, &b, &params()).unwrap() < 0.0);
    }

    #[test]
    fn window_statistics_match_direct_computation() {
        let a = pattern(7, 7, 3);
        let b = pattern(7, 7, 5);
        let p = params();

        let n = 49.0;
        let xs: Vec<f64> = a.as_raw().iter().map(|&v| v as f64).collect();
        let ys: Vec<f64> = b.as_raw().iter().map(|&v| v as f64).collect();
        let mx = xs.iter().sum::<f64>() / n;
        let my = ys.iter().sum::<f64>() / n;
        let vx = xs.iter().map(|x| (x - mx).powi(2)).sum::<f64>() / (n - 1.0);
        let vy = ys.iter().map(|y| (y - my).powi(2)).sum::<f64>() / (n - 1.0);
        let cxy = xs.iter().zip(&ys).map(|(x, y)| (x - mx) * (y - my)).sum::<f64>() / (n - 1.0);
        let c1 = (0.01f64 * 255.0).powi(2);
        let c2 = (0.03f64 * 255.0).powi(2);
        let expected =
            ((2.0 * mx * my + c1) * (2.0 * cxy + c2)) / ((mx * mx + my * my + c1) * (vx + vy + c2));

        let actual = mean_ssim(&a, &b, &p).unwrap();
        assert!((actual - expected).abs() < 1e-9, "{} vs {}", actual, expected);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let a = pattern(20, 20, 0);
        let b = pattern(20, 21, 0);

        assert!(matches!(
            mean_ssim(&a, &b, &params()),
            Err(CompareError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn rejects_images_smaller_than_window() {
        let a = pattern(5, 5, 0);
        assert_eq!(
            mean_ssim(&a, &a, &params()),
            Err(CompareError::ImageTooSmall {
                width: 5,
                height: 5,
                window: 7
            })
        );
    }
}
