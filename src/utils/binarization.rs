use crate::models::ModuleMatrix;

/// Side length of the blocks used by [`hybrid_binarize`]
const BLOCK_SIZE: usize = 8;
/// Below this size on either side the local method has too few blocks
pub const MINIMUM_DIMENSION: usize = BLOCK_SIZE * 5;
/// Blocks whose luminance spread is at most this are treated as flat
const MIN_DYNAMIC_RANGE: u32 = 24;

/// Binarize with the policy used by the decoder: local block thresholds,
/// or a global Otsu threshold for images too small to split into blocks.
pub fn binarize(gray: &[u8], width: usize, height: usize) -> ModuleMatrix {
    hybrid_binarize(gray, width, height)
}

/// Convert grayscale image to binary using Otsu's thresholding method
/// Returns a ModuleMatrix where true = black, false = white
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> ModuleMatrix {
    let threshold = calculate_otsu_threshold(gray);
    threshold_binarize(gray, width, height, threshold)
}

/// Calculate Otsu's optimal threshold
fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    // Build histogram
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let total_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as u64 * count)
        .sum();

    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;
    let mut class1_pixels = 0u64;
    let mut class1_sum = 0u64;

    // Pixels below `threshold` form class 1
    for threshold in 1..=255usize {
        class1_pixels += histogram[threshold - 1];
        class1_sum += (threshold as u64 - 1) * histogram[threshold - 1];
        let class2_pixels = gray.len() as u64 - class1_pixels;

        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = (total_sum - class1_sum) as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels;
        let weight2 = class2_pixels as f64 / total_pixels;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

/// Simple global threshold binarization
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> ModuleMatrix {
    ModuleMatrix::from_fn(width, height, |x, y| gray[y * width + x] < threshold)
}

/// Local-threshold binarization over 8x8 blocks.
///
/// Each block gets a black point from its own luminance; a pixel is black when it
/// is at or below the mean black point of the 5x5 block neighborhood around its
/// block. Flat blocks borrow their neighbors' black point so uniform regions
/// inside a symbol don't flip. Images with a side below [`MINIMUM_DIMENSION`]
/// fall back to [`otsu_binarize`].
pub fn hybrid_binarize(gray: &[u8], width: usize, height: usize) -> ModuleMatrix {
    if width < MINIMUM_DIMENSION || height < MINIMUM_DIMENSION {
        return otsu_binarize(gray, width, height);
    }
    let sub_width = width.div_ceil(BLOCK_SIZE);
    let sub_height = height.div_ceil(BLOCK_SIZE);
    let black_points = calculate_black_points(gray, sub_width, sub_height, width, height);

    let mut binary = ModuleMatrix::new(width, height);
    let max_y_offset = height - BLOCK_SIZE;
    let max_x_offset = width - BLOCK_SIZE;

    for by in 0..sub_height {
        let y_offset = (by * BLOCK_SIZE).min(max_y_offset);
        let top = by.clamp(2, sub_height - 3);
        for bx in 0..sub_width {
            let x_offset = (bx * BLOCK_SIZE).min(max_x_offset);
            let left = bx.clamp(2, sub_width - 3);

            let mut sum = 0u32;
            for row in &black_points[top - 2..=top + 2] {
                sum += row[left - 2..=left + 2].iter().sum::<u32>();
            }
            let threshold = sum / 25;

            for y in y_offset..y_offset + BLOCK_SIZE {
                for x in x_offset..x_offset + BLOCK_SIZE {
                    if (gray[y * width + x] as u32) <= threshold {
                        binary.set(x, y, true);
                    }
                }
            }
        }
    }

    binary
}

fn calculate_black_points(
    gray: &[u8],
    sub_width: usize,
    sub_height: usize,
    width: usize,
    height: usize,
) -> Vec<Vec<u32>> {
    let max_y_offset = height - BLOCK_SIZE;
    let max_x_offset = width - BLOCK_SIZE;
    let mut black_points = vec![vec![0u32; sub_width]; sub_height];

    for by in 0..sub_height {
        let y_offset = (by * BLOCK_SIZE).min(max_y_offset);
        for bx in 0..sub_width {
            let x_offset = (bx * BLOCK_SIZE).min(max_x_offset);

            let mut sum = 0u32;
            let mut min = u32::MAX;
            let mut max = 0u32;
            for y in y_offset..y_offset + BLOCK_SIZE {
                let row = &gray[y * width + x_offset..y * width + x_offset + BLOCK_SIZE];
                for &pixel in row {
                    let pixel = pixel as u32;
                    sum += pixel;
                    min = min.min(pixel);
                    max = max.max(pixel);
                }
            }

            let mut average = sum / (BLOCK_SIZE * BLOCK_SIZE) as u32;
            if max - min <= MIN_DYNAMIC_RANGE {
                // Flat block: assume it is background unless neighbors say otherwise
                average = min / 2;
                if by > 0 && bx > 0 {
                    let neighbors = (black_points[by - 1][bx]
                        + 2 * black_points[by][bx - 1]
                        + black_points[by - 1][bx - 1])
                        / 4;
                    if min < neighbors {
                        average = neighbors;
                    }
                }
            }
            black_points[by][bx] = average;
        }
    }

    black_points
}
