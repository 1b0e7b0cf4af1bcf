// File: crates/ticktick-core/src/downsample.rs
// Summary: Largest-Triangle-Three-Buckets downsampling for long price histories.

/// Largest-Triangle-Three-Buckets downsampling for XY series.
/// Returns up to `threshold` points preserving overall shape; first and last points are kept.
pub fn lttb(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if threshold == 0 || n == 0 { return Vec::new(); }
    if threshold >= n || n <= 2 { return points.to_vec(); }
    if threshold < 3 { return vec![points[0], points[n - 1]][..threshold].to_vec(); }

    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
    let bucket_bounds = |i: usize| -> (usize, usize) {
        let start = (1.0 + i as f64 * bucket_size).floor() as usize;
        let end = ((1.0 + (i + 1) as f64 * bucket_size).floor() as usize).min(n - 1);
        (start, end.max(start + 1))
    };

    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(points[0]);
    let mut a = 0usize; // index of the point selected from the previous bucket

    for i in 0..(threshold - 2) {
        let (start, end) = bucket_bounds(i);

        // Average of the next bucket; the last bucket looks at the final point.
        let (avg_x, avg_y) = if i + 1 < threshold - 2 {
            let (ns, ne) = bucket_bounds(i + 1);
            let m = &points[ns..ne];
            let k = m.len() as f64;
            (m.iter().map(|p| p.0).sum::<f64>() / k, m.iter().map(|p| p.1).sum::<f64>() / k)
        } else {
            points[n - 1]
        };

        let (a_x, a_y) = points[a];
        let mut max_area = -1.0f64;
        let mut max_idx = start;
        for (k, &(x, y)) in points.iter().enumerate().take(end).skip(start) {
            let area = ((a_x - x) * (avg_y - a_y) - (a_x - avg_x) * (y - a_y)).abs();
            if area > max_area {
                max_area = area;
                max_idx = k;
            }
        }
        sampled.push(points[max_idx]);
        a = max_idx;
    }

    sampled.push(points[n - 1]);
    sampled
}
