/// Cosine similarity between two vectors.
///
/// Vectors of different length are compared over their common prefix; the
/// tail of the longer one is ignored. Returns 0 when either vector is empty
/// or has zero magnitude over that prefix. Sums are accumulated in `f64` so
/// that tiny but nonzero vectors still score correctly.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }
    let (a, b) = (&a[..len], &b[..len]);

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || denom.is_nan() {
        return 0.0;
    }
    (dot / denom) as f32
}
