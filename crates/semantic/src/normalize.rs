use crate::error::SemanticError;

/// In-place L2 normalization. Zero-magnitude vectors are left untouched.
pub(crate) fn l2_normalize_in_place(v: &mut [f32]) {
    let norm_sq: f32 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

/// Rejects vectors carrying NaN or infinite components.
pub(crate) fn ensure_finite(v: &[f32]) -> Result<(), SemanticError> {
    match v.iter().position(|x| !x.is_finite()) {
        Some(idx) => Err(SemanticError::Degraded(format!(
            "non-finite component at index {idx}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_normalize_simple_vector() {
        let mut v = vec![3.0f32, 4.0];
        l2_normalize_in_place(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn l2_normalize_maintains_unit_length() {
        let mut v = vec![1.0f32, 2.0, 3.0, 4.0, 5.0];
        l2_normalize_in_place(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn l2_normalize_zero_vector() {
        let mut v = vec![0.0f32, 0.0, 0.0];
        l2_normalize_in_place(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn l2_normalize_empty_slice() {
        let mut v: Vec<f32> = vec![];
        l2_normalize_in_place(&mut v);
        assert!(v.is_empty());
    }

    #[test]
    fn l2_normalize_negative_values() {
        let mut v = vec![-3.0f32, -4.0];
        l2_normalize_in_place(&mut v);
        assert!((v[0] + 0.6).abs() < 1e-6);
        assert!((v[1] + 0.8).abs() < 1e-6);
    }

    #[test]
    fn finite_vectors_pass() {
        assert!(ensure_finite(&[0.0, -1.5, 2.0]).is_ok());
        assert!(ensure_finite(&[]).is_ok());
    }

    #[test]
    fn nan_and_infinity_are_degraded() {
        let err = ensure_finite(&[0.1, f32::NAN]).unwrap_err();
        assert!(matches!(err, SemanticError::Degraded(msg) if msg.contains("index 1")));
        assert!(ensure_finite(&[f32::INFINITY]).is_err());
        assert!(ensure_finite(&[f32::NEG_INFINITY]).is_err());
    }
}
