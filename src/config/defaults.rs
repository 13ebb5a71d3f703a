use crate::sensitivity::LowImpactThreshold;

pub(super) fn default_split_ratio() -> f64 {
    0.1
}

pub(super) fn default_split_seed() -> u64 {
    0
}

pub(super) fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio > 0.0 && ratio < 1.0 {
        ratio
    } else {
        default_split_ratio()
    }
}

pub(super) fn sanitize_fraction(fraction: f64) -> f64 {
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        LowImpactThreshold::DEFAULT_FRACTION
    }
}
