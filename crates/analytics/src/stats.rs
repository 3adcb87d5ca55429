use core_types::SdConvention;
use serde::Serialize;

/// Arithmetic mean and standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanSd {
    pub mean: f64,
    pub sd: f64,
    pub count: usize,
}

/// Computes mean and standard deviation, or `None` for an empty slice.
///
/// A single value has SD 0 under either convention.
pub fn mean_sd(values: &[f64], convention: SdConvention) -> Option<MeanSd> {
    let count = values.len();
    if count == 0 {
        return None;
    }

    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sd = if count == 1 {
        0.0
    } else {
        let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        let divisor = match convention {
            SdConvention::Population => n,
            SdConvention::Sample => n - 1.0,
        };
        (squared / divisor).sqrt()
    };

    Some(MeanSd { mean, sd, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_population_sd() {
        let stats = mean_sd(&[1.0, 3.0], SdConvention::Population).unwrap();
        assert_relative_eq!(stats.mean, 2.0);
        assert_relative_eq!(stats.sd, 1.0);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_sample_sd() {
        let stats = mean_sd(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], SdConvention::Sample).unwrap();
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.sd, (32.0_f64 / 7.0).sqrt());
    }

    #[test]
    fn test_single_value_has_zero_sd() {
        for convention in [SdConvention::Population, SdConvention::Sample] {
            let stats = mean_sd(&[0.25], convention).unwrap();
            assert_eq!(stats.mean, 0.25);
            assert_eq!(stats.sd, 0.0);
        }
    }

    #[test]
    fn test_empty_is_none() {
        assert!(mean_sd(&[], SdConvention::Population).is_none());
    }
}
