/// 價格軸上的連續函數。
///
/// `Send + Sync` 是 supertrait，使實作者可放入 `Arc` 並跨執行緒共享。
pub trait Curve: Send + Sync {
    fn value(&self, x: f64) -> f64;

    fn values(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.value(x)).collect()
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl Curve for Identity {
        fn value(&self, x: f64) -> f64 {
            x
        }
    }

    #[test]
    fn test_values_maps_every_point() {
        let xs = [1.0, 2.5, -3.0];
        assert_eq!(Identity.values(&xs), vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn test_reference_delegates() {
        let curve = &Identity;
        assert_eq!(Curve::value(&curve, 4.0), 4.0);
    }
}
