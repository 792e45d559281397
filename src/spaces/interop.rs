//! Numeric backends interop.
//! Optional conversions between `Vector`/`Value` payloads and ndarray/nalgebra
//! types, gated behind the `ndarray` and `nalgebra` features.

#[cfg(any(feature = "ndarray", feature = "nalgebra"))]
use crate::spaces::{BoxSpace, Value};

// ndarray interop
#[cfg(feature = "ndarray")]
pub mod ndarray_impl {
    use super::*;
    use ndarray::Array1;

    impl Value {
        /// Leaf values as an `Array1<f64>`; `None` for records and sequences.
        pub fn to_ndarray(&self) -> Option<Array1<f64>> {
            self.as_vector().map(|v| Array1::from_vec(v.to_vec()))
        }
    }

    impl From<Array1<f64>> for Value {
        fn from(arr: Array1<f64>) -> Self { Value::Vector(arr.to_vec()) }
    }

    impl BoxSpace {
        pub fn low_ndarray(&self) -> Array1<f64> { Array1::from_vec(self.low()) }
        pub fn high_ndarray(&self) -> Array1<f64> { Array1::from_vec(self.high()) }
    }

}

// nalgebra interop
#[cfg(feature = "nalgebra")]
pub mod nalgebra_impl {
    use super::*;
    use nalgebra::DVector;

    impl Value {
        /// Leaf values as a `DVector<f64>`; `None` for records and sequences.
        pub fn to_nalgebra(&self) -> Option<DVector<f64>> {
            self.as_vector().map(DVector::from_column_slice)
        }
    }

    impl From<DVector<f64>> for Value {
        fn from(v: DVector<f64>) -> Self { Value::Vector(v.iter().copied().collect()) }
    }

    impl BoxSpace {
        pub fn low_nalgebra(&self) -> DVector<f64> { DVector::from_vec(self.low()) }
        pub fn high_nalgebra(&self) -> DVector<f64> { DVector::from_vec(self.high()) }
    }
}
