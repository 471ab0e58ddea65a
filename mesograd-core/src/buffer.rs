// src/buffer.rs
use crate::error::MesogradError;
use std::fmt;

/// Dense, contiguous, row-major `f64` storage with a fixed shape.
///
/// `Buffer` carries no graph information. Tensor nodes keep their value and gradient in one
/// each, and every forward and backward kernel works on buffers.
#[derive(Clone, PartialEq)]
pub struct Buffer {
    data: Vec<f64>,
    shape: Vec<usize>,
}

impl Buffer {
    /// Creates a buffer, checking that `data` holds exactly `shape.iter().product()` elements.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, MesogradError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(MesogradError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Buffer { data, shape })
    }

    /// Rank-0 buffer holding `value`.
    pub fn scalar(value: f64) -> Self {
        Buffer {
            data: vec![value],
            shape: Vec::new(),
        }
    }

    pub fn full(shape: &[usize], value: f64) -> Self {
        let numel = shape.iter().product();
        Buffer {
            data: vec![value; numel],
            shape: shape.to_vec(),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, 0.0)
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, 1.0)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Same elements under a different shape with the same element count.
    pub fn reshaped(&self, shape: &[usize]) -> Result<Buffer, MesogradError> {
        let numel: usize = shape.iter().product();
        if numel != self.numel() {
            return Err(MesogradError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: shape.to_vec(),
                operation: "reshape".to_string(),
            });
        }
        Ok(Buffer {
            data: self.data.clone(),
            shape: shape.to_vec(),
        })
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Buffer {
        Buffer {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Element-wise combination of two buffers of identical shape.
    pub fn zip_map<F: Fn(f64, f64) -> f64>(
        &self,
        other: &Buffer,
        operation: &str,
        f: F,
    ) -> Result<Buffer, MesogradError> {
        self.check_same_shape(other, operation)?;
        Ok(Buffer {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
        })
    }

    /// Adds `other` element-wise into `self`. Shapes must match exactly.
    pub fn add_assign(&mut self, other: &Buffer) -> Result<(), MesogradError> {
        self.check_same_shape(other, "grad accumulation")?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += *b;
        }
        Ok(())
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    fn check_same_shape(&self, other: &Buffer, operation: &str) -> Result<(), MesogradError> {
        if self.shape != other.shape {
            return Err(MesogradError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 16;
        write!(f, "Buffer(shape={:?}, data=", self.shape)?;
        if self.data.len() > PREVIEW {
            write!(f, "{:?}...", &self.data[..PREVIEW])?;
        } else {
            write!(f, "{:?}", self.data)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(Buffer::new(vec![1.0, 2.0, 3.0], vec![3]).is_ok());
        let err = Buffer::new(vec![1.0, 2.0], vec![3]).unwrap_err();
        assert_eq!(
            err,
            MesogradError::TensorCreationError {
                data_len: 2,
                shape: vec![3]
            }
        );
    }

    #[test]
    fn test_scalar_has_rank_zero_and_one_element() {
        let s = Buffer::scalar(4.0);
        assert_eq!(s.rank(), 0);
        assert_eq!(s.numel(), 1);
        assert_eq!(s.data(), &[4.0]);
    }

    #[test]
    fn test_add_assign_requires_same_shape() {
        let mut a = Buffer::ones(&[2, 2]);
        a.add_assign(&Buffer::full(&[2, 2], 2.0)).unwrap();
        assert_eq!(a.data(), &[3.0; 4]);
        assert!(a.add_assign(&Buffer::ones(&[4])).is_err());
    }

    #[test]
    fn test_reshaped() {
        let a = Buffer::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
        let b = a.reshaped(&[3, 2]).unwrap();
        assert_eq!(b.shape(), &[3, 2]);
        assert_eq!(b.data(), a.data());
        assert!(a.reshaped(&[4]).is_err());
    }

    #[test]
    fn test_zero_sized_shape() {
        let z = Buffer::zeros(&[0, 3]);
        assert_eq!(z.numel(), 0);
        assert_eq!(z.sum(), 0.0);
    }
}
