use rand::Rng;
use thiserror::Error;

pub const DEFAULT_MIN_QUANTITY: u32 = 15;
pub const DEFAULT_MAX_QUANTITY: u32 = 100;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RangeError {
    #[error("Invalid quantity range: min {min} is greater than max {max}")]
    Inverted { min: u32, max: u32 },
    #[error("Invalid quantity range: max {0} does not fit a 32-bit stock field")]
    TooLarge(u32),
}

/// Inclusive range of stock quantities assigned on refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityRange {
    min: u32,
    max: u32,
}

impl QuantityRange {
    pub fn new(min: u32, max: u32) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        if max > i32::MAX as u32 {
            return Err(RangeError::TooLarge(max));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of distinct values the range can produce.
    pub fn width(&self) -> u32 {
        self.max - self.min + 1
    }

    /// Draws a quantity uniformly from `[min, max]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }

    #[allow(dead_code)]
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= i64::from(self.min) && quantity <= i64::from(self.max)
    }
}

impl Default for QuantityRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_QUANTITY,
            max: DEFAULT_MAX_QUANTITY,
        }
    }
}
