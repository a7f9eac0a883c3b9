use minter_types::types::DEFAULT_MAX_PER_TRANSACTION;

/// Mint quantity selector, always within `[1, max]`.
///
/// Every change takes `locked`, true while a mint is in flight, in which case the
/// value is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
    max: u32,
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_TRANSACTION)
    }
}

impl QuantityStepper {
    pub fn new(max: u32) -> Self {
        QuantityStepper {
            value: 1,
            max: max.max(1),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Applies a refreshed max per transaction, pulling the value down if needed.
    pub fn set_max(&mut self, max: u32) {
        self.max = max.max(1);
        self.value = self.value.clamp(1, self.max);
    }

    pub fn can_increment(&self, locked: bool) -> bool {
        !locked && self.value < self.max
    }

    pub fn can_decrement(&self, locked: bool) -> bool {
        !locked && self.value > 1
    }

    pub fn increment(&mut self, locked: bool) -> bool {
        if !self.can_increment(locked) {
            return false;
        }
        self.value += 1;
        true
    }

    pub fn decrement(&mut self, locked: bool) -> bool {
        if !self.can_decrement(locked) {
            return false;
        }
        self.value -= 1;
        true
    }

    /// Typed input; anything that is not a whole number counts as 1.
    pub fn set_from_input(&mut self, input: &str, locked: bool) -> bool {
        if locked {
            return false;
        }
        let requested = input.trim().parse::<i64>().unwrap_or(1);
        let clamped = requested.clamp(1, i64::from(self.max));
        self.value = u32::try_from(clamped).unwrap_or(1);
        true
    }

    pub fn reset(&mut self) {
        self.value = 1;
    }
}
