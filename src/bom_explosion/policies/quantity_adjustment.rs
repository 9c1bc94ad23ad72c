use crate::shared::Result;

/// A half-open quantity range `[min, max)` and the amount deducted inside it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityBracket {
    min: f64,
    max: Option<f64>,
    deduction: f64,
}

impl QuantityBracket {
    /// Creates a bracket; `max = None` means unbounded above
    ///
    /// # Errors
    /// Returns an error for non-finite or negative bounds, an empty range,
    /// or a negative deduction
    pub fn new(min: f64, max: Option<f64>, deduction: f64) -> Result<Self> {
        if !min.is_finite() || min < 0.0 {
            anyhow::bail!("Quantity bracket minimum must be a non-negative number, got {}", min);
        }
        if let Some(max) = max {
            if !max.is_finite() || max <= min {
                anyhow::bail!(
                    "Quantity bracket maximum must be greater than its minimum ({} <= {})",
                    max,
                    min
                );
            }
        }
        if !deduction.is_finite() || deduction < 0.0 {
            anyhow::bail!(
                "Quantity bracket deduction must be a non-negative number, got {}",
                deduction
            );
        }
        Ok(Self {
            min,
            max,
            deduction,
        })
    }

    fn contains(&self, quantity: f64) -> bool {
        quantity >= self.min && self.max.map_or(true, |max| quantity < max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn deduction(&self) -> f64 {
        self.deduction
    }
}

/// QuantityAdjustment policy - waste/overage deduction by order-size bracket
///
/// The bracket table is ordered and non-overlapping. A quantity outside every
/// bracket is returned unchanged; inside one, the bracket's deduction is
/// subtracted and the result floored at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityAdjustment {
    brackets: Vec<QuantityBracket>,
}

impl QuantityAdjustment {
    /// Creates the policy from an ordered bracket table
    ///
    /// # Errors
    /// Returns an error if brackets overlap, are out of order, or an unbounded
    /// bracket is followed by another one
    pub fn new(brackets: Vec<QuantityBracket>) -> Result<Self> {
        for pair in brackets.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            match previous.max {
                None => anyhow::bail!(
                    "Unbounded quantity bracket starting at {} must be the last one",
                    previous.min
                ),
                Some(max) if next.min < max => anyhow::bail!(
                    "Quantity brackets overlap or are out of order: [{}, {}) then [{}, ...)",
                    previous.min,
                    max,
                    next.min
                ),
                Some(_) => {}
            }
        }
        Ok(Self { brackets })
    }

    /// A policy that never changes quantities
    pub fn none() -> Self {
        Self {
            brackets: Vec::new(),
        }
    }

    /// Applies the bracket table to a pre-adjustment quantity
    pub fn adjust(&self, quantity: f64) -> f64 {
        match self.brackets.iter().find(|b| b.contains(quantity)) {
            Some(bracket) => (quantity - bracket.deduction).max(0.0),
            None => quantity,
        }
    }

    pub fn brackets(&self) -> &[QuantityBracket] {
        &self.brackets
    }
}

impl Default for QuantityAdjustment {
    /// `[11, 50) -> -2`, `[50, 100) -> -4`, `[100, inf) -> -10`
    fn default() -> Self {
        Self {
            brackets: vec![
                QuantityBracket {
                    min: 11.0,
                    max: Some(50.0),
                    deduction: 2.0,
                },
                QuantityBracket {
                    min: 50.0,
                    max: Some(100.0),
                    deduction: 4.0,
                },
                QuantityBracket {
                    min: 100.0,
                    max: None,
                    deduction: 10.0,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brackets() {
        let policy = QuantityAdjustment::default();
        assert_eq!(policy.adjust(12.0), 10.0);
        assert_eq!(policy.adjust(60.0), 56.0);
        assert_eq!(policy.adjust(150.0), 140.0);
        assert_eq!(policy.adjust(5.0), 5.0);
    }

    #[test]
    fn test_bracket_boundaries() {
        let policy = QuantityAdjustment::default();
        assert_eq!(policy.adjust(10.99), 10.99);
        assert_eq!(policy.adjust(11.0), 9.0);
        assert_eq!(policy.adjust(49.5), 47.5);
        assert_eq!(policy.adjust(50.0), 46.0);
        assert_eq!(policy.adjust(99.0), 95.0);
        assert_eq!(policy.adjust(100.0), 90.0);
    }

    #[test]
    fn test_result_floored_at_zero() {
        let policy =
            QuantityAdjustment::new(vec![QuantityBracket::new(1.0, Some(5.0), 10.0).unwrap()])
                .unwrap();
        assert_eq!(policy.adjust(3.0), 0.0);
    }

    #[test]
    fn test_no_brackets_is_identity() {
        let policy = QuantityAdjustment::none();
        assert_eq!(policy.adjust(150.0), 150.0);
    }

    #[test]
    fn test_overlapping_brackets_rejected() {
        let result = QuantityAdjustment::new(vec![
            QuantityBracket::new(10.0, Some(50.0), 2.0).unwrap(),
            QuantityBracket::new(40.0, Some(60.0), 4.0).unwrap(),
        ]);
        assert!(result.unwrap_err().to_string().contains("overlap"));
    }

    #[test]
    fn test_unbounded_bracket_must_be_last() {
        let result = QuantityAdjustment::new(vec![
            QuantityBracket::new(10.0, None, 2.0).unwrap(),
            QuantityBracket::new(100.0, None, 4.0).unwrap(),
        ]);
        assert!(result.unwrap_err().to_string().contains("must be the last"));
    }

    #[test]
    fn test_invalid_bracket_values() {
        assert!(QuantityBracket::new(-1.0, None, 1.0).is_err());
        assert!(QuantityBracket::new(10.0, Some(10.0), 1.0).is_err());
        assert!(QuantityBracket::new(10.0, Some(20.0), -1.0).is_err());
        assert!(QuantityBracket::new(f64::NAN, None, 1.0).is_err());
    }
}
