/// The metrics recorded after a single training iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationMetrics {
    pub train_loss: f32,
    pub train_accuracy: f32,
    pub validation_loss: f32,
    pub validation_accuracy: f32,
}

/// Per iteration loss and accuracy on the training and validation sets.
///
/// All four series always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    train_loss: Vec<f32>,
    train_accuracy: Vec<f32>,
    validation_loss: Vec<f32>,
    validation_accuracy: Vec<f32>,
}

impl TrainingHistory {
    /// Creates an empty history with room for `iterations` entries.
    pub fn with_capacity(iterations: usize) -> Self {
        Self {
            train_loss: Vec::with_capacity(iterations),
            train_accuracy: Vec::with_capacity(iterations),
            validation_loss: Vec::with_capacity(iterations),
            validation_accuracy: Vec::with_capacity(iterations),
        }
    }

    pub fn push(&mut self, metrics: IterationMetrics) {
        self.train_loss.push(metrics.train_loss);
        self.train_accuracy.push(metrics.train_accuracy);
        self.validation_loss.push(metrics.validation_loss);
        self.validation_accuracy.push(metrics.validation_accuracy);
    }

    /// Returns the amount of recorded iterations.
    pub fn len(&self) -> usize {
        self.train_loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train_loss.is_empty()
    }

    /// Returns the metrics recorded at iteration `i`.
    pub fn get(&self, i: usize) -> Option<IterationMetrics> {
        Some(IterationMetrics {
            train_loss: *self.train_loss.get(i)?,
            train_accuracy: *self.train_accuracy.get(i)?,
            validation_loss: *self.validation_loss.get(i)?,
            validation_accuracy: *self.validation_accuracy.get(i)?,
        })
    }

    /// Returns the metrics of the last iteration.
    pub fn last(&self) -> Option<IterationMetrics> {
        self.get(self.len().checked_sub(1)?)
    }

    pub fn train_loss(&self) -> &[f32] {
        &self.train_loss
    }

    pub fn train_accuracy(&self) -> &[f32] {
        &self.train_accuracy
    }

    pub fn validation_loss(&self) -> &[f32] {
        &self.validation_loss
    }

    pub fn validation_accuracy(&self) -> &[f32] {
        &self.validation_accuracy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(i: usize) -> IterationMetrics {
        let v = i as f32;
        IterationMetrics {
            train_loss: v,
            train_accuracy: v + 0.1,
            validation_loss: v + 0.2,
            validation_accuracy: v + 0.3,
        }
    }

    #[test]
    fn series_grow_together() {
        let mut history = TrainingHistory::with_capacity(3);
        assert!(history.is_empty());
        assert!(history.last().is_none());

        for i in 0..3 {
            history.push(metrics(i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.train_loss(), &[0., 1., 2.]);
        assert_eq!(history.validation_accuracy().len(), 3);
        assert_eq!(history.get(1), Some(metrics(1)));
        assert_eq!(history.last(), Some(metrics(2)));
        assert!(history.get(3).is_none());
    }
}
