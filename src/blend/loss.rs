/// Mean logistic loss `ln(1 + e^(-y·p))` over the pushed samples.
#[derive(Default, Copy, Clone)]
pub struct LogisticLoss {
    loss: f64,
    n: usize,
}

impl LogisticLoss {
    #[inline]
    pub fn push_sample(&mut self, label: f64, prediction: f64) {
        self.loss += softplus(-label * prediction);
        self.n += 1;
    }

    #[must_use]
    pub fn finalise(&self) -> f64 {
        self.loss / self.n.max(1) as f64
    }
}

/// `ln(1 + e^x)` without overflowing for large `x`.
#[must_use]
fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}
