use std::time::Duration;

use async_trait::async_trait;

/// Paces the visual transition into each step.
#[async_trait]
pub trait Animator: Send + Sync {
    async fn pace(&self, step: usize);
}

/// Sleeps a fixed delay before every step.
#[derive(Debug, Clone, Copy)]
pub struct TokioAnimator {
    delay: Duration,
}

impl TokioAnimator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Animator for TokioAnimator {
    async fn pace(&self, _step: usize) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Advances immediately. Used by tests and `--no-pacing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnimator;

#[async_trait]
impl Animator for NoopAnimator {
    async fn pace(&self, _step: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_animator_waits_for_delay() {
        let animator = TokioAnimator::new(Duration::from_millis(200));
        let before = tokio::time::Instant::now();
        animator.pace(0).await;
        assert!(before.elapsed() >= Duration::from_millis(200));
    }
}
