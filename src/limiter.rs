//! 动态并发限制器
//!
//! 一个上限可在运行期调整的计数信号量。扩容立即放出新许可；
//! 缩容会等待在途任务归还许可，绝不强行收回已持有的许可，
//! 因此缩容是随在途工作完成而逐步生效的。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

/// 上限可变的计数信号量
pub struct DynamicLimiter {
    sem: Arc<Semaphore>,
    max: AtomicUsize,
    resize: Mutex<()>,
}

impl DynamicLimiter {
    /// 以初始上限创建限制器，上限至少为 1
    pub fn new(initial: usize) -> Self {
        let initial = initial.max(1);
        DynamicLimiter {
            sem: Arc::new(Semaphore::new(initial)),
            max: AtomicUsize::new(initial),
            resize: Mutex::new(()),
        }
    }

    /// 当前并发上限
    pub fn limit(&self) -> usize {
        self.max.load(Ordering::Relaxed)
    }

    /// 调整上限；同一时刻只允许一次调整在途
    pub async fn set_limit(&self, new_limit: usize) {
        let new_limit = new_limit.max(1);
        let _guard = self.resize.lock().await;
        let old = self.max.load(Ordering::Relaxed);
        if new_limit == old {
            return;
        }
        self.max.store(new_limit, Ordering::Relaxed);
        if new_limit > old {
            self.sem.add_permits(new_limit - old);
        } else {
            // 从信号量里取回差额并丢弃，直到在途任务释放足够的许可
            for _ in 0..old - new_limit {
                match self.sem.acquire().await {
                    Ok(permit) => permit.forget(),
                    Err(_) => break,
                }
            }
        }
    }

    /// 获取一个许可；guard 在任意退出路径上随 drop 释放
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        Arc::clone(&self.sem).acquire_owned().await.unwrap()
    }

    /// 尝试立即获取一个许可
    pub fn try_acquire(&self) -> Option<OwnedSemaphorePermit> {
        Arc::clone(&self.sem).try_acquire_owned().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_grow_releases_permits_immediately() {
        let limiter = DynamicLimiter::new(3);
        let mut held = Vec::new();
        for _ in 0..3 {
            held.push(limiter.acquire().await);
        }
        assert!(limiter.try_acquire().is_none());

        limiter.set_limit(8).await;
        assert_eq!(limiter.limit(), 8);
        for _ in 0..5 {
            held.push(limiter.try_acquire().expect("扩容后的许可应立即可用"));
        }
        assert!(limiter.try_acquire().is_none());
    }

    #[tokio::test]
    async fn test_shrink_waits_for_holders() {
        let limiter = Arc::new(DynamicLimiter::new(10));
        let mut held = Vec::new();
        for _ in 0..10 {
            held.push(limiter.acquire().await);
        }

        let shrinker = Arc::clone(&limiter);
        let shrink = tokio::spawn(async move {
            shrinker.set_limit(5).await;
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!shrink.is_finished(), "缩容需等待许可归还");

        for _ in 0..5 {
            held.pop();
        }
        shrink.await.unwrap();
        assert_eq!(limiter.limit(), 5);

        // 剩下 5 个许可仍被持有，新的获取不可能超过上限
        assert!(limiter.try_acquire().is_none());
        held.clear();
        assert!(limiter.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_limit_floor_is_one() {
        let limiter = DynamicLimiter::new(0);
        assert_eq!(limiter.limit(), 1);
        limiter.set_limit(0).await;
        assert_eq!(limiter.limit(), 1);
        assert!(limiter.try_acquire().is_some());
    }
}
