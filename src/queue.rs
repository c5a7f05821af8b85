//! 共享任务队列
//!
//! 多个工作协程从同一个队列取候选标签，每个条目恰好被取走一次。
//! 队列跟踪未完成条目数：`mark_done` 必须与成功出队一一对应，
//! `join` 在所有已入队条目处理完毕后返回，作为扫描的终止信号。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::Notify;

/// 带完成度跟踪的先进先出队列
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    unfinished: AtomicUsize,
    item_ready: Notify,
    all_done: Notify,
}

impl<T> WorkQueue<T> {
    /// 创建空队列
    pub fn new() -> Self {
        WorkQueue {
            items: Mutex::new(VecDeque::new()),
            unfinished: AtomicUsize::new(0),
            item_ready: Notify::new(),
            all_done: Notify::new(),
        }
    }

    /// 入队一个条目并唤醒一个等待中的工作协程
    pub fn push(&self, item: T) {
        self.unfinished.fetch_add(1, Ordering::SeqCst);
        self.items.lock().unwrap().push_back(item);
        self.item_ready.notify_one();
    }

    /// 出队一个条目；队列为空时挂起等待
    pub async fn pop(&self) -> T {
        loop {
            let notified = self.item_ready.notified();
            if let Some(item) = self.items.lock().unwrap().pop_front() {
                return item;
            }
            notified.await;
        }
    }

    /// 当前积压条目数
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// 队列当前是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 标记一个已出队条目处理完成
    pub fn mark_done(&self) {
        if self.unfinished.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.all_done.notify_waiters();
        }
    }

    /// 等待所有已入队条目处理完成
    pub async fn join(&self) {
        loop {
            let notified = self.all_done.notified();
            if self.unfinished.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_each_item_popped_exactly_once() {
        let queue = WorkQueue::new();
        for i in 0..5 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 5);

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(queue.pop().await);
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_join_waits_for_mark_done() {
        let queue = Arc::new(WorkQueue::new());
        queue.push("a");
        queue.push("b");

        let joiner = Arc::clone(&queue);
        let join = tokio::spawn(async move {
            joiner.join().await;
        });

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!join.is_finished(), "还有未完成条目时 join 不应返回");

        queue.pop().await;
        queue.mark_done();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!join.is_finished());

        queue.pop().await;
        queue.mark_done();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn test_join_on_empty_queue_returns_immediately() {
        let queue: WorkQueue<u32> = WorkQueue::new();
        queue.join().await;
    }

    #[tokio::test]
    async fn test_pop_wakes_on_late_push() {
        let queue = Arc::new(WorkQueue::new());
        let popper = Arc::clone(&queue);
        let pop = tokio::spawn(async move { popper.pop().await });

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!pop.is_finished());

        queue.push(7u32);
        assert_eq!(pop.await.unwrap(), 7);
    }
}
