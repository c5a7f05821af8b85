//! 扫描共享状态
//!
//! 进度计数与共享超时集中放在一个状态结构里，每次扫描独立持有，
//! 组件间通过共享所有权传递，不使用全局变量。计数只增不减，
//! 共享超时只由调谐器改写、由工作协程在每次查询时读取。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// 单次扫描的共享可变状态
#[derive(Debug)]
pub struct ScanState {
    attempted: AtomicU64,
    processed: AtomicU64,
    found: AtomicU64,
    shared_timeout: RwLock<f64>,
}

impl ScanState {
    /// 以初始共享超时（秒）创建状态
    pub fn new(initial_timeout: f64) -> Self {
        ScanState {
            attempted: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            found: AtomicU64::new(0),
            shared_timeout: RwLock::new(initial_timeout),
        }
    }

    /// 记一次取出的候选
    pub fn note_attempted(&self) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记一次处理完成的候选
    pub fn note_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    /// 记一次真实发现
    pub fn note_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    /// 已尝试的候选数
    pub fn attempted(&self) -> u64 {
        self.attempted.load(Ordering::Relaxed)
    }

    /// 已处理完成的候选数
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// 真实发现数
    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    /// 当前共享超时（秒）
    pub fn timeout(&self) -> f64 {
        *self.shared_timeout.read().unwrap()
    }

    /// 改写共享超时，只由调谐器调用
    pub fn set_timeout(&self, timeout: f64) {
        *self.shared_timeout.write().unwrap() = timeout;
    }
}
