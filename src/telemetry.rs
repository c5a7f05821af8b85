//! 滑动窗口遥测
//!
//! 工作协程把每次解析的（延迟, 结果分类）追加进固定容量的环形窗口，
//! 调谐器按需取一致性快照计算百分位与各类比率。

use std::collections::VecDeque;
use std::sync::Mutex;

/// 单次解析采样的结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// 正常应答（包含 NXDOMAIN / NoAnswer）
    Success,
    /// 超时类失败
    Timeout,
    /// 其他意外错误
    Error,
}

/// 遥测的一致性只读快照
#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    /// 中位延迟（毫秒），窗口为空时为 None
    pub p50: Option<f64>,
    /// 90 分位延迟（毫秒），窗口为空时为 None
    pub p90: Option<f64>,
    /// 窗口内成功样本数
    pub success: usize,
    /// 窗口内超时样本数
    pub timeout: usize,
    /// 窗口内错误样本数
    pub error: usize,
    /// 窗口内样本总数
    pub total: usize,
    /// 成功率
    pub success_rate: f64,
    /// 超时率
    pub timeout_rate: f64,
}

/// 固定容量的采样窗口，追加 O(1)，快照时排序计算百分位
pub struct Telemetry {
    window: usize,
    samples: Mutex<VecDeque<(f64, SampleKind)>>,
}

impl Telemetry {
    /// 创建容量为 window 的遥测窗口
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Telemetry {
            window,
            samples: Mutex::new(VecDeque::with_capacity(window)),
        }
    }

    /// 追加一条采样，窗口满时淘汰最旧的一条
    pub fn record(&self, latency_ms: f64, kind: SampleKind) {
        let mut samples = self.samples.lock().unwrap();
        if samples.len() == self.window {
            samples.pop_front();
        }
        samples.push_back((latency_ms, kind));
    }

    /// 当前窗口内样本数
    pub fn len(&self) -> usize {
        self.samples.lock().unwrap().len()
    }

    /// 窗口是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 取一份一致性快照
    pub fn snapshot(&self) -> TelemetrySnapshot {
        let data: Vec<(f64, SampleKind)> = {
            let samples = self.samples.lock().unwrap();
            samples.iter().copied().collect()
        };
        if data.is_empty() {
            return TelemetrySnapshot::default();
        }

        let mut lats: Vec<f64> = data.iter().map(|(lat, _)| *lat).collect();
        lats.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let total = data.len();
        let success = data.iter().filter(|(_, k)| *k == SampleKind::Success).count();
        let timeout = data.iter().filter(|(_, k)| *k == SampleKind::Timeout).count();
        let error = data.iter().filter(|(_, k)| *k == SampleKind::Error).count();

        TelemetrySnapshot {
            p50: percentile(&lats, 0.50),
            p90: percentile(&lats, 0.90),
            success,
            timeout,
            error,
            total,
            success_rate: success as f64 / total as f64,
            timeout_rate: timeout as f64 / total as f64,
        }
    }
}

/// 最近秩百分位：index = clamp(floor(p*(n-1)), 0, n-1)
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let idx = ((p * (n - 1) as f64).floor() as usize).min(n - 1);
    Some(sorted[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let telemetry = Telemetry::new(1000);
        let snap = telemetry.snapshot();
        assert_eq!(snap.p50, None);
        assert_eq!(snap.p90, None);
        assert_eq!(snap.total, 0);
        assert_eq!(snap.success, 0);
        assert_eq!(snap.success_rate, 0.0);
        assert_eq!(snap.timeout_rate, 0.0);
    }

    #[test]
    fn test_percentiles_nearest_rank() {
        // 样本 [10, 20, ..., 1000]，共 100 条
        let telemetry = Telemetry::new(1000);
        for i in 1..=100 {
            telemetry.record((i * 10) as f64, SampleKind::Success);
        }
        let snap = telemetry.snapshot();
        // floor(0.5 * 99) = 49 -> 500ms; floor(0.9 * 99) = 89 -> 900ms
        assert_eq!(snap.p50, Some(500.0));
        assert_eq!(snap.p90, Some(900.0));
        assert_eq!(snap.total, 100);
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let telemetry = Telemetry::new(5);
        for i in 0..100 {
            telemetry.record(i as f64, SampleKind::Success);
        }
        assert_eq!(telemetry.len(), 5);
    }

    #[test]
    fn test_fifo_eviction() {
        let telemetry = Telemetry::new(5);
        for i in 1..=8 {
            telemetry.record(i as f64, SampleKind::Success);
        }
        // 最旧的 1..=3 被淘汰，窗口内只剩 4..=8
        let snap = telemetry.snapshot();
        assert_eq!(snap.total, 5);
        assert_eq!(snap.p50, Some(6.0));
        assert_eq!(snap.p90, Some(7.0));
    }

    #[test]
    fn test_outcome_rates_follow_window() {
        let telemetry = Telemetry::new(4);
        telemetry.record(1.0, SampleKind::Timeout);
        telemetry.record(1.0, SampleKind::Success);
        telemetry.record(1.0, SampleKind::Success);
        telemetry.record(1.0, SampleKind::Error);
        telemetry.record(1.0, SampleKind::Success);
        // 第一条 Timeout 已被淘汰
        let snap = telemetry.snapshot();
        assert_eq!(snap.total, 4);
        assert_eq!(snap.success, 3);
        assert_eq!(snap.timeout, 0);
        assert_eq!(snap.error, 1);
        assert_eq!(snap.success_rate, 0.75);
        assert_eq!(snap.timeout_rate, 0.0);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[42.0], 0.5), Some(42.0));
        assert_eq!(percentile(&[42.0], 0.9), Some(42.0));
        assert_eq!(percentile(&[], 0.5), None);
    }
}
