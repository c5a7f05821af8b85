//! 自适应调谐器
//!
//! 一个独立的后台任务，按固定周期读取遥测快照，根据 p90 延迟、
//! 成功率、超时率和队列积压调整并发上限与共享超时，并把结果
//! 写回限制器与解析器池，形成反馈闭环。

use std::sync::Arc;
use std::time::Duration;

use crate::client::NameLookup;
use crate::telemetry::TelemetrySnapshot;
use crate::worker::ScanContext;

/// 单次乘性扩容比例
const SCALE_UP_FACTOR: f64 = 1.10;
/// 单次乘性缩容比例
const SCALE_DOWN_FACTOR: f64 = 0.70;
/// 触发缩容的超时率阈值
const TIMEOUT_RATE_LIMIT: f64 = 0.08;
/// 允许扩容的成功率下限
const SUCCESS_RATE_FLOOR: f64 = 0.90;
/// 超时调整的滞回带（秒）
const TIMEOUT_HYSTERESIS_SECS: f64 = 0.2;
/// p90 延迟到建议超时的放大系数
const TIMEOUT_FACTOR: f64 = 1.5;

/// 引擎的全部调优常量
///
/// 固定常量集中在一个结构里，`Default` 给出文档化的默认值。
#[derive(Debug, Clone)]
pub struct TuningConfig {
    /// 并发下限（默认 64）
    pub conc_min: usize,
    /// 并发上限（默认 256）
    pub conc_max: usize,
    /// 初始并发（默认 100），同时是工作协程数量
    pub initial_concurrency: usize,
    /// 扩容要求的 p90 延迟目标（毫秒，默认 400.0）
    pub target_p90_ms: f64,
    /// 共享超时下限（秒，默认 1.0）
    pub timeout_min: f64,
    /// 共享超时上限（秒，默认 5.0）
    pub timeout_max: f64,
    /// 初始共享超时（秒，默认 2.0）
    pub initial_timeout: f64,
    /// 调整周期（默认 5 秒）
    pub adjust_period: Duration,
    /// 遥测窗口容量（默认 1000）
    pub metrics_window: usize,
    /// 允许扩容的最少样本数（默认 200）
    pub ramp_min_samples: usize,
    /// 允许缩容与调超时的最少样本数（默认 50）
    pub tune_min_samples: usize,
    /// 解析器连续失败进入冷却的阈值（默认 5）
    pub resolver_fail_limit: u32,
    /// 解析器冷却窗口（默认 30 秒）
    pub resolver_cooldown: Duration,
    /// 泛解析随机探测次数（默认 2）
    pub wildcard_probes: usize,
}

impl Default for TuningConfig {
    fn default() -> Self {
        TuningConfig {
            conc_min: 64,
            conc_max: 256,
            initial_concurrency: 100,
            target_p90_ms: 400.0,
            timeout_min: 1.0,
            timeout_max: 5.0,
            initial_timeout: 2.0,
            adjust_period: Duration::from_secs(5),
            metrics_window: 1000,
            ramp_min_samples: 200,
            tune_min_samples: 50,
            resolver_fail_limit: 5,
            resolver_cooldown: Duration::from_secs(30),
            wildcard_probes: 2,
        }
    }
}

/// 根据遥测快照计算下一个并发上限
///
/// 扩容与缩容独立判断，缩容在后评估；两个条件同时满足时缩容生效。
/// p90 未定义（窗口为空）时不做任何调整。
pub fn plan_concurrency(
    snap: &TelemetrySnapshot,
    current: usize,
    queue_len: usize,
    cfg: &TuningConfig,
) -> usize {
    let p90 = match snap.p90 {
        Some(p90) => p90,
        None => return current,
    };

    let mut new_limit = current;
    if snap.total >= cfg.ramp_min_samples
        && snap.success_rate >= SUCCESS_RATE_FLOOR
        && p90 <= cfg.target_p90_ms
        && queue_len > 0
    {
        let grown = (current as f64 * SCALE_UP_FACTOR).round() as usize;
        new_limit = grown.clamp(cfg.conc_min, cfg.conc_max);
    }
    if snap.timeout_rate >= TIMEOUT_RATE_LIMIT
        || (p90 > cfg.target_p90_ms && snap.total >= cfg.tune_min_samples)
    {
        let shrunk = (current as f64 * SCALE_DOWN_FACTOR).round() as usize;
        new_limit = shrunk.max(cfg.conc_min);
    }
    new_limit
}

/// 根据 p90 计算新的共享超时（秒）
///
/// 样本不足或变化小于滞回带时返回 None。
pub fn plan_timeout(snap: &TelemetrySnapshot, current: f64, cfg: &TuningConfig) -> Option<f64> {
    let p90 = snap.p90?;
    if snap.total < cfg.tune_min_samples {
        return None;
    }
    let proposed = (p90 / 1000.0 * TIMEOUT_FACTOR).clamp(cfg.timeout_min, cfg.timeout_max);
    if (proposed - current).abs() >= TIMEOUT_HYSTERESIS_SECS {
        Some(proposed)
    } else {
        None
    }
}

/// 调谐循环：每个周期执行一次调整并输出一行诊断
///
/// 作为后台任务运行，扫描结束后由所有者 abort 并吸收取消结果。
pub async fn adjuster_loop<C: NameLookup>(ctx: Arc<ScanContext<C>>, cfg: TuningConfig) {
    loop {
        tokio::time::sleep(cfg.adjust_period).await;
        run_tick(&ctx, &cfg).await;
    }
}

async fn run_tick<C: NameLookup>(ctx: &ScanContext<C>, cfg: &TuningConfig) {
    let snap = ctx.telemetry.snapshot();
    let queue_len = ctx.queue.len();
    let old_limit = ctx.limiter.limit();

    let new_limit = plan_concurrency(&snap, old_limit, queue_len, cfg);
    if new_limit != old_limit {
        ctx.limiter.set_limit(new_limit).await;
    }

    let current_timeout = ctx.state.timeout();
    if let Some(new_timeout) = plan_timeout(&snap, current_timeout, cfg) {
        ctx.state.set_timeout(new_timeout);
        ctx.pool
            .apply_timeout(Duration::from_secs_f64(new_timeout));
    }

    log::info!(
        "[tune] conc={} p90={}ms success={:.0}% timeouts={:.0}% samples={} q={} timeout={:.1}s",
        ctx.limiter.limit(),
        snap.p90
            .map(|p90| format!("{:.0}", p90))
            .unwrap_or_else(|| "-".to_string()),
        snap.success_rate * 100.0,
        snap.timeout_rate * 100.0,
        snap.total,
        queue_len,
        ctx.state.timeout(),
    );
}
