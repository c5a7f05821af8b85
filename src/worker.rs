//! 工作协程
//!
//! 每个工作协程循环：取标签、拼完整域名、拿并发许可、解析、
//! 过滤泛解析、上报真实发现、标记条目完成；取到哨兵时退出。
//! 解析策略：先查 A 记录，没有结果再换一次解析器回退查 AAAA。

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use itertools::Itertools;

use crate::client::{LookupOutcome, NameLookup, QueryType};
use crate::health::ResolverHealth;
use crate::limiter::DynamicLimiter;
use crate::output::DiscoverySink;
use crate::queue::WorkQueue;
use crate::resolver_pool::ResolverPool;
use crate::state::ScanState;
use crate::telemetry::{SampleKind, Telemetry};
use crate::util::fqdn;
use crate::wildcard;

/// 单次查询允许超出共享超时的宽限（秒）
///
/// 超过「共享超时 + 宽限」的查询被强制放弃并按超时记账，
/// 与底层客户端自身的超时配置无关。
pub(crate) const LOOKUP_GRACE_SECS: f64 = 0.5;

/// 一次扫描中所有协程共享的句柄集合
pub struct ScanContext<C: NameLookup> {
    /// 父域名
    pub parent: String,
    /// 候选标签队列，None 为关闭哨兵
    pub queue: Arc<WorkQueue<Option<String>>>,
    /// 解析器池
    pub pool: Arc<ResolverPool<C>>,
    /// 解析器健康跟踪
    pub health: Arc<ResolverHealth>,
    /// 延迟遥测
    pub telemetry: Arc<Telemetry>,
    /// 并发限制器
    pub limiter: Arc<DynamicLimiter>,
    /// 泛解析地址集合，扫描前学习，之后只读
    pub wildcard_ips: HashSet<IpAddr>,
    /// 进度计数与共享超时
    pub state: Arc<ScanState>,
    /// 结果输出端
    pub sink: Arc<DiscoverySink>,
}

/// 带硬性截止时间的单次查询，延迟与结果分类记入遥测
pub(crate) async fn timed_lookup<C: NameLookup>(
    client: &C,
    name: &str,
    qtype: QueryType,
    lifetime: f64,
    telemetry: &Telemetry,
) -> LookupOutcome {
    let deadline = Duration::from_secs_f64(lifetime + LOOKUP_GRACE_SECS);
    let started = Instant::now();
    let outcome = match tokio::time::timeout(deadline, client.lookup(name, qtype)).await {
        Ok(outcome) => outcome,
        Err(_) => LookupOutcome::TimedOut,
    };
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    let kind = match &outcome {
        LookupOutcome::Answered(_) | LookupOutcome::NoRecords => SampleKind::Success,
        LookupOutcome::TimedOut => SampleKind::Timeout,
        LookupOutcome::Failed(_) => SampleKind::Error,
    };
    telemetry.record(latency_ms, kind);
    outcome
}

/// 解析一个候选域名，返回排序去重后的地址（可能为空）
pub async fn resolve_label<C: NameLookup>(
    pool: &ResolverPool<C>,
    health: &ResolverHealth,
    telemetry: &Telemetry,
    name: &str,
    timeout: f64,
) -> Vec<IpAddr> {
    let mut idx = pool.select(name, health);
    let outcome = timed_lookup(pool.client(idx), name, QueryType::A, timeout, telemetry).await;
    health.record_outcome(idx, outcome.is_healthy());
    match outcome {
        LookupOutcome::Answered(addrs) if !addrs.is_empty() => return sorted_unique(addrs),
        LookupOutcome::Failed(reason) => log::warn!("解析 {} 出错: {}", name, reason),
        _ => {}
    }

    // A 查询刚让首选解析器进入冷却时，换一个再做 AAAA 回退
    if health.in_cooldown(idx) {
        idx = pool.select(name, health);
    }
    let outcome = timed_lookup(pool.client(idx), name, QueryType::AAAA, timeout, telemetry).await;
    health.record_outcome(idx, outcome.is_healthy());
    match outcome {
        LookupOutcome::Answered(addrs) if !addrs.is_empty() => sorted_unique(addrs),
        LookupOutcome::Failed(reason) => {
            log::warn!("解析 {} 出错: {}", name, reason);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn sorted_unique(addrs: Vec<IpAddr>) -> Vec<IpAddr> {
    addrs.into_iter().sorted().dedup().collect()
}

/// 条目完成度守卫：即使处理过程异常展开，条目也会被标记完成，
/// 队列的 join 不会因为单个工作协程崩溃而卡死
struct DoneGuard<'a, T>(&'a WorkQueue<T>);

impl<'a, T> Drop for DoneGuard<'a, T> {
    fn drop(&mut self) {
        self.0.mark_done();
    }
}

/// 工作协程主循环
pub async fn worker_loop<C: NameLookup>(ctx: Arc<ScanContext<C>>) {
    loop {
        let item = ctx.queue.pop().await;
        // 哨兵同样计入队列完成度
        let _done = DoneGuard(&*ctx.queue);
        match item {
            Some(label) => process_label(&ctx, &label).await,
            None => return,
        }
    }
}

/// 处理单个候选标签；解析失败被吸收，不影响队列完成度
async fn process_label<C: NameLookup>(ctx: &ScanContext<C>, label: &str) {
    ctx.state.note_attempted();
    let name = fqdn(label, &ctx.parent);

    let permit = ctx.limiter.acquire().await;
    let addrs = resolve_label(
        &ctx.pool,
        &ctx.health,
        &ctx.telemetry,
        &name,
        ctx.state.timeout(),
    )
    .await;
    drop(permit);

    if !addrs.is_empty() && !wildcard::is_wildcard_only(&addrs, &ctx.wildcard_ips) {
        ctx.state.note_found();
        ctx.sink.report(&name, addrs);
    }
    ctx.state.note_processed();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 永远返回固定答案的桩客户端
    #[derive(Clone)]
    struct FixedClient {
        outcome: LookupOutcome,
        calls: Arc<AtomicUsize>,
    }

    impl FixedClient {
        fn new(outcome: LookupOutcome) -> Self {
            FixedClient {
                outcome,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl NameLookup for FixedClient {
        fn set_timeout(&self, _timeout: Duration) {}

        fn lookup(
            &self,
            _name: &str,
            _qtype: QueryType,
        ) -> impl Future<Output = LookupOutcome> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            async move { outcome }
        }
    }

    /// 挂起到超出截止时间的桩客户端
    #[derive(Clone)]
    struct HangingClient;

    impl NameLookup for HangingClient {
        fn set_timeout(&self, _timeout: Duration) {}

        fn lookup(
            &self,
            _name: &str,
            _qtype: QueryType,
        ) -> impl Future<Output = LookupOutcome> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                LookupOutcome::NoRecords
            }
        }
    }

    fn harness(n: usize) -> (ResolverHealth, Telemetry) {
        (
            ResolverHealth::new(n, 5, Duration::from_secs(30)),
            Telemetry::new(1000),
        )
    }

    #[tokio::test]
    async fn test_answered_a_lookup_returns_sorted_unique() {
        let client = FixedClient::new(LookupOutcome::Answered(vec![
            "9.9.9.9".parse().unwrap(),
            "1.2.3.4".parse().unwrap(),
            "9.9.9.9".parse().unwrap(),
        ]));
        let calls = Arc::clone(&client.calls);
        let pool = ResolverPool::from_clients(vec![client]);
        let (health, telemetry) = harness(1);

        let addrs = resolve_label(&pool, &health, &telemetry, "www.example.com", 2.0).await;
        assert_eq!(
            addrs,
            vec![
                "1.2.3.4".parse::<IpAddr>().unwrap(),
                "9.9.9.9".parse::<IpAddr>().unwrap()
            ]
        );
        // A 记录有结果就不再回退 AAAA
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(telemetry.snapshot().success, 1);
    }

    #[tokio::test]
    async fn test_no_records_falls_back_to_aaaa() {
        let client = FixedClient::new(LookupOutcome::NoRecords);
        let calls = Arc::clone(&client.calls);
        let pool = ResolverPool::from_clients(vec![client]);
        let (health, telemetry) = harness(1);

        let addrs = resolve_label(&pool, &health, &telemetry, "nothing.example.com", 2.0).await;
        assert!(addrs.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // 两次查询都按成功采样
        let snap = telemetry.snapshot();
        assert_eq!(snap.success, 2);
        assert_eq!(snap.total, 2);
        assert_eq!(health.fails(0), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_lookup_hits_hard_deadline() {
        let pool = ResolverPool::from_clients(vec![HangingClient]);
        let (health, telemetry) = harness(1);

        let addrs = resolve_label(&pool, &health, &telemetry, "slow.example.com", 1.0).await;
        assert!(addrs.is_empty());

        let snap = telemetry.snapshot();
        assert_eq!(snap.timeout, 2);
        // 两次超时按失败计入健康统计
        assert_eq!(health.fails(0), 2);
    }

    #[tokio::test]
    async fn test_timeouts_feed_cooldown_accounting() {
        let client = FixedClient::new(LookupOutcome::TimedOut);
        let pool = ResolverPool::from_clients(vec![client]);
        let health = ResolverHealth::new(1, 4, Duration::from_secs(30));
        let telemetry = Telemetry::new(1000);

        // 每次 resolve_label 记两次失败（A 与 AAAA）
        resolve_label(&pool, &health, &telemetry, "a.example.com", 2.0).await;
        assert!(!health.in_cooldown(0));
        resolve_label(&pool, &health, &telemetry, "b.example.com", 2.0).await;
        assert!(health.in_cooldown(0));
    }
}
