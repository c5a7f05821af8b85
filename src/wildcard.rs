//! 泛解析检测
//!
//! 扫描开始前用随机标签探测父域名。随机子域也能解析说明父域名配置了
//! 泛解析，把这些应答地址收进集合；之后只有至少返回一个集合外地址的
//! 结果才算真实发现。

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

use crate::client::NameLookup;
use crate::health::ResolverHealth;
use crate::resolver_pool::ResolverPool;
use crate::state::ScanState;
use crate::telemetry::Telemetry;
use crate::util::{fqdn, random_probe_label};
use crate::worker;

/// 泛解析检测器
pub struct WildcardDetector {
    probes: usize,
}

impl WildcardDetector {
    /// 创建检测器，probes 为随机探测次数，至少为 1
    pub fn new(probes: usize) -> Self {
        WildcardDetector {
            probes: probes.max(1),
        }
    }

    /// 并发探测随机子域，返回学习到的泛解析地址集合
    ///
    /// 探测走与工作协程相同的健康感知解析路径，采样同样计入遥测；
    /// 单个探测失败被吸收，不影响其余探测。
    pub async fn detect<C: NameLookup>(
        &self,
        parent: &str,
        pool: &Arc<ResolverPool<C>>,
        health: &Arc<ResolverHealth>,
        telemetry: &Arc<Telemetry>,
        state: &Arc<ScanState>,
    ) -> HashSet<IpAddr> {
        let mut handles = Vec::with_capacity(self.probes);
        for _ in 0..self.probes {
            let name = fqdn(&random_probe_label(), parent);
            let pool = Arc::clone(pool);
            let health = Arc::clone(health);
            let telemetry = Arc::clone(telemetry);
            let state = Arc::clone(state);
            handles.push(tokio::spawn(async move {
                worker::resolve_label(&pool, &health, &telemetry, &name, state.timeout()).await
            }));
        }

        let mut ips = HashSet::new();
        for handle in handles {
            if let Ok(addrs) = handle.await {
                ips.extend(addrs);
            }
        }
        ips
    }
}

/// 结果是否应作为泛解析假阳性被抑制
///
/// 非空结果的所有地址都落在泛解析集合内时抑制；只要有一个集合外地址
/// 就按真实发现处理。
pub fn is_wildcard_only(addrs: &[IpAddr], wildcard_ips: &HashSet<IpAddr>) -> bool {
    !addrs.is_empty() && !wildcard_ips.is_empty() && addrs.iter().all(|a| wildcard_ips.contains(a))
}
