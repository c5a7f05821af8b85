//! 结果输出
//!
//! stdout 每行输出一个发现的完整域名，发现即输出、立即刷新，
//! 顺序不做保证。附加信息与最终统计走 stderr 日志。

use std::io::{self, Write};
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;

/// 发现的子域名记录
#[derive(Debug, Clone)]
pub struct DiscoveredDomain {
    /// 完整域名
    pub domain: String,
    /// 解析到的地址，已排序去重
    pub addresses: Vec<IpAddr>,
    /// 发现时间戳（Unix 秒）
    pub timestamp: u64,
}

/// 流式结果输出端
pub struct DiscoverySink {
    silent: bool,
    discovered: Mutex<Vec<DiscoveredDomain>>,
}

impl DiscoverySink {
    /// 创建输出端；silent 模式下不输出附加日志
    pub fn new(silent: bool) -> Self {
        DiscoverySink {
            silent,
            discovered: Mutex::new(Vec::new()),
        }
    }

    /// 报告一个真实发现：立即写到 stdout 并留存记录
    pub fn report(&self, domain: &str, addresses: Vec<IpAddr>) {
        {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", domain);
            let _ = out.flush();
        }

        if !self.silent {
            let addr_list = addresses
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            log::info!("发现子域名 {} -> {}", domain, addr_list);
        }

        let record = DiscoveredDomain {
            domain: domain.to_string(),
            addresses,
            timestamp: chrono::Utc::now().timestamp() as u64,
        };
        if let Ok(mut discovered) = self.discovered.lock() {
            discovered.push(record);
        }
    }

    /// 取回全部发现记录
    pub fn results(&self) -> Vec<DiscoveredDomain> {
        self.discovered
            .lock()
            .map(|discovered| discovered.clone())
            .unwrap_or_default()
    }

    /// 当前发现数量
    pub fn len(&self) -> usize {
        self.discovered.lock().map(|d| d.len()).unwrap_or(0)
    }

    /// 是否还没有任何发现
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 扫描结束后输出统计行
pub fn print_scan_summary(duration: Duration, attempted: u64, found: u64) {
    let secs = duration.as_secs_f64().max(1e-6);
    let rate = attempted as f64 / secs;
    log::info!(
        "[stats] duration={:.2}s attempted={} found={} avg_per_sec={:.2}",
        secs,
        attempted,
        found,
        rate
    );
}
