//! 扫描引擎公共 API
//!
//! `ScanConfig` + `SubdomainScanEngine` 是库的主要入口；
//! `run_scan` 对 `NameLookup` 泛型，测试可以换入桩客户端驱动整个引擎。

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::client::NameLookup;
use crate::health::ResolverHealth;
use crate::input;
use crate::limiter::DynamicLimiter;
use crate::output::{self, DiscoveredDomain, DiscoverySink};
use crate::queue::WorkQueue;
use crate::resolver_pool::ResolverPool;
use crate::state::ScanState;
use crate::subdata;
use crate::telemetry::Telemetry;
use crate::tuner::{self, TuningConfig};
use crate::wildcard::WildcardDetector;
use crate::worker::{self, ScanContext};

/// 子域名扫描配置
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// 目标父域名
    pub domain: String,
    /// DNS 上游列表，为空则使用内置公共解析器
    pub resolvers: Vec<String>,
    /// 字典文件路径
    pub dictionary_file: Option<String>,
    /// 直接注入的候选标签集合，优先于字典文件
    pub wordlist: Option<Vec<String>>,
    /// 静默模式：发现的域名之外不输出附加信息
    pub silent: bool,
    /// 调优常量
    pub tuning: TuningConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            domain: String::new(),
            resolvers: Vec::new(),
            dictionary_file: None,
            wordlist: None,
            silent: false,
            tuning: TuningConfig::default(),
        }
    }
}

/// 一次扫描的结果汇总
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// 全部发现记录
    pub discovered: Vec<DiscoveredDomain>,
    /// 取出并尝试过的候选数
    pub attempted: u64,
    /// 处理完成的候选数
    pub processed: u64,
    /// 真实发现数
    pub found: u64,
    /// 扫描耗时
    pub duration: Duration,
    /// 学习到的泛解析地址
    pub wildcard_ips: Vec<IpAddr>,
}

/// 子域名扫描引擎
pub struct SubdomainScanEngine {
    config: ScanConfig,
}

impl SubdomainScanEngine {
    /// 创建扫描引擎并校验父域名
    pub fn new(mut config: ScanConfig) -> Result<Self, Box<dyn std::error::Error>> {
        config.domain = input::normalize_parent(&config.domain)?;
        Ok(SubdomainScanEngine { config })
    }

    /// 执行扫描
    pub async fn run(&self) -> Result<ScanReport, Box<dyn std::error::Error>> {
        let pool = ResolverPool::from_upstreams(
            &self.config.resolvers,
            Duration::from_secs_f64(self.config.tuning.initial_timeout),
        )?;
        run_scan(&self.config, pool).await
    }
}

/// 加载候选标签：注入集合 > 字典文件 > 内置字典
fn load_wordlist(config: &ScanConfig) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if let Some(words) = &config.wordlist {
        return Ok(words.clone());
    }
    if let Some(path) = &config.dictionary_file {
        let file = File::open(path)?;
        let reader = io::BufReader::new(file);
        let mut words = Vec::new();
        for line in reader.lines() {
            let word = line?;
            let word = word.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
        return Ok(words);
    }
    Ok(subdata::get_default_sub_data()
        .iter()
        .map(|s| s.to_string())
        .collect())
}

/// 用给定解析器池执行一次完整扫描
pub async fn run_scan<C: NameLookup>(
    config: &ScanConfig,
    pool: ResolverPool<C>,
) -> Result<ScanReport, Box<dyn std::error::Error>> {
    let parent = input::normalize_parent(&config.domain)?;
    let tuning = config.tuning.clone();
    let start = Instant::now();

    let pool = Arc::new(pool);
    let state = Arc::new(ScanState::new(tuning.initial_timeout));
    let telemetry = Arc::new(Telemetry::new(tuning.metrics_window));
    let health = Arc::new(ResolverHealth::new(
        pool.len(),
        tuning.resolver_fail_limit,
        tuning.resolver_cooldown,
    ));
    let limiter = Arc::new(DynamicLimiter::new(tuning.initial_concurrency));

    // 主扫描前学习泛解析地址，之后该集合只读
    let detector = WildcardDetector::new(tuning.wildcard_probes);
    let wildcard_ips: HashSet<IpAddr> = detector
        .detect(&parent, &pool, &health, &telemetry, &state)
        .await;
    if !wildcard_ips.is_empty() {
        let mut listed: Vec<String> = wildcard_ips.iter().map(|ip| ip.to_string()).collect();
        listed.sort();
        log::info!("检测到泛解析，忽略地址: {}", listed.join(", "));
    }

    let queue = Arc::new(WorkQueue::new());
    for word in load_wordlist(config)? {
        let label = word.trim().to_lowercase();
        if !label.is_empty() {
            queue.push(Some(label));
        }
    }

    let sink = Arc::new(DiscoverySink::new(config.silent));
    let ctx = Arc::new(ScanContext {
        parent,
        queue: Arc::clone(&queue),
        pool,
        health,
        telemetry,
        limiter,
        wildcard_ips: wildcard_ips.clone(),
        state: Arc::clone(&state),
        sink: Arc::clone(&sink),
    });

    let worker_count = tuning.initial_concurrency;
    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        workers.push(tokio::spawn(worker::worker_loop(Arc::clone(&ctx))));
    }

    let tuner_handle = tokio::spawn(tuner::adjuster_loop(Arc::clone(&ctx), tuning.clone()));

    // 等待队列排空，再给每个工作协程发一个哨兵
    queue.join().await;
    for _ in 0..worker_count {
        queue.push(None);
    }
    for handle in workers {
        if let Err(err) = handle.await {
            log::warn!("工作协程退出异常: {}", err);
        }
    }

    // 调谐器是后台任务，取消后吸收其结果
    tuner_handle.abort();
    let _ = tuner_handle.await;

    let duration = start.elapsed();
    output::print_scan_summary(duration, state.attempted(), state.found());

    let mut wildcard_list: Vec<IpAddr> = wildcard_ips.into_iter().collect();
    wildcard_list.sort();
    Ok(ScanReport {
        discovered: sink.results(),
        attempted: state.attempted(),
        processed: state.processed(),
        found: state.found(),
        duration,
        wildcard_ips: wildcard_list,
    })
}

/// 便捷的子域名扫描函数
pub async fn scan_subdomains(
    domain: String,
    dictionary_file: Option<String>,
) -> Result<ScanReport, Box<dyn std::error::Error>> {
    let config = ScanConfig {
        domain,
        dictionary_file,
        ..Default::default()
    };
    let engine = SubdomainScanEngine::new(config)?;
    engine.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert!(config.domain.is_empty());
        assert!(config.resolvers.is_empty());
        assert!(config.dictionary_file.is_none());
        assert!(config.wordlist.is_none());
        assert!(!config.silent);
        assert_eq!(config.tuning.initial_concurrency, 100);
        assert_eq!(config.tuning.metrics_window, 1000);
    }

    #[test]
    fn test_engine_rejects_bad_domain() {
        let config = ScanConfig {
            domain: "localhost".to_string(),
            ..Default::default()
        };
        assert!(SubdomainScanEngine::new(config).is_err());
    }

    #[test]
    fn test_engine_normalizes_domain() {
        let config = ScanConfig {
            domain: "Example.COM.".to_string(),
            ..Default::default()
        };
        let engine = SubdomainScanEngine::new(config).unwrap();
        assert_eq!(engine.config.domain, "example.com");
    }

    #[test]
    fn test_load_wordlist_prefers_injected_set() {
        let config = ScanConfig {
            domain: "example.com".to_string(),
            wordlist: Some(vec!["www".to_string(), "mail".to_string()]),
            dictionary_file: Some("/nonexistent/path".to_string()),
            ..Default::default()
        };
        let words = load_wordlist(&config).unwrap();
        assert_eq!(words, vec!["www", "mail"]);
    }

    #[test]
    fn test_load_wordlist_defaults_to_builtin() {
        let config = ScanConfig {
            domain: "example.com".to_string(),
            ..Default::default()
        };
        let words = load_wordlist(&config).unwrap();
        assert!(words.len() >= 400);
        assert!(words.iter().any(|w| w == "www"));
    }
}
