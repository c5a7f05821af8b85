//! # rdnsmap
//!
//! 一个基于 Rust 实现的自适应子域名发现工具库。
//!
//! ## 特性
//!
//! - 🚀 **高并发**: 基于 tokio 的异步解析，查询按稳定哈希分摊到多个公共解析器
//! - 📈 **自适应调优**: 按 p90 延迟、超时率与队列压力实时调整并发上限与查询超时
//! - 🔍 **泛解析过滤**: 扫描前用随机标签探测泛解析，抑制假阳性
//! - 🧭 **解析器熔断**: 每个上游独立的失败计数与冷却窗口，自动绕开故障解析器
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use rdnsmap::scan_subdomains;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = scan_subdomains("example.com".to_string(), None).await?;
//!
//!     println!("发现 {} 个子域名", report.found);
//!     for result in report.discovered.iter().take(5) {
//!         println!("  {} -> {:?}", result.domain, result.addresses);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## 高级配置
//!
//! ```rust,no_run
//! use rdnsmap::{ScanConfig, SubdomainScanEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScanConfig {
//!         domain: "example.com".to_string(),
//!         resolvers: vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()],
//!         silent: true,
//!         ..Default::default()
//!     };
//!
//!     let engine = SubdomainScanEngine::new(config)?;
//!     let report = engine.run().await?;
//!
//!     // 处理结果...
//!     let _ = report;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

// 内部模块
pub mod api;
pub mod client;
pub mod health;
pub mod input;
pub mod limiter;
pub mod logger;
pub mod output;
pub mod queue;
pub mod resolver_pool;
pub mod state;
pub mod subdata;
pub mod telemetry;
pub mod tuner;
pub mod util;
pub mod wildcard;
pub mod worker;

// 重新导出主要的公共API
pub use api::{run_scan, scan_subdomains, ScanConfig, ScanReport, SubdomainScanEngine};

// 导出其他有用的类型
pub use client::{DnsClient, LookupOutcome, NameLookup, QueryType};
pub use health::ResolverHealth;
pub use limiter::DynamicLimiter;
pub use output::{DiscoveredDomain, DiscoverySink};
pub use queue::WorkQueue;
pub use resolver_pool::{ResolverPool, DEFAULT_NAMESERVERS};
pub use state::ScanState;
pub use telemetry::{SampleKind, Telemetry, TelemetrySnapshot};
pub use tuner::TuningConfig;
pub use wildcard::WildcardDetector;
