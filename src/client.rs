//! DNS 解析客户端
//!
//! 核心引擎只依赖 `NameLookup` 接口，把一次解析当作返回
//! `LookupOutcome` 的不透明异步操作。生产实现 `DnsClient`
//! 基于 trust-dns，每个实例只指向一个上游；测试可以换入桩实现。

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::RwLock;
use std::time::Duration;

use trust_dns_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::proto::rr::{RData, RecordType};
use trust_dns_resolver::TokioAsyncResolver;

/// 查询的记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// IPv4 地址记录
    A,
    /// IPv6 地址记录
    AAAA,
}

impl QueryType {
    fn record_type(self) -> RecordType {
        match self {
            QueryType::A => RecordType::A,
            QueryType::AAAA => RecordType::AAAA,
        }
    }
}

/// 一次解析尝试的结果分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// 返回了地址记录
    Answered(Vec<IpAddr>),
    /// 域名不存在或没有对应记录（NXDOMAIN / NoAnswer）
    NoRecords,
    /// 客户端超时或没有可达的上游
    TimedOut,
    /// 其他意外错误
    Failed(String),
}

impl LookupOutcome {
    /// 对解析器健康统计而言是否算成功
    ///
    /// NXDOMAIN / NoAnswer 是解析器的正常应答，只是没有记录而已。
    pub fn is_healthy(&self) -> bool {
        matches!(self, LookupOutcome::Answered(_) | LookupOutcome::NoRecords)
    }
}

/// 解析客户端抽象：一次查询 = 不透明的异步操作
pub trait NameLookup: Send + Sync + 'static {
    /// 改写该客户端的查询超时
    fn set_timeout(&self, timeout: Duration);

    /// 查询一个域名的指定记录类型
    fn lookup(&self, name: &str, qtype: QueryType) -> impl Future<Output = LookupOutcome> + Send;
}

/// 基于 trust-dns 的解析客户端，只指向一个上游、不读系统配置
pub struct DnsClient {
    upstream: IpAddr,
    inner: RwLock<TokioAsyncResolver>,
}

impl DnsClient {
    /// 创建指向单个上游的客户端
    pub fn new(upstream: IpAddr, timeout: Duration) -> Self {
        DnsClient {
            upstream,
            inner: RwLock::new(build_resolver(upstream, timeout)),
        }
    }

    /// 上游地址
    pub fn upstream(&self) -> IpAddr {
        self.upstream
    }
}

fn build_resolver(upstream: IpAddr, timeout: Duration) -> TokioAsyncResolver {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig {
        socket_addr: SocketAddr::new(upstream, 53),
        protocol: Protocol::Udp,
        tls_dns_name: None,
        trust_negative_responses: false,
        bind_addr: None,
    });

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;

    TokioAsyncResolver::tokio(config, opts)
}

impl NameLookup for DnsClient {
    fn set_timeout(&self, timeout: Duration) {
        // trust-dns 的超时在构造时固定，改写时整体重建内部解析器
        let mut inner = self.inner.write().unwrap();
        *inner = build_resolver(self.upstream, timeout);
    }

    fn lookup(&self, name: &str, qtype: QueryType) -> impl Future<Output = LookupOutcome> + Send {
        let resolver = self.inner.read().unwrap().clone();
        let name = name.to_string();
        async move {
            match resolver.lookup(name, qtype.record_type()).await {
                Ok(answer) => {
                    let mut addrs = Vec::new();
                    for rdata in answer.iter() {
                        match rdata {
                            RData::A(a) => addrs.push(IpAddr::V4(a.0)),
                            RData::AAAA(aaaa) => addrs.push(IpAddr::V6(aaaa.0)),
                            _ => {}
                        }
                    }
                    LookupOutcome::Answered(addrs)
                }
                Err(err) => match err.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => LookupOutcome::NoRecords,
                    ResolveErrorKind::Timeout | ResolveErrorKind::NoConnections => {
                        LookupOutcome::TimedOut
                    }
                    _ => LookupOutcome::Failed(err.to_string()),
                },
            }
        }
    }
}
