//! 解析器池
//!
//! 每个上游一个独立客户端。解析器的选取由域名的 FNV-1a 哈希决定首选下标，
//! 同一个域名在多次运行中总是先落到同一个解析器上；首选解析器冷却中时
//! 线性向后探测，全部冷却则退回首选（宽限降级而不是阻塞）。

use std::net::IpAddr;
use std::time::Duration;

use crate::client::{DnsClient, NameLookup};
use crate::health::ResolverHealth;

/// 内置的公共 DNS 上游
///
/// 列表顺序保持稳定，保证哈希选取的可复现性。
pub static DEFAULT_NAMESERVERS: &[&str] = &[
    "1.1.1.1", "1.0.0.1",
    "1.1.1.3", "1.0.0.3",
    "4.2.2.1", "4.2.2.2",
    "4.2.2.3", "4.2.2.4",
    "8.8.8.8", "8.8.4.4",
    "8.26.56.26", "8.20.247.20",
    "9.9.9.9", "9.9.9.10",
    "23.253.163.53",
    "45.90.28.0", "45.90.30.0",
    "64.6.64.6", "64.6.65.6",
    "77.88.8.8",
    "89.233.43.71",
    "94.140.14.14", "94.140.15.15",
    "156.154.70.1", "156.154.71.1",
    "185.228.168.9", "185.228.169.9",
    "198.101.242.72",
    "208.76.50.50",
    "208.67.222.222", "208.67.220.220",
    "216.146.35.35", "216.146.36.36",
];

/// 由独立客户端组成的解析器池
pub struct ResolverPool<C: NameLookup> {
    clients: Vec<C>,
}

impl ResolverPool<DnsClient> {
    /// 按上游地址列表构建池；列表为空时使用内置默认上游
    pub fn from_upstreams(
        upstreams: &[String],
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let addresses: Vec<String> = if upstreams.is_empty() {
            DEFAULT_NAMESERVERS.iter().map(|s| s.to_string()).collect()
        } else {
            upstreams.to_vec()
        };

        let mut clients = Vec::with_capacity(addresses.len());
        for address in &addresses {
            let ip: IpAddr = address
                .trim()
                .parse()
                .map_err(|err| format!("无效的上游地址 {}: {}", address, err))?;
            clients.push(DnsClient::new(ip, timeout));
        }
        Ok(ResolverPool::from_clients(clients))
    }
}

impl<C: NameLookup> ResolverPool<C> {
    /// 直接用客户端集合构建池
    pub fn from_clients(clients: Vec<C>) -> Self {
        assert!(!clients.is_empty(), "解析器池不能为空");
        ResolverPool { clients }
    }

    /// 池中解析器数量
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// 池是否为空
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// 按下标取客户端
    pub fn client(&self, idx: usize) -> &C {
        &self.clients[idx]
    }

    /// 域名的首选解析器下标
    pub fn preferred_index(&self, name: &str) -> usize {
        (fnv1a_64(name) % self.clients.len() as u64) as usize
    }

    /// 健康感知的解析器选取
    pub fn select(&self, name: &str, health: &ResolverHealth) -> usize {
        let start = self.preferred_index(name);
        for off in 0..self.clients.len() {
            let idx = (start + off) % self.clients.len();
            if !health.in_cooldown(idx) {
                return idx;
            }
        }
        start
    }

    /// 把所有客户端的超时改写为新值，只由调谐器调用
    pub fn apply_timeout(&self, timeout: Duration) {
        for client in &self.clients {
            client.set_timeout(timeout);
        }
    }
}

/// FNV-1a 64 位字符串哈希，跨运行、跨平台稳定
pub fn fnv1a_64(input: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
