//! 域名拼接与随机标签工具

use rand::{thread_rng, Rng};

/// 拼接标签与父域名，生成小写、无多余点号的完整域名
pub fn fqdn(label: &str, parent: &str) -> String {
    format!(
        "{}.{}",
        label.trim_matches('.').to_lowercase(),
        parent.trim_matches('.').to_lowercase()
    )
}

/// 生成一个不太可能真实存在的随机数字标签（10位）
pub fn random_probe_label() -> String {
    let mut rng = thread_rng();
    rng.gen_range(1_000_000_000u64..10_000_000_000u64).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqdn_normalization() {
        assert_eq!(fqdn("WWW", "Example.COM"), "www.example.com");
        assert_eq!(fqdn(".mail.", "example.com."), "mail.example.com");
        assert_eq!(fqdn("api", "test.org"), "api.test.org");
    }

    #[test]
    fn test_random_probe_label_is_numeric() {
        for _ in 0..20 {
            let label = random_probe_label();
            assert_eq!(label.len(), 10);
            assert!(label.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
