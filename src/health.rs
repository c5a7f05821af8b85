//! 解析器健康跟踪
//!
//! 每个上游独立的连续失败计数与冷却窗口，相当于一个简单的熔断器。
//! 成功只把失败计数减一（宽恕而非清零），偶发抖动的解析器会逐步降温，
//! 而不是靠一次侥幸应答就被完全豁免。

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
struct HealthSlot {
    fails: u32,
    cool_until: Option<Instant>,
}

/// 按解析器下标记录健康状况的跟踪器
pub struct ResolverHealth {
    slots: Mutex<Vec<HealthSlot>>,
    fail_limit: u32,
    cooldown: Duration,
}

impl ResolverHealth {
    /// 为 n 个解析器创建跟踪器
    pub fn new(n: usize, fail_limit: u32, cooldown: Duration) -> Self {
        ResolverHealth {
            slots: Mutex::new(vec![HealthSlot::default(); n]),
            fail_limit: fail_limit.max(1),
            cooldown,
        }
    }

    /// 记录一次解析结果
    ///
    /// 失败累计到阈值时进入冷却窗口并清零计数；冷却截止时间基于单调时钟，
    /// 只会向后推移。
    pub fn record_outcome(&self, idx: usize, ok: bool) {
        let mut slots = self.slots.lock().unwrap();
        if let Some(slot) = slots.get_mut(idx) {
            if ok {
                slot.fails = slot.fails.saturating_sub(1);
            } else {
                slot.fails += 1;
                if slot.fails >= self.fail_limit {
                    slot.cool_until = Some(Instant::now() + self.cooldown);
                    slot.fails = 0;
                }
            }
        }
    }

    /// 该解析器当前是否处于冷却中
    pub fn in_cooldown(&self, idx: usize) -> bool {
        let slots = self.slots.lock().unwrap();
        match slots.get(idx).and_then(|slot| slot.cool_until) {
            Some(until) => Instant::now() < until,
            None => false,
        }
    }

    /// 当前失败计数
    pub fn fails(&self, idx: usize) -> u32 {
        let slots = self.slots.lock().unwrap();
        slots.get(idx).map(|slot| slot.fails).unwrap_or(0)
    }

    /// 跟踪的解析器数量
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap().len()
    }

    /// 是否没有任何解析器
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
