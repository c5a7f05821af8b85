//! 控制台日志器
//!
//! 所有诊断信息（泛解析提示、调优记录、工作协程告警、最终统计）
//! 都经由 log 门面输出到 stderr，stdout 只保留发现的域名。

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// 带颜色标签的 stderr 日志器
pub struct ConsoleLogger {
    max_level: LevelFilter,
    use_colors: bool,
}

impl ConsoleLogger {
    fn wrap(&self, label: &str, level: Level) -> String {
        if !self.use_colors {
            return label.to_string();
        }

        match level {
            Level::Error => label.red().to_string(),
            Level::Warn => label.yellow().to_string(),
            Level::Info => label.blue().to_string(),
            Level::Debug => label.magenta().to_string(),
            Level::Trace => label.normal().to_string(),
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let ts = chrono::Local::now().format("%H:%M:%S");
        eprintln!(
            "[{}] [{}] {}",
            ts,
            self.wrap(record.level().as_str(), record.level()),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// 初始化全局日志器；verbose 打开 debug 级别
pub fn init_logger(verbose: bool) {
    let max_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = ConsoleLogger {
        max_level,
        use_colors: true,
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(max_level);
    }
}
