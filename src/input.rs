//! 命令行参数

use clap::Parser;

/// 命令行选项
#[derive(Parser, Debug)]
#[command(name = "rdnsmap")]
#[command(version = "0.3")]
#[command(about = "A tool for discovering subdomains with a self-tuning resolver pool", long_about = None, arg_required_else_help = true)]
pub struct Opts {
    /// need scan domain
    #[arg(short, long)]
    pub domain: String,

    /// resolvers address,use default dns on default
    #[arg(short, long)]
    pub resolvers: Vec<String>,

    /// dic path
    #[arg(short, long)]
    pub file: Option<String>,

    /// silent
    #[arg(short, long, default_value = "false")]
    pub silent: bool,

    /// verbose diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// 规范化并校验父域名：小写、去掉首尾点号，至少包含一个点
pub fn normalize_parent(domain: &str) -> Result<String, String> {
    let parent = domain.trim().trim_matches('.').to_lowercase();
    if parent.is_empty() || !parent.contains('.') {
        return Err(format!(
            "父域名格式不正确: {:?}，应类似 example.com",
            domain
        ));
    }
    Ok(parent)
}
