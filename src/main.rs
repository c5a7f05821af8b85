use clap::Parser;

use rdnsmap::input::{self, Opts};
use rdnsmap::logger;
use rdnsmap::{ScanConfig, SubdomainScanEngine};

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    logger::init_logger(opts.verbose);

    // 父域名不合法时带用法提示退出
    let parent = match input::normalize_parent(&opts.domain) {
        Ok(parent) => parent,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("用法: rdnsmap -d example.com");
            std::process::exit(2);
        }
    };

    let config = ScanConfig {
        domain: parent,
        resolvers: opts.resolvers.clone(),
        dictionary_file: opts.file.clone(),
        silent: opts.silent,
        ..Default::default()
    };

    let engine = match SubdomainScanEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    if let Err(err) = engine.run().await {
        log::error!("扫描失败: {}", err);
        std::process::exit(1);
    }
}
