//! 服务启动器

use std::future::Future;

use smsv_config::AppConfig;
use smsv_errors::AppResult;
use tracing::{error, info};

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行后台 worker
///
/// 1. 加载配置
/// 2. 初始化运行时（日志、指标）
/// 3. 创建基础设施资源
/// 4. 调用用户提供的闭包构建 worker 主循环
/// 5. 主循环结束或收到关闭信号时退出
///
/// # 示例
///
/// ```ignore
/// use smsv_bootstrap::run_worker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_worker("config", |infra| async move {
///         let worker = MyWorker::new(infra.redis_connection());
///         worker.run().await
///     })
///     .await
/// }
/// ```
pub async fn run_worker<F, Fut>(
    config_dir: &str,
    worker_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} worker", config.app_name);

    // 3. 创建基础设施（带重试）
    let infra = Infrastructure::from_config(config).await?;

    // 4. 运行 worker，直到结束或收到关闭信号
    tokio::select! {
        result = worker_builder(infra) => {
            if let Err(e) = &result {
                error!(error = %e, "Worker stopped with error");
            }
            result?;
        }
        _ = shutdown_signal() => {}
    }

    info!("Worker stopped");

    Ok(())
}
