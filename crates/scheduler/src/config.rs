// config.rs
// 调度器全局配置结构体及其默认实现，包含工作节点数和重调度策略，可从 JSON 文件加载。
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 衡量节点"负载"的口径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBasis {
    /// 按任务个数
    TaskCount,
    /// 按任务大小之和
    TotalLoad,
}

/// 重调度阶段划分高/低负载集合的依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionBasis {
    /// 节点内平均任务大小与各节点平均值的均值比较
    MeanTaskSize,
    /// 节点总负载与平均节点负载比较
    TotalLoad,
}

/// 重调度（EHAMM第二阶段）配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalanceConfig {
    /// 关闭时只运行初始分配（即HAMM）
    pub enabled: bool,
    pub partition: PartitionBasis,
    /// 选择迁出节点（最大）和迁入节点（最小）时的口径
    pub selection: LoadBasis,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            partition: PartitionBasis::MeanTaskSize,
            selection: LoadBasis::TaskCount,
        }
    }
}

/// 调度器全局配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 工作节点数，一次调度过程中固定不变
    pub worker_count: usize,
    #[serde(default)]
    pub rebalance: RebalanceConfig,
}

impl Default for SchedulerConfig {
    /// 默认配置：6个工作节点，启用重调度
    fn default() -> Self {
        Self {
            worker_count: 6,
            rebalance: RebalanceConfig::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Self::default()
        }
    }

    /// 从 JSON 配置文件读取并校验
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigError(format!(
                "配置文件 {} 不存在",
                path.display()
            )));
        }
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: SchedulerConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("解析 {} 失败: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_count < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "工作节点数必须 >= 1，当前为 {}",
                self.worker_count
            )));
        }
        Ok(())
    }
}
