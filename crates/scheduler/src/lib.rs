// lib.rs
// 调度器模块入口，声明并导出各子模块。
// 流程：任务批次 -> allocator(HAMM 初始分配) -> rebalancer(EHAMM 重调度) -> 外部执行环境
pub mod allocator;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rebalancer;
pub mod scheduler;
pub mod task;
pub mod types;

pub use allocator::allocate;
pub use config::{LoadBasis, PartitionBasis, RebalanceConfig, SchedulerConfig};
pub use error::{Error, Result};
pub use metrics::{load_variance, load_variance_by, makespan, ScheduleSummary};
pub use rebalancer::{rebalance, RebalanceReport, Rebalancer};
pub use scheduler::{ScheduleOutcome, TaskScheduler};
pub use task::{SelectionMode, TaskPool, TaskSize};
pub use types::{Assignment, Worker};
