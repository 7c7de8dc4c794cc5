// metrics.rs
// 分配质量指标：负载方差与完工时间（makespan），仅用于诊断和测试，不参与调度决策。
use crate::config::LoadBasis;
use crate::error::{Error, Result};
use crate::types::{Assignment, Worker};
use serde::{Deserialize, Serialize};

/// 各节点任务个数的样本方差（分母为 N-1），越小越均衡
pub fn load_variance(assignment: &Assignment) -> Result<f64> {
    load_variance_by(assignment, LoadBasis::TaskCount)
}

/// 按指定口径计算节点间的样本方差，节点数少于2时返回错误
pub fn load_variance_by(assignment: &Assignment, basis: LoadBasis) -> Result<f64> {
    let n = assignment.worker_count();
    if n < 2 {
        return Err(Error::InvalidConfiguration(format!(
            "计算负载方差至少需要2个工作节点，当前为 {}",
            n
        )));
    }
    let values: Vec<f64> = assignment
        .workers
        .iter()
        .map(|w: &Worker| match basis {
            LoadBasis::TaskCount => w.task_count() as f64,
            LoadBasis::TotalLoad => w.load() as f64,
        })
        .collect();
    let mean = values.iter().sum::<f64>() / n as f64;
    let squares: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Ok(squares / (n - 1) as f64)
}

/// 完工时间：负载最大节点的负载
pub fn makespan(assignment: &Assignment) -> u128 {
    assignment.workers.iter().map(Worker::load).max().unwrap_or(0)
}

/// 一次分配结果的汇总指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub makespan: u128,
    /// 单节点时无定义
    pub load_variance: Option<f64>,
    pub total_load: u128,
    pub task_count: usize,
}

impl ScheduleSummary {
    pub fn of(assignment: &Assignment) -> Self {
        Self {
            makespan: makespan(assignment),
            load_variance: load_variance(assignment).ok(),
            total_load: assignment.total_load(),
            task_count: assignment.task_count(),
        }
    }
}
