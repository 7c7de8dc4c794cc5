// rebalancer.rs
// 重调度器（EHAMM第二阶段）：把节点划分为高/低负载集合，
// 反复把高负载节点中最小的任务迁移到低负载节点，直到高负载集合为空。
use crate::config::{LoadBasis, PartitionBasis, RebalanceConfig};
use crate::types::{Assignment, Worker};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 重调度过程统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceReport {
    /// 实际迁移的任务数
    pub migrations: usize,
    /// 被移出高负载集合的节点数
    pub demotions: usize,
}

impl RebalanceReport {
    pub fn steps(&self) -> usize {
        self.migrations + self.demotions
    }
}

/// 重调度器
#[derive(Debug, Clone, Default)]
pub struct Rebalancer {
    pub config: RebalanceConfig,
}

impl Rebalancer {
    pub fn new(config: RebalanceConfig) -> Self {
        Self { config }
    }

    pub fn rebalance(&self, assignment: Assignment) -> Assignment {
        self.rebalance_with_report(assignment).0
    }

    /// 执行重调度并返回统计信息
    ///
    /// 节点保持输入中的顺序返回，高/低负载集合只在过程中存在。
    pub fn rebalance_with_report(&self, assignment: Assignment) -> (Assignment, RebalanceReport) {
        let mut workers = assignment.workers;
        let (mut high, mut low) = self.partition(&workers);
        let mut report = RebalanceReport::default();
        debug!(high = ?high, low = ?low, "划分高/低负载节点");

        while !high.is_empty() {
            let pos = first_extreme(&high, |i| self.measure(&workers[i]), |a, b| a > b);
            let source = high[pos];

            if self.try_migrate(&mut workers, source, &low) {
                report.migrations += 1;
                continue;
            }

            high.remove(pos);
            low.push(source);
            report.demotions += 1;
            debug!(worker = source, "节点移出高负载集合");
        }

        info!(
            migrations = report.migrations,
            demotions = report.demotions,
            "重调度完成"
        );
        (Assignment { workers }, report)
    }

    /// 尝试把 `source` 中最小的任务迁到低负载集合中最空闲的节点，
    /// 只有迁移能严格缩小两者负载差时才执行
    fn try_migrate(&self, workers: &mut [Worker], source: usize, low: &[usize]) -> bool {
        // 各节点平均任务大小相同时，浮点均值可能略小于每个节点的值，所有节点都被划入高负载集合
        if low.is_empty() {
            debug!(worker = source, "低负载集合为空，无法迁移");
            return false;
        }
        let Some(task) = workers[source].smallest_task() else {
            return false;
        };
        let target = low[first_extreme(low, |i| self.measure(&workers[i]), |a, b| a < b)];

        let source_load = workers[source].load();
        let target_load = workers[target].load();
        let t = task as u128;
        let before = source_load.abs_diff(target_load);
        let after = (source_load - t).abs_diff(target_load + t);
        if before <= after {
            return false;
        }

        workers[source].take_smallest();
        workers[target].push(task);
        debug!(task, from = source, to = target, %before, %after, "迁移任务");
        true
    }

    /// 返回 (高负载节点, 低负载节点) 的下标，均保持节点顺序
    fn partition(&self, workers: &[Worker]) -> (Vec<usize>, Vec<usize>) {
        let scores: Vec<f64> = match self.config.partition {
            PartitionBasis::MeanTaskSize => workers.iter().map(Worker::mean_task_size).collect(),
            PartitionBasis::TotalLoad => workers.iter().map(|w| w.load() as f64).collect(),
        };
        let overall = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };
        (0..workers.len()).partition(|&i| scores[i] > overall)
    }

    fn measure(&self, worker: &Worker) -> u128 {
        match self.config.selection {
            LoadBasis::TaskCount => worker.task_count() as u128,
            LoadBasis::TotalLoad => worker.load(),
        }
    }
}

/// 使用默认配置重调度
pub fn rebalance(assignment: Assignment) -> Assignment {
    Rebalancer::default().rebalance(assignment)
}

/// 在 `candidates` 中找到度量最"优"的位置，相同时取第一个
fn first_extreme(
    candidates: &[usize],
    measure: impl Fn(usize) -> u128,
    better: impl Fn(u128, u128) -> bool,
) -> usize {
    let mut best = 0;
    let mut best_value = measure(candidates[0]);
    for (pos, &i) in candidates.iter().enumerate().skip(1) {
        let value = measure(i);
        if better(value, best_value) {
            best = pos;
            best_value = value;
        }
    }
    best
}
