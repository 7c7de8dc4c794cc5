use crate::allocator::allocate;
use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::metrics::ScheduleSummary;
use crate::rebalancer::{RebalanceReport, Rebalancer};
use crate::task::TaskSize;
use crate::types::Assignment;
use serde::{Deserialize, Serialize};
use tracing::info;

/// 一次调度的结果，包含初始分配和重调度后的分配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// HAMM 初始分配
    pub initial: Assignment,
    /// EHAMM 重调度后的分配，未启用重调度时与 `initial` 相同
    pub refined: Assignment,
    pub report: RebalanceReport,
}

impl ScheduleOutcome {
    pub fn initial_summary(&self) -> ScheduleSummary {
        ScheduleSummary::of(&self.initial)
    }

    pub fn refined_summary(&self) -> ScheduleSummary {
        ScheduleSummary::of(&self.refined)
    }
}

/// 批量任务调度器：先收集任务，再一次性完成分配与重调度
pub struct TaskScheduler {
    /// 调度器配置
    pub config: SchedulerConfig,
    /// 待调度任务，保持提交顺序
    pending: Vec<TaskSize>,
}

impl TaskScheduler {
    /// 创建新的调度器实例
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
        }
    }

    /// 提交一个新任务
    pub fn submit_task(&mut self, size: TaskSize) {
        self.pending.push(size);
    }

    pub fn submit_tasks(&mut self, sizes: impl IntoIterator<Item = TaskSize>) {
        self.pending.extend(sizes);
    }

    pub fn pending_tasks(&self) -> &[TaskSize] {
        &self.pending
    }

    /// 调度当前批次的全部任务，成功后待调度队列被清空
    pub fn schedule(&mut self) -> Result<ScheduleOutcome> {
        self.config.validate()?;
        let initial = allocate(&self.pending, self.config.worker_count)?;

        let (refined, report) = if self.config.rebalance.enabled {
            Rebalancer::new(self.config.rebalance).rebalance_with_report(initial.clone())
        } else {
            (initial.clone(), RebalanceReport::default())
        };

        info!(
            tasks = self.pending.len(),
            workers = self.config.worker_count,
            rebalanced = self.config.rebalance.enabled,
            "调度完成"
        );
        self.pending.clear();
        Ok(ScheduleOutcome {
            initial,
            refined,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RebalanceConfig;
    use crate::error::Error;
    use crate::rebalancer::rebalance;
    use proptest::prelude::*;

    fn sorted(tasks: &[TaskSize]) -> Vec<TaskSize> {
        let mut tasks = tasks.to_vec();
        tasks.sort_unstable();
        tasks
    }

    #[test]
    fn test_schedule_drains_pending() {
        let mut scheduler = TaskScheduler::new(SchedulerConfig::with_workers(2));
        scheduler.submit_tasks([1, 1, 1]);
        scheduler.submit_task(100);
        assert_eq!(scheduler.pending_tasks(), &[1, 1, 1, 100]);

        let outcome = scheduler.schedule().unwrap();
        assert!(scheduler.pending_tasks().is_empty());
        assert_eq!(outcome.initial.task_lists(), vec![vec![100], vec![1, 1, 1]]);
        assert_eq!(outcome.refined, outcome.initial);
        assert_eq!(outcome.initial_summary().makespan, 100);
        assert_eq!(outcome.refined_summary().load_variance, Some(2.0));
    }

    #[test]
    fn test_schedule_without_rebalance() {
        let config = SchedulerConfig {
            worker_count: 3,
            rebalance: RebalanceConfig {
                enabled: false,
                ..RebalanceConfig::default()
            },
        };
        let mut scheduler = TaskScheduler::new(config);
        scheduler.submit_tasks([5, 3, 8, 1, 9, 2]);
        let outcome = scheduler.schedule().unwrap();
        assert_eq!(outcome.refined, outcome.initial);
        assert_eq!(outcome.report, RebalanceReport::default());
    }

    #[test]
    fn test_schedule_rejects_zero_workers() {
        let mut scheduler = TaskScheduler::new(SchedulerConfig::with_workers(0));
        scheduler.submit_task(4);
        assert!(matches!(
            scheduler.schedule(),
            Err(Error::InvalidConfiguration(_))
        ));
        assert_eq!(scheduler.pending_tasks(), &[4]);
    }

    #[test]
    fn test_outcome_serializes_to_json() {
        let mut scheduler = TaskScheduler::new(SchedulerConfig::with_workers(2));
        scheduler.submit_tasks([50, 50, 10]);
        let outcome = scheduler.schedule().unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["refined"]["workers"].as_array().unwrap().len(), 2);
        assert!(json["report"]["migrations"].is_u64());
    }

    proptest! {
        #[test]
        fn prop_both_phases_conserve_tasks(
            tasks in proptest::collection::vec(0u64..10_000, 0..120),
            worker_count in 1usize..12,
        ) {
            let initial = allocate(&tasks, worker_count).unwrap();
            prop_assert_eq!(initial.worker_count(), worker_count);
            prop_assert_eq!(initial.sorted_tasks(), sorted(&tasks));

            let (refined, report) = Rebalancer::default().rebalance_with_report(initial);
            prop_assert_eq!(refined.worker_count(), worker_count);
            prop_assert_eq!(refined.sorted_tasks(), sorted(&tasks));
            prop_assert!(report.steps() <= tasks.len() + worker_count);
        }

        #[test]
        fn prop_rebalance_is_stable_without_migrations(
            lists in proptest::collection::vec(proptest::collection::vec(1u64..500, 0..8), 1..8),
        ) {
            let input = Assignment::from_task_lists(lists);
            let (output, report) = Rebalancer::default().rebalance_with_report(input.clone());
            if report.migrations == 0 {
                prop_assert_eq!(output, input);
            } else {
                prop_assert_eq!(output.sorted_tasks(), input.sorted_tasks());
            }
        }

        #[test]
        fn prop_rebalance_preserves_total_load(
            tasks in proptest::collection::vec(1u64..1_000, 1..80),
            worker_count in 2usize..8,
        ) {
            let initial = allocate(&tasks, worker_count).unwrap();
            let refined = rebalance(initial.clone());
            prop_assert_eq!(refined.total_load(), initial.total_load());
        }
    }
}
