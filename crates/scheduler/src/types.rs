// types.rs
// 定义工作节点和分配结果等通用类型，是两个调度阶段之间传递的唯一数据。
use crate::task::TaskSize;
use serde::{Deserialize, Serialize};

/// 工作节点：按分配顺序记录的任务大小列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// 节点槽位编号 (0..N-1)
    pub slot: usize,
    /// 已分配的任务大小
    pub tasks: Vec<TaskSize>,
}

impl Worker {
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            tasks: Vec::new(),
        }
    }

    /// 节点负载：所有任务大小之和，按 u128 累加
    pub fn load(&self) -> u128 {
        self.tasks.iter().map(|&t| t as u128).sum()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// 节点内任务的平均大小，空节点为0.0
    pub fn mean_task_size(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.load() as f64 / self.tasks.len() as f64
    }

    pub fn push(&mut self, task: TaskSize) {
        self.tasks.push(task);
    }

    /// 移除并返回节点内最小的任务（相同大小时取第一个）
    pub fn take_smallest(&mut self) -> Option<TaskSize> {
        let (index, _) = self
            .tasks
            .iter()
            .enumerate()
            .min_by_key(|&(_, &task)| task)?;
        Some(self.tasks.remove(index))
    }

    pub fn smallest_task(&self) -> Option<TaskSize> {
        self.tasks.iter().copied().min()
    }
}

/// 分配结果：每个槽位对应一个工作节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub workers: Vec<Worker>,
}

impl Assignment {
    /// 创建 `worker_count` 个空节点
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            workers: (0..worker_count).map(Worker::new).collect(),
        }
    }

    /// 从任务列表构造，第i个列表对应槽位i
    pub fn from_task_lists(lists: Vec<Vec<TaskSize>>) -> Self {
        Self {
            workers: lists
                .into_iter()
                .enumerate()
                .map(|(slot, tasks)| Worker { slot, tasks })
                .collect(),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn task_count(&self) -> usize {
        self.workers.iter().map(Worker::task_count).sum()
    }

    pub fn total_load(&self) -> u128 {
        self.workers.iter().map(Worker::load).sum()
    }

    pub fn loads(&self) -> Vec<u128> {
        self.workers.iter().map(Worker::load).collect()
    }

    /// 按槽位顺序导出任务列表，供外部执行环境绑定任务
    pub fn task_lists(&self) -> Vec<Vec<TaskSize>> {
        self.workers.iter().map(|w| w.tasks.clone()).collect()
    }

    /// 所有任务大小排序后的多重集合，用于校验任务守恒
    pub fn sorted_tasks(&self) -> Vec<TaskSize> {
        let mut all: Vec<TaskSize> = self
            .workers
            .iter()
            .flat_map(|w| w.tasks.iter().copied())
            .collect();
        all.sort_unstable();
        all
    }
}
