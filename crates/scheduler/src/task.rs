// task.rs
// 任务与任务池定义。任务只由其大小描述，任务池是尚未分配任务的多重集合。
use serde::{Deserialize, Serialize};

/// 任务大小（工作量），相同大小的任务可互换
pub type TaskSize = u64;

/// 每轮分配时选择任务的模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// 取剩余最大任务（小任务占多数时）
    MaxMin,
    /// 取剩余最小任务（大任务占多数时）
    MinMin,
}

/// 未分配任务池，由初始分配器独占并在分配结束时清空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPool {
    tasks: Vec<TaskSize>,
}

impl TaskPool {
    pub fn new(tasks: Vec<TaskSize>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 池中任务大小的算术平均值，空池返回0.0
    pub fn mean(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.tasks.iter().map(|&t| t as f64).sum();
        sum / self.tasks.len() as f64
    }

    /// 统计 (不大于均值的任务数, 大于均值的任务数)
    pub fn split_counts(&self) -> (usize, usize) {
        let mean = self.mean();
        let lower = self.tasks.iter().filter(|&&t| t as f64 <= mean).count();
        (lower, self.tasks.len() - lower)
    }

    /// 根据当前池的分布决定本轮的选择模式
    pub fn selection_mode(&self) -> SelectionMode {
        let (lower, higher) = self.split_counts();
        if lower >= higher {
            SelectionMode::MaxMin
        } else {
            SelectionMode::MinMin
        }
    }

    /// 按模式取出一个任务（只移除一次出现）
    pub fn take(&mut self, mode: SelectionMode) -> Option<TaskSize> {
        let index = match mode {
            SelectionMode::MaxMin => self.position_of(|candidate, best| candidate > best),
            SelectionMode::MinMin => self.position_of(|candidate, best| candidate < best),
        }?;
        Some(self.tasks.swap_remove(index))
    }

    fn position_of(&self, better: impl Fn(TaskSize, TaskSize) -> bool) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &task) in self.tasks.iter().enumerate() {
            match best {
                Some(b) if !better(task, self.tasks[b]) => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

impl From<Vec<TaskSize>> for TaskPool {
    fn from(tasks: Vec<TaskSize>) -> Self {
        Self::new(tasks)
    }
}
