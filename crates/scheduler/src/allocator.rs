// allocator.rs
// 初始分配器（HAMM）：每轮根据任务池均值在 max-min 与 min-min 之间切换，
// 并把选中的任务分配给当前负载最小的工作节点。
use crate::error::{Error, Result};
use crate::task::{SelectionMode, TaskPool, TaskSize};
use crate::types::Assignment;
use tracing::{debug, info};

/// 把一批任务分配到 `worker_count` 个节点上
///
/// 任务输入顺序不影响结果。`worker_count` 为0时返回 [`Error::InvalidConfiguration`]。
pub fn allocate(tasks: &[TaskSize], worker_count: usize) -> Result<Assignment> {
    if worker_count < 1 {
        return Err(Error::InvalidConfiguration(format!(
            "工作节点数必须 >= 1，当前为 {}",
            worker_count
        )));
    }
    Ok(allocate_pool(tasks.to_vec().into(), worker_count))
}

/// 消耗整个任务池完成分配
fn allocate_pool(mut pool: TaskPool, worker_count: usize) -> Assignment {
    let mut assignment = Assignment::with_workers(worker_count);
    // 节点负载单独维护，避免每轮重新求和；u128 保证大任务累加不溢出
    let mut loads = vec![0u128; worker_count];
    let mut max_min_rounds = 0usize;
    let total = pool.len();

    while !pool.is_empty() {
        let mode = pool.selection_mode();
        let Some(task) = pool.take(mode) else {
            break;
        };
        if mode == SelectionMode::MaxMin {
            max_min_rounds += 1;
        }
        let slot = least_loaded(&loads);
        loads[slot] += task as u128;
        assignment.workers[slot].push(task);
        debug!(task, slot, ?mode, load = %loads[slot], "分配任务");
    }

    info!(
        tasks = total,
        workers = worker_count,
        max_min_rounds,
        min_min_rounds = total - max_min_rounds,
        "初始分配完成"
    );
    assignment
}

/// 负载最小的节点，负载相同时取编号最小者
fn least_loaded(loads: &[u128]) -> usize {
    let mut best = 0;
    for (slot, &load) in loads.iter().enumerate() {
        if load < loads[best] {
            best = slot;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_switch_fixture() {
        let assignment = allocate(&[1, 1, 1, 100], 2).unwrap();
        assert_eq!(assignment.task_lists(), vec![vec![100], vec![1, 1, 1]]);
    }

    #[test]
    fn test_min_min_first_when_large_tasks_dominate() {
        // 均值7.75：1个任务不大于均值，3个大于均值，先取最小任务
        let assignment = allocate(&[10, 1, 10, 10], 2).unwrap();
        assert_eq!(assignment.task_lists(), vec![vec![1, 10], vec![10, 10]]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let assignment = allocate(&[5, 5, 5], 3).unwrap();
        assert_eq!(assignment.task_lists(), vec![vec![5], vec![5], vec![5]]);

        let assignment = allocate(&[4, 4, 4, 4], 3).unwrap();
        assert_eq!(assignment.task_lists(), vec![vec![4, 4], vec![4], vec![4]]);
    }

    #[test]
    fn test_empty_input_yields_empty_workers() {
        let assignment = allocate(&[], 3).unwrap();
        assert_eq!(assignment.worker_count(), 3);
        assert!(assignment.workers.iter().all(|w| w.tasks.is_empty()));
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            allocate(&[1, 2, 3], 0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_and_duplicate_sizes_conserved() {
        let tasks: Vec<TaskSize> = vec![0, 7, 7, 0, 3, 7];
        let assignment = allocate(&tasks, 4).unwrap();
        let mut expected = tasks.clone();
        expected.sort_unstable();
        assert_eq!(assignment.sorted_tasks(), expected);
        assert_eq!(assignment.worker_count(), 4);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = allocate(&[9, 3, 27, 1, 14, 6, 6, 30], 3).unwrap();
        let b = allocate(&[30, 6, 1, 14, 27, 6, 3, 9], 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_huge_sizes_do_not_overflow() {
        let big = u64::MAX / 2 + 1;
        let assignment = allocate(&[big, big], 1).unwrap();
        assert_eq!(assignment.task_lists(), vec![vec![big, big]]);
        assert_eq!(assignment.total_load(), u64::MAX as u128 + 1);

        let assignment = allocate(&[u64::MAX, u64::MAX, 1, u64::MAX], 2).unwrap();
        assert_eq!(assignment.task_count(), 4);
        // 1 先按 min-min 进入节点0，之后三个 u64::MAX 交替进入负载较小的节点
        assert_eq!(assignment.task_lists(), vec![vec![1, u64::MAX], vec![u64::MAX, u64::MAX]]);
        assert_eq!(assignment.loads(), vec![u64::MAX as u128 + 1, u64::MAX as u128 * 2]);
    }

    #[test]
    fn test_least_loaded() {
        assert_eq!(least_loaded(&[3, 1, 1, 2]), 1);
        assert_eq!(least_loaded(&[0, 0]), 0);
        assert_eq!(least_loaded(&[7]), 0);
    }
}
