//! mode_switch_trace.rs
//!
//! 演示 HAMM 每一轮如何在 max-min / min-min 之间切换，以及 EHAMM 重调度如何迁移任务。
//! 1. 逐轮打印任务池均值、不大于/大于均值的任务数和选择模式。
//! 2. 调用 `allocate` 得到初始分配。
//! 3. 调用 `Rebalancer` 重调度并对比两次结果的指标。

use anyhow::Result;
use scheduler::metrics::ScheduleSummary;
use scheduler::rebalancer::Rebalancer;
use scheduler::task::TaskPool;
use scheduler::{allocate, Assignment};

fn main() -> Result<()> {
    println!("=== HAMM 模式切换演示 ===");

    let tasks = vec![1, 1, 1, 100];
    let worker_count = 2;

    // ---- 1. 逐轮观察选择模式 ----
    let mut pool = TaskPool::new(tasks.clone());
    let mut round = 1;
    while !pool.is_empty() {
        let (lower, higher) = pool.split_counts();
        let mean = pool.mean();
        let mode = pool.selection_mode();
        let picked = pool.take(mode);
        println!(
            "第{}轮: 均值={:.2}, lower={}, higher={}, 模式={:?}, 选中={:?}",
            round, mean, lower, higher, mode, picked
        );
        round += 1;
    }

    // ---- 2. 初始分配 ----
    let initial = allocate(&tasks, worker_count)?;
    println!("\nHAMM 分配结果: {:?}", initial.task_lists());

    // ---- 3. 重调度 ----
    let uneven = Assignment::from_task_lists(vec![vec![50, 50], vec![10]]);
    let (refined, report) = Rebalancer::default().rebalance_with_report(uneven.clone());
    println!("\n重调度前: {:?}", uneven.task_lists());
    println!("重调度后: {:?}", refined.task_lists());
    println!("迁移 {} 次, 节点降级 {} 次", report.migrations, report.demotions);

    let before = ScheduleSummary::of(&uneven);
    let after = ScheduleSummary::of(&refined);
    println!("makespan: {} -> {}", before.makespan, after.makespan);

    let json = serde_json::to_string_pretty(&refined)?;
    println!("\n{}", json);
    Ok(())
}
