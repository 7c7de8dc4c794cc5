// main.rs
// 命令行执行环境：生成（或读取）一批任务大小，运行 HAMM 与 EHAMM，并对比两者的分配效果。
use anyhow::{bail, Context, Result};
use clap::Parser;
use prettytable::{cell, row, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scheduler::{ScheduleOutcome, ScheduleSummary, SchedulerConfig, TaskScheduler, TaskSize};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ehamm", about = "HAMM/EHAMM 任务负载均衡调度")]
struct Args {
    /// 工作节点数（覆盖配置文件）
    #[arg(short, long)]
    workers: Option<usize>,

    /// 随机生成的任务数
    #[arg(short, long, default_value_t = 100)]
    tasks: usize,

    /// 随机任务大小上限
    #[arg(long, default_value_t = 100_000)]
    max_size: u64,

    /// 随机种子
    #[arg(long, default_value_t = 5555)]
    seed: u64,

    /// 直接指定任务大小，逗号分隔，例如 1,1,1,100
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<TaskSize>>,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<String>,

    /// 以 JSON 输出调度结果
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SchedulerConfig::from_json_file(path)
            .with_context(|| format!("加载配置文件 {} 失败", path))?,
        None => SchedulerConfig::default(),
    };
    if let Some(workers) = args.workers {
        config.worker_count = workers;
    }

    let tasks = match &args.sizes {
        Some(sizes) => sizes.clone(),
        None => random_tasks(args.tasks, args.max_size, args.seed)?,
    };

    let mut scheduler = TaskScheduler::new(config);
    scheduler.submit_tasks(tasks.iter().copied());
    let outcome = scheduler.schedule().context("调度失败")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_report(&tasks, &outcome);
    }
    Ok(())
}

/// 生成 `count` 个大小在 `1..=max_size` 之间的任务
fn random_tasks(count: usize, max_size: u64, seed: u64) -> Result<Vec<TaskSize>> {
    if max_size < 1 {
        bail!("任务大小上限必须 >= 1");
    }
    info!(count, max_size, seed, "生成随机任务");
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count).map(|_| rng.gen_range(1..=max_size)).collect())
}

fn print_report(tasks: &[TaskSize], outcome: &ScheduleOutcome) {
    println!("任务数: {}, 工作节点数: {}", tasks.len(), outcome.initial.worker_count());

    let mut table = Table::new();
    table.add_row(row!["节点", "HAMM任务数", "HAMM负载", "EHAMM任务数", "EHAMM负载"]);
    let initial_loads = outcome.initial.loads();
    let refined_loads = outcome.refined.loads();
    for (slot, (before, after)) in outcome.initial.workers.iter().zip(&outcome.refined.workers).enumerate() {
        table.add_row(row![
            before.slot,
            before.task_count(),
            initial_loads[slot],
            after.task_count(),
            refined_loads[slot]
        ]);
    }
    table.printstd();

    print_summary("HAMM", &outcome.initial_summary());
    print_summary("EHAMM", &outcome.refined_summary());
    println!(
        "重调度: 迁移 {} 次, 节点降级 {} 次",
        outcome.report.migrations, outcome.report.demotions
    );
}

fn print_summary(name: &str, summary: &ScheduleSummary) {
    println!("{} 调度:", name);
    println!("  Makespan: {}", summary.makespan);
    match summary.load_variance {
        Some(variance) => println!("  负载方差: {:.4}", variance),
        None => println!("  负载方差: 单节点无定义"),
    }
}
