mod cli;
mod logging;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing::info;

use tether_core::app::Worker;
use tether_core::config::{ResolveOptions, ResolveStrategy};
use tether_core::domain::JobRecord;
use tether_core::impls::Workflow;
use tether_core::ports::{IdGenerator, SystemClock, UlidGenerator};
use tether_core::typed::{Work, WorkContext, WorkError, WorkRegistry};

use crate::cli::CliArgs;

/// Stand-in payload: logs and succeeds.
struct EchoWork;

#[async_trait]
impl Work for EchoWork {
    async fn perform(&self, ctx: &WorkContext) -> Result<(), WorkError> {
        ctx.logger.info(&format!("performing {} ({})", ctx.name, ctx.klass));
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init_logging(args.log_level)?;

    let options = ResolveOptions {
        max_depth: args.max_depth,
        strategy: if args.cycle_check {
            ResolveStrategy::CycleChecked
        } else {
            ResolveStrategy::DepthBounded
        },
    };
    let ids = UlidGenerator::new(SystemClock);
    let mut workflow = load_workflow(&args.workflow, ids.generate_workflow_id(), options)?;
    info!(workflow = %workflow.id(), jobs = workflow.len(), "workflow loaded");

    if args.dry_run {
        print_readiness(&workflow);
        return Ok(());
    }

    let mut registry = WorkRegistry::new();
    let classes: Vec<_> = workflow.jobs().map(|job| job.klass().clone()).collect();
    for klass in classes {
        if !registry.contains(&klass) {
            registry.register(klass, EchoWork)?;
        }
    }

    let worker = Worker::new(Arc::new(registry), SystemClock, ids);
    let summary = worker.run_to_completion(&mut workflow).await?;
    info!(
        performed = summary.performed,
        succeeded = summary.succeeded.len(),
        failed = summary.failed.len(),
        blocked = ?summary.blocked,
        "workflow run complete"
    );

    println!("{}", serde_json::to_string_pretty(&workflow.to_records())?);
    Ok(())
}

fn load_workflow(
    path: &Path,
    id: tether_core::WorkflowId,
    options: ResolveOptions,
) -> Result<Workflow> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<JobRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of job records", path.display()))?;
    let workflow = Workflow::from_records(id, records)?.with_options(options);
    Ok(workflow)
}

fn print_readiness(workflow: &Workflow) {
    println!("tether dry-run ({} jobs)", workflow.len());
    for job in workflow.jobs() {
        let verdict = match job.can_be_started(workflow) {
            Ok(true) => "ready".to_string(),
            Ok(false) => "waiting".to_string(),
            Err(e) => format!("error: {e}"),
        };
        println!("  - {} [{}] {}", job.name(), job.state(), verdict);
        if !job.incoming().is_empty() {
            println!("      after: {:?}", job.incoming());
        }
    }
}
