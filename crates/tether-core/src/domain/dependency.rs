//! Transitive dependency resolution.
//!
//! Walks `incoming` edges by name through a [`JobGraph`]:
//! - every reachable predecessor is returned once, in discovery order
//! - any predecessor chain longer than `max_depth` (the resolved job counts
//!   as 1) fails with `DependencyDepthExceeded`
//! - a cycle fails with `DependencyDepthExceeded`, or with `CycleDetected`
//!   under `ResolveStrategy::CycleChecked`
//!
//! The walk is an iterative DFS with an explicit stack. Each job is expanded
//! once; its subtree height is memoised so a diamond reached again through a
//! longer path is still checked against the limit.

use std::collections::HashMap;

use tracing::warn;

use crate::config::{ResolveOptions, ResolveStrategy};
use crate::ports::JobGraph;

use super::errors::JobError;
use super::job::Job;

#[derive(Debug, Clone, Copy)]
enum Mark {
    /// On the current DFS path.
    OnPath,
    /// Fully expanded. `height` counts the job and its longest chain below.
    Done { height: usize },
}

struct Frame<'a> {
    /// Name the job was looked up by; marks are keyed on it.
    key: &'a str,
    job: &'a Job,
    next: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    fn new(key: &'a str, job: &'a Job) -> Self {
        Self {
            key,
            job,
            next: 0,
            height: 1,
        }
    }
}

impl Job {
    /// Every job that transitively gates this one, deduplicated by name.
    ///
    /// Uses the resolve options of `graph`.
    pub fn dependencies<'a, G: JobGraph + ?Sized>(
        &'a self,
        graph: &'a G,
    ) -> Result<Vec<&'a Job>, JobError> {
        self.dependencies_with(graph, graph.resolve_options())
    }

    pub fn dependencies_with<'a, G: JobGraph + ?Sized>(
        &'a self,
        graph: &'a G,
        options: ResolveOptions,
    ) -> Result<Vec<&'a Job>, JobError> {
        resolve(self, graph, options)
    }

    /// True when every transitive predecessor finished without failing.
    pub fn dependencies_satisfied<G: JobGraph + ?Sized>(
        &self,
        graph: &G,
    ) -> Result<bool, JobError> {
        let deps = self.dependencies(graph)?;
        Ok(deps
            .iter()
            .all(|dep| !dep.is_enqueued() && dep.is_finished() && !dep.is_failed()))
    }
}

fn resolve<'a, G: JobGraph + ?Sized>(
    root: &'a Job,
    graph: &'a G,
    options: ResolveOptions,
) -> Result<Vec<&'a Job>, JobError> {
    let limit = options.max_depth;
    let mut found: Vec<&'a Job> = Vec::new();
    let mut marks: HashMap<&'a str, Mark> = HashMap::new();
    let mut stack: Vec<Frame<'a>> = vec![Frame::new(root.name(), root)];
    marks.insert(root.name(), Mark::OnPath);

    if limit == 0 {
        return Err(depth_exceeded(root, limit));
    }

    loop {
        let path_len = stack.len();
        let Some(top) = stack.last_mut() else {
            break;
        };
        let (key, job) = (top.key, top.job);

        let Some(name) = job.incoming().get(top.next) else {
            // all predecessors of `job` expanded
            let height = top.height;
            stack.pop();
            marks.insert(key, Mark::Done { height });
            if let Some(parent) = stack.last_mut() {
                parent.height = parent.height.max(height + 1);
            }
            continue;
        };
        top.next += 1;
        let name = name.as_str();

        match marks.get(name).copied() {
            Some(Mark::OnPath) => {
                return Err(match options.strategy {
                    ResolveStrategy::DepthBounded => depth_exceeded(root, limit),
                    ResolveStrategy::CycleChecked => cycle_detected(&stack, name),
                });
            }
            Some(Mark::Done { height }) => {
                if path_len + height > limit {
                    return Err(depth_exceeded(root, limit));
                }
                top.height = top.height.max(height + 1);
            }
            None => {
                let dep = graph.find_job(name)?;
                if path_len + 1 > limit {
                    return Err(depth_exceeded(root, limit));
                }
                found.push(dep);
                marks.insert(name, Mark::OnPath);
                stack.push(Frame::new(name, dep));
            }
        }
    }

    Ok(found)
}

fn depth_exceeded(root: &Job, limit: usize) -> JobError {
    warn!(job = %root.name(), limit, "dependency resolution exceeded depth limit");
    JobError::DependencyDepthExceeded {
        job: root.name().to_string(),
        limit,
    }
}

fn cycle_detected(stack: &[Frame<'_>], revisited: &str) -> JobError {
    let start = stack
        .iter()
        .position(|f| f.key == revisited)
        .unwrap_or(0);
    let mut path: Vec<String> = stack[start..]
        .iter()
        .map(|f| f.key.to_string())
        .collect();
    path.push(revisited.to_string());
    warn!(cycle = %path.join(" -> "), "dependency cycle detected");
    JobError::CycleDetected { path }
}
