/*!
 * Heap Simulator - Main Entry Point
 *
 * Runs a scenario against a simulated heap, printing one line per step and
 * the heap state at every report step.
 */

use anyhow::Context;
use heap_sim::{
    init_tracing, render, HeapAllocator, HeapConfig, Operation, Scenario, StepOutcome,
};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = HeapConfig::from_env().context("Failed to load configuration")?;
    info!(?config, "Heap simulator starting");

    let (scenario, mut heap) = match &config.script {
        Some(path) => {
            let scenario = Scenario::load(path)
                .with_context(|| format!("Failed to load scenario {}", path.display()))?;
            let heap = scenario.build_heap(config.free_policy)?;
            (scenario, heap)
        }
        None => {
            let scenario = Scenario {
                capacity: config.capacity,
                strategy: config.strategy,
                ..Scenario::canonical()
            };
            (scenario, HeapAllocator::from_config(&config)?)
        }
    };

    let format = config.report_format;
    let mut render_error = None;

    let steps = scenario.run(&mut heap, |step, heap| {
        match (&step.operation, &step.outcome) {
            (_, StepOutcome::Allocated { block }) => {
                println!("Memory allocated at cells {}..={}.", block.start, block.end)
            }
            (_, StepOutcome::Deallocated { start, length }) => {
                println!("Released {} cells at {}.", length, start)
            }
            (_, StepOutcome::StrategyChanged { strategy }) => {
                println!("Strategy set to: {}", strategy)
            }
            (Operation::Allocate { size }, StepOutcome::Failed { error }) => {
                println!("Error: could not allocate {} cells ({}).", size, error)
            }
            (_, StepOutcome::Failed { error }) => println!("Error: {}", error),
            (_, StepOutcome::Reported) => {}
        }

        if step.operation == Operation::Report {
            match render(&heap.report(), format) {
                Ok(out) => println!("\n{}", out),
                Err(e) if render_error.is_none() => render_error = Some(e),
                Err(_) => {}
            }
        }

        if cfg!(debug_assertions) && step.operation.is_mutating() {
            if let Err(e) = heap.check_invariants() {
                error!(error = %e, step = step.index, "Heap invariants violated");
            }
        }
    });

    if let Some(e) = render_error {
        return Err(e).context("Failed to render heap report");
    }

    let stats = heap.stats();
    info!(
        steps = steps.len(),
        used = stats.used_cells,
        free_extents = stats.free_extents,
        fragmentation = stats.fragmentation,
        pressure = %stats.pressure(),
        "Heap simulator finished"
    );

    Ok(())
}
