//! Critical-path block neighborhood.
//!
//! A move swaps two adjacent operations of a critical block. Only the
//! boundary pairs of each block are considered: swapping operations strictly
//! inside a block cannot shorten the critical path.
//!
//! Shared by [`DescentSolver`](crate::solver::DescentSolver) and
//! [`TabuSolver`](crate::solver::TabuSolver); stateless.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//! Shop Problem", Management Science 42(6)

mod moves;

pub use moves::{Block, Swap};

use crate::encoding::ResourceOrder;
use crate::models::{Instance, Operation};

/// Blocks of the critical path of `order`'s schedule.
///
/// Returns an empty list when `order` is infeasible or incomplete.
pub fn blocks_of_critical_path(instance: &Instance, order: &ResourceOrder) -> Vec<Block> {
    match order.to_schedule(instance) {
        Some(schedule) => blocks_of_path(instance, order, &schedule.critical_path()),
        None => Vec::new(),
    }
}

/// Groups consecutive same-machine operations of `path` into blocks.
///
/// A new group starts whenever the machine changes. Groups of a single
/// operation are dropped. Positions are looked up by linear scan of the
/// machine's sequence.
pub fn blocks_of_path(instance: &Instance, order: &ResourceOrder, path: &[Operation]) -> Vec<Block> {
    let mut blocks = Vec::new();
    for run in path.chunk_by(|a, b| instance.machine(*a) == instance.machine(*b)) {
        let (Some(&head), Some(&tail)) = (run.first(), run.last()) else {
            continue;
        };
        if run.len() < 2 {
            continue;
        }
        let machine = instance.machine(head);
        if let (Some(first), Some(last)) = (
            order.position_of(machine, head),
            order.position_of(machine, tail),
        ) {
            if first < last {
                blocks.push(Block::new(machine, first, last));
            }
        }
    }
    blocks
}

/// Boundary swaps of a block.
///
/// A two-operation block yields the single swap of its pair. A longer block
/// yields the swap of its first two and of its last two positions.
pub fn neighbors(block: &Block) -> Vec<Swap> {
    if block.len() == 2 {
        vec![Swap::new(block.machine, block.last, block.first)]
    } else {
        vec![
            Swap::new(block.machine, block.first, block.first + 1),
            Swap::new(block.machine, block.last - 1, block.last),
        ]
    }
}

/// All boundary swaps of all critical blocks of `order`, in path order.
pub fn candidate_swaps(instance: &Instance, order: &ResourceOrder) -> Vec<Swap> {
    blocks_of_critical_path(instance, order)
        .iter()
        .flat_map(neighbors)
        .collect()
}
