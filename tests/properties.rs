//! Property tests over random Taillard-style instances.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use u_jobshop::dispatching::PriorityRule;
use u_jobshop::encoding::ResourceOrder;
use u_jobshop::models::Instance;
use u_jobshop::neighborhood::{blocks_of_critical_path, candidate_swaps, neighbors};
use u_jobshop::solver::{Deadline, DescentSolver, GreedySolver, TabuConfig, TabuSolver};

fn instance(seed: u64, jobs: usize, machines: usize) -> Instance {
    Instance::random(jobs, machines, 30, &mut SmallRng::seed_from_u64(seed)).unwrap()
}

/// Random instance with durations in `0..=5`, so many operations share
/// start times.
fn instance_with_zeros(seed: u64, jobs: usize, machines: usize) -> Instance {
    let mut rng = SmallRng::seed_from_u64(seed);
    let jobs: Vec<Vec<(usize, i64)>> = (0..jobs)
        .map(|_| {
            let mut route: Vec<usize> = (0..machines).collect();
            route.shuffle(&mut rng);
            route
                .into_iter()
                .map(|machine| (machine, rng.random_range(0..=5)))
                .collect()
        })
        .collect();
    Instance::new(machines, jobs).unwrap()
}

fn greedy(instance: &Instance, rule: PriorityRule) -> ResourceOrder {
    GreedySolver::new(rule)
        .construct(instance, &Deadline::never())
        .unwrap()
        .0
}

fn rule_strategy() -> impl Strategy<Value = PriorityRule> {
    prop::sample::select(PriorityRule::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_greedy_orderings_are_feasible(
        seed in any::<u64>(),
        jobs in 1usize..9,
        machines in 1usize..6,
        rule in rule_strategy(),
    ) {
        let inst = instance(seed, jobs, machines);
        let order = greedy(&inst, rule);
        prop_assert!(order.is_complete());
        let schedule = order.to_schedule(&inst).unwrap();
        prop_assert!(schedule.is_valid(&inst));
        prop_assert!(schedule.makespan() >= inst.machine_load_bound());
    }

    #[test]
    fn test_greedy_is_deterministic(
        seed in any::<u64>(),
        jobs in 1usize..9,
        machines in 1usize..6,
        rule in rule_strategy(),
    ) {
        let inst = instance(seed, jobs, machines);
        prop_assert_eq!(greedy(&inst, rule), greedy(&inst, rule));
    }

    #[test]
    fn test_schedule_roundtrip(
        seed in any::<u64>(),
        jobs in 1usize..9,
        machines in 1usize..6,
        rule in rule_strategy(),
    ) {
        for inst in [instance(seed, jobs, machines), instance_with_zeros(seed, jobs, machines)] {
            let order = greedy(&inst, rule);
            let schedule = order.to_schedule(&inst).unwrap();
            let derived = ResourceOrder::from_schedule(&inst, &schedule);
            prop_assert_eq!(&derived, &order);
            prop_assert_eq!(derived.to_schedule(&inst).unwrap(), schedule);
        }
    }

    #[test]
    fn test_critical_path_spans_makespan(
        seed in any::<u64>(),
        jobs in 1usize..9,
        machines in 1usize..6,
    ) {
        let inst = instance(seed, jobs, machines);
        let schedule = greedy(&inst, PriorityRule::EstLrpt).to_schedule(&inst).unwrap();
        let path = schedule.critical_path();
        prop_assert_eq!(schedule.start_time(path[0]), 0);
        prop_assert_eq!(schedule.end_time(*path.last().unwrap()), schedule.makespan());
        for pair in path.windows(2) {
            prop_assert_eq!(schedule.end_time(pair[0]), schedule.start_time(pair[1]));
        }
        let length: i64 = path.iter().map(|&op| inst.duration(op)).sum();
        prop_assert_eq!(length, schedule.makespan());
    }

    #[test]
    fn test_swaps_are_involutions(
        seed in any::<u64>(),
        jobs in 2usize..9,
        machines in 1usize..6,
    ) {
        let inst = instance(seed, jobs, machines);
        let order = greedy(&inst, PriorityRule::EstSpt);
        for swap in candidate_swaps(&inst, &order) {
            let mut moved = order.clone();
            swap.apply_on(&mut moved);
            swap.apply_on(&mut moved);
            prop_assert_eq!(&moved, &order);
        }
    }

    #[test]
    fn test_neighbors_touch_block_boundaries(
        seed in any::<u64>(),
        jobs in 2usize..9,
        machines in 1usize..6,
    ) {
        let inst = instance(seed, jobs, machines);
        let order = greedy(&inst, PriorityRule::Spt);
        for block in blocks_of_critical_path(&inst, &order) {
            prop_assert!(block.first < block.last);
            prop_assert!(block.last < inst.num_jobs());
            let swaps = neighbors(&block);
            if block.last - block.first == 1 {
                prop_assert_eq!(swaps.len(), 1);
            } else {
                prop_assert_eq!(swaps.len(), 2);
                prop_assert_eq!((swaps[0].t1, swaps[0].t2), (block.first, block.first + 1));
                prop_assert_eq!((swaps[1].t1, swaps[1].t2), (block.last - 1, block.last));
            }
        }
    }

    #[test]
    fn test_descent_never_worse_than_greedy(
        seed in any::<u64>(),
        jobs in 1usize..8,
        machines in 1usize..5,
    ) {
        let inst = instance(seed, jobs, machines);
        let start = greedy(&inst, PriorityRule::EstLrpt).to_schedule(&inst).unwrap();
        let solution = DescentSolver::new().improve(&inst, &Deadline::never()).unwrap();
        prop_assert!(solution.makespan().unwrap() <= start.makespan());
    }

    #[test]
    fn test_tabu_never_worse_than_greedy(
        seed in any::<u64>(),
        jobs in 1usize..8,
        machines in 1usize..5,
    ) {
        let inst = instance(seed, jobs, machines);
        let start = greedy(&inst, PriorityRule::EstSpt).to_schedule(&inst).unwrap();
        let solution = TabuSolver::new(TabuConfig::default().with_max_iterations(20))
            .search(&inst, &Deadline::never())
            .unwrap();
        let schedule = solution.schedule.unwrap();
        prop_assert!(schedule.is_valid(&inst));
        prop_assert!(schedule.makespan() <= start.makespan());
    }
}
