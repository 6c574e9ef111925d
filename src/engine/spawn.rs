use rand::Rng;

use super::grid::Coords;

/// Source of the two random choices a spawn makes.
///
/// Injected into [`GridEngine`](super::GridEngine) so tests can force a fixed
/// cell and value without touching engine logic.
pub trait SpawnSource {
    /// Pick an index into `free`. `free` is never empty when called.
    fn choose_cell(&mut self, free: &[Coords]) -> usize;

    /// Whether the new tile is a 4 rather than a 2.
    fn spawn_four(&mut self) -> bool;
}

/// Default source: uniform cell, 4 with probability 0.1.
#[derive(Debug, Clone)]
pub struct RandomSpawner<R> {
    rng: R,
}

impl<R: Rng> RandomSpawner<R> {
    pub fn new(rng: R) -> Self {
        RandomSpawner { rng }
    }
}

impl<R: Rng> SpawnSource for RandomSpawner<R> {
    fn choose_cell(&mut self, free: &[Coords]) -> usize {
        self.rng.gen_range(0..free.len())
    }

    fn spawn_four(&mut self) -> bool {
        roll_four(&mut self.rng)
    }
}

impl<S: SpawnSource + ?Sized> SpawnSource for Box<S> {
    fn choose_cell(&mut self, free: &[Coords]) -> usize {
        (**self).choose_cell(free)
    }

    fn spawn_four(&mut self) -> bool {
        (**self).spawn_four()
    }
}

pub(crate) fn roll_four<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_range(0..10) >= 9
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn fours_are_about_one_in_ten() {
        let mut spawner = RandomSpawner::new(StdRng::seed_from_u64(7));
        let fours = (0..10_000).filter(|_| spawner.spawn_four()).count();
        // 10% expected; generous band for a fixed seed
        assert!((700..=1_300).contains(&fours), "fours = {fours}");
    }

    #[test]
    fn cell_choice_stays_in_range_and_covers_all() {
        let mut spawner = RandomSpawner::new(StdRng::seed_from_u64(11));
        let free: Vec<Coords> = (0..5).map(|c| Coords::new(0, c)).collect();
        let mut seen = [false; 5];
        for _ in 0..500 {
            let i = spawner.choose_cell(&free);
            assert!(i < free.len());
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
