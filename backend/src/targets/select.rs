//! Target selection policies
//!
//! # Behavior
//!
//! - **All**: callback once per target, in resolution order
//! - **RandomOne**: callback once with a uniformly random target
//! - **First**: callback once with the first target
//!
//! Every policy makes zero callbacks for an empty target list.

use crate::models::config::SelectionPolicy;
use crate::models::target::Target;
use crate::rng::RngManager;

impl SelectionPolicy {
    /// Apply this policy to `targets`, handing each selected target to `enqueue`
    ///
    /// Returns the number of selected targets.
    ///
    /// # Example
    /// ```
    /// use scheduled_events_core::{RngManager, SelectionPolicy, Target};
    ///
    /// let targets = vec![Target::local("a"), Target::local("b")];
    /// let mut rng = RngManager::new(1);
    /// let mut picked = Vec::new();
    ///
    /// SelectionPolicy::First.apply(&targets, &mut rng, |t| picked.push(t.id.clone()));
    /// assert_eq!(picked, vec!["a"]);
    /// ```
    pub fn apply<F>(self, targets: &[Target], rng: &mut RngManager, mut enqueue: F) -> usize
    where
        F: FnMut(&Target),
    {
        match self {
            SelectionPolicy::All => {
                targets.iter().for_each(&mut enqueue);
                targets.len()
            }
            SelectionPolicy::RandomOne => match rng.pick_index(targets.len()) {
                Some(index) => {
                    enqueue(&targets[index]);
                    1
                }
                None => 0,
            },
            SelectionPolicy::First => match targets.first() {
                Some(target) => {
                    enqueue(target);
                    1
                }
                None => 0,
            },
        }
    }
}
