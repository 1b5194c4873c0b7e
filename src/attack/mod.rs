//! Label-targeted attack bookkeeping for poisoning experiments.
//!
//! Provides the pure index/label manipulations a poisoning study needs
//! around the partitioner and validator:
//!
//! - [`label_flip`] — targeted label flipping and poison-evaluation splits
//! - [`roster`] — seeded adversary selection from the participant population

pub mod label_flip;
pub mod roster;

pub use label_flip::{flip_targeted, flipped_label, split_by_target};
pub use roster::{benign_complement, select_adversaries};
