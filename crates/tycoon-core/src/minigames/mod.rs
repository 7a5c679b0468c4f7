//! Minigame state machines.
//!
//! Each minigame is one bounded interaction: it shows some narration,
//! presents a menu through the dispatcher, and keeps presenting it until
//! one of the chosen actions settles the interaction. Menu actions are
//! small enums; each minigame's handler turns them into transactions on
//! the [`Table`](crate::table::Table) and reports.
//!
//! | Minigame | Menu | Settled by |
//! |----------|------|------------|
//! | [`arrival`] | `LI` `REI` `ALP` `DLP`, or `LI` `RI` `C` | accept, decline, or continue |
//! | [`pre_move_roll`] | `RTD` `BS` | roll |
//! | [`incarceration_roll`] | `RTD` | roll |
//! | [`banking`] | `MS` `Q`, mortgage: `LOP` `Q` | quit |

pub mod arrival;
pub mod banking;
pub mod incarceration_roll;
pub mod pre_move_roll;

pub use arrival::{ArrivalResolution, run_arrival};
pub use banking::run_banking_services;
pub use incarceration_roll::{IncarcerationOutcome, run_incarceration_roll};
pub use pre_move_roll::run_pre_move_roll;
