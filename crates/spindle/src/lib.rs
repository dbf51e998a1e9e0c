pub mod angle;
pub mod config;
pub mod error;
pub mod options;
pub mod protocol;
pub mod realign;
pub mod resolve;
pub mod spin;
pub mod wheel;

pub use angle::normalize;
pub use config::{ClearPolicy, InvalidConfig, ListConfig, RemovalPolicy, SpinConfig};
pub use error::WheelError;
pub use options::{Label, OptionList};
pub use realign::reconcile;
pub use resolve::{Segment, pointer_index, resolve_winner, segments};
pub use spin::{Spin, generate_spin};
pub use wheel::Wheel;
