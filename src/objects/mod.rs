//! Ships and stations

pub mod behavior;
pub mod object;

pub use behavior::DestructionEffect;
pub use object::SpaceObject;
