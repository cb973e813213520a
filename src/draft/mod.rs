// Draft-order prediction and pick-ownership resolution.

pub mod assets;
pub mod order;
pub mod standings;
pub mod toilet_bowl;
