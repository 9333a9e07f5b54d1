pub mod destination;
pub mod package;
pub mod pricing;

pub use destination::Destination;
pub use package::Package;
