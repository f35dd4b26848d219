mod mechanism_driver;

pub use mechanism_driver::F5MechanismDriver;
